//! Relative turns between consecutive edge directions.

use cg_core::{NodeRef, NodeType};
use cg_graph::{EdgeDirection, Graph};

/// Turn taken when changing from one map direction to another.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Turn {
    Left,
    Right,
    Straight,
}

/// The turn from facing `from` to facing `to`.
///
/// Keeping the same direction and reversing both count as straight.
pub fn turning_direction(from: EdgeDirection, to: EdgeDirection) -> Turn {
    use EdgeDirection::{Down, Left, Right, Up};
    match (from, to) {
        (Down, Left) | (Up, Right) | (Left, Up) | (Right, Down) => Turn::Right,
        (Down, Right) | (Up, Left) | (Left, Down) | (Right, Up) => Turn::Left,
        _ => Turn::Straight,
    }
}

/// Side hallways seen while walking through one or more hallway nodes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MissedHalls {
    pub left:     u32,
    pub right:    u32,
    /// Hallways continuing straight ahead.
    pub straight: u32,
}

impl MissedHalls {
    /// Count on the side of `turn`; `straight` for [`Turn::Straight`].
    pub fn on(&self, turn: Turn) -> u32 {
        match turn {
            Turn::Left => self.left,
            Turn::Right => self.right,
            Turn::Straight => self.straight,
        }
    }

    /// Add the side counts of `other`.  Straight counts are per node and
    /// are not carried over.
    pub fn absorb(&mut self, other: MissedHalls) {
        self.left += other.left;
        self.right += other.right;
    }
}

/// Hallways branching off `node` relative to `facing`, ignoring the nodes in
/// `skip` (normally the hallway walked in from and the one walked out to).
pub fn count_missed_halls(graph: &Graph, node: &NodeRef, facing: EdgeDirection, skip: &[&NodeRef]) -> MissedHalls {
    let mut halls = MissedHalls::default();
    for edge in graph.edges(node) {
        if edge.node.node_type() != NodeType::Hallway || skip.contains(&&edge.node) {
            continue;
        }
        match turning_direction(facing, edge.direction) {
            Turn::Left => halls.left += 1,
            Turn::Right => halls.right += 1,
            Turn::Straight if edge.direction == facing => halls.straight += 1,
            Turn::Straight => {}
        }
    }
    halls
}
