//! Route result type.

use cg_core::NodeRef;
use cg_graph::Edge;

/// An ordered walk through one or more graphs.
///
/// `edges[0]` leaves `source`; each following edge leaves the node the
/// previous edge reached.  `distance` is always the sum of the edge
/// distances, whatever cost the search used to pick the path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub source:   NodeRef,
    pub edges:    Vec<Edge>,
    pub distance: u64,
}

impl Path {
    /// Build a path from its edges, summing their distances.
    pub fn new(source: NodeRef, edges: Vec<Edge>) -> Self {
        let distance = edges.iter().map(|e| u64::from(e.distance)).sum();
        Self { source, edges, distance }
    }

    /// The empty path that starts and ends at `source`.
    pub fn trivial(source: NodeRef) -> Self {
        Self { source, edges: Vec::new(), distance: 0 }
    }

    /// Last node of the path.
    pub fn target(&self) -> &NodeRef {
        self.edges.last().map_or(&self.source, |e| &e.node)
    }

    /// `true` if the path has no edges.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    /// Every node visited, `source` first.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeRef> {
        std::iter::once(&self.source).chain(self.edges.iter().map(|e| &e.node))
    }

    /// Append `next`, which must start where `self` ends.
    pub fn join(mut self, next: Path) -> Path {
        debug_assert_eq!(self.target(), &next.source);
        self.distance += next.distance;
        self.edges.extend(next.edges);
        self
    }
}
