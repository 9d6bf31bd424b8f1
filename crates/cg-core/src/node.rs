//! Node identity: parsing and encoding of building-qualified node ids.
//!
//! # Id grammar
//!
//! ```text
//! B{BUILDING}#{TYPE}{NAME}
//! ```
//!
//! `TYPE` is a single character (see [`NodeType`]).  Ids read from a graph
//! resource are usually unqualified (`H1h1`) and are qualified with the
//! building whose graph is being parsed (`BGSD#H1h1`).  Ids that already start
//! with `B` are left alone, which is how the outdoor graph refers to the doors
//! of other buildings.
//!
//! Nodes are compared, hashed and ordered by their qualified id only.  Since
//! every other attribute is a pure function of that id plus the building's
//! formatting rules, two nodes built from the same inputs are equal.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::{CoreError, CoreResult, FormattingRules};

/// Prefix marking a fully qualified id.
pub const ID_PREFIX: char = 'B';

/// Separates the building code from the typed name in a qualified id.
pub const BUILDING_SEPARATOR: char = '#';

/// Shared handle to an immutable, cached [`Node`].
pub type NodeRef = Arc<Node>;

// ── NodeType ──────────────────────────────────────────────────────────────────

/// Kind of location a node represents.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeType {
    Door,
    Elevator,
    Hallway,
    Intersection,
    OutdoorSteps,
    Path,
    Room,
    Stairs,
    /// Encoded as `T` so it does not collide with `Stairs`.
    Street,
}

impl NodeType {
    /// Decode the single-character type code.
    pub fn from_code(code: char) -> Option<NodeType> {
        match code {
            'D' => Some(NodeType::Door),
            'E' => Some(NodeType::Elevator),
            'H' => Some(NodeType::Hallway),
            'I' => Some(NodeType::Intersection),
            'O' => Some(NodeType::OutdoorSteps),
            'P' => Some(NodeType::Path),
            'R' => Some(NodeType::Room),
            'S' => Some(NodeType::Stairs),
            'T' => Some(NodeType::Street),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            NodeType::Door => 'D',
            NodeType::Elevator => 'E',
            NodeType::Hallway => 'H',
            NodeType::Intersection => 'I',
            NodeType::OutdoorSteps => 'O',
            NodeType::Path => 'P',
            NodeType::Room => 'R',
            NodeType::Stairs => 'S',
            NodeType::Street => 'T',
        }
    }

    /// `true` for the types whose names encode a floor.
    #[inline]
    pub fn has_floor(self) -> bool {
        matches!(self, NodeType::Room | NodeType::Hallway)
    }

    /// `true` for stairways and elevators.
    #[inline]
    pub fn changes_floor(self) -> bool {
        matches!(self, NodeType::Stairs | NodeType::Elevator)
    }
}

// ── build_id ──────────────────────────────────────────────────────────────────

/// Qualify `raw` with `building` unless it is already qualified.
///
/// Idempotent: `build_id(&build_id(x, b), b) == build_id(x, b)`.
pub fn build_id(raw: &str, building: &str) -> String {
    if raw.starts_with(ID_PREFIX) {
        raw.to_owned()
    } else {
        format!("{ID_PREFIX}{building}{BUILDING_SEPARATOR}{raw}")
    }
}

// ── Node ──────────────────────────────────────────────────────────────────────

/// One addressable location in a building graph or the outdoor graph.
///
/// Immutable after construction.  Obtain instances through
/// [`NodeCache::get_or_build`](crate::NodeCache::get_or_build) so that every
/// graph in a session shares the same handle for the same location.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    raw_id:       String,
    id:           String,
    node_type:    NodeType,
    name:         String,
    building:     String,
    floor:        Option<String>,
    floor_number: Option<i32>,
}

impl Node {
    /// Parse `raw_id` in the context of `building`.
    ///
    /// The owning building is taken from the qualified id, so a door of
    /// `GSD` referenced from the outdoor graph as `BGSD#D1` belongs to `GSD`.
    ///
    /// # Errors
    ///
    /// [`CoreError::MalformedNodeId`] if the qualified id has no building
    /// separator, an empty building code, or an unknown type character.
    pub fn new(raw_id: &str, building: &str, rules: &FormattingRules) -> CoreResult<Node> {
        let id = build_id(raw_id, building);
        let malformed = |reason| CoreError::MalformedNodeId { id: id.clone(), reason };

        let (owner, typed_name) = id[ID_PREFIX.len_utf8()..]
            .split_once(BUILDING_SEPARATOR)
            .ok_or_else(|| malformed("missing building separator"))?;
        if owner.is_empty() {
            return Err(malformed("empty building code"));
        }

        let mut chars = typed_name.chars();
        let code = chars.next().ok_or_else(|| malformed("missing type code"))?;
        let node_type = NodeType::from_code(code).ok_or_else(|| malformed("unknown type code"))?;
        let name = chars.as_str().to_owned();
        let owner = owner.to_owned();

        let floor = if node_type.has_floor() { rules.floor_of(&name) } else { None };
        let floor_number = floor.as_deref().and_then(|label| rules.floor_number(label));

        Ok(Node {
            raw_id: raw_id.to_owned(),
            building: owner,
            id,
            node_type,
            name,
            floor,
            floor_number,
        })
    }

    /// The id exactly as it appeared in the source resource.
    pub fn raw_id(&self) -> &str {
        &self.raw_id
    }

    /// Building-qualified id, unique across all graphs.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Display name: the qualified id minus building and type code.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shorthand code of the owning building.
    pub fn building(&self) -> &str {
        &self.building
    }

    /// Floor label, present only for rooms and hallways matched by a rule.
    pub fn floor(&self) -> Option<&str> {
        self.floor.as_deref()
    }

    /// Numeric floor for ordinal phrases; `-1` for basements.
    pub fn floor_number(&self) -> Option<i32> {
        self.floor_number
    }

    /// `true` if the node belongs to the outdoor graph's building code.
    pub fn is_outside(&self, outdoor_building: &str) -> bool {
        self.building == outdoor_building
    }

    /// Stairways can never be part of a wheelchair-accessible route.
    pub fn is_accessible(&self) -> bool {
        self.node_type != NodeType::Stairs
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
