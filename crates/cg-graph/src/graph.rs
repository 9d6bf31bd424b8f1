//! In-memory building graph.
//!
//! # Data layout
//!
//! A `Graph` is a general directed graph keyed by shared [`NodeRef`]s.  Each
//! node's outgoing edges are kept in an ordered `Vec<Edge>` in the order the
//! resource listed them; a reverse edge exists only where the resource
//! defines one explicitly.
//!
//! Alongside the adjacency list a graph carries the auxiliary tables the
//! narrator needs: exits (doors, with map coordinates in the outdoor graph),
//! administratively excluded node pairs, street and intersection metadata,
//! bilingual street names, and the building's formatting rules.

use std::collections::{HashMap, HashSet};
use std::fmt;

use cg_core::{Coordinate, FormattingRules, NodeRef, NodeType};

// ── EdgeDirection ─────────────────────────────────────────────────────────────

/// Facing direction on the map after traversing an edge.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl EdgeDirection {
    pub fn from_code(code: &str) -> Option<EdgeDirection> {
        match code {
            "U" => Some(EdgeDirection::Up),
            "D" => Some(EdgeDirection::Down),
            "L" => Some(EdgeDirection::Left),
            "R" => Some(EdgeDirection::Right),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            EdgeDirection::Up => 'U',
            EdgeDirection::Down => 'D',
            EdgeDirection::Left => 'L',
            EdgeDirection::Right => 'R',
        }
    }

    /// Slot of this direction in an intersection's cross-street list.
    #[inline]
    pub(crate) fn crossing_slot(self) -> usize {
        match self {
            EdgeDirection::Left => 0,
            EdgeDirection::Up => 1,
            EdgeDirection::Right => 2,
            EdgeDirection::Down => 3,
        }
    }
}

impl fmt::Display for EdgeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ── Edge ──────────────────────────────────────────────────────────────────────

/// A directed connection to `node`.  Never mutated after loading.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// Target of the edge.
    pub node: NodeRef,
    /// Facing direction after traversal.
    pub direction: EdgeDirection,
    /// Non-negative weight in graph units.
    pub distance: u32,
    /// `false` if the edge needs stairs or another wheelchair obstacle.
    pub accessible: bool,
}

// ── StreetName ────────────────────────────────────────────────────────────────

/// English and French name of a street.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreetName {
    pub en: String,
    pub fr: String,
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// The graph of one building, or of the outdoor space between buildings.
///
/// All fields are `pub` for direct access by the search and narration code.
/// Do not construct directly; use [`parse_graph`](crate::parse_graph) or one
/// of the loaders.
#[derive(Clone, Debug)]
pub struct Graph {
    /// Building code the graph was requested for.
    pub building: String,

    /// Campus the building belongs to.
    pub campus: String,

    /// Outgoing edges of each source node, in resource order.
    pub adjacencies: HashMap<NodeRef, Vec<Edge>>,

    /// Node pairs whose connecting edge exists but is closed.  Recorded in
    /// both directions.
    pub excluded: HashMap<NodeRef, HashSet<NodeRef>>,

    /// Doors of the graph.  Outdoor graphs map them to map coordinates;
    /// building graphs use [`Coordinate::ORIGIN`] as a placeholder.
    pub exits: HashMap<NodeRef, Coordinate>,

    /// `[FORMAT]` rules, consulted for floor detection.
    pub formatting_rules: FormattingRules,

    /// Raw cross-street encoding of each intersection: four comma separated
    /// street ids for the left, up, right and down crossings.
    pub intersections: HashMap<NodeRef, String>,

    /// Street id of each street segment node.
    pub streets: HashMap<NodeRef, String>,

    /// Bilingual names keyed by street id.
    pub street_names: HashMap<String, StreetName>,
}

impl Graph {
    /// An empty graph for `building` on `campus`.
    pub fn new(building: &str, campus: &str) -> Self {
        Self {
            building:         building.to_owned(),
            campus:           campus.to_owned(),
            adjacencies:      HashMap::new(),
            excluded:         HashMap::new(),
            exits:            HashMap::new(),
            formatting_rules: FormattingRules::new(),
            intersections:    HashMap::new(),
            streets:          HashMap::new(),
            street_names:     HashMap::new(),
        }
    }

    /// Number of nodes with an adjacency list.
    pub fn node_count(&self) -> usize {
        self.adjacencies.len()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacencies.values().map(Vec::len).sum()
    }

    /// Outgoing edges of `node`; empty if it has none.
    pub fn edges(&self, node: &NodeRef) -> &[Edge] {
        self.adjacencies.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First edge from `from` to `to`, if any.
    pub fn edge_between(&self, from: &NodeRef, to: &NodeRef) -> Option<&Edge> {
        self.edges(from).iter().find(|e| &e.node == to)
    }

    /// `true` if travel from `from` to `to` is administratively closed.
    #[inline]
    pub fn is_excluded(&self, from: &NodeRef, to: &NodeRef) -> bool {
        self.excluded.get(from).is_some_and(|set| set.contains(to))
    }

    /// Bilingual name of a street segment node.
    pub fn street_name(&self, node: &NodeRef) -> Option<&StreetName> {
        if node.node_type() != NodeType::Street {
            return None;
        }
        self.streets.get(node).and_then(|id| self.street_names.get(id.trim()))
    }

    /// Name of the street crossed when leaving `intersection` in `direction`.
    pub fn crossed_street(&self, intersection: &NodeRef, direction: EdgeDirection) -> Option<&StreetName> {
        let encoded = self.intersections.get(intersection)?;
        let id = encoded.split(',').nth(direction.crossing_slot())?.trim();
        if id.is_empty() {
            return None;
        }
        self.street_names.get(id)
    }
}

/// Doors of each requested building, as registered in `graph`'s exits.
///
/// Used on the outdoor graph to find which of its doors lead into the start
/// and target buildings.
pub fn doors_for_buildings<'a, I>(graph: &Graph, buildings: I) -> HashMap<String, HashSet<NodeRef>>
where
    I: IntoIterator<Item = &'a str>,
{
    let wanted: HashSet<&str> = buildings.into_iter().collect();
    let mut doors: HashMap<String, HashSet<NodeRef>> = HashMap::new();
    for door in graph.exits.keys() {
        if wanted.contains(door.building()) {
            doors.entry(door.building().to_owned()).or_default().insert(NodeRef::clone(door));
        }
    }
    doors
}
