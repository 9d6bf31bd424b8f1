//! Path search trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The navigator calls search through the [`PathFinder`] trait, so callers
//! can swap in another algorithm without touching composition or narration.
//! [`Dijkstra`] is the default.
//!
//! # Search rules
//!
//! One search settles nodes outward from `start` and stops as soon as every
//! reachable target has been settled.  While relaxing the edges of a node:
//!
//! * edges into a room that is not a target are skipped, so routes never cut
//!   through rooms;
//! * edges between an excluded pair are skipped;
//! * with `accessible` set, edges flagged inaccessible and edges into stairs
//!   are skipped.
//!
//! Frontier ties are broken by insertion order, so results are deterministic
//! for a given graph.
//!
//! # Reversed search
//!
//! A reversed search still explores forward from `start`, but each returned
//! path runs from its target back to `start` along the graph's explicit
//! reverse edges.  A target whose route has no usable reverse edge somewhere
//! along it is dropped from the result.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use cg_core::{NavConfig, NodeRef, NodeType};
use cg_graph::{Edge, Graph};

use crate::{Path, RouteError, RouteResult};

#[cfg(feature = "fx-hash")]
type NodeMap<V> = rustc_hash::FxHashMap<NodeRef, V>;
#[cfg(not(feature = "fx-hash"))]
type NodeMap<V> = HashMap<NodeRef, V>;

// ── SearchOptions ─────────────────────────────────────────────────────────────

/// Per-search switches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    /// Only use accessible edges and never enter stairs.
    pub accessible: bool,

    /// Return each path oriented from its target back to the start.
    pub reversed: bool,

    /// Extra cost for a second floor change in one building, or for stairs
    /// spanning more than `max_stair_floors`.  `None` disables penalties.
    pub floor_change_penalty: Option<u32>,

    pub max_stair_floors: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::from_config(&NavConfig::default(), false)
    }
}

impl SearchOptions {
    /// Options for a plain forward search.
    pub fn new(accessible: bool) -> Self {
        Self { accessible, ..Self::default() }
    }

    /// Forward search options carrying the penalties of `config`.
    pub fn from_config(config: &NavConfig, accessible: bool) -> Self {
        Self {
            accessible,
            reversed: false,
            floor_change_penalty: config.floor_change_penalty,
            max_stair_floors: config.max_stair_floors,
        }
    }

    /// The same options with reversed path orientation.
    pub fn reversed(self) -> Self {
        Self { reversed: true, ..self }
    }

    /// The same options with forward path orientation.
    pub fn forward(self) -> Self {
        Self { reversed: false, ..self }
    }

    /// `true` if `edge` may be traversed under these options.
    #[inline]
    pub fn allows(&self, edge: &Edge) -> bool {
        !self.accessible || (edge.accessible && edge.node.is_accessible())
    }
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable single-source, multi-target shortest path search.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one finder can serve concurrent
/// navigation requests.
pub trait PathFinder: Send + Sync {
    /// Shortest paths from `start` to every reachable node of `targets`.
    ///
    /// Unreachable targets are absent from the result.  A target equal to
    /// `start` maps to a trivial path.
    fn find_paths(
        &self,
        start:   &NodeRef,
        targets: &HashSet<NodeRef>,
        graph:   &Graph,
        options: &SearchOptions,
    ) -> HashMap<NodeRef, Path>;

    /// Shortest path from `start` to `target`, if one exists.
    fn find_path(
        &self,
        start:   &NodeRef,
        target:  &NodeRef,
        graph:   &Graph,
        options: &SearchOptions,
    ) -> Option<Path> {
        let targets = HashSet::from([NodeRef::clone(target)]);
        self.find_paths(start, &targets, graph, options).remove(target)
    }
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

/// Dijkstra's algorithm over a building graph's adjacency lists.
#[derive(Copy, Clone, Debug, Default)]
pub struct Dijkstra;

impl PathFinder for Dijkstra {
    fn find_paths(
        &self,
        start:   &NodeRef,
        targets: &HashSet<NodeRef>,
        graph:   &Graph,
        options: &SearchOptions,
    ) -> HashMap<NodeRef, Path> {
        let search = Search::run(start, targets, graph, options);
        search.paths(targets)
    }
}

/// [`Dijkstra`] search from `start` to each node of `targets`.
pub fn find_shortest_paths(
    start:   &NodeRef,
    targets: &HashSet<NodeRef>,
    graph:   &Graph,
    options: &SearchOptions,
) -> HashMap<NodeRef, Path> {
    Dijkstra.find_paths(start, targets, graph, options)
}

/// [`Dijkstra`] search from `start` to `target`.
pub fn find_shortest_path(
    start:   &NodeRef,
    target:  &NodeRef,
    graph:   &Graph,
    options: &SearchOptions,
) -> Option<Path> {
    Dijkstra.find_path(start, target, graph, options)
}

/// Like [`find_shortest_path`] but reports a missing route as an error.
pub fn find_shortest_path_or_err(
    start:   &NodeRef,
    target:  &NodeRef,
    graph:   &Graph,
    options: &SearchOptions,
) -> RouteResult<Path> {
    find_shortest_path(start, target, graph, options).ok_or_else(|| RouteError::NoPathFound {
        from:       start.id().to_owned(),
        to:         target.id().to_owned(),
        accessible: options.accessible,
    })
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// State of one finished search.
struct Search<'g> {
    start:   NodeRef,
    graph:   &'g Graph,
    options: SearchOptions,
    /// prev[v] = (node that reached v, index of the edge in its adjacency).
    prev:    NodeMap<(NodeRef, usize)>,
    reached: Vec<NodeRef>,
}

impl<'g> Search<'g> {
    fn run(
        start:   &NodeRef,
        targets: &HashSet<NodeRef>,
        graph:   &'g Graph,
        options: &SearchOptions,
    ) -> Self {
        let mut search = Search {
            start:   NodeRef::clone(start),
            graph,
            options: *options,
            prev:    NodeMap::default(),
            reached: Vec::new(),
        };
        if targets.is_empty() {
            return search;
        }

        // Every known node starts unreached.
        let mut dist: NodeMap<u64> = graph
            .adjacencies
            .keys()
            .map(|node| (NodeRef::clone(node), u64::MAX))
            .collect();
        dist.insert(NodeRef::clone(start), 0);

        // Min-heap: (cost, insertion sequence, node).  The sequence number
        // breaks ties first-in first-out, before node ids are ever compared.
        let mut heap: BinaryHeap<Reverse<(u64, u64, NodeRef)>> = BinaryHeap::new();
        let mut sequence = 0u64;
        heap.push(Reverse((0, sequence, NodeRef::clone(start))));
        let mut settled = 0usize;

        while let Some(Reverse((cost, _, node))) = heap.pop() {
            // Skip stale heap entries.
            if cost > dist.get(&node).copied().unwrap_or(u64::MAX) {
                continue;
            }
            settled += 1;

            if targets.contains(&node) {
                search.reached.push(NodeRef::clone(&node));
                if search.reached.len() == targets.len() {
                    break;
                }
            }

            for (index, edge) in graph.edges(&node).iter().enumerate() {
                if !search.admits(&node, edge, targets) {
                    continue;
                }

                let new_cost = cost
                    .saturating_add(u64::from(edge.distance))
                    .saturating_add(search.penalty(&node, edge));

                if new_cost < dist.get(&edge.node).copied().unwrap_or(u64::MAX) {
                    dist.insert(NodeRef::clone(&edge.node), new_cost);
                    search.prev.insert(NodeRef::clone(&edge.node), (NodeRef::clone(&node), index));
                    sequence += 1;
                    heap.push(Reverse((new_cost, sequence, NodeRef::clone(&edge.node))));
                }
            }
        }

        tracing::debug!(
            start = %start,
            building = %graph.building,
            targets = targets.len(),
            reached = search.reached.len(),
            settled,
            accessible = options.accessible,
            "shortest path search"
        );
        search
    }

    fn admits(&self, from: &NodeRef, edge: &Edge, targets: &HashSet<NodeRef>) -> bool {
        if edge.node.node_type() == NodeType::Room && !targets.contains(&edge.node) {
            return false;
        }
        !self.graph.is_excluded(from, &edge.node) && self.options.allows(edge)
    }

    /// Penalty for traversing `edge` out of `node`; zero unless enabled.
    fn penalty(&self, node: &NodeRef, edge: &Edge) -> u64 {
        let Some(penalty) = self.options.floor_change_penalty else {
            return 0;
        };
        let mut extra = 0;

        if node.node_type() == NodeType::Stairs {
            let came_from = self.prev.get(node).and_then(|(before, _)| before.floor_number());
            if let (Some(from), Some(to)) = (came_from, edge.node.floor_number()) {
                if from.abs_diff(to) > self.options.max_stair_floors {
                    extra += u64::from(penalty);
                }
            }
        }

        if edge.node.node_type().changes_floor()
            && !node.node_type().changes_floor()
            && self.changed_floor_before(node)
        {
            extra += u64::from(penalty);
        }
        extra
    }

    /// `true` if the current route to `node` already used stairs or an elevator.
    fn changed_floor_before(&self, node: &NodeRef) -> bool {
        let mut cur = node;
        while let Some((before, _)) = self.prev.get(cur) {
            if before.node_type().changes_floor() {
                return true;
            }
            cur = before;
        }
        false
    }

    fn paths(&self, targets: &HashSet<NodeRef>) -> HashMap<NodeRef, Path> {
        let mut paths = HashMap::with_capacity(self.reached.len());
        for target in &self.reached {
            let path = if self.options.reversed {
                self.reversed_path(target)
            } else {
                Some(self.forward_path(target))
            };
            if let Some(path) = path {
                paths.insert(NodeRef::clone(target), path);
            }
        }
        debug_assert!(paths.keys().all(|k| targets.contains(k)));
        paths
    }

    fn forward_path(&self, target: &NodeRef) -> Path {
        let mut edges = Vec::new();
        let mut cur = target;
        while let Some((before, index)) = self.prev.get(cur) {
            edges.push(self.graph.edges(before)[*index].clone());
            cur = before;
        }
        edges.reverse();
        Path::new(NodeRef::clone(&self.start), edges)
    }

    fn reversed_path(&self, target: &NodeRef) -> Option<Path> {
        let mut edges = Vec::new();
        let mut cur = target;
        while let Some((before, _)) = self.prev.get(cur) {
            let back = self
                .graph
                .edges(cur)
                .iter()
                .find(|e| &e.node == before && !self.graph.is_excluded(cur, before) && self.options.allows(e));
            match back {
                Some(edge) => edges.push(edge.clone()),
                None => {
                    tracing::warn!(
                        from = %cur,
                        to = %before,
                        target = %target,
                        "no usable reverse edge; dropping target from reversed search"
                    );
                    return None;
                }
            }
            cur = before;
        }
        Some(Path::new(NodeRef::clone(target), edges))
    }
}
