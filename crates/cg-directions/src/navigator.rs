//! Navigation session: load graphs, find a route, narrate it.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use cg_core::{NavConfig, NodeCache, NodeRef, NodeType};
use cg_graph::{get_graphs, Graph, GraphResult, GraphSource};
use cg_route::{compose_across, distances_between_doors, CompositionWeights, Dijkstra, Path, PathFinder, SearchOptions};

use crate::{Catalog, DirectionResults, DirectionsError, DirectionsResult, Language, Narrator, Translator};

/// Raw id of the door used when a destination names no room.
pub const DEFAULT_DOOR: &str = "D1";

// ── Destination ───────────────────────────────────────────────────────────────

/// A building, optionally narrowed to one of its rooms.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Destination {
    pub building: String,
    pub room:     Option<String>,
}

impl Destination {
    pub fn new(building: &str, room: Option<&str>) -> Self {
        Self { building: building.to_owned(), room: room.map(str::to_owned) }
    }

    pub fn building(building: &str) -> Self {
        Self::new(building, None)
    }

    pub fn room(building: &str, room: &str) -> Self {
        Self::new(building, Some(room))
    }

    /// Unqualified id of the node a route starts or ends at: the room, or
    /// the building's main door.
    pub fn raw_node_id(&self) -> String {
        match &self.room {
            Some(room) => format!("{}{room}", NodeType::Room.code()),
            None => DEFAULT_DOOR.to_owned(),
        }
    }
}

/// `GSD 101`, or `GSD` without a room.
impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.room {
            Some(room) => write!(f, "{} {room}", self.building),
            None => f.write_str(&self.building),
        }
    }
}

impl FromStr for Destination {
    type Err = DirectionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(building), room, None) => Ok(Self::new(building, room)),
            _ => Err(DirectionsError::Unparsable(s.to_owned())),
        }
    }
}

// ── NavigatorBuilder ──────────────────────────────────────────────────────────

/// Fluent builder for [`Navigator<S, T, F>`].
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                 |
/// |------------------|-------------------------|
/// | `.config(c)`     | `NavConfig::default()`  |
/// | `.translator(t)` | [`Catalog::default()`]  |
/// | `.finder(f)`     | [`Dijkstra`]            |
///
/// # Example
///
/// ```rust,ignore
/// let navigator = NavigatorBuilder::new(DirectorySource::new("data")).build();
/// let results = navigator.get_directions_between(
///     &"GSD 101".parse()?,
///     &"STE 110".parse()?,
///     false,
///     Language::En,
/// )?;
/// ```
pub struct NavigatorBuilder<S: GraphSource, T: Translator = Catalog, F: PathFinder = Dijkstra> {
    source:     S,
    translator: T,
    finder:     F,
    config:     NavConfig,
}

impl<S: GraphSource> NavigatorBuilder<S> {
    pub fn new(source: S) -> Self {
        Self { source, translator: Catalog::default(), finder: Dijkstra, config: NavConfig::default() }
    }
}

impl<S: GraphSource, T: Translator, F: PathFinder> NavigatorBuilder<S, T, F> {
    pub fn config(mut self, config: NavConfig) -> Self {
        self.config = config;
        self
    }

    pub fn translator<U: Translator>(self, translator: U) -> NavigatorBuilder<S, U, F> {
        NavigatorBuilder { source: self.source, translator, finder: self.finder, config: self.config }
    }

    pub fn finder<G: PathFinder>(self, finder: G) -> NavigatorBuilder<S, T, G> {
        NavigatorBuilder { source: self.source, translator: self.translator, finder, config: self.config }
    }

    pub fn build(self) -> Navigator<S, T, F> {
        Navigator {
            source:     self.source,
            translator: self.translator,
            finder:     self.finder,
            config:     self.config,
            cache:      NodeCache::new(),
        }
    }
}

// ── Navigator ─────────────────────────────────────────────────────────────────

/// Entry point for navigation requests.
///
/// Owns the node cache shared by every graph it loads.  Graphs themselves
/// are loaded per request, so edits to the graph resources are picked up
/// without rebuilding the navigator.
pub struct Navigator<S: GraphSource, T: Translator = Catalog, F: PathFinder = Dijkstra> {
    source:     S,
    translator: T,
    finder:     F,
    config:     NavConfig,
    cache:      NodeCache,
}

impl<S: GraphSource, T: Translator, F: PathFinder> Navigator<S, T, F> {
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    pub fn cache(&self) -> &NodeCache {
        &self.cache
    }

    /// Drop every cached node.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Load the graphs of `buildings`, keyed by building code.
    pub fn graphs<'b, I>(&self, buildings: I) -> GraphResult<HashMap<String, Graph>>
    where
        I: IntoIterator<Item = &'b str>,
    {
        get_graphs(&self.source, buildings, &self.cache, &self.config)
    }

    /// Shortest route between two destinations within already loaded
    /// `graphs`, or `None` if there is none.
    ///
    /// Routes within one building are a single search.  Routes between
    /// buildings are composed from the start building's exits, the outdoor
    /// graph and the target building's entrances.
    pub fn find_path(
        &self,
        graphs:     &HashMap<String, Graph>,
        start:      &Destination,
        target:     &Destination,
        accessible: bool,
    ) -> DirectionsResult<Option<Path>> {
        let start_graph = graph(graphs, &start.building)?;
        let target_graph = graph(graphs, &target.building)?;
        let start_node = self.resolve(start, start_graph)?;
        let target_node = self.resolve(target, target_graph)?;
        let options = SearchOptions::from_config(&self.config, accessible);

        if start.building == target.building {
            return Ok(self.finder.find_path(&start_node, &target_node, start_graph, &options));
        }

        let outdoor = graph(graphs, &self.config.outdoor_building)?;
        let exits: HashSet<NodeRef> = start_graph.exits.keys().cloned().collect();
        let entrances: HashSet<NodeRef> = target_graph.exits.keys().cloned().collect();

        let start_to_exits = self.finder.find_paths(&start_node, &exits, start_graph, &options);
        let exits_to_target = self.finder.find_paths(&target_node, &entrances, target_graph, &options.reversed());
        let door_distances = distances_between_doors(start_to_exits.keys(), exits_to_target.keys(), outdoor);

        Ok(compose_across(
            &self.finder,
            &start_to_exits,
            &exits_to_target,
            &door_distances,
            outdoor,
            &options,
            CompositionWeights::from_config(&self.config),
        ))
    }

    /// Load the graphs a request needs, route it and narrate the result.
    ///
    /// # Errors
    ///
    /// Fails if a graph cannot be loaded or a destination does not form a
    /// valid node id.  A missing route is not an error: the results then
    /// hold one explanatory step and `show_report` is set.
    pub fn get_directions_between(
        &self,
        start:      &Destination,
        target:     &Destination,
        accessible: bool,
        language:   Language,
    ) -> DirectionsResult<DirectionResults> {
        let mut buildings = vec![start.building.as_str(), target.building.as_str()];
        if start.building != target.building {
            buildings.push(&self.config.outdoor_building);
        }
        let graphs = self.graphs(buildings)?;
        let path = self.find_path(&graphs, start, target, accessible)?;

        tracing::info!(
            %start,
            %target,
            accessible,
            found = path.is_some(),
            distance = path.as_ref().map(|p| p.distance),
            "directions request"
        );

        let narrator = Narrator::new(&graphs, &self.translator, &self.config);
        Ok(narrator.narrate(path.as_ref(), &start.to_string(), &target.to_string(), accessible, language))
    }

    fn resolve(&self, destination: &Destination, graph: &Graph) -> DirectionsResult<NodeRef> {
        let raw = destination.raw_node_id();
        Ok(self.cache.get_or_build(&raw, &destination.building, &graph.formatting_rules)?)
    }
}

fn graph<'g>(graphs: &'g HashMap<String, Graph>, building: &str) -> DirectionsResult<&'g Graph> {
    graphs.get(building).ok_or_else(|| DirectionsError::MissingGraph(building.to_owned()))
}
