//! Graph loading entry points.
//!
//! [`get_graphs`] is what a navigation request calls: it fetches and parses
//! every requested building and fails the whole request if any one of them
//! fails, since composition cannot work on a partial set of graphs.  With the
//! `parallel` feature the buildings are loaded on the Rayon pool and joined
//! before returning; ordering among them is irrelevant.
//!
//! [`load_graph_file`] and [`load_graph_reader`] parse a single resource
//! without a [`GraphSource`], e.g. for tooling or tests.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use cg_core::{NavConfig, NodeCache};

use crate::{parse_graph, Graph, GraphError, GraphResult, GraphSource};

/// Fetch and parse the graph of one building.
pub fn load_graph<S: GraphSource + ?Sized>(
    source:   &S,
    building: &str,
    cache:    &NodeCache,
    config:   &NavConfig,
) -> GraphResult<Graph> {
    let text = source.fetch(building)?;
    parse_graph(building, &text, cache, config)
}

/// Load the graphs of every building in `buildings`, keyed by building code.
///
/// Duplicate codes are loaded once.
pub fn get_graphs<'b, S, I>(
    source:    &S,
    buildings: I,
    cache:     &NodeCache,
    config:    &NavConfig,
) -> GraphResult<HashMap<String, Graph>>
where
    S: GraphSource + ?Sized,
    I: IntoIterator<Item = &'b str>,
{
    let mut requested: Vec<&str> = buildings.into_iter().collect();
    requested.sort_unstable();
    requested.dedup();

    #[cfg(feature = "parallel")]
    let loaded: Vec<Graph> = {
        use rayon::prelude::*;
        requested
            .par_iter()
            .map(|building| load_graph(source, building, cache, config))
            .collect::<GraphResult<_>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let loaded: Vec<Graph> = requested
        .iter()
        .map(|building| load_graph(source, building, cache, config))
        .collect::<GraphResult<_>>()?;

    Ok(loaded
        .into_iter()
        .map(|graph| (graph.building.clone(), graph))
        .collect())
}

/// Parse the graph of `building` from a file on disk.
pub fn load_graph_file(
    path:     &Path,
    building: &str,
    cache:    &NodeCache,
    config:   &NavConfig,
) -> GraphResult<Graph> {
    let file = std::fs::File::open(path).map_err(|source| GraphError::Io {
        resource: path.display().to_string(),
        source,
    })?;
    load_graph_reader(file, building, cache, config)
}

/// Like [`load_graph_file`] but accepts any `Read` source.
pub fn load_graph_reader<R: Read>(
    mut reader: R,
    building:   &str,
    cache:      &NodeCache,
    config:     &NavConfig,
) -> GraphResult<Graph> {
    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(|source| GraphError::Io {
        resource: building.to_owned(),
        source,
    })?;
    parse_graph(building, &text, cache, config)
}
