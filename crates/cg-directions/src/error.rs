use thiserror::Error;

use cg_core::CoreError;
use cg_graph::GraphError;

/// Errors that fail a whole navigation request.
///
/// A route that cannot be found is not an error: it is reported as a single
/// step with `show_report` set on the results.
#[derive(Debug, Error)]
pub enum DirectionsError {
    #[error("graph loading failed: {0}")]
    Graph(#[from] GraphError),

    #[error("invalid destination: {0}")]
    Destination(#[from] CoreError),

    #[error("graph for building {0} was not loaded")]
    MissingGraph(String),

    #[error("invalid destination {0:?}: expected \"BUILDING [ROOM]\"")]
    Unparsable(String),

    #[error("unknown language {0:?}")]
    UnknownLanguage(String),
}

pub type DirectionsResult<T> = Result<T, DirectionsError>;
