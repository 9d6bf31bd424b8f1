//! Graph-subsystem error type.

use thiserror::Error;

use cg_core::CoreError;

use crate::ParseState;

/// Errors produced while fetching or parsing a building graph.
///
/// Any of these fails the whole navigation request: a partially parsed graph
/// would silently drop edges from route search.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("{building} graph, line {line_number} in {state}: {reason} (line: {line:?})")]
    Parse {
        building:    String,
        line_number: usize,
        line:        String,
        state:       ParseState,
        reason:      String,
    },

    #[error("{building} graph, line {line_number}: {source}")]
    Node {
        building:    String,
        line_number: usize,
        #[source]
        source:      CoreError,
    },

    #[error("no graph resource {resource} for building {building}")]
    MissingResource { building: String, resource: String },

    #[error("I/O error reading {resource}: {source}")]
    Io {
        resource: String,
        #[source]
        source:   std::io::Error,
    },
}

impl GraphError {
    /// The underlying node identity error, if this is one.
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            GraphError::Node { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
