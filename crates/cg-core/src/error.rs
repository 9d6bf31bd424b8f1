//! Core error type.
//!
//! Both variants indicate a content bug in a graph resource rather than a
//! transient condition; callers should fail the whole navigation request.

use thiserror::Error;

/// Errors produced by `cg-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("malformed node id {id:?}: {reason}")]
    MalformedNodeId { id: String, reason: &'static str },

    #[error("invalid floor rule {key:?}={pattern:?}: {source}")]
    InvalidFloorRule {
        key:     String,
        pattern: String,
        #[source]
        source:  regex::Error,
    },
}

/// Shorthand result type for `cg-core`.
pub type CoreResult<T> = Result<T, CoreError>;
