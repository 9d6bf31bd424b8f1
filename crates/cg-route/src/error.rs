//! Route-subsystem error type.

use thiserror::Error;

/// Errors produced by the `*_or_err` entry points.
///
/// The plain search functions report a missing route as an absent value; use
/// these when a caller has no fallback and wants a typed error instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("no path from {from} to {to} (accessible only: {accessible})")]
    NoPathFound {
        from:       String,
        to:         String,
        accessible: bool,
    },
}

pub type RouteResult<T> = Result<T, RouteError>;
