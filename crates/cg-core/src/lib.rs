//! `cg-core` — foundational types for the campus navigation engine.
//!
//! This crate is a dependency of every other `cg-*` crate.  It has no `cg-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`node`]    | `Node`, `NodeType`, `NodeRef`, `build_id`                  |
//! | [`cache`]   | `NodeCache` (atomic get-or-insert, shareable across loads) |
//! | [`format`]  | `FormattingRules`: per-building floor detection rules     |
//! | [`geo`]     | `Coordinate`, Euclidean distance                           |
//! | [`config`]  | `NavConfig`                                                |
//! | [`error`]   | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to public value types.      |

pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod geo;
pub mod node;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cache::NodeCache;
pub use config::NavConfig;
pub use error::{CoreError, CoreResult};
pub use format::FormattingRules;
pub use geo::Coordinate;
pub use node::{build_id, Node, NodeRef, NodeType};
