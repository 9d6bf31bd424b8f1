//! `cg-graph` — building graphs and their text resources.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`graph`]  | `Graph`, `Edge`, `EdgeDirection`, `StreetName`, `doors_for_buildings` |
//! | [`parser`] | `ParseState`, `parse_graph` (line-oriented section parser)    |
//! | [`source`] | `GraphSource` trait, `DirectorySource`, `MemorySource`        |
//! | [`loader`] | `load_graph`, `get_graphs`, `load_graph_file`, `load_graph_reader` |
//! | [`error`]  | `GraphError`, `GraphResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | `get_graphs` loads buildings concurrently via Rayon.      |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public value types.  |

pub mod error;
pub mod graph;
pub mod loader;
pub mod parser;
pub mod source;

#[cfg(test)]
mod tests;

pub use error::{GraphError, GraphResult};
pub use graph::{doors_for_buildings, Edge, EdgeDirection, Graph, StreetName};
pub use loader::{get_graphs, load_graph, load_graph_file, load_graph_reader};
pub use parser::{parse_graph, ParseState};
pub use source::{resource_name, DirectorySource, GraphSource, MemorySource};
