//! `cg-route` — route search for the campus navigation engine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`path`]    | `Path`: an ordered edge list with its source and total distance |
//! | [`search`]  | `PathFinder` trait, `Dijkstra`, `SearchOptions`, single-source multi-target search |
//! | [`compose`] | `distances_between_doors`, `compose_across`                     |
//! | [`error`]   | `RouteError`, `RouteResult<T>`                                  |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                      |
//! |-----------|-------------------------------------------------------------|
//! | `fx-hash` | Use FxHash for the search's per-node bookkeeping maps.     |
//! | `serde`   | Derives `Serialize`/`Deserialize` on `Path`.                |

pub mod compose;
pub mod error;
pub mod path;
pub mod search;


pub use compose::{compose_across, distances_between_doors, CompositionWeights, DoorDistances};
pub use error::{RouteError, RouteResult};
pub use path::Path;
pub use search::{
    find_shortest_path, find_shortest_path_or_err, find_shortest_paths, Dijkstra, PathFinder,
    SearchOptions,
};
