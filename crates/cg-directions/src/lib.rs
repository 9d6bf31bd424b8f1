//! `cg-directions` — turn-by-turn directions for the campus navigation engine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`navigator`] | `Navigator`, `NavigatorBuilder`, `Destination` (request entry point) |
//! | [`narrator`]  | `Narrator`: path to ordered, bilingual steps                   |
//! | [`phrases`]   | `Description` and the English/French sentence templates         |
//! | [`turn`]      | `Turn`, `turning_direction`, `count_missed_halls`               |
//! | [`language`]  | `Language`, `Translator` trait, `Catalog`, `ordinal`            |
//! | [`step`]      | `Step`, `StepIcon`, `DirectionResults`                          |
//! | [`error`]     | `DirectionsError`, `DirectionsResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Load the graphs of a request concurrently.                |
//! | `serde`    | Derives `Serialize`/`Deserialize` on result types.        |

pub mod error;
pub mod language;
pub mod narrator;
pub mod navigator;
pub mod phrases;
pub mod step;
pub mod turn;

#[cfg(test)]
mod tests;

pub use error::{DirectionsError, DirectionsResult};
pub use language::{ordinal, Catalog, Language, Translator};
pub use narrator::Narrator;
pub use navigator::{Destination, Navigator, NavigatorBuilder};
pub use phrases::Description;
pub use step::{DirectionResults, Step, StepIcon};
pub use turn::{count_missed_halls, turning_direction, MissedHalls, Turn};
