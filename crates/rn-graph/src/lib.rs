//! `rn-graph`: road network, spatial queries, and routing.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                  |
//! |------------------|-----------------------------------------------------------|
//! | [`graph`]        | `Graph` (node arena + coordinate index + R-tree), `Node`  |
//! | [`query`]        | range filters, axis-nearest, heading search, snapping     |
//! | [`router`]       | `Router` trait, `Route`, `DijkstraRouter`, `shortest_path`|
//! | [`alternatives`] | `AlternativeSearch`, depth-capped alternative routes      |
//! | [`format`]       | `NODE`/`ENDNODE` text format reader and writer            |
//! | [`error`]        | `SpatialError`, `SpatialResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `rn-core` types.        |

pub mod alternatives;
pub mod error;
pub mod format;
pub mod graph;
pub mod query;
pub mod router;

#[cfg(test)]
mod tests;

pub use alternatives::{Alternative, AlternativeSearch};
pub use error::{SpatialError, SpatialResult};
pub use format::{load_graph, parse_graph, read_graph, save_graph, write_graph};
pub use graph::{Graph, Node, SearchState};
pub use router::{shortest_path, DijkstraRouter, Route, Router};
