//! `rn-core`: foundational types for the `roadnav` route planner.
//!
//! This crate is a dependency of every other `rn-*` crate.  It has no `rn-*`
//! dependencies and a single external one (`thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`geo`]       | `Point`, `CoordKey`, Euclidean distance               |
//! | [`ids`]       | `NodeId`                                              |
//! | [`vehicle`]   | `VehicleState`, `Direction`                           |
//! | [`config`]    | `PlannerConfig`                                       |
//! | [`error`]     | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod vehicle;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::PlannerConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{CoordKey, Point};
pub use ids::NodeId;
pub use vehicle::{Direction, VehicleState};
