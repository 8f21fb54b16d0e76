//! `rn-plan` turns a vehicle pose and a waypoint list into a reference
//! path over the road graph, and offers whole-path alternatives for any
//! segment of it.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use rn_core::{PlannerConfig, Point, VehicleState};
//! use rn_plan::PathCoordinator;
//!
//! let planner = PathCoordinator::load(Path::new("graph.txt"), PlannerConfig::default())?;
//! let vehicle = VehicleState::from_degrees(237.0, 869.0, 180.0);
//! let path = planner.plan(&vehicle, &[Point::new(101.0, 765.0), Point::new(358.0, 535.0)])?;
//! let alternatives = planner.alternatives(&path.points, path.waypoint_indexes[1], path.waypoint_indexes[2])?;
//! # Ok::<(), rn_plan::PlanError>(())
//! ```

pub mod coordinator;
pub mod error;


pub use coordinator::{PathCoordinator, RefPath};
pub use error::{PlanError, PlanResult};
