//! Planner error type.

use thiserror::Error;

use rn_core::{CoreError, Direction, Point};
use rn_graph::SpatialError;

/// Errors produced by `rn-plan`.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("no graph node ahead of the vehicle at {position} facing {direction}")]
    NoStartNode { position: Point, direction: Direction },

    /// Waypoint `waypoint` (0-based) could not be reached from the end of
    /// the path planned so far.
    #[error("waypoint {waypoint} at {point} is unreachable")]
    Unreachable {
        waypoint: usize,
        point: Point,
        #[source]
        source: SpatialError,
    },

    #[error("path index {index} out of bounds for a path of {len} points")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("segment start {start} lies after its end {end}")]
    InvalidRange { start: usize, end: usize },

    #[error("{0} is not a graph node")]
    NotOnGraph(Point),

    #[error(transparent)]
    Routing(#[from] SpatialError),

    #[error(transparent)]
    Config(#[from] CoreError),
}

pub type PlanResult<T> = Result<T, PlanError>;
