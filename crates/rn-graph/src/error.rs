//! Graph-subsystem error type.

use thiserror::Error;

use rn_core::{NodeId, Point};

/// Errors produced by `rn-graph`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("no graph node within {range} of {point}")]
    SnapFailed { point: Point, range: f64 },

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("graph syntax error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpatialError {
    /// `true` for the two outcomes a caller sees as "no path": the endpoints
    /// could not be placed on the graph, or they are not connected.
    pub fn is_no_path(&self) -> bool {
        matches!(self, SpatialError::NoRoute { .. } | SpatialError::SnapFailed { .. })
    }
}

pub type SpatialResult<T> = Result<T, SpatialError>;
