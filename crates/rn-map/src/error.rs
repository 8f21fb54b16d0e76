//! Map-subsystem error type.
//!
//! Only construction can fail.  Obstacle toggles report misuse through
//! their `bool`/`Option` return values instead.

use thiserror::Error;

/// Errors produced by `rn-map`.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("expected {expected} pixels for the grid, got {actual}")]
    PixelCount { expected: usize, actual: usize },

    #[error("obstacle {index} has a non-finite or negative dimension")]
    InvalidObstacle { index: usize },

    #[error("obstacle {index} footprint leaves the {width}x{height} grid")]
    FootprintOutOfBounds { index: usize, width: usize, height: usize },
}

pub type MapResult<T> = Result<T, MapError>;
