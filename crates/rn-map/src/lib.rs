//! `rn-map`: occupancy grid with toggleable obstacles.
//!
//! Independent of the road graph: the planner never reads the grid, it only
//! needs the two to share coordinates.
//!
//! | Module         | Contents                                        |
//! |----------------|-------------------------------------------------|
//! | [`grid`]       | `CellState`, `OccupancyGrid`                    |
//! | [`obstacle`]   | `ObstacleSpec`, `Obstacle`                      |
//! | [`map`]        | `Map` (activation, restoration, lookups)        |
//! | [`error`]      | `MapError`, `MapResult<T>`                      |

pub mod error;
pub mod grid;
pub mod map;
pub mod obstacle;


pub use error::{MapError, MapResult};
pub use grid::{CellState, OccupancyGrid};
pub use map::{Map, Toggle};
pub use obstacle::{Obstacle, ObstacleSpec};
