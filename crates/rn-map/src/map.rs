//! Occupancy grid plus a fixed, ordered obstacle list.
//!
//! # Restoration
//!
//! Activating an obstacle copies every footprint cell into the obstacle's
//! backup before drawing it; deactivating writes the backup back verbatim.
//! For a single obstacle this restores the grid exactly.
//!
//! Overlapping footprints are not guarded against.  If `B` is activated
//! while `A` is active and overlaps it, `B`'s backup records `A`'s cells;
//! removing `A` first and then `B` re-draws `A` in the overlap.  Callers
//! that overlap obstacles must deactivate them in reverse activation order.

use log::{debug, warn};

use crate::obstacle::Footprint;
use crate::{CellState, MapError, MapResult, Obstacle, ObstacleSpec, OccupancyGrid};

/// Outcome of [`Map::toggle_obstacle`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Toggle {
    Activated,
    Deactivated,
}

#[derive(Clone, Debug)]
pub struct Map {
    grid: OccupancyGrid,
    obstacles: Vec<Obstacle>,
}

impl Map {
    /// Wrap `grid` with the obstacles in `specs` (all inactive).
    ///
    /// Fails if a spec is malformed or its footprint does not fit inside the
    /// grid.
    pub fn new(grid: OccupancyGrid, specs: impl IntoIterator<Item = ObstacleSpec>) -> MapResult<Self> {
        let mut obstacles = Vec::new();
        for (index, spec) in specs.into_iter().enumerate() {
            if !spec.is_valid() {
                return Err(MapError::InvalidObstacle { index });
            }
            if !spec.fits(&grid) {
                return Err(MapError::FootprintOutOfBounds {
                    index,
                    width: grid.width(),
                    height: grid.height(),
                });
            }
            obstacles.push(Obstacle::new(spec));
        }
        Ok(Self { grid, obstacles })
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn obstacle(&self, index: usize) -> Option<&Obstacle> {
        self.obstacles.get(index)
    }

    /// Draw obstacle `index` onto the grid.
    ///
    /// Returns `false` and changes nothing if the index is out of range or
    /// the obstacle is already active.
    pub fn add_obstacle(&mut self, index: usize) -> bool {
        let Some(obstacle) = self.checked(index) else {
            return false;
        };
        if obstacle.is_active() {
            return false;
        }
        let footprint = obstacle.footprint();

        let backup = draw(&mut self.grid, &footprint);
        self.obstacles[index].backup = Some(backup);
        debug!("obstacle {index} activated");
        true
    }

    /// Restore the cells under obstacle `index`.
    ///
    /// Returns `false` and changes nothing if the index is out of range or
    /// the obstacle is not active.
    pub fn remove_obstacle(&mut self, index: usize) -> bool {
        if self.checked(index).is_none() {
            return false;
        }
        let obstacle = &mut self.obstacles[index];
        let footprint = obstacle.footprint();
        let Some(backup) = obstacle.backup.take() else {
            return false;
        };

        for (cell, prior) in footprint.cells().zip(backup) {
            self.grid.set(cell.x, cell.y, prior);
        }
        debug!("obstacle {index} deactivated");
        true
    }

    /// Activate obstacle `index` if it is inactive, deactivate it otherwise.
    /// `None` for an out-of-range index.
    pub fn toggle_obstacle(&mut self, index: usize) -> Option<Toggle> {
        let active = self.checked(index)?.is_active();
        if active {
            self.remove_obstacle(index);
            Some(Toggle::Deactivated)
        } else {
            self.add_obstacle(index);
            Some(Toggle::Activated)
        }
    }

    /// State of the cell containing `(x, y)`.  Coordinates truncate toward
    /// zero; `None` outside the grid.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<CellState> {
        let (x, y) = (x.trunc(), y.trunc());
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        self.grid.get(x as usize, y as usize)
    }

    /// Index of the first obstacle whose declared rectangle contains the
    /// cell at `(x, y)`, whether or not it is active.
    pub fn obstacle_at(&self, x: f64, y: f64) -> Option<usize> {
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        let (x, y) = (x.trunc() as i64, y.trunc() as i64);
        self.obstacles.iter().position(|o| o.footprint().contains(x, y))
    }

    fn checked(&self, index: usize) -> Option<&Obstacle> {
        let obstacle = self.obstacles.get(index);
        if obstacle.is_none() {
            warn!("obstacle index {index} out of bounds ({} obstacles)", self.obstacles.len());
        }
        obstacle
    }
}

/// Paint `footprint` and return the values it replaced.
fn draw(grid: &mut OccupancyGrid, footprint: &Footprint) -> Vec<CellState> {
    footprint
        .cells()
        .map(|cell| {
            let state = footprint.state_at(cell.i, cell.j);
            grid.set(cell.x, cell.y, state).unwrap_or_default()
        })
        .collect()
}
