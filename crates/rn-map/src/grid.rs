//! Row-major occupancy grid.
//!
//! Cell `(x, y)` is column `x`, row `y`; row 0 is the top of the image, so
//! `y` grows downwards like everywhere else in the planner.

use crate::{MapError, MapResult};

/// State of one grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Free,
    Blocked,
    /// Buffer zone around a blocked area.
    Padding,
}

impl CellState {
    /// Decode a single-channel pixel: black is blocked, white is free, and
    /// every grey level is padding.
    pub fn from_pixel(value: u8) -> Self {
        match value {
            0 => CellState::Blocked,
            255 => CellState::Free,
            _ => CellState::Padding,
        }
    }

    pub fn is_free(self) -> bool {
        self == CellState::Free
    }
}

/// A `width × height` grid of [`CellState`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl OccupancyGrid {
    /// An all-free grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![CellState::Free; width * height] }
    }

    /// Build a grid from decoded image pixels, row by row.
    pub fn from_pixels(width: usize, height: usize, pixels: &[u8]) -> MapResult<Self> {
        let cells = pixels.iter().map(|&p| CellState::from_pixel(p)).collect();
        Self::from_cells(width, height, cells)
    }

    pub fn from_cells(width: usize, height: usize, cells: Vec<CellState>) -> MapResult<Self> {
        let expected = width * height;
        if cells.len() != expected {
            return Err(MapError::PixelCount { expected, actual: cells.len() });
        }
        Ok(Self { width, height, cells })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// The cell at column `x`, row `y`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<CellState> {
        self.contains(x, y).then(|| self.cells[y * self.width + x])
    }

    /// Overwrite one cell.  Returns the previous state, or `None` (and
    /// changes nothing) outside the grid.
    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> Option<CellState> {
        if !self.contains(x, y) {
            return None;
        }
        let cell = &mut self.cells[y * self.width + x];
        Some(std::mem::replace(cell, state))
    }

    /// Number of cells in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }
}
