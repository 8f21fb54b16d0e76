//! Rectangular obstacles and their grid footprints.

use crate::{CellState, OccupancyGrid};

/// Declaration of an obstacle, in grid units.
///
/// `(x, y)` is the lower-left corner of the rectangle.  With `y` growing
/// downwards the rectangle extends up from there: it covers columns
/// `x .. x + width` and rows `y - (height - 1) ..= y`.  The outer `padding`
/// cells of the rectangle are drawn as [`CellState::Padding`], the rest as
/// [`CellState::Blocked`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleSpec {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl ObstacleSpec {
    pub const fn new(x: f64, y: f64, width: f64, height: f64, padding: f64) -> Self {
        Self { x, y, width, height, padding }
    }

    /// The obstacles placed along the demo track.
    pub fn track_catalog() -> Vec<ObstacleSpec> {
        vec![
            ObstacleSpec::new(178.0, 375.0, 20.0, 31.0, 2.0),
            ObstacleSpec::new(202.0, 436.0, 14.0, 22.0, 2.0),
            ObstacleSpec::new(147.0, 686.0, 100.0, 100.0, 1.0),
            ObstacleSpec::new(288.0, 844.0, 40.0, 35.0, 3.0),
        ]
    }

    /// `true` if every field is finite and no dimension is negative.
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height, self.padding]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
            && self.padding >= 0.0
    }

    /// `true` if the footprint lies inside `grid`.  An empty footprint
    /// always fits.  Checked on the declared values, so dimensions too large
    /// for the integer footprint are rejected rather than saturated.
    pub fn fits(&self, grid: &OccupancyGrid) -> bool {
        let (width, height) = (self.width.ceil(), self.height.ceil());
        if width == 0.0 || height == 0.0 {
            return true;
        }
        let (x0, y0) = (self.x.trunc(), self.y.trunc());
        x0 >= 0.0
            && y0 - (height - 1.0) >= 0.0
            && x0 + width <= grid.width() as f64
            && y0 < grid.height() as f64
    }
}

/// An obstacle of a [`Map`](crate::Map) and, while active, the cells it
/// replaced.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    spec: ObstacleSpec,
    /// Pre-activation values of the footprint, in [`Footprint::cells`]
    /// order.  `Some` exactly while the obstacle is active.
    pub(crate) backup: Option<Vec<CellState>>,
}

impl Obstacle {
    pub fn new(spec: ObstacleSpec) -> Self {
        Self { spec, backup: None }
    }

    pub fn spec(&self) -> &ObstacleSpec {
        &self.spec
    }

    pub fn is_active(&self) -> bool {
        self.backup.is_some()
    }

    pub(crate) fn footprint(&self) -> Footprint {
        Footprint {
            x0: self.spec.x.trunc() as i64,
            y0: self.spec.y.trunc() as i64,
            width: self.spec.width.ceil() as usize,
            height: self.spec.height.ceil() as usize,
            padding: self.spec.padding.ceil() as usize,
        }
    }
}

/// Integer cell rectangle of an obstacle.  Origin coordinates truncate,
/// dimensions round up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Footprint {
    pub x0: i64,
    pub y0: i64,
    pub width: usize,
    pub height: usize,
    pub padding: usize,
}

/// One footprint cell: row offset `i` (upwards from the origin), column
/// offset `j`, and the grid cell `(x, y)` it maps to.
#[derive(Copy, Clone, Debug)]
pub(crate) struct FootprintCell {
    pub i: usize,
    pub j: usize,
    pub x: usize,
    pub y: usize,
}

impl Footprint {
    fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Cells row by row, starting at the origin row and moving up.  Only
    /// meaningful for a spec that [`fits`](ObstacleSpec::fits) its grid.
    pub fn cells(&self) -> impl Iterator<Item = FootprintCell> + '_ {
        (0..self.height).flat_map(move |i| {
            (0..self.width).map(move |j| FootprintCell {
                i,
                j,
                x: (self.x0 + j as i64) as usize,
                y: (self.y0 - i as i64) as usize,
            })
        })
    }

    /// What an active obstacle draws at row offset `i`, column offset `j`.
    pub fn state_at(&self, i: usize, j: usize) -> CellState {
        let p = self.padding;
        let on_border = i < p
            || self.height - i <= p
            || j < p
            || self.width - j <= p;
        if on_border { CellState::Padding } else { CellState::Blocked }
    }

    /// `true` if integer cell `(x, y)` lies in the declared rectangle.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        if self.is_empty() {
            return false;
        }
        let h = self.height as i64;
        let w = self.width as i64;
        x >= self.x0 && x < self.x0 + w && y > self.y0 - h && y <= self.y0
    }
}
