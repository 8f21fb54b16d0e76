//! Vehicle pose snapshot and the four cardinal travel directions.
//!
//! Headings follow the map's image convention: 0° points along +x, angles
//! grow clockwise on screen, so 90° points along +y (down the image) and
//! 270° points along -y (up the image).

use std::fmt;

use crate::Point;

// ── Direction ─────────────────────────────────────────────────────────────────

/// A cardinal direction on the map image.
///
/// `Up` means decreasing `y`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a heading in degrees onto the 90° quadrant it falls in.
    ///
    /// | Quadrant     | Direction |
    /// |--------------|-----------|
    /// | (45, 135]    | `Down`    |
    /// | (135, 225]   | `Left`    |
    /// | (225, 315]   | `Up`      |
    /// | (315, 45]    | `Right`   |
    ///
    /// The angle is normalised to `[0, 360)` first, so negative and
    /// multi-turn headings are accepted.
    pub fn from_heading_degrees(degrees: f64) -> Self {
        let theta = degrees.rem_euclid(360.0);
        if theta > 45.0 && theta <= 135.0 {
            Direction::Down
        } else if theta > 135.0 && theta <= 225.0 {
            Direction::Left
        } else if theta > 225.0 && theta <= 315.0 {
            Direction::Up
        } else {
            Direction::Right
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up    => "up",
            Direction::Down  => "down",
            Direction::Left  => "left",
            Direction::Right => "right",
        };
        f.write_str(s)
    }
}

// ── VehicleState ──────────────────────────────────────────────────────────────

/// Position and heading of the vehicle at the moment a route is requested.
///
/// Only used to decide where the vehicle enters the graph; never stored.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleState {
    pub x: f64,
    pub y: f64,
    /// Heading in radians.
    pub heading: f64,
}

impl VehicleState {
    #[inline]
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }

    /// Convenience constructor for a heading given in degrees.
    #[inline]
    pub fn from_degrees(x: f64, y: f64, heading_deg: f64) -> Self {
        Self::new(x, y, heading_deg.to_radians())
    }

    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Heading in degrees, normalised to `[0, 360)`.
    #[inline]
    pub fn heading_degrees(&self) -> f64 {
        self.heading.to_degrees().rem_euclid(360.0)
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        Direction::from_heading_degrees(self.heading_degrees())
    }
}
