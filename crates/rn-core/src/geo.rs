//! Planar coordinate type.
//!
//! Coordinates are centimetres on the track map, with the image convention
//! that `y` grows downwards.  Equality is exact: two points are the same
//! graph location only if both coordinates match bit for bit.

use std::fmt;

/// An `(x, y)` position on the map.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to `other`.  This is also the cost of an edge.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Hashable key for coordinate lookups.
    #[inline]
    pub fn key(self) -> CoordKey {
        CoordKey::from(self)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── CoordKey ──────────────────────────────────────────────────────────────────

/// Bit-exact hash key of a [`Point`].
///
/// `f64` is not `Hash`/`Eq`, so coordinate maps key on the raw bit patterns.
/// `-0.0` is folded onto `0.0` so that the key agrees with `Point`'s
/// `PartialEq`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct CoordKey(u64, u64);

impl From<Point> for CoordKey {
    #[inline]
    fn from(p: Point) -> Self {
        // Adding 0.0 turns -0.0 into +0.0 and leaves every other value alone.
        CoordKey((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
    }
}
