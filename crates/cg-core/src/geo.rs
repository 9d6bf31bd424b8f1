//! Planar coordinates of outdoor doors.
//!
//! The outdoor graph places building doors on the campus map in arbitrary
//! map units; distances between them are plain Euclidean distances.

use std::fmt;

/// A point on the campus map.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    /// Placeholder position for doors of indoor graphs.
    pub const ORIGIN: Coordinate = Coordinate { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance in map units.
    #[inline]
    pub fn distance(self, other: Coordinate) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
