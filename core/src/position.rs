//! Grid coordinates.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable, non-negative coordinate pair. Used as a value type —
/// organisms are handed a fresh `Position` on every placement instead
/// of holding a reference back into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Build a position, rejecting negative coordinates.
    pub fn new(x: i32, y: i32) -> SimResult<Self> {
        if x < 0 || y < 0 {
            return Err(SimError::InvalidCoordinate { x, y });
        }
        Ok(Self { x, y })
    }

    /// In-crate constructor for coordinates already known to be valid
    /// (grid iteration, clipped offsets).
    pub(crate) fn from_xy(x: i32, y: i32) -> Self {
        debug_assert!(x >= 0 && y >= 0);
        Self { x, y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Manhattan distance to another position.
    pub fn distance_to(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Offset by a delta; `None` if either coordinate would go negative.
    pub fn offset(&self, dx: i32, dy: i32) -> Option<Position> {
        let x = self.x + dx;
        let y = self.y + dy;
        (x >= 0 && y >= 0).then_some(Self { x, y })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
