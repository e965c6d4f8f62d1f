//! Grid coordinates and offsets.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A cell on the table grid.
///
/// `x` indexes columns and `y` indexes rows. Coordinates are signed so that
/// footprint translations near the border can be expressed before they are
/// bounds-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Creates a new cell.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The four axis-aligned neighbours, in probing order: west, south, east, north.
    pub fn neighbors_4(self) -> [Cell; 4] {
        [
            Cell::new(self.x - 1, self.y),
            Cell::new(self.x, self.y - 1),
            Cell::new(self.x + 1, self.y),
            Cell::new(self.x, self.y + 1),
        ]
    }

    /// Manhattan (L1) distance to another cell.
    pub fn manhattan_distance(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Squared Euclidean distance to another cell.
    pub fn distance_squared(self, other: Cell) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }

    /// Whether `other` is one of the four axis-aligned neighbours.
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A relative grid vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0, dy: 0 };

    /// Creates a new offset.
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// The offset rotated by 180 degrees.
    pub fn rotated_half_turn(self) -> Self {
        Self::new(-self.dx, -self.dy)
    }
}

impl std::fmt::Display for Offset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:+}, {:+}]", self.dx, self.dy)
    }
}

impl Add<Offset> for Cell {
    type Output = Cell;

    fn add(self, rhs: Offset) -> Cell {
        Cell::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl Sub for Cell {
    type Output = Offset;

    fn sub(self, rhs: Cell) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}
