use std::fmt;

use serde::{Deserialize, Serialize};

/// A location in continuous landscape coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Shift both coordinates by the same amount.
    pub fn offset(&self, by: f64) -> Self {
        Self::new(self.x + by, self.y + by)
    }

    /// Bit-exact key, used to collapse duplicate locations.
    pub fn bits(&self) -> (u64, u64) {
        (self.x.to_bits(), self.y.to_bits())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Integer coordinates of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
}

impl Cell {
    /// Create a cell from its column and row.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// An inclusive rectangle of grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRect {
    /// Lowest column and row.
    pub min: Cell,
    /// Highest column and row (inclusive).
    pub max: Cell,
}

impl CellRect {
    /// Create a rectangle spanning `min..=max` in both axes.
    pub const fn new(min: Cell, max: Cell) -> Self {
        Self { min, max }
    }
}

/// A half-open box of continuous coordinates: `[min_x, max_x) x [min_y, max_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub min_x: f64,
    /// Bottom edge.
    pub min_y: f64,
    /// Right edge (exclusive).
    pub max_x: f64,
    /// Top edge (exclusive).
    pub max_y: f64,
}

impl Bounds {
    /// Create bounds from the two corners.
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// The centre of the box.
    pub fn midpoint(&self) -> Point {
        Point::new(
            self.min_x + self.width() / 2.0,
            self.min_y + self.height() / 2.0,
        )
    }

    /// The quadrant with the largest x and y coordinates.
    pub fn upper_right_quadrant(&self) -> Self {
        let mid = self.midpoint();
        Self::new(mid.x, mid.y, self.max_x, self.max_y)
    }

    /// Check whether a point lies inside the half-open box.
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min_x && p.x < self.max_x && p.y >= self.min_y && p.y < self.max_y
    }
}
