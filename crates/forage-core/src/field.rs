use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Bounds, Cell, CellRect, Point};

/// Identity of a landscape. Two landscapes with the same identity are
/// assumed to hold the same quality values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LandscapeId(pub Uuid);

impl LandscapeId {
    /// Generate a new random landscape ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LandscapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LandscapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A read-only spatial resource-quality field.
///
/// Predator generation only ever asks these questions of the landscape;
/// storage is up to the implementor.
pub trait QualityField {
    /// Stable identity used as part of the predator cache key.
    fn identity(&self) -> LandscapeId;

    /// The continuous extent covered by the field.
    fn bounds(&self) -> Bounds;

    /// Mean quality over every cell.
    fn average_quality(&self) -> f64;

    /// Quality of a single cell.
    fn intrinsic_quality(&self, cell: Cell) -> f64;

    /// Highest quality anywhere in the field.
    fn max_quality(&self) -> f64;

    /// Highest quality inside a cell rectangle.
    fn max_quality_in(&self, rect: CellRect) -> f64;

    /// The grid cell containing a point. Points outside the field map to
    /// the nearest edge cell.
    fn cell_at(&self, point: Point) -> Cell;
}
