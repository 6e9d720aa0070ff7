use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::field::{LandscapeId, QualityField};
use crate::geometry::{Bounds, Cell, CellRect, Point};

/// On-disk form of a landscape: one row of qualities per `y`, starting at `y = 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LandscapeFile {
    rows: Vec<Vec<f64>>,
}

/// A dense grid of unit cells, each holding a non-negative resource quality.
///
/// Cell `(x, y)` covers `[x, x + 1) x [y, y + 1)`. Average and maximum
/// quality are computed once at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "LandscapeFile", into = "LandscapeFile")]
pub struct GridLandscape {
    id: LandscapeId,
    width: usize,
    height: usize,
    cells: Vec<f64>,
    average: f64,
    max: f64,
}

impl GridLandscape {
    /// Build a landscape from row-major cell qualities.
    pub fn new(width: usize, height: usize, cells: Vec<f64>) -> CoreResult<Self> {
        if width == 0 || height == 0 || cells.len() != width * height {
            return Err(CoreError::InvalidShape {
                width,
                height,
                cells: cells.len(),
            });
        }
        if let Some((i, &value)) = cells
            .iter()
            .enumerate()
            .find(|(_, q)| !q.is_finite() || **q < 0.0)
        {
            return Err(CoreError::InvalidQuality {
                x: i % width,
                y: i / width,
                value,
            });
        }

        let average = cells.iter().sum::<f64>() / cells.len() as f64;
        let max = cells.iter().copied().fold(0.0, f64::max);
        Ok(Self {
            id: LandscapeId::new(),
            width,
            height,
            cells,
            average,
            max,
        })
    }

    /// Build a landscape from rows, where `rows[y][x]` is the quality of cell `(x, y)`.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> CoreResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != width) {
            let cells = rows.iter().map(Vec::len).sum();
            return Err(CoreError::InvalidShape {
                width,
                height,
                cells,
            });
        }
        Self::new(width, height, rows.into_iter().flatten().collect())
    }

    /// A landscape where every cell has the same quality.
    pub fn uniform(width: usize, height: usize, quality: f64) -> CoreResult<Self> {
        Self::new(width, height, vec![quality; width * height])
    }

    /// Parse a landscape from its JSON form (`{"rows": [[...], ...]}`).
    ///
    /// Each parse produces a fresh [`LandscapeId`].
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the landscape to pretty-printed JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        (cell.x < self.width && cell.y < self.height).then(|| cell.y * self.width + cell.x)
    }
}

impl TryFrom<LandscapeFile> for GridLandscape {
    type Error = CoreError;

    fn try_from(file: LandscapeFile) -> CoreResult<Self> {
        Self::from_rows(file.rows)
    }
}

impl From<GridLandscape> for LandscapeFile {
    fn from(landscape: GridLandscape) -> Self {
        Self {
            rows: landscape
                .cells
                .chunks(landscape.width)
                .map(<[f64]>::to_vec)
                .collect(),
        }
    }
}

impl QualityField for GridLandscape {
    fn identity(&self) -> LandscapeId {
        self.id
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width as f64, self.height as f64)
    }

    fn average_quality(&self) -> f64 {
        self.average
    }

    fn intrinsic_quality(&self, cell: Cell) -> f64 {
        self.index(cell).map_or(0.0, |i| self.cells[i])
    }

    fn max_quality(&self) -> f64 {
        self.max
    }

    fn max_quality_in(&self, rect: CellRect) -> f64 {
        let max_x = rect.max.x.min(self.width - 1);
        let max_y = rect.max.y.min(self.height - 1);
        let mut best = 0.0_f64;
        for y in rect.min.y..=max_y {
            for x in rect.min.x..=max_x {
                best = best.max(self.cells[y * self.width + x]);
            }
        }
        best
    }

    fn cell_at(&self, point: Point) -> Cell {
        let clamp = |v: f64, len: usize| (v.floor().max(0.0) as usize).min(len - 1);
        Cell::new(clamp(point.x, self.width), clamp(point.y, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn two_by_two() -> GridLandscape {
        GridLandscape::from_rows(vec![vec![0.4, 0.0], vec![0.1, 0.9]]).unwrap()
    }

    #[test]
    fn average_and_max() {
        let land = two_by_two();
        assert!((land.average_quality() - 0.35).abs() < 1e-12);
        assert!((land.max_quality() - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn intrinsic_quality_by_cell() {
        let land = two_by_two();
        assert!((land.intrinsic_quality(Cell::new(0, 0)) - 0.4).abs() < f64::EPSILON);
        assert!((land.intrinsic_quality(Cell::new(1, 1)) - 0.9).abs() < f64::EPSILON);
        assert_eq!(land.intrinsic_quality(Cell::new(5, 5)), 0.0);
    }

    #[test]
    fn max_quality_in_sub_rectangle() {
        let land = two_by_two();
        let top_row = CellRect::new(Cell::new(0, 0), Cell::new(1, 0));
        assert!((land.max_quality_in(top_row) - 0.4).abs() < f64::EPSILON);
        let oversized = CellRect::new(Cell::new(1, 0), Cell::new(9, 9));
        assert!((land.max_quality_in(oversized) - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn cell_at_floors_and_clamps() {
        let land = two_by_two();
        assert_eq!(land.cell_at(Point::new(0.0, 0.0)), Cell::new(0, 0));
        assert_eq!(land.cell_at(Point::new(1.99, 0.5)), Cell::new(1, 0));
        assert_eq!(land.cell_at(Point::new(-3.0, 7.0)), Cell::new(0, 1));
    }

    #[test]
    fn rejects_bad_shape_and_quality() {
        assert!(matches!(
            GridLandscape::new(2, 2, vec![0.1; 3]),
            Err(CoreError::InvalidShape { cells: 3, .. })
        ));
        assert!(matches!(
            GridLandscape::from_rows(vec![vec![0.1, 0.2], vec![0.3]]),
            Err(CoreError::InvalidShape { .. })
        ));
        assert!(matches!(
            GridLandscape::new(2, 1, vec![0.1, -1.0]),
            Err(CoreError::InvalidQuality { x: 1, y: 0, .. })
        ));
        assert!(GridLandscape::uniform(0, 3, 1.0).is_err());
    }

    #[test]
    fn json_round_trip_keeps_values_not_identity() {
        let land = two_by_two();
        let json = land.to_json().unwrap();
        let loaded = GridLandscape::from_json(&json).unwrap();
        assert_eq!(loaded.width(), 2);
        assert_eq!(loaded.height(), 2);
        assert!((loaded.intrinsic_quality(Cell::new(1, 1)) - 0.9).abs() < f64::EPSILON);
        assert_ne!(loaded.identity(), land.identity());
    }

    #[test]
    fn clone_keeps_identity() {
        let land = two_by_two();
        assert_eq!(land.clone().identity(), land.identity());
    }

    proptest! {
        #[test]
        fn cell_at_always_inside_grid(x in -50.0f64..50.0, y in -50.0f64..50.0) {
            let land = GridLandscape::uniform(7, 3, 1.0).unwrap();
            let cell = land.cell_at(Point::new(x, y));
            prop_assert!(cell.x < 7);
            prop_assert!(cell.y < 3);
        }
    }
}
