//! Raster coordinate frame derived from a point cloud extent.

use serde::{Deserialize, Serialize};

use crate::core::{CellIndex, PointSet, WorldPoint};
use crate::error::{Result, TerrainError};

/// World extent of a terrain grid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainBounds {
    /// Upper x bound (origin.x + cols * resolution)
    pub x_max: f32,
    /// Lower x bound (origin.x)
    pub x_min: f32,
    /// Upper y bound (origin.y + rows * resolution)
    pub y_max: f32,
    /// Lower y bound (origin.y)
    pub y_min: f32,
}

/// Largest grid accepted, in cells (512 MiB per f32 layer).
pub const MAX_GRID_CELLS: usize = 1 << 27;

/// Mapping between world coordinates and cell indices.
///
/// The grid uses a coordinate system where:
/// - Cell (row, col) is sampled at `origin + (col, row) * resolution`
/// - Columns follow +X, rows follow +Y
/// - Cell (row, col) covers `[origin + col*res, origin + (col+1)*res)` in x
///   (and likewise in y); the last row and column also own the upper bound
///
/// `x_max` and `y_max` always equal `origin + dim * resolution`, which can be
/// up to one cell beyond the data extent because dimensions are rounded up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridFrame {
    resolution: f32,
    origin: WorldPoint,
    rows: usize,
    cols: usize,
    x_max: f32,
    y_max: f32,
}

impl GridFrame {
    /// Create a frame with explicit origin and dimensions.
    ///
    /// Fails if the grid would exceed [`MAX_GRID_CELLS`].
    pub fn new(origin: WorldPoint, resolution: f32, rows: usize, cols: usize) -> Result<Self> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(TerrainError::InvalidConfiguration(format!(
                "resolution must be positive, got {}",
                resolution
            )));
        }
        if rows == 0 || cols == 0 {
            return Err(TerrainError::InvalidConfiguration(format!(
                "grid must have at least one cell, got {}x{}",
                rows, cols
            )));
        }
        match rows.checked_mul(cols) {
            Some(cells) if cells <= MAX_GRID_CELLS => {}
            _ => {
                return Err(TerrainError::InvalidConfiguration(format!(
                    "{}x{} grid exceeds the {} cell limit, increase the resolution",
                    rows, cols, MAX_GRID_CELLS
                )));
            }
        }
        if !origin.is_finite() {
            return Err(TerrainError::InvalidConfiguration(
                "grid origin must be finite".to_string(),
            ));
        }

        Ok(Self {
            resolution,
            origin,
            rows,
            cols,
            x_max: origin.x + cols as f32 * resolution,
            y_max: origin.y + rows as f32 * resolution,
        })
    }

    /// Derive a frame from a point cloud extent.
    ///
    /// The extent is padded by `margin` on every side, then divided into
    /// `ceil(span / resolution)` cells per axis. Points must be finite.
    pub fn from_points(points: &PointSet, resolution: f32, margin: f32) -> Result<Self> {
        if !(margin.is_finite() && margin >= 0.0) {
            return Err(TerrainError::InvalidConfiguration(format!(
                "margin must be non-negative, got {}",
                margin
            )));
        }

        points.ensure_finite("ground")?;
        let (min, max) = points
            .planar_extent()
            .ok_or(TerrainError::EmptyInput { what: "ground" })?;

        let x_min = min.x - margin;
        let y_min = min.y - margin;
        let x_max = max.x + margin;
        let y_max = max.y + margin;

        let cols = ((x_max - x_min) / resolution).ceil().max(1.0) as usize;
        let rows = ((y_max - y_min) / resolution).ceil().max(1.0) as usize;

        Self::new(WorldPoint::new(x_min, y_min), resolution, rows, cols)
    }

    /// Meters per cell.
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// World coordinates of cell (0, 0).
    #[inline]
    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    /// Number of rows (y direction).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (x direction).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Upper x bound of the grid.
    #[inline]
    pub fn x_max(&self) -> f32 {
        self.x_max
    }

    /// Upper y bound of the grid.
    #[inline]
    pub fn y_max(&self) -> f32 {
        self.y_max
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// World extent of the grid.
    pub fn bounds(&self) -> TerrainBounds {
        TerrainBounds {
            x_max: self.x_max,
            x_min: self.origin.x,
            y_max: self.y_max,
            y_min: self.origin.y,
        }
    }

    /// World position at which a cell is sampled.
    #[inline]
    pub fn sample_point(&self, cell: CellIndex) -> WorldPoint {
        WorldPoint::new(
            self.origin.x + cell.col as f32 * self.resolution,
            self.origin.y + cell.row as f32 * self.resolution,
        )
    }

    /// Fractional (column, row) position of a world point.
    #[inline]
    pub fn continuous_index(&self, point: WorldPoint) -> (f32, f32) {
        (
            (point.x - self.origin.x) / self.resolution,
            (point.y - self.origin.y) / self.resolution,
        )
    }

    /// Check if a world point lies in `[origin, max]` on both axes.
    #[inline]
    pub fn contains(&self, point: WorldPoint) -> bool {
        point.x >= self.origin.x
            && point.x <= self.x_max
            && point.y >= self.origin.y
            && point.y <= self.y_max
    }

    /// Convert a world point to the cell containing it.
    ///
    /// Returns None outside the grid bounds. Points on the upper bound map to
    /// the last row or column.
    pub fn cell_of(&self, point: WorldPoint) -> Option<CellIndex> {
        if !self.contains(point) {
            return None;
        }

        let (col_f, row_f) = self.continuous_index(point);
        let col = (col_f.floor().max(0.0) as usize).min(self.cols - 1);
        let row = (row_f.floor().max(0.0) as usize).min(self.rows - 1);
        Some(CellIndex::new(row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_from_points() {
        let points = PointSet::from_xyz(&[(0.0, 0.0, 0.0), (10.0, 5.0, 0.0)]);
        let frame = GridFrame::from_points(&points, 1.0, 10.0).unwrap();

        assert_eq!(frame.cols(), 30);
        assert_eq!(frame.rows(), 25);
        assert_eq!(frame.origin(), WorldPoint::new(-10.0, -10.0));
        assert_eq!(frame.x_max(), 20.0);
        assert_eq!(frame.y_max(), 15.0);
    }

    #[test]
    fn test_bounds_follow_rounded_dimensions() {
        // 2.3m span at 1m cells -> 3 cells, bound is 0.7m past the data
        let points = PointSet::from_xyz(&[(0.0, 0.0, 0.0), (2.3, 2.3, 0.0)]);
        let frame = GridFrame::from_points(&points, 1.0, 0.0).unwrap();

        assert_eq!(frame.cols(), 3);
        assert_eq!(frame.rows(), 3);
        let bounds = frame.bounds();
        assert_eq!(bounds.x_max, frame.origin().x + 3.0);
        assert_eq!(bounds.y_max, frame.origin().y + 3.0);
    }

    #[test]
    fn test_single_point_gets_one_cell() {
        let points = PointSet::from_xyz(&[(4.0, 4.0, 1.0)]);
        let frame = GridFrame::from_points(&points, 0.5, 0.0).unwrap();
        assert_eq!((frame.rows(), frame.cols()), (1, 1));
    }

    #[test]
    fn test_empty_points_rejected() {
        let result = GridFrame::from_points(&PointSet::empty(), 1.0, 1.0);
        assert!(matches!(result, Err(TerrainError::EmptyInput { .. })));
    }

    #[test]
    fn test_bad_resolution_rejected() {
        let points = PointSet::from_xyz(&[(0.0, 0.0, 0.0)]);
        assert!(GridFrame::from_points(&points, 0.0, 1.0).is_err());
        assert!(GridFrame::from_points(&points, -1.0, 1.0).is_err());
    }

    #[test]
    fn test_cell_of() {
        let frame = GridFrame::new(WorldPoint::new(-1.0, -1.0), 0.5, 4, 6).unwrap();

        assert_eq!(
            frame.cell_of(WorldPoint::new(-1.0, -1.0)),
            Some(CellIndex::new(0, 0))
        );
        assert_eq!(
            frame.cell_of(WorldPoint::new(0.3, -0.2)),
            Some(CellIndex::new(1, 2))
        );
        // Upper bounds belong to the last cell
        assert_eq!(
            frame.cell_of(WorldPoint::new(2.0, 1.0)),
            Some(CellIndex::new(3, 5))
        );
        assert_eq!(frame.cell_of(WorldPoint::new(2.01, 0.0)), None);
        assert_eq!(frame.cell_of(WorldPoint::new(0.0, -1.01)), None);
        assert_eq!(frame.cell_of(WorldPoint::new(f32::NAN, 0.0)), None);
    }

    #[test]
    fn test_oversized_grid_rejected() {
        // 1e9 x 1e9 cells would need exabytes
        let points = PointSet::from_xyz(&[(0.0, 0.0, 0.0), (1000.0, 1000.0, 0.0)]);
        assert!(matches!(
            GridFrame::from_points(&points, 1e-6, 0.0),
            Err(TerrainError::InvalidConfiguration(_))
        ));

        assert!(GridFrame::new(WorldPoint::ZERO, 1.0, usize::MAX, 2).is_err());
        assert!(GridFrame::new(WorldPoint::ZERO, 1.0, MAX_GRID_CELLS + 1, 1).is_err());
        assert!(GridFrame::new(WorldPoint::ZERO, 1.0, MAX_GRID_CELLS, 1).is_ok());
    }

    #[test]
    fn test_non_finite_points_rejected() {
        // min/max skip NaN, so the extent alone would look finite
        let points = PointSet::from_xyz(&[(0.0, 0.0, 1.0), (f32::NAN, 1.0, 1.0), (4.0, 4.0, 1.0)]);
        assert!(matches!(
            GridFrame::from_points(&points, 1.0, 0.0),
            Err(TerrainError::NonFiniteInput { index: 1, .. })
        ));
    }

    #[test]
    fn test_sample_point() {
        let frame = GridFrame::new(WorldPoint::new(1.0, 2.0), 0.25, 4, 4).unwrap();
        let p = frame.sample_point(CellIndex::new(2, 3));
        assert_eq!(p, WorldPoint::new(1.75, 2.5));
    }
}
