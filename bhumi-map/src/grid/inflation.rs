//! Robot footprint inflation of occupied cells.

use log::{debug, info};

use crate::core::CellIndex;
use crate::error::{Result, TerrainError};
use crate::grid::ScalarGrid;

/// Circular footprint stamp in cell offsets.
#[derive(Clone, Debug, PartialEq)]
pub struct FootprintMask {
    radius_cells: usize,
    side: usize,
    cells: Vec<bool>,
}

impl FootprintMask {
    /// Build a mask for a robot of `robot_radius` meters on a grid of
    /// `resolution` meters per cell.
    ///
    /// Offset (di, dj) is included when its center lies within the radius.
    pub fn new(robot_radius: f32, resolution: f32) -> Result<Self> {
        if !(robot_radius.is_finite() && robot_radius >= 0.0) {
            return Err(TerrainError::InvalidConfiguration(format!(
                "robot radius must be non-negative, got {}",
                robot_radius
            )));
        }
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(TerrainError::InvalidConfiguration(format!(
                "resolution must be positive, got {}",
                resolution
            )));
        }

        let radius_in_cells = robot_radius / resolution;
        let radius_cells = radius_in_cells.ceil() as usize;
        let side = 2 * radius_cells + 1;
        let r = radius_cells as i64;
        let limit_sq = radius_in_cells * radius_in_cells;

        let mut cells = Vec::with_capacity(side * side);
        for di in -r..=r {
            for dj in -r..=r {
                cells.push(((di * di + dj * dj) as f32) <= limit_sq);
            }
        }

        let mask = Self {
            radius_cells,
            side,
            cells,
        };
        debug!(
            "Footprint mask: radius {} cells, {} cells set",
            radius_cells,
            mask.cell_count()
        );
        Ok(mask)
    }

    /// Mask radius in cells (ceil of radius / resolution).
    pub fn radius_cells(&self) -> usize {
        self.radius_cells
    }

    /// Check if offset (di rows, dj cols) is part of the footprint.
    #[inline]
    pub fn contains(&self, di: isize, dj: isize) -> bool {
        let r = self.radius_cells as isize;
        if di.abs() > r || dj.abs() > r {
            return false;
        }
        self.cells[(di + r) as usize * self.side + (dj + r) as usize]
    }

    /// Number of offsets in the footprint.
    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Stamp the mask around every cell whose occupancy exceeds `threshold`.
///
/// Returns a grid of 0.0 (clear) and 1.0 (inflated). The mask is clipped
/// at the grid edges.
pub fn inflate(occupancy: &ScalarGrid, mask: &FootprintMask, threshold: f32) -> ScalarGrid {
    let rows = occupancy.rows();
    let cols = occupancy.cols();
    let r = mask.radius_cells();
    let mut inflated = ScalarGrid::new(rows, cols, 0.0);
    let mut seeds = 0usize;

    for (cell, value) in occupancy.iter() {
        if value <= threshold {
            continue;
        }
        seeds += 1;

        let row_lo = cell.row.saturating_sub(r);
        let row_hi = (cell.row + r).min(rows - 1);
        let col_lo = cell.col.saturating_sub(r);
        let col_hi = (cell.col + r).min(cols - 1);
        for row in row_lo..=row_hi {
            let di = row as isize - cell.row as isize;
            for col in col_lo..=col_hi {
                let dj = col as isize - cell.col as isize;
                if mask.contains(di, dj) {
                    inflated.set(CellIndex::new(row, col), 1.0);
                }
            }
        }
    }

    info!(
        "Inflated {} occupied cells into {} blocked cells",
        seeds,
        inflated.count_where(|v| v > 0.0)
    );
    inflated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_radius_is_single_cell() {
        let mask = FootprintMask::new(0.0, 0.1).unwrap();
        assert_eq!(mask.radius_cells(), 0);
        assert_eq!(mask.cell_count(), 1);
        assert!(mask.contains(0, 0));
        assert!(!mask.contains(1, 0));
    }

    #[test]
    fn test_two_cell_radius() {
        // Offsets with di² + dj² <= 4: 13 cells
        let mask = FootprintMask::new(2.0, 1.0).unwrap();
        assert_eq!(mask.radius_cells(), 2);
        assert_eq!(mask.cell_count(), 13);
        assert!(mask.contains(2, 0));
        assert!(mask.contains(-1, 1));
        assert!(!mask.contains(2, 1));
        assert!(!mask.contains(-2, -2));
    }

    #[test]
    fn test_fractional_radius_rounds_mask_up() {
        let mask = FootprintMask::new(0.15, 0.1).unwrap();
        assert_eq!(mask.radius_cells(), 2);
        // 1.5 cells: (1, 1) is within, (2, 0) is not
        assert!(mask.contains(1, 1));
        assert!(!mask.contains(2, 0));
    }

    #[test]
    fn test_rejects_negative_radius() {
        assert!(FootprintMask::new(-0.1, 0.1).is_err());
    }

    #[test]
    fn test_inflate_single_cell() {
        let mask = FootprintMask::new(2.0, 1.0).unwrap();
        let mut occupancy = ScalarGrid::new(9, 9, 0.0);
        occupancy.set(CellIndex::new(4, 4), 3.0);

        let inflated = inflate(&occupancy, &mask, 1.0);
        assert_eq!(inflated.count_where(|v| v == 1.0), 13);
        assert_eq!(inflated.at(CellIndex::new(4, 6)), 1.0);
        assert_eq!(inflated.at(CellIndex::new(5, 6)), 0.0);
    }

    #[test]
    fn test_inflate_clips_at_edges() {
        let mask = FootprintMask::new(2.0, 1.0).unwrap();
        let mut occupancy = ScalarGrid::new(5, 5, 0.0);
        occupancy.set(CellIndex::new(0, 0), 3.0);

        // Quarter disc: (0,0) (0,1) (0,2) (1,0) (1,1) (2,0)
        let inflated = inflate(&occupancy, &mask, 1.0);
        assert_eq!(inflated.count_where(|v| v == 1.0), 6);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mask = FootprintMask::new(1.0, 1.0).unwrap();
        let occupancy = ScalarGrid::new(3, 3, 1.0);
        assert_eq!(inflate(&occupancy, &mask, 1.0).count_where(|v| v > 0.0), 0);
    }
}
