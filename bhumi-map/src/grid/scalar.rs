//! Dense row-major float grid.

use serde::{Deserialize, Serialize};

use crate::core::CellIndex;
use crate::error::{Result, TerrainError};

/// Dense `rows * cols` grid of f32 values, indexed `[row * cols + col]`.
///
/// Elevation, smoothed occupancy and inflation (0.0 / 1.0) all use this
/// representation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScalarGrid {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl ScalarGrid {
    /// Create a grid filled with one value.
    pub fn new(rows: usize, cols: usize, fill: f32) -> Self {
        Self {
            rows,
            cols,
            data: vec![fill; rows * cols],
        }
    }

    /// Wrap existing row-major data.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        let expected = rows * cols;
        if data.len() != expected {
            return Err(TerrainError::DimensionMismatch {
                expected,
                found: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a grid by evaluating `f` for every cell.
    ///
    /// With the `parallel` feature, rows are evaluated on the rayon pool.
    pub fn from_fn<F>(rows: usize, cols: usize, f: F) -> Self
    where
        F: Fn(CellIndex) -> f32 + Sync,
    {
        let mut data = vec![0.0; rows * cols];
        if cols > 0 {
            #[cfg(feature = "parallel")]
            {
                use rayon::prelude::*;
                data.par_chunks_mut(cols)
                    .enumerate()
                    .for_each(|(row, chunk)| fill_row(row, chunk, &f));
            }
            #[cfg(not(feature = "parallel"))]
            for (row, chunk) in data.chunks_mut(cols).enumerate() {
                fill_row(row, chunk, &f);
            }
        }
        Self { rows, cols, data }
    }

    /// Build a grid by evaluating a fallible `f` for every cell.
    ///
    /// The whole build fails if any cell fails. Sequential builds stop at the
    /// first failing cell in row-major order.
    pub fn try_from_fn<F>(rows: usize, cols: usize, f: F) -> Result<Self>
    where
        F: Fn(CellIndex) -> Result<f32> + Sync,
    {
        let mut data = vec![0.0; rows * cols];
        if cols > 0 {
            #[cfg(feature = "parallel")]
            {
                use rayon::prelude::*;
                data.par_chunks_mut(cols)
                    .enumerate()
                    .try_for_each(|(row, chunk)| try_fill_row(row, chunk, &f))?;
            }
            #[cfg(not(feature = "parallel"))]
            for (row, chunk) in data.chunks_mut(cols).enumerate() {
                try_fill_row(row, chunk, &f)?;
            }
        }
        Ok(Self { rows, cols, data })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at (row, col), or None out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Value at a cell. Panics if the cell is out of range.
    #[inline]
    pub fn at(&self, cell: CellIndex) -> f32 {
        debug_assert!(cell.row < self.rows && cell.col < self.cols);
        self.data[cell.row * self.cols + cell.col]
    }

    /// Set the value at a cell. Panics if the cell is out of range.
    #[inline]
    pub fn set(&mut self, cell: CellIndex, value: f32) {
        debug_assert!(cell.row < self.rows && cell.col < self.cols);
        self.data[cell.row * self.cols + cell.col] = value;
    }

    /// Row-major data.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Iterate over (cell, value) pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, f32)> + '_ {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| (CellIndex::new(i / cols, i % cols), v))
    }

    /// Count cells whose value satisfies `pred`.
    pub fn count_where(&self, pred: impl Fn(f32) -> bool) -> usize {
        self.data.iter().filter(|&&v| pred(v)).count()
    }

    /// (min, max) over all cells, or None for an empty grid.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let first = *self.data.first()?;
        Some(
            self.data
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }
}

fn fill_row<F>(row: usize, chunk: &mut [f32], f: &F)
where
    F: Fn(CellIndex) -> f32,
{
    for (col, value) in chunk.iter_mut().enumerate() {
        *value = f(CellIndex::new(row, col));
    }
}

fn try_fill_row<F>(row: usize, chunk: &mut [f32], f: &F) -> Result<()>
where
    F: Fn(CellIndex) -> Result<f32>,
{
    for (col, value) in chunk.iter_mut().enumerate() {
        *value = f(CellIndex::new(row, col))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let grid = ScalarGrid::from_fn(3, 4, |c| (c.row * 10 + c.col) as f32);

        assert_eq!(grid.len(), 12);
        assert_eq!(grid.as_slice()[4 + 2], 12.0);
        assert_eq!(grid.get(2, 3), Some(23.0));
        assert_eq!(grid.at(CellIndex::new(1, 0)), 10.0);
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 4), None);
    }

    #[test]
    fn test_from_vec_checks_length() {
        assert!(ScalarGrid::from_vec(2, 2, vec![0.0; 4]).is_ok());
        assert!(matches!(
            ScalarGrid::from_vec(2, 2, vec![0.0; 3]),
            Err(TerrainError::DimensionMismatch {
                expected: 4,
                found: 3
            })
        ));
    }

    #[test]
    fn test_try_from_fn_stops_on_error() {
        let result = ScalarGrid::try_from_fn(3, 3, |c| {
            if c.row == 1 && c.col == 2 {
                Err(TerrainError::NoNeighborsFound {
                    row: c.row,
                    col: c.col,
                })
            } else {
                Ok(1.0)
            }
        });

        assert!(matches!(
            result,
            Err(TerrainError::NoNeighborsFound { row: 1, col: 2 })
        ));
    }

    #[test]
    fn test_iter_and_counts() {
        let mut grid = ScalarGrid::new(2, 3, 0.0);
        grid.set(CellIndex::new(1, 1), 5.0);
        grid.set(CellIndex::new(0, 2), -1.0);

        let cells: Vec<_> = grid.iter().filter(|(_, v)| *v != 0.0).collect();
        assert_eq!(
            cells,
            vec![(CellIndex::new(0, 2), -1.0), (CellIndex::new(1, 1), 5.0)]
        );
        assert_eq!(grid.count_where(|v| v > 0.0), 1);
        assert_eq!(grid.min_max(), Some((-1.0, 5.0)));
    }

    #[test]
    fn test_empty_grid() {
        let grid = ScalarGrid::from_fn(0, 0, |_| 1.0);
        assert!(grid.is_empty());
        assert_eq!(grid.min_max(), None);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_fill_keeps_row_major_order() {
        let (rows, cols) = (64, 33);
        let grid = ScalarGrid::from_fn(rows, cols, |c| (c.row * cols + c.col) as f32);
        let expected: Vec<f32> = (0..rows * cols).map(|i| i as f32).collect();
        assert_eq!(grid.as_slice(), expected.as_slice());

        let fallible = ScalarGrid::try_from_fn(rows, cols, |c| Ok((c.row * cols + c.col) as f32));
        assert_eq!(fallible.unwrap(), grid);
    }
}
