//! Gaussian smoothing with edge renormalization.
//!
//! The kernel is a fixed `(2K+1) x (2K+1)` table of
//! `exp(-0.5 * (dx² + dy²) / σ²)` in cell units. Near the grid boundary
//! the offsets that fall outside are skipped and the result is divided by
//! the weight actually used, so a uniform grid stays uniform up to the
//! edges.

use log::debug;

use crate::core::CellIndex;
use crate::error::{Result, TerrainError};
use crate::grid::ScalarGrid;
use crate::grid::config::SmoothingConfig;

/// Precomputed 2-D Gaussian kernel.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianKernel {
    half_width: usize,
    sigma_sq: f32,
    side: usize,
    weights: Vec<f32>,
}

impl GaussianKernel {
    /// Create a kernel with half-width `half_width` cells and variance
    /// `sigma_sq` (cells²).
    pub fn new(half_width: usize, sigma_sq: f32) -> Result<Self> {
        if !(sigma_sq.is_finite() && sigma_sq > 0.0) {
            return Err(TerrainError::InvalidConfiguration(format!(
                "smoothing variance must be positive, got {}",
                sigma_sq
            )));
        }

        let side = 2 * half_width + 1;
        let k = half_width as i64;
        let mut weights = Vec::with_capacity(side * side);
        for dy in -k..=k {
            for dx in -k..=k {
                let d_sq = (dx * dx + dy * dy) as f32;
                weights.push((-0.5 * d_sq / sigma_sq).exp());
            }
        }

        debug!(
            "Gaussian kernel: {}x{} cells, sigma^2={}",
            side, side, sigma_sq
        );

        Ok(Self {
            half_width,
            sigma_sq,
            side,
            weights,
        })
    }

    /// Create a kernel from configuration.
    pub fn from_config(config: &SmoothingConfig) -> Result<Self> {
        Self::new(config.half_width, config.sigma_sq)
    }

    /// Half-width K in cells.
    pub fn half_width(&self) -> usize {
        self.half_width
    }

    /// Variance in cells².
    pub fn sigma_sq(&self) -> f32 {
        self.sigma_sq
    }

    /// Kernel side length (2K + 1).
    pub fn side(&self) -> usize {
        self.side
    }

    /// Weight at offset (dy, dx), each in `-K..=K`.
    #[inline]
    pub fn weight(&self, dy: isize, dx: isize) -> f32 {
        let k = self.half_width as isize;
        let i = (dy + k) as usize * self.side + (dx + k) as usize;
        self.weights[i]
    }

    /// Smooth one grid.
    pub fn apply(&self, input: &ScalarGrid) -> ScalarGrid {
        ScalarGrid::from_fn(input.rows(), input.cols(), |cell| {
            self.smooth_cell(input, cell)
        })
    }

    /// Smooth two grids of equal shape (elevation and occupancy).
    pub fn apply_pair(&self, a: &ScalarGrid, b: &ScalarGrid) -> Result<(ScalarGrid, ScalarGrid)> {
        if a.rows() != b.rows() || a.cols() != b.cols() {
            return Err(TerrainError::DimensionMismatch {
                expected: a.len(),
                found: b.len(),
            });
        }
        Ok((self.apply(a), self.apply(b)))
    }

    fn smooth_cell(&self, input: &ScalarGrid, cell: CellIndex) -> f32 {
        let k = self.half_width;
        let row_lo = cell.row.saturating_sub(k);
        let row_hi = (cell.row + k).min(input.rows() - 1);
        let col_lo = cell.col.saturating_sub(k);
        let col_hi = (cell.col + k).min(input.cols() - 1);

        let mut sum = 0.0f32;
        let mut total_weight = 0.0f32;
        for row in row_lo..=row_hi {
            let dy = row as isize - cell.row as isize;
            for col in col_lo..=col_hi {
                let dx = col as isize - cell.col as isize;
                let w = self.weight(dy, dx);
                sum += w * input.at(CellIndex::new(row, col));
                total_weight += w;
            }
        }

        // The center weight is 1, so total_weight is never zero
        sum / total_weight
    }
}
