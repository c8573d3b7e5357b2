//! Elevation grid from ground points.
//!
//! Each cell height is an inverse-distance-weighted (IDW) average of the
//! k nearest ground points:
//!
//! ```text
//! w_i = 1 / (d_i + 1e-5)        d_i = planar distance to neighbor i
//! z   = Σ(w_i · z_i) / Σ(w_i)
//! ```
//!
//! This is an average, not an interpolant: the estimate does not pass
//! exactly through the samples.

use log::{debug, info};

use crate::core::WorldPoint;
use crate::error::{Result, TerrainError};
use crate::grid::config::ElevationConfig;
use crate::grid::{GridFrame, ScalarGrid};
use crate::index::SpatialIndex;

/// Added to every neighbor distance so a coincident sample cannot divide by zero.
pub const DISTANCE_EPSILON: f32 = 1e-5;

/// IDW height estimate at a single point.
///
/// Returns None if the index returns no neighbors.
pub fn idw_elevation(ground: &SpatialIndex, point: WorldPoint, k: usize) -> Option<f32> {
    let neighbors = ground.k_nearest(point, k);
    if neighbors.is_empty() {
        return None;
    }

    let mut total_weight = 0.0f32;
    let mut sum = 0.0f32;
    for neighbor in &neighbors {
        let z = ground.point(neighbor.index)?.z;
        let weight = 1.0 / (neighbor.distance() + DISTANCE_EPSILON);
        total_weight += weight;
        sum += weight * z;
    }

    Some(sum / total_weight)
}

/// Build the raw (unsmoothed) elevation grid.
///
/// Cells are evaluated at their sample points in row-major order. A cell
/// with no neighbors aborts the build with [`TerrainError::NoNeighborsFound`].
pub fn build_elevation_grid(
    frame: &GridFrame,
    ground: &SpatialIndex,
    config: &ElevationConfig,
) -> Result<ScalarGrid> {
    info!(
        "Building elevation grid: {}x{} cells from {} ground points (k={})",
        frame.cols(),
        frame.rows(),
        ground.len(),
        config.num_neighbors
    );

    let grid = ScalarGrid::try_from_fn(frame.rows(), frame.cols(), |cell| {
        idw_elevation(ground, frame.sample_point(cell), config.num_neighbors).ok_or(
            TerrainError::NoNeighborsFound {
                row: cell.row,
                col: cell.col,
            },
        )
    })?;

    if let Some((lo, hi)) = grid.min_max() {
        debug!("Elevation range: {:.3} .. {:.3}", lo, hi);
    }

    Ok(grid)
}
