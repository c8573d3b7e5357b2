//! Obstacle density grid.
//!
//! A cell's raw occupancy is the number of obstacle points, among its k
//! nearest, that lie strictly within one cell width of the cell's sample
//! point. Obstacle heights are ignored: the index searches the z = 0
//! projection, so overhanging points count like ground-level ones.

use log::{info, warn};

use crate::core::WorldPoint;
use crate::grid::config::OccupancyConfig;
use crate::grid::{GridFrame, ScalarGrid};
use crate::index::SpatialIndex;

/// Count of the k nearest obstacles closer than `radius` to `point`.
pub fn occupancy_score(obstacles: &SpatialIndex, point: WorldPoint, k: usize, radius: f32) -> f32 {
    obstacles
        .k_nearest(point, k)
        .iter()
        .filter(|n| n.distance() < radius)
        .count() as f32
}

/// Build the raw (unsmoothed) occupancy grid.
///
/// An empty obstacle index yields an all-zero grid.
pub fn build_occupancy_grid(
    frame: &GridFrame,
    obstacles: &SpatialIndex,
    config: &OccupancyConfig,
) -> ScalarGrid {
    if obstacles.is_empty() {
        warn!("Obstacle point set is empty, occupancy grid will be all free");
        return ScalarGrid::new(frame.rows(), frame.cols(), 0.0);
    }

    info!(
        "Building occupancy grid: {}x{} cells from {} obstacle points (k={})",
        frame.cols(),
        frame.rows(),
        obstacles.len(),
        config.num_neighbors
    );

    let radius = frame.resolution();
    ScalarGrid::from_fn(frame.rows(), frame.cols(), |cell| {
        occupancy_score(
            obstacles,
            frame.sample_point(cell),
            config.num_neighbors,
            radius,
        )
    })
}
