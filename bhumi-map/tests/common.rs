//! Test utilities for BhumiMap.
//!
//! Synthetic ground and obstacle clouds plus small map fixtures.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bhumi_map::{
    GridFrame, Point3D, PointSet, ScalarGrid, TerrainConfig, TerrainGrids, TerrainMap,
    UniformSoil, WorldPoint,
};

/// Regular lattice of ground points over `[0, extent]²` at height `z`.
pub fn flat_lattice(extent: f32, spacing: f32, z: f32) -> PointSet {
    let n = (extent / spacing).round() as usize;
    (0..=n)
        .flat_map(|i| {
            (0..=n).map(move |j| Point3D::new(i as f32 * spacing, j as f32 * spacing, z))
        })
        .collect()
}

/// Randomly scattered ground points on the plane `z = a*x + b*y + c`.
pub fn scattered_plane(
    count: usize,
    extent: f32,
    (a, b, c): (f32, f32, f32),
    seed: u64,
) -> PointSet {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let x = rng.random_range(0.0..extent);
            let y = rng.random_range(0.0..extent);
            Point3D::new(x, y, a * x + b * y + c)
        })
        .collect()
}

/// `count` obstacle points stacked exactly at (x, y).
pub fn obstacle_stack(x: f32, y: f32, count: usize) -> PointSet {
    (0..count)
        .map(|i| Point3D::new(x, y, 0.1 * i as f32))
        .collect()
}

/// Small build config: coarse cells, narrow kernel.
pub fn coarse_config(resolution: f32, margin: f32) -> TerrainConfig {
    TerrainConfig::new(resolution, margin).with_smoothing(2, 1.0)
}

/// Map over `[0, cols] x [0, rows]` at 1m cells with elevation from `f(row, col)`
/// and no obstacles.
pub fn map_from_fn(
    rows: usize,
    cols: usize,
    f: impl Fn(usize, usize) -> f32 + Sync,
) -> TerrainMap {
    let frame = GridFrame::new(WorldPoint::ZERO, 1.0, rows, cols).expect("valid frame");
    let elevation = ScalarGrid::from_fn(rows, cols, |c| f(c.row, c.col));
    let occupancy = ScalarGrid::new(rows, cols, 0.0);
    let grids = TerrainGrids::new(frame, elevation, occupancy).expect("matching layers");
    TerrainMap::from_grids(
        grids,
        &TerrainConfig::new(1.0, 0.0),
        Box::new(UniformSoil::default()),
    )
    .expect("valid map")
}

/// Enable log output for a test run.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
