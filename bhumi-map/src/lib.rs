//! # BhumiMap
//!
//! Terrain grids from segmented site point clouds, for motion planners.
//!
//! ## Overview
//!
//! BhumiMap turns two already-segmented point sets, ground and obstacle,
//! into fixed-resolution raster layers and answers point queries on them:
//!
//! - **Elevation** - IDW average of nearby ground heights, Gaussian-smoothed
//! - **Occupancy** - obstacle point density, Gaussian-smoothed
//! - **Inflation** - occupied cells dilated by the robot footprint (optional)
//! - **Soil** - Bekker-Wong parameters from a pluggable classifier
//!
//! Everything is built once in a batch and then read concurrently. Queries
//! never fail: out-of-range altitudes clamp to the nearest edge cell and
//! out-of-range validity checks return false.
//!
//! ## Quick Start
//!
//! ```rust
//! use bhumi_map::{Point3D, PointSet, TerrainConfig, TerrainMapBuilder};
//!
//! let ground: PointSet = (0..20)
//!     .flat_map(|i| (0..20).map(move |j| Point3D::new(i as f32 * 0.5, j as f32 * 0.5, 1.0)))
//!     .collect();
//! let obstacles = PointSet::from_xyz(&[(5.0, 5.0, 1.5)]);
//!
//! let config = TerrainConfig::new(0.25, 1.0).with_smoothing(2, 1.0);
//! let map = TerrainMapBuilder::new(config).build(&ground, &obstacles)?;
//!
//! assert!((map.altitude(4.0, 4.0) - 1.0).abs() < 1e-4);
//! assert!(!map.is_state_valid(-100.0, 0.0));
//! # Ok::<(), bhumi_map::TerrainError>(())
//! ```
//!
//! ## Coordinate System
//!
//! - X follows columns, Y follows rows
//! - Cell (row, col) is sampled at `origin + (col, row) * resolution`
//! - The grid covers `[origin, origin + (cols, rows) * resolution]`

#![warn(missing_docs)]

// Core types
pub mod core;

// Grid layers and their builders
pub mod grid;

// Planar nearest-neighbor index
pub mod index;

// Build pipeline
mod builder;

// Unified configuration
pub mod config;

// Persistence (save/load, CSV export)
pub mod io;

mod error;

pub use core::{
    CellIndex, Point3D, PointSet, SoilClassifier, SoilParameters, UniformSoil, WorldPoint,
};

pub use grid::{GridFrame, ScalarGrid, TerrainBounds, TerrainConfig};

pub use builder::{BuildStats, TerrainMapBuilder};

pub use config::{BhumiConfig, ConfigLoadError};

pub use error::{Result, TerrainError};

pub use index::SpatialIndex;

use log::{trace, warn};

/// Classification of a queried location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Inside the grid, smoothed occupancy at or below the threshold
    Free,
    /// Smoothed occupancy above the threshold
    Occupied,
    /// Within the robot footprint of an occupied cell
    Inflated,
    /// Outside the grid bounds
    OutOfBounds,
}

impl CellState {
    /// Is this state traversable?
    pub fn is_free(self) -> bool {
        self == CellState::Free
    }
}

/// The persisted layers of a terrain map.
///
/// This is what a `.bhumi` file holds: the frame plus the smoothed
/// elevation and occupancy grids.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainGrids {
    /// Coordinate frame
    pub frame: GridFrame,
    /// Smoothed elevation (meters)
    pub elevation: ScalarGrid,
    /// Smoothed occupancy density
    pub occupancy: ScalarGrid,
}

impl TerrainGrids {
    /// Bundle layers, checking that both match the frame.
    pub fn new(frame: GridFrame, elevation: ScalarGrid, occupancy: ScalarGrid) -> Result<Self> {
        for grid in [&elevation, &occupancy] {
            if grid.rows() != frame.rows() || grid.cols() != frame.cols() {
                return Err(TerrainError::DimensionMismatch {
                    expected: frame.cell_count(),
                    found: grid.len(),
                });
            }
        }
        Ok(Self {
            frame,
            elevation,
            occupancy,
        })
    }
}

/// The queryable terrain map
///
/// Owns its grids, its ground index and its soil classifier. All queries
/// take `&self`, so one map can be shared across planner threads.
#[derive(Debug)]
pub struct TerrainMap {
    frame: GridFrame,
    elevation: ScalarGrid,
    occupancy: ScalarGrid,
    inflation: Option<ScalarGrid>,
    occupancy_threshold: f32,
    /// Ground index kept for direct IDW sampling (None after reload)
    ground_index: Option<SpatialIndex>,
    elevation_neighbors: usize,
    soil: Box<dyn SoilClassifier>,
}

impl TerrainMap {
    pub(crate) fn from_parts(
        grids: TerrainGrids,
        inflation: Option<ScalarGrid>,
        config: &TerrainConfig,
        ground_index: Option<SpatialIndex>,
        soil: Box<dyn SoilClassifier>,
    ) -> Self {
        Self {
            frame: grids.frame,
            elevation: grids.elevation,
            occupancy: grids.occupancy,
            inflation,
            occupancy_threshold: config.occupancy.threshold,
            ground_index,
            elevation_neighbors: config.elevation.num_neighbors,
            soil,
        }
    }

    /// Rebuild a map from persisted layers.
    ///
    /// The spatial pipeline is not rerun. Inflation is recomputed from the
    /// stored occupancy when `config.inflation.enabled` is set. The frame's
    /// resolution takes precedence over `config.resolution`.
    pub fn from_grids(
        grids: TerrainGrids,
        config: &TerrainConfig,
        soil: Box<dyn SoilClassifier>,
    ) -> Result<Self> {
        config.validate()?;
        let grids = TerrainGrids::new(grids.frame, grids.elevation, grids.occupancy)?;

        if grids.frame.resolution() != config.resolution {
            warn!(
                "Loaded grid resolution {} differs from configured {}, using the grid's",
                grids.frame.resolution(),
                config.resolution
            );
        }

        let inflation = if config.inflation.enabled {
            let mask =
                grid::FootprintMask::new(config.inflation.robot_radius, grids.frame.resolution())?;
            Some(grid::inflate(
                &grids.occupancy,
                &mask,
                config.occupancy.threshold,
            ))
        } else {
            None
        };

        Ok(Self::from_parts(grids, inflation, config, None, soil))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Ground height at (x, y).
    ///
    /// Bilinear interpolation between the four surrounding cell samples.
    /// When the point is on or beyond the outermost sample row or column,
    /// the fractional indices are clamped into the grid and the cell at the
    /// truncated indices is returned without interpolation.
    pub fn altitude(&self, x: f32, y: f32) -> f32 {
        let (col, row) = self.frame.continuous_index(WorldPoint::new(x, y));
        let max_col = (self.frame.cols() - 1) as f32;
        let max_row = (self.frame.rows() - 1) as f32;

        let col_inside = col > 0.0 && col < max_col;
        let row_inside = row > 0.0 && row < max_row;
        if !(col_inside && row_inside) {
            // NaN clamps to NaN, which casts to 0
            let c = col.clamp(0.0, max_col) as usize;
            let r = row.clamp(0.0, max_row) as usize;
            return self.elevation.at(CellIndex::new(r, c));
        }

        let col_l = col.floor();
        let row_l = row.floor();
        let (cl, rl) = (col_l as usize, row_l as usize);
        let (cu, ru) = (cl + 1, rl + 1);
        let (col_u, row_u) = (col_l + 1.0, row_l + 1.0);

        let z = |r: usize, c: usize| self.elevation.at(CellIndex::new(r, c));

        let left = (row - row_l) * z(ru, cl) + (row_u - row) * z(rl, cl);
        let right = (row - row_l) * z(ru, cu) + (row_u - row) * z(rl, cu);
        (col - col_l) * right + (col_u - col) * left
    }

    /// Classify the location at (x, y).
    pub fn state_at(&self, x: f32, y: f32) -> CellState {
        let point = WorldPoint::new(x, y);
        let Some(cell) = self.frame.cell_of(point) else {
            trace!("State query ({:.3}, {:.3}) outside grid bounds", x, y);
            return CellState::OutOfBounds;
        };

        if self.occupancy.at(cell) > self.occupancy_threshold {
            return CellState::Occupied;
        }
        if let Some(inflated) = &self.inflation
            && inflated.at(cell) != 0.0
        {
            return CellState::Inflated;
        }
        CellState::Free
    }

    /// Check if a robot may occupy (x, y).
    ///
    /// False outside the grid bounds, on occupied cells and, when inflation
    /// is enabled, on inflated cells.
    pub fn is_state_valid(&self, x: f32, y: f32) -> bool {
        self.state_at(x, y).is_free()
    }

    /// Soil parameters at (x, y).
    pub fn soil_at(&self, x: f32, y: f32) -> SoilParameters {
        self.soil.classify(WorldPoint::new(x, y))
    }

    /// Direct IDW height estimate from the ground points.
    ///
    /// Unsmoothed, and not limited to the grid bounds. Returns None for maps
    /// rebuilt from disk, which carry no ground points.
    pub fn sample_altitude(&self, x: f32, y: f32) -> Option<f32> {
        let index = self.ground_index.as_ref()?;
        grid::idw_elevation(index, WorldPoint::new(x, y), self.elevation_neighbors)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// World extent of the map.
    pub fn bounds(&self) -> TerrainBounds {
        self.frame.bounds()
    }

    /// Grid resolution in meters per cell
    pub fn resolution(&self) -> f32 {
        self.frame.resolution()
    }

    /// Grid dimensions (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.frame.rows(), self.frame.cols())
    }

    /// Coordinate frame
    pub fn frame(&self) -> &GridFrame {
        &self.frame
    }

    /// Smoothed elevation grid
    pub fn elevation(&self) -> &ScalarGrid {
        &self.elevation
    }

    /// Smoothed occupancy grid
    pub fn occupancy(&self) -> &ScalarGrid {
        &self.occupancy
    }

    /// Inflated occupancy (0.0 / 1.0), if inflation is enabled
    pub fn inflation(&self) -> Option<&ScalarGrid> {
        self.inflation.as_ref()
    }

    /// Occupancy above this value marks a cell occupied
    pub fn occupancy_threshold(&self) -> f32 {
        self.occupancy_threshold
    }

    /// Soil classifier
    pub fn soil(&self) -> &dyn SoilClassifier {
        self.soil.as_ref()
    }

    /// Copy of the persisted layers.
    pub fn to_grids(&self) -> TerrainGrids {
        TerrainGrids {
            frame: self.frame,
            elevation: self.elevation.clone(),
            occupancy: self.occupancy.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 4x4 map over [0, 4] x [0, 4] with elevation = col + 10 * row.
    fn ramp_map() -> TerrainMap {
        let frame = GridFrame::new(WorldPoint::ZERO, 1.0, 4, 4).unwrap();
        let elevation = ScalarGrid::from_fn(4, 4, |c| c.col as f32 + 10.0 * c.row as f32);
        let mut occupancy = ScalarGrid::new(4, 4, 0.0);
        occupancy.set(CellIndex::new(2, 1), 5.0);
        let grids = TerrainGrids::new(frame, elevation, occupancy).unwrap();
        TerrainMap::from_grids(
            grids,
            &TerrainConfig::new(1.0, 0.0),
            Box::new(UniformSoil::default()),
        )
        .unwrap()
    }

    #[test]
    fn test_altitude_at_samples() {
        let map = ramp_map();
        assert_relative_eq!(map.altitude(1.0, 1.0), 11.0, epsilon = 1e-5);
        assert_relative_eq!(map.altitude(2.0, 1.0), 12.0, epsilon = 1e-5);
    }

    #[test]
    fn test_altitude_bilinear() {
        let map = ramp_map();
        // Linear field is reproduced exactly
        assert_relative_eq!(map.altitude(1.5, 1.25), 1.5 + 12.5, epsilon = 1e-4);
        assert_relative_eq!(map.altitude(2.9, 1.1), 2.9 + 11.0, epsilon = 1e-4);
    }

    #[test]
    fn test_altitude_clamps_with_truncation() {
        let map = ramp_map();
        // Below origin in x: column clamps to 0, row 1.7 truncates to 1
        assert_eq!(map.altitude(-5.0, 1.7), 10.0);
        // Beyond the last sample column
        assert_eq!(map.altitude(3.5, 2.2), 23.0);
        // Exactly on the first sample row
        assert_eq!(map.altitude(1.6, 0.0), 1.0);
        assert_eq!(map.altitude(f32::NAN, f32::NAN), 0.0);
    }

    #[test]
    fn test_state_at() {
        let map = ramp_map();
        assert_eq!(map.state_at(1.5, 2.5), CellState::Occupied);
        assert_eq!(map.state_at(0.5, 0.5), CellState::Free);
        assert_eq!(map.state_at(4.0, 4.0), CellState::Free);
        assert_eq!(map.state_at(4.01, 1.0), CellState::OutOfBounds);
        assert!(!map.is_state_valid(1.5, 2.5));
        assert!(map.is_state_valid(0.0, 0.0));
    }

    #[test]
    fn test_inflation_recomputed_from_grids() {
        let map = ramp_map();
        let config = TerrainConfig::new(1.0, 0.0).with_inflation(1.0);
        let inflated =
            TerrainMap::from_grids(map.to_grids(), &config, Box::new(UniformSoil::default()))
                .unwrap();

        assert_eq!(inflated.state_at(1.5, 2.5), CellState::Occupied);
        assert_eq!(inflated.state_at(0.5, 2.5), CellState::Inflated);
        assert_eq!(inflated.state_at(1.5, 3.5), CellState::Inflated);
        assert_eq!(inflated.state_at(0.5, 3.5), CellState::Free);
        assert!(!inflated.is_state_valid(2.5, 2.5));
    }

    #[test]
    fn test_from_grids_rejects_mismatched_layers() {
        let frame = GridFrame::new(WorldPoint::ZERO, 1.0, 2, 2).unwrap();
        let result = TerrainGrids::new(
            frame,
            ScalarGrid::new(2, 2, 0.0),
            ScalarGrid::new(2, 3, 0.0),
        );
        assert!(matches!(result, Err(TerrainError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_reloaded_map_has_no_ground_samples() {
        assert!(ramp_map().sample_altitude(1.0, 1.0).is_none());
    }

    #[test]
    fn test_accessors() {
        let map = ramp_map();
        assert_eq!(map.resolution(), 1.0);
        assert_eq!(map.dimensions(), (4, 4));
        assert_eq!(
            map.bounds(),
            TerrainBounds {
                x_max: 4.0,
                x_min: 0.0,
                y_max: 4.0,
                y_min: 0.0
            }
        );
        assert!(map.inflation().is_none());
        assert_eq!(map.soil_at(2.0, 2.0), SoilParameters::default());
    }

    #[test]
    fn test_map_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TerrainMap>();
    }
}
