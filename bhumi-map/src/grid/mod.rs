//! Terrain raster grids built from segmented point clouds.
//!
//! ## Pipeline
//!
//! ```text
//!   ground PointSet                     obstacle PointSet
//!         │                                    │
//!         ▼                                    ▼
//! ┌─────────────────┐                ┌─────────────────┐
//! │  GridFrame      │──── frame ────▶│  SpatialIndex   │
//! │  SpatialIndex   │                │  (flattened)    │
//! └────────┬────────┘                └────────┬────────┘
//!          ▼                                  ▼
//! ┌─────────────────┐                ┌─────────────────┐
//! │   elevation     │                │   occupancy     │
//! │  (IDW, k = 8)   │                │ (count, k = 16) │
//! └────────┬────────┘                └────────┬────────┘
//!          └──────────────┬───────────────────┘
//!                         ▼
//!               ┌───────────────────┐
//!               │  GaussianKernel   │
//!               │ (edge-normalized) │
//!               └─────────┬─────────┘
//!                         ▼
//!               ┌───────────────────┐
//!               │  inflate          │  (optional)
//!               │  FootprintMask    │
//!               └───────────────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`GridFrame`]: World <-> cell mapping derived from the ground extent
//! - [`ScalarGrid`]: Dense row-major f32 grid shared by every layer
//! - [`TerrainConfig`]: Resolution, margin and per-stage settings
//! - [`elevation`]: Inverse-distance-weighted ground height
//! - [`occupancy`]: Obstacle point density
//! - [`smoothing`]: Gaussian filter with edge renormalization
//! - [`inflation`]: Robot footprint dilation of occupied cells

mod config;
pub mod elevation;
mod frame;
pub mod inflation;
pub mod occupancy;
mod scalar;
pub mod smoothing;

pub use config::{
    ElevationConfig, InflationConfig, OccupancyConfig, SmoothingConfig, TerrainConfig,
};
pub use elevation::{build_elevation_grid, idw_elevation};
pub use frame::{GridFrame, MAX_GRID_CELLS, TerrainBounds};
pub use inflation::{FootprintMask, inflate};
pub use occupancy::build_occupancy_grid;
pub use scalar::ScalarGrid;
pub use smoothing::GaussianKernel;
