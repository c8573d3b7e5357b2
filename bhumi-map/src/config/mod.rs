//! Unified configuration loading for BhumiMap.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bhumi_map::config::BhumiConfig;
//!
//! // Load from default path (configs/terrain.yaml)
//! let config = BhumiConfig::load_default()?;
//!
//! // Or use built-in defaults (no file needed)
//! let config = BhumiConfig::default();
//!
//! // Convert to runtime configs
//! let terrain_config = config.to_terrain_config();
//! let soil = config.soil_classifier();
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`GridSection`] | Resolution and margin |
//! | [`ElevationSection`] | IDW neighbor count |
//! | [`OccupancySection`] | Density neighbor count and occupied threshold |
//! | [`SmoothingSection`] | Gaussian kernel half-width and variance |
//! | [`InflationSection`] | Robot footprint inflation |
//! | [`SoilSection`] | Uniform Bekker-Wong soil parameters |
//! | [`PersistenceSection`] | Output format and directory |
//!
//! ## Example YAML
//!
//! ```yaml
//! grid:
//!   resolution: 0.05   # 5cm cells
//!   margin: 10.0       # meters around the ground cloud
//!
//! occupancy:
//!   num_neighbors: 16
//!   occupancy_threshold: 1.0
//!
//! inflation:
//!   enabled: true
//!   robot_radius: 0.35
//! ```

mod bhumi;
mod defaults;
mod error;
mod grid;
mod persistence;
mod pipeline;
mod soil;

// Re-export main types
pub use bhumi::BhumiConfig;
pub use error::ConfigLoadError;

// Re-export section types
pub use grid::GridSection;
pub use persistence::PersistenceSection;
pub use pipeline::{ElevationSection, InflationSection, OccupancySection, SmoothingSection};
pub use soil::SoilSection;
