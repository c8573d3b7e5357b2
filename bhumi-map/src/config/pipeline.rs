//! Build pipeline sections: elevation, occupancy, smoothing, inflation.

use serde::{Deserialize, Serialize};

use crate::grid::{ElevationConfig, InflationConfig, OccupancyConfig, SmoothingConfig};

use super::defaults;

/// Elevation section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ElevationSection {
    /// Ground points averaged per cell
    #[serde(default = "defaults::elevation_neighbors")]
    pub num_neighbors_avg: usize,
}

impl Default for ElevationSection {
    fn default() -> Self {
        Self {
            num_neighbors_avg: defaults::elevation_neighbors(),
        }
    }
}

impl ElevationSection {
    /// Convert to ElevationConfig
    pub fn to_elevation_config(&self) -> ElevationConfig {
        ElevationConfig {
            num_neighbors: self.num_neighbors_avg,
        }
    }
}

/// Occupancy section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OccupancySection {
    /// Obstacle points examined per cell
    #[serde(default = "defaults::occupancy_neighbors")]
    pub num_neighbors: usize,

    /// Smoothed density above which a cell is occupied
    #[serde(default = "defaults::occupancy_threshold")]
    pub occupancy_threshold: f32,
}

impl Default for OccupancySection {
    fn default() -> Self {
        Self {
            num_neighbors: defaults::occupancy_neighbors(),
            occupancy_threshold: defaults::occupancy_threshold(),
        }
    }
}

impl OccupancySection {
    /// Convert to OccupancyConfig
    pub fn to_occupancy_config(&self) -> OccupancyConfig {
        OccupancyConfig {
            num_neighbors: self.num_neighbors,
            threshold: self.occupancy_threshold,
        }
    }
}

/// Gaussian smoothing section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SmoothingSection {
    /// Kernel half-width in cells
    #[serde(default = "defaults::kernel_half_width")]
    pub half_width: usize,

    /// Kernel variance in cells²
    #[serde(default = "defaults::kernel_sigma_sq")]
    pub sigma_sq: f32,
}

impl Default for SmoothingSection {
    fn default() -> Self {
        Self {
            half_width: defaults::kernel_half_width(),
            sigma_sq: defaults::kernel_sigma_sq(),
        }
    }
}

impl SmoothingSection {
    /// Convert to SmoothingConfig
    pub fn to_smoothing_config(&self) -> SmoothingConfig {
        SmoothingConfig {
            half_width: self.half_width,
            sigma_sq: self.sigma_sq,
        }
    }
}

/// Footprint inflation section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InflationSection {
    /// Build and consult the inflated grid
    #[serde(default)]
    pub enabled: bool,

    /// Robot radius (meters)
    #[serde(default = "defaults::robot_radius")]
    pub robot_radius: f32,
}

impl Default for InflationSection {
    fn default() -> Self {
        Self {
            enabled: false,
            robot_radius: defaults::robot_radius(),
        }
    }
}

impl InflationSection {
    /// Convert to InflationConfig
    pub fn to_inflation_config(&self) -> InflationConfig {
        InflationConfig {
            enabled: self.enabled,
            robot_radius: self.robot_radius,
        }
    }
}
