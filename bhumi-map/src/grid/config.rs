//! Configuration types for the terrain grids.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};

/// Elevation estimation settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElevationConfig {
    /// Ground points averaged per cell (k of the k-nearest query)
    pub num_neighbors: usize,
}

impl Default for ElevationConfig {
    fn default() -> Self {
        Self { num_neighbors: 8 }
    }
}

/// Occupancy density settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OccupancyConfig {
    /// Obstacle points examined per cell (k of the k-nearest query)
    pub num_neighbors: usize,

    /// Smoothed density above which a cell is occupied
    pub threshold: f32,
}

impl Default for OccupancyConfig {
    fn default() -> Self {
        Self {
            num_neighbors: 16,
            threshold: 1.0,
        }
    }
}

/// Gaussian smoothing settings (in cells)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Kernel half-width K (kernel side = 2K + 1)
    pub half_width: usize,

    /// Kernel variance in cells squared
    pub sigma_sq: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            half_width: 10,
            sigma_sq: 50.0,
        }
    }
}

/// Robot footprint inflation settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InflationConfig {
    /// Build the inflated grid and consult it in validity queries
    pub enabled: bool,

    /// Robot radius in meters
    pub robot_radius: f32,
}

impl Default for InflationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            robot_radius: 0.5,
        }
    }
}

/// Full terrain build configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Meters per cell
    pub resolution: f32,

    /// Padding added around the ground cloud extent on every side (meters)
    pub margin: f32,

    /// Elevation estimation
    pub elevation: ElevationConfig,

    /// Occupancy density
    pub occupancy: OccupancyConfig,

    /// Gaussian smoothing
    pub smoothing: SmoothingConfig,

    /// Footprint inflation
    pub inflation: InflationConfig,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            resolution: 0.05, // 5cm cells
            margin: 10.0,     // about one vehicle length
            elevation: ElevationConfig::default(),
            occupancy: OccupancyConfig::default(),
            smoothing: SmoothingConfig::default(),
            inflation: InflationConfig::default(),
        }
    }
}

impl TerrainConfig {
    /// Create a configuration with the given resolution and margin.
    pub fn new(resolution: f32, margin: f32) -> Self {
        Self {
            resolution,
            margin,
            ..Default::default()
        }
    }

    /// Builder-style setter for the occupancy threshold.
    pub fn with_occupancy_threshold(mut self, threshold: f32) -> Self {
        self.occupancy.threshold = threshold;
        self
    }

    /// Builder-style setter for the smoothing kernel.
    pub fn with_smoothing(mut self, half_width: usize, sigma_sq: f32) -> Self {
        self.smoothing = SmoothingConfig {
            half_width,
            sigma_sq,
        };
        self
    }

    /// Builder-style setter enabling inflation with the given robot radius.
    pub fn with_inflation(mut self, robot_radius: f32) -> Self {
        self.inflation = InflationConfig {
            enabled: true,
            robot_radius,
        };
        self
    }

    /// Check every value a build depends on.
    pub fn validate(&self) -> Result<()> {
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(invalid(format!(
                "resolution must be positive, got {}",
                self.resolution
            )));
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(invalid(format!(
                "margin must be non-negative, got {}",
                self.margin
            )));
        }
        if self.elevation.num_neighbors == 0 {
            return Err(invalid("elevation.num_neighbors must be at least 1".into()));
        }
        if self.occupancy.num_neighbors == 0 {
            return Err(invalid("occupancy.num_neighbors must be at least 1".into()));
        }
        if !self.occupancy.threshold.is_finite() {
            return Err(invalid("occupancy.threshold must be finite".into()));
        }
        if !(self.smoothing.sigma_sq.is_finite() && self.smoothing.sigma_sq > 0.0) {
            return Err(invalid(format!(
                "smoothing.sigma_sq must be positive, got {}",
                self.smoothing.sigma_sq
            )));
        }
        if !(self.inflation.robot_radius.is_finite() && self.inflation.robot_radius >= 0.0) {
            return Err(invalid(format!(
                "inflation.robot_radius must be non-negative, got {}",
                self.inflation.robot_radius
            )));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> TerrainError {
    TerrainError::InvalidConfiguration(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TerrainConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.occupancy.num_neighbors, 16);
        assert_eq!(config.smoothing.half_width, 10);
    }

    #[test]
    fn test_rejects_non_positive_resolution() {
        for resolution in [0.0, -0.5, f32::NAN] {
            let config = TerrainConfig::new(resolution, 1.0);
            assert!(matches!(
                config.validate(),
                Err(TerrainError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_rejects_zero_neighbors() {
        let mut config = TerrainConfig::default();
        config.elevation.num_neighbors = 0;
        assert!(config.validate().is_err());

        let mut config = TerrainConfig::default();
        config.occupancy.num_neighbors = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_smoothing_and_radius() {
        let config = TerrainConfig::default().with_smoothing(3, 0.0);
        assert!(config.validate().is_err());

        let config = TerrainConfig::default().with_inflation(-1.0);
        assert!(config.validate().is_err());
    }
}
