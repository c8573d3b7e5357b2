//! Main BhumiConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::SoilClassifier;
use crate::grid::TerrainConfig;

use super::error::ConfigLoadError;
use super::grid::GridSection;
use super::persistence::PersistenceSection;
use super::pipeline::{ElevationSection, InflationSection, OccupancySection, SmoothingSection};
use super::soil::SoilSection;

/// Full BhumiMap configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct BhumiConfig {
    /// Grid settings
    #[serde(default)]
    pub grid: GridSection,

    /// Elevation settings
    #[serde(default)]
    pub elevation: ElevationSection,

    /// Occupancy settings
    #[serde(default)]
    pub occupancy: OccupancySection,

    /// Smoothing kernel settings
    #[serde(default)]
    pub smoothing: SmoothingSection,

    /// Footprint inflation settings
    #[serde(default)]
    pub inflation: InflationSection,

    /// Soil settings
    #[serde(default)]
    pub soil: SoilSection,

    /// Persistence settings
    #[serde(default)]
    pub persistence: PersistenceSection,
}

impl BhumiConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/terrain.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/terrain.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Convert to TerrainConfig for TerrainMapBuilder
    pub fn to_terrain_config(&self) -> TerrainConfig {
        TerrainConfig {
            resolution: self.grid.resolution,
            margin: self.grid.margin,
            elevation: self.elevation.to_elevation_config(),
            occupancy: self.occupancy.to_occupancy_config(),
            smoothing: self.smoothing.to_smoothing_config(),
            inflation: self.inflation.to_inflation_config(),
        }
    }

    /// Soil classifier for the configured soil
    pub fn soil_classifier(&self) -> Box<dyn SoilClassifier> {
        Box::new(self.soil.to_classifier())
    }
}
