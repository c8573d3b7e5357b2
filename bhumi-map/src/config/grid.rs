//! Grid configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Grid configuration section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridSection {
    /// Cell resolution (meters)
    #[serde(default = "defaults::resolution")]
    pub resolution: f32,

    /// Padding around the ground cloud extent (meters, every side)
    #[serde(default = "defaults::margin")]
    pub margin: f32,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            resolution: defaults::resolution(),
            margin: defaults::margin(),
        }
    }
}
