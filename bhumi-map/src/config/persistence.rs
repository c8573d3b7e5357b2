//! Persistence configuration section.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Persistence settings section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistenceSection {
    /// Output format: "bhumi", "csv", or "both"
    #[serde(default = "defaults::output_format")]
    pub output_format: String,

    /// Output directory path
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,

    /// File name without extension
    #[serde(default = "defaults::file_stem")]
    pub file_stem: String,
}

impl Default for PersistenceSection {
    fn default() -> Self {
        Self {
            output_format: defaults::output_format(),
            output_dir: defaults::output_dir(),
            file_stem: defaults::file_stem(),
        }
    }
}

impl PersistenceSection {
    /// Write the native binary map
    pub fn writes_bhumi(&self) -> bool {
        matches!(self.output_format.as_str(), "bhumi" | "both")
    }

    /// Write CSV grid dumps
    pub fn writes_csv(&self) -> bool {
        matches!(self.output_format.as_str(), "csv" | "both")
    }

    /// Path of the binary map file
    pub fn bhumi_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir).join(format!("{}.bhumi", self.file_stem))
    }

    /// Path of a CSV dump for one layer ("elevation", "occupancy", ...)
    pub fn csv_path(&self, layer: &str) -> PathBuf {
        PathBuf::from(&self.output_dir).join(format!("{}_{}.csv", self.file_stem, layer))
    }
}
