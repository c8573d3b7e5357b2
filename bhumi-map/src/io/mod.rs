//! Map persistence and export.
//!
//! - **Native .bhumi format**: Binary frame, elevation and occupancy layers
//! - **CSV export**: `x,y,value` dumps of any layer for plotting
//!
//! ## Saving and Loading Maps
//!
//! ```rust,ignore
//! use bhumi_map::io::{save_bhumi, load_bhumi};
//! use bhumi_map::{TerrainMap, TerrainConfig, UniformSoil};
//! use std::path::Path;
//!
//! // Save map
//! save_bhumi(&map, Path::new("site.bhumi"))?;
//!
//! // Load and rebuild (inflation is recomputed from the config)
//! let grids = load_bhumi(Path::new("site.bhumi"))?;
//! let map = TerrainMap::from_grids(grids, &config, Box::new(UniformSoil::default()))?;
//! ```

pub mod bhumi_format;
pub mod csv;

pub use bhumi_format::{load_bhumi, read_bhumi, save_bhumi, write_bhumi, write_grids};
pub use csv::{export_grid_csv, write_grid_csv};
