//! Core types for the BhumiMap library.
//!
//! ## Type Categories
//!
//! ### Coordinates
//! - [`WorldPoint`]: Planar world coordinates in meters
//! - [`Point3D`]: A site cloud sample with height
//! - [`CellIndex`]: Row/column index into a raster grid
//!
//! ### Point Sets
//! - [`PointSet`]: Immutable, ordered set of cloud samples (ground or obstacle)
//!
//! ### Soil
//! - [`SoilParameters`]: Bekker-Wong terramechanics parameters
//! - [`SoilClassifier`]: Pluggable location -> soil lookup
//! - [`UniformSoil`]: One soil class everywhere

mod cloud;
mod point;
mod soil;

pub use cloud::PointSet;
pub use point::{CellIndex, Point3D, WorldPoint};
pub use soil::{SoilClassifier, SoilParameters, UniformSoil};
