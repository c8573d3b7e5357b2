//! Soil parameters and the classifier seam.
//!
//! The terrain grids carry no soil model of their own. Queries delegate to a
//! [`SoilClassifier`], so a spatial soil map can replace [`UniformSoil`]
//! without touching the grid engine.

use serde::{Deserialize, Serialize};

use super::point::WorldPoint;

/// Bekker-Wong pressure-sinkage and shear parameters for one soil class.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoilParameters {
    /// Cohesive modulus of deformation (kN/m^(n+1))
    pub k_c: f32,
    /// Frictional modulus of deformation (kN/m^(n+2))
    pub k_phi: f32,
    /// Sinkage exponent at zero slip
    pub n0: f32,
    /// Sinkage exponent slip coefficient (n = n0 + n1 * slip)
    pub n1: f32,
    /// Internal friction angle (radians)
    pub phi: f32,
}

impl Default for SoilParameters {
    /// Dry sand (Wong, Theory of Ground Vehicles).
    fn default() -> Self {
        Self {
            k_c: 0.99,
            k_phi: 1528.43,
            n0: 1.1,
            n1: 0.0,
            phi: 28.0_f32.to_radians(),
        }
    }
}

/// Location -> soil parameter lookup.
///
/// Implementations must be safe to share between planner threads.
pub trait SoilClassifier: Send + Sync + std::fmt::Debug {
    /// Soil parameters at a world location.
    fn classify(&self, point: WorldPoint) -> SoilParameters;
}

/// A single soil class for the whole site.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UniformSoil {
    /// Parameters returned for every location
    pub params: SoilParameters,
}

impl UniformSoil {
    /// Create a classifier that returns `params` everywhere.
    pub fn new(params: SoilParameters) -> Self {
        Self { params }
    }
}

impl SoilClassifier for UniformSoil {
    fn classify(&self, _point: WorldPoint) -> SoilParameters {
        self.params
    }
}
