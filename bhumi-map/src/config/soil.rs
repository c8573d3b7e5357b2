//! Soil configuration section.

use serde::{Deserialize, Serialize};

use crate::core::{SoilParameters, UniformSoil};

use super::defaults;

/// Uniform soil section (dry sand by default)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SoilSection {
    /// Cohesive modulus
    #[serde(default = "defaults::soil_k_c")]
    pub k_c: f32,

    /// Frictional modulus
    #[serde(default = "defaults::soil_k_phi")]
    pub k_phi: f32,

    /// Sinkage exponent at zero slip
    #[serde(default = "defaults::soil_n0")]
    pub n0: f32,

    /// Sinkage exponent slip coefficient
    #[serde(default)]
    pub n1: f32,

    /// Internal friction angle (degrees)
    #[serde(default = "defaults::soil_phi_deg")]
    pub phi_deg: f32,
}

impl Default for SoilSection {
    fn default() -> Self {
        Self {
            k_c: defaults::soil_k_c(),
            k_phi: defaults::soil_k_phi(),
            n0: defaults::soil_n0(),
            n1: 0.0,
            phi_deg: defaults::soil_phi_deg(),
        }
    }
}

impl SoilSection {
    /// Convert to SoilParameters (angle in radians)
    pub fn to_soil_parameters(&self) -> SoilParameters {
        SoilParameters {
            k_c: self.k_c,
            k_phi: self.k_phi,
            n0: self.n0,
            n1: self.n1,
            phi: self.phi_deg.to_radians(),
        }
    }

    /// Classifier returning these parameters everywhere
    pub fn to_classifier(&self) -> UniformSoil {
        UniformSoil::new(self.to_soil_parameters())
    }
}
