//! Material properties

use serde::{Deserialize, Serialize};

/// Steel material definition passed to the host as-is.
///
/// Stresses are in the host's present units (kPa for kN-m-C).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelMaterial {
    /// Material name
    pub name: String,
    /// Minimum yield stress
    pub fy: f64,
    /// Minimum tensile strength
    pub fu: f64,
    /// Effective yield stress
    pub fye: f64,
    /// Effective tensile strength
    pub fue: f64,
    /// Stress-strain curve type (0 = user defined, 1 = parametric simple)
    pub ss_type: i32,
    /// Hysteresis type (7 = isotropic)
    pub ss_hys_type: i32,
    /// Strain at onset of strain hardening
    pub strain_at_hardening: f64,
    /// Strain at maximum stress
    pub strain_at_max_stress: f64,
    /// Strain at rupture
    pub strain_at_rupture: f64,
}

impl SteelMaterial {
    /// Create a steel material with parametric-simple curve and isotropic hysteresis
    pub fn new(name: &str, fy: f64, fu: f64, fye: f64, fue: f64) -> Self {
        Self {
            name: name.to_string(),
            fy,
            fu,
            fye,
            fue,
            ss_type: 1,
            ss_hys_type: 7,
            strain_at_hardening: 0.015,
            strain_at_max_stress: 0.11,
            strain_at_rupture: 0.17,
        }
    }

    /// S355 structural steel in kPa
    pub fn s355() -> Self {
        Self::new("STEEL355", 355_000.0, 510_000.0, 390_500.0, 561_000.0)
    }

    /// Ratio of effective to nominal yield stress
    pub fn ry(&self) -> f64 {
        self.fye / self.fy
    }
}

impl Default for SteelMaterial {
    fn default() -> Self {
        Self::s355()
    }
}
