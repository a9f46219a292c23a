//! Direct field copies for jets and missing transverse energy.

use edm_core::{JetCandidate, LorentzVector, MissingEnergyCandidate};
use serde::{Deserialize, Serialize};

/// Converted jet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Jet {
    /// Jet four-momentum.
    pub momentum: LorentzVector,
    /// Jet area; always the configured sentinel.
    pub area: f64,
}

/// Converted missing transverse energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissingEnergy {
    /// Magnitude.
    pub magnitude: f64,
    /// Azimuthal angle.
    pub phi: f64,
}

/// Copies jet kinematics; the area is not computed.
pub fn convert_jets(jets: &[JetCandidate], area_sentinel: f64) -> Vec<Jet> {
    jets.iter()
        .map(|jet| Jet {
            momentum: jet.momentum,
            area: area_sentinel,
        })
        .collect()
}

/// Copies missing-energy magnitude and angle.
pub fn convert_missing_energy(objects: &[MissingEnergyCandidate]) -> Vec<MissingEnergy> {
    objects
        .iter()
        .map(|met| MissingEnergy {
            magnitude: met.magnitude,
            phi: met.phi,
        })
        .collect()
}
