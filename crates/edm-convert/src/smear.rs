//! Momentum smearing of generated particles.

use edm_core::errors::EdmError;
use edm_core::{LorentzVector, ParticleId, RngHandle};
use edm_graph::GenealogyGraph;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::config::SmearingConfig;

const PI_MINUS: i32 = -211;

/// Copy of a truth particle with a rescaled momentum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmearedParticle {
    /// Truth particle the copy was made from.
    pub source: ParticleId,
    /// Particle type code.
    pub pdg: i32,
    /// Electric charge.
    pub charge: i32,
    /// Smeared four-momentum; the mass is kept.
    pub momentum: LorentzVector,
}

/// Whether a particle passes the tracker filter.
pub fn is_tracked(pdg: i32, charge: i32) -> bool {
    charge != 0 || pdg == PI_MINUS
}

/// Rescales the three-momentum of selected truth particles by `1 + N(0, resolution)`.
pub fn smear_particles(
    graph: &GenealogyGraph,
    config: &SmearingConfig,
    rng: &mut RngHandle,
) -> Result<Vec<SmearedParticle>, EdmError> {
    let normal = Normal::new(1.0, config.resolution).map_err(|err| {
        EdmError::config("invalid-resolution", err.to_string())
            .with_context("resolution", config.resolution)
    })?;

    let smeared = graph
        .particles()
        .filter(|(_, node)| !config.tracker_only || is_tracked(node.pdg, node.charge))
        .map(|(id, node)| {
            let factor = normal.sample(rng.inner_mut());
            SmearedParticle {
                source: id,
                pdg: node.pdg,
                charge: node.charge,
                momentum: node.momentum.scaled(factor),
            }
        })
        .collect();
    Ok(smeared)
}
