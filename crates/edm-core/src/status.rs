use serde::{Deserialize, Serialize};

use crate::types::IndexRange;

/// Genealogy status bit carried by every truth particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleStatus {
    /// The particle has no mothers.
    Beam,
    /// The particle has mothers but no daughters.
    Stable,
    /// The particle has both mothers and daughters.
    Decayed,
}

impl ParticleStatus {
    /// Classifies a candidate from its mother and daughter ranges.
    ///
    /// A missing mother range wins regardless of daughters.
    pub fn classify(mothers: Option<IndexRange>, daughters: Option<IndexRange>) -> Self {
        match (mothers, daughters) {
            (None, _) => ParticleStatus::Beam,
            (Some(_), None) => ParticleStatus::Stable,
            (Some(_), Some(_)) => ParticleStatus::Decayed,
        }
    }
}

/// Match-quality bit carried by every reconstructed object.
///
/// No `Default` is provided; every resolution path assigns the bit explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Associated to a truth particle referenced directly.
    Matched,
    /// No association could be built.
    Unmatched,
    /// Associated to a truth particle found one level down a cascade.
    MatchInCascade,
}

impl MatchStatus {
    /// Returns whether the status implies exactly one association.
    pub fn has_association(&self) -> bool {
        !matches!(self, MatchStatus::Unmatched)
    }
}
