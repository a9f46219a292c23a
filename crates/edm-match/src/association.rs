use std::collections::BTreeSet;

use edm_core::errors::EdmError;
use edm_core::{MatchOutcome, ParticleId, RecoId};
use serde::{Deserialize, Serialize};

/// Link between one reconstructed object and one truth particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Association {
    /// Reconstructed object.
    pub reco: RecoId,
    /// Truth particle.
    pub particle: ParticleId,
}

/// Association collection enforcing at most one link per reconstructed object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredAssociations", into = "StoredAssociations")]
pub struct AssociationSet {
    truth_len: usize,
    entries: Vec<Association>,
    linked: BTreeSet<RecoId>,
}

#[derive(Serialize, Deserialize)]
struct StoredAssociations {
    truth_len: usize,
    entries: Vec<Association>,
}

impl From<StoredAssociations> for AssociationSet {
    fn from(stored: StoredAssociations) -> Self {
        let linked = stored.entries.iter().map(|entry| entry.reco).collect();
        Self {
            truth_len: stored.truth_len,
            entries: stored.entries,
            linked,
        }
    }
}

impl From<AssociationSet> for StoredAssociations {
    fn from(set: AssociationSet) -> Self {
        Self {
            truth_len: set.truth_len,
            entries: set.entries,
        }
    }
}

impl AssociationSet {
    /// Creates an empty set targeting `truth_len` truth particles.
    pub fn new(truth_len: usize) -> Self {
        Self {
            truth_len,
            entries: Vec::new(),
            linked: BTreeSet::new(),
        }
    }

    /// Records the association implied by an outcome, if any.
    pub fn record(
        &mut self,
        reco: RecoId,
        outcome: &MatchOutcome,
    ) -> Result<Option<Association>, EdmError> {
        let Some(particle) = outcome.particle() else {
            return Ok(None);
        };
        if particle.index() >= self.truth_len {
            return Err(EdmError::matching(
                "dangling-association",
                "association targets a particle outside the truth collection",
            )
            .with_context("reco", reco.as_raw())
            .with_context("particle", particle.as_raw())
            .with_context("truth_len", self.truth_len));
        }
        if !self.linked.insert(reco) {
            return Err(EdmError::matching(
                "duplicate-association",
                "reconstructed object already carries an association",
            )
            .with_context("reco", reco.as_raw()));
        }
        let association = Association { reco, particle };
        self.entries.push(association);
        Ok(Some(association))
    }

    /// Associations in recording order.
    pub fn entries(&self) -> &[Association] {
        &self.entries
    }

    /// Number of associations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no association was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Association carried by a reconstructed object, if any.
    pub fn for_reco(&self, reco: RecoId) -> Option<&Association> {
        self.entries.iter().find(|entry| entry.reco == reco)
    }
}
