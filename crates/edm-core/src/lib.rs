#![deny(missing_docs)]
#![doc = "Core ids, records and contracts shared by the event-data converter crates."]

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod input;
pub mod provenance;
pub mod rng;
mod status;
mod store;
mod types;

pub use errors::{EdmError, ErrorInfo};
pub use input::{EngineCandidate, EngineEvent, EngineRecoObject, EventInput};
pub use provenance::{EventProvenance, SchemaVersion};
pub use rng::{event_seed, RngHandle};
pub use status::{MatchStatus, ParticleStatus};
pub use store::{Candidate, CandidateStore, JetCandidate, MissingEnergyCandidate, RecoCandidate};
pub use types::{IndexRange, LorentzVector, Point, SpacetimePoint};

/// Identifier of a truth particle node; equal to the candidate index it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticleId(u64);

impl ParticleId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }

    /// Returns the identifier as an arena index.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Identifier of a shared vertex node within the vertex arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(u64);

impl VertexId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }

    /// Returns the identifier as an arena index.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Identifier of a reconstructed object within its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecoId(u64);

impl RecoId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Why a resolution produced no association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnmatchedReason {
    /// The reference list is empty.
    NoReferences,
    /// The consulted reference lies outside the truth collection.
    OutOfRange {
        /// Offending 0-based index.
        index: usize,
    },
    /// Neither level of the reference list reached a truth particle.
    NoTruthHit,
}

/// Tagged result of resolving one reconstructed object.
///
/// Collapses to a [`MatchStatus`] for persistence; the richer variants are
/// kept for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Exactly one truth particle, referenced directly.
    Matched(ParticleId),
    /// Exactly one truth particle, reached through an intermediate candidate.
    MatchedInCascade(ParticleId),
    /// No truth particle could be reached.
    Unmatched(UnmatchedReason),
    /// More than one truth particle was reached.
    Ambiguous {
        /// First-level truth hits.
        direct: usize,
        /// Second-level truth hits.
        cascade: usize,
    },
}

impl MatchOutcome {
    /// Persisted match-quality bit.
    pub fn status(&self) -> MatchStatus {
        match self {
            MatchOutcome::Matched(_) => MatchStatus::Matched,
            MatchOutcome::MatchedInCascade(_) => MatchStatus::MatchInCascade,
            MatchOutcome::Unmatched(_) | MatchOutcome::Ambiguous { .. } => MatchStatus::Unmatched,
        }
    }

    /// Associated truth particle, if any.
    pub fn particle(&self) -> Option<ParticleId> {
        match self {
            MatchOutcome::Matched(id) | MatchOutcome::MatchedInCascade(id) => Some(*id),
            MatchOutcome::Unmatched(_) | MatchOutcome::Ambiguous { .. } => None,
        }
    }
}

/// Read-only view consulted while resolving reference lists.
#[derive(Debug, Clone, Copy)]
pub struct MatchContext<'a> {
    /// Candidate store used to follow intermediate references.
    pub store: &'a CandidateStore,
    /// Number of truth particle nodes; valid targets are `[0, truth_len)`.
    pub truth_len: usize,
}

impl<'a> MatchContext<'a> {
    /// Creates a context over a store and a truth particle count.
    pub fn new(store: &'a CandidateStore, truth_len: usize) -> Self {
        Self { store, truth_len }
    }

    /// Returns the truth particle an index designates, if it is in range.
    pub fn truth_particle(&self, index: usize) -> Option<ParticleId> {
        (index < self.truth_len).then(|| ParticleId::from_raw(index as u64))
    }
}

/// Strategy resolving a reference list to at most one truth particle.
pub trait TruthMatcher: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Resolves a reference list. Never fails; failures are outcomes.
    fn resolve(&self, references: &[usize], ctx: &MatchContext<'_>) -> MatchOutcome;
}
