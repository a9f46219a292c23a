//! Zero-based candidate records and the per-event candidate store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::EdmError;
use crate::types::{IndexRange, LorentzVector, SpacetimePoint};

/// Candidate record after ingestion: every cross-reference is a 0-based index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Position in the candidate sequence; the sole identity used for cross-referencing.
    pub index: usize,
    /// PDG particle code.
    pub pdg: i32,
    /// Generator status code.
    pub status: i32,
    /// Electric charge in units of e.
    pub charge: i32,
    /// Four-momentum.
    pub momentum: LorentzVector,
    /// Production point and time.
    pub position: SpacetimePoint,
    /// Mother range, if any.
    pub mothers: Option<IndexRange>,
    /// Daughter range, if any.
    pub daughters: Option<IndexRange>,
    /// Candidates this record points to (empty for truth particles).
    #[serde(default)]
    pub references: Vec<usize>,
}

impl Candidate {
    /// Creates a candidate at rest at the origin with no genealogy.
    pub fn new(index: usize, pdg: i32) -> Self {
        Self {
            index,
            pdg,
            status: 1,
            charge: 0,
            momentum: LorentzVector::default(),
            position: SpacetimePoint::default(),
            mothers: None,
            daughters: None,
            references: Vec::new(),
        }
    }

    /// Sets the inclusive mother range `[first, last]`.
    pub fn with_mothers(mut self, first: usize, last: usize) -> Self {
        self.mothers = IndexRange::new(first, last);
        self
    }

    /// Sets the inclusive daughter range `[first, last]`.
    pub fn with_daughters(mut self, first: usize, last: usize) -> Self {
        self.daughters = IndexRange::new(first, last);
        self
    }

    /// Sets the production point.
    pub fn with_position(mut self, position: SpacetimePoint) -> Self {
        self.position = position;
        self
    }

    /// Sets the four-momentum.
    pub fn with_momentum(mut self, momentum: LorentzVector) -> Self {
        self.momentum = momentum;
        self
    }

    /// Sets the charge.
    pub fn with_charge(mut self, charge: i32) -> Self {
        self.charge = charge;
        self
    }

    /// Sets the reference list.
    pub fn with_references(mut self, references: Vec<usize>) -> Self {
        self.references = references;
        self
    }
}

/// Reconstructed electron, muon or photon as produced by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoCandidate {
    /// PDG particle code.
    pub pdg: i32,
    /// Engine status code.
    pub status: i32,
    /// Electric charge in units of e.
    pub charge: i32,
    /// Four-momentum.
    pub momentum: LorentzVector,
    /// Reconstructed production point.
    pub position: SpacetimePoint,
    /// Candidates that contributed to this object.
    #[serde(default)]
    pub references: Vec<usize>,
}

impl RecoCandidate {
    /// Creates an object with the given momentum and reference list.
    pub fn new(momentum: LorentzVector, references: Vec<usize>) -> Self {
        Self {
            pdg: 0,
            status: 1,
            charge: 0,
            momentum,
            position: SpacetimePoint::default(),
            references,
        }
    }
}

/// Reconstructed jet as produced by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JetCandidate {
    /// Jet four-momentum.
    pub momentum: LorentzVector,
}

/// Missing transverse energy as produced by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MissingEnergyCandidate {
    /// Magnitude of the missing transverse energy.
    pub magnitude: f64,
    /// Azimuthal angle.
    pub phi: f64,
}

/// Per-event store of truth and intermediate candidates.
///
/// Truth candidates occupy positions `[0, N)` and drive the genealogy
/// graph. Intermediate (detector-level) candidates live at positions `>= N`
/// and are only consulted when tracing a cascade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateStore {
    truth: Vec<Candidate>,
    intermediates: BTreeMap<usize, Candidate>,
}

impl CandidateStore {
    /// Creates a store after checking the input contract.
    ///
    /// Truth candidates must sit at the position given by their `index`, and
    /// every mother or daughter range must stay inside the truth sequence.
    /// Intermediates must live beyond the truth sequence with unique indices.
    pub fn new(truth: Vec<Candidate>, intermediates: Vec<Candidate>) -> Result<Self, EdmError> {
        let truth_len = truth.len();
        for (position, candidate) in truth.iter().enumerate() {
            if candidate.index != position {
                return Err(EdmError::input(
                    "index-mismatch",
                    "truth candidate is not stored at its own index",
                )
                .with_context("position", position)
                .with_context("index", candidate.index));
            }
            check_bounds(candidate.mothers, truth_len, "mothers", position)?;
            check_bounds(candidate.daughters, truth_len, "daughters", position)?;
        }
        let mut by_index = BTreeMap::new();
        for candidate in intermediates {
            if candidate.index < truth_len {
                return Err(EdmError::input(
                    "intermediate-in-truth-range",
                    "intermediate candidate overlaps the truth sequence",
                )
                .with_context("index", candidate.index)
                .with_context("truth_len", truth_len));
            }
            let index = candidate.index;
            if by_index.insert(index, candidate).is_some() {
                return Err(EdmError::input(
                    "duplicate-index",
                    "two intermediate candidates share an index",
                )
                .with_context("index", index));
            }
        }
        Ok(Self {
            truth,
            intermediates: by_index,
        })
    }

    /// Truth candidates in increasing index order.
    pub fn truth(&self) -> &[Candidate] {
        &self.truth
    }

    /// Number of truth candidates.
    pub fn truth_len(&self) -> usize {
        self.truth.len()
    }

    /// Number of intermediate candidates.
    pub fn intermediate_len(&self) -> usize {
        self.intermediates.len()
    }

    /// Looks up any candidate by index.
    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.truth
            .get(index)
            .or_else(|| self.intermediates.get(&index))
    }
}

fn check_bounds(
    range: Option<IndexRange>,
    truth_len: usize,
    field: &str,
    position: usize,
) -> Result<(), EdmError> {
    match range {
        Some(range) if range.last() >= truth_len => Err(EdmError::input(
            "range-out-of-bounds",
            "genealogy range points outside the candidate sequence",
        )
        .with_context("candidate", position)
        .with_context("field", field)
        .with_context("first", range.first())
        .with_context("last", range.last())
        .with_context("truth_len", truth_len)
        .with_hint("the upstream engine produced a malformed candidate sequence")),
        _ => Ok(()),
    }
}
