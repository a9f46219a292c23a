//! Engine-side records and the ingestion boundary.
//!
//! The simulation engine exposes 1-based unique identifiers for candidates
//! and for the entries of reference lists. They are decremented exactly once,
//! here; everything downstream works with 0-based indices.

use serde::{Deserialize, Serialize};

use crate::errors::EdmError;
use crate::store::{Candidate, CandidateStore, JetCandidate, MissingEnergyCandidate, RecoCandidate};
use crate::types::{IndexRange, LorentzVector, SpacetimePoint};

/// Bound value the engine uses for "no index".
pub const NO_INDEX: i64 = -1;

/// Candidate record exactly as exported by the simulation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineCandidate {
    /// 1-based unique identifier.
    pub unique_id: u32,
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
    /// 0-based mother bounds `(m1, m2)`.
    #[serde(default = "no_range")]
    pub mothers: (i64, i64),
    /// 0-based daughter bounds `(d1, d2)`.
    #[serde(default = "no_range")]
    pub daughters: (i64, i64),
    /// 1-based unique identifiers of referenced candidates.
    #[serde(default)]
    pub references: Vec<u32>,
}

fn no_range() -> (i64, i64) {
    (NO_INDEX, NO_INDEX)
}

/// Reconstructed object exactly as exported by the simulation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineRecoObject {
    /// PDG particle code.
    #[serde(default)]
    pub pdg: i32,
    /// Engine status code.
    #[serde(default)]
    pub status: i32,
    /// Electric charge in units of e.
    #[serde(default)]
    pub charge: i32,
    /// Four-momentum.
    pub momentum: LorentzVector,
    /// Reconstructed production point.
    #[serde(default)]
    pub position: SpacetimePoint,
    /// 1-based unique identifiers of contributing candidates.
    #[serde(default)]
    pub references: Vec<u32>,
}

/// All engine collections of a single event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineEvent {
    /// Truth candidates (the engine's "all particles" array).
    #[serde(default)]
    pub particles: Vec<EngineCandidate>,
    /// Detector-level candidates referenced from reconstructed objects.
    #[serde(default)]
    pub intermediates: Vec<EngineCandidate>,
    /// Reconstructed electrons.
    #[serde(default)]
    pub electrons: Vec<EngineRecoObject>,
    /// Reconstructed muons.
    #[serde(default)]
    pub muons: Vec<EngineRecoObject>,
    /// Reconstructed photons.
    #[serde(default)]
    pub photons: Vec<EngineRecoObject>,
    /// Reconstructed jets.
    #[serde(default)]
    pub jets: Vec<JetCandidate>,
    /// Missing transverse energy objects.
    #[serde(default)]
    pub missing_energy: Vec<MissingEnergyCandidate>,
}

/// Event collections after ingestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventInput {
    /// Truth and intermediate candidates.
    pub store: CandidateStore,
    /// Reconstructed electrons.
    pub electrons: Vec<RecoCandidate>,
    /// Reconstructed muons.
    pub muons: Vec<RecoCandidate>,
    /// Reconstructed photons.
    pub photons: Vec<RecoCandidate>,
    /// Reconstructed jets.
    pub jets: Vec<JetCandidate>,
    /// Missing transverse energy objects.
    pub missing_energy: Vec<MissingEnergyCandidate>,
}

impl EventInput {
    /// Converts engine collections into 0-based records.
    pub fn ingest(event: &EngineEvent) -> Result<Self, EdmError> {
        let store = ingest_store(&event.particles, &event.intermediates)?;
        Ok(Self {
            store,
            electrons: ingest_reco(&event.electrons, "electrons")?,
            muons: ingest_reco(&event.muons, "muons")?,
            photons: ingest_reco(&event.photons, "photons")?,
            jets: event.jets.clone(),
            missing_energy: event.missing_energy.clone(),
        })
    }
}

/// Converts a 1-based engine identifier into a 0-based index.
pub fn index_from_unique_id(unique_id: u32) -> Result<usize, EdmError> {
    let index = unique_id.checked_sub(1).ok_or_else(|| {
        EdmError::input("zero-unique-id", "engine unique identifiers start at 1")
    })?;
    Ok(index as usize)
}

/// Builds the candidate store from engine truth and intermediate records.
///
/// Intermediate candidates keep only their reference lists; their genealogy
/// is not part of the truth graph.
pub fn ingest_store(
    particles: &[EngineCandidate],
    intermediates: &[EngineCandidate],
) -> Result<CandidateStore, EdmError> {
    let truth = particles
        .iter()
        .map(|record| ingest_candidate(record, true))
        .collect::<Result<Vec<_>, _>>()?;
    let intermediates = intermediates
        .iter()
        .map(|record| ingest_candidate(record, false))
        .collect::<Result<Vec<_>, _>>()?;
    CandidateStore::new(truth, intermediates)
}

fn ingest_candidate(record: &EngineCandidate, truth: bool) -> Result<Candidate, EdmError> {
    let index = index_from_unique_id(record.unique_id)?;
    let (mothers, daughters) = if truth {
        (
            decode_range(record.mothers, "mothers", index)?,
            decode_range(record.daughters, "daughters", index)?,
        )
    } else {
        (None, None)
    };
    Ok(Candidate {
        index,
        pdg: record.pdg,
        status: record.status,
        charge: record.charge,
        momentum: record.momentum,
        position: record.position,
        mothers,
        daughters,
        references: decode_references(&record.references)
            .map_err(|err| err.with_context("candidate", index))?,
    })
}

fn ingest_reco(objects: &[EngineRecoObject], collection: &str) -> Result<Vec<RecoCandidate>, EdmError> {
    objects
        .iter()
        .enumerate()
        .map(|(position, object)| {
            let references = decode_references(&object.references).map_err(|err| {
                err.with_context("collection", collection)
                    .with_context("object", position)
            })?;
            Ok(RecoCandidate {
                pdg: object.pdg,
                status: object.status,
                charge: object.charge,
                momentum: object.momentum,
                position: object.position,
                references,
            })
        })
        .collect()
}

fn decode_references(ids: &[u32]) -> Result<Vec<usize>, EdmError> {
    ids.iter().copied().map(index_from_unique_id).collect()
}

/// Decodes engine bounds into an inclusive range.
///
/// A first bound of `-1` means "no range". A second bound of `-1` with a
/// valid first bound denotes the single-element range `[first, first]`.
pub fn decode_range(
    bounds: (i64, i64),
    field: &str,
    candidate: usize,
) -> Result<Option<IndexRange>, EdmError> {
    let malformed = |code: &str, message: &str| {
        EdmError::input(code, message)
            .with_context("candidate", candidate)
            .with_context("field", field)
            .with_context("first", bounds.0)
            .with_context("last", bounds.1)
    };
    let (first, last) = bounds;
    if first == NO_INDEX {
        return Ok(None);
    }
    if first < 0 || last < NO_INDEX {
        return Err(malformed("negative-index", "range bound is negative"));
    }
    let first = first as usize;
    if last == NO_INDEX {
        return Ok(Some(IndexRange::single(first)));
    }
    IndexRange::new(first, last as usize)
        .map(Some)
        .ok_or_else(|| malformed("inverted-range", "range ends before it starts"))
}
