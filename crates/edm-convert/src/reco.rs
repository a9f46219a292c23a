//! Conversion of reconstructed leptons and photons.

use edm_core::errors::EdmError;
use edm_core::{LorentzVector, MatchContext, MatchOutcome, MatchStatus, Point, RecoCandidate, RecoId};
use edm_match::{AssociationSet, MatchMode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Reconstructed collections carrying truth associations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecoKind {
    /// Electrons, matched directly.
    Electron,
    /// Muons, matched directly.
    Muon,
    /// Photons, matched through one cascade level.
    Photon,
}

impl RecoKind {
    /// Collection label used in logs and diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            RecoKind::Electron => "electrons",
            RecoKind::Muon => "muons",
            RecoKind::Photon => "photons",
        }
    }

    /// Matching strategy applied to this collection.
    pub fn match_mode(&self) -> MatchMode {
        match self {
            RecoKind::Electron | RecoKind::Muon => MatchMode::Direct,
            RecoKind::Photon => MatchMode::Cascade,
        }
    }

    fn transcribe(&self, object: &RecoCandidate, bits: MatchStatus) -> RecoParticle {
        match self {
            RecoKind::Electron | RecoKind::Muon => RecoParticle {
                pdg: object.pdg,
                status: object.status,
                charge: object.charge,
                momentum: object.momentum,
                position: object.position.point(),
                bits,
            },
            // photons carry no identity, charge or vertex of their own
            RecoKind::Photon => RecoParticle {
                pdg: -1,
                status: -1,
                charge: 0,
                momentum: object.momentum,
                position: Point::new(-1.0, -1.0, -1.0),
                bits,
            },
        }
    }
}

/// Output record of one reconstructed object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecoParticle {
    /// Particle type code.
    pub pdg: i32,
    /// Engine status code.
    pub status: i32,
    /// Electric charge.
    pub charge: i32,
    /// Four-momentum.
    pub momentum: LorentzVector,
    /// Vertex position.
    pub position: Point,
    /// Match-quality bit.
    pub bits: MatchStatus,
}

/// One converted collection with its associations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoCollection {
    /// Collection kind.
    pub kind: RecoKind,
    /// Records in input order.
    pub particles: Vec<RecoParticle>,
    /// Truth associations, at most one per record.
    pub associations: AssociationSet,
}

impl RecoCollection {
    /// Creates an empty collection targeting `truth_len` truth particles.
    pub fn new(kind: RecoKind, truth_len: usize) -> Self {
        Self {
            kind,
            particles: Vec::new(),
            associations: AssociationSet::new(truth_len),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the collection holds no record.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Non-fatal report of an object that could not be associated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchDiagnostic {
    /// Collection the object belongs to.
    pub collection: RecoKind,
    /// Object position within its collection.
    pub object: RecoId,
    /// Resolution outcome.
    pub outcome: MatchOutcome,
    /// Object energy.
    pub energy: f64,
}

impl MatchDiagnostic {
    /// Human-readable description.
    pub fn message(&self) -> String {
        let reason = match self.outcome {
            MatchOutcome::Ambiguous { direct, cascade } => format!(
                "{} truth particles reached ({direct} direct, {cascade} in cascade)",
                direct + cascade
            ),
            _ => "no truth particle reached".to_string(),
        };
        format!(
            "{} object {} with energy {:.3} left unmatched: {reason}",
            self.collection.label(),
            self.object.as_raw(),
            self.energy
        )
    }
}

/// Converts one collection and resolves each object's references.
///
/// Unmatched objects are still emitted, flagged `Unmatched`, and reported
/// through the returned diagnostics and a `warn!` event.
pub fn convert_reco(
    kind: RecoKind,
    objects: &[RecoCandidate],
    ctx: &MatchContext<'_>,
) -> Result<(RecoCollection, Vec<MatchDiagnostic>), EdmError> {
    let matcher = kind.match_mode().matcher();
    let mut collection = RecoCollection::new(kind, ctx.truth_len);
    let mut diagnostics = Vec::new();

    for (position, object) in objects.iter().enumerate() {
        let reco = RecoId::from_raw(position as u64);
        let outcome = matcher.resolve(&object.references, ctx);
        let particle = kind.transcribe(object, outcome.status());
        collection
            .associations
            .record(reco, &outcome)
            .map_err(|err| err.with_context("collection", kind.label()))?;

        if !outcome.status().has_association() {
            let diagnostic = MatchDiagnostic {
                collection: kind,
                object: reco,
                outcome,
                energy: particle.momentum.energy(),
            };
            warn!(
                collection = kind.label(),
                object = position,
                matcher = matcher.name(),
                "{}",
                diagnostic.message()
            );
            diagnostics.push(diagnostic);
        } else {
            debug!(
                collection = kind.label(),
                object = position,
                particle = ?outcome.particle(),
                bits = ?outcome.status(),
                "associated reconstructed object"
            );
        }
        collection.particles.push(particle);
    }

    Ok((collection, diagnostics))
}
