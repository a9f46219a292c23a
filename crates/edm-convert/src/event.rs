use edm_core::errors::EdmError;
use edm_core::{EngineEvent, EventInput, EventProvenance, MatchContext, RngHandle};
use edm_graph::{canonical_hash, GenealogyBuilder, GenealogyGraph};
use tracing::info;

use crate::config::ConverterConfig;
use crate::passthrough::{convert_jets, convert_missing_energy, Jet, MissingEnergy};
use crate::reco::{convert_reco, MatchDiagnostic, RecoCollection, RecoKind};
use crate::smear::{smear_particles, SmearedParticle};

/// Everything produced from one event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Event number, seed and graph fingerprint.
    pub provenance: EventProvenance,
    /// Truth genealogy.
    pub graph: GenealogyGraph,
    /// Converted electrons.
    pub electrons: RecoCollection,
    /// Converted muons; empty when muon conversion is disabled.
    pub muons: RecoCollection,
    /// Converted photons.
    pub photons: RecoCollection,
    /// Converted jets.
    pub jets: Vec<Jet>,
    /// Converted missing transverse energy.
    pub missing_energy: Vec<MissingEnergy>,
    /// Smeared copies of truth particles; empty unless smearing is enabled.
    pub smeared: Vec<SmearedParticle>,
    /// Objects left unmatched, across all collections.
    pub diagnostics: Vec<MatchDiagnostic>,
}

impl EventRecord {
    /// Reconstructed collections in conversion order.
    pub fn collections(&self) -> [&RecoCollection; 3] {
        [&self.electrons, &self.muons, &self.photons]
    }
}

/// Per-event driver: builds the genealogy, then converts every collection.
///
/// Events are independent; the only state carried between calls is the
/// event counter stamped into provenance.
#[derive(Debug, Clone)]
pub struct EventConverter {
    config: ConverterConfig,
    builder: GenealogyBuilder,
    events_converted: u64,
}

impl EventConverter {
    /// Creates a converter after validating its configuration.
    pub fn new(config: ConverterConfig) -> Result<Self, EdmError> {
        config.validate()?;
        let builder = GenealogyBuilder::new(config.genealogy.clone());
        Ok(Self {
            config,
            builder,
            events_converted: 0,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Number of events converted so far.
    pub fn events_converted(&self) -> u64 {
        self.events_converted
    }

    /// Ingests an engine event and converts it.
    pub fn convert_engine_event(&mut self, event: &EngineEvent) -> Result<EventRecord, EdmError> {
        let input = EventInput::ingest(event)?;
        self.convert(&input)
    }

    /// Converts one ingested event.
    pub fn convert(&mut self, input: &EventInput) -> Result<EventRecord, EdmError> {
        let event_number = self.events_converted;
        if input.store.truth_len() == 0 {
            return Err(EdmError::input(
                "empty-candidate-sequence",
                "event carries no generated particles",
            )
            .with_context("event", event_number));
        }

        let graph = self
            .builder
            .build(input.store.truth())
            .map_err(|err| err.with_context("event", event_number))?;
        let ctx = MatchContext::new(&input.store, graph.particle_count());

        let mut diagnostics = Vec::new();
        let (electrons, unmatched) = convert_reco(RecoKind::Electron, &input.electrons, &ctx)?;
        diagnostics.extend(unmatched);
        let muons = if self.config.convert_muons {
            let (muons, unmatched) = convert_reco(RecoKind::Muon, &input.muons, &ctx)?;
            diagnostics.extend(unmatched);
            muons
        } else {
            RecoCollection::new(RecoKind::Muon, ctx.truth_len)
        };
        let (photons, unmatched) = convert_reco(RecoKind::Photon, &input.photons, &ctx)?;
        diagnostics.extend(unmatched);

        let jets = convert_jets(&input.jets, self.config.jet_area_sentinel);
        let missing_energy = convert_missing_energy(&input.missing_energy);

        let smeared = if self.config.smearing.enabled {
            let mut rng = RngHandle::for_event(self.config.seed, event_number);
            smear_particles(&graph, &self.config.smearing, &mut rng)?
        } else {
            Vec::new()
        };

        let provenance = EventProvenance {
            event_number,
            seed: self.config.seed,
            graph_hash: canonical_hash(&graph),
            schema_version: self.config.genealogy.schema_version,
        };

        info!(
            event = event_number,
            particles = graph.particle_count(),
            vertices = graph.vertex_count(),
            electrons = electrons.len(),
            muons = muons.len(),
            photons = photons.len(),
            jets = jets.len(),
            unmatched = diagnostics.len(),
            "converted event"
        );
        self.events_converted += 1;

        Ok(EventRecord {
            provenance,
            graph,
            electrons,
            muons,
            photons,
            jets,
            missing_energy,
            smeared,
            diagnostics,
        })
    }
}
