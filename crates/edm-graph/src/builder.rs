//! Range-encoded genealogy to explicit particle/vertex graph.

use edm_core::errors::EdmError;
use edm_core::{Candidate, IndexRange, VertexId};
use tracing::debug;

use crate::flags::{CtauSource, GenealogyConfig};
use crate::graph::{GenealogyGraph, ParticleNode, VertexNode};

/// Builds one [`GenealogyGraph`] per event from the flat candidate sequence.
#[derive(Debug, Clone, Default)]
pub struct GenealogyBuilder {
    config: GenealogyConfig,
}

impl GenealogyBuilder {
    /// Creates a builder with the provided configuration.
    pub fn new(config: GenealogyConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used by this builder.
    pub fn config(&self) -> &GenealogyConfig {
        &self.config
    }

    /// Converts the candidate sequence into particle and shared vertex nodes.
    ///
    /// Candidates are processed once, in increasing index order. Siblings and
    /// the mothers they descend from end up referencing the same vertex
    /// instance. Fails only when the sequence itself is malformed.
    pub fn build(&self, candidates: &[Candidate]) -> Result<GenealogyGraph, EdmError> {
        check_sequence(candidates)?;
        let mut state = BuildState {
            candidates,
            ctau_source: self.config.ctau_source,
            slots: VertexSlots::new(candidates.len()),
            graph: GenealogyGraph::with_capacity(self.config.clone(), candidates.len()),
        };
        for candidate in candidates {
            let start_vertex = candidate
                .mothers
                .map(|mothers| state.production_vertex(candidate, mothers));
            let end_vertex = candidate
                .daughters
                .map(|daughters| state.decay_vertex(candidate, daughters));
            state.graph.push_particle(ParticleNode::from_candidate(
                candidate,
                start_vertex,
                end_vertex,
            ));
        }
        let graph = state.graph;
        debug!(
            particles = graph.particle_count(),
            vertices = graph.vertex_count(),
            "built genealogy graph"
        );
        Ok(graph)
    }
}

/// Side table with one production and one decay slot per candidate.
///
/// Slots are written ahead of (and behind) the candidate being processed so
/// that whichever member of a sibling group comes first creates the vertex
/// and every later member reuses it.
#[derive(Debug)]
struct VertexSlots {
    production: Vec<Option<VertexId>>,
    decay: Vec<Option<VertexId>>,
}

impl VertexSlots {
    fn new(len: usize) -> Self {
        Self {
            production: vec![None; len],
            decay: vec![None; len],
        }
    }

    fn claim_production(&mut self, index: usize, vertex: VertexId) {
        self.production[index].get_or_insert(vertex);
    }

    fn claim_decay(&mut self, index: usize, vertex: VertexId) {
        self.decay[index].get_or_insert(vertex);
    }
}

struct BuildState<'a> {
    candidates: &'a [Candidate],
    ctau_source: CtauSource,
    slots: VertexSlots,
    graph: GenealogyGraph,
}

impl BuildState<'_> {
    fn production_vertex(&mut self, candidate: &Candidate, mothers: IndexRange) -> VertexId {
        let known = self.slots.production[candidate.index].or(self.slots.decay[mothers.first()]);
        let vertex = known.unwrap_or_else(|| {
            self.graph.push_vertex(VertexNode::new(
                candidate.position.point(),
                candidate.position.t,
            ))
        });
        self.slots.production[candidate.index] = Some(vertex);
        for mother in mothers.iter() {
            self.slots.claim_decay(mother, vertex);
            if let Some(siblings) = self.candidates[mother].daughters {
                for sibling in siblings.iter() {
                    self.slots.claim_production(sibling, vertex);
                }
            }
        }
        vertex
    }

    fn decay_vertex(&mut self, candidate: &Candidate, daughters: IndexRange) -> VertexId {
        let known = self.slots.decay[candidate.index].or(self.slots.production[daughters.first()]);
        let vertex = known.unwrap_or_else(|| {
            let daughter = &self.candidates[daughters.first()];
            let ctau = match self.ctau_source {
                CtauSource::VertexDefining => daughter.position.t,
                CtauSource::Mother => candidate.position.t,
            };
            self.graph
                .push_vertex(VertexNode::new(daughter.position.point(), ctau))
        });
        self.slots.decay[candidate.index] = Some(vertex);
        for daughter in daughters.iter() {
            self.slots.claim_production(daughter, vertex);
            if let Some(co_mothers) = self.candidates[daughter].mothers {
                for mother in co_mothers.iter() {
                    self.slots.claim_decay(mother, vertex);
                }
            }
        }
        vertex
    }
}

fn check_sequence(candidates: &[Candidate]) -> Result<(), EdmError> {
    let len = candidates.len();
    for (position, candidate) in candidates.iter().enumerate() {
        if candidate.index != position {
            return Err(EdmError::graph(
                "index-mismatch",
                "candidate is not stored at its own index",
            )
            .with_context("position", position)
            .with_context("index", candidate.index));
        }
        for (field, range) in [("mothers", candidate.mothers), ("daughters", candidate.daughters)]
        {
            if let Some(range) = range.filter(|range| range.last() >= len) {
                return Err(EdmError::graph(
                    "range-out-of-bounds",
                    "genealogy range points outside the candidate sequence",
                )
                .with_context("candidate", position)
                .with_context("field", field)
                .with_context("last", range.last())
                .with_context("len", len));
            }
        }
    }
    Ok(())
}
