use edm_core::errors::EdmError;
use edm_core::{Candidate, LorentzVector, ParticleId, ParticleStatus, Point, VertexId};
use serde::{Deserialize, Serialize};

use crate::flags::GenealogyConfig;
use crate::ids::{make_particle, make_vertex};

/// Truth particle node, one per candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleNode {
    /// PDG particle code.
    pub pdg: i32,
    /// Generator status code.
    pub status: i32,
    /// Electric charge in units of e.
    pub charge: i32,
    /// Four-momentum.
    pub momentum: LorentzVector,
    /// Production point.
    pub production_point: Point,
    /// Genealogy status bit.
    pub bits: ParticleStatus,
    /// Shared vertex at which the particle was produced.
    pub start_vertex: Option<VertexId>,
    /// Shared vertex at which the particle decayed.
    pub end_vertex: Option<VertexId>,
}

impl ParticleNode {
    /// Transcribes a candidate and attaches the resolved vertices.
    pub fn from_candidate(
        candidate: &Candidate,
        start_vertex: Option<VertexId>,
        end_vertex: Option<VertexId>,
    ) -> Self {
        Self {
            pdg: candidate.pdg,
            status: candidate.status,
            charge: candidate.charge,
            momentum: candidate.momentum,
            production_point: candidate.position.point(),
            bits: ParticleStatus::classify(candidate.mothers, candidate.daughters),
            start_vertex,
            end_vertex,
        }
    }
}

/// Decay or production vertex shared by every particle meeting at it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexNode {
    /// Vertex position.
    pub position: Point,
    /// Proper decay length recorded at the vertex.
    pub ctau: f64,
}

impl VertexNode {
    /// Creates a vertex node.
    pub fn new(position: Point, ctau: f64) -> Self {
        Self { position, ctau }
    }
}

/// Number of particles carrying each genealogy status bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Particles without mothers.
    pub beam: usize,
    /// Particles with mothers and no daughters.
    pub stable: usize,
    /// Particles with mothers and daughters.
    pub decayed: usize,
}

/// Arena-backed particle/vertex graph of a single event.
///
/// Particles are stored at the index of the candidate they were built from;
/// vertices are stored once and referenced by [`VertexId`] from every
/// particle that starts or ends at them.
#[derive(Debug, Clone, PartialEq)]
pub struct GenealogyGraph {
    config: GenealogyConfig,
    particles: Vec<ParticleNode>,
    vertices: Vec<VertexNode>,
}

impl GenealogyGraph {
    /// Creates an empty graph.
    pub fn new(config: GenealogyConfig) -> Self {
        Self::with_capacity(config, 0)
    }

    /// Creates an empty graph with room for `particles` nodes.
    pub fn with_capacity(config: GenealogyConfig, particles: usize) -> Self {
        Self {
            config,
            particles: Vec::with_capacity(particles),
            vertices: Vec::new(),
        }
    }

    /// Reassembles a graph from stored nodes after checking every vertex link.
    pub fn from_parts(
        config: GenealogyConfig,
        particles: Vec<ParticleNode>,
        vertices: Vec<VertexNode>,
    ) -> Result<Self, EdmError> {
        let graph = Self {
            config,
            particles,
            vertices,
        };
        graph.validate()?;
        Ok(graph)
    }

    /// Returns the configuration the graph was built with.
    pub fn config(&self) -> &GenealogyConfig {
        &self.config
    }

    /// Number of truth particle nodes.
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Number of vertex nodes.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Iterates over particles in index order.
    pub fn particles(&self) -> impl ExactSizeIterator<Item = (ParticleId, &ParticleNode)> + '_ {
        self.particles
            .iter()
            .enumerate()
            .map(|(idx, node)| (make_particle(idx), node))
    }

    /// Iterates over vertices in creation order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = (VertexId, &VertexNode)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(idx, node)| (make_vertex(idx), node))
    }

    /// Returns a particle node.
    pub fn particle(&self, id: ParticleId) -> Result<&ParticleNode, EdmError> {
        self.particles.get(id.index()).ok_or_else(|| {
            EdmError::graph("unknown-particle", "particle does not exist")
                .with_context("particle", id.as_raw())
        })
    }

    /// Returns a vertex node.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexNode, EdmError> {
        self.vertices.get(id.index()).ok_or_else(|| {
            EdmError::graph("unknown-vertex", "vertex does not exist")
                .with_context("vertex", id.as_raw())
        })
    }

    /// Particles whose decay ends at the vertex.
    pub fn incoming(&self, vertex: VertexId) -> Result<Vec<ParticleId>, EdmError> {
        self.vertex(vertex)?;
        Ok(self
            .particles()
            .filter(|(_, node)| node.end_vertex == Some(vertex))
            .map(|(id, _)| id)
            .collect())
    }

    /// Particles produced at the vertex.
    pub fn outgoing(&self, vertex: VertexId) -> Result<Vec<ParticleId>, EdmError> {
        self.vertex(vertex)?;
        Ok(self
            .particles()
            .filter(|(_, node)| node.start_vertex == Some(vertex))
            .map(|(id, _)| id)
            .collect())
    }

    /// Counts particles per status bit.
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for node in &self.particles {
            match node.bits {
                ParticleStatus::Beam => counts.beam += 1,
                ParticleStatus::Stable => counts.stable += 1,
                ParticleStatus::Decayed => counts.decayed += 1,
            }
        }
        counts
    }

    /// Checks that every vertex link is in bounds and every vertex is referenced.
    pub fn validate(&self) -> Result<(), EdmError> {
        let mut referenced = vec![false; self.vertices.len()];
        for (id, node) in self.particles() {
            for (side, link) in [("start", node.start_vertex), ("end", node.end_vertex)] {
                let Some(vertex) = link else { continue };
                let slot = referenced.get_mut(vertex.index()).ok_or_else(|| {
                    EdmError::graph("dangling-vertex", "particle links a missing vertex")
                        .with_context("particle", id.as_raw())
                        .with_context("side", side)
                        .with_context("vertex", vertex.as_raw())
                })?;
                *slot = true;
            }
        }
        if let Some(orphan) = referenced.iter().position(|seen| !seen) {
            return Err(
                EdmError::graph("orphan-vertex", "vertex is not referenced by any particle")
                    .with_context("vertex", orphan),
            );
        }
        Ok(())
    }

    pub(crate) fn push_particle(&mut self, node: ParticleNode) -> ParticleId {
        let id = make_particle(self.particles.len());
        self.particles.push(node);
        id
    }

    pub(crate) fn push_vertex(&mut self, node: VertexNode) -> VertexId {
        let id = make_vertex(self.vertices.len());
        self.vertices.push(node);
        id
    }

    pub(crate) fn raw_particles(&self) -> &[ParticleNode] {
        &self.particles
    }

    pub(crate) fn raw_vertices(&self) -> &[VertexNode] {
        &self.vertices
    }
}

impl Default for GenealogyGraph {
    fn default() -> Self {
        Self::new(GenealogyConfig::default())
    }
}
