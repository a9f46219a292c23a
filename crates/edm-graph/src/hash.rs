use edm_core::{ParticleStatus, Point, VertexId};
use sha2::{Digest, Sha256};

use crate::flags::{CtauSource, GenealogyConfig};
use crate::graph::GenealogyGraph;

/// Computes the canonical structural hash for the provided graph.
///
/// Covers every particle field (identity, status, kinematics, production
/// point), every vertex payload and the vertex sharing pattern.
pub fn canonical_hash(graph: &GenealogyGraph) -> String {
    let mut hasher = Sha256::new();
    encode_config(graph.config(), &mut hasher);

    hasher.update((graph.particle_count() as u64).to_le_bytes());
    for (_, particle) in graph.particles() {
        hasher.update(particle.pdg.to_le_bytes());
        hasher.update(particle.status.to_le_bytes());
        hasher.update(particle.charge.to_le_bytes());
        hasher.update([status_tag(particle.bits)]);
        let momentum = &particle.momentum;
        for component in [momentum.px, momentum.py, momentum.pz, momentum.mass] {
            hasher.update(component.to_bits().to_le_bytes());
        }
        encode_point(&particle.production_point, &mut hasher);
        encode_link(particle.start_vertex, &mut hasher);
        encode_link(particle.end_vertex, &mut hasher);
    }

    hasher.update((graph.vertex_count() as u64).to_le_bytes());
    for (_, vertex) in graph.vertices() {
        encode_point(&vertex.position, &mut hasher);
        hasher.update(vertex.ctau.to_bits().to_le_bytes());
    }

    format!("{:x}", hasher.finalize())
}

fn encode_config(config: &GenealogyConfig, hasher: &mut Sha256) {
    match config.ctau_source {
        CtauSource::VertexDefining => hasher.update(b"ctau:vertex-defining"),
        CtauSource::Mother => hasher.update(b"ctau:mother"),
    }
    hasher.update(config.schema_version.major.to_le_bytes());
    hasher.update(config.schema_version.minor.to_le_bytes());
    hasher.update(config.schema_version.patch.to_le_bytes());
}

fn status_tag(status: ParticleStatus) -> u8 {
    match status {
        ParticleStatus::Beam => 0,
        ParticleStatus::Stable => 1,
        ParticleStatus::Decayed => 2,
    }
}

fn encode_link(link: Option<VertexId>, hasher: &mut Sha256) {
    match link {
        Some(vertex) => {
            hasher.update(b":some");
            hasher.update(vertex.as_raw().to_le_bytes());
        }
        None => hasher.update(b":none"),
    }
}

fn encode_point(point: &Point, hasher: &mut Sha256) {
    for coordinate in [point.x, point.y, point.z] {
        hasher.update(coordinate.to_bits().to_le_bytes());
    }
}
