use edm_core::{ParticleId, VertexId};

/// Creates a [`ParticleId`] from an arena index.
pub(crate) fn make_particle(index: usize) -> ParticleId {
    ParticleId::from_raw(index as u64)
}

/// Creates a [`VertexId`] from an arena index.
pub(crate) fn make_vertex(index: usize) -> VertexId {
    VertexId::from_raw(index as u64)
}
