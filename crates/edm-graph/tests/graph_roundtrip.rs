use edm_core::rng::RngHandle;
use edm_core::VertexId;
use edm_graph::{
    canonical_hash, gen_cascade_event, graph_from_bytes, graph_from_json, graph_to_bytes,
    graph_to_json, CtauSource, GenealogyBuilder, GenealogyConfig, GenealogyGraph, ParticleNode,
    VertexNode,
};

fn sample_graph() -> GenealogyGraph {
    let mut rng = RngHandle::from_seed(11);
    let candidates = gen_cascade_event(2, 12, &mut rng).unwrap();
    GenealogyBuilder::default().build(&candidates).unwrap()
}

#[test]
fn json_and_bytes_preserve_structure() {
    let graph = sample_graph();
    let hash_before = canonical_hash(&graph);

    let json = graph_to_json(&graph).unwrap();
    let restored = graph_from_json(&json).unwrap();
    assert_eq!(canonical_hash(&restored), hash_before);
    assert_eq!(restored, graph);

    let bytes = graph_to_bytes(&graph).unwrap();
    let restored = graph_from_bytes(&bytes).unwrap();
    assert_eq!(canonical_hash(&restored), hash_before);
}

#[test]
fn hash_tracks_configuration() {
    let mut rng = RngHandle::from_seed(11);
    let candidates = gen_cascade_event(2, 12, &mut rng).unwrap();
    let config = GenealogyConfig {
        ctau_source: CtauSource::Mother,
        ..GenealogyConfig::default()
    };
    let mother = GenealogyBuilder::new(config).build(&candidates).unwrap();
    assert_ne!(canonical_hash(&mother), canonical_hash(&sample_graph()));
}

#[test]
fn corrupted_payload_is_rejected() {
    assert_eq!(graph_from_json("{").unwrap_err().code(), "deserialize-json");
    assert_eq!(graph_from_bytes(&[1, 2]).unwrap_err().code(), "deserialize-bytes");
}

#[test]
fn orphan_and_dangling_vertices_fail_validation() {
    let orphan = GenealogyGraph::from_parts(
        GenealogyConfig::default(),
        Vec::new(),
        vec![VertexNode::new(Default::default(), 0.0)],
    )
    .unwrap_err();
    assert_eq!(orphan.code(), "orphan-vertex");

    let graph = sample_graph();
    let mut particles: Vec<ParticleNode> = graph.particles().map(|(_, p)| p.clone()).collect();
    particles[0].end_vertex = Some(VertexId::from_raw(10_000));
    let vertices: Vec<VertexNode> = graph.vertices().map(|(_, v)| *v).collect();
    let err = GenealogyGraph::from_parts(GenealogyConfig::default(), particles, vertices)
        .unwrap_err();
    assert_eq!(err.code(), "dangling-vertex");
    assert_eq!(err.info().context.get("side"), Some(&"end".to_string()));
}

#[test]
fn json_keeps_every_float_bit() {
    let graph = sample_graph();
    let restored = graph_from_json(&graph_to_json(&graph).unwrap()).unwrap();
    for ((_, before), (_, after)) in graph.vertices().zip(restored.vertices()) {
        assert_eq!(before.position.x.to_bits(), after.position.x.to_bits());
        assert_eq!(before.position.y.to_bits(), after.position.y.to_bits());
        assert_eq!(before.position.z.to_bits(), after.position.z.to_bits());
        assert_eq!(before.ctau.to_bits(), after.ctau.to_bits());
    }
    for ((_, before), (_, after)) in graph.particles().zip(restored.particles()) {
        assert_eq!(before.momentum.pz.to_bits(), after.momentum.pz.to_bits());
    }
}

#[test]
fn hash_tracks_kinematics() {
    let mut rng = RngHandle::from_seed(11);
    let mut candidates = gen_cascade_event(2, 12, &mut rng).unwrap();
    let reference = GenealogyBuilder::default().build(&candidates).unwrap();
    candidates[3].momentum = candidates[3].momentum.scaled(1.01);
    let shifted = GenealogyBuilder::default().build(&candidates).unwrap();
    assert_eq!(shifted.vertex_count(), reference.vertex_count());
    assert_ne!(canonical_hash(&shifted), canonical_hash(&reference));
}
