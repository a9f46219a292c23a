use std::collections::{BTreeMap, BTreeSet};

use edm_core::rng::RngHandle;
use edm_core::{Candidate, IndexRange, ParticleStatus};
use edm_graph::{canonical_hash, gen_cascade_event, GenealogyBuilder, GenealogyGraph};
use proptest::prelude::*;

fn check_invariants(candidates: &[Candidate], graph: &GenealogyGraph) {
    assert_eq!(graph.particle_count(), candidates.len());
    graph.validate().unwrap();

    let mut by_mothers: BTreeMap<IndexRange, BTreeSet<u64>> = BTreeMap::new();
    for (id, node) in graph.particles() {
        let candidate = &candidates[id.index()];
        match candidate.mothers {
            None => assert_eq!(node.bits, ParticleStatus::Beam),
            Some(mothers) => {
                let expected = if candidate.daughters.is_some() {
                    ParticleStatus::Decayed
                } else {
                    ParticleStatus::Stable
                };
                assert_eq!(node.bits, expected);
                let vertex = node.start_vertex.expect("non-beam particle has a start vertex");
                by_mothers.entry(mothers).or_default().insert(vertex.as_raw());
                for mother in mothers.iter() {
                    let (_, mother_node) = graph.particles().nth(mother).unwrap();
                    assert_eq!(mother_node.end_vertex, Some(vertex));
                }
            }
        }
        assert_eq!(node.end_vertex.is_some(), candidate.daughters.is_some());
    }

    for vertices in by_mothers.values() {
        assert_eq!(vertices.len(), 1, "siblings must share one vertex instance");
    }
    assert_eq!(graph.vertex_count(), by_mothers.len());
}

/// Renumbers the sequence back to front so daughters precede their mothers.
fn reversed(candidates: &[Candidate]) -> Vec<Candidate> {
    let last = candidates.len() - 1;
    let flip = |range: Option<IndexRange>| {
        range.and_then(|range| IndexRange::new(last - range.last(), last - range.first()))
    };
    candidates
        .iter()
        .rev()
        .map(|candidate| Candidate {
            index: last - candidate.index,
            mothers: flip(candidate.mothers),
            daughters: flip(candidate.daughters),
            ..candidate.clone()
        })
        .collect()
}

#[test]
fn reversed_sequence_keeps_sibling_order_consistent() {
    let mut rng = RngHandle::from_seed(5);
    let candidates = gen_cascade_event(1, 6, &mut rng).unwrap();
    let flipped = reversed(&candidates);
    for (position, candidate) in flipped.iter().enumerate() {
        assert_eq!(candidate.index, position);
    }
    assert!(flipped.last().unwrap().mothers.is_none());
}

proptest! {
    #[test]
    fn daughters_before_mothers_respect_invariants(seed in any::<u64>(), beams in 1usize..4, decays in 0usize..40) {
        let mut rng = RngHandle::from_seed(seed);
        let candidates = reversed(&gen_cascade_event(beams, decays, &mut rng).unwrap());
        let graph = GenealogyBuilder::default().build(&candidates).unwrap();
        check_invariants(&candidates, &graph);
    }

    #[test]
    fn random_cascades_respect_invariants(seed in any::<u64>(), beams in 1usize..4, decays in 0usize..40) {
        let mut rng = RngHandle::from_seed(seed);
        let candidates = gen_cascade_event(beams, decays, &mut rng).unwrap();
        let graph = GenealogyBuilder::default().build(&candidates).unwrap();
        check_invariants(&candidates, &graph);
    }

    #[test]
    fn rebuilding_is_idempotent(seed in any::<u64>(), decays in 0usize..30) {
        let mut rng = RngHandle::from_seed(seed);
        let candidates = gen_cascade_event(2, decays, &mut rng).unwrap();
        let builder = GenealogyBuilder::default();
        let first = builder.build(&candidates).unwrap();
        let second = builder.build(&candidates).unwrap();
        prop_assert_eq!(canonical_hash(&first), canonical_hash(&second));
        prop_assert_eq!(first, second);
    }
}
