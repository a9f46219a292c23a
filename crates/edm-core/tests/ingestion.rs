use edm_core::input::{decode_range, index_from_unique_id, ingest_store};
use edm_core::{
    Candidate, CandidateStore, EdmError, EngineCandidate, EngineEvent, EngineRecoObject,
    EventInput, IndexRange, LorentzVector, SpacetimePoint,
};

fn engine(unique_id: u32, mothers: (i64, i64), daughters: (i64, i64)) -> EngineCandidate {
    EngineCandidate {
        unique_id,
        pdg: 22,
        status: 1,
        charge: 0,
        momentum: LorentzVector::new(1.0, 0.0, 0.0, 0.0),
        position: SpacetimePoint::new(0.0, 0.0, 0.0, unique_id as f64),
        mothers,
        daughters,
        references: Vec::new(),
    }
}

#[test]
fn unique_ids_are_decremented_once() {
    assert_eq!(index_from_unique_id(1).unwrap(), 0);
    assert_eq!(index_from_unique_id(41).unwrap(), 40);
    let err = index_from_unique_id(0).unwrap_err();
    assert!(matches!(err, EdmError::Input(info) if info.code == "zero-unique-id"));
}

#[test]
fn ranges_follow_engine_conventions() {
    assert_eq!(decode_range((-1, -1), "mothers", 0).unwrap(), None);
    assert_eq!(decode_range((-1, 5), "mothers", 0).unwrap(), None);
    assert_eq!(
        decode_range((2, -1), "mothers", 0).unwrap(),
        Some(IndexRange::single(2))
    );
    assert_eq!(
        decode_range((2, 4), "daughters", 0).unwrap(),
        IndexRange::new(2, 4)
    );
    let err = decode_range((4, 2), "daughters", 7).unwrap_err();
    assert_eq!(err.code(), "inverted-range");
    assert_eq!(err.info().context.get("candidate"), Some(&"7".to_string()));
    assert_eq!(decode_range((-3, 1), "mothers", 0).unwrap_err().code(), "negative-index");
}

#[test]
fn store_places_truth_and_intermediates() {
    let truth = vec![
        engine(1, (-1, -1), (1, 2)),
        engine(2, (0, -1), (-1, -1)),
        engine(3, (0, 0), (-1, -1)),
    ];
    let mut cluster = engine(41, (-1, -1), (-1, -1));
    cluster.references = vec![3];
    let store = ingest_store(&truth, &[cluster]).unwrap();

    assert_eq!(store.truth_len(), 3);
    assert_eq!(store.intermediate_len(), 1);
    assert_eq!(store.truth()[0].daughters, IndexRange::new(1, 2));
    assert_eq!(store.truth()[1].mothers, Some(IndexRange::single(0)));
    assert_eq!(store.get(40).unwrap().references, vec![2]);
    assert!(store.get(3).is_none());
}

#[test]
fn out_of_bounds_range_is_fatal() {
    let truth = vec![engine(1, (-1, -1), (1, 3)), engine(2, (0, 0), (-1, -1))];
    let err = ingest_store(&truth, &[]).unwrap_err();
    match err {
        EdmError::Input(info) => {
            assert_eq!(info.code, "range-out-of-bounds");
            assert_eq!(info.context.get("field"), Some(&"daughters".to_string()));
            assert_eq!(info.context.get("truth_len"), Some(&"2".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn misplaced_truth_candidate_is_fatal() {
    let err = CandidateStore::new(vec![Candidate::new(1, 11)], Vec::new()).unwrap_err();
    assert_eq!(err.code(), "index-mismatch");
}

#[test]
fn intermediates_must_follow_truth() {
    let truth = vec![Candidate::new(0, 11), Candidate::new(1, 11)];
    let err = CandidateStore::new(truth.clone(), vec![Candidate::new(1, 22)]).unwrap_err();
    assert_eq!(err.code(), "intermediate-in-truth-range");
    let err = CandidateStore::new(truth, vec![Candidate::new(5, 22), Candidate::new(5, 22)])
        .unwrap_err();
    assert_eq!(err.code(), "duplicate-index");
}

#[test]
fn event_ingestion_decrements_reco_references() {
    let event = EngineEvent {
        particles: vec![engine(1, (-1, -1), (-1, -1))],
        electrons: vec![EngineRecoObject {
            pdg: 11,
            status: 1,
            charge: -1,
            momentum: LorentzVector::new(3.0, 4.0, 0.0, 0.0),
            position: SpacetimePoint::default(),
            references: vec![1, 7],
        }],
        ..EngineEvent::default()
    };
    let input = EventInput::ingest(&event).unwrap();
    assert_eq!(input.electrons[0].references, vec![0, 6]);

    let mut broken = event;
    broken.photons.push(EngineRecoObject {
        pdg: 22,
        status: 1,
        charge: 0,
        momentum: LorentzVector::default(),
        position: SpacetimePoint::default(),
        references: vec![0],
    });
    let err = EventInput::ingest(&broken).unwrap_err();
    assert_eq!(err.code(), "zero-unique-id");
    assert_eq!(err.info().context.get("collection"), Some(&"photons".to_string()));
}
