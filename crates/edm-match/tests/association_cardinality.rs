use edm_core::{
    Candidate, CandidateStore, EdmError, MatchContext, MatchOutcome, MatchStatus, ParticleId,
    RecoId, TruthMatcher, UnmatchedReason,
};
use edm_match::{AssociationSet, CascadeMatcher, CascadeTally, DirectMatcher};
use proptest::prelude::*;

const TRUTH: usize = 20;

fn store(second_level: &[Vec<usize>]) -> CandidateStore {
    let truth = (0..TRUTH).map(|idx| Candidate::new(idx, 22)).collect();
    let intermediates = second_level
        .iter()
        .enumerate()
        .map(|(offset, refs)| Candidate::new(TRUTH + offset, 22).with_references(refs.clone()))
        .collect();
    CandidateStore::new(truth, intermediates).unwrap()
}

#[test]
fn set_rejects_second_association() {
    let mut set = AssociationSet::new(TRUTH);
    let reco = RecoId::from_raw(0);
    let matched = MatchOutcome::Matched(ParticleId::from_raw(4));
    assert!(set.record(reco, &matched).unwrap().is_some());
    let err = set.record(reco, &matched).unwrap_err();
    assert!(matches!(err, EdmError::Match(info) if info.code == "duplicate-association"));
    assert_eq!(set.len(), 1);
}

#[test]
fn restored_set_still_rejects_second_association() {
    let mut set = AssociationSet::new(TRUTH);
    for raw in 0..50u64 {
        let outcome = MatchOutcome::Matched(ParticleId::from_raw(raw % TRUTH as u64));
        set.record(RecoId::from_raw(raw), &outcome).unwrap();
    }
    let json = serde_json::to_string(&set).unwrap();
    assert!(!json.contains("linked"));
    let mut restored: AssociationSet = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, set);

    let again = MatchOutcome::MatchedInCascade(ParticleId::from_raw(1));
    let err = restored.record(RecoId::from_raw(17), &again).unwrap_err();
    assert_eq!(err.code(), "duplicate-association");
    assert!(restored.record(RecoId::from_raw(50), &again).unwrap().is_some());
    assert_eq!(restored.len(), 51);
}

#[test]
fn set_ignores_unmatched_and_rejects_dangling() {
    let mut set = AssociationSet::new(TRUTH);
    let unmatched = MatchOutcome::Unmatched(UnmatchedReason::NoReferences);
    assert_eq!(set.record(RecoId::from_raw(0), &unmatched).unwrap(), None);
    assert!(set.is_empty());

    let dangling = MatchOutcome::MatchedInCascade(ParticleId::from_raw(TRUTH as u64));
    let err = set.record(RecoId::from_raw(1), &dangling).unwrap_err();
    assert_eq!(err.code(), "dangling-association");
}

proptest! {
    #[test]
    fn associations_follow_status(
        references in prop::collection::vec(0usize..40, 0..6),
        second_level in prop::collection::vec(prop::collection::vec(0usize..40, 0..3), 0..10),
    ) {
        let store = store(&second_level);
        let ctx = MatchContext::new(&store, TRUTH);
        for matcher in [&DirectMatcher as &dyn TruthMatcher, &CascadeMatcher] {
            let outcome = matcher.resolve(&references, &ctx);
            let mut set = AssociationSet::new(TRUTH);
            set.record(RecoId::from_raw(0), &outcome).unwrap();
            prop_assert!(set.len() <= 1);
            prop_assert_eq!(set.len() == 1, outcome.status().has_association());
        }
    }

    #[test]
    fn cascade_precedence(
        references in prop::collection::vec(0usize..40, 0..6),
        second_level in prop::collection::vec(prop::collection::vec(0usize..40, 0..3), 0..10),
    ) {
        let store = store(&second_level);
        let ctx = MatchContext::new(&store, TRUTH);
        let tally = CascadeTally::collect(&references, &ctx);
        let status = CascadeMatcher.resolve(&references, &ctx).status();
        match (tally.direct.len(), tally.cascade.len()) {
            (1, 0) => prop_assert_eq!(status, MatchStatus::Matched),
            (0, 1) => prop_assert_eq!(status, MatchStatus::MatchInCascade),
            _ => prop_assert_eq!(status, MatchStatus::Unmatched),
        }
    }

    #[test]
    fn resolution_is_deterministic(references in prop::collection::vec(0usize..40, 0..6)) {
        let store = store(&[vec![1], vec![2, 3], vec![]]);
        let ctx = MatchContext::new(&store, TRUTH);
        prop_assert_eq!(
            CascadeMatcher.resolve(&references, &ctx),
            CascadeMatcher.resolve(&references, &ctx)
        );
    }
}
