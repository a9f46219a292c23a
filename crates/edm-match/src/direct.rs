use edm_core::{MatchContext, MatchOutcome, TruthMatcher, UnmatchedReason};

/// Matches through the first reference only (electrons, muons).
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectMatcher;

impl TruthMatcher for DirectMatcher {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn resolve(&self, references: &[usize], ctx: &MatchContext<'_>) -> MatchOutcome {
        let Some(&index) = references.first() else {
            return MatchOutcome::Unmatched(UnmatchedReason::NoReferences);
        };
        match ctx.truth_particle(index) {
            Some(particle) => MatchOutcome::Matched(particle),
            None => MatchOutcome::Unmatched(UnmatchedReason::OutOfRange { index }),
        }
    }
}
