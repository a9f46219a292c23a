use edm_core::{MatchContext, MatchOutcome, ParticleId, TruthMatcher, UnmatchedReason};

/// Truth hits found while walking a reference list one level deep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeTally {
    /// Truth particles referenced directly.
    pub direct: Vec<ParticleId>,
    /// Truth particles referenced by an intermediate candidate.
    pub cascade: Vec<ParticleId>,
}

impl CascadeTally {
    /// Walks the reference list and its second level.
    ///
    /// References outside the truth range are looked up as intermediate
    /// candidates; their own references count only when they hit the truth
    /// range. Deeper levels are not followed.
    pub fn collect(references: &[usize], ctx: &MatchContext<'_>) -> Self {
        let mut tally = Self::default();
        for &index in references {
            if let Some(particle) = ctx.truth_particle(index) {
                tally.direct.push(particle);
                continue;
            }
            let Some(intermediate) = ctx.store.get(index) else {
                continue;
            };
            tally.cascade.extend(
                intermediate
                    .references
                    .iter()
                    .filter_map(|&second| ctx.truth_particle(second)),
            );
        }
        tally
    }

    /// Total number of truth hits over both levels.
    pub fn total(&self) -> usize {
        self.direct.len() + self.cascade.len()
    }

    /// Collapses the hits into an outcome; exactly one hit is required.
    pub fn outcome(&self) -> MatchOutcome {
        match (self.direct.as_slice(), self.cascade.as_slice()) {
            ([], []) => MatchOutcome::Unmatched(UnmatchedReason::NoTruthHit),
            ([particle], []) => MatchOutcome::Matched(*particle),
            ([], [particle]) => MatchOutcome::MatchedInCascade(*particle),
            (direct, cascade) => MatchOutcome::Ambiguous {
                direct: direct.len(),
                cascade: cascade.len(),
            },
        }
    }
}

/// Matches through direct hits and one level of intermediate candidates (photons).
#[derive(Debug, Clone, Copy, Default)]
pub struct CascadeMatcher;

impl TruthMatcher for CascadeMatcher {
    fn name(&self) -> &'static str {
        "cascade"
    }

    fn resolve(&self, references: &[usize], ctx: &MatchContext<'_>) -> MatchOutcome {
        if references.is_empty() {
            return MatchOutcome::Unmatched(UnmatchedReason::NoReferences);
        }
        CascadeTally::collect(references, ctx).outcome()
    }
}
