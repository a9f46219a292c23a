#![deny(missing_docs)]

//! Truth-match resolution for reconstructed objects.
//!
//! Two strategies implement [`edm_core::TruthMatcher`]: [`DirectMatcher`]
//! trusts the first reference, [`CascadeMatcher`] also follows intermediate
//! candidates one level down and insists on exactly one truth hit.

mod association;
mod cascade;
mod direct;

use edm_core::TruthMatcher;
use serde::{Deserialize, Serialize};

pub use association::{Association, AssociationSet};
pub use cascade::{CascadeMatcher, CascadeTally};
pub use direct::DirectMatcher;

/// Matching strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// First reference only.
    Direct,
    /// Direct hits plus one cascade level.
    Cascade,
}

impl MatchMode {
    /// Returns the matcher implementing this mode.
    pub fn matcher(&self) -> &'static dyn TruthMatcher {
        match self {
            MatchMode::Direct => &DirectMatcher,
            MatchMode::Cascade => &CascadeMatcher,
        }
    }
}
