//! Verification Pipeline - validity first, then stability.
//!
//! Stability is never evaluated on a pair list that failed validity:
//! the stability checker only accepts the [`MatchIndex`] that a
//! successful validity check produces.
//!
//! [`MatchIndex`]: crate::assignment::MatchIndex

use std::fmt;

use tracing::debug;

use crate::agent::Pair;
use crate::preferences::PreferenceStore;
use crate::stability::{check_stability, BlockingPair};
use crate::validity::{check_validity, InvalidReason};

/// Result of verifying a candidate matching
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Not a one-to-one matching over `1..=n`
    Invalid(InvalidReason),
    /// A matching, but with a blocking pair
    Unstable(BlockingPair),
    /// A stable matching
    ValidStable,
}

impl Outcome {
    #[inline]
    pub fn is_valid_stable(&self) -> bool {
        matches!(self, Outcome::ValidStable)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Invalid(reason) => write!(f, "INVALID: {reason}"),
            Outcome::Unstable(pair) => write!(f, "UNSTABLE: {pair}"),
            Outcome::ValidStable => f.write_str("VALID STABLE"),
        }
    }
}

/// Verify `pairs` against `store`, short-circuiting on the first failure.
pub fn verify(store: &PreferenceStore, pairs: &[Pair]) -> Outcome {
    let outcome = match check_validity(store.n(), pairs) {
        Err(reason) => Outcome::Invalid(reason),
        Ok(index) => match check_stability(store, &index) {
            Err(pair) => Outcome::Unstable(pair),
            Ok(()) => Outcome::ValidStable,
        },
    };
    debug!(n = store.n(), %outcome, "verified");
    outcome
}
