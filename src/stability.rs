//! Stability Checker - search a valid matching for a blocking pair.
//!
//! Hospitals are visited in ID order and each list is walked in
//! preference order up to the hospital's own partner. Every student
//! passed on the way is one the hospital would rather have; if that
//! student also ranks the hospital above its own partner, the pair blocks.

use std::fmt;

use tracing::debug;

use crate::agent::{AgentId, Side};
use crate::assignment::MatchIndex;
use crate::preferences::PreferenceStore;

/// A hospital and student who both prefer each other to their partners
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockingPair {
    pub hospital: AgentId,
    pub student: AgentId,
}

impl fmt::Display for BlockingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blocking pair ({}, {})", self.hospital, self.student)
    }
}

/// Report the first blocking pair, or `Ok(())` if the matching is stable.
///
/// `matching` comes from [`crate::validity::check_validity`], so it is
/// already a bijection over the store's ID space. Worst case O(n^2).
pub fn check_stability(
    store: &PreferenceStore,
    matching: &MatchIndex,
) -> Result<(), BlockingPair> {
    debug_assert_eq!(store.n(), matching.n());
    let n = store.n() as AgentId;

    for hospital in 1..=n {
        let partner = matching.student_of(hospital);

        for &student in store.prefs(Side::Hospital, hospital) {
            if student == partner {
                break;
            }
            let rival = matching.hospital_of(student);
            if store.prefers(Side::Student, student, hospital, rival) {
                debug!(hospital, student, "blocking pair");
                return Err(BlockingPair { hospital, student });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Pair;
    use crate::validity::check_validity;

    fn check(text: &str, pairs: &[(AgentId, AgentId)]) -> Result<(), BlockingPair> {
        let store = PreferenceStore::parse(text).unwrap();
        let pairs: Vec<Pair> = pairs.iter().map(|&(h, s)| Pair::new(h, s)).collect();
        let index = check_validity(store.n(), &pairs).unwrap();
        check_stability(&store, &index)
    }

    #[test]
    fn test_single_pair_is_stable() {
        assert_eq!(check("1\n1\n1\n", &[(1, 1)]), Ok(()));
    }

    #[test]
    fn test_solver_example_is_stable() {
        assert_eq!(check("2\n1 2\n1 2\n2 1\n1 2\n", &[(1, 2), (2, 1)]), Ok(()));
    }

    #[test]
    fn test_blocking_pair_found() {
        // h1 wants s2 over s1; s2 wants h1 over h2
        let text = "2\n2 1\n1 2\n1 2\n1 2\n";
        let err = check(text, &[(1, 1), (2, 2)]).unwrap_err();
        assert_eq!(err, BlockingPair { hospital: 1, student: 2 });
        assert_eq!(err.to_string(), "Blocking pair (1, 2)");
    }

    #[test]
    fn test_one_sided_preference_does_not_block() {
        // h1 wants s2, but s2 prefers its partner h2
        let text = "2\n2 1\n1 2\n1 2\n2 1\n";
        assert_eq!(check(text, &[(1, 1), (2, 2)]), Ok(()));
    }

    #[test]
    fn test_first_blocking_pair_by_hospital_then_preference() {
        // Identical lists, h1 holds its last choice: several pairs block,
        // the report is always h1 with its first choice.
        let text = "3\n1 2 3\n1 2 3\n1 2 3\n1 2 3\n1 2 3\n1 2 3\n";
        let pairs = [(1, 3), (2, 2), (3, 1)];
        let first = check(text, &pairs).unwrap_err();
        assert_eq!(first, BlockingPair { hospital: 1, student: 1 });
        for _ in 0..5 {
            assert_eq!(check(text, &pairs).unwrap_err(), first);
        }
    }
}
