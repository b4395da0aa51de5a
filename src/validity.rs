//! Validity Checker - is a candidate assignment a bijection on `1..=n`?
//!
//! Pairs are scanned in input order and the first problem wins, so the
//! reported reason is deterministic for a given pair list.

use std::fmt;

use crate::agent::{Pair, RawId, Side};
use crate::assignment::MatchIndex;

/// Why a candidate assignment is not a legal one-to-one matching
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidReason {
    /// `n` was zero
    EmptyUniverse,
    /// Pair count differs from `n`
    WrongPairCount { expected: usize, found: usize },
    /// An ID outside `1..=n`
    OutOfRange { side: Side, id: RawId, n: usize },
    /// An ID seen twice on the same side
    Duplicate { side: Side, id: RawId },
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            InvalidReason::EmptyUniverse => f.write_str("n must be >= 1"),
            InvalidReason::WrongPairCount { expected, found } => {
                write!(f, "expected {expected} pairs, got {found}")
            }
            InvalidReason::OutOfRange { side, id, n } => {
                write!(f, "{side} {id} out of range <1 - {n}>")
            }
            InvalidReason::Duplicate {
                side: Side::Hospital,
                id,
            } => write!(f, "hospital {id} appears more than once"),
            InvalidReason::Duplicate {
                side: Side::Student,
                id,
            } => write!(f, "student {id} matched more than once"),
        }
    }
}

impl std::error::Error for InvalidReason {}

/// Check that `pairs` is a bijection over `1..=n` x `1..=n`.
///
/// On success returns both lookup projections, which the stability
/// checker requires. O(n) time and space; `pairs` is only read.
pub fn check_validity(n: usize, pairs: &[Pair]) -> Result<MatchIndex, InvalidReason> {
    if n == 0 {
        return Err(InvalidReason::EmptyUniverse);
    }
    if pairs.len() != n {
        return Err(InvalidReason::WrongPairCount {
            expected: n,
            found: pairs.len(),
        });
    }

    let mut seen_hospitals = vec![false; n + 1];
    let mut seen_students = vec![false; n + 1];

    for pair in pairs {
        for side in [Side::Hospital, Side::Student] {
            let id = pair.id(side);
            if !(1..=n as RawId).contains(&id) {
                return Err(InvalidReason::OutOfRange { side, id, n });
            }
        }

        let hospital_seen = &mut seen_hospitals[pair.hospital as usize];
        if std::mem::replace(hospital_seen, true) {
            return Err(InvalidReason::Duplicate {
                side: Side::Hospital,
                id: pair.hospital,
            });
        }
        let student_seen = &mut seen_students[pair.student as usize];
        if std::mem::replace(student_seen, true) {
            return Err(InvalidReason::Duplicate {
                side: Side::Student,
                id: pair.student,
            });
        }
    }

    Ok(MatchIndex::from_valid_pairs(n, pairs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(RawId, RawId)]) -> Vec<Pair> {
        raw.iter().copied().map(Pair::from).collect()
    }

    #[test]
    fn test_valid_permutation() {
        let index = check_validity(3, &pairs(&[(2, 3), (1, 1), (3, 2)])).unwrap();
        assert_eq!(index.student_of(2), 3);
        assert_eq!(index.hospital_of(2), 3);
    }

    #[test]
    fn test_zero_n() {
        let err = check_validity(0, &[]).unwrap_err();
        assert_eq!(err, InvalidReason::EmptyUniverse);
        assert_eq!(err.to_string(), "n must be >= 1");
    }

    #[test]
    fn test_wrong_count() {
        let err = check_validity(3, &pairs(&[(1, 1), (2, 2)])).unwrap_err();
        assert_eq!(err.to_string(), "expected 3 pairs, got 2");
    }

    #[test]
    fn test_out_of_range() {
        let err = check_validity(2, &pairs(&[(1, 1), (3, 2)])).unwrap_err();
        assert_eq!(err.to_string(), "hospital 3 out of range <1 - 2>");

        let err = check_validity(2, &pairs(&[(1, 0), (2, 2)])).unwrap_err();
        assert_eq!(err.to_string(), "student 0 out of range <1 - 2>");
    }

    #[test]
    fn test_out_of_range_beyond_agent_id() {
        let err = check_validity(2, &pairs(&[(-1, 2), (2, 1)])).unwrap_err();
        assert_eq!(
            err,
            InvalidReason::OutOfRange {
                side: Side::Hospital,
                id: -1,
                n: 2
            }
        );
        assert_eq!(err.to_string(), "hospital -1 out of range <1 - 2>");

        // Would wrap to 0 if narrowed to 32 bits
        let err = check_validity(2, &pairs(&[(1, 4_294_967_296), (2, 1)])).unwrap_err();
        assert_eq!(err.to_string(), "student 4294967296 out of range <1 - 2>");
    }

    #[test]
    fn test_duplicate_hospital() {
        let err = check_validity(2, &pairs(&[(1, 1), (1, 2)])).unwrap_err();
        assert_eq!(
            err,
            InvalidReason::Duplicate {
                side: Side::Hospital,
                id: 1
            }
        );
        assert_eq!(err.to_string(), "hospital 1 appears more than once");
    }

    #[test]
    fn test_duplicate_student() {
        let err = check_validity(2, &pairs(&[(1, 2), (2, 2)])).unwrap_err();
        assert_eq!(err.to_string(), "student 2 matched more than once");
    }

    #[test]
    fn test_first_problem_in_input_order_wins() {
        // Duplicate hospital at pair 2 comes before the out-of-range id at pair 3
        let err = check_validity(3, &pairs(&[(1, 1), (1, 2), (9, 3)])).unwrap_err();
        assert!(matches!(err, InvalidReason::Duplicate { side: Side::Hospital, id: 1 }));
    }

    #[test]
    fn test_idempotent_and_non_mutating() {
        let candidate = pairs(&[(2, 1), (1, 1)]);
        let before = candidate.clone();
        let first = check_validity(2, &candidate);
        let second = check_validity(2, &candidate);
        assert_eq!(first, second);
        assert_eq!(candidate, before);
    }
}
