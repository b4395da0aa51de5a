//! Determinism Test - Golden Master verification.
//!
//! Verifies that solving and verifying produce identical results across
//! runs when given the same preference tables.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use stable_match::generate::{random_assignment, random_store};
use stable_match::{verify, Assignment, MatchingEngine, Outcome, Pair, PreferenceStore};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a deterministic preference store
fn generate_store(seed: u64, n: usize) -> PreferenceStore {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    random_store(n, &mut rng).unwrap()
}

/// Compute a hash of an assignment's pairs in their emitted order
fn hash_assignment(assignment: &Assignment) -> u64 {
    let mut hasher = DefaultHasher::new();
    for pair in assignment.pairs() {
        pair.hospital.hash(&mut hasher);
        pair.student.hash(&mut hasher);
    }
    hasher.finish()
}

fn run_solver(store: &PreferenceStore) -> (u64, usize) {
    let (assignment, stats) = MatchingEngine::new(store).solve_with_stats();
    (hash_assignment(&assignment), stats.proposals)
}

#[test]
fn test_determinism_small() {
    const SEED: u64 = 0xDEADBEEF;
    const N: usize = 50;
    const RUNS: usize = 10;

    let store = generate_store(SEED, N);
    let (first_hash, first_proposals) = run_solver(&store);

    for run in 1..RUNS {
        let (hash, proposals) = run_solver(&store);
        assert_eq!(hash, first_hash, "Assignment hash mismatch on run {}", run);
        assert_eq!(proposals, first_proposals, "Proposal count mismatch on run {}", run);
    }
}

#[test]
fn test_determinism_large() {
    const SEED: u64 = 0xCAFEBABE;
    const N: usize = 1000;
    const RUNS: usize = 3;

    let store = generate_store(SEED, N);
    let (first_hash, first_proposals) = run_solver(&store);

    for run in 1..RUNS {
        // Independently rebuilt store from the same seed
        let store = generate_store(SEED, N);
        let (hash, proposals) = run_solver(&store);
        assert_eq!(hash, first_hash, "Assignment hash mismatch on run {}", run);
        assert_eq!(proposals, first_proposals, "Proposal count mismatch on run {}", run);
    }
}

#[test]
fn test_same_input_text_same_output_text() {
    let store = generate_store(0xF00D, 40);
    let reparsed = PreferenceStore::parse(&store.render()).unwrap();

    let a = MatchingEngine::new(&store).solve().render();
    let b = MatchingEngine::new(&reparsed).solve().render();
    assert_eq!(a, b);
}

#[test]
fn test_first_blocking_pair_is_stable_across_runs() {
    let mut rng = ChaCha8Rng::seed_from_u64(0xB10C);
    let store = random_store(30, &mut rng).unwrap();

    // Find a random matching that is unstable (almost every one is)
    let candidate = (0..100)
        .map(|_| random_assignment(30, &mut rng))
        .find(|a| matches!(verify(&store, a.pairs()), Outcome::Unstable(_)))
        .expect("some random matching of size 30 is unstable");

    let first = verify(&store, candidate.pairs());
    for _ in 0..10 {
        assert_eq!(verify(&store, candidate.pairs()), first);
    }

    // Pair order in the file does not change which pair is reported
    let mut reversed: Vec<Pair> = candidate.pairs().to_vec();
    reversed.reverse();
    assert_eq!(verify(&store, &reversed), first);
}

#[test]
fn test_different_seeds_produce_different_results() {
    let (hash1, _) = run_solver(&generate_store(1, 100));
    let (hash2, _) = run_solver(&generate_store(2, 100));
    assert_ne!(hash1, hash2, "Different seeds should produce different results");
}
