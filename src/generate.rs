//! Fixture generation: random preference tables and random matchings.
//!
//! Seeded generators use `ChaCha8Rng`, so a seed reproduces the same
//! fixture on every platform.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::agent::{AgentId, Pair};
use crate::assignment::Assignment;
use crate::error::FormatError;
use crate::preferences::PreferenceStore;

/// RNG for `seed`, or one seeded from OS entropy when `None`
pub fn rng_for(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// `n` preference lists, each an independent uniform shuffle of `1..=n`
pub fn random_rows<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<Vec<AgentId>> {
    let base: Vec<AgentId> = (1..=n as AgentId).collect();
    (0..n)
        .map(|_| {
            let mut row = base.clone();
            row.shuffle(rng);
            row
        })
        .collect()
}

/// A random complete strict preference store of size `n`.
///
/// Fails only for `n == 0`.
pub fn random_store<R: Rng + ?Sized>(
    n: usize,
    rng: &mut R,
) -> Result<PreferenceStore, FormatError> {
    let hospitals = random_rows(n, rng);
    let students = random_rows(n, rng);
    PreferenceStore::from_rows(&hospitals, &students)
}

/// A random valid matching: hospital `h` gets `perm[h - 1]`.
///
/// Always a bijection, rarely stable.
pub fn random_assignment<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Assignment {
    let mut students: Vec<AgentId> = (1..=n as AgentId).collect();
    students.shuffle(rng);
    students
        .into_iter()
        .enumerate()
        .map(|(i, s)| Pair::new(i as AgentId + 1, s))
        .collect::<Vec<_>>()
        .into()
}
