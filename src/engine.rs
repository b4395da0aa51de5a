//! Engine - file-level entry points over one preference store.
//!
//! Wraps a [`PreferenceStore`] and exposes the solver and verifier paths
//! the command-line tools drive. Every engine owns its own store; nothing
//! is shared between engines.

use std::path::Path;

use tracing::{debug, info};

use crate::assignment::Assignment;
use crate::error::Result;
use crate::matching::MatchingEngine;
use crate::preferences::PreferenceStore;
use crate::verify::{verify, Outcome};

/// Solver and verifier bound to a single preference store.
pub struct Engine {
    store: PreferenceStore,
}

impl Engine {
    pub fn new(store: PreferenceStore) -> Self {
        Self { store }
    }

    /// Read a `.in` file and build an engine over it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let store = PreferenceStore::read(path)?;
        info!(path = %path.display(), n = store.n(), "loaded preferences");
        Ok(Self::new(store))
    }

    #[inline]
    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.store.n()
    }

    /// Hospital-optimal stable matching
    pub fn solve(&self) -> Assignment {
        MatchingEngine::new(&self.store).solve()
    }

    /// Solve and write the `.out` rendering to `path`.
    pub fn solve_to_file(&self, path: impl AsRef<Path>) -> Result<Assignment> {
        let path = path.as_ref();
        let assignment = self.solve();
        assignment.write(path)?;
        debug!(path = %path.display(), pairs = assignment.len(), "wrote matching");
        Ok(assignment)
    }

    /// Verify an in-memory candidate matching
    pub fn verify(&self, assignment: &Assignment) -> Outcome {
        verify(&self.store, assignment.pairs())
    }

    /// Read a `.out` file and verify it.
    pub fn verify_file(&self, path: impl AsRef<Path>) -> Result<Outcome> {
        let path = path.as_ref();
        let assignment = Assignment::read(path)?;
        let outcome = self.verify(&assignment);
        info!(path = %path.display(), %outcome, "verified matching");
        Ok(outcome)
    }
}
