//! Matching Engine - hospital-proposing deferred acceptance (Gale-Shapley).
//!
//! Implements the propose/respond loop:
//! 1. PROPOSE: pop a free hospital, offer to the next student on its list
//! 2. RESPOND: the student keeps whichever of the two hospitals it ranks
//!    higher; the loser goes back on the free queue
//!
//! The free queue is FIFO and seeded in hospital-ID order, so a given
//! store always yields the same (hospital-optimal) matching.

use std::collections::VecDeque;

use tracing::debug;

use crate::agent::{AgentId, Pair, Side};
use crate::assignment::Assignment;
use crate::preferences::PreferenceStore;

/// Sentinel for "not matched" in the proposal state
const UNMATCHED: AgentId = 0;

/// Counters collected during one solve
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Proposals made (one per cursor advance)
    pub proposals: usize,
    /// Proposals turned down outright
    pub rejections: usize,
    /// Provisional matches broken in favour of a better hospital
    pub displacements: usize,
    /// Hospitals popped with nothing left to propose to
    pub exhausted: usize,
}

/// Transient per-solve state. Dropped once the assignment is extracted.
struct ProposalState {
    /// Next index into each hospital's list (slot 0 unused)
    cursor: Vec<usize>,
    /// Current partner of each hospital (slot 0 unused)
    hospital_match: Vec<AgentId>,
    /// Current partner of each student (slot 0 unused)
    student_match: Vec<AgentId>,
    /// Free hospitals awaiting their next proposal
    free: VecDeque<AgentId>,
}

impl ProposalState {
    fn new(n: usize) -> Self {
        Self {
            cursor: vec![0; n + 1],
            hospital_match: vec![UNMATCHED; n + 1],
            student_match: vec![UNMATCHED; n + 1],
            free: (1..=n as AgentId).collect(),
        }
    }

    #[inline]
    fn engage(&mut self, hospital: AgentId, student: AgentId) {
        self.hospital_match[hospital as usize] = student;
        self.student_match[student as usize] = hospital;
    }
}

/// The matching engine core
pub struct MatchingEngine<'a> {
    store: &'a PreferenceStore,
}

impl<'a> MatchingEngine<'a> {
    pub fn new(store: &'a PreferenceStore) -> Self {
        Self { store }
    }

    /// Compute the hospital-optimal stable matching.
    pub fn solve(&self) -> Assignment {
        self.solve_with_stats().0
    }

    /// Compute the hospital-optimal stable matching and report counters.
    ///
    /// # Algorithm
    /// 1. Seed the free queue with hospitals `1..=n`
    /// 2. Until the queue drains, let the front hospital propose once
    /// 3. Read each hospital's final partner off the proposal state
    pub fn solve_with_stats(&self) -> (Assignment, SolveStats) {
        let n = self.store.n();
        let mut state = ProposalState::new(n);
        let mut stats = SolveStats::default();

        while let Some(hospital) = state.free.pop_front() {
            self.propose(&mut state, hospital, &mut stats);
        }

        let pairs = (1..=n as AgentId)
            .filter_map(|h| {
                let s = state.hospital_match[h as usize];
                (s != UNMATCHED).then_some(Pair::new(h, s))
            })
            .collect::<Vec<_>>();
        debug_assert_eq!(pairs.len(), n, "deferred acceptance left agents unmatched");

        debug!(
            n,
            proposals = stats.proposals,
            rejections = stats.rejections,
            displacements = stats.displacements,
            "solved"
        );
        (Assignment::new(pairs), stats)
    }

    /// One proposal from `hospital` to the next student on its list.
    fn propose(&self, state: &mut ProposalState, hospital: AgentId, stats: &mut SolveStats) {
        let prefs = self.store.prefs(Side::Hospital, hospital);
        let cursor = &mut state.cursor[hospital as usize];

        // Unreachable with complete lists on equal-sized sides
        if *cursor >= prefs.len() {
            stats.exhausted += 1;
            return;
        }

        let student = prefs[*cursor];
        *cursor += 1;
        stats.proposals += 1;

        let current = state.student_match[student as usize];
        if current == UNMATCHED {
            state.engage(hospital, student);
        } else if self.store.prefers(Side::Student, student, hospital, current) {
            state.hospital_match[current as usize] = UNMATCHED;
            state.engage(hospital, student);
            state.free.push_back(current);
            stats.displacements += 1;
        } else {
            state.free.push_back(hospital);
            stats.rejections += 1;
        }
    }
}

/// Convenience wrapper around [`MatchingEngine::solve`]
pub fn solve(store: &PreferenceStore) -> Assignment {
    MatchingEngine::new(store).solve()
}
