//! # stable-match
//!
//! A deterministic stable matching solver and verifier.
//!
//! ## Design Principles
//!
//! - **Rank tables up front**: every preference comparison is O(1)
//! - **Work-list solver**: free hospitals wait in a plain FIFO queue
//! - **Validity before stability**: the stability checker only accepts
//!   the index a successful validity check produces
//!
//! ## Architecture
//!
//! ```text
//! [.in file] --> [PreferenceStore] --+--> [MatchingEngine] --> [Assignment] --> [.out file]
//!                                    |
//!            [.out file] ------------+--> [verify: validity -> stability] --> [Outcome]
//! ```

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub mod agent;
pub mod error;
pub mod preferences;
pub mod assignment;
pub mod matching;
pub mod validity;
pub mod stability;
pub mod verify;
pub mod engine;
pub mod generate;

// Re-exports for convenience
pub use agent::{AgentId, Pair, RawId, Side};
pub use assignment::{Assignment, MatchIndex};
pub use engine::Engine;
pub use error::{Error, FormatError, Result};
pub use matching::{solve, MatchingEngine, SolveStats};
pub use preferences::{PreferenceStore, PreferenceTable, RankTable};
pub use stability::{check_stability, BlockingPair};
pub use validity::{check_validity, InvalidReason};
pub use verify::{verify, Outcome};

/// Install a stderr `tracing` subscriber filtered by `RUST_LOG`
/// (default `warn`). Later calls are no-ops.
pub fn setup_logger() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stderr()))
        .with_target(false)
        .try_init();
}
