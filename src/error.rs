//! Error types for parsing and file access.
//!
//! Validity and stability failures are not errors: they are reported as
//! data through [`crate::verify::Outcome`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::agent::{AgentId, Side};

/// Malformed `.in` or `.out` content, or inconsistent preference tables.
///
/// Line numbers are 1-based and count non-blank lines only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("input is empty")]
    Empty,

    #[error("first line must be a positive integer, got {token:?}")]
    InvalidSize { token: String },

    #[error("expected {expected} non-blank lines, found {found}")]
    LineCount { expected: usize, found: usize },

    #[error("line {line}: {token:?} is not an integer")]
    InvalidToken { line: usize, token: String },

    #[error("line {line}: expected {expected} entries, found {found}")]
    RowLength {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: id {id} out of range <1 - {n}>")]
    OutOfRange { line: usize, id: AgentId, n: usize },

    #[error("line {line}: id {id} listed more than once")]
    DuplicateEntry { line: usize, id: AgentId },

    #[error("{side} table has {found} rows, expected {expected}")]
    TableSize {
        side: Side,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: expected a `<hospital> <student>` pair, found {found} tokens")]
    PairArity { line: usize, found: usize },
}

/// Top-level library error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("cannot access {}: {source}", path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn resource(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Resource {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
