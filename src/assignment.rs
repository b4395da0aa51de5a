//! Assignment - a candidate or solved matching as a list of pairs.
//!
//! The pair list is the single source of truth. The two lookup
//! projections (hospital -> student, student -> hospital) live in a
//! [`MatchIndex`], which is only handed out by the validity checker once
//! the pairs are known to form a bijection.
//!
//! # `.out` format
//!
//! One `<hospital> <student>` pair per non-blank line. Order is not
//! significant; [`Assignment::render`] emits ascending hospital order.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::agent::{AgentId, Pair, RawId};
use crate::error::{Error, FormatError, Result};

/// An ordered list of (hospital, student) pairs
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    pairs: Vec<Pair>,
}

impl Assignment {
    pub fn new(pairs: Vec<Pair>) -> Self {
        Self { pairs }
    }

    /// Pairs in their original order
    #[inline]
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<Pair> {
        self.pairs
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs sorted by hospital, then student
    pub fn sorted(&self) -> Vec<Pair> {
        let mut pairs = self.pairs.clone();
        pairs.sort_unstable();
        pairs
    }

    /// Parse the `.out` text format.
    ///
    /// Only the shape of each line is checked here: any integer is
    /// accepted, and ranges and duplicates are the validity checker's job.
    pub fn parse(text: &str) -> std::result::Result<Self, FormatError> {
        let mut pairs = Vec::new();
        let lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

        for (idx, line) in lines.enumerate() {
            let line_no = idx + 1;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != 2 {
                return Err(FormatError::PairArity {
                    line: line_no,
                    found: tokens.len(),
                });
            }
            let id = |token: &str| {
                token.parse::<RawId>().map_err(|_| FormatError::InvalidToken {
                    line: line_no,
                    token: token.to_string(),
                })
            };
            pairs.push(Pair::new(id(tokens[0])?, id(tokens[1])?));
        }

        Ok(Self { pairs })
    }

    /// Read and parse a `.out` file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::resource(path, e))?;
        Ok(Self::parse(&text)?)
    }

    /// Render in ascending hospital order
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.pairs.len() * 8);
        for pair in self.sorted() {
            let _ = writeln!(out, "{} {}", pair.hospital, pair.student);
        }
        out
    }

    /// Write the `.out` rendering to `path`
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.render()).map_err(|e| Error::resource(path, e))
    }
}

impl From<Vec<Pair>> for Assignment {
    fn from(pairs: Vec<Pair>) -> Self {
        Self::new(pairs)
    }
}

impl FromIterator<(RawId, RawId)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (RawId, RawId)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Pair::from).collect())
    }
}

impl FromStr for Assignment {
    type Err = FormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Both lookup projections of a matching known to be a bijection on `1..=n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchIndex {
    // Slot 0 is unused so IDs index directly
    by_hospital: Vec<AgentId>,
    by_student: Vec<AgentId>,
}

impl MatchIndex {
    /// Build from pairs the caller has already checked to be a bijection,
    /// so every ID fits `1..=n`.
    pub(crate) fn from_valid_pairs(n: usize, pairs: &[Pair]) -> Self {
        let mut by_hospital = vec![0; n + 1];
        let mut by_student = vec![0; n + 1];
        for pair in pairs {
            by_hospital[pair.hospital as usize] = pair.student as AgentId;
            by_student[pair.student as usize] = pair.hospital as AgentId;
        }
        Self {
            by_hospital,
            by_student,
        }
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.by_hospital.len() - 1
    }

    #[inline]
    pub fn student_of(&self, hospital: AgentId) -> AgentId {
        self.by_hospital[hospital as usize]
    }

    #[inline]
    pub fn hospital_of(&self, student: AgentId) -> AgentId {
        self.by_student[student as usize]
    }
}
