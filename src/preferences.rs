//! Preference Store - preference tables and their derived rank tables.
//!
//! Both tables are stored row-major in a single flat `Vec`, so the list
//! of agent `a` is the slice `[(a - 1) * n .. a * n]`. Rank tables use
//! the same layout indexed by peer, turning every "does `x` prefer `a`
//! over `b`" question into two array reads.
//!
//! # `.in` format
//!
//! ```text
//! n
//! <n hospital rows, each a permutation of 1..=n>
//! <n student rows, each a permutation of 1..=n>
//! ```
//!
//! Blank lines are ignored; anything else beyond `1 + 2n` lines is an error.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::agent::{AgentId, Side};
use crate::error::{Error, FormatError, Result};

/// One side's preference lists: `n` rows, each a permutation of `1..=n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreferenceTable {
    n: usize,
    entries: Vec<AgentId>,
}

impl PreferenceTable {
    /// Build a table from explicit rows, validating every row eagerly.
    ///
    /// `first_line` is the line number reported for row 0 in errors, so
    /// that messages point at the matching `.in` line.
    fn from_rows(
        side: Side,
        n: usize,
        rows: &[Vec<AgentId>],
        first_line: usize,
    ) -> std::result::Result<Self, FormatError> {
        if rows.len() != n {
            return Err(FormatError::TableSize {
                side,
                expected: n,
                found: rows.len(),
            });
        }

        let mut entries = Vec::with_capacity(n * n);
        let mut seen = vec![false; n + 1];
        for (i, row) in rows.iter().enumerate() {
            let line = first_line + i;
            validate_row(line, row, n, &mut seen)?;
            entries.extend_from_slice(row);
        }

        Ok(Self { n, entries })
    }

    /// Number of agents on each side
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Preference list of `agent`, most preferred first.
    ///
    /// # Panics
    /// If `agent` is outside `1..=n`.
    #[inline]
    pub fn prefs(&self, agent: AgentId) -> &[AgentId] {
        let start = (agent as usize - 1) * self.n;
        &self.entries[start..start + self.n]
    }

    /// Rows in agent-ID order
    pub fn rows(&self) -> impl Iterator<Item = &[AgentId]> + '_ {
        self.entries.chunks_exact(self.n)
    }
}

/// Inverse of a [`PreferenceTable`]: `rank(x, table.prefs(x)[i]) == i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankTable {
    n: usize,
    ranks: Vec<u32>,
}

impl RankTable {
    /// Derive ranks from an already validated table
    pub fn build(table: &PreferenceTable) -> Self {
        let n = table.n;
        let mut ranks = vec![0u32; n * n];
        for (row_idx, row) in table.rows().enumerate() {
            let base = row_idx * n;
            for (rank, &peer) in row.iter().enumerate() {
                ranks[base + peer as usize - 1] = rank as u32;
            }
        }
        Self { n, ranks }
    }

    /// Rank of `peer` in `agent`'s list; 0 is most preferred
    #[inline]
    pub fn rank(&self, agent: AgentId, peer: AgentId) -> usize {
        self.ranks[(agent as usize - 1) * self.n + peer as usize - 1] as usize
    }
}

/// Both preference tables plus both rank tables. Read-only once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreferenceStore {
    hospitals: PreferenceTable,
    students: PreferenceTable,
    hospital_ranks: RankTable,
    student_ranks: RankTable,
}

impl PreferenceStore {
    /// Build a store from in-memory rows (hospital rows, then student rows).
    pub fn from_rows(
        hospital_rows: &[Vec<AgentId>],
        student_rows: &[Vec<AgentId>],
    ) -> std::result::Result<Self, FormatError> {
        let n = hospital_rows.len();
        if n == 0 {
            return Err(FormatError::Empty);
        }
        if n > AgentId::MAX as usize {
            return Err(FormatError::InvalidSize {
                token: n.to_string(),
            });
        }

        let hospitals = PreferenceTable::from_rows(Side::Hospital, n, hospital_rows, 2)?;
        let students = PreferenceTable::from_rows(Side::Student, n, student_rows, n + 2)?;
        Ok(Self::from_tables(hospitals, students))
    }

    fn from_tables(hospitals: PreferenceTable, students: PreferenceTable) -> Self {
        let hospital_ranks = RankTable::build(&hospitals);
        let student_ranks = RankTable::build(&students);
        Self {
            hospitals,
            students,
            hospital_ranks,
            student_ranks,
        }
    }

    /// Parse the `.in` text format.
    pub fn parse(text: &str) -> std::result::Result<Self, FormatError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let Some(first) = lines.first() else {
            return Err(FormatError::Empty);
        };
        let n = parse_size(first)?;

        let expected = n.saturating_mul(2).saturating_add(1);
        if lines.len() != expected {
            return Err(FormatError::LineCount {
                expected,
                found: lines.len(),
            });
        }

        // Rows are validated as tokens here and as permutations in from_rows
        let mut rows = Vec::with_capacity(2 * n);
        for (idx, line) in lines[1..].iter().enumerate() {
            rows.push(parse_row(idx + 2, line, n)?);
        }
        let (hospital_rows, student_rows) = rows.split_at(n);

        let store = Self::from_rows(hospital_rows, student_rows)?;
        debug!(n, "parsed preference store");
        Ok(store)
    }

    /// Read and parse a `.in` file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::resource(path, e))?;
        Ok(Self::parse(&text)?)
    }

    /// Render back to the `.in` text format
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.n() * self.n() * 4);
        let _ = writeln!(out, "{}", self.n());
        for table in [&self.hospitals, &self.students] {
            for row in table.rows() {
                push_row(&mut out, row);
            }
        }
        out
    }

    /// Write the `.in` rendering to `path`
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.render()).map_err(|e| Error::resource(path, e))
    }

    /// Number of agents on each side
    #[inline]
    pub fn n(&self) -> usize {
        self.hospitals.n()
    }

    /// Preference table of `side`
    #[inline]
    pub fn table(&self, side: Side) -> &PreferenceTable {
        match side {
            Side::Hospital => &self.hospitals,
            Side::Student => &self.students,
        }
    }

    /// Rank table of `side`
    #[inline]
    pub fn ranks(&self, side: Side) -> &RankTable {
        match side {
            Side::Hospital => &self.hospital_ranks,
            Side::Student => &self.student_ranks,
        }
    }

    /// Preference list of `agent` on `side`
    #[inline]
    pub fn prefs(&self, side: Side, agent: AgentId) -> &[AgentId] {
        self.table(side).prefs(agent)
    }

    /// O(1) rank lookup; 0 is most preferred
    #[inline]
    pub fn rank_of(&self, side: Side, agent: AgentId, peer: AgentId) -> usize {
        self.ranks(side).rank(agent, peer)
    }

    /// Whether `agent` strictly prefers `a` over `b`
    #[inline]
    pub fn prefers(&self, side: Side, agent: AgentId, a: AgentId, b: AgentId) -> bool {
        self.rank_of(side, agent, a) < self.rank_of(side, agent, b)
    }
}

impl FromStr for PreferenceStore {
    type Err = FormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_size(line: &str) -> std::result::Result<usize, FormatError> {
    let invalid = || FormatError::InvalidSize {
        token: line.to_string(),
    };
    let mut tokens = line.split_whitespace();
    let n: usize = tokens
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or_else(invalid)?;
    if tokens.next().is_some() || n == 0 || n > AgentId::MAX as usize {
        return Err(invalid());
    }
    Ok(n)
}

fn parse_row(line: usize, text: &str, n: usize) -> std::result::Result<Vec<AgentId>, FormatError> {
    let row = text
        .split_whitespace()
        .map(|token| {
            token.parse::<AgentId>().map_err(|_| FormatError::InvalidToken {
                line,
                token: token.to_string(),
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if row.len() != n {
        return Err(FormatError::RowLength {
            line,
            expected: n,
            found: row.len(),
        });
    }
    Ok(row)
}

/// Check that `row` is a permutation of `1..=n`. `seen` is scratch space
/// of length `n + 1`, cleared on entry.
fn validate_row(
    line: usize,
    row: &[AgentId],
    n: usize,
    seen: &mut [bool],
) -> std::result::Result<(), FormatError> {
    if row.len() != n {
        return Err(FormatError::RowLength {
            line,
            expected: n,
            found: row.len(),
        });
    }

    seen.fill(false);
    for &id in row {
        if id == 0 || id as usize > n {
            return Err(FormatError::OutOfRange { line, id, n });
        }
        if std::mem::replace(&mut seen[id as usize], true) {
            return Err(FormatError::DuplicateEntry { line, id });
        }
    }
    Ok(())
}

pub(crate) fn push_row(out: &mut String, row: &[AgentId]) {
    for (i, id) in row.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{id}");
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "3\n1 2 3\n2 3 1\n3 1 2\n\n2 1 3\n1 2 3\n3 2 1\n";

    #[test]
    fn test_parse_example() {
        let store = PreferenceStore::parse(EXAMPLE).unwrap();
        assert_eq!(store.n(), 3);
        assert_eq!(store.prefs(Side::Hospital, 2), &[2, 3, 1]);
        assert_eq!(store.prefs(Side::Student, 3), &[3, 2, 1]);
    }

    #[test]
    fn test_rank_inverts_prefs() {
        let store = PreferenceStore::parse(EXAMPLE).unwrap();
        for side in [Side::Hospital, Side::Student] {
            for agent in 1..=3 {
                for (i, &peer) in store.prefs(side, agent).iter().enumerate() {
                    assert_eq!(store.rank_of(side, agent, peer), i);
                }
            }
        }
    }

    #[test]
    fn test_prefers() {
        let store = PreferenceStore::parse(EXAMPLE).unwrap();
        // student 1 lists 2 1 3
        assert!(store.prefers(Side::Student, 1, 2, 1));
        assert!(!store.prefers(Side::Student, 1, 3, 2));
        assert!(!store.prefers(Side::Student, 1, 1, 1));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(PreferenceStore::parse(""), Err(FormatError::Empty));
        assert_eq!(PreferenceStore::parse("  \n\n"), Err(FormatError::Empty));
    }

    #[test]
    fn test_bad_size() {
        for text in ["0\n", "-1\n", "x\n", "2 2\n1 2\n1 2\n1 2\n1 2\n"] {
            assert!(
                matches!(PreferenceStore::parse(text), Err(FormatError::InvalidSize { .. })),
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_wrong_line_count() {
        let err = PreferenceStore::parse("2\n1 2\n2 1\n1 2\n").unwrap_err();
        assert_eq!(err, FormatError::LineCount { expected: 5, found: 4 });

        let err = PreferenceStore::parse("1\n1\n1\n1\n").unwrap_err();
        assert_eq!(err, FormatError::LineCount { expected: 3, found: 4 });
    }

    #[test]
    fn test_non_integer_token() {
        let err = PreferenceStore::parse("2\n1 b\n2 1\n1 2\n1 2\n").unwrap_err();
        assert_eq!(
            err,
            FormatError::InvalidToken {
                line: 2,
                token: "b".into()
            }
        );
    }

    #[test]
    fn test_short_row() {
        let err = PreferenceStore::parse("2\n1 2\n2 1\n1\n1 2\n").unwrap_err();
        assert_eq!(
            err,
            FormatError::RowLength {
                line: 4,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_row_not_a_permutation() {
        let err = PreferenceStore::parse("2\n1 1\n2 1\n1 2\n1 2\n").unwrap_err();
        assert_eq!(err, FormatError::DuplicateEntry { line: 2, id: 1 });

        let err = PreferenceStore::parse("2\n1 2\n2 1\n1 2\n3 1\n").unwrap_err();
        assert_eq!(err, FormatError::OutOfRange { line: 5, id: 3, n: 2 });

        let err = PreferenceStore::parse("2\n0 1\n2 1\n1 2\n1 2\n").unwrap_err();
        assert_eq!(err, FormatError::OutOfRange { line: 2, id: 0, n: 2 });
    }

    #[test]
    fn test_from_rows_table_size() {
        let err = PreferenceStore::from_rows(&[vec![1, 2], vec![2, 1]], &[vec![1, 2]]).unwrap_err();
        assert_eq!(
            err,
            FormatError::TableSize {
                side: Side::Student,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_render_parses_back() {
        let store = PreferenceStore::parse(EXAMPLE).unwrap();
        let text = store.render();
        assert!(text.starts_with("3\n1 2 3\n"));
        assert_eq!(PreferenceStore::parse(&text).unwrap(), store);
    }

    #[test]
    fn test_read_missing_file() {
        let err = PreferenceStore::read("/nonexistent/dir/none.in").unwrap_err();
        assert!(matches!(err, Error::Resource { .. }));
    }
}
