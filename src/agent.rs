//! Agent identities and the two sides of the market.
//!
//! Hospitals and students share the numeric ID space `1..=n` but are
//! distinct entities: `Side` says which table an ID indexes into.

use std::fmt;

/// 1-based agent identifier. Valid IDs are `1..=n`.
pub type AgentId = u32;

/// An ID as written in a matching file, before range checking.
pub type RawId = i64;

/// Which side of the market an agent belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    /// Proposing side
    Hospital = 0,
    /// Receiving side
    Student = 1,
}

impl Side {
    /// Lower-case name used in reports
    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Hospital => "hospital",
            Side::Student => "student",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single (hospital, student) pair of a matching.
///
/// IDs are kept as read so the validity checker can report any integer
/// outside `1..=n`, negative ones included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pair {
    pub hospital: RawId,
    pub student: RawId,
}

impl Pair {
    #[inline]
    pub fn new(hospital: impl Into<RawId>, student: impl Into<RawId>) -> Self {
        Self {
            hospital: hospital.into(),
            student: student.into(),
        }
    }

    /// ID of this pair's member on `side`
    #[inline]
    pub const fn id(&self, side: Side) -> RawId {
        match side {
            Side::Hospital => self.hospital,
            Side::Student => self.student,
        }
    }
}

impl From<(RawId, RawId)> for Pair {
    fn from((hospital, student): (RawId, RawId)) -> Self {
        Self { hospital, student }
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.hospital, self.student)
    }
}
