//! Memory access type definitions.

use std::fmt;

/// Kind of memory access in a reference string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Load; leaves the dirty bit untouched.
    #[default]
    Read,
    /// Store; marks the frame dirty.
    Write,
}

impl AccessType {
    /// Returns `true` for [`AccessType::Write`].
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }

    /// Maps a reference-string operation letter (`R`/`r`/`W`/`w`).
    pub const fn from_op(op: char) -> Option<Self> {
        match op {
            'R' | 'r' => Some(Self::Read),
            'W' | 'w' => Some(Self::Write),
            _ => None,
        }
    }
}

impl From<bool> for AccessType {
    fn from(is_write: bool) -> Self {
        if is_write { Self::Write } else { Self::Read }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("READ"),
            Self::Write => f.write_str("WRITE"),
        }
    }
}
