//! Verification levels.
//!
//! A level is the rigor tier a requirement belongs to. Entries carry one flag
//! per level and may belong to several at once.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// Verification level of a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    L1,
    L2,
    L3,
}

impl Level {
    /// All levels, lowest first.
    pub const ALL: [Self; 3] = [Self::L1, Self::L2, Self::L3];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::L1 => "L1",
            Self::L2 => "L2",
            Self::L3 => "L3",
        }
    }

    /// Numeric tier, 1 through 3.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::L1 => 1,
            Self::L2 => 2,
            Self::L3 => 3,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for Level {
    type Error = EditorError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::L1),
            2 => Ok(Self::L2),
            3 => Ok(Self::L3),
            other => Err(EditorError::InvalidLevel(other.to_string())),
        }
    }
}

impl FromStr for Level {
    type Err = EditorError;

    /// Accepts `1`, `2`, `3` and `L1`, `L2`, `L3` in either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "L1" | "l1" => Ok(Self::L1),
            "2" | "L2" | "l2" => Ok(Self::L2),
            "3" | "L3" | "l3" => Ok(Self::L3),
            _ => Err(EditorError::InvalidLevel(s.to_string())),
        }
    }
}

impl TryFrom<&str> for Level {
    type Error = EditorError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
