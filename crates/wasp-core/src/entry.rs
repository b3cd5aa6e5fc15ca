use std::fmt;

use serde::{Deserialize, Serialize};

use crate::level::Level;

/// Descriptions at or above this length are shortened for display.
pub const SHORT_DESCRIPTION_LEN: usize = 80;

/// One checklist requirement.
///
/// Field names match the OWASP JSON exports (`ID`, `Description`, `L1`..).
/// `Verified` and `Applicable` are absent from raw exports and default to
/// false on import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "L1", default)]
    pub l1: bool,
    #[serde(rename = "L2", default)]
    pub l2: bool,
    #[serde(rename = "L3", default)]
    pub l3: bool,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Verified", default)]
    pub verified: bool,
    #[serde(rename = "Applicable", default)]
    pub applicable: bool,
    #[serde(rename = "Manual", default, skip_serializing_if = "Option::is_none")]
    pub manual: Option<Manual>,
}

/// Notes on a verification carried out by a person rather than a test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manual {
    #[serde(rename = "How")]
    pub how: String,
    #[serde(rename = "When")]
    pub when: String,
    #[serde(rename = "By")]
    pub by: String,
}

impl Manual {
    #[must_use]
    pub fn new(how: impl Into<String>, when: impl Into<String>, by: impl Into<String>) -> Self {
        Self {
            how: how.into(),
            when: when.into(),
            by: by.into(),
        }
    }
}

impl Entry {
    #[must_use]
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Builder-style level flag, mostly for fixtures.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        match level {
            Level::L1 => self.l1 = true,
            Level::L2 => self.l2 = true,
            Level::L3 => self.l3 = true,
        }
        self
    }

    /// True if the entry belongs to `level`, regardless of its other levels.
    #[must_use]
    pub const fn is_level(&self, level: Level) -> bool {
        match level {
            Level::L1 => self.l1,
            Level::L2 => self.l2,
            Level::L3 => self.l3,
        }
    }

    /// Levels this entry belongs to, lowest first.
    pub fn levels(&self) -> impl Iterator<Item = Level> + '_ {
        Level::ALL.into_iter().filter(|level| self.is_level(*level))
    }

    #[must_use]
    pub fn highest_level(&self) -> Option<Level> {
        Level::ALL
            .into_iter()
            .rev()
            .find(|level| self.is_level(*level))
    }

    #[must_use]
    pub const fn checkbox(&self) -> &'static str {
        if self.verified { "[x]" } else { "[ ]" }
    }

    #[must_use]
    pub fn short_description(&self) -> String {
        shorten(&self.description, SHORT_DESCRIPTION_LEN)
    }

    /// Clear verification along with any manual note.
    pub(crate) fn unverify(&mut self) {
        self.verified = false;
        self.manual = None;
    }

    /// Set applicability; an entry that stops being applicable loses its
    /// verification.
    pub(crate) fn set_applicable(&mut self, value: bool) {
        self.applicable = value;
        if !value {
            self.unverify();
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.description)
    }
}

/// Cap `s` at `max` bytes, appending `...` when something was cut.
pub(crate) fn shorten(s: &str, max: usize) -> String {
    if s.len() < max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
