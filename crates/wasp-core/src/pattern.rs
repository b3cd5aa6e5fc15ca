//! Entry selection by ID pattern or level.
//!
//! A [`Pattern`] is parsed from user input once and compiled into a
//! [`Matcher`] before any entry is looked at:
//!
//! | input            | pattern               | matches                           |
//! |------------------|-----------------------|-----------------------------------|
//! | `Level::L2`      | [`Pattern::Level`]    | entries with the L2 flag          |
//! | `^1\.1\.\d+$`    | [`Pattern::Regex`]    | IDs the regex matches             |
//! | `1.1.*`          | [`Pattern::Wildcard`] | whole IDs, `*` as any run of text |
//! | `1.1.1`          | [`Pattern::Exact`]    | the ID `1.1.1` only               |
//!
//! Matching is case-sensitive. Wildcards escape every regex metacharacter
//! before expanding `*`, so `1.1.*` does not match `11.1.2`.

use std::fmt;

use regex::Regex;

use crate::entry::Entry;
use crate::error::EditorError;
use crate::level::Level;

/// A matching specification for a bulk editor operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Level membership.
    Level(Level),
    /// Exact ID equality.
    Exact(String),
    /// Glob-style ID with `*` wildcards, implicitly anchored.
    Wildcard(String),
    /// Caller-anchored regular expression (starts with `^`).
    Regex(String),
}

impl Pattern {
    /// Classify a user supplied string.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        if input.starts_with('^') {
            Self::Regex(input.to_string())
        } else if input.contains('*') {
            Self::Wildcard(input.to_string())
        } else {
            Self::Exact(input.to_string())
        }
    }

    /// Resolve into a predicate over entries.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidPattern`] if a regex pattern does not
    /// compile.
    pub fn compile(&self) -> Result<Matcher, EditorError> {
        let kind = match self {
            Self::Level(level) => MatcherKind::Level(*level),
            Self::Exact(id) => MatcherKind::Exact(id.clone()),
            Self::Wildcard(glob) => MatcherKind::Regex(compile_regex(&wildcard_to_regex(glob))?),
            Self::Regex(expr) => MatcherKind::Regex(compile_regex(expr)?),
        };
        Ok(Matcher { kind })
    }
}

impl From<Level> for Pattern {
    fn from(level: Level) -> Self {
        Self::Level(level)
    }
}

impl From<&str> for Pattern {
    fn from(input: &str) -> Self {
        Self::parse(input)
    }
}

impl From<&String> for Pattern {
    fn from(input: &String) -> Self {
        Self::parse(input)
    }
}

impl From<String> for Pattern {
    fn from(input: String) -> Self {
        Self::parse(&input)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level(level) => write!(f, "{level}"),
            Self::Exact(s) | Self::Wildcard(s) | Self::Regex(s) => f.write_str(s),
        }
    }
}

/// A compiled [`Pattern`].
#[derive(Debug, Clone)]
pub struct Matcher {
    kind: MatcherKind,
}

#[derive(Debug, Clone)]
enum MatcherKind {
    Level(Level),
    Exact(String),
    Regex(Regex),
}

impl Matcher {
    #[must_use]
    pub fn is_match(&self, entry: &Entry) -> bool {
        match &self.kind {
            MatcherKind::Level(level) => entry.is_level(*level),
            MatcherKind::Exact(id) => entry.id == *id,
            MatcherKind::Regex(re) => re.is_match(&entry.id),
        }
    }
}

fn wildcard_to_regex(glob: &str) -> String {
    format!("^{}$", regex::escape(glob).replace(r"\*", ".*"))
}

fn compile_regex(expr: &str) -> Result<Regex, EditorError> {
    Regex::new(expr).map_err(|source| EditorError::InvalidPattern {
        pattern: expr.to_string(),
        source,
    })
}
