//! Error types for checklist editing.
//!
//! Domain errors (`NotFound`, `NoMatch`, `NotApplicable`, `DuplicateId`,
//! `InvalidLevel`, `InvalidPattern`) carry the offending identifier or pattern so callers can
//! correct the input and retry. Storage errors are surfaced verbatim.

use std::convert::Infallible;

use thiserror::Error;

/// Errors raised by the editor, the pattern matcher and report output.
#[derive(Debug, Error)]
pub enum EditorError {
    /// An exact-id operation found no entry with that ID.
    #[error("entry not found: {id}")]
    NotFound { id: String },

    /// A pattern-driven operation matched zero entries.
    #[error("no entries match pattern: {pattern}")]
    NoMatch { pattern: String },

    /// Verification was attempted on an entry that is not applicable.
    #[error("entry {id} is not applicable and cannot be verified")]
    NotApplicable { id: String },

    /// An imported checklist lists the same ID twice.
    #[error("duplicate entry id: {id}")]
    DuplicateId { id: String },

    /// A level value outside L1, L2 and L3.
    #[error("invalid level: {0} (expected 1, 2 or 3)")]
    InvalidLevel(String),

    /// A regular expression pattern failed to compile.
    #[error("invalid pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Underlying file or stream error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Checklist JSON could not be read or written.
    #[error("checklist json: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<Infallible> for EditorError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
