//! # wasp-core
//!
//! Checklist editing for security verification standards (OWASP ASVS, ISVS).
//!
//! This crate provides everything that carries state or decisions:
//! - [`Entry`] records with level membership, applicability and verification
//! - [`Pattern`] matching of entry IDs (exact, wildcard, anchored regex, level)
//! - The [`Editor`], the single point of mutation for an entry collection
//! - [`Report`] statistics and markdown rendering
//! - The [`EditorError`] taxonomy shared by all of the above
//!
//! # Usage
//!
//! ```no_run
//! use wasp_core::{Editor, Level, Manual};
//!
//! let mut ed = Editor::new();
//! ed.load("checklist/asvs.json")?;
//! ed.set_applicable_by_level(Level::L1, true)?;
//! ed.set_verified("1.1.1", true)?;
//! ed.set_manually_verified(
//!     "1.1.2",
//!     true,
//!     Manual::new("Threat model reviewed", "2021-02-18", "John Doe"),
//! )?;
//! ed.new_report("Report ASVS").save("report.md")?;
//! # Ok::<(), wasp_core::EditorError>(())
//! ```

pub mod editor;
pub mod entry;
pub mod error;
pub mod level;
pub mod pattern;
pub mod report;

pub use editor::Editor;
pub use entry::{Entry, Manual};
pub use error::EditorError;
pub use level::Level;
pub use pattern::{Matcher, Pattern};
pub use report::{LevelGrouping, LevelStats, Report, Stats, Summary};
