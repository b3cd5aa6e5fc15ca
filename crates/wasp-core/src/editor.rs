//! The checklist editor.
//!
//! [`Editor`] owns an ordered collection of [`Entry`] values and is the only
//! place they are mutated. Exact-id operations fail with
//! [`EditorError::NotFound`]; pattern-driven operations (`*_by`) fail with
//! [`EditorError::NoMatch`] when nothing matched.
//!
//! Two invariants hold after every call:
//! - a verified entry is applicable
//! - an entry with a manual note is verified
//!
//! Verification of a non-applicable entry fails with
//! [`EditorError::NotApplicable`]. Pattern-driven calls visit matches in
//! collection order and stop at the first failure; entries visited before it
//! keep their new state.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::entry::{Entry, Manual};
use crate::error::EditorError;
use crate::level::Level;
use crate::pattern::Pattern;
use crate::report::Report;

#[derive(Debug, Clone, Default)]
pub struct Editor {
    entries: Vec<Entry>,
}

impl Editor {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Wrap an existing collection. IDs are taken as unique; with duplicates,
    /// exact-id operations only ever see the first one.
    #[must_use]
    pub const fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Entries in load order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append entries after the existing ones. No ID check, as for
    /// [`Editor::from_entries`].
    pub fn add_entries(&mut self, entries: impl IntoIterator<Item = Entry>) {
        self.entries.extend(entries);
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Replace the collection with the checklist stored in `path`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Io`] if the file cannot be opened,
    /// [`EditorError::Json`] if it is not a checklist and
    /// [`EditorError::DuplicateId`] if an ID repeats.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        self.import(BufReader::new(file))?;
        tracing::info!(path = %path.display(), entries = self.entries.len(), "loaded checklist");
        Ok(())
    }

    /// Write the collection to `path` as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Io`] if the file cannot be created or written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.tidy_export(&mut writer)?;
        writer.flush()?;
        tracing::info!(path = %path.display(), entries = self.entries.len(), "saved checklist");
        Ok(())
    }

    /// Replace the collection with entries decoded from `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Json`] on malformed input and
    /// [`EditorError::DuplicateId`] if an ID repeats. The collection is left
    /// untouched on error.
    pub fn import(&mut self, reader: impl Read) -> Result<(), EditorError> {
        let entries: Vec<Entry> = serde_json::from_reader(reader)?;
        let mut seen = HashSet::with_capacity(entries.len());
        if let Some(dup) = entries.iter().find(|e| !seen.insert(e.id.as_str())) {
            return Err(EditorError::DuplicateId { id: dup.id.clone() });
        }
        self.entries = entries;
        Ok(())
    }

    /// Compact single-line JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Json`] if writing fails.
    pub fn export(&self, writer: impl Write) -> Result<(), EditorError> {
        serde_json::to_writer(writer, &self.entries)?;
        Ok(())
    }

    /// JSON indented by two spaces with a trailing newline, one field per
    /// line so version control diffs stay small.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Json`] or [`EditorError::Io`] if writing fails.
    pub fn tidy_export(&self, mut writer: impl Write) -> Result<(), EditorError> {
        serde_json::to_writer_pretty(&mut writer, &self.entries)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Applicability
    // -----------------------------------------------------------------------

    /// Set applicability of the entry with `id`. Marking it not applicable
    /// also clears its verification.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotFound`] if no entry has that ID.
    pub fn set_applicable(&mut self, id: &str, value: bool) -> Result<(), EditorError> {
        self.entry_mut(id)?.set_applicable(value);
        tracing::debug!(id, value, "set applicable");
        Ok(())
    }

    /// Set applicability on every entry matching `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoMatch`] if nothing matched and
    /// [`EditorError::InvalidPattern`] for a bad regex.
    pub fn set_applicable_by(
        &mut self,
        pattern: impl Into<Pattern>,
        value: bool,
    ) -> Result<(), EditorError> {
        let pattern = pattern.into();
        let count = self.for_each_match(&pattern, |entry| {
            entry.set_applicable(value);
            Ok(())
        })?;
        tracing::debug!(%pattern, value, count, "set applicable by pattern");
        Ok(())
    }

    /// Set applicability on every entry belonging to `level`.
    ///
    /// `level` may be a [`Level`], a number or a name such as `"L2"`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidLevel`] if `level` is not L1, L2 or L3
    /// and [`EditorError::NoMatch`] if no entry has that level.
    pub fn set_applicable_by_level<L>(&mut self, level: L, value: bool) -> Result<(), EditorError>
    where
        L: TryInto<Level>,
        EditorError: From<L::Error>,
    {
        let level: Level = level.try_into()?;
        self.set_applicable_by(level, value)
    }

    // -----------------------------------------------------------------------
    // Verification
    // -----------------------------------------------------------------------

    /// Set verification of the entry with `id`, discarding any manual note.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotFound`] if no entry has that ID and
    /// [`EditorError::NotApplicable`] if the entry is not applicable.
    pub fn set_verified(&mut self, id: &str, value: bool) -> Result<(), EditorError> {
        verify(self.entry_mut(id)?, value, None)?;
        tracing::debug!(id, value, "set verified");
        Ok(())
    }

    /// Set verification on every entry matching `pattern`, discarding manual
    /// notes.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoMatch`] if nothing matched and
    /// [`EditorError::NotApplicable`] at the first non-applicable match.
    pub fn set_verified_by(
        &mut self,
        pattern: impl Into<Pattern>,
        value: bool,
    ) -> Result<(), EditorError> {
        let pattern = pattern.into();
        let count = self.for_each_match(&pattern, |entry| verify(entry, value, None))?;
        tracing::debug!(%pattern, value, count, "set verified by pattern");
        Ok(())
    }

    /// Record a manual verification of the entry with `id`.
    ///
    /// The entry is marked applicable first, since someone deliberately
    /// verified it. With `value == false` the note is dropped along with the
    /// verification.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotFound`] if no entry has that ID.
    pub fn set_manually_verified(
        &mut self,
        id: &str,
        value: bool,
        manual: Manual,
    ) -> Result<(), EditorError> {
        let entry = self.entry_mut(id)?;
        entry.applicable = true;
        verify(entry, value, Some(manual))?;
        tracing::debug!(id, value, "set manually verified");
        Ok(())
    }

    /// Record a manual verification on every entry matching `pattern`.
    ///
    /// Unlike [`set_manually_verified`](Self::set_manually_verified),
    /// applicability is left alone and must already hold.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoMatch`] if nothing matched and
    /// [`EditorError::NotApplicable`] at the first non-applicable match.
    pub fn set_manually_verified_by(
        &mut self,
        pattern: impl Into<Pattern>,
        value: bool,
        manual: Manual,
    ) -> Result<(), EditorError> {
        let pattern = pattern.into();
        let count =
            self.for_each_match(&pattern, |entry| verify(entry, value, Some(manual.clone())))?;
        tracing::debug!(%pattern, value, count, "set manually verified by pattern");
        Ok(())
    }

    /// Clear verification on every entry matching `pattern`. Applicability is
    /// not required.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoMatch`] if nothing matched.
    pub fn reset_verified_by(&mut self, pattern: impl Into<Pattern>) -> Result<(), EditorError> {
        let pattern = pattern.into();
        let count = self.for_each_match(&pattern, |entry| {
            entry.unverify();
            Ok(())
        })?;
        tracing::debug!(%pattern, count, "reset verified by pattern");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Resets
    // -----------------------------------------------------------------------

    /// Clear verification and manual notes on all entries.
    pub fn reset_verified(&mut self) {
        self.entries.iter_mut().for_each(Entry::unverify);
    }

    /// Mark all entries not applicable, which also clears verification.
    pub fn reset_applicable(&mut self) {
        for entry in &mut self.entries {
            entry.set_applicable(false);
        }
    }

    /// Clear applicability, verification and manual notes on all entries.
    pub fn reset(&mut self) {
        self.reset_verified();
        self.reset_applicable();
    }

    // -----------------------------------------------------------------------
    // Reports
    // -----------------------------------------------------------------------

    /// Snapshot the current entries into a new report.
    #[must_use]
    pub fn new_report(&self, title: impl Into<String>) -> Report {
        let mut report = Report::new(title);
        report.add_entries(self.entries.iter().cloned());
        report
    }

    fn entry_mut(&mut self, id: &str) -> Result<&mut Entry, EditorError> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| EditorError::NotFound { id: id.to_string() })
    }

    /// Apply `f` to each matching entry in order, stopping at the first
    /// error. Returns the number of entries visited.
    fn for_each_match<F>(&mut self, pattern: &Pattern, mut f: F) -> Result<usize, EditorError>
    where
        F: FnMut(&mut Entry) -> Result<(), EditorError>,
    {
        let matcher = pattern.compile()?;
        let mut count = 0;
        for entry in self.entries.iter_mut().filter(|e| matcher.is_match(e)) {
            count += 1;
            if let Err(error) = f(entry) {
                tracing::warn!(%pattern, visited = count, "pattern operation aborted: {error}");
                return Err(error);
            }
        }
        if count == 0 {
            return Err(EditorError::NoMatch {
                pattern: pattern.to_string(),
            });
        }
        Ok(count)
    }
}

fn verify(entry: &mut Entry, value: bool, manual: Option<Manual>) -> Result<(), EditorError> {
    if !entry.applicable {
        return Err(EditorError::NotApplicable {
            id: entry.id.clone(),
        });
    }
    entry.verified = value;
    entry.manual = if value { manual } else { None };
    Ok(())
}
