//! Markdown progress reports.
//!
//! A [`Report`] owns a copy of the entries it was built from, so later edits
//! in the [`Editor`](crate::Editor) never leak into an already created report.
//!
//! Per-level statistics depend on [`LevelGrouping`]:
//! - `Inclusive` counts an entry under every level it belongs to. An entry
//!   flagged L1 and L2 shows up in both lines.
//! - `Exclusive` counts an entry only under its highest level, so the level
//!   totals add up to the number of levelled entries.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::error::EditorError;
use crate::level::Level;

/// How multilevel entries are counted in per-level statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelGrouping {
    /// Count an entry under each level it belongs to.
    #[default]
    Inclusive,
    /// Count an entry only under its highest level.
    Exclusive,
}

/// Verified, applicable and total counts over a set of entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub verified: usize,
    pub applicable: usize,
    pub total: usize,
}

impl Stats {
    fn collect<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Self {
        entries.into_iter().fold(Self::default(), |mut stats, e| {
            stats.total += 1;
            stats.applicable += usize::from(e.applicable);
            stats.verified += usize::from(e.verified);
            stats
        })
    }

    /// Applicable entries still waiting for verification.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.applicable.saturating_sub(self.verified)
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.verified == self.applicable
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelStats {
    pub level: Level,
    #[serde(flatten)]
    pub stats: Stats,
}

/// Machine-readable form of the report's summary block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub title: String,
    pub grouping: LevelGrouping,
    pub total: Stats,
    pub levels: Vec<LevelStats>,
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub title: String,
    /// Shorten descriptions of non applicable entries.
    pub short_description_na: bool,
    pub grouping: LevelGrouping,
    entries: Vec<Entry>,
}

impl Report {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn add_entries(&mut self, entries: impl IntoIterator<Item = Entry>) {
        self.entries.extend(entries);
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Counts over every entry in the report.
    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats::collect(&self.entries)
    }

    /// Counts for one level under the configured grouping.
    #[must_use]
    pub fn level_stats(&self, level: Level) -> Stats {
        match self.grouping {
            LevelGrouping::Inclusive => {
                Stats::collect(self.entries.iter().filter(|e| e.is_level(level)))
            }
            LevelGrouping::Exclusive => Stats::collect(
                self.entries
                    .iter()
                    .filter(|e| e.highest_level() == Some(level)),
            ),
        }
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary {
            title: self.title.clone(),
            grouping: self.grouping,
            total: self.stats(),
            levels: Level::ALL
                .into_iter()
                .map(|level| LevelStats {
                    level,
                    stats: self.level_stats(level),
                })
                .collect(),
        }
    }

    /// The report as markdown.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Write the markdown report, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns any error from `writer`.
    pub fn write_to(&self, mut writer: impl Write) -> io::Result<u64> {
        let rendered = self.render();
        writer.write_all(rendered.as_bytes())?;
        Ok(rendered.len() as u64)
    }

    /// Write the markdown report to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Io`] if the file cannot be created or written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        let written = self.write_to(&mut writer)?;
        writer.flush()?;
        tracing::info!(path = %path.display(), bytes = written, "saved report");
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f, "## Summary")?;
        writeln!(f)?;
        for level in Level::ALL {
            let stats = self.level_stats(level);
            writeln!(
                f,
                "- {level}: {} verified of {}",
                stats.verified, stats.applicable
            )?;
        }
        writeln!(f)?;

        let total = self.stats();
        if total.is_complete() {
            writeln!(f, "All requirements verified!")?;
        } else {
            writeln!(f, "{} requirements left to verify!", total.remaining())?;
        }

        writeln!(f)?;
        writeln!(f, "## Applicable")?;
        for e in self.entries.iter().filter(|e| e.applicable) {
            write!(f, "- {} **{}**", e.checkbox(), e.id)?;
            write_description(f, &e.description)?;
            if let Some(manual) = &e.manual {
                writeln!(
                    f,
                    "  _Manually verified {} by {}: {}_",
                    manual.when, manual.by, manual.how
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "## Not Applicable")?;
        for e in self.entries.iter().filter(|e| !e.applicable) {
            write!(f, "- {}", e.id)?;
            if self.short_description_na {
                write_description(f, &e.short_description())?;
            } else {
                write_description(f, &e.description)?;
            }
        }
        Ok(())
    }
}

/// Finish an item line, leaving no trailing space for blank descriptions.
fn write_description(f: &mut fmt::Formatter<'_>, description: &str) -> fmt::Result {
    let description = description.trim_end();
    if description.is_empty() {
        writeln!(f)
    } else {
        writeln!(f, " {description}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entry::Manual;

    fn applicable(id: &str, level: Level, verified: bool) -> Entry {
        let mut e = Entry::new(id, "").with_level(level);
        e.applicable = true;
        e.verified = verified;
        e
    }

    fn multilevel() -> Report {
        let mut report = Report::new("levels");
        report.add_entries([
            applicable("1.1.1", Level::L1, true).with_level(Level::L2),
            applicable("1.1.2", Level::L2, false).with_level(Level::L3),
            applicable("1.1.3", Level::L3, false),
            Entry::new("1.1.4", "").with_level(Level::L1),
            Entry::new("1.1.5", ""),
        ]);
        report
    }

    #[test]
    fn stats_count_every_entry() {
        let report = multilevel();
        assert_eq!(
            report.stats(),
            Stats {
                verified: 1,
                applicable: 3,
                total: 5
            }
        );
        assert_eq!(report.stats().remaining(), 2);
    }

    #[test]
    fn inclusive_grouping_counts_each_membership() {
        let report = multilevel();
        assert_eq!(report.level_stats(Level::L1).total, 2);
        assert_eq!(report.level_stats(Level::L2).total, 2);
        assert_eq!(report.level_stats(Level::L3).total, 2);
        assert_eq!(report.level_stats(Level::L2).verified, 1);
    }

    #[test]
    fn exclusive_grouping_partitions_levelled_entries() {
        let mut report = multilevel();
        report.grouping = LevelGrouping::Exclusive;

        let l1 = report.level_stats(Level::L1);
        let l2 = report.level_stats(Level::L2);
        let l3 = report.level_stats(Level::L3);
        assert_eq!((l1.total, l2.total, l3.total), (1, 1, 2));

        let levelled = report
            .entries()
            .iter()
            .filter(|e| e.highest_level().is_some())
            .count();
        assert_eq!(l1.total + l2.total + l3.total, levelled);
        assert_eq!(l1.verified + l2.verified + l3.verified, 1);
    }

    #[test]
    fn summary_lines_use_applicable_counts() {
        let got = multilevel().render();
        assert!(got.contains("- L1: 1 verified of 1"), "{got}");
        assert!(got.contains("- L2: 1 verified of 2"), "{got}");
        assert!(got.contains("- L3: 0 verified of 2"), "{got}");
        assert!(got.contains("2 requirements left to verify!"), "{got}");
    }

    #[test]
    fn renders_entries_and_manual_note() {
        let mut report = Report::new("test report");
        let mut verified = applicable("1.3.1", Level::L1, true);
        verified.manual = Some(Manual::new("Using hardware...", "2022-01-01", "John Doe"));
        report.add_entries([
            verified,
            Entry::new("4.3.4", "").with_level(Level::L2),
            Entry::new("5.1.1", "").with_level(Level::L3),
        ]);

        let got = report.render();
        for exp in [
            "# test report",
            "4.3.4",
            "- 5.1.1",
            "[x] **1.3.1**",
            "Using",
            "John Doe",
            "2022-01-01",
        ] {
            assert!(got.contains(exp), "missing {exp} in\n{got}");
        }
    }

    #[test]
    fn blank_descriptions_leave_no_trailing_space() {
        let mut report = Report::new("blank");
        report.add_entries([
            applicable("1.1.1", Level::L1, false),
            Entry::new("1.1.2", "").with_level(Level::L1),
        ]);
        let got = report.render();
        assert!(got.contains("- [ ] **1.1.1**\n"), "{got}");
        assert!(got.contains("- 1.1.2\n"), "{got}");
        assert!(got.lines().all(|line| !line.ends_with(' ')), "{got}");
    }

    #[test]
    fn all_verified_banner() {
        let mut report = Report::new("full report");
        report.short_description_na = true;
        report.add_entries([applicable("1.1.1", Level::L2, true)]);
        assert!(report.render().contains("All requirements verified!"));
    }

    #[test]
    fn short_descriptions_for_not_applicable_only() {
        let mut report = Report::new("short report");
        report.short_description_na = true;
        let mut long_applicable = applicable("1.1.1", Level::L2, true);
        long_applicable.description = format!("{}more here", "x".repeat(80));
        report.add_entries([
            long_applicable,
            Entry::new("1.1.2", format!("{}out of range", "x".repeat(80))),
            Entry::new("1.1.3", "l".repeat(79)),
        ]);

        let got = report.render();
        assert!(!got.contains("out of range"), "{got}");
        assert!(got.contains("more here"), "{got}");
        assert!(got.contains(&format!("- 1.1.3 {}\n", "l".repeat(79))), "{got}");
    }

    #[test]
    fn full_descriptions_by_default() {
        let mut report = Report::new("long");
        report.add_entries([Entry::new("1.1.2", format!("{}out of range", "x".repeat(80)))]);
        assert!(report.render().contains("out of range"));
    }

    #[test]
    fn entries_keep_collection_order() {
        let mut report = Report::new("order");
        report.add_entries([
            applicable("3.1.1", Level::L1, false),
            applicable("1.1.1", Level::L1, false),
            applicable("2.1.1", Level::L1, false),
        ]);
        let got = report.render();
        let pos = |id: &str| got.find(id).unwrap();
        assert!(pos("3.1.1") < pos("1.1.1"));
        assert!(pos("1.1.1") < pos("2.1.1"));
    }

    #[test]
    fn write_to_reports_byte_count() {
        let report = multilevel();
        let mut buf = Vec::new();
        let written = report.write_to(&mut buf).unwrap();
        assert_eq!(written, buf.len() as u64);
        assert_eq!(String::from_utf8(buf).unwrap(), report.render());
    }

    #[test]
    fn summary_serializes_flat_level_stats() {
        let summary = multilevel().summary();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["grouping"], "inclusive");
        assert_eq!(json["levels"][0]["level"], "L1");
        assert_eq!(json["levels"][1]["applicable"], 2);
        assert_eq!(json["total"]["total"], 5);
    }
}
