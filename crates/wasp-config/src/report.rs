//! Report rendering defaults.

use serde::{Deserialize, Serialize};
use wasp_core::LevelGrouping;

fn default_title() -> String {
    "Report".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Heading of generated reports when `--title` is not given.
    #[serde(default = "default_title")]
    pub title: String,

    /// Shorten descriptions of non applicable requirements.
    #[serde(default)]
    pub short_description_na: bool,

    /// How multilevel requirements are counted per level.
    #[serde(default)]
    pub grouping: LevelGrouping,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            short_description_na: false,
            grouping: LevelGrouping::default(),
        }
    }
}

impl ReportConfig {
    /// Apply these defaults to a report snapshot.
    pub fn apply(&self, report: &mut wasp_core::Report) {
        report.short_description_na = self.short_description_na;
        report.grouping = self.grouping;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ReportConfig::default();
        assert_eq!(config.title, "Report");
        assert!(!config.short_description_na);
        assert_eq!(config.grouping, LevelGrouping::Inclusive);
    }

    #[test]
    fn apply_copies_rendering_options() {
        let config = ReportConfig {
            title: "ignored".into(),
            short_description_na: true,
            grouping: LevelGrouping::Exclusive,
        };
        let mut report = wasp_core::Report::new("kept");
        config.apply(&mut report);
        assert_eq!(report.title, "kept");
        assert!(report.short_description_na);
        assert_eq!(report.grouping, LevelGrouping::Exclusive);
    }
}
