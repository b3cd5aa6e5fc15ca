use anyhow::Context;
use wasp_config::ReportConfig;
use wasp_core::{Editor, LevelGrouping, Report};

use crate::cli::ReportArgs;

/// Snapshot the editor into a report, layering CLI flags over config
/// defaults.
pub fn build(ed: &Editor, args: &ReportArgs, config: &ReportConfig) -> Report {
    let title = args.title.as_deref().unwrap_or(&config.title);
    let mut report = ed.new_report(title);
    config.apply(&mut report);
    if args.short_description_na {
        report.short_description_na = true;
    }
    if args.exclusive_levels {
        report.grouping = LevelGrouping::Exclusive;
    }
    report
}

/// Write the markdown report if `--report` was given.
pub fn handle(ed: &Editor, args: &ReportArgs, config: &ReportConfig) -> anyhow::Result<()> {
    let Some(path) = &args.path else {
        return Ok(());
    };
    build(ed, args, config)
        .save(path)
        .with_context(|| format!("failed to write report {}", path.display()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wasp_config::ReportConfig;
    use wasp_core::{Editor, Entry, Level, LevelGrouping};

    use super::{build, handle};
    use crate::cli::ReportArgs;

    fn editor() -> Editor {
        Editor::from_entries(vec![
            Entry::new("1.1.1", "x".repeat(90))
                .with_level(Level::L1)
                .with_level(Level::L2),
        ])
    }

    #[test]
    fn config_defaults_apply_without_flags() {
        let config = ReportConfig {
            title: "Configured".into(),
            short_description_na: true,
            grouping: LevelGrouping::Exclusive,
        };
        let report = build(&editor(), &ReportArgs::default(), &config);
        assert_eq!(report.title, "Configured");
        assert!(report.short_description_na);
        assert_eq!(report.grouping, LevelGrouping::Exclusive);
    }

    #[test]
    fn flags_override_config() {
        let args = ReportArgs {
            title: Some("From flag".into()),
            short_description_na: true,
            exclusive_levels: true,
            ..ReportArgs::default()
        };
        let report = build(&editor(), &args, &ReportConfig::default());
        assert_eq!(report.title, "From flag");
        assert!(report.short_description_na);
        assert_eq!(report.grouping, LevelGrouping::Exclusive);
    }

    #[test]
    fn handle_without_path_writes_nothing() {
        handle(&editor(), &ReportArgs::default(), &ReportConfig::default()).unwrap();
    }

    #[test]
    fn handle_writes_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");
        let args = ReportArgs {
            path: Some(path.clone()),
            ..ReportArgs::default()
        };
        handle(&editor(), &args, &ReportConfig::default()).unwrap();
        let got = std::fs::read_to_string(path).unwrap();
        assert!(got.starts_with("# Report\n"));
        assert!(got.contains("- 1.1.1 "));
    }
}
