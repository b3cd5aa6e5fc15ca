use std::path::PathBuf;

use clap::{Args, Parser};
use wasp_core::{EditorError, Level};

pub mod global;

pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `wasped` binary.
#[derive(Debug, Parser)]
#[command(
    name = "wasped",
    version,
    about = "wasped - checklist editor for OWASP verification standards"
)]
pub struct Cli {
    /// Checklist JSON file, updated in place when edits are given.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub edit: EditArgs,

    #[command(flatten)]
    pub report: ReportArgs,

    /// Print verification statistics to stdout.
    #[arg(long)]
    pub summary: bool,

    /// Output format for --summary: json, raw
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Changes applied to the checklist before it is saved.
#[derive(Clone, Debug, Default, Args)]
pub struct EditArgs {
    /// Mark the entry with this ID verified.
    #[arg(long, value_name = "ID", conflicts_with = "unverify")]
    pub verify: Option<String>,

    /// Mark the entry with this ID not verified.
    #[arg(long, value_name = "ID")]
    pub unverify: Option<String>,

    /// Manual verification note for --verify/--unverify.
    /// Format: YYYY-MM-DD, By, How
    #[arg(short, long, value_name = "WHEN,BY,HOW")]
    pub manual: Option<String>,

    /// Mark entries matching PATTERN applicable (exact ID, `1.2.*` or `^regex`).
    #[arg(short, long = "applicable", value_name = "PATTERN")]
    pub applicable: Vec<String>,

    /// Mark entries matching PATTERN not applicable.
    #[arg(short, long = "not-applicable", value_name = "PATTERN")]
    pub not_applicable: Vec<String>,

    /// Mark every entry of a level applicable (1, 2, 3 or L1, L2, L3).
    #[arg(short, long, value_name = "LEVEL", value_parser = parse_level)]
    pub level: Option<Level>,
}

impl EditArgs {
    /// Whether any edit was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verify.is_none()
            && self.unverify.is_none()
            && self.manual.is_none()
            && self.applicable.is_empty()
            && self.not_applicable.is_empty()
            && self.level.is_none()
    }
}

/// Markdown report options.
#[derive(Clone, Debug, Default, Args)]
pub struct ReportArgs {
    /// Save a markdown report to PATH.
    #[arg(short = 'r', long = "report", value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Report title (defaults to report.title from config).
    #[arg(short, long)]
    pub title: Option<String>,

    /// Short descriptions for non applicable requirements.
    #[arg(short, long = "short-description-na")]
    pub short_description_na: bool,

    /// Count multilevel requirements only under their highest level.
    #[arg(long)]
    pub exclusive_levels: bool,
}

fn parse_level(value: &str) -> Result<Level, EditorError> {
    value.parse()
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;
    use wasp_core::Level;

    use super::{Cli, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn requires_file_argument() {
        assert!(Cli::try_parse_from(["wasped"]).is_err());
    }

    #[test]
    fn parses_verify_with_manual_note() {
        let cli = Cli::try_parse_from([
            "wasped",
            "asvs.json",
            "--verify",
            "1.1.2",
            "-m",
            "2021-02-18, John Doe, Threat model review",
        ])
        .expect("cli should parse");

        assert_eq!(cli.file.to_str(), Some("asvs.json"));
        assert_eq!(cli.edit.verify.as_deref(), Some("1.1.2"));
        assert!(cli.edit.manual.is_some());
        assert!(!cli.edit.is_empty());
    }

    #[test]
    fn verify_and_unverify_conflict() {
        let parsed =
            Cli::try_parse_from(["wasped", "f.json", "--verify", "1", "--unverify", "2"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn patterns_are_repeatable() {
        let cli = Cli::try_parse_from([
            "wasped", "f.json", "-a", "1.1.*", "-a", "2.1.1", "-n", "1.1.3",
        ])
        .expect("cli should parse");
        assert_eq!(cli.edit.applicable, vec!["1.1.*", "2.1.1"]);
        assert_eq!(cli.edit.not_applicable, vec!["1.1.3"]);
    }

    #[test]
    fn level_accepts_number_and_name() {
        let cli = Cli::try_parse_from(["wasped", "f.json", "--level", "L2"]).unwrap();
        assert_eq!(cli.edit.level, Some(Level::L2));
        let cli = Cli::try_parse_from(["wasped", "f.json", "-l", "3"]).unwrap();
        assert_eq!(cli.edit.level, Some(Level::L3));
    }

    #[test]
    fn level_rejects_unknown_value() {
        assert!(Cli::try_parse_from(["wasped", "f.json", "--level", "4"]).is_err());
    }

    #[test]
    fn report_options_parse() {
        let cli = Cli::try_parse_from([
            "wasped",
            "f.json",
            "-r",
            "report.md",
            "-t",
            "ASVS",
            "-s",
            "--exclusive-levels",
            "--summary",
            "--format",
            "raw",
        ])
        .expect("cli should parse");
        assert_eq!(cli.report.path.as_deref().and_then(|p| p.to_str()), Some("report.md"));
        assert_eq!(cli.report.title.as_deref(), Some("ASVS"));
        assert!(cli.report.short_description_na);
        assert!(cli.report.exclusive_levels);
        assert!(cli.summary);
        assert_eq!(cli.global_flags().format, OutputFormat::Raw);
        assert!(cli.edit.is_empty());
    }
}
