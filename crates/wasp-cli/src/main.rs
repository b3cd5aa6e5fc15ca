use anyhow::Context;
use clap::Parser;
use wasp_core::Editor;

mod bootstrap;
mod cli;
mod commands;
mod output;

fn main() {
    if let Err(error) = run() {
        eprintln!("wasped error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    let config = bootstrap::load_config()?;
    init_tracing(&flags, &config.general.log_filter)?;

    let mut ed = Editor::new();
    ed.load(&cli.file)
        .with_context(|| format!("failed to load checklist {}", cli.file.display()))?;

    let edited = !cli.edit.is_empty();
    if edited {
        commands::edit::apply(&mut ed, &cli.edit)?;
        tracing::debug!(file = %cli.file.display(), "edits applied");
    }

    // The report goes first so a failed write leaves the checklist untouched.
    commands::report::handle(&ed, &cli.report, &config.report)?;

    if edited {
        ed.save(&cli.file)
            .with_context(|| format!("failed to save checklist {}", cli.file.display()))?;
    }

    if cli.summary {
        let report = commands::report::build(&ed, &cli.report, &config.report);
        output::output(&report.summary(), flags.format)?;
    }

    Ok(())
}

fn init_tracing(flags: &cli::GlobalFlags, default_filter: &str) -> anyhow::Result<()> {
    let level = if flags.quiet {
        "error"
    } else if flags.verbose {
        "debug"
    } else {
        default_filter
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("WASPED_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
