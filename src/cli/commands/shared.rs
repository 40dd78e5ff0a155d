//! Shared components for CLI commands
//!
//! Logging setup, configuration loading and the session pass used by both
//! subcommands.

use crate::app::services::analysis::{AnalysisOutcome, Analyzer, KpiSelection};
use crate::app::services::ingest;
use crate::cli::args::CommonArgs;
use crate::config::AnalysisConfig;
use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, info};

/// Set up structured logging on stderr
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("data_insight={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration (file or defaults) and apply CLI overrides
pub fn load_configuration(args: &CommonArgs) -> Result<AnalysisConfig> {
    let mut config = AnalysisConfig::load(args.config_file.as_deref())?;

    if let Some(variant) = args.variant {
        config = config.with_variant(variant.into());
    }

    config.validate()?;
    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

/// Create a spinner for the session pass
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Read the input file and run one session pass over it
pub fn run_session(args: &CommonArgs, selection: &KpiSelection) -> Result<AnalysisOutcome> {
    args.validate()?;
    let config = load_configuration(args)?;

    let spinner = args
        .show_progress()
        .then(|| create_spinner(&format!("Reading {}", args.input.display())));

    let (dataset, file_size) = ingest::read_path(&args.input)?;
    let source = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.input.display().to_string());

    info!("Analyzing '{}' with {:?} scoring", source, config.variant);
    let analyzer = Analyzer::new(config);
    let outcome =
        analyzer.analyze_with_progress(dataset, file_size, &source, selection, spinner.as_ref());

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{Args, Commands};
    use crate::config::ScoringVariant;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn common(argv: &[&str]) -> CommonArgs {
        Args::try_parse_from(argv)
            .unwrap()
            .command
            .unwrap()
            .common()
            .clone()
    }

    #[test]
    fn test_variant_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "variant = \"standard\"").unwrap();
        let config_path = file.path().to_string_lossy().into_owned();

        let args = common(&[
            "data-insight",
            "inspect",
            "a.csv",
            "--config",
            &config_path,
            "--variant",
            "b",
        ]);
        let config = load_configuration(&args).unwrap();
        assert_eq!(config.variant, ScoringVariant::OutlierAware);
    }

    #[test]
    fn test_run_session_on_csv() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        write!(
            file,
            "Date,Revenue\n2024-01-10,100\n2024-02-10,120\n2024-03-10,90\n"
        )
        .unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let args = common(&["data-insight", "analyze", &path, "-q"]);
        let outcome = run_session(&args, &KpiSelection::default()).unwrap();

        assert_eq!(outcome.dataset.height(), 3);
        assert!(outcome.report.kpi.is_some());
    }

    #[test]
    fn test_run_session_rejects_unknown_extension() {
        let file = NamedTempFile::with_suffix(".txt").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let args = common(&["data-insight", "inspect", &path, "-q"]);
        assert!(run_session(&args, &KpiSelection::default()).is_err());
    }

    #[test]
    fn test_commands_expose_common_args() {
        let args = Args::try_parse_from(["data-insight", "inspect", "x.csv"]).unwrap();
        assert!(matches!(args.command, Some(Commands::Inspect(_))));
    }
}
