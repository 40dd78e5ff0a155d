//! Command implementations for the data insight CLI
//!
//! - `inspect`: overview, cleaning log and quality report
//! - `analyze`: full session pass with KPI trend, health and optional export

pub mod report;
pub mod shared;

pub use report::{ReportScope, render_json, render_text};

use crate::app::services::analysis::{AnalysisReport, KpiSelection};
use crate::app::services::ingest;
use crate::cli::args::{AnalyzeArgs, Args, CommonArgs, Commands, InspectArgs, OutputFormat};
use anyhow::{Context, Result};
use colored::*;
use shared::{run_session, setup_logging};
use tracing::info;

/// Dispatch to the subcommand handler
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Inspect(inspect_args)) => run_inspect(inspect_args),
        Some(Commands::Analyze(analyze_args)) => run_analyze(analyze_args),
        None => anyhow::bail!("no command given; run `data-insight --help` for usage"),
    }
}

/// Overview, cleaning and quality for one file
pub fn run_inspect(args: InspectArgs) -> Result<()> {
    setup_logging(&args.common)?;
    info!("Inspecting {}", args.common.input.display());

    let outcome = run_session(&args.common, &KpiSelection::default())
        .with_context(|| format!("Failed to inspect {}", args.common.input.display()))?;

    print_report(&args.common, &outcome.report, ReportScope::Inspect)
}

/// Full analysis for one file, optionally exporting the cleaned dataset
pub fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    setup_logging(&args.common)?;
    info!("Analyzing {}", args.common.input.display());

    let selection = KpiSelection::new(args.date_column.clone(), args.kpi_column.clone());
    let outcome = run_session(&args.common, &selection)
        .with_context(|| format!("Failed to analyze {}", args.common.input.display()))?;

    print_report(&args.common, &outcome.report, ReportScope::Full)?;

    if let Some(path) = &args.export {
        ingest::write_csv(&outcome.dataset, path)
            .with_context(|| format!("Failed to export cleaned data to {}", path.display()))?;

        if !args.common.quiet && args.common.format == OutputFormat::Text {
            println!(
                "\n📁 Cleaned data written to {}",
                path.display().to_string().bright_cyan()
            );
        }
    }

    Ok(())
}

fn print_report(args: &CommonArgs, report: &AnalysisReport, scope: ReportScope) -> Result<()> {
    match args.format {
        OutputFormat::Text => print!("{}", render_text(report, scope)),
        OutputFormat::Json => {
            let json = render_json(report).context("Failed to serialize report")?;
            println!("{}", json);
        }
    }
    Ok(())
}
