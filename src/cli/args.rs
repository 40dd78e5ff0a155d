//! Command-line argument definitions for data insight
//!
//! This module defines the CLI interface using the clap derive API. The
//! two subcommands play the role of the dashboard host: `inspect` shows the
//! overview, cleaning log and quality report; `analyze` adds the KPI trend,
//! health and risk narratives and can export the cleaned dataset.

use crate::config::ScoringVariant;
use crate::constants::DEFAULT_EXPORT_FILENAME;
use crate::error::{InsightError, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the data insight tool
#[derive(Debug, Clone, Parser)]
#[command(
    name = "data-insight",
    version,
    about = "Clean a CSV/Excel business file, score its readiness and explain its KPI trend",
    long_about = "Reads a CSV or Excel file, normalizes column names, coerces dates and \
                  financial numbers, fills missing values and drops duplicate rows. The cleaned \
                  data is scored for analytical readiness, and a selected KPI is aggregated by \
                  month into growth, volatility, health and risk narratives."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Show the overview, cleaning log and quality report of a file
    Inspect(InspectArgs),
    /// Run the full analysis, including KPI trend and health
    Analyze(AnalyzeArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, ClapArgs)]
pub struct CommonArgs {
    /// Input file (.csv, .xlsx, .xls, .xlsm, .ods)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Configuration file (TOML)
    ///
    /// If not specified, `<config dir>/data-insight/config.toml` is used when present.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Readiness scoring variant
    ///
    /// `a` penalizes missing and low-variance columns only. `b` also
    /// penalizes numeric columns with many outliers.
    #[arg(long = "variant", value_name = "VARIANT")]
    pub variant: Option<VariantArg>,

    /// Output format for results
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "text",
        help = "Output format for results"
    )]
    pub format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress progress output and log only errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl CommonArgs {
    /// Check the input path before any work is done
    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(InsightError::file_read(
                self.input.display().to_string(),
                "file does not exist",
            ));
        }
        if !self.input.is_file() {
            return Err(InsightError::file_read(
                self.input.display().to_string(),
                "path is not a file",
            ));
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Spinners are shown for text output only, and never in quiet mode
    pub fn show_progress(&self) -> bool {
        !self.quiet && matches!(self.format, OutputFormat::Text)
    }
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the analyze command
#[derive(Debug, Clone, Parser)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Date column used for the monthly trend (after name normalization)
    ///
    /// Defaults to the first column detected as a date.
    #[arg(short = 'd', long = "date-column", value_name = "COLUMN")]
    pub date_column: Option<String>,

    /// KPI column aggregated per month (after name normalization)
    ///
    /// Defaults to the first numeric column.
    #[arg(short = 'k', long = "kpi-column", value_name = "COLUMN")]
    pub kpi_column: Option<String>,

    /// Write the cleaned dataset as CSV
    ///
    /// Passing the flag without a path writes `clean_financial_data.csv`.
    #[arg(
        short = 'e',
        long = "export",
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = DEFAULT_EXPORT_FILENAME
    )]
    pub export: Option<PathBuf>,
}

/// Scoring variant as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    /// Missing and low-variance penalties, floor 60
    A,
    /// Adds the high-outlier penalty, floor 55
    B,
}

impl From<VariantArg> for ScoringVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::A => ScoringVariant::Standard,
            VariantArg::B => ScoringVariant::OutlierAware,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable coloured report
    Text,
    /// JSON report for scripting
    Json,
}

impl Commands {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Inspect(args) => &args.common,
            Commands::Analyze(args) => &args.common,
        }
    }
}
