//! Data Insight Library
//!
//! Cleaning, readiness scoring and KPI health narratives for tabular
//! business files (CSV and Excel).
//!
//! This library provides tools for:
//! - Parsing CSV (with a Latin-1 fallback) and spreadsheet uploads into typed datasets
//! - Normalizing column names, coercing dates and financial numbers
//! - Imputing missing values and dropping duplicate rows, with a cleaning log
//! - Scoring per-column quality and overall analytical readiness
//! - Fencing numeric outliers with the interquartile range
//! - Aggregating a KPI by month into growth, volatility, health and risk narratives

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Core application modules
pub mod app {
    pub mod services {
        pub mod analysis;
        pub mod cleaning;
        pub mod ingest;
        pub mod insight;
        pub mod quality;
        pub mod stats;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::services::analysis::{AnalysisReport, Analyzer, KpiSelection};
pub use config::{AnalysisConfig, ScoringVariant};
pub use error::{InsightError, Result};
pub use models::{Column, ColumnRole, ColumnValues, Dataset};
