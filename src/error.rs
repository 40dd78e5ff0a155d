//! Error handling for ingestion, cleaning and KPI analysis.
//!
//! Provides error types with enough context for the host to show the raw
//! failure text, plus the non-fatal kinds that only halt a dependent step.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// The file could not be decoded even after the encoding fallback
    #[error("Failed to read file '{file}': {message}")]
    FileRead { file: String, message: String },

    #[error("Unsupported file format for '{file}': .{extension}")]
    UnsupportedFormat { file: String, extension: String },

    #[error("Spreadsheet error in '{file}': {message}")]
    Spreadsheet { file: String, message: String },

    /// Not enough data for a trend-dependent step; never fatal to the session
    #[error("Insufficient data: {reason}")]
    InsufficientData { reason: String },

    #[error("Invalid trend series: {reason}")]
    InvalidSeries { reason: String },

    #[error("Column not found: {column}")]
    ColumnNotFound { column: String },

    #[error("Column '{column}' has role {actual}, expected {expected}")]
    ColumnTypeMismatch {
        column: String,
        expected: String,
        actual: String,
    },

    #[error("Column '{column}' has {actual} rows, dataset has {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Export failed for {path}: {reason}")]
    Export { path: PathBuf, reason: String },
}

impl InsightError {
    pub fn file_read(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileRead {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn unsupported_format(file: impl Into<String>, extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            file: file.into(),
            extension: extension.into(),
        }
    }

    pub fn spreadsheet(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Spreadsheet {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn insufficient_data(reason: impl Into<String>) -> Self {
        Self::InsufficientData {
            reason: reason.into(),
        }
    }

    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for the kinds the host should show as a warning rather than an error
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::InsufficientData { .. }
                | Self::ColumnNotFound { .. }
                | Self::ColumnTypeMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, InsightError>;
