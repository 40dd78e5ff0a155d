//! IQR-based outlier detection for numeric columns
//!
//! Columns with fewer than the configured minimum of present values, or a
//! zero interquartile range, are skipped rather than reported.

use crate::app::services::stats;
use crate::config::QualityConfig;
use crate::error::Result;
use crate::models::{ColumnRole, Dataset};
use serde::Serialize;
use tracing::debug;

/// Tukey fence summary for one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierRecord {
    pub column: String,
    /// Present values inspected
    pub sample_size: usize,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    pub outlier_count: usize,
    /// Outliers as a percentage of `sample_size`
    pub outlier_pct: f64,
}

impl OutlierRecord {
    /// Outliers as a fraction of `sample_size`
    pub fn outlier_rate(&self) -> f64 {
        self.outlier_pct / 100.0
    }

    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower_fence || value > self.upper_fence
    }
}

/// Fence one column's present values; `None` when the column is too small or constant
pub fn detect_column(
    column: &str,
    values: &[f64],
    config: &QualityConfig,
) -> Result<Option<OutlierRecord>> {
    if values.len() < config.outlier_min_samples {
        debug!(
            "Column '{}' has {} values, below the outlier minimum of {}",
            column,
            values.len(),
            config.outlier_min_samples
        );
        return Ok(None);
    }

    let Some((q1, q3)) = stats::quartiles(values)? else {
        return Ok(None);
    };

    let iqr = q3 - q1;
    if iqr == 0.0 {
        debug!("Column '{}' has zero IQR, skipping outlier check", column);
        return Ok(None);
    }

    let lower_fence = q1 - config.iqr_multiplier * iqr;
    let upper_fence = q3 + config.iqr_multiplier * iqr;
    let outlier_count = values
        .iter()
        .filter(|&&v| v < lower_fence || v > upper_fence)
        .count();

    Ok(Some(OutlierRecord {
        column: column.to_string(),
        sample_size: values.len(),
        q1,
        q3,
        iqr,
        lower_fence,
        upper_fence,
        outlier_count,
        outlier_pct: outlier_count as f64 / values.len() as f64 * 100.0,
    }))
}

/// Fence every numeric column of the dataset, in column order
pub fn detect_outliers(dataset: &Dataset, config: &QualityConfig) -> Result<Vec<OutlierRecord>> {
    let mut records = Vec::new();

    for column in dataset.columns() {
        if column.role() != ColumnRole::Numeric {
            continue;
        }
        if let Some(record) = detect_column(&column.name, &column.values.numbers(), config)? {
            records.push(record);
        }
    }

    debug!(
        "Outlier detection produced {} record(s) across {} numeric column(s)",
        records.len(),
        dataset.columns_with_role(ColumnRole::Numeric).len()
    );

    Ok(records)
}

/// Records whose outlier rate exceeds `threshold`
pub fn high_outlier_columns(records: &[OutlierRecord], threshold: f64) -> Vec<&OutlierRecord> {
    records
        .iter()
        .filter(|r| r.outlier_rate() > threshold)
        .collect()
}
