//! Per-column quality records and the aggregate readiness score
//!
//! Status is a pure function of a column's missing rate, unique ratio and
//! role. The readiness score starts at 100 and loses a fixed number of
//! points per flagged column, floored according to the scoring variant.

use super::outliers::{OutlierRecord, high_outlier_columns};
use crate::config::{AnalysisConfig, QualityConfig, ScoringVariant};
use crate::constants::{
    HIGH_MISSING_PENALTY, HIGH_OUTLIER_PENALTY, LOW_VARIANCE_PENALTY, READINESS_PARTIAL_MIN,
    READINESS_READY_MIN, READINESS_START, READINESS_SUMMARY_LIMIT, messages,
};
use crate::models::{Column, ColumnRole, Dataset};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Quality status of a single column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityStatus {
    Safe,
    HighMissing,
    LowVariance,
}

impl QualityStatus {
    /// Dashboard label
    pub fn label(&self) -> &'static str {
        match self {
            QualityStatus::Safe => "Aman",
            QualityStatus::HighMissing => "Missing Tinggi",
            QualityStatus::LowVariance => "Variasi Rendah",
        }
    }
}

impl fmt::Display for QualityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Quality metrics for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityRecord {
    pub column: String,
    pub role: ColumnRole,
    /// Missing cells over total rows, in [0, 1]
    pub missing_rate: f64,
    /// Distinct present values over total rows, in [0, 1]
    pub unique_ratio: f64,
    pub status: QualityStatus,
}

/// First matching rule wins: high missing, then low-variance categorical, else safe
pub fn classify(
    missing_rate: f64,
    unique_ratio: f64,
    role: ColumnRole,
    config: &QualityConfig,
) -> QualityStatus {
    if missing_rate > config.high_missing_rate {
        QualityStatus::HighMissing
    } else if role == ColumnRole::Categorical && unique_ratio < config.low_variance_ratio {
        QualityStatus::LowVariance
    } else {
        QualityStatus::Safe
    }
}

/// Build the quality record for one column of a dataset with `total_rows` rows
pub fn assess_column(column: &Column, total_rows: usize, config: &QualityConfig) -> QualityRecord {
    let (missing_rate, unique_ratio) = if total_rows == 0 {
        (0.0, 0.0)
    } else {
        let total = total_rows as f64;
        (
            column.values.missing_count() as f64 / total,
            column.values.distinct_count() as f64 / total,
        )
    };
    let role = column.role();

    QualityRecord {
        column: column.name.clone(),
        role,
        missing_rate,
        unique_ratio,
        status: classify(missing_rate, unique_ratio, role, config),
    }
}

/// Band of the readiness score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessVerdict {
    Ready,
    PartiallyReady,
    NotReady,
}

impl ReadinessVerdict {
    pub fn from_score(score: i32) -> Self {
        if score >= READINESS_READY_MIN {
            ReadinessVerdict::Ready
        } else if score >= READINESS_PARTIAL_MIN {
            ReadinessVerdict::PartiallyReady
        } else {
            ReadinessVerdict::NotReady
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ReadinessVerdict::Ready => messages::READINESS_READY,
            ReadinessVerdict::PartiallyReady => messages::READINESS_PARTIAL,
            ReadinessVerdict::NotReady => messages::READINESS_NOT_READY,
        }
    }
}

/// Aggregated quality view of a cleaned dataset
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub records: Vec<QualityRecord>,
    pub high_missing_columns: usize,
    pub low_variance_columns: usize,
    /// Numeric columns above the outlier rate threshold; only penalized by the outlier-aware variant
    pub high_outlier_columns: usize,
    pub variant: ScoringVariant,
    pub readiness_score: i32,
    pub verdict: ReadinessVerdict,
    /// At most three narrative lines explaining the score
    pub summary: Vec<String>,
}

/// Scores a cleaned dataset according to the configured variant
#[derive(Debug, Clone)]
pub struct QualityAssessor {
    config: QualityConfig,
    variant: ScoringVariant,
}

impl QualityAssessor {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            config: config.quality.clone(),
            variant: config.variant,
        }
    }

    /// One record per column, in column order
    pub fn assess_columns(&self, dataset: &Dataset) -> Vec<QualityRecord> {
        let total_rows = dataset.height();
        dataset
            .columns()
            .iter()
            .map(|column| assess_column(column, total_rows, &self.config))
            .collect()
    }

    /// Readiness from flagged-column counts, floored by the variant
    pub fn score(&self, high_missing: usize, low_variance: usize, high_outliers: usize) -> i32 {
        let mut penalty = HIGH_MISSING_PENALTY
            .saturating_mul(count_as_i32(high_missing))
            .saturating_add(LOW_VARIANCE_PENALTY.saturating_mul(count_as_i32(low_variance)));

        if self.variant.penalizes_outliers() {
            penalty = penalty
                .saturating_add(HIGH_OUTLIER_PENALTY.saturating_mul(count_as_i32(high_outliers)));
        }

        READINESS_START
            .saturating_sub(penalty)
            .max(self.variant.floor())
    }

    /// Narrative lines for the score, capped at three
    pub fn summary(&self, high_missing: usize, low_variance: usize, high_outliers: usize) -> Vec<String> {
        let mut lines = Vec::new();

        if high_missing > 0 {
            lines.push(messages::SUMMARY_HIGH_MISSING.to_string());
        }
        if low_variance > 0 {
            lines.push(messages::SUMMARY_LOW_VARIANCE.to_string());
        }
        if self.variant.penalizes_outliers() && high_outliers > 0 {
            lines.push(messages::SUMMARY_HIGH_OUTLIERS.to_string());
        }
        if lines.is_empty() {
            lines.push(messages::SUMMARY_ADEQUATE.to_string());
        }

        lines.truncate(READINESS_SUMMARY_LIMIT);
        lines
    }

    /// Full quality report; `outliers` comes from the outlier detector
    pub fn assess(&self, dataset: &Dataset, outliers: &[OutlierRecord]) -> QualityReport {
        let records = self.assess_columns(dataset);
        let high_missing = count_status(&records, QualityStatus::HighMissing);
        let low_variance = count_status(&records, QualityStatus::LowVariance);
        let high_outliers = high_outlier_columns(outliers, self.config.high_outlier_rate).len();

        let readiness_score = self.score(high_missing, low_variance, high_outliers);
        debug!(
            "Readiness {} ({:?}): {} high-missing, {} low-variance, {} high-outlier",
            readiness_score, self.variant, high_missing, low_variance, high_outliers
        );

        QualityReport {
            summary: self.summary(high_missing, low_variance, high_outliers),
            records,
            high_missing_columns: high_missing,
            low_variance_columns: low_variance,
            high_outlier_columns: high_outliers,
            variant: self.variant,
            readiness_score,
            verdict: ReadinessVerdict::from_score(readiness_score),
        }
    }
}

fn count_status(records: &[QualityRecord], status: QualityStatus) -> usize {
    records.iter().filter(|r| r.status == status).count()
}

fn count_as_i32(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}
