//! Monthly KPI trend aggregation
//!
//! Rows missing either the date or the KPI value are dropped, the rest are
//! bucketed by calendar month start and summed per bucket.

use crate::constants::MIN_TREND_BUCKETS;
use crate::error::{InsightError, Result};
use crate::models::{ColumnRole, ColumnValues, Dataset};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// `(to - from) / |from| * 100`, or 0 when `from` is exactly 0
pub fn percent_change(from: f64, to: f64) -> f64 {
    if from == 0.0 {
        0.0
    } else {
        (to - from) / from.abs() * 100.0
    }
}

/// First day of the timestamp's calendar month
pub fn month_start(timestamp: NaiveDateTime) -> NaiveDate {
    timestamp.date().with_day(1).unwrap_or(timestamp.date())
}

/// One monthly bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub period: NaiveDate,
    pub value: f64,
}

/// Headline figures of a trend series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendSummary {
    pub total: f64,
    /// Mean value per bucket
    pub mean: f64,
    pub last: f64,
    pub previous: f64,
    /// Percent change from the previous bucket to the last one
    pub change_pct: f64,
}

/// Strictly increasing monthly buckets of one KPI; always at least two
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    date_column: String,
    kpi_column: String,
    points: Vec<TrendPoint>,
}

impl TrendSeries {
    /// Wrap pre-bucketed points, checking ordering and minimum length
    pub fn from_points(
        date_column: impl Into<String>,
        kpi_column: impl Into<String>,
        points: Vec<TrendPoint>,
    ) -> Result<Self> {
        if points.len() < MIN_TREND_BUCKETS {
            return Err(InsightError::insufficient_data(format!(
                "trend needs at least {} monthly periods, found {}",
                MIN_TREND_BUCKETS,
                points.len()
            )));
        }

        if let Some(pair) = points.windows(2).find(|w| w[0].period >= w[1].period) {
            return Err(InsightError::InvalidSeries {
                reason: format!(
                    "periods must be strictly increasing ({} then {})",
                    pair[0].period, pair[1].period
                ),
            });
        }

        Ok(Self {
            date_column: date_column.into(),
            kpi_column: kpi_column.into(),
            points,
        })
    }

    pub fn date_column(&self) -> &str {
        &self.date_column
    }

    pub fn kpi_column(&self) -> &str {
        &self.kpi_column
    }

    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    // Construction guarantees at least two points
    fn first_value(&self) -> f64 {
        self.points.first().map_or(0.0, |p| p.value)
    }

    fn last_value(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.value)
    }

    /// Percent change between consecutive buckets, one fewer than the bucket count
    pub fn period_changes(&self) -> Vec<f64> {
        self.points
            .windows(2)
            .map(|w| percent_change(w[0].value, w[1].value))
            .collect()
    }

    /// Percent change from the first bucket to the last
    pub fn growth_pct(&self) -> f64 {
        percent_change(self.first_value(), self.last_value())
    }

    pub fn summary(&self) -> TrendSummary {
        let total: f64 = self.points.iter().map(|p| p.value).sum();
        let last = self.last_value();
        let previous = self
            .points
            .iter()
            .rev()
            .nth(1)
            .map_or(0.0, |p| p.value);

        TrendSummary {
            total,
            mean: total / self.points.len() as f64,
            last,
            previous,
            change_pct: percent_change(previous, last),
        }
    }
}

/// Bucket `kpi_column` by the calendar month of `date_column`
///
/// Fails with `ColumnNotFound` for an unknown column, `ColumnTypeMismatch`
/// when the columns are not date and numeric, and `InsufficientData` when
/// fewer than two monthly buckets remain.
pub fn build_trend(dataset: &Dataset, date_column: &str, kpi_column: &str) -> Result<TrendSeries> {
    let dates = match &dataset.require_column(date_column)?.values {
        ColumnValues::Timestamp(v) => v,
        other => return Err(type_mismatch(date_column, ColumnRole::Date, other.role())),
    };
    let values = match &dataset.require_column(kpi_column)?.values {
        ColumnValues::Number(v) => v,
        other => return Err(type_mismatch(kpi_column, ColumnRole::Numeric, other.role())),
    };

    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut used_rows = 0;
    for (date, value) in dates.iter().zip(values) {
        if let (Some(date), Some(value)) = (date, value) {
            *buckets.entry(month_start(*date)).or_default() += value;
            used_rows += 1;
        }
    }

    debug!(
        "Trend of '{}' by '{}': {} rows into {} monthly bucket(s)",
        kpi_column,
        date_column,
        used_rows,
        buckets.len()
    );

    let points = buckets
        .into_iter()
        .map(|(period, value)| TrendPoint { period, value })
        .collect();

    TrendSeries::from_points(date_column, kpi_column, points)
}

fn type_mismatch(column: &str, expected: ColumnRole, actual: ColumnRole) -> InsightError {
    InsightError::ColumnTypeMismatch {
        column: column.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}
