//! Semantic type inference for free-text columns
//!
//! Each text column is offered to an ordered chain of parsers (datetime,
//! then financial number). A parser reports the share of non-missing
//! values it could read; the first parser whose share clears its threshold
//! claims the column, and cells it could not read become missing. When no
//! parser qualifies the column stays text with normalized whitespace.

use super::stage::{CleaningStage, StageOutput};
use crate::config::CoercionConfig;
use crate::constants::{DATE_FORMATS, DATETIME_FORMATS};
use crate::models::{CleaningLog, Column, ColumnValues, Dataset};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Outcome of offering one column to one parser
#[derive(Debug, Clone)]
pub struct ParseAttempt {
    pub values: ColumnValues,
    /// Non-missing input values the parser could read
    pub parsed: usize,
    /// Non-missing input values offered
    pub present: usize,
}

impl ParseAttempt {
    /// Share of present values that parsed; 0 for an all-missing column
    pub fn success_ratio(&self) -> f64 {
        if self.present == 0 {
            0.0
        } else {
            self.parsed as f64 / self.present as f64
        }
    }
}

/// A typed parser in the coercion chain
pub trait ColumnParser {
    /// Name used in cleaning log entries, e.g. "datetime"
    fn kind(&self) -> &'static str;

    /// Minimum success ratio needed to claim a column
    fn threshold(&self) -> f64;

    fn attempt(&self, cells: &[Option<String>]) -> ParseAttempt;

    /// Log line written when this parser claims a column
    fn describe(&self, column: &str) -> String;
}

/// Parses timestamps in a range of common layouts
#[derive(Debug, Clone)]
pub struct DatetimeParser {
    pub threshold: f64,
}

impl ColumnParser for DatetimeParser {
    fn kind(&self) -> &'static str {
        "datetime"
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn attempt(&self, cells: &[Option<String>]) -> ParseAttempt {
        let mut parsed = 0;
        let mut present = 0;
        let values = cells
            .iter()
            .map(|cell| {
                let raw = cell.as_deref()?;
                present += 1;
                let value = parse_datetime(raw);
                if value.is_some() {
                    parsed += 1;
                }
                value
            })
            .collect();

        ParseAttempt {
            values: ColumnValues::Timestamp(values),
            parsed,
            present,
        }
    }

    fn describe(&self, column: &str) -> String {
        format!("Column '{}' converted to datetime", column)
    }
}

/// Parses currency-formatted amounts such as `$1,200.50` or `Rp 15000`
#[derive(Debug, Clone)]
pub struct FinancialNumberParser {
    pub threshold: f64,
}

impl ColumnParser for FinancialNumberParser {
    fn kind(&self) -> &'static str {
        "numeric"
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn attempt(&self, cells: &[Option<String>]) -> ParseAttempt {
        let mut parsed = 0;
        let mut present = 0;
        let values = cells
            .iter()
            .map(|cell| {
                let raw = cell.as_deref()?;
                present += 1;
                let value = parse_financial_number(raw);
                if value.is_some() {
                    parsed += 1;
                }
                value
            })
            .collect();

        ParseAttempt {
            values: ColumnValues::Number(values),
            parsed,
            present,
        }
    }

    fn describe(&self, column: &str) -> String {
        format!("Column '{}' normalized as numeric (financial)", column)
    }
}

/// Parse a timestamp, trying RFC 3339 then the configured layouts
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    // Year-month values such as "2024-03" or "2024/03"
    let month_only = value.replace('/', "-");
    let has_year_prefix = month_only
        .split('-')
        .next()
        .is_some_and(|year| year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()));
    if has_year_prefix && month_only.matches('-').count() == 1 {
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", month_only), "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Parse a financial amount
///
/// Everything except digits, the minus sign and the decimal point is dropped,
/// so currency symbols and thousands separators vanish. An empty or
/// lone-dash remainder is missing.
pub fn parse_financial_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '-' | '.'))
        .collect();

    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }

    cleaned.parse::<f64>().ok()
}

/// Trim and collapse internal whitespace; blank strings become missing
pub fn normalize_whitespace(cells: &[Option<String>]) -> Vec<Option<String>> {
    cells
        .iter()
        .map(|cell| {
            let value = cell.as_deref()?.trim();
            if value.is_empty() {
                None
            } else {
                Some(WHITESPACE_RUN.replace_all(value, " ").into_owned())
            }
        })
        .collect()
}

/// Ordered parser chain used by the type coercer
pub struct TypeCoercer {
    parsers: Vec<Box<dyn ColumnParser>>,
}

impl TypeCoercer {
    pub fn new(config: &CoercionConfig) -> Self {
        Self {
            parsers: vec![
                Box::new(DatetimeParser {
                    threshold: config.datetime_threshold,
                }),
                Box::new(FinancialNumberParser {
                    threshold: config.numeric_threshold,
                }),
            ],
        }
    }

    /// Build a coercer from an explicit chain, tried in order
    pub fn with_parsers(parsers: Vec<Box<dyn ColumnParser>>) -> Self {
        Self { parsers }
    }

    /// Resolve one text column; returns the new values and the claiming parser
    pub fn coerce_cells(
        &self,
        cells: &[Option<String>],
    ) -> (ColumnValues, Option<&dyn ColumnParser>) {
        let normalized = normalize_whitespace(cells);

        for parser in &self.parsers {
            let attempt = parser.attempt(&normalized);
            let ratio = attempt.success_ratio();
            debug!(
                "{} parser read {}/{} values ({:.1}%)",
                parser.kind(),
                attempt.parsed,
                attempt.present,
                ratio * 100.0
            );
            if attempt.present > 0 && ratio >= parser.threshold() {
                return (attempt.values, Some(parser.as_ref()));
            }
        }

        (ColumnValues::Text(normalized), None)
    }

    /// Coerce every text column of the dataset
    pub fn coerce(&self, dataset: Dataset) -> StageOutput {
        let mut log = CleaningLog::new();
        let mut affected = 0;

        let columns = dataset
            .into_columns()
            .into_iter()
            .map(|column| match column.values {
                ColumnValues::Text(cells) => {
                    let (values, parser) = self.coerce_cells(&cells);
                    if let Some(parser) = parser {
                        info!("Column '{}' coerced to {}", column.name, parser.kind());
                        log.push(parser.describe(&column.name));
                        affected += 1;
                    }
                    Column::new(column.name, values)
                }
                values => Column::new(column.name, values),
            })
            .collect();

        StageOutput {
            dataset: Dataset::from_columns_unchecked(columns),
            log,
            affected,
        }
    }
}

impl CleaningStage for TypeCoercer {
    fn name(&self) -> &'static str {
        "coerce_types"
    }

    fn apply(&self, dataset: Dataset) -> StageOutput {
        self.coerce(dataset)
    }
}
