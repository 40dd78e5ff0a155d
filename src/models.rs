//! Core data structures for cleaning and analysis.
//!
//! Defines the in-memory dataset (typed columns with a missing marker),
//! derived column roles, and the cleaning log produced by each pipeline run.

use crate::error::{InsightError, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Semantic role of a column, derived from its storage type on every pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Date,
    Numeric,
    Categorical,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnRole::Date => "date",
            ColumnRole::Numeric => "numeric",
            ColumnRole::Categorical => "categorical",
        };
        f.write_str(name)
    }
}

/// Typed cell storage for one column; `None` marks a missing cell
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Text(Vec<Option<String>>),
    Number(Vec<Option<f64>>),
    Timestamp(Vec<Option<NaiveDateTime>>),
}

/// Borrowed view of a single cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Missing,
    Text(&'a str),
    Number(f64),
    Timestamp(NaiveDateTime),
}

/// Hashable identity of a cell; numbers compare by bit pattern with -0.0 folded into 0.0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum CellKey<'a> {
    Missing,
    Text(&'a str),
    Number(u64),
    Timestamp(NaiveDateTime),
}

impl<'a> Cell<'a> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub(crate) fn key(self) -> CellKey<'a> {
        match self {
            Cell::Missing => CellKey::Missing,
            Cell::Text(s) => CellKey::Text(s),
            Cell::Number(v) if v == 0.0 => CellKey::Number(0.0f64.to_bits()),
            Cell::Number(v) => CellKey::Number(v.to_bits()),
            Cell::Timestamp(ts) => CellKey::Timestamp(ts),
        }
    }
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(v) => write!(f, "{}", v),
            Cell::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Text(v) => v.len(),
            ColumnValues::Number(v) => v.len(),
            ColumnValues::Timestamp(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn role(&self) -> ColumnRole {
        match self {
            ColumnValues::Text(_) => ColumnRole::Categorical,
            ColumnValues::Number(_) => ColumnRole::Numeric,
            ColumnValues::Timestamp(_) => ColumnRole::Date,
        }
    }

    /// Cell at `row`, or `Cell::Missing` when out of range
    pub fn cell(&self, row: usize) -> Cell<'_> {
        match self {
            ColumnValues::Text(v) => v
                .get(row)
                .and_then(|c| c.as_deref())
                .map_or(Cell::Missing, Cell::Text),
            ColumnValues::Number(v) => v
                .get(row)
                .copied()
                .flatten()
                .map_or(Cell::Missing, Cell::Number),
            ColumnValues::Timestamp(v) => v
                .get(row)
                .copied()
                .flatten()
                .map_or(Cell::Missing, Cell::Timestamp),
        }
    }

    pub fn missing_count(&self) -> usize {
        match self {
            ColumnValues::Text(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnValues::Number(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnValues::Timestamp(v) => v.iter().filter(|c| c.is_none()).count(),
        }
    }

    pub fn present_count(&self) -> usize {
        self.len() - self.missing_count()
    }

    /// Number of distinct non-missing values
    pub fn distinct_count(&self) -> usize {
        (0..self.len())
            .map(|row| self.cell(row))
            .filter(|cell| !cell.is_missing())
            .map(|cell| cell.key())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Keep only the given rows, in the given order
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        match self {
            ColumnValues::Text(v) => {
                ColumnValues::Text(rows.iter().map(|&r| v[r].clone()).collect())
            }
            ColumnValues::Number(v) => ColumnValues::Number(rows.iter().map(|&r| v[r]).collect()),
            ColumnValues::Timestamp(v) => {
                ColumnValues::Timestamp(rows.iter().map(|&r| v[r]).collect())
            }
        }
    }

    /// Present numeric values, in row order; empty for non-numeric columns
    pub fn numbers(&self) -> Vec<f64> {
        match self {
            ColumnValues::Number(v) => v.iter().flatten().copied().collect(),
            _ => Vec::new(),
        }
    }
}

/// A named column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn text<S: Into<String>>(name: &str, cells: Vec<Option<S>>) -> Self {
        Self::new(
            name,
            ColumnValues::Text(cells.into_iter().map(|c| c.map(Into::into)).collect()),
        )
    }

    pub fn number(name: &str, cells: Vec<Option<f64>>) -> Self {
        Self::new(name, ColumnValues::Number(cells))
    }

    pub fn timestamp(name: &str, cells: Vec<Option<NaiveDateTime>>) -> Self {
        Self::new(name, ColumnValues::Timestamp(cells))
    }

    pub fn role(&self) -> ColumnRole {
        self.values.role()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ordered collection of equally long named columns
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Build a dataset, rejecting columns whose length differs from the first
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(InsightError::ColumnLength {
                    column: bad.name.clone(),
                    expected,
                    actual: bad.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Wrap columns already known to share one length (stage outputs)
    pub(crate) fn from_columns_unchecked(columns: Vec<Column>) -> Self {
        debug_assert!(columns.windows(2).all(|w| w[0].len() == w[1].len()));
        Self { columns }
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Look up a column or fail with `ColumnNotFound`
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| InsightError::column_not_found(name))
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Names of the columns currently holding the given role
    pub fn columns_with_role(&self, role: ColumnRole) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.role() == role)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Total missing cells across all columns
    pub fn total_missing(&self) -> usize {
        self.columns.iter().map(|c| c.values.missing_count()).sum()
    }
}

/// Append-only record of the transformations applied during one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningLog {
    entries: Vec<String>,
}

impl CleaningLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    /// Append all entries of a stage's log fragment
    pub fn append(&mut self, other: CleaningLog) {
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
