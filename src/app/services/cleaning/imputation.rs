//! Missing-value imputation
//!
//! Numeric columns are filled with the median of their present values,
//! text columns with their most frequent value (or a placeholder when
//! nothing is present) and timestamp columns with their most frequent
//! timestamp. Numeric and timestamp columns with no present value at all
//! are left untouched.

use super::stage::{CleaningStage, StageOutput};
use crate::app::services::stats;
use crate::models::{CleaningLog, Column, ColumnValues, Dataset};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use tracing::debug;

/// Most frequent present string; ties go to the lexicographically smallest
pub fn text_mode(cells: &[Option<String>]) -> Option<&str> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in cells.iter().flatten() {
        *counts.entry(value.as_str()).or_default() += 1;
    }
    mode_of(counts)
}

/// Most frequent present timestamp; ties go to the earliest
pub fn timestamp_mode(cells: &[Option<NaiveDateTime>]) -> Option<NaiveDateTime> {
    let mut counts: BTreeMap<NaiveDateTime, usize> = BTreeMap::new();
    for value in cells.iter().flatten() {
        *counts.entry(*value).or_default() += 1;
    }
    mode_of(counts)
}

// BTreeMap iterates in ascending key order, so the first strict maximum wins ties
fn mode_of<K: Ord>(counts: BTreeMap<K, usize>) -> Option<K> {
    let mut best: Option<(K, usize)> = None;
    for (key, count) in counts {
        match &best {
            Some((_, best_count)) if *best_count >= count => {}
            _ => best = Some((key, count)),
        }
    }
    best.map(|(key, _)| key)
}

/// Fills missing cells column by column
#[derive(Debug, Clone)]
pub struct MissingValueImputer {
    placeholder: String,
}

impl MissingValueImputer {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    fn impute_column(&self, column: Column, log: &mut CleaningLog) -> (Column, usize) {
        let missing = column.values.missing_count();
        if missing == 0 {
            return (column, 0);
        }

        let name = column.name;
        match column.values {
            ColumnValues::Number(cells) => {
                let present: Vec<f64> = cells.iter().flatten().copied().collect();
                let Some(median) = stats::median(&present) else {
                    debug!("Column '{}' has no numeric values, skipping imputation", name);
                    return (Column::new(name, ColumnValues::Number(cells)), 0);
                };
                log.push(format!(
                    "Column '{}' (numeric): {} missing → median ({})",
                    name, missing, median
                ));
                let filled = cells.into_iter().map(|c| c.or(Some(median))).collect();
                (Column::new(name, ColumnValues::Number(filled)), missing)
            }
            ColumnValues::Text(cells) => {
                let fill = text_mode(&cells)
                    .unwrap_or(self.placeholder.as_str())
                    .to_string();
                log.push(format!(
                    "Column '{}' (categorical): {} missing → '{}'",
                    name, missing, fill
                ));
                let filled = cells
                    .into_iter()
                    .map(|c| c.or_else(|| Some(fill.clone())))
                    .collect();
                (Column::new(name, ColumnValues::Text(filled)), missing)
            }
            ColumnValues::Timestamp(cells) => {
                let Some(mode) = timestamp_mode(&cells) else {
                    debug!("Column '{}' has no timestamps, skipping imputation", name);
                    return (Column::new(name, ColumnValues::Timestamp(cells)), 0);
                };
                log.push(format!(
                    "Column '{}' (datetime): {} missing → '{}'",
                    name,
                    missing,
                    mode.format("%Y-%m-%d %H:%M:%S")
                ));
                let filled = cells.into_iter().map(|c| c.or(Some(mode))).collect();
                (Column::new(name, ColumnValues::Timestamp(filled)), missing)
            }
        }
    }

    /// Impute every column; `affected` is the number of cells filled
    pub fn impute(&self, dataset: Dataset) -> StageOutput {
        let mut log = CleaningLog::new();
        let mut affected = 0;

        let columns = dataset
            .into_columns()
            .into_iter()
            .map(|column| {
                let (column, filled) = self.impute_column(column, &mut log);
                affected += filled;
                column
            })
            .collect();

        debug!("Imputed {} missing cells", affected);

        StageOutput {
            dataset: Dataset::from_columns_unchecked(columns),
            log,
            affected,
        }
    }
}

impl Default for MissingValueImputer {
    fn default() -> Self {
        Self::new(crate::constants::MISSING_PLACEHOLDER)
    }
}

impl CleaningStage for MissingValueImputer {
    fn name(&self) -> &'static str {
        "impute_missing"
    }

    fn apply(&self, dataset: Dataset) -> StageOutput {
        self.impute(dataset)
    }
}
