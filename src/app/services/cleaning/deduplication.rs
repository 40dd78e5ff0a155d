//! Exact duplicate row removal
//!
//! Two rows are duplicates when every cell is equal, with missing equal to
//! missing. The first occurrence is kept and row order is preserved.

use super::stage::{CleaningStage, StageOutput};
use crate::models::{CellKey, CleaningLog, Column, Dataset};
use std::collections::HashSet;
use tracing::debug;

/// Indices of the rows to keep, in order
pub fn unique_row_indices(dataset: &Dataset) -> Vec<usize> {
    let columns = dataset.columns();
    let mut seen: HashSet<Vec<CellKey<'_>>> = HashSet::with_capacity(dataset.height());
    let mut keep = Vec::with_capacity(dataset.height());

    for row in 0..dataset.height() {
        let key: Vec<CellKey<'_>> = columns.iter().map(|c| c.values.cell(row).key()).collect();
        if seen.insert(key) {
            keep.push(row);
        }
    }

    keep
}

/// Drop exact duplicate rows; `affected` is the number of rows removed
pub fn drop_duplicate_rows(dataset: Dataset) -> StageOutput {
    let keep = unique_row_indices(&dataset);
    let removed = dataset.height() - keep.len();

    if removed == 0 {
        return StageOutput::unchanged(dataset);
    }

    debug!(
        "Deduplication kept {} of {} rows",
        keep.len(),
        dataset.height()
    );

    let columns = dataset
        .columns()
        .iter()
        .map(|c| Column::new(c.name.clone(), c.values.select_rows(&keep)))
        .collect();

    let mut log = CleaningLog::new();
    log.push(format!("{} duplicate rows removed", removed));

    StageOutput {
        dataset: Dataset::from_columns_unchecked(columns),
        log,
        affected: removed,
    }
}

/// Pipeline stage wrapper for [`drop_duplicate_rows`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Deduplicator;

impl CleaningStage for Deduplicator {
    fn name(&self) -> &'static str {
        "drop_duplicates"
    }

    fn apply(&self, dataset: Dataset) -> StageOutput {
        drop_duplicate_rows(dataset)
    }
}
