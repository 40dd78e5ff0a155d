//! Cleaning statistics and result structures
//!
//! Tracks what each stage of the cleaning pipeline changed so the host can
//! show before/after row counts alongside the cleaning log.

use crate::models::{CleaningLog, Dataset};
use serde::Serialize;

/// Statistics for one cleaning pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleaningStats {
    /// Rows in the dataset handed to the pipeline
    pub input_rows: usize,
    /// Rows after deduplication
    pub output_rows: usize,
    /// Column labels changed by normalization
    pub columns_renamed: usize,
    /// Text columns converted to datetime or numeric
    pub columns_coerced: usize,
    /// Missing cells filled by imputation
    pub cells_imputed: usize,
    /// Exact duplicate rows dropped
    pub duplicates_removed: usize,
}

impl CleaningStats {
    pub fn new(input_rows: usize) -> Self {
        Self {
            input_rows,
            output_rows: input_rows,
            ..Self::default()
        }
    }

    /// Record the `affected` count reported by a named stage
    pub fn record(&mut self, stage: &str, affected: usize) {
        match stage {
            "normalize_names" => self.columns_renamed += affected,
            "coerce_types" => self.columns_coerced += affected,
            "impute_missing" => self.cells_imputed += affected,
            "drop_duplicates" => self.duplicates_removed += affected,
            _ => {}
        }
    }

    /// Percentage of input rows that survived cleaning
    pub fn retention_rate(&self) -> f64 {
        if self.input_rows == 0 {
            100.0
        } else {
            (self.output_rows as f64 / self.input_rows as f64) * 100.0
        }
    }

    /// True when the pipeline changed nothing
    pub fn is_noop(&self) -> bool {
        self.columns_renamed == 0
            && self.columns_coerced == 0
            && self.cells_imputed == 0
            && self.duplicates_removed == 0
    }

    pub fn summary(&self) -> String {
        format!(
            "Cleaning Summary: {} -> {} rows ({:.1}% retained) | \
             Renamed: {} | Coerced: {} | Imputed cells: {} | Duplicates: {}",
            self.input_rows,
            self.output_rows,
            self.retention_rate(),
            self.columns_renamed,
            self.columns_coerced,
            self.cells_imputed,
            self.duplicates_removed
        )
    }
}

/// Output of a full cleaning pipeline run
#[derive(Debug, Clone)]
pub struct CleaningResult {
    pub dataset: Dataset,
    pub log: CleaningLog,
    pub stats: CleaningStats,
}

impl CleaningResult {
    pub fn summary(&self) -> String {
        self.stats.summary()
    }
}
