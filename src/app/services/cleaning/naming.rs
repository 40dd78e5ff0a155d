//! Column label normalization
//!
//! Labels are trimmed, lower-cased, stripped of non-word characters and
//! have whitespace runs collapsed to a single underscore. Labels that
//! collide after normalization keep the first occurrence bare and get a
//! numeric suffix (`_2`, `_3`, ...) in column order.

use super::stage::{CleaningStage, StageOutput};
use crate::models::{CleaningLog, Column, Dataset};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid non-word pattern"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Normalize a single label without any collision handling
pub fn normalize_label(label: &str) -> String {
    let lowered = label.trim().to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");
    WHITESPACE_RUN.replace_all(&stripped, "_").into_owned()
}

/// Normalize a full label list, resolving empty labels and collisions
pub fn normalize_labels(labels: &[&str]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut result = Vec::with_capacity(labels.len());

    for (index, label) in labels.iter().enumerate() {
        let mut base = normalize_label(label);
        if base.is_empty() {
            base = format!("column_{}", index + 1);
        }

        let mut candidate = base.clone();
        let mut suffix = 2;
        while taken.contains(&candidate) {
            candidate = format!("{}_{}", base, suffix);
            suffix += 1;
        }

        taken.insert(candidate.clone());
        result.push(candidate);
    }

    result
}

/// Rename every column to its normalized label
///
/// Appends a single summary entry when any label changed, plus one entry
/// per label that needed a collision suffix.
pub fn normalize_column_names(dataset: Dataset) -> StageOutput {
    let mut log = CleaningLog::new();
    let original: Vec<String> = dataset.column_names().into_iter().map(String::from).collect();
    let labels: Vec<&str> = original.iter().map(String::as_str).collect();
    let normalized = normalize_labels(&labels);

    if normalized == original {
        return StageOutput::unchanged(dataset);
    }

    log.push("Column names normalized (lowercase, underscores, symbols removed)");

    for (old, new) in original.iter().zip(&normalized) {
        let plain = normalize_label(old);
        if !plain.is_empty() && plain != *new {
            log.push(format!(
                "Column '{}' renamed to '{}' to avoid a duplicate name",
                old, new
            ));
        }
    }

    let affected = original
        .iter()
        .zip(&normalized)
        .filter(|(old, new)| old != new)
        .count();
    debug!("Normalized {} of {} column labels", affected, normalized.len());

    let columns = dataset
        .into_columns()
        .into_iter()
        .zip(normalized)
        .map(|(column, name)| Column::new(name, column.values))
        .collect();

    // Renaming never changes column lengths
    StageOutput {
        dataset: Dataset::from_columns_unchecked(columns),
        log,
        affected,
    }
}

/// Pipeline stage wrapper for [`normalize_column_names`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnNormalizer;

impl CleaningStage for ColumnNormalizer {
    fn name(&self) -> &'static str {
        "normalize_names"
    }

    fn apply(&self, dataset: Dataset) -> StageOutput {
        normalize_column_names(dataset)
    }
}
