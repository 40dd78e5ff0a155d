//! Tests for missing-value imputation

use super::*;
use crate::app::services::cleaning::imputation::{
    MissingValueImputer, text_mode, timestamp_mode,
};

#[test]
fn test_numeric_column_filled_with_median() {
    let dataset = Dataset::new(vec![Column::number(
        "revenue",
        vec![Some(1200.0), Some(1500.0), None, Some(2000.0)],
    )])
    .unwrap();

    let output = MissingValueImputer::default().impute(dataset);

    assert_eq!(
        numbers_of(&output.dataset, "revenue"),
        vec![Some(1200.0), Some(1500.0), Some(1500.0), Some(2000.0)]
    );
    assert_eq!(output.affected, 1);
    assert_eq!(
        output.log.entries(),
        &["Column 'revenue' (numeric): 1 missing → median (1500)".to_string()]
    );
}

#[test]
fn test_text_column_filled_with_mode() {
    let dataset = text_dataset("region", vec![Some("north"), None, Some("south"), Some("north")]);

    let output = MissingValueImputer::default().impute(dataset);

    assert_eq!(
        texts_of(&output.dataset, "region")[1],
        Some("north".to_string())
    );
    assert!(output.log.entries()[0].contains("'north'"));
}

#[test]
fn test_text_mode_tie_takes_smallest() {
    let cells = vec![
        Some("west".to_string()),
        Some("east".to_string()),
        Some("west".to_string()),
        Some("east".to_string()),
        None,
    ];
    assert_eq!(text_mode(&cells), Some("east"));
    assert_eq!(text_mode(&[None, None]), None);
}

#[test]
fn test_all_missing_text_uses_placeholder() {
    let dataset = text_dataset("notes", vec![None, None]);

    let output = MissingValueImputer::default().impute(dataset);
    assert_eq!(
        texts_of(&output.dataset, "notes"),
        vec![Some("Unknown".to_string()), Some("Unknown".to_string())]
    );

    let custom = MissingValueImputer::new("N/A").impute(text_dataset("notes", vec![None]));
    assert_eq!(texts_of(&custom.dataset, "notes"), vec![Some("N/A".to_string())]);
}

#[test]
fn test_all_missing_numeric_is_skipped() {
    let dataset = Dataset::new(vec![Column::number("empty", vec![None, None])]).unwrap();

    let output = MissingValueImputer::default().impute(dataset.clone());
    assert_eq!(output.dataset, dataset);
    assert!(output.log.is_empty());
    assert_eq!(output.affected, 0);
}

#[test]
fn test_timestamp_column_filled_with_earliest_mode() {
    let cells = vec![
        Some(ts(2024, 2, 1)),
        Some(ts(2024, 1, 1)),
        None,
        Some(ts(2024, 2, 1)),
        Some(ts(2024, 1, 1)),
    ];
    assert_eq!(timestamp_mode(&cells), Some(ts(2024, 1, 1)));

    let dataset = Dataset::new(vec![Column::timestamp("date", cells)]).unwrap();
    let output = MissingValueImputer::default().impute(dataset);

    let column = output.dataset.require_column("date").unwrap();
    assert_eq!(column.values.missing_count(), 0);
    assert_eq!(output.affected, 1);
}

#[test]
fn test_complete_dataset_is_untouched() {
    let dataset = Dataset::new(vec![
        Column::number("a", vec![Some(1.0), Some(2.0)]),
        Column::text("b", vec![Some("x"), Some("y")]),
    ])
    .unwrap();

    let output = MissingValueImputer::default().impute(dataset.clone());
    assert_eq!(output.dataset, dataset);
    assert!(output.log.is_empty());
}

#[test]
fn test_affected_counts_cells_across_columns() {
    let dataset = Dataset::new(vec![
        Column::number("a", vec![None, Some(2.0), None]),
        Column::text("b", vec![None, Some("y"), Some("y")]),
    ])
    .unwrap();

    let output = MissingValueImputer::default().impute(dataset);
    assert_eq!(output.affected, 3);
    assert_eq!(output.log.len(), 2);
    assert_eq!(output.dataset.total_missing(), 0);
}
