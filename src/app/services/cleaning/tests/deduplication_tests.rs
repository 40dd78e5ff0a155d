//! Tests for exact duplicate row removal

use super::*;
use crate::app::services::cleaning::deduplication::{drop_duplicate_rows, unique_row_indices};

fn sales_dataset() -> Dataset {
    Dataset::new(vec![
        Column::timestamp(
            "date",
            vec![
                Some(ts(2024, 1, 1)),
                Some(ts(2024, 1, 2)),
                Some(ts(2024, 1, 1)),
                Some(ts(2024, 1, 3)),
                Some(ts(2024, 1, 2)),
            ],
        ),
        Column::number(
            "amount",
            vec![Some(10.0), Some(20.0), Some(10.0), Some(30.0), Some(25.0)],
        ),
    ])
    .unwrap()
}

#[test]
fn test_duplicates_removed_keeping_first() {
    let output = drop_duplicate_rows(sales_dataset());

    assert_eq!(output.dataset.height(), 4);
    assert_eq!(output.affected, 1);
    assert_eq!(
        numbers_of(&output.dataset, "amount"),
        vec![Some(10.0), Some(20.0), Some(30.0), Some(25.0)]
    );
    assert_eq!(
        output.log.entries(),
        &["1 duplicate rows removed".to_string()]
    );
}

#[test]
fn test_partial_matches_are_kept() {
    // Same date, different amount
    assert_eq!(unique_row_indices(&sales_dataset()), vec![0, 1, 3, 4]);
}

#[test]
fn test_missing_equals_missing() {
    let dataset = Dataset::new(vec![
        Column::text("a", vec![None, None, Some("x")]),
        Column::number("b", vec![None, None, None]),
    ])
    .unwrap();

    let output = drop_duplicate_rows(dataset);
    assert_eq!(output.dataset.height(), 2);
    assert_eq!(output.affected, 1);
}

#[test]
fn test_no_duplicates_logs_nothing() {
    let dataset = text_dataset("a", vec![Some("x"), Some("y")]);
    let output = drop_duplicate_rows(dataset.clone());

    assert_eq!(output.dataset, dataset);
    assert!(output.log.is_empty());
    assert_eq!(output.affected, 0);
}

#[test]
fn test_empty_dataset() {
    let output = drop_duplicate_rows(Dataset::default());
    assert_eq!(output.dataset.height(), 0);
    assert!(output.log.is_empty());
}
