//! Tests for the quality services

pub mod overview_tests;

use crate::models::{Column, Dataset};

/// 25 rows: a clean numeric column, a numeric column missing 40% of its
/// values, and a categorical column with a single repeated value
pub fn mixed_quality_dataset() -> Dataset {
    Dataset::new(vec![
        Column::number("revenue", (1..=25).map(|v| Some(v as f64 * 100.0)).collect()),
        Column::number(
            "discount",
            (1..=25)
                .map(|v| if v <= 10 { None } else { Some(v as f64) })
                .collect(),
        ),
        Column::text("currency", vec![Some("IDR"); 25]),
    ])
    .unwrap()
}
