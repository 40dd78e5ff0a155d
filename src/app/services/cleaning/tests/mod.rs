//! Tests for the cleaning pipeline and its stages

pub mod deduplication_tests;
pub mod imputation_tests;
pub mod pipeline_tests;

use crate::models::{Column, ColumnValues, Dataset};
use chrono::{NaiveDate, NaiveDateTime};

/// Midnight timestamp for the given calendar date
pub fn ts(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Single-column text dataset
pub fn text_dataset(name: &str, cells: Vec<Option<&str>>) -> Dataset {
    Dataset::new(vec![Column::text(name, cells)]).unwrap()
}

/// The revenue example: a currency-formatted column with a lone dash
pub fn revenue_dataset() -> Dataset {
    Dataset::new(vec![
        Column::text(
            "Tanggal",
            vec![
                Some("2024-01-05"),
                Some("2024-01-20"),
                Some("2024-02-03"),
                Some("2024-03-15"),
            ],
        ),
        Column::text(
            "Revenue",
            vec![Some("$1,200"), Some("$1,500"), Some("-"), Some("$2,000")],
        ),
        Column::text(
            "Region",
            vec![Some("North"), None, Some("South"), Some("North")],
        ),
    ])
    .unwrap()
}

/// Values of a numeric column, panicking on any other storage
pub fn numbers_of(dataset: &Dataset, name: &str) -> Vec<Option<f64>> {
    match &dataset.require_column(name).unwrap().values {
        ColumnValues::Number(v) => v.clone(),
        other => panic!("column {} is not numeric: {:?}", name, other.role()),
    }
}

/// Values of a text column, panicking on any other storage
pub fn texts_of(dataset: &Dataset, name: &str) -> Vec<Option<String>> {
    match &dataset.require_column(name).unwrap().values {
        ColumnValues::Text(v) => v.clone(),
        other => panic!("column {} is not text: {:?}", name, other.role()),
    }
}
