//! Tests for trend, health and narrative services

pub mod health_tests;

use crate::app::services::insight::trend::{TrendPoint, TrendSeries};
use chrono::{Months, NaiveDate, NaiveDateTime};

pub fn ts(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Monthly series starting January 2024 with the given bucket values
pub fn monthly_series(values: &[f64]) -> TrendSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let points = values
        .iter()
        .enumerate()
        .map(|(i, &value)| TrendPoint {
            period: start + Months::new(i as u32),
            value,
        })
        .collect();
    TrendSeries::from_points("date", "revenue", points).unwrap()
}
