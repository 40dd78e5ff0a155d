//! Tests for the dataset overview and role breakdown

use super::*;
use crate::app::services::quality::overview::{ColumnRoles, DataOverview};
use crate::config::CoercionConfig;
use crate::models::ColumnRole;
use chrono::NaiveDate;

#[test]
fn test_overview_counts() {
    let overview =
        DataOverview::from_dataset(&mixed_quality_dataset(), 2048, &CoercionConfig::default());

    assert_eq!(overview.rows, 25);
    assert_eq!(overview.columns, 3);
    assert_eq!(overview.total_missing, 10);
    assert_eq!(overview.file_size_kb, 2.0);
    assert!(overview.has_missing());

    let discount = &overview.column_details[1];
    assert_eq!(discount.name, "discount");
    assert_eq!(discount.inferred_role, ColumnRole::Numeric);
    assert_eq!(discount.missing, 10);
    assert_eq!(discount.unique, 15);
    assert_eq!(overview.column_details[2].unique, 1);
}

#[test]
fn test_raw_text_columns_report_inferred_role() {
    let raw = Dataset::new(vec![
        Column::text(
            "Date",
            vec![Some("2024-01-05"), Some("2024-02-05"), Some("2024-03-05")],
        ),
        Column::text("Revenue", vec![Some("$1,200"), Some("$1,500"), Some("-")]),
        Column::text("Region", vec![Some("North"), None, Some("South")]),
    ])
    .unwrap();

    let overview = DataOverview::from_dataset(&raw, 0, &CoercionConfig::default());
    let roles: Vec<ColumnRole> = overview
        .column_details
        .iter()
        .map(|c| c.inferred_role)
        .collect();

    assert_eq!(
        roles,
        vec![ColumnRole::Date, ColumnRole::Numeric, ColumnRole::Categorical]
    );
    // Counts still describe the raw upload
    assert_eq!(overview.column_details[1].missing, 0);
    assert_eq!(overview.column_details[2].missing, 1);
}

#[test]
fn test_file_size_rounded_to_two_decimals() {
    let overview =
        DataOverview::from_dataset(&Dataset::default(), 1500, &CoercionConfig::default());
    assert_eq!(overview.file_size_kb, 1.46);
    assert!(!overview.has_missing());
}

#[test]
fn test_column_roles() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let dataset = Dataset::new(vec![
        Column::text("region", vec![Some("north")]),
        Column::timestamp("date", vec![Some(date)]),
        Column::number("revenue", vec![Some(1.0)]),
        Column::number("cost", vec![Some(1.0)]),
    ])
    .unwrap();

    let roles = ColumnRoles::from_dataset(&dataset);
    assert_eq!(roles.date, vec!["date"]);
    assert_eq!(roles.numeric, vec!["revenue", "cost"]);
    assert_eq!(roles.categorical, vec!["region"]);
    assert!(roles.supports_trend());

    assert!(!ColumnRoles::from_dataset(&mixed_quality_dataset()).supports_trend());
}
