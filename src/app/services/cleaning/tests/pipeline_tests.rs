//! Tests for the full cleaning pipeline

use super::*;
use crate::app::services::cleaning::pipeline::CleaningPipeline;
use crate::app::services::cleaning::stage::{CleaningStage, StageOutput};
use crate::config::AnalysisConfig;
use crate::models::ColumnRole;

fn pipeline() -> CleaningPipeline {
    CleaningPipeline::new(&AnalysisConfig::default())
}

#[test]
fn test_stage_order() {
    assert_eq!(
        pipeline().stage_names(),
        vec![
            "normalize_names",
            "coerce_types",
            "impute_missing",
            "drop_duplicates"
        ]
    );
}

#[test]
fn test_revenue_scenario_end_to_end() {
    let result = pipeline().run(revenue_dataset());
    let dataset = &result.dataset;

    assert_eq!(dataset.column_names(), vec!["tanggal", "revenue", "region"]);
    assert_eq!(dataset.columns_with_role(ColumnRole::Date), vec!["tanggal"]);
    assert_eq!(
        numbers_of(dataset, "revenue"),
        vec![Some(1200.0), Some(1500.0), Some(1500.0), Some(2000.0)]
    );
    assert_eq!(texts_of(dataset, "region")[1], Some("North".to_string()));
    assert_eq!(dataset.total_missing(), 0);

    let entries = result.log.entries();
    assert_eq!(entries.len(), 5);
    assert!(entries[0].starts_with("Column names normalized"));
    assert_eq!(entries[1], "Column 'tanggal' converted to datetime");
    assert_eq!(entries[2], "Column 'revenue' normalized as numeric (financial)");
    assert!(entries[3].contains("median (1500)"));

    assert_eq!(result.stats.columns_renamed, 3);
    assert_eq!(result.stats.columns_coerced, 2);
    assert_eq!(result.stats.cells_imputed, 2);
    assert_eq!(result.stats.duplicates_removed, 0);
}

#[test]
fn test_pipeline_is_idempotent() {
    let first = pipeline().run(revenue_dataset());
    let second = pipeline().run(first.dataset.clone());

    assert_eq!(second.dataset, first.dataset);
    assert!(second.log.is_empty());
    assert!(second.stats.is_noop());
}

#[test]
fn test_duplicates_detected_after_normalization() {
    // Rows differ only by surrounding whitespace and thousands separators
    let dataset = Dataset::new(vec![
        Column::text("Item", vec![Some("pen"), Some(" pen "), Some("ink")]),
        Column::text("Price", vec![Some("1,000"), Some("1000"), Some("250")]),
    ])
    .unwrap();

    let result = pipeline().run(dataset);

    assert_eq!(result.dataset.height(), 2);
    assert_eq!(result.stats.input_rows, 3);
    assert_eq!(result.stats.output_rows, 2);
    assert_eq!(
        result.log.entries().last().map(String::as_str),
        Some("1 duplicate rows removed")
    );
}

struct LogMarker;

impl CleaningStage for LogMarker {
    fn name(&self) -> &'static str {
        "marker"
    }

    fn apply(&self, dataset: Dataset) -> StageOutput {
        let mut output = StageOutput::unchanged(dataset);
        output.log.push("marker ran");
        output
    }
}

#[test]
fn test_custom_stage_list() {
    let pipeline = CleaningPipeline::with_stages(vec![Box::new(LogMarker)]);
    let result = pipeline.run(text_dataset("A", vec![Some("x")]));

    assert_eq!(result.log.entries(), &["marker ran".to_string()]);
    assert_eq!(result.dataset.column_names(), vec!["A"]);
    assert!(result.stats.is_noop());
}

#[test]
fn test_empty_dataset_passes_through() {
    let result = pipeline().run(Dataset::default());
    assert_eq!(result.dataset.height(), 0);
    assert!(result.log.is_empty());
}
