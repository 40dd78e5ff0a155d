//! Raw-file overview shown before cleaning, and the post-clean role breakdown

use crate::app::services::cleaning::TypeCoercer;
use crate::config::CoercionConfig;
use crate::models::{Column, ColumnRole, ColumnValues, Dataset};
use serde::Serialize;

/// Missing and distinct counts for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnOverview {
    pub name: String,
    /// Role the type coercer will assign; raw uploads are all text
    pub inferred_role: ColumnRole,
    pub missing: usize,
    pub unique: usize,
}

/// Shape and completeness of a dataset as uploaded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataOverview {
    pub rows: usize,
    pub columns: usize,
    pub total_missing: usize,
    /// Uploaded file size in KiB, rounded to two decimals
    pub file_size_kb: f64,
    pub column_details: Vec<ColumnOverview>,
}

impl DataOverview {
    pub fn from_dataset(
        dataset: &Dataset,
        file_size_bytes: usize,
        coercion: &CoercionConfig,
    ) -> Self {
        let coercer = TypeCoercer::new(coercion);
        let column_details = dataset
            .columns()
            .iter()
            .map(|c| ColumnOverview {
                name: c.name.clone(),
                inferred_role: inferred_role(&coercer, c),
                missing: c.values.missing_count(),
                unique: c.values.distinct_count(),
            })
            .collect();

        Self {
            rows: dataset.height(),
            columns: dataset.width(),
            total_missing: dataset.total_missing(),
            file_size_kb: (file_size_bytes as f64 / 1024.0 * 100.0).round() / 100.0,
            column_details,
        }
    }

    /// Initial gate: whether cleaning will have missing values to impute
    pub fn has_missing(&self) -> bool {
        self.total_missing > 0
    }
}

fn inferred_role(coercer: &TypeCoercer, column: &Column) -> ColumnRole {
    match &column.values {
        ColumnValues::Text(cells) => coercer.coerce_cells(cells).0.role(),
        values => values.role(),
    }
}

/// Column names grouped by role after cleaning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnRoles {
    pub date: Vec<String>,
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

impl ColumnRoles {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let names = |role: ColumnRole| -> Vec<String> {
            dataset
                .columns_with_role(role)
                .into_iter()
                .map(String::from)
                .collect()
        };

        Self {
            date: names(ColumnRole::Date),
            numeric: names(ColumnRole::Numeric),
            categorical: names(ColumnRole::Categorical),
        }
    }

    /// At least one date and one numeric column, the minimum for a trend
    pub fn supports_trend(&self) -> bool {
        !self.date.is_empty() && !self.numeric.is_empty()
    }
}
