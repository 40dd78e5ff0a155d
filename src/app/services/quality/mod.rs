//! Data quality services for cleaned datasets
//!
//! - [`overview`] - raw-file shape, missing counts and the role breakdown
//! - [`assessor`] - per-column quality records and the readiness score
//! - [`outliers`] - IQR fencing of numeric columns
//!
//! The readiness score depends on outlier records only under the
//! outlier-aware scoring variant, so callers run [`detect_outliers`] first
//! and pass its records to [`QualityAssessor::assess`].

pub mod assessor;
pub mod outliers;
pub mod overview;

#[cfg(test)]
pub mod tests;

pub use assessor::{
    QualityAssessor, QualityRecord, QualityReport, QualityStatus, ReadinessVerdict, assess_column,
    classify,
};
pub use outliers::{OutlierRecord, detect_column, detect_outliers, high_outlier_columns};
pub use overview::{ColumnOverview, ColumnRoles, DataOverview};
