//! Cleaning pipeline for uploaded business tables
//!
//! Turns a freshly parsed dataset into a cleaned one in four stages:
//!
//! 1. **Column normalization**: lower-case, symbol-free, underscore-joined labels
//! 2. **Type coercion**: text columns become datetime or financial-numeric
//!    columns when enough of their values parse
//! 3. **Imputation**: median for numbers, mode for text and timestamps
//! 4. **Deduplication**: exact duplicate rows dropped, first occurrence kept
//!
//! Every stage takes the previous dataset by value and returns a new one
//! plus a log fragment, so a run is deterministic and running the pipeline
//! on its own output changes nothing.
//!
//! # Example
//!
//! ```rust
//! use data_insight::app::services::cleaning::CleaningPipeline;
//! use data_insight::config::AnalysisConfig;
//! use data_insight::models::{Column, Dataset};
//!
//! let dataset = Dataset::new(vec![Column::text(
//!     "Revenue",
//!     vec![Some("$1,200"), Some("$1,500"), Some("-"), Some("$2,000")],
//! )])
//! .unwrap();
//!
//! let result = CleaningPipeline::new(&AnalysisConfig::default()).run(dataset);
//! assert_eq!(result.dataset.column_names(), vec!["revenue"]);
//! println!("{}", result.summary());
//! ```

pub mod coercion;
pub mod deduplication;
pub mod imputation;
pub mod naming;
pub mod pipeline;
pub mod stage;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use coercion::{
    ColumnParser, DatetimeParser, FinancialNumberParser, ParseAttempt, TypeCoercer,
    parse_datetime, parse_financial_number,
};
pub use deduplication::{Deduplicator, drop_duplicate_rows};
pub use imputation::MissingValueImputer;
pub use naming::{ColumnNormalizer, normalize_column_names, normalize_label};
pub use pipeline::CleaningPipeline;
pub use stage::{CleaningStage, StageOutput};
pub use stats::{CleaningResult, CleaningStats};
