//! Stage abstraction for the cleaning pipeline
//!
//! Each stage consumes the previous dataset value and hands back a new one
//! together with the log fragment describing what it changed.

use crate::models::{CleaningLog, Dataset};

/// Result of running one cleaning stage
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub dataset: Dataset,
    pub log: CleaningLog,
    /// Stage-specific count: labels renamed, columns coerced, cells filled or rows dropped
    pub affected: usize,
}

impl StageOutput {
    pub fn unchanged(dataset: Dataset) -> Self {
        Self {
            dataset,
            log: CleaningLog::new(),
            affected: 0,
        }
    }
}

/// One step of the cleaning pipeline
pub trait CleaningStage {
    /// Short name used in tracing output and statistics
    fn name(&self) -> &'static str;

    fn apply(&self, dataset: Dataset) -> StageOutput;
}
