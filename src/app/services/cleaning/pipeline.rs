//! Cleaning pipeline orchestration
//!
//! Runs the normalizer, type coercer, imputer and deduplicator in order,
//! threading the dataset through each stage by value and concatenating
//! their log fragments.

use super::coercion::TypeCoercer;
use super::deduplication::Deduplicator;
use super::imputation::MissingValueImputer;
use super::naming::ColumnNormalizer;
use super::stage::CleaningStage;
use super::stats::{CleaningResult, CleaningStats};
use crate::config::AnalysisConfig;
use crate::models::{CleaningLog, Dataset};
use indicatif::ProgressBar;
use tracing::{debug, info};

/// Ordered chain of cleaning stages
pub struct CleaningPipeline {
    stages: Vec<Box<dyn CleaningStage>>,
}

impl CleaningPipeline {
    /// Standard four-stage pipeline configured from `config`
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            stages: vec![
                Box::new(ColumnNormalizer),
                Box::new(TypeCoercer::new(&config.coercion)),
                Box::new(MissingValueImputer::new(
                    config.coercion.missing_placeholder.clone(),
                )),
                Box::new(Deduplicator),
            ],
        }
    }

    /// Pipeline with an explicit stage list, run in order
    pub fn with_stages(stages: Vec<Box<dyn CleaningStage>>) -> Self {
        Self { stages }
    }

    /// Names of the configured stages, in execution order
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn run(&self, dataset: Dataset) -> CleaningResult {
        self.run_with_progress(dataset, None)
    }

    /// Run every stage, updating `progress` with the current stage name
    pub fn run_with_progress(
        &self,
        dataset: Dataset,
        progress: Option<&ProgressBar>,
    ) -> CleaningResult {
        let mut stats = CleaningStats::new(dataset.height());
        let mut log = CleaningLog::new();
        let mut current = dataset;

        info!(
            "Starting cleaning pipeline for {} rows x {} columns",
            current.height(),
            current.width()
        );

        for stage in &self.stages {
            if let Some(pb) = progress {
                pb.set_message(format!("Cleaning: {}", stage.name()));
            }

            let output = stage.apply(current);
            debug!(
                "Stage {} affected {} item(s), logged {} entr(ies)",
                stage.name(),
                output.affected,
                output.log.len()
            );
            stats.record(stage.name(), output.affected);
            log.append(output.log);
            current = output.dataset;
        }

        stats.output_rows = current.height();
        info!("{}", stats.summary());

        CleaningResult {
            dataset: current,
            log,
            stats,
        }
    }
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}
