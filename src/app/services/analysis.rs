//! Session analysis orchestration
//!
//! Runs one full pass over an uploaded dataset: overview, cleaning,
//! outlier fencing, readiness scoring and, for the selected date/KPI
//! pair, the trend, health and narrative steps. Each step after cleaning
//! degrades on its own; a failure there becomes a report warning and the
//! steps that do not depend on it still run.

use crate::app::services::cleaning::{CleaningPipeline, CleaningStats};
use crate::app::services::insight::{
    HealthSnapshot, KpiInsight, RiskAlert, TrendSeries, TrendSummary, build_trend,
    executive_summary, kpi_insight, recommended_actions, risk_alerts, risk_messages,
    status_message,
};
use crate::app::services::quality::{
    ColumnRoles, DataOverview, OutlierRecord, QualityAssessor, QualityReport, detect_outliers,
};
use crate::config::AnalysisConfig;
use crate::error::{InsightError, Result};
use crate::models::{CleaningLog, Dataset};
use indicatif::ProgressBar;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Date and KPI columns chosen by the host; `None` picks the first of each role
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KpiSelection {
    pub date_column: Option<String>,
    pub kpi_column: Option<String>,
}

impl KpiSelection {
    pub fn new(date_column: Option<String>, kpi_column: Option<String>) -> Self {
        Self {
            date_column,
            kpi_column,
        }
    }

    /// Resolve against the cleaned roles, falling back to the first date and numeric column
    pub fn resolve(&self, roles: &ColumnRoles) -> Result<(String, String)> {
        let date = match &self.date_column {
            Some(name) => name.clone(),
            None => roles.date.first().cloned().ok_or_else(|| {
                InsightError::insufficient_data("the cleaned dataset has no date column")
            })?,
        };
        let kpi = match &self.kpi_column {
            Some(name) => name.clone(),
            None => roles.numeric.first().cloned().ok_or_else(|| {
                InsightError::insufficient_data("the cleaned dataset has no numeric column")
            })?,
        };
        Ok((date, kpi))
    }
}

/// Trend-dependent results for one date/KPI pair
#[derive(Debug, Clone, Serialize)]
pub struct KpiAnalysis {
    pub date_column: String,
    pub kpi_column: String,
    pub trend: TrendSeries,
    pub summary: TrendSummary,
    pub insight: KpiInsight,
    pub health: HealthSnapshot,
    pub status_message: String,
    pub executive_summary: Vec<String>,
    pub risk_alerts: Vec<RiskAlert>,
    pub risk_messages: Vec<String>,
    pub actions: Vec<String>,
}

impl KpiAnalysis {
    /// Derive every trend-dependent output from one series
    pub fn from_series(series: TrendSeries) -> Self {
        let health = HealthSnapshot::from_series(&series);
        let alerts = risk_alerts(&series, &health);

        Self {
            date_column: series.date_column().to_string(),
            kpi_column: series.kpi_column().to_string(),
            summary: series.summary(),
            insight: kpi_insight(series.kpi_column(), health.growth_pct),
            status_message: status_message(&health),
            executive_summary: executive_summary(&health),
            risk_messages: risk_messages(&alerts),
            risk_alerts: alerts,
            actions: recommended_actions(&health)
                .iter()
                .map(|a| a.message().to_string())
                .collect(),
            health,
            trend: series,
        }
    }
}

/// Everything one session pass produces
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub source: String,
    pub overview: DataOverview,
    pub cleaning_log: CleaningLog,
    pub cleaning_stats: CleaningStats,
    pub roles: ColumnRoles,
    pub quality: QualityReport,
    pub outliers: Vec<OutlierRecord>,
    pub kpi: Option<KpiAnalysis>,
    /// Non-fatal step failures, in the order they occurred
    pub warnings: Vec<String>,
}

impl AnalysisReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Report plus the cleaned dataset it describes, for export
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub report: AnalysisReport,
    pub dataset: Dataset,
}

/// Runs session passes with one configuration
pub struct Analyzer {
    config: AnalysisConfig,
    pipeline: CleaningPipeline,
    assessor: QualityAssessor,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            pipeline: CleaningPipeline::new(&config),
            assessor: QualityAssessor::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn analyze(
        &self,
        raw: Dataset,
        file_size_bytes: usize,
        source: &str,
        selection: &KpiSelection,
    ) -> AnalysisOutcome {
        self.analyze_with_progress(raw, file_size_bytes, source, selection, None)
    }

    /// Full pass over a freshly parsed dataset
    pub fn analyze_with_progress(
        &self,
        raw: Dataset,
        file_size_bytes: usize,
        source: &str,
        selection: &KpiSelection,
        progress: Option<&ProgressBar>,
    ) -> AnalysisOutcome {
        let mut warnings = Vec::new();
        let overview = DataOverview::from_dataset(&raw, file_size_bytes, &self.config.coercion);
        debug!(
            "Overview of '{}': {} missing cells across {} columns",
            source, overview.total_missing, overview.columns
        );

        let cleaned = self.pipeline.run_with_progress(raw, progress);
        let roles = ColumnRoles::from_dataset(&cleaned.dataset);

        if let Some(pb) = progress {
            pb.set_message("Scoring data quality");
        }
        let outliers = detect_outliers(&cleaned.dataset, &self.config.quality).unwrap_or_else(|e| {
            record_warning(&mut warnings, "Outlier detection", &e);
            Vec::new()
        });
        let quality = self.assessor.assess(&cleaned.dataset, &outliers);

        if let Some(pb) = progress {
            pb.set_message("Analyzing KPI trend");
        }
        let kpi = match self.analyze_kpi(&cleaned.dataset, &roles, selection) {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                record_warning(&mut warnings, "Trend analysis", &e);
                None
            }
        };

        info!(
            "Analysis of '{}' complete: readiness {}, {} warning(s)",
            source,
            quality.readiness_score,
            warnings.len()
        );

        AnalysisOutcome {
            report: AnalysisReport {
                source: source.to_string(),
                overview,
                cleaning_log: cleaned.log,
                cleaning_stats: cleaned.stats,
                roles,
                quality,
                outliers,
                kpi,
                warnings,
            },
            dataset: cleaned.dataset,
        }
    }

    /// Trend, health and narratives for the selected pair
    pub fn analyze_kpi(
        &self,
        dataset: &Dataset,
        roles: &ColumnRoles,
        selection: &KpiSelection,
    ) -> Result<KpiAnalysis> {
        let (date_column, kpi_column) = selection.resolve(roles)?;
        let series = build_trend(dataset, &date_column, &kpi_column)?;
        Ok(KpiAnalysis::from_series(series))
    }
}

fn record_warning(warnings: &mut Vec<String>, step: &str, error: &InsightError) {
    if error.is_warning() {
        warn!("{} skipped: {}", step, error);
    } else {
        warn!("{} failed: {}", step, error);
    }
    warnings.push(format!("{}: {}", step, error));
}
