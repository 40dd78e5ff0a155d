//! Human-readable and JSON rendering of analysis reports

use crate::app::services::analysis::{AnalysisReport, KpiAnalysis};
use crate::app::services::quality::{QualityStatus, ReadinessVerdict};
use crate::app::services::insight::HealthStatus;
use colored::*;
use std::fmt::Write;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Which sections of the report to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
    /// Overview, cleaning log and quality
    Inspect,
    /// Everything, including the KPI trend and health
    Full,
}

/// Render the report as coloured text
pub fn render_text(report: &AnalysisReport, scope: ReportScope) -> String {
    let mut out = String::new();
    render_overview(&mut out, report);
    render_cleaning(&mut out, report);
    render_quality(&mut out, report);

    if scope == ReportScope::Full {
        match &report.kpi {
            Some(kpi) => render_kpi(&mut out, kpi),
            None => {
                let _ = writeln!(out, "\n{}", "KPI Trend".bold());
                let _ = writeln!(out, "   {}", "No trend analysis available.".yellow());
            }
        }
    }

    if !report.warnings.is_empty() {
        let _ = writeln!(out, "\n{}", "Warnings".yellow().bold());
        for warning in &report.warnings {
            let _ = writeln!(out, "   ⚠️  {}", warning);
        }
    }

    out
}

/// Render the report as pretty-printed JSON
pub fn render_json(report: &AnalysisReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

fn render_overview(out: &mut String, report: &AnalysisReport) {
    let overview = &report.overview;
    let _ = writeln!(out, "\n📊 {}", format!("Data Overview: {}", report.source).bold());
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "   • Rows: {}", overview.rows);
    let _ = writeln!(out, "   • Columns: {}", overview.columns);
    let _ = writeln!(out, "   • Missing cells: {}", overview.total_missing);
    let _ = writeln!(out, "   • File size: {:.2} KB", overview.file_size_kb);

    if overview.has_missing() {
        let _ = writeln!(
            out,
            "   {}",
            "Missing values found; they will be filled during cleaning.".yellow()
        );
    } else {
        let _ = writeln!(out, "   {}", "No missing values found.".green());
    }
}

fn render_cleaning(out: &mut String, report: &AnalysisReport) {
    let _ = writeln!(out, "\n🧹 {}", "Cleaning".bold());
    let _ = writeln!(out, "{}", RULE);

    if report.cleaning_log.is_empty() {
        let _ = writeln!(out, "   • No changes were needed");
    }
    for entry in report.cleaning_log.entries() {
        let _ = writeln!(out, "   • {}", entry);
    }
    let _ = writeln!(out, "   {}", report.cleaning_stats.summary().bright_black());

    let roles = &report.roles;
    let _ = writeln!(
        out,
        "   Date: {} | Numeric: {} | Categorical: {}",
        roles.date.len(),
        roles.numeric.len(),
        roles.categorical.len()
    );
}

fn render_quality(out: &mut String, report: &AnalysisReport) {
    let quality = &report.quality;
    let _ = writeln!(out, "\n✅ {}", "Data Quality".bold());
    let _ = writeln!(out, "{}", RULE);

    for record in &quality.records {
        let status = match record.status {
            QualityStatus::Safe => record.status.label().green(),
            QualityStatus::HighMissing => record.status.label().red(),
            QualityStatus::LowVariance => record.status.label().yellow(),
        };
        let _ = writeln!(
            out,
            "   {:<24} {:<12} missing {:>6.2}%  unique {:>6.2}%  {}",
            record.column,
            record.role.to_string(),
            record.missing_rate * 100.0,
            record.unique_ratio * 100.0,
            status
        );
    }

    if !report.outliers.is_empty() {
        let _ = writeln!(out, "\n   Outliers (IQR):");
        for outlier in &report.outliers {
            let _ = writeln!(
                out,
                "   {:<24} {} of {} ({:.2}%) outside [{:.2}, {:.2}]",
                outlier.column,
                outlier.outlier_count,
                outlier.sample_size,
                outlier.outlier_pct,
                outlier.lower_fence,
                outlier.upper_fence
            );
        }
    }

    let score = format!("{}/100", quality.readiness_score);
    let score = match quality.verdict {
        ReadinessVerdict::Ready => score.green().bold(),
        ReadinessVerdict::PartiallyReady => score.yellow().bold(),
        ReadinessVerdict::NotReady => score.red().bold(),
    };
    let _ = writeln!(out, "\n   Readiness score: {}", score);
    let _ = writeln!(out, "   {}", quality.verdict.message());
    for line in &quality.summary {
        let _ = writeln!(out, "   • {}", line);
    }
}

fn render_kpi(out: &mut String, kpi: &KpiAnalysis) {
    let _ = writeln!(
        out,
        "\n📈 {}",
        format!("KPI Trend: {} by {}", kpi.kpi_column, kpi.date_column).bold()
    );
    let _ = writeln!(out, "{}", RULE);

    for point in kpi.trend.points() {
        let _ = writeln!(
            out,
            "   {}  {:>16.2}",
            point.period.format("%Y-%m"),
            point.value
        );
    }

    let summary = &kpi.summary;
    let _ = writeln!(out, "\n   • Total: {:.2}", summary.total);
    let _ = writeln!(out, "   • Mean per month: {:.2}", summary.mean);
    let _ = writeln!(
        out,
        "   • Last month: {:.2} ({:+.2}% vs previous)",
        summary.last, summary.change_pct
    );
    let _ = writeln!(out, "\n   {}", kpi.insight.insight);
    let _ = writeln!(out, "   Recommendation: {}", kpi.insight.recommendation);

    let health = &kpi.health;
    let status = match health.status {
        HealthStatus::Healthy => health.status.label().green().bold(),
        HealthStatus::NeedsAttention => health.status.label().yellow().bold(),
        HealthStatus::AtRisk => health.status.label().red().bold(),
    };
    let _ = writeln!(out, "\n💡 {}", "Financial Health".bold());
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "   • Growth: {:+.2}%", health.growth_pct);
    let _ = writeln!(
        out,
        "   • Volatility: {:.3} ({})",
        health.volatility_ratio,
        health.stability.label()
    );
    let _ = writeln!(out, "   • Health score: {}/100 {}", health.health_score, status);
    let _ = writeln!(out, "   {}", kpi.status_message);

    let _ = writeln!(out, "\n   Executive summary:");
    for line in &kpi.executive_summary {
        let _ = writeln!(out, "   • {}", line);
    }

    let _ = writeln!(out, "\n   Risks:");
    for line in &kpi.risk_messages {
        let line = if kpi.risk_alerts.is_empty() {
            line.green()
        } else {
            line.red()
        };
        let _ = writeln!(out, "   • {}", line);
    }

    let _ = writeln!(out, "\n   Recommended actions:");
    for action in &kpi.actions {
        let _ = writeln!(out, "   • {}", action);
    }
}
