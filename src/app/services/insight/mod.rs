//! KPI trend and financial health services
//!
//! - [`trend`] - monthly bucketing of one KPI against one date column
//! - [`health`] - growth, volatility, health score and early-warning rules
//! - [`narrative`] - executive insight, summary and risk text
//!
//! [`build_trend`] is the gate for everything else here: when it reports
//! insufficient data, no health or narrative output is produced.

pub mod health;
pub mod narrative;
pub mod trend;

#[cfg(test)]
pub mod tests;

pub use health::{
    ActionRecommendation, HealthSnapshot, HealthStatus, RiskAlert, Stability, health_score,
    recent_declines, recommended_actions, risk_alerts, volatility_ratio,
};
pub use narrative::{
    GrowthDirection, KpiInsight, executive_summary, kpi_insight, risk_messages, status_message,
};
pub use trend::{TrendPoint, TrendSeries, TrendSummary, build_trend, month_start, percent_change};
