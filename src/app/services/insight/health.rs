//! Financial health scoring and early-warning rules
//!
//! Every output here is a pure function of a [`TrendSeries`]: growth over
//! the full series, volatility as the coefficient of variation of bucket
//! values, and the fixed-penalty health score derived from both.

use super::trend::TrendSeries;
use crate::app::services::stats;
use crate::constants::{
    GROWTH_SIGNIFICANT_PCT, HEALTH_FLOOR, HEALTH_START, HEALTHY_MIN, HIGH_VOLATILITY_PENALTY,
    MILD_DECLINE_PENALTY, MODERATE_VOLATILITY_PENALTY, NEEDS_ATTENTION_MIN,
    RECENT_CHANGE_WINDOW, RECENT_DECLINE_ALERT_COUNT, STABLE_VOLATILITY, STEEP_DECLINE_PENALTY,
    UNSTABLE_VOLATILITY, messages,
};
use serde::Serialize;
use std::fmt;

/// Revenue stability band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    Stable,
    Fluctuating,
    Unstable,
}

impl Stability {
    /// `< 0.25` stable, `< 0.40` fluctuating, otherwise unstable
    pub fn from_volatility(ratio: f64) -> Self {
        if ratio < STABLE_VOLATILITY {
            Stability::Stable
        } else if ratio < UNSTABLE_VOLATILITY {
            Stability::Fluctuating
        } else {
            Stability::Unstable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stability::Stable => "Stabil",
            Stability::Fluctuating => "Fluktuatif",
            Stability::Unstable => "Tidak Stabil",
        }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Band of the health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    NeedsAttention,
    AtRisk,
}

impl HealthStatus {
    pub fn from_score(score: i32) -> Self {
        if score >= HEALTHY_MIN {
            HealthStatus::Healthy
        } else if score >= NEEDS_ATTENTION_MIN {
            HealthStatus::NeedsAttention
        } else {
            HealthStatus::AtRisk
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Sehat",
            HealthStatus::NeedsAttention => "Perlu Perhatian",
            HealthStatus::AtRisk => "Berisiko",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sample standard deviation over mean of the bucket values; 0 when the mean is 0
pub fn volatility_ratio(values: &[f64]) -> f64 {
    let (Some(mean), Some(std)) = (stats::mean(values), stats::sample_std(values)) else {
        return 0.0;
    };
    if mean == 0.0 { 0.0 } else { std / mean }
}

/// 100 minus the growth and volatility penalties, floored at 40
pub fn health_score(growth_pct: f64, volatility_ratio: f64) -> i32 {
    let mut score = HEALTH_START;

    if growth_pct < -GROWTH_SIGNIFICANT_PCT {
        score -= STEEP_DECLINE_PENALTY;
    } else if growth_pct < 0.0 {
        score -= MILD_DECLINE_PENALTY;
    }

    if volatility_ratio > UNSTABLE_VOLATILITY {
        score -= HIGH_VOLATILITY_PENALTY;
    } else if volatility_ratio > STABLE_VOLATILITY {
        score -= MODERATE_VOLATILITY_PENALTY;
    }

    score.max(HEALTH_FLOOR)
}

/// Point-in-time financial health of one KPI trend
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthSnapshot {
    /// Percent change from the first bucket to the last
    pub growth_pct: f64,
    pub volatility_ratio: f64,
    pub stability: Stability,
    /// In [40, 100]
    pub health_score: i32,
    pub status: HealthStatus,
}

impl HealthSnapshot {
    pub fn from_series(series: &TrendSeries) -> Self {
        let growth_pct = series.growth_pct();
        let volatility_ratio = volatility_ratio(&series.values());
        let health_score = health_score(growth_pct, volatility_ratio);

        Self {
            growth_pct,
            volatility_ratio,
            stability: Stability::from_volatility(volatility_ratio),
            health_score,
            status: HealthStatus::from_score(health_score),
        }
    }
}

/// Early-warning conditions, each checked independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskAlert {
    /// At least two of the last three period-over-period changes were negative
    RecentDecline,
    HighVolatility,
    NegativeGrowth,
}

impl RiskAlert {
    pub fn message(&self) -> &'static str {
        match self {
            RiskAlert::RecentDecline => messages::RISK_RECENT_DECLINE,
            RiskAlert::HighVolatility => messages::RISK_HIGH_VOLATILITY,
            RiskAlert::NegativeGrowth => messages::RISK_NEGATIVE_GROWTH,
        }
    }
}

/// Number of falling steps among the trailing `RECENT_CHANGE_WINDOW` period changes
///
/// Compares bucket values directly, so a drop away from a zero bucket counts
/// even though its reported percent change is 0.
pub fn recent_declines(series: &TrendSeries) -> usize {
    let points = series.points();
    let steps = points.len().saturating_sub(1);
    let start = steps.saturating_sub(RECENT_CHANGE_WINDOW);
    points
        .windows(2)
        .skip(start)
        .filter(|w| w[1].value < w[0].value)
        .count()
}

/// All triggered alerts, in rule order
pub fn risk_alerts(series: &TrendSeries, snapshot: &HealthSnapshot) -> Vec<RiskAlert> {
    let mut alerts = Vec::new();

    if recent_declines(series) >= RECENT_DECLINE_ALERT_COUNT {
        alerts.push(RiskAlert::RecentDecline);
    }
    if snapshot.volatility_ratio > UNSTABLE_VOLATILITY {
        alerts.push(RiskAlert::HighVolatility);
    }
    if snapshot.growth_pct < -GROWTH_SIGNIFICANT_PCT {
        alerts.push(RiskAlert::NegativeGrowth);
    }

    alerts
}

/// Strategic action recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionRecommendation {
    ReviewCostStructure,
    DiversifyRevenue,
    Expand,
    StrengthenFundamentals,
}

impl ActionRecommendation {
    pub fn message(&self) -> &'static str {
        match self {
            ActionRecommendation::ReviewCostStructure => messages::ACTION_REVIEW_COST_STRUCTURE,
            ActionRecommendation::DiversifyRevenue => messages::ACTION_DIVERSIFY,
            ActionRecommendation::Expand => messages::ACTION_EXPAND,
            ActionRecommendation::StrengthenFundamentals => {
                messages::ACTION_STRENGTHEN_FUNDAMENTALS
            }
        }
    }
}

/// Actions mapped from the same thresholds as the alerts; never empty
pub fn recommended_actions(snapshot: &HealthSnapshot) -> Vec<ActionRecommendation> {
    let mut actions = Vec::new();

    if snapshot.growth_pct < -GROWTH_SIGNIFICANT_PCT {
        actions.push(ActionRecommendation::ReviewCostStructure);
    }
    if snapshot.volatility_ratio > UNSTABLE_VOLATILITY {
        actions.push(ActionRecommendation::DiversifyRevenue);
    }
    if snapshot.growth_pct > GROWTH_SIGNIFICANT_PCT && snapshot.volatility_ratio < STABLE_VOLATILITY
    {
        actions.push(ActionRecommendation::Expand);
    }
    if actions.is_empty() {
        actions.push(ActionRecommendation::StrengthenFundamentals);
    }

    actions
}
