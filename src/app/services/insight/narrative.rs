//! Fixed-string executive narratives for a KPI trend

use super::health::{HealthSnapshot, RiskAlert, Stability};
use crate::constants::{GROWTH_SIGNIFICANT_PCT, messages};
use serde::Serialize;

/// Direction of growth over the full series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthDirection {
    Rising,
    Declining,
    Flat,
}

impl GrowthDirection {
    /// Beyond ±5% counts as a real move
    pub fn from_growth(growth_pct: f64) -> Self {
        if growth_pct > GROWTH_SIGNIFICANT_PCT {
            GrowthDirection::Rising
        } else if growth_pct < -GROWTH_SIGNIFICANT_PCT {
            GrowthDirection::Declining
        } else {
            GrowthDirection::Flat
        }
    }
}

/// One insight sentence and its matching recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiInsight {
    pub direction: GrowthDirection,
    pub insight: String,
    pub recommendation: String,
}

pub fn kpi_insight(kpi: &str, growth_pct: f64) -> KpiInsight {
    let direction = GrowthDirection::from_growth(growth_pct);
    let (insight, recommendation) = match direction {
        GrowthDirection::Rising => (
            format!("{} shows positive growth over the analysis period.", kpi),
            messages::RECOMMEND_KEEP_STRATEGY,
        ),
        GrowthDirection::Declining => (
            format!("{} declined overall during the analysis period.", kpi),
            messages::RECOMMEND_REVIEW_COSTS,
        ),
        GrowthDirection::Flat => (
            format!("{} is relatively stable without major changes.", kpi),
            messages::RECOMMEND_EFFICIENCY,
        ),
    };

    KpiInsight {
        direction,
        insight,
        recommendation: recommendation.to_string(),
    }
}

/// Growth sentence followed by stability sentence
pub fn executive_summary(snapshot: &HealthSnapshot) -> Vec<String> {
    let growth = match GrowthDirection::from_growth(snapshot.growth_pct) {
        GrowthDirection::Rising => messages::EXEC_GROWTH_HEALTHY,
        GrowthDirection::Declining => messages::EXEC_GROWTH_DECLINING,
        GrowthDirection::Flat => messages::EXEC_GROWTH_FLAT,
    };
    let stability = match snapshot.stability {
        Stability::Unstable => messages::EXEC_UNSTABLE,
        Stability::Fluctuating => messages::EXEC_FLUCTUATING,
        Stability::Stable => messages::EXEC_STABLE,
    };

    vec![growth.to_string(), stability.to_string()]
}

/// One-line status banner
pub fn status_message(snapshot: &HealthSnapshot) -> String {
    format!(
        "Current financial condition is classified as {}, with {} revenue stability.",
        snapshot.status,
        snapshot.stability.label().to_lowercase()
    )
}

/// Alert messages, or the single all-clear message when nothing fired
pub fn risk_messages(alerts: &[RiskAlert]) -> Vec<String> {
    if alerts.is_empty() {
        vec![messages::RISK_NONE.to_string()]
    } else {
        alerts.iter().map(|a| a.message().to_string()).collect()
    }
}
