//! Tests for health scoring and early-warning rules

use super::*;
use crate::app::services::insight::health::{
    ActionRecommendation, HealthSnapshot, HealthStatus, RiskAlert, Stability, health_score,
    recent_declines, recommended_actions, risk_alerts, volatility_ratio,
};

fn approx(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

#[test]
fn test_twelve_month_drop_scenario() {
    let mut values = vec![100.0; 11];
    values.push(50.0);
    let series = monthly_series(&values);

    let snapshot = HealthSnapshot::from_series(&series);

    assert_eq!(snapshot.growth_pct, -50.0);
    // std ≈ 14.43 over mean ≈ 95.83
    assert!(approx(snapshot.volatility_ratio, 0.1506, 1e-3));
    assert_eq!(snapshot.stability, Stability::Stable);
    // Only the steep-decline penalty applies
    assert_eq!(snapshot.health_score, 75);
    assert_eq!(snapshot.status, HealthStatus::NeedsAttention);

    // The last three changes are 0, 0, -50: one decline is not enough
    assert_eq!(recent_declines(&series), 1);
    assert_eq!(
        risk_alerts(&series, &snapshot),
        vec![RiskAlert::NegativeGrowth]
    );
    assert_eq!(
        recommended_actions(&snapshot),
        vec![ActionRecommendation::ReviewCostStructure]
    );
}

#[test]
fn test_worst_case_scores_hit_both_penalties() {
    let series = monthly_series(&[100.0, 10.0, 200.0, 5.0]);
    let snapshot = HealthSnapshot::from_series(&series);

    assert!(snapshot.growth_pct < -5.0);
    assert!(snapshot.volatility_ratio > 0.40);
    assert_eq!(snapshot.health_score, 45);
    assert_eq!(snapshot.status, HealthStatus::AtRisk);
    assert_eq!(snapshot.stability, Stability::Unstable);

    let alerts = risk_alerts(&series, &snapshot);
    assert_eq!(
        alerts,
        vec![
            RiskAlert::RecentDecline,
            RiskAlert::HighVolatility,
            RiskAlert::NegativeGrowth
        ]
    );
    assert_eq!(
        recommended_actions(&snapshot),
        vec![
            ActionRecommendation::ReviewCostStructure,
            ActionRecommendation::DiversifyRevenue
        ]
    );
}

#[test]
fn test_health_score_penalties() {
    assert_eq!(health_score(10.0, 0.1), 100);
    assert_eq!(health_score(-1.0, 0.1), 85);
    assert_eq!(health_score(-5.0, 0.1), 85);
    assert_eq!(health_score(-5.1, 0.1), 75);
    assert_eq!(health_score(0.0, 0.30), 85);
    assert_eq!(health_score(0.0, 0.25), 100);
    assert_eq!(health_score(0.0, 0.41), 70);
    assert_eq!(health_score(-50.0, 0.9), 45);
}

#[test]
fn test_health_score_always_in_range() {
    for growth in [-1000.0, -50.0, -5.0, -0.1, 0.0, 3.0, 5.0, 500.0] {
        for volatility in [-1.0, 0.0, 0.2, 0.25, 0.3, 0.4, 0.5, 10.0] {
            let score = health_score(growth, volatility);
            assert!((40..=100).contains(&score));
        }
    }
}

#[test]
fn test_stability_bands_are_contiguous() {
    assert_eq!(Stability::from_volatility(0.0), Stability::Stable);
    assert_eq!(Stability::from_volatility(0.2499), Stability::Stable);
    assert_eq!(Stability::from_volatility(0.25), Stability::Fluctuating);
    assert_eq!(Stability::from_volatility(0.3999), Stability::Fluctuating);
    assert_eq!(Stability::from_volatility(0.40), Stability::Unstable);
    assert_eq!(Stability::Unstable.label(), "Tidak Stabil");
}

#[test]
fn test_status_bands() {
    assert_eq!(HealthStatus::from_score(80), HealthStatus::Healthy);
    assert_eq!(HealthStatus::from_score(79), HealthStatus::NeedsAttention);
    assert_eq!(HealthStatus::from_score(65), HealthStatus::NeedsAttention);
    assert_eq!(HealthStatus::from_score(64), HealthStatus::AtRisk);
    assert_eq!(HealthStatus::Healthy.to_string(), "Sehat");
}

#[test]
fn test_zero_baselines() {
    let series = monthly_series(&[0.0, 0.0, 0.0]);
    let snapshot = HealthSnapshot::from_series(&series);

    assert_eq!(snapshot.growth_pct, 0.0);
    assert_eq!(snapshot.volatility_ratio, 0.0);
    assert_eq!(snapshot.health_score, 100);
    assert_eq!(volatility_ratio(&[5.0, -5.0]), 0.0);
}

#[test]
fn test_steady_growth_recommends_expansion() {
    let series = monthly_series(&[100.0, 105.0, 110.0, 115.0]);
    let snapshot = HealthSnapshot::from_series(&series);

    assert_eq!(snapshot.growth_pct, 15.0);
    assert_eq!(snapshot.status, HealthStatus::Healthy);
    assert!(risk_alerts(&series, &snapshot).is_empty());
    assert_eq!(
        recommended_actions(&snapshot),
        vec![ActionRecommendation::Expand]
    );
}

#[test]
fn test_flat_series_falls_back_to_fundamentals() {
    let series = monthly_series(&[100.0, 101.0]);
    let snapshot = HealthSnapshot::from_series(&series);

    assert_eq!(
        recommended_actions(&snapshot),
        vec![ActionRecommendation::StrengthenFundamentals]
    );
}

#[test]
fn test_recent_decline_window() {
    // Early declines fall outside the three-change window
    let series = monthly_series(&[300.0, 200.0, 100.0, 110.0, 120.0, 130.0]);
    assert_eq!(recent_declines(&series), 0);

    let series = monthly_series(&[100.0, 120.0, 110.0, 90.0]);
    assert_eq!(recent_declines(&series), 2);

    // Two buckets give a single change
    let series = monthly_series(&[100.0, 90.0]);
    assert_eq!(recent_declines(&series), 1);
}

#[test]
fn test_drop_from_zero_bucket_counts_as_decline() {
    let series = monthly_series(&[100.0, 0.0, -50.0]);
    let snapshot = HealthSnapshot::from_series(&series);

    // The reported change out of the zero bucket is 0, but the value still fell
    assert_eq!(series.period_changes(), vec![-100.0, 0.0]);
    assert_eq!(recent_declines(&series), 2);
    assert!(risk_alerts(&series, &snapshot).contains(&RiskAlert::RecentDecline));
}

