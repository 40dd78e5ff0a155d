//! Application constants for data insight
//!
//! Policy thresholds, scoring penalties and the fixed narrative strings used
//! by the cleaning pipeline and the KPI scorers.

// =============================================================================
// Type Coercion
// =============================================================================

/// Share of non-missing values that must parse as datetimes to commit a column
pub const DATETIME_MATCH_THRESHOLD: f64 = 0.80;

/// Share of non-missing values that must parse as financial numbers
pub const NUMERIC_MATCH_THRESHOLD: f64 = 0.60;

/// Placeholder used when a text column has no present value to take the mode of
pub const MISSING_PLACEHOLDER: &str = "Unknown";

/// Raw tokens read as missing cells at ingest
pub const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "#N/A",
    "<NA>",
];

/// Datetime layouts tried in order (date and time)
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts tried in order; month-first before day-first
pub const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%b %d, %Y",
    "%B %d, %Y", "%d %b %Y", "%d %B %Y", "%b %d %Y", "%B %d %Y",
];

// =============================================================================
// Quality Assessment
// =============================================================================

/// Missing rate above which a column is flagged as high-missing
pub const HIGH_MISSING_RATE: f64 = 0.30;

/// Unique ratio below which a categorical column is flagged as low-variance
pub const LOW_VARIANCE_RATIO: f64 = 0.05;

pub const READINESS_START: i32 = 100;
pub const HIGH_MISSING_PENALTY: i32 = 5;
pub const LOW_VARIANCE_PENALTY: i32 = 3;
pub const HIGH_OUTLIER_PENALTY: i32 = 4;

/// Readiness floor for the standard scoring variant
pub const READINESS_FLOOR_STANDARD: i32 = 60;

/// Readiness floor for the outlier-aware scoring variant
pub const READINESS_FLOOR_OUTLIER_AWARE: i32 = 55;

/// Outlier rate above which a numeric column costs readiness (outlier-aware variant)
pub const HIGH_OUTLIER_RATE: f64 = 0.10;

pub const READINESS_READY_MIN: i32 = 85;
pub const READINESS_PARTIAL_MIN: i32 = 70;

/// Maximum readiness summary lines shown to the user
pub const READINESS_SUMMARY_LIMIT: usize = 3;

// =============================================================================
// Outlier Detection
// =============================================================================

/// Minimum non-missing values before a column is checked for outliers
pub const OUTLIER_MIN_SAMPLES: usize = 10;

/// Tukey fence multiplier
pub const IQR_FENCE_MULTIPLIER: f64 = 1.5;

// =============================================================================
// Trend and Health Scoring
// =============================================================================

/// Minimum number of monthly buckets for any trend analysis
pub const MIN_TREND_BUCKETS: usize = 2;

/// Growth (percent) beyond which a trend counts as a real rise or fall
pub const GROWTH_SIGNIFICANT_PCT: f64 = 5.0;

pub const STABLE_VOLATILITY: f64 = 0.25;
pub const UNSTABLE_VOLATILITY: f64 = 0.40;

pub const HEALTH_START: i32 = 100;
pub const HEALTH_FLOOR: i32 = 40;
pub const STEEP_DECLINE_PENALTY: i32 = 25;
pub const MILD_DECLINE_PENALTY: i32 = 15;
pub const HIGH_VOLATILITY_PENALTY: i32 = 30;
pub const MODERATE_VOLATILITY_PENALTY: i32 = 15;

pub const HEALTHY_MIN: i32 = 80;
pub const NEEDS_ATTENTION_MIN: i32 = 65;

/// Number of trailing period-over-period changes inspected for a downturn
pub const RECENT_CHANGE_WINDOW: usize = 3;

/// Negative changes within the window that raise a downturn alert
pub const RECENT_DECLINE_ALERT_COUNT: usize = 2;

// =============================================================================
// Output
// =============================================================================

/// Default filename offered for the cleaned dataset
pub const DEFAULT_EXPORT_FILENAME: &str = "clean_financial_data.csv";

/// Narrative strings shown to the user
pub mod messages {
    pub const READINESS_READY: &str =
        "Data is well prepared for financial performance analysis and business decisions.";
    pub const READINESS_PARTIAL: &str =
        "Data is reasonably prepared, but several columns need attention.";
    pub const READINESS_NOT_READY: &str = "Data is not yet fit for critical business analysis.";

    pub const SUMMARY_HIGH_MISSING: &str =
        "Some columns have a high rate of missing values that may affect analysis accuracy.";
    pub const SUMMARY_LOW_VARIANCE: &str =
        "Some categorical columns have low variation and may carry little information.";
    pub const SUMMARY_HIGH_OUTLIERS: &str =
        "Some numeric columns contain many outliers that may distort averages and totals.";
    pub const SUMMARY_ADEQUATE: &str =
        "Structure, consistency and quality of the data are generally adequate for business analysis.";

    pub const RECOMMEND_KEEP_STRATEGY: &str =
        "Maintain the current business strategy as it is delivering good results.";
    pub const RECOMMEND_REVIEW_COSTS: &str =
        "Review costs, pricing or the sales strategy.";
    pub const RECOMMEND_EFFICIENCY: &str =
        "Focus strategy on efficiency and operational optimisation.";

    pub const EXEC_GROWTH_HEALTHY: &str = "Revenue performance shows a healthy growth trend.";
    pub const EXEC_GROWTH_DECLINING: &str =
        "Revenue is declining and should be evaluated promptly.";
    pub const EXEC_GROWTH_FLAT: &str = "Revenue is relatively stable without significant growth.";
    pub const EXEC_UNSTABLE: &str =
        "Revenue fluctuation is high and may increase operational risk.";
    pub const EXEC_FLUCTUATING: &str = "There is moderate fluctuation that should be monitored.";
    pub const EXEC_STABLE: &str = "Revenue shows good stability.";

    pub const RISK_RECENT_DECLINE: &str = "Revenue fell in several recent periods. \
         If this trend continues it may affect operating cash flow.";
    pub const RISK_HIGH_VOLATILITY: &str =
        "Revenue fluctuation is high. This increases the risk of financial instability.";
    pub const RISK_NEGATIVE_GROWTH: &str = "Overall, revenue shows a downward trend. \
         This may squeeze profitability if not addressed soon.";
    pub const RISK_NONE: &str = "No major short-term financial risk detected. \
         Financial performance is within controlled limits.";

    pub const ACTION_REVIEW_COST_STRUCTURE: &str =
        "Run a thorough review of the cost structure and pricing strategy to stop the revenue decline.";
    pub const ACTION_DIVERSIFY: &str = "Consider diversifying revenue sources to reduce dependence \
         on short-term fluctuations.";
    pub const ACTION_EXPAND: &str =
        "Financial condition is healthy enough to support expansion or added business capacity.";
    pub const ACTION_STRENGTHEN_FUNDAMENTALS: &str =
        "Focus strategy on operational efficiency and strengthening business fundamentals.";
}
