//! Configuration management and validation.
//!
//! Provides the analysis configuration: coercion and quality thresholds,
//! outlier fencing, and the readiness scoring variant. Configuration can be
//! layered from a TOML file on top of the defaults.

use crate::constants::{
    DATETIME_MATCH_THRESHOLD, HIGH_MISSING_RATE, HIGH_OUTLIER_RATE, IQR_FENCE_MULTIPLIER,
    LOW_VARIANCE_RATIO, MISSING_PLACEHOLDER, NUMERIC_MATCH_THRESHOLD, OUTLIER_MIN_SAMPLES,
    READINESS_FLOOR_OUTLIER_AWARE, READINESS_FLOOR_STANDARD,
};
use crate::error::{InsightError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Readiness scoring variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringVariant {
    /// Missing/variance penalties only, floored at 60
    #[default]
    Standard,
    /// Adds a penalty per high-outlier numeric column, floored at 55
    OutlierAware,
}

impl ScoringVariant {
    /// Lowest readiness score this variant can report
    pub fn floor(&self) -> i32 {
        match self {
            ScoringVariant::Standard => READINESS_FLOOR_STANDARD,
            ScoringVariant::OutlierAware => READINESS_FLOOR_OUTLIER_AWARE,
        }
    }

    /// Whether high-outlier numeric columns reduce the score
    pub fn penalizes_outliers(&self) -> bool {
        matches!(self, ScoringVariant::OutlierAware)
    }
}

/// Thresholds used by the type coercer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoercionConfig {
    /// Share of non-missing values that must parse as datetimes
    pub datetime_threshold: f64,
    /// Share of non-missing values that must parse as financial numbers
    pub numeric_threshold: f64,
    /// Fill value for all-missing text columns
    pub missing_placeholder: String,
}

impl Default for CoercionConfig {
    fn default() -> Self {
        Self {
            datetime_threshold: DATETIME_MATCH_THRESHOLD,
            numeric_threshold: NUMERIC_MATCH_THRESHOLD,
            missing_placeholder: MISSING_PLACEHOLDER.to_string(),
        }
    }
}

/// Thresholds used by the quality assessor and outlier detector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    pub high_missing_rate: f64,
    pub low_variance_ratio: f64,
    pub high_outlier_rate: f64,
    pub outlier_min_samples: usize,
    pub iqr_multiplier: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            high_missing_rate: HIGH_MISSING_RATE,
            low_variance_ratio: LOW_VARIANCE_RATIO,
            high_outlier_rate: HIGH_OUTLIER_RATE,
            outlier_min_samples: OUTLIER_MIN_SAMPLES,
            iqr_multiplier: IQR_FENCE_MULTIPLIER,
        }
    }
}

/// Global configuration for one analysis pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub variant: ScoringVariant,
    pub coercion: CoercionConfig,
    pub quality: QualityConfig,
}

impl AnalysisConfig {
    /// Set the readiness scoring variant
    pub fn with_variant(mut self, variant: ScoringVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the datetime coercion threshold
    pub fn with_datetime_threshold(mut self, threshold: f64) -> Self {
        self.coercion.datetime_threshold = threshold;
        self
    }

    /// Set the numeric coercion threshold
    pub fn with_numeric_threshold(mut self, threshold: f64) -> Self {
        self.coercion.numeric_threshold = threshold;
        self
    }

    /// Set the placeholder used for all-missing text columns
    pub fn with_missing_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.coercion.missing_placeholder = placeholder.into();
        self
    }

    /// Replace the quality thresholds
    pub fn with_quality(mut self, quality: QualityConfig) -> Self {
        self.quality = quality;
        self
    }

    /// Check that every ratio lies in [0, 1] and counts are usable
    pub fn validate(&self) -> Result<()> {
        let ratios = [
            ("coercion.datetime_threshold", self.coercion.datetime_threshold),
            ("coercion.numeric_threshold", self.coercion.numeric_threshold),
            ("quality.high_missing_rate", self.quality.high_missing_rate),
            ("quality.low_variance_ratio", self.quality.low_variance_ratio),
            ("quality.high_outlier_rate", self.quality.high_outlier_rate),
        ];

        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(InsightError::configuration(format!(
                    "{} must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }

        if self.quality.iqr_multiplier <= 0.0 {
            return Err(InsightError::configuration(format!(
                "quality.iqr_multiplier must be positive, got {}",
                self.quality.iqr_multiplier
            )));
        }

        if self.quality.outlier_min_samples < 4 {
            return Err(InsightError::configuration(format!(
                "quality.outlier_min_samples must be at least 4, got {}",
                self.quality.outlier_min_samples
            )));
        }

        Ok(())
    }

    /// Parse a configuration from TOML text, filling gaps with defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AnalysisConfig = toml::from_str(content).map_err(|e| {
            InsightError::configuration(format!("Invalid configuration file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            InsightError::configuration(format!(
                "Failed to read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;
        debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Default configuration file location (`<config dir>/data-insight/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("data-insight").join("config.toml"))
    }

    /// Load from an explicit path, else the default location if present, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}
