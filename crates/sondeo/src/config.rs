//! Tunable thresholds for the analyzers.

use serde::{Deserialize, Serialize};

use crate::result::{SondeoError, SondeoResult};

/// Minimum pairwise similarity for two locators to share a cluster
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 80.0;

/// Normalized similarity a cross-type pair must exceed to count at all
pub const DEFAULT_CROSS_TYPE_GATE: f64 = 70.0;

/// Scale applied to cross-type similarity
pub const DEFAULT_CROSS_TYPE_PENALTY: f64 = 0.8;

/// Minimum runs before a test's flakiness is judged
pub const DEFAULT_MIN_RUNS_FOR_FLAKINESS: usize = 3;

/// Flakiness score a test must exceed to be reported
pub const DEFAULT_FLAKINESS_REPORT_THRESHOLD: u32 = 20;

/// Failed runs kept per flaky test report
pub const DEFAULT_RECENT_FAILURES_LIMIT: usize = 5;

/// Minimum runs before a trend is computed
pub const DEFAULT_MIN_RUNS_FOR_TREND: usize = 4;

/// Failure-rate difference below which the trend is stable
pub const DEFAULT_TREND_STABLE_BAND: f64 = 0.05;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Cluster membership threshold (0-100)
    pub similarity_threshold: f64,
    /// Cross-type gate (0-100)
    pub cross_type_gate: f64,
    /// Cross-type penalty factor (0-1)
    pub cross_type_penalty: f64,
    /// Minimum runs per test for flakiness
    pub min_runs_for_flakiness: usize,
    /// Reporting threshold for flakiness scores
    pub flakiness_report_threshold: u32,
    /// Recent failures kept per report
    pub recent_failures_limit: usize,
    /// Minimum runs for a trend
    pub min_runs_for_trend: usize,
    /// Stable band for the trend
    pub trend_stable_band: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            cross_type_gate: DEFAULT_CROSS_TYPE_GATE,
            cross_type_penalty: DEFAULT_CROSS_TYPE_PENALTY,
            min_runs_for_flakiness: DEFAULT_MIN_RUNS_FOR_FLAKINESS,
            flakiness_report_threshold: DEFAULT_FLAKINESS_REPORT_THRESHOLD,
            recent_failures_limit: DEFAULT_RECENT_FAILURES_LIMIT,
            min_runs_for_trend: DEFAULT_MIN_RUNS_FOR_TREND,
            trend_stable_band: DEFAULT_TREND_STABLE_BAND,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cluster membership threshold
    #[must_use]
    pub const fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Set the cross-type gate and penalty
    #[must_use]
    pub const fn with_cross_type(mut self, gate: f64, penalty: f64) -> Self {
        self.cross_type_gate = gate;
        self.cross_type_penalty = penalty;
        self
    }

    /// Set the minimum runs for flakiness
    #[must_use]
    pub const fn with_min_runs_for_flakiness(mut self, runs: usize) -> Self {
        self.min_runs_for_flakiness = runs;
        self
    }

    /// Set the flakiness reporting threshold
    #[must_use]
    pub const fn with_flakiness_report_threshold(mut self, threshold: u32) -> Self {
        self.flakiness_report_threshold = threshold;
        self
    }

    /// Set the number of recent failures kept per report
    #[must_use]
    pub const fn with_recent_failures_limit(mut self, limit: usize) -> Self {
        self.recent_failures_limit = limit;
        self
    }

    /// Set the trend stable band
    #[must_use]
    pub const fn with_trend_stable_band(mut self, band: f64) -> Self {
        self.trend_stable_band = band;
        self
    }

    /// Check that every value is in range
    pub fn validate(&self) -> SondeoResult<()> {
        check_percent("similarity_threshold", self.similarity_threshold)?;
        check_percent("cross_type_gate", self.cross_type_gate)?;
        if !(0.0..=1.0).contains(&self.cross_type_penalty) {
            return Err(SondeoError::invalid_config(
                "cross_type_penalty",
                format!("{} is outside 0..=1", self.cross_type_penalty),
            ));
        }
        if self.flakiness_report_threshold > 100 {
            return Err(SondeoError::invalid_config(
                "flakiness_report_threshold",
                format!("{} is above 100", self.flakiness_report_threshold),
            ));
        }
        if self.recent_failures_limit == 0 {
            return Err(SondeoError::invalid_config(
                "recent_failures_limit",
                "must keep at least one failure",
            ));
        }
        if self.min_runs_for_trend < 2 {
            return Err(SondeoError::invalid_config(
                "min_runs_for_trend",
                "needs at least two runs to split into halves",
            ));
        }
        if self.trend_stable_band.is_nan() || self.trend_stable_band < 0.0 {
            return Err(SondeoError::invalid_config(
                "trend_stable_band",
                format!("{} must be a non-negative number", self.trend_stable_band),
            ));
        }
        Ok(())
    }
}

fn check_percent(field: &'static str, value: f64) -> SondeoResult<()> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(SondeoError::invalid_config(
            field,
            format!("{value} is outside 0..=100"),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.similarity_threshold, 80.0);
        assert_eq!(config.cross_type_gate, 70.0);
        assert_eq!(config.cross_type_penalty, 0.8);
        assert_eq!(config.min_runs_for_flakiness, 3);
        assert_eq!(config.flakiness_report_threshold, 20);
        assert_eq!(config.recent_failures_limit, 5);
        assert_eq!(config.min_runs_for_trend, 4);
        assert_eq!(config.trend_stable_band, 0.05);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new()
            .with_similarity_threshold(90.0)
            .with_cross_type(60.0, 0.5)
            .with_recent_failures_limit(3);
        assert_eq!(config.similarity_threshold, 90.0);
        assert_eq!(config.cross_type_gate, 60.0);
        assert_eq!(config.cross_type_penalty, 0.5);
        assert_eq!(config.recent_failures_limit, 3);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(EngineConfig::new()
            .with_similarity_threshold(120.0)
            .validate()
            .is_err());
        assert!(EngineConfig::new()
            .with_cross_type(70.0, 1.5)
            .validate()
            .is_err());
        assert!(EngineConfig::new()
            .with_recent_failures_limit(0)
            .validate()
            .is_err());
        assert!(EngineConfig::new()
            .with_trend_stable_band(f64::NAN)
            .validate()
            .is_err());
        assert!(EngineConfig::new()
            .with_flakiness_report_threshold(101)
            .validate()
            .is_err());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"similarityThreshold": 85.0}"#).unwrap();
        assert_eq!(config.similarity_threshold, 85.0);
        assert_eq!(config.cross_type_penalty, 0.8);
    }
}
