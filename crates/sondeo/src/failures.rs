//! Failure Analysis
//!
//! Categorizes failed runs, aggregates them per category, scores per-test
//! flakiness and compares the failure rate of recent runs against older ones.
//!
//! ## Flakiness
//!
//! A test that always passes or always fails is deterministic. Flakiness peaks
//! when a test fails half the time:
//!
//! ```text
//! score = round((1 - 2 * |failure_rate - 0.5|) * 100)
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::config::EngineConfig;
use crate::model::{RunStatus, TestRunRecord};
use crate::result::SondeoError;

/// Detected cause of a failed run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    /// Waited too long for something
    Timeout,
    /// An explicit assertion did not hold
    Assertion,
    /// The locator matched nothing
    ElementNotFound,
    /// Network request failed. Needs trace data; not produced yet.
    Network,
    /// Page script threw. Needs trace data; not produced yet.
    JavascriptError,
    /// No rule matched
    Unknown,
}

impl FailureCategory {
    /// Every category
    pub const ALL: [Self; 6] = [
        Self::Timeout,
        Self::Assertion,
        Self::ElementNotFound,
        Self::Network,
        Self::JavascriptError,
        Self::Unknown,
    ];

    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Assertion => "assertion",
            Self::ElementNotFound => "element_not_found",
            Self::Network => "network",
            Self::JavascriptError => "javascript_error",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for FailureCategory {
    type Err = SondeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| SondeoError::UnknownCategory {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failed runs sharing one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureAnalysis {
    /// The category
    pub category: FailureCategory,
    /// Distinct tests with a failure in this category
    pub affected_tests: BTreeSet<String>,
    /// Contributing runs in input order
    pub occurrences: Vec<TestRunRecord>,
    /// How widely the category spreads across tests (0-100)
    pub flakiness: f64,
}

/// Per-test flakiness across the whole run history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlakyTestReport {
    /// Test name
    pub test_name: String,
    /// All runs, whatever their status
    pub total_runs: usize,
    /// Passed runs
    pub passed_runs: usize,
    /// Failed runs
    pub failed_runs: usize,
    /// failed / total (0-1)
    pub failure_rate: f64,
    /// 0-100, peaking at a 50% failure rate
    pub flakiness_score: u32,
    /// Most recent failed runs, newest first
    pub recent_failures: Vec<TestRunRecord>,
}

/// Direction of the failure rate over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Fewer recent failures
    Improving,
    /// No meaningful change
    Stable,
    /// More recent failures
    Worsening,
}

impl Trend {
    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Stable => "stable",
            Self::Worsening => "worsening",
        }
    }

    /// Get display symbol
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Improving => "↓",
            Self::Stable => "→",
            Self::Worsening => "↑",
        }
    }
}

/// Failure rate of the newer half of the history against the older half
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureTrend {
    /// Direction
    pub trend: Trend,
    /// Failure rate of the newer half (0-1)
    pub recent_failure_rate: f64,
    /// Failure rate of the older half (0-1)
    pub previous_failure_rate: f64,
}

impl FailureTrend {
    const fn stable() -> Self {
        Self {
            trend: Trend::Stable,
            recent_failure_rate: 0.0,
            previous_failure_rate: 0.0,
        }
    }
}

/// Categorize one run from its first assertion failure
#[must_use]
pub fn categorize(run: &TestRunRecord) -> FailureCategory {
    let Some(first) = run.assertion_failures.first() else {
        return FailureCategory::Unknown;
    };

    if let Some(kind) = first.assertion_type.as_deref() {
        let kind = kind.to_lowercase();
        if kind.contains("timeout") || kind.contains("wait") {
            return FailureCategory::Timeout;
        }
        if kind.contains("assert") || kind.contains("expect") {
            return FailureCategory::Assertion;
        }
    }

    if let Some(target) = first.target.as_deref() {
        let target = target.to_lowercase();
        if ["locator", "element", "selector"]
            .iter()
            .any(|marker| target.contains(marker))
        {
            return FailureCategory::ElementNotFound;
        }
    }

    FailureCategory::Unknown
}

/// Group failed runs by category.
///
/// Categories appear in the order their first failure appears in `runs`.
#[must_use]
pub fn analyze_failures(runs: &[TestRunRecord]) -> Vec<FailureAnalysis> {
    let failed: Vec<&TestRunRecord> = runs.iter().filter(|r| r.is_failed()).collect();
    // one pass of categorization, indexed like `failed`
    let categories: Vec<FailureCategory> = failed.iter().map(|r| categorize(r)).collect();

    let mut analyses: Vec<FailureAnalysis> = Vec::new();
    for (run, category) in failed.iter().zip(&categories) {
        let index = match analyses.iter().position(|a| a.category == *category) {
            Some(index) => index,
            None => {
                analyses.push(FailureAnalysis {
                    category: *category,
                    affected_tests: BTreeSet::new(),
                    occurrences: Vec::new(),
                    flakiness: 0.0,
                });
                analyses.len() - 1
            }
        };
        let analysis = &mut analyses[index];
        analysis.affected_tests.insert(run.test_name.clone());
        analysis.occurrences.push((*run).clone());
    }

    for analysis in &mut analyses {
        let distinct = analysis.affected_tests.len();
        if distinct > 1 {
            let spread = distinct as f64 / analysis.occurrences.len() as f64;
            analysis.flakiness = (spread * 50.0).min(100.0);
        }
    }

    tracing::debug!(
        runs = runs.len(),
        failed = failed.len(),
        categories = analyses.len(),
        "analyzed failures"
    );
    analyses
}

/// Flakiness score for a failure rate (0-100)
#[must_use]
pub fn flakiness_score(failure_rate: f64) -> u32 {
    let score = ((1.0 - 2.0 * (failure_rate - 0.5).abs()) * 100.0).round();
    score.max(0.0) as u32
}

/// Detect flaky tests with the default thresholds
#[must_use]
pub fn detect_flaky_tests(runs: &[TestRunRecord]) -> Vec<FlakyTestReport> {
    detect_flaky_tests_with_config(runs, &EngineConfig::default())
}

/// Detect flaky tests, most flaky first.
///
/// Tests with too few runs, or whose score does not exceed the reporting
/// threshold, are left out.
#[must_use]
pub fn detect_flaky_tests_with_config(
    runs: &[TestRunRecord],
    config: &EngineConfig,
) -> Vec<FlakyTestReport> {
    let mut order: Vec<&str> = Vec::new();
    let mut by_test: HashMap<&str, Vec<&TestRunRecord>> = HashMap::new();
    for run in runs {
        by_test
            .entry(run.test_name.as_str())
            .or_insert_with(|| {
                order.push(run.test_name.as_str());
                Vec::new()
            })
            .push(run);
    }

    let mut reports: Vec<FlakyTestReport> = order
        .into_iter()
        .filter_map(|name| {
            let test_runs = by_test.get(name)?;
            let total_runs = test_runs.len();
            if total_runs < config.min_runs_for_flakiness {
                return None;
            }

            let passed_runs = count_status(test_runs, RunStatus::Passed);
            let failed_runs = count_status(test_runs, RunStatus::Failed);
            let failure_rate = failed_runs as f64 / total_runs as f64;
            let score = flakiness_score(failure_rate);
            if score <= config.flakiness_report_threshold {
                return None;
            }

            let mut failures: Vec<&TestRunRecord> =
                test_runs.iter().copied().filter(|r| r.is_failed()).collect();
            failures.sort_by(|a, b| b.started_at.cmp(&a.started_at));
            let recent_failures = failures
                .into_iter()
                .take(config.recent_failures_limit)
                .cloned()
                .collect();

            Some(FlakyTestReport {
                test_name: name.to_string(),
                total_runs,
                passed_runs,
                failed_runs,
                failure_rate,
                flakiness_score: score,
                recent_failures,
            })
        })
        .collect();

    reports.sort_by(|a, b| {
        b.flakiness_score
            .cmp(&a.flakiness_score)
            .then_with(|| a.test_name.cmp(&b.test_name))
    });

    tracing::debug!(runs = runs.len(), flaky = reports.len(), "detected flaky tests");
    reports
}

fn count_status(runs: &[&TestRunRecord], status: RunStatus) -> usize {
    runs.iter().filter(|r| r.status == status).count()
}

fn failure_rate(runs: &[&TestRunRecord]) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    count_status(runs, RunStatus::Failed) as f64 / runs.len() as f64
}

/// Failure trend with the default thresholds
#[must_use]
pub fn failure_trend(runs: &[TestRunRecord]) -> FailureTrend {
    failure_trend_with_config(runs, &EngineConfig::default())
}

/// Compare the newer half of the history with the older half.
///
/// Histories shorter than the configured minimum are reported as stable with
/// zero rates.
#[must_use]
pub fn failure_trend_with_config(runs: &[TestRunRecord], config: &EngineConfig) -> FailureTrend {
    if runs.len() < config.min_runs_for_trend {
        return FailureTrend::stable();
    }

    let mut sorted: Vec<&TestRunRecord> = runs.iter().collect();
    sorted.sort_by(|a, b| b.started_at.cmp(&a.started_at));
    let (recent, previous) = sorted.split_at(sorted.len() / 2);

    let recent_failure_rate = failure_rate(recent);
    let previous_failure_rate = failure_rate(previous);
    let diff = recent_failure_rate - previous_failure_rate;

    let trend = if diff.abs() < config.trend_stable_band {
        Trend::Stable
    } else if diff < 0.0 {
        Trend::Improving
    } else {
        Trend::Worsening
    };

    tracing::trace!(
        recent = recent.len(),
        previous = previous.len(),
        recent_failure_rate,
        previous_failure_rate,
        trend = trend.as_str(),
        "computed failure trend"
    );

    FailureTrend {
        trend,
        recent_failure_rate,
        previous_failure_rate,
    }
}
