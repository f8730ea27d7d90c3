//! Sondeo: Test Intelligence for UI Test Suites
//!
//! Sondeo (Spanish: "sounding") turns the raw material a UI test suite
//! accumulates into advisory signals for humans:
//!
//! - **Locator health**: a 0-105 score per locator from four factors
//! - **Duplicate clustering**: near-duplicate locators grouped with a
//!   recommended canonical locator
//! - **Failure analysis**: failure categories, per-test flakiness and the
//!   failure trend over time
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    SONDEO Architecture                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐                              │
//! │   │ Locator    │───►│ Health     │──┐                           │
//! │   │ snapshot   │─┐  │ Scorer     │  │   ┌────────────────┐      │
//! │   └────────────┘ │  └────────────┘  ├──►│ Intelligence   │      │
//! │                  │  ┌────────────┐  │   │ Report         │      │
//! │                  └─►│ Duplicate  │──┤   └────────────────┘      │
//! │                     │ Clusterer  │  │                           │
//! │   ┌────────────┐    └────────────┘  │                           │
//! │   │ Run        │    ┌────────────┐  │                           │
//! │   │ history    │───►│ Failure    │──┘                           │
//! │   └────────────┘    │ Analyzer   │                              │
//! │                     └────────────┘                              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every analyzer is a pure function over an immutable snapshot. Nothing here
//! performs I/O, runs tests or rewrites locators.
//!
//! ```
//! use sondeo::prelude::*;
//!
//! let locators = vec![
//!     LocatorRecord::new(LocatorType::Css, "#submit").with_tests(["checkout"]),
//!     LocatorRecord::new(LocatorType::Role, "submit").with_tests(["checkout", "login"]),
//! ];
//!
//! let groups = find_duplicates(&locators);
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].canonical.locator_type(), &LocatorType::Role);
//! assert_eq!(score(&locators[1]).status, HealthStatus::Excellent);
//! ```

#![warn(missing_docs)]

mod config;
mod duplicates;
mod failures;
mod health;
mod model;
mod report;
mod result;
mod similarity;

pub use config::{
    EngineConfig, DEFAULT_CROSS_TYPE_GATE, DEFAULT_CROSS_TYPE_PENALTY,
    DEFAULT_FLAKINESS_REPORT_THRESHOLD, DEFAULT_MIN_RUNS_FOR_FLAKINESS, DEFAULT_MIN_RUNS_FOR_TREND,
    DEFAULT_RECENT_FAILURES_LIMIT, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TREND_STABLE_BAND,
};
pub use duplicates::{find_duplicates, find_duplicates_with_config, type_priority, DuplicateGroup};
pub use failures::{
    analyze_failures, categorize, detect_flaky_tests, detect_flaky_tests_with_config,
    failure_trend, failure_trend_with_config, flakiness_score, FailureAnalysis, FailureCategory,
    FailureTrend, FlakyTestReport, Trend,
};
pub use health::{
    complexity_score, score, stability_score, summarize, type_score, usage_score, HealthFactors,
    HealthScore, HealthStatus, HealthSummary, ScoredLocator, TierCount, BASE_STABILITY_SCORE,
    LONG_LOCATOR_CHARS, MAX_COMPLEXITY_SCORE, MAX_HEALTH_SCORE, MAX_TYPE_SCORE,
    MAX_USAGE_SCORE,
};
pub use model::{AssertionFailure, LocatorRecord, LocatorType, RunStatus, TestRunRecord};
pub use report::{
    render_duplicates_text, render_failures_text, render_flaky_text, render_health_text,
    render_report_json, render_report_text, render_summary_text, render_trend_text,
    IntelligenceReport,
};
pub use result::{SondeoError, SondeoResult};
pub use similarity::{normalize_expression, normalized_similarity, similarity, similarity_with_config};

/// Commonly used items
pub mod prelude {
    pub use super::config::EngineConfig;
    pub use super::duplicates::{find_duplicates, DuplicateGroup};
    pub use super::failures::{
        analyze_failures, categorize, detect_flaky_tests, failure_trend, FailureAnalysis,
        FailureCategory, FailureTrend, FlakyTestReport, Trend,
    };
    pub use super::health::{score, summarize, HealthScore, HealthStatus, HealthSummary};
    pub use super::model::{AssertionFailure, LocatorRecord, LocatorType, RunStatus, TestRunRecord};
    pub use super::report::IntelligenceReport;
    pub use super::result::{SondeoError, SondeoResult};
}
