//! Workspace intelligence report
//!
//! Runs every analyzer over one snapshot and renders the results as text or
//! JSON.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::duplicates::{find_duplicates_with_config, DuplicateGroup};
use crate::failures::{
    analyze_failures, detect_flaky_tests_with_config, failure_trend_with_config, FailureAnalysis,
    FailureTrend, FlakyTestReport,
};
use crate::health::{self, HealthSummary, ScoredLocator};
use crate::model::{LocatorRecord, TestRunRecord};
use crate::result::SondeoResult;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Everything the engine knows about one workspace snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntelligenceReport {
    /// Locator health overview
    pub health: HealthSummary,
    /// Near-duplicate locator clusters
    pub duplicates: Vec<DuplicateGroup>,
    /// Failures by category
    pub failures: Vec<FailureAnalysis>,
    /// Flaky tests, most flaky first
    pub flaky_tests: Vec<FlakyTestReport>,
    /// Failure trend
    pub trend: FailureTrend,
}

impl IntelligenceReport {
    /// Analyze a snapshot with the default configuration
    #[must_use]
    pub fn build(locators: &[LocatorRecord], runs: &[TestRunRecord]) -> Self {
        Self::build_with_config(locators, runs, &EngineConfig::default())
    }

    /// Analyze a snapshot
    #[must_use]
    pub fn build_with_config(
        locators: &[LocatorRecord],
        runs: &[TestRunRecord],
        config: &EngineConfig,
    ) -> Self {
        Self {
            health: health::summarize(locators),
            duplicates: find_duplicates_with_config(locators, config),
            failures: analyze_failures(runs),
            flaky_tests: detect_flaky_tests_with_config(runs, config),
            trend: failure_trend_with_config(runs, config),
        }
    }
}

/// Render the per-locator health table
#[must_use]
pub fn render_health_text(scored: &[ScoredLocator], verbose: bool) -> String {
    let mut output = String::new();

    output.push_str("LOCATOR HEALTH\n");
    output.push_str(RULE);
    output.push_str("\n\n");

    if scored.is_empty() {
        output.push_str("No locators.\n");
        return output;
    }

    output.push_str("┌────────┬────────────┬──────────────────────────────────────────────┐\n");
    output.push_str("│ Score  │ Status     │ Locator                                      │\n");
    output.push_str("├────────┼────────────┼──────────────────────────────────────────────┤\n");
    for entry in scored {
        let status = format!(
            "{} {}",
            entry.health.status.symbol(),
            entry.health.status.as_str()
        );
        output.push_str(&format!(
            "│ {:>3}/105│ {:<10} │ {:<44} │\n",
            entry.health.total,
            status,
            truncate(&entry.locator.label(), 44)
        ));
    }
    output.push_str("└────────┴────────────┴──────────────────────────────────────────────┘\n");

    if verbose {
        output.push_str("\nDetailed Breakdown:\n");
        for entry in scored {
            let f = &entry.health.factors;
            output.push_str(&format!(
                "\n## {}\n  type {}/40  complexity {}/30  stability {}/25  usage {}/10\n",
                entry.locator.label(),
                f.type_score,
                f.complexity_score,
                f.stability_score,
                f.usage_score
            ));
            for rec in &entry.health.recommendations {
                output.push_str(&format!("  - {}\n", rec));
            }
        }
    }

    output
}

/// Render the suite health summary
#[must_use]
pub fn render_summary_text(summary: &HealthSummary) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Locators: {}  Average score: {:.1}\n",
        summary.locator_count, summary.average_score
    ));
    let tiers: Vec<String> = summary
        .tiers
        .iter()
        .map(|t| format!("{} {}", t.status.as_str(), t.count))
        .collect();
    output.push_str(&format!("Tiers: {}\n", tiers.join(", ")));

    if !summary.at_risk.is_empty() {
        output.push_str("\nNeeds attention:\n");
        for entry in &summary.at_risk {
            output.push_str(&format!(
                "  {} {:>3} {}\n",
                entry.health.status.symbol(),
                entry.health.total,
                entry.locator.label()
            ));
            if let Some(first) = entry.health.recommendations.first() {
                output.push_str(&format!("        {}\n", first));
            }
        }
    }
    output
}

/// Render duplicate clusters
#[must_use]
pub fn render_duplicates_text(groups: &[DuplicateGroup]) -> String {
    let mut output = String::new();

    output.push_str("DUPLICATE LOCATORS\n");
    output.push_str(RULE);
    output.push_str("\n\n");

    if groups.is_empty() {
        output.push_str("No duplicate locators found.\n");
        return output;
    }

    for (i, group) in groups.iter().enumerate() {
        output.push_str(&format!(
            "{}. {} locators, {:.1}% similar\n",
            i + 1,
            group.members.len(),
            group.similarity
        ));
        output.push_str(&format!("   Keep:    {}\n", group.canonical.label()));
        for candidate in group.merge_candidates() {
            output.push_str(&format!("   Replace: {}\n", candidate.label()));
        }
        output.push_str(&format!("   Why:     {}\n\n", group.rationale));
    }

    output
}

/// Render failures by category
#[must_use]
pub fn render_failures_text(analyses: &[FailureAnalysis]) -> String {
    let mut output = String::new();

    output.push_str("FAILURES BY CATEGORY\n");
    output.push_str(RULE);
    output.push_str("\n\n");

    if analyses.is_empty() {
        output.push_str("No failed runs.\n");
        return output;
    }

    output.push_str("┌─────────────────────┬─────────────┬────────┬────────────┐\n");
    output.push_str("│ Category            │ Occurrences │ Tests  │ Spread     │\n");
    output.push_str("├─────────────────────┼─────────────┼────────┼────────────┤\n");
    for analysis in analyses {
        output.push_str(&format!(
            "│ {:<19} │ {:>11} │ {:>6} │ {:>9.1}% │\n",
            analysis.category.as_str(),
            analysis.occurrences.len(),
            analysis.affected_tests.len(),
            analysis.flakiness
        ));
    }
    output.push_str("└─────────────────────┴─────────────┴────────┴────────────┘\n");

    output
}

/// Render flaky test reports
#[must_use]
pub fn render_flaky_text(reports: &[FlakyTestReport]) -> String {
    let mut output = String::new();

    output.push_str("FLAKY TESTS\n");
    output.push_str(RULE);
    output.push_str("\n\n");

    if reports.is_empty() {
        output.push_str("No flaky tests detected.\n");
        return output;
    }

    for report in reports {
        output.push_str(&format!(
            "{:>3} {}  ({}/{} failed, {:.0}%)\n",
            report.flakiness_score,
            report.test_name,
            report.failed_runs,
            report.total_runs,
            report.failure_rate * 100.0
        ));
        for failure in &report.recent_failures {
            output.push_str(&format!(
                "      {}\n",
                failure.started_at.format("%Y-%m-%d %H:%M:%S")
            ));
        }
    }

    output
}

/// Render the failure trend
#[must_use]
pub fn render_trend_text(trend: &FailureTrend) -> String {
    format!(
        "Trend: {} {} (recent {:.1}% vs previous {:.1}%)\n",
        trend.trend.symbol(),
        trend.trend.as_str(),
        trend.recent_failure_rate * 100.0,
        trend.previous_failure_rate * 100.0
    )
}

/// Render the full report
#[must_use]
pub fn render_report_text(report: &IntelligenceReport) -> String {
    let mut output = String::new();

    output.push_str("TEST INTELLIGENCE REPORT\n");
    output.push_str(RULE);
    output.push_str("\n\n");
    output.push_str(&render_summary_text(&report.health));
    output.push('\n');
    output.push_str(&render_duplicates_text(&report.duplicates));
    output.push('\n');
    output.push_str(&render_failures_text(&report.failures));
    output.push('\n');
    output.push_str(&render_flaky_text(&report.flaky_tests));
    output.push('\n');
    output.push_str(&render_trend_text(&report.trend));

    output
}

/// Render the full report as JSON
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_report_json(report: &IntelligenceReport) -> SondeoResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
