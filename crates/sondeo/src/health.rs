//! Locator Health Scoring
//!
//! Scores a single locator from 0 to 105 out of four independent factors and
//! maps the total onto an advisory status tier.
//!
//! ## Factors
//!
//! | Factor | Points |
//! |--------|--------|
//! | Type | 40 |
//! | Complexity | 30 |
//! | Stability | 20 (+5 bonus) |
//! | Usage | 10 |

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::model::{LocatorRecord, LocatorType};

/// Maximum type factor
pub const MAX_TYPE_SCORE: u32 = 40;
/// Maximum complexity factor
pub const MAX_COMPLEXITY_SCORE: u32 = 30;
/// Nominal stability cap, before the heavy-usage bonus
pub const BASE_STABILITY_SCORE: u32 = 20;
/// Maximum usage factor
pub const MAX_USAGE_SCORE: u32 = 10;
/// Highest reachable total, stability bonus included
pub const MAX_HEALTH_SCORE: u32 =
    MAX_TYPE_SCORE + MAX_COMPLEXITY_SCORE + BASE_STABILITY_SCORE + HEAVY_USAGE_BONUS + MAX_USAGE_SCORE;

const HEAVY_USAGE_BONUS: u32 = 5;

/// Locators longer than this are penalized and flagged
pub const LONG_LOCATOR_CHARS: usize = 100;

/// Advisory tier for a health total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// 90 and above
    Excellent,
    /// 75-89
    Good,
    /// 60-74
    Fair,
    /// 40-59
    Poor,
    /// Below 40
    Critical,
}

impl HealthStatus {
    /// Every tier, best first
    pub const ALL: [Self; 5] = [
        Self::Excellent,
        Self::Good,
        Self::Fair,
        Self::Poor,
        Self::Critical,
    ];

    /// Get the tier for a total
    #[must_use]
    pub const fn from_total(total: u32) -> Self {
        match total {
            90.. => Self::Excellent,
            75..=89 => Self::Good,
            60..=74 => Self::Fair,
            40..=59 => Self::Poor,
            _ => Self::Critical,
        }
    }

    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::Critical => "critical",
        }
    }

    /// Get display symbol
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Excellent | Self::Good => "✓",
            Self::Fair => "⚠",
            Self::Poor | Self::Critical => "✗",
        }
    }

    /// Whether the locator needs attention
    #[must_use]
    pub const fn is_at_risk(&self) -> bool {
        matches!(self, Self::Poor | Self::Critical)
    }
}

/// The four factor scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthFactors {
    /// Locator strategy reliability (0-40)
    pub type_score: u32,
    /// Selector simplicity (0-30)
    pub complexity_score: u32,
    /// Resistance to DOM churn (0-25)
    pub stability_score: u32,
    /// How widely the locator is used (0-10)
    pub usage_score: u32,
}

impl HealthFactors {
    /// Sum of all factors
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.type_score + self.complexity_score + self.stability_score + self.usage_score
    }
}

/// Health of one locator. Recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthScore {
    /// Factor breakdown
    pub factors: HealthFactors,
    /// Sum of factors (0-105)
    pub total: u32,
    /// Tier of the total
    pub status: HealthStatus,
    /// Advice, most important first. Never empty.
    pub recommendations: Vec<String>,
}

struct Patterns {
    bare_id: Regex,
    bare_class: Regex,
    numeric_run: Regex,
}

#[allow(clippy::expect_used)]
fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        bare_id: Regex::new(r"^#[A-Za-z][A-Za-z0-9_-]*$").expect("bare id pattern"),
        bare_class: Regex::new(r"^\.[A-Za-z][A-Za-z0-9_-]*$").expect("bare class pattern"),
        numeric_run: Regex::new(r"\d{2,}").expect("numeric run pattern"),
    })
}

/// Score one locator
#[must_use]
pub fn score(locator: &LocatorRecord) -> HealthScore {
    let expression = locator.expression();
    let usage = locator.usage_count();

    let factors = HealthFactors {
        type_score: type_score(locator.locator_type(), expression),
        complexity_score: complexity_score(expression),
        stability_score: stability_score(expression, usage),
        usage_score: usage_score(usage),
    };
    let total = factors.total();
    let status = HealthStatus::from_total(total);
    let recommendations = recommendations(locator, &factors, status);

    HealthScore {
        factors,
        total,
        status,
        recommendations,
    }
}

/// Type factor (0-40)
#[must_use]
pub fn type_score(locator_type: &LocatorType, expression: &str) -> u32 {
    match locator_type {
        LocatorType::Role | LocatorType::Label | LocatorType::Placeholder => 40,
        LocatorType::TestId => 35,
        LocatorType::Text => 25,
        LocatorType::Css => {
            let p = patterns();
            if p.bare_id.is_match(expression) || p.bare_class.is_match(expression) {
                20
            } else {
                15
            }
        }
        LocatorType::XPath => {
            if is_complex_xpath(expression) {
                5
            } else {
                10
            }
        }
        LocatorType::Other(_) => 10,
    }
}

/// Complexity factor (0-30)
#[must_use]
pub fn complexity_score(expression: &str) -> u32 {
    let mut penalty = 0u32;

    if expression.contains("nth-child") {
        penalty += 10;
    }
    if expression.contains("nth-of-type") {
        penalty += 10;
    }
    for marker in ["::", ">", "~", "+"] {
        if expression.contains(marker) {
            penalty += 5;
        }
    }
    if patterns().numeric_run.is_match(expression) {
        penalty += 5;
    }
    if expression.chars().count() > LONG_LOCATOR_CHARS {
        penalty += 5;
    }
    let chained = expression
        .chars()
        .filter(|c| matches!(c, '.' | '#' | '['))
        .count();
    if chained > 3 {
        penalty += 5;
    }

    MAX_COMPLEXITY_SCORE.saturating_sub(penalty)
}

/// Stability factor (0-25)
#[must_use]
pub fn stability_score(expression: &str, usage_count: usize) -> u32 {
    let lower = expression.to_lowercase();
    let mut score = BASE_STABILITY_SCORE as i32;

    if usage_count >= 5 {
        score += HEAVY_USAGE_BONUS as i32;
    }
    if usage_count == 0 {
        score -= 10;
    }
    if lower.contains("dynamic") || lower.contains("temp") {
        score -= 10;
    }
    if lower.contains("div") && !lower.contains("role") && !lower.contains("testid") {
        score -= 5;
    }

    score.max(0) as u32
}

/// Usage factor (0-10)
#[must_use]
pub const fn usage_score(usage_count: usize) -> u32 {
    match usage_count {
        10.. => 10,
        5..=9 => 8,
        2..=4 => 6,
        1 => 4,
        0 => 2,
    }
}

fn is_complex_xpath(expression: &str) -> bool {
    expression.contains("//") || expression.contains('[') || expression.contains('@')
}

fn recommendations(
    locator: &LocatorRecord,
    factors: &HealthFactors,
    status: HealthStatus,
) -> Vec<String> {
    if status == HealthStatus::Excellent {
        return vec!["Excellent locator: stable, simple and widely used".to_string()];
    }

    let usage = locator.usage_count();
    let mut advice = Vec::new();

    if factors.type_score < 25 {
        advice.push(
            "Prefer role-, label- or testId-based locators over CSS/XPath selectors".to_string(),
        );
    }
    if factors.complexity_score < 20 {
        advice.push(
            "Simplify the selector: avoid nth-child/nth-of-type indices and chained selectors"
                .to_string(),
        );
    }
    if factors.stability_score < 15 && usage == 0 {
        advice.push("No test uses this locator; verify it still matches or remove it".to_string());
    } else if factors.usage_score < 5 {
        advice.push(format!(
            "Only used in {} test; confirm it is still needed",
            usage
        ));
    }
    if *locator.locator_type() == LocatorType::XPath && is_complex_xpath(locator.expression()) {
        advice.push(
            "Replace this XPath (descendant axes, predicates or attributes) with a role or testId locator"
                .to_string(),
        );
    }
    if locator.expression().chars().count() > LONG_LOCATOR_CHARS {
        advice.push(
            "Break this long locator into a scoped parent locator and a short child locator"
                .to_string(),
        );
    }

    if advice.is_empty() {
        advice.push("Locator quality is acceptable".to_string());
    }
    advice
}

/// A locator paired with its score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredLocator {
    /// The locator
    pub locator: LocatorRecord,
    /// Its health
    pub health: HealthScore,
}

/// Count of locators in one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCount {
    /// Tier
    pub status: HealthStatus,
    /// Locators in the tier
    pub count: usize,
}

/// Suite-wide health overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    /// Number of locators scored
    pub locator_count: usize,
    /// Mean total, 0 for an empty suite
    pub average_score: f64,
    /// Locators per tier, best tier first
    pub tiers: Vec<TierCount>,
    /// Poor and critical locators, lowest score first
    pub at_risk: Vec<ScoredLocator>,
}

/// Score every locator and summarize the suite
#[must_use]
pub fn summarize(locators: &[LocatorRecord]) -> HealthSummary {
    let scored: Vec<ScoredLocator> = locators
        .iter()
        .map(|locator| ScoredLocator {
            locator: locator.clone(),
            health: score(locator),
        })
        .collect();

    let average_score = if scored.is_empty() {
        0.0
    } else {
        scored.iter().map(|s| s.health.total as f64).sum::<f64>() / scored.len() as f64
    };

    let tiers = HealthStatus::ALL
        .iter()
        .map(|&status| TierCount {
            status,
            count: scored.iter().filter(|s| s.health.status == status).count(),
        })
        .collect();

    let mut at_risk: Vec<ScoredLocator> = scored
        .into_iter()
        .filter(|s| s.health.status.is_at_risk())
        .collect();
    at_risk.sort_by_key(|s| s.health.total);

    tracing::debug!(
        locators = locators.len(),
        at_risk = at_risk.len(),
        average_score,
        "summarized locator health"
    );

    HealthSummary {
        locator_count: locators.len(),
        average_score,
        tiers,
        at_risk,
    }
}
