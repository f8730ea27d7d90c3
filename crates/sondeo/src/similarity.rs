//! Pairwise locator similarity on a 0-100 scale.
//!
//! Expressions are compared as opaque strings with normalized Levenshtein
//! similarity. Locators of different types only count as related when their
//! normalized expressions are already very close, and even then are penalized.

use crate::config::EngineConfig;
use crate::model::LocatorRecord;

/// Normalized edit similarity: `100 * (max_len - distance) / max_len`.
///
/// Lengths are in characters; two empty strings are identical.
#[must_use]
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 100.0;
    }
    let distance = strsim::levenshtein(a, b);
    100.0 * (max_len - distance) as f64 / max_len as f64
}

/// Canonical form used for cross-type comparison: lower-cased, without
/// whitespace, quotes, `.` or `#`.
#[must_use]
pub fn normalize_expression(expression: &str) -> String {
    expression
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '\'' | '"' | '`' | '.' | '#'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Similarity of two locators with the default thresholds
#[must_use]
pub fn similarity(a: &LocatorRecord, b: &LocatorRecord) -> f64 {
    similarity_with_config(a, b, &EngineConfig::default())
}

/// Similarity of two locators.
///
/// Symmetric in `a` and `b`.
#[must_use]
pub fn similarity_with_config(a: &LocatorRecord, b: &LocatorRecord, config: &EngineConfig) -> f64 {
    if a.locator_type() == b.locator_type() {
        if a.expression() == b.expression() {
            return 100.0;
        }
        return normalized_similarity(a.expression(), b.expression());
    }

    let normalized = normalized_similarity(
        &normalize_expression(a.expression()),
        &normalize_expression(b.expression()),
    );
    if normalized > config.cross_type_gate {
        normalized * config.cross_type_penalty
    } else {
        0.0
    }
}
