//! Duplicate Locator Clustering
//!
//! Partitions a workspace's locators into clusters of near-duplicates and
//! recommends one canonical locator per cluster. Clusters are advisory; merging
//! is left to whoever owns the locator store.
//!
//! Seeds are taken left to right. A cluster grows from its seed by pulling in
//! every unassigned locator within the similarity threshold of any member, so
//! cluster membership does not depend on input order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::config::EngineConfig;
use crate::model::{LocatorRecord, LocatorType};
use crate::similarity::similarity_with_config;

/// A cluster of locators judged to target the same element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    /// Members in input order, at least two
    pub members: Vec<LocatorRecord>,
    /// Mean pairwise similarity across all member pairs (0-100)
    pub similarity: f64,
    /// Recommended replacement for the other members
    pub canonical: LocatorRecord,
    /// Position of the canonical locator in `members`
    pub canonical_index: usize,
    /// Why the canonical member was chosen
    pub rationale: String,
}

impl DuplicateGroup {
    /// Members other than the canonical one.
    ///
    /// Selected by position, so an exact copy of the canonical is still a candidate.
    pub fn merge_candidates(&self) -> impl Iterator<Item = &LocatorRecord> {
        self.members
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != self.canonical_index)
            .map(|(_, m)| m)
    }

    /// Every test touched by any member
    #[must_use]
    pub fn affected_tests(&self) -> BTreeSet<&str> {
        self.members
            .iter()
            .flat_map(|m| m.used_in_tests().iter().map(String::as_str))
            .collect()
    }
}

/// Canonical-selection priority of a locator type. Higher is preferred.
#[must_use]
pub const fn type_priority(locator_type: &LocatorType) -> u8 {
    match locator_type {
        LocatorType::Role => 7,
        LocatorType::Label => 6,
        LocatorType::TestId => 5,
        LocatorType::Placeholder => 4,
        LocatorType::Text => 3,
        LocatorType::Css => 2,
        LocatorType::XPath => 1,
        LocatorType::Other(_) => 0,
    }
}

/// Cluster locators with the default thresholds
#[must_use]
pub fn find_duplicates(locators: &[LocatorRecord]) -> Vec<DuplicateGroup> {
    find_duplicates_with_config(locators, &EngineConfig::default())
}

/// Cluster locators.
///
/// Runs O(n²) similarity computations in the worst case; hosts with large
/// locator sets should call this off their interactive thread.
#[must_use]
pub fn find_duplicates_with_config(
    locators: &[LocatorRecord],
    config: &EngineConfig,
) -> Vec<DuplicateGroup> {
    let n = locators.len();
    let mut assigned = vec![false; n];
    let mut groups = Vec::new();

    for seed in 0..n {
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;

        let mut members = vec![seed];
        let mut next = 0;
        while next < members.len() {
            let current = members[next];
            next += 1;
            // every index before the seed is already assigned
            for candidate in seed + 1..n {
                if assigned[candidate] {
                    continue;
                }
                let sim = similarity_with_config(&locators[current], &locators[candidate], config);
                if sim >= config.similarity_threshold {
                    assigned[candidate] = true;
                    members.push(candidate);
                }
            }
        }

        if members.len() > 1 {
            members.sort_unstable();
            let group: Vec<&LocatorRecord> = members.iter().map(|&i| &locators[i]).collect();
            groups.push(finalize(&group, config));
        }
    }

    tracing::debug!(
        locators = n,
        groups = groups.len(),
        "clustered duplicate locators"
    );
    groups
}

fn finalize(members: &[&LocatorRecord], config: &EngineConfig) -> DuplicateGroup {
    let mut total = 0.0;
    let mut pairs = 0usize;
    for (i, a) in members.iter().enumerate() {
        for b in &members[i + 1..] {
            total += similarity_with_config(a, b, config);
            pairs += 1;
        }
    }
    let similarity = if pairs == 0 { 100.0 } else { total / pairs as f64 };

    let mut order: Vec<usize> = (0..members.len()).collect();
    order.sort_by(|&a, &b| compare_for_canonical(members[a], members[b]));
    let canonical_index = order[0];
    let ranked: Vec<&LocatorRecord> = order.iter().map(|&i| members[i]).collect();
    let rationale = rationale(&ranked);

    DuplicateGroup {
        members: members.iter().map(|m| (*m).clone()).collect(),
        similarity,
        canonical: members[canonical_index].clone(),
        canonical_index,
        rationale,
    }
}

/// Best candidate first: type priority, then usage, then expression and id
/// so the choice never depends on input order.
fn compare_for_canonical(a: &LocatorRecord, b: &LocatorRecord) -> Ordering {
    type_priority(b.locator_type())
        .cmp(&type_priority(a.locator_type()))
        .then_with(|| b.usage_count().cmp(&a.usage_count()))
        .then_with(|| a.expression().cmp(b.expression()))
        .then_with(|| a.id().cmp(&b.id()))
}

fn rationale(ranked: &[&LocatorRecord]) -> String {
    let canonical = ranked[0];
    let canonical_type = canonical.locator_type();

    if ranked.iter().all(|m| m.locator_type() == canonical_type) {
        return format!(
            "All members are {} locators; picked the one used in the most tests ({})",
            canonical_type,
            canonical.usage_count()
        );
    }

    let runner_up = ranked[1];
    let canonical_priority = type_priority(canonical_type);
    let runner_up_priority = type_priority(runner_up.locator_type());

    if canonical_priority > runner_up_priority {
        let others: BTreeSet<String> = ranked[1..]
            .iter()
            .map(|m| m.locator_type().to_string())
            .collect();
        return format!(
            "{} locators are more reliable than {}",
            canonical_type,
            others.into_iter().collect::<Vec<_>>().join(", ")
        );
    }

    if canonical.usage_count() > runner_up.usage_count() {
        return format!(
            "Used in {} tests, more than any other {} locator in the group",
            canonical.usage_count(),
            canonical_type
        );
    }

    "Best combination of locator type and usage".to_string()
}
