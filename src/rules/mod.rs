//! Domain rule resolution.
//!
//! Every rule whose pattern matches the host contributes to the resolved
//! policy: folder and tag sets are unioned and `disable` is OR-ed across all
//! matches. Specificity only fixes the order in which matches are visited, so
//! a more specific rule that leaves suggestions enabled never overrides a
//! broader rule that disables them.

pub mod pattern;

use serde::Serialize;
use tracing::debug;

use crate::model::{DomainRule, ResolvedPolicy};

pub use pattern::{HostPattern, Specificity};

/// A rule that matched a host, with its best segment specificity.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RuleMatch {
    pub rule_id: String,
    pub pattern: String,
    pub specificity: Specificity,
    pub disable_on_host: bool,
}

/// Highest specificity among the segments of `rule` that match `host`.
///
/// `host` must already be normalized with [`normalize_host`].
#[must_use]
pub fn match_rank(rule: &DomainRule, host: &str) -> Option<Specificity> {
    HostPattern::parse_all(&rule.pattern)
        .filter(|segment| segment.matches(host))
        .map(|segment| segment.specificity())
        .max()
}

#[must_use]
pub fn normalize_host(host: &str) -> String {
    host.trim().to_lowercase()
}

fn ordered_matches<'a>(host: &str, rules: &'a [DomainRule]) -> Vec<(Specificity, &'a DomainRule)> {
    let host = normalize_host(host);
    let mut matched: Vec<_> = rules
        .iter()
        .filter_map(|rule| match_rank(rule, &host).map(|rank| (rank, rule)))
        .collect();
    matched.sort_by(|a, b| b.0.cmp(&a.0));
    matched
}

/// Matched rules in processing order (most specific first, ties by input order).
#[must_use]
pub fn matched_rules(host: &str, rules: &[DomainRule]) -> Vec<RuleMatch> {
    ordered_matches(host, rules)
        .into_iter()
        .map(|(specificity, rule)| RuleMatch {
            rule_id: rule.id.clone(),
            pattern: rule.pattern.clone(),
            specificity,
            disable_on_host: rule.disable_on_host,
        })
        .collect()
}

/// Resolve the suggestion policy for `host`.
#[must_use]
pub fn resolve(host: &str, rules: &[DomainRule]) -> ResolvedPolicy {
    let matched = ordered_matches(host, rules);
    let mut policy = ResolvedPolicy::default();

    for (_, rule) in &matched {
        policy.disable |= rule.disable_on_host;
        policy
            .include_folders
            .extend(rule.include_folders.iter().cloned());
        policy
            .exclude_folders
            .extend(rule.exclude_folders.iter().cloned());
        policy.boost_tags.extend(rule.boost_tags.iter().cloned());
    }

    debug!(
        target: "fillrank::rules",
        host,
        matched = matched.len(),
        disable = policy.disable,
        "resolved domain rules"
    );

    policy
}
