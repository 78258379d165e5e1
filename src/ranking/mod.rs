//! Suggestion ranking pipeline.
//!
//! Filters items through a resolved policy, scores them against the query
//! (or by recency when the query is empty), applies tag boosts and returns a
//! bounded list sorted by descending score.

pub mod highlight;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::model::{DEFAULT_MAX_SUGGESTIONS, Item, RankedSuggestion, ResolvedPolicy};
use crate::scoring::ScoringEngine;

pub use highlight::{MARK_CLOSE, MARK_OPEN, highlight};

/// Additive bonus per boosted tag.
pub const DEFAULT_TAG_BOOST: f64 = 0.1;

/// Age in milliseconds below which an item keeps the full recency score.
pub const DEFAULT_RECENCY_DECAY_MS: f64 = 1_000_000.0;

#[derive(Debug, Clone)]
pub struct RankOptions {
    pub limit: usize,
    /// Reference time for the recency score.
    pub now: DateTime<Utc>,
    pub tag_boost: f64,
    pub recency_decay_ms: f64,
    pub highlight_open: String,
    pub highlight_close: String,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_MAX_SUGGESTIONS,
            now: Utc::now(),
            tag_boost: DEFAULT_TAG_BOOST,
            recency_decay_ms: DEFAULT_RECENCY_DECAY_MS,
            highlight_open: MARK_OPEN.to_string(),
            highlight_close: MARK_CLOSE.to_string(),
        }
    }
}

impl RankOptions {
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}

/// Score in `(0, 1]` that falls off with time since the last update.
#[must_use]
pub fn recency_score(updated_at: DateTime<Utc>, now: DateTime<Utc>, decay_ms: f64) -> f64 {
    let elapsed_ms = now
        .signed_duration_since(updated_at)
        .num_milliseconds()
        .max(0) as f64;
    1.0 / (elapsed_ms / decay_ms.max(1.0)).max(1.0)
}

fn tag_bonus(item: &Item, policy: &ResolvedPolicy, boost: f64) -> f64 {
    if policy.boost_tags.is_empty() {
        return 0.0;
    }
    item.tags
        .iter()
        .filter(|tag| policy.boost_tags.contains(tag.as_str()))
        .count() as f64
        * boost
}

/// Rank `items` for `query` under `policy`.
///
/// A disabling policy short-circuits to an empty list without scoring.
#[must_use]
pub fn rank(
    engine: &ScoringEngine,
    query: &str,
    items: &[Item],
    policy: &ResolvedPolicy,
    options: &RankOptions,
) -> Vec<RankedSuggestion> {
    if policy.disable || options.limit == 0 {
        return Vec::new();
    }

    let normalized = query.trim().to_lowercase();
    let mut candidates = 0usize;
    let mut scored: Vec<(f64, &Item)> = items
        .iter()
        .filter(|item| policy.admits_folder(&item.folder))
        .filter_map(|item| {
            candidates += 1;
            let base = if normalized.is_empty() {
                recency_score(item.updated_at, options.now, options.recency_decay_ms)
            } else {
                engine.score(&normalized, &item.haystack())
            };
            let score = base + tag_bonus(item, policy, options.tag_boost);
            (score > 0.0).then_some((score, item))
        })
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(options.limit);

    debug!(
        target: "fillrank::ranking",
        candidates,
        returned = scored.len(),
        query_len = normalized.chars().count(),
        backend = %engine.backend(),
        "ranked suggestions"
    );

    scored
        .into_iter()
        .map(|(score, item)| RankedSuggestion {
            item: item.clone(),
            score,
            highlighted_label: highlight(
                &item.label,
                query,
                &options.highlight_open,
                &options.highlight_close,
            ),
        })
        .collect()
}

/// [`rank`] with default options and the given limit.
#[must_use]
pub fn rank_with_limit(
    engine: &ScoringEngine,
    query: &str,
    items: &[Item],
    policy: &ResolvedPolicy,
    limit: usize,
) -> Vec<RankedSuggestion> {
    rank(engine, query, items, policy, &RankOptions::with_limit(limit))
}
