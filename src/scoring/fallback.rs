//! Portable scorer over Unicode scalar values.

use crate::error::Result;

use super::{BackendKind, Scorer};

/// Streak-weighted subsequence score in `[0, 1]`.
///
/// Both inputs are trimmed and lowercased. Each query character matched in
/// order earns 1, or 2 when the previous candidate character also advanced the
/// query. Unmatched query characters cost 0.25 each before normalizing by
/// query length.
#[must_use]
pub fn fallback_score(query: &str, candidate: &str) -> f64 {
    streak_score(&query.trim().to_lowercase(), &candidate.trim().to_lowercase())
}

/// The scoring loop over inputs that are already trimmed and lowercased.
/// Lengths are counted in Unicode scalar values.
pub(crate) fn streak_score(query: &str, candidate: &str) -> f64 {
    let query: Vec<char> = query.chars().collect();
    if query.is_empty() || candidate.is_empty() {
        return 0.0;
    }

    let mut raw = 0.0_f64;
    let mut qi = 0;
    let mut streak = false;
    for ch in candidate.chars() {
        if qi >= query.len() {
            break;
        }
        let wanted = query[qi];
        if ch == wanted {
            raw += if streak { 2.0 } else { 1.0 };
            qi += 1;
            streak = true;
        } else if is_upper_of(ch, wanted) {
            // Dormant after lowercasing; kept so both backends share one algorithm.
            raw += 1.0;
            qi += 1;
            streak = false;
        } else {
            streak = false;
        }
    }

    let missing = query.len() - qi;
    if missing > 0 {
        raw -= 0.25 * missing as f64;
    }

    (raw / query.len().max(1) as f64).clamp(0.0, 1.0)
}

fn is_upper_of(ch: char, wanted: char) -> bool {
    let mut upper = wanted.to_uppercase();
    upper.next() == Some(ch) && upper.next().is_none()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackScorer;

impl Scorer for FallbackScorer {
    fn kind(&self) -> BackendKind {
        BackendKind::Fallback
    }

    fn score(&mut self, query: &str, candidate: &str) -> Result<f64> {
        Ok(fallback_score(query, candidate))
    }
}
