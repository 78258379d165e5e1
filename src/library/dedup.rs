//! Identity keys and first-seen deduplication.

use std::collections::HashSet;

use tracing::debug;

use crate::model::Item;

/// Separator between the label and value halves of an identity key.
const KEY_SEPARATOR: char = '\u{1f}';

/// Normalized label plus value used to detect duplicate items.
///
/// The label is trimmed and lowercased; the value is only trimmed, so two
/// emails that differ in case are distinct entries.
#[must_use]
pub fn identity_key(label: &str, value: &str) -> String {
    let label = label.trim().to_lowercase();
    let value = value.trim();
    let mut key = String::with_capacity(label.len() + value.len() + 1);
    key.push_str(&label);
    key.push(KEY_SEPARATOR);
    key.push_str(value);
    key
}

/// Keep the first item seen per identity key, in input order. Later
/// duplicates are dropped without merging any of their fields.
#[must_use]
pub fn dedupe_items(items: Vec<Item>) -> Vec<Item> {
    let total = items.len();
    let mut seen = HashSet::with_capacity(total);
    let kept: Vec<Item> = items
        .into_iter()
        .filter(|item| seen.insert(item.identity_key()))
        .collect();

    if kept.len() < total {
        debug!(
            target: "fillrank::library",
            total,
            kept = kept.len(),
            dropped = total - kept.len(),
            "dropped duplicate items"
        );
    }
    kept
}
