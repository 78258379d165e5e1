//! Snapshot types shared by the resolver, the ranking pipeline and the library.
//!
//! Field names serialize in camelCase so that exported libraries from the
//! browser editor load without conversion.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FillError, Result};

/// Default folder and profile assigned to new items.
pub const DEFAULT_CATEGORY: &str = "General";

/// Default bound on suggestion list length.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 6;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Singleline,
    Multiline,
}

/// A stored snippet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub label: String,
    pub value: String,
    #[serde(rename = "type", default)]
    pub kind: ItemKind,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Searchable but never displayed.
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default = "default_category")]
    pub profile: String,
    #[serde(default = "default_category")]
    pub folder: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Text the fuzzy scorer runs against: label, value and aliases joined by spaces.
    #[must_use]
    pub fn haystack(&self) -> String {
        let mut haystack = String::with_capacity(
            self.label.len()
                + self.value.len()
                + self.aliases.iter().map(|a| a.len() + 1).sum::<usize>()
                + 1,
        );
        haystack.push_str(&self.label);
        haystack.push(' ');
        haystack.push_str(&self.value);
        haystack.push(' ');
        haystack.push_str(&self.aliases.join(" "));
        haystack
    }

    #[must_use]
    pub fn identity_key(&self) -> String {
        crate::library::identity_key(&self.label, &self.value)
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(FillError::InvalidItem("id must not be empty".to_string()));
        }
        if self.label.trim().is_empty() {
            return Err(FillError::InvalidItem(format!(
                "item {} has an empty label",
                self.id
            )));
        }
        if self.value.trim().is_empty() {
            return Err(FillError::InvalidItem(format!(
                "item {} has an empty value",
                self.id
            )));
        }
        if self.updated_at < self.created_at {
            return Err(FillError::InvalidItem(format!(
                "item {} was updated before it was created",
                self.id
            )));
        }
        Ok(())
    }
}

/// Per-site policy authored in the editor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DomainRule {
    pub id: String,
    /// One or more `|`-separated host patterns.
    pub pattern: String,
    #[serde(default)]
    pub include_folders: Vec<String>,
    #[serde(default)]
    pub exclude_folders: Vec<String>,
    #[serde(default)]
    pub boost_tags: Vec<String>,
    #[serde(default)]
    pub disable_on_host: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl DomainRule {
    pub fn validate(&self) -> Result<()> {
        if self.pattern.trim().is_empty() {
            return Err(FillError::InvalidRule(format!(
                "rule {} has an empty pattern",
                self.id
            )));
        }
        Ok(())
    }
}

/// Outcome of resolving every matching rule for one host.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPolicy {
    pub disable: bool,
    pub include_folders: BTreeSet<String>,
    pub exclude_folders: BTreeSet<String>,
    pub boost_tags: BTreeSet<String>,
}

impl ResolvedPolicy {
    /// Whether an item in `folder` survives the include/exclude filters.
    #[must_use]
    pub fn admits_folder(&self, folder: &str) -> bool {
        if self.exclude_folders.contains(folder) {
            return false;
        }
        self.include_folders.is_empty() || self.include_folders.contains(folder)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankedSuggestion {
    pub item: Item,
    pub score: f64,
    pub highlighted_label: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Dark,
    Light,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutSettings {
    pub open_dropdown: String,
    pub force_dropdown: String,
}

impl Default for ShortcutSettings {
    fn default() -> Self {
        Self {
            open_dropdown: "Alt+J".to_string(),
            force_dropdown: "Alt+ArrowDown".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub onboarding_completed: bool,
    #[serde(default)]
    pub shortcuts: ShortcutSettings,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            onboarding_completed: false,
            shortcuts: ShortcutSettings::default(),
            theme: Theme::default(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

const fn default_max_suggestions() -> usize {
    DEFAULT_MAX_SUGGESTIONS
}

/// RFC 3339 timestamps, also accepting the bare `YYYY-MM-DD` dates older
/// exports contain (interpreted as midnight UTC).
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp {raw:?}")))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}
