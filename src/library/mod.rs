//! Library snapshot: items, domain rules and settings.
//!
//! The snapshot is what the browser editor exports. Editing operations here
//! mirror the editor: upserts merge into an existing entry when one can be
//! identified, otherwise they create a new one with defaults.

pub mod dedup;
pub mod sample;

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{FillError, Result};
use crate::model::{DEFAULT_CATEGORY, DomainRule, Item, ItemKind, Settings, Theme};

pub use dedup::{dedupe_items, identity_key};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub domain_rules: Vec<DomainRule>,
    #[serde(default)]
    pub settings: Settings,
}

/// Editor input for creating or updating an item.
///
/// `label` and `value` are always supplied; every `None` field keeps the
/// existing value on update and takes the default on create.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    #[serde(default)]
    pub id: Option<String>,
    pub label: String,
    pub value: String,
    #[serde(default, rename = "type")]
    pub kind: Option<ItemKind>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub aliases: Option<Vec<String>>,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub folder: Option<String>,
}

impl ItemDraft {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RuleDraft {
    #[serde(default)]
    pub id: Option<String>,
    pub pattern: String,
    #[serde(default)]
    pub include_folders: Option<Vec<String>>,
    #[serde(default)]
    pub exclude_folders: Option<Vec<String>>,
    #[serde(default)]
    pub boost_tags: Option<Vec<String>>,
    #[serde(default)]
    pub disable_on_host: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial settings update; `None` leaves the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub onboarding_completed: Option<bool>,
    pub open_dropdown: Option<String>,
    pub force_dropdown: Option<String>,
    pub theme: Option<Theme>,
    pub max_suggestions: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "id", rename_all = "snake_case")]
pub enum UpsertOutcome {
    Created(String),
    Updated(String),
}

impl UpsertOutcome {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Created(id) | Self::Updated(id) => id,
        }
    }
}

impl Library {
    /// Parse a snapshot from JSON text.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read a snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let library = Self::from_json(&raw)?;
        debug!(
            target: "fillrank::library",
            path = %path.display(),
            items = library.items.len(),
            rules = library.domain_rules.len(),
            "loaded library"
        );
        Ok(library)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the snapshot as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        info!(target: "fillrank::library", path = %path.display(), items = self.items.len(), "saved library");
        Ok(())
    }

    /// Check structural invariants: unique non-empty ids, valid entries and a
    /// positive suggestion limit.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            item.validate()?;
            if !ids.insert(item.id.as_str()) {
                return Err(FillError::InvalidLibrary(format!(
                    "duplicate item id {}",
                    item.id
                )));
            }
        }

        let mut rule_ids = HashSet::with_capacity(self.domain_rules.len());
        for rule in &self.domain_rules {
            if rule.id.trim().is_empty() {
                return Err(FillError::InvalidRule("id must not be empty".to_string()));
            }
            rule.validate()?;
            if !rule_ids.insert(rule.id.as_str()) {
                return Err(FillError::InvalidLibrary(format!(
                    "duplicate rule id {}",
                    rule.id
                )));
            }
        }

        if self.settings.max_suggestions == 0 {
            return Err(FillError::InvalidLibrary(
                "maxSuggestions must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn rule(&self, id: &str) -> Option<&DomainRule> {
        self.domain_rules.iter().find(|rule| rule.id == id)
    }

    /// Create or update an item.
    ///
    /// The target is the item with the draft's id, or failing that an item
    /// with a different id but the same identity key. Updates merge only the
    /// fields the draft supplies.
    pub fn upsert_item(&mut self, draft: ItemDraft, now: DateTime<Utc>) -> Result<UpsertOutcome> {
        let label = draft.label.trim().to_string();
        let value = draft.value.trim().to_string();
        if label.is_empty() || value.is_empty() {
            return Err(FillError::InvalidItem(
                "label and value must not be empty".to_string(),
            ));
        }

        let key = identity_key(&label, &value);
        let target = draft
            .id
            .as_deref()
            .and_then(|id| self.items.iter().position(|item| item.id == id))
            .or_else(|| {
                self.items.iter().position(|item| {
                    draft.id.as_deref() != Some(item.id.as_str()) && item.identity_key() == key
                })
            });

        if let Some(index) = target {
            let item = &mut self.items[index];
            item.label = label;
            item.value = value;
            if let Some(kind) = draft.kind {
                item.kind = kind;
            }
            if let Some(tags) = draft.tags {
                item.tags = tags;
            }
            if let Some(aliases) = draft.aliases {
                item.aliases = aliases;
            }
            if let Some(profile) = draft.profile {
                item.profile = profile;
            }
            if let Some(folder) = draft.folder {
                item.folder = folder;
            }
            item.updated_at = now;
            debug!(target: "fillrank::library", id = %item.id, "updated item");
            return Ok(UpsertOutcome::Updated(item.id.clone()));
        }

        let id = draft.id.unwrap_or_else(|| Uuid::new_v4().to_string());
        self.items.push(Item {
            id: id.clone(),
            label,
            value,
            kind: draft.kind.unwrap_or_default(),
            tags: draft.tags.unwrap_or_default(),
            aliases: draft.aliases.unwrap_or_default(),
            profile: draft.profile.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            folder: draft.folder.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            created_at: now,
            updated_at: now,
        });
        debug!(target: "fillrank::library", id = %id, "created item");
        Ok(UpsertOutcome::Created(id))
    }

    /// Remove an item by id. Returns whether anything was removed.
    pub fn delete_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        before != self.items.len()
    }

    /// Create or update a domain rule, matching on id only.
    pub fn upsert_rule(&mut self, draft: RuleDraft, now: DateTime<Utc>) -> Result<UpsertOutcome> {
        let pattern = draft.pattern.trim().to_string();
        if pattern.is_empty() {
            return Err(FillError::InvalidRule("pattern must not be empty".to_string()));
        }

        let existing = draft
            .id
            .as_deref()
            .and_then(|id| self.domain_rules.iter_mut().find(|rule| rule.id == id));

        if let Some(rule) = existing {
            rule.pattern = pattern;
            if let Some(folders) = draft.include_folders {
                rule.include_folders = folders;
            }
            if let Some(folders) = draft.exclude_folders {
                rule.exclude_folders = folders;
            }
            if let Some(tags) = draft.boost_tags {
                rule.boost_tags = tags;
            }
            if let Some(disable) = draft.disable_on_host {
                rule.disable_on_host = disable;
            }
            if draft.notes.is_some() {
                rule.notes = draft.notes;
            }
            rule.updated_at = now;
            return Ok(UpsertOutcome::Updated(rule.id.clone()));
        }

        let id = draft.id.unwrap_or_else(|| Uuid::new_v4().to_string());
        self.domain_rules.push(DomainRule {
            id: id.clone(),
            pattern,
            include_folders: draft.include_folders.unwrap_or_default(),
            exclude_folders: draft.exclude_folders.unwrap_or_default(),
            boost_tags: draft.boost_tags.unwrap_or_default(),
            disable_on_host: draft.disable_on_host.unwrap_or(false),
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        });
        Ok(UpsertOutcome::Created(id))
    }

    pub fn delete_rule(&mut self, id: &str) -> bool {
        let before = self.domain_rules.len();
        self.domain_rules.retain(|rule| rule.id != id);
        before != self.domain_rules.len()
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) -> Result<()> {
        if patch.max_suggestions == Some(0) {
            return Err(FillError::InvalidLibrary(
                "maxSuggestions must be greater than zero".to_string(),
            ));
        }
        let settings = &mut self.settings;
        if let Some(done) = patch.onboarding_completed {
            settings.onboarding_completed = done;
        }
        if let Some(shortcut) = patch.open_dropdown {
            settings.shortcuts.open_dropdown = shortcut;
        }
        if let Some(shortcut) = patch.force_dropdown {
            settings.shortcuts.force_dropdown = shortcut;
        }
        if let Some(theme) = patch.theme {
            settings.theme = theme;
        }
        if let Some(max) = patch.max_suggestions {
            settings.max_suggestions = max;
        }
        Ok(())
    }

    /// Collapse duplicate items in a freshly parsed export. Rules and
    /// settings pass through untouched.
    #[must_use]
    pub fn prepare_import(self) -> Self {
        Self {
            items: dedupe_items(self.items),
            ..self
        }
    }

    /// Fold an export into this library. Existing items come first, so they
    /// win over incoming duplicates. Incoming rules are appended unless a rule
    /// with the same id already exists; settings stay as they are. A kept
    /// incoming item whose id is already taken gets a fresh id.
    pub fn merge_import(&mut self, incoming: Self) {
        let before = self.items.len();
        let mut items = std::mem::take(&mut self.items);
        items.extend(incoming.items);
        self.items = dedupe_items(items);

        let mut ids = HashSet::with_capacity(self.items.len());
        for item in &mut self.items {
            if !ids.insert(item.id.clone()) {
                let fresh = Uuid::new_v4().to_string();
                debug!(target: "fillrank::library", from = %item.id, to = %fresh, "re-identified colliding item");
                item.id = fresh;
                ids.insert(item.id.clone());
            }
        }

        let known: HashSet<String> = self.domain_rules.iter().map(|r| r.id.clone()).collect();
        self.domain_rules.extend(
            incoming
                .domain_rules
                .into_iter()
                .filter(|rule| !known.contains(&rule.id)),
        );

        info!(
            target: "fillrank::library",
            added = self.items.len().saturating_sub(before),
            total = self.items.len(),
            "merged import"
        );
    }
}
