//! Builders and on-disk fixtures for library data.

use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use crate::library::Library;
use crate::model::{DEFAULT_CATEGORY, DomainRule, Item, ItemKind};

/// Deterministic reference time used across tests.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Item in the default folder, profile `Work`, stamped with [`fixed_now`].
#[must_use]
pub fn item(id: &str, label: &str, value: &str) -> Item {
    Item {
        id: id.to_string(),
        label: label.to_string(),
        value: value.to_string(),
        kind: ItemKind::Singleline,
        tags: Vec::new(),
        aliases: Vec::new(),
        profile: "Work".to_string(),
        folder: DEFAULT_CATEGORY.to_string(),
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

/// Rule with no folder or tag effects.
#[must_use]
pub fn rule(id: &str, pattern: &str) -> DomainRule {
    DomainRule {
        id: id.to_string(),
        pattern: pattern.to_string(),
        include_folders: Vec::new(),
        exclude_folders: Vec::new(),
        boost_tags: Vec::new(),
        disable_on_host: false,
        notes: None,
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

/// Temporary directory holding library and config files.
pub struct LibraryFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl Default for LibraryFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            data_path,
        }
    }

    /// Create a file with content.
    #[must_use]
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Serialize `library` to `relative_path`.
    #[must_use]
    pub fn write_library(&self, relative_path: &str, library: &Library) -> PathBuf {
        let json = library.to_json().expect("Failed to serialize library");
        self.create_file(relative_path, &json)
    }
}
