use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FillError, Result};
use crate::model::DEFAULT_MAX_SUGGESTIONS;
use crate::ranking::{DEFAULT_RECENCY_DECAY_MS, DEFAULT_TAG_BOOST, MARK_CLOSE, MARK_OPEN, RankOptions};
use crate::scoring::native::DEFAULT_MEMORY_LIMIT;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub suggestions: SuggestionsConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub robot: RobotConfig,
}

impl Config {
    /// Defaults, then the global file (or the explicit one when given), then
    /// `FILLRANK_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("FILLRANK_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            let patch = Self::load_patch(&path)?.ok_or_else(|| {
                FillError::MissingConfig(format!("config file {} not found", path.display()))
            })?;
            config.merge_patch(patch);
        } else if let Some(global) = Self::load_global()? {
            config.merge_patch(global);
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("fillrank/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| FillError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| FillError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    /// Parse a TOML document and merge it onto the current values.
    pub fn merge_toml(&mut self, raw: &str) -> Result<()> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| FillError::Config(format!("parse config: {err}")))?;
        self.merge_patch(patch);
        Ok(())
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.suggestions {
            self.suggestions.merge(patch);
        }
        if let Some(patch) = patch.scoring {
            self.scoring.merge(patch);
        }
        if let Some(patch) = patch.robot {
            self.robot.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps a `FILLRANK_*` key to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = parse_var::<usize, _>(&lookup, "FILLRANK_MAX_SUGGESTIONS")? {
            self.suggestions.max_suggestions = value;
        }
        if let Some(value) = parse_var::<f64, _>(&lookup, "FILLRANK_TAG_BOOST")? {
            self.suggestions.tag_boost = value;
        }
        if let Some(value) = parse_var::<f64, _>(&lookup, "FILLRANK_RECENCY_DECAY_MS")? {
            self.suggestions.recency_decay_ms = value;
        }

        if let Some(value) = parse_var::<ScoringBackend, _>(&lookup, "FILLRANK_SCORING_BACKEND")? {
            self.scoring.backend = value;
        }
        if let Some(value) = parse_var::<usize, _>(&lookup, "FILLRANK_MEMORY_LIMIT_BYTES")? {
            self.scoring.memory_limit_bytes = value;
        }

        if let Some(value) = parse_var::<RobotFormat, _>(&lookup, "FILLRANK_ROBOT_FORMAT")? {
            self.robot.format = value;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let suggestions = &self.suggestions;
        if suggestions.max_suggestions == 0 {
            return Err(FillError::Config(
                "suggestions.max_suggestions must be greater than zero".to_string(),
            ));
        }
        if !suggestions.tag_boost.is_finite() || suggestions.tag_boost < 0.0 {
            return Err(FillError::Config(format!(
                "suggestions.tag_boost must be a non-negative number, got {}",
                suggestions.tag_boost
            )));
        }
        if !suggestions.recency_decay_ms.is_finite() || suggestions.recency_decay_ms <= 0.0 {
            return Err(FillError::Config(format!(
                "suggestions.recency_decay_ms must be positive, got {}",
                suggestions.recency_decay_ms
            )));
        }
        if self.scoring.backend == ScoringBackend::Native && self.scoring.memory_limit_bytes == 0 {
            return Err(FillError::Config(
                "scoring.memory_limit_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Ranking options for `limit`, stamped with the current time.
    #[must_use]
    pub fn rank_options(&self, limit: usize) -> RankOptions {
        RankOptions {
            limit,
            tag_boost: self.suggestions.tag_boost,
            recency_decay_ms: self.suggestions.recency_decay_ms,
            highlight_open: self.suggestions.highlight_open.clone(),
            highlight_close: self.suggestions.highlight_close.clone(),
            ..RankOptions::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuggestionsConfig {
    /// Used when no library supplies its own limit.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    #[serde(default = "default_tag_boost")]
    pub tag_boost: f64,
    #[serde(default = "default_recency_decay_ms")]
    pub recency_decay_ms: f64,
    #[serde(default = "default_highlight_open")]
    pub highlight_open: String,
    #[serde(default = "default_highlight_close")]
    pub highlight_close: String,
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            tag_boost: DEFAULT_TAG_BOOST,
            recency_decay_ms: DEFAULT_RECENCY_DECAY_MS,
            highlight_open: MARK_OPEN.to_string(),
            highlight_close: MARK_CLOSE.to_string(),
        }
    }
}

impl SuggestionsConfig {
    fn merge(&mut self, patch: SuggestionsPatch) {
        if let Some(value) = patch.max_suggestions {
            self.max_suggestions = value;
        }
        if let Some(value) = patch.tag_boost {
            self.tag_boost = value;
        }
        if let Some(value) = patch.recency_decay_ms {
            self.recency_decay_ms = value;
        }
        if let Some(value) = patch.highlight_open {
            self.highlight_open = value;
        }
        if let Some(value) = patch.highlight_close {
            self.highlight_close = value;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScoringBackend {
    /// Try the native module, fall back on failure.
    #[default]
    Native,
    /// Never load the native module.
    Fallback,
}

impl FromStr for ScoringBackend {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "fallback" => Ok(Self::Fallback),
            _ => Err("expected native|fallback".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoringConfig {
    #[serde(default)]
    pub backend: ScoringBackend,
    #[serde(default = "default_memory_limit")]
    pub memory_limit_bytes: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            backend: ScoringBackend::default(),
            memory_limit_bytes: DEFAULT_MEMORY_LIMIT,
        }
    }
}

impl ScoringConfig {
    fn merge(&mut self, patch: ScoringPatch) {
        if let Some(value) = patch.backend {
            self.backend = value;
        }
        if let Some(value) = patch.memory_limit_bytes {
            self.memory_limit_bytes = value;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RobotFormat {
    #[default]
    Pretty,
    Compact,
}

impl FromStr for RobotFormat {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" | "json" => Ok(Self::Compact),
            _ => Err("expected pretty|compact".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RobotConfig {
    #[serde(default)]
    pub format: RobotFormat,
}

impl RobotConfig {
    fn merge(&mut self, patch: RobotPatch) {
        if let Some(value) = patch.format {
            self.format = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    suggestions: Option<SuggestionsPatch>,
    scoring: Option<ScoringPatch>,
    robot: Option<RobotPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SuggestionsPatch {
    max_suggestions: Option<usize>,
    tag_boost: Option<f64>,
    recency_decay_ms: Option<f64>,
    highlight_open: Option<String>,
    highlight_close: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ScoringPatch {
    backend: Option<ScoringBackend>,
    memory_limit_bytes: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RobotPatch {
    format: Option<RobotFormat>,
}

const fn default_max_suggestions() -> usize {
    DEFAULT_MAX_SUGGESTIONS
}

const fn default_tag_boost() -> f64 {
    DEFAULT_TAG_BOOST
}

const fn default_recency_decay_ms() -> f64 {
    DEFAULT_RECENCY_DECAY_MS
}

fn default_highlight_open() -> String {
    MARK_OPEN.to_string()
}

fn default_highlight_close() -> String {
    MARK_CLOSE.to_string()
}

const fn default_memory_limit() -> usize {
    DEFAULT_MEMORY_LIMIT
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|err| FillError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}
