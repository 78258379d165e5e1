//! Error types for fillrank.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FillError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("missing configuration: {0}")]
    MissingConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid item: {0}")]
    InvalidItem(String),

    #[error("invalid domain rule: {0}")]
    InvalidRule(String),

    #[error("invalid library: {0}")]
    InvalidLibrary(String),

    /// The native scoring module could not be loaded or instantiated.
    #[error("scoring backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The native scoring module faulted during a call.
    #[error("scoring module trap: {0}")]
    ModuleTrap(String),
}

impl FillError {
    /// Stable machine-readable code used in robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::MissingConfig(_) => "missing_config",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::InvalidItem(_) => "invalid_item",
            Self::InvalidRule(_) => "invalid_rule",
            Self::InvalidLibrary(_) => "invalid_library",
            Self::BackendUnavailable(_) => "backend_unavailable",
            Self::ModuleTrap(_) => "module_trap",
        }
    }
}

pub type Result<T> = std::result::Result<T, FillError>;
