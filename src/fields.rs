//! Heuristics deciding which form fields may receive suggestions.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const DISALLOWED_INPUT_TYPES: &[&str] = &[
    "password", "hidden", "file", "checkbox", "radio", "submit", "button",
];

const BLOCKED_AUTOCOMPLETES: &[&str] = &["off", "new-password", "cc-number", "cc-csc"];

static SENSITIVE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(password|passcode|pass|secret|otp|cvv|iban|card|credit|ssn|pesel|tax|pin)")
        .expect("valid regex")
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    #[default]
    Input,
    #[value(name = "textarea")]
    TextArea,
    Other,
}

/// Attributes of a focused element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub element: ElementKind,
    /// `type` attribute of an input; absent means `text`.
    pub input_type: Option<String>,
    pub name: Option<String>,
    pub id: Option<String>,
    pub aria_label: Option<String>,
    pub autocomplete: Option<String>,
}

/// Why a field was refused, if it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Refusal {
    NotEditable,
    InputType,
    SensitiveName,
    Autocomplete,
}

impl FieldDescriptor {
    #[must_use]
    pub fn input(input_type: &str) -> Self {
        Self {
            input_type: Some(input_type.to_string()),
            ..Self::default()
        }
    }

    fn identity_text(&self) -> String {
        [&self.name, &self.id, &self.aria_label]
            .iter()
            .map(|part| part.as_deref().unwrap_or(""))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// First reason `field` must not be filled, or `None` when it is fillable.
#[must_use]
pub fn refusal(field: &FieldDescriptor) -> Option<Refusal> {
    match field.element {
        ElementKind::Other => return Some(Refusal::NotEditable),
        ElementKind::Input => {
            let input_type = field
                .input_type
                .as_deref()
                .map_or_else(|| "text".to_string(), |t| t.trim().to_lowercase());
            if DISALLOWED_INPUT_TYPES.contains(&input_type.as_str()) {
                return Some(Refusal::InputType);
            }
        }
        ElementKind::TextArea => {}
    }

    if SENSITIVE_NAME_REGEX.is_match(&field.identity_text()) {
        return Some(Refusal::SensitiveName);
    }

    let autocomplete = field
        .autocomplete
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();
    if BLOCKED_AUTOCOMPLETES.contains(&autocomplete.as_str()) {
        return Some(Refusal::Autocomplete);
    }
    None
}

#[must_use]
pub fn is_fillable(field: &FieldDescriptor) -> bool {
    refusal(field).is_none()
}
