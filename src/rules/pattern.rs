//! Host pattern parsing and matching.

use std::fmt;

/// Specificity of a matched pattern segment. Orders processing only; it never
/// decides which rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct Specificity(pub u8);

impl Specificity {
    pub const GLOBAL: Self = Self(0);
    pub const DOUBLE_WILDCARD: Self = Self(1);
    pub const WILDCARD: Self = Self(2);
    pub const EXACT: Self = Self(3);
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One dot-separated label of a wildcard pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Any,
    Literal(String),
}

/// One `|`-separated segment of a rule pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostPattern {
    /// `*` or `global`.
    Global,
    Exact(String),
    Wildcard {
        labels: Vec<Label>,
        specificity: Specificity,
    },
    /// Empty or unparseable; never matches.
    Malformed(String),
}

impl HostPattern {
    #[must_use]
    pub fn parse(segment: &str) -> Self {
        let normalized = segment.trim().to_lowercase();
        if normalized.is_empty() {
            return Self::Malformed(normalized);
        }
        if normalized == "*" || normalized == "global" {
            return Self::Global;
        }
        if normalized.chars().any(char::is_whitespace) {
            return Self::Malformed(normalized);
        }
        if !normalized.contains('*') {
            if normalized.split('.').any(str::is_empty) {
                return Self::Malformed(normalized);
            }
            return Self::Exact(normalized);
        }

        let mut labels = Vec::new();
        for label in normalized.split('.') {
            match label {
                "" => return Self::Malformed(normalized),
                "*" => labels.push(Label::Any),
                literal if literal.contains('*') => return Self::Malformed(normalized),
                literal => labels.push(Label::Literal(literal.to_string())),
            }
        }

        let specificity = if normalized.starts_with("*.*.") {
            Specificity::DOUBLE_WILDCARD
        } else if normalized.starts_with("*.") {
            Specificity::WILDCARD
        } else {
            Specificity::EXACT
        };

        Self::Wildcard {
            labels,
            specificity,
        }
    }

    /// Split a rule pattern into its segments.
    pub fn parse_all(pattern: &str) -> impl Iterator<Item = Self> + '_ {
        pattern.split('|').map(Self::parse)
    }

    /// `host` must already be trimmed and lowercased.
    #[must_use]
    pub fn matches(&self, host: &str) -> bool {
        match self {
            Self::Global => true,
            Self::Exact(literal) => literal == host,
            Self::Wildcard { labels, .. } => {
                let mut host_labels = host.split('.');
                for label in labels {
                    let Some(host_label) = host_labels.next() else {
                        return false;
                    };
                    let ok = match label {
                        Label::Any => !host_label.is_empty(),
                        Label::Literal(literal) => literal == host_label,
                    };
                    if !ok {
                        return false;
                    }
                }
                host_labels.next().is_none()
            }
            Self::Malformed(_) => false,
        }
    }

    #[must_use]
    pub const fn specificity(&self) -> Specificity {
        match self {
            Self::Global | Self::Malformed(_) => Specificity::GLOBAL,
            Self::Exact(_) => Specificity::EXACT,
            Self::Wildcard { specificity, .. } => *specificity,
        }
    }
}
