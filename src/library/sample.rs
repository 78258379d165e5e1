//! Starter library shown on first run.

use chrono::{DateTime, Utc};

use crate::model::{DomainRule, Item, ItemKind, Settings};

use super::Library;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

impl Library {
    /// Three sample items and one LinkedIn rule, all stamped with `now`.
    #[must_use]
    pub fn sample(now: DateTime<Utc>) -> Self {
        let item = |id: &str, label: &str, value: &str, kind, tags: &[&str], aliases: &[&str], profile: &str, folder: &str| Item {
            id: id.to_string(),
            label: label.to_string(),
            value: value.to_string(),
            kind,
            tags: strings(tags),
            aliases: strings(aliases),
            profile: profile.to_string(),
            folder: folder.to_string(),
            created_at: now,
            updated_at: now,
        };

        Self {
            items: vec![
                item(
                    "sample-email",
                    "Konrad — email",
                    "konrad@example.com",
                    ItemKind::Singleline,
                    &["email", "work"],
                    &["mail", "work mail"],
                    "Work",
                    "Contacts",
                ),
                item(
                    "sample-company",
                    "Invoice — company name",
                    "NativeFill LLC",
                    ItemKind::Singleline,
                    &["invoice", "company"],
                    &["nf company"],
                    "Operations",
                    "Finance",
                ),
                item(
                    "sample-address",
                    "HQ Address",
                    "1600 Market St, San Francisco, CA",
                    ItemKind::Multiline,
                    &["address", "office"],
                    &["work address"],
                    "Work",
                    "Logistics",
                ),
            ],
            domain_rules: vec![DomainRule {
                id: "sample-linkedin".to_string(),
                pattern: "linkedin.com|*.linkedin.com".to_string(),
                include_folders: strings(&["Contacts"]),
                exclude_folders: strings(&["Personal"]),
                boost_tags: strings(&["job", "outreach"]),
                disable_on_host: false,
                notes: Some("Prefer work contact details on LinkedIn".to_string()),
                created_at: now,
                updated_at: now,
            }],
            settings: Settings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResolvedPolicy;
    use crate::rules::resolve;
    use crate::test_utils::fixtures::fixed_now;

    #[test]
    fn test_sample_is_valid() {
        let library = Library::sample(fixed_now());
        library.validate().unwrap();
        assert_eq!(library.items.len(), 3);
        assert_eq!(library.domain_rules.len(), 1);
        assert_eq!(library.items[2].kind, ItemKind::Multiline);
    }

    #[test]
    fn test_sample_rule_targets_linkedin() {
        let library = Library::sample(fixed_now());
        let policy = resolve("www.linkedin.com", &library.domain_rules);
        assert!(policy.include_folders.contains("Contacts"));
        assert!(policy.boost_tags.contains("outreach"));
        assert!(!policy.disable);
        assert_eq!(resolve("example.com", &library.domain_rules), ResolvedPolicy::default());
    }
}
