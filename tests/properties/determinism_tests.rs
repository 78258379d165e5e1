use proptest::prelude::*;

use fillrank::library::{Library, dedupe_items, identity_key};
use fillrank::model::{DomainRule, ResolvedPolicy};
use fillrank::ranking::{RankOptions, rank};
use fillrank::rules::resolve;
use fillrank::scoring::ScoringEngine;
use fillrank::test_utils::fixtures::{fixed_now, item, rule};

fn rule_strategy() -> impl Strategy<Value = DomainRule> {
    (
        prop::sample::select(vec![
            "*",
            "global",
            "example.com",
            "*.example.com",
            "*.*.example.com",
            "login.example.com",
            "example.com|*.example.org",
            "shop*.com",
            "",
        ]),
        any::<bool>(),
        prop::collection::vec(prop::sample::select(vec!["Contacts", "Finance", "Personal"]), 0..2),
        prop::collection::vec(prop::sample::select(vec!["job", "email"]), 0..2),
        0u32..1000,
    )
        .prop_map(|(pattern, disable, folders, tags, id)| {
            let mut rule = rule(&format!("r{id}"), pattern);
            rule.disable_on_host = disable;
            rule.include_folders = folders.iter().map(ToString::to_string).collect();
            rule.boost_tags = tags.iter().map(ToString::to_string).collect();
            rule
        })
}

fn host_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "example.com",
        "login.example.com",
        "a.b.example.com",
        "www.example.org",
        "unrelated.net",
    ])
    .prop_map(ToString::to_string)
}

proptest! {
    #[test]
    fn test_resolve_ignores_rule_order(
        rules in prop::collection::vec(rule_strategy(), 0..6),
        host in host_strategy(),
    ) {
        let forward = resolve(&host, &rules);
        let mut reversed = rules.clone();
        reversed.reverse();
        prop_assert_eq!(forward, resolve(&host, &reversed));
    }

    #[test]
    fn test_disable_is_or_of_matching_rules(
        rules in prop::collection::vec(rule_strategy(), 0..6),
        host in host_strategy(),
    ) {
        let policy = resolve(&host, &rules);
        let any_disabling = rules.iter().any(|rule| {
            rule.disable_on_host && fillrank::rules::match_rank(rule, &host).is_some()
        });
        prop_assert_eq!(policy.disable, any_disabling);
    }

    #[test]
    fn test_rank_is_bounded_and_sorted(
        labels in prop::collection::vec("[a-z ]{1,12}", 0..12),
        query in "[a-z]{0,4}",
        limit in 0usize..8,
    ) {
        let items: Vec<_> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| item(&i.to_string(), label, "value"))
            .collect();
        let engine = ScoringEngine::fallback_only();
        let options = RankOptions::with_limit(limit).at(fixed_now());
        let ranked = rank(&engine, &query, &items, &ResolvedPolicy::default(), &options);

        prop_assert!(ranked.len() <= limit);
        prop_assert!(ranked.iter().all(|s| s.score > 0.0));
        prop_assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_dedupe_leaves_unique_keys(
        pairs in prop::collection::vec(("[A-Ca-c]{1,2}", "[xy]{1,2}"), 0..16),
    ) {
        let items: Vec<_> = pairs
            .iter()
            .enumerate()
            .map(|(i, (label, value))| item(&i.to_string(), label, value))
            .collect();
        let kept = dedupe_items(items.clone());

        let mut keys: Vec<_> = kept.iter().map(|i| identity_key(&i.label, &i.value)).collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), total);

        let again = dedupe_items(kept.clone());
        prop_assert_eq!(&again, &kept);

        let prepared = Library { items, ..Library::default() }.prepare_import();
        prop_assert_eq!(prepared.items, kept);
    }
}
