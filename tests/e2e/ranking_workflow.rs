//! E2E Scenario: ranking suggestions for a page
//!
//! Covers the sample library, domain rules that boost and filter, global
//! disables, library-driven limits, and highlight markers from the global
//! config file.

use fillrank::library::Library;
use fillrank::test_utils::fixtures::{item, rule};

use super::fixture::E2EFixture;

fn contacts_library() -> Library {
    let mut email = item("email", "Work email", "me@example.com");
    email.folder = "Contacts".to_string();
    let mut phone = item("phone", "Work phone", "555-0100");
    phone.folder = "Contacts".to_string();
    phone.tags = vec!["job".to_string()];
    let mut diary = item("diary", "Work diary", "private notes");
    diary.folder = "Personal".to_string();

    let mut jobs = rule("jobs", "jobs.example.com");
    jobs.boost_tags = vec!["job".to_string()];
    jobs.exclude_folders = vec!["Personal".to_string()];

    Library {
        items: vec![email, phone, diary],
        domain_rules: vec![jobs],
        ..Library::default()
    }
}

fn suggestion_ids(json: &serde_json::Value) -> Vec<String> {
    json["suggestions"]
        .as_array()
        .expect("suggestions array")
        .iter()
        .map(|s| s["item"]["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_sample_library_konrad_scenario() {
    let mut fixture = E2EFixture::new("ranking_sample");

    fixture.log_step("Rank the sample library on LinkedIn");
    let output = fixture.run(&["--robot", "rank", "www.linkedin.com", "Kon"]);
    fixture.assert_success(&output, "rank sample");
    let json = output.json();
    assert_eq!(suggestion_ids(&json), vec!["sample-email"]);
    assert_eq!(
        json["suggestions"][0]["highlightedLabel"],
        "<mark>Kon</mark>rad — email"
    );

    fixture.log_step("Same query off LinkedIn has no folder filter");
    let output = fixture.run(&["--robot", "rank", "example.org", "Kon"]);
    fixture.assert_success(&output, "rank elsewhere");
    assert!(suggestion_ids(&output.json()).contains(&"sample-email".to_string()));
}

#[test]
fn test_rules_boost_and_exclude() {
    let mut fixture = E2EFixture::new("ranking_rules");
    let path = fixture.write_library("library.json", &contacts_library());
    let library = E2EFixture::arg(&path);

    fixture.log_step("Recency ranking without a matching rule keeps input order");
    let output = fixture.run(&["--robot", "--library", library, "rank", "example.com"]);
    fixture.assert_success(&output, "rank unmatched host");
    assert_eq!(suggestion_ids(&output.json()), vec!["email", "phone", "diary"]);

    fixture.log_step("Boost and exclusion on the jobs host");
    let output = fixture.run(&["--robot", "--library", library, "rank", "JOBS.example.com"]);
    fixture.assert_success(&output, "rank jobs host");
    let json = output.json();
    assert_eq!(json["host"], "jobs.example.com");
    assert_eq!(suggestion_ids(&json), vec!["phone", "email"]);

    fixture.log_step("Explain the resolved policy");
    let output = fixture.run(&[
        "--robot",
        "--library",
        library,
        "resolve",
        "jobs.example.com",
        "--explain",
    ]);
    fixture.assert_success(&output, "resolve jobs host");
    let json = output.json();
    assert_eq!(json["policy"]["boostTags"], serde_json::json!(["job"]));
    assert_eq!(json["policy"]["excludeFolders"], serde_json::json!(["Personal"]));
    assert_eq!(json["matches"][0]["ruleId"], "jobs");
}

#[test]
fn test_global_disable_wins_over_specific_rule() {
    let mut fixture = E2EFixture::new("ranking_disable");
    let mut library = contacts_library();
    let mut everywhere = rule("off", "*");
    everywhere.disable_on_host = true;
    library.domain_rules.push(everywhere);
    let path = fixture.write_library("library.json", &library);

    fixture.log_step("Rank on a host with a specific enabling rule");
    let output = fixture.run(&[
        "--robot",
        "--library",
        E2EFixture::arg(&path),
        "rank",
        "jobs.example.com",
        "work",
    ]);
    fixture.assert_success(&output, "rank disabled");
    let json = output.json();
    assert_eq!(json["disabled"], true);
    assert!(suggestion_ids(&json).is_empty());
}

#[test]
fn test_library_limit_and_config_markers() {
    let mut fixture = E2EFixture::new("ranking_config");
    let mut library = contacts_library();
    library.settings.max_suggestions = 1;
    let path = fixture.write_library("library.json", &library);
    std::fs::create_dir_all(fixture.path("fillrank")).expect("create config dir");
    fixture.write_file(
        "fillrank/config.toml",
        "[suggestions]\nhighlight_open = \"[\"\nhighlight_close = \"]\"\n\n[robot]\nformat = \"compact\"\n",
    );

    fixture.log_step("Library setting bounds the list");
    let output = fixture.run(&[
        "--robot",
        "--library",
        E2EFixture::arg(&path),
        "rank",
        "example.com",
        "phone",
    ]);
    fixture.assert_success(&output, "rank with config");
    assert_eq!(output.stdout.lines().count(), 1, "compact output is one line");
    let json = output.json();
    assert_eq!(json["limit"], 1);
    assert_eq!(json["suggestions"][0]["highlightedLabel"], "Work [phone]");

    fixture.log_step("Explicit limit overrides the library");
    let output = fixture.run(&[
        "--robot",
        "--library",
        E2EFixture::arg(&path),
        "rank",
        "example.com",
        "--limit",
        "3",
    ]);
    fixture.assert_success(&output, "rank with explicit limit");
    assert_eq!(suggestion_ids(&output.json()).len(), 3);
}

#[test]
fn test_fallback_backend_gives_same_ranking() {
    let mut fixture = E2EFixture::new("ranking_backends");

    fixture.log_step("Rank with the native backend");
    let native = fixture.run(&["--robot", "rank", "example.com", "address"]);
    fixture.assert_success(&native, "rank native");

    fixture.log_step("Rank with the fallback backend");
    let fallback = fixture.run_with_env(
        &["--robot", "rank", "example.com", "address"],
        &[("FILLRANK_SCORING_BACKEND", "fallback")],
    );
    fixture.assert_success(&fallback, "rank fallback");

    let native = native.json();
    let fallback = fallback.json();
    assert_eq!(native["backend"], "native");
    assert_eq!(fallback["backend"], "fallback");
    assert_eq!(suggestion_ids(&native), suggestion_ids(&fallback));
    let native_top = native["suggestions"][0]["score"].as_f64().unwrap_or_default();
    let fallback_top = fallback["suggestions"][0]["score"].as_f64().unwrap_or_default();
    assert!(native_top > 0.0);
    assert!((native_top - fallback_top).abs() < 1e-9);
}
