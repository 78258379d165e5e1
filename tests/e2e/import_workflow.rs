//! E2E Scenario: importing exported libraries
//!
//! Covers exports written by older editors (bare dates, missing optional
//! fields), first-seen deduplication, merging into the active library, and
//! rejection of malformed input.

use fillrank::library::Library;
use fillrank::test_utils::fixtures::item;

use super::fixture::E2EFixture;

const LEGACY_EXPORT: &str = r#"{
  "items": [
    {
      "id": "a1",
      "label": "Home address",
      "value": "12 Elm Road",
      "type": "multiline",
      "createdAt": "2024-03-01",
      "updatedAt": "2024-03-02"
    },
    {
      "id": "a2",
      "label": "HOME ADDRESS ",
      "value": "12 Elm Road",
      "createdAt": "2024-04-01",
      "updatedAt": "2024-04-01"
    },
    {
      "id": "a3",
      "label": "Phone",
      "value": "555-0100",
      "tags": ["personal"],
      "createdAt": "2024-05-01T08:30:00Z",
      "updatedAt": "2024-05-01T08:30:00Z"
    }
  ]
}"#;

#[test]
fn test_import_legacy_export() {
    let mut fixture = E2EFixture::new("import_legacy");
    let export = fixture.write_file("legacy.json", LEGACY_EXPORT);

    fixture.log_step("Import a legacy export");
    let output = fixture.run(&["--robot", "import", E2EFixture::arg(&export)]);
    fixture.assert_success(&output, "import legacy");

    let json = output.json();
    assert_eq!(json["incomingItems"], 3);
    assert_eq!(json["keptItems"], 2);
    assert_eq!(json["duplicatesDropped"], 1);

    let items = json["library"]["items"].as_array().expect("items array");
    assert_eq!(items[0]["id"], "a1");
    assert_eq!(items[0]["type"], "multiline");
    assert_eq!(items[0]["folder"], "General");
    assert_eq!(items[0]["createdAt"], "2024-03-01T00:00:00.000Z");
    assert_eq!(items[1]["id"], "a3");
    assert_eq!(json["library"]["settings"]["maxSuggestions"], 6);
}

#[test]
fn test_import_then_rank_written_library() {
    let mut fixture = E2EFixture::new("import_then_rank");
    let export = fixture.write_file("legacy.json", LEGACY_EXPORT);
    let out = fixture.path("library/imported.json");

    fixture.log_step("Import to a file");
    let output = fixture.run(&[
        "import",
        E2EFixture::arg(&export),
        "--out",
        E2EFixture::arg(&out),
    ]);
    fixture.assert_success(&output, "import to file");
    assert!(output.stdout.contains("written to"));

    fixture.log_step("Rank against the imported library");
    let output = fixture.run(&[
        "--robot",
        "--library",
        E2EFixture::arg(&out),
        "rank",
        "example.com",
        "elm",
    ]);
    fixture.assert_success(&output, "rank imported");
    let json = output.json();
    assert_eq!(json["suggestions"][0]["item"]["id"], "a1");
}

#[test]
fn test_merge_keeps_active_items_first() {
    let mut fixture = E2EFixture::new("import_merge");
    let current = Library {
        items: vec![item("mine", "Home address", "12 Elm Road")],
        ..Library::default()
    };
    let current_path = fixture.write_library("current.json", &current);
    let export = fixture.write_file("legacy.json", LEGACY_EXPORT);

    fixture.log_step("Merge an export into the active library");
    let output = fixture.run(&[
        "--robot",
        "--library",
        E2EFixture::arg(&current_path),
        "import",
        E2EFixture::arg(&export),
        "--merge",
    ]);
    fixture.assert_success(&output, "merge");

    let json = output.json();
    assert_eq!(json["merged"], true);
    assert_eq!(json["keptItems"], 2);
    assert_eq!(json["duplicatesDropped"], 2);
    let ids: Vec<_> = json["library"]["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|i| i["id"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(ids, vec!["mine", "a3"]);
}

#[test]
fn test_import_rejects_malformed_export() {
    let mut fixture = E2EFixture::new("import_malformed");
    let broken = fixture.write_file("broken.json", "{\"items\": [{\"id\": 1}]}");

    fixture.log_step("Import a malformed export");
    let output = fixture.run(&["--robot", "import", E2EFixture::arg(&broken)]);
    assert!(!output.success, "malformed import should fail");
    let json = output.json();
    assert_eq!(json["error"], true);
}
