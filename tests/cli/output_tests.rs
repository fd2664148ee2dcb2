/// Integration tests for CLI output formats
///
/// Checks the text rendering and JSON envelopes of the query commands.
use super::common::{cmd, fixture, stdout_json, TestContext};
use predicates::prelude::*;

#[test]
fn test_check_summary() {
    cmd()
        .args(["check", "--map", &fixture("app"), "--script", "app.min.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("generated lines: 4"))
        .stdout(predicate::str::contains("mapped lines: 3"))
        .stdout(predicate::str::contains("mapping definitions: 7"));
}

#[test]
fn test_check_json() {
    let output = cmd()
        .args(["check", "--map", &fixture("app"), "--script", "app.min.js", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["result"]["script"], "app.min.js");
    assert_eq!(json["result"]["lines"], 4);
    assert_eq!(json["result"]["mapped_lines"], 3);
    assert_eq!(json["result"]["mappings"], 7);
}

#[test]
fn test_lookup_text_shows_record_and_name() {
    cmd()
        .args(["lookup", "--map", &fixture("app"), "--line", "1", "--offset", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#0 src/main.js:10:0"))
        .stdout(predicate::str::contains("Original name: start"))
        .stdout(predicate::str::contains("root path is unknown"));
}

#[test]
fn test_lookup_uses_root_path_from_settings() {
    let ctx = TestContext::default();
    ctx.create_file(
        "settings.toml",
        "[[context]]\nurl = \"app.min.js\"\nroot_path = \"/work\"\n",
    )
    .unwrap();

    ctx.cmd()
        .args([
            "lookup",
            "--map",
            &fixture("app"),
            "--script",
            "app.min.js",
            "--line",
            "2",
            "--offset",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Source: /work/src/util.js"));
}

#[test]
fn test_lookup_json_unmapped() {
    let output = cmd()
        .args([
            "lookup", "--map", &fixture("app"), "--line", "1", "--offset", "11", "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["status"], "ok");
    assert!(json["result"]["mapping"].is_null());
    assert_eq!(json["result"]["offset"], 11);
}

#[test]
fn test_lookup_json_mapped() {
    let output = cmd()
        .args([
            "lookup", "--map", &fixture("app"), "--line", "2", "--offset", "0", "--json",
        ])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    let record = &json["result"]["mapping"]["record"];
    assert_eq!(record["id"], 3);
    assert_eq!(record["original_file"], "src/util.js");
    assert_eq!(record["original_line"], 7);
    assert_eq!(json["result"]["name"], "SETPROP_height");
}

#[test]
fn test_files_lists_declared_order() {
    cmd()
        .args(["files", "--map", &fixture("app"), "--line", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  src/main.js\n  src/util.js"));
}

#[test]
fn test_files_json_empty_line() {
    let output = cmd()
        .args(["files", "--map", &fixture("app"), "--line", "3", "--json"])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["result"], serde_json::json!([]));
}

#[test]
fn test_reverse_json() {
    let map = fixture("app");
    let output = cmd()
        .args([
            "reverse", "--map", &map, "--file", "src/main.js", "--line", "10", "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    let hits = json["result"].as_array().unwrap();
    let lines: Vec<u64> = hits.iter().map(|h| h["line"].as_u64().unwrap()).collect();
    assert_eq!(lines, vec![1, 4]);
    assert_eq!(hits[0]["script"], map.as_str());
}

#[test]
fn test_reverse_reports_unreadable_maps() {
    let output = cmd()
        .args([
            "reverse",
            "--map",
            &fixture("app"),
            "--map",
            &fixture("comment"),
            "--file",
            "src/util.js",
            "--line",
            "7",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["result"].as_array().unwrap().len(), 2);
    assert_eq!(json["errors"].as_array().unwrap().len(), 1);
}

#[test]
fn test_name_conversion() {
    cmd()
        .args(["name", "$$PROP_width"])
        .assert()
        .success()
        .stdout(predicate::str::contains("'width' [string]"));

    cmd()
        .args(["name", "$$PROP_width", "--property"])
        .assert()
        .success()
        .stdout(predicate::str::contains("width [name]"));
}

#[test]
fn test_json_default_from_settings() {
    let ctx = TestContext::default();
    ctx.create_file("settings.toml", "[output]\nformat = \"json\"\n")
        .unwrap();

    let output = ctx.cmd().args(["name", "GLOBAL_goog"]).output().unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["result"]["value"], "goog");
    assert_eq!(json["result"]["style"], "default");
}
