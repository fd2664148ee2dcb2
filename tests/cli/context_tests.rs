/// Integration tests for the context subcommand and its settings file
use super::common::{fixture, stdout_json, TestContext};
use predicates::prelude::*;

#[test]
fn test_context_set_show_clear() {
    let ctx = TestContext::default();

    ctx.cmd()
        .args([
            "context",
            "set",
            "--url",
            "file:///app/index.html",
            "--source-map",
            "out.map",
            "--root-path",
            "/work",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved"));

    let saved = std::fs::read_to_string(ctx.settings_path()).unwrap();
    assert!(saved.contains("file:///app/index.html"));
    assert!(saved.contains("out.map"));

    ctx.cmd()
        .args(["context", "show", "--url", "file:///app/index.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("source map: out.map"))
        .stdout(predicate::str::contains("root path: /work"));

    ctx.cmd()
        .args(["context", "clear", "--url", "file:///app/index.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared"));

    ctx.cmd()
        .args(["context", "show", "--url", "file:///app/index.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("source map: <none>"))
        .stdout(predicate::str::contains("root path: /work"));
}

#[test]
fn test_context_set_without_changes() {
    let ctx = TestContext::default();
    ctx.cmd()
        .args(["context", "set", "--url", "out.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to change"));
    assert!(!ctx.settings_path().exists());
}

#[test]
fn test_context_show_unknown() {
    let ctx = TestContext::default();
    ctx.cmd()
        .args(["context", "show", "--url", "nowhere.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No settings stored"));
}

#[test]
fn test_lookup_uses_stored_source_map() {
    let ctx = TestContext::default();
    ctx.cmd()
        .args([
            "context",
            "set",
            "--url",
            "app.min.js",
            "--source-map",
            &fixture("app"),
            "--root-path",
            "/work",
        ])
        .assert()
        .success();

    ctx.cmd()
        .args([
            "lookup", "--script", "app.min.js", "--line", "2", "--offset", "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("#3 src/util.js:7:0"))
        .stdout(predicate::str::contains("Source: /work/src/util.js"));

    ctx.cmd()
        .args(["check", "--script", "app.min.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Line map loaded: {}",
            fixture("app")
        )));

    let output = ctx
        .cmd()
        .args(["files", "--script", "app.min.js", "--line", "1", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output)["result"],
        serde_json::json!(["src/main.js", "src/util.js"])
    );
}

#[test]
fn test_lookup_without_stored_map_fails() {
    let ctx = TestContext::default();
    ctx.cmd()
        .args(["lookup", "--script", "nowhere.js", "--line", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no line map stored for nowhere.js"));
}

#[test]
fn test_lookup_needs_map_or_script() {
    let ctx = TestContext::default();
    ctx.cmd()
        .args(["lookup", "--line", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--script"));
}
