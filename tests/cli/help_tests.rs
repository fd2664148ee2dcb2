/// Integration tests for CLI help and version commands
use super::common::cmd;
use predicates::prelude::*;

#[test]
fn test_help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("mapping-debug"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_help_lists_subcommands() {
    let output = cmd().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for sub in ["check", "lookup", "files", "reverse", "name", "interactive", "context"] {
        assert!(stdout.contains(sub), "help is missing {}", sub);
    }
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_lookup_help_mentions_offset() {
    cmd()
        .args(["lookup", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--offset"));
}

#[test]
fn test_completions_generate() {
    cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mapping-debug"));
}
