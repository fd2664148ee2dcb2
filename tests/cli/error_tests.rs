/// Integration tests for CLI error handling and edge cases
///
/// Tests missing files, rejected maps and invalid query arguments.
use super::common::{cmd, fixture};
use predicates::prelude::*;

#[test]
fn test_check_missing_map_file() {
    cmd()
        .args(["check", "--map", "/nonexistent/out.map"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read map file"));
}

#[test]
fn test_check_incompatible_version_asks_for_upgrade() {
    cmd()
        .args(["check", "--map", &fixture("incompatible")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please upgrade mapping-debug"));
}

#[test]
fn test_check_rejects_comment_in_data_section() {
    cmd()
        .args(["check", "--map", &fixture("comment")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid line map"));
}

#[test]
fn test_lookup_rejects_line_zero() {
    cmd()
        .args(["lookup", "--map", &fixture("app"), "--line", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line numbers start at 1"));
}

#[test]
fn test_lookup_requires_line() {
    cmd()
        .args(["lookup", "--map", &fixture("app")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--line"));
}

#[test]
fn test_reverse_requires_map() {
    cmd()
        .args(["reverse", "--file", "a.js", "--line", "1"])
        .assert()
        .failure();
}

#[test]
fn test_quiet_conflicts_with_verbose() {
    cmd()
        .args(["-q", "-v", "name", "GLOBAL_x"])
        .assert()
        .failure();
}
