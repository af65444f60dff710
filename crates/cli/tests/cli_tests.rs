//! CLI integration tests
//!
//! The import itself needs the origin site, so these only cover the
//! argument surface.
use predicates::prelude::*;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("colligo").unwrap()
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Import media collections"))
        .stdout(predicate::str::contains("--slides"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_cli_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("colligo"));
}

#[test]
fn test_cli_unknown_flag() {
    cmd().arg("--frobnicate").assert().failure();
}

#[test]
fn test_cli_invalid_timeout() {
    cmd().args(["--timeout", "soon"]).assert().failure();
}

#[test]
fn test_cli_invalid_retries() {
    cmd().args(["--retries", "-1"]).assert().failure();
}
