//! CLI tests for `wpacceptance config` and the page-source checks.
//!
//! Spawns the binary and verifies stdout and exit codes.

use std::fs;
use std::process::{Command, Output};

use serde_json::{Value, json};
use wpacceptance::exit_codes;
use wpacceptance::test_support::SuiteDir;

fn wpacceptance(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wpacceptance"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run wpacceptance")
}

#[test]
fn config_show_prints_derived_keys() {
    let suite = SuiteDir::with_config(&json!({"name": "demo"})).expect("suite");
    let dir = suite.path().to_str().expect("utf-8 path");

    let output = wpacceptance(&["config", "show", "--path", dir]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let shown: Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(shown["name"], json!("demo"));
    assert_eq!(shown["path"], json!(suite.dir_string()));
    assert_eq!(shown["host_repo_path"], json!(suite.dir_string()));
    assert_eq!(shown["snapshot_id"], json!(false));
}

#[test]
fn config_get_missing_key_is_invalid() {
    let suite = SuiteDir::with_config(&json!({"name": "demo"})).expect("suite");
    let dir = suite.path().to_str().expect("utf-8 path");

    let output = wpacceptance(&["config", "get", "nope", "--path", dir]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));

    let output = wpacceptance(&["config", "get", "name", "--path", dir]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "demo\n");
}

#[test]
fn config_set_updates_existing_keys_only() {
    let suite =
        SuiteDir::with_config(&json!({"name": "demo", "snapshot_id": "1"})).expect("suite");
    let dir = suite.path().to_str().expect("utf-8 path");

    let output = wpacceptance(&["config", "set", "snapshot_id", "2", "--path", dir]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let output = wpacceptance(&["config", "set", "extra", "z", "--path", dir]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    assert_eq!(suite.read_config().expect("read"), json!({"name": "demo", "snapshot_id": 2}));
}

#[test]
fn missing_config_exits_invalid() {
    let suite = SuiteDir::new().expect("suite");
    let dir = suite.path().to_str().expect("utf-8 path");

    let output = wpacceptance(&["config", "show", "--path", dir]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("wpacceptance.json not found").count(), 1, "{stderr}");
}

#[test]
fn non_object_config_is_reported_once() {
    let suite = SuiteDir::new().expect("suite");
    suite.write_raw("[]").expect("write");
    let dir = suite.path().to_str().expect("utf-8 path");

    let output = wpacceptance(&["config", "show", "--path", dir]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("must contain a JSON object").count(), 1, "{stderr}");
}

#[test]
fn see_and_dont_see_report_exit_codes() {
    let temp = tempfile::tempdir().expect("tempdir");
    let page = temp.path().join("page.html");
    fs::write(&page, "<h1>Hello</h1>\n").expect("write page");
    let page = page.to_str().expect("utf-8 path");

    let output = wpacceptance(&["see", "Hello", "--source", page]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let output = wpacceptance(&["dont-see", "Bye", "--source", page]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let output = wpacceptance(&["see", "Bye", "--source", page]);
    assert_eq!(output.status.code(), Some(exit_codes::ASSERTION_FAILED));
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .contains("Failed asserting that actor can see \"Bye\" text in the page source")
    );
}

#[test]
fn empty_page_only_satisfies_dont_see() {
    let temp = tempfile::tempdir().expect("tempdir");
    let page = temp.path().join("blank.html");
    fs::write(&page, "   \n").expect("write page");
    let page = page.to_str().expect("utf-8 path");

    let output = wpacceptance(&["see", "anything", "--source", page]);
    assert_eq!(output.status.code(), Some(exit_codes::ASSERTION_FAILED));

    let output = wpacceptance(&["dont-see", "anything", "--source", page]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
}
