//! End-to-end config store scenarios through the public API.
//!
//! Each test builds a suite directory on disk, loads it, and checks the
//! derived paths or the file left behind by `write`.

use std::fs;
use std::sync::Arc;

use serde_json::json;
use wpacceptance::io::config::{ConfigError, ConfigStore, HOST_REPO_PATH_KEY, REPO_PATH_KEY};
use wpacceptance::io::paths::{FilesystemLocator, trailingslash};
use wpacceptance::logging::LogLevel;
use wpacceptance::test_support::{FixedRoot, RecordingLog, SuiteDir};

/// Suite nested inside a real WordPress tree, resolved with the filesystem
/// locator:
///
/// ```text
/// wp/
/// ├── wp-settings.php
/// └── wp-content/plugins/foo/      <- repo
///     └── tests/wpacceptance.json  <- suite
/// ```
#[test]
fn wp_root_placeholder_resolves_against_installed_wordpress() {
    let temp = tempfile::tempdir().expect("tempdir");
    let wp = temp.path().join("wp");
    let plugin = wp.join("wp-content/plugins/foo");
    let suite = plugin.join("tests");
    fs::create_dir_all(&suite).expect("mkdir");
    fs::write(wp.join("wp-settings.php"), "<?php").expect("wp-settings");
    fs::write(
        suite.join("wpacceptance.json"),
        r#"{"name": "foo", "repo_path": "%WP_ROOT%/wp-content/plugins/foo"}"#,
    )
    .expect("config");

    let log = Arc::new(RecordingLog::default());
    let store =
        ConfigStore::load_with(Some(&suite), &FilesystemLocator, log.clone()).expect("load");

    let expected = trailingslash(plugin.canonicalize().expect("canonicalize"));
    assert_eq!(store.host_repo_path(), Some(expected.as_str()));
    assert!(log.errors().is_empty());
}

#[test]
fn parent_relative_repo_path_points_outside_suite() {
    let temp = tempfile::tempdir().expect("tempdir");
    let repo = temp.path().join("repo");
    let suite = repo.join("tests/acceptance");
    fs::create_dir_all(&suite).expect("mkdir");
    fs::write(
        suite.join("wpacceptance.json"),
        r#"{"name": "repo", "repo_path": "../../."}"#,
    )
    .expect("config");

    let log = Arc::new(RecordingLog::default());
    let store = ConfigStore::load_with(Some(&suite), &FixedRoot::none(), log).expect("load");

    let expected = trailingslash(repo.canonicalize().expect("canonicalize"));
    assert_eq!(store.get(HOST_REPO_PATH_KEY), Some(&json!(expected)));
    assert_eq!(store.get(REPO_PATH_KEY), Some(&json!("../..")));
}

#[test]
fn invalid_config_logs_exactly_one_error() {
    let suite = SuiteDir::with_config(&json!({"snapshot_id": "1"})).expect("suite");
    let log = Arc::new(RecordingLog::default());

    let err = ConfigStore::load_with(Some(suite.path()), &FixedRoot::none(), log.clone())
        .expect_err("invalid");
    assert!(matches!(err, ConfigError::Invalid { .. }));

    let errors: Vec<_> = log
        .entries()
        .into_iter()
        .filter(|entry| entry.level == LogLevel::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].verbosity, 0);
}

#[test]
fn write_round_trip_discards_memory_only_keys() {
    let suite = SuiteDir::new().expect("suite");
    suite.write_raw(r#"{"name":"x","snapshot_id":"1"}"#).expect("write");
    let log = Arc::new(RecordingLog::default());

    let mut store =
        ConfigStore::load_with(Some(suite.path()), &FixedRoot::none(), log).expect("load");
    store.set("snapshot_id", "2");
    store.set("extra", "z");
    store.write().expect("write");

    assert_eq!(suite.read_config().expect("read"), json!({"name": "x", "snapshot_id": "2"}));
}

#[test]
fn unset_in_memory_keeps_disk_value() {
    let suite =
        SuiteDir::with_config(&json!({"name": "x", "snapshot_id": "1"})).expect("suite");
    let log = Arc::new(RecordingLog::default());

    let mut store =
        ConfigStore::load_with(Some(suite.path()), &FixedRoot::none(), log).expect("load");
    store.delete("snapshot_id");
    store.write().expect("write");

    assert_eq!(suite.read_config().expect("read")["snapshot_id"], json!("1"));
}
