//! Suite configuration stored in `wpacceptance.json`.
//!
//! [`ConfigStore::load`] reads the file, derives `path` and `host_repo_path`,
//! and keeps everything else as-is. Edits happen in memory; [`ConfigStore::write`]
//! re-reads the file and persists only keys that already exist on disk.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use super::paths::{
    CONFIG_FILE_NAME, FilesystemLocator, WordPressLocator, normalize_path, trailingslash,
};
use crate::core::emptiness::is_unset;
use crate::core::merge::merge_onto_disk;
use crate::core::repo_path::{RepoPath, classify_repo_path, strip_trailing_dot};
use crate::logging::{Log, LogLevel, NORMAL, VERBOSE};

pub const NAME_KEY: &str = "name";
pub const PATH_KEY: &str = "path";
pub const REPO_PATH_KEY: &str = "repo_path";
pub const HOST_REPO_PATH_KEY: &str = "host_repo_path";
pub const SNAPSHOT_ID_KEY: &str = "snapshot_id";

const WRITE_INDENT: &[u8] = b"    ";

/// Failures surfaced by [`ConfigStore`]. Each one is logged once as an error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("wpacceptance.json not found in {}", .dir.display())]
    NotFound { dir: PathBuf },

    #[error("{reason}")]
    Invalid { reason: String },

    #[error("WordPress root not found from {}", .start.display())]
    WordPressRootNotFound { start: PathBuf },

    #[error("repo_path does not resolve: {}", .path.display())]
    RepoPathUnresolved {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {reason}", .path.display())]
    WriteFailure { path: PathBuf, reason: String },
}

/// In-memory view of a suite's `wpacceptance.json`.
pub struct ConfigStore {
    values: Map<String, Value>,
    log: Arc<dyn Log>,
}

impl ConfigStore {
    /// Load the suite config using the filesystem WordPress locator.
    ///
    /// `hint` is the suite directory or the config file itself; `None` uses
    /// the current working directory.
    pub fn load(hint: Option<&Path>, log: Arc<dyn Log>) -> Result<Self, ConfigError> {
        Self::load_with(hint, &FilesystemLocator, log)
    }

    /// Load the suite config with an explicit WordPress locator.
    pub fn load_with(
        hint: Option<&Path>,
        locator: &dyn WordPressLocator,
        log: Arc<dyn Log>,
    ) -> Result<Self, ConfigError> {
        log.log("Parsing suite config.", VERBOSE, LogLevel::Info);
        match build_values(hint, locator) {
            Ok(values) => {
                debug!(keys = values.len(), "suite config loaded");
                Ok(Self { values, log })
            }
            Err(err) => {
                log.log(&err.to_string(), NORMAL, LogLevel::Error);
                Err(err)
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// True when `key` is present with a non-null value.
    pub fn has(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(|value| !value.is_null())
    }

    pub fn delete(&mut self, key: &str) -> Option<Value> {
        self.values.shift_remove(key)
    }

    pub fn to_map(&self) -> Map<String, Value> {
        self.values.clone()
    }

    /// Suite directory, with trailing separator.
    pub fn path(&self) -> Option<&str> {
        self.values.get(PATH_KEY).and_then(Value::as_str)
    }

    /// Resolved repository directory, with trailing separator.
    pub fn host_repo_path(&self) -> Option<&str> {
        self.values.get(HOST_REPO_PATH_KEY).and_then(Value::as_str)
    }

    /// Absolute path of the backing `wpacceptance.json`.
    pub fn file_path(&self) -> Option<PathBuf> {
        self.path()
            .map(|dir| PathBuf::from(format!("{}{CONFIG_FILE_NAME}", trailingslash(dir))))
    }

    /// Persist in-memory edits to `wpacceptance.json`.
    ///
    /// The file is re-read from disk; its keys are overwritten by non-empty
    /// in-memory values and keys that exist only in memory are not written.
    /// A missing, unreadable, or non-object file fails with
    /// [`ConfigError::WriteFailure`] and leaves the disk untouched.
    pub fn write(&self) -> Result<(), ConfigError> {
        self.log.log("Writing config.", VERBOSE, LogLevel::Info);
        self.write_merged().inspect_err(|err| {
            self.log.log(&err.to_string(), NORMAL, LogLevel::Error);
        })
    }

    fn write_merged(&self) -> Result<(), ConfigError> {
        let Some(file_path) = self.file_path() else {
            return Err(ConfigError::WriteFailure {
                path: PathBuf::from(CONFIG_FILE_NAME),
                reason: "`path` is not set".to_string(),
            });
        };
        let failure = |reason: String| ConfigError::WriteFailure {
            path: file_path.clone(),
            reason,
        };

        let contents =
            fs::read_to_string(&file_path).map_err(|err| failure(format!("read: {err}")))?;
        let on_disk = match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(failure("expected a JSON object".to_string())),
            Err(err) => return Err(failure(format!("parse: {err}"))),
        };

        let merged = merge_onto_disk(on_disk, &self.values);
        let buf = to_pretty_json(&merged).map_err(|err| failure(format!("serialize: {err}")))?;
        write_atomic(&file_path, &buf).map_err(|err| failure(err.to_string()))?;
        debug!(path = %file_path.display(), keys = merged.len(), "suite config written");
        Ok(())
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

fn build_values(
    hint: Option<&Path>,
    locator: &dyn WordPressLocator,
) -> Result<Map<String, Value>, ConfigError> {
    let file_path = resolve_config_file(hint)?;
    let suite_dir = file_path.parent().map(Path::to_path_buf).unwrap_or_default();
    if !file_path.is_file() {
        return Err(ConfigError::NotFound { dir: suite_dir });
    }

    let contents = fs::read_to_string(&file_path).map_err(|err| ConfigError::Invalid {
        reason: format!("cannot read {}: {err}", file_path.display()),
    })?;
    let mut values = match serde_json::from_str::<Value>(&contents) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            return Err(ConfigError::Invalid {
                reason: "wpacceptance.json must contain a JSON object".to_string(),
            });
        }
        Err(err) => {
            return Err(ConfigError::Invalid {
                reason: format!("cannot parse wpacceptance.json: {err}"),
            });
        }
    };

    if is_unset(values.get(NAME_KEY)) {
        return Err(ConfigError::Invalid {
            reason: "`name` not set in wpacceptance.json".to_string(),
        });
    }

    let path = trailingslash(&suite_dir);
    values.insert(PATH_KEY.to_string(), Value::String(path.clone()));

    let host_repo_path = match classify_repo_path(values.get(REPO_PATH_KEY)) {
        RepoPath::SuiteDir => path,
        RepoPath::CurrentDir => {
            values.shift_remove(REPO_PATH_KEY);
            path
        }
        RepoPath::WordPressRoot { remainder } => {
            strip_repo_path_dot(&mut values);
            let root = locator
                .wordpress_root(&suite_dir)
                .ok_or_else(|| ConfigError::WordPressRootNotFound {
                    start: suite_dir.clone(),
                })?;
            let joined = format!("{}{remainder}", trailingslash(&root));
            trailingslash(normalize_path(Path::new(&joined)))
        }
        RepoPath::SuiteRelative { relative } => {
            strip_repo_path_dot(&mut values);
            let joined = PathBuf::from(format!("{path}{relative}"));
            let resolved = joined
                .canonicalize()
                .map_err(|source| ConfigError::RepoPathUnresolved {
                    path: joined.clone(),
                    source,
                })?;
            trailingslash(resolved)
        }
    };
    values.insert(HOST_REPO_PATH_KEY.to_string(), Value::String(host_repo_path));

    if is_unset(values.get(SNAPSHOT_ID_KEY)) {
        values.insert(SNAPSHOT_ID_KEY.to_string(), Value::Bool(false));
    }

    Ok(values)
}

/// Locate `wpacceptance.json` from a directory or file hint.
fn resolve_config_file(hint: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let base = match hint {
        Some(hint) => std::path::absolute(hint),
        None => env::current_dir(),
    }
    .map_err(|_| ConfigError::NotFound {
        dir: hint.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(".")),
    })?;
    let base = normalize_path(&base);
    if base.is_file() {
        return Ok(base);
    }
    Ok(base.join(CONFIG_FILE_NAME))
}

/// Keep the in-memory `repo_path` without its trailing `/.`.
fn strip_repo_path_dot(values: &mut Map<String, Value>) {
    if let Some(Value::String(raw)) = values.get_mut(REPO_PATH_KEY) {
        let stripped = strip_trailing_dot(raw).to_string();
        *raw = stripped;
    }
}

/// Pretty JSON with 4-space indent and literal `/`, matching existing files.
fn to_pretty_json(map: &Map<String, Value>) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(WRITE_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    map.serialize(&mut serializer)?;
    Ok(buf)
}

/// Atomically write the config (temp file + rename).
fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)
}
