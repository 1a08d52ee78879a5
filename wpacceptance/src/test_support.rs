//! Test-only helpers: a recording logger, a fixed WordPress locator, and
//! temporary suite directories.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;
use tempfile::TempDir;

use crate::io::paths::{CONFIG_FILE_NAME, WordPressLocator, trailingslash};
use crate::logging::{Log, LogLevel};

/// One message captured by [`RecordingLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub message: String,
    pub verbosity: u8,
    pub level: LogLevel,
}

/// [`Log`] that keeps every message for later assertions.
#[derive(Debug, Default)]
pub struct RecordingLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingLog {
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Messages logged at [`LogLevel::Error`].
    pub fn errors(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.level == LogLevel::Error)
            .map(|entry| entry.message)
            .collect()
    }
}

impl Log for RecordingLog {
    fn log(&self, message: &str, verbosity: u8, level: LogLevel) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(LogEntry {
                message: message.to_string(),
                verbosity,
                level,
            });
        }
    }
}

/// [`WordPressLocator`] returning a fixed root and recording lookups.
#[derive(Debug, Default)]
pub struct FixedRoot {
    root: Option<PathBuf>,
    calls: RefCell<Vec<PathBuf>>,
}

impl FixedRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            calls: RefCell::default(),
        }
    }

    /// Locator that never finds a WordPress install.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.borrow().clone()
    }
}

impl WordPressLocator for FixedRoot {
    fn wordpress_root(&self, base: &Path) -> Option<PathBuf> {
        self.calls.borrow_mut().push(base.to_path_buf());
        self.root.clone()
    }
}

/// Temporary suite directory holding a `wpacceptance.json`.
pub struct SuiteDir {
    temp: TempDir,
}

impl SuiteDir {
    /// Empty suite directory (no config file yet).
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            temp: tempfile::tempdir()?,
        })
    }

    pub fn with_config(config: &Value) -> io::Result<Self> {
        let suite = Self::new()?;
        suite.write_config(config)?;
        Ok(suite)
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Suite directory rendered the way the store renders `path`.
    pub fn dir_string(&self) -> String {
        trailingslash(self.path())
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join(CONFIG_FILE_NAME)
    }

    pub fn write_config(&self, config: &Value) -> io::Result<()> {
        let raw = serde_json::to_string_pretty(config).map_err(io::Error::other)?;
        self.write_raw(&raw)
    }

    pub fn write_raw(&self, raw: &str) -> io::Result<()> {
        fs::write(self.config_path(), raw)
    }

    pub fn read_config(&self) -> io::Result<Value> {
        let raw = fs::read_to_string(self.config_path())?;
        serde_json::from_str(&raw).map_err(io::Error::other)
    }

    /// Create a directory under the suite and return its path.
    pub fn mkdir(&self, relative: &str) -> io::Result<PathBuf> {
        let dir = self.path().join(relative);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
