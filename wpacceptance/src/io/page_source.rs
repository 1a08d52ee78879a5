//! Actors that expose rendered page markup, and the assertion entry point.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::debug;

use crate::core::assertion::Constraint;

/// Anything that can report the currently rendered page source.
pub trait PageSource {
    fn page_source(&self) -> Result<String>;
}

/// Page source held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticPage {
    pub source: String,
}

impl StaticPage {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl PageSource for StaticPage {
    fn page_source(&self) -> Result<String> {
        Ok(self.source.clone())
    }
}

/// Page source saved to disk (e.g. a captured `page.html`).
#[derive(Debug, Clone)]
pub struct SavedPage {
    pub path: PathBuf,
}

impl SavedPage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for SavedPage {
    fn page_source(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .with_context(|| format!("read page source {}", self.path.display()))
    }
}

/// Why [`assert_page_source`] did not pass.
#[derive(Debug, Error)]
pub enum AssertionError {
    /// The constraint evaluated to false.
    #[error("{message}")]
    Failed { message: String },

    /// The actor could not provide page source.
    #[error("cannot read page source")]
    Actor(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Evaluate `constraint` against the actor's current page source.
pub fn assert_page_source<A, C>(actor: &A, constraint: &C) -> Result<(), AssertionError>
where
    A: PageSource + ?Sized,
    C: Constraint + ?Sized,
{
    let source = actor
        .page_source()
        .map_err(|err| AssertionError::Actor(err.into()))?;
    let passed = constraint.evaluate(&source);
    debug!(
        polarity = %constraint.polarity(),
        passed,
        bytes = source.len(),
        "page source assertion"
    );
    if passed {
        return Ok(());
    }
    Err(AssertionError::Failed {
        message: constraint.failure_message(),
    })
}
