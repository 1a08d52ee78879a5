//! Page-source presence assertions ("see" / "don't see").

use std::fmt;
use std::sync::Arc;

use super::emptiness::{is_empty_text, trim_blank};
use super::text_search::{FindMatch, TextSearch};
use crate::logging::{Log, LogLevel, VERY_VERBOSE};

/// Whether an assertion expects the needle to be present or absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    See,
    DontSee,
}

impl Polarity {
    fn verb(self) -> &'static str {
        match self {
            Polarity::See => "can see",
            Polarity::DontSee => "can not see",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Polarity::See => "see",
            Polarity::DontSee => "dontSee",
        })
    }
}

/// Combine a search result with the expected polarity.
pub fn verdict(polarity: Polarity, found: bool) -> bool {
    (found && polarity == Polarity::See) || (!found && polarity == Polarity::DontSee)
}

/// A single assertion over observed content.
pub trait Constraint {
    fn polarity(&self) -> Polarity;

    /// Return true when the assertion holds for `content`.
    fn evaluate(&self, content: &str) -> bool;

    /// Fixed-format fragment naming what was looked for.
    fn describe(&self) -> String;

    /// Full message reported when [`Constraint::evaluate`] returns false.
    fn failure_message(&self) -> String {
        format!(
            "Failed asserting that actor {}{}",
            self.polarity().verb(),
            self.describe()
        )
    }
}

/// Assert that the page source does or does not contain a fragment.
pub struct PageSourceContains<S = FindMatch> {
    polarity: Polarity,
    needle: String,
    search: S,
    log: Arc<dyn Log>,
}

impl PageSourceContains<FindMatch> {
    pub fn new(polarity: Polarity, needle: impl Into<String>, log: Arc<dyn Log>) -> Self {
        Self::with_search(polarity, needle, FindMatch, log)
    }

    pub fn see(needle: impl Into<String>, log: Arc<dyn Log>) -> Self {
        Self::new(Polarity::See, needle, log)
    }

    pub fn dont_see(needle: impl Into<String>, log: Arc<dyn Log>) -> Self {
        Self::new(Polarity::DontSee, needle, log)
    }
}

impl<S: TextSearch> PageSourceContains<S> {
    pub fn with_search(
        polarity: Polarity,
        needle: impl Into<String>,
        search: S,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            polarity,
            needle: needle.into(),
            search,
            log,
        }
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }
}

impl<S: TextSearch> Constraint for PageSourceContains<S> {
    fn polarity(&self) -> Polarity {
        self.polarity
    }

    fn evaluate(&self, content: &str) -> bool {
        let content = trim_blank(content);
        if is_empty_text(content) {
            // Nothing rendered (or a bare "0"): "don't see" holds, "see" cannot.
            self.log
                .log("Page source is empty.", VERY_VERBOSE, LogLevel::Info);
            return self.polarity == Polarity::DontSee;
        }

        let found = self.search.matches(content, &self.needle);
        self.log.log(
            &format!(
                "Looked for \"{}\" in page source ({}): found={found}.",
                self.needle, self.polarity
            ),
            VERY_VERBOSE,
            LogLevel::Info,
        );
        verdict(self.polarity, found)
    }

    fn describe(&self) -> String {
        format!(" \"{}\" text in the page source", self.needle)
    }
}

impl<S> fmt::Debug for PageSourceContains<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageSourceContains")
            .field("polarity", &self.polarity)
            .field("needle", &self.needle)
            .finish_non_exhaustive()
    }
}
