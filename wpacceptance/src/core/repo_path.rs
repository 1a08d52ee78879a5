//! Classification of the user-supplied `repo_path` value.
//!
//! Resolution against the filesystem happens in `io::config`; this module only
//! decides which rule applies and what relative remainder is left to join.

use serde_json::Value;

use super::emptiness::{is_empty_value, trim_blank};

/// Placeholder for the WordPress installation root. Matched case-insensitively.
pub const WP_ROOT_TOKEN: &str = "%WP_ROOT%";

/// How `host_repo_path` is derived from `repo_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoPath {
    /// `repo_path` is unset; the suite directory is the repository.
    SuiteDir,
    /// `repo_path` is `.` or `./`; same as [`RepoPath::SuiteDir`] but the key
    /// is dropped from the config.
    CurrentDir,
    /// `repo_path` mentions [`WP_ROOT_TOKEN`]; `remainder` is joined onto the
    /// WordPress root.
    WordPressRoot { remainder: String },
    /// Plain path joined onto the suite directory and canonicalized.
    SuiteRelative { relative: String },
}

/// Pick the resolution rule for a raw `repo_path` value.
pub fn classify_repo_path(raw: Option<&Value>) -> RepoPath {
    let Some(value) = raw.filter(|value| !is_empty_value(value)) else {
        return RepoPath::SuiteDir;
    };
    let text = match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };

    let trimmed = trim_blank(&text);
    if trimmed == "." || trimmed == "./" {
        return RepoPath::CurrentDir;
    }

    let text = strip_trailing_dot(&text);

    if contains_wp_root_token(text) {
        return RepoPath::WordPressRoot {
            remainder: strip_leading_wp_root_token(text).to_string(),
        };
    }

    RepoPath::SuiteRelative {
        relative: text.to_string(),
    }
}

/// Drop a trailing `/.` ("this directory") from a configured path.
pub fn strip_trailing_dot(text: &str) -> &str {
    text.strip_suffix("/.").unwrap_or(text)
}

fn contains_wp_root_token(text: &str) -> bool {
    text.to_ascii_lowercase()
        .contains(&WP_ROOT_TOKEN.to_ascii_lowercase())
}

/// Drop `[/]%WP_ROOT%[/]` from the front of `text`.
///
/// A token anywhere else is left in place and the whole value becomes the
/// remainder.
fn strip_leading_wp_root_token(text: &str) -> &str {
    let candidate = text.strip_prefix('/').unwrap_or(text);
    match candidate.get(..WP_ROOT_TOKEN.len()) {
        Some(head) if head.eq_ignore_ascii_case(WP_ROOT_TOKEN) => {
            let rest = &candidate[WP_ROOT_TOKEN.len()..];
            rest.strip_prefix('/').unwrap_or(rest)
        }
        _ => text,
    }
}
