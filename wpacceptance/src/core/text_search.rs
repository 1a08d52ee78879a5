//! Text-search predicates used by page-source assertions.
//!
//! Assertions never search content themselves; they call a [`TextSearch`]
//! so suites can swap matching semantics without touching polarity logic.

use regex::{Regex, RegexBuilder};

/// Decide whether `needle` occurs in `haystack`.
pub trait TextSearch {
    fn matches(&self, haystack: &str, needle: &str) -> bool;
}

impl<F> TextSearch for F
where
    F: Fn(&str, &str) -> bool,
{
    fn matches(&self, haystack: &str, needle: &str) -> bool {
        self(haystack, needle)
    }
}

/// Literal, case-sensitive substring search.
#[derive(Debug, Clone, Copy, Default)]
pub struct Substring;

impl TextSearch for Substring {
    fn matches(&self, haystack: &str, needle: &str) -> bool {
        haystack.contains(needle)
    }
}

/// Default search used by test scripts.
///
/// A needle written as a delimited pattern (`/hel+o/i`, `#\d+#`, `~a.b~s`) is
/// compiled to a regex; anything else, including a pattern that fails to
/// compile, is a literal substring.
#[derive(Debug, Clone, Copy, Default)]
pub struct FindMatch;

impl TextSearch for FindMatch {
    fn matches(&self, haystack: &str, needle: &str) -> bool {
        match delimited_pattern(needle) {
            Some(pattern) => pattern.is_match(haystack),
            None => Substring.matches(haystack, needle),
        }
    }
}

const DELIMITERS: &[char] = &['/', '#', '~', '!', '@', '|'];

/// Parse `<d>body<d>flags` into a regex.
///
/// Supported flags: `i` case-insensitive, `m` multi-line, `s` dot matches
/// newline, `x` extended, `U` ungreedy, `u` accepted and ignored.
pub fn delimited_pattern(needle: &str) -> Option<Regex> {
    let delimiter = needle.chars().next().filter(|c| DELIMITERS.contains(c))?;
    let rest = &needle[delimiter.len_utf8()..];
    let end = rest.rfind(delimiter)?;
    let (body, flags) = (&rest[..end], &rest[end + delimiter.len_utf8()..]);

    let mut builder = RegexBuilder::new(body);
    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            'U' => builder.swap_greed(true),
            'u' => &mut builder,
            _ => return None,
        };
    }
    builder.build().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_is_case_sensitive() {
        assert!(Substring.matches("<h1>Hello</h1>", "Hello"));
        assert!(!Substring.matches("<h1>Hello</h1>", "hello"));
    }

    #[test]
    fn find_match_uses_literal_for_plain_needles() {
        assert!(FindMatch.matches("<h1>Hello</h1>", "<h1>Hello"));
        assert!(!FindMatch.matches("<h1>Hello</h1>", "Bye"));
        assert!(FindMatch.matches("a.b", "a.b"));
        assert!(!FindMatch.matches("axb", "a.b"));
    }

    #[test]
    fn find_match_compiles_delimited_patterns() {
        assert!(FindMatch.matches("<h1>Hello</h1>", "/hel+o/i"));
        assert!(!FindMatch.matches("<h1>Hello</h1>", "/hel+o/"));
        assert!(FindMatch.matches("order #42", "#\\d+#"));
        assert!(FindMatch.matches("a\nb", "~a.b~s"));
    }

    #[test]
    fn unknown_flags_fall_back_to_literal() {
        assert!(delimited_pattern("/x/q").is_none());
        assert!(FindMatch.matches("see /x/q here", "/x/q"));
    }

    #[test]
    fn invalid_pattern_falls_back_to_literal() {
        assert!(delimited_pattern("/(unclosed/").is_none());
        assert!(FindMatch.matches("path /(unclosed/ here", "/(unclosed/"));
    }

    #[test]
    fn lone_delimiter_is_literal() {
        assert!(delimited_pattern("/").is_none());
        assert!(FindMatch.matches("a/b", "/"));
    }

    #[test]
    fn closures_are_searches() {
        let always = |_: &str, _: &str| true;
        assert!(always.matches("", "anything"));
    }
}
