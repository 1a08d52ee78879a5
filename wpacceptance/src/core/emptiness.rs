//! Emptiness rule shared by config loading and merge-on-write.
//!
//! Existing suites rely on a loose notion of "empty": `snapshot_id: ""` is
//! treated as unset, `name: "0"` is rejected, and so on. Every place that asks
//! "is this value set?" goes through [`is_empty_value`].

use serde_json::Value;

/// Characters stripped by [`trim_blank`]: space, tab, newline, carriage
/// return, NUL and vertical tab. Unicode spaces such as U+00A0 are kept.
const BLANK: [char; 6] = [' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Strip leading and trailing [`BLANK`] characters.
pub fn trim_blank(text: &str) -> &str {
    text.trim_matches(BLANK)
}

/// Return true for `""` and `"0"`.
pub fn is_empty_text(text: &str) -> bool {
    text.is_empty() || text == "0"
}

/// Return true for values treated as unset.
///
/// Empty: `null`, `false`, `0`, `0.0`, `""`, `"0"`, `[]` and `{}`.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n == 0.0),
        Value::String(text) => is_empty_text(text),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Option-aware variant for map lookups.
pub fn is_unset(value: Option<&Value>) -> bool {
    value.is_none_or(is_empty_value)
}
