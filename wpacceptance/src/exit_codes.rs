//! Stable exit codes for `wpacceptance` CLI commands.

/// Command succeeded or the assertion held.
pub const OK: i32 = 0;
/// Config could not be loaded, resolved, or written, or a key was missing.
pub const INVALID: i32 = 1;
/// `wpacceptance see` / `dont-see` evaluated to false.
pub const ASSERTION_FAILED: i32 = 2;
