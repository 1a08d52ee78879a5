//! Suite configuration and page-source assertions for WordPress acceptance tests.
//!
//! The crate keeps a strict separation, like the rest of the workspace:
//!
//! - **[`core`]**: Pure, deterministic logic (repo path classification, the
//!   merge-on-write rule, assertion polarity, text search). No I/O.
//! - **[`io`]**: Side-effecting operations (reading and writing
//!   `wpacceptance.json`, filesystem path resolution, page-source actors).
//!
//! Logging is an injected capability ([`logging::Log`]) rather than a global,
//! so callers and tests decide where messages go.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
