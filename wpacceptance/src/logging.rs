//! Logging for suite tooling.
//!
//! # Separation of Concerns
//!
//! - **Tracing subscriber ([`init`])**: process diagnostics via `RUST_LOG`,
//!   output to stderr.
//!
//! - **[`Log`] capability**: the message sink handed to [`ConfigStore`] and
//!   page-source constraints at construction. Messages carry a verbosity and a
//!   level; [`TracingLog`] forwards them to `tracing`, tests record them.
//!
//! [`ConfigStore`]: crate::io::config::ConfigStore

use std::fmt;

use tracing_subscriber::{
    EnvFilter, fmt as tracing_fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Severity attached to a logged message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        };
        f.write_str(label)
    }
}

/// Message verbosity: always shown.
pub const NORMAL: u8 = 0;
/// Message verbosity: shown with `-v`.
pub const VERBOSE: u8 = 1;
/// Message verbosity: shown with `-vv`.
pub const VERY_VERBOSE: u8 = 2;
/// Message verbosity: shown with `-vvv`.
pub const DEBUG: u8 = 3;

/// Fire-and-forget message sink.
pub trait Log: Send + Sync {
    fn log(&self, message: &str, verbosity: u8, level: LogLevel);
}

/// [`Log`] implementation backed by `tracing`.
///
/// Messages above `max_verbosity` are dropped before they reach the
/// subscriber, so `-v` flags and `RUST_LOG` compose.
#[derive(Debug, Clone, Copy)]
pub struct TracingLog {
    max_verbosity: u8,
}

impl TracingLog {
    pub fn new(max_verbosity: u8) -> Self {
        Self { max_verbosity }
    }
}

impl Default for TracingLog {
    fn default() -> Self {
        Self::new(NORMAL)
    }
}

impl Log for TracingLog {
    fn log(&self, message: &str, verbosity: u8, level: LogLevel) {
        if verbosity > self.max_verbosity {
            return;
        }
        match level {
            LogLevel::Error => tracing::error!(verbosity, "{message}"),
            LogLevel::Warning => tracing::warn!(verbosity, "{message}"),
            LogLevel::Info | LogLevel::Success => match verbosity {
                NORMAL => tracing::info!(%level, "{message}"),
                VERBOSE => tracing::debug!(%level, "{message}"),
                _ => tracing::trace!(%level, verbosity, "{message}"),
            },
        }
    }
}

/// Initialize the tracing subscriber for the CLI.
///
/// Reads `RUST_LOG` env var. Defaults to `warn` if unset, or to the level
/// implied by `verbosity` when the user passed `-v` flags.
/// Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=wpacceptance=debug wpacceptance config show
/// ```
pub fn init(verbosity: u8) {
    let fallback = match verbosity {
        NORMAL => "warn",
        VERBOSE => "info,wpacceptance=debug",
        _ => "info,wpacceptance=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
