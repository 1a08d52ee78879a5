//! I/O helpers for suite configuration and page-source checks.

pub mod config;
pub mod page_source;
pub mod paths;
