//! Deterministic, pure logic shared by the config store and assertions.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! values and return deterministic outputs suitable for tests.

pub mod assertion;
pub mod emptiness;
pub mod merge;
pub mod repo_path;
pub mod text_search;
