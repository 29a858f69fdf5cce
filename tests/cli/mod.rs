//! CLI command integration tests
//!
//! Each test lays out dumps in a temp dir, runs the built binary there and
//! checks text or JSON output, or the exit code on failure.

pub mod error_tests;
pub mod query_tests;
