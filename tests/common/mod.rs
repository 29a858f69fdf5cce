//! Common test utilities and fixtures for flinspect integration tests
//!
//! This module provides:
//! - `TestRepo` builder for laying out dump directories in a temp dir
//! - Parse-tree dump fixtures in the format flang prints them

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod dumps;
pub mod test_repo;

pub use test_repo::TestRepo;
