//! Integration test suite for reqcompile
//!
//! End-to-end tests that run the `reqcompile` binary against temporary
//! projects. pip-compile and pip-sync are replaced by shell scripts (see
//! `common`), so these tests need a Unix shell but no Python.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **check**: `check` command, text and JSON output
//! - **compile**: requirements generation, override urls, sync
//! - **errors**: validation failures and tool failures
//! - **init**: manifest creation

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod check;
#[cfg(unix)]
mod errors;
mod init;
