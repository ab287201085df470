//! reqcompile - pinned Python requirements from declared dependencies
//!
//! A project declares two categories of Python dependencies in
//! `reqcompile.toml`: runtime dependencies and build dependencies (the latter
//! including the build tooling's own plugin dependencies). Each category may
//! also list override urls that point a declared package at a source
//! location, such as a git checkout, for development.
//!
//! For each category reqcompile produces two files next to the manifest:
//!
//! - a release file (`requirements.txt`, `build_requirements.txt`) with plain
//!   `name[extras]version` lines compiled by pip-compile
//! - a development file (`requirements_development.txt`,
//!   `build_requirements_development.txt`) where overridden packages become
//!   editable installs of their url
//!
//! and then runs pip-sync on the development files so the active environment
//! matches them exactly.
//!
//! # Modules
//!
//! - [`manifest`] - `reqcompile.toml` parsing and discovery
//! - [`requirements`] - validation, override resolution and file generation
//! - [`tools`] - pip-compile / pip-sync invocation
//! - [`cli`] - command-line interface
//! - [`core`] - error types and dependency categories
//!
//! # Example
//!
//! ```toml
//! [runtime]
//! dependencies = ["fpkg", { name = "pybuilder", version = "==0.11.5" }]
//! urls = ["git+https://github.com/pybuilder/pybuilder.git#egg=pybuilder-0"]
//!
//! [build]
//! dependencies = ["pytest-mock"]
//! ```
//!
//! produces `requirements.txt`:
//!
//! ```text
//! fpkg
//! pybuilder==0.11.5
//! ```
//!
//! and `requirements_development.txt`:
//!
//! ```text
//! fpkg
//! -e git+https://github.com/pybuilder/pybuilder.git#egg=pybuilder-0==0.11.5
//! ```
//!
//! (before pip-compile pins transitive dependencies).

// Core functionality modules
pub mod cli;
pub mod constants;
pub mod core;

// Dependency handling
pub mod manifest;
pub mod requirements;

// External tools
pub mod tools;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
