//! Core types and functionality for reqcompile
//!
//! This module holds the types every other module depends on:
//!
//! - [`ReqcompileError`] - Enumerated error types covering all failure modes
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//! - [`Category`] - The runtime/build dependency groups and their output files
//!
//! # Design Principles
//!
//! Every operation that can fail returns a [`Result`] with meaningful error
//! information. Validation errors carry the offending input verbatim so the
//! user can find it in their manifest.
//!
//! [`Result`]: std::result::Result

mod category;
pub mod error;

pub use category::Category;
pub use error::{ErrorContext, ReqcompileError, user_friendly_error};
