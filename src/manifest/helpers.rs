//! Helper functions for manifest file discovery.

use crate::constants::MANIFEST_FILE_NAME;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Find manifest by searching up directory tree from current directory.
///
/// Searches for `reqcompile.toml` starting from the current working directory
/// and walking up until found or the filesystem root is reached, mirroring
/// Cargo and Git project file discovery.
///
/// # Examples
///
/// ```rust,no_run
/// use reqcompile::manifest::find_manifest;
///
/// match find_manifest() {
///     Ok(path) => println!("Found manifest at: {}", path.display()),
///     Err(e) => println!("No manifest found: {}", e),
/// }
/// ```
pub fn find_manifest() -> Result<PathBuf> {
    let current = std::env::current_dir()
        .context("Cannot determine current working directory. This may indicate a permission issue or corrupted filesystem")?;
    find_manifest_from(current)
}

/// Find manifest using explicit path or directory search.
///
/// Uses the explicit path if provided and it exists, otherwise searches from
/// the current directory.
///
/// # Errors
///
/// - Explicit path provided but doesn't exist
/// - No explicit path and no manifest found via search
pub fn find_manifest_with_optional(explicit_path: Option<PathBuf>) -> Result<PathBuf> {
    match explicit_path {
        Some(path) => {
            if path.exists() {
                Ok(path)
            } else {
                Err(crate::core::ReqcompileError::ManifestNotFound.into())
            }
        }
        None => find_manifest(),
    }
}

/// Find manifest by searching up from a specific starting directory.
///
/// Returns [`crate::core::ReqcompileError::ManifestNotFound`] wrapped in an
/// [`anyhow::Error`] if no manifest file is found after searching to the
/// filesystem root.
pub fn find_manifest_from(mut current: PathBuf) -> Result<PathBuf> {
    loop {
        let manifest_path = current.join(MANIFEST_FILE_NAME);
        if manifest_path.exists() {
            return Ok(manifest_path);
        }

        if !current.pop() {
            return Err(crate::core::ReqcompileError::ManifestNotFound.into());
        }
    }
}
