//! Common utilities and traits for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::manifest::{Manifest, find_manifest_with_optional};

/// Common trait for CLI commands that operate on a manifest
pub trait CommandExecutor: Sized {
    /// Execute the command, finding the manifest automatically unless an
    /// explicit path was given
    fn execute_with_manifest_path(
        self,
        manifest_path: Option<PathBuf>,
    ) -> impl std::future::Future<Output = Result<()>> + Send
    where
        Self: Send,
    {
        async move {
            let manifest_path = find_manifest_with_optional(manifest_path)?;
            self.execute_from_path(manifest_path).await
        }
    }

    /// Execute the command with a specific manifest path
    fn execute_from_path(
        self,
        manifest_path: PathBuf,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Common context for CLI commands that need manifest and project information
#[derive(Debug)]
pub struct CommandContext {
    /// Parsed project manifest (reqcompile.toml)
    pub manifest: Manifest,
    /// Path to the manifest file
    pub manifest_path: PathBuf,
}

impl CommandContext {
    /// Create a new command context from a manifest path
    ///
    /// # Errors
    /// Returns an error if the manifest file doesn't exist or cannot be parsed
    pub fn from_manifest_path(manifest_path: impl AsRef<Path>) -> Result<Self> {
        let manifest_path = manifest_path.as_ref();

        if !manifest_path.exists() {
            return Err(crate::core::ReqcompileError::ManifestNotFound.into());
        }

        let manifest = Manifest::load(manifest_path).with_context(|| {
            format!("Failed to load manifest file: {}", manifest_path.display())
        })?;

        Ok(Self {
            manifest,
            manifest_path: manifest_path.to_path_buf(),
        })
    }

    /// Directory containing the manifest, where requirements files live
    #[must_use]
    pub fn project_dir(&self) -> &Path {
        self.manifest.project_dir()
    }

    /// Name shown in command output: `[project] name`, else the directory name
    #[must_use]
    pub fn display_name(&self) -> String {
        self.manifest.project_name().map_or_else(
            || {
                self.project_dir()
                    .canonicalize()
                    .ok()
                    .and_then(|dir| dir.file_name().map(|n| n.to_string_lossy().into_owned()))
                    .unwrap_or_else(|| self.project_dir().display().to_string())
            },
            str::to_string,
        )
    }
}
