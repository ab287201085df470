//! pip-tools command construction.
//!
//! Executables are chosen in this order:
//! 1. `REQCOMPILE_PIP_COMPILE` / `REQCOMPILE_PIP_SYNC` environment variables
//! 2. `pip-compile` / `pip-sync` under `[tools]` in the manifest
//! 3. the bare names `pip-compile` / `pip-sync`, looked up on PATH

use super::ToolCommand;
use crate::constants::{
    DEFAULT_PIP_COMPILE, DEFAULT_PIP_SYNC, PIP_COMPILE_DETERMINISM_FLAGS, PIP_COMPILE_ENV,
    PIP_SYNC_ENV,
};
use crate::manifest::ToolsConfig;
use std::path::{Path, PathBuf};

/// The pip-compile and pip-sync executables for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipTools {
    pip_compile: String,
    pip_sync: String,
}

impl Default for PipTools {
    fn default() -> Self {
        Self::new(DEFAULT_PIP_COMPILE, DEFAULT_PIP_SYNC)
    }
}

impl PipTools {
    /// Use the given executables.
    pub fn new(pip_compile: impl Into<String>, pip_sync: impl Into<String>) -> Self {
        Self {
            pip_compile: pip_compile.into(),
            pip_sync: pip_sync.into(),
        }
    }

    /// Resolve executables from the process environment and the manifest.
    #[must_use]
    pub fn from_config(config: &ToolsConfig) -> Self {
        Self::from_config_with_env(config, |key| std::env::var(key).ok())
    }

    /// Same as [`PipTools::from_config`] with an explicit environment lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_config_with_env<F>(config: &ToolsConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str, configured: Option<&String>, default: &str| {
            env(key)
                .filter(|value| !value.trim().is_empty())
                .or_else(|| configured.filter(|value| !value.trim().is_empty()).cloned())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            pip_compile: pick(PIP_COMPILE_ENV, config.pip_compile.as_ref(), DEFAULT_PIP_COMPILE),
            pip_sync: pick(PIP_SYNC_ENV, config.pip_sync.as_ref(), DEFAULT_PIP_SYNC),
        }
    }

    /// Requirement-compiler executable.
    #[must_use]
    pub fn pip_compile(&self) -> &str {
        &self.pip_compile
    }

    /// Environment-sync executable.
    #[must_use]
    pub fn pip_sync(&self) -> &str {
        &self.pip_sync
    }

    /// `pip-compile <input> -o <output> --no-header --no-annotate`
    #[must_use]
    pub fn compile(&self, input: &Path, output: &Path) -> ToolCommand {
        ToolCommand::new(&self.pip_compile)
            .arg(input.display().to_string())
            .arg("-o")
            .arg(output.display().to_string())
            .args(PIP_COMPILE_DETERMINISM_FLAGS)
    }

    /// `pip-sync <file>...`
    #[must_use]
    pub fn sync(&self, files: &[PathBuf]) -> ToolCommand {
        ToolCommand::new(&self.pip_sync).args(files.iter().map(|f| f.display().to_string()))
    }
}
