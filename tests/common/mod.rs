//! Common test utilities for reqcompile integration tests
//!
//! [`TestProject`] is a temporary project directory plus a pair of shell
//! scripts standing in for pip-compile and pip-sync. The fake pip-compile
//! copies its input to the `-o` file unchanged, so the generated files show
//! exactly what reqcompile staged. Both scripts append their arguments to a
//! log file.

// Not every test file uses every helper
#![allow(dead_code)]

mod manifest_builder;

pub use manifest_builder::ManifestBuilder;

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FAKE_PIP_COMPILE: &str = r#"#!/bin/sh
echo "pip-compile $*" >> "@LOG@"
input="$1"
output=""
while [ $# -gt 0 ]; do
    if [ "$1" = "-o" ]; then
        output="$2"
    fi
    shift
done
cp "$input" "$output"
"#;

const FAKE_PIP_SYNC: &str = r#"#!/bin/sh
echo "pip-sync $*" >> "@LOG@"
"#;

const FAILING_TOOL: &str = r#"#!/bin/sh
echo "Could not find a version that matches pkg" >&2
exit 2
"#;

/// A temporary project directory with fake pip-tools
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    project_dir: PathBuf,
    tools_dir: PathBuf,
    pip_compile: PathBuf,
    pip_sync: PathBuf,
}

impl TestProject {
    /// Create an empty project with working fake tools
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        let tools_dir = temp_dir.path().join("tools");
        fs::create_dir_all(&project_dir)?;
        fs::create_dir_all(&tools_dir)?;

        let log = tools_dir.join("calls.log");
        let pip_compile = tools_dir.join("pip-compile");
        let pip_sync = tools_dir.join("pip-sync");
        write_script(&pip_compile, &FAKE_PIP_COMPILE.replace("@LOG@", &log.display().to_string()))?;
        write_script(&pip_sync, &FAKE_PIP_SYNC.replace("@LOG@", &log.display().to_string()))?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
            tools_dir,
            pip_compile,
            pip_sync,
        })
    }

    /// Create a project with the given manifest content
    pub fn with_manifest(content: &str) -> Result<Self> {
        let project = Self::new()?;
        project.write_manifest(content)?;
        Ok(project)
    }

    /// Project directory
    pub fn path(&self) -> &Path {
        &self.project_dir
    }

    /// Write reqcompile.toml
    pub fn write_manifest(&self, content: &str) -> Result<()> {
        fs::write(self.project_dir.join("reqcompile.toml"), content)
            .context("Failed to write manifest")
    }

    /// Replace pip-compile with a script that fails
    pub fn break_pip_compile(&self) -> Result<()> {
        write_script(&self.pip_compile, FAILING_TOOL)
    }

    /// Replace pip-sync with a script that fails
    pub fn break_pip_sync(&self) -> Result<()> {
        write_script(&self.pip_sync, FAILING_TOOL)
    }

    /// Read a file from the project directory
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.project_dir.join(name))
            .unwrap_or_else(|e| panic!("Failed to read {name}: {e}"))
    }

    /// Whether a file exists in the project directory
    pub fn exists(&self, name: &str) -> bool {
        self.project_dir.join(name).exists()
    }

    /// Commands the fake tools received, one per line
    pub fn tool_calls(&self) -> Vec<String> {
        fs::read_to_string(self.tools_dir.join("calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// The reqcompile binary, run in the project directory with fake tools
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("reqcompile").expect("reqcompile binary is built");
        cmd.current_dir(&self.project_dir)
            .env("REQCOMPILE_PIP_COMPILE", &self.pip_compile)
            .env("REQCOMPILE_PIP_SYNC", &self.pip_sync)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

#[cfg(unix)]
fn write_script(path: &Path, body: &str) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))?;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn write_script(path: &Path, body: &str) -> Result<()> {
    fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))
}
