//! Initialize a new reqcompile project with a manifest file.
//!
//! ```bash
//! reqcompile init
//! reqcompile init --path ./my-project
//! reqcompile init --force
//! ```
//!
//! The generated manifest contains commented examples for every section.
//! Existing manifests are never overwritten without `--force`.

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use crate::constants::MANIFEST_FILE_NAME;

const TEMPLATE: &str = r#"# reqcompile manifest
# Declares the dependencies compiled into requirements.txt,
# requirements_development.txt, build_requirements.txt and
# build_requirements_development.txt next to this file.

[project]
# name = "my-project"

[runtime]
# Packages needed at run time: "name", "name[extra]" or { name = "...", version = "..." }
dependencies = []
# Override urls used in requirements_development.txt. The egg fragment names
# the dependency being overridden and must carry a version.
# Example: "git+https://github.com/org/pkg.git#egg=pkg-0"
urls = []

[build]
# Packages needed to build, test and document the project
dependencies = []
# Packages the build tooling itself needs (pip-tools is added automatically)
plugin-dependencies = []
urls = []

[tools]
# pip-compile = "pip-compile"
# pip-sync = "pip-sync"
"#;

/// Command to initialize a new project with a `reqcompile.toml` manifest.
#[derive(Args, Debug, Default)]
pub struct InitCommand {
    /// Directory to create the manifest in (defaults to current directory)
    ///
    /// Created if it doesn't exist.
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Overwrite an existing manifest
    #[arg(short, long)]
    pub force: bool,
}

impl InitCommand {
    /// Write the manifest template.
    ///
    /// # Errors
    ///
    /// - a manifest already exists and `force` is false
    /// - the directory or the file cannot be created
    pub async fn execute(self) -> Result<()> {
        let target_dir = self.path.unwrap_or_else(|| PathBuf::from("."));
        let manifest_path = target_dir.join(MANIFEST_FILE_NAME);

        if manifest_path.exists() && !self.force {
            return Err(anyhow!(
                "Manifest already exists at {}. Use --force to overwrite",
                manifest_path.display()
            ));
        }

        if !target_dir.exists() {
            fs::create_dir_all(&target_dir)?;
        }

        fs::write(&manifest_path, TEMPLATE)?;

        println!("{} Initialized {} at {}", "✓".green(), MANIFEST_FILE_NAME, manifest_path.display());
        println!("\n{}", "Next steps:".cyan());
        println!("  Declare dependencies under {} and {}", "[runtime]".bright_white(), "[build]".bright_white());
        println!("  Then run {} to write requirements files and sync", "reqcompile compile".bright_white());

        Ok(())
    }
}
