//! Validate the manifest without running pip-tools.
//!
//! Every category is resolved exactly as `compile` would resolve it, and the
//! lines each requirements file would receive are shown. Both categories are
//! always checked, so one bad category does not hide problems in the other.
//!
//! ```bash
//! reqcompile check
//! reqcompile check --format json
//! ```

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::common::{CommandContext, CommandExecutor};
use crate::core::Category;
use crate::requirements::pipeline::{CategoryCheck, check_project};
use crate::requirements::{Dependency, OutputMode};

/// Output format for the check command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output with colors
    #[default]
    Text,

    /// Structured JSON output for automation
    Json,
}

/// Command to validate the project's dependency declarations.
#[derive(Args, Debug, Default)]
pub struct CheckCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// JSON result of a check.
#[derive(Debug, Serialize)]
pub struct CheckResults {
    /// Whether every category resolved
    pub valid: bool,
    /// Per-category results in compile order
    pub categories: Vec<CategoryResult>,
}

/// JSON result for one category.
#[derive(Debug, Serialize)]
pub struct CategoryResult {
    /// The category
    pub category: Category,
    /// Validation error message, if resolution failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Resolved dependencies in declaration order
    pub dependencies: Vec<Dependency>,
    /// Lines of the release file
    pub release: Vec<String>,
    /// Lines of the development file
    pub development: Vec<String>,
}

impl From<CategoryCheck> for CategoryResult {
    fn from(check: CategoryCheck) -> Self {
        match check.result {
            Ok(resolved) => Self {
                category: check.category,
                error: None,
                release: resolved.lines(OutputMode::Release),
                development: resolved.lines(OutputMode::Development),
                dependencies: resolved.dependencies.into_values().collect(),
            },
            Err(e) => Self {
                category: check.category,
                error: Some(e.to_string()),
                dependencies: Vec::new(),
                release: Vec::new(),
                development: Vec::new(),
            },
        }
    }
}

impl CheckCommand {
    /// Check an already loaded project.
    #[must_use]
    pub fn run(&self, ctx: &CommandContext) -> CheckResults {
        let categories: Vec<CategoryResult> =
            check_project(&ctx.manifest).into_iter().map(CategoryResult::from).collect();
        CheckResults {
            valid: categories.iter().all(|c| c.error.is_none()),
            categories,
        }
    }
}

impl CommandExecutor for CheckCommand {
    async fn execute_from_path(self, manifest_path: PathBuf) -> Result<()> {
        let ctx = CommandContext::from_manifest_path(&manifest_path)?;
        let results = self.run(&ctx);

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
            OutputFormat::Text => print_text(&ctx, &results),
        }

        if results.valid {
            Ok(())
        } else {
            let failed = results.categories.iter().filter(|c| c.error.is_some()).count();
            Err(anyhow!("Validation failed for {failed} dependency categor{}", if failed == 1 { "y" } else { "ies" }))
        }
    }
}

fn print_text(ctx: &CommandContext, results: &CheckResults) {
    println!("Checking {}", ctx.display_name().bold());

    for category in &results.categories {
        if let Some(error) = &category.error {
            println!("{} {}: {}", "✗".red(), category.category, error);
            continue;
        }

        println!(
            "{} {} ({} dependencies)",
            "✓".green(),
            category.category,
            category.dependencies.len()
        );
        for (release, development) in category.release.iter().zip(&category.development) {
            if release == development {
                println!("    {release}");
            } else {
                println!("    {release} {} {}", "→".dimmed(), development.cyan());
            }
        }
    }
}
