//! Compile requirements files and sync the environment.
//!
//! ```bash
//! # Write all four requirements files, then pip-sync the development ones
//! reqcompile compile
//!
//! # Only write the files
//! reqcompile compile --no-sync
//!
//! # Show what would be handed to pip-compile without running anything
//! reqcompile compile --dry-run
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::{CommandContext, CommandExecutor};
use crate::requirements::{CompileOptions, CompileReport, compile_project};
use crate::tools::{PipTools, SystemRunner, ToolRunner};

/// Command to compile the project's requirements files.
#[derive(Args, Debug, Default)]
pub struct CompileCommand {
    /// Do not run pip-sync after compiling
    #[arg(long)]
    pub no_sync: bool,

    /// Validate and print the staged lines without running pip-compile or pip-sync
    #[arg(long)]
    pub dry_run: bool,
}

impl CompileCommand {
    fn options(&self) -> CompileOptions {
        CompileOptions {
            sync: !self.no_sync,
            dry_run: self.dry_run,
        }
    }

    /// Run the command against an already loaded project with `runner`.
    ///
    /// # Errors
    ///
    /// Any validation error or tool failure from the compile pipeline.
    pub async fn run<R: ToolRunner>(&self, ctx: &CommandContext, runner: &R) -> Result<CompileReport> {
        let tools = PipTools::from_config(&ctx.manifest.tools);
        tracing::debug!(
            "Using {} and {} for {}",
            tools.pip_compile(),
            tools.pip_sync(),
            ctx.manifest_path.display()
        );

        let report = compile_project(&ctx.manifest, &tools, runner, self.options()).await?;
        Ok(report)
    }
}

impl CommandExecutor for CompileCommand {
    async fn execute_from_path(self, manifest_path: PathBuf) -> Result<()> {
        let ctx = CommandContext::from_manifest_path(&manifest_path)?;
        let report = self.run(&ctx, &SystemRunner::new()).await?;
        print_report(&ctx, &report, self.dry_run);
        Ok(())
    }
}

fn print_report(ctx: &CommandContext, report: &CompileReport, dry_run: bool) {
    if dry_run {
        for file in &report.files {
            println!("{} {}", "#".dimmed(), file.path.display().to_string().cyan());
            for line in &file.lines {
                println!("{line}");
            }
        }
        println!("\n{} Dry run, nothing was written", "✓".green());
        return;
    }

    for file in &report.files {
        println!("{} Compiled {}", "✓".green(), file.path.display());
    }

    if report.synced.is_empty() {
        println!("{} Compiled requirements for {}", "✓".green(), ctx.display_name().bold());
    } else {
        let names: Vec<String> = report.synced.iter().map(|p| p.display().to_string()).collect();
        println!("{} Synced environment with {}", "✓".green(), names.join(", "));
    }
}
