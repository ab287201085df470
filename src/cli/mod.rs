//! Command-line interface for reqcompile.
//!
//! # Available Commands
//!
//! - `init` - Create a `reqcompile.toml` manifest
//! - `compile` - Write the four requirements files and sync the environment
//! - `check` - Validate declarations and show the lines each file would get
//!
//! # Global Options
//!
//! All commands support these global options:
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all output except errors
//! - `--manifest-path` - Use this manifest instead of searching for one
//!
//! `RUST_LOG`, when set, takes precedence over `--verbose` and `--quiet`.
//!
//! # Example
//!
//! ```bash
//! reqcompile init
//! reqcompile check
//! reqcompile compile --verbose
//! ```

mod check;
pub mod common;
mod compile;
mod init;


pub use check::{CheckCommand, OutputFormat};
pub use compile::CompileCommand;
pub use init::InitCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use common::CommandExecutor;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runtime configuration derived from global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter directive (`debug`, `info`, `error`)
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Creates a new `CliConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// `RUST_LOG` wins over the configured level. Installing twice is a no-op.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("info"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    }
}

/// Main CLI structure for reqcompile.
#[derive(Parser, Debug)]
#[command(
    name = "reqcompile",
    about = "Compile pinned Python requirements files with pip-tools",
    version,
    long_about = "reqcompile turns the runtime and build dependencies declared in reqcompile.toml, \
                  plus per-package override urls, into requirements files compiled by pip-compile, \
                  then syncs the active environment with pip-sync."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the manifest file (reqcompile.toml)
    ///
    /// By default the manifest is searched for from the current directory
    /// upwards.
    #[arg(long, global = true)]
    manifest_path: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new reqcompile.toml
    Init(InitCommand),

    /// Compile requirements files and sync the environment
    Compile(CompileCommand),

    /// Validate the manifest without running pip-tools
    Check(CheckCommand),
}

impl Cli {
    /// Execute the CLI with default configuration.
    ///
    /// # Errors
    ///
    /// Whatever the selected command returns.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Build the runtime configuration from the parsed flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
        }
    }

    /// Execute the CLI with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Whatever the selected command returns.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Init(cmd) => cmd.execute().await,
            Commands::Compile(cmd) => cmd.execute_with_manifest_path(self.manifest_path).await,
            Commands::Check(cmd) => cmd.execute_with_manifest_path(self.manifest_path).await,
        }
    }
}
