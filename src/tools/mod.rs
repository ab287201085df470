//! External tool execution.
//!
//! reqcompile never resolves or installs packages itself; pip-compile and
//! pip-sync do the actual work. This module describes those invocations
//! ([`ToolCommand`], [`PipTools`]) and runs them ([`ToolRunner`]).
//!
//! The runner is a trait so the requirements pipeline can be exercised
//! without pip-tools installed. [`SystemRunner`] spawns real processes;
//! tests use the recording runner from `test_utils`.

mod command;
mod pip;

pub use command::ToolCommand;
pub use pip::PipTools;

use crate::core::ReqcompileError;
use std::future::Future;
use std::process::Stdio;
use tokio::process::Command;

/// Captured output of a successful command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Standard output
    pub stdout: String,
    /// Standard error output
    pub stderr: String,
}

/// Executes [`ToolCommand`]s.
pub trait ToolRunner: Send + Sync {
    /// Run `command` to completion.
    ///
    /// # Errors
    ///
    /// - [`ReqcompileError::ToolNotFound`] if the program cannot be located
    /// - [`ReqcompileError::ToolFailed`] if it exits unsuccessfully
    fn run(
        &self,
        command: &ToolCommand,
    ) -> impl Future<Output = Result<ToolOutput, ReqcompileError>> + Send;
}

/// Runs commands as child processes with captured output.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ToolRunner for SystemRunner {
    async fn run(&self, command: &ToolCommand) -> Result<ToolOutput, ReqcompileError> {
        let cwd = match command.working_dir() {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir()?,
        };

        // Resolve up front so relative program paths are taken from the
        // working directory on every platform.
        let program = which::which_in(command.program(), std::env::var_os("PATH"), &cwd)
            .map_err(|_| ReqcompileError::ToolNotFound {
                program: command.program().to_string(),
            })?;

        tracing::debug!(target: "tools", "Executing command: {command}");

        let start = std::time::Instant::now();
        let output = Command::new(&program)
            .args(command.arguments())
            .current_dir(&cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            tracing::debug!(target: "tools", "Command failed with exit code: {:?}", output.status.code());
            return Err(ReqcompileError::ToolFailed {
                command: command.command_line(),
                status: output.status.to_string(),
                stderr,
            });
        }

        if !stdout.trim().is_empty() {
            tracing::debug!(target: "tools", "{}", stdout.trim());
        }
        if !stderr.trim().is_empty() {
            tracing::debug!(target: "tools", "{}", stderr.trim());
        }
        tracing::debug!(
            target: "tools::perf",
            "{} took {}ms",
            command.program(),
            start.elapsed().as_millis()
        );

        Ok(ToolOutput {
            stdout,
            stderr,
        })
    }
}
