//! Test utilities for reqcompile
//!
//! Helpers shared by unit tests and, through the `test-utils` feature, by the
//! integration tests:
//! - [`init_test_logging`] wires `tracing` output into the test harness
//! - [`RecordingRunner`] stands in for pip-compile and pip-sync
//!
//! # Example
//!
//! ```rust,no_run
//! use reqcompile::test_utils::RecordingRunner;
//! use reqcompile::tools::{ToolCommand, ToolRunner};
//!
//! # async fn example() {
//! let runner = RecordingRunner::new().fail_on("pip-sync");
//! let result = runner.run(&ToolCommand::new("pip-sync")).await;
//! assert!(result.is_err());
//! assert_eq!(runner.calls().len(), 1);
//! # }
//! ```

use crate::core::ReqcompileError;
use crate::tools::{ToolCommand, ToolOutput, ToolRunner};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Respects `RUST_LOG` if set, or uses the provided level. Does nothing when
/// neither is given, and only the first call has any effect.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// A command seen by [`RecordingRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// The command as handed to the runner
    pub command: ToolCommand,
    /// Contents of the first argument when it was a readable file at call
    /// time; staging files are deleted right after the call
    pub staged: Option<String>,
}

/// In-memory [`ToolRunner`] that records every command.
///
/// Commands with an `-o <path>` argument behave like pip-compile: the first
/// argument is copied to the output path unchanged. Everything else succeeds
/// with empty output unless its program was registered with
/// [`RecordingRunner::fail_on`].
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<RecordedCall>>,
    failing: Vec<String>,
}

impl RecordingRunner {
    /// A runner where every command succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every command running `program` exit with status 1.
    #[must_use]
    pub fn fail_on(mut self, program: impl Into<String>) -> Self {
        self.failing.push(program.into());
        self
    }

    /// Commands run so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn resolve(command: &ToolCommand, path: &str) -> PathBuf {
        let path = Path::new(path);
        match command.working_dir() {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ToolRunner for RecordingRunner {
    async fn run(&self, command: &ToolCommand) -> Result<ToolOutput, ReqcompileError> {
        let staged = command
            .arguments()
            .first()
            .map(|first| Self::resolve(command, first))
            .filter(|path| path.is_file())
            .and_then(|path| std::fs::read_to_string(path).ok());

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                command: command.clone(),
                staged: staged.clone(),
            });
        }

        if self.failing.iter().any(|program| program == command.program()) {
            return Err(ReqcompileError::ToolFailed {
                command: command.command_line(),
                status: "exit status: 1".to_string(),
                stderr: format!("{} failed\n", command.program()),
            });
        }

        if let (Some(output), Some(contents)) = (command.flag_value("-o"), &staged) {
            std::fs::write(Self::resolve(command, output), contents)?;
        }

        Ok(ToolOutput::default())
    }
}
