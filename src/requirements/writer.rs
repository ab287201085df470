//! Requirements file writing.
//!
//! pip-compile reads its input from a file, so the rendered lines are first
//! written to a staging file in the system temp directory. The staging file
//! is removed once pip-compile has produced the output file, and also when
//! anything fails along the way.

use super::{OutputMode, ResolvedCategory};
use crate::constants::STAGING_FILE_SUFFIX;
use crate::core::ReqcompileError;
use crate::tools::{PipTools, ToolRunner};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Staging file body: every line followed by a newline.
#[must_use]
pub fn staging_contents(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

/// Write one requirements file of `resolved` into `project_dir`.
///
/// Returns the path of the file pip-compile produced.
///
/// # Errors
///
/// - [`ReqcompileError::IoError`] if the staging file cannot be written
/// - whatever the runner reports for pip-compile, passed through unchanged
pub async fn write_requirements<R: ToolRunner>(
    runner: &R,
    tools: &PipTools,
    resolved: &ResolvedCategory,
    mode: OutputMode,
    project_dir: &Path,
) -> Result<PathBuf, ReqcompileError> {
    let output = project_dir.join(mode.file_name(resolved.category));
    let lines = resolved.lines(mode);

    let staging = stage(&lines, &format!("reqcompile-{}-{mode}-", resolved.category))?;
    tracing::debug!(
        "Staged {} {} line(s) for {} in {}",
        lines.len(),
        mode,
        resolved.category,
        staging.path().display()
    );

    let command = tools
        .compile(staging.path(), &output)
        .current_dir(project_dir)
        .with_context(format!("{} {mode}", resolved.category));
    runner.run(&command).await?;

    staging.close()?;
    Ok(output)
}

fn stage(lines: &[String], prefix: &str) -> Result<NamedTempFile, ReqcompileError> {
    let mut staging =
        tempfile::Builder::new().prefix(prefix).suffix(STAGING_FILE_SUFFIX).tempfile()?;
    staging.write_all(staging_contents(lines).as_bytes())?;
    staging.flush()?;
    Ok(staging)
}
