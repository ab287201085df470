//! Whole-project compile, sync and check.
//!
//! Categories are compiled one after another, runtime first. Each category is
//! validated right before it is written, so a build category error leaves the
//! runtime files already produced in place. Within a category the
//! development file is compiled before the release file.
//!
//! Once every file exists, the development files are handed to pip-sync so
//! the active environment matches them exactly.

use super::{CategoryConfig, OutputMode, ResolvedCategory, write_requirements};
use crate::constants::DEVELOPMENT_FILES_GLOB;
use crate::core::{Category, ReqcompileError};
use crate::manifest::Manifest;
use crate::tools::{PipTools, ToolRunner};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Switches for [`compile_project`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Run pip-sync after compiling
    pub sync: bool,
    /// Validate and render only; run no tools and write no files
    pub dry_run: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            sync: true,
            dry_run: false,
        }
    }
}

/// One requirements file produced (or, in a dry run, that would be produced).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    /// Category the file belongs to
    pub category: Category,
    /// Release or development variant
    pub mode: OutputMode,
    /// Output path inside the project directory
    pub path: PathBuf,
    /// Lines handed to pip-compile
    pub lines: Vec<String>,
}

/// What a [`compile_project`] run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompileReport {
    /// Files in the order they were compiled
    pub files: Vec<GeneratedFile>,
    /// Files handed to pip-sync; empty when sync did not run
    pub synced: Vec<PathBuf>,
}

/// Compile both categories of `manifest` and optionally sync.
///
/// # Errors
///
/// The first validation error, staging error or tool failure. Nothing after
/// the failing step runs.
pub async fn compile_project<R: ToolRunner>(
    manifest: &Manifest,
    tools: &PipTools,
    runner: &R,
    options: CompileOptions,
) -> Result<CompileReport, ReqcompileError> {
    let project_dir = manifest.project_dir();
    let mut report = CompileReport::default();

    for category in Category::ALL {
        let resolved = CategoryConfig::from_manifest(manifest, category).resolve()?;
        tracing::info!(
            "Compiling {category} requirements ({} dependencies)",
            resolved.dependencies.len()
        );
        report
            .files
            .extend(compile_category(runner, tools, &resolved, project_dir, options.dry_run).await?);
    }

    if options.sync && !options.dry_run {
        report.synced = sync_environment(runner, tools, project_dir).await?;
    }

    Ok(report)
}

/// Produce both files of one resolved category, development first.
///
/// # Errors
///
/// See [`write_requirements`].
pub async fn compile_category<R: ToolRunner>(
    runner: &R,
    tools: &PipTools,
    resolved: &ResolvedCategory,
    project_dir: &Path,
    dry_run: bool,
) -> Result<Vec<GeneratedFile>, ReqcompileError> {
    let mut files = Vec::with_capacity(OutputMode::ALL.len());

    for mode in OutputMode::ALL {
        let path = if dry_run {
            project_dir.join(mode.file_name(resolved.category))
        } else {
            write_requirements(runner, tools, resolved, mode, project_dir).await?
        };
        files.push(GeneratedFile {
            category: resolved.category,
            mode,
            path,
            lines: resolved.lines(mode),
        });
    }

    Ok(files)
}

/// Development requirements files in `project_dir`, sorted by name.
///
/// # Errors
///
/// [`ReqcompileError::IoError`] if the directory cannot be listed.
pub fn development_files(project_dir: &Path) -> Result<Vec<PathBuf>, ReqcompileError> {
    let pattern = glob::Pattern::new(DEVELOPMENT_FILES_GLOB).map_err(|e| ReqcompileError::Other {
        message: format!("Invalid development files pattern: {e}"),
    })?;

    // Hidden files are not sync targets
    let options = glob::MatchOptions {
        require_literal_leading_dot: true,
        ..glob::MatchOptions::default()
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(project_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if pattern.matches_with(name, options) && entry.file_type()?.is_file() {
            files.push(PathBuf::from(name));
        }
    }
    files.sort();
    Ok(files)
}

/// Run pip-sync on every development file in `project_dir`.
///
/// Returns the files synced, relative to `project_dir`. When none exist a
/// warning is logged and pip-sync is not run.
///
/// # Errors
///
/// Listing errors, or whatever the runner reports for pip-sync.
pub async fn sync_environment<R: ToolRunner>(
    runner: &R,
    tools: &PipTools,
    project_dir: &Path,
) -> Result<Vec<PathBuf>, ReqcompileError> {
    let files = development_files(project_dir)?;
    if files.is_empty() {
        tracing::warn!(
            "No files matching {DEVELOPMENT_FILES_GLOB} in {}, skipping sync",
            project_dir.display()
        );
        return Ok(files);
    }

    tracing::info!("Syncing environment with {} file(s)", files.len());
    let command = tools.sync(&files).current_dir(project_dir).with_context("sync");
    runner.run(&command).await?;
    Ok(files)
}

/// Outcome of validating one category without running any tool.
#[derive(Debug, Clone)]
pub struct CategoryCheck {
    /// The category checked
    pub category: Category,
    /// Resolved dependencies, or the first validation error
    pub result: Result<ResolvedCategory, ReqcompileError>,
}

/// Validate every category of `manifest` independently.
///
/// Unlike [`compile_project`], an error in one category does not hide the
/// state of the other.
#[must_use]
pub fn check_project(manifest: &Manifest) -> Vec<CategoryCheck> {
    Category::ALL
        .into_iter()
        .map(|category| CategoryCheck {
            category,
            result: CategoryConfig::from_manifest(manifest, category).resolve(),
        })
        .collect()
}
