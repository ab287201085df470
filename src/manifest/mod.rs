//! Manifest file parsing for reqcompile projects.
//!
//! This module handles `reqcompile.toml`, which declares a project's runtime
//! and build dependencies, the override urls for each category, and the
//! executables used to compile and sync requirements.
//!
//! # Basic Structure
//!
//! ```toml
//! [project]
//! name = "my-project"
//!
//! [runtime]
//! dependencies = ["fpkg", { name = "pybuilder", version = "==0.11.5" }]
//! urls = ["git+https://github.com/pybuilder/pybuilder.git#egg=pybuilder-0"]
//!
//! [build]
//! dependencies = ["pytest-mock"]
//! plugin-dependencies = [{ name = "pip-tools", version = ">=1.7.0" }]
//! urls = []
//!
//! [tools]
//! pip-compile = "pip-compile"
//! pip-sync = "pip-sync"
//! implicit-plugin-dependencies = true
//! ```
//!
//! Every section is optional. Declaration order inside the arrays is kept and
//! determines the order of lines handed to the compiler.
//!
//! # Integration
//!
//! Works with [`crate::requirements`], which turns the declarations of one
//! category into requirements files, and [`crate::tools`], which runs the
//! executables configured under `[tools]`.

pub mod declaration;
pub mod helpers;


use crate::constants::{PIP_TOOLS_PACKAGE, PIP_TOOLS_VERSION};
use crate::core::ReqcompileError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use declaration::{DependencyDeclaration, DetailedDeclaration};
pub use helpers::{find_manifest, find_manifest_from, find_manifest_with_optional};

/// The main manifest file structure representing a complete `reqcompile.toml` file.
///
/// Unknown keys are rejected so typos such as `plugin_dependencies` do not
/// silently drop declarations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Informational project metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectMetadata>,

    /// Runtime category declarations and override urls
    #[serde(default)]
    pub runtime: RuntimeSection,

    /// Build category declarations and override urls
    #[serde(default)]
    pub build: BuildSection,

    /// External executables and their settings
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Directory containing the manifest; output files are written here.
    ///
    /// Not serialized; set by [`Manifest::load`].
    #[serde(skip)]
    pub manifest_dir: Option<PathBuf>,
}

/// The `[project]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectMetadata {
    /// Project name, shown in command output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The `[runtime]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeSection {
    /// Packages the project needs at run time
    #[serde(default)]
    pub dependencies: Vec<DependencyDeclaration>,

    /// Override urls for runtime packages
    #[serde(default)]
    pub urls: Vec<String>,
}

/// The `[build]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct BuildSection {
    /// Packages needed to build, test and document the project
    #[serde(default)]
    pub dependencies: Vec<DependencyDeclaration>,

    /// Packages the build tooling itself needs
    #[serde(default)]
    pub plugin_dependencies: Vec<DependencyDeclaration>,

    /// Override urls for build packages
    #[serde(default)]
    pub urls: Vec<String>,
}

/// The `[tools]` table.
///
/// Executables may also be overridden through the environment; see
/// [`crate::tools::PipTools`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ToolsConfig {
    /// Requirement-compiler executable (name on PATH or path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pip_compile: Option<String>,

    /// Environment-sync executable (name on PATH or path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pip_sync: Option<String>,

    /// Add `pip-tools>=1.7.0` to the build category's plugin dependencies
    #[serde(default = "default_true")]
    pub implicit_plugin_dependencies: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            pip_compile: None,
            pip_sync: None,
            implicit_plugin_dependencies: true,
        }
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

impl Manifest {
    /// Create a new empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self {
            project: None,
            runtime: RuntimeSection::default(),
            build: BuildSection::default(),
            tools: ToolsConfig::default(),
            manifest_dir: None,
        }
    }

    /// Load and parse a manifest from a TOML file.
    ///
    /// The directory containing the file becomes the project directory into
    /// which requirements files are written.
    ///
    /// # Errors
    ///
    /// - the file cannot be read
    /// - the content is not valid TOML or does not match the manifest schema
    ///   ([`ReqcompileError::ManifestParseError`])
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest file: {}", path.display()))?;

        let mut manifest = Self::parse(&content, path)?;

        // Absolute, so output paths stay valid for tools run inside the project dir
        let absolute = std::path::absolute(path).with_context(|| {
            format!("Cannot resolve manifest path: {}", path.display())
        })?;
        let dir = absolute
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Manifest path has no parent directory"))?;
        manifest.manifest_dir = Some(dir.to_path_buf());

        tracing::debug!(
            "Loaded manifest {} ({} runtime, {} build, {} plugin dependencies)",
            path.display(),
            manifest.runtime.dependencies.len(),
            manifest.build.dependencies.len(),
            manifest.build.plugin_dependencies.len()
        );

        Ok(manifest)
    }

    /// Parse manifest content; `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ReqcompileError> {
        toml::from_str(content).map_err(|e| ReqcompileError::ManifestParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Directory requirements files are written to.
    ///
    /// Falls back to the current directory for manifests built in memory.
    #[must_use]
    pub fn project_dir(&self) -> &Path {
        self.manifest_dir.as_deref().unwrap_or_else(|| Path::new("."))
    }

    /// Project name from `[project]`, if set.
    #[must_use]
    pub fn project_name(&self) -> Option<&str> {
        self.project.as_ref().and_then(|p| p.name.as_deref())
    }

    /// Plugin dependencies including the implicit pip-tools requirement.
    ///
    /// pip-tools is appended only when enabled and not already declared as a
    /// plugin dependency, so an explicit declaration keeps its constraint.
    #[must_use]
    pub fn plugin_dependencies(&self) -> Vec<DependencyDeclaration> {
        let mut plugins = self.build.plugin_dependencies.clone();
        if self.tools.implicit_plugin_dependencies {
            let declared = plugins.iter().any(|declaration| {
                crate::requirements::base_name(declaration.name()) == PIP_TOOLS_PACKAGE
            });
            if !declared {
                plugins.push(DependencyDeclaration::new(PIP_TOOLS_PACKAGE, Some(PIP_TOOLS_VERSION)));
            }
        }
        plugins
    }
}
