//! Requirements file generation.
//!
//! This module turns the dependency declarations of one [`Category`] into the
//! category's two requirements files. Each category goes through the same
//! steps, fully, before the next category starts:
//!
//! 1. **Merge** (build only) - [`merge::merge_build_dependencies`] unions the
//!    build dependencies with plugin dependencies whose base name is not
//!    already declared as a build dependency.
//! 2. **Normalize** - [`normalize::normalize`] splits every declared name into
//!    a base name and an extras suffix and rejects malformed names and
//!    declarations carrying their own url.
//! 3. **Resolve overrides** - [`overrides::apply_overrides`] matches every
//!    override url to a normalized dependency through its `#egg=name-version`
//!    fragment and records `url + options + version` on the match.
//! 4. **Write** - [`writer::write_requirements`] renders the staging body for
//!    one [`OutputMode`] and runs pip-compile on it.
//!
//! Steps 1 to 3 are pure; only the writer touches the filesystem and runs
//! external tools. [`pipeline`] strings the steps together for a whole
//! project and then runs pip-sync.
//!
//! # Examples
//!
//! ```rust
//! use reqcompile::core::Category;
//! use reqcompile::manifest::DependencyDeclaration;
//! use reqcompile::requirements::{CategoryConfig, OutputMode};
//!
//! let config = CategoryConfig {
//!     category: Category::Runtime,
//!     dependencies: vec![DependencyDeclaration::new("pybuilder", Some("==0.11.5"))],
//!     urls: vec!["git+https://github.com/pybuilder/pybuilder.git#egg=pybuilder-0".to_string()],
//! };
//!
//! let resolved = config.resolve().unwrap();
//! assert_eq!(resolved.lines(OutputMode::Release), vec!["pybuilder==0.11.5"]);
//! assert_eq!(
//!     resolved.lines(OutputMode::Development),
//!     vec!["-e git+https://github.com/pybuilder/pybuilder.git#egg=pybuilder-0==0.11.5"]
//! );
//! ```

pub mod merge;
pub mod normalize;
pub mod overrides;
pub mod pipeline;
pub mod writer;

use crate::constants::EDITABLE_PREFIX;
use crate::core::{Category, ReqcompileError};
use crate::manifest::{DependencyDeclaration, Manifest};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

pub use merge::merge_build_dependencies;
pub use normalize::normalize;
pub use overrides::{OverrideUrl, apply_overrides};
pub use pipeline::{
    CategoryCheck, CompileOptions, CompileReport, GeneratedFile, check_project, compile_project,
    development_files, sync_environment,
};
pub use writer::write_requirements;

/// Dependencies of one category keyed by base name, in declaration order.
pub type DependencyMap = IndexMap<String, Dependency>;

/// One declared package requirement after normalization.
///
/// `name` is the join key against override urls and is unique within a
/// category. `options` and `version` are kept verbatim. `url` is only set
/// when an override url matched this dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl Dependency {
    /// Create a dependency without an override url.
    pub fn new(name: impl Into<String>, options: Option<String>, version: Option<String>) -> Self {
        Self {
            name: name.into(),
            options,
            version,
            url: None,
        }
    }

    /// Base package name, without extras or version.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extras suffix such as `[extra1,extra2]`.
    #[must_use]
    pub fn options(&self) -> Option<&str> {
        self.options.as_deref()
    }

    /// Version constraint such as `==1.2.3`.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Override url with options and version appended, if overridden.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Return this dependency overridden by `url`.
    ///
    /// The stored url is `url + options + version`, the form pip expects for
    /// an editable install with extras and a constraint.
    #[must_use]
    pub fn with_url(self, url: &str) -> Self {
        let mut full = url.to_string();
        if let Some(options) = &self.options {
            full.push_str(options);
        }
        if let Some(version) = &self.version {
            full.push_str(version);
        }
        Self {
            url: Some(full),
            ..self
        }
    }

    /// `name + options + version`, with no separators.
    #[must_use]
    pub fn requirement(&self) -> String {
        let mut line = self.name.clone();
        if let Some(options) = &self.options {
            line.push_str(options);
        }
        if let Some(version) = &self.version {
            line.push_str(version);
        }
        line
    }

    /// The staging line for this dependency in the given mode.
    ///
    /// Development mode emits the override url as an editable install when
    /// one is set; everything else falls back to [`Dependency::requirement`].
    #[must_use]
    pub fn line(&self, mode: OutputMode) -> String {
        match (&self.url, mode) {
            (Some(url), OutputMode::Development) => {
                if url.starts_with(EDITABLE_PREFIX) {
                    url.clone()
                } else {
                    format!("{EDITABLE_PREFIX} {url}")
                }
            }
            _ => self.requirement(),
        }
    }
}

/// Which of a category's two files is being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Plain `name[extras]version` lines only; never contains urls
    Release,
    /// Override urls as editable installs, plain lines otherwise
    Development,
}

impl OutputMode {
    /// Order in which a category's files are generated.
    pub const ALL: [Self; 2] = [Self::Development, Self::Release];

    /// Output file name of this mode for `category`.
    #[must_use]
    pub fn file_name(self, category: Category) -> String {
        match self {
            Self::Release => category.release_file_name(),
            Self::Development => category.development_file_name(),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Release => write!(f, "release"),
            Self::Development => write!(f, "development"),
        }
    }
}

/// Returns the part of a declared name before any extras list.
///
/// Used where names must be compared before normalization has validated them.
#[must_use]
pub fn base_name(name: &str) -> &str {
    name.split_once('[').map_or(name, |(base, _)| base)
}

/// Everything one category needs to be compiled: its declarations in order
/// and its override urls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryConfig {
    /// The category being compiled
    pub category: Category,
    /// Declarations in declaration order (already merged for build)
    pub dependencies: Vec<DependencyDeclaration>,
    /// Raw override urls
    pub urls: Vec<String>,
}

impl CategoryConfig {
    /// Extract a category's configuration from the manifest.
    ///
    /// For [`Category::Build`] the declarations are the merge of build
    /// dependencies and plugin dependencies.
    #[must_use]
    pub fn from_manifest(manifest: &Manifest, category: Category) -> Self {
        match category {
            Category::Runtime => Self {
                category,
                dependencies: manifest.runtime.dependencies.clone(),
                urls: manifest.runtime.urls.clone(),
            },
            Category::Build => Self {
                category,
                dependencies: merge_build_dependencies(
                    &manifest.build.dependencies,
                    &manifest.plugin_dependencies(),
                ),
                urls: manifest.build.urls.clone(),
            },
        }
    }

    /// Normalize the declarations and apply the override urls.
    ///
    /// # Errors
    ///
    /// The first validation error encountered; nothing is partially applied.
    pub fn resolve(&self) -> Result<ResolvedCategory, ReqcompileError> {
        let dependencies = normalize(&self.dependencies, self.category)?;
        if !self.urls.is_empty() {
            tracing::debug!(
                "Applying {} override url(s) from {}",
                self.urls.len(),
                self.category.urls_key()
            );
        }
        let dependencies = apply_overrides(dependencies, &self.urls, self.category)?;
        Ok(ResolvedCategory {
            category: self.category,
            dependencies,
        })
    }
}

/// A category whose dependencies have been validated and overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCategory {
    /// The category
    pub category: Category,
    /// Dependencies keyed by base name, in declaration order
    pub dependencies: DependencyMap,
}

impl ResolvedCategory {
    /// Staging lines for `mode`, in declaration order.
    #[must_use]
    pub fn lines(&self, mode: OutputMode) -> Vec<String> {
        self.dependencies.values().map(|dependency| dependency.line(mode)).collect()
    }
}
