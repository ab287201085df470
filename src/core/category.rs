//! Dependency categories
//!
//! A project declares two independent groups of dependencies. Each category
//! is compiled on its own, from its own declarations and its own override
//! urls, into its own pair of requirements files:
//!
//! | Category | Release file | Development file |
//! |----------|--------------|------------------|
//! | runtime  | `requirements.txt` | `requirements_development.txt` |
//! | build    | `build_requirements.txt` | `build_requirements_development.txt` |
//!
//! # Examples
//!
//! ```rust
//! use reqcompile::core::Category;
//!
//! assert_eq!(Category::Build.release_file_name(), "build_requirements.txt");
//! assert_eq!(Category::Runtime.development_file_name(), "requirements_development.txt");
//!
//! let category: Category = "BUILD".parse().unwrap();
//! assert_eq!(category, Category::Build);
//! ```

use crate::constants::{BUILD_REQUIREMENTS_STEM, DEVELOPMENT_SUFFIX, RUNTIME_REQUIREMENTS_STEM};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two dependency groups a project declares.
///
/// Serialized in lowercase (`"runtime"`, `"build"`) for JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Packages the project needs at run time
    Runtime,
    /// Packages needed to build, test and document the project, including
    /// the build tool's own plugin dependencies
    Build,
}

impl Category {
    /// All categories in the order they are compiled.
    pub const ALL: [Self; 2] = [Self::Runtime, Self::Build];

    /// File stem shared by both output files of this category.
    #[must_use]
    pub const fn stem(self) -> &'static str {
        match self {
            Self::Runtime => RUNTIME_REQUIREMENTS_STEM,
            Self::Build => BUILD_REQUIREMENTS_STEM,
        }
    }

    /// Name of the release output file, which never contains urls.
    #[must_use]
    pub fn release_file_name(self) -> String {
        format!("{}.txt", self.stem())
    }

    /// Name of the development output file, which prefers override urls.
    #[must_use]
    pub fn development_file_name(self) -> String {
        format!("{}{DEVELOPMENT_SUFFIX}.txt", self.stem())
    }

    /// Manifest key(s) through which dependencies of this category are declared.
    ///
    /// Quoted in validation errors so users know where to fix their manifest.
    #[must_use]
    pub const fn registration_via(self) -> &'static str {
        match self {
            Self::Runtime => "runtime.dependencies",
            Self::Build => "build.dependencies or build.plugin-dependencies",
        }
    }

    /// Manifest key holding the override urls of this category.
    #[must_use]
    pub const fn urls_key(self) -> &'static str {
        match self {
            Self::Runtime => "runtime.urls",
            Self::Build => "build.urls",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Runtime => write!(f, "runtime"),
            Self::Build => write!(f, "build"),
        }
    }
}

impl FromStr for Category {
    type Err = crate::core::ReqcompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "runtime" => Ok(Self::Runtime),
            "build" => Ok(Self::Build),
            _ => Err(crate::core::ReqcompileError::Other {
                message: format!("Unknown dependency category '{s}', expected 'runtime' or 'build'"),
            }),
        }
    }
}
