//! Error handling for reqcompile
//!
//! This module provides the error types and user-friendly error reporting for
//! reqcompile. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`ReqcompileError`] - Enumerated error types for all failure cases
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Error Categories
//!
//! - **Validation**: every problem found while reconciling declared
//!   dependencies with override urls, e.g. [`ReqcompileError::UrlMissingEgg`].
//!   All of them are fatal and abort the category being compiled.
//! - **Configuration**: [`ReqcompileError::ManifestNotFound`],
//!   [`ReqcompileError::ManifestParseError`].
//! - **External tools**: [`ReqcompileError::ToolNotFound`],
//!   [`ReqcompileError::ToolFailed`].
//!
//! Use [`user_friendly_error`] to convert any error into a user-friendly
//! format with contextual suggestions.
//!
//! # Examples
//!
//! ```rust,no_run
//! use reqcompile::core::{ReqcompileError, user_friendly_error};
//!
//! let error = ReqcompileError::UrlMissingScheme {
//!     url: "pkg".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use crate::constants::MANIFEST_FILE_NAME;
use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for reqcompile operations
///
/// The validation variants carry exactly the text a user needs to fix their
/// manifest: the offending name or url and, where relevant, the manifest key
/// through which the dependency should have been declared (`via`).
///
/// # Examples
///
/// ```rust,no_run
/// use reqcompile::core::ReqcompileError;
///
/// let error = ReqcompileError::UnregisteredOverride {
///     name: "pkg".to_string(),
///     via: "runtime.dependencies".to_string(),
/// };
/// assert!(error.to_string().contains("is not registered as a dependency via runtime.dependencies"));
/// ```
#[derive(Error, Debug)]
pub enum ReqcompileError {
    /// Dependency name does not have the `pkg` or `pkg[extra1,extra2]` shape
    #[error("Invalid dependency name '{name}'. Examples of valid names: pkg, pkg[extra1,extra2].")]
    InvalidDependencyName {
        /// The name as declared
        name: String,
    },

    /// A dependency declaration carries its own url
    ///
    /// Urls must be supplied through the category's override list; a url on
    /// the declaration itself maps to setuptools `dependency_links`, which is
    /// deprecated.
    #[error(
        "Dependency url set on '{name}'. Setting url on a {via} entry should be considered \
         deprecated as it uses setuptools.setup(dependency_links=...), which is deprecated. \
         Instead, you have to release the dependency to a Python index."
    )]
    DirectUrl {
        /// Name of the offending declaration
        name: String,
        /// Manifest key the declaration was made through
        via: String,
    },

    /// Override url has no `scheme://` part
    #[error("Dependency url must start with '{{scheme}}://', got: '{url}'.")]
    UrlMissingScheme {
        /// The url with whitespace and any `-e` prefix removed
        url: String,
    },

    /// Override url fragment has no `egg` parameter
    #[error("Missing '#egg=pkg-name-version' fragment in url '{url}'.")]
    UrlMissingEgg {
        /// The url with whitespace and any `-e` prefix removed
        url: String,
    },

    /// Override url `egg` parameter has no `-version` suffix
    #[error(
        "Missing version in 'egg' parameter of url '{url}'. \
         Please add version such that: 'egg={{pkg-name}}-{{version}}'."
    )]
    EggMissingVersion {
        /// The url with whitespace and any `-e` prefix removed
        url: String,
    },

    /// Override url names a package that is not declared in its category
    #[error(
        "Dependency url references dependency '{name}', but '{name}' is not registered \
         as a dependency via {via}. Possible causes: 1) forgot to add with {via}, \
         2) meant to use the build/runtime counterpart or 3) forgot to specify version \
         in '#egg={{pkg-name}}-{{version}}' fragment."
    )]
    UnregisteredOverride {
        /// Package name extracted from the egg fragment
        name: String,
        /// Manifest key(s) through which the dependency should be declared
        via: String,
    },

    /// Manifest file (reqcompile.toml) not found
    ///
    /// reqcompile searches for the manifest starting from the current working
    /// directory and walking up the directory tree, similar to how git
    /// searches for `.git`.
    #[error("Manifest file reqcompile.toml not found in current directory or any parent directory")]
    ManifestNotFound,

    /// Manifest parsing error
    #[error("Invalid manifest file syntax in {file}")]
    ManifestParseError {
        /// Path to the manifest file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// External executable not found in PATH
    #[error("Command '{program}' is not installed or not found in PATH")]
    ToolNotFound {
        /// Program that could not be located
        program: String,
    },

    /// External command exited unsuccessfully
    ///
    /// The exit status and captured stderr are passed through untouched.
    #[error("Command failed with {status}: {command}")]
    ToolFailed {
        /// Full command line that was executed
        command: String,
        /// Exit status as reported by the operating system
        status: String,
        /// Captured standard error output
        stderr: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl ReqcompileError {
    /// Whether this error is one of the manifest validation failures.
    ///
    /// Validation failures are caused by the user's declarations and are
    /// reported as-is; everything else is an environment problem.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDependencyName { .. }
                | Self::DirectUrl { .. }
                | Self::UrlMissingScheme { .. }
                | Self::UrlMissingEgg { .. }
                | Self::EggMissingVersion { .. }
                | Self::UnregisteredOverride { .. }
        )
    }
}

impl Clone for ReqcompileError {
    fn clone(&self) -> Self {
        match self {
            Self::InvalidDependencyName {
                name,
            } => Self::InvalidDependencyName {
                name: name.clone(),
            },
            Self::DirectUrl {
                name,
                via,
            } => Self::DirectUrl {
                name: name.clone(),
                via: via.clone(),
            },
            Self::UrlMissingScheme {
                url,
            } => Self::UrlMissingScheme {
                url: url.clone(),
            },
            Self::UrlMissingEgg {
                url,
            } => Self::UrlMissingEgg {
                url: url.clone(),
            },
            Self::EggMissingVersion {
                url,
            } => Self::EggMissingVersion {
                url: url.clone(),
            },
            Self::UnregisteredOverride {
                name,
                via,
            } => Self::UnregisteredOverride {
                name: name.clone(),
                via: via.clone(),
            },
            Self::ManifestNotFound => Self::ManifestNotFound,
            Self::ManifestParseError {
                file,
                reason,
            } => Self::ManifestParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::ToolNotFound {
                program,
            } => Self::ToolNotFound {
                program: program.clone(),
            },
            Self::ToolFailed {
                command,
                status,
                stderr,
            } => Self::ToolFailed {
                command: command.clone(),
                status: status.clone(),
                stderr: stderr.clone(),
            },
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// Combines a [`ReqcompileError`] with optional suggestions and details for
/// display in the terminal.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: ReqcompileError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: ReqcompileError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`ReqcompileError`] (also when wrapped in `anyhow` context),
/// [`std::io::Error`] and [`toml::de::Error`]; anything else is reported
/// with its full cause chain.
///
/// # Examples
///
/// ```rust,no_run
/// use reqcompile::core::user_friendly_error;
///
/// let error = anyhow::anyhow!("Something went wrong");
/// let context = user_friendly_error(error);
/// context.display();
/// ```
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(req_error) = error.downcast_ref::<ReqcompileError>() {
        return create_error_context(req_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(ReqcompileError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check file ownership and permissions in the project directory")
                .with_details("reqcompile writes requirements files next to reqcompile.toml");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(ReqcompileError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(ReqcompileError::ManifestParseError {
            file: "reqcompile.toml".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax in your reqcompile.toml file")
        .with_details(toml_error.to_string());
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(ReqcompileError::Other {
        message,
    })
}

/// Map each [`ReqcompileError`] variant to tailored suggestions and details.
fn create_error_context(error: ReqcompileError) -> ErrorContext {
    let (suggestion, details): (Option<String>, Option<String>) = match &error {
        ReqcompileError::InvalidDependencyName { .. } => (
            Some("Declare extras inside the name, e.g. name = \"pkg[extra1,extra2]\", and put the version constraint in `version`".to_string()),
            None,
        ),

        ReqcompileError::DirectUrl { .. } => (
            Some("Remove `url` from the declaration and add the url to the category's `urls` list with an '#egg=name-version' fragment".to_string()),
            None,
        ),

        ReqcompileError::UrlMissingScheme { .. } => (
            Some("Use a full url such as git+https://github.com/org/pkg.git#egg=pkg-0".to_string()),
            None,
        ),

        ReqcompileError::UrlMissingEgg { .. } | ReqcompileError::EggMissingVersion { .. } => (
            None,
            Some("The egg fragment identifies which declared dependency the url overrides".to_string()),
        ),

        ReqcompileError::UnregisteredOverride { via, .. } => (
            None,
            Some(format!("Override urls may only replace packages declared via {via}")),
        ),

        ReqcompileError::ManifestNotFound => (
            Some("Run 'reqcompile init' to create a reqcompile.toml, or pass --manifest-path".to_string()),
            Some("reqcompile looks for reqcompile.toml in the current directory and parent directories up to the filesystem root".to_string()),
        ),

        ReqcompileError::ManifestParseError { file, reason } => (
            Some(format!(
                "Check the TOML syntax in {file}. Common issues: missing quotes, unmatched brackets, unknown keys"
            )),
            Some(reason.clone()),
        ),

        ReqcompileError::ToolNotFound { program } => (
            Some(format!(
                "Install pip-tools in the active environment (pip install 'pip-tools>=1.7.0') or point [tools] at the '{program}' executable"
            )),
            None,
        ),

        ReqcompileError::ToolFailed { stderr, .. } => {
            let stderr = stderr.trim();
            (None, (!stderr.is_empty()).then(|| stderr.to_string()))
        }

        ReqcompileError::IoError(_) | ReqcompileError::Other { .. } => (None, None),
    };

    // Validation errors always point back at the manifest
    let details = if details.is_none() && error.is_validation() {
        Some(format!(
            "The dependency declarations and override urls are read from {MANIFEST_FILE_NAME}"
        ))
    } else {
        details
    };

    ErrorContext {
        error,
        suggestion,
        details,
    }
}
