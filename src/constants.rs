//! Global constants used throughout the reqcompile codebase.
//!
//! File names, executable defaults and command-line flags that are shared
//! between the manifest, the requirements pipeline and the CLI live here so
//! that they are defined exactly once.

/// Name of the project manifest searched for by every command.
pub const MANIFEST_FILE_NAME: &str = "reqcompile.toml";

/// Output file stem for the runtime category.
pub const RUNTIME_REQUIREMENTS_STEM: &str = "requirements";

/// Output file stem for the build category.
pub const BUILD_REQUIREMENTS_STEM: &str = "build_requirements";

/// Suffix appended to a stem for the development variant (before `.txt`).
pub const DEVELOPMENT_SUFFIX: &str = "_development";

/// Glob used to collect the files handed to the sync command.
pub const DEVELOPMENT_FILES_GLOB: &str = "*requirements_development.txt";

/// Prefix marking an editable install line. pip-compile only accepts urls in this form.
pub const EDITABLE_PREFIX: &str = "-e";

/// Default requirement-compiler executable.
pub const DEFAULT_PIP_COMPILE: &str = "pip-compile";

/// Default environment-sync executable.
pub const DEFAULT_PIP_SYNC: &str = "pip-sync";

/// Environment variable overriding the requirement-compiler executable.
pub const PIP_COMPILE_ENV: &str = "REQCOMPILE_PIP_COMPILE";

/// Environment variable overriding the environment-sync executable.
pub const PIP_SYNC_ENV: &str = "REQCOMPILE_PIP_SYNC";

/// Flags keeping pip-compile output stable between runs.
///
/// Generated files are usually committed, so headers (which embed the command
/// line and paths) and `# via` annotations are suppressed.
pub const PIP_COMPILE_DETERMINISM_FLAGS: [&str; 2] = ["--no-header", "--no-annotate"];

/// Package providing pip-compile and pip-sync, added to the build category's
/// plugin dependencies unless disabled in the manifest.
pub const PIP_TOOLS_PACKAGE: &str = "pip-tools";

/// Minimum pip-tools version required for the flags used above.
pub const PIP_TOOLS_VERSION: &str = ">=1.7.0";

/// Suffix of staging files handed to pip-compile.
pub const STAGING_FILE_SUFFIX: &str = ".in";
