//! Builder for external tool invocations.

use std::fmt;
use std::path::{Path, PathBuf};

/// A fully described external command, ready to hand to a
/// [`ToolRunner`](super::ToolRunner).
///
/// The builder only records what to run; running is the runner's job, so the
/// same value can be executed for real or inspected in tests.
///
/// # Examples
///
/// ```rust
/// use reqcompile::tools::ToolCommand;
///
/// let cmd = ToolCommand::new("pip-compile")
///     .arg("/tmp/reqcompile-runtime.in")
///     .args(["-o", "requirements.txt"])
///     .current_dir("/work/project")
///     .with_context("runtime release");
///
/// assert_eq!(cmd.command_line(), "pip-compile /tmp/reqcompile-runtime.in -o requirements.txt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Executable name (looked up on PATH) or path
    program: String,

    /// Arguments in order
    args: Vec<String>,

    /// Working directory; relative program paths resolve against it
    current_dir: Option<PathBuf>,

    /// Label prefixed to log lines, e.g. `runtime development`
    context: Option<String>,
}

impl ToolCommand {
    /// Start a command for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            context: None,
        }
    }

    /// Sets the working directory for the command.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Adds a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set a context for logging.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// The program to run.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The arguments, in order.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// The configured working directory, if any.
    #[must_use]
    pub fn working_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// The logging context, if any.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Value following `flag` in the argument list, e.g. the `-o` target.
    #[must_use]
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args.iter().position(|arg| arg == flag).and_then(|i| self.args.get(i + 1)).map(String::as_str)
    }

    /// Program and arguments joined with spaces, for logs and error messages.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(ctx) => write!(f, "({ctx}) {}", self.command_line()),
            None => write!(f, "{}", self.command_line()),
        }
    }
}
