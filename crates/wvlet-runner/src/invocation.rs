//! Command-line construction for the `compile` subcommand.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Subcommand passed to the wvlet executable.
pub const COMPILE_SUBCOMMAND: &str = "compile";

/// Prefix joined with the target identifier into a single argument.
pub const TARGET_FLAG_PREFIX: &str = "--target:";

/// Argument list for one run of `wvlet compile`.
///
/// The order is fixed: program, subcommand, optional target flag, query.
///
/// # Example
///
/// ```
/// use std::ffi::OsString;
/// use std::path::Path;
/// use wvlet_runner::CompileInvocation;
///
/// let invocation = CompileInvocation::new(Path::new("wvlet"), Some("duckdb"), "from t");
/// let argv: Vec<OsString> = invocation.argv();
/// assert_eq!(argv, ["wvlet", "compile", "--target:duckdb", "from t"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileInvocation {
    program: PathBuf,
    args: Vec<OsString>,
}

impl CompileInvocation {
    /// Builds the invocation for `query`, adding the target flag only when a
    /// target is given.
    #[must_use]
    pub fn new(program: &Path, target: Option<&str>, query: &str) -> Self {
        let mut args = vec![OsString::from(COMPILE_SUBCOMMAND)];
        if let Some(name) = target {
            args.push(OsString::from(format!("{TARGET_FLAG_PREFIX}{name}")));
        }
        args.push(OsString::from(query));
        Self {
            program: program.to_path_buf(),
            args,
        }
    }

    /// Program to execute.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments following the program.
    #[must_use]
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Full argument vector, program first.
    #[must_use]
    pub fn argv(&self) -> Vec<OsString> {
        std::iter::once(self.program.clone().into_os_string())
            .chain(self.args.iter().cloned())
            .collect()
    }
}
