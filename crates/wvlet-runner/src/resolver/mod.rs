//! Executable discovery on the process search path.
//!
//! [`ExecutableResolver`] abstracts the lookup so the compiler binding can be
//! constructed in tests without touching the real `PATH`. [`PathResolver`] is
//! the production implementation, built on [`which`]: names containing a
//! directory component are checked in place, bare names are searched for in
//! each `PATH` entry in order (with `PATHEXT` probing on Windows).

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Tracing target for resolver operations.
const RESOLVER_TARGET: &str = "wvlet_runner::resolver";

/// Trait abstracting executable lookup for testability.
///
/// # Example
///
/// ```
/// use std::path::{Path, PathBuf};
/// use wvlet_runner::ExecutableResolver;
///
/// struct Fixed;
///
/// impl ExecutableResolver for Fixed {
///     fn resolve(&self, _program: &Path) -> Option<PathBuf> {
///         Some(PathBuf::from("/usr/local/bin/wvlet"))
///     }
/// }
///
/// assert!(Fixed.resolve(Path::new("wvlet")).is_some());
/// ```
pub trait ExecutableResolver {
    /// Returns the location of `program` when it names a reachable executable.
    fn resolve(&self, program: &Path) -> Option<PathBuf>;
}

/// Resolves executables against a search path, `PATH` by default.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    search_path: Option<OsString>,
}

impl PathResolver {
    /// Creates a resolver that reads `PATH` at lookup time.
    #[must_use]
    pub const fn new() -> Self {
        Self { search_path: None }
    }

    /// Creates a resolver over an explicit, `PATH`-formatted search path.
    #[must_use]
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    fn search_path(&self) -> Option<OsString> {
        self.search_path
            .clone()
            .or_else(|| env::var_os("PATH"))
    }
}

impl ExecutableResolver for PathResolver {
    fn resolve(&self, program: &Path) -> Option<PathBuf> {
        // Relative paths with a directory component resolve against the
        // working directory; bare names only against the search path.
        let cwd = env::current_dir().unwrap_or_default();
        let resolved = which::which_in(program, self.search_path(), cwd);
        debug!(
            target: RESOLVER_TARGET,
            program = %program.display(),
            resolved = ?resolved.as_ref().ok(),
            "looked up executable"
        );
        resolved.ok()
    }
}
