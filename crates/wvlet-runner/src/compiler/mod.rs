//! The compiler binding.
//!
//! [`WvletCompiler`] resolves the executable once at construction, then runs
//! one child process per [`compile`](WvletCompiler::compile) call through a
//! [`ProcessLauncher`]. Captured output is always relayed to the caller's
//! streams before the exit status is inspected, so diagnostics survive a
//! failed compilation.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{CompilerError, Stream};
use crate::invocation::CompileInvocation;
use crate::launcher::{ProcessLauncher, SystemLauncher};
use crate::output::strip_banner;
use crate::resolver::{ExecutableResolver, PathResolver};

/// Tracing target for compiler binding operations.
const COMPILER_TARGET: &str = "wvlet_runner::compiler";

/// Executable searched for when no explicit path is configured.
pub const DEFAULT_EXECUTABLE: &str = "wvlet";

/// Construction options for [`WvletCompiler`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerOptions {
    executable: Option<PathBuf>,
    target: Option<String>,
}

impl CompilerOptions {
    /// Options that locate `wvlet` on `PATH` and pass no target.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            executable: None,
            target: None,
        }
    }

    /// Uses an explicit executable path or name instead of `wvlet`.
    ///
    /// An empty path is treated as no explicit executable.
    #[must_use]
    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = Some(executable.into()).filter(|path| !path.as_os_str().is_empty());
        self
    }

    /// Sets the target passed to every compilation.
    ///
    /// An empty string is treated as no target.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into()).filter(|name| !name.is_empty());
        self
    }

    /// Explicit executable, if any.
    #[must_use]
    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }

    /// Configured target, if any.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }
}

/// Binding to an external wvlet compiler executable.
///
/// The configuration is fixed at construction and `compile` takes `&self`,
/// so a single binding can serve any number of calls, including calls from
/// several threads when the launcher allows it.
///
/// # Example
///
/// ```rust,no_run
/// use wvlet_runner::{CompilerOptions, WvletCompiler};
///
/// # fn main() -> Result<(), wvlet_runner::CompilerError> {
/// let compiler = WvletCompiler::new(CompilerOptions::new().with_target("duckdb"))?;
/// let sql = compiler.compile("from 'sales.parquet' select region, sum(amount)")?;
/// # drop(sql);
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct WvletCompiler<L = SystemLauncher> {
    executable: PathBuf,
    target: Option<String>,
    launcher: L,
}

impl WvletCompiler<SystemLauncher> {
    /// Creates a binding that resolves against `PATH` and spawns real
    /// processes.
    ///
    /// # Errors
    ///
    /// See [`WvletCompiler::with_collaborators`].
    pub fn new(options: CompilerOptions) -> Result<Self, CompilerError> {
        Self::with_collaborators(options, &PathResolver::new(), SystemLauncher)
    }
}

impl<L> WvletCompiler<L> {
    /// Creates a binding using the given resolver and launcher.
    ///
    /// An explicit executable is kept exactly as given once the resolver
    /// accepts it. Without one, the resolved location of
    /// [`DEFAULT_EXECUTABLE`] is stored.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerError::InvalidExecutable`] when an explicit
    /// executable does not resolve, or [`CompilerError::MissingDependency`]
    /// when no executable was given and the default one is not found.
    pub fn with_collaborators<R>(
        options: CompilerOptions,
        resolver: &R,
        launcher: L,
    ) -> Result<Self, CompilerError>
    where
        R: ExecutableResolver + ?Sized,
    {
        let CompilerOptions { executable, target } = options;
        let executable = match executable {
            Some(path) => resolve_explicit(resolver, path)?,
            None => resolve_default(resolver)?,
        };
        debug!(
            target: COMPILER_TARGET,
            executable = %executable.display(),
            compile_target = target.as_deref().unwrap_or("<default>"),
            "compiler binding ready"
        );
        Ok(Self {
            executable,
            target,
            launcher,
        })
    }

    /// Executable used for every invocation.
    #[must_use]
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Target passed to every invocation, if configured.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Builds the invocation used to compile `query`.
    #[must_use]
    pub fn invocation(&self, query: &str) -> CompileInvocation {
        CompileInvocation::new(&self.executable, self.target.as_deref(), query)
    }
}

impl<L: ProcessLauncher> WvletCompiler<L> {
    /// Compiles `query`, relaying compiler output to this process's stdout
    /// and stderr.
    ///
    /// # Errors
    ///
    /// See [`WvletCompiler::compile_with_streams`].
    pub fn compile(&self, query: &str) -> Result<String, CompilerError> {
        let stdout = io::stdout();
        let stderr = io::stderr();
        self.compile_with_streams(query, &mut stdout.lock(), &mut stderr.lock())
    }

    /// Compiles `query`, relaying compiler output to the given writers.
    ///
    /// The captured stdout and stderr are written byte for byte before the
    /// exit status is checked. On success the compiler's stdout is returned
    /// without its banner line, with invalid UTF-8 replaced by U+FFFD.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerError::Spawn`] when the process cannot start,
    /// [`CompilerError::Relay`] when a writer fails, and
    /// [`CompilerError::CompilationFailed`] when the compiler exits with a
    /// non-zero status.
    pub fn compile_with_streams<W, E>(
        &self,
        query: &str,
        stdout: &mut W,
        stderr: &mut E,
    ) -> Result<String, CompilerError>
    where
        W: Write + ?Sized,
        E: Write + ?Sized,
    {
        let invocation = self.invocation(query);
        debug!(
            target: COMPILER_TARGET,
            executable = %self.executable.display(),
            query_bytes = query.len(),
            "compiling query"
        );

        let output = self.launcher.launch(&invocation)?;
        // Both streams are attempted even when the first write fails.
        let stdout_relayed = relay(Stream::Stdout, output.stdout(), stdout);
        let stderr_relayed = relay(Stream::Stderr, output.stderr(), stderr);
        stdout_relayed?;
        stderr_relayed?;

        if !output.success() {
            warn!(
                target: COMPILER_TARGET,
                status = ?output.status(),
                "compiler reported failure"
            );
            return Err(CompilerError::CompilationFailed {
                status: output.status(),
            });
        }

        Ok(strip_banner(&String::from_utf8_lossy(output.stdout())))
    }
}

fn resolve_explicit<R>(resolver: &R, path: PathBuf) -> Result<PathBuf, CompilerError>
where
    R: ExecutableResolver + ?Sized,
{
    match resolver.resolve(&path) {
        Some(_) => Ok(path),
        None => Err(CompilerError::InvalidExecutable { path }),
    }
}

fn resolve_default<R>(resolver: &R) -> Result<PathBuf, CompilerError>
where
    R: ExecutableResolver + ?Sized,
{
    resolver
        .resolve(Path::new(DEFAULT_EXECUTABLE))
        .ok_or_else(|| CompilerError::MissingDependency {
            program: DEFAULT_EXECUTABLE.to_owned(),
        })
}

fn relay<W>(stream: Stream, bytes: &[u8], writer: &mut W) -> Result<(), CompilerError>
where
    W: Write + ?Sized,
{
    writer
        .write_all(bytes)
        .and_then(|()| writer.flush())
        .map_err(|source| CompilerError::Relay {
            stream,
            source: Arc::new(source),
        })
}
