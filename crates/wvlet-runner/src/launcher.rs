//! Subprocess execution for compiler invocations.
//!
//! [`SystemLauncher`] implements [`ProcessLauncher`] by spawning the
//! executable, waiting for it to exit, and capturing both output streams in
//! full as raw bytes. Nothing is streamed; the child is reaped before
//! `launch` returns.

use std::process::{Command, Stdio};
use std::sync::Arc;

use tracing::debug;

use crate::error::CompilerError;
use crate::invocation::CompileInvocation;

/// Tracing target for launcher operations.
const LAUNCHER_TARGET: &str = "wvlet_runner::launcher";

/// Captured result of one finished compiler process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    status: Option<i32>,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl ProcessOutput {
    /// Creates an output record from an exit status and captured streams.
    #[must_use]
    pub fn new(
        status: Option<i32>,
        stdout: impl Into<Vec<u8>>,
        stderr: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            status,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Exit status code, `None` when the process was terminated by a signal.
    #[must_use]
    pub const fn status(&self) -> Option<i32> {
        self.status
    }

    /// Returns `true` when the process exited with status zero.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.status, Some(0))
    }

    /// Captured standard output, exactly as the process wrote it.
    #[must_use]
    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }

    /// Captured standard error, exactly as the process wrote it.
    #[must_use]
    pub fn stderr(&self) -> &[u8] {
        &self.stderr
    }
}

/// Trait abstracting process execution for testability.
///
/// The production implementation is [`SystemLauncher`]. Test code can
/// implement this trait to return canned output without spawning anything.
///
/// # Example
///
/// ```
/// use wvlet_runner::{CompileInvocation, CompilerError, ProcessLauncher, ProcessOutput};
///
/// struct Canned;
///
/// impl ProcessLauncher for Canned {
///     fn launch(&self, _invocation: &CompileInvocation) -> Result<ProcessOutput, CompilerError> {
///         Ok(ProcessOutput::new(Some(0), "wvlet 0.1\nselect 1\n", ""))
///     }
/// }
/// ```
pub trait ProcessLauncher {
    /// Runs the invocation to completion and returns its captured output.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerError::Spawn`] when the process cannot be started.
    /// A non-zero exit status is not an error at this layer.
    fn launch(&self, invocation: &CompileInvocation) -> Result<ProcessOutput, CompilerError>;
}

/// Launches invocations as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    fn launch(&self, invocation: &CompileInvocation) -> Result<ProcessOutput, CompilerError> {
        let program = invocation.program();
        debug!(
            target: LAUNCHER_TARGET,
            program = %program.display(),
            arg_count = invocation.args().len(),
            "spawning compiler process"
        );

        let output = Command::new(program)
            .args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| CompilerError::Spawn {
                program: program.to_path_buf(),
                source: Arc::new(source),
            })?;

        debug!(
            target: LAUNCHER_TARGET,
            program = %program.display(),
            status = ?output.status,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "compiler process exited"
        );

        Ok(ProcessOutput::new(output.status.code(), output.stdout, output.stderr))
    }
}
