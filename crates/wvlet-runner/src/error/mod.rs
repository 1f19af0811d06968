//! Domain errors raised while locating and invoking the wvlet compiler.
//!
//! All errors use a `thiserror`-derived enum with structured context so
//! callers can inspect the failure programmatically. I/O errors are wrapped in
//! `Arc` to satisfy the `result_large_err` Clippy lint.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Output stream of the compiler process that is relayed to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::Stderr => f.write_str("stderr"),
        }
    }
}

/// Errors arising from compiler binding operations.
#[derive(Debug, Error)]
pub enum CompilerError {
    /// An explicitly configured executable could not be resolved.
    #[error("invalid executable path: {}", path.display())]
    InvalidExecutable {
        /// Path supplied by the caller.
        path: PathBuf,
    },

    /// No executable was configured and the default one is not installed.
    #[error("this binding requires the {program} executable, but it was not found on PATH")]
    MissingDependency {
        /// Name that was searched for.
        program: String,
    },

    /// The compiler ran but reported failure through its exit status.
    #[error("failed to compile (exit status {})", display_status(*status))]
    CompilationFailed {
        /// Exit status, or `None` when the process was terminated by a signal.
        status: Option<i32>,
    },

    /// The compiler process could not be started.
    #[error("failed to start {}: {source}", program.display())]
    Spawn {
        /// Program that was launched.
        program: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// Captured output could not be written to the caller's stream.
    #[error("failed to relay compiler {stream}: {source}")]
    Relay {
        /// Stream being relayed.
        stream: Stream,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },
}

fn display_status(status: Option<i32>) -> String {
    status.map_or_else(|| String::from("unknown"), |code| code.to_string())
}
