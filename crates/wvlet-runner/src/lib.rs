//! Process binding for the external wvlet query compiler.
//!
//! The `wvlet-runner` crate does no compilation itself. It locates a `wvlet`
//! executable, runs `wvlet compile [--target:<name>] <query>` as a child
//! process, relays the child's stdout and stderr to the caller, and returns
//! the compiled text.
//!
//! # Architecture
//!
//! [`WvletCompiler`] owns the resolved executable and optional target. Two
//! collaborator traits keep the binding testable without a real compiler:
//!
//! - [`ExecutableResolver`] finds executables, [`PathResolver`] searches
//!   `PATH`.
//! - [`ProcessLauncher`] runs a [`CompileInvocation`] to completion,
//!   [`SystemLauncher`] spawns a real child process.
//!
//! Successful output is assumed to start with a single banner line, which
//! [`strip_banner`] removes.
//!
//! # Example
//!
//! ```rust,no_run
//! use wvlet_runner::{CompilerOptions, WvletCompiler};
//!
//! # fn main() -> Result<(), wvlet_runner::CompilerError> {
//! let compiler = WvletCompiler::new(
//!     CompilerOptions::new()
//!         .with_executable("/usr/local/bin/wvlet")
//!         .with_target("trino"),
//! )?;
//! let sql = compiler.compile("from lineitem limit 10")?;
//! # drop(sql);
//! # Ok(()) }
//! ```

pub mod compiler;
pub mod error;
pub mod invocation;
pub mod launcher;
pub mod output;
pub mod resolver;

#[cfg(test)]
mod tests;

pub use self::compiler::{CompilerOptions, DEFAULT_EXECUTABLE, WvletCompiler};
pub use self::error::{CompilerError, Stream};
pub use self::invocation::{COMPILE_SUBCOMMAND, CompileInvocation, TARGET_FLAG_PREFIX};
pub use self::launcher::{ProcessLauncher, ProcessOutput, SystemLauncher};
pub use self::output::{BANNER_LINES, strip_banner};
pub use self::resolver::{ExecutableResolver, PathResolver};
