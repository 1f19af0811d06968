//! Command-line runtime for the wvlet compiler binding.
//!
//! The module owns argument parsing, configuration bootstrapping, telemetry
//! setup, and the single compile call. Output streams and the configuration
//! loader are parameters so tests can run the whole flow in-process.
//!
//! The compiler's stdout and stderr are relayed unchanged; this runtime
//! writes nothing else to stdout. Its own diagnostics go to stderr.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;
use tracing::debug;
use wvlet_runner::{CompilerError, WvletCompiler};

mod cli;
mod config;
pub mod telemetry;

use cli::Cli;
use config::{
    ConfigLoader, OrthoConfigLoader, compiler_options, prepare_cli_arguments,
    split_config_arguments,
};
use telemetry::TelemetryError;

/// Tracing target for the CLI runtime.
const CLI_TARGET: &str = "wvlet_cli";

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Compiler(#[from] CompilerError),
}

impl AppError {
    /// Exit code reported for this error.
    ///
    /// A compiler that exits non-zero passes its own status through.
    fn exit_code(&self) -> ExitCode {
        match self {
            Self::CliUsage(error) => exit_code_from(error.exit_code()),
            Self::Compiler(CompilerError::CompilationFailed {
                status: Some(status),
            }) => exit_code_from(*status),
            _ => ExitCode::FAILURE,
        }
    }
}

fn exit_code_from(status: i32) -> ExitCode {
    u8::try_from(status)
        .ok()
        .filter(|code| *code != 0)
        .map_or(ExitCode::FAILURE, ExitCode::from)
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdout, stderr, &OrthoConfigLoader)
}

pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let args: Vec<OsString> = args.into_iter().collect();
    match compile_from_args(&args, stdout, stderr, loader) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::CliUsage(error)) if !error.use_stderr() => {
            // Help and version output belong on stdout.
            let _ = write!(stdout, "{error}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            let _ = writeln!(stderr, "{}", error.to_string().trim_end());
            error.exit_code()
        }
    }
}

fn compile_from_args<W, E, L>(
    args: &[OsString],
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> Result<(), AppError>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let split = split_config_arguments(args);
    let cli = Cli::try_parse_from(prepare_cli_arguments(args, &split)).map_err(AppError::CliUsage)?;
    let config = loader.load(&split.config_arguments)?;
    telemetry::initialise(&config)?;

    let compiler = WvletCompiler::new(compiler_options(&config))?;
    let compiled = compiler.compile_with_streams(&cli.query, stdout, stderr)?;
    debug!(
        target: CLI_TARGET,
        executable = %compiler.executable().display(),
        compiled_bytes = compiled.len(),
        "query compiled"
    );
    Ok(())
}
