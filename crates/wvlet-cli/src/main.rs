//! CLI entrypoint for the wvlet compiler binding.
//!
//! The binary delegates to [`wvlet_cli::run`], which loads configuration,
//! locates the compiler, and relays its output.

use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    wvlet_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
