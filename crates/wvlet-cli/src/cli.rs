//! CLI argument definitions for `wvlet-compile`.

use clap::Parser;

/// Compiles a wvlet query with the installed `wvlet` executable.
///
/// Configuration flags (`--config-path`, `--executable`, `--target`,
/// `--log-filter`, `--log-format`) must precede the query.
#[derive(Parser, Debug)]
#[command(name = "wvlet-compile", version)]
pub(crate) struct Cli {
    /// Query text passed verbatim to `wvlet compile`.
    #[arg(value_name = "QUERY", allow_hyphen_values = true)]
    pub(crate) query: String,
}
