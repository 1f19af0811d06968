//! Shared configuration for the wvlet compiler binding.
//!
//! [`Config`] is layered by `ortho_config`: built-in defaults, then an
//! optional TOML file (`--config-path` or `WVLET_CONFIG_PATH`), then
//! `WVLET_*` environment variables, then command-line flags.
//!
//! | Field        | Flag           | Environment         |
//! |--------------|----------------|---------------------|
//! | `executable` | `--executable` | `WVLET_EXECUTABLE`  |
//! | `target`     | `--target`     | `WVLET_TARGET`      |
//! | `log_filter` | `--log-filter` | `WVLET_LOG_FILTER`  |
//! | `log_format` | `--log-format` | `WVLET_LOG_FORMAT`  |

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

mod defaults;
mod logging;

pub use defaults::{
    DEFAULT_LOG_FILTER, default_log_filter, default_log_filter_string, default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Runtime configuration consumed by the `wvlet-compile` binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WVLET")]
pub struct Config {
    /// Compiler executable path or name. `wvlet` is looked up on `PATH` when
    /// unset.
    #[serde(default)]
    pub executable: Option<String>,
    /// Target passed to the compiler as `--target:<name>`.
    #[serde(default)]
    pub target: Option<String>,
    /// `tracing` filter directive for diagnostic logs.
    #[serde(default = "default_log_filter_string")]
    pub log_filter: String,
    /// Output format for diagnostic logs.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            executable: None,
            target: None,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Explicit compiler executable, if configured.
    pub fn executable(&self) -> Option<&str> {
        self.executable.as_deref()
    }

    /// Compilation target, if configured.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Log filter directive.
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}
