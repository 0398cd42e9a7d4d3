// src/logging.rs

//! Diagnostic logging for the `toolrun` binary.
//!
//! The filter comes from, in order:
//! 1. `--log-level`
//! 2. `TOOLRUN_LOG`, read as an `EnvFilter` directive string
//!    (`debug`, `toolrun=trace,warn`, ...)
//! 3. `info`
//!
//! Output goes to stderr; the child's stdout may be inherited and must stay
//! free of our lines.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "TOOLRUN_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let filter = filter_for(cli_level, env_value.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

/// A blank or unparsable `TOOLRUN_LOG` counts as unset.
fn filter_for(cli_level: Option<LogLevel>, env_value: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(level.as_directive());
    }

    env_value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
