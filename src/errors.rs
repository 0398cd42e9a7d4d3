// src/errors.rs

//! Crate-wide error type.
//!
//! Only two things can go wrong inside an invocation: the executable cannot
//! be started, or the stdout sink cannot be prepared. A non-zero exit code is
//! *not* an error; it comes back inside [`ExecutionResult`].
//!
//! [`ExecutionResult`]: crate::request::ExecutionResult

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolrunError {
    #[error("failed to start '{executable}': {source}")]
    Startup {
        executable: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to prepare output file {path:?}: {source}")]
    OutputFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed waiting for '{executable}' to exit: {source}")]
    Wait {
        executable: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ToolrunError {
    /// The executable could not be located or launched.
    pub fn is_startup_failure(&self) -> bool {
        matches!(self, ToolrunError::Startup { .. })
    }

    /// The output sink (or the wait on the child) failed at the I/O level.
    pub fn is_io_failure(&self) -> bool {
        matches!(
            self,
            ToolrunError::OutputFile { .. } | ToolrunError::Wait { .. } | ToolrunError::IoError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ToolrunError>;
