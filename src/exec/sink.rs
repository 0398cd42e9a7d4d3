// src/exec/sink.rs

//! Owning guard for a captured-stdout file.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tracing::debug;

use crate::errors::{Result, ToolrunError};

/// A stdout capture file, open for writing for the duration of one invocation.
///
/// Acquired with [`OutputSink::open`] before the child is spawned and released
/// when the guard is dropped (or [`close`](OutputSink::close)d), which covers
/// the early return on a failed spawn as well as the normal path.
#[derive(Debug)]
pub struct OutputSink {
    path: PathBuf,
    file: Option<File>,
}

impl OutputSink {
    /// Create missing parent directories, then create or truncate `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let output_err = |source| ToolrunError::OutputFile {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(output_err)?;
        }

        let file = File::create(path).map_err(output_err)?;
        debug!(path = ?path, "opened stdout sink");

        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A handle for the child's stdout, sharing the guard's open file.
    pub fn stdio(&self) -> Result<Stdio> {
        let output_err = |source| ToolrunError::OutputFile {
            path: self.path.clone(),
            source,
        };

        let file = self
            .file
            .as_ref()
            .ok_or_else(|| output_err(std::io::Error::other("sink already closed")))?;
        let handle = file.try_clone().map_err(output_err)?;
        Ok(Stdio::from(handle))
    }

    /// Release the file now instead of at end of scope.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(file) = self.file.take() {
            drop(file);
            debug!(path = ?self.path, "closed stdout sink");
        }
    }
}

impl Drop for OutputSink {
    fn drop(&mut self) {
        self.release();
    }
}
