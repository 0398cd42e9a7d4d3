// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::RawRequestFile;
use crate::errors::Result;
use crate::request::ExecutionRequest;

/// Load a request file and return the raw `RawRequestFile`.
///
/// This only performs TOML deserialization plus anchoring of relative
/// `stdout_file` / `working_dir` paths at the file's directory; it does **not** validate. Use
/// [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawRequestFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let mut raw: RawRequestFile = toml::from_str(&contents)?;

    raw.stdout_file = raw.stdout_file.map(|p| anchor(path, p));
    raw.working_dir = raw.working_dir.map(|p| anchor(path, p));

    Ok(raw)
}

/// Resolve a relative path from a request file against the file's directory.
fn anchor(request_file: &Path, target: PathBuf) -> PathBuf {
    match request_file.parent() {
        Some(dir) if target.is_relative() && !dir.as_os_str().is_empty() => dir.join(target),
        _ => target,
    }
}

/// Load a request file and validate it into an [`ExecutionRequest`].
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ExecutionRequest> {
    let raw = load_from_path(path)?;
    ExecutionRequest::try_from(raw)
}
