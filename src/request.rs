// src/request.rs

//! Invocation data: what to run ([`ExecutionRequest`]) and what came back
//! ([`ExecutionResult`]).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::errors::{Result, ToolrunError};

/// Immutable description of a single tool invocation.
///
/// Fields are private; the only way to obtain a request is through
/// [`ExecutionRequest::builder`], which validates it once. Nothing mutates a
/// request after `build()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    executable: String,
    args: Vec<String>,
    environment: Option<BTreeMap<String, String>>,
    stdout_file: Option<PathBuf>,
    working_dir: Option<PathBuf>,
}

impl ExecutionRequest {
    pub fn builder(executable: impl Into<String>) -> ExecutionRequestBuilder {
        ExecutionRequestBuilder {
            executable: executable.into(),
            args: Vec::new(),
            environment: None,
            stdout_file: None,
            working_dir: None,
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Explicit environment overrides, if any were given.
    pub fn environment(&self) -> Option<&BTreeMap<String, String>> {
        self.environment.as_ref()
    }

    pub fn stdout_file(&self) -> Option<&Path> {
        self.stdout_file.as_deref()
    }

    /// Working directory of the child; the host's current directory if unset.
    ///
    /// A relative `stdout_file` is still resolved against the host's current
    /// directory, not this one.
    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }
}

/// Builder for [`ExecutionRequest`].
#[derive(Debug, Clone)]
pub struct ExecutionRequestBuilder {
    executable: String,
    args: Vec<String>,
    environment: Option<BTreeMap<String, String>>,
    stdout_file: Option<PathBuf>,
    working_dir: Option<PathBuf>,
}

impl ExecutionRequestBuilder {
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add one environment override. A later value for the same key wins.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = self.environment.get_or_insert_with(BTreeMap::new);
        for (k, v) in vars {
            map.insert(k.into(), v.into());
        }
        self
    }

    pub fn stdout_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdout_file = Some(path.into());
        self
    }

    pub fn working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }

    pub fn build(self) -> Result<ExecutionRequest> {
        if self.executable.trim().is_empty() {
            return Err(ToolrunError::InvalidRequest(
                "executable must not be empty".to_string(),
            ));
        }

        if let Some(env) = &self.environment {
            for key in env.keys() {
                if key.is_empty() || key.contains('=') || key.contains('\0') {
                    return Err(ToolrunError::InvalidRequest(format!(
                        "invalid environment variable name {key:?}"
                    )));
                }
            }
        }

        if let Some(path) = &self.stdout_file {
            if path.as_os_str().is_empty() {
                return Err(ToolrunError::InvalidRequest(
                    "stdout_file must not be an empty path".to_string(),
                ));
            }
        }

        if let Some(path) = &self.working_dir {
            if path.as_os_str().is_empty() {
                return Err(ToolrunError::InvalidRequest(
                    "working_dir must not be an empty path".to_string(),
                ));
            }
        }

        Ok(ExecutionRequest {
            executable: self.executable,
            args: self.args,
            environment: self.environment,
            stdout_file: self.stdout_file,
            working_dir: self.working_dir,
        })
    }
}

/// Outcome of a completed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Exit code of the child, `-1` if it was terminated without one.
    pub exit_code: i32,
    /// Set when stdout was captured; the file holds exactly the child's stdout.
    pub stdout_file: Option<PathBuf>,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
