// src/exec/runner.rs

//! Single child-process runner.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::environment::ResolvedEnvironment;
use crate::errors::{Result, ToolrunError};
use crate::exec::sink::OutputSink;

/// Spawns one child process and waits for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    /// Run `executable` with `args` and exactly the variables in `env`.
    ///
    /// - With `stdout_file`, the child's stdout goes to that file (parents are
    ///   created, the file truncated). Without it, stdout is inherited.
    /// - With `working_dir`, the child starts there.
    /// - stdin and stderr are always inherited.
    /// - Returns the child's exit code; `-1` when it was killed by a signal.
    ///   A non-zero code is not an error.
    pub async fn run(
        &self,
        executable: &str,
        args: &[String],
        env: &ResolvedEnvironment,
        stdout_file: Option<&Path>,
        working_dir: Option<&Path>,
    ) -> Result<i32> {
        let sink = stdout_file.map(OutputSink::open).transpose()?;

        let mut cmd = Command::new(executable);
        cmd.args(args)
            .env_clear()
            .envs(env.iter())
            .stdin(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }

        if let Some(sink) = &sink {
            cmd.stdout(sink.stdio()?);
        } else {
            cmd.stdout(Stdio::inherit());
        }

        let mut child = cmd.spawn().map_err(|source| ToolrunError::Startup {
            executable: executable.to_string(),
            source,
        })?;
        // The parent's copy of the stdout handle lives in `cmd`; drop it so
        // only the child and the sink hold the file.
        drop(cmd);

        debug!(pid = child.id(), "child process started");

        let status = child.wait().await.map_err(|source| ToolrunError::Wait {
            executable: executable.to_string(),
            source,
        })?;

        if let Some(sink) = sink {
            sink.close();
        }

        let code = status.code().unwrap_or(-1);
        info!(
            exit_code = code,
            success = status.success(),
            "child process exited"
        );

        Ok(code)
    }
}
