// src/exec/worker.rs

//! One invocation, end to end: resolve the environment, log a redacted
//! description, run the child, report the result.

use std::sync::Arc;

use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::{Instrument, Level, info, info_span, warn};

use crate::environment::{EnvLookup, ProcessEnv, ResolvedEnvironment, resolve_environment};
use crate::errors::{Result, ToolrunError};
use crate::exec::runner::ProcessRunner;
use crate::mask::{mask_command_line, mask_environment};
use crate::request::{ExecutionRequest, ExecutionResult};

/// What an invocation would run, computed without spawning anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Redacted command line.
    pub command_line: String,
    pub environment: ResolvedEnvironment,
}

impl Invocation {
    /// The diagnostic line logged before a child is started.
    pub fn log_line(&self) -> String {
        format!(
            "Executing: {}\n  with environment: {}",
            self.command_line,
            mask_environment(&self.environment)
        )
    }
}

/// Executes [`ExecutionRequest`]s.
///
/// Cheap to clone; clones share only the read-only [`EnvLookup`].
#[derive(Debug, Clone)]
pub struct ExecWorker {
    lookup: Arc<dyn EnvLookup>,
    runner: ProcessRunner,
}

impl Default for ExecWorker {
    fn default() -> Self {
        Self::new(Arc::new(ProcessEnv))
    }
}

impl ExecWorker {
    pub fn new(lookup: Arc<dyn EnvLookup>) -> Self {
        Self {
            lookup,
            runner: ProcessRunner::new(),
        }
    }

    pub fn describe(&self, request: &ExecutionRequest) -> Invocation {
        Invocation {
            command_line: mask_command_line(request.executable(), request.args()),
            environment: resolve_environment(request.environment(), self.lookup.as_ref()),
        }
    }

    /// Run one request to completion.
    ///
    /// Fails only if the executable cannot be started or the stdout file
    /// cannot be prepared; any exit code is returned as a result.
    pub async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult> {
        let span = info_span!("invocation", executable = %request.executable());

        async move {
            let environment = resolve_environment(request.environment(), self.lookup.as_ref());

            if tracing::enabled!(Level::INFO) {
                let invocation = Invocation {
                    command_line: mask_command_line(request.executable(), request.args()),
                    environment: environment.clone(),
                };
                info!("{}", invocation.log_line());
            }

            let exit_code = self
                .runner
                .run(
                    request.executable(),
                    request.args(),
                    &environment,
                    request.stdout_file(),
                    request.working_dir(),
                )
                .await?;

            if exit_code != 0 {
                warn!(exit_code, "tool exited with non-zero status");
            }

            Ok(ExecutionResult {
                exit_code,
                stdout_file: request.stdout_file().map(|p| p.to_path_buf()),
            })
        }
        .instrument(span)
        .await
    }

    /// Run one request, blocking the calling thread until the child exits.
    ///
    /// Outside a Tokio runtime this drives the invocation on a private
    /// current-thread runtime. Inside a multi-threaded runtime the current
    /// worker is handed over with `block_in_place`. A current-thread runtime
    /// cannot be blocked, so that case is an error.
    pub fn execute_blocking(&self, request: &ExecutionRequest) -> Result<ExecutionResult> {
        match Handle::try_current() {
            Ok(handle) => match handle.runtime_flavor() {
                RuntimeFlavor::MultiThread => {
                    tokio::task::block_in_place(|| handle.block_on(self.execute(request)))
                }
                flavor => Err(ToolrunError::Other(anyhow::anyhow!(
                    "execute_blocking called inside a {flavor:?} Tokio runtime; await `execute` instead"
                ))),
            },
            Err(_) => {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()?;
                runtime.block_on(self.execute(request))
            }
        }
    }

    /// Run independent requests concurrently, each in its own Tokio task.
    ///
    /// Results are returned in the order of `requests`. Callers must not point
    /// two requests at the same `stdout_file`.
    pub async fn execute_all(
        &self,
        requests: Vec<ExecutionRequest>,
    ) -> Vec<Result<ExecutionResult>> {
        let handles: Vec<_> = requests
            .into_iter()
            .map(|request| {
                let worker = self.clone();
                tokio::spawn(async move { worker.execute(&request).await })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(join_err) => Err(ToolrunError::Other(
                    anyhow::Error::new(join_err).context("invocation task did not complete"),
                )),
            };
            results.push(result);
        }
        results
    }
}
