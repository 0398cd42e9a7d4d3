// src/lib.rs

//! Run an external command-line tool from a build or deploy pipeline.
//!
//! One invocation is described by an [`ExecutionRequest`] and executed by an
//! [`ExecWorker`], which:
//! - resolves a curated child environment ([`environment`]),
//! - logs a redacted description of the command ([`mask`]),
//! - spawns the child, optionally capturing stdout to a file ([`exec`]),
//! - returns the exit code in an [`ExecutionResult`].

pub mod cli;
pub mod config;
pub mod environment;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod mask;
pub mod request;

use anyhow::Result;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::{RawRequestFile, load_from_path};

pub use crate::errors::ToolrunError;
pub use crate::exec::{ExecWorker, Invocation};
pub use crate::request::{ExecutionRequest, ExecutionResult};

/// High-level entry point used by `main.rs`.
///
/// Builds the request from `--request` and the command line, then either
/// prints it (`--dry-run`) or runs it. Returns the child's exit code.
pub async fn run(args: CliArgs) -> Result<i32> {
    let request = request_from_args(&args)?;
    let worker = ExecWorker::default();

    if args.dry_run {
        print_dry_run(&worker.describe(&request));
        return Ok(0);
    }

    let result = worker.execute(&request).await?;
    Ok(result.exit_code)
}

/// Merge the optional request file with command-line values.
///
/// A positional executable replaces the file's executable *and* args; `--env`
/// entries are layered over the file's `[env]`; `--stdout-file` and
/// `--working-dir` replace the file's values.
pub fn request_from_args(args: &CliArgs) -> crate::errors::Result<ExecutionRequest> {
    let mut raw = match &args.request {
        Some(path) => load_from_path(path)?,
        None => RawRequestFile::default(),
    };

    if let Some(executable) = &args.executable {
        raw.executable = executable.clone();
        raw.args = args.args.clone();
    }
    raw.env.extend(args.env.iter().cloned());
    if let Some(path) = &args.stdout_file {
        raw.stdout_file = Some(path.clone());
    }
    if let Some(dir) = &args.working_dir {
        raw.working_dir = Some(dir.clone());
    }

    ExecutionRequest::try_from(raw)
}

/// Map a child exit code onto this process's exit status.
///
/// A signal death (`-1`) becomes `1`; anything above what a process exit
/// status can carry is clamped to `255` so it can't wrap around to success.
pub fn exit_status(code: i32) -> i32 {
    if code < 0 { 1 } else { code.min(255) }
}

fn print_dry_run(invocation: &Invocation) {
    println!("toolrun dry-run");
    println!("  command: {}", invocation.command_line);
    println!(
        "  environment: {}",
        crate::mask::mask_environment(&invocation.environment)
    );

    debug!("dry-run complete (no execution)");
}
