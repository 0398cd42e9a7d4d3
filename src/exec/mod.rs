// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`sink`] owns the optional stdout capture file for one invocation.
//! - [`runner`] spawns the child with `tokio::process::Command`, an exact
//!   environment and the chosen stdout, then waits for it to exit.
//! - [`worker`] composes environment resolution, redacted logging and the
//!   runner into a single invocation, plus a concurrent batch entry point.

pub mod runner;
pub mod sink;
pub mod worker;

pub use runner::ProcessRunner;
pub use sink::OutputSink;
pub use worker::{ExecWorker, Invocation};
