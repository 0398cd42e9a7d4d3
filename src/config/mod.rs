// src/config/mod.rs

//! Request files: TOML descriptions of a single invocation.
//!
//! - `model.rs` defines the serde data model.
//! - `loader.rs` reads and parses a file from disk.
//! - `validate.rs` turns the raw model into an [`ExecutionRequest`].
//!
//! [`ExecutionRequest`]: crate::request::ExecutionRequest

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::RawRequestFile;
