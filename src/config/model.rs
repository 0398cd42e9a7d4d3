// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Raw request file as deserialized from TOML.
///
/// ```toml
/// executable = "helm"
/// args = ["upgrade", "--install", "web", "./chart"]
/// stdout_file = "build/helm/upgrade.log"
///
/// [env]
/// HELM_NAMESPACE = "prod"
/// ```
///
/// No validation happens here; see [`crate::config::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawRequestFile {
    /// Program name or path.
    #[serde(default)]
    pub executable: String,

    /// Arguments, passed verbatim and in order.
    #[serde(default)]
    pub args: Vec<String>,

    /// Environment overrides.
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Where to capture stdout. Relative paths are anchored at the request
    /// file's directory by the loader.
    #[serde(default)]
    pub stdout_file: Option<PathBuf>,

    /// Working directory of the child, anchored like `stdout_file`.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}
