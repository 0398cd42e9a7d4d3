#![allow(dead_code)]

use std::path::Path;

pub use toolrun_test_utils::requests;
pub use toolrun_test_utils::{init_tracing, path_only_env, with_timeout};

/// Names of everything directly inside `dir`, sorted.
pub fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
