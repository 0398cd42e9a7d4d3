#![allow(dead_code)]

use std::path::Path;

use toolrun::ExecutionRequest;

/// `sh -c <script>` with stdout captured to `out`.
pub fn sh_to_file(script: &str, out: impl AsRef<Path>) -> ExecutionRequest {
    ExecutionRequest::builder("sh")
        .args(["-c", script])
        .stdout_file(out.as_ref())
        .build()
        .expect("valid sh request")
}

/// `sh -c <script>` with inherited stdout.
pub fn sh(script: &str) -> ExecutionRequest {
    ExecutionRequest::builder("sh")
        .args(["-c", script])
        .build()
        .expect("valid sh request")
}

/// A script printing `lines` numbered lines tagged with `tag`, and the exact
/// bytes it is expected to produce.
pub fn numbered_lines(tag: &str, lines: usize) -> (String, String) {
    let script = format!(
        "i=0; while [ $i -lt {lines} ]; do echo {tag}-$i; i=$((i+1)); done"
    );
    let expected: String = (0..lines).map(|i| format!("{tag}-{i}\n")).collect();
    (script, expected)
}
