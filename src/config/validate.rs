// src/config/validate.rs

use crate::config::model::RawRequestFile;
use crate::errors::{Result, ToolrunError};
use crate::request::ExecutionRequest;

impl TryFrom<RawRequestFile> for ExecutionRequest {
    type Error = ToolrunError;

    fn try_from(raw: RawRequestFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_request(&raw)?;

        let mut builder = ExecutionRequest::builder(raw.executable).args(raw.args);
        if !raw.env.is_empty() {
            builder = builder.envs(raw.env);
        }
        if let Some(path) = raw.stdout_file {
            builder = builder.stdout_file(path);
        }
        if let Some(dir) = raw.working_dir {
            builder = builder.working_dir(dir);
        }
        builder.build()
    }
}

fn validate_raw_request(raw: &RawRequestFile) -> Result<()> {
    ensure_has_executable(raw)?;
    validate_env_values(raw)?;
    Ok(())
}

fn ensure_has_executable(raw: &RawRequestFile) -> Result<()> {
    if raw.executable.trim().is_empty() {
        return Err(ToolrunError::ConfigError(
            "request must set a non-empty `executable`".to_string(),
        ));
    }
    Ok(())
}

fn validate_env_values(raw: &RawRequestFile) -> Result<()> {
    // Keys are checked by the request builder; values only need to be
    // representable in a process environment.
    for (key, value) in raw.env.iter() {
        if value.contains('\0') {
            return Err(ToolrunError::ConfigError(format!(
                "[env].{key} contains a NUL byte"
            )));
        }
    }
    Ok(())
}
