// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `toolrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "toolrun",
    version,
    about = "Run an external tool with a curated environment and optional stdout capture.",
    long_about = None
)]
pub struct CliArgs {
    /// Request file (TOML) describing the invocation.
    ///
    /// Values given on the command line take precedence over the file.
    #[arg(long, value_name = "PATH")]
    pub request: Option<PathBuf>,

    /// Environment override for the child, may be repeated.
    #[arg(short = 'e', long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,

    /// Write the child's stdout to this file (parent directories are created).
    #[arg(short = 'o', long, value_name = "PATH")]
    pub stdout_file: Option<PathBuf>,

    /// Working directory for the program.
    #[arg(short = 'C', long, value_name = "DIR")]
    pub working_dir: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TOOLRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the redacted command line and environment, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Program to run. Replaces the request file's executable and args.
    #[arg(value_name = "EXECUTABLE")]
    pub executable: Option<String>,

    /// Arguments for the program. Use `--` before them if they start with `-`.
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The level as a `tracing_subscriber::EnvFilter` directive.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn parse_env_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {s:?}")),
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_env_pairs_and_trailing_args() {
        let args = CliArgs::try_parse_from([
            "toolrun", "-e", "A=1", "--env", "B=x=y", "-o", "out/a.txt", "--", "helm", "--debug",
            "list",
        ])
        .unwrap();

        assert_eq!(
            args.env,
            vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "x=y".to_string())
            ]
        );
        assert_eq!(args.stdout_file, Some(PathBuf::from("out/a.txt")));
        assert_eq!(args.executable.as_deref(), Some("helm"));
        assert_eq!(args.args, vec!["--debug", "list"]);
    }

    #[test]
    fn rejects_env_without_equals() {
        assert!(CliArgs::try_parse_from(["toolrun", "-e", "NOVALUE", "echo"]).is_err());
    }

    #[test]
    fn log_level_is_parsed() {
        let args = CliArgs::try_parse_from(["toolrun", "--log-level", "debug", "echo"]).unwrap();
        assert_eq!(args.log_level, Some(LogLevel::Debug));
        assert!(!args.dry_run);
    }
}
