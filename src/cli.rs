// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::default_config_path;

/// Command-line arguments for `apiary-submitter`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "apiary-submitter",
    version,
    about = "Submit task graphs to an Apiary jobs service.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Apiary.toml` in the current working directory. A missing
    /// file means built-in defaults.
    #[arg(long, global = true, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Jobs service URL; overrides the config file and `APIARY_HOST`.
    #[arg(long, global = true, value_name = "URL")]
    pub host: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `APIARY_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Fetch and print the job and task status catalogs.
    Statuses,
    /// Load and validate the configuration, then print the effective values.
    CheckConfig,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
