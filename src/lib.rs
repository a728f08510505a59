// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod remote;
pub mod types;

use anyhow::Result;
use tracing::debug;

use crate::cli::{CliArgs, Command};
use crate::config::{SubmitterConfig, load_or_default};
use crate::remote::StatusCatalog;

pub use crate::dag::{Job, JobBuilder, Task, TaskGraph, TaskId};
pub use crate::engine::{SubmissionState, Submitter};
pub use crate::errors::{ApiaryError, Result as ApiaryResult};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file, `APIARY_HOST`, `--host`)
/// - the HTTP backend
/// - the requested subcommand
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(&args.config, args.host.clone())?;

    match args.command {
        Command::CheckConfig => {
            print_config(&cfg);
            Ok(())
        }
        Command::Statuses => {
            let submitter = Submitter::from_config(&cfg)?;
            let statuses = submitter.statuses();

            let jobs = statuses.job_catalog(submitter.backend()).await?;
            print_catalog("jobs", jobs);

            let tasks = statuses.task_catalog(submitter.backend()).await?;
            print_catalog("tasks", tasks);

            debug!("statuses fetched");
            Ok(())
        }
    }
}

fn print_config(cfg: &SubmitterConfig) {
    println!("apiary-submitter config");
    println!("  server.host = {}", cfg.server.host);
    println!("  server.timeout_secs = {}", cfg.server.timeout_secs);
    println!(
        "  server.connect_timeout_secs = {}",
        cfg.server.connect_timeout_secs
    );
}

fn print_catalog(kind: &str, catalog: &StatusCatalog) {
    println!("{kind} statuses ({}):", catalog.len());
    let mut entries: Vec<_> = catalog.iter().collect();
    entries.sort_by_key(|(_, code)| **code);
    for (name, code) in entries {
        println!("  {code:>3}  {name}");
    }
}
