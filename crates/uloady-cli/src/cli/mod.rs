//! CLI for uloady.

mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use uloady_core::{config, logging, registry};

use commands::{run_list_hosts, run_upload, UploadArgs};

/// Top-level CLI: upload files to anonymous file hosts and print their URLs.
#[derive(Debug, Parser)]
#[command(name = "uloady", version)]
#[command(about = "Upload files to anonymous file hosts and print their URLs", long_about = None)]
pub struct Cli {
    /// Files to upload.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Pick hosts and build requests, but send nothing.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Comma-separated hosts to choose from (or "default").
    #[arg(short = 'H', long, value_name = "LIST")]
    pub hosts: Option<String>,

    /// Upload up to N files at once.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// List known hosts with their size limits and exit.
    #[arg(long)]
    pub list_hosts: bool,
}

pub async fn run_from_args() -> Result<ExitCode> {
    let cli = Cli::parse();

    let cfg = config::load_or_default()?;
    if logging::init_logging(cfg.log_file).is_err() {
        logging::init_logging_stderr();
    }
    tracing::debug!("loaded config: {:?}", cfg);

    let registry = registry::global().context("invalid built-in host table")?;

    if cli.list_hosts {
        run_list_hosts(registry, &mut std::io::stdout().lock())?;
        return Ok(ExitCode::SUCCESS);
    }

    let args = UploadArgs {
        files: cli.files,
        hosts: cli.hosts.or(cfg.hosts.clone()),
        dry_run: cli.dry_run,
        jobs: cli.jobs.unwrap_or(cfg.jobs),
    };
    run_upload(registry, &cfg, args).await
}

#[cfg(test)]
mod tests;
