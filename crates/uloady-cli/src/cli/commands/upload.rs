//! Default action: upload every file and print one URL per line.

use anyhow::Result;
use std::path::PathBuf;
use std::process::ExitCode;
use uloady_core::batch::{self, BatchOptions, FileOutcome};
use uloady_core::config::UloadyConfig;
use uloady_core::select::OsIndex;
use uloady_core::upload::Uploader;
use uloady_core::{Error, HostRegistry};

#[derive(Debug, Clone)]
pub struct UploadArgs {
    pub files: Vec<PathBuf>,
    pub hosts: Option<String>,
    pub dry_run: bool,
    pub jobs: usize,
}

/// Uploads `args.files`, printing URLs to stdout and failures to stderr.
/// Exits non-zero if any file failed.
pub async fn run_upload(
    registry: &HostRegistry,
    cfg: &UloadyConfig,
    args: UploadArgs,
) -> Result<ExitCode> {
    let opts = BatchOptions {
        hosts: args.hosts,
        dry_run: args.dry_run,
        jobs: args.jobs,
    };
    let summary = batch::run_batch(
        registry,
        Uploader::from_config(cfg),
        &opts,
        &args.files,
        &mut OsIndex,
        |outcome| match describe(outcome) {
            Ok(url) => println!("{}", url),
            Err(message) => eprintln!("uloady: {}", message),
        },
    )
    .await?;

    if summary.all_succeeded() {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::debug!(failed = summary.failed, "some uploads failed");
        Ok(ExitCode::FAILURE)
    }
}

/// URL on success; otherwise the error chain, prefixed with the file name
/// unless the error already names it.
pub(crate) fn describe(outcome: FileOutcome) -> Result<String, String> {
    match outcome.result {
        Ok(url) => Ok(url),
        Err(err) => {
            let names_file = matches!(
                err,
                Error::File(_) | Error::Select(uloady_core::SelectError::NoEligibleHost { .. })
            );
            let chain = format!("{:#}", anyhow::Error::from(err));
            if names_file {
                Err(chain)
            } else {
                Err(format!("{}: {}", outcome.path.display(), chain))
            }
        }
    }
}
