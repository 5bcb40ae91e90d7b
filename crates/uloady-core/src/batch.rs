//! Run uploads for a list of files.
//!
//! Files are checked and assigned a host in input order; up to `jobs` uploads
//! run at once on the blocking pool, each streaming its file from disk. Each file's outcome is handed to the
//! caller in input order, and one file's failure never stops the others.

use anyhow::Result;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::error::{Error, FileError, UploadError};
use crate::host::HostDescriptor;
use crate::registry::HostRegistry;
use crate::select::{self, IndexSource};
use crate::upload::{Payload, Uploader};

#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Requested host list (`None` = default-eligible hosts).
    pub hosts: Option<String>,
    pub dry_run: bool,
    /// Uploads in flight at once; 0 is treated as 1.
    pub jobs: usize,
}

/// What happened to one input file.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Host the file was sent to, if selection got that far.
    pub host: Option<String>,
    pub result: Result<String, Error>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

struct Prepared {
    host: Arc<HostDescriptor>,
    file_name: String,
}

/// Looks at the file's size, picks a host for it, then checks the file can
/// be opened. The contents are left on disk for the transfer to stream.
async fn prepare(
    registry: &HostRegistry,
    hosts: Option<&str>,
    path: &Path,
    rng: &mut dyn IndexSource,
) -> Result<Prepared, Error> {
    let display = path.display().to_string();
    let read_error = |source| FileError::Read {
        file: display.clone(),
        source,
    };
    let meta = tokio::fs::metadata(path).await.map_err(read_error)?;
    if !meta.is_file() {
        return Err(read_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        ))
        .into());
    }
    let host = select::select_host(registry, hosts, &display, meta.len(), rng)?;
    tokio::fs::File::open(path).await.map_err(read_error)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| display.clone());
    Ok(Prepared { host, file_name })
}

/// Uploads every file in `files`, calling `report` once per file in input order.
///
/// Per-file errors end up in the outcome, including an upload that panicked.
/// `Err` is only returned if the runtime cancels the batch's own tasks.
pub async fn run_batch<F>(
    registry: &HostRegistry,
    uploader: Uploader,
    opts: &BatchOptions,
    files: &[PathBuf],
    rng: &mut dyn IndexSource,
    mut report: F,
) -> Result<BatchReport>
where
    F: FnMut(FileOutcome),
{
    let max_concurrent = opts.jobs.max(1);
    let mut summary = BatchReport::default();
    let mut finished: BTreeMap<usize, FileOutcome> = BTreeMap::new();
    let mut next_to_report = 0usize;
    let mut next_file = 0usize;
    let mut join_set = JoinSet::new();

    loop {
        while join_set.len() < max_concurrent && next_file < files.len() {
            let index = next_file;
            next_file += 1;
            let path = files[index].clone();
            match prepare(registry, opts.hosts.as_deref(), &path, rng).await {
                Ok(prepared) => {
                    let dry_run = opts.dry_run;
                    let host = prepared.host.name().to_string();
                    let source = path.clone();
                    join_set.spawn(async move {
                        let upload = tokio::task::spawn_blocking(move || {
                            uploader.upload(
                                &prepared.host,
                                &prepared.file_name,
                                Payload::File(&source),
                                dry_run,
                            )
                        });
                        let result = match upload.await {
                            Ok(result) => result,
                            Err(e) => Err(UploadError::Aborted {
                                host: host.clone(),
                                reason: e.to_string(),
                            }),
                        };
                        let outcome = FileOutcome {
                            path,
                            host: Some(host),
                            result: result.map_err(Error::from),
                        };
                        (index, outcome)
                    });
                }
                Err(err) => {
                    finished.insert(
                        index,
                        FileOutcome {
                            path,
                            host: None,
                            result: Err(err),
                        },
                    );
                }
            }
            flush(&mut finished, &mut next_to_report, &mut summary, &mut report);
        }

        if join_set.is_empty() {
            break;
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        // The wrapper task only awaits the upload, so this fails on runtime
        // shutdown alone.
        let (index, outcome) = res.map_err(|e| anyhow::anyhow!("upload task join: {}", e))?;
        finished.insert(index, outcome);
        flush(&mut finished, &mut next_to_report, &mut summary, &mut report);
    }

    Ok(summary)
}

/// Hands over every outcome that is next in input order.
fn flush<F>(
    finished: &mut BTreeMap<usize, FileOutcome>,
    next_to_report: &mut usize,
    summary: &mut BatchReport,
    report: &mut F,
) where
    F: FnMut(FileOutcome),
{
    while let Some(outcome) = finished.remove(&*next_to_report) {
        match &outcome.result {
            Ok(url) => {
                tracing::info!(file = %outcome.path.display(), host = ?outcome.host, url = %url, "uploaded");
                summary.succeeded += 1;
            }
            Err(err) => {
                tracing::warn!(file = %outcome.path.display(), host = ?outcome.host, "upload failed: {}", err);
                summary.failed += 1;
            }
        }
        report(outcome);
        *next_to_report += 1;
    }
}
