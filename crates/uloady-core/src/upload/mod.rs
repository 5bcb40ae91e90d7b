//! Upload executor: one generic multipart POST driven by a host descriptor.
//!
//! Uses the curl crate (libcurl). Each call makes exactly one request (none
//! in dry-run mode); failures are returned, never retried.

mod form;

use crate::config::UloadyConfig;
use crate::error::UploadError;
use crate::host::HostDescriptor;
use curl::easy::Easy;
use std::path::Path;
use std::time::Duration;

/// Result returned instead of a URL when nothing is sent.
pub const DRY_RUN_RESULT: &str = "dry run";

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("uloady/", env!("CARGO_PKG_VERSION"));

/// The file data sent in the form's data field.
pub enum Payload<'a> {
    /// Streamed from disk during the transfer.
    File(&'a Path),
    /// Already in memory; moved into the form without copying.
    Bytes(Vec<u8>),
}

impl Payload<'_> {
    fn describe(&self) -> String {
        match self {
            Payload::File(path) => path.display().to_string(),
            Payload::Bytes(data) => format!("{} bytes in memory", data.len()),
        }
    }
}

/// Transfer settings shared by every upload in a run.
#[derive(Debug, Clone, Copy)]
pub struct Uploader {
    pub connect_timeout: Duration,
    /// Safety net on the whole exchange. Zero means no limit.
    pub timeout: Duration,
    /// A transfer averaging fewer bytes per second than this over
    /// `low_speed_time` is aborted as stalled. Zero disables the check.
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
}

impl Default for Uploader {
    fn default() -> Self {
        Self::from_config(&UloadyConfig::default())
    }
}

impl Uploader {
    pub fn from_config(cfg: &UloadyConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            low_speed_limit: cfg.low_speed_limit_bytes,
            low_speed_time: Duration::from_secs(cfg.low_speed_time_secs),
        }
    }

    /// Sends `payload` to `host` as `file_name` (transformed by the host
    /// first) and returns the public URL. With `dry_run` the request is
    /// prepared but not sent and [`DRY_RUN_RESULT`] is returned.
    ///
    /// Runs in the current thread; call from `spawn_blocking` in async code.
    pub fn upload(
        &self,
        host: &HostDescriptor,
        file_name: &str,
        payload: Payload<'_>,
        dry_run: bool,
    ) -> Result<String, UploadError> {
        let request_error = |source: curl::Error| UploadError::Request {
            host: host.name().to_string(),
            source,
        };

        let upload_name = host.upload_name(file_name);
        let source = payload.describe();
        let form = form::build_form(host, &upload_name, payload)?;

        let mut easy = Easy::new();
        easy.url(host.endpoint()).map_err(request_error)?;
        easy.useragent(USER_AGENT).map_err(request_error)?;
        easy.connect_timeout(self.connect_timeout)
            .map_err(request_error)?;
        easy.timeout(self.timeout).map_err(request_error)?;
        // Abort on stall; `timeout` is only a backstop.
        easy.low_speed_limit(self.low_speed_limit)
            .map_err(request_error)?;
        easy.low_speed_time(self.low_speed_time)
            .map_err(request_error)?;
        easy.httppost(form).map_err(request_error)?;

        if dry_run {
            tracing::info!(
                host = host.name(),
                endpoint = host.endpoint(),
                name = %upload_name,
                source = %source,
                "dry run, request not sent"
            );
            return Ok(DRY_RUN_RESULT.to_string());
        }

        tracing::debug!(
            host = host.name(),
            endpoint = host.endpoint(),
            name = %upload_name,
            source = %source,
            "sending upload"
        );
        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|chunk| {
                    body.extend_from_slice(chunk);
                    Ok(chunk.len())
                })
                .map_err(request_error)?;
            transfer.perform().map_err(request_error)?;
        }

        let status = easy.response_code().map_err(request_error)?;
        let body = String::from_utf8_lossy(&body).into_owned();
        tracing::debug!(host = host.name(), status, "upload response");
        if !(200..300).contains(&status) {
            tracing::debug!(host = host.name(), status, body = %body, "host rejected upload");
            return Err(UploadError::Protocol {
                host: host.name().to_string(),
                status,
                body,
            });
        }

        host.public_url(&body)
            .map_err(|source| UploadError::MalformedResponse {
                host: host.name().to_string(),
                source,
            })
    }
}
