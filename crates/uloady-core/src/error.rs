//! Error taxonomy shared by the registry, selection engine and upload executor.
//!
//! `ConfigError` is fatal at startup. Everything else is scoped to a single
//! file: the batch loop reports it and moves on to the next file.

use crate::host::response::ResponseError;
use crate::human_size::format_size;
use thiserror::Error;

fn human(bytes: &u64) -> String {
    format_size(*bytes)
}

/// A host descriptor or the registry is malformed. Never recovered.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("host name must not be empty")]
    EmptyName,
    #[error("host `{0}` has no endpoint")]
    EmptyEndpoint(String),
    #[error("host `{0}` must accept files larger than 0 bytes")]
    ZeroSizeLimit(String),
    #[error("host `{0}` has no form field carrying the file data")]
    MissingDataField(String),
    #[error("host `{0}` has more than one form field carrying the file data")]
    MultipleDataFields(String),
    #[error("host `{0}` is registered twice")]
    DuplicateHost(String),
}

/// Host selection failed for one file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("unknown host `{name}`")]
    UnknownHost { name: String },
    #[error(
        "{file} is too large ({}); the largest limit among candidate hosts is {}",
        human(.size),
        human(.largest)
    )]
    NoEligibleHost {
        file: String,
        size: u64,
        /// Largest `max_file_size` among the candidates before size filtering.
        largest: u64,
    },
}

/// Sending a file to a host failed.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Transport-level failure before a response was obtained (DNS, connect, TLS, timeout).
    #[error("request to {host} failed")]
    Request {
        host: String,
        #[source]
        source: curl::Error,
    },
    /// The host answered with a non-2xx status.
    #[error("{host} responded with HTTP {status}")]
    Protocol {
        host: String,
        status: u32,
        /// Raw response body, kept for diagnostics.
        body: String,
    },
    /// The host answered 2xx but the body did not contain a URL where expected.
    #[error("{host} returned a response that could not be read")]
    MalformedResponse {
        host: String,
        #[source]
        source: ResponseError,
    },
    #[error("could not assemble multipart form")]
    Form(#[from] curl::FormError),
    /// The upload task died (panicked or was cancelled) before producing a result.
    #[error("upload to {host} was aborted: {reason}")]
    Aborted { host: String, reason: String },
}

impl UploadError {
    /// True if the transfer was aborted by the configured timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, UploadError::Request { source, .. } if source.is_operation_timedout())
    }

    /// HTTP status for protocol errors.
    pub fn status(&self) -> Option<u32> {
        match self {
            UploadError::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The local input file could not be read. The message names the file,
/// which `std::io::Error` does not.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("{file}: could not read file")]
    Read {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

/// Any per-file failure.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    File(#[from] FileError),
    #[error(transparent)]
    Select(#[from] SelectError),
    #[error(transparent)]
    Upload(#[from] UploadError),
}
