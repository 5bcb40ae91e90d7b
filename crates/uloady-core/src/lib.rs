pub mod config;
pub mod error;
pub mod logging;

pub mod batch;
pub mod builtin;
pub mod host;
pub mod human_size;
pub mod registry;
pub mod select;
pub mod upload;

pub use error::{ConfigError, Error, FileError, SelectError, UploadError};
pub use host::{FormValue, HostBuilder, HostDescriptor};
pub use registry::HostRegistry;
