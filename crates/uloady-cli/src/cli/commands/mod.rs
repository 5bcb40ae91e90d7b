//! CLI command handlers.

mod list_hosts;
mod upload;

pub use list_hosts::run_list_hosts;
pub use upload::{run_upload, UploadArgs};

#[cfg(test)]
pub(crate) use upload::describe;
