//! Selection engine: which host gets a given file.
//!
//! 1. Build the candidate set from the requested host list, or from every
//!    default-eligible host when none (or just `default`) was requested.
//! 2. Remember the largest limit among those candidates, then drop every
//!    host whose limit is below the file size.
//! 3. Pick one survivor uniformly at random.

mod rng;

pub use rng::{FixedIndex, IndexSource, OsIndex};

use crate::error::SelectError;
use crate::host::HostDescriptor;
use crate::registry::HostRegistry;
use std::sync::Arc;

/// Token standing for "every default-eligible host".
pub const DEFAULT_TOKEN: &str = "default";

/// Splits a comma-separated host list. Tokens are trimmed and a single
/// trailing empty token (from a trailing comma) is dropped.
pub fn parse_host_list(raw: &str) -> Vec<&str> {
    let mut names: Vec<&str> = raw.split(',').map(str::trim).collect();
    if names.len() > 1 && names.last() == Some(&"") {
        names.pop();
    }
    names
}

/// Candidate hosts before size filtering, in request (or registration) order.
/// Duplicates in the request are kept.
pub fn candidates(
    registry: &HostRegistry,
    requested: Option<&str>,
) -> Result<Vec<Arc<HostDescriptor>>, SelectError> {
    let names = requested.map(parse_host_list);
    match names.as_deref() {
        None | Some([DEFAULT_TOKEN]) => Ok(registry
            .iter()
            .filter(|(_, host)| host.is_default_eligible())
            .map(|(_, host)| Arc::clone(host))
            .collect()),
        Some(names) => names
            .iter()
            .map(|name| {
                registry
                    .get(name)
                    .map(Arc::clone)
                    .ok_or_else(|| SelectError::UnknownHost {
                        name: name.to_string(),
                    })
            })
            .collect(),
    }
}

/// Picks the host for one file of `size` bytes. `file` is only used in errors.
pub fn select_host(
    registry: &HostRegistry,
    requested: Option<&str>,
    file: &str,
    size: u64,
    rng: &mut dyn IndexSource,
) -> Result<Arc<HostDescriptor>, SelectError> {
    let all = candidates(registry, requested)?;
    let largest = all.iter().map(|h| h.max_file_size()).max().unwrap_or(0);
    let mut eligible: Vec<Arc<HostDescriptor>> =
        all.into_iter().filter(|h| h.accepts(size)).collect();
    if eligible.is_empty() {
        return Err(SelectError::NoEligibleHost {
            file: file.to_string(),
            size,
            largest,
        });
    }
    let pick = rng.index(eligible.len());
    let host = eligible.swap_remove(pick);
    tracing::debug!(
        file,
        size,
        host = host.name(),
        candidates = eligible.len() + 1,
        "selected host"
    );
    Ok(host)
}
