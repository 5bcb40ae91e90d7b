//! Host registry: name → descriptor table.
//!
//! Filled once, in a fixed order, before any selection happens; read-only
//! afterwards. The process-wide instance lives behind a `OnceLock`, and tests
//! build their own isolated registries with `HostRegistry::new()`.

use crate::builtin;
use crate::error::ConfigError;
use crate::host::HostDescriptor;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<HostRegistry> = OnceLock::new();

/// Returns the process-wide registry with every built-in host, building it on
/// first use.
pub fn global() -> Result<&'static HostRegistry, ConfigError> {
    if let Some(registry) = GLOBAL.get() {
        return Ok(registry);
    }
    let registry = builtin::registry()?;
    tracing::debug!(hosts = registry.len(), "host registry initialized");
    Ok(GLOBAL.get_or_init(|| registry))
}

#[derive(Debug, Default)]
pub struct HostRegistry {
    hosts: Vec<Arc<HostDescriptor>>,
    by_name: HashMap<String, usize>,
}

impl HostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a host; names must be unique.
    pub fn register(&mut self, host: HostDescriptor) -> Result<(), ConfigError> {
        if self.by_name.contains_key(host.name()) {
            return Err(ConfigError::DuplicateHost(host.name().to_string()));
        }
        self.by_name.insert(host.name().to_string(), self.hosts.len());
        self.hosts.push(Arc::new(host));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<HostDescriptor>> {
        self.by_name.get(name).map(|&i| &self.hosts[i])
    }

    /// `(name, descriptor)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<HostDescriptor>)> + '_ {
        self.hosts.iter().map(|h| (h.name(), h))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.hosts.iter().map(|h| h.name())
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}
