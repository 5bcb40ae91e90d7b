//! `uloady --list-hosts` – show the host table.

use anyhow::Result;
use std::io::Write;
use uloady_core::human_size::format_size;
use uloady_core::HostRegistry;

/// Writes one line per host: name, size limit, default eligibility.
pub fn run_list_hosts(registry: &HostRegistry, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{:<12} {:>9}  DEFAULT", "HOST", "LIMIT")?;
    for (name, host) in registry.iter() {
        let default = if host.is_default_eligible() { "yes" } else { "no" };
        writeln!(
            out,
            "{:<12} {:>9}  {}",
            name,
            format_size(host.max_file_size()),
            default
        )?;
    }
    Ok(())
}
