use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration loaded from `~/.config/uloady/config.toml`.
///
/// Every field is optional in the file; missing fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UloadyConfig {
    /// Host selection used when `--hosts` is not given (same syntax).
    pub hosts: Option<String>,
    /// Seconds allowed for establishing a connection to a host.
    pub connect_timeout_secs: u64,
    /// Upper bound in seconds on a whole upload, as a safety net behind the
    /// low-speed check. 0 disables it.
    pub timeout_secs: u64,
    /// An upload slower than this many bytes per second for
    /// `low_speed_time_secs` is abandoned as stalled. 0 disables the check.
    pub low_speed_limit_bytes: u32,
    pub low_speed_time_secs: u64,
    /// Uploads in flight at once when `--jobs` is not given.
    pub jobs: usize,
    /// Log to `~/.local/state/uloady/uloady.log` instead of stderr.
    pub log_file: bool,
}

impl Default for UloadyConfig {
    fn default() -> Self {
        Self {
            hosts: None,
            connect_timeout_secs: 15,
            timeout_secs: 6 * 3600,
            low_speed_limit_bytes: 1024,
            low_speed_time_secs: 60,
            jobs: 1,
            log_file: false,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("uloady")?;
    Ok(xdg_dirs.get_config_home().join("config.toml"))
}

/// Load configuration from disk, or defaults when no file exists.
/// Nothing is written: uloady keeps no state between runs.
pub fn load_or_default() -> Result<UloadyConfig> {
    let path = config_path()?;
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(UloadyConfig::default());
    }
    load_from_path(&path)
}

pub fn load_from_path(path: &Path) -> Result<UloadyConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: UloadyConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
