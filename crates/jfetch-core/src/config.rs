use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::downloader::{ClientConfig, DEFAULT_MAX_REDIRECTS};

/// Global configuration loaded from `~/.config/jfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Redirect chain length at which a download is aborted.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,
    /// Interval between progress samples, in milliseconds.
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,
    /// Optional connect timeout in seconds (None = HTTP client default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Default destination directory for `jfetch get` when `--dest` is not given.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
}

fn default_max_redirects() -> u32 {
    DEFAULT_MAX_REDIRECTS
}

fn default_progress_interval_ms() -> u64 {
    1000
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_redirects: default_max_redirects(),
            progress_interval_ms: default_progress_interval_ms(),
            connect_timeout_secs: None,
            download_dir: None,
        }
    }
}

impl FetchConfig {
    /// HTTP client settings for the downloader.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            max_redirects: self.max_redirects,
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            progress_interval: Duration::from_millis(self.progress_interval_ms),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("jfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<FetchConfig> {
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: FetchConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
