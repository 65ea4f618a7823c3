//! `jfetch get` – fetch a resource to local storage.

use anyhow::{Context, Result};
use jfetch_core::config::FetchConfig;
use jfetch_core::{fetch_with, Downloader, FetchRequest};
use std::path::{Path, PathBuf};

use crate::cli::progress::TerminalProgress;

/// Destination precedence: `--dest`, then config `download_dir`, then `cwd`.
pub(crate) fn pick_destination(dest: Option<PathBuf>, cfg: &FetchConfig, cwd: &Path) -> PathBuf {
    dest.or_else(|| cfg.download_dir.clone())
        .unwrap_or_else(|| cwd.to_path_buf())
}

pub fn run_get(cfg: &FetchConfig, resource: &str, dest: Option<PathBuf>, progress: bool) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let destination = pick_destination(dest, cfg, &cwd);
    let request = FetchRequest::new(resource)
        .destination(&destination)
        .show_progress(progress);

    let downloader = Downloader::new(cfg.client_config());
    let mut sink = TerminalProgress::default();
    let path = fetch_with(&downloader, &request, &mut sink)
        .with_context(|| format!("cannot obtain {}", resource))?;

    tracing::info!(resource, path = %path.display(), "fetched");
    println!("{}", path.display());
    Ok(())
}
