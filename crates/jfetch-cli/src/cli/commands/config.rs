//! `jfetch config` – show the active configuration.

use anyhow::Result;
use jfetch_core::config::{self, FetchConfig};

pub fn run_config(cfg: &FetchConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
