//! CLI for the jfetch resource fetcher.

mod commands;
mod progress;

use anyhow::Result;
use clap::{Parser, Subcommand};
use jfetch_core::config;
use std::path::PathBuf;

use commands::{run_config, run_get, run_resolve};

/// Top-level CLI for jfetch.
#[derive(Debug, Parser)]
#[command(name = "jfetch")]
#[command(about = "jfetch: fetch a local path, file:// or http(s):// resource to disk", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch a resource and print the path of the local file.
    Get {
        /// Local path, file:// URL or http(s):// URL.
        resource: String,

        /// File path or existing directory to download into (default: config download_dir, else the current directory).
        #[arg(long, short = 'd', value_name = "PATH")]
        dest: Option<PathBuf>,

        /// Do not show a progress indicator.
        #[arg(long)]
        no_progress: bool,
    },

    /// Show how a resource would be fetched, without fetching it.
    Resolve {
        /// Local path, file:// URL or http(s):// URL.
        resource: String,
    },

    /// Print the configuration file path and its contents.
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Get {
                resource,
                dest,
                no_progress,
            } => run_get(&cfg, &resource, dest, !no_progress)?,
            CliCommand::Resolve { resource } => run_resolve(&resource)?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
