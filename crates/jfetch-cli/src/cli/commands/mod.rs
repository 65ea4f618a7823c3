//! CLI command handlers, one per file.

mod config;
mod get;
mod resolve;

pub use config::run_config;
pub use get::run_get;
pub use resolve::run_resolve;
