//! `jfetch resolve` – classify a resource without fetching it.

use anyhow::Result;
use jfetch_core::resolve;

pub fn run_resolve(resource: &str) -> Result<()> {
    let source = resolve(resource)?;
    println!("{}", source);
    Ok(())
}
