//! `tpy locate`: resolve a global position across registered files

use anyhow::{bail, Result};
use std::io::Write;
use tpy_core::SourceRegistry;

pub fn write_location(registry: &SourceRegistry, position: usize, out: &mut impl Write) -> Result<()> {
    let Some(location) = registry.location(position) else {
        bail!("no source files registered");
    };
    writeln!(out, "{}", location)?;
    Ok(())
}
