//! Rewrite command implementation.
//!
//! Re-emits a daily trade file as a flat stream of absolute-timestamped
//! fixed-width records.

use anyhow::{Context, Result};
use chicama_lib::prelude::*;
use chicama_lib::{rewrite_records, write_records_to_path};
use std::path::Path;

/// Re-emit one trade file.
pub(crate) fn rewrite(file: &Path, out: &Path, instrument_id: u16) -> Result<()> {
    let reader = TradeReader::from_path(file)
        .with_context(|| format!("Cannot decode trade file {}", file.display()))?;

    let records = rewrite_records(&reader, instrument_id);
    write_records_to_path(&records, out)
        .with_context(|| format!("Cannot write {}", out.display()))?;

    println!(
        "Re-emitted {} records from {} to {}",
        records.len(),
        file.display(),
        out.display()
    );
    Ok(())
}
