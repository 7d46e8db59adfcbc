//! Features command implementation.
//!
//! Runs the date x stock sweep over a tree of daily quote files and
//! writes one feature table per feature into the output directory.

use crate::display::{Format, print_skipped, write_tables};
use anyhow::{Context, Result};
use chicama_lib::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Build and persist the per-feature date x stock tables.
pub(crate) async fn features(
    data_dir: &Path,
    out_dir: &Path,
    symbols: &[String],
    format: Format,
    concurrency: usize,
    quiet: bool,
) -> Result<()> {
    let universe = if symbols.is_empty() {
        Universe::from_directory()
    } else {
        Universe::fixed(symbols.iter().cloned())
    };

    let config = MatrixConfig::new(data_dir, universe).with_concurrency(concurrency);
    let builder = MatrixBuilder::new(config);

    // Setup progress bar
    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::no_length();
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] {pos} units {msg}")
                .expect("Invalid progress template"),
        );
        pb.set_message(format!("sweeping {}", data_dir.display()));
        pb
    };

    let (matrix, report) = builder
        .build_with_progress(|| progress.inc(1))
        .await
        .with_context(|| format!("Feature sweep failed under {}", data_dir.display()))?;
    progress.finish_and_clear();

    print_skipped(&report);

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Cannot create output directory {}", out_dir.display()))?;
    write_tables(&matrix, out_dir, format)?;

    if !quiet {
        println!(
            "Wrote {} tables to {} ({} units ok, {} skipped)",
            Feature::all().len(),
            out_dir.display(),
            report.ok_units(),
            report.skipped.len()
        );
    }

    Ok(())
}
