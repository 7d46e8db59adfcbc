//! Display utilities and output formatting for the chicama CLI.

use anyhow::Result;
use chicama_lib::prelude::*;
use clap::ValueEnum;
use std::path::Path;

/// Output format for feature tables.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Writes every feature's table into `out_dir` in the selected format.
pub(crate) fn write_tables(matrix: &FeatureMatrix, out_dir: &Path, format: Format) -> Result<()> {
    for feature in Feature::all() {
        let table = matrix.table(*feature);
        match format {
            Format::Csv => {
                write_table_to_dir(&CsvTableWriter::new(), &table, out_dir)?;
            }
            Format::Json => {
                write_table_to_dir(&JsonTableWriter::new(), &table, out_dir)?;
            }
        }
    }
    Ok(())
}

/// Prints the skipped cells of a batch run, one warning per unit.
pub(crate) fn print_skipped(report: &BuildReport) {
    for cell in &report.skipped {
        eprintln!(
            "warning: skipped {} {}: {}",
            cell.date.format("%Y-%m-%d"),
            cell.stock,
            cell.reason
        );
    }
}
