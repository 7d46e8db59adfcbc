//! Output format abstraction.

use chicama_matrix::FeatureTable;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Rectangular CSV, one file per feature.
    #[default]
    Csv,
    /// Nested stock -> date -> value JSON, one file per feature.
    Json,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Csv, Self::Json]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during table writing.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait for feature-table writers.
pub trait TableWriter: Send + Sync {
    /// Writes one feature's date×stock table to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write + Send>(
        &self,
        table: &FeatureTable,
        writer: W,
    ) -> Result<(), FormatError>;

    /// Returns the file extension this writer produces.
    fn extension(&self) -> &str;
}

/// Writes a table into `dir`, named after its feature stem, and returns
/// the path written.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_table_to_dir<F: TableWriter>(
    writer: &F,
    table: &FeatureTable,
    dir: &Path,
) -> Result<PathBuf, FormatError> {
    let path = dir.join(format!("{}.{}", table.feature().as_str(), writer.extension()));
    let file = std::fs::File::create(&path)?;
    writer.write_table(table, std::io::BufWriter::new(file))?;
    Ok(path)
}
