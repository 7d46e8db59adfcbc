//! CSV table output.

use chicama_matrix::FeatureTable;
use chicama_types::FeatureValue;
use std::io::Write;

use crate::{FormatError, TableWriter};

/// CSV table writer.
///
/// Writes one rectangular file per feature: a `date` column in ISO form,
/// one column per stock, and empty cells for absent (stock, date) pairs.
/// Return-series cells are JSON-encoded (and quoted) so the file stays
/// rectangular.
#[derive(Debug, Clone)]
pub struct CsvTableWriter {
    /// Field delimiter (default: comma).
    delimiter: char,
}

impl CsvTableWriter {
    /// Creates a new CSV writer with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self { delimiter: ',' }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Creates a tab-separated values (TSV) writer.
    #[must_use]
    pub const fn tsv() -> Self {
        Self { delimiter: '\t' }
    }

    fn render_cell(&self, value: Option<&FeatureValue>) -> String {
        let Some(value) = value else {
            return String::new();
        };
        let rendered = value.to_string();
        if rendered.contains(self.delimiter) {
            format!("\"{rendered}\"")
        } else {
            rendered
        }
    }
}

impl Default for CsvTableWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableWriter for CsvTableWriter {
    fn write_table<W: Write + Send>(
        &self,
        table: &FeatureTable,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        write!(writer, "date")?;
        for stock in table.stocks() {
            write!(writer, "{d}{stock}")?;
        }
        writeln!(writer)?;

        for (date, row) in table.rows() {
            write!(writer, "{}", date.format("%Y-%m-%d"))?;
            for cell in row {
                write!(writer, "{d}{}", self.render_cell(cell))?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}
