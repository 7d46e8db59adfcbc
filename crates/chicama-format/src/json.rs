//! JSON table output.

use chicama_matrix::FeatureTable;
use serde_json::{Map, Value, json};
use std::io::Write;

use crate::{FormatError, TableWriter};

/// JSON table writer.
///
/// Writes one object per feature:
/// `{"feature": name, "cells": {stock: {date: value}}}`, dates in ISO
/// form. Absent cells are omitted, not nulled.
#[derive(Debug, Clone, Default)]
pub struct JsonTableWriter {
    /// Whether to pretty-print.
    pretty: bool,
}

impl JsonTableWriter {
    /// Creates a new JSON writer with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: false }
    }

    /// Sets whether to pretty-print output.
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl TableWriter for JsonTableWriter {
    fn write_table<W: Write + Send>(
        &self,
        table: &FeatureTable,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let mut cells = Map::new();
        for stock in table.stocks() {
            let mut by_date = Map::new();
            for date in table.dates() {
                if let Some(value) = table.get(*date, stock) {
                    by_date.insert(
                        date.format("%Y-%m-%d").to_string(),
                        serde_json::to_value(value)?,
                    );
                }
            }
            if !by_date.is_empty() {
                cells.insert(stock.clone(), Value::Object(by_date));
            }
        }

        let document = json!({
            "feature": table.feature().as_str(),
            "cells": Value::Object(cells),
        });

        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, &document)?;
        } else {
            serde_json::to_writer(&mut writer, &document)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    fn extension(&self) -> &str {
        "json"
    }
}
