//! Feature-table writers for chicama.
//!
//! This crate writes the per-feature date×stock tables the batch builder
//! assembles:
//!
//! - [`CsvTableWriter`] - rectangular CSV, one file per feature
//! - [`JsonTableWriter`] - nested stock -> date -> value JSON

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/chicama/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;

pub use crate::csv::CsvTableWriter;
pub use formatter::{FormatError, OutputFormat, TableWriter, write_table_to_dir};
pub use json::JsonTableWriter;
