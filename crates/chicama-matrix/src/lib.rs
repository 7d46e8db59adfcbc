//! Batch feature-matrix assembly for chicama.
//!
//! Drives the per-(date, stock) decode -> compute sweep across a stock
//! universe and assembles the per-feature date×stock tables:
//!
//! - [`Universe`] - injected symbol enumeration
//! - [`MatrixConfig`] / [`MatrixBuilder`] - the batch driver
//! - [`FeatureMatrix`] / [`FeatureTable`] - composite-key cells and their
//!   transposed date-indexed views
//! - [`BuildReport`] - skipped (stock, date) units with reasons

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/chicama/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod builder;
mod matrix;
mod universe;

pub use builder::{
    BuildError, BuildReport, MatrixBuilder, MatrixConfig, SkippedCell, UnitError,
};
pub use matrix::{FeatureMatrix, FeatureTable, MatrixKey};
pub use universe::{QUOTE_FILE_SUFFIX, TRADE_FILE_SUFFIX, Universe};
