//! TAQ binary tick decoding and daily microstructure features.
//!
//! This is a facade crate that re-exports functionality from the chicama
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use chicama_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MatrixConfig::new(
//!         "data/quotes/extracted",
//!         Universe::fixed(["AAPL", "MSFT", "GOOG"]),
//!     );
//!     let (matrix, report) = MatrixBuilder::new(config).build().await?;
//!
//!     println!(
//!         "{} units ok, {} skipped",
//!         report.ok_units(),
//!         report.skipped.len()
//!     );
//!     for feature in Feature::all() {
//!         let table = matrix.table(*feature);
//!         write_table_to_dir(&CsvTableWriter::new(), &table, std::path::Path::new("out"))?;
//!     }
//!     Ok(())
//! }
//! ```

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/chicama/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;

pub use error::{ChicamaError, Result};

// Re-export core types
pub use chicama_types::*;

// Re-export decoding
pub use chicama_decode::{
    DecodeError, DecompressError, IndexError, QuoteReader, TickHeader, TickReader, TradeReader,
    TradeRecord, compress_gz, decompress_gz, read_records, rewrite_records, write_records,
    write_records_to_path,
};

// Re-export series and feature computation
pub use chicama_features::{
    DailyQuotes, FeatureError, FeatureSet, RETURN_INTERVAL, arrival_price, compute_all, imbalance,
    imbalance_in, terminal_price, total_volume, two_minute_returns, vwap,
};

// Re-export batch assembly
pub use chicama_matrix::{
    BuildError, BuildReport, FeatureMatrix, FeatureTable, MatrixBuilder, MatrixConfig,
    QUOTE_FILE_SUFFIX, SkippedCell, TRADE_FILE_SUFFIX, UnitError, Universe,
};

// Re-export table writers
pub use chicama_format::{
    CsvTableWriter, FormatError, JsonTableWriter, OutputFormat, TableWriter, write_table_to_dir,
};

/// Prelude module for convenient imports.
///
/// ```
/// use chicama_lib::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{ChicamaError, Result};

    pub use chicama_types::{
        Feature, FeatureValue, QuoteTick, SessionWindow, TimeLabel, TradeTick,
    };

    pub use chicama_decode::{QuoteReader, TickReader, TradeReader};

    pub use chicama_features::{DailyQuotes, FeatureSet, compute_all};

    pub use chicama_matrix::{
        BuildReport, FeatureMatrix, FeatureTable, MatrixBuilder, MatrixConfig, Universe,
    };

    pub use chicama_format::{
        CsvTableWriter, JsonTableWriter, OutputFormat, TableWriter, write_table_to_dir,
    };
}
