//! Binary TAQ tick file decoding for chicama.
//!
//! This crate decodes the gzip-compressed, big-endian columnar daily tick
//! files into typed records:
//!
//! - [`QuoteReader`] / [`TradeReader`] - columnar readers behind the
//!   [`TickReader`] capability trait
//! - [`decompress_gz`] / [`compress_gz`] - whole-file gzip handling
//! - [`rewrite_records`] / [`write_records`] / [`read_records`] - the
//!   fixed-width trade re-emission codec

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/chicama/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod decompress;
mod emit;
mod reader;

pub use decompress::{DecompressError, compress_gz, decompress_gz};
pub use emit::{TradeRecord, read_records, rewrite_records, write_records, write_records_to_path};
pub use reader::{DecodeError, IndexError, QuoteReader, TickHeader, TickReader, TradeReader};
