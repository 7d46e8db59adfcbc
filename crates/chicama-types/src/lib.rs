//! Core types for chicama TAQ feature extraction.
//!
//! This crate provides the fundamental data structures used throughout
//! chicama:
//!
//! - [`QuoteTick`] / [`TradeTick`] - single timestamped tick records
//! - [`TimeLabel`] / [`SessionWindow`] - `"HH:MM"` session time handling
//! - [`Feature`] / [`FeatureValue`] - the per-stock-per-day feature set

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/chicama/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod feature;
mod session;
mod tick;

pub use error::TimeLabelError;
pub use feature::{Feature, FeatureParseError, FeatureValue};
pub use session::{SessionWindow, TimeLabel};
pub use tick::{MILLIS_PER_DAY, QuoteTick, TradeTick};
