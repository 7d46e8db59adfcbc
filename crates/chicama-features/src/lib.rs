//! Daily tick series and microstructure feature computation for chicama.
//!
//! - [`DailyQuotes`] - the ordered quote series of one (stock, date) pair,
//!   with mid-quote derivation and inclusive time-window filtering
//! - [`compute_all`] and the individual feature functions - the pure
//!   per-day feature engine

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/chicama/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod series;

pub use engine::{
    FeatureError, FeatureSet, RETURN_INTERVAL, arrival_price, compute_all, imbalance,
    imbalance_in, terminal_price, total_volume, two_minute_returns, vwap,
};
pub use series::DailyQuotes;
