//! Per-day feature computation.
//!
//! All functions are pure: they take a [`DailyQuotes`] series (already
//! carrying mid-quotes where needed) and deterministic parameters, and
//! touch no shared state.

use thiserror::Error;

use chicama_types::{Feature, FeatureValue, SessionWindow, TimeLabelError};

use crate::DailyQuotes;

/// Default record stride for the "2-minute" return series.
pub const RETURN_INTERVAL: usize = 120;

/// Errors that can occur during feature computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    /// Feature requested on an empty series.
    #[error("Feature requested on an empty series")]
    EmptyInput,

    /// Division by a zero reference mid-quote in the return computation.
    #[error("Zero reference mid-quote at record {index}")]
    ZeroReference {
        /// Index of the zero previous mid-quote.
        index: usize,
    },

    /// Malformed time-range label.
    #[error(transparent)]
    TimeLabel(#[from] TimeLabelError),
}

/// Computes the mid-quote return series at a fixed record stride.
///
/// `interval` is a record-index stride, not a wall-clock duration: the
/// "2-minute" name assumes roughly one quote update per second and is a
/// label only. Quote arrival is irregular, so the sampled spacing in
/// wall-clock time varies; the stride semantics are kept deliberately.
///
/// Returns an empty series when `series.len() < interval`. Otherwise, for
/// `i = interval, 2*interval, ...` while `i < len`, emits
/// `(mid[i] - mid[i - interval]) / mid[i - interval]`, with mids
/// recomputed from bid/ask. A zero previous mid-quote fails with
/// [`FeatureError::ZeroReference`]; this division is the one place left
/// unguarded upstream, and the error is the nearest visible rendering of
/// that failure rather than a silent zero.
///
/// # Errors
///
/// Returns an error if a reference mid-quote is exactly zero.
pub fn two_minute_returns(
    series: &DailyQuotes,
    interval: usize,
) -> Result<Vec<f64>, FeatureError> {
    if interval == 0 || series.len() < interval {
        return Ok(Vec::new());
    }

    let mids: Vec<f64> = series.iter().map(chicama_types::QuoteTick::mid).collect();

    let mut returns = Vec::with_capacity(mids.len() / interval);
    let mut i = interval;
    while i < mids.len() {
        let prev = mids[i - interval];
        if prev == 0.0 {
            return Err(FeatureError::ZeroReference { index: i - interval });
        }
        returns.push((mids[i] - prev) / prev);
        i += interval;
    }

    Ok(returns)
}

/// Total posted size over the day: `sum(bid_size + ask_size)`.
///
/// A liquidity-at-quote proxy, not executed trade volume. Empty series
/// sum to zero.
#[must_use]
pub fn total_volume(series: &DailyQuotes) -> i64 {
    series.iter().map(chicama_types::QuoteTick::total_size).sum()
}

/// Arrival price: mean mid-quote over the first five records, or over all
/// records when fewer than five exist.
///
/// # Errors
///
/// Returns an error if the series is empty.
pub fn arrival_price(series: &DailyQuotes) -> Result<f64, FeatureError> {
    if series.is_empty() {
        return Err(FeatureError::EmptyInput);
    }
    let count = series.len().min(5);
    let sum: f64 = series.iter().take(count).map(|t| t.mid_quote).sum();
    Ok(sum / count as f64)
}

/// Order-flow imbalance: `sum(bid_size - ask_size)` over the 09:30-15:30
/// session window, both bounds inclusive. Ticks outside the window never
/// contribute.
#[must_use]
pub fn imbalance(series: &DailyQuotes) -> i64 {
    imbalance_in(series, SessionWindow::imbalance_default())
}

/// Order-flow imbalance over an explicit session window.
#[must_use]
pub fn imbalance_in(series: &DailyQuotes, window: SessionWindow) -> i64 {
    series
        .filter_window(window)
        .iter()
        .map(chicama_types::QuoteTick::size_imbalance)
        .sum()
}

/// Terminal price: mid-quote of the last record, or `0.0` for an empty
/// series (explicitly guarded, unlike the return computation).
#[must_use]
pub fn terminal_price(series: &DailyQuotes) -> f64 {
    series.ticks().last().map_or(0.0, |t| t.mid_quote)
}

/// Size-weighted average mid-quote over a time window.
///
/// Weights each mid-quote by the record's posted size (bid + ask) and
/// divides by the window's total size; returns `0.0` when the window's
/// total size is zero. Kept for completeness and trade-data work; the
/// batch pipeline does not call it.
///
/// # Errors
///
/// Returns an error if either `"HH:MM"` label is malformed.
pub fn vwap(series: &DailyQuotes, start: &str, end: &str) -> Result<f64, TimeLabelError> {
    let filtered = series.filter_time_range(start, end)?;

    let total_size: i64 = filtered.iter().map(chicama_types::QuoteTick::total_size).sum();
    if total_size == 0 {
        return Ok(0.0);
    }

    let total_value: f64 = filtered
        .iter()
        .map(|t| t.mid_quote * t.total_size() as f64)
        .sum();
    Ok(total_value / total_size as f64)
}

/// The five per-day features of one (stock, date) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    /// Mid-quote return series at the default stride.
    pub two_minute_returns: Vec<f64>,
    /// Total posted size.
    pub total_volume: i64,
    /// Mean mid-quote over the first five records.
    pub arrival_price: f64,
    /// Net bid-minus-ask size over the session window.
    pub imbalance: i64,
    /// Mid-quote of the last record.
    pub terminal_price: f64,
}

impl FeatureSet {
    /// Yields the features as `(identifier, value)` pairs in canonical
    /// order.
    #[must_use]
    pub fn values(&self) -> Vec<(Feature, FeatureValue)> {
        vec![
            (
                Feature::TwoMinuteReturns,
                FeatureValue::Returns(self.two_minute_returns.clone()),
            ),
            (Feature::TotalVolume, FeatureValue::Size(self.total_volume)),
            (
                Feature::ArrivalPrice,
                FeatureValue::Scalar(self.arrival_price),
            ),
            (Feature::Imbalance, FeatureValue::Size(self.imbalance)),
            (
                Feature::TerminalPrice,
                FeatureValue::Scalar(self.terminal_price),
            ),
        ]
    }
}

/// Computes all five features over one daily series.
///
/// # Errors
///
/// Returns an error if the series is empty or a return reference
/// mid-quote is zero.
pub fn compute_all(series: &DailyQuotes) -> Result<FeatureSet, FeatureError> {
    Ok(FeatureSet {
        two_minute_returns: two_minute_returns(series, RETURN_INTERVAL)?,
        total_volume: total_volume(series),
        arrival_price: arrival_price(series)?,
        imbalance: imbalance(series),
        terminal_price: terminal_price(series),
    })
}
