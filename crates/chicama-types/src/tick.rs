//! Tick data representation.

use serde::{Deserialize, Serialize};

/// Milliseconds in one trading day.
pub const MILLIS_PER_DAY: i32 = 86_400_000;

/// A single quote tick for one stock.
///
/// Timestamps are milliseconds since midnight of the trading day, exactly
/// as stored in the TAQ file. Prices are not validated: a zero or negative
/// bid/ask propagates unchanged into the derived mid-quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteTick {
    /// Milliseconds from midnight.
    pub timestamp_millis: i32,
    /// Bid price.
    pub bid_price: f64,
    /// Size available at the bid.
    pub bid_size: i32,
    /// Ask (offer) price.
    pub ask_price: f64,
    /// Size available at the ask.
    pub ask_size: i32,
    /// Mid-quote, derived as `(bid_price + ask_price) / 2`.
    pub mid_quote: f64,
}

impl QuoteTick {
    /// Creates a new quote tick with the mid-quote derived from bid/ask.
    #[must_use]
    pub fn new(
        timestamp_millis: i32,
        bid_price: f64,
        bid_size: i32,
        ask_price: f64,
        ask_size: i32,
    ) -> Self {
        Self {
            timestamp_millis,
            bid_price,
            bid_size,
            ask_price,
            ask_size,
            mid_quote: (bid_price + ask_price) / 2.0,
        }
    }

    /// Returns the mid price (average of bid and ask).
    #[must_use]
    pub fn mid(&self) -> f64 {
        (self.bid_price + self.ask_price) / 2.0
    }

    /// Returns the spread (ask - bid).
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.ask_price - self.bid_price
    }

    /// Returns the size posted on both sides of the quote.
    #[must_use]
    pub const fn total_size(&self) -> i64 {
        self.bid_size as i64 + self.ask_size as i64
    }

    /// Returns bid size minus ask size.
    #[must_use]
    pub const fn size_imbalance(&self) -> i64 {
        self.bid_size as i64 - self.ask_size as i64
    }
}

/// A single trade tick for one stock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeTick {
    /// Milliseconds from midnight.
    pub timestamp_millis: i32,
    /// Execution price.
    pub price: f64,
    /// Executed size.
    pub size: i32,
}

impl TradeTick {
    /// Creates a new trade tick.
    #[must_use]
    pub const fn new(timestamp_millis: i32, price: f64, size: i32) -> Self {
        Self {
            timestamp_millis,
            price,
            size,
        }
    }

    /// Returns the notional value (price * size).
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.price * f64::from(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_mid_price() {
        let tick = QuoteTick::new(34_200_000, 100.0, 50, 102.0, 40);
        assert!((tick.mid() - 101.0).abs() < 1e-12);
        assert!((tick.mid_quote - 101.0).abs() < 1e-12);
    }

    #[test]
    fn test_quote_spread() {
        let tick = QuoteTick::new(34_200_000, 100.0, 50, 102.0, 40);
        assert!((tick.spread() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_quote_sizes() {
        let tick = QuoteTick::new(34_200_000, 100.0, 50, 102.0, 40);
        assert_eq!(tick.total_size(), 90);
        assert_eq!(tick.size_imbalance(), 10);
    }

    #[test]
    fn test_negative_price_propagates() {
        // No positivity validation: the mid of a crossed/bad quote is kept.
        let tick = QuoteTick::new(0, -1.0, 10, 1.0, 10);
        assert_eq!(tick.mid_quote, 0.0);
    }

    #[test]
    fn test_trade_notional() {
        let tick = TradeTick::new(34_210_000, 116.27, 76_600);
        assert!((tick.notional() - 116.27 * 76_600.0).abs() < 1e-6);
    }
}
