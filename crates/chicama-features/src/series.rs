//! Daily quote series.

use chicama_types::{QuoteTick, SessionWindow, TimeLabelError};

/// The ordered quote ticks of one (stock, date) pair.
///
/// Ticks are kept exactly in file order (timestamps are non-decreasing as
/// stored; the series never re-sorts). The series is built once from a
/// decoded file, consumed by the feature functions, and then dropped; it
/// is never mutated after feature extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyQuotes {
    ticks: Vec<QuoteTick>,
}

impl DailyQuotes {
    /// Wraps an ordered tick sequence.
    #[must_use]
    pub const fn new(ticks: Vec<QuoteTick>) -> Self {
        Self { ticks }
    }

    /// Returns the number of ticks.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.ticks.len()
    }

    /// Returns true if the series holds no ticks.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Returns the underlying ticks.
    #[must_use]
    pub fn ticks(&self) -> &[QuoteTick] {
        &self.ticks
    }

    /// Returns an iterator over the ticks.
    pub fn iter(&self) -> std::slice::Iter<'_, QuoteTick> {
        self.ticks.iter()
    }

    /// Derives the mid-quote on every record, in place.
    ///
    /// Idempotent: re-running recomputes the same `(bid + ask) / 2` value.
    pub fn with_mid_quote(&mut self) {
        for tick in &mut self.ticks {
            tick.mid_quote = (tick.bid_price + tick.ask_price) / 2.0;
        }
    }

    /// Returns the ordered subsequence whose timestamps fall inside the
    /// `[start, end]` window, both bounds inclusive.
    ///
    /// # Errors
    ///
    /// Returns an error if either `"HH:MM"` label is malformed.
    pub fn filter_time_range(&self, start: &str, end: &str) -> Result<Self, TimeLabelError> {
        let window = SessionWindow::parse(start, end)?;
        Ok(self.filter_window(window))
    }

    /// Returns the ordered subsequence inside an already-parsed window.
    #[must_use]
    pub fn filter_window(&self, window: SessionWindow) -> Self {
        Self {
            ticks: self
                .ticks
                .iter()
                .filter(|tick| window.contains(tick.timestamp_millis))
                .copied()
                .collect(),
        }
    }
}

impl From<Vec<QuoteTick>> for DailyQuotes {
    fn from(ticks: Vec<QuoteTick>) -> Self {
        Self::new(ticks)
    }
}

impl<'a> IntoIterator for &'a DailyQuotes {
    type Item = &'a QuoteTick;
    type IntoIter = std::slice::Iter<'a, QuoteTick>;

    fn into_iter(self) -> Self::IntoIter {
        self.ticks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(ts: i32, bid: f64, ask: f64) -> QuoteTick {
        QuoteTick::new(ts, bid, 10, ask, 10)
    }

    #[test]
    fn test_with_mid_quote_idempotent() {
        let mut series = DailyQuotes::new(vec![tick(0, 100.0, 102.0), tick(1, 101.0, 103.0)]);
        series.with_mid_quote();
        let first = series.clone();
        series.with_mid_quote();
        assert_eq!(series, first);
        for t in &series {
            assert_eq!(t.mid_quote, (t.bid_price + t.ask_price) / 2.0);
        }
    }

    #[test]
    fn test_filter_time_range_inclusive_bounds() {
        let series = DailyQuotes::new(vec![
            tick(34_199_999, 1.0, 1.0),
            tick(34_200_000, 2.0, 2.0),
            tick(40_000_000, 3.0, 3.0),
            tick(55_800_000, 4.0, 4.0),
            tick(55_800_001, 5.0, 5.0),
        ]);
        let filtered = series.filter_time_range("09:30", "15:30").unwrap();
        let stamps: Vec<i32> = filtered.iter().map(|t| t.timestamp_millis).collect();
        assert_eq!(stamps, vec![34_200_000, 40_000_000, 55_800_000]);
    }

    #[test]
    fn test_filter_preserves_order() {
        let series = DailyQuotes::new(vec![
            tick(40_000_000, 1.0, 1.0),
            tick(39_000_000, 2.0, 2.0),
        ]);
        let filtered = series.filter_time_range("09:30", "15:30").unwrap();
        let stamps: Vec<i32> = filtered.iter().map(|t| t.timestamp_millis).collect();
        assert_eq!(stamps, vec![40_000_000, 39_000_000]);
    }

    #[test]
    fn test_filter_malformed_label() {
        let series = DailyQuotes::default();
        assert!(series.filter_time_range("0930", "15:30").is_err());
        assert!(series.filter_time_range("09:30", "15-30").is_err());
    }
}
