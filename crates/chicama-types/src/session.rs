//! Session time labels and windows.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::TimeLabelError;

/// A wall-clock time-of-day label of the form `"HH:MM"`.
///
/// Converts to milliseconds from midnight via `(hours*60 + minutes) * 60_000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeLabel {
    hours: u8,
    minutes: u8,
}

impl TimeLabel {
    /// Creates a time label, validating the hour and minute ranges.
    ///
    /// # Errors
    ///
    /// Returns an error if `hours > 23` or `minutes > 59`.
    pub const fn new(hours: u8, minutes: u8) -> Result<Self, TimeLabelError> {
        if hours > 23 || minutes > 59 {
            return Err(TimeLabelError::OutOfRange { hours, minutes });
        }
        Ok(Self { hours, minutes })
    }

    /// Returns milliseconds from midnight.
    #[must_use]
    pub const fn millis(&self) -> i32 {
        (self.hours as i32 * 60 + self.minutes as i32) * 60_000
    }
}

impl FromStr for TimeLabel {
    type Err = TimeLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| TimeLabelError::Malformed(s.to_string()))?;
        let hours = h
            .parse::<u8>()
            .map_err(|_| TimeLabelError::Malformed(s.to_string()))?;
        let minutes = m
            .parse::<u8>()
            .map_err(|_| TimeLabelError::Malformed(s.to_string()))?;
        Self::new(hours, minutes)
    }
}

impl std::fmt::Display for TimeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

impl TryFrom<String> for TimeLabel {
    type Error = TimeLabelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeLabel> for String {
    fn from(label: TimeLabel) -> Self {
        label.to_string()
    }
}

/// An inclusive time-of-day window within one trading session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindow {
    /// Window start (inclusive).
    pub start: TimeLabel,
    /// Window end (inclusive).
    pub end: TimeLabel,
}

impl SessionWindow {
    /// Creates a session window. The window is not required to be
    /// non-empty; `start > end` simply matches nothing.
    #[must_use]
    pub const fn new(start: TimeLabel, end: TimeLabel) -> Self {
        Self { start, end }
    }

    /// Parses a window from two `"HH:MM"` labels.
    ///
    /// # Errors
    ///
    /// Returns an error if either label is malformed.
    pub fn parse(start: &str, end: &str) -> Result<Self, TimeLabelError> {
        Ok(Self::new(start.parse()?, end.parse()?))
    }

    /// The 09:30-15:30 window used for the order-flow imbalance feature.
    #[must_use]
    pub const fn imbalance_default() -> Self {
        // new() cannot fail for these constants
        Self {
            start: TimeLabel {
                hours: 9,
                minutes: 30,
            },
            end: TimeLabel {
                hours: 15,
                minutes: 30,
            },
        }
    }

    /// Returns true if `timestamp_millis` lies inside the window,
    /// both bounds inclusive.
    #[must_use]
    pub const fn contains(&self, timestamp_millis: i32) -> bool {
        self.start.millis() <= timestamp_millis && timestamp_millis <= self.end.millis()
    }
}

impl std::fmt::Display for SessionWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_millis() {
        let label: TimeLabel = "09:30".parse().unwrap();
        assert_eq!(label.millis(), 34_200_000);
        let label: TimeLabel = "15:30".parse().unwrap();
        assert_eq!(label.millis(), 55_800_000);
        let label: TimeLabel = "00:00".parse().unwrap();
        assert_eq!(label.millis(), 0);
    }

    #[test]
    fn test_label_display_roundtrip() {
        let label: TimeLabel = "9:05".parse().unwrap();
        assert_eq!(label.to_string(), "09:05");
    }

    #[test]
    fn test_malformed_labels() {
        assert!(matches!(
            "930".parse::<TimeLabel>(),
            Err(TimeLabelError::Malformed(_))
        ));
        assert!(matches!(
            "9:3x".parse::<TimeLabel>(),
            Err(TimeLabelError::Malformed(_))
        ));
        assert!(matches!(
            "".parse::<TimeLabel>(),
            Err(TimeLabelError::Malformed(_))
        ));
    }

    #[test]
    fn test_out_of_range_labels() {
        assert!(matches!(
            "25:00".parse::<TimeLabel>(),
            Err(TimeLabelError::OutOfRange { .. })
        ));
        assert!(matches!(
            "12:60".parse::<TimeLabel>(),
            Err(TimeLabelError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_window_contains_inclusive() {
        let window = SessionWindow::parse("09:30", "15:30").unwrap();
        assert!(window.contains(34_200_000));
        assert!(window.contains(55_800_000));
        assert!(window.contains(40_000_000));
        assert!(!window.contains(34_199_999));
        assert!(!window.contains(55_800_001));
    }

    #[test]
    fn test_imbalance_default_window() {
        let window = SessionWindow::imbalance_default();
        assert_eq!(window, SessionWindow::parse("09:30", "15:30").unwrap());
    }
}
