//! Error types for session time labels.

use thiserror::Error;

/// Error for malformed `"HH:MM"` time labels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeLabelError {
    /// The label is not of the form `HH:MM`.
    #[error("Malformed time label: {0:?} (expected \"HH:MM\")")]
    Malformed(String),

    /// Hour or minute outside the valid range.
    #[error("Time label out of range: {hours:02}:{minutes:02}")]
    OutOfRange {
        /// The parsed hour component.
        hours: u8,
        /// The parsed minute component.
        minutes: u8,
    },
}
