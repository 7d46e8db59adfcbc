//! Workspace-level error taxonomy.

use chicama_decode::{DecodeError, IndexError};
use chicama_features::FeatureError;
use chicama_types::TimeLabelError;
use thiserror::Error;

/// Result type alias for chicama operations.
pub type Result<T> = std::result::Result<T, ChicamaError>;

/// Errors that can occur during decoding and feature extraction.
///
/// Each workspace crate reports its own error type; this enum wraps them
/// for callers that drive the whole pipeline through one `Result`.
#[derive(Error, Debug)]
pub enum ChicamaError {
    /// Malformed or truncated binary tick payload.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Out-of-range tick access.
    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    /// Malformed configuration (time labels, paths, dates).
    #[error("Config error: {0}")]
    Config(#[from] TimeLabelError),

    /// Feature computation failure.
    #[error("Feature error: {0}")]
    Feature(#[from] FeatureError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chicama_decode::QuoteReader;
    use chicama_features::{DailyQuotes, arrival_price};
    use chicama_types::TimeLabel;

    #[test]
    fn test_decode_conversion() {
        let decode = || -> Result<QuoteReader> { Ok(QuoteReader::from_bytes(&[0x1f, 0x8b])?) };
        let err = decode().unwrap_err();
        assert!(matches!(err, ChicamaError::Decode(_)));
        assert!(err.to_string().starts_with("Decode error:"));
    }

    #[test]
    fn test_index_conversion() {
        let err: ChicamaError = IndexError { index: 5, len: 3 }.into();
        assert!(matches!(err, ChicamaError::Index(IndexError { index: 5, len: 3 })));
        assert_eq!(err.to_string(), "Index error: Tick index 5 out of range (len 3)");
    }

    #[test]
    fn test_config_conversion() {
        let parse = || -> Result<TimeLabel> { Ok("9:3x".parse::<TimeLabel>()?) };
        let err = parse().unwrap_err();
        assert!(matches!(err, ChicamaError::Config(_)));
        assert!(err.to_string().starts_with("Config error:"));
    }

    #[test]
    fn test_feature_conversion() {
        let compute = || -> Result<f64> { Ok(arrival_price(&DailyQuotes::new(Vec::new()))?) };
        let err = compute().unwrap_err();
        assert!(matches!(err, ChicamaError::Feature(FeatureError::EmptyInput)));
    }

    #[test]
    fn test_whole_pipeline_result() {
        fn session_mid(label: &str) -> Result<f64> {
            let series = DailyQuotes::new(Vec::new());
            let filtered = series.filter_time_range(label, "16:00")?;
            Ok(arrival_price(&filtered)?)
        }

        assert!(matches!(
            session_mid("930").unwrap_err(),
            ChicamaError::Config(_)
        ));
        assert!(matches!(
            session_mid("09:30").unwrap_err(),
            ChicamaError::Feature(FeatureError::EmptyInput)
        ));
    }
}
