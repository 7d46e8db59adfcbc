//! Gzip decompression for TAQ tick files.

use flate2::read::GzDecoder;
use std::io::Read;
use thiserror::Error;

/// Errors that can occur during decompression.
#[derive(Error, Debug)]
pub enum DecompressError {
    /// Gzip inflate failed.
    #[error("Gzip decompression failed: {0}")]
    Gzip(String),

    /// Empty input data.
    #[error("Empty input data")]
    EmptyInput,
}

/// Decompresses a gzip-compressed TAQ payload fully into memory.
///
/// Daily tick files hold at most a few tens of thousands of records per
/// stock, so the whole file is materialized; there is no streaming path.
///
/// # Errors
///
/// Returns an error if the input is empty or not valid gzip.
pub fn decompress_gz(compressed: &[u8]) -> Result<Vec<u8>, DecompressError> {
    if compressed.is_empty() {
        return Err(DecompressError::EmptyInput);
    }

    let mut decompressed = Vec::new();
    GzDecoder::new(compressed)
        .read_to_end(&mut decompressed)
        .map_err(|e| DecompressError::Gzip(e.to_string()))?;

    Ok(decompressed)
}

/// Gzip-compresses a payload, the inverse of [`decompress_gz`].
///
/// Used by the trade re-emission codec and by tests building fixtures.
///
/// # Errors
///
/// Returns an error if compression fails.
pub fn compress_gz(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let result = decompress_gz(&[]);
        assert!(matches!(result, Err(DecompressError::EmptyInput)));
    }

    #[test]
    fn test_invalid_gzip() {
        let result = decompress_gz(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecompressError::Gzip(_))));
    }

    #[test]
    fn test_roundtrip() {
        let payload = b"taq tick payload".to_vec();
        let compressed = compress_gz(&payload).unwrap();
        assert_eq!(decompress_gz(&compressed).unwrap(), payload);
    }
}
