//! Trade re-emission codec.
//!
//! Re-emits a decoded trade day as a flat stream of fixed-width records,
//! one per tick, big-endian:
//!
//! ```text
//! [u64 absolute millis-from-epoch][u16 instrument id][u32 size][f32 price]
//! ```
//!
//! Absolute timestamps are `header.base_millis() + millis_from_midnight`,
//! so the re-emitted stream is self-contained across days. The stream is
//! gzip-compressed on disk like the source files.

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

use crate::decompress::{compress_gz, decompress_gz};
use crate::reader::{DecodeError, TickReader, TradeReader};

/// One re-emitted trade record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeRecord {
    /// Milliseconds from the Unix epoch.
    pub timestamp_millis: u64,
    /// Numeric instrument identifier assigned at re-emission.
    pub instrument_id: u16,
    /// Executed size.
    pub size: u32,
    /// Execution price.
    pub price: f32,
}

impl TradeRecord {
    /// Size in bytes of a packed record.
    pub const SIZE: usize = 18;
}

/// Converts a decoded trade day into absolute-timestamped records.
#[must_use]
pub fn rewrite_records(reader: &TradeReader, instrument_id: u16) -> Vec<TradeRecord> {
    let base = reader.header().base_millis();
    reader
        .ticks()
        .map(|tick| TradeRecord {
            timestamp_millis: (base + i64::from(tick.timestamp_millis)) as u64,
            instrument_id,
            size: tick.size as u32,
            price: tick.price as f32,
        })
        .collect()
}

/// Packs records into the fixed-width layout and gzip-compresses them.
///
/// # Errors
///
/// Returns an error if compression fails.
pub fn write_records(records: &[TradeRecord]) -> std::io::Result<Vec<u8>> {
    let mut data = Vec::with_capacity(records.len() * TradeRecord::SIZE);
    for record in records {
        data.write_u64::<BigEndian>(record.timestamp_millis)?;
        data.write_u16::<BigEndian>(record.instrument_id)?;
        data.write_u32::<BigEndian>(record.size)?;
        data.write_f32::<BigEndian>(record.price)?;
    }
    compress_gz(&data)
}

/// Writes re-emitted records to a file.
///
/// # Errors
///
/// Returns an error if compression or the write fails.
pub fn write_records_to_path(
    records: &[TradeRecord],
    path: impl AsRef<std::path::Path>,
) -> std::io::Result<()> {
    std::fs::write(path, write_records(records)?)
}

/// Decodes a gzip-compressed re-emitted record stream.
///
/// # Errors
///
/// Returns an error if decompression fails or the payload length is not a
/// multiple of the record size.
pub fn read_records(compressed: &[u8]) -> Result<Vec<TradeRecord>, DecodeError> {
    let data = decompress_gz(compressed)?;
    if !data.len().is_multiple_of(TradeRecord::SIZE) {
        return Err(DecodeError::InvalidLength(data.len(), TradeRecord::SIZE));
    }

    Ok(data
        .chunks_exact(TradeRecord::SIZE)
        .map(|chunk| TradeRecord {
            timestamp_millis: BigEndian::read_u64(&chunk[0..8]),
            instrument_id: BigEndian::read_u16(&chunk[8..10]),
            size: BigEndian::read_u32(&chunk[10..14]),
            price: BigEndian::read_f32(&chunk[14..18]),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::test_fixtures::trade_file_bytes;

    const MIDNIGHT: i32 = 1_190_260_800;

    #[test]
    fn test_rewrite_roundtrip() {
        let bytes = trade_file_bytes(
            MIDNIGHT,
            &[
                (34_210_000, 76_600, 116.27),
                (34_215_000, 500, 116.31),
                (34_220_000, 1_200, 116.25),
            ],
        );
        let reader = TradeReader::from_bytes(&bytes).unwrap();
        let records = rewrite_records(&reader, 42);

        let compressed = write_records(&records).unwrap();
        let decoded = read_records(&compressed).unwrap();

        assert_eq!(decoded, records);
        for (i, record) in decoded.iter().enumerate() {
            assert_eq!(record.instrument_id, 42);
            assert_eq!(record.size as i32, reader.size_at(i).unwrap());
            assert_eq!(f64::from(record.price), reader.price_at(i).unwrap());
            assert_eq!(
                record.timestamp_millis as i64,
                reader.header().base_millis() + i64::from(reader.timestamp_at(i).unwrap())
            );
        }
    }

    #[test]
    fn test_first_absolute_timestamp() {
        let bytes = trade_file_bytes(MIDNIGHT, &[(34_210_000, 76_600, 116.27)]);
        let reader = TradeReader::from_bytes(&bytes).unwrap();
        let records = rewrite_records(&reader, 1);
        assert_eq!(records[0].timestamp_millis, 1_190_295_010_000);
    }

    #[test]
    fn test_read_rejects_partial_record() {
        let compressed = compress_gz(&[0u8; TradeRecord::SIZE + 5]).unwrap();
        let result = read_records(&compressed);
        assert!(matches!(result, Err(DecodeError::InvalidLength(23, 18))));
    }

    #[test]
    fn test_empty_stream() {
        let compressed = write_records(&[]).unwrap();
        assert!(read_records(&compressed).unwrap().is_empty());
    }
}
