//! Columnar readers for the daily TAQ binary layout.
//!
//! Both file kinds are gzip-compressed and big-endian throughout, with a
//! shared header followed by fixed-width parallel columns:
//!
//! ```text
//! quote file (.binRQ):
//!   [i32 secs_from_epoch_to_midnight][i32 n]
//!   [n x i32 millis-from-midnight][n x i32 bid sizes][n x i32 ask sizes]
//!   [n x f32 bid prices][n x f32 ask prices]
//!
//! trade file (.binRT):
//!   [i32 secs_from_epoch_to_midnight][i32 n]
//!   [n x i32 millis-from-midnight][n x i32 sizes][n x f32 prices]
//! ```
//!
//! The quote column order follows the structural symmetry with the trade
//! layout; it is the single place the layout is spelled out, so a fixture
//! mismatch is a one-line fix here.

use byteorder::{BigEndian, ByteOrder};
use thiserror::Error;

use chicama_types::{QuoteTick, TradeTick};

use crate::decompress::{DecompressError, decompress_gz};

/// Errors that can occur while decoding a tick file.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Decompression failed.
    #[error(transparent)]
    Decompress(#[from] DecompressError),

    /// Decompressed payload shorter than the header-declared record count
    /// requires.
    #[error("Truncated tick file: need {expected} bytes, have {actual}")]
    Truncated {
        /// Bytes required by the header-declared count.
        expected: usize,
        /// Bytes actually present after decompression.
        actual: usize,
    },

    /// Header declares a negative record count.
    #[error("Invalid record count: {0}")]
    NegativeCount(i32),

    /// Record payload length is not a multiple of the record size.
    #[error("Invalid data length: {0} bytes (expected multiple of {1})")]
    InvalidLength(usize, usize),

    /// I/O error reading the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error for out-of-range tick access.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Tick index {index} out of range (len {len})")]
pub struct IndexError {
    /// The requested index.
    pub index: usize,
    /// The number of records in the file.
    pub len: usize,
}

/// Decoded tick file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickHeader {
    /// Seconds from the Unix epoch to midnight of the trading day.
    pub secs_from_epoch_to_midnight: i32,
    /// Number of records in the file.
    pub len: u32,
}

impl TickHeader {
    /// Size in bytes of the on-disk header.
    pub const SIZE: usize = 8;

    /// Milliseconds from the Unix epoch to midnight of the trading day.
    #[must_use]
    pub const fn base_millis(&self) -> i64 {
        self.secs_from_epoch_to_midnight as i64 * 1000
    }

    fn parse(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < Self::SIZE {
            return Err(DecodeError::Truncated {
                expected: Self::SIZE,
                actual: data.len(),
            });
        }
        let secs = BigEndian::read_i32(&data[0..4]);
        let n = BigEndian::read_i32(&data[4..8]);
        if n < 0 {
            return Err(DecodeError::NegativeCount(n));
        }
        Ok(Self {
            secs_from_epoch_to_midnight: secs,
            len: n as u32,
        })
    }
}

/// Common capability interface over the quote and trade readers.
///
/// The two variants differ only in the record shape they yield.
pub trait TickReader {
    /// The record shape this reader yields.
    type Tick;

    /// Returns the decoded file header.
    fn header(&self) -> TickHeader;

    /// Returns the number of records in the file.
    fn len(&self) -> usize;

    /// Returns true if the file holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index >= len()`.
    fn tick_at(&self, index: usize) -> Result<Self::Tick, IndexError>;
}

fn check_index(index: usize, len: usize) -> Result<(), IndexError> {
    if index < len {
        Ok(())
    } else {
        Err(IndexError { index, len })
    }
}

fn read_i32_column(data: &[u8], offset: usize, n: usize) -> Vec<i32> {
    let mut column = vec![0i32; n];
    BigEndian::read_i32_into(&data[offset..offset + 4 * n], &mut column);
    column
}

fn read_f32_column(data: &[u8], offset: usize, n: usize) -> Vec<f32> {
    let mut column = vec![0f32; n];
    BigEndian::read_f32_into(&data[offset..offset + 4 * n], &mut column);
    column
}

/// Reader for one stock-day of quotes.
///
/// Fully materializes and parses the file on construction; accessors are
/// plain column lookups afterwards.
#[derive(Debug, Clone)]
pub struct QuoteReader {
    header: TickHeader,
    timestamps: Vec<i32>,
    bid_sizes: Vec<i32>,
    ask_sizes: Vec<i32>,
    bid_prices: Vec<f32>,
    ask_prices: Vec<f32>,
}

impl QuoteReader {
    /// Bytes per record across the five columns.
    pub const RECORD_SIZE: usize = 20;

    /// Decodes a gzip-compressed quote file from a byte buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if decompression fails or the payload is shorter
    /// than the header-declared record count requires.
    pub fn from_bytes(compressed: &[u8]) -> Result<Self, DecodeError> {
        let data = decompress_gz(compressed)?;
        Self::from_decompressed(&data)
    }

    /// Decodes a gzip-compressed quote file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or a malformed payload.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, DecodeError> {
        let compressed = std::fs::read(path)?;
        Self::from_bytes(&compressed)
    }

    fn from_decompressed(data: &[u8]) -> Result<Self, DecodeError> {
        let header = TickHeader::parse(data)?;
        let n = header.len as usize;

        let expected = TickHeader::SIZE + n * Self::RECORD_SIZE;
        if data.len() < expected {
            return Err(DecodeError::Truncated {
                expected,
                actual: data.len(),
            });
        }

        let mut offset = TickHeader::SIZE;
        let timestamps = read_i32_column(data, offset, n);
        offset += 4 * n;
        let bid_sizes = read_i32_column(data, offset, n);
        offset += 4 * n;
        let ask_sizes = read_i32_column(data, offset, n);
        offset += 4 * n;
        let bid_prices = read_f32_column(data, offset, n);
        offset += 4 * n;
        let ask_prices = read_f32_column(data, offset, n);

        Ok(Self {
            header,
            timestamps,
            bid_sizes,
            ask_sizes,
            bid_prices,
            ask_prices,
        })
    }

    /// Returns the millis-from-midnight timestamp at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn timestamp_at(&self, index: usize) -> Result<i32, IndexError> {
        check_index(index, self.timestamps.len())?;
        Ok(self.timestamps[index])
    }

    /// Returns the bid size at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn bid_size_at(&self, index: usize) -> Result<i32, IndexError> {
        check_index(index, self.bid_sizes.len())?;
        Ok(self.bid_sizes[index])
    }

    /// Returns the ask size at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn ask_size_at(&self, index: usize) -> Result<i32, IndexError> {
        check_index(index, self.ask_sizes.len())?;
        Ok(self.ask_sizes[index])
    }

    /// Returns the bid price at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn bid_price_at(&self, index: usize) -> Result<f64, IndexError> {
        check_index(index, self.bid_prices.len())?;
        Ok(f64::from(self.bid_prices[index]))
    }

    /// Returns the ask price at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn ask_price_at(&self, index: usize) -> Result<f64, IndexError> {
        check_index(index, self.ask_prices.len())?;
        Ok(f64::from(self.ask_prices[index]))
    }

    /// Consumes the reader into the ordered tick sequence, exactly as
    /// stored in the file (no re-sorting).
    #[must_use]
    pub fn into_ticks(self) -> Vec<QuoteTick> {
        (0..self.timestamps.len())
            .map(|i| {
                QuoteTick::new(
                    self.timestamps[i],
                    f64::from(self.bid_prices[i]),
                    self.bid_sizes[i],
                    f64::from(self.ask_prices[i]),
                    self.ask_sizes[i],
                )
            })
            .collect()
    }
}

impl TickReader for QuoteReader {
    type Tick = QuoteTick;

    fn header(&self) -> TickHeader {
        self.header
    }

    fn len(&self) -> usize {
        self.timestamps.len()
    }

    fn tick_at(&self, index: usize) -> Result<QuoteTick, IndexError> {
        check_index(index, self.timestamps.len())?;
        Ok(QuoteTick::new(
            self.timestamps[index],
            f64::from(self.bid_prices[index]),
            self.bid_sizes[index],
            f64::from(self.ask_prices[index]),
            self.ask_sizes[index],
        ))
    }
}

/// Reader for one stock-day of trades.
#[derive(Debug, Clone)]
pub struct TradeReader {
    header: TickHeader,
    timestamps: Vec<i32>,
    sizes: Vec<i32>,
    prices: Vec<f32>,
}

impl TradeReader {
    /// Bytes per record across the three columns.
    pub const RECORD_SIZE: usize = 12;

    /// Decodes a gzip-compressed trade file from a byte buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if decompression fails or the payload is shorter
    /// than the header-declared record count requires.
    pub fn from_bytes(compressed: &[u8]) -> Result<Self, DecodeError> {
        let data = decompress_gz(compressed)?;
        Self::from_decompressed(&data)
    }

    /// Decodes a gzip-compressed trade file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or a malformed payload.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, DecodeError> {
        let compressed = std::fs::read(path)?;
        Self::from_bytes(&compressed)
    }

    fn from_decompressed(data: &[u8]) -> Result<Self, DecodeError> {
        let header = TickHeader::parse(data)?;
        let n = header.len as usize;

        let expected = TickHeader::SIZE + n * Self::RECORD_SIZE;
        if data.len() < expected {
            return Err(DecodeError::Truncated {
                expected,
                actual: data.len(),
            });
        }

        let mut offset = TickHeader::SIZE;
        let timestamps = read_i32_column(data, offset, n);
        offset += 4 * n;
        let sizes = read_i32_column(data, offset, n);
        offset += 4 * n;
        let prices = read_f32_column(data, offset, n);

        Ok(Self {
            header,
            timestamps,
            sizes,
            prices,
        })
    }

    /// Returns the millis-from-midnight timestamp at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn timestamp_at(&self, index: usize) -> Result<i32, IndexError> {
        check_index(index, self.timestamps.len())?;
        Ok(self.timestamps[index])
    }

    /// Returns the trade size at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn size_at(&self, index: usize) -> Result<i32, IndexError> {
        check_index(index, self.sizes.len())?;
        Ok(self.sizes[index])
    }

    /// Returns the trade price at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn price_at(&self, index: usize) -> Result<f64, IndexError> {
        check_index(index, self.prices.len())?;
        Ok(f64::from(self.prices[index]))
    }

    /// Returns an iterator over the ticks in file order.
    pub fn ticks(&self) -> impl Iterator<Item = TradeTick> + '_ {
        (0..self.timestamps.len())
            .map(|i| TradeTick::new(self.timestamps[i], f64::from(self.prices[i]), self.sizes[i]))
    }

    /// Consumes the reader into the ordered tick sequence.
    #[must_use]
    pub fn into_ticks(self) -> Vec<TradeTick> {
        (0..self.timestamps.len())
            .map(|i| TradeTick::new(self.timestamps[i], f64::from(self.prices[i]), self.sizes[i]))
            .collect()
    }
}

impl TickReader for TradeReader {
    type Tick = TradeTick;

    fn header(&self) -> TickHeader {
        self.header
    }

    fn len(&self) -> usize {
        self.timestamps.len()
    }

    fn tick_at(&self, index: usize) -> Result<TradeTick, IndexError> {
        check_index(index, self.timestamps.len())?;
        Ok(TradeTick::new(
            self.timestamps[index],
            f64::from(self.prices[index]),
            self.sizes[index],
        ))
    }
}
