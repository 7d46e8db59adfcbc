//! Batch driver: the per-(date, stock) decode -> compute sweep.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use thiserror::Error;

use chicama_decode::{DecodeError, QuoteReader};
use chicama_features::{DailyQuotes, FeatureError, FeatureSet, compute_all};

use crate::matrix::FeatureMatrix;
use crate::universe::{QUOTE_FILE_SUFFIX, Universe};

/// Configuration of a batch run.
///
/// The data directory is passed in explicitly; there is no process-wide
/// base-path state.
#[derive(Debug, Clone)]
pub struct MatrixConfig {
    /// Root directory holding one `YYYYMMDD` subdirectory per date.
    pub data_dir: PathBuf,
    /// The stock universe to sweep.
    pub universe: Universe,
    /// Maximum number of (stock, date) units decoded concurrently.
    pub concurrency: usize,
}

impl MatrixConfig {
    /// Default unit concurrency.
    pub const DEFAULT_CONCURRENCY: usize = 8;

    /// Creates a configuration with the default concurrency.
    pub fn new(data_dir: impl Into<PathBuf>, universe: Universe) -> Self {
        Self {
            data_dir: data_dir.into(),
            universe,
            concurrency: Self::DEFAULT_CONCURRENCY,
        }
    }

    /// Sets the unit concurrency.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// Fatal batch failures: configuration and environment defects, as
/// opposed to per-unit data-quality gaps (which are skipped).
#[derive(Error, Debug)]
pub enum BuildError {
    /// Reading the data directory tree failed.
    #[error("I/O error under {path}: {source}")]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The data directory holds no `YYYYMMDD` date subdirectories.
    #[error("No date directories under {0}")]
    NoDateDirectories(PathBuf),

    /// A worker task panicked.
    #[error("Worker failure: {0}")]
    Worker(String),
}

/// Why one (stock, date) unit produced no cells.
#[derive(Error, Debug)]
pub enum UnitError {
    /// The quote file was missing, truncated, or malformed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Feature computation failed.
    #[error(transparent)]
    Feature(#[from] FeatureError),
}

/// One skipped (stock, date) unit.
#[derive(Debug)]
pub struct SkippedCell {
    /// The stock symbol.
    pub stock: String,
    /// The trading date.
    pub date: NaiveDate,
    /// Why the unit was skipped.
    pub reason: UnitError,
}

/// Summary of a completed batch run.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Number of (stock, date) units attempted.
    pub total_units: usize,
    /// Units that produced no cells, with their reasons.
    pub skipped: Vec<SkippedCell>,
}

impl BuildReport {
    /// Number of units that produced cells.
    #[must_use]
    pub const fn ok_units(&self) -> usize {
        self.total_units - self.skipped.len()
    }
}

/// One unit of work: a stock's quote file on one date.
#[derive(Debug, Clone)]
struct Unit {
    date: NaiveDate,
    stock: String,
    path: PathBuf,
}

/// Drives the date×stock sweep and assembles the feature matrix.
#[derive(Debug, Clone)]
pub struct MatrixBuilder {
    config: MatrixConfig,
}

impl MatrixBuilder {
    /// Creates a builder from a configuration.
    #[must_use]
    pub const fn new(config: MatrixConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &MatrixConfig {
        &self.config
    }

    /// Runs the sweep concurrently, fanning units out over a blocking
    /// worker pool.
    ///
    /// The resulting matrix is identical regardless of completion order;
    /// only the final ordered insert is shared between units.
    ///
    /// # Errors
    ///
    /// Returns an error on configuration/environment defects. Per-unit
    /// decode or feature failures do not abort the run; they are recorded
    /// in the [`BuildReport`] and those cells stay absent.
    pub async fn build(&self) -> Result<(FeatureMatrix, BuildReport), BuildError> {
        self.build_with_progress(|| {}).await
    }

    /// Like [`build`](Self::build), invoking `progress` once per
    /// completed unit.
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub async fn build_with_progress<F>(
        &self,
        progress: F,
    ) -> Result<(FeatureMatrix, BuildReport), BuildError>
    where
        F: Fn(),
    {
        let units = self.units()?;
        let total_units = units.len();

        let mut results = stream::iter(units)
            .map(|unit| async move {
                tokio::task::spawn_blocking(move || {
                    let outcome = process_unit(&unit.path);
                    (unit, outcome)
                })
                .await
            })
            .buffer_unordered(self.config.concurrency);

        let mut matrix = FeatureMatrix::new();
        let mut skipped = Vec::new();

        while let Some(joined) = results.next().await {
            let (unit, outcome) = joined.map_err(|e| BuildError::Worker(e.to_string()))?;
            collect_unit(&mut matrix, &mut skipped, unit, outcome);
            progress();
        }

        Ok((
            matrix,
            BuildReport {
                total_units,
                skipped,
            },
        ))
    }

    /// Sequential reference path: same sweep and skip policy, one unit at
    /// a time.
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn build_blocking(&self) -> Result<(FeatureMatrix, BuildReport), BuildError> {
        let units = self.units()?;
        let total_units = units.len();

        let mut matrix = FeatureMatrix::new();
        let mut skipped = Vec::new();

        for unit in units {
            let outcome = process_unit(&unit.path);
            collect_unit(&mut matrix, &mut skipped, unit, outcome);
        }

        Ok((
            matrix,
            BuildReport {
                total_units,
                skipped,
            },
        ))
    }

    /// Enumerates (date, stock) units in ascending date order.
    fn units(&self) -> Result<Vec<Unit>, BuildError> {
        let mut units = Vec::new();
        for (date, dir) in self.date_directories()? {
            let symbols = self
                .config
                .universe
                .resolve(&dir)
                .map_err(|source| BuildError::Io {
                    path: dir.clone(),
                    source,
                })?;
            for stock in symbols {
                let path = dir.join(format!("{stock}{QUOTE_FILE_SUFFIX}"));
                units.push(Unit { date, stock, path });
            }
        }
        Ok(units)
    }

    fn date_directories(&self) -> Result<Vec<(NaiveDate, PathBuf)>, BuildError> {
        let entries = std::fs::read_dir(&self.config.data_dir).map_err(|source| BuildError::Io {
            path: self.config.data_dir.clone(),
            source,
        })?;

        let mut dirs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| BuildError::Io {
                path: self.config.data_dir.clone(),
                source,
            })?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            // Date directories are named YYYYMMDD; anything else is not ours.
            if let Ok(date) = NaiveDate::parse_from_str(name, "%Y%m%d") {
                dirs.push((date, entry.path()));
            }
        }

        if dirs.is_empty() {
            return Err(BuildError::NoDateDirectories(self.config.data_dir.clone()));
        }
        dirs.sort_unstable_by_key(|(date, _)| *date);
        Ok(dirs)
    }
}

/// Decodes and computes one (stock, date) unit. The series lives only for
/// the duration of this call, so peak memory stays bounded by the largest
/// single stock-day.
fn process_unit(path: &Path) -> Result<FeatureSet, UnitError> {
    let reader = QuoteReader::from_path(path)?;
    let mut series = DailyQuotes::new(reader.into_ticks());
    series.with_mid_quote();
    Ok(compute_all(&series)?)
}

fn collect_unit(
    matrix: &mut FeatureMatrix,
    skipped: &mut Vec<SkippedCell>,
    unit: Unit,
    outcome: Result<FeatureSet, UnitError>,
) {
    match outcome {
        Ok(set) => matrix.insert_set(&unit.stock, unit.date, &set),
        Err(reason) => skipped.push(SkippedCell {
            stock: unit.stock,
            date: unit.date,
            reason,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use byteorder::{BigEndian, WriteBytesExt};
    use chicama_types::{Feature, FeatureValue};
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    fn quote_file_bytes(secs: i32, records: &[(i32, i32, i32, f32, f32)]) -> Vec<u8> {
        let mut data = Vec::new();
        data.write_i32::<BigEndian>(secs).unwrap();
        data.write_i32::<BigEndian>(records.len() as i32).unwrap();
        for r in records {
            data.write_i32::<BigEndian>(r.0).unwrap();
        }
        for r in records {
            data.write_i32::<BigEndian>(r.1).unwrap();
        }
        for r in records {
            data.write_i32::<BigEndian>(r.2).unwrap();
        }
        for r in records {
            data.write_f32::<BigEndian>(r.3).unwrap();
        }
        for r in records {
            data.write_f32::<BigEndian>(r.4).unwrap();
        }
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&data).unwrap();
        encoder.finish().unwrap()
    }

    /// Two dates, one good stock; `MISS` has no file and `TRNC` a
    /// truncated one on the second date.
    fn fixture_tree() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let records = [
            (34_200_000, 50, 40, 100.0, 102.0),
            (34_320_000, 60, 45, 101.0, 103.0),
            (34_440_000, 55, 50, 102.0, 104.0),
        ];

        for date in ["20070920", "20070921"] {
            let dir = root.path().join(date);
            std::fs::create_dir(&dir).unwrap();
            std::fs::write(
                dir.join("GOOD_quotes.binRQ"),
                quote_file_bytes(1_190_260_800, &records),
            )
            .unwrap();
        }

        let mut truncated = quote_file_bytes(1_190_260_800, &records);
        truncated.truncate(truncated.len() / 2);
        std::fs::write(
            root.path().join("20070921").join("TRNC_quotes.binRQ"),
            truncated,
        )
        .unwrap();

        root
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y%m%d").unwrap()
    }

    #[test]
    fn test_blocking_build_skips_and_continues() {
        let root = fixture_tree();
        let config = MatrixConfig::new(
            root.path(),
            Universe::fixed(["GOOD", "MISS", "TRNC"]),
        );
        let (matrix, report) = MatrixBuilder::new(config).build_blocking().unwrap();

        // 3 stocks x 2 dates attempted; GOOD succeeds twice, MISS is
        // absent twice, TRNC exists (truncated) only on the second date.
        assert_eq!(report.total_units, 6);
        assert_eq!(report.ok_units(), 2);
        assert_eq!(report.skipped.len(), 4);

        let volume = matrix.get(Feature::TotalVolume, "GOOD", date("20070920"));
        assert_eq!(volume, Some(&FeatureValue::Size(300)));
        assert!(matrix.get(Feature::TotalVolume, "MISS", date("20070920")).is_none());
        assert!(matrix.get(Feature::TotalVolume, "TRNC", date("20070921")).is_none());

        let arrival = matrix
            .get(Feature::ArrivalPrice, "GOOD", date("20070921"))
            .and_then(FeatureValue::as_scalar)
            .unwrap();
        assert_relative_eq!(arrival, 102.0);
    }

    #[test]
    fn test_blocking_build_feature_values() {
        let root = fixture_tree();
        let config = MatrixConfig::new(root.path(), Universe::fixed(["GOOD"]));
        let (matrix, report) = MatrixBuilder::new(config).build_blocking().unwrap();
        assert!(report.skipped.is_empty());

        let d = date("20070920");
        assert_eq!(
            matrix.get(Feature::Imbalance, "GOOD", d),
            Some(&FeatureValue::Size(30))
        );
        assert_eq!(
            matrix.get(Feature::TwoMinuteReturns, "GOOD", d),
            Some(&FeatureValue::Returns(Vec::new()))
        );
        let terminal = matrix
            .get(Feature::TerminalPrice, "GOOD", d)
            .and_then(FeatureValue::as_scalar)
            .unwrap();
        assert_relative_eq!(terminal, 103.0);
    }

    #[test]
    fn test_directory_universe_sweep() {
        let root = fixture_tree();
        let config = MatrixConfig::new(root.path(), Universe::from_directory());
        let (matrix, report) = MatrixBuilder::new(config).build_blocking().unwrap();

        // GOOD on both dates, TRNC listed (and skipped) on the second.
        assert_eq!(report.total_units, 3);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(matrix.stocks(), vec!["GOOD".to_string()]);
        assert_eq!(matrix.dates(), vec![date("20070920"), date("20070921")]);
    }

    #[tokio::test]
    async fn test_async_build_matches_blocking() {
        let root = fixture_tree();
        let config = MatrixConfig::new(
            root.path(),
            Universe::fixed(["GOOD", "MISS", "TRNC"]),
        )
        .with_concurrency(4);
        let builder = MatrixBuilder::new(config);

        let (blocking, _) = builder.build_blocking().unwrap();
        let (concurrent, report) = builder.build().await.unwrap();

        assert_eq!(blocking, concurrent);
        assert_eq!(report.total_units, 6);
    }

    #[tokio::test]
    async fn test_progress_called_per_unit() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let root = fixture_tree();
        let config = MatrixConfig::new(root.path(), Universe::fixed(["GOOD"]));
        let builder = MatrixBuilder::new(config);

        let counter = AtomicUsize::new(0);
        builder
            .build_with_progress(|| {
                counter.fetch_add(1, Ordering::Relaxed);
            })
            .await
            .unwrap();
        assert_eq!(counter.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_missing_data_dir_is_fatal() {
        let config = MatrixConfig::new("/nonexistent/extracted", Universe::from_directory());
        assert!(matches!(
            MatrixBuilder::new(config).build_blocking(),
            Err(BuildError::Io { .. })
        ));
    }

    #[test]
    fn test_no_date_directories_is_fatal() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("not-a-date")).unwrap();
        let config = MatrixConfig::new(root.path(), Universe::from_directory());
        assert!(matches!(
            MatrixBuilder::new(config).build_blocking(),
            Err(BuildError::NoDateDirectories(_))
        ));
    }
}
