//! Stock universe enumeration.

use std::path::Path;

/// File name suffix of per-stock daily quote files.
pub const QUOTE_FILE_SUFFIX: &str = "_quotes.binRQ";

/// File name suffix of per-stock daily trade files.
pub const TRADE_FILE_SUFFIX: &str = "_trades.binRT";

/// The set of stock symbols a batch run covers.
///
/// Injected into the builder rather than hardcoded: either an externally
/// supplied fixed list, or derived from the files present in a date
/// directory by stripping the quote-file suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Universe {
    /// An externally supplied symbol list, used as given.
    Fixed(Vec<String>),
    /// Symbols derived by listing a date directory.
    FromDirectory {
        /// File name suffix stripped from each entry.
        suffix: String,
    },
}

impl Universe {
    /// Creates a fixed universe from a symbol list.
    #[must_use]
    pub fn fixed<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Fixed(symbols.into_iter().map(Into::into).collect())
    }

    /// Creates a directory-derived universe with the default quote-file
    /// suffix.
    #[must_use]
    pub fn from_directory() -> Self {
        Self::FromDirectory {
            suffix: QUOTE_FILE_SUFFIX.to_string(),
        }
    }

    /// Resolves the symbol list for one date directory.
    ///
    /// A fixed universe resolves to its list unchanged. A
    /// directory-derived universe lists the files whose names end with the
    /// suffix, strips it, and sorts the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory-derived universe cannot read the
    /// date directory.
    pub fn resolve(&self, date_dir: &Path) -> std::io::Result<Vec<String>> {
        match self {
            Self::Fixed(symbols) => Ok(symbols.clone()),
            Self::FromDirectory { suffix } => {
                let mut symbols = Vec::new();
                for entry in std::fs::read_dir(date_dir)? {
                    let entry = entry?;
                    let name = entry.file_name();
                    let Some(name) = name.to_str() else { continue };
                    if let Some(symbol) = name.strip_suffix(suffix.as_str())
                        && !symbol.is_empty()
                    {
                        symbols.push(symbol.to_string());
                    }
                }
                symbols.sort_unstable();
                Ok(symbols)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_resolve() {
        let universe = Universe::fixed(["AAPL", "MSFT"]);
        let symbols = universe.resolve(Path::new("/nonexistent")).unwrap();
        assert_eq!(symbols, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_from_directory_resolve() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "MSFT_quotes.binRQ",
            "AAPL_quotes.binRQ",
            "AAPL_trades.binRT",
            "notes.txt",
        ] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let universe = Universe::from_directory();
        let symbols = universe.resolve(dir.path()).unwrap();
        assert_eq!(symbols, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_from_directory_missing_dir() {
        let universe = Universe::from_directory();
        assert!(universe.resolve(Path::new("/nonexistent")).is_err());
    }
}
