//! Feature matrix and its transposed date×stock tables.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use chicama_features::FeatureSet;
use chicama_types::{Feature, FeatureValue};

/// Composite cell key: one feature of one stock on one date.
pub type MatrixKey = (Feature, String, NaiveDate);

/// All computed feature cells of a batch run, behind a single
/// composite-key map.
///
/// `BTreeMap` ordering makes every derived view independent of the order
/// in which concurrent units complete. Cells for units that were never
/// tried, or that failed, are simply absent (never zero).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureMatrix {
    cells: BTreeMap<MatrixKey, FeatureValue>,
}

impl FeatureMatrix {
    /// Creates an empty matrix.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: BTreeMap::new(),
        }
    }

    /// Returns the number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if no cells have been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Inserts one cell.
    pub fn insert(&mut self, feature: Feature, stock: &str, date: NaiveDate, value: FeatureValue) {
        self.cells.insert((feature, stock.to_string(), date), value);
    }

    /// Inserts all five features of one (stock, date) unit.
    pub fn insert_set(&mut self, stock: &str, date: NaiveDate, set: &FeatureSet) {
        for (feature, value) in set.values() {
            self.insert(feature, stock, date, value);
        }
    }

    /// Returns one cell, if present.
    #[must_use]
    pub fn get(&self, feature: Feature, stock: &str, date: NaiveDate) -> Option<&FeatureValue> {
        self.cells.get(&(feature, stock.to_string(), date))
    }

    /// Returns the sorted distinct stocks appearing in the matrix.
    #[must_use]
    pub fn stocks(&self) -> Vec<String> {
        let mut stocks: Vec<String> = self
            .cells
            .keys()
            .map(|(_, stock, _)| stock.clone())
            .collect();
        stocks.sort_unstable();
        stocks.dedup();
        stocks
    }

    /// Returns the sorted distinct dates appearing in the matrix.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.cells.keys().map(|(_, _, date)| *date).collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }

    /// Transposes one feature into its date-indexed, stock-column table.
    #[must_use]
    pub fn table(&self, feature: Feature) -> FeatureTable {
        let mut cells = BTreeMap::new();
        let mut stocks = Vec::new();
        let mut dates = Vec::new();

        for ((f, stock, date), value) in &self.cells {
            if *f != feature {
                continue;
            }
            stocks.push(stock.clone());
            dates.push(*date);
            cells.insert((*date, stock.clone()), value.clone());
        }

        stocks.sort_unstable();
        stocks.dedup();
        dates.sort_unstable();
        dates.dedup();

        FeatureTable {
            feature,
            dates,
            stocks,
            cells,
        }
    }
}

/// One feature's rectangular date×stock view: dates ascending as rows,
/// sorted stock columns, absent cells where a unit was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    feature: Feature,
    dates: Vec<NaiveDate>,
    stocks: Vec<String>,
    cells: BTreeMap<(NaiveDate, String), FeatureValue>,
}

impl FeatureTable {
    /// Returns the feature this table holds.
    #[must_use]
    pub const fn feature(&self) -> Feature {
        self.feature
    }

    /// Returns the row dates, ascending.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Returns the column stocks, sorted.
    #[must_use]
    pub fn stocks(&self) -> &[String] {
        &self.stocks
    }

    /// Returns one cell, if present.
    #[must_use]
    pub fn get(&self, date: NaiveDate, stock: &str) -> Option<&FeatureValue> {
        self.cells.get(&(date, stock.to_string()))
    }

    /// Yields rows as `(date, cells-in-stock-order)` pairs.
    pub fn rows(&self) -> impl Iterator<Item = (NaiveDate, Vec<Option<&FeatureValue>>)> {
        self.dates.iter().map(|date| {
            let row = self
                .stocks
                .iter()
                .map(|stock| self.cells.get(&(*date, stock.clone())))
                .collect();
            (*date, row)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y%m%d").unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let mut matrix = FeatureMatrix::new();
        matrix.insert(
            Feature::TotalVolume,
            "AAPL",
            date("20070920"),
            FeatureValue::Size(511),
        );

        assert_eq!(
            matrix.get(Feature::TotalVolume, "AAPL", date("20070920")),
            Some(&FeatureValue::Size(511))
        );
        assert_eq!(
            matrix.get(Feature::TotalVolume, "MSFT", date("20070920")),
            None
        );
    }

    #[test]
    fn test_insertion_order_is_irrelevant() {
        let mut forward = FeatureMatrix::new();
        forward.insert(Feature::Imbalance, "AAPL", date("20070920"), FeatureValue::Size(1));
        forward.insert(Feature::Imbalance, "MSFT", date("20070921"), FeatureValue::Size(2));

        let mut reverse = FeatureMatrix::new();
        reverse.insert(Feature::Imbalance, "MSFT", date("20070921"), FeatureValue::Size(2));
        reverse.insert(Feature::Imbalance, "AAPL", date("20070920"), FeatureValue::Size(1));

        assert_eq!(forward, reverse);
        assert_eq!(
            forward.table(Feature::Imbalance),
            reverse.table(Feature::Imbalance)
        );
    }

    #[test]
    fn test_table_sorted_dates_and_absent_cells() {
        let mut matrix = FeatureMatrix::new();
        matrix.insert(
            Feature::TotalVolume,
            "MSFT",
            date("20070921"),
            FeatureValue::Size(2),
        );
        matrix.insert(
            Feature::TotalVolume,
            "AAPL",
            date("20070920"),
            FeatureValue::Size(1),
        );

        let table = matrix.table(Feature::TotalVolume);
        assert_eq!(table.dates(), &[date("20070920"), date("20070921")]);
        assert_eq!(table.stocks(), &["AAPL".to_string(), "MSFT".to_string()]);

        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].1, vec![Some(&FeatureValue::Size(1)), None]);
        assert_eq!(rows[1].1, vec![None, Some(&FeatureValue::Size(2))]);
    }

    #[test]
    fn test_table_filters_by_feature() {
        let mut matrix = FeatureMatrix::new();
        matrix.insert(
            Feature::TotalVolume,
            "AAPL",
            date("20070920"),
            FeatureValue::Size(1),
        );
        matrix.insert(
            Feature::Imbalance,
            "AAPL",
            date("20070920"),
            FeatureValue::Size(-3),
        );

        let table = matrix.table(Feature::Imbalance);
        assert_eq!(
            table.get(date("20070920"), "AAPL"),
            Some(&FeatureValue::Size(-3))
        );
    }
}
