//! Multi-column tabular data with deterministic column order.
//!
//! The [`Dataset`] type stores kind-tagged columns in an `IndexMap`, so
//! columns always iterate in insertion order. Rows are implicitly indexed
//! `0..N-1`; position is load order unless the dataset is explicitly
//! re-sorted.

use core::cmp::Ordering;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::column::{Column, ColumnKind};
use crate::error::{DatasetError, Result};
use crate::num::PrepFloat;
use crate::series::Series;

/// An ordered collection of named, kind-tagged columns of equal length.
///
/// Deterministic column iteration order matters for reproducible output
/// files and deterministic tests, so columns live in an `IndexMap`.
///
/// # Example
///
/// ```rust
/// use quantprep_core::{Dataset, Series};
///
/// let mut ds: Dataset<f64> = Dataset::new();
/// ds.set_numeric("close", Series::from_vec(vec![100.0, 101.0, 102.0])).unwrap();
/// ds.set_numeric("volume", Series::from_vec(vec![1000.0, 1100.0, 1200.0])).unwrap();
///
/// assert_eq!(ds.len(), 3);
/// assert_eq!(ds.column_names(), vec!["close", "volume"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "T: PrepFloat")]
pub struct Dataset<T: PrepFloat> {
    columns: IndexMap<String, Column<T>>,
}

impl<T: PrepFloat> Default for Dataset<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PrepFloat> Dataset<T> {
    /// Create a new empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            columns: IndexMap::new(),
        }
    }

    /// Create a dataset with pre-allocated capacity for columns.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: IndexMap::with_capacity(capacity),
        }
    }

    /// Create a dataset from a list of (name, column) pairs.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate names or mismatched column lengths.
    pub fn from_columns(columns: Vec<(String, Column<T>)>) -> Result<Self> {
        let mut ds = Self::with_capacity(columns.len());
        for (name, column) in columns {
            ds.add_column(name, column)?;
        }
        Ok(ds)
    }

    /// Returns the number of rows in the dataset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.values().next().map_or(0, Column::len)
    }

    /// Returns `true` if the dataset has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the column names in insertion order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Check if a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Get a reference to a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column<T>> {
        self.columns.get(name)
    }

    /// Get the declared kind of a column.
    #[must_use]
    pub fn kind(&self, name: &str) -> Option<ColumnKind> {
        self.columns.get(name).map(Column::kind)
    }

    /// Get a numeric column by name, if it exists and is numeric.
    #[must_use]
    pub fn numeric(&self, name: &str) -> Option<&Series<T>> {
        self.columns.get(name).and_then(Column::as_numeric)
    }

    /// Get a datetime column by name, if it exists and is datetime.
    #[must_use]
    pub fn datetime(&self, name: &str) -> Option<&[Option<NaiveDate>]> {
        self.columns.get(name).and_then(Column::as_datetime)
    }

    /// Names of all numeric columns, in insertion order.
    ///
    /// This is a derived view, recomputed from column kinds on every call;
    /// adding or dropping columns can never leave it stale.
    #[must_use]
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|(_, c)| c.kind() == ColumnKind::Numeric)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Add a new column at the end of the column order.
    ///
    /// # Errors
    ///
    /// Returns an error if a column with the same name already exists or if
    /// the column length doesn't match the existing row count.
    pub fn add_column(&mut self, name: impl Into<String>, column: Column<T>) -> Result<()> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(DatasetError::DuplicateColumn(name));
        }
        if !self.columns.is_empty() && column.len() != self.len() {
            return Err(DatasetError::LengthMismatch {
                expected: self.len(),
                actual: column.len(),
            });
        }
        self.columns.insert(name, column);
        Ok(())
    }

    /// Add or replace a column.
    ///
    /// A replaced column keeps its position; a new column is appended.
    ///
    /// # Errors
    ///
    /// Returns an error if the column length doesn't match the row count.
    pub fn set_column(&mut self, name: impl Into<String>, column: Column<T>) -> Result<()> {
        let name = name.into();
        let replacing_only_column = self.columns.len() == 1 && self.columns.contains_key(&name);
        if !self.columns.is_empty() && !replacing_only_column && column.len() != self.len() {
            return Err(DatasetError::LengthMismatch {
                expected: self.len(),
                actual: column.len(),
            });
        }
        self.columns.insert(name, column);
        Ok(())
    }

    /// Add or replace a numeric column.
    ///
    /// # Errors
    ///
    /// Returns an error if the series length doesn't match the row count.
    pub fn set_numeric(&mut self, name: impl Into<String>, series: Series<T>) -> Result<()> {
        self.set_column(name, Column::Numeric(series))
    }

    /// Remove and return a column by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the column doesn't exist.
    pub fn drop_column(&mut self, name: &str) -> Result<Column<T>> {
        self.columns
            .shift_remove(name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
    }

    /// Returns an iterator over (column_name, column) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column<T>)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build a new dataset with rows taken in the order of `indices`.
    ///
    /// Row positions reset to `0..indices.len()`.
    #[must_use]
    pub fn take_rows(&self, indices: &[usize]) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|(name, col)| (name.clone(), col.take(indices)))
            .collect();
        Self { columns }
    }

    /// Build a new dataset keeping only rows where `mask` is `true`.
    #[must_use]
    pub fn retain_rows(&self, mask: &[bool]) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|(name, col)| (name.clone(), col.retain(mask)))
            .collect();
        Self { columns }
    }

    /// Stable-sort rows ascending by a datetime column and reset positions.
    ///
    /// Missing dates sort after all present dates; ties keep their current
    /// relative order.
    ///
    /// # Errors
    ///
    /// Returns an error if the column is absent or not a datetime column.
    pub fn sort_by_datetime(&self, name: &str) -> Result<Self> {
        let column = self
            .columns
            .get(name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))?;
        let dates = column.as_datetime().ok_or_else(|| DatasetError::KindMismatch {
            column: name.to_string(),
            expected: ColumnKind::Datetime,
            actual: column.kind(),
        })?;

        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&a, &b| match (dates[a], dates[b]) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        Ok(self.take_rows(&order))
    }
}

impl<T: PrepFloat> PartialEq for Dataset<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.columns.len() != other.columns.len() {
            return false;
        }
        // Column order is part of dataset identity
        self.columns
            .iter()
            .zip(other.columns.iter())
            .all(|((k1, v1), (k2, v2))| k1 == k2 && v1 == v2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn sample() -> Dataset<f64> {
        let mut ds = Dataset::new();
        ds.add_column(
            "date",
            Column::Datetime(vec![date(2024, 1, 3), date(2024, 1, 1), date(2024, 1, 2)]),
        )
        .unwrap();
        ds.set_numeric("close", Series::from_vec(vec![103.0, 101.0, 102.0]))
            .unwrap();
        ds.add_column(
            "ticker",
            Column::Categorical(vec![
                Some("AAA".to_string()),
                Some("BBB".to_string()),
                None,
            ]),
        )
        .unwrap();
        ds
    }

    #[test]
    fn test_empty_dataset() {
        let ds: Dataset<f64> = Dataset::new();
        assert!(ds.is_empty());
        assert_eq!(ds.len(), 0);
        assert_eq!(ds.column_count(), 0);
    }

    #[test]
    fn test_add_column_length_mismatch() {
        let mut ds: Dataset<f64> = Dataset::new();
        ds.set_numeric("a", Series::from_vec(vec![1.0, 2.0, 3.0]))
            .unwrap();

        let result = ds.add_column("b", Column::Numeric(Series::from_vec(vec![1.0])));
        assert!(matches!(
            result,
            Err(DatasetError::LengthMismatch {
                expected: 3,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_add_column_duplicate() {
        let mut ds: Dataset<f64> = Dataset::new();
        ds.add_column("a", Column::Numeric(Series::from_vec(vec![1.0])))
            .unwrap();

        let result = ds.add_column("a", Column::Numeric(Series::from_vec(vec![2.0])));
        assert!(matches!(result, Err(DatasetError::DuplicateColumn(_))));
    }

    #[test]
    fn test_set_column_replaces_in_place() {
        let mut ds: Dataset<f64> = Dataset::new();
        ds.set_numeric("a", Series::from_vec(vec![1.0])).unwrap();
        ds.set_numeric("b", Series::from_vec(vec![2.0])).unwrap();
        ds.set_numeric("a", Series::from_vec(vec![9.0])).unwrap();

        assert_eq!(ds.column_names(), vec!["a", "b"]);
        assert_eq!(ds.numeric("a").unwrap()[0], 9.0);
    }

    #[test]
    fn test_numeric_column_names_recomputed() {
        let mut ds = sample();
        assert_eq!(ds.numeric_column_names(), vec!["close"]);

        // Adding a numeric column is visible on the next call.
        ds.set_numeric("volume", Series::from_vec(vec![1.0, 2.0, 3.0]))
            .unwrap();
        assert_eq!(ds.numeric_column_names(), vec!["close", "volume"]);

        ds.drop_column("close").unwrap();
        assert_eq!(ds.numeric_column_names(), vec!["volume"]);
    }

    #[test]
    fn test_kind_lookup() {
        let ds = sample();
        assert_eq!(ds.kind("date"), Some(ColumnKind::Datetime));
        assert_eq!(ds.kind("close"), Some(ColumnKind::Numeric));
        assert_eq!(ds.kind("ticker"), Some(ColumnKind::Categorical));
        assert_eq!(ds.kind("nope"), None);
    }

    #[test]
    fn test_take_rows_resets_positions() {
        let ds = sample();
        let taken = ds.take_rows(&[2, 0]);

        assert_eq!(taken.len(), 2);
        assert_eq!(taken.numeric("close").unwrap().as_slice(), &[102.0, 103.0]);
        assert_eq!(taken.datetime("date").unwrap()[0], date(2024, 1, 2));
    }

    #[test]
    fn test_retain_rows() {
        let ds = sample();
        let kept = ds.retain_rows(&[true, false, true]);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept.numeric("close").unwrap().as_slice(), &[103.0, 102.0]);
    }

    #[test]
    fn test_sort_by_datetime() {
        let ds = sample();
        let sorted = ds.sort_by_datetime("date").unwrap();

        assert_eq!(sorted.numeric("close").unwrap().as_slice(), &[101.0, 102.0, 103.0]);
        // Categorical rows move with the sort
        assert_eq!(
            sorted.column("ticker").unwrap().as_categorical().unwrap()[0],
            Some("BBB".to_string())
        );
    }

    #[test]
    fn test_sort_by_datetime_missing_last() {
        let mut ds: Dataset<f64> = Dataset::new();
        ds.add_column(
            "date",
            Column::Datetime(vec![None, date(2024, 1, 2), date(2024, 1, 1)]),
        )
        .unwrap();
        ds.set_numeric("x", Series::from_vec(vec![0.0, 2.0, 1.0]))
            .unwrap();

        let sorted = ds.sort_by_datetime("date").unwrap();
        assert_eq!(sorted.numeric("x").unwrap().as_slice(), &[1.0, 2.0, 0.0]);
        assert!(sorted.datetime("date").unwrap()[2].is_none());
    }

    #[test]
    fn test_sort_by_datetime_wrong_kind() {
        let ds = sample();
        let result = ds.sort_by_datetime("close");
        assert!(matches!(result, Err(DatasetError::KindMismatch { .. })));
    }

    #[test]
    fn test_sort_by_datetime_missing_column() {
        let ds = sample();
        assert!(matches!(
            ds.sort_by_datetime("when"),
            Err(DatasetError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_column_order_is_identity() {
        let mut a: Dataset<f64> = Dataset::new();
        a.set_numeric("x", Series::from_vec(vec![1.0])).unwrap();
        a.set_numeric("y", Series::from_vec(vec![2.0])).unwrap();

        let mut b: Dataset<f64> = Dataset::new();
        b.set_numeric("y", Series::from_vec(vec![2.0])).unwrap();
        b.set_numeric("x", Series::from_vec(vec![1.0])).unwrap();

        assert_ne!(a, b);
    }
}
