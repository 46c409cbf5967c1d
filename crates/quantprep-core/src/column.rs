//! Kind-tagged dataset columns.
//!
//! A [`Column`] carries one of three semantic kinds: numeric (NaN is the
//! missing sentinel), categorical (`Option<String>`), or datetime
//! (`Option<NaiveDate>`). The kind decides how missing values are detected
//! and how the column is coerced for numeric transforms.

use chrono::NaiveDate;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::num::PrepFloat;
use crate::series::Series;

/// The declared semantic kind of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Floating-point values; missing is NaN.
    Numeric,
    /// String labels; missing is `None`.
    Categorical,
    /// Calendar dates; missing is `None`.
    Datetime,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Categorical => write!(f, "categorical"),
            Self::Datetime => write!(f, "datetime"),
        }
    }
}

/// A single dataset column with its semantic kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: PrepFloat")]
pub enum Column<T: PrepFloat> {
    /// Numeric values.
    Numeric(Series<T>),
    /// Categorical labels.
    Categorical(Vec<Option<String>>),
    /// Calendar dates.
    Datetime(Vec<Option<NaiveDate>>),
}

impl<T: PrepFloat> Column<T> {
    /// Returns the declared kind of the column.
    #[must_use]
    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Numeric(_) => ColumnKind::Numeric,
            Self::Categorical(_) => ColumnKind::Categorical,
            Self::Datetime(_) => ColumnKind::Datetime,
        }
    }

    /// Returns the number of rows in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(s) => s.len(),
            Self::Categorical(v) => v.len(),
            Self::Datetime(v) => v.len(),
        }
    }

    /// Returns `true` if the column has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether the value at `row` is missing.
    ///
    /// Out-of-range rows count as missing.
    #[must_use]
    pub fn is_missing_at(&self, row: usize) -> bool {
        match self {
            Self::Numeric(s) => s.is_missing_at(row),
            Self::Categorical(v) => v.get(row).map_or(true, Option::is_none),
            Self::Datetime(v) => v.get(row).map_or(true, Option::is_none),
        }
    }

    /// Borrow the numeric series, if this is a numeric column.
    #[must_use]
    pub fn as_numeric(&self) -> Option<&Series<T>> {
        match self {
            Self::Numeric(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the categorical labels, if this is a categorical column.
    #[must_use]
    pub fn as_categorical(&self) -> Option<&[Option<String>]> {
        match self {
            Self::Categorical(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the dates, if this is a datetime column.
    #[must_use]
    pub fn as_datetime(&self) -> Option<&[Option<NaiveDate>]> {
        match self {
            Self::Datetime(v) => Some(v),
            _ => None,
        }
    }

    /// Coerce the column to a numeric series.
    ///
    /// Numeric columns are cloned. Categorical values are parsed as floats,
    /// with non-numeric-looking labels coerced to missing. Datetime values
    /// coerce to missing wholesale.
    #[must_use]
    pub fn to_numeric(&self) -> Series<T> {
        match self {
            Self::Numeric(s) => s.clone(),
            Self::Categorical(v) => v
                .iter()
                .map(|opt| {
                    opt.as_deref()
                        .and_then(|s| s.trim().parse::<f64>().ok())
                        .map_or(T::NAN, T::from_f64_lossy)
                })
                .collect(),
            Self::Datetime(v) => Series::missing(v.len()),
        }
    }

    /// Build a new column with rows taken in the order of `indices`.
    #[must_use]
    pub fn take(&self, indices: &[usize]) -> Self {
        match self {
            Self::Numeric(s) => {
                Self::Numeric(indices.iter().map(|&i| s[i]).collect())
            }
            Self::Categorical(v) => {
                Self::Categorical(indices.iter().map(|&i| v[i].clone()).collect())
            }
            Self::Datetime(v) => Self::Datetime(indices.iter().map(|&i| v[i]).collect()),
        }
    }

    /// Build a new column keeping only rows where `mask` is `true`.
    ///
    /// `mask` must be at least as long as the column.
    #[must_use]
    pub fn retain(&self, mask: &[bool]) -> Self {
        match self {
            Self::Numeric(s) => Self::Numeric(
                s.iter()
                    .zip(mask)
                    .filter(|(_, &keep)| keep)
                    .map(|(&v, _)| v)
                    .collect(),
            ),
            Self::Categorical(v) => Self::Categorical(
                v.iter()
                    .zip(mask)
                    .filter(|(_, &keep)| keep)
                    .map(|(v, _)| v.clone())
                    .collect(),
            ),
            Self::Datetime(v) => Self::Datetime(
                v.iter()
                    .zip(mask)
                    .filter(|(_, &keep)| keep)
                    .map(|(&v, _)| v)
                    .collect(),
            ),
        }
    }
}

impl<T: PrepFloat> From<Series<T>> for Column<T> {
    fn from(series: Series<T>) -> Self {
        Self::Numeric(series)
    }
}
