//! Column normalization with an explicit fit/apply split.
//!
//! [`fit_scale`] computes per-column parameters from a reference dataset;
//! [`apply_scale`] replays frozen parameters as a pure function. Keeping
//! the two phases separate removes any ambiguity about when fitting
//! happens, which is what prevents train/test leakage: fit on the training
//! window once, then apply the same parameters to held-out data.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use quantprep_core::{
    dataset::Dataset,
    error::TransformResult,
    num::PrepFloat,
    series::Series,
    stats,
};

/// Normalization method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleMethod {
    /// `x' = (x - mean) / std`, sample standard deviation.
    ZScore,
    /// `x' = (x - min) / (max - min)`.
    MinMax,
}

/// Fitted scalars for one column.
///
/// The divisor is stored post-substitution: a degenerate fit (zero or
/// undefined spread) records `1.0`, so applying is always a plain
/// shift-and-divide.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: PrepFloat")]
pub enum ColumnScale<T: PrepFloat> {
    /// Z-score parameters.
    ZScore {
        /// Column mean, ignoring missing values.
        mean: T,
        /// Standard deviation divisor (1.0 when degenerate).
        std: T,
    },
    /// Min-max parameters.
    MinMax {
        /// Column minimum, ignoring missing values.
        min: T,
        /// Column maximum, ignoring missing values.
        max: T,
        /// Range divisor (1.0 when degenerate).
        range: T,
    },
}

impl<T: PrepFloat> ColumnScale<T> {
    /// The value subtracted before dividing.
    #[must_use]
    pub fn shift(&self) -> T {
        match self {
            Self::ZScore { mean, .. } => *mean,
            Self::MinMax { min, .. } => *min,
        }
    }

    /// The divisor, re-guarded against zero at apply time.
    #[must_use]
    pub fn divisor(&self) -> T {
        let d = match self {
            Self::ZScore { std, .. } => *std,
            Self::MinMax { range, .. } => *range,
        };
        if d == T::ZERO {
            T::ONE
        } else {
            d
        }
    }
}

/// Frozen normalization parameters: one [`ColumnScale`] per fitted column.
///
/// Produced by [`fit_scale`], held by the caller, consumed by
/// [`apply_scale`]. The parameters become stale if the dataset's column
/// semantics change; no automatic repair is attempted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: PrepFloat")]
pub struct ScaleParams<T: PrepFloat> {
    /// Method the parameters were fitted with.
    pub method: ScaleMethod,
    /// Per-column fitted scalars, in fit order.
    pub columns: IndexMap<String, ColumnScale<T>>,
}

impl<T: PrepFloat> ScaleParams<T> {
    /// Look up the fitted scalars for a column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&ColumnScale<T>> {
        self.columns.get(column)
    }
}

/// Resolve the column selection: explicit list, or all numeric columns.
fn select_columns<T: PrepFloat>(ds: &Dataset<T>, columns: Option<&[&str]>) -> Vec<String> {
    match columns {
        Some(cols) => cols.iter().map(|c| (*c).to_string()).collect(),
        None => ds.numeric_column_names(),
    }
}

/// Fit normalization parameters on a reference dataset.
///
/// Selection defaults to all numeric columns, evaluated once. Selected
/// columns are coerced to numeric first (non-numeric-looking values become
/// missing); columns that do not exist are skipped. Statistics ignore
/// missing values.
///
/// Degenerate spreads never error: a zero, undefined, or non-finite
/// standard deviation or range records a divisor of `1.0`, turning the
/// transform into a pure shift.
#[must_use]
pub fn fit_scale<T: PrepFloat>(
    ds: &Dataset<T>,
    columns: Option<&[&str]>,
    method: ScaleMethod,
) -> ScaleParams<T> {
    let mut fitted: IndexMap<String, ColumnScale<T>> = IndexMap::new();

    for name in select_columns(ds, columns) {
        let Some(column) = ds.column(&name) else {
            continue;
        };
        let series = column.to_numeric();

        let scale = match method {
            ScaleMethod::ZScore => {
                let mean = series.mean();
                let raw = stats::std_dev(&series, 1);
                let std = if raw.is_finite() && raw != T::ZERO {
                    raw
                } else {
                    T::ONE
                };
                ColumnScale::ZScore { mean, std }
            }
            ScaleMethod::MinMax => {
                let min = series.min();
                let max = series.max();
                let raw = max - min;
                let range = if raw.is_finite() && raw != T::ZERO {
                    raw
                } else {
                    T::ONE
                };
                ColumnScale::MinMax { min, max, range }
            }
        };

        fitted.insert(name, scale);
    }

    ScaleParams {
        method,
        columns: fitted,
    }
}

/// Apply frozen normalization parameters to a dataset.
///
/// A pure function of its inputs: each selected column is transformed
/// independently, so the result cannot depend on the order columns are
/// processed in. A selected column with no entry in `params` is passed
/// through with neutral parameters (shift 0, divisor 1) rather than
/// failing; this is permissive by design so a replay over a wider dataset
/// never halts. Selected columns are coerced to numeric in the output even
/// when the transform is a no-op.
///
/// # Errors
///
/// Only dataset container violations propagate; no statistical condition
/// is an error.
pub fn apply_scale<T: PrepFloat>(
    ds: &Dataset<T>,
    columns: Option<&[&str]>,
    params: &ScaleParams<T>,
) -> TransformResult<Dataset<T>> {
    let mut out = ds.clone();

    for name in select_columns(ds, columns) {
        let Some(column) = ds.column(&name) else {
            continue;
        };
        let series = column.to_numeric();

        let (shift, divisor) = match params.get(&name) {
            Some(scale) => (scale.shift(), scale.divisor()),
            None => (T::ZERO, T::ONE),
        };

        let transformed: Series<T> = series
            .iter()
            .map(|&v| {
                if v.is_missing() {
                    T::NAN
                } else {
                    (v - shift) / divisor
                }
            })
            .collect();

        out.set_numeric(name, transformed)?;
    }

    Ok(out)
}

/// Normalize selected columns, fitting or replaying parameters.
///
/// With `params` of `None`, parameters are fitted on `ds` and returned
/// alongside the transformed dataset. With `params` supplied, fitting is
/// skipped entirely and the frozen parameters are applied verbatim; the
/// same parameters are handed back. This is how train-fitted parameters
/// are reused on held-out data without leakage.
///
/// # Errors
///
/// Only dataset container violations propagate.
pub fn normalize<T: PrepFloat>(
    ds: &Dataset<T>,
    columns: Option<&[&str]>,
    method: ScaleMethod,
    params: Option<&ScaleParams<T>>,
) -> TransformResult<(Dataset<T>, ScaleParams<T>)> {
    let params = match params {
        Some(existing) => existing.clone(),
        None => fit_scale(ds, columns, method),
    };
    let transformed = apply_scale(ds, columns, &params)?;
    Ok((transformed, params))
}
