//! Single-column outlier detection and treatment.
//!
//! Each function is a pure statistic over one column; none mutate in
//! place, and missing values are never flagged or invented. The decision
//! boundary used for each call is returned to the caller and not retained.

use serde::{Deserialize, Serialize};

use quantprep_core::{num::PrepFloat, series::Series, stats};

/// Default IQR multiplier for [`detect_outliers_iqr`].
pub const DEFAULT_IQR_K: f64 = 1.5;

/// Default |z| threshold for [`detect_outliers_zscore`].
pub const DEFAULT_ZSCORE_THRESHOLD: f64 = 3.0;

/// Default quantile pair for [`winsorize`].
pub const DEFAULT_WINSOR_QUANTILES: (f64, f64) = (0.01, 0.99);

/// The decision boundary of one IQR detection call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: PrepFloat")]
pub struct OutlierBounds<T: PrepFloat> {
    /// Values strictly below this are flagged.
    pub lower: T,
    /// Values strictly above this are flagged.
    pub upper: T,
}

/// Flag outliers by the IQR rule.
///
/// `Q1`/`Q3` are the 25th/75th percentiles of the non-missing values
/// (linear interpolation); a value is flagged when strictly outside
/// `[Q1 - k*IQR, Q3 + k*IQR]`. Missing values are never flagged. A column
/// with no valid values produces undefined bounds and an all-false mask.
#[must_use]
pub fn detect_outliers_iqr<T: PrepFloat>(series: &Series<T>, k: T) -> (Vec<bool>, OutlierBounds<T>) {
    let sorted = stats::sorted_valid(series);
    let q1 = stats::quantile_sorted(&sorted, 0.25);
    let q3 = stats::quantile_sorted(&sorted, 0.75);
    let iqr = q3 - q1;

    let bounds = OutlierBounds {
        lower: q1 - k * iqr,
        upper: q3 + k * iqr,
    };

    // NaN bounds compare false against everything, so a degenerate column
    // flags nothing.
    let mask = series
        .iter()
        .map(|&v| !v.is_missing() && (v < bounds.lower || v > bounds.upper))
        .collect();

    (mask, bounds)
}

/// Flag outliers by the z-score rule.
///
/// Uses the population standard deviation (divisor N); a zero deviation is
/// substituted with `1.0`. Flags where `|z| > threshold`; missing values
/// are never flagged. Returns the `(mean, std)` actually used.
#[must_use]
pub fn detect_outliers_zscore<T: PrepFloat>(series: &Series<T>, threshold: T) -> (Vec<bool>, (T, T)) {
    let mean = series.mean();
    let raw = stats::std_dev(series, 0);
    let std = if raw == T::ZERO { T::ONE } else { raw };

    let mask = series
        .iter()
        .map(|&v| {
            if v.is_missing() {
                return false;
            }
            let z = (v - mean) / std;
            z.abs() > threshold
        })
        .collect();

    (mask, (mean, std))
}

/// Winsorize a column by clipping to quantile bounds.
///
/// Computes the `lower`/`upper` quantiles of the non-missing values and
/// clips everything into `[q_low, q_high]`. Missing values pass through
/// unchanged; clipping never invents values. Returns the clipped column
/// and the quantile pair used.
#[must_use]
pub fn winsorize<T: PrepFloat>(series: &Series<T>, lower: f64, upper: f64) -> (Series<T>, (T, T)) {
    let sorted = stats::sorted_valid(series);
    let q_low = stats::quantile_sorted(&sorted, lower);
    let q_high = stats::quantile_sorted(&sorted, upper);

    (series.clamp(q_low, q_high), (q_low, q_high))
}
