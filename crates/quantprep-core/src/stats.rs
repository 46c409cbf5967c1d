//! NaN-ignoring scalar statistics.
//!
//! These helpers back the fit passes of normalization, imputation, and
//! outlier detection. All of them skip missing values; an input with no
//! valid values yields missing, never an error.

use crate::num::PrepFloat;
use crate::series::Series;

/// Collect the non-missing values of a series, sorted ascending.
#[must_use]
pub fn sorted_valid<T: PrepFloat>(series: &Series<T>) -> Vec<T> {
    let mut values: Vec<T> = series.iter_valid().collect();
    values.sort_by(|a, b| a.total_cmp_fn(b));
    values
}

/// Compute a quantile from pre-sorted values using linear interpolation
/// (the R-7 method, matching numpy's default).
///
/// Returns missing for an empty slice.
#[must_use]
pub fn quantile_sorted<T: PrepFloat>(sorted: &[T], q: f64) -> T {
    let n = sorted.len();
    if n == 0 {
        return T::NAN;
    }
    if n == 1 {
        return sorted[0];
    }

    // R-7: index = (n - 1) * q
    let index = (n - 1) as f64 * q;
    let lo = index.floor() as usize;
    let hi = index.ceil() as usize;
    let frac = T::from_f64_lossy(index - lo as f64);

    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] * (T::ONE - frac) + sorted[hi] * frac
    }
}

/// Compute a quantile of the non-missing values of a series.
#[must_use]
pub fn quantile<T: PrepFloat>(series: &Series<T>, q: f64) -> T {
    quantile_sorted(&sorted_valid(series), q)
}

/// Compute the median (50th percentile) of the non-missing values.
#[must_use]
pub fn median<T: PrepFloat>(series: &Series<T>) -> T {
    quantile(series, 0.5)
}

/// Compute the variance of the non-missing values.
///
/// `ddof` is the delta degrees of freedom: 0 for the population variance,
/// 1 for the sample variance (Bessel's correction). Returns missing when
/// fewer than `ddof + 1` valid values are present.
#[must_use]
pub fn variance<T: PrepFloat>(series: &Series<T>, ddof: usize) -> T {
    let mean = series.mean();
    if mean.is_missing() {
        return T::NAN;
    }

    let mut sum_sq = T::ZERO;
    let mut count = 0usize;
    for v in series.iter_valid() {
        let diff = v - mean;
        sum_sq = sum_sq + diff * diff;
        count += 1;
    }

    if count <= ddof {
        T::NAN
    } else {
        sum_sq / T::from_usize(count - ddof)
    }
}

/// Compute the standard deviation of the non-missing values.
///
/// See [`variance`] for the `ddof` convention.
#[must_use]
pub fn std_dev<T: PrepFloat>(series: &Series<T>, ddof: usize) -> T {
    variance(series, ddof).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quantile_r7_interpolation() {
        let values: Vec<f64> = (1..=9).map(|x| x as f64).collect();

        // index = 8 * 0.25 = 2.0 -> value at index 2
        assert_relative_eq!(quantile_sorted(&values, 0.25), 3.0, epsilon = 1e-10);
        assert_relative_eq!(quantile_sorted(&values, 0.5), 5.0, epsilon = 1e-10);
        assert_relative_eq!(quantile_sorted(&values, 0.75), 7.0, epsilon = 1e-10);
    }

    #[test]
    fn test_quantile_interpolates_between_points() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        // index = 3 * 0.5 = 1.5 -> halfway between 2 and 3
        assert_relative_eq!(quantile_sorted(&values, 0.5), 2.5, epsilon = 1e-10);
    }

    #[test]
    fn test_quantile_degenerate_inputs() {
        let empty: Vec<f64> = Vec::new();
        assert!(quantile_sorted(&empty, 0.5).is_nan());
        assert_eq!(quantile_sorted(&[7.0], 0.25), 7.0);
    }

    #[test]
    fn test_median_ignores_missing() {
        let series: Series<f64> = Series::from_vec(vec![3.0, f64::NAN, 1.0, 2.0, f64::NAN]);
        assert_relative_eq!(median(&series), 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_median_all_missing() {
        let series: Series<f64> = Series::missing(3);
        assert!(median(&series).is_nan());
    }

    #[test]
    fn test_variance_population_vs_sample() {
        let series: Series<f64> = Series::from_vec(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);

        // Mean = 5, population variance = 4, sample variance = 32/7
        assert_relative_eq!(variance(&series, 0), 4.0, epsilon = 1e-10);
        assert_relative_eq!(variance(&series, 1), 32.0 / 7.0, epsilon = 1e-10);
        assert_relative_eq!(std_dev(&series, 0), 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_variance_insufficient_values() {
        let single: Series<f64> = Series::from_vec(vec![5.0]);
        assert!(variance(&single, 1).is_nan());
        assert_eq!(variance(&single, 0), 0.0);

        let empty: Series<f64> = Series::new();
        assert!(variance(&empty, 0).is_nan());
    }

    #[test]
    fn test_variance_skips_missing() {
        let series: Series<f64> = Series::from_vec(vec![1.0, f64::NAN, 3.0]);
        // Valid values 1, 3: mean 2, sample variance 2
        assert_relative_eq!(variance(&series, 1), 2.0, epsilon = 1e-10);
    }
}
