//! Basic return features.

use quantprep_core::{
    dataset::Dataset,
    error::TransformResult,
    num::PrepFloat,
    series::Series,
};

use crate::ordering::{resolve_price_column, sorted_by_date};

/// Add `ret`, `log_ret`, and `ret_lag1` columns.
///
/// - `ret` is the one-day percentage change of the price column
/// - `log_ret` is the first difference of the log price (nonpositive
///   prices yield missing)
/// - `ret_lag1` is yesterday's `ret`, visible today
///
/// The first row of each is missing by construction. With no usable price
/// column the dataset is returned (sorted) without new columns.
///
/// # Errors
///
/// Only dataset container violations propagate.
pub fn add_basic_returns<T: PrepFloat>(ds: &Dataset<T>) -> TransformResult<Dataset<T>> {
    let mut out = sorted_by_date(ds);
    let Some(price_name) = resolve_price_column(&out) else {
        return Ok(out);
    };
    let price = out.numeric(price_name).unwrap().clone();

    let ret = price.pct_change();
    let log_price: Series<T> = price.map(|p| if p > T::ZERO { p.ln() } else { T::NAN });
    let ret_lag1 = ret.shift(1);

    out.set_numeric("ret", ret)?;
    out.set_numeric("log_ret", log_price.diff())?;
    out.set_numeric("ret_lag1", ret_lag1)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use quantprep_core::Column;

    fn with_dates(closes: Vec<f64>) -> Dataset<f64> {
        let mut ds = Dataset::new();
        let dates = (0..closes.len())
            .map(|i| NaiveDate::from_ymd_opt(2024, 1, 1 + i as u32))
            .collect();
        ds.add_column("date", Column::Datetime(dates)).unwrap();
        ds.set_numeric("close", Series::from_vec(closes)).unwrap();
        ds
    }

    #[test]
    fn test_returns_values() {
        let ds = with_dates(vec![100.0, 101.0, 99.0]);
        let out = add_basic_returns(&ds).unwrap();

        let ret = out.numeric("ret").unwrap();
        assert!(ret[0].is_nan());
        assert_relative_eq!(ret[1], 0.01, epsilon = 1e-12);
        assert_relative_eq!(ret[2], (99.0 - 101.0) / 101.0, epsilon = 1e-12);

        let log_ret = out.numeric("log_ret").unwrap();
        assert!(log_ret[0].is_nan());
        assert_relative_eq!(log_ret[1], (101.0f64 / 100.0).ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_ret_lag1_sees_yesterday() {
        let ds = with_dates(vec![100.0, 101.0, 99.0, 102.0]);
        let out = add_basic_returns(&ds).unwrap();

        let ret = out.numeric("ret").unwrap();
        let lag = out.numeric("ret_lag1").unwrap();
        for i in 1..out.len() {
            if ret[i - 1].is_nan() {
                assert!(lag[i].is_nan());
            } else {
                assert_relative_eq!(lag[i], ret[i - 1], epsilon = 1e-12);
            }
        }
        assert!(lag[0].is_nan());
    }

    #[test]
    fn test_sorts_before_computing() {
        let mut ds: Dataset<f64> = Dataset::new();
        // Dates deliberately out of order
        ds.add_column(
            "date",
            Column::Datetime(vec![
                NaiveDate::from_ymd_opt(2024, 1, 2),
                NaiveDate::from_ymd_opt(2024, 1, 1),
            ]),
        )
        .unwrap();
        ds.set_numeric("close", Series::from_vec(vec![110.0, 100.0]))
            .unwrap();

        let out = add_basic_returns(&ds).unwrap();
        let ret = out.numeric("ret").unwrap();
        // After sorting, the return is computed 100 -> 110
        assert_relative_eq!(ret[1], 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_nonpositive_price_log_return_missing() {
        let ds = with_dates(vec![100.0, 0.0, 50.0]);
        let out = add_basic_returns(&ds).unwrap();

        let log_ret = out.numeric("log_ret").unwrap();
        assert!(log_ret[1].is_nan());
        assert!(log_ret[2].is_nan());
    }

    #[test]
    fn test_skips_without_price_column() {
        let mut ds: Dataset<f64> = Dataset::new();
        ds.set_numeric("volume", Series::from_vec(vec![1.0, 2.0]))
            .unwrap();

        let out = add_basic_returns(&ds).unwrap();
        assert!(!out.has_column("ret"));
        assert_eq!(out.column_count(), 1);
    }

    #[test]
    fn test_prefers_adjusted_close() {
        let mut ds = with_dates(vec![100.0, 100.0]);
        ds.set_numeric("adjusted_close", Series::from_vec(vec![100.0, 110.0]))
            .unwrap();

        let out = add_basic_returns(&ds).unwrap();
        assert_relative_eq!(out.numeric("ret").unwrap()[1], 0.1, epsilon = 1e-12);
    }
}
