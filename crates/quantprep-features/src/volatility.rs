//! Rolling volatility and intraday-range features.

use quantprep_core::{
    dataset::Dataset,
    error::TransformResult,
    num::PrepFloat,
    series::Series,
    window::{rolling_mean, rolling_std},
};

use crate::ordering::{resolve_price_column, sorted_by_date};

/// Volatility lookback window.
const VOL_WINDOW: usize = 21;

/// Add `vol_21` and, when `high`/`low`/`close` are all present, `range`
/// and `range_21`.
///
/// A `ret` column is ensured first (computed from the price column if
/// absent). `vol_21` is the trailing 21-row sample standard deviation
/// (n-1 divisor) of `ret`. `range` is `(high - low) / close`, missing
/// where `close` is zero; `range_21` is its trailing 21-row mean. Missing
/// inputs skip their dependent features; nothing here errors on data.
///
/// # Errors
///
/// Only dataset container violations propagate.
pub fn add_volatility_features<T: PrepFloat>(ds: &Dataset<T>) -> TransformResult<Dataset<T>> {
    let mut out = sorted_by_date(ds);

    if out.numeric("ret").is_none() {
        let Some(price_name) = resolve_price_column(&out) else {
            return Ok(out);
        };
        let ret = out.numeric(price_name).unwrap().pct_change();
        out.set_numeric("ret", ret)?;
    }

    let vol_21 = rolling_std(out.numeric("ret").unwrap(), VOL_WINDOW);
    out.set_numeric("vol_21", vol_21)?;

    let ranges = match (out.numeric("high"), out.numeric("low"), out.numeric("close")) {
        (Some(high), Some(low), Some(close)) => {
            let range: Series<T> = high
                .iter()
                .zip(low.iter())
                .zip(close.iter())
                .map(|((&h, &l), &c)| {
                    if c == T::ZERO {
                        T::NAN
                    } else {
                        (h - l) / c
                    }
                })
                .collect();
            let range_21 = rolling_mean(&range, VOL_WINDOW);
            Some((range, range_21))
        }
        _ => None,
    };
    if let Some((range, range_21)) = ranges {
        out.set_numeric("range", range)?;
        out.set_numeric("range_21", range_21)?;
    }

    Ok(out)
}
