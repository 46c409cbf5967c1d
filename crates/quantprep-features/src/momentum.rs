//! Moving-average momentum and RSI features.

use quantprep_core::{
    dataset::Dataset,
    error::TransformResult,
    num::PrepFloat,
    series::Series,
    window::rolling_mean,
};

use crate::ordering::{resolve_price_column, sorted_by_date};

/// Short moving-average window.
const MA_SHORT: usize = 5;
/// Medium moving-average window.
const MA_MEDIUM: usize = 21;
/// RSI lookback window.
const RSI_WINDOW: usize = 14;

/// Add moving averages, price-vs-MA momentum, and RSI:
///
/// - `ma_5`, `ma_21` - simple trailing means, undefined until the window
///   is full (no partial-window averaging)
/// - `mom_5`, `mom_21` - `price / ma_w - 1`
/// - `rsi_14` - from 14-row rolling means of gains and losses; a zero
///   average loss propagates as missing rather than an error
///
/// With no usable price column the dataset is returned (sorted) without
/// new columns.
///
/// # Errors
///
/// Only dataset container violations propagate.
pub fn add_momentum_features<T: PrepFloat>(ds: &Dataset<T>) -> TransformResult<Dataset<T>> {
    let mut out = sorted_by_date(ds);
    let Some(price_name) = resolve_price_column(&out) else {
        return Ok(out);
    };
    let price = out.numeric(price_name).unwrap().clone();

    let ma_5 = rolling_mean(&price, MA_SHORT);
    let ma_21 = rolling_mean(&price, MA_MEDIUM);
    let mom_5 = price_vs_ma(&price, &ma_5);
    let mom_21 = price_vs_ma(&price, &ma_21);
    let rsi_14 = rsi(&price, RSI_WINDOW);

    out.set_numeric("ma_5", ma_5)?;
    out.set_numeric("ma_21", ma_21)?;
    out.set_numeric("mom_5", mom_5)?;
    out.set_numeric("mom_21", mom_21)?;
    out.set_numeric("rsi_14", rsi_14)?;
    Ok(out)
}

/// `price / ma - 1`, missing wherever the moving average is missing.
fn price_vs_ma<T: PrepFloat>(price: &Series<T>, ma: &Series<T>) -> Series<T> {
    price
        .iter()
        .zip(ma.iter())
        .map(|(&p, &m)| {
            if m.is_missing() {
                T::NAN
            } else {
                p / m - T::ONE
            }
        })
        .collect()
}

/// RSI from simple rolling means of day-over-day gains and losses.
///
/// `rs = gain / loss`; a zero or missing average loss makes the ratio
/// undefined, which propagates as a missing RSI value.
fn rsi<T: PrepFloat>(price: &Series<T>, window: usize) -> Series<T> {
    let delta = price.diff();
    let gains = delta.map(|d| {
        if d.is_missing() {
            T::NAN
        } else if d > T::ZERO {
            d
        } else {
            T::ZERO
        }
    });
    let losses = delta.map(|d| {
        if d.is_missing() {
            T::NAN
        } else if d < T::ZERO {
            -d
        } else {
            T::ZERO
        }
    });

    let avg_gain = rolling_mean(&gains, window);
    let avg_loss = rolling_mean(&losses, window);

    avg_gain
        .iter()
        .zip(avg_loss.iter())
        .map(|(&gain, &loss)| {
            if gain.is_missing() || loss.is_missing() || loss == T::ZERO {
                T::NAN
            } else {
                let rs = gain / loss;
                T::HUNDRED - T::HUNDRED / (T::ONE + rs)
            }
        })
        .collect()
}
