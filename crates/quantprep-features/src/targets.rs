//! Interaction terms and forward-looking targets.

use quantprep_core::{
    dataset::Dataset,
    error::TransformResult,
    num::PrepFloat,
    series::Series,
};

use crate::ordering::{resolve_price_column, sorted_by_date};

/// Add `ret_x_vol21 = ret * vol_21`, capturing regime effects.
///
/// Added only when both source columns already exist; silently skipped
/// otherwise.
///
/// # Errors
///
/// Only dataset container violations propagate.
pub fn add_interaction_features<T: PrepFloat>(ds: &Dataset<T>) -> TransformResult<Dataset<T>> {
    let mut out = sorted_by_date(ds);

    let product = match (out.numeric("ret"), out.numeric("vol_21")) {
        (Some(ret), Some(vol)) => Some(
            ret.iter()
                .zip(vol.iter())
                .map(|(&r, &v)| r * v)
                .collect::<Series<T>>(),
        ),
        _ => None,
    };
    if let Some(product) = product {
        out.set_numeric("ret_x_vol21", product)?;
    }

    Ok(out)
}

/// Add next-day targets:
///
/// - `y_next_ret` - the next row's return; the last row's target is
///   necessarily undefined
/// - `y_next_up` - 1 if `y_next_ret > 0` else 0, undefined where the
///   underlying return is undefined
///
/// With no usable price column the dataset is returned (sorted) without
/// new columns.
///
/// # Errors
///
/// Only dataset container violations propagate.
pub fn add_next_day_targets<T: PrepFloat>(ds: &Dataset<T>) -> TransformResult<Dataset<T>> {
    let mut out = sorted_by_date(ds);
    let Some(price_name) = resolve_price_column(&out) else {
        return Ok(out);
    };

    let ret_today = out.numeric(price_name).unwrap().pct_change();
    let y_next_ret = ret_today.shift(-1);
    let y_next_up = y_next_ret.map(|r| {
        if r.is_missing() {
            T::NAN
        } else if r > T::ZERO {
            T::ONE
        } else {
            T::ZERO
        }
    });

    out.set_numeric("y_next_ret", y_next_ret)?;
    out.set_numeric("y_next_up", y_next_up)?;
    Ok(out)
}
