//! Calendar and weekday-encoding features.

use chrono::{Datelike, NaiveDate};

use quantprep_core::{
    column::Column,
    dataset::Dataset,
    error::{TransformError, TransformResult},
    num::PrepFloat,
    series::Series,
};

use crate::ordering::{sorted_by_date, DATE_COLUMN};

/// Add calendar features derived from the `date` column:
///
/// - `dow` - day of week (Monday = 0)
/// - `month` - calendar month (1..12)
/// - `is_month_end`, `is_quarter_end` - 1/0 flags
/// - `dow_0`..`dow_4` - one-hot indicators for each weekday value
///   observed within the Monday-Friday range
///
/// Rows with a missing date produce missing feature values. This is the
/// one feature function that fails hard: without a date column there is no
/// sensible fallback.
///
/// # Errors
///
/// Returns [`TransformError::MissingColumn`] if the `date` column is
/// absent.
pub fn add_calendar_features<T: PrepFloat>(ds: &Dataset<T>) -> TransformResult<Dataset<T>> {
    let mut out = sorted_by_date(ds);
    let dates: Vec<Option<NaiveDate>> = match out.column(DATE_COLUMN) {
        None => return Err(TransformError::MissingColumn(DATE_COLUMN.to_string())),
        Some(column) => coerce_dates(column),
    };

    let flag = |b: bool| if b { T::ONE } else { T::ZERO };

    let dow: Series<T> = dates
        .iter()
        .map(|d| d.map_or(T::NAN, |d| T::from_usize(d.weekday().num_days_from_monday() as usize)))
        .collect();
    let month: Series<T> = dates
        .iter()
        .map(|d| d.map_or(T::NAN, |d| T::from_usize(d.month() as usize)))
        .collect();
    let month_end: Series<T> = dates
        .iter()
        .map(|d| d.map_or(T::NAN, |d| flag(is_month_end(d))))
        .collect();
    let quarter_end: Series<T> = dates
        .iter()
        .map(|d| d.map_or(T::NAN, |d| flag(is_month_end(d) && d.month() % 3 == 0)))
        .collect();

    out.set_numeric("dow", dow)?;
    out.set_numeric("month", month)?;
    out.set_numeric("is_month_end", month_end)?;
    out.set_numeric("is_quarter_end", quarter_end)?;

    // One-hot columns only for weekday values that actually occur, named
    // deterministically by weekday index.
    for day in 0..5u32 {
        let observed = dates
            .iter()
            .flatten()
            .any(|d| d.weekday().num_days_from_monday() == day);
        if !observed {
            continue;
        }
        let indicator: Series<T> = dates
            .iter()
            .map(|d| {
                d.map_or(T::NAN, |d| flag(d.weekday().num_days_from_monday() == day))
            })
            .collect();
        out.set_numeric(format!("dow_{day}"), indicator)?;
    }

    Ok(out)
}

/// Read dates out of the column, parsing categorical values as ISO dates.
fn coerce_dates<T: PrepFloat>(column: &Column<T>) -> Vec<Option<NaiveDate>> {
    match column {
        Column::Datetime(dates) => dates.clone(),
        Column::Categorical(labels) => labels
            .iter()
            .map(|opt| {
                opt.as_deref()
                    .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
            })
            .collect(),
        Column::Numeric(series) => vec![None; series.len()],
    }
}

/// Whether the date is the last calendar day of its month.
fn is_month_end(date: NaiveDate) -> bool {
    date.succ_opt().map_or(true, |next| next.month() != date.month())
}
