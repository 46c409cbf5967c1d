//! Missing-value imputation and row dropping.

use indexmap::IndexMap;

use quantprep_core::{
    dataset::Dataset,
    error::{TransformError, TransformResult},
    num::PrepFloat,
    stats,
};

/// How [`drop_missing`] decides whether a row is dropped when no explicit
/// column subset is given.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DropMode {
    /// Drop a row if any column is missing.
    #[default]
    Any,
    /// Drop a row only if every column is missing.
    All,
}

/// Fill missing values in numeric columns with the column median.
///
/// Returns the filled dataset and the median used per column. The column
/// selection (default: all numeric columns) is evaluated once, up front, so
/// filling one column can never change another column's eligibility.
///
/// A column that is entirely missing has no defined median; it is recorded
/// as `None` and left untouched rather than guessed at. Explicitly
/// requested columns that are absent or non-numeric are skipped.
pub fn fill_missing_median<T: PrepFloat>(
    ds: &Dataset<T>,
    columns: Option<&[&str]>,
) -> (Dataset<T>, IndexMap<String, Option<T>>) {
    let selected: Vec<String> = match columns {
        Some(cols) => cols.iter().map(|c| (*c).to_string()).collect(),
        None => ds.numeric_column_names(),
    };

    let mut out = ds.clone();
    let mut medians: IndexMap<String, Option<T>> = IndexMap::new();

    for name in &selected {
        let Some(series) = ds.numeric(name) else {
            continue;
        };

        let med = stats::median(series);
        if med.is_missing() {
            medians.insert(name.clone(), None);
            continue;
        }

        medians.insert(name.clone(), Some(med));
        let filled = series.map(|v| if v.is_missing() { med } else { v });
        // Lengths are unchanged, so this cannot fail.
        let _ = out.set_numeric(name.clone(), filled);
    }

    (out, medians)
}

/// Drop rows containing missing values.
///
/// With no explicit `columns`, the `how` mode decides: [`DropMode::Any`]
/// (the default) drops a row with a missing value in any column of any
/// kind, [`DropMode::All`] drops only rows missing in every column.
///
/// When `columns` is given the mode is ignored and the rule is always
/// "missing in at least one of the given columns". The asymmetry is a
/// documented contract, preserved from the system this replaces.
///
/// # Errors
///
/// Returns an error if an explicitly given column does not exist.
pub fn drop_missing<T: PrepFloat>(
    ds: &Dataset<T>,
    columns: Option<&[&str]>,
    how: DropMode,
) -> TransformResult<Dataset<T>> {
    if ds.column_count() == 0 {
        return Ok(ds.clone());
    }

    let mask: Vec<bool> = match columns {
        Some(cols) => {
            let selected: Vec<_> = cols
                .iter()
                .map(|&name| {
                    ds.column(name)
                        .ok_or_else(|| TransformError::MissingColumn(name.to_string()))
                })
                .collect::<TransformResult<_>>()?;

            (0..ds.len())
                .map(|row| !selected.iter().any(|col| col.is_missing_at(row)))
                .collect()
        }
        None => (0..ds.len())
            .map(|row| {
                let missing = ds.iter().filter(|(_, col)| col.is_missing_at(row)).count();
                match how {
                    DropMode::Any => missing == 0,
                    DropMode::All => missing < ds.column_count(),
                }
            })
            .collect(),
    };

    Ok(ds.retain_rows(&mask))
}
