//! Describe-style summary statistics and grouped aggregation.

use indexmap::IndexMap;

use quantprep_core::{
    column::Column,
    dataset::Dataset,
    error::{TransformError, TransformResult},
    num::PrepFloat,
    series::Series,
    stats,
};

/// Aggregation applied per group and numeric column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Aggregate {
    /// Mean of the non-missing values.
    #[default]
    Mean,
    /// Sum of the non-missing values.
    Sum,
    /// Minimum non-missing value.
    Min,
    /// Maximum non-missing value.
    Max,
    /// Number of non-missing values.
    Count,
}

impl Aggregate {
    fn apply<T: PrepFloat>(self, series: &Series<T>) -> T {
        match self {
            Self::Mean => series.mean(),
            Self::Sum => series.sum(),
            Self::Min => series.min(),
            Self::Max => series.max(),
            Self::Count => T::from_usize(series.len() - series.missing_count()),
        }
    }
}

const STAT_ROWS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Describe the numeric columns of a dataset.
///
/// Produces one row per statistic (count, mean, std, min, quartiles, max)
/// with a categorical `stat` column naming each row and one numeric column
/// per input numeric column. A dataset with no numeric columns summarizes
/// to an empty dataset.
#[must_use]
pub fn summarize<T: PrepFloat>(ds: &Dataset<T>) -> Dataset<T> {
    let numeric = ds.numeric_column_names();
    if numeric.is_empty() {
        return Dataset::new();
    }

    let mut out = Dataset::with_capacity(numeric.len() + 1);
    let stat_labels = STAT_ROWS.iter().map(|s| Some((*s).to_string())).collect();
    // Lengths agree by construction throughout.
    let _ = out.add_column("stat", Column::Categorical(stat_labels));

    for name in numeric {
        let series = ds.numeric(&name).unwrap();
        let sorted = stats::sorted_valid(series);
        let stats_col = Series::from_vec(vec![
            T::from_usize(sorted.len()),
            series.mean(),
            stats::std_dev(series, 1),
            series.min(),
            stats::quantile_sorted(&sorted, 0.25),
            stats::quantile_sorted(&sorted, 0.5),
            stats::quantile_sorted(&sorted, 0.75),
            series.max(),
        ]);
        let _ = out.set_numeric(name, stats_col);
    }

    out
}

/// Group-key representation used for aggregation: missing keys form their
/// own group rather than being dropped.
fn group_key<T: PrepFloat>(column: &Column<T>, row: usize) -> Option<String> {
    match column {
        Column::Categorical(v) => v[row].clone(),
        Column::Numeric(s) => {
            let v = s[row];
            if v.is_missing() {
                None
            } else {
                Some(v.to_string())
            }
        }
        Column::Datetime(v) => v[row].map(|d| d.format("%Y-%m-%d").to_string()),
    }
}

/// Aggregate the numeric columns of a dataset grouped by a key column.
///
/// Groups are emitted sorted ascending by key, missing-key group last. The
/// grouping column itself is excluded from the aggregated columns.
///
/// # Errors
///
/// Returns an error if the grouping column does not exist.
pub fn group_aggregate<T: PrepFloat>(
    ds: &Dataset<T>,
    by: &str,
    agg: Aggregate,
) -> TransformResult<Dataset<T>> {
    let key_column = ds
        .column(by)
        .ok_or_else(|| TransformError::MissingColumn(by.to_string()))?;

    let mut groups: IndexMap<Option<String>, Vec<usize>> = IndexMap::new();
    for row in 0..ds.len() {
        groups.entry(group_key(key_column, row)).or_default().push(row);
    }
    groups.sort_by(|k1, _, k2, _| match (k1, k2) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => core::cmp::Ordering::Less,
        (None, Some(_)) => core::cmp::Ordering::Greater,
        (None, None) => core::cmp::Ordering::Equal,
    });

    let numeric: Vec<String> = ds
        .numeric_column_names()
        .into_iter()
        .filter(|name| name != by)
        .collect();

    let mut out = Dataset::with_capacity(numeric.len() + 1);
    let keys: Vec<Option<String>> = groups.keys().cloned().collect();
    let _ = out.add_column(by, Column::Categorical(keys));

    for name in &numeric {
        let series = ds.numeric(name).unwrap();
        let aggregated: Series<T> = groups
            .values()
            .map(|rows| {
                let slice: Series<T> = rows.iter().map(|&r| series[r]).collect();
                agg.apply(&slice)
            })
            .collect();
        out.set_numeric(name.clone(), aggregated)?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Dataset<f64> {
        let mut ds = Dataset::new();
        ds.add_column(
            "sector",
            Column::Categorical(vec![
                Some("tech".to_string()),
                Some("energy".to_string()),
                Some("tech".to_string()),
                None,
            ]),
        )
        .unwrap();
        ds.set_numeric("close", Series::from_vec(vec![10.0, 20.0, 30.0, 40.0]))
            .unwrap();
        ds.set_numeric("volume", Series::from_vec(vec![1.0, 2.0, f64::NAN, 4.0]))
            .unwrap();
        ds
    }

    #[test]
    fn test_summarize_shape() {
        let ds = sample();
        let summary = summarize(&ds);

        assert_eq!(summary.len(), 8);
        assert_eq!(summary.column_names(), vec!["stat", "close", "volume"]);
    }

    #[test]
    fn test_summarize_values() {
        let ds = sample();
        let summary = summarize(&ds);
        let close = summary.numeric("close").unwrap();

        assert_relative_eq!(close[0], 4.0, epsilon = 1e-10); // count
        assert_relative_eq!(close[1], 25.0, epsilon = 1e-10); // mean
        assert_relative_eq!(close[3], 10.0, epsilon = 1e-10); // min
        assert_relative_eq!(close[5], 25.0, epsilon = 1e-10); // median
        assert_relative_eq!(close[7], 40.0, epsilon = 1e-10); // max

        // count ignores missing values
        let volume = summary.numeric("volume").unwrap();
        assert_relative_eq!(volume[0], 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_summarize_no_numeric_columns() {
        let mut ds: Dataset<f64> = Dataset::new();
        ds.add_column("label", Column::Categorical(vec![Some("x".to_string())]))
            .unwrap();

        let summary = summarize(&ds);
        assert_eq!(summary.column_count(), 0);
    }

    #[test]
    fn test_group_aggregate_mean() {
        let ds = sample();
        let grouped = group_aggregate(&ds, "sector", Aggregate::Mean).unwrap();

        // Sorted keys: energy, tech, then the missing-key group.
        let keys = grouped.column("sector").unwrap().as_categorical().unwrap();
        assert_eq!(keys[0], Some("energy".to_string()));
        assert_eq!(keys[1], Some("tech".to_string()));
        assert_eq!(keys[2], None);

        let close = grouped.numeric("close").unwrap();
        assert_relative_eq!(close[0], 20.0, epsilon = 1e-10);
        assert_relative_eq!(close[1], 20.0, epsilon = 1e-10); // (10 + 30) / 2
        assert_relative_eq!(close[2], 40.0, epsilon = 1e-10);
    }

    #[test]
    fn test_group_aggregate_count_ignores_missing() {
        let ds = sample();
        let grouped = group_aggregate(&ds, "sector", Aggregate::Count).unwrap();

        let volume = grouped.numeric("volume").unwrap();
        // tech rows are 0 and 2; volume at row 2 is missing.
        assert_relative_eq!(volume[1], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_group_aggregate_missing_key_column() {
        let ds = sample();
        let result = group_aggregate(&ds, "industry", Aggregate::Mean);
        assert!(matches!(result, Err(TransformError::MissingColumn(_))));
    }

    #[test]
    fn test_group_aggregate_excludes_key_from_values() {
        let mut ds: Dataset<f64> = Dataset::new();
        ds.set_numeric("bucket", Series::from_vec(vec![1.0, 1.0, 2.0]))
            .unwrap();
        ds.set_numeric("x", Series::from_vec(vec![10.0, 20.0, 30.0]))
            .unwrap();

        let grouped = group_aggregate(&ds, "bucket", Aggregate::Sum).unwrap();
        assert_eq!(grouped.column_names(), vec!["bucket", "x"]);
        assert_relative_eq!(grouped.numeric("x").unwrap()[0], 30.0, epsilon = 1e-10);
    }
}
