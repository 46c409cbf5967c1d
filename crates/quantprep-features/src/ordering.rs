//! Temporal ordering and price-column resolution.
//!
//! Shared preconditions for every feature entry point. Each function calls
//! these independently; no ordering or resolution state is shared between
//! calls.

use quantprep_core::{dataset::Dataset, num::PrepFloat};

/// Name of the date column feature functions order by.
pub const DATE_COLUMN: &str = "date";

/// Price column used when present.
pub const PREFERRED_PRICE_COLUMN: &str = "adjusted_close";

/// Price column used when the preferred one is absent.
pub const FALLBACK_PRICE_COLUMN: &str = "close";

/// Stable-sort the dataset ascending by its date column and reset row
/// positions.
///
/// Rolling and shift computations require time order, so this runs at the
/// start of every feature operation. A dataset without a datetime `date`
/// column is returned in its current row order; only calendar features
/// treat that as fatal.
#[must_use]
pub fn sorted_by_date<T: PrepFloat>(ds: &Dataset<T>) -> Dataset<T> {
    match ds.sort_by_datetime(DATE_COLUMN) {
        Ok(sorted) => sorted,
        Err(_) => ds.clone(),
    }
}

/// Resolve the price column for the current dataset.
///
/// Prefers `adjusted_close`, falls back to `close`; only numeric columns
/// qualify. Returns `None` when neither is usable, in which case the
/// caller skips its price-dependent features.
#[must_use]
pub fn resolve_price_column<T: PrepFloat>(ds: &Dataset<T>) -> Option<&'static str> {
    if ds.numeric(PREFERRED_PRICE_COLUMN).is_some() {
        Some(PREFERRED_PRICE_COLUMN)
    } else if ds.numeric(FALLBACK_PRICE_COLUMN).is_some() {
        Some(FALLBACK_PRICE_COLUMN)
    } else {
        None
    }
}
