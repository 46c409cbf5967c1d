//! Error types for dataset and transform operations.
//!
//! Fatal conditions carry enough context (column name, row counts) to
//! diagnose at the call site. Degenerate statistics are never errors; they
//! are substituted or propagated as missing by the individual transforms.

use thiserror::Error;

use crate::column::ColumnKind;

/// Result type alias for dataset container operations.
pub type Result<T> = core::result::Result<T, DatasetError>;

/// Result type alias for transform and feature operations.
pub type TransformResult<T> = core::result::Result<T, TransformError>;

/// Errors raised by the [`Dataset`](crate::Dataset) container.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Column row count doesn't match the rest of the dataset.
    #[error("column length mismatch: expected {expected} rows, got {actual}")]
    LengthMismatch {
        /// Row count of the existing columns.
        expected: usize,
        /// Row count of the offending column.
        actual: usize,
    },

    /// A column with this name already exists.
    #[error("duplicate column name: '{0}'")]
    DuplicateColumn(String),

    /// The named column does not exist.
    #[error("no such column: '{0}'")]
    MissingColumn(String),

    /// The named column exists but has the wrong kind for the operation.
    #[error("column '{column}' is {actual}, expected {expected}")]
    KindMismatch {
        /// Name of the offending column.
        column: String,
        /// Kind the operation requires.
        expected: ColumnKind,
        /// Kind the column actually has.
        actual: ColumnKind,
    },
}

/// Errors raised by transforms and feature derivations.
///
/// The only structural failure in the statistical layer is a required
/// column being absent where no fallback exists (the date column for
/// calendar features, the grouping key for summary aggregation).
#[derive(Debug, Error)]
pub enum TransformError {
    /// A required column is absent and no fallback exists.
    #[error("missing required column: '{0}'")]
    MissingColumn(String),

    /// Underlying dataset container violation.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}
