//! Error types for the I/O boundary.

use std::path::PathBuf;

use thiserror::Error;

use quantprep_core::error::DatasetError;

/// Errors raised when reading or writing datasets.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The file extension maps to no known format.
    #[error("unsupported file extension for '{}'", path.display())]
    UnsupportedFormat {
        /// Offending path.
        path: PathBuf,
    },

    /// The Parquet codec is missing or failed.
    ///
    /// Recoverable by the caller: enable the `parquet` cargo feature, or
    /// inspect the message for the underlying backend failure.
    #[error("parquet codec unavailable for '{}': {message}", path.display())]
    CodecUnavailable {
        /// Offending path.
        path: PathBuf,
        /// Backend detail.
        message: String,
    },

    /// CSV parse or encode failure.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The file produced an inconsistent dataset.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Errors raised by the configuration collaborator.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("missing required environment variable: {0}")]
    MissingVar(String),
}
