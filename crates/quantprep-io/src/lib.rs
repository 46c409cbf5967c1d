//! # quantprep-io
//!
//! External collaborators for the quantprep pipeline: on-disk dataset I/O
//! and environment-based configuration. Nothing here participates in the
//! statistical logic; the core consumes and produces only in-memory
//! [`Dataset`](quantprep_core::Dataset) values.
//!
//! - [`storage`] - [`read_dataset`] / [`write_dataset`], dispatched by
//!   file extension (`.csv`, `.csv.gz`, `.parquet`/`.parq`)
//! - [`config`] - [`DataPaths`] resolved from environment variables with
//!   fixed defaults, plus a required-variable primitive
//!
//! The Parquet codec sits behind the default-on `parquet` cargo feature;
//! without it, Parquet paths fail with
//! [`StorageError::CodecUnavailable`], which is recoverable by enabling
//! the feature, and distinct from the unsupported-extension error.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod storage;

pub use config::{require_env, DataPaths};
pub use error::{ConfigError, StorageError};
pub use storage::{read_dataset, write_dataset};
