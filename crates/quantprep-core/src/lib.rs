//! # quantprep-core
//!
//! Core types for the quantprep data-preparation library.
//!
//! This crate provides the foundational abstractions shared by the
//! transform and feature crates:
//!
//! - [`PrepFloat`] - Trait for numeric types (f32/f64)
//! - [`Series`] - Numeric column with NaN as the missing-value sentinel
//! - [`Column`] - Kind-tagged column (numeric, categorical, datetime)
//! - [`Dataset`] - Multi-column tabular data with deterministic ordering
//! - [`RollingWindow`] - Fixed-size trailing window for rolling statistics
//! - NaN-ignoring scalar statistics in [`stats`]
//!
//! ## Example
//!
//! ```rust
//! use quantprep_core::prelude::*;
//!
//! let mut ds: Dataset<f64> = Dataset::new();
//! ds.set_numeric("close", Series::from_vec(vec![100.0, 101.5, 99.8])).unwrap();
//!
//! assert_eq!(ds.numeric_column_names(), vec!["close"]);
//! assert_eq!(rolling_mean(ds.numeric("close").unwrap(), 3)[2], (100.0 + 101.5 + 99.8) / 3.0);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod column;
pub mod dataset;
pub mod error;
pub mod num;
pub mod prelude;
pub mod series;
pub mod stats;
pub mod window;

// Re-export core types at crate root
pub use column::{Column, ColumnKind};
pub use dataset::Dataset;
pub use error::{DatasetError, Result, TransformError, TransformResult};
pub use num::PrepFloat;
pub use series::Series;
pub use window::RollingWindow;
