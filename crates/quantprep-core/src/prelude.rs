//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use quantprep_core::prelude::*;
//!
//! let series: Series<f64> = Series::from_vec(vec![1.0, 2.0, 3.0]);
//! let ds: Dataset<f64> = Dataset::new();
//! ```

// Core types
pub use crate::column::{Column, ColumnKind};
pub use crate::dataset::Dataset;
pub use crate::num::PrepFloat;
pub use crate::series::Series;
pub use crate::window::RollingWindow;

// Error types
pub use crate::error::{DatasetError, Result, TransformError, TransformResult};

// Statistics
pub use crate::stats::{median, quantile, quantile_sorted, sorted_valid, std_dev, variance};
pub use crate::window::{rolling_mean, rolling_std};
