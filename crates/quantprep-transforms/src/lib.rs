//! # quantprep-transforms
//!
//! Statistical cleaning transforms for quantprep datasets:
//!
//! - [`impute`] - median fill and missing-row drops
//! - [`scale`] - z-score / min-max normalization with an explicit
//!   fit/apply split for leak-free replay on held-out data
//! - [`outliers`] - IQR and z-score flagging, quantile winsorization
//! - [`summary`] - describe-style statistics and grouped aggregation
//!
//! Every transform takes a dataset snapshot and returns a new one; fitted
//! parameters are plain values held by the caller, never hidden state.
//! Degenerate statistics (zero variance, zero range, empty columns) are
//! substituted with neutral values rather than raised as errors.
//!
//! # Example
//!
//! ```rust
//! use quantprep_core::prelude::*;
//! use quantprep_transforms::prelude::*;
//!
//! let mut train: Dataset<f64> = Dataset::new();
//! train.set_numeric("close", Series::from_vec(vec![100.0, 102.0, 104.0])).unwrap();
//!
//! // Fit on the training window, replay the frozen parameters elsewhere.
//! let (scaled, params) = normalize(&train, None, ScaleMethod::ZScore, None).unwrap();
//! let (replayed, _) = normalize(&train, None, ScaleMethod::ZScore, Some(&params)).unwrap();
//! assert_eq!(scaled, replayed);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod impute;
pub mod outliers;
pub mod prelude;
pub mod scale;
pub mod summary;

pub use impute::{drop_missing, fill_missing_median, DropMode};
pub use outliers::{detect_outliers_iqr, detect_outliers_zscore, winsorize, OutlierBounds};
pub use scale::{apply_scale, fit_scale, normalize, ColumnScale, ScaleMethod, ScaleParams};
pub use summary::{group_aggregate, summarize, Aggregate};
