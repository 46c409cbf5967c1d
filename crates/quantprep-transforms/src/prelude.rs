//! Prelude for quantprep-transforms.

pub use crate::impute::{drop_missing, fill_missing_median, DropMode};
pub use crate::outliers::{
    detect_outliers_iqr, detect_outliers_zscore, winsorize, OutlierBounds, DEFAULT_IQR_K,
    DEFAULT_WINSOR_QUANTILES, DEFAULT_ZSCORE_THRESHOLD,
};
pub use crate::scale::{apply_scale, fit_scale, normalize, ColumnScale, ScaleMethod, ScaleParams};
pub use crate::summary::{group_aggregate, summarize, Aggregate};
