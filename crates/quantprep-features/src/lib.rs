//! # quantprep-features
//!
//! Date-ordered derived columns for modeling:
//!
//! - [`returns`] - simple, log, and lagged returns
//! - [`momentum`] - moving averages, price-vs-MA momentum, RSI
//! - [`volatility`] - rolling return volatility and intraday range
//! - [`calendar`] - weekday/month encodings and one-hot weekday flags
//! - [`targets`] - interaction terms and forward-looking targets
//!
//! Every entry point independently re-sorts the dataset by its date column
//! before computing, because rolling and shift computations are only
//! meaningful over time-ordered rows and callers are not assumed to chain
//! operations on an already-sorted dataset.
//!
//! Absent optional inputs (a price column, `high`/`low`/`close`, a prior
//! `ret` or `vol_21`) cause the dependent feature to be skipped, never an
//! error. The one exception is [`calendar::add_calendar_features`], which
//! fails on a missing date column because no fallback exists.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use quantprep_core::prelude::*;
//! use quantprep_features::prelude::*;
//!
//! let mut ds: Dataset<f64> = Dataset::new();
//! ds.add_column("date", Column::Datetime(
//!     (1..=4).map(|d| NaiveDate::from_ymd_opt(2024, 1, d)).collect(),
//! )).unwrap();
//! ds.set_numeric("close", Series::from_vec(vec![100.0, 101.0, 102.0, 103.0])).unwrap();
//!
//! let ds = add_basic_returns(&ds).unwrap();
//! assert!((ds.numeric("ret").unwrap()[1] - 0.01).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod calendar;
pub mod momentum;
pub mod ordering;
pub mod prelude;
pub mod returns;
pub mod targets;
pub mod volatility;

pub use calendar::add_calendar_features;
pub use momentum::add_momentum_features;
pub use ordering::{DATE_COLUMN, FALLBACK_PRICE_COLUMN, PREFERRED_PRICE_COLUMN};
pub use returns::add_basic_returns;
pub use targets::{add_interaction_features, add_next_day_targets};
pub use volatility::add_volatility_features;
