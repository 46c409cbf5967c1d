//! Prelude for quantprep-features.

pub use crate::calendar::add_calendar_features;
pub use crate::momentum::add_momentum_features;
pub use crate::ordering::{
    resolve_price_column, sorted_by_date, DATE_COLUMN, FALLBACK_PRICE_COLUMN,
    PREFERRED_PRICE_COLUMN,
};
pub use crate::returns::add_basic_returns;
pub use crate::targets::{add_interaction_features, add_next_day_targets};
pub use crate::volatility::add_volatility_features;
