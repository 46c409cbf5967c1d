//! Numeric type abstraction for preparation computations.
//!
//! This module defines the [`PrepFloat`] trait which abstracts over `f32`
//! and `f64` for generic statistical operations.

use core::cmp::Ordering;
use num_traits::{Float, FromPrimitive, ToPrimitive};
use serde::{de::DeserializeOwned, Serialize};

/// Trait for floating-point types used in preparation calculations.
///
/// NaN doubles as the missing-value sentinel throughout the library, so the
/// trait carries a NaN constant, a total ordering that sorts NaN after every
/// other value, and a NaN-preserving clamp.
///
/// # Example
///
/// ```rust
/// use quantprep_core::PrepFloat;
///
/// fn relative_strength<T: PrepFloat>(gain: T, loss: T) -> T {
///     let rs = gain / loss;
///     T::HUNDRED - T::HUNDRED / (T::ONE + rs)
/// }
/// ```
pub trait PrepFloat:
    Float
    + FromPrimitive
    + ToPrimitive
    + Copy
    + Send
    + Sync
    + Default
    + core::fmt::Display
    + Serialize
    + DeserializeOwned
    + 'static
{
    /// Not-a-number value, used as the missing-value sentinel.
    const NAN: Self;
    /// Zero value.
    const ZERO: Self;
    /// One value.
    const ONE: Self;
    /// Hundred value (useful for percentage calculations like RSI).
    const HUNDRED: Self;

    /// Convert from `f64`.
    #[must_use]
    fn from_f64_lossy(value: f64) -> Self;

    /// Convert from `usize`.
    #[must_use]
    fn from_usize(value: usize) -> Self;

    /// Check if the value is the missing-value sentinel.
    #[must_use]
    fn is_missing(self) -> bool {
        self.is_nan()
    }

    /// Total comparison that orders NaN after all other values (including
    /// +infinity), ensuring deterministic sorting behavior.
    #[must_use]
    fn total_cmp_fn(&self, other: &Self) -> Ordering;

    /// Clamp value to the range [min, max].
    ///
    /// If the value is NaN, returns NaN.
    #[must_use]
    fn clamp_value(self, min: Self, max: Self) -> Self {
        if self.is_nan() {
            return self;
        }
        if self < min {
            min
        } else if self > max {
            max
        } else {
            self
        }
    }
}

impl PrepFloat for f32 {
    const NAN: Self = f32::NAN;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const HUNDRED: Self = 100.0;

    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn from_usize(value: usize) -> Self {
        value as f32
    }

    #[inline]
    fn total_cmp_fn(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl PrepFloat for f64 {
    const NAN: Self = f64::NAN;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const HUNDRED: Self = 100.0;

    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value
    }

    #[inline]
    fn from_usize(value: usize) -> Self {
        value as f64
    }

    #[inline]
    fn total_cmp_fn(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}
