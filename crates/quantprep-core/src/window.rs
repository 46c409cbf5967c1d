//! Trailing-window primitive for rolling statistics.
//!
//! Every momentum and volatility feature shares the same window rule: a
//! result is defined only once the trailing window is completely full and
//! contains no missing values. [`RollingWindow`] encodes that rule once;
//! [`rolling_mean`] and [`rolling_std`] stream a series through it.

use serde::{Deserialize, Serialize};

use crate::num::PrepFloat;
use crate::series::Series;

/// A fixed-capacity trailing window over a numeric stream.
///
/// The window keeps a running sum of its valid values and a count of the
/// missing values currently inside it, so pushing is O(1) and a window
/// poisoned by NaN recovers as soon as the NaN slides out.
///
/// # Example
///
/// ```rust
/// use quantprep_core::RollingWindow;
///
/// let mut window: RollingWindow<f64> = RollingWindow::new(3);
/// window.push(1.0);
/// window.push(2.0);
/// assert!(window.mean().is_nan()); // not full yet
///
/// window.push(3.0);
/// assert_eq!(window.mean(), 2.0);
///
/// window.push(4.0); // evicts 1.0
/// assert_eq!(window.mean(), 3.0);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "T: PrepFloat")]
pub struct RollingWindow<T: PrepFloat> {
    buffer: Vec<T>,
    /// Next write position (also the oldest element once full).
    head: usize,
    len: usize,
    capacity: usize,
    /// Running sum of the non-missing values in the window.
    sum: T,
    /// Number of missing values currently in the window.
    missing: usize,
}

impl<T: PrepFloat> RollingWindow<T> {
    /// Create a new window with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if capacity is 0.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "RollingWindow capacity must be > 0");
        Self {
            buffer: vec![T::ZERO; capacity],
            head: 0,
            len: 0,
            capacity,
            sum: T::ZERO,
            missing: 0,
        }
    }

    /// Push a value, evicting the oldest if the window is full.
    pub fn push(&mut self, value: T) {
        if self.is_full() {
            let old = self.buffer[self.head];
            if old.is_missing() {
                self.missing -= 1;
            } else {
                self.sum = self.sum - old;
            }
        } else {
            self.len += 1;
        }

        if value.is_missing() {
            self.missing += 1;
        } else {
            self.sum = self.sum + value;
        }

        self.buffer[self.head] = value;
        self.head = (self.head + 1) % self.capacity;
    }

    /// Returns `true` once `capacity` values have been pushed.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Returns the number of values currently in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no values have been pushed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the window capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get a value by age (0 = oldest in the window).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        let actual = if self.is_full() {
            (self.head + index) % self.capacity
        } else {
            index
        };
        Some(&self.buffer[actual])
    }

    /// Mean over the window.
    ///
    /// Missing until the window is full and free of missing values.
    #[must_use]
    pub fn mean(&self) -> T {
        if !self.is_full() || self.missing > 0 {
            return T::NAN;
        }
        self.sum / T::from_usize(self.capacity)
    }

    /// Sample standard deviation (n-1 divisor) over the window.
    ///
    /// Missing until the window is full and free of missing values, or if
    /// the capacity is 1.
    #[must_use]
    pub fn std(&self) -> T {
        if !self.is_full() || self.missing > 0 || self.capacity < 2 {
            return T::NAN;
        }

        let mean = self.sum / T::from_usize(self.capacity);
        let mut sum_sq = T::ZERO;
        for i in 0..self.len {
            let diff = self.buffer[i] - mean;
            sum_sq = sum_sq + diff * diff;
        }
        (sum_sq / T::from_usize(self.capacity - 1)).sqrt()
    }

    /// Reset the window to empty.
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
        self.sum = T::ZERO;
        self.missing = 0;
    }
}

/// Trailing rolling mean over `window` rows.
///
/// Each output position is the mean of the current row and the preceding
/// `window - 1` rows; positions before the window fills, and windows
/// containing any missing value, are missing. A zero window yields an
/// all-missing series.
#[must_use]
pub fn rolling_mean<T: PrepFloat>(data: &Series<T>, window: usize) -> Series<T> {
    if window == 0 {
        return Series::missing(data.len());
    }

    let mut w = RollingWindow::new(window);
    let mut result = Series::with_capacity(data.len());
    for &value in data.iter() {
        w.push(value);
        result.push(w.mean());
    }
    result
}

/// Trailing rolling sample standard deviation (n-1 divisor) over `window` rows.
///
/// Same definedness rule as [`rolling_mean`].
#[must_use]
pub fn rolling_std<T: PrepFloat>(data: &Series<T>, window: usize) -> Series<T> {
    if window == 0 {
        return Series::missing(data.len());
    }

    let mut w = RollingWindow::new(window);
    let mut result = Series::with_capacity(data.len());
    for &value in data.iter() {
        w.push(value);
        result.push(w.std());
    }
    result
}
