//! Numeric types and coordinate utilities for sampled functions.
//!
//! This module defines the [`Value`] trait, which abstracts the numeric
//! types that can be used for interpolation, deviation accumulation, and
//! threshold checks, ensuring compatibility with floating-point operations
//! and formatting.
//!
//! # Traits
//!
//! - [`Value`]: Extends `Float` to provide:
//!   - Canonical `two()` and `sqrt_two()` constants.
//!   - `abs_diff` for pointwise deviations.
//! - [`CoordExt`]: x/y iteration and range helpers for `(x, y)` slices.
//!
//! # Example
//!
//! ```rust
//! use idealfit::value::{CoordExt, Value};
//!
//! let data = vec![(0.0, 1.0), (1.0, 3.0), (2.0, 7.0)];
//! let x_range = data.x_range().unwrap();
//! assert_eq!(x_range, 0.0..2.0);
//!
//! let threshold = 1.5 * f64::sqrt_two();
//! ```
use std::ops::Range;

/// Numeric type for sampled functions
pub trait Value:
    num_traits::Float + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
    /// Returns the value 2.0
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Returns the value sqrt(2), the factor applied to a candidate's
    /// maximum training deviation to form its assignment threshold.
    #[must_use]
    fn sqrt_two() -> Self {
        Self::two().sqrt()
    }

    /// Returns the absolute difference between two values.
    #[must_use]
    fn abs_diff(self, other: Self) -> Self {
        (self - other).abs()
    }
}

impl<T> Value for T where
    T: num_traits::Float + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
}

/// Extension trait for accessing the `x` and `y` coordinates of a type.
///
/// This trait is intended for any type that conceptually represents a set of
/// 2D coordinates. Implementations should provide accessors that return the
/// respective coordinate values.
///
/// # Examples
///
/// ```
/// # use idealfit::value::CoordExt;
/// let data = vec![(1.5, -2.0), (2.0, 3.0), (0.0, 1.0)];
/// println!("{:?}", data.y());
/// ```
pub trait CoordExt<T: Value> {
    /// Returns an iterator over the x-coordinates of this value.
    fn x_iter(&self) -> impl Iterator<Item = T>;

    /// Returns an iterator over the y-coordinates of this value.
    fn y_iter(&self) -> impl Iterator<Item = T>;

    /// Returns the x-coordinates of this value.
    fn x(&self) -> Vec<T> {
        self.x_iter().collect()
    }

    /// Returns the y-coordinates of this value.
    fn y(&self) -> Vec<T> {
        self.y_iter().collect()
    }

    /// Returns the range of x-coordinates of this value.
    fn x_range(&self) -> Option<Range<T>> {
        let bounds = self.x_iter().fold(None, |acc: Option<(T, T)>, x| {
            Some(match acc {
                Some((min, max)) => (min.min(x), max.max(x)),
                None => (x, x),
            })
        });
        bounds.map(|(start, end)| start..end)
    }

    /// Returns the range of y-coordinates of this value.
    fn y_range(&self) -> Option<Range<T>> {
        let bounds = self.y_iter().fold(None, |acc: Option<(T, T)>, y| {
            Some(match acc {
                Some((min, max)) => (min.min(y), max.max(y)),
                None => (y, y),
            })
        });
        bounds.map(|(start, end)| start..end)
    }
}
impl<T: Value> CoordExt<T> for Vec<(T, T)> {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(_, y)| *y)
    }
}
impl<T: Value> CoordExt<T> for &[(T, T)] {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(_, y)| *y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt_two_squares_back() {
        crate::assert_close!(f64::sqrt_two() * f64::sqrt_two(), 2.0, 1e-12);
    }

    #[test]
    fn coord_ranges() {
        let data = vec![(1.5, -2.0), (2.0, 3.0), (0.0, 1.0)];
        assert_eq!(data.x_range(), Some(0.0..2.0));
        assert_eq!(data.y_range(), Some(-2.0..3.0));

        let empty: Vec<(f64, f64)> = vec![];
        assert_eq!(empty.x_range(), None);
    }

    #[test]
    fn coord_iterators() {
        let data = vec![(0.0, 1.0), (1.0, 2.0)];
        assert_eq!(data.x(), vec![0.0, 1.0]);
        assert_eq!(data.y(), vec![1.0, 2.0]);
    }
}
