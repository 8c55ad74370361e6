//! Assertion macros for validating numeric results in tests.
//!
//! Floating-point pipelines rarely produce bit-identical values, so these
//! macros compare within a tolerance instead of using `assert_eq!`:
//!
//! - [`crate::assert_close`]: `assert_eq!` equivalent for floats.
//! - [`crate::assert_all_close`]: element-wise [`crate::assert_close`] over
//!   two sequences, which must also have equal lengths.
//!
//! Both take an optional tolerance; the default is `1e-9`.

/// Asserts that two floating-point values are approximately equal.
///
/// An optional third argument overrides the default tolerance of `1e-9`.
///
/// # Example
/// ```rust
/// idealfit::assert_close!(0.1_f64 + 0.2, 0.3);
/// idealfit::assert_close!(1.0_f64, 1.05, 0.1);
/// ```
#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr) => {
        $crate::assert_close!($left, $right, 1e-9);
    };
    ($left:expr, $right:expr, $eps:expr) => {{
        let (left, right, eps) = ($left, $right, $eps);
        let delta = (left - right).abs();
        assert!(
            delta <= eps,
            "assertion failed: `{left:?}` is not close to `{right:?}` (delta {delta:e}, eps {eps:e})",
        );
    }};
}

/// Asserts that two sequences of floating-point values are approximately
/// equal element-wise, and equal in length.
///
/// An optional third argument overrides the default tolerance of `1e-9`.
///
/// # Example
/// ```rust
/// idealfit::assert_all_close!(vec![0.1_f64 + 0.2, 2.0], [0.3, 2.0]);
/// ```
#[macro_export]
macro_rules! assert_all_close {
    ($left:expr, $right:expr) => {
        $crate::assert_all_close!($left, $right, 1e-9);
    };
    ($left:expr, $right:expr, $eps:expr) => {{
        let left: &[_] = &$left;
        let right: &[_] = &$right;
        assert_eq!(
            left.len(),
            right.len(),
            "assertion failed: sequences differ in length"
        );
        for (index, (l, r)) in left.iter().zip(right.iter()).enumerate() {
            let delta = (l - r).abs();
            assert!(
                delta <= $eps,
                "assertion failed at index {index}: `{l:?}` is not close to `{r:?}` (delta {delta:e})",
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn close_within_default_epsilon() {
        crate::assert_close!(0.1_f64 + 0.2, 0.3);
    }

    #[test]
    #[should_panic(expected = "is not close to")]
    fn close_rejects_large_deltas() {
        crate::assert_close!(1.0_f64, 1.5);
    }

    #[test]
    fn all_close_accepts_vecs_and_arrays() {
        crate::assert_all_close!(vec![1.0_f64, 2.0], [1.0, 2.0 + 1e-12]);
    }

    #[test]
    #[should_panic(expected = "differ in length")]
    fn all_close_rejects_length_mismatch() {
        crate::assert_all_close!([1.0_f64], [1.0, 2.0]);
    }
}
