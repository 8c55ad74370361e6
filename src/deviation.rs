//! Deviation metrics between a reference function and another function.
//!
//! Both metrics walk the *reference* function's samples and evaluate the
//! other function at each reference x by interpolation. The reference
//! operand always supplies the evaluation grid; swapping the operands
//! changes the grid and therefore the result, so neither function here is
//! symmetric in general.
//!
//! - [`least_squares_deviation`]: summed squared differences, used by the
//!   matcher to rank candidates.
//! - [`point_deviations`]: absolute difference per reference sample, used to
//!   derive the assignment threshold.
//!
//! # Example
//!
//! ```rust
//! use idealfit::{deviation::least_squares_deviation, SampledFunction};
//!
//! let reference = SampledFunction::new("train_1", vec![(0.0, 1.0), (1.0, 2.0)]).unwrap();
//! let candidate = SampledFunction::new("ideal_7", vec![(0.0, 1.5), (1.0, 2.5)]).unwrap();
//!
//! let deviation = least_squares_deviation(&reference, &candidate);
//! assert_eq!(deviation, 0.5);
//! ```
use crate::{function::SampledFunction, value::Value};

/// Computes the summed squared deviation between `reference` and `other`.
///
/// For each `(x, y)` sample of `reference`, evaluates `other` at `x` by
/// interpolation and accumulates `(y - interpolated)^2`.
///
/// The sum is deliberately not normalized by sample count: the matcher only
/// compares deviations of different candidates against the *same* reference,
/// so the scale cancels out, and downstream consumers rely on the raw sum.
/// As a consequence the value is not comparable across references with
/// different sample counts.
#[must_use]
pub fn least_squares_deviation<T: Value>(
    reference: &SampledFunction<T>,
    other: &SampledFunction<T>,
) -> T {
    reference.data().iter().fold(T::zero(), |acc, &(x, y)| {
        let delta = y - other.interpolate(x);
        acc + delta * delta
    })
}

/// Computes the absolute deviation at each reference sample.
///
/// Same iteration as [`least_squares_deviation`], but returns
/// `|y - interpolated|` per point, preserving the reference's sample order.
/// The maximum of this sequence becomes the winning candidate's
/// `max_training_deviation`.
#[must_use]
pub fn point_deviations<T: Value>(
    reference: &SampledFunction<T>,
    other: &SampledFunction<T>,
) -> Vec<T> {
    reference
        .data()
        .iter()
        .map(|&(x, y)| y.abs_diff(other.interpolate(x)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function(id: &str, data: Vec<(f64, f64)>) -> SampledFunction<'static> {
        SampledFunction::new(id, data).unwrap()
    }

    #[test]
    fn deviation_is_zero_iff_exact() {
        let reference = function("r", vec![(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]);
        let exact = function("e", vec![(0.0, 0.0), (4.0, 8.0)]);
        let offset = function("o", vec![(0.0, 1.0), (4.0, 9.0)]);

        assert_eq!(least_squares_deviation(&reference, &exact), 0.0);
        assert!(least_squares_deviation(&reference, &offset) > 0.0);
    }

    #[test]
    fn deviation_accumulates_squares() {
        let reference = function("r", vec![(0.0, 1.0), (1.0, 2.0)]);
        let other = function("o", vec![(0.0, 1.5), (1.0, 4.0)]);

        // (1 - 1.5)^2 + (2 - 4)^2
        crate::assert_close!(least_squares_deviation(&reference, &other), 4.25, 1e-12);
    }

    #[test]
    fn deviation_is_not_symmetric() {
        // The reference operand supplies the evaluation grid, so swapping
        // the operands evaluates at different x values.
        let dense = function("dense", vec![(0.0, 0.0), (1.0, 3.0), (2.0, 0.0)]);
        let sparse = function("sparse", vec![(0.0, 0.0), (2.0, 0.0)]);

        let forward = least_squares_deviation(&dense, &sparse);
        let backward = least_squares_deviation(&sparse, &dense);
        assert_eq!(forward, 9.0);
        assert_eq!(backward, 0.0);
    }

    #[test]
    fn point_deviations_preserve_order() {
        let reference = function("r", vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]);
        let other = function("o", vec![(0.0, 0.0), (2.0, 4.0)]);

        let deviations = point_deviations(&reference, &other);
        crate::assert_all_close!(deviations, [1.0, 0.0, 1.0], 1e-12);
    }

    #[test]
    fn point_deviations_are_non_negative() {
        let reference = function("r", vec![(0.0, -5.0), (1.0, 5.0)]);
        let other = function("o", vec![(0.0, 5.0), (1.0, -5.0)]);

        for d in point_deviations(&reference, &other) {
            assert!(d >= 0.0);
        }
    }
}
