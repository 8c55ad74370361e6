use std::{borrow::Cow, ops::Range};

use crate::{
    error::{Error, Result},
    value::{CoordExt, Value},
};

/// Represents a sampled 1-D function as an ordered set of `(x, y)` points.
///
/// A `SampledFunction` answers "what is y at an arbitrary x" via linear
/// interpolation between its samples, with edge extrapolation using the
/// nearest boundary segment. It is the common shape for both observed
/// training datasets and the ideal candidate pool.
///
/// # Invariants
/// Enforced at construction, immutable afterwards:
/// - at least one sample,
/// - every coordinate finite,
/// - x values strictly increasing.
///
/// # Type parameters
/// - `T`: Numeric type (default `f64`) implementing [`Value`].
///
/// # Example
/// ```
/// # use idealfit::SampledFunction;
/// let f = SampledFunction::new("train_1", vec![(0.0, 0.0), (2.0, 4.0), (4.0, 8.0)]).unwrap();
/// assert_eq!(f.interpolate(1.0), 2.0);
/// assert_eq!(f.interpolate(5.0), 10.0); // extrapolated along the last segment
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SampledFunction<'data, T: Value = f64> {
    id: String,
    data: Cow<'data, [(T, T)]>,
}
impl<'data, T: Value> SampledFunction<'data, T> {
    /// Creates a new sampled function from `(x, y)` points.
    ///
    /// # Errors
    /// Returns an [`Error`] in the following cases:
    /// - `Error::EmptySamples`: `data` is empty.
    /// - `Error::NonFiniteSample`: a coordinate is NaN or infinite.
    /// - `Error::NonIncreasingX`: an x value repeats or decreases.
    pub fn new(id: impl Into<String>, data: impl Into<Cow<'data, [(T, T)]>>) -> Result<Self> {
        let id = id.into();
        let data: Cow<_> = data.into();

        if data.is_empty() {
            return Err(Error::EmptySamples { id });
        }

        for (index, (x, y)) in data.iter().enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(Error::NonFiniteSample { id, index });
            }
            if index > 0 && data[index - 1].0 >= *x {
                return Err(Error::NonIncreasingX { id, index });
            }
        }

        Ok(Self { id, data })
    }

    /// Creates a new sampled function from separate x and y columns.
    ///
    /// This is the loader-facing constructor; wide tables supply one shared
    /// x column and one y column per function.
    ///
    /// # Errors
    /// Returns `Error::LengthMismatch` if the columns differ in length, or
    /// any of the errors of [`SampledFunction::new`].
    pub fn from_columns(id: impl Into<String>, xs: &[T], ys: &[T]) -> Result<SampledFunction<'static, T>> {
        let id = id.into();
        if xs.len() != ys.len() {
            return Err(Error::LengthMismatch {
                id,
                xs: xs.len(),
                ys: ys.len(),
            });
        }

        let data: Vec<(T, T)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        SampledFunction::new(id, data)
    }

    /// Returns the opaque identifier of this function.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the `(x, y)` samples of this function.
    #[must_use]
    pub fn data(&self) -> &[(T, T)] {
        &self.data
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; a function cannot be constructed without samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the range spanned by the x samples.
    #[must_use]
    pub fn x_range(&self) -> Range<T> {
        let data = self.data();
        data.first().map(|(x, _)| *x).unwrap_or_else(T::zero)
            ..data.last().map(|(x, _)| *x).unwrap_or_else(T::zero)
    }

    /// Evaluates the function at an arbitrary `x` by linear interpolation.
    ///
    /// # Behavior
    /// - `x` inside the sampled range: linear interpolation on the bracketing
    ///   segment. An exact sample hit returns the stored `y` unchanged.
    /// - `x` below the first sample: extrapolation along the first segment.
    /// - `x` above the last sample: extrapolation along the last segment.
    /// - A single-sample function returns its `y` for every `x`.
    ///
    /// Never fails; extrapolation is always defined.
    ///
    /// # Example
    /// ```
    /// # use idealfit::SampledFunction;
    /// let f = SampledFunction::new("f", vec![(0.0, 0.0), (2.0, 4.0)]).unwrap();
    /// assert_eq!(f.interpolate(-1.0), -2.0);
    /// ```
    #[must_use]
    pub fn interpolate(&self, x: T) -> T {
        let data = self.data();
        if data.len() == 1 {
            return data[0].1;
        }

        // First sample at or beyond x
        let i = data.partition_point(|&(sx, _)| sx < x);
        if i < data.len() && data[i].0 == x {
            return data[i].1;
        }

        let (i0, i1) = if i == 0 {
            (0, 1)
        } else if i >= data.len() {
            (data.len() - 2, data.len() - 1)
        } else {
            (i - 1, i)
        };

        let (x0, y0) = data[i0];
        let (x1, y1) = data[i1];
        let t = (x - x0) / (x1 - x0);
        y0 + t * (y1 - y0)
    }

    /// Evaluates the function at each value of an iterator, returning `(x, y)` pairs.
    pub fn solve(&self, x: impl Iterator<Item = T>) -> Vec<(T, T)> {
        x.map(|x| (x, self.interpolate(x))).collect()
    }
}

impl<T: Value> CoordExt<T> for SampledFunction<'_, T> {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.data().iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.data().iter().map(|(_, y)| *y)
    }
}

/// A function from the ideal pool, used as a match target.
///
/// Wraps a [`SampledFunction`] together with the pool number it was loaded
/// under and the maximum single-point training deviation recorded by the
/// matcher. The deviation starts out unset; the matcher writes it exactly
/// once per matching run (a later run overwrites), and the assigner reads it
/// to derive the admission threshold.
///
/// Candidates are shared-read, single-writer: exactly one matching phase may
/// target a candidate set at a time. This is a documented precondition of the
/// analysis run, not an enforced lock.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFunction<'data, T: Value = f64> {
    number: u32,
    function: SampledFunction<'data, T>,
    max_training_deviation: Option<T>,
}
impl<'data, T: Value> CandidateFunction<'data, T> {
    /// Creates a new candidate from a sampled function and its pool number.
    #[must_use]
    pub fn new(number: u32, function: SampledFunction<'data, T>) -> Self {
        Self {
            number,
            function,
            max_training_deviation: None,
        }
    }

    /// Returns the pool number of this candidate.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Returns the opaque identifier of the underlying function.
    #[must_use]
    pub fn id(&self) -> &str {
        self.function.id()
    }

    /// Returns the underlying sampled function.
    #[must_use]
    pub fn function(&self) -> &SampledFunction<'data, T> {
        &self.function
    }

    /// Evaluates the candidate at `x`. See [`SampledFunction::interpolate`].
    #[must_use]
    pub fn interpolate(&self, x: T) -> T {
        self.function.interpolate(x)
    }

    /// Returns the maximum single-point training deviation, if a matcher has set it.
    #[must_use]
    pub fn max_training_deviation(&self) -> Option<T> {
        self.max_training_deviation
    }

    /// Records the maximum single-point training deviation for this candidate.
    ///
    /// Called by the matcher for each winning candidate; a later call
    /// overwrites the previous value.
    pub fn set_max_training_deviation(&mut self, deviation: T) {
        self.max_training_deviation = Some(deviation);
    }

    /// Returns the admission threshold `sqrt(2) * max_training_deviation`.
    ///
    /// `None` until the matcher has recorded a training deviation. A zero
    /// threshold is valid and admits only points that land exactly on the
    /// candidate's interpolated curve.
    #[must_use]
    pub fn threshold(&self) -> Option<T> {
        self.max_training_deviation.map(|d| d * T::sqrt_two())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staircase() -> SampledFunction<'static> {
        SampledFunction::new("f", vec![(0.0, 0.0), (2.0, 4.0), (4.0, 8.0)]).unwrap()
    }

    #[test]
    fn construction_rejects_empty() {
        let err = SampledFunction::<f64>::new("f", vec![]).unwrap_err();
        assert!(matches!(err, Error::EmptySamples { .. }));
    }

    #[test]
    fn construction_rejects_non_finite() {
        let err = SampledFunction::new("f", vec![(0.0, f64::NAN)]).unwrap_err();
        assert!(matches!(err, Error::NonFiniteSample { index: 0, .. }));

        let err = SampledFunction::new("f", vec![(0.0, 1.0), (f64::INFINITY, 2.0)]).unwrap_err();
        assert!(matches!(err, Error::NonFiniteSample { index: 1, .. }));
    }

    #[test]
    fn construction_rejects_unsorted_x() {
        let err = SampledFunction::new("f", vec![(0.0, 1.0), (0.0, 2.0)]).unwrap_err();
        assert!(matches!(err, Error::NonIncreasingX { index: 1, .. }));

        let err = SampledFunction::new("f", vec![(1.0, 1.0), (0.5, 2.0)]).unwrap_err();
        assert!(matches!(err, Error::NonIncreasingX { index: 1, .. }));
    }

    #[test]
    fn from_columns_rejects_mismatched_lengths() {
        let err = SampledFunction::from_columns("f", &[0.0, 1.0], &[1.0]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { xs: 2, ys: 1, .. }));
    }

    #[test]
    fn interpolation_is_exact_at_samples() {
        let f = staircase();
        for &(x, y) in f.data() {
            assert_eq!(f.interpolate(x), y);
        }

        // Exact hits must return the stored y even when the linear formula
        // would lose precision.
        let g = SampledFunction::new("g", vec![(0.0, 1e16), (1.0, 1.0)]).unwrap();
        assert_eq!(g.interpolate(1.0), 1.0);
    }

    #[test]
    fn interpolation_between_samples() {
        let f = staircase();
        assert_eq!(f.interpolate(1.0), 2.0);
        assert_eq!(f.interpolate(3.0), 6.0);
    }

    #[test]
    fn extrapolation_uses_boundary_segments() {
        let f = staircase();
        assert_eq!(f.interpolate(-1.0), -2.0);
        assert_eq!(f.interpolate(5.0), 10.0);
    }

    #[test]
    fn single_sample_is_constant() {
        let f = SampledFunction::new("f", vec![(1.0, 7.0)]).unwrap();
        assert_eq!(f.interpolate(1.0), 7.0);
        assert_eq!(f.interpolate(-100.0), 7.0);
        assert_eq!(f.interpolate(100.0), 7.0);
    }

    #[test]
    fn candidate_threshold_follows_training_deviation() {
        let mut candidate = CandidateFunction::new(1, staircase());
        assert_eq!(candidate.threshold(), None);

        candidate.set_max_training_deviation(1.0);
        crate::assert_close!(candidate.threshold().unwrap(), 2.0_f64.sqrt(), 1e-15);

        candidate.set_max_training_deviation(0.0);
        assert_eq!(candidate.threshold(), Some(0.0));
    }
}
