//! Assignment of unclassified test points to selected candidates.
//!
//! Each test point is checked against every selected candidate using the
//! fixed threshold rule `deviation <= sqrt(2) * max_training_deviation`
//! (inclusive). Among qualifying candidates, the strictly smallest deviation
//! wins; selections are visited in ascending reference number, so the first
//! candidate reaching the minimum wins ties. Points with no qualifying
//! candidate stay unassigned.
//!
//! Assignment requires a completed matching phase: every selected candidate
//! must carry a recorded training deviation, and an unset threshold is an
//! error rather than a silent skip.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use idealfit::{assign::assign_test_points, CandidateFunction, SampledFunction};
//!
//! let mut candidate =
//!     CandidateFunction::new(7, SampledFunction::new("ideal_7", vec![(0.0, 0.0), (4.0, 4.0)])?);
//! candidate.set_max_training_deviation(1.0);
//!
//! let mut selections = BTreeMap::new();
//! selections.insert(1, candidate);
//!
//! let records = assign_test_points(&[(2.0, 2.5), (2.0, 40.0)], &selections)?;
//! assert!(records[0].is_assigned());
//! assert!(!records[1].is_assigned());
//! # idealfit::error::Result::Ok(())
//! ```
use std::collections::BTreeMap;

use crate::{
    error::{Error, Result},
    function::CandidateFunction,
    value::Value,
};

/// The winning candidate for an assigned test point.
///
/// Grouping the three fields keeps an assignment all-or-nothing: a record is
/// either fully assigned or carries none of these values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assignment<T: Value = f64> {
    /// Pool number of the candidate the point was assigned to
    pub candidate: u32,

    /// Number of the reference function whose selection won the assignment
    pub reference: u32,

    /// Absolute deviation between the point and the candidate's curve.
    ///
    /// Always within the candidate's threshold.
    pub deviation: T,
}

/// The classification outcome for a single test point.
///
/// One record is emitted per input point, in input order. `x` and `y` are
/// the given coordinates, not derived values.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRecord<T: Value = f64> {
    /// x-coordinate of the test point
    pub x: T,

    /// y-coordinate of the test point
    pub y: T,

    /// The winning candidate, or `None` if no candidate qualified
    pub assigned: Option<Assignment<T>>,
}
impl<T: Value> AssignmentRecord<T> {
    /// True if the point was assigned to a candidate.
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        self.assigned.is_some()
    }

    /// Pool number of the assigned candidate, if any.
    #[must_use]
    pub fn candidate(&self) -> Option<u32> {
        self.assigned.map(|a| a.candidate)
    }

    /// Reference number behind the assignment, if any.
    #[must_use]
    pub fn reference(&self) -> Option<u32> {
        self.assigned.map(|a| a.reference)
    }

    /// Deviation of the assignment, if any.
    #[must_use]
    pub fn deviation(&self) -> Option<T> {
        self.assigned.map(|a| a.deviation)
    }
}

/// Classifies a single point against the selections.
fn assign_point<T: Value>(
    x: T,
    y: T,
    selections: &BTreeMap<u32, CandidateFunction<T>>,
) -> Result<AssignmentRecord<T>> {
    let mut best: Option<Assignment<T>> = None;

    for (&reference, candidate) in selections {
        let threshold = candidate.threshold().ok_or_else(|| Error::ThresholdNotSet {
            candidate: candidate.id().to_string(),
        })?;

        let deviation = y.abs_diff(candidate.interpolate(x));
        let qualifies = deviation <= threshold;
        let improves = best.map_or(true, |b| deviation < b.deviation);
        if qualifies && improves {
            best = Some(Assignment {
                candidate: candidate.number(),
                reference,
                deviation,
            });
        }
    }

    Ok(AssignmentRecord {
        x,
        y,
        assigned: best,
    })
}

/// Assigns each test point to the best qualifying selected candidate.
///
/// `selections` maps reference numbers to the candidates the matcher picked
/// for them; every candidate must already carry its training deviation.
///
/// # Behavior
/// - A point qualifies for a candidate when its absolute deviation from the
///   candidate's interpolated curve is at most `sqrt(2) *
///   max_training_deviation` (boundary inclusive).
/// - Among qualifying candidates the strictly smallest deviation wins; ties
///   resolve to the first candidate in ascending reference number.
/// - A candidate with zero training deviation has a zero threshold and only
///   admits points landing exactly on its curve.
/// - Every input point produces exactly one record, in input order.
///
/// # Errors
/// Returns `Error::ThresholdNotSet` naming the candidate if any selection
/// was never matched. The run is fatal; no partial records are returned.
pub fn assign_test_points<T: Value>(
    points: &[(T, T)],
    selections: &BTreeMap<u32, CandidateFunction<T>>,
) -> Result<Vec<AssignmentRecord<T>>> {
    #[cfg(not(feature = "parallel"))]
    {
        points
            .iter()
            .map(|&(x, y)| assign_point(x, y, selections))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        points
            .par_iter()
            .map(|&(x, y)| assign_point(x, y, selections))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::SampledFunction;

    fn selection(
        reference: u32,
        number: u32,
        data: Vec<(f64, f64)>,
        max_deviation: f64,
    ) -> (u32, CandidateFunction<'static>) {
        let mut candidate = CandidateFunction::new(
            number,
            SampledFunction::new(format!("ideal_{number}"), data).unwrap(),
        );
        candidate.set_max_training_deviation(max_deviation);
        (reference, candidate)
    }

    fn line_selections() -> BTreeMap<u32, CandidateFunction<'static>> {
        // Reference 1 -> candidate 10: y = x, threshold sqrt(2)
        // Reference 2 -> candidate 20: y = -x, threshold 2 * sqrt(2)
        [
            selection(1, 10, vec![(-10.0, -10.0), (10.0, 10.0)], 1.0),
            selection(2, 20, vec![(-10.0, 10.0), (10.0, -10.0)], 2.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn every_point_gets_exactly_one_record() {
        let selections = line_selections();
        let points = [(0.0, 0.5), (5.0, 80.0), (-3.0, -3.0), (1.0, -1.5)];

        let records = assign_test_points(&points, &selections).unwrap();
        assert_eq!(records.len(), points.len());
        for (record, &(x, y)) in records.iter().zip(&points) {
            assert_eq!((record.x, record.y), (x, y));
        }
    }

    #[test]
    fn assigned_fields_are_consistent() {
        let selections = line_selections();
        let records =
            assign_test_points(&[(0.0, 0.5), (5.0, 80.0)], &selections).unwrap();

        for record in records {
            assert_eq!(record.is_assigned(), record.candidate().is_some());
            assert_eq!(record.candidate().is_some(), record.reference().is_some());
            assert_eq!(record.reference().is_some(), record.deviation().is_some());
        }
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        let selections: BTreeMap<_, _> =
            [selection(1, 10, vec![(0.0, 0.0), (10.0, 0.0)], 1.0)]
                .into_iter()
                .collect();

        let on_boundary = 2.0_f64.sqrt();
        let records = assign_test_points(
            &[(5.0, on_boundary), (5.0, on_boundary + 1e-9)],
            &selections,
        )
        .unwrap();

        assert!(records[0].is_assigned());
        crate::assert_close!(records[0].deviation().unwrap(), on_boundary, 1e-15);
        assert!(!records[1].is_assigned());
    }

    #[test]
    fn zero_threshold_admits_only_exact_hits() {
        let selections: BTreeMap<_, _> =
            [selection(1, 10, vec![(0.0, 0.0), (10.0, 10.0)], 0.0)]
                .into_iter()
                .collect();

        let records =
            assign_test_points(&[(5.0, 5.0), (5.0, 5.0 + 1e-12)], &selections).unwrap();
        assert!(records[0].is_assigned());
        assert_eq!(records[0].deviation(), Some(0.0));
        assert!(!records[1].is_assigned());
    }

    #[test]
    fn smallest_deviation_wins() {
        let selections = line_selections();

        // Near y = x, far from y = -x
        let records = assign_test_points(&[(2.0, 2.1)], &selections).unwrap();
        let record = &records[0];
        assert_eq!(record.candidate(), Some(10));
        assert_eq!(record.reference(), Some(1));
        crate::assert_close!(record.deviation().unwrap(), 0.1, 1e-12);
    }

    #[test]
    fn ties_resolve_to_lowest_reference_number() {
        // Two selections with identical curves and thresholds
        let selections: BTreeMap<_, _> = [
            selection(3, 30, vec![(0.0, 0.0), (10.0, 10.0)], 1.0),
            selection(1, 10, vec![(0.0, 0.0), (10.0, 10.0)], 1.0),
        ]
        .into_iter()
        .collect();

        let records = assign_test_points(&[(5.0, 5.5)], &selections).unwrap();
        assert_eq!(records[0].reference(), Some(1));
        assert_eq!(records[0].candidate(), Some(10));
    }

    #[test]
    fn unset_threshold_is_an_error() {
        let mut selections = line_selections();
        selections.insert(
            3,
            CandidateFunction::new(
                30,
                SampledFunction::new("ideal_30", vec![(0.0, 0.0), (1.0, 1.0)]).unwrap(),
            ),
        );

        let err = assign_test_points(&[(0.0, 0.0)], &selections).unwrap_err();
        match err {
            Error::ThresholdNotSet { candidate } => assert_eq!(candidate, "ideal_30"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_point_list_is_fine() {
        let selections = line_selections();
        let records = assign_test_points::<f64>(&[], &selections).unwrap();
        assert!(records.is_empty());
    }
}
