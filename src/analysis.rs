use std::{collections::BTreeMap, fmt};

use crate::{
    assign::{assign_test_points, AssignmentRecord},
    error::{Error, Result},
    function::{CandidateFunction, SampledFunction},
    matcher::{match_functions, MatchResult},
    value::Value,
};

/// A complete matching-and-assignment run over one set of inputs.
///
/// `Analysis` owns the reference functions and the candidate pool, and
/// enforces the two-phase workflow in its API: [`Analysis::run_matching`]
/// must complete before [`Analysis::assign`] can classify test points,
/// because assignment thresholds are recorded during matching. After each
/// phase the results are available as plain read-only snapshots for
/// persistence or rendering.
///
/// # Example
/// ```
/// # use std::collections::BTreeMap;
/// # use idealfit::{Analysis, CandidateFunction, SampledFunction};
/// let mut references = BTreeMap::new();
/// references.insert(1, SampledFunction::new("train_1", vec![(0.0, 0.0), (1.0, 1.0)])?);
///
/// let mut candidates = BTreeMap::new();
/// candidates.insert(
///     1,
///     CandidateFunction::new(1, SampledFunction::new("ideal_1", vec![(0.0, 0.0), (1.0, 1.0)])?),
/// );
///
/// let mut analysis = Analysis::new(references, candidates);
/// analysis.run_matching()?;
/// let records = analysis.assign(&[(0.5, 0.5)])?;
/// assert!(records[0].is_assigned());
/// # idealfit::error::Result::Ok(())
/// ```
#[derive(Debug, Clone)]
pub struct Analysis<'data, T: Value = f64> {
    references: BTreeMap<u32, SampledFunction<'data, T>>,
    candidates: BTreeMap<u32, CandidateFunction<'data, T>>,
    results: Option<BTreeMap<u32, MatchResult<T>>>,
}
impl<'data, T: Value> Analysis<'data, T> {
    /// Creates a new analysis over reference functions and a candidate pool.
    ///
    /// Both maps are keyed by the small integer ids the loader supplies
    /// (conventionally 1..4 for references and 1..50 for candidates).
    #[must_use]
    pub fn new(
        references: BTreeMap<u32, SampledFunction<'data, T>>,
        candidates: BTreeMap<u32, CandidateFunction<'data, T>>,
    ) -> Self {
        Self {
            references,
            candidates,
            results: None,
        }
    }

    /// Returns the reference functions.
    #[must_use]
    pub fn references(&self) -> &BTreeMap<u32, SampledFunction<'data, T>> {
        &self.references
    }

    /// Returns the candidate pool.
    #[must_use]
    pub fn candidates(&self) -> &BTreeMap<u32, CandidateFunction<'data, T>> {
        &self.candidates
    }

    /// Runs the matching phase, selecting one candidate per reference.
    ///
    /// Records each winning candidate's maximum training deviation on the
    /// candidate itself; those deviations become the assignment thresholds.
    /// Running again repeats the full scan and overwrites previous results.
    ///
    /// # Errors
    /// Returns `Error::NoCandidates` if the candidate pool is empty.
    pub fn run_matching(&mut self) -> Result<&BTreeMap<u32, MatchResult<T>>> {
        let results = match_functions(&self.references, &mut self.candidates)?;
        Ok(self.results.insert(results))
    }

    /// Returns the match results, if the matching phase has run.
    #[must_use]
    pub fn match_results(&self) -> Option<&BTreeMap<u32, MatchResult<T>>> {
        self.results.as_ref()
    }

    /// Returns the selected candidate for each reference, keyed by reference number.
    ///
    /// # Errors
    /// Returns `Error::MatchingNotRun` if the matching phase has not run.
    pub fn selections(&self) -> Result<BTreeMap<u32, CandidateFunction<'data, T>>> {
        let results = self.results.as_ref().ok_or(Error::MatchingNotRun)?;

        let mut selections = BTreeMap::new();
        for (&reference, result) in results {
            if let Some(candidate) = self.candidates.get(&result.selected_candidate) {
                selections.insert(reference, candidate.clone());
            }
        }
        Ok(selections)
    }

    /// Runs the assignment phase, classifying each test point.
    ///
    /// See [`assign_test_points`] for the threshold rule. One record is
    /// returned per input point, in input order.
    ///
    /// # Errors
    /// Returns `Error::MatchingNotRun` if the matching phase has not run.
    pub fn assign(&self, points: &[(T, T)]) -> Result<Vec<AssignmentRecord<T>>> {
        let selections = self.selections()?;
        assign_test_points(points, &selections)
    }

    /// Returns a printable summary of the matching phase.
    ///
    /// # Errors
    /// Returns `Error::MatchingNotRun` if the matching phase has not run.
    pub fn summary(&self) -> Result<Summary<'_, T>> {
        let results = self.results.as_ref().ok_or(Error::MatchingNotRun)?;
        Ok(Summary { results })
    }
}

/// Printable view of a completed matching phase.
///
/// One line per reference, listing the selected candidate and its deviation
/// statistics.
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a, T: Value = f64> {
    results: &'a BTreeMap<u32, MatchResult<T>>,
}
impl<T: Value> fmt::Display for Summary<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matched {} reference function(s):", self.results.len())?;
        for (reference, result) in self.results {
            writeln!(
                f,
                "  reference {reference} -> candidate {} (total deviation: {:.4}, max point deviation: {:.4})",
                result.selected_candidate, result.total_deviation, result.max_point_deviation
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Analysis<'static> {
        let mut references = BTreeMap::new();
        references.insert(
            1,
            SampledFunction::new("train_1", vec![(0.0, 0.1), (1.0, 1.1), (2.0, 1.9)]).unwrap(),
        );
        references.insert(
            2,
            SampledFunction::new("train_2", vec![(0.0, 5.0), (1.0, 5.2), (2.0, 4.9)]).unwrap(),
        );

        let mut candidates = BTreeMap::new();
        for (number, data) in [
            (1, vec![(0.0, 0.0), (2.0, 2.0)]),   // y = x
            (2, vec![(0.0, 5.0), (2.0, 5.0)]),   // y = 5
            (3, vec![(0.0, -20.0), (2.0, 20.0)]), // steep line
        ] {
            candidates.insert(
                number,
                CandidateFunction::new(
                    number,
                    SampledFunction::new(format!("ideal_{number}"), data).unwrap(),
                ),
            );
        }

        Analysis::new(references, candidates)
    }

    #[test]
    fn assignment_requires_matching() {
        let analysis = fixture();
        assert!(matches!(
            analysis.assign(&[(0.0, 0.0)]),
            Err(Error::MatchingNotRun)
        ));
        assert!(matches!(analysis.selections(), Err(Error::MatchingNotRun)));
        assert!(analysis.match_results().is_none());
    }

    #[test]
    fn full_run_matches_and_assigns() {
        let mut analysis = fixture();
        let results = analysis.run_matching().unwrap();
        assert_eq!(results[&1].selected_candidate, 1);
        assert_eq!(results[&2].selected_candidate, 2);

        let selections = analysis.selections().unwrap();
        assert_eq!(selections[&1].number(), 1);
        assert_eq!(selections[&2].number(), 2);
        assert!(selections[&1].max_training_deviation().is_some());

        let points = [(1.0, 1.05), (1.0, 5.1), (1.0, 100.0)];
        let records = analysis.assign(&points).unwrap();
        assert_eq!(records.len(), points.len());

        assert_eq!(records[0].candidate(), Some(1));
        assert_eq!(records[0].reference(), Some(1));
        assert_eq!(records[1].candidate(), Some(2));
        assert_eq!(records[1].reference(), Some(2));
        assert!(!records[2].is_assigned());
    }

    #[test]
    fn summary_lists_each_reference() {
        let mut analysis = fixture();
        analysis.run_matching().unwrap();

        let text = analysis.summary().unwrap().to_string();
        assert!(text.contains("Matched 2 reference function(s)"));
        assert!(text.contains("reference 1 -> candidate 1"));
        assert!(text.contains("reference 2 -> candidate 2"));
    }
}
