//! Selection of the best-fitting candidate for each reference function.
//!
//! For each reference (training) function, the matcher evaluates the summed
//! squared deviation against every candidate in the ideal pool, selects the
//! minimum, and records the maximum single-point deviation of the winning
//! pair on the candidate itself. That recorded deviation later drives the
//! test point assignment threshold.
//!
//! Candidates are scanned in ascending pool number, and only a strictly
//! smaller deviation replaces the current best, so the first candidate
//! achieving the minimum wins ties and repeated runs produce identical
//! results.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use idealfit::{matcher::match_functions, CandidateFunction, SampledFunction};
//!
//! let mut references = BTreeMap::new();
//! references.insert(1, SampledFunction::new("train_1", vec![(0.0, 0.0), (1.0, 2.0)])?);
//!
//! let mut candidates = BTreeMap::new();
//! candidates.insert(
//!     7,
//!     CandidateFunction::new(7, SampledFunction::new("ideal_7", vec![(0.0, 0.0), (1.0, 2.0)])?),
//! );
//!
//! let results = match_functions(&references, &mut candidates)?;
//! assert_eq!(results[&1].selected_candidate, 7);
//! # idealfit::error::Result::Ok(())
//! ```
use std::collections::BTreeMap;

use crate::{
    deviation::{least_squares_deviation, point_deviations},
    error::{Error, Result},
    function::{CandidateFunction, SampledFunction},
    value::Value,
};

/// The outcome of matching one reference function against the candidate pool.
///
/// # Invariants
/// - `point_deviations` holds one entry per reference sample, in the
///   reference's x order.
/// - `max_point_deviation` equals the maximum of `point_deviations`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<T: Value = f64> {
    /// Pool number of the winning candidate
    pub selected_candidate: u32,

    /// Summed squared deviation of the winning pair.
    ///
    /// Not normalized by sample count; comparable across candidates for the
    /// same reference, but not across references.
    pub total_deviation: T,

    /// Largest absolute deviation at any single reference sample
    pub max_point_deviation: T,

    /// Absolute deviation at each reference sample, in reference order
    pub point_deviations: Vec<T>,
}

/// Per-reference winner before the candidate writes are applied.
struct Selection<T: Value> {
    reference: u32,
    candidate: u32,
    total_deviation: T,
    point_deviations: Vec<T>,
}

/// Scans the candidate pool for the best match to a single reference.
fn best_candidate<T: Value>(
    reference: &SampledFunction<T>,
    candidates: &BTreeMap<u32, CandidateFunction<T>>,
) -> Result<(u32, T, Vec<T>)> {
    let mut best = None;
    let mut min_deviation = T::infinity();

    for (&number, candidate) in candidates {
        let deviation = least_squares_deviation(reference, candidate.function());
        if deviation < min_deviation {
            min_deviation = deviation;
            best = Some((
                number,
                point_deviations(reference, candidate.function()),
            ));
        }
    }

    match best {
        Some((number, deviations)) => Ok((number, min_deviation, deviations)),
        None => Err(Error::NoCandidates {
            reference: reference.id().to_string(),
        }),
    }
}

/// Evaluates every reference against the pool, without mutating the candidates.
///
/// References partition cleanly, so with the `parallel` feature this is a
/// rayon fork-join; the candidate writes happen afterwards, sequentially.
fn evaluate_references<T: Value>(
    references: &BTreeMap<u32, SampledFunction<T>>,
    candidates: &BTreeMap<u32, CandidateFunction<T>>,
) -> Result<Vec<Selection<T>>> {
    let select = |(&reference, function): (&u32, &SampledFunction<T>)| {
        let (candidate, total_deviation, point_deviations) =
            best_candidate(function, candidates)?;
        Ok(Selection {
            reference,
            candidate,
            total_deviation,
            point_deviations,
        })
    };

    #[cfg(not(feature = "parallel"))]
    {
        references.iter().map(select).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        let references: Vec<_> = references.iter().collect();
        references.into_par_iter().map(select).collect()
    }
}

/// Finds the best candidate for every reference function.
///
/// For each reference, every candidate is scored with
/// [`least_squares_deviation`] and the strictly smallest deviation wins;
/// candidates are visited in ascending pool number, so the first candidate
/// reaching the minimum wins ties. The winning candidate's
/// `max_training_deviation` is set to the largest single-point deviation of
/// the pair. When two references select the same candidate, the write of the
/// later reference (higher number) overwrites the earlier one.
///
/// Matching must complete before any assignment starts; the recorded
/// deviations are the assigner's thresholds.
///
/// # Returns
/// One [`MatchResult`] per reference, keyed by reference number.
///
/// # Errors
/// Returns `Error::NoCandidates` naming the first reference (in ascending
/// number order) if the candidate pool is empty. No partial result is
/// produced.
///
/// # Complexity
/// `O(|references| x |candidates| x samples)`. Reference and candidate
/// counts are small (tens); sample counts dominate.
pub fn match_functions<T: Value>(
    references: &BTreeMap<u32, SampledFunction<T>>,
    candidates: &mut BTreeMap<u32, CandidateFunction<T>>,
) -> Result<BTreeMap<u32, MatchResult<T>>> {
    let mut selections = evaluate_references(references, candidates)?;
    selections.sort_by_key(|s| s.reference);

    let mut results = BTreeMap::new();
    for selection in selections {
        let max_point_deviation = selection
            .point_deviations
            .iter()
            .copied()
            .fold(T::zero(), T::max);

        if let Some(winner) = candidates.get_mut(&selection.candidate) {
            winner.set_max_training_deviation(max_point_deviation);
        }

        results.insert(
            selection.reference,
            MatchResult {
                selected_candidate: selection.candidate,
                total_deviation: selection.total_deviation,
                max_point_deviation,
                point_deviations: selection.point_deviations,
            },
        );
    }

    Ok(results)
}
