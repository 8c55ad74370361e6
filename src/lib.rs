//! # Idealfit
//! ## Which of these fifty functions does your data actually follow?
//!
//! Given a handful of observed training datasets and a larger pool of
//! candidate ("ideal") functions, this library selects the best-fitting
//! candidate for each dataset by least-squares deviation, then classifies
//! unseen test points as belonging to one of the selected candidates or to
//! none of them.
//!
//! It is designed for developers who need the selection and classification
//! results without worrying about interpolation grids, tie-breaking, or
//! threshold edge cases.
//!
//! The workflow has exactly two phases, and the API enforces their order:
//! 1. **Matching** — every reference (training) function is scored against
//!    every candidate with a summed squared deviation, the minimum wins, and
//!    the winner records the largest single-point deviation it had from the
//!    training data.
//! 2. **Assignment** — every test point is checked against the selected
//!    candidates; it qualifies for a candidate when its distance from the
//!    candidate's curve is at most `sqrt(2)` times that recorded deviation,
//!    and the closest qualifying candidate wins. Points qualifying for no
//!    candidate stay unassigned.
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use idealfit::{Analysis, CandidateFunction, SampledFunction};
//!
//! // One training dataset, two candidates
//! let mut references = BTreeMap::new();
//! references.insert(1, SampledFunction::new("train_1", vec![(0.0, 0.1), (1.0, 1.1), (2.0, 2.0)])?);
//!
//! let mut candidates = BTreeMap::new();
//! for (number, data) in [(1, vec![(0.0, 0.0), (2.0, 2.0)]), (2, vec![(0.0, 5.0), (2.0, 5.0)])] {
//!     let function = SampledFunction::new(format!("ideal_{number}"), data)?;
//!     candidates.insert(number, CandidateFunction::new(number, function));
//! }
//!
//! let mut analysis = Analysis::new(references, candidates);
//! analysis.run_matching()?;
//!
//! let records = analysis.assign(&[(0.5, 0.45), (0.5, 42.0)])?;
//! assert_eq!(records[0].candidate(), Some(1));
//! assert!(!records[1].is_assigned());
//! # idealfit::error::Result::Ok(())
//! ```
//!
//! # Core Concepts
//! - A [`SampledFunction`] is a sampled 1-D function: ordered `(x, y)` points
//!   with strictly increasing x. It answers "what is y at an arbitrary x" via
//!   linear interpolation, extrapolating along its boundary segments.
//! - A [`CandidateFunction`] is a pool function used as a match target. After
//!   matching it carries the `max_training_deviation` that drives its
//!   assignment threshold.
//! - [`MatchResult`] records, per reference, the selected candidate and its
//!   deviation statistics.
//! - [`AssignmentRecord`] records, per test point, the winning candidate or
//!   that no candidate qualified.
//! - [`Analysis`] owns one run end to end and keeps assignment from starting
//!   before matching has completed.
//!
//! All determinism is by construction: candidates and selections are scanned
//! in ascending numeric order, and only strictly smaller deviations replace
//! the current best, so equal inputs produce equal outputs.
//!
//! # Features
//! - `synthesis` *(default)*: build synthetic candidate pools and noisy
//!   training sets from closures ([`synth`]).
//! - `plotting`: render matches and assignments to a PNG ([`plot`]).
//! - `parallel`: evaluate references and test points with rayon fork-join.
//!   Partitioning is by reference for matching and by point for assignment,
//!   so results are identical to the single-threaded run.
//!
//! # Testing utilities
//!
//! This crate includes tolerance-based assertion macros for validating
//! numeric results. See [`test`].
//!
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)] // I don't care about this one
#![allow(clippy::module_name_repetitions)]

pub mod test;

#[cfg(feature = "plotting")]
pub mod plot;

#[cfg(feature = "synthesis")]
pub mod synth;

pub mod assign;
pub mod dataset;
pub mod deviation;
pub mod error;
pub mod matcher;
pub mod sink;
pub mod value;

mod analysis;
mod function;

pub use analysis::{Analysis, Summary};
pub use assign::{Assignment, AssignmentRecord};
pub use function::{CandidateFunction, SampledFunction};
pub use matcher::MatchResult;
