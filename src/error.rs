//! Error types for function matching and test point assignment
//!
//! This module defines the common errors encountered when constructing sampled
//! functions, matching them against a candidate pool, or assigning test points,
//! along with a convenient `Result` alias.

/// Errors that can occur during function matching and assignment.
///
/// This enum represents the common failure modes when constructing sampled
/// functions, running the matcher, or assigning test points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A function was constructed with no samples.
    #[error("Function `{id}` has no samples")]
    EmptySamples {
        /// Identifier of the offending function
        id: String,
    },

    /// A function was constructed from x/y columns of different lengths.
    #[error("Function `{id}` has mismatched sample columns [x: {xs}, y: {ys}]")]
    LengthMismatch {
        /// Identifier of the offending function
        id: String,
        /// Number of x samples supplied
        xs: usize,
        /// Number of y samples supplied
        ys: usize,
    },

    /// A sample contained a NaN or infinite coordinate.
    #[error("Function `{id}` has a non-finite sample at index {index}")]
    NonFiniteSample {
        /// Identifier of the offending function
        id: String,
        /// Index of the bad sample
        index: usize,
    },

    /// The x coordinates of a function were not strictly increasing.
    #[error("Function `{id}` has a duplicate or decreasing x value at index {index}")]
    NonIncreasingX {
        /// Identifier of the offending function
        id: String,
        /// Index of the first out-of-order sample
        index: usize,
    },

    /// Matching was attempted with an empty candidate pool.
    ///
    /// There is no partial or best-effort result; the run is fatal for the
    /// named reference.
    #[error("No candidates supplied while matching reference `{reference}`")]
    NoCandidates {
        /// Identifier of the reference function being matched
        reference: String,
    },

    /// A test point was evaluated against a candidate that was never matched.
    ///
    /// The matcher must run to completion before assignment starts; hitting
    /// this error signals a usage-ordering bug upstream.
    #[error("Candidate `{candidate}` has no training deviation; run matching first")]
    ThresholdNotSet {
        /// Identifier of the unmatched candidate
        candidate: String,
    },

    /// Assignment was requested from an analysis whose matching phase has not run.
    #[error("Matching has not been run for this analysis")]
    MatchingNotRun,

    /// A dataset table could not be parsed.
    #[error("Malformed table at line {line}: {message}")]
    MalformedTable {
        /// 1-based line number within the source text
        line: usize,
        /// Description of what went wrong on that line
        message: String,
    },

    /// Functions written into one wide table did not share their x grid.
    #[error("Functions `{first}` and `{second}` are sampled on different x grids")]
    GridMismatch {
        /// Identifier of the function supplying the grid
        first: String,
        /// Identifier of the function that disagrees
        second: String,
    },

    /// A dataset file could not be read or a result table could not be written.
    #[error("Failed to read or write dataset: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON results report could not be serialized.
    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Result type for function matching and assignment
pub type Result<T> = std::result::Result<T, Error>;
