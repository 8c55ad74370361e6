//! Synthetic dataset generation for demos, benches, and tests.
//!
//! Candidate pools are sampled from plain closures over a stepped x grid,
//! and training sets are derived from a clean function by adding seedable
//! Gaussian noise. Fixing the seed makes a generated dataset reproducible
//! across runs.
//!
//! # Example
//!
//! ```rust
//! use idealfit::synth::{sampled, with_normal_noise};
//!
//! let clean = sampled("ideal_1", |x| 2.0 * x + 1.0, 0.0..=10.0, 0.5)?;
//! let noisy = with_normal_noise("train_1", &clean, 0.1, Some(42))?;
//! assert_eq!(noisy.len(), clean.len());
//! # idealfit::error::Result::Ok(())
//! ```
use std::{collections::BTreeMap, ops::RangeInclusive};

use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::{
    error::{Error, Result},
    function::{CandidateFunction, SampledFunction},
};

/// Samples a closure over a stepped x grid into a function.
///
/// Yields samples at `start`, `start + step`, ... up to and including `end`.
///
/// # Errors
/// Returns a construction error if the grid is empty (`step` larger than the
/// range, or non-positive) or the closure produces non-finite values.
pub fn sampled(
    id: impl Into<String>,
    f: impl Fn(f64) -> f64,
    range: RangeInclusive<f64>,
    step: f64,
) -> Result<SampledFunction<'static>> {
    let id = id.into();
    if step <= 0.0 || !step.is_finite() {
        return Err(Error::EmptySamples { id });
    }

    let mut data = Vec::new();
    let mut index = 0u32;
    loop {
        let x = *range.start() + f64::from(index) * step;
        if x > *range.end() {
            break;
        }
        data.push((x, f(x)));
        index += 1;
    }

    SampledFunction::new(id, data)
}

/// Derives a noisy copy of a function by adding Gaussian noise to each y.
///
/// Each y receives an independent draw from `N(0, sd^2)`. Passing a seed
/// fixes the RNG for reproducibility; without one, a system RNG is used
/// each run.
///
/// # Errors
/// Returns a construction error if `sd` is negative or non-finite.
pub fn with_normal_noise(
    id: impl Into<String>,
    function: &SampledFunction,
    sd: f64,
    seed: Option<u64>,
) -> Result<SampledFunction<'static>> {
    let id = id.into();
    let Ok(noise) = Normal::new(0.0, sd) else {
        return Err(Error::NonFiniteSample { id, index: 0 });
    };

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let data: Vec<(f64, f64)> = function
        .data()
        .iter()
        .map(|&(x, y)| (x, y + noise.sample(&mut rng)))
        .collect();
    SampledFunction::new(id, data)
}

/// Builds a candidate pool from numbered closures over a shared grid.
///
/// Candidates are labeled `ideal_{number}` and keyed by their number.
///
/// # Errors
/// Returns any error of [`sampled`].
pub fn candidate_pool<F: Fn(f64) -> f64>(
    functions: impl IntoIterator<Item = (u32, F)>,
    range: RangeInclusive<f64>,
    step: f64,
) -> Result<BTreeMap<u32, CandidateFunction<'static>>> {
    let mut pool = BTreeMap::new();
    for (number, f) in functions {
        let function = sampled(format!("ideal_{number}"), f, range.clone(), step)?;
        pool.insert(number, CandidateFunction::new(number, function));
    }
    Ok(pool)
}

/// Draws test points uniformly over an x range, scattered around a function.
///
/// Points are spread around the function's curve with Gaussian noise of the
/// given standard deviation, in the random order they are drawn.
///
/// # Errors
/// Returns a construction error if `sd` is negative or non-finite.
pub fn scattered_points(
    function: &SampledFunction,
    count: usize,
    sd: f64,
    seed: Option<u64>,
) -> Result<Vec<(f64, f64)>> {
    let Ok(noise) = Normal::new(0.0, sd) else {
        return Err(Error::NonFiniteSample {
            id: function.id().to_string(),
            index: 0,
        });
    };

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let range = function.x_range();

    Ok((0..count)
        .map(|_| {
            let x = rng.gen_range(range.start..=range.end);
            (x, function.interpolate(x) + noise.sample(&mut rng))
        })
        .collect())
}
