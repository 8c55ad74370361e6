//! End-to-end run on synthetic data: build a candidate pool from closures,
//! derive noisy training sets from three of them, match, then classify
//! scattered test points.
use std::collections::BTreeMap;

use idealfit::{error::Result, synth, Analysis};

fn main() -> Result<()> {
    //
    // A small pool of shapes; the training data secretly follows 2, 5, and 9.
    let pool = synth::candidate_pool(
        [
            (1, (|x| x) as fn(f64) -> f64),
            (2, |x| 2.0 * x + 1.0),
            (3, |x| -x),
            (4, |x| 0.5 * x * x),
            (5, |x| x.sin() * 10.0),
            (6, |x| x * x * x * 0.01),
            (7, |x| 25.0 - x),
            (8, |x| (x * 0.5).cos() * 5.0),
            (9, |x| x.sqrt() * 8.0),
            (10, |x| 40.0 / (x + 1.0)),
        ],
        0.0..=20.0,
        0.25,
    )?;

    let mut references = BTreeMap::new();
    for (number, source) in [(1, 2u32), (2, 5), (3, 9)] {
        let clean = pool[&source].function();
        let noisy = synth::with_normal_noise(format!("train_{number}"), clean, 0.4, Some(number.into()))?;
        references.insert(number, noisy);
    }

    let mut analysis = Analysis::new(references, pool);
    analysis.run_matching()?;
    print!("{}", analysis.summary()?);

    //
    // Test points scattered around candidate 2's curve, plus a few outliers.
    let mut points = synth::scattered_points(pool_function(&analysis, 2), 40, 0.3, Some(99))?;
    points.extend([(5.0, 500.0), (10.0, -300.0)]);

    let records = analysis.assign(&points)?;
    let assigned = records.iter().filter(|r| r.is_assigned()).count();
    println!("Assigned {assigned} out of {} test point(s)", records.len());

    Ok(())
}

fn pool_function<'a>(
    analysis: &'a Analysis<'static>,
    number: u32,
) -> &'a idealfit::SampledFunction<'static> {
    analysis.candidates()[&number].function()
}
