//! The CSV path: parse a wide function table and a point table from text,
//! then run both phases. File-based loading works the same way through
//! `dataset::load_function_table` / `dataset::load_point_table`.
use idealfit::{dataset, error::Result, Analysis};

const TRAIN: &str = "\
x,y1,y2
0.0,0.1,5.0
1.0,1.9,5.1
2.0,4.1,4.9
3.0,6.0,5.2
";

const IDEAL: &str = "\
x,y1,y2,y3
0.0,0.0,5.0,-10.0
3.0,6.0,5.0,10.0
";

const TEST: &str = "\
x,y
0.5,1.0
1.5,5.05
2.5,-40.0
";

fn main() -> Result<()> {
    let references = dataset::parse_function_table(TRAIN, "train")?;
    let candidates = dataset::into_candidates(dataset::parse_function_table(IDEAL, "ideal")?);
    let points = dataset::parse_point_table(TEST)?;

    let mut analysis = Analysis::new(references, candidates);
    analysis.run_matching()?;
    print!("{}", analysis.summary()?);

    for record in analysis.assign(&points)? {
        match record.assigned {
            Some(assignment) => println!(
                "({}, {}) -> candidate {} via train {} (deviation {:.4})",
                record.x, record.y, assignment.candidate, assignment.reference, assignment.deviation
            ),
            None => println!("({}, {}) -> unassigned", record.x, record.y),
        }
    }

    Ok(())
}
