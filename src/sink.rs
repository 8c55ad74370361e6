//! Structured persistence of analysis results.
//!
//! The conventional storage schema for a run has three tables: the training
//! data and the ideal pool as wide `x,y1,...,yN` tables, and the test point
//! outcomes as `x,y,deviation,assigned_ideal_function` rows with empty
//! assignment fields for unassigned points. This module renders those tables
//! as CSV text (the wide form is the exact inverse of
//! [`crate::dataset::parse_function_table`]) and a JSON report of matches and
//! assignments, and writes them to files.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use idealfit::{sink::function_table_to_csv, SampledFunction};
//!
//! let mut functions = BTreeMap::new();
//! functions.insert(2, SampledFunction::new("ideal_2", vec![(0.0, 1.5), (1.0, 2.5)])?);
//!
//! let csv = function_table_to_csv(functions.iter().map(|(&n, f)| (n, f)))?;
//! assert_eq!(csv, "x,y2\n0,1.5\n1,2.5\n");
//! # idealfit::error::Result::Ok(())
//! ```
use std::{collections::BTreeMap, fmt::Write, path::Path};

use crate::{
    assign::AssignmentRecord,
    error::{Error, Result},
    function::SampledFunction,
    matcher::MatchResult,
    Analysis,
};

/// Renders functions as a wide CSV table (`x,y1,...,yN`).
///
/// Columns follow the iteration order of `functions`; pass a `BTreeMap`
/// iterator for ascending numbers. Every function must be sampled on the
/// same x grid, since the table has one shared x column. An empty input
/// yields a bare `x` header.
///
/// # Errors
/// Returns `Error::GridMismatch` naming the two functions if any function's
/// x samples differ from the first function's.
pub fn function_table_to_csv<'a, 'data: 'a>(
    functions: impl IntoIterator<Item = (u32, &'a SampledFunction<'data>)>,
) -> Result<String> {
    let functions: Vec<(u32, &SampledFunction)> = functions.into_iter().collect();

    let mut out = String::from("x");
    for &(number, _) in &functions {
        let _ = write!(out, ",y{number}");
    }
    out.push('\n');

    let Some(&(_, grid)) = functions.first() else {
        return Ok(out);
    };
    for &(_, function) in &functions {
        let same_grid = function.len() == grid.len()
            && function
                .data()
                .iter()
                .zip(grid.data())
                .all(|(a, b)| a.0 == b.0);
        if !same_grid {
            return Err(Error::GridMismatch {
                first: grid.id().to_string(),
                second: function.id().to_string(),
            });
        }
    }

    for (row, &(x, _)) in grid.data().iter().enumerate() {
        let _ = write!(out, "{x}");
        for &(_, function) in &functions {
            let _ = write!(out, ",{}", function.data()[row].1);
        }
        out.push('\n');
    }
    Ok(out)
}

/// Renders assignment records as a CSV table.
///
/// Header `x,y,deviation,assigned_ideal_function`; one row per record in
/// record order, with the last two fields left empty for unassigned points.
#[must_use]
pub fn assignment_table_to_csv(records: &[AssignmentRecord]) -> String {
    let mut out = String::from("x,y,deviation,assigned_ideal_function\n");
    for record in records {
        match record.assigned {
            Some(assignment) => {
                let _ = writeln!(
                    out,
                    "{},{},{},{}",
                    record.x, record.y, assignment.deviation, assignment.candidate
                );
            }
            None => {
                let _ = writeln!(out, "{},{},,", record.x, record.y);
            }
        }
    }
    out
}

/// Builds the JSON report of a completed run.
///
/// `matches` holds one object per reference (candidate and deviation
/// statistics), `assignments` one object per test point with `null`
/// candidate/reference/deviation for unassigned points.
#[must_use]
pub fn match_report(
    results: &BTreeMap<u32, MatchResult>,
    records: &[AssignmentRecord],
) -> serde_json::Value {
    let matches: Vec<_> = results
        .iter()
        .map(|(reference, result)| {
            serde_json::json!({
                "reference": reference,
                "candidate": result.selected_candidate,
                "total_deviation": result.total_deviation,
                "max_point_deviation": result.max_point_deviation,
            })
        })
        .collect();

    let assignments: Vec<_> = records
        .iter()
        .map(|record| {
            serde_json::json!({
                "x": record.x,
                "y": record.y,
                "candidate": record.candidate(),
                "reference": record.reference(),
                "deviation": record.deviation(),
            })
        })
        .collect();

    serde_json::json!({ "matches": matches, "assignments": assignments })
}

/// Writes a wide function table to a CSV file.
///
/// # Errors
/// Returns any error of [`function_table_to_csv`], or `Error::Io` if the
/// file cannot be written.
pub fn write_function_table(
    path: impl AsRef<Path>,
    functions: &BTreeMap<u32, SampledFunction<'_>>,
) -> Result<()> {
    let table = function_table_to_csv(functions.iter().map(|(&number, f)| (number, f)))?;
    std::fs::write(path, table)?;
    Ok(())
}

/// Writes an assignment table to a CSV file.
///
/// # Errors
/// Returns `Error::Io` if the file cannot be written.
pub fn write_assignment_table(
    path: impl AsRef<Path>,
    records: &[AssignmentRecord],
) -> Result<()> {
    std::fs::write(path, assignment_table_to_csv(records))?;
    Ok(())
}

/// Writes the JSON report of a completed run to a file.
///
/// # Errors
/// Returns `Error::Report` if serialization fails, or `Error::Io` if the
/// file cannot be written.
pub fn write_match_report(
    path: impl AsRef<Path>,
    results: &BTreeMap<u32, MatchResult>,
    records: &[AssignmentRecord],
) -> Result<()> {
    let contents = serde_json::to_string_pretty(&match_report(results, records))?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Writes the three result tables of a completed run into a directory.
///
/// Creates `training_data.csv`, `ideal_functions.csv` and
/// `test_data_mappings.csv` under `dir`, creating the directory if needed.
///
/// # Errors
/// Returns `Error::MatchingNotRun` if the matching phase has not run, plus
/// any table or I/O error.
pub fn write_analysis_tables(
    dir: impl AsRef<Path>,
    analysis: &Analysis<f64>,
    records: &[AssignmentRecord],
) -> Result<()> {
    if analysis.match_results().is_none() {
        return Err(Error::MatchingNotRun);
    }

    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    write_function_table(dir.join("training_data.csv"), analysis.references())?;

    let pool = function_table_to_csv(
        analysis
            .candidates()
            .iter()
            .map(|(&number, candidate)| (number, candidate.function())),
    )?;
    std::fs::write(dir.join("ideal_functions.csv"), pool)?;

    write_assignment_table(dir.join("test_data_mappings.csv"), records)?;
    Ok(())
}
