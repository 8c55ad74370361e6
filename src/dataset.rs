//! CSV ingestion of function tables and test points.
//!
//! Two table shapes are supported, matching the conventional input files:
//!
//! - **Wide function tables** with a header `x,y1,...,yN`: one shared x
//!   column and one function per y column. Parsed into a map keyed by the
//!   column number (`y7` -> 7).
//! - **Point tables** with a header `x,y`: an ordered list of test points,
//!   preserved in file order.
//!
//! The parser owns schema validation (headers, column counts, numeric
//! fields); the core's sample invariants (finite values, strictly increasing
//! x) are checked when each [`SampledFunction`] is constructed, so malformed
//! data fails fast either way.
//!
//! # Example
//!
//! ```rust
//! use idealfit::dataset::parse_function_table;
//!
//! let source = "x,y1,y2\n0.0,1.0,5.0\n1.0,2.0,6.0\n";
//! let functions = parse_function_table(source, "train")?;
//! assert_eq!(functions[&1].id(), "train_1");
//! assert_eq!(functions[&2].data(), &[(0.0, 5.0), (1.0, 6.0)]);
//! # idealfit::error::Result::Ok(())
//! ```
use std::{collections::BTreeMap, path::Path};

use crate::{
    error::{Error, Result},
    function::{CandidateFunction, SampledFunction},
};

/// Splits one CSV line into trimmed fields.
fn fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(str::trim)
}

/// Parses one numeric field, reporting the line it came from.
fn parse_number(field: &str, line: usize) -> Result<f64> {
    field.parse().map_err(|_| Error::MalformedTable {
        line,
        message: format!("expected a number, found `{field}`"),
    })
}

/// Parses a wide function table (`x,y1,...,yN`) into sampled functions.
///
/// Each function is labeled `{label_prefix}_{column number}`, e.g. a prefix
/// of `ideal` gives `ideal_1` through `ideal_N`. Blank lines are skipped.
///
/// # Errors
/// Returns `Error::MalformedTable` if the header is missing or malformed, a
/// row has the wrong number of fields, or a field is not a number; plus any
/// construction error of [`SampledFunction`] (empty table, non-finite
/// values, unsorted x).
pub fn parse_function_table(
    source: &str,
    label_prefix: &str,
) -> Result<BTreeMap<u32, SampledFunction<'static>>> {
    let mut lines = source.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let (header_index, header) = lines.next().ok_or_else(|| Error::MalformedTable {
        line: 1,
        message: "empty table".to_string(),
    })?;
    let header_line = header_index + 1;

    let mut columns = fields(header);
    if !columns.next().is_some_and(|c| c.eq_ignore_ascii_case("x")) {
        return Err(Error::MalformedTable {
            line: header_line,
            message: "first column must be `x`".to_string(),
        });
    }

    let mut numbers = Vec::new();
    for column in columns {
        let number = column
            .strip_prefix('y')
            .and_then(|n| n.parse::<u32>().ok())
            .ok_or_else(|| Error::MalformedTable {
                line: header_line,
                message: format!("expected a `y<N>` column, found `{column}`"),
            })?;
        numbers.push(number);
    }
    if numbers.is_empty() {
        return Err(Error::MalformedTable {
            line: header_line,
            message: "no function columns".to_string(),
        });
    }

    let mut xs = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); numbers.len()];
    for (index, line) in lines {
        let line_number = index + 1;
        let mut row = fields(line);

        let x = parse_number(
            row.next().ok_or_else(|| Error::MalformedTable {
                line: line_number,
                message: "missing x field".to_string(),
            })?,
            line_number,
        )?;
        xs.push(x);

        for (i, column) in columns.iter_mut().enumerate() {
            let field = row.next().ok_or_else(|| Error::MalformedTable {
                line: line_number,
                message: format!("expected {} fields, found {}", numbers.len() + 1, i + 1),
            })?;
            column.push(parse_number(field, line_number)?);
        }

        if row.next().is_some() {
            return Err(Error::MalformedTable {
                line: line_number,
                message: format!("expected {} fields", numbers.len() + 1),
            });
        }
    }

    let mut functions = BTreeMap::new();
    for (number, ys) in numbers.into_iter().zip(columns) {
        let id = format!("{label_prefix}_{number}");
        functions.insert(number, SampledFunction::from_columns(id, &xs, &ys)?);
    }
    Ok(functions)
}

/// Parses a point table (`x,y`) into an ordered list of test points.
///
/// File order is preserved; duplicate x values are fine, since test points
/// are not a function. Blank lines are skipped.
///
/// # Errors
/// Returns `Error::MalformedTable` if the header is missing or malformed, or
/// a row does not hold exactly two numbers.
pub fn parse_point_table(source: &str) -> Result<Vec<(f64, f64)>> {
    let mut lines = source.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let (header_index, header) = lines.next().ok_or_else(|| Error::MalformedTable {
        line: 1,
        message: "empty table".to_string(),
    })?;
    let expected = ["x", "y"];
    let header_ok = fields(header)
        .map(str::to_ascii_lowercase)
        .eq(expected.iter().map(ToString::to_string));
    if !header_ok {
        return Err(Error::MalformedTable {
            line: header_index + 1,
            message: "header must be `x,y`".to_string(),
        });
    }

    let mut points = Vec::new();
    for (index, line) in lines {
        let line_number = index + 1;
        let mut row = fields(line);
        let (Some(x), Some(y), None) = (row.next(), row.next(), row.next()) else {
            return Err(Error::MalformedTable {
                line: line_number,
                message: "expected exactly two fields".to_string(),
            });
        };
        points.push((parse_number(x, line_number)?, parse_number(y, line_number)?));
    }
    Ok(points)
}

/// Reads and parses a wide function table from a file.
///
/// # Errors
/// Returns `Error::Io` if the file cannot be read, or any error of
/// [`parse_function_table`].
pub fn load_function_table(
    path: impl AsRef<Path>,
    label_prefix: &str,
) -> Result<BTreeMap<u32, SampledFunction<'static>>> {
    let source = std::fs::read_to_string(path)?;
    parse_function_table(&source, label_prefix)
}

/// Reads and parses a point table from a file.
///
/// # Errors
/// Returns `Error::Io` if the file cannot be read, or any error of
/// [`parse_point_table`].
pub fn load_point_table(path: impl AsRef<Path>) -> Result<Vec<(f64, f64)>> {
    let source = std::fs::read_to_string(path)?;
    parse_point_table(&source)
}

/// Wraps a parsed function table into a candidate pool.
#[must_use]
pub fn into_candidates(
    functions: BTreeMap<u32, SampledFunction<'static>>,
) -> BTreeMap<u32, CandidateFunction<'static>> {
    functions
        .into_iter()
        .map(|(number, function)| (number, CandidateFunction::new(number, function)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wide_tables() {
        let source = "x,y1,y2,y3\n0.0,1.0,2.0,3.0\n1.0,1.5,2.5,3.5\n2.0,2.0,3.0,4.0\n";
        let functions = parse_function_table(source, "ideal").unwrap();

        assert_eq!(functions.len(), 3);
        assert_eq!(functions[&2].id(), "ideal_2");
        assert_eq!(functions[&2].data(), &[(0.0, 2.0), (1.0, 2.5), (2.0, 3.0)]);
    }

    #[test]
    fn skips_blank_lines_and_whitespace() {
        let source = "x, y1\n\n0.0, 1.0\n 1.0 ,2.0\n\n";
        let functions = parse_function_table(source, "train").unwrap();
        assert_eq!(functions[&1].data(), &[(0.0, 1.0), (1.0, 2.0)]);
    }

    #[test]
    fn rejects_bad_headers() {
        for source in ["", "a,y1\n0,1\n", "x,z1\n0,1\n", "x\n0\n"] {
            let err = parse_function_table(source, "train").unwrap_err();
            assert!(matches!(err, Error::MalformedTable { line: 1, .. }), "{source:?}");
        }
    }

    #[test]
    fn header_errors_report_the_header_line() {
        // Blank lines before the header count toward the reported line number.
        let err = parse_function_table("\n\nx,z1\n0.0,1.0\n", "train").unwrap_err();
        assert!(matches!(err, Error::MalformedTable { line: 3, .. }));

        let err = parse_point_table("\na,b\n1.0,2.0\n").unwrap_err();
        assert!(matches!(err, Error::MalformedTable { line: 2, .. }));
    }

    #[test]
    fn rejects_ragged_rows() {
        let short = "x,y1,y2\n0.0,1.0\n";
        assert!(matches!(
            parse_function_table(short, "t").unwrap_err(),
            Error::MalformedTable { line: 2, .. }
        ));

        let long = "x,y1\n0.0,1.0,2.0\n";
        assert!(matches!(
            parse_function_table(long, "t").unwrap_err(),
            Error::MalformedTable { line: 2, .. }
        ));
    }

    #[test]
    fn rejects_non_numeric_fields() {
        let source = "x,y1\n0.0,apple\n";
        let err = parse_function_table(source, "t").unwrap_err();
        match err {
            Error::MalformedTable { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("apple"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unsorted_x_fails_function_construction() {
        let source = "x,y1\n1.0,1.0\n0.0,2.0\n";
        assert!(matches!(
            parse_function_table(source, "t").unwrap_err(),
            Error::NonIncreasingX { .. }
        ));
    }

    #[test]
    fn parses_point_tables_in_order() {
        let source = "x,y\n3.0,1.0\n-1.0,2.0\n3.0,9.0\n";
        let points = parse_point_table(source).unwrap();
        assert_eq!(points, vec![(3.0, 1.0), (-1.0, 2.0), (3.0, 9.0)]);
    }

    #[test]
    fn point_tables_reject_extra_fields() {
        let source = "x,y\n1.0,2.0,3.0\n";
        assert!(matches!(
            parse_point_table(source).unwrap_err(),
            Error::MalformedTable { line: 2, .. }
        ));
    }
}
