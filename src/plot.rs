//! Chart output for matches and assignments
//!
//! Renders a completed analysis to a PNG: the training scatter and the
//! selected candidate's interpolated line for every reference, plus the test
//! points, with assigned points drawn in their winning reference's color and
//! unassigned points as grey crosses.
//!
//! ```no_run
//! # use std::collections::BTreeMap;
//! # use idealfit::{Analysis, plot::render_analysis};
//! # let mut analysis = Analysis::new(BTreeMap::new(), BTreeMap::new());
//! analysis.run_matching()?;
//! let records = analysis.assign(&[(0.5, 0.5)])?;
//! render_analysis("analysis.png", &analysis, &records)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
use std::{ops::Range, path::Path};

use plotters::prelude::*;

use crate::{
    assign::AssignmentRecord,
    value::CoordExt,
    Analysis,
};

/// Error occurring during chart rendering
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// Error drawing the chart
    #[error("Error drawing chart: {0}")]
    Draw(String),

    /// The analysis was not in a renderable state
    #[error(transparent)]
    Analysis(#[from] crate::error::Error),
}

/// Series colors, one per reference, cycled when the palette runs out.
const SERIES_COLORS: &[RGBColor] = &[RED, BLUE, GREEN, MAGENTA, CYAN, full_palette::ORANGE];

/// Number of interpolated samples drawn per candidate line.
const LINE_SAMPLES: usize = 256;

/// Marker color for unassigned test points.
const UNASSIGNED: RGBColor = full_palette::GREY;

fn draw<T>(result: Result<T, impl std::error::Error>) -> Result<T, PlotError> {
    result.map_err(|e| PlotError::Draw(e.to_string()))
}

/// Pads a range by 5% on each side so edge points stay visible.
fn padded(range: Range<f64>) -> Range<f64> {
    let span = (range.end - range.start).max(f64::EPSILON);
    range.start - span * 0.05..range.end + span * 0.05
}

/// Merges an optional range into the accumulated bounds.
fn merge(acc: Option<Range<f64>>, range: Option<Range<f64>>) -> Option<Range<f64>> {
    match (acc, range) {
        (Some(a), Some(b)) => Some(a.start.min(b.start)..a.end.max(b.end)),
        (acc, range) => acc.or(range),
    }
}

/// Renders a completed analysis and its assignment records to a PNG file.
///
/// One color per reference: its training scatter, its selected candidate's
/// line, and the test points assigned to that candidate. Unassigned points
/// are drawn as grey crosses.
///
/// # Errors
/// Returns an error if the matching phase has not run or drawing fails.
pub fn render_analysis(
    path: impl AsRef<Path>,
    analysis: &Analysis<f64>,
    records: &[AssignmentRecord<f64>],
) -> Result<(), PlotError> {
    let results = analysis
        .match_results()
        .ok_or(crate::error::Error::MatchingNotRun)?;

    //
    // Bounds over every series on the chart
    let points: Vec<(f64, f64)> = records.iter().map(|r| (r.x, r.y)).collect();
    let mut x_range = points.x_range();
    let mut y_range = points.y_range();
    for function in analysis.references().values() {
        x_range = merge(x_range, Some(function.x_range()));
        y_range = merge(y_range, function.y_range());
    }
    let (Some(x_range), Some(y_range)) = (x_range, y_range) else {
        // Nothing to draw
        return Ok(());
    };
    let (x_range, y_range) = (padded(x_range), padded(y_range));

    let root = BitMapBackend::new(path.as_ref(), (1024, 768)).into_drawing_area();
    draw(root.fill(&WHITE))?;

    let mut chart = draw(
        ChartBuilder::on(&root)
            .caption("Ideal function selection", ("sans-serif", 24))
            .margin(5)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range.clone(), y_range),
    )?;
    draw(chart.configure_mesh().draw())?;

    let step = (x_range.end - x_range.start) / (LINE_SAMPLES as f64);
    for (i, (&reference, result)) in results.iter().enumerate() {
        let color = SERIES_COLORS[i % SERIES_COLORS.len()];

        if let Some(function) = analysis.references().get(&reference) {
            draw(chart.draw_series(
                function
                    .data()
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, color.mix(0.5).filled())),
            ))?;
        }

        if let Some(candidate) = analysis.candidates().get(&result.selected_candidate) {
            let line = candidate
                .function()
                .solve((0..=LINE_SAMPLES).map(|i| x_range.start + (i as f64) * step));
            let series = draw(chart.draw_series(LineSeries::new(line, color.stroke_width(2))))?;
            series
                .label(format!(
                    "train {reference} -> {}",
                    candidate.id()
                ))
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2))
                });
        }

        let assigned = records
            .iter()
            .filter(|r| r.reference() == Some(reference))
            .map(|r| TriangleMarker::new((r.x, r.y), 5, color.filled()));
        draw(chart.draw_series(assigned))?;
    }

    let unassigned = records
        .iter()
        .filter(|r| !r.is_assigned())
        .map(|r| Cross::new((r.x, r.y), 4, UNASSIGNED.stroke_width(2)));
    draw(chart.draw_series(unassigned))?;

    draw(
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.4))
            .draw(),
    )?;
    draw(root.present())?;

    Ok(())
}
