//! Side-by-side comparison chart.
//!
//! Left panel: scatter of the date-aligned daily returns. Right panel: both
//! normalized price curves on a shared date axis with a legend. The SVG is
//! handed to [`crate::viewer`] for display.

use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use thiserror::Error;
use time::Date;

use tickpair_core::{AlignedReturns, PairAnalysis, NORMALIZED_BASE};

const CANVAS: (u32, u32) = (1400, 600);
const LEFT_COLOR: RGBColor = BLUE;
const RIGHT_COLOR: RGBColor = RGBColor(0, 128, 0);

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("chart drawing failed: {0}")]
    Drawing(String),
    #[error("could not open chart {path} in a viewer: {message}")]
    Viewer { path: String, message: String },
}

fn draw_err<E: std::error::Error + Send + Sync>(error: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Drawing(error.to_string())
}

/// Writes the two-panel chart as SVG to `path`.
pub fn render_comparison(
    path: &Path,
    left_label: &str,
    right_label: &str,
    analysis: &PairAnalysis,
) -> Result<(), RenderError> {
    let root = SVGBackend::new(path, CANVAS).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let (scatter_area, price_area) = root.split_horizontally(CANVAS.0 / 2);
    draw_scatter(&scatter_area, left_label, right_label, &analysis.aligned)?;
    draw_normalized(
        &price_area,
        (left_label, analysis.left_normalized.as_slice()),
        (right_label, analysis.right_normalized.as_slice()),
    )?;

    root.present().map_err(draw_err)?;
    tracing::info!(path = %path.display(), "chart written");
    Ok(())
}

fn draw_scatter<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    left_label: &str,
    right_label: &str,
    aligned: &AlignedReturns,
) -> Result<(), RenderError> {
    let x_range = padded_range(aligned.left.iter().copied());
    let y_range = padded_range(aligned.right.iter().copied());

    let mut chart = ChartBuilder::on(area)
        .caption("Scatter Plot of Daily Returns", ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc(format!("{left_label} Daily Return"))
        .y_desc(format!("{right_label} Daily Return"))
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(
            aligned
                .pairs()
                .map(|(x, y)| Circle::new((x, y), 3, LEFT_COLOR.mix(0.5).filled())),
        )
        .map_err(draw_err)?;

    Ok(())
}

fn draw_normalized<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    left: (&str, &[(Date, f64)]),
    right: (&str, &[(Date, f64)]),
) -> Result<(), RenderError> {
    let days = left
        .1
        .iter()
        .chain(right.1)
        .map(|(date, _)| date.to_julian_day());
    let (first_day, last_day) = days.fold((i32::MAX, i32::MIN), |(lo, hi), day| {
        (lo.min(day), hi.max(day))
    });
    let (first_day, last_day) = if first_day > last_day {
        (0, 1)
    } else {
        (first_day, last_day.max(first_day + 1))
    };
    let y_range = padded_range(left.1.iter().chain(right.1).map(|(_, value)| *value));

    let mut chart = ChartBuilder::on(area)
        .caption(
            format!("Normalized Prices of {} and {}", left.0, right.0),
            ("sans-serif", 22),
        )
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(first_day..last_day, y_range.0..y_range.1)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_labels(6)
        .x_label_formatter(&|day: &i32| format_julian_day(*day))
        .x_desc("Date")
        .y_desc(format!("Normalized Price (Starting at ${NORMALIZED_BASE})"))
        .draw()
        .map_err(draw_err)?;

    for ((label, points), color) in [(left, LEFT_COLOR), (right, RIGHT_COLOR)] {
        chart
            .draw_series(LineSeries::new(
                points
                    .iter()
                    .map(|(date, value)| (date.to_julian_day(), *value)),
                &color,
            ))
            .map_err(draw_err)?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(draw_err)?;

    Ok(())
}

fn format_julian_day(day: i32) -> String {
    Date::from_julian_day(day)
        .map(|date| date.to_string())
        .unwrap_or_default()
}

/// Min/max of the finite values widened by 5% so markers are not clipped.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|value| value.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
            (lo.min(value), hi.max(value))
        });

    if lo > hi {
        return (-1.0, 1.0);
    }
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        lo.abs().max(1e-3) * 0.05
    };
    (lo - pad, hi + pad)
}
