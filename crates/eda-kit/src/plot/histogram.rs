use super::colors::HIST_BLUE;
use super::{FONT, check_axis_range, render_err};
use crate::config::FigureSize;
use crate::error::Result;
use crate::stats::HistogramBin;
use plotters::prelude::*;
use std::path::Path;

/// Draw a count histogram with an optional density curve on top.
pub fn draw_histogram(
    path: &Path,
    size: FigureSize,
    title: &str,
    x_label: &str,
    bins: &[HistogramBin],
    kde: &[(f64, f64)],
) -> Result<()> {
    let fail = render_err(path);

    let x_min = bins.first().map(|b| b.start).unwrap_or(0.0);
    let x_max = bins.last().map(|b| b.end).unwrap_or(1.0);
    let peak = bins
        .iter()
        .map(|b| b.count as f64)
        .chain(kde.iter().map(|(_, y)| *y))
        .fold(0.0, f64::max);
    let y_max = if peak > 0.0 { peak * 1.05 } else { 1.0 };
    check_axis_range(path, x_min, x_max)?;
    check_axis_range(path, 0.0, y_max)?;

    let root = SVGBackend::new(path, size.as_tuple()).into_drawing_area();
    root.fill(&WHITE).map_err(&fail)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)
        .map_err(&fail)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_label)
        .y_desc("Frequency")
        .draw()
        .map_err(&fail)?;

    chart
        .draw_series(bins.iter().map(|bin| {
            Rectangle::new(
                [(bin.start, 0.0), (bin.end, bin.count as f64)],
                HIST_BLUE.mix(0.4).filled(),
            )
        }))
        .map_err(&fail)?;

    if !kde.is_empty() {
        chart
            .draw_series(LineSeries::new(
                kde.iter().copied(),
                HIST_BLUE.stroke_width(2),
            ))
            .map_err(&fail)?;
    }

    root.present().map_err(&fail)?;
    Ok(())
}
