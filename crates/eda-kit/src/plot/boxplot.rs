use super::colors::ORANGE;
use super::{FONT, check_axis_range, render_err};
use crate::config::FigureSize;
use crate::error::Result;
use crate::stats::BoxSummary;
use plotters::prelude::*;
use std::path::Path;

// Vertical layout of the box inside the unit-height plot area
const BOX_BOTTOM: f64 = 0.3;
const BOX_TOP: f64 = 0.7;
const CAP_BOTTOM: f64 = 0.4;
const CAP_TOP: f64 = 0.6;
const CENTER: f64 = 0.5;

/// Draw a horizontal box-and-whisker plot with outliers as open circles.
pub fn draw_boxplot(
    path: &Path,
    size: FigureSize,
    title: &str,
    x_label: &str,
    summary: &BoxSummary,
) -> Result<()> {
    let fail = render_err(path);

    let lo = summary
        .outliers
        .first()
        .copied()
        .unwrap_or(summary.lower_whisker)
        .min(summary.lower_whisker);
    let hi = summary
        .outliers
        .last()
        .copied()
        .unwrap_or(summary.upper_whisker)
        .max(summary.upper_whisker);
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
    check_axis_range(path, lo - pad, hi + pad)?;

    let root = SVGBackend::new(path, size.as_tuple()).into_drawing_area();
    root.fill(&WHITE).map_err(&fail)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(10)
        .build_cartesian_2d((lo - pad)..(hi + pad), 0f64..1f64)
        .map_err(&fail)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(0)
        .x_desc(x_label)
        .draw()
        .map_err(&fail)?;

    let outline = BLACK.stroke_width(1);

    chart
        .draw_series([
            Rectangle::new(
                [(summary.q1, BOX_BOTTOM), (summary.q3, BOX_TOP)],
                ORANGE.filled(),
            ),
            Rectangle::new([(summary.q1, BOX_BOTTOM), (summary.q3, BOX_TOP)], outline),
        ])
        .map_err(&fail)?;

    chart
        .draw_series([
            PathElement::new(
                vec![(summary.median, BOX_BOTTOM), (summary.median, BOX_TOP)],
                BLACK.stroke_width(2),
            ),
            PathElement::new(
                vec![(summary.lower_whisker, CENTER), (summary.q1, CENTER)],
                outline,
            ),
            PathElement::new(
                vec![(summary.q3, CENTER), (summary.upper_whisker, CENTER)],
                outline,
            ),
            PathElement::new(
                vec![
                    (summary.lower_whisker, CAP_BOTTOM),
                    (summary.lower_whisker, CAP_TOP),
                ],
                outline,
            ),
            PathElement::new(
                vec![
                    (summary.upper_whisker, CAP_BOTTOM),
                    (summary.upper_whisker, CAP_TOP),
                ],
                outline,
            ),
        ])
        .map_err(&fail)?;

    chart
        .draw_series(
            summary
                .outliers
                .iter()
                .map(|x| Circle::new((*x, CENTER), 4, outline)),
        )
        .map_err(&fail)?;

    root.present().map_err(&fail)?;
    Ok(())
}
