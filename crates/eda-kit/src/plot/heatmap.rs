use super::colors::{coolwarm, prefers_dark_text, viridis};
use super::{FONT, render_err};
use crate::config::FigureSize;
use crate::error::Result;
use crate::stats::{CorrelationMatrix, MissingMatrix};
use crate::utils::truncate_str;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const MAX_LABEL_CHARS: usize = 16;

/// Colour of undefined correlation cells.
const UNDEFINED_CELL: RGBColor = RGBColor(235, 235, 235);

fn segment_index(value: &SegmentValue<usize>) -> Option<usize> {
    match value {
        SegmentValue::CenterOf(idx) | SegmentValue::Exact(idx) => Some(*idx),
        SegmentValue::Last => None,
    }
}

/// Draw the correlation matrix as a coolwarm heatmap over `[-1, 1]`.
///
/// The first column sits in the top row. Undefined cells are grey.
pub fn draw_correlation_heatmap(
    path: &Path,
    size: FigureSize,
    matrix: &CorrelationMatrix,
    annotate: bool,
) -> Result<()> {
    let fail = render_err(path);
    let n = matrix.columns.len().max(1);
    let labels: Vec<String> = matrix
        .columns
        .iter()
        .map(|c| truncate_str(c, MAX_LABEL_CHARS))
        .collect();

    let root = SVGBackend::new(path, size.as_tuple()).into_drawing_area();
    root.fill(&WHITE).map_err(&fail)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Correlation Heatmap", (FONT, 22))
        .margin(10)
        .x_label_area_size(110)
        .y_label_area_size(120)
        .build_cartesian_2d((0usize..n).into_segmented(), (0usize..n).into_segmented())
        .map_err(&fail)?;

    let x_formatter = |value: &SegmentValue<usize>| {
        segment_index(value)
            .and_then(|idx| labels.get(idx).cloned())
            .unwrap_or_default()
    };
    // Row 0 is drawn at the top, so y indices run backwards
    let y_formatter = |value: &SegmentValue<usize>| {
        segment_index(value)
            .filter(|idx| *idx < n)
            .and_then(|idx| labels.get(n - 1 - idx).cloned())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90))
        .draw()
        .map_err(&fail)?;

    let mut cells = Vec::new();
    for (row, values) in matrix.values.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            cells.push((row, col, *value));
        }
    }

    chart
        .draw_series(cells.iter().map(|(row, col, value)| {
            let y = n - 1 - row;
            let color = value.map(coolwarm).unwrap_or(UNDEFINED_CELL);
            Rectangle::new(
                [
                    (SegmentValue::Exact(*col), SegmentValue::Exact(y)),
                    (SegmentValue::Exact(col + 1), SegmentValue::Exact(y + 1)),
                ],
                color.filled(),
            )
        }))
        .map_err(&fail)?;

    if annotate {
        chart
            .draw_series(cells.iter().filter_map(|(row, col, value)| {
                let value = (*value)?;
                let text_color = if prefers_dark_text(&coolwarm(value)) {
                    BLACK
                } else {
                    WHITE
                };
                let style = (FONT, 13)
                    .into_font()
                    .color(&text_color)
                    .pos(Pos::new(HPos::Center, VPos::Center));
                Some(Text::new(
                    format!("{:.2}", value),
                    (SegmentValue::CenterOf(*col), SegmentValue::CenterOf(n - 1 - row)),
                    style,
                ))
            }))
            .map_err(&fail)?;
    }

    root.present().map_err(&fail)?;
    Ok(())
}

/// Draw the null mask: one column per dataset column, one row per band,
/// coloured along viridis by the fraction of missing values. No colour bar.
pub fn draw_missing_heatmap(path: &Path, size: FigureSize, matrix: &MissingMatrix) -> Result<()> {
    let fail = render_err(path);
    let cols = matrix.columns.len().max(1);
    let bands = matrix.band_count().max(1);
    let rows_per_band = matrix.rows_per_band;
    let labels: Vec<String> = matrix
        .columns
        .iter()
        .map(|c| truncate_str(c, MAX_LABEL_CHARS))
        .collect();

    let root = SVGBackend::new(path, size.as_tuple()).into_drawing_area();
    root.fill(&WHITE).map_err(&fail)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Missing Values Heatmap", (FONT, 22))
        .margin(10)
        .x_label_area_size(110)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (0usize..cols).into_segmented(),
            (0usize..bands).into_segmented(),
        )
        .map_err(&fail)?;

    let x_formatter = |value: &SegmentValue<usize>| {
        segment_index(value)
            .and_then(|idx| labels.get(idx).cloned())
            .unwrap_or_default()
    };
    // Label each band with the index of its first row, first band on top
    let y_formatter = |value: &SegmentValue<usize>| {
        segment_index(value)
            .filter(|idx| *idx < bands)
            .map(|idx| ((bands - 1 - idx) * rows_per_band).to_string())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(cols)
        .y_labels(bands.min(20))
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90))
        .draw()
        .map_err(&fail)?;

    let mut cells = Vec::new();
    for (band, fractions) in matrix.cells.iter().enumerate() {
        for (col, fraction) in fractions.iter().enumerate() {
            cells.push((band, col, *fraction));
        }
    }

    chart
        .draw_series(cells.iter().map(|(band, col, fraction)| {
            let y = bands - 1 - band;
            Rectangle::new(
                [
                    (SegmentValue::Exact(*col), SegmentValue::Exact(y)),
                    (SegmentValue::Exact(col + 1), SegmentValue::Exact(y + 1)),
                ],
                viridis(*fraction).filled(),
            )
        }))
        .map_err(&fail)?;

    root.present().map_err(&fail)?;
    Ok(())
}
