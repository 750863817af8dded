use super::colors::viridis_palette;
use super::{FONT, render_err};
use crate::config::FigureSize;
use crate::error::Result;
use crate::utils::truncate_str;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::path::Path;

/// Longest tick label drawn under a bar.
const MAX_LABEL_CHARS: usize = 18;

/// Draw one bar per level, coloured along viridis, with vertical tick labels.
pub fn draw_countplot(
    path: &Path,
    size: FigureSize,
    title: &str,
    x_label: &str,
    counts: &[(String, usize)],
) -> Result<()> {
    let fail = render_err(path);

    let levels = counts.len().max(1);
    let peak = counts.iter().map(|(_, c)| *c).max().unwrap_or(0) as f64;
    let y_max = if peak > 0.0 { peak * 1.05 } else { 1.0 };
    let labels: Vec<String> = counts
        .iter()
        .map(|(label, _)| truncate_str(label, MAX_LABEL_CHARS))
        .collect();
    let palette = viridis_palette(counts.len());

    let root = SVGBackend::new(path, size.as_tuple()).into_drawing_area();
    root.fill(&WHITE).map_err(&fail)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 20))
        .margin(10)
        .x_label_area_size(110)
        .y_label_area_size(60)
        .build_cartesian_2d((0usize..levels).into_segmented(), 0f64..y_max)
        .map_err(&fail)?;

    let label_formatter = |value: &SegmentValue<usize>| match value {
        SegmentValue::CenterOf(idx) | SegmentValue::Exact(idx) => {
            labels.get(*idx).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(levels)
        .x_label_formatter(&label_formatter)
        .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90))
        .x_desc(x_label)
        .y_desc("Count")
        .draw()
        .map_err(&fail)?;

    chart
        .draw_series(counts.iter().enumerate().map(|(idx, (_, count))| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(idx), 0.0),
                    (SegmentValue::Exact(idx + 1), *count as f64),
                ],
                palette[idx].filled(),
            );
            bar.set_margin(0, 0, 4, 4);
            bar
        }))
        .map_err(&fail)?;

    root.present().map_err(&fail)?;
    Ok(())
}
