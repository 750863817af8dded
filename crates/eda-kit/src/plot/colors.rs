//! Colormaps used by the figures.
//!
//! Piecewise-linear approximations of matplotlib's `viridis` and `coolwarm`.

use plotters::style::RGBColor;

const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

const COOLWARM: [(u8, u8, u8); 3] = [(59, 76, 192), (221, 221, 221), (180, 4, 38)];

/// Box colour of outlier plots.
pub const ORANGE: RGBColor = RGBColor(255, 165, 0);

/// Bar and curve colour of distribution plots.
pub const HIST_BLUE: RGBColor = RGBColor(0, 0, 255);

fn interpolate(stops: &[(u8, u8, u8)], t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (stops.len() - 1) as f64;
    let idx = (scaled.floor() as usize).min(stops.len() - 2);
    let frac = scaled - idx as f64;

    let (r0, g0, b0) = stops[idx];
    let (r1, g1, b1) = stops[idx + 1];
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;

    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

/// Viridis colour for `t` in `[0, 1]`.
pub fn viridis(t: f64) -> RGBColor {
    interpolate(&VIRIDIS, t)
}

/// Coolwarm colour for a correlation in `[-1, 1]`.
pub fn coolwarm(value: f64) -> RGBColor {
    interpolate(&COOLWARM, (value + 1.0) / 2.0)
}

/// `count` colours spread evenly across viridis.
pub fn viridis_palette(count: usize) -> Vec<RGBColor> {
    match count {
        0 => Vec::new(),
        1 => vec![viridis(0.5)],
        _ => (0..count)
            .map(|i| viridis(i as f64 / (count - 1) as f64))
            .collect(),
    }
}

/// Whether black text is readable on top of `color`.
pub fn prefers_dark_text(color: &RGBColor) -> bool {
    let RGBColor(r, g, b) = *color;
    let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    luminance > 140.0
}
