//! Trace colors and continuous color scales.

use plotters::style::RGBColor;

/// Color palette for traces
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(52, 152, 219),  // Blue
    RGBColor(231, 76, 60),   // Red
    RGBColor(46, 204, 113),  // Green
    RGBColor(155, 89, 182),  // Purple
    RGBColor(243, 156, 18),  // Orange
    RGBColor(26, 188, 156),  // Teal
    RGBColor(233, 30, 99),   // Pink
    RGBColor(0, 188, 212),   // Cyan
    RGBColor(121, 85, 72),   // Brown
    RGBColor(96, 125, 139),  // Blue Grey
];

pub const GRID: RGBColor = RGBColor(200, 200, 200);
pub const EMPTY_CELL: RGBColor = RGBColor(235, 235, 235);

/// Reversed RdBu: -1 is blue, 0 white, +1 red.
const DIVERGING: [RGBColor; 5] = [
    RGBColor(5, 48, 97),
    RGBColor(146, 197, 222),
    RGBColor(247, 247, 247),
    RGBColor(244, 165, 130),
    RGBColor(103, 0, 31),
];

/// Plasma-like sequential scale for intensities.
const SEQUENTIAL: [RGBColor; 5] = [
    RGBColor(13, 8, 135),
    RGBColor(126, 3, 168),
    RGBColor(204, 71, 120),
    RGBColor(248, 149, 64),
    RGBColor(240, 249, 33),
];

pub fn trace_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

fn interpolate(stops: &[RGBColor], t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (stops.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(stops.len() - 2);
    let frac = scaled - lower as f64;
    let (a, b) = (stops[lower], stops[lower + 1]);
    let channel = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    RGBColor(channel(a.0, b.0), channel(a.1, b.1), channel(a.2, b.2))
}

/// Color for a correlation coefficient in [-1, 1].
pub fn diverging(value: f64) -> RGBColor {
    interpolate(&DIVERGING, (value + 1.0) / 2.0)
}

/// Color for `value` scaled into `[min, max]`.
pub fn sequential(value: f64, min: f64, max: f64) -> RGBColor {
    let span = max - min;
    let t = if span > 0.0 { (value - min) / span } else { 0.5 };
    interpolate(&SEQUENTIAL, t)
}

/// Black or white, whichever reads better on `background`.
pub fn contrast_text(background: RGBColor) -> RGBColor {
    let luminance =
        0.299 * background.0 as f64 + 0.587 * background.1 as f64 + 0.114 * background.2 as f64;
    if luminance > 140.0 {
        RGBColor(0, 0, 0)
    } else {
        RGBColor(255, 255, 255)
    }
}
