//! PNG rendering of a weight grid with its center of mass marked.
//!
//! Distinct weights are first collapsed to dense indices so that a handful of
//! materials with very different masses still get clearly separated shades.
//! Index 0 of the ramp is white, the highest index is black.

use std::path::Path;

use ab_glyph::{FontRef, PxScale};
use comfig::{index_count, normalize_weights, Centroid, WeightGrid};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use tracing::{debug, warn};

/// Smallest edge, in pixels, of a rendered chart.
const MIN_CHART_EDGE: usize = 512;
const MARKER: Rgb<u8> = Rgb([255, 0, 0]);

static LABEL_FONT: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

/// Piecewise-linear channel of the "bone" ramp: `(position, value)` stops.
type Channel = &'static [(f64, f64)];

const BONE_RED: Channel = &[(0.0, 0.0), (0.746032, 0.652778), (1.0, 1.0)];
const BONE_GREEN: Channel = &[
    (0.0, 0.0),
    (0.365079, 0.319444),
    (0.746032, 0.777778),
    (1.0, 1.0),
];
const BONE_BLUE: Channel = &[(0.0, 0.0), (0.365079, 0.444444), (1.0, 1.0)];

fn sample(channel: Channel, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    for pair in channel.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if t <= x1 {
            return y0 + (y1 - y0) * (t - x0) / (x1 - x0);
        }
    }
    channel.last().map_or(0.0, |&(_, y)| y)
}

/// Reversed bone ramp: `t = 0` is white, `t = 1` is black.
pub fn bone_r(t: f64) -> Rgb<u8> {
    let s = 1.0 - t;
    let to_u8 = |v: f64| (v * 255.0).round() as u8;
    Rgb([
        to_u8(sample(BONE_RED, s)),
        to_u8(sample(BONE_GREEN, s)),
        to_u8(sample(BONE_BLUE, s)),
    ])
}

/// Draws the grid, one square block per cell, with a red cross at `center`
/// (grid units) and `label` centered just above it.
pub fn render(grid: &WeightGrid, center: Centroid, label: &str) -> RgbImage {
    let (rows, cols) = grid.shape();
    let cell = (MIN_CHART_EDGE / rows.max(cols).max(1)).max(1);
    let width = (cols * cell) as u32;
    let height = (rows * cell) as u32;

    let normalized = normalize_weights(grid);
    let top = index_count(&normalized).saturating_sub(1).max(1) as f64;
    debug!(rows, cols, cell, shades = top + 1.0, "rendering chart");

    let mut chart = RgbImage::from_fn(width, height, |x, y| {
        let index = normalized[(y as usize / cell, x as usize / cell)];
        bone_r(index as f64 / top)
    });

    let cx = (center.col + 0.5) * cell as f64;
    let cy = (center.row + 0.5) * cell as f64;
    let half = (width.max(height) as f64 / 40.0).max(3.0);
    if !label.is_empty() {
        draw_label(&mut chart, cx, cy - half * 1.5, label);
    }
    draw_cross(&mut chart, cx, cy, half);
    chart
}

/// Writes `text` horizontally centered on `cx` with its baseline area
/// ending at `bottom`, kept inside the chart.
fn draw_label(chart: &mut RgbImage, cx: f64, bottom: f64, text: &str) {
    let font = match FontRef::try_from_slice(LABEL_FONT) {
        Ok(font) => font,
        Err(e) => {
            warn!("label font unusable, chart left unlabeled: {e}");
            return;
        }
    };
    let scale = PxScale::from((chart.width().max(chart.height()) as f32 / 24.0).max(12.0));
    let (text_width, text_height) = text_size(scale, &font, text);
    let max_x = chart.width().saturating_sub(text_width) as f64;
    let max_y = chart.height().saturating_sub(text_height) as f64;
    let x = (cx - text_width as f64 / 2.0).clamp(0.0, max_x);
    let y = (bottom - text_height as f64).clamp(0.0, max_y);
    draw_text_mut(chart, MARKER, x as i32, y as i32, scale, &font, text);
}

fn draw_cross(chart: &mut RgbImage, cx: f64, cy: f64, half: f64) {
    let steps = (half * 4.0).ceil() as i64;
    for i in -steps..=steps {
        let d = half * i as f64 / steps as f64;
        for (x, y) in [(cx + d, cy + d), (cx + d, cy - d)] {
            // two pixels wide
            for (ox, oy) in [(0.0, 0.0), (1.0, 0.0)] {
                put(chart, x + ox, y + oy);
            }
        }
    }
}

fn put(chart: &mut RgbImage, x: f64, y: f64) {
    if x < 0.0 || y < 0.0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x < chart.width() && y < chart.height() {
        chart.put_pixel(x, y, MARKER);
    }
}

/// Renders the chart marked at `raw` and labeled with the `scaled`
/// coordinates, then saves it.
pub fn save_chart(
    grid: &WeightGrid,
    raw: Centroid,
    scaled: Centroid,
    path: &Path,
) -> image::ImageResult<()> {
    render(grid, raw, &scaled.to_string()).save(path)
}
