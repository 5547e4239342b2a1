//! Chart rendering: the four-panel metrics dashboard as an in-memory PNG.
//!
//! Layout is a 2x2 grid of line-with-marker panels (steps, heart rate,
//! calories, sleep) over the full dataset. The x axis is the row index with
//! the date labels drawn rotated underneath; plotting by index matches how
//! the dates arrive (opaque labels in file order). Rendering is
//! deterministic for a given dataset.

use image::{ImageOutputFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::full_palette::PURPLE;

use crate::domain::MetricRecord;
use crate::error::AppError;

/// RGB framebuffer bytes per pixel.
const BYTES_PER_PIXEL: usize = 3;

/// One dashboard panel: a title, a line color, and the metric it plots.
struct Panel {
    title: &'static str,
    color: RGBColor,
    value: fn(&MetricRecord) -> f64,
}

/// Panel order matches top-left to bottom-right reading order.
const PANELS: [Panel; 4] = [
    Panel {
        title: "Steps Over Time",
        color: BLUE,
        value: |r: &MetricRecord| f64::from(r.steps),
    },
    Panel {
        title: "Heart Rate Over Time",
        color: RED,
        value: |r: &MetricRecord| r.heart_rate,
    },
    Panel {
        title: "Calories Burned Over Time",
        color: GREEN,
        value: |r: &MetricRecord| r.calories,
    },
    Panel {
        title: "Sleep Duration Over Time",
        color: PURPLE,
        value: |r: &MetricRecord| r.sleep_hours,
    },
];

/// Render the 2x2 metrics dashboard and encode it as PNG bytes.
pub fn render_chart(records: &[MetricRecord], width: u32, height: u32) -> Result<Vec<u8>, AppError> {
    if width < 320 || height < 240 {
        return Err(AppError::input("Chart dimensions must be at least 320x240."));
    }

    let mut frame = vec![0u8; width as usize * height as usize * BYTES_PER_PIXEL];
    draw_panels(records, &mut frame, width, height)?;
    encode_png(frame, width, height)
}

fn draw_panels(records: &[MetricRecord], frame: &mut [u8], width: u32, height: u32) -> Result<(), AppError> {
    let root = BitMapBackend::with_buffer(frame, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;

    let labels: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
    let areas = root.split_evenly((2, 2));

    for (area, panel) in areas.iter().zip(PANELS.iter()) {
        draw_panel(area, panel, records, &labels)?;
    }

    root.present().map_err(draw_error)?;
    Ok(())
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    panel: &Panel,
    records: &[MetricRecord],
    labels: &[&str],
) -> Result<(), AppError> {
    let n = records.len();
    let values: Vec<f64> = records.iter().map(|r| (panel.value)(r)).collect();

    // Degenerate ranges (empty input, flat series) fall back to unit spans so
    // the axes still draw.
    let x_max = if n > 1 { (n - 1) as f64 } else { 1.0 };
    let (y_min, y_max) = value_range(&values);

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(56)
        .y_label_area_size(52)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)
        .map_err(draw_error)?;

    chart
        .configure_mesh()
        .x_labels(n.clamp(2, 12))
        .x_label_formatter(&|x| date_label(labels, *x))
        .y_labels(6)
        .label_style(("sans-serif", 11))
        .x_label_style(("sans-serif", 11).into_font().transform(FontTransform::Rotate90))
        .draw()
        .map_err(draw_error)?;

    chart
        .draw_series(
            LineSeries::new(
                values.iter().enumerate().map(|(i, v)| (i as f64, *v)),
                panel.color.stroke_width(2),
            )
            .point_size(3),
        )
        .map_err(draw_error)?;

    Ok(())
}

/// Tick label for position `x`: the date at that row, or blank for ticks that
/// do not land on a row.
fn date_label(labels: &[&str], x: f64) -> String {
    let idx = x.round();
    if idx < 0.0 || (x - idx).abs() > 0.01 {
        return String::new();
    }
    labels
        .get(idx as usize)
        .map(|s| (*s).to_string())
        .unwrap_or_default()
}

fn value_range(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(*v);
        max = max.max(*v);
    }

    if !(min.is_finite() && max.is_finite()) {
        return (0.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        // Flat series: pad around the single value.
        return (min - 1.0, max + 1.0);
    }

    let pad = (max - min) * 0.08;
    (min - pad, max + pad)
}

fn encode_png(frame: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, AppError> {
    let image = RgbImage::from_raw(width, height, frame)
        .ok_or_else(|| AppError::render("Chart framebuffer size mismatch."))?;

    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .map_err(|e| AppError::render(format!("PNG encoding failed: {e}")))?;
    Ok(bytes)
}

fn draw_error(e: impl std::fmt::Display) -> AppError {
    AppError::render(format!("Chart rendering failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn rec(date: &str, steps: u32, heart_rate: f64, calories: f64, sleep_hours: f64) -> MetricRecord {
        MetricRecord {
            date: date.to_string(),
            steps,
            heart_rate,
            calories,
            sleep_hours,
        }
    }

    fn sample_records() -> Vec<MetricRecord> {
        vec![
            rec("2024-01-01", 8000, 72.0, 2100.0, 7.0),
            rec("2024-01-02", 500, 110.0, 1800.0, 4.0),
            rec("2024-01-03", 9500, 68.0, 2300.0, 8.0),
        ]
    }

    #[test]
    fn renders_a_png() {
        let png = render_chart(&sample_records(), 640, 480).unwrap();
        assert!(png.len() > PNG_SIGNATURE.len());
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn rendering_is_deterministic() {
        let records = sample_records();
        let first = render_chart(&records, 640, 480).unwrap();
        let second = render_chart(&records, 640, 480).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_dataset_still_renders() {
        let png = render_chart(&[], 640, 480).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn rejects_tiny_canvas() {
        let err = render_chart(&[], 100, 100).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
