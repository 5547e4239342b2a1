//! PDF report assembly.
//!
//! The document is a single top-down flow of elements: title, section
//! headings, the anomaly table, advisory bullets, and the chart image. A
//! small layout cursor tracks the vertical position and starts a new page
//! when an element would cross the bottom margin. printpdf's built-in
//! Helvetica fonts keep the crate free of bundled font files.

use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, Image, ImageXObject, IndirectFontRef, Line, Mm,
    PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Px, Rgb,
};

use crate::domain::MetricRecord;
use crate::error::AppError;

// US-letter geometry, in millimetres.
const PAGE_WIDTH: f64 = 215.9;
const PAGE_HEIGHT: f64 = 279.4;
const MARGIN: f64 = 18.0;
const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;

const TITLE_SIZE: f64 = 16.0;
const HEADING_SIZE: f64 = 13.0;
const BODY_SIZE: f64 = 10.0;
const TABLE_SIZE: f64 = 9.0;

// Vertical advance per element, also in millimetres.
const TITLE_HEIGHT: f64 = 10.0;
const HEADING_HEIGHT: f64 = 9.0;
const BODY_HEIGHT: f64 = 6.0;
const ROW_HEIGHT: f64 = 7.0;

/// Anomaly table columns: header title and width (widths sum to the content
/// width). The titles are the five CSV field names.
const COLUMNS: [(&str, f64); 5] = [
    ("Date", 34.0),
    ("Steps", 26.0),
    ("Heart Rate (bpm)", 42.0),
    ("Calories Burned", 38.0),
    ("Sleep Duration (hours)", 39.9),
];

/// Assemble the full report document and return it as a PDF byte buffer.
///
/// Element order is fixed: title, "Data Summary" heading, "Anomalies
/// Detected" heading + table, "Recommendations" heading + bullets, chart.
/// The full dataset is part of the call contract but nothing is rendered
/// from it directly; the chart already covers it.
pub fn assemble_report(
    name: &str,
    age: u32,
    _records: &[MetricRecord],
    anomalies: &[MetricRecord],
    advisories: &[String],
    chart_png: &[u8],
) -> Result<Vec<u8>, AppError> {
    let (doc, page, layer) =
        PdfDocument::new("Health Report", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(layout_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(layout_error)?;

    let layer = doc.get_page(page).get_layer(layer);
    let mut cursor = Cursor {
        doc,
        layer,
        y: PAGE_HEIGHT - MARGIN,
    };

    draw_line(
        &mut cursor,
        &bold,
        TITLE_SIZE,
        TITLE_HEIGHT,
        &format!("Health Report for {name}, Age: {age}"),
    );
    draw_line(&mut cursor, &bold, HEADING_SIZE, HEADING_HEIGHT, "Data Summary:");
    draw_line(&mut cursor, &bold, HEADING_SIZE, HEADING_HEIGHT, "Anomalies Detected:");
    draw_table(&mut cursor, &regular, &bold, anomalies);
    draw_line(&mut cursor, &bold, HEADING_SIZE, HEADING_HEIGHT, "Recommendations:");
    for advisory in advisories {
        draw_line(&mut cursor, &regular, BODY_SIZE, BODY_HEIGHT, &format!("- {advisory}"));
    }
    draw_chart(&mut cursor, chart_png)?;

    let mut bytes = Vec::new();
    {
        let mut writer = std::io::BufWriter::new(&mut bytes);
        cursor.doc.save(&mut writer).map_err(layout_error)?;
    }
    Ok(bytes)
}

/// Top-down layout cursor over the current page.
struct Cursor {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    y: f64,
}

impl Cursor {
    /// Start a fresh page and reset the vertical position to the top margin.
    fn break_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    /// Break the page if `needed` millimetres would cross the bottom margin.
    ///
    /// Returns true when a page break happened (the table uses this to repeat
    /// its header row).
    fn ensure_space(&mut self, needed: f64) -> bool {
        if self.y - needed < MARGIN {
            self.break_page();
            return true;
        }
        false
    }
}

/// Draw one line of text at the left margin and advance the cursor.
fn draw_line(cursor: &mut Cursor, font: &IndirectFontRef, size: f64, advance: f64, text: &str) {
    cursor.ensure_space(advance);
    cursor.y -= advance;
    cursor.layer.set_fill_color(black());
    cursor.layer.use_text(text, size, Mm(MARGIN), Mm(cursor.y), font);
}

fn draw_table(
    cursor: &mut Cursor,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
    anomalies: &[MetricRecord],
) {
    cursor.ensure_space(2.0 * ROW_HEIGHT);
    cursor.y -= 2.0;
    draw_header_row(cursor, bold);

    for record in anomalies {
        if cursor.ensure_space(ROW_HEIGHT) {
            // The table continued onto a fresh page; repeat the header row.
            draw_header_row(cursor, bold);
        }
        draw_body_row(cursor, regular, record);
    }

    cursor.y -= 2.0;
}

fn draw_header_row(cursor: &mut Cursor, bold: &IndirectFontRef) {
    let top = cursor.y;
    fill_row(&cursor.layer, top, grey());
    stroke_row(&cursor.layer, top);

    cursor.layer.set_fill_color(whitesmoke());
    let mut x = MARGIN;
    for (title, width) in COLUMNS {
        cursor
            .layer
            .use_text(title, TABLE_SIZE, Mm(x + 1.5), Mm(top - ROW_HEIGHT + 2.0), bold);
        x += width;
    }

    cursor.y -= ROW_HEIGHT;
}

fn draw_body_row(cursor: &mut Cursor, regular: &IndirectFontRef, record: &MetricRecord) {
    let top = cursor.y;
    fill_row(&cursor.layer, top, beige());
    stroke_row(&cursor.layer, top);

    let cells = [
        record.date.clone(),
        record.steps.to_string(),
        format!("{:.1}", record.heart_rate),
        format!("{:.1}", record.calories),
        format!("{:.1}", record.sleep_hours),
    ];

    cursor.layer.set_fill_color(black());
    let mut x = MARGIN;
    for ((_, width), cell) in COLUMNS.iter().zip(cells.iter()) {
        cursor
            .layer
            .use_text(cell.as_str(), TABLE_SIZE, Mm(x + 1.5), Mm(top - ROW_HEIGHT + 2.0), regular);
        x += width;
    }

    cursor.y -= ROW_HEIGHT;
}

/// Fill one table row's background across the content width.
fn fill_row(layer: &PdfLayerReference, top: f64, color: Color) {
    layer.set_fill_color(color);
    layer.add_shape(rect(MARGIN, top, CONTENT_WIDTH, ROW_HEIGHT, true));
}

/// Stroke the cell borders for one table row.
fn stroke_row(layer: &PdfLayerReference, top: f64) {
    layer.set_outline_color(black());
    layer.set_outline_thickness(1.0);

    let mut x = MARGIN;
    for (_, width) in COLUMNS {
        layer.add_shape(rect(x, top, width, ROW_HEIGHT, false));
        x += width;
    }
}

/// Axis-aligned rectangle anchored at its top edge, filled or stroked.
fn rect(x: f64, top: f64, width: f64, height: f64, filled: bool) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(x), Mm(top)), false),
            (Point::new(Mm(x + width), Mm(top)), false),
            (Point::new(Mm(x + width), Mm(top - height)), false),
            (Point::new(Mm(x), Mm(top - height)), false),
        ],
        is_closed: true,
        has_fill: filled,
        has_stroke: !filled,
        is_clipping_path: false,
    }
}

/// Decode the chart PNG and embed it scaled to the content width.
fn draw_chart(cursor: &mut Cursor, chart_png: &[u8]) -> Result<(), AppError> {
    let decoded = image::load_from_memory(chart_png)
        .map_err(|e| AppError::render(format!("Failed to decode chart image: {e}")))?
        .to_rgb8();
    let (px_w, px_h) = decoded.dimensions();

    // The embed DPI controls the physical size: fit the content width, then
    // shrink further if the image would not fit on a page at all.
    let mut dpi = f64::from(px_w) * 25.4 / CONTENT_WIDTH;
    let mut height_mm = f64::from(px_h) * 25.4 / dpi;
    let max_height = PAGE_HEIGHT - 2.0 * MARGIN - 4.0;
    if height_mm > max_height {
        dpi = f64::from(px_h) * 25.4 / max_height;
        height_mm = max_height;
    }

    cursor.ensure_space(height_mm + 4.0);
    cursor.y -= height_mm + 2.0;

    let xobject = ImageXObject {
        width: Px(px_w as usize),
        height: Px(px_h as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: decoded.into_raw(),
        image_filter: None,
        clipping_bbox: None,
    };
    Image::from(xobject).add_to_layer(
        cursor.layer.clone(),
        Some(Mm(MARGIN)),
        Some(Mm(cursor.y)),
        None,
        None,
        None,
        Some(dpi),
    );

    Ok(())
}

fn grey() -> Color {
    Color::Rgb(Rgb::new(0.5, 0.5, 0.5, None))
}

fn whitesmoke() -> Color {
    Color::Rgb(Rgb::new(0.96, 0.96, 0.96, None))
}

fn beige() -> Color {
    Color::Rgb(Rgb::new(0.96, 0.96, 0.86, None))
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn layout_error(e: impl std::fmt::Display) -> AppError {
    AppError::render(format!("PDF layout failed: {e}"))
}
