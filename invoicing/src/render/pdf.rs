//! PDF serialization of a composed invoice document.

use super::document::{compose, InvoiceDocument};
use crate::models::{Invoice, IssuerProfile};
use crate::services::metrics::RENDER_DURATION;
use app_core::AppError;
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 15.0;
const MARGIN_RIGHT: f32 = 195.0;
const TOP_START: f32 = 285.0;
const BOTTOM_LIMIT: f32 = 25.0;

// Item table column anchors.
const COL_DESC: f32 = 15.0;
const COL_QTY: f32 = 122.0;
const COL_RATE: f32 = 162.0;
const COL_AMOUNT: f32 = 195.0;

const PT_TO_MM: f32 = 0.352_778;

/// Render an invoice to PDF bytes.
///
/// Composition and rasterization are CPU-bound, so the work runs on the
/// blocking pool; the caller just awaits the bytes. There is no
/// cancellation: once started the render runs to completion or fails the
/// whole operation.
pub async fn render_pdf(invoice: &Invoice, issuer: &IssuerProfile) -> Result<Vec<u8>, AppError> {
    let timer = RENDER_DURATION.with_label_values(&["invoice"]).start_timer();

    let document = compose(invoice, issuer);
    let bytes = tokio::task::spawn_blocking(move || write_pdf(&document))
        .await
        .map_err(|e| AppError::RenderError(anyhow::anyhow!("Render task failed: {}", e)))??;

    timer.observe_duration();

    Ok(bytes)
}

/// Lay the composed document out on A4 pages and serialize it.
pub fn write_pdf(document: &InvoiceDocument) -> Result<Vec<u8>, AppError> {
    let (doc, page, layer) =
        PdfDocument::new("Invoice", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let mut layer = doc.get_page(page).get_layer(layer);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::RenderError(anyhow::anyhow!("Failed to load font: {}", e)))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::RenderError(anyhow::anyhow!("Failed to load font: {}", e)))?;

    let mut y: f32 = TOP_START;

    // Header: business name left, invoice number right.
    layer.use_text(
        document.business_name.as_str(),
        16.0,
        Mm(MARGIN_LEFT),
        Mm(y),
        &font_bold,
    );
    text_right(&layer, &font_bold, &document.invoice_label, 14.0, MARGIN_RIGHT, y);

    y -= 8.0;
    divider(&layer, y);
    y -= 8.0;

    // Party block, two columns.
    layer.use_text("From", 11.0, Mm(MARGIN_LEFT), Mm(y), &font_bold);
    layer.use_text("To", 11.0, Mm(110.0), Mm(y), &font_bold);

    let mut from_y = y - 6.0;
    for line in &document.from_lines {
        layer.use_text(line.as_str(), 10.0, Mm(MARGIN_LEFT), Mm(from_y), &font);
        from_y -= 5.0;
    }
    let mut to_y = y - 6.0;
    for line in &document.to_lines {
        layer.use_text(line.as_str(), 10.0, Mm(110.0), Mm(to_y), &font);
        to_y -= 5.0;
    }
    y = from_y.min(to_y) - 4.0;

    // Date row.
    let issue = format!("Issue Date: {}", document.issue_date);
    let due = format!("Due Date: {}", document.due_date);
    layer.use_text(issue.as_str(), 10.0, Mm(MARGIN_LEFT), Mm(y), &font);
    text_right(&layer, &font, &due, 10.0, MARGIN_RIGHT, y);
    y -= 10.0;

    // Item table, flowing onto continuation pages as needed.
    y = table_header(&layer, &font_bold, y);
    for row in &document.rows {
        if y < BOTTOM_LIMIT {
            layer = next_page(&doc);
            y = table_header(&layer, &font_bold, TOP_START);
        }
        layer.use_text(row.description.as_str(), 10.0, Mm(COL_DESC), Mm(y), &font);
        text_center(&layer, &font, &row.quantity, 10.0, COL_QTY, y);
        text_right(&layer, &font, &row.rate, 10.0, COL_RATE, y);
        text_right(&layer, &font, &row.amount, 10.0, COL_AMOUNT, y);
        y -= 6.0;
    }

    y -= 2.0;
    divider(&layer, y);
    y -= 8.0;

    // Totals block, right-aligned and borderless.
    if y < BOTTOM_LIMIT + 14.0 {
        layer = next_page(&doc);
        y = TOP_START;
    }
    text_right(&layer, &font, "Subtotal", 11.0, COL_RATE, y);
    text_right(&layer, &font, &document.totals.subtotal, 11.0, COL_AMOUNT, y);
    y -= 6.0;
    text_right(&layer, &font, &document.totals.tax_label, 11.0, COL_RATE, y);
    text_right(&layer, &font, &document.totals.tax_amount, 11.0, COL_AMOUNT, y);
    y -= 7.0;
    text_right(&layer, &font_bold, "Total", 12.0, COL_RATE, y);
    text_right(&layer, &font_bold, &document.totals.total, 12.0, COL_AMOUNT, y);

    if let Some(notes) = &document.notes {
        y -= 12.0;
        if y < BOTTOM_LIMIT {
            layer = next_page(&doc);
            y = TOP_START;
        }
        layer.use_text("Notes", 11.0, Mm(MARGIN_LEFT), Mm(y), &font_bold);
        y -= 5.5;
        for line in notes.lines() {
            if y < BOTTOM_LIMIT {
                layer = next_page(&doc);
                y = TOP_START;
            }
            layer.use_text(line, 10.0, Mm(MARGIN_LEFT), Mm(y), &font);
            y -= 5.0;
        }
    }

    let mut writer = std::io::BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| AppError::RenderError(anyhow::anyhow!("Failed to write PDF: {}", e)))?;
    writer
        .into_inner()
        .map_err(|e| AppError::RenderError(anyhow::anyhow!("Failed to flush PDF buffer: {}", e)))
}

fn table_header(layer: &PdfLayerReference, font_bold: &IndirectFontRef, y: f32) -> f32 {
    layer.use_text("Description", 10.0, Mm(COL_DESC), Mm(y), font_bold);
    text_center(layer, font_bold, "Qty", 10.0, COL_QTY, y);
    text_right(layer, font_bold, "Rate", 10.0, COL_RATE, y);
    text_right(layer, font_bold, "Amount", 10.0, COL_AMOUNT, y);
    let rule_y = y - 3.5;
    divider(layer, rule_y);
    rule_y - 6.5
}

fn next_page(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    doc.get_page(page).get_layer(layer)
}

fn divider(layer: &PdfLayerReference, y: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN_LEFT), Mm(y)), false),
            (Point::new(Mm(MARGIN_RIGHT), Mm(y)), false),
        ],
        is_closed: false,
    });
}

// Builtin fonts expose no glyph metrics; approximate alignment with an
// average Helvetica advance of half the em size.
fn text_width_mm(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.5 * PT_TO_MM
}

fn text_right(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    size: f32,
    right: f32,
    y: f32,
) {
    let x = right - text_width_mm(text, size);
    layer.use_text(text, size, Mm(x), Mm(y), font);
}

fn text_center(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    size: f32,
    center: f32,
    y: f32,
) {
    let x = center - text_width_mm(text, size) / 2.0;
    layer.use_text(text, size, Mm(x), Mm(y), font);
}
