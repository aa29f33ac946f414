//! PDF rendering
//!
//! Letter-size paginated table with fixed column x-offsets. The column
//! header row is repeated at the top of every page, so long reports stay
//! readable past the first page.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::error::{AppError, AppResult};

use super::ReportTable;

const PAGE_WIDTH: Mm = Mm(215.9);
const PAGE_HEIGHT: Mm = Mm(279.4);

/// Fixed column x-offsets, one per table column
const COLUMN_X: [f32; 5] = [15.0, 95.0, 125.0, 155.0, 185.0];

const TITLE_Y: f32 = 262.0;
const CAPTION_Y: f32 = 254.0;
const FIRST_PAGE_HEADER_Y: f32 = 244.0;
const CONTINUATION_HEADER_Y: f32 = 262.0;
const ROW_STEP: f32 = 7.0;
const BOTTOM_MARGIN: f32 = 18.0;

const TITLE_SIZE: f32 = 16.0;
const HEADER_SIZE: f32 = 12.0;
const ROW_SIZE: f32 = 11.0;

/// Render a table as a paginated PDF document.
pub fn render_pdf(table: &ReportTable) -> AppResult<Vec<u8>> {
    let (doc, page, layer) =
        PdfDocument::new(table.title.as_str(), PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::RenderError(format!("PDF font: {}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::RenderError(format!("PDF font: {}", e)))?;

    let mut current = doc.get_page(page).get_layer(layer);

    current.use_text(table.title.as_str(), TITLE_SIZE, Mm(70.0), Mm(TITLE_Y), &bold);
    if let Some(caption) = &table.caption {
        current.use_text(caption.as_str(), ROW_SIZE, Mm(70.0), Mm(CAPTION_Y), &regular);
    }
    draw_header(&current, table, &bold, FIRST_PAGE_HEADER_Y);

    let mut y = FIRST_PAGE_HEADER_Y - ROW_STEP;
    for row in &table.rows {
        if y < BOTTOM_MARGIN {
            let (next_page, next_layer) = doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
            current = doc.get_page(next_page).get_layer(next_layer);
            draw_header(&current, table, &bold, CONTINUATION_HEADER_Y);
            y = CONTINUATION_HEADER_Y - ROW_STEP;
        }
        for (cell, x) in row.iter().zip(COLUMN_X.iter()) {
            current.use_text(cell.as_str(), ROW_SIZE, Mm(*x), Mm(y), &regular);
        }
        y -= ROW_STEP;
    }

    doc.save_to_bytes()
        .map_err(|e| AppError::RenderError(format!("PDF save: {}", e)))
}

fn draw_header(layer: &PdfLayerReference, table: &ReportTable, bold: &IndirectFontRef, y: f32) {
    for (name, x) in table.columns.iter().zip(COLUMN_X.iter()) {
        layer.use_text(name.as_str(), HEADER_SIZE, Mm(*x), Mm(y), bold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(row_count: usize) -> ReportTable {
        ReportTable {
            title: "Sales & Profit Report".to_string(),
            caption: Some("2025-01-01 to 2025-03-31".to_string()),
            columns: ["Product Name", "Total Sold", "Revenue", "Cost", "Profit"]
                .into_iter()
                .map(String::from)
                .collect(),
            rows: (0..row_count)
                .map(|i| {
                    vec![
                        format!("Product {}", i),
                        "1".to_string(),
                        "10.00".to_string(),
                        "7.00".to_string(),
                        "3.00".to_string(),
                    ]
                })
                .collect(),
        }
    }

    #[test]
    fn empty_report_is_a_valid_document() {
        let bytes = render_pdf(&table(0)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_reports_grow_past_one_page() {
        let one_page = render_pdf(&table(3)).unwrap();
        let many_pages = render_pdf(&table(120)).unwrap();
        assert!(many_pages.starts_with(b"%PDF"));
        // 120 rows at 7mm per row cannot fit a single letter page
        assert!(many_pages.len() > one_page.len());
    }
}
