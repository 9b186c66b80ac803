//! PDF rendering on top of `pdf-writer`.
//!
//! `PdfDoc` keeps the object bookkeeping (refs, page tree, fonts) and
//! offers two primitives: free text lines and multi-page tables. The
//! tabular exports use `table()` directly; `render_invoice_pdf` composes
//! a header block, the client block and the line-item table into a
//! single invoice document.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::client::Client;
use crate::models::invoice::{self, Invoice, LineItem};
use crate::utils::formatting::format_money;
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

const PAGE_W: f32 = 595.0; // A4 portrait, points
const PAGE_H: f32 = 842.0;
const MARGIN: f32 = 48.0;
const ROW_H: f32 = 18.0;

const BODY_SIZE: f32 = 9.5;
const HEADER_SIZE: f32 = 10.5;
const TITLE_SIZE: f32 = 15.0;

pub struct PdfDoc {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    bold_id: Ref,
    next_id: i32,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,
}

impl Default for PdfDoc {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDoc {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_id = Ref::new(4);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));
        pdf.type1_font(bold_id).base_font(Name(b"Helvetica-Bold"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            bold_id,
            next_id: 5,
            page_refs: Vec::new(),
            current_content_id: None,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Open a new page; the returned Content is finished by `end_page`.
    fn begin_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, PAGE_W, PAGE_H))
            .contents(content_id);

        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        fonts.pair(Name(b"F1"), self.font_id);
        fonts.pair(Name(b"F2"), self.bold_id);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn end_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn text(&self, content: &mut Content, x: f32, y: f32, size: f32, bold: bool, s: &str) {
        content.begin_text();
        content.set_font(if bold { Name(b"F2") } else { Name(b"F1") }, size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(s.as_bytes()));
        content.end_text();
    }

    fn cell_border(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    fn band(&self, content: &mut Content, y: f32, width: f32, rgb: (f32, f32, f32)) {
        content.save_state();
        content.set_fill_rgb(rgb.0, rgb.1, rgb.2);
        content.rect(MARGIN, y, width, ROW_H);
        content.fill_nonzero();
        content.restore_state();
    }

    fn row(
        &self,
        content: &mut Content,
        y: f32,
        col_widths: &[f32],
        cells: &[String],
        size: f32,
        bold: bool,
    ) {
        let mut x = MARGIN;
        for (i, cell) in cells.iter().enumerate() {
            let w = col_widths[i];
            self.text(content, x + 4.0, y + 5.0, size, bold, cell);
            self.cell_border(content, x, y, w, ROW_H);
            x += w;
        }
    }

    /// Column widths scaled from header + content length into the page.
    fn col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers.iter().map(|h| h.len() as f32 * 6.5).collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.len() as f32 * 6.2);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = PAGE_W - 2.0 * MARGIN;

        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    /// Multi-page table with a title on every page.
    pub fn table(&mut self, title: &str, headers: &[&str], rows: &[Vec<String>]) {
        let col_widths = self.col_widths(headers, rows);
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        let table_w: f32 = col_widths.iter().sum();

        let mut remaining: &[Vec<String>] = rows;
        let mut page_idx = 1;

        loop {
            let mut content = self.begin_page();

            self.text(
                &mut content,
                MARGIN,
                PAGE_H - MARGIN + 12.0,
                TITLE_SIZE,
                true,
                title,
            );
            self.text(
                &mut content,
                PAGE_W - MARGIN - 56.0,
                MARGIN - 32.0,
                BODY_SIZE,
                false,
                &format!("Page {}", page_idx),
            );

            let mut y = PAGE_H - MARGIN - 28.0;

            self.band(&mut content, y, table_w, (0.85, 0.87, 0.90));
            self.row(&mut content, y, &col_widths, &header_row, HEADER_SIZE, true);
            y -= ROW_H;

            let mut consumed = 0;
            for (i, row) in remaining.iter().enumerate() {
                if y - ROW_H < MARGIN {
                    break;
                }

                if i % 2 == 0 {
                    self.band(&mut content, y, table_w, (0.96, 0.96, 0.96));
                }
                self.row(&mut content, y, &col_widths, row, BODY_SIZE, false);

                y -= ROW_H;
                consumed += 1;
            }

            self.end_page(content);

            remaining = &remaining[consumed..];
            page_idx += 1;

            if remaining.is_empty() {
                break;
            }
        }
    }

    pub fn save(mut self, path: &Path) -> io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);

        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
        drop(pages);

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

/// Render a single invoice as a one-page document: number and dates,
/// bill-to block, line items, total.
pub fn render_invoice_pdf(
    invoice: &Invoice,
    client: Option<&Client>,
    items: &[LineItem],
    cfg: &Config,
    path: &Path,
) -> AppResult<()> {
    let mut doc = PdfDoc::new();

    let mut content = doc.begin_page();

    let mut y = PAGE_H - MARGIN;
    doc.text(&mut content, MARGIN, y, TITLE_SIZE + 3.0, true, "INVOICE");
    doc.text(
        &mut content,
        PAGE_W - MARGIN - 130.0,
        y,
        HEADER_SIZE,
        true,
        &invoice.number,
    );

    y -= 26.0;
    doc.text(
        &mut content,
        MARGIN,
        y,
        BODY_SIZE,
        false,
        &format!("Issue date: {}", invoice.issue_date.format("%Y-%m-%d")),
    );
    y -= 14.0;
    doc.text(
        &mut content,
        MARGIN,
        y,
        BODY_SIZE,
        false,
        &format!("Due date:   {}", invoice.due_date.format("%Y-%m-%d")),
    );
    y -= 14.0;
    doc.text(
        &mut content,
        MARGIN,
        y,
        BODY_SIZE,
        false,
        &format!("Status:     {}", invoice.status.to_db_str()),
    );

    // Bill-to block; a deleted client still yields a valid document.
    y -= 30.0;
    doc.text(&mut content, MARGIN, y, HEADER_SIZE, true, "Bill to:");
    y -= 14.0;
    match client {
        Some(c) => {
            doc.text(&mut content, MARGIN, y, BODY_SIZE, false, &c.label());
            if !c.email.is_empty() {
                y -= 12.0;
                doc.text(&mut content, MARGIN, y, BODY_SIZE, false, &c.email);
            }
        }
        None => {
            doc.text(
                &mut content,
                MARGIN,
                y,
                BODY_SIZE,
                false,
                crate::models::client::UNKNOWN_CLIENT,
            );
        }
    }

    // Line items
    y -= 30.0;
    let headers = ["#", "description", "qty", "unit price", "amount"];
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            vec![
                item.position.to_string(),
                item.description.clone(),
                format!("{:.2}", item.quantity),
                format!("{:.2}", item.unit_price),
                format!("{:.2}", item.amount()),
            ]
        })
        .collect();

    let col_widths = doc.col_widths(&headers, &rows);
    let table_w: f32 = col_widths.iter().sum();
    let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();

    doc.band(&mut content, y, table_w, (0.85, 0.87, 0.90));
    doc.row(&mut content, y, &col_widths, &header_row, HEADER_SIZE, true);
    y -= ROW_H;

    for (i, row) in rows.iter().enumerate() {
        if y - ROW_H < MARGIN + 40.0 {
            // Long invoices are unusual; keep everything on one page
            // and stop rather than overflow into the footer.
            doc.text(&mut content, MARGIN, y + 4.0, BODY_SIZE, false, "...");
            break;
        }
        if i % 2 == 0 {
            doc.band(&mut content, y, table_w, (0.96, 0.96, 0.96));
        }
        doc.row(&mut content, y, &col_widths, row, BODY_SIZE, false);
        y -= ROW_H;
    }

    y -= 22.0;
    doc.text(
        &mut content,
        MARGIN,
        y,
        HEADER_SIZE + 1.0,
        true,
        &format!(
            "Total: {}",
            format_money(invoice::total(items), &cfg.currency)
        ),
    );

    doc.end_page(content);

    doc.save(path)
        .map_err(|e| AppError::Export(format!("PDF write error: {e}")))?;

    Ok(())
}
