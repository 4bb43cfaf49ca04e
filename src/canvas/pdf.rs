//! PDF backend built on `pdf-writer`.
//!
//! The canvas contract is top-left origin in millimetres; PDF user space is
//! bottom-left origin in points. Every coordinate is converted on the way in,
//! so content streams are final by the time a page ends.

use pdf_writer::{Content, Finish, Pdf, Rect, Ref, TextStr};
use std::io::Write;

use super::{Canvas, Metadata};
use crate::errors::CanvasError;
use crate::log::debug;
use crate::types::{Mm, PtMm, Rgb};

/// Cubic Bézier handle length for a quarter circle of radius 1
const KAPPA: f64 = 0.552_284_749_830_793_4;

struct PdfPage {
    width: Mm,
    height: Mm,
    content: Content,
}

impl PdfPage {
    fn x(&self, x: Mm) -> f32 {
        x.to_pt() as f32
    }

    fn y(&self, y: Mm) -> f32 {
        (self.height - y).to_pt() as f32
    }
}

struct FinishedPage {
    width: Mm,
    height: Mm,
    content: Vec<u8>,
}

#[derive(Default)]
pub struct PdfCanvas {
    pages: Vec<FinishedPage>,
    current: Option<PdfPage>,
    metadata: Metadata,
}

impl PdfCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    fn write_pdf(&self) -> Vec<u8> {
        let mut pdf = Pdf::new();
        let catalog_id = Ref::new(1);
        let tree_id = Ref::new(2);
        let info_id = Ref::new(3);

        // Two objects per page: the page dictionary and its content stream
        let ids: Vec<(Ref, Ref)> = (0..self.pages.len() as i32)
            .map(|i| (Ref::new(4 + 2 * i), Ref::new(5 + 2 * i)))
            .collect();

        pdf.catalog(catalog_id).pages(tree_id);
        pdf.pages(tree_id)
            .kids(ids.iter().map(|(page_id, _)| *page_id))
            .count(self.pages.len() as i32);

        for (page, (page_id, content_id)) in self.pages.iter().zip(&ids) {
            let mut writer = pdf.page(*page_id);
            writer
                .media_box(Rect::new(
                    0.0,
                    0.0,
                    page.width.to_pt() as f32,
                    page.height.to_pt() as f32,
                ))
                .parent(tree_id)
                .contents(*content_id);
            writer.finish();
            pdf.stream(*content_id, &page.content);
        }

        let mut info = pdf.document_info(info_id);
        if !self.metadata.title.is_empty() {
            info.title(TextStr(&self.metadata.title));
        }
        if !self.metadata.creator.is_empty() {
            info.creator(TextStr(&self.metadata.creator));
        }
        info.finish();

        pdf.finish()
    }
}

impl Canvas for PdfCanvas {
    fn begin_page(&mut self, width: Mm, height: Mm) -> Result<(), CanvasError> {
        if self.current.is_some() {
            return Err(CanvasError::PageAlreadyOpen);
        }
        self.current = Some(PdfPage {
            width,
            height,
            content: Content::new(),
        });
        Ok(())
    }

    fn set_stroke_color(&mut self, color: Rgb) {
        if let Some(page) = self.current.as_mut() {
            let (r, g, b) = (color.r as f32, color.g as f32, color.b as f32);
            page.content.set_stroke_rgb(r, g, b);
            page.content.set_fill_rgb(r, g, b);
        }
    }

    fn set_stroke_width(&mut self, width: Mm) {
        if let Some(page) = self.current.as_mut() {
            page.content.set_line_width(width.to_pt() as f32);
        }
    }

    fn draw_line(&mut self, from: PtMm, to: PtMm) {
        if let Some(page) = self.current.as_mut() {
            let (x0, y0) = (page.x(from.x), page.y(from.y));
            let (x1, y1) = (page.x(to.x), page.y(to.y));
            page.content.move_to(x0, y0);
            page.content.line_to(x1, y1);
            page.content.stroke();
        }
    }

    fn draw_filled_circle(&mut self, center: PtMm, radius: Mm) {
        if let Some(page) = self.current.as_mut() {
            let cx = page.x(center.x);
            let cy = page.y(center.y);
            let r = radius.to_pt() as f32;
            let k = (KAPPA * radius.to_pt()) as f32;
            let c = &mut page.content;
            c.move_to(cx + r, cy);
            c.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);
            c.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);
            c.cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r);
            c.cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);
            c.close_path();
            c.fill_nonzero();
        }
    }

    fn set_metadata(&mut self, metadata: &Metadata) {
        self.metadata = metadata.clone();
    }

    fn end_page(&mut self) -> Result<(), CanvasError> {
        let page = self.current.take().ok_or(CanvasError::NoOpenPage)?;
        self.pages.push(FinishedPage {
            width: page.width,
            height: page.height,
            content: page.content.finish(),
        });
        Ok(())
    }

    fn save(&mut self, out: &mut dyn Write) -> Result<(), CanvasError> {
        if self.current.is_some() {
            return Err(CanvasError::PageAlreadyOpen);
        }
        let bytes = self.write_pdf();
        debug!(pages = self.pages.len(), bytes = bytes.len(), "writing pdf");
        out.write_all(&bytes)?;
        out.flush()?;
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }
}
