//! Canvas adapters: where absolute-position primitives end up.
//!
//! The sheet engine only ever talks to the [`Canvas`] trait, in millimetres
//! from the top-left corner of the current page. Backends:
//! - `pdf`: one PDF page per sheet page, via `pdf-writer`
//! - `svg`: all pages stacked in a single SVG document
//! - `recording`: keeps every call as a [`DrawOp`], for tests and tooling

pub mod pdf;
pub mod recording;
pub mod svg;

pub use self::pdf::PdfCanvas;
pub use self::recording::{DrawOp, RecordingCanvas};
pub use self::svg::SvgCanvas;

use enum_dispatch::enum_dispatch;
use std::io::Write;

use crate::errors::CanvasError;
use crate::types::{Mm, PtMm, Rgb};

/// Document-level metadata
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metadata {
    pub title: String,
    pub creator: String,
}

/// Drawing surface contract.
///
/// Style and draw calls outside an open page are dropped by every backend.
/// Style does not carry over between pages: each page starts from the
/// backend's default stroke, so callers set colour and width after
/// [`Canvas::begin_page`].
#[enum_dispatch]
pub trait Canvas {
    /// Open a new page of the given physical size
    fn begin_page(&mut self, width: Mm, height: Mm) -> Result<(), CanvasError>;

    fn set_stroke_color(&mut self, color: Rgb);

    fn set_stroke_width(&mut self, width: Mm);

    fn draw_line(&mut self, from: PtMm, to: PtMm);

    /// Filled disc in the current stroke colour
    fn draw_filled_circle(&mut self, center: PtMm, radius: Mm);

    fn set_metadata(&mut self, metadata: &Metadata);

    /// Close the open page
    fn end_page(&mut self) -> Result<(), CanvasError>;

    /// Serialize every finished page to `out`
    fn save(&mut self, out: &mut dyn Write) -> Result<(), CanvasError>;

    /// Number of finished pages
    fn page_count(&self) -> usize;

    /// File extension of the serialized format, without the dot
    fn extension(&self) -> &'static str;
}

/// Runtime-selected backend
#[enum_dispatch(Canvas)]
pub enum Backend {
    PdfCanvas,
    SvgCanvas,
    RecordingCanvas,
}

/// Output format names, as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Pdf,
    Svg,
}

impl Format {
    /// A fresh, empty canvas for this format
    pub fn canvas(self) -> Backend {
        match self {
            Format::Pdf => PdfCanvas::new().into(),
            Format::Svg => SvgCanvas::new().into(),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Format::Pdf => "pdf",
            Format::Svg => "svg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    #[test]
    fn backend_dispatches_to_inner_canvas() {
        let mut backend: Backend = RecordingCanvas::new().into();
        backend.begin_page(Mm(10.0), Mm(20.0)).unwrap();
        backend.draw_line(Point::new(Mm(0.0), Mm(0.0)), Point::new(Mm(1.0), Mm(1.0)));
        backend.end_page().unwrap();
        assert_eq!(backend.page_count(), 1);
        assert_eq!(backend.extension(), "txt");

        let Backend::RecordingCanvas(rec) = backend else {
            panic!("expected recording backend");
        };
        assert_eq!(rec.lines().len(), 1);
    }

    #[test]
    fn format_builds_matching_canvas() {
        assert_eq!(Format::Pdf.canvas().extension(), "pdf");
        assert_eq!(Format::Svg.canvas().extension(), "svg");
        assert_eq!(Format::default(), Format::Pdf);
    }
}
