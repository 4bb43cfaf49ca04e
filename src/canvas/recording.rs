//! Canvas that records calls instead of drawing them.

use std::io::Write;

use super::{Canvas, Metadata};
use crate::errors::CanvasError;
use crate::types::{Mm, PtMm, Rgb};

/// One recorded canvas call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    BeginPage { width: Mm, height: Mm },
    StrokeColor(Rgb),
    StrokeWidth(Mm),
    Line { from: PtMm, to: PtMm },
    FilledCircle { center: PtMm, radius: Mm },
    Metadata(Metadata),
    EndPage,
}

impl DrawOp {
    /// Whether this op leaves a mark on the page
    pub fn is_primitive(&self) -> bool {
        matches!(self, DrawOp::Line { .. } | DrawOp::FilledCircle { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
    open: bool,
    finished_pages: usize,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call so far, in order
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Only the drawing primitives (lines and circles)
    pub fn primitives(&self) -> Vec<&DrawOp> {
        self.ops.iter().filter(|op| op.is_primitive()).collect()
    }

    pub fn lines(&self) -> Vec<(PtMm, PtMm)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn circles(&self) -> Vec<(PtMm, Mm)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FilledCircle { center, radius } => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }

    /// Lines paired with the stroke width in effect when each was drawn
    pub fn lines_with_width(&self) -> Vec<(PtMm, PtMm, Mm)> {
        let mut width = Mm::ZERO;
        let mut out = Vec::new();
        for op in &self.ops {
            match op {
                DrawOp::StrokeWidth(w) => width = *w,
                DrawOp::Line { from, to } => out.push((*from, *to, width)),
                _ => {}
            }
        }
        out
    }

    /// Forget everything recorded so far, keeping page state
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn begin_page(&mut self, width: Mm, height: Mm) -> Result<(), CanvasError> {
        if self.open {
            return Err(CanvasError::PageAlreadyOpen);
        }
        self.open = true;
        self.ops.push(DrawOp::BeginPage { width, height });
        Ok(())
    }

    fn set_stroke_color(&mut self, color: Rgb) {
        if self.open {
            self.ops.push(DrawOp::StrokeColor(color));
        }
    }

    fn set_stroke_width(&mut self, width: Mm) {
        if self.open {
            self.ops.push(DrawOp::StrokeWidth(width));
        }
    }

    fn draw_line(&mut self, from: PtMm, to: PtMm) {
        if self.open {
            self.ops.push(DrawOp::Line { from, to });
        }
    }

    fn draw_filled_circle(&mut self, center: PtMm, radius: Mm) {
        if self.open {
            self.ops.push(DrawOp::FilledCircle { center, radius });
        }
    }

    fn set_metadata(&mut self, metadata: &Metadata) {
        self.ops.push(DrawOp::Metadata(metadata.clone()));
    }

    fn end_page(&mut self) -> Result<(), CanvasError> {
        if !self.open {
            return Err(CanvasError::NoOpenPage);
        }
        self.open = false;
        self.finished_pages += 1;
        self.ops.push(DrawOp::EndPage);
        Ok(())
    }

    /// Writes one `Debug` line per recorded op.
    fn save(&mut self, out: &mut dyn Write) -> Result<(), CanvasError> {
        if self.open {
            return Err(CanvasError::PageAlreadyOpen);
        }
        for op in &self.ops {
            writeln!(out, "{op:?}")?;
        }
        out.flush()?;
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.finished_pages
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    fn pt(x: f64, y: f64) -> PtMm {
        Point::new(Mm(x), Mm(y))
    }

    #[test]
    fn calls_outside_a_page_are_dropped() {
        let mut canvas = RecordingCanvas::new();
        canvas.set_stroke_color(Rgb::BLACK);
        canvas.set_stroke_width(Mm(0.4));
        canvas.draw_line(pt(0.0, 0.0), pt(1.0, 1.0));
        assert!(canvas.ops().is_empty());

        canvas.begin_page(Mm(10.0), Mm(10.0)).unwrap();
        canvas.end_page().unwrap();
        canvas.set_stroke_width(Mm(0.4));
        assert_eq!(canvas.ops().last(), Some(&DrawOp::EndPage));
    }

    #[test]
    fn page_lifecycle_is_checked() {
        let mut canvas = RecordingCanvas::new();
        assert!(matches!(canvas.end_page(), Err(CanvasError::NoOpenPage)));
        canvas.begin_page(Mm(10.0), Mm(10.0)).unwrap();
        assert!(matches!(
            canvas.begin_page(Mm(10.0), Mm(10.0)),
            Err(CanvasError::PageAlreadyOpen)
        ));
        let mut sink = Vec::new();
        assert!(matches!(canvas.save(&mut sink), Err(CanvasError::PageAlreadyOpen)));
        canvas.end_page().unwrap();
        assert_eq!(canvas.page_count(), 1);
    }

    #[test]
    fn lines_remember_their_width() {
        let mut canvas = RecordingCanvas::new();
        canvas.begin_page(Mm(10.0), Mm(10.0)).unwrap();
        canvas.set_stroke_width(Mm(0.05));
        canvas.draw_line(pt(0.0, 0.0), pt(1.0, 0.0));
        canvas.set_stroke_width(Mm(0.2));
        canvas.draw_line(pt(0.0, 1.0), pt(1.0, 1.0));
        let widths: Vec<Mm> = canvas.lines_with_width().iter().map(|l| l.2).collect();
        assert_eq!(widths, vec![Mm(0.05), Mm(0.2)]);
    }

    #[test]
    fn save_lists_ops() {
        let mut canvas = RecordingCanvas::new();
        canvas.begin_page(Mm(1.0), Mm(2.0)).unwrap();
        canvas.end_page().unwrap();
        let mut out = Vec::new();
        canvas.save(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("BeginPage"));
    }
}
