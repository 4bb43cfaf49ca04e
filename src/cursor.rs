//! Turtle-style cursor in grid units.
//!
//! A cursor is created for one write pass: it borrows the canvas and carries
//! the page's [`GridTransform`], so every drawing call lands on the canvas in
//! physical units immediately.

use glam::{DVec2, dvec2};

use crate::canvas::Canvas;
use crate::glyphs::GlyphOp;
use crate::spline::{self, SPLINE_STEPS};
use crate::types::GridTransform;

/// Radius of a dot, in grid units
pub const DOT_RADIUS: f64 = 0.5;

/// Column a line feed returns to
pub const LINE_START_X: f64 = 1.0;

/// Rows advanced by a line feed
pub const LINE_HEIGHT: f64 = 3.0;

pub struct Cursor<'c, C: Canvas + ?Sized> {
    pos: DVec2,
    transform: GridTransform,
    canvas: &'c mut C,
}

impl<'c, C: Canvas + ?Sized> Cursor<'c, C> {
    pub fn new(canvas: &'c mut C, transform: GridTransform, start: DVec2) -> Self {
        Self {
            pos: start,
            transform,
            canvas,
        }
    }

    pub fn position(&self) -> DVec2 {
        self.pos
    }

    pub fn transform(&self) -> GridTransform {
        self.transform
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.pos = dvec2(x, y);
    }

    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.pos += dvec2(dx, dy);
    }

    /// Draw from the current position to `(x, y)` and move there
    pub fn line_to(&mut self, x: f64, y: f64) {
        let to = dvec2(x, y);
        self.canvas
            .draw_line(self.transform.point(self.pos), self.transform.point(to));
        self.pos = to;
    }

    pub fn line_by(&mut self, dx: f64, dy: f64) {
        let to = self.pos + dvec2(dx, dy);
        self.line_to(to.x, to.y);
    }

    /// Filled disc at the current position; does not move
    pub fn dot(&mut self) {
        self.canvas.draw_filled_circle(
            self.transform.point(self.pos),
            self.transform.len(DOT_RADIUS),
        );
    }

    /// Curve whose control points after the current position are given as
    /// chained relative offsets. Drawn as [`SPLINE_STEPS`] lines; the cursor
    /// ends exactly on the last control point.
    pub fn spline_by(&mut self, offsets: &[DVec2]) {
        let control = spline::accumulate(self.pos, offsets);
        for p in spline::flatten(&control, SPLINE_STEPS) {
            self.line_to(p.x, p.y);
        }
    }

    /// Back to the left column, one text row down
    pub fn line_feed(&mut self) {
        self.pos = dvec2(LINE_START_X, self.pos.y + LINE_HEIGHT);
    }

    /// Execute one glyph program operation
    pub fn apply(&mut self, op: &GlyphOp) {
        match *op {
            GlyphOp::MoveBy(d) => self.move_by(d.x, d.y),
            GlyphOp::LineBy(d) => self.line_by(d.x, d.y),
            GlyphOp::LineTo(p) => self.line_to(p.x, p.y),
            GlyphOp::SplineBy(offsets) => self.spline_by(offsets),
            GlyphOp::Dot => self.dot(),
            GlyphOp::LineFeed => self.line_feed(),
        }
    }

    /// Execute a whole program in order
    pub fn run(&mut self, program: &[GlyphOp]) {
        for op in program {
            self.apply(op);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas};
    use crate::types::{Mm, Point};

    fn transform() -> GridTransform {
        GridTransform::new(Mm(4.0), Point::new(Mm(10.0), Mm(20.0)))
    }

    fn open_canvas() -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        canvas.begin_page(Mm(210.0), Mm(297.0)).unwrap();
        canvas.clear();
        canvas
    }

    #[test]
    fn moves_do_not_draw() {
        let mut canvas = open_canvas();
        let mut cursor = Cursor::new(&mut canvas, transform(), dvec2(0.0, 0.0));
        cursor.move_to(1.0, 3.0);
        cursor.move_by(0.5, -1.0);
        assert_eq!(cursor.position(), dvec2(1.5, 2.0));
        assert!(canvas.ops().is_empty());
    }

    #[test]
    fn line_by_draws_in_physical_units() {
        let mut canvas = open_canvas();
        let mut cursor = Cursor::new(&mut canvas, transform(), dvec2(1.0, 3.0));
        cursor.line_by(0.5, -2.0);
        assert_eq!(cursor.position(), dvec2(1.5, 1.0));
        assert_eq!(
            canvas.lines(),
            vec![(
                Point::new(Mm(14.0), Mm(32.0)),
                Point::new(Mm(16.0), Mm(24.0))
            )]
        );
    }

    #[test]
    fn dot_stays_put() {
        let mut canvas = open_canvas();
        let mut cursor = Cursor::new(&mut canvas, transform(), dvec2(2.0, 2.0));
        cursor.dot();
        assert_eq!(cursor.position(), dvec2(2.0, 2.0));
        assert_eq!(
            canvas.ops(),
            &[DrawOp::FilledCircle {
                center: Point::new(Mm(18.0), Mm(28.0)),
                radius: Mm(2.0),
            }]
        );
    }

    #[test]
    fn spline_draws_fixed_segments_and_ends_on_last_control_point() {
        let mut canvas = open_canvas();
        let mut cursor = Cursor::new(&mut canvas, transform(), dvec2(0.0, 0.0));
        cursor.spline_by(&[dvec2(1.0, 0.0), dvec2(0.0, 1.0), dvec2(-1.0, 0.0)]);
        assert_eq!(cursor.position(), dvec2(0.0, 1.0));
        let lines = canvas.lines();
        assert_eq!(lines.len(), SPLINE_STEPS as usize);
        // Segments are contiguous
        for pair in lines.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        assert_eq!(lines[0].0, Point::new(Mm(10.0), Mm(20.0)));
        assert_eq!(lines.last().unwrap().1, Point::new(Mm(10.0), Mm(24.0)));
    }

    #[test]
    fn line_feed_resets_column_and_advances_row() {
        let mut canvas = open_canvas();
        let mut cursor = Cursor::new(&mut canvas, transform(), dvec2(7.5, 3.0));
        cursor.line_feed();
        assert_eq!(cursor.position(), dvec2(LINE_START_X, 6.0));
        assert!(canvas.ops().is_empty());
    }

    #[test]
    fn run_interprets_every_op() {
        const OFFSETS: &[DVec2] = &[dvec2(0.0, 1.0)];
        let program = [
            GlyphOp::LineTo(dvec2(1.0, 0.0)),
            GlyphOp::SplineBy(OFFSETS),
            GlyphOp::Dot,
            GlyphOp::MoveBy(dvec2(1.0, -1.0)),
        ];
        let mut canvas = open_canvas();
        let mut cursor = Cursor::new(&mut canvas, transform(), dvec2(0.0, 0.0));
        cursor.run(&program);
        assert_eq!(cursor.position(), dvec2(2.0, 0.0));
        assert_eq!(canvas.lines().len(), 1 + SPLINE_STEPS as usize);
        assert_eq!(canvas.circles().len(), 1);
    }
}
