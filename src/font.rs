//! Text → strokes, one glyph program at a time.

use glam::DVec2;

use crate::canvas::Canvas;
use crate::cursor::Cursor;
use crate::errors::RenderError;
use crate::glyphs::{GlyphTable, lookup};
use crate::log::{debug, warn};

/// Drives the glyph table over a string against one cursor
#[derive(Debug, Clone, Copy, Default)]
pub struct FontRenderer {
    table: GlyphTable,
}

impl FontRenderer {
    pub fn new(table: GlyphTable) -> Self {
        Self { table }
    }

    /// Render `text` left to right; the cursor threads through every glyph.
    ///
    /// In strict mode the first unsupported character stops the pass with
    /// `UnsupportedGlyph`. Whatever was drawn before it stays on the canvas.
    pub fn write<C: Canvas + ?Sized>(
        &self,
        cursor: &mut Cursor<'_, C>,
        text: &str,
    ) -> Result<(), RenderError> {
        debug!(len = text.len(), start = ?cursor.position(), "write");
        for (offset, c) in text.char_indices() {
            let glyph = match lookup(c) {
                Some(glyph) => glyph,
                None => {
                    let placeholder = self.table.fallback(text, offset, c)?;
                    warn!(?c, offset, "no glyph, drawing placeholder");
                    placeholder
                }
            };
            cursor.run(glyph.ops);
        }
        Ok(())
    }

    /// Where the cursor would end after writing `text` from `start`,
    /// without drawing anything.
    pub fn measure(&self, start: DVec2, text: &str) -> Result<DVec2, RenderError> {
        let mut pos = start;
        for (offset, c) in text.char_indices() {
            pos = self.table.glyph(text, offset, c)?.end_position(pos);
        }
        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas};
    use crate::cursor::LINE_START_X;
    use crate::glyphs::lookup;
    use crate::types::{GridTransform, Mm, Point};
    use glam::dvec2;

    fn canvas() -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        canvas.begin_page(Mm(210.0), Mm(297.0)).unwrap();
        canvas.clear();
        canvas
    }

    fn transform() -> GridTransform {
        GridTransform::new(Mm(4.0), Point::new(Mm(0.0), Mm(0.0)))
    }

    fn write(
        renderer: FontRenderer,
        canvas: &mut RecordingCanvas,
        text: &str,
    ) -> (DVec2, Result<(), RenderError>) {
        let mut cursor = Cursor::new(canvas, transform(), dvec2(1.0, 3.0));
        let result = renderer.write(&mut cursor, text);
        (cursor.position(), result)
    }

    #[test]
    fn a_then_period_draws_glyph_then_dot() {
        let mut canvas = canvas();
        let (end, result) = write(FontRenderer::default(), &mut canvas, "A.");
        result.unwrap();

        let advance = lookup('A').unwrap().advance() + lookup('.').unwrap().advance();
        assert_eq!(end, dvec2(1.0, 3.0) + advance);

        let prims = canvas.primitives();
        // A is three lines, then the period's dot
        assert_eq!(prims.len(), 4);
        assert!(prims[..3].iter().all(|op| matches!(op, DrawOp::Line { .. })));
        assert!(matches!(prims[3], DrawOp::FilledCircle { .. }));
    }

    #[test]
    fn newline_alone_draws_nothing() {
        let mut canvas = canvas();
        let (end, result) = write(FontRenderer::default(), &mut canvas, "\n");
        result.unwrap();
        assert_eq!(end, dvec2(LINE_START_X, 6.0));
        assert!(canvas.ops().is_empty());
    }

    #[test]
    fn strict_mode_stops_at_unsupported_character() {
        let mut canvas = canvas();
        let (end, result) = write(FontRenderer::new(GlyphTable::strict()), &mut canvas, "-@-");
        let err = result.unwrap_err();
        assert_eq!(err.ch(), '@');
        // The leading minus stays drawn, nothing after it
        assert_eq!(canvas.lines().len(), 1);
        assert_eq!(end, dvec2(3.0, 3.0));
    }

    #[test]
    fn strict_mode_draws_nothing_for_lone_unsupported_character() {
        let mut canvas = canvas();
        let (_, result) = write(FontRenderer::new(GlyphTable::strict()), &mut canvas, "@");
        assert!(result.is_err());
        assert!(canvas.ops().is_empty());
    }

    #[test]
    fn lenient_mode_draws_one_box_and_continues() {
        let mut canvas = canvas();
        let (end, result) = write(FontRenderer::new(GlyphTable::lenient()), &mut canvas, "@-");
        result.unwrap();
        // Four box sides, then the minus
        assert_eq!(canvas.lines().len(), 5);
        assert_eq!(end, dvec2(5.0, 3.0));
    }

    #[test]
    fn measure_matches_write() {
        let renderer = FontRenderer::default();
        let text = "Hello World 42\nOK? 1+1=2!";
        let mut canvas = canvas();
        let (end, result) = write(renderer, &mut canvas, text);
        result.unwrap();
        let measured = renderer.measure(dvec2(1.0, 3.0), text).unwrap();
        assert!((end - measured).length() < 1e-9);
    }

    #[test]
    fn case_does_not_change_output() {
        let mut upper = canvas();
        let mut lower = canvas();
        write(FontRenderer::default(), &mut upper, "QUADRETTI").1.unwrap();
        write(FontRenderer::default(), &mut lower, "quadretti").1.unwrap();
        assert_eq!(upper.ops(), lower.ops());
    }
}
