//! Glyph programs for the handwriting-style stroke font.
//!
//! Every glyph is a short program of cursor operations in grid units, with y
//! pointing down. A program starts on the baseline at the left edge of its
//! cell, draws within roughly one unit of width and two units of height above
//! the baseline, and ends with a `MoveBy` back onto the baseline at the start
//! of the next glyph. Glyphs therefore compose without any spacing logic: the
//! end position of a program is always `start + advance`.
//!
//! Letters are case-insensitive. Digits and punctuation match exactly.

use glam::{DVec2, dvec2};

use crate::cursor::{LINE_HEIGHT, LINE_START_X};
use crate::errors::RenderError;
use crate::spline;

/// One step of a glyph program
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlyphOp {
    /// Move without drawing
    MoveBy(DVec2),
    /// Draw relative to the cursor and move
    LineBy(DVec2),
    /// Draw to an absolute grid position and move
    LineTo(DVec2),
    /// Draw a sampled curve; offsets chain from the cursor
    SplineBy(&'static [DVec2]),
    /// Filled marker at the cursor
    Dot,
    /// Back to the left column, one row down
    LineFeed,
}

impl GlyphOp {
    /// Where the cursor ends after this op, starting from `pos`
    pub fn end_position(&self, pos: DVec2) -> DVec2 {
        match *self {
            GlyphOp::MoveBy(d) | GlyphOp::LineBy(d) => pos + d,
            GlyphOp::LineTo(p) => p,
            GlyphOp::SplineBy(offsets) => spline::accumulate(pos, offsets)
                .last()
                .copied()
                .unwrap_or(pos),
            GlyphOp::Dot => pos,
            GlyphOp::LineFeed => dvec2(LINE_START_X, pos.y + LINE_HEIGHT),
        }
    }

    /// Whether executing this op puts marks on the canvas
    pub fn draws(&self) -> bool {
        matches!(
            self,
            GlyphOp::LineBy(_) | GlyphOp::LineTo(_) | GlyphOp::SplineBy(_) | GlyphOp::Dot
        )
    }
}

/// A character's program
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub ops: &'static [GlyphOp],
}

impl Glyph {
    /// Cursor position after running the program from `start`.
    ///
    /// Pure: depends on nothing but `start` and the program.
    pub fn end_position(&self, start: DVec2) -> DVec2 {
        self.ops.iter().fold(start, |pos, op| op.end_position(pos))
    }

    /// Displacement produced by the program (constant for every glyph
    /// except the line feed)
    pub fn advance(&self) -> DVec2 {
        self.end_position(DVec2::ZERO)
    }

    pub fn is_blank(&self) -> bool {
        !self.ops.iter().any(GlyphOp::draws)
    }
}

/// What to do with characters that have no program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsupportedPolicy {
    /// Fail with `UnsupportedGlyph`
    #[default]
    Strict,
    /// Draw [`PLACEHOLDER`] and keep going
    Lenient,
}

// Shorthands for the table below
const fn m(x: f64, y: f64) -> GlyphOp {
    GlyphOp::MoveBy(dvec2(x, y))
}

const fn l(x: f64, y: f64) -> GlyphOp {
    GlyphOp::LineBy(dvec2(x, y))
}

const fn s(offsets: &'static [DVec2]) -> GlyphOp {
    GlyphOp::SplineBy(offsets)
}

const fn p(x: f64, y: f64) -> DVec2 {
    dvec2(x, y)
}

const DOT: GlyphOp = GlyphOp::Dot;

/// Unit box drawn for unsupported characters in lenient mode
pub const PLACEHOLDER: Glyph = Glyph {
    ops: &[l(0.0, -1.0), l(1.0, 0.0), l(0.0, 1.0), l(-1.0, 0.0), m(2.0, 0.0)],
};

pub const SPACE: Glyph = Glyph { ops: &[m(2.0, 0.0)] };

pub const NEWLINE: Glyph = Glyph {
    ops: &[GlyphOp::LineFeed],
};

// Shared strokes
const BOWL_LEFT: &[DVec2] = &[p(-0.65, 0.0), p(0.0, -2.0), p(0.65, 0.0)];
const BOWL_RIGHT: &[DVec2] = &[p(0.65, 0.0), p(0.0, 2.0), p(-0.65, 0.0)];
const C_ARC: &[DVec2] = &[p(-1.0, 0.0), p(0.0, 2.0), p(1.0, 0.0)];
const UPPER_LOBE: &[DVec2] = &[p(1.0, 0.0), p(0.0, 1.0), p(-1.0, 0.0)];
const LOWER_LOBE: &[DVec2] = &[p(1.2, 0.0), p(0.0, 1.0), p(-1.2, 0.0)];
const P_LOBE: &[DVec2] = &[p(1.2, 0.0), p(0.0, 1.0), p(-1.2, 0.0)];
const D_ARC: &[DVec2] = &[p(1.3, 0.0), p(0.0, 2.0), p(-1.3, 0.0)];
const HOOK_UP: &[DVec2] = &[p(0.0, 0.5), p(1.0, 0.0), p(0.0, -0.5)];
const J_HOOK: &[DVec2] = &[p(0.0, 0.5), p(-1.0, 0.0), p(0.0, -0.5)];
const S_TOP: &[DVec2] = &[p(-1.0, 0.0), p(0.0, 1.0), p(0.5, 0.0)];
const S_BOTTOM: &[DVec2] = &[p(0.5, 0.0), p(0.0, 1.0), p(-1.0, 0.0)];
const TWO_HEAD: &[DVec2] = &[p(0.0, -0.5), p(1.0, 0.0), p(0.0, 0.7)];
const THREE_TOP: &[DVec2] = &[p(1.2, 0.0), p(0.0, 1.0), p(-0.9, 0.0)];
const THREE_BOTTOM: &[DVec2] = &[p(1.0, 0.0), p(0.0, 1.0), p(-1.3, 0.0)];
const FIVE_BELLY: &[DVec2] = &[p(1.2, -0.3), p(0.0, 1.4), p(-1.2, 0.0)];
const SIX_LOOP: &[DVec2] = &[p(0.0, -1.0), p(-1.0, 0.0)];
const EIGHT_TOP_LEFT: &[DVec2] = &[p(-0.6, 0.0), p(0.0, -1.0), p(0.6, 0.0)];
const EIGHT_TOP_RIGHT: &[DVec2] = &[p(0.6, 0.0), p(0.0, 1.0), p(-0.6, 0.0)];
const EIGHT_BOTTOM_LEFT: &[DVec2] = &[p(-0.7, 0.0), p(0.0, 1.0), p(0.7, 0.0)];
const EIGHT_BOTTOM_RIGHT: &[DVec2] = &[p(0.7, 0.0), p(0.0, -1.0), p(-0.7, 0.0)];
const NINE_LOOP: &[DVec2] = &[p(-1.1, 0.3), p(0.0, -1.1), p(1.1, 0.0)];
const QUESTION_HEAD: &[DVec2] = &[p(0.0, -0.5), p(1.0, 0.0), p(0.0, 0.7)];
const QUESTION_NECK: &[DVec2] = &[p(0.0, 0.3), p(-0.5, 0.0), p(0.0, 0.5)];

#[rustfmt::skip]
mod table {
    use super::*;

    pub const A: Glyph = Glyph { ops: &[l(0.5, -2.0), l(0.5, 2.0), m(-0.75, -1.0), l(0.5, 0.0), m(1.25, 1.0)] };
    pub const B: Glyph = Glyph { ops: &[l(0.0, -2.0), s(UPPER_LOBE), s(LOWER_LOBE), m(2.0, 0.0)] };
    pub const C: Glyph = Glyph { ops: &[m(1.0, -2.0), s(C_ARC), m(1.0, 0.0)] };
    pub const D: Glyph = Glyph { ops: &[l(0.0, -2.0), s(D_ARC), m(2.0, 0.0)] };
    pub const E: Glyph = Glyph { ops: &[m(1.0, -2.0), l(-1.0, 0.0), l(0.0, 2.0), l(1.0, 0.0), m(-1.0, -1.0), l(0.75, 0.0), m(1.25, 1.0)] };
    pub const F: Glyph = Glyph { ops: &[l(0.0, -2.0), l(1.0, 0.0), m(-1.0, 1.0), l(0.75, 0.0), m(1.25, 1.0)] };
    pub const G: Glyph = Glyph { ops: &[m(1.0, -2.0), s(C_ARC), l(0.0, -1.0), l(-0.5, 0.0), m(1.5, 1.0)] };
    pub const H: Glyph = Glyph { ops: &[l(0.0, -2.0), m(0.0, 1.0), l(1.0, 0.0), m(0.0, -1.0), l(0.0, 2.0), m(1.0, 0.0)] };
    pub const I: Glyph = Glyph { ops: &[m(0.5, 0.0), l(0.0, -2.0), m(-0.5, 0.0), l(1.0, 0.0), m(-1.0, 2.0), l(1.0, 0.0), m(1.0, 0.0)] };
    pub const J: Glyph = Glyph { ops: &[m(1.0, -2.0), l(0.0, 1.5), s(J_HOOK), m(2.0, 0.5)] };
    pub const K: Glyph = Glyph { ops: &[l(0.0, -2.0), m(1.0, 0.0), l(-1.0, 1.0), l(1.0, 1.0), m(1.0, 0.0)] };
    pub const L: Glyph = Glyph { ops: &[m(0.0, -2.0), l(0.0, 2.0), l(1.0, 0.0), m(1.0, 0.0)] };
    pub const M: Glyph = Glyph { ops: &[l(0.0, -2.0), l(0.5, 1.0), l(0.5, -1.0), l(0.0, 2.0), m(1.0, 0.0)] };
    pub const N: Glyph = Glyph { ops: &[l(0.0, -2.0), l(1.0, 2.0), l(0.0, -2.0), m(1.0, 2.0)] };
    pub const O: Glyph = Glyph { ops: &[m(0.5, 0.0), s(BOWL_LEFT), s(BOWL_RIGHT), m(1.5, 0.0)] };
    pub const P: Glyph = Glyph { ops: &[l(0.0, -2.0), s(P_LOBE), m(2.0, 1.0)] };
    pub const Q: Glyph = Glyph { ops: &[m(0.5, 0.0), s(BOWL_LEFT), s(BOWL_RIGHT), m(0.0, -0.5), l(0.5, 0.5), m(1.0, 0.0)] };
    pub const R: Glyph = Glyph { ops: &[l(0.0, -2.0), s(P_LOBE), l(1.0, 1.0), m(1.0, 0.0)] };
    pub const S: Glyph = Glyph { ops: &[m(1.0, -2.0), s(S_TOP), s(S_BOTTOM), m(2.0, 0.0)] };
    pub const T: Glyph = Glyph { ops: &[m(0.0, -2.0), l(1.0, 0.0), m(-0.5, 0.0), l(0.0, 2.0), m(1.5, 0.0)] };
    pub const U: Glyph = Glyph { ops: &[m(0.0, -2.0), l(0.0, 1.5), s(HOOK_UP), l(0.0, -1.5), m(1.0, 2.0)] };
    pub const V: Glyph = Glyph { ops: &[m(0.0, -2.0), l(0.5, 2.0), l(0.5, -2.0), m(1.0, 2.0)] };
    pub const W: Glyph = Glyph { ops: &[m(0.0, -2.0), l(0.25, 2.0), l(0.25, -1.0), l(0.25, 1.0), l(0.25, -2.0), m(1.0, 2.0)] };
    pub const X: Glyph = Glyph { ops: &[l(1.0, -2.0), m(-1.0, 0.0), l(1.0, 2.0), m(1.0, 0.0)] };
    pub const Y: Glyph = Glyph { ops: &[m(0.0, -2.0), l(0.5, 1.0), l(0.5, -1.0), m(-0.5, 1.0), l(0.0, 1.0), m(1.5, 0.0)] };
    pub const Z: Glyph = Glyph { ops: &[m(0.0, -2.0), l(1.0, 0.0), l(-1.0, 2.0), l(1.0, 0.0), m(1.0, 0.0)] };

    pub const D0: Glyph = Glyph { ops: &[m(0.5, 0.0), s(BOWL_LEFT), s(BOWL_RIGHT), m(-0.3, -0.3), l(0.6, -1.4), m(1.2, 1.7)] };
    pub const D1: Glyph = Glyph { ops: &[m(0.2, -1.6), l(0.4, -0.4), l(0.0, 2.0), m(1.4, 0.0)] };
    pub const D2: Glyph = Glyph { ops: &[m(0.0, -1.5), s(TWO_HEAD), l(-1.0, 1.3), l(1.0, 0.0), m(1.0, 0.0)] };
    pub const D3: Glyph = Glyph { ops: &[m(0.0, -2.0), s(THREE_TOP), s(THREE_BOTTOM), m(2.0, 0.0)] };
    pub const D4: Glyph = Glyph { ops: &[m(0.8, 0.0), l(0.0, -2.0), l(-0.8, 1.4), l(1.0, 0.0), m(1.0, 0.6)] };
    pub const D5: Glyph = Glyph { ops: &[m(1.0, -2.0), l(-1.0, 0.0), l(0.0, 0.9), s(FIVE_BELLY), m(2.0, 0.0)] };
    pub const D6: Glyph = Glyph { ops: &[m(1.0, -2.0), s(C_ARC), s(SIX_LOOP), m(2.0, 1.0)] };
    pub const D7: Glyph = Glyph { ops: &[m(0.0, -2.0), l(1.0, 0.0), l(-0.6, 2.0), m(1.6, 0.0)] };
    pub const D8: Glyph = Glyph { ops: &[m(0.5, -1.0), s(EIGHT_TOP_LEFT), s(EIGHT_TOP_RIGHT), s(EIGHT_BOTTOM_LEFT), s(EIGHT_BOTTOM_RIGHT), m(1.5, 1.0)] };
    pub const D9: Glyph = Glyph { ops: &[m(1.0, -1.2), s(NINE_LOOP), l(0.0, 2.0), m(1.0, 0.0)] };

    pub const PERIOD: Glyph = Glyph { ops: &[DOT, m(1.0, 0.0)] };
    pub const COMMA: Glyph = Glyph { ops: &[m(0.3, -0.2), l(0.0, 0.2), l(-0.3, 0.5), m(1.0, -0.5)] };
    pub const EXCLAMATION: Glyph = Glyph { ops: &[m(0.3, -2.0), l(0.0, 1.4), m(0.0, 0.6), DOT, m(0.7, 0.0)] };
    pub const QUESTION: Glyph = Glyph { ops: &[m(0.0, -1.5), s(QUESTION_HEAD), s(QUESTION_NECK), m(0.0, 0.5), DOT, m(1.5, 0.0)] };
    pub const PLUS: Glyph = Glyph { ops: &[m(0.0, -1.0), l(1.0, 0.0), m(-0.5, -0.5), l(0.0, 1.0), m(1.5, 0.5)] };
    pub const MINUS: Glyph = Glyph { ops: &[m(0.0, -1.0), l(1.0, 0.0), m(1.0, 1.0)] };
    pub const EQUALS: Glyph = Glyph { ops: &[m(0.0, -1.3), l(1.0, 0.0), m(-1.0, 0.6), l(1.0, 0.0), m(1.0, 0.7)] };
}

/// Program for `c`, if the font has one
pub fn lookup(c: char) -> Option<&'static Glyph> {
    use table::*;
    let glyph = match c.to_ascii_uppercase() {
        'A' => &A, 'B' => &B, 'C' => &C, 'D' => &D, 'E' => &E, 'F' => &F, 'G' => &G,
        'H' => &H, 'I' => &I, 'J' => &J, 'K' => &K, 'L' => &L, 'M' => &M, 'N' => &N,
        'O' => &O, 'P' => &P, 'Q' => &Q, 'R' => &R, 'S' => &S, 'T' => &T, 'U' => &U,
        'V' => &V, 'W' => &W, 'X' => &X, 'Y' => &Y, 'Z' => &Z,
        '0' => &D0, '1' => &D1, '2' => &D2, '3' => &D3, '4' => &D4,
        '5' => &D5, '6' => &D6, '7' => &D7, '8' => &D8, '9' => &D9,
        ' ' => &SPACE,
        '\n' => &NEWLINE,
        '.' => &PERIOD,
        ',' => &COMMA,
        '!' => &EXCLAMATION,
        '?' => &QUESTION,
        '+' => &PLUS,
        '-' => &MINUS,
        '=' => &EQUALS,
        _ => return None,
    };
    Some(glyph)
}

/// Every character with a program, newline included
pub fn supported_chars() -> impl Iterator<Item = char> {
    ('A'..='Z')
        .chain('0'..='9')
        .chain([' ', '\n', '.', ',', '!', '?', '+', '-', '='])
}

/// Character → program dispatch with an unsupported-character policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphTable {
    policy: UnsupportedPolicy,
}

impl GlyphTable {
    pub fn new(policy: UnsupportedPolicy) -> Self {
        Self { policy }
    }

    pub fn strict() -> Self {
        Self::new(UnsupportedPolicy::Strict)
    }

    pub fn lenient() -> Self {
        Self::new(UnsupportedPolicy::Lenient)
    }

    pub fn policy(&self) -> UnsupportedPolicy {
        self.policy
    }

    /// Program for the character at byte `offset` of `text`.
    ///
    /// `text` and `offset` only feed the error report.
    pub fn glyph(&self, text: &str, offset: usize, c: char) -> Result<&'static Glyph, RenderError> {
        match lookup(c) {
            Some(glyph) => Ok(glyph),
            None => self.fallback(text, offset, c),
        }
    }

    /// What to draw for a character [`lookup`] has no program for
    pub fn fallback(&self, text: &str, offset: usize, c: char) -> Result<&'static Glyph, RenderError> {
        match self.policy {
            UnsupportedPolicy::Lenient => Ok(&PLACEHOLDER),
            UnsupportedPolicy::Strict => Err(RenderError::unsupported_glyph(text, offset, c)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(a: DVec2, b: DVec2, what: &str) {
        assert!((a - b).length() < EPS, "{what}: {a} != {b}");
    }

    /// Documented advance of every drawable character
    fn documented_advance(c: char) -> DVec2 {
        match c {
            '.' | ',' | '!' => dvec2(1.0, 0.0),
            _ => dvec2(2.0, 0.0),
        }
    }

    #[test]
    fn every_glyph_ends_at_its_documented_advance() {
        for c in supported_chars().filter(|c| *c != '\n') {
            let glyph = lookup(c).unwrap();
            assert_close(glyph.advance(), documented_advance(c), &format!("advance of {c:?}"));
        }
    }

    #[test]
    fn advance_is_a_pure_function_of_start() {
        let starts = [dvec2(0.0, 0.0), dvec2(1.0, 3.0), dvec2(-7.25, 12.5)];
        for c in supported_chars().filter(|c| *c != '\n') {
            let glyph = lookup(c).unwrap();
            for start in starts {
                let first = glyph.end_position(start);
                let second = glyph.end_position(start);
                assert_eq!(first, second);
                assert_close(first, start + documented_advance(c), &format!("{c:?} from {start}"));
            }
        }
    }

    #[test]
    fn letters_are_case_insensitive() {
        for upper in 'A'..='Z' {
            let lower = upper.to_ascii_lowercase();
            assert_eq!(lookup(upper), lookup(lower));
        }
    }

    #[test]
    fn letters_and_digits_are_distinct() {
        let drawable: Vec<char> = ('A'..='Z').chain('0'..='9').collect();
        for (i, a) in drawable.iter().enumerate() {
            for b in &drawable[i + 1..] {
                assert_ne!(lookup(*a), lookup(*b), "{a} and {b} share a program");
            }
        }
    }

    #[test]
    fn glyphs_stay_in_their_cell() {
        // Every intermediate position lies within the cell above the baseline
        for c in supported_chars().filter(|c| !matches!(c, '\n' | ',')) {
            let glyph = lookup(c).unwrap();
            let mut pos = DVec2::ZERO;
            for op in glyph.ops {
                pos = op.end_position(pos);
                assert!(pos.y <= EPS && pos.y >= -2.0 - EPS, "{c:?} leaves the row: {pos}");
                assert!(pos.x >= -EPS && pos.x <= 2.0 + EPS, "{c:?} leaves the cell: {pos}");
            }
        }
    }

    #[test]
    fn space_is_a_pure_advance() {
        let glyph = lookup(' ').unwrap();
        assert_eq!(glyph.ops, &[GlyphOp::MoveBy(dvec2(2.0, 0.0))]);
        assert!(glyph.is_blank());
    }

    #[test]
    fn newline_is_a_line_feed() {
        let glyph = lookup('\n').unwrap();
        assert_eq!(glyph.ops, &[GlyphOp::LineFeed]);
        assert_eq!(glyph.end_position(dvec2(9.0, 3.0)), dvec2(LINE_START_X, 6.0));
    }

    #[test]
    fn every_drawable_glyph_draws() {
        for c in supported_chars().filter(|c| !matches!(c, ' ' | '\n')) {
            assert!(!lookup(c).unwrap().is_blank(), "{c:?} draws nothing");
        }
    }

    #[test]
    fn strict_table_rejects_unknown_characters() {
        let table = GlyphTable::strict();
        let err = table.glyph("x@", 1, '@').unwrap_err();
        assert_eq!(err.ch(), '@');
        assert!(table.glyph("x", 0, 'x').is_ok());
    }

    #[test]
    fn lenient_table_substitutes_placeholder() {
        let table = GlyphTable::lenient();
        assert_eq!(table.glyph("@", 0, '@').unwrap(), &PLACEHOLDER);
        assert_eq!(PLACEHOLDER.advance(), dvec2(2.0, 0.0));
    }

    #[test]
    fn default_policy_is_strict() {
        assert_eq!(GlyphTable::default().policy(), UnsupportedPolicy::Strict);
        assert!(GlyphTable::default().fallback("@", 0, '@').is_err());
        assert_eq!(GlyphTable::lenient().fallback("@", 0, '@').unwrap(), &PLACEHOLDER);
    }
}
