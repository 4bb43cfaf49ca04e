//! SVG backend: every page stacked top to bottom in one document.
//!
//! User units are millimetres; the root element carries `mm` width/height so
//! the file prints at scale. Each page is a `<g>` translated to its slot.

use std::io::Write;

use svg::Document;
use svg::node::element::{Circle, Element, Group, Line, Rectangle};
use svg::node::{self, Node};

use super::{Canvas, Metadata};
use crate::errors::CanvasError;
use crate::log::debug;
use crate::types::{Mm, PtMm, Rgb};

/// Vertical gap between stacked pages
pub const PAGE_GAP: Mm = Mm(10.0);

/// Stroke a page starts with
const DEFAULT_STROKE: Rgb = Rgb::BLACK;
const DEFAULT_STROKE_WIDTH: Mm = Mm(0.2);

/// Format a number with at most four decimals and no trailing zeros
pub fn fmt_num(v: f64) -> String {
    let s = format!("{:.4}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        s => s.to_string(),
    }
}

/// `<title>`/`<desc>` with a single text child
fn text_element(name: &str, content: &str) -> Element {
    let mut element = Element::new(name);
    element.append(node::Text::new(content));
    element
}

struct SvgPage {
    width: Mm,
    height: Mm,
    group: Group,
    stroke: Rgb,
    stroke_width: Mm,
}

#[derive(Default)]
pub struct SvgCanvas {
    pages: Vec<SvgPage>,
    current: Option<SvgPage>,
    metadata: Metadata,
}

impl SvgCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// The document tree for the finished pages
    pub fn document(&self) -> Document {
        let width = self
            .pages
            .iter()
            .map(|p| p.width)
            .fold(Mm::ZERO, |a, b| if b > a { b } else { a });
        let mut height = Mm::ZERO;
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                height += PAGE_GAP;
            }
            height += page.height;
        }

        let (w, h) = (fmt_num(width.0), fmt_num(height.0));
        let mut document = Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set("width", format!("{w}mm"))
            .set("height", format!("{h}mm"))
            .set("viewBox", format!("0 0 {w} {h}"));
        if !self.metadata.title.is_empty() {
            document = document.add(text_element("title", &self.metadata.title));
        }
        if !self.metadata.creator.is_empty() {
            document = document.add(text_element("desc", &self.metadata.creator));
        }

        let mut y = Mm::ZERO;
        for page in &self.pages {
            let group = page
                .group
                .clone()
                .set("transform", format!("translate(0,{})", fmt_num(y.0)));
            document = document.add(group);
            y += page.height + PAGE_GAP;
        }
        document
    }

    /// The serialized SVG for the finished pages
    pub fn to_svg(&self) -> String {
        self.document().to_string()
    }
}

impl Canvas for SvgCanvas {
    fn begin_page(&mut self, width: Mm, height: Mm) -> Result<(), CanvasError> {
        if self.current.is_some() {
            return Err(CanvasError::PageAlreadyOpen);
        }
        let background = Rectangle::new()
            .set("width", fmt_num(width.0))
            .set("height", fmt_num(height.0))
            .set("fill", Rgb::WHITE.to_rgb_string());
        self.current = Some(SvgPage {
            width,
            height,
            group: Group::new().add(background),
            stroke: DEFAULT_STROKE,
            stroke_width: DEFAULT_STROKE_WIDTH,
        });
        Ok(())
    }

    fn set_stroke_color(&mut self, color: Rgb) {
        if let Some(page) = self.current.as_mut() {
            page.stroke = color;
        }
    }

    fn set_stroke_width(&mut self, width: Mm) {
        if let Some(page) = self.current.as_mut() {
            page.stroke_width = width;
        }
    }

    fn draw_line(&mut self, from: PtMm, to: PtMm) {
        if let Some(page) = self.current.as_mut() {
            let line = Line::new()
                .set("x1", fmt_num(from.x.0))
                .set("y1", fmt_num(from.y.0))
                .set("x2", fmt_num(to.x.0))
                .set("y2", fmt_num(to.y.0))
                .set("stroke", page.stroke.to_rgb_string())
                .set("stroke-width", fmt_num(page.stroke_width.0));
            page.group.append(line);
        }
    }

    fn draw_filled_circle(&mut self, center: PtMm, radius: Mm) {
        if let Some(page) = self.current.as_mut() {
            let circle = Circle::new()
                .set("cx", fmt_num(center.x.0))
                .set("cy", fmt_num(center.y.0))
                .set("r", fmt_num(radius.0))
                .set("fill", page.stroke.to_rgb_string());
            page.group.append(circle);
        }
    }

    fn set_metadata(&mut self, metadata: &Metadata) {
        self.metadata = metadata.clone();
    }

    fn end_page(&mut self) -> Result<(), CanvasError> {
        let page = self.current.take().ok_or(CanvasError::NoOpenPage)?;
        self.pages.push(page);
        Ok(())
    }

    fn save(&mut self, out: &mut dyn Write) -> Result<(), CanvasError> {
        if self.current.is_some() {
            return Err(CanvasError::PageAlreadyOpen);
        }
        let document = self.document();
        debug!(pages = self.pages.len(), "writing svg");
        svg::write(&mut *out, &document)?;
        out.flush()?;
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn extension(&self) -> &'static str {
        "svg"
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
    fn numbers_are_trimmed() {
        assert_eq!(fmt_num(16.0), "16");
        assert_eq!(fmt_num(0.05), "0.05");
        assert_eq!(fmt_num(0.1 + 0.2), "0.3");
        assert_eq!(fmt_num(-0.00001), "0");
        assert_eq!(fmt_num(-2.5), "-2.5");
    }

    #[test]
    fn empty_metadata_is_left_out() {
        let mut canvas = SvgCanvas::new();
        canvas.set_metadata(&Metadata {
            title: "Squared sheet".into(),
            creator: String::new(),
        });
        let svg = canvas.to_svg();
        assert!(svg.contains("<title"));
        assert!(svg.contains("Squared sheet"));
        assert!(!svg.contains("<desc"));
    }

    #[test]
    fn pages_stack_with_gap() {
        let mut canvas = SvgCanvas::new();
        for _ in 0..2 {
            canvas.begin_page(Mm(20.0), Mm(30.0)).unwrap();
            canvas.draw_line(pt(0.0, 0.0), pt(20.0, 0.0));
            canvas.end_page().unwrap();
        }
        let svg = canvas.to_svg();
        assert!(svg.contains("viewBox=\"0 0 20 70\""));
        assert!(svg.contains("translate(0,0)"));
        assert!(svg.contains("translate(0,40)"));
        assert_eq!(svg.matches("<line ").count(), 2);
        assert_eq!(svg.matches("fill=\"rgb(255,255,255)\"").count(), 2);
    }

    #[test]
    fn circle_uses_stroke_colour() {
        let mut canvas = SvgCanvas::new();
        canvas.begin_page(Mm(10.0), Mm(10.0)).unwrap();
        canvas.set_stroke_color(Rgb::new(1.0, 0.0, 0.0));
        canvas.draw_filled_circle(pt(5.0, 5.0), Mm(0.5));
        canvas.end_page().unwrap();
        let svg = canvas.to_svg();
        assert!(svg.contains("<circle "));
        assert!(svg.contains("r=\"0.5\""));
        assert!(svg.contains("fill=\"rgb(255,0,0)\""));
    }

    #[test]
    fn style_outside_a_page_is_ignored() {
        let mut canvas = SvgCanvas::new();
        canvas.set_stroke_color(Rgb::new(1.0, 0.0, 0.0));
        canvas.set_stroke_width(Mm(3.0));
        canvas.begin_page(Mm(10.0), Mm(10.0)).unwrap();
        canvas.draw_line(pt(0.0, 0.0), pt(10.0, 0.0));
        canvas.end_page().unwrap();
        let svg = canvas.to_svg();
        assert!(svg.contains("stroke=\"rgb(0,0,0)\""));
        assert!(svg.contains("stroke-width=\"0.2\""));
        assert!(!svg.contains("rgb(255,0,0)"));
    }

    #[test]
    fn style_does_not_carry_over_to_the_next_page() {
        let mut canvas = SvgCanvas::new();
        canvas.begin_page(Mm(10.0), Mm(10.0)).unwrap();
        canvas.set_stroke_width(Mm(3.0));
        canvas.end_page().unwrap();
        canvas.begin_page(Mm(10.0), Mm(10.0)).unwrap();
        canvas.draw_line(pt(0.0, 0.0), pt(10.0, 0.0));
        canvas.end_page().unwrap();
        assert!(canvas.to_svg().contains("stroke-width=\"0.2\""));
    }
}
