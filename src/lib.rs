//! Squared paper sheets with a procedural stroke font.
//!
//! A [`Document`] lays out a grid of square cells on every page and can write
//! text over it with a small handwriting-style font whose glyphs are programs
//! for a turtle [`Cursor`]. Output goes through the [`Canvas`] trait; PDF and
//! SVG backends are included.
//!
//! ```
//! use quadretti::{Document, GlyphTable, GridStyle, PageSpec, RecordingCanvas};
//!
//! let mut doc = Document::new(
//!     RecordingCanvas::new(),
//!     PageSpec::default(),
//!     GridStyle::default(),
//!     GlyphTable::strict(),
//! )?;
//! doc.page()?;
//! doc.write_at(1.0, 3.0, "Ciao.")?;
//! doc.save_to(&mut Vec::new())?;
//! # Ok::<(), quadretti::DocumentError>(())
//! ```

pub mod canvas;
pub mod config;
pub mod cursor;
pub mod document;
pub mod errors;
pub mod font;
pub mod glyphs;
pub mod grid;
pub mod log;
pub mod spline;
pub mod types;

pub use canvas::{Backend, Canvas, DrawOp, Format, Metadata, PdfCanvas, RecordingCanvas, SvgCanvas};
pub use config::{Destination, PaperSize, SheetConfig, TextSource};
pub use cursor::Cursor;
pub use document::{Document, DocumentState, render_sheets};
pub use errors::{CanvasError, ConfigError, DocumentError, RenderError};
pub use font::FontRenderer;
pub use glyphs::{Glyph, GlyphOp, GlyphTable, UnsupportedPolicy};
pub use grid::{GridGeometry, GridStyle, PageSpec};
pub use types::{GridTransform, Mm, Point, PtMm, Rgb};
