//! Page composer: the document state machine.
//!
//! A [`Document`] owns its canvas from creation to save. Pages are opened with
//! [`Document::page`], which closes the previous one, moves the grid origin by
//! page parity and draws the grid. Text goes on the active page through
//! [`Document::write_at`].

use std::fs::File;
use std::io::{self, BufWriter, Write};

use glam::{DVec2, dvec2};

use crate::canvas::{Canvas, Metadata};
use crate::config::{Destination, SheetConfig};
use crate::cursor::Cursor;
use crate::errors::DocumentError;
use crate::font::FontRenderer;
use crate::glyphs::GlyphTable;
use crate::grid::{self, GridGeometry, GridStyle, PageSpec};
use crate::log::{info, warn};
use crate::types::{GridTransform, Point, PtMm};

/// Lifecycle of a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// No page yet
    Created,
    /// Page `n` (1-based) is open
    Active(u32),
    /// Saved; nothing more can be added
    Finalized,
}

/// Title and creator recorded in the output document
pub fn sheet_metadata(spec: &PageSpec) -> Metadata {
    Metadata {
        title: format!(
            "Squared sheet - {}mm x {}mm - {}",
            spec.side, spec.side, spec.thick
        ),
        creator: "quadretti".to_string(),
    }
}

pub struct Document<C: Canvas> {
    canvas: C,
    spec: PageSpec,
    geometry: GridGeometry,
    style: GridStyle,
    renderer: FontRenderer,
    page_number: u32,
    state: DocumentState,
    /// Set once the canvas has been written out successfully
    written: bool,
}

impl<C: Canvas> Document<C> {
    /// Validate the page geometry and record metadata. No page is opened.
    pub fn new(
        mut canvas: C,
        spec: PageSpec,
        style: GridStyle,
        table: GlyphTable,
    ) -> Result<Self, DocumentError> {
        let geometry = GridGeometry::compute(&spec)?;
        canvas.set_metadata(&sheet_metadata(&spec));
        Ok(Self {
            canvas,
            spec,
            geometry,
            style,
            renderer: FontRenderer::new(table),
            page_number: 0,
            state: DocumentState::Created,
            written: false,
        })
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    /// Number of pages started so far
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Top-left corner of the grid on page `page_number`.
    ///
    /// Odd pages are shifted right by the sheet offset.
    pub fn origin_for(&self, page_number: u32) -> PtMm {
        let x = if page_number % 2 == 1 {
            self.spec.sheet_offset + self.geometry.center_x
        } else {
            self.geometry.center_x
        };
        Point::new(x, self.geometry.center_y)
    }

    /// Close the active page, if any, and start the next one with its grid.
    /// Returns the new page number.
    pub fn page(&mut self) -> Result<u32, DocumentError> {
        match self.state {
            DocumentState::Finalized => return Err(DocumentError::Finalized),
            DocumentState::Active(_) => self.canvas.end_page()?,
            DocumentState::Created => {}
        }

        let n = self.page_number + 1;
        self.canvas.begin_page(self.spec.width, self.spec.height)?;
        self.page_number = n;
        self.state = DocumentState::Active(n);

        let origin = self.origin_for(n);
        info!(page = n, x = %origin.x, y = %origin.y, "page");
        grid::layout(&mut self.canvas, &self.spec, &self.geometry, &self.style, origin);
        Ok(n)
    }

    /// Write `text` on the active page starting at grid position `(x, y)`.
    ///
    /// Returns where the cursor ended. In strict mode an unsupported
    /// character aborts the rest of the text; strokes already drawn stay.
    pub fn write_at(&mut self, x: f64, y: f64, text: &str) -> Result<DVec2, DocumentError> {
        let n = match self.state {
            DocumentState::Active(n) => n,
            DocumentState::Created => return Err(DocumentError::NoActivePage),
            DocumentState::Finalized => return Err(DocumentError::Finalized),
        };

        self.canvas.set_stroke_color(self.style.text_color);
        self.canvas.set_stroke_width(self.style.text_width);

        let transform = GridTransform::new(self.spec.side, self.origin_for(n));
        let renderer = self.renderer;
        let mut cursor = Cursor::new(&mut self.canvas, transform, dvec2(x, y));
        renderer.write(&mut cursor, text)?;
        Ok(cursor.position())
    }

    /// Close the last page and serialize the document to `out`.
    ///
    /// Saving again after a successful save is a no-op. After a failed write
    /// the document stays finalized and the save can be retried.
    pub fn save_to(&mut self, out: &mut dyn Write) -> Result<(), DocumentError> {
        if !self.finish()? {
            return Ok(());
        }
        self.canvas.save(out)?;
        self.written = true;
        info!(pages = self.canvas.page_count(), "saved");
        Ok(())
    }

    /// Close the last page and write the document to `destination`.
    ///
    /// File destinations get the canvas format's extension when missing.
    pub fn save(&mut self, destination: &Destination) -> Result<(), DocumentError> {
        if !self.finish()? {
            return Ok(());
        }
        match destination.file_path(self.canvas.extension()) {
            Some(path) => {
                let file = File::create(&path).map_err(|source| DocumentError::Create {
                    path: path.clone(),
                    source,
                })?;
                let mut out = BufWriter::new(file);
                self.canvas.save(&mut out)?;
                info!(path = %path.display(), pages = self.canvas.page_count(), "saved");
            }
            None => {
                let mut out = io::stdout().lock();
                self.canvas.save(&mut out)?;
                info!(pages = self.canvas.page_count(), "saved to stdout");
            }
        }
        self.written = true;
        Ok(())
    }

    /// Move to `Finalized`, closing the open page. `false` if already written.
    fn finish(&mut self) -> Result<bool, DocumentError> {
        if self.written {
            warn!("document already saved, ignoring");
            return Ok(false);
        }
        if let DocumentState::Active(_) = self.state {
            self.canvas.end_page()?;
        }
        self.state = DocumentState::Finalized;
        Ok(true)
    }
}

/// Compose every page a configuration asks for, text included.
///
/// `text`, when given, is written on every page at the configured start
/// position. The returned document still has to be saved.
pub fn render_sheets<C: Canvas>(
    config: &SheetConfig,
    canvas: C,
    text: Option<&str>,
) -> Result<Document<C>, DocumentError> {
    let (spec, _) = config.validate()?;
    let mut document = Document::new(canvas, spec, GridStyle::default(), config.glyph_table())?;
    for _ in 0..config.pages {
        document.page()?;
        if let Some(text) = text {
            document.write_at(config.text_start.x, config.text_start.y, text)?;
        }
    }
    Ok(document)
}
