//! Error types with rich diagnostics using miette
//!
//! Rendering errors carry the written text as source so the offending
//! character is pointed at in the report.

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

use crate::types::NumericError;

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur while turning text into strokes
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("unsupported glyph: {ch:?}")]
    #[diagnostic(
        code(quadretti::render::unsupported_glyph),
        help("supported: A-Z (either case), 0-9, space, newline and . , + - = ! ?")
    )]
    UnsupportedGlyph {
        ch: char,
        #[source_code]
        src: NamedSource<String>,
        #[label("no glyph for this character")]
        span: SourceSpan,
    },
}

impl RenderError {
    /// Build an `UnsupportedGlyph` pointing at byte `offset` of `text`.
    pub fn unsupported_glyph(text: &str, offset: usize, ch: char) -> Self {
        RenderError::UnsupportedGlyph {
            ch,
            src: NamedSource::new("<text>", text.to_string()),
            span: (offset, ch.len_utf8()).into(),
        }
    }

    /// The character that could not be rendered
    pub fn ch(&self) -> char {
        match self {
            RenderError::UnsupportedGlyph { ch, .. } => *ch,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Invalid configuration, always reported before anything is drawn
#[derive(Error, Diagnostic, Debug, PartialEq)]
pub enum ConfigError {
    #[error("both literal text and an input source were given")]
    #[diagnostic(
        code(quadretti::config::conflicting_text_sources),
        help("pass either --text or --input, not both")
    )]
    ConflictingTextSources,

    #[error("no pages requested")]
    #[diagnostic(
        code(quadretti::config::no_pages),
        help("pass --pages 1 or more")
    )]
    NoPages,

    #[error("grid has {count} cells along {axis}")]
    #[diagnostic(
        code(quadretti::config::empty_grid),
        help("reduce the margin, the sheet offset or the cell side")
    )]
    EmptyGrid { axis: &'static str, count: i64 },

    #[error("invalid {name}: {reason}")]
    #[diagnostic(code(quadretti::config::invalid_length))]
    InvalidLength {
        name: &'static str,
        reason: NumericError,
    },
}

// ============================================================================
// Canvas Errors
// ============================================================================

/// Errors raised by canvas backends
#[derive(Error, Diagnostic, Debug)]
pub enum CanvasError {
    #[error("i/o error while writing the document")]
    #[diagnostic(code(quadretti::canvas::io))]
    Io(#[from] std::io::Error),

    #[error("no page is open")]
    #[diagnostic(code(quadretti::canvas::no_open_page))]
    NoOpenPage,

    #[error("a page is already open")]
    #[diagnostic(
        code(quadretti::canvas::page_already_open),
        help("call end_page before starting another page")
    )]
    PageAlreadyOpen,
}

// ============================================================================
// Document Errors
// ============================================================================

/// Errors from the page composer state machine
#[derive(Error, Diagnostic, Debug)]
pub enum DocumentError {
    #[error("document has already been saved")]
    #[diagnostic(code(quadretti::document::finalized))]
    Finalized,

    #[error("no page is active")]
    #[diagnostic(
        code(quadretti::document::no_active_page),
        help("call page() before writing text")
    )]
    NoActivePage,

    #[error("cannot create {}", path.display())]
    #[diagnostic(
        code(quadretti::document::create),
        help("check that the directory exists and is writable")
    )]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Canvas(#[from] CanvasError),
}
