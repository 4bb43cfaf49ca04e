//! Sheet configuration as assembled by a front end.
//!
//! Nothing here draws. [`SheetConfig::validate`] turns the loose numbers into
//! a [`PageSpec`] and its [`GridGeometry`], so every configuration problem is
//! reported before the first page is opened.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use glam::{DVec2, dvec2};

use crate::canvas::Format;
use crate::errors::ConfigError;
use crate::glyphs::{GlyphTable, UnsupportedPolicy};
use crate::grid::{GridGeometry, PageSpec};
use crate::types::Mm;

/// Supported paper sizes, portrait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaperSize {
    #[default]
    A4,
    A5,
    Letter,
}

impl PaperSize {
    /// `(width, height)` in portrait orientation
    pub fn dimensions(self) -> (Mm, Mm) {
        match self {
            PaperSize::A4 => (Mm(210.0), Mm(297.0)),
            PaperSize::A5 => (Mm(148.0), Mm(210.0)),
            PaperSize::Letter => (Mm(215.9), Mm(279.4)),
        }
    }
}

/// Where the text written on each page comes from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TextSource {
    #[default]
    None,
    Literal(String),
    File(PathBuf),
    Stdin,
}

impl TextSource {
    /// Combine the literal and input options of a front end.
    ///
    /// An input of `-` means standard input.
    pub fn from_options(literal: Option<String>, input: Option<&str>) -> Result<Self, ConfigError> {
        match (literal, input) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingTextSources),
            (Some(text), None) => Ok(TextSource::Literal(text)),
            (None, Some("-")) => Ok(TextSource::Stdin),
            (None, Some(path)) => Ok(TextSource::File(PathBuf::from(path))),
            (None, None) => Ok(TextSource::None),
        }
    }

    /// Resolve the source to its text
    pub fn read(&self) -> io::Result<Option<String>> {
        match self {
            TextSource::None => Ok(None),
            TextSource::Literal(text) => Ok(Some(text.clone())),
            TextSource::File(path) => fs::read_to_string(path).map(Some),
            TextSource::Stdin => {
                let mut text = String::new();
                io::stdin().lock().read_to_string(&mut text)?;
                Ok(Some(text))
            }
        }
    }
}

/// Where the finished document goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    File(PathBuf),
    Stdout,
}

impl Default for Destination {
    fn default() -> Self {
        Destination::File(PathBuf::from("out.pdf"))
    }
}

impl Destination {
    /// `-` is standard output, anything else a file path
    pub fn from_arg(arg: &str) -> Self {
        match arg {
            "-" => Destination::Stdout,
            path => Destination::File(PathBuf::from(path)),
        }
    }

    /// The file path with `.{extension}` appended unless it already ends
    /// with it (case-insensitively). `None` for standard output.
    pub fn file_path(&self, extension: &str) -> Option<PathBuf> {
        match self {
            Destination::Stdout => None,
            Destination::File(path) => Some(with_extension(path, extension)),
        }
    }
}

fn with_extension(path: &Path, extension: &str) -> PathBuf {
    let has = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension));
    if has {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Everything needed to produce a stack of squared sheets
#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig {
    pub paper: PaperSize,
    pub pages: u32,
    pub margin: f64,
    pub side: f64,
    pub sheet_offset: f64,
    pub thick: u32,
    pub vertical: bool,
    pub text: TextSource,
    /// Grid position where text starts on each page
    pub text_start: DVec2,
    pub policy: UnsupportedPolicy,
    pub destination: Destination,
    pub format: Format,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            pages: 1,
            margin: 16.0,
            side: 4.0,
            sheet_offset: 0.0,
            thick: 3,
            vertical: false,
            text: TextSource::None,
            text_start: dvec2(1.0, 3.0),
            policy: UnsupportedPolicy::Strict,
            destination: Destination::default(),
            format: Format::Pdf,
        }
    }
}

impl SheetConfig {
    /// Page parameters for this configuration, without validation
    pub fn page_spec(&self) -> PageSpec {
        let (width, height) = self.paper.dimensions();
        PageSpec {
            width,
            height,
            margin: Mm(self.margin),
            side: Mm(self.side),
            sheet_offset: Mm(self.sheet_offset),
            thick: self.thick,
            vertical: self.vertical,
        }
    }

    /// Check the configuration and derive the grid it describes
    pub fn validate(&self) -> Result<(PageSpec, GridGeometry), ConfigError> {
        if self.pages == 0 {
            return Err(ConfigError::NoPages);
        }
        let spec = self.page_spec();
        let geometry = GridGeometry::compute(&spec)?;
        Ok((spec, geometry))
    }

    pub fn glyph_table(&self) -> GlyphTable {
        GlyphTable::new(self.policy)
    }
}
