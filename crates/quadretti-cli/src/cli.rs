//! Command-line arguments

use clap::{Parser, ValueEnum};
use quadretti::{Destination, Format, PaperSize, SheetConfig, TextSource, UnsupportedPolicy};

/// Make squared paper, optionally with handwritten-style text on every page
#[derive(Parser, Debug)]
#[command(name = "quadretti")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Number of pages to create
    #[arg(short = 'p', long = "pages", default_value_t = 1)]
    pub pages: u32,

    /// Margin to leave around the grid, in mm
    #[arg(short = 'm', long = "margin", default_value_t = 16.0)]
    pub margin: f64,

    /// Side of the grid squares, in mm
    #[arg(short = 's', long = "side", default_value_t = 4.0)]
    pub side: f64,

    /// Extra space on the left of odd pages, in mm
    #[arg(short = 'o', long = "sheet-offset", default_value_t = 0.0)]
    pub sheet_offset: f64,

    /// Make every n-th horizontal line thicker (0 disables)
    #[arg(short = 't', long = "thick", default_value_t = 3)]
    pub thick: u32,

    /// Also make every n-th vertical line thicker
    #[arg(short = 'v', long = "vertical")]
    pub vertical: bool,

    /// Text to write on every page
    #[arg(long = "text")]
    pub text: Option<String>,

    /// Read the text to write from a file (`-` for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: Option<String>,

    /// Draw a box for unsupported characters instead of failing
    #[arg(long = "lenient")]
    pub lenient: bool,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = FormatArg::Pdf)]
    pub format: FormatArg,

    /// Paper size
    #[arg(long = "paper", value_enum, default_value_t = PaperArg::A4)]
    pub paper: PaperArg,

    /// Output file (`-` for stdout); the format's extension is added if missing
    #[arg(default_value = "out.pdf")]
    pub file: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Pdf,
    Svg,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Pdf => Format::Pdf,
            FormatArg::Svg => Format::Svg,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaperArg {
    A4,
    A5,
    Letter,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => PaperSize::A4,
            PaperArg::A5 => PaperSize::A5,
            PaperArg::Letter => PaperSize::Letter,
        }
    }
}

impl Cli {
    /// Turn the parsed arguments into a sheet configuration
    pub fn into_config(self) -> miette::Result<SheetConfig> {
        let text = TextSource::from_options(self.text, self.input.as_deref())?;
        Ok(SheetConfig {
            paper: self.paper.into(),
            pages: self.pages,
            margin: self.margin,
            side: self.side,
            sheet_offset: self.sheet_offset,
            thick: self.thick,
            vertical: self.vertical,
            text,
            policy: if self.lenient {
                UnsupportedPolicy::Lenient
            } else {
                UnsupportedPolicy::Strict
            },
            destination: Destination::from_arg(&self.file),
            format: self.format.into(),
            ..SheetConfig::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("quadretti").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_match_the_library() {
        let config = parse(&[]).unwrap().into_config().unwrap();
        assert_eq!(config, SheetConfig::default());
    }

    #[test]
    fn short_flags() {
        let cli = parse(&["-p", "4", "-m", "10", "-s", "5", "-o", "8", "-t", "0", "-v", "notes"]).unwrap();
        assert_eq!(cli.pages, 4);
        assert_eq!(cli.margin, 10.0);
        assert_eq!(cli.side, 5.0);
        assert_eq!(cli.sheet_offset, 8.0);
        assert_eq!(cli.thick, 0);
        assert!(cli.vertical);
        let config = cli.into_config().unwrap();
        assert_eq!(config.destination, Destination::File(PathBuf::from("notes")));
    }

    #[test]
    fn malformed_number_is_a_usage_error() {
        let err = parse(&["--margin", "wide"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn text_and_input_conflict() {
        let cli = parse(&["--text", "ciao", "--input", "notes.txt"]).unwrap();
        let err = cli.into_config().unwrap_err();
        assert!(err.to_string().contains("both literal text and an input source"));
    }

    #[test]
    fn stdout_svg_lenient() {
        let config = parse(&["--format", "svg", "--lenient", "--paper", "a5", "-"])
            .unwrap()
            .into_config()
            .unwrap();
        assert_eq!(config.destination, Destination::Stdout);
        assert_eq!(config.format, Format::Svg);
        assert_eq!(config.policy, UnsupportedPolicy::Lenient);
        assert_eq!(config.paper, PaperSize::A5);
    }

    #[test]
    fn dash_input_reads_stdin() {
        let config = parse(&["-i", "-"]).unwrap().into_config().unwrap();
        assert_eq!(config.text, TextSource::Stdin);
    }
}
