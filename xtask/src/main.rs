use camino::{Utf8Path, Utf8PathBuf};
use miette::IntoDiagnostic;
use quadretti::glyphs::supported_chars;
use quadretti::{Destination, Document, Format, GlyphTable, GridStyle, PageSpec};
use rayon::prelude::*;
use std::fs;

/// Cell sides, in millimetres, rendered by `specimen`
const SIDES: &[f64] = &[3.0, 4.0, 5.0, 6.0];

fn main() -> miette::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo xtask <command>");
        eprintln!("Commands:");
        eprintln!("  specimen [DIR]    Render the font on every cell size (default: target/specimens)");
        std::process::exit(1);
    }

    match args[1].as_str() {
        "specimen" => {
            let dir = args
                .get(2)
                .map(Utf8PathBuf::from)
                .unwrap_or_else(|| workspace_root().join("target/specimens"));
            specimen(&dir)
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            std::process::exit(1);
        }
    }
}

fn workspace_root() -> Utf8PathBuf {
    let manifest_dir = Utf8Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// Every supported character, a few per line so the widest cell still fits
fn specimen_text() -> String {
    let letters: Vec<char> = supported_chars().filter(char::is_ascii_alphabetic).collect();
    let (first, second) = letters.split_at(13);
    let digits: String = supported_chars().filter(char::is_ascii_digit).collect();
    let punctuation: String = supported_chars().filter(char::is_ascii_punctuation).collect();
    format!(
        "{}\n{}\n{digits}\n{punctuation}\nciao, mondo!",
        first.iter().collect::<String>(),
        second.iter().collect::<String>(),
    )
}

fn specimen(dir: &Utf8Path) -> miette::Result<()> {
    fs::create_dir_all(dir).into_diagnostic()?;
    let text = specimen_text();

    let jobs: Vec<(f64, Format)> = SIDES
        .iter()
        .flat_map(|side| [(*side, Format::Pdf), (*side, Format::Svg)])
        .collect();

    let written: Vec<Utf8PathBuf> = jobs
        .par_iter()
        .map(|(side, format)| render_one(dir, *side, *format, &text))
        .collect::<miette::Result<_>>()?;

    for path in &written {
        eprintln!("wrote {path}");
    }
    Ok(())
}

fn render_one(dir: &Utf8Path, side: f64, format: Format, text: &str) -> miette::Result<Utf8PathBuf> {
    let spec = PageSpec {
        side: quadretti::Mm(side),
        ..PageSpec::default()
    };
    let mut doc = Document::new(format.canvas(), spec, GridStyle::default(), GlyphTable::strict())?;
    doc.page()?;
    doc.write_at(1.0, 3.0, text)?;

    let path = dir.join(format!("specimen-{side}mm.{}", format.extension()));
    doc.save(&Destination::File(path.clone().into_std_path_buf()))?;
    Ok(path)
}
