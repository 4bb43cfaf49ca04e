mod cli;

use clap::Parser;
use miette::{IntoDiagnostic, WrapErr};
use quadretti::render_sheets;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use cli::Cli;

/// `RUST_LOG`-style directives, falling back to `warn` when none are given
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}

fn main() -> miette::Result<()> {
    // Logs go to stderr; stdout may carry the document
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&directives))
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_config()?;
    let text = config
        .text
        .read()
        .into_diagnostic()
        .wrap_err("failed to read input text")?;

    let mut document = render_sheets(&config, config.format.canvas(), text.as_deref())?;
    document.save(&config.destination)?;
    tracing::info!(pages = document.page_number(), "done");
    Ok(())
}
