use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use formatpilot::{FormatPilot, LinkedInFormatter, Options, DEFAULT_CHARACTER_LIMIT};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "formatpilot",
    about = "Convert Markdown or HTML into LinkedIn-friendly plain text",
    version
)]
struct Cli {
    /// Input file. Use `-` to read from stdin.
    #[arg(value_name = "FILE", default_value = "-")]
    path: PathBuf,

    /// Input format: `markdown` or `html`
    #[arg(short, long, default_value = "markdown")]
    format: String,

    /// Character limit before a warning is appended
    #[arg(short, long, default_value_t = DEFAULT_CHARACTER_LIMIT)]
    limit: usize,

    /// Prefix each line with its word count
    #[arg(short, long)]
    creative: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let source = read_source(&cli.path)?;
    tracing::debug!(path = %cli.path.display(), bytes = source.len(), "read input");

    let converter = FormatPilot::with_options(Options {
        character_limit: cli.limit,
    });
    let converted = converter
        .convert_text(&source, &cli.format)
        .with_context(|| format!("Unable to convert {}", cli.path.display()))?;

    let formatter = LinkedInFormatter::with_converter(converter, cli.creative);
    let output = formatter.format_text(&converted);

    let mut stdout = io::stdout().lock();
    match writeln!(stdout, "{}", output) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.context("Failed to write output"),
    }
}

fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read input from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input from {}", path.display()))
    }
}
