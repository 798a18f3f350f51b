//! Command-line interface for md2html
//!
//! Usage:
//!   md2html --in notes.md --out notes.html --title Notes --style site.css
//!   cat notes.md | md2html --fragment

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use md2html::{ConvertOptions, Converter};
use md2html_core::{LineEnding, Page};

/// Convert Markdown to HTML
#[derive(Parser, Debug)]
#[command(name = "md2html", author, version, about)]
struct Cli {
    /// Markdown input file, `-` for stdin
    #[arg(long = "in", value_name = "PATH", default_value = "-")]
    input: PathBuf,

    /// HTML output file, `-` for stdout
    #[arg(long = "out", value_name = "PATH", default_value = "-")]
    output: PathBuf,

    /// Document title
    #[arg(long)]
    title: Option<String>,

    /// Stylesheet URL linked from the document head
    #[arg(long, value_name = "URL")]
    style: Option<String>,

    /// Write CRLF line endings
    #[arg(long)]
    crlf: bool,

    /// Write only the body element, without doctype and head
    #[arg(long)]
    fragment: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let markdown = read_input(&cli.input)?;
    log::info!("read {} bytes from {}", markdown.len(), cli.input.display());

    let mut options = ConvertOptions::default();
    if cli.crlf {
        options.render.line_ending = LineEnding::CrLf;
    }
    let converter = Converter::with_options(options);

    let html = if cli.fragment {
        converter.convert(&markdown)
    } else {
        let page = Page {
            title: cli.title,
            stylesheet: cli.style,
            ..Default::default()
        };
        converter.convert_page(&markdown, &page)?
    };

    write_output(&cli.output, &html)
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path) -> Result<String> {
    let mut markdown = String::new();
    if is_stdio(path) {
        io::stdin()
            .read_to_string(&mut markdown)
            .context("Failed to read standard input")?;
    } else {
        File::open(path)
            .with_context(|| format!("Failed to open input file {}", path.display()))?
            .read_to_string(&mut markdown)
            .with_context(|| format!("Failed to read input file {}", path.display()))?;
    }
    Ok(markdown)
}

fn write_output(path: &Path, html: &str) -> Result<()> {
    if is_stdio(path) {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(html.as_bytes())
            .context("Failed to write standard output")?;
        return stdout.flush().context("Failed to write standard output");
    }

    let mut file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    file.write_all(html.as_bytes())
        .with_context(|| format!("Failed to write output file {}", path.display()))
}
