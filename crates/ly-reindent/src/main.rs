//! Command-line reindenter for LilyPond source.
//!
//! Reads a file (or standard input), rewrites the indent of every line, and
//! writes the result to a file (or standard output).
//!
//! ```bash
//! ly-reindent song.ly
//! ly-reindent -i 4 -o formatted.ly song.ly
//! cat song.ly | ly-reindent -u
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lily_indent::{ReindentOptions, Reindenter};
use lily_indent_lang::IndentStyle;

#[derive(Debug, Parser)]
#[command(name = "ly-reindent", version, about = "Reindent LilyPond source text")]
struct Args {
    /// Input file; standard input when omitted.
    file: Option<PathBuf>,

    /// Write to this file instead of standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Indent width in cells.
    #[arg(short, long, default_value_t = 2)]
    indent_width: usize,

    /// Tab width to assume.
    #[arg(short, long, default_value_t = 8)]
    tab_width: usize,

    /// Indent of the first line; taken from the input when omitted.
    #[arg(short, long)]
    start_indent: Option<usize>,

    /// Use tab characters in the emitted indent.
    #[arg(short, long)]
    use_tabs: bool,

    /// Start parsing in Scheme mode.
    #[arg(long)]
    scheme: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let text = match &args.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading standard input")?;
            buf
        }
    };

    let reindenter = Reindenter::new().context("compiling token patterns")?;
    let options = ReindentOptions {
        start: args.start_indent,
        style: IndentStyle {
            indent_width: args.indent_width,
            tab_width: args.tab_width,
            use_tabs: args.use_tabs,
        },
        // Unset means auto-detect from the input.
        use_tabs: args.use_tabs.then_some(true),
        start_scheme: args.scheme,
    };
    let formatted = reindenter.reindent(&text, &options);

    match &args.output {
        Some(path) => fs::write(path, formatted)
            .with_context(|| format!("writing {}", path.display()))?,
        None => io::stdout()
            .write_all(formatted.as_bytes())
            .context("writing standard output")?,
    }
    Ok(())
}
