//! promptpack CLI — merge a tree of source files into one prompt file.
//!
//! Collects scripts by extension under a directory and writes them, with a
//! header and numbered file list, into a single text document for an LLM.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
