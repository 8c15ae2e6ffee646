//! moduledoc CLI — module reference page generator.
//!
//! Renders parsed module descriptors into cross-linked Markdown pages,
//! run as a documentation build step.

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
