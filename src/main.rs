//! quickopen - Open search tokens in the browser
//!
//! quickopen provides:
//! - Prefix-based routing of tokens to KB articles, tracker issues or searches
//! - Concurrent per-token classification with sequential browser launches
//! - A debug mode that prints resolved URLs instead of opening them
//! - Structured JSON logging to a file

use anyhow::Result;
use clap::Parser;

mod backends;
mod cli;
mod core;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
