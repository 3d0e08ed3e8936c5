//! CLI module - Command-line interface definition and handler

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::backends::dispatch::Dispatcher;
use crate::core::config::{Config, Destinations};
use crate::core::input::read_tokens;
use crate::core::logging;
use crate::core::render::{OutputFormat, RenderConfig, Renderer};

/// quickopen - open tickets, KB articles and searches in the browser.
#[derive(Parser, Debug)]
#[command(name = "quickopen")]
#[command(
    author,
    version,
    about,
    long_about = r#"quickopen classifies each search token and opens it in the browser.

Token routing (prefix before the first '-', case-insensitive):
- KB...                      -> knowledge-base article (text after '-' is the id)
- ENG, ONCALL, TH, UT...     -> tracker issue (whole token, uppercased)
- anything else              -> tracker free-text search

With no tokens, quickopen prompts for a line and splits it on whitespace.

Examples:
    quickopen KB-12345
    quickopen eng-665245 UT-2
    quickopen -d "random text"
"#
)]
pub struct Cli {
    /// Search tokens (ticket keys, KB ids or free text).
    #[arg(value_name = "TOKEN")]
    pub tokens: Vec<String>,

    /// Debug mode: verbose logging, print URLs instead of opening them.
    #[arg(
        short,
        long,
        env = "QUICKOPEN_DEBUG",
        long_help = "Enable debug mode.\n\n\
Logs at debug level (mirrored to stderr) and never starts a browser: every\n\
resolved URL is printed to stdout in the selected --format instead."
    )]
    pub debug: bool,

    /// Stop at the first URL that fails to open.
    #[arg(
        long,
        long_help = "Abort the run at the first launch failure.\n\n\
By default every token is processed, failures are reported at the end and the\n\
exit status is non-zero if any URL failed to open."
    )]
    pub fail_fast: bool,

    /// Literal appended to free-text search queries.
    #[arg(long, value_name = "TEXT", env = "QUICKOPEN_QUERY_SUFFIX")]
    pub query_suffix: Option<String>,

    /// Log file path.
    #[arg(
        long,
        value_name = "PATH",
        env = "QUICKOPEN_LOG_FILE",
        long_help = "Append JSON log records to PATH.\n\n\
Defaults to ~/.quickopen/quickopen.log. The filter can be overridden with the\n\
QUICKOPEN_LOG environment variable (e.g. QUICKOPEN_LOG=trace)."
    )]
    pub log_file: Option<PathBuf>,

    /// Output format for debug mode (jsonl/json/md/raw).
    #[arg(long, default_value = "jsonl", value_name = "FORMAT")]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            debug: self.debug,
            fail_fast: self.fail_fast,
            destinations: Destinations::with_query_suffix(self.query_suffix.clone()),
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli
        .format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let render_config = RenderConfig::with_pretty(format, cli.pretty);
    let config = cli.config();

    let log_file = cli.log_file.clone().or_else(logging::default_log_path);
    logging::init(config.debug, log_file.as_deref());

    let tokens = if cli.tokens.is_empty() {
        tracing::debug!("no tokens given, prompting");
        let stdin = io::stdin();
        read_tokens(stdin.lock(), io::stderr())?
    } else {
        cli.tokens.clone()
    };
    tracing::debug!(count = tokens.len(), tokens = ?tokens, "tokens");

    if tokens.is_empty() {
        tracing::info!("nothing to open");
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let dispatcher = Dispatcher::from_config(&config);
    let total = tokens.len();
    let report = runtime.block_on(dispatcher.dispatch(tokens))?;

    if config.debug {
        let renderer = Renderer::with_config(render_config);
        let stdout = io::stdout();
        renderer
            .render_to(&report, stdout.lock())
            .context("Failed to write output")?;
    }

    let failures: Vec<_> = report.failures().collect();
    if !failures.is_empty() {
        let mut stderr = io::stderr().lock();
        for record in &failures {
            let _ = writeln!(
                stderr,
                "error: could not open {} ({}): {}",
                record.url,
                record.token,
                record.error.as_deref().unwrap_or("unknown error")
            );
        }
        bail!("{} of {} URLs failed to open", failures.len(), total);
    }

    Ok(())
}
