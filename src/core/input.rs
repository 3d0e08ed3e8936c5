//! Interactive token input, used when no tokens are given on the command line

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

pub const PROMPT: &str = "Enter search term: ";

/// Prompt for one line and split it into whitespace-delimited tokens.
///
/// EOF before any input yields no tokens.
pub fn read_tokens<R: BufRead, W: Write>(mut reader: R, mut prompt: W) -> Result<Vec<String>> {
    write!(prompt, "{}", PROMPT).context("Failed to write prompt")?;
    prompt.flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("Failed to read search term")?;

    Ok(split_tokens(&line))
}

/// Split a line on whitespace (handles trailing `\r\n`)
pub fn split_tokens(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}
