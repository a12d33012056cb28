//! Inbox Briefing CLI library.
//!
//! Argument parsing and the numbered run that drives the pipeline from the
//! terminal.

pub mod cli;
pub mod commands;

use std::io::{self, BufRead, Write};

use thiserror::Error;

/// Characters of the report echoed to the terminal after saving.
pub const PREVIEW_CHARS: usize = 1000;

/// Errors that abort a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Persistence error: {0}")]
    Persistence(#[from] briefing_persistence::PersistenceError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// First `max_chars` characters of `report`, with `...` appended if cut.
pub fn preview(report: &str, max_chars: usize) -> String {
    match report.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &report[..idx]),
        None => report.to_string(),
    }
}

/// Ask the operator for an API key on `input`.
///
/// Returns `None` for a blank answer or end of input.
pub fn prompt_api_key(input: &mut impl BufRead, output: &mut impl Write) -> Result<Option<String>> {
    writeln!(output, "Anthropic API Keyが設定されていません。")?;
    write!(output, "API Keyを入力するか、--api-keyオプションで指定してください: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let key = line.trim();
    Ok((!key.is_empty()).then(|| key.to_string()))
}
