//! Shared output layer for human/JSON parity across commands.
//!
//! Every command handler receives an [`OutputMode`] and a writer, and
//! formats its result accordingly. Handlers write to the writer they are
//! given (stdout in production, a buffer in tests), never to stdout
//! directly.

use std::io::{self, Write};

use costar_core::GraphError;
use serde::Serialize;

/// The output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Sentences and numbered lists for people.
    Human,
    /// Machine-readable JSON, one document per result.
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Render `value` as pretty JSON or through `human_fn`.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    w: &mut dyn Write,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *w, value)?;
            writeln!(w)?;
        }
        OutputMode::Human => human_fn(value, w)?,
    }
    Ok(())
}

/// Write a numbered list, one entry per line, or `(none)` when empty.
pub fn numbered<I, D>(w: &mut dyn Write, entries: I) -> io::Result<()>
where
    I: IntoIterator<Item = D>,
    D: std::fmt::Display,
{
    let mut any = false;
    for (i, entry) in entries.into_iter().enumerate() {
        any = true;
        writeln!(w, "{:>4}. {entry}", i + 1)?;
    }
    if !any {
        writeln!(w, "  (none)")?;
    }
    Ok(())
}

/// A structured error with optional hint and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl CliError {
    /// Build from any error, pulling the code and hint out of a
    /// [`GraphError`] when one is in the chain.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let graph_error = err.chain().find_map(|e| e.downcast_ref::<GraphError>());
        Self {
            error: format!("{err:#}"),
            hint: graph_error.and_then(GraphError::hint).map(str::to_string),
            code: graph_error.map(|e| e.code().code().to_string()),
        }
    }
}

/// Render an error to `w` in the given mode.
pub fn render_error(mode: OutputMode, err: &CliError, w: &mut dyn Write) -> io::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *w, err).map_err(io::Error::other)?;
            writeln!(w)
        }
        OutputMode::Human => {
            writeln!(w, "error: {}", err.error)?;
            if let Some(hint) = &err.hint {
                writeln!(w, "hint: {hint}")?;
            }
            Ok(())
        }
    }
}
