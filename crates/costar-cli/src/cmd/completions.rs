use std::io::Write;

use clap::Args;
use clap_complete::{Shell, generate};

/// Arguments for `costar completions`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CompletionsArgs {
    /// Target shell for completion script generation.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `shell` to `w`.
///
/// # Errors
///
/// Returns an error if flushing `w` fails.
pub fn run_completions(
    shell: Shell,
    command: &mut clap::Command,
    w: &mut dyn Write,
) -> anyhow::Result<()> {
    generate(shell, command, "costar", w);
    w.flush()?;
    Ok(())
}
