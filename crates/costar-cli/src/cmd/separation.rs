//! `costar separation` — connected actors ranked by distance from the
//! center.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use super::CostarSession;
use crate::output::{OutputMode, numbered, render};

/// Arguments for `costar separation`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SeparationArgs {
    /// Smallest separation to include.
    pub low: usize,
    /// Largest separation to include.
    pub high: usize,
}

#[derive(Debug, Serialize)]
struct SeparationEntry {
    name: String,
    separation: usize,
}

/// Execute `costar separation`.
pub fn run_separation(
    session: &CostarSession,
    args: &SeparationArgs,
    output: OutputMode,
    w: &mut dyn Write,
) -> anyhow::Result<()> {
    let tree = session.center_tree();
    let entries = session
        .rank_by_finite_separation(args.low, args.high)?
        .into_iter()
        .map(|name| -> anyhow::Result<SeparationEntry> {
            let separation = tree.depth(&name)?;
            Ok(SeparationEntry { name, separation })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    render(output, &entries, w, |entries, w| {
        writeln!(
            w,
            "Actors sorted by non-infinite separation from {}, between {} and {}:",
            session.center(),
            args.low,
            args.high
        )?;
        numbered(
            w,
            entries.iter().map(|e| format!("{} ({})", e.name, e.separation)),
        )
    })
}
