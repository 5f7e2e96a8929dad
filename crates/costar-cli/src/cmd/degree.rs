//! `costar degree` — actors ranked by number of distinct co-stars.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use super::CostarSession;
use crate::output::{OutputMode, numbered, render};

/// Arguments for `costar degree`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DegreeArgs {
    /// Lowest degree to include.
    pub low: usize,
    /// Highest degree to include.
    pub high: usize,
}

#[derive(Debug, Serialize)]
struct DegreeEntry {
    name: String,
    degree: usize,
}

/// Execute `costar degree`.
pub fn run_degree(
    session: &CostarSession,
    args: &DegreeArgs,
    output: OutputMode,
    w: &mut dyn Write,
) -> anyhow::Result<()> {
    let graph = session.graph();
    let entries = session
        .rank_by_degree(args.low, args.high)?
        .into_iter()
        .map(|name| -> anyhow::Result<DegreeEntry> {
            let degree = graph.out_degree(&name)?;
            Ok(DegreeEntry { name, degree })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    render(output, &entries, w, |entries, w| {
        writeln!(
            w,
            "Actors sorted by degree, between {} and {}:",
            args.low, args.high
        )?;
        numbered(w, entries.iter().map(|e| format!("{} ({})", e.name, e.degree)))
    })
}
