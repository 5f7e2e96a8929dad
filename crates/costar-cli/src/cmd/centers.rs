//! `costar centers` — best or worst centers of the universe.

use std::io::Write;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use super::CostarSession;
use crate::output::{OutputMode, numbered, render};

/// Arguments for `costar centers`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CentersArgs {
    /// Positive: top N by lowest average separation. Negative: bottom N.
    #[arg(allow_negative_numbers = true)]
    pub count: i64,
}

#[derive(Debug, Serialize)]
struct CenterEntry {
    name: String,
    average_separation: f64,
}

/// Execute `costar centers`.
pub fn run_centers(
    session: &CostarSession,
    args: &CentersArgs,
    output: OutputMode,
    w: &mut dyn Write,
) -> anyhow::Result<()> {
    let ascending = args.count >= 0;
    let count = usize::try_from(args.count.unsigned_abs())
        .with_context(|| format!("count {} is too large", args.count))?;

    let entries: Vec<CenterEntry> = if count == 0 {
        Vec::new()
    } else {
        let index = session.separation_index()?;
        session
            .rank_by_average_separation(ascending, count)?
            .into_iter()
            .map(|name| CenterEntry {
                average_separation: index.get(&name).unwrap_or_default(),
                name,
            })
            .collect()
    };

    render(output, &entries, w, |entries, w| {
        let which = if ascending { "Top" } else { "Bottom" };
        writeln!(w, "{which} {count} centers of the universe by average separation:")?;
        numbered(
            w,
            entries
                .iter()
                .map(|e| format!("{} ({:.3})", e.name, e.average_separation)),
        )
    })
}
