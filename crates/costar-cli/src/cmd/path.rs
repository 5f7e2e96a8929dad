//! `costar path` — an actor's number and the movies linking them to the
//! center.

use std::io::Write;

use clap::Args;

use super::CostarSession;
use crate::output::{OutputMode, render};

/// Arguments for `costar path`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PathArgs {
    /// Actor name, matched exactly.
    pub name: String,
}

/// Execute `costar path`.
pub fn run_path(
    session: &CostarSession,
    args: &PathArgs,
    output: OutputMode,
    w: &mut dyn Write,
) -> anyhow::Result<()> {
    let report = session.path_to(&args.name)?;

    render(output, &report, w, |report, w| {
        writeln!(w, "{}'s number is {}", report.vertex, report.separation)?;
        for hop in &report.hops {
            let movies: Vec<&str> = hop.label.iter().map(String::as_str).collect();
            writeln!(
                w,
                "{} appeared in [{}] with {}",
                hop.from,
                movies.join(", "),
                hop.to
            )?;
        }
        Ok(())
    })
}
