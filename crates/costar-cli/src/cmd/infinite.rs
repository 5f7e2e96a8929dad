//! `costar infinite` — actors with no path to the current center.

use std::io::Write;

use serde::Serialize;

use super::CostarSession;
use crate::output::{OutputMode, numbered, render};

#[derive(Debug, Serialize)]
struct InfiniteReport<'a> {
    center: &'a str,
    actors: Vec<String>,
}

/// Execute `costar infinite`.
pub fn run_infinite(
    session: &CostarSession,
    output: OutputMode,
    w: &mut dyn Write,
) -> anyhow::Result<()> {
    let report = InfiniteReport {
        center: session.center(),
        actors: session.unreachable()?.into_iter().collect(),
    };

    render(output, &report, w, |report, w| {
        writeln!(w, "Actors with infinite separation from {}:", report.center)?;
        numbered(w, &report.actors)
    })
}
