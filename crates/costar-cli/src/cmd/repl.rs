//! Interactive query loop, entered when `costar` runs without a subcommand.
//!
//! Each line is a one-letter command followed by its arguments. Errors are
//! reported on `err` and the loop keeps going; only `q` or end of input
//! ends it.

use std::io::{BufRead, Write};

use anyhow::{Context as _, bail};

use super::centers::CentersArgs;
use super::degree::DegreeArgs;
use super::path::PathArgs;
use super::separation::SeparationArgs;
use super::universe::{UniverseArgs, render_summary};
use super::{CostarSession, Query, execute};
use crate::output::{CliError, OutputMode, render_error};

const BANNER: &str = "\
Commands:
  c <n>          top (n > 0) or bottom (n < 0) centers by average separation
  d <low> <high> actors sorted by degree
  i              actors with infinite separation
  p <name>       path from <name> to the center
  s <low> <high> actors sorted by separation
  u <name>       make <name> the center
  q              quit";

const PROMPT: &str = "costar> ";

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Query(Query),
    Quit,
    Blank,
}

/// Parse one line of interactive input.
///
/// # Errors
///
/// Returns an error for unknown letters or malformed arguments.
pub fn parse_line(line: &str) -> anyhow::Result<Line> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Line::Blank);
    }
    let (letter, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(l, r)| (l, r.trim()));

    let query = match letter {
        "q" if rest.is_empty() => return Ok(Line::Quit),
        "i" if rest.is_empty() => Query::Infinite,
        "c" => Query::Centers(CentersArgs {
            count: rest.parse().context("expected a whole number")?,
        }),
        "d" => {
            let (low, high) = two_bounds(rest)?;
            Query::Degree(DegreeArgs { low, high })
        }
        "s" => {
            let (low, high) = two_bounds(rest)?;
            Query::Separation(SeparationArgs { low, high })
        }
        "p" if !rest.is_empty() => Query::Path(PathArgs {
            name: rest.to_string(),
        }),
        "u" if !rest.is_empty() => Query::Universe(UniverseArgs {
            name: rest.to_string(),
        }),
        _ => bail!("Invalid input; please try again"),
    };
    Ok(Line::Query(query))
}

fn two_bounds(rest: &str) -> anyhow::Result<(usize, usize)> {
    let mut parts = rest.split_whitespace();
    let (Some(low), Some(high), None) = (parts.next(), parts.next(), parts.next()) else {
        bail!("expected two bounds: <low> <high>");
    };
    let low = low.parse().context("low bound must be a non-negative integer")?;
    let high = high.parse().context("high bound must be a non-negative integer")?;
    Ok((low, high))
}

/// Run the loop until `q` or end of input.
///
/// # Errors
///
/// Only I/O failures on `input`, `out` or `err` end the loop with an error.
pub fn run_repl(
    session: &mut CostarSession,
    input: impl BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
    output: OutputMode,
) -> anyhow::Result<()> {
    if !output.is_json() {
        writeln!(out, "{BANNER}")?;
    }
    render_summary(&session.summary()?, output, out)?;

    let mut lines = input.lines();
    loop {
        if !output.is_json() {
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let result = parse_line(&line?).and_then(|parsed| match parsed {
            Line::Query(query) => execute(session, &query, output, out).map(|()| true),
            Line::Blank => Ok(true),
            Line::Quit => Ok(false),
        });
        match result {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => render_error(output, &CliError::from_anyhow(&e), err)?,
        }
    }
    if !output.is_json() {
        writeln!(out)?;
    }
    Ok(())
}
