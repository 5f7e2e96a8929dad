//! Command handlers.
//!
//! Each query command owns an `Args` struct (shared by the one-shot
//! subcommand and the interactive loop) and a `run_*` function that
//! executes it against a [`CostarSession`] and renders the result.

use std::collections::BTreeSet;
use std::io::Write;

use costar_core::Session;

use crate::output::OutputMode;

pub mod centers;
pub mod completions;
pub mod degree;
pub mod infinite;
pub mod path;
pub mod repl;
pub mod separation;
pub mod universe;

/// Session over the actor collaboration graph.
pub type CostarSession = Session<String, BTreeSet<String>>;

/// One query against a session, independent of how it was entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Centers(centers::CentersArgs),
    Degree(degree::DegreeArgs),
    Infinite,
    Path(path::PathArgs),
    Separation(separation::SeparationArgs),
    Universe(universe::UniverseArgs),
}

/// Execute `query` and render its result to `w`.
pub fn execute(
    session: &mut CostarSession,
    query: &Query,
    output: OutputMode,
    w: &mut dyn Write,
) -> anyhow::Result<()> {
    match query {
        Query::Centers(args) => centers::run_centers(session, args, output, w),
        Query::Degree(args) => degree::run_degree(session, args, output, w),
        Query::Infinite => infinite::run_infinite(session, output, w),
        Query::Path(args) => path::run_path(session, args, output, w),
        Query::Separation(args) => separation::run_separation(session, args, output, w),
        Query::Universe(args) => universe::run_universe(session, args, output, w),
    }
}
