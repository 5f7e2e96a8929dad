//! `costar universe` — select a new center of the acting universe.

use std::io::Write;

use clap::Args;
use costar_core::CenterSummary;

use super::CostarSession;
use crate::output::{OutputMode, render};

/// Arguments for `costar universe`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct UniverseArgs {
    /// Actor name, matched exactly.
    pub name: String,
}

/// Execute `costar universe`.
pub fn run_universe(
    session: &mut CostarSession,
    args: &UniverseArgs,
    output: OutputMode,
    w: &mut dyn Write,
) -> anyhow::Result<()> {
    let summary = session.set_center(&args.name)?;
    render_summary(&summary, output, w)
}

/// Render a [`CenterSummary`]; also used for the interactive greeting.
pub fn render_summary(
    summary: &CenterSummary<String>,
    output: OutputMode,
    w: &mut dyn Write,
) -> anyhow::Result<()> {
    render(output, summary, w, |s, w| {
        writeln!(
            w,
            "{} is now the center of the acting universe, connected to {}/{} actors with average separation {:.3}",
            s.center, s.reachable, s.total, s.average_separation
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::test_support::session;

    #[test]
    fn moving_center_reports_reachability() {
        let mut s = session();
        let mut buf = Vec::new();
        run_universe(
            &mut s,
            &UniverseArgs { name: "Tom Hanks".to_string() },
            OutputMode::Human,
            &mut buf,
        )
        .unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Tom Hanks is now the center of the acting universe, connected to 3/5 actors with average separation 0.750\n"
        );
        assert_eq!(s.center(), "Tom Hanks");
    }

    #[test]
    fn unknown_actor_keeps_previous_center() {
        let mut s = session();
        let mut buf = Vec::new();
        let result = run_universe(
            &mut s,
            &UniverseArgs { name: "Nobody".to_string() },
            OutputMode::Json,
            &mut buf,
        );
        assert!(result.is_err());
        assert!(buf.is_empty());
        assert_eq!(s.center(), "Kevin Bacon");
    }
}
