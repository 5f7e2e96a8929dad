#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{CommandFactory, Parser, Subcommand};
use costar_core::config::discover_config;
use costar_core::load::load_files;
use output::{CliError, OutputMode, render_error};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cmd::{CostarSession, Query};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "costar: degrees of separation between actors",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Configuration file (default: ./costar.toml, then the user config dir).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Actors file (`actorId|name` per line).
    #[arg(long, global = true, value_name = "PATH")]
    actors: Option<PathBuf>,

    /// Movies file (`movieId|title` per line).
    #[arg(long, global = true, value_name = "PATH")]
    movies: Option<PathBuf>,

    /// Cast membership file (`movieId|actorId` per line).
    #[arg(long, global = true, value_name = "PATH")]
    movie_actors: Option<PathBuf>,

    /// Initial center of the acting universe.
    #[arg(long, global = true, value_name = "NAME")]
    center: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    /// Derive the output mode from flags.
    const fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Rankings",
        about = "Best or worst centers by average separation",
        long_about = "List the |n| actors with the lowest (n > 0) or highest (n < 0) average separation from everyone they can reach.",
        after_help = "EXAMPLES:\n    # Ten best centers\n    costar centers 10\n\n    # Five worst centers\n    costar centers -5"
    )]
    Centers(cmd::centers::CentersArgs),

    #[command(
        next_help_heading = "Rankings",
        about = "Actors sorted by number of co-stars",
        after_help = "EXAMPLES:\n    # Actors with 100 to 200 distinct co-stars\n    costar degree 100 200"
    )]
    Degree(cmd::degree::DegreeArgs),

    #[command(
        next_help_heading = "Queries",
        about = "Actors with no path to the center"
    )]
    Infinite,

    #[command(
        next_help_heading = "Queries",
        about = "An actor's number and the movies linking them to the center",
        after_help = "EXAMPLES:\n    costar path \"Meg Ryan\"\n\n    # From a different center\n    costar --center \"Tom Hanks\" path \"Meg Ryan\" --json"
    )]
    Path(cmd::path::PathArgs),

    #[command(
        next_help_heading = "Rankings",
        about = "Connected actors sorted by separation from the center",
        after_help = "EXAMPLES:\n    costar separation 2 3"
    )]
    Separation(cmd::separation::SeparationArgs),

    #[command(
        next_help_heading = "Queries",
        about = "Make an actor the center and summarize their universe"
    )]
    Universe(cmd::universe::UniverseArgs),

    #[command(
        next_help_heading = "Interactive",
        about = "Interactive query loop (the default without a subcommand)"
    )]
    Repl,

    #[command(
        next_help_heading = "Maintenance",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    costar completions bash"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

impl Commands {
    fn into_query(self) -> Option<Query> {
        match self {
            Self::Centers(args) => Some(Query::Centers(args)),
            Self::Degree(args) => Some(Query::Degree(args)),
            Self::Infinite => Some(Query::Infinite),
            Self::Path(args) => Some(Query::Path(args)),
            Self::Separation(args) => Some(Query::Separation(args)),
            Self::Universe(args) => Some(Query::Universe(args)),
            Self::Repl | Self::Completions(_) => None,
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("COSTAR_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "costar=debug,info"
        } else {
            "costar=info,warn"
        })
    });

    let format = env::var("COSTAR_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

/// Resolve configuration, apply flag overrides and load the session.
fn open_session(cli: &Cli) -> anyhow::Result<CostarSession> {
    let config = discover_config(cli.config.as_deref())?;

    let mut files = config.data.files();
    if let Some(path) = &cli.actors {
        files.actors.clone_from(path);
    }
    if let Some(path) = &cli.movies {
        files.movies.clone_from(path);
    }
    if let Some(path) = &cli.movie_actors {
        files.movie_actors.clone_from(path);
    }
    let center = cli.center.clone().unwrap_or(config.session.center);
    debug!(?files, %center, "resolved configuration");

    let (graph, report) = load_files(&files)?;
    info!(
        actors = report.actors,
        movies = report.movies,
        edges = report.edges,
        "collaboration graph loaded"
    );

    CostarSession::new(graph, &center)
        .with_context(|| format!("cannot center the universe on {center:?}"))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let output = cli.output_mode();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(Commands::Completions(args)) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command, &mut out);
    }

    let mut session = open_session(&cli)?;
    match cli.command.and_then(Commands::into_query) {
        Some(query) => cmd::execute(&mut session, &query, output, &mut out),
        None => {
            let stdin = io::stdin();
            let mut err = io::stderr();
            cmd::repl::run_repl(&mut session, stdin.lock(), &mut out, &mut err, output)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut stderr = io::stderr();
            // Nothing left to report to if stderr itself is gone.
            let _ = render_error(output, &CliError::from_anyhow(&err), &mut stderr);
            let _ = stderr.flush();
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::parse_from(["costar"]);
        assert!(cli.command.is_none());
        assert!(!cli.output_mode().is_json());
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::parse_from([
            "costar",
            "infinite",
            "--json",
            "--center",
            "Tom Hanks",
            "--actors",
            "a.txt",
        ]);
        assert!(cli.output_mode().is_json());
        assert_eq!(cli.center.as_deref(), Some("Tom Hanks"));
        assert_eq!(cli.actors, Some(PathBuf::from("a.txt")));
        assert!(matches!(cli.command, Some(Commands::Infinite)));
    }

    #[test]
    fn negative_center_count_parses() {
        let cli = Cli::parse_from(["costar", "centers", "-5"]);
        assert_eq!(
            cli.command.and_then(Commands::into_query),
            Some(Query::Centers(cmd::centers::CentersArgs { count: -5 }))
        );
    }

    #[test]
    fn multi_word_names_are_one_argument() {
        let cli = Cli::parse_from(["costar", "path", "Meg Ryan"]);
        assert_eq!(
            cli.command.and_then(Commands::into_query),
            Some(Query::Path(cmd::path::PathArgs {
                name: "Meg Ryan".to_string()
            }))
        );
    }

    #[test]
    fn completions_subcommand_parses() {
        let cli = Cli::parse_from(["costar", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Completions(cmd::completions::CompletionsArgs {
                shell: clap_complete::Shell::Bash,
            }))
        ));
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["costar", "centers", "3"],
            vec!["costar", "degree", "1", "2"],
            vec!["costar", "infinite"],
            vec!["costar", "path", "x"],
            vec!["costar", "separation", "0", "3"],
            vec!["costar", "universe", "x"],
            vec!["costar", "repl"],
            vec!["costar", "completions", "zsh"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(result.is_ok(), "Failed to parse: {args:?}: {:?}", result.err());
        }
    }

    #[test]
    fn negative_bounds_are_rejected() {
        assert!(Cli::try_parse_from(["costar", "degree", "-1", "2"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
