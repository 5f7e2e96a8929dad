//! Collaboration graph construction from pipe-delimited record files.
//!
//! # Record Files
//!
//! Three UTF-8 files, one `key|value` record per line:
//!
//! ```text
//! actors.txt        actor_id|actor name
//! movies.txt        movie_id|movie title
//! movie-actors.txt  movie_id|actor_id
//! ```
//!
//! Only the first `|` splits a line, so names may contain further pipes.
//! Blank lines are ignored.
//!
//! ## Edges
//!
//! Every actor becomes a vertex, in actor-file order. For each movie, every
//! unordered pair of distinct cast members is connected and the movie title
//! is added to the pair's label. Two actors who shared several movies end up
//! with one edge whose label lists all of them.
//!
//! Membership rows naming an unknown movie or actor are skipped and counted
//! in [`LoadReport::skipped_memberships`].

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{instrument, warn};

use crate::graph::LabeledGraph;

/// Actors as vertices, shared movie titles as edge labels.
pub type CollaborationGraph = LabeledGraph<String, BTreeSet<String>>;

/// Locations of the three record files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub actors: PathBuf,
    pub movies: PathBuf,
    pub movie_actors: PathBuf,
}

/// Counts gathered while loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub actors: usize,
    pub movies: usize,
    pub memberships: usize,
    pub skipped_memberships: usize,
    pub edges: usize,
}

/// Load the collaboration graph from the files named in `files`.
///
/// # Errors
///
/// Returns an error if a file cannot be opened or read, or a non-blank line
/// has no `|` separator.
#[instrument(skip_all, fields(actors = %files.actors.display()))]
pub fn load_files(files: &DataFiles) -> Result<(CollaborationGraph, LoadReport)> {
    load_readers(
        open(&files.actors)?,
        open(&files.movies)?,
        open(&files.movie_actors)?,
    )
}

/// Load the collaboration graph from in-memory or already opened readers.
///
/// # Errors
///
/// Returns an error if a reader fails or a non-blank line has no `|`
/// separator.
pub fn load_readers(
    actors: impl BufRead,
    movies: impl BufRead,
    movie_actors: impl BufRead,
) -> Result<(CollaborationGraph, LoadReport)> {
    let actor_records = parse_records(actors, "actors")?;
    let movie_records = parse_records(movies, "movies")?;
    let membership_records = parse_records(movie_actors, "movie-actors")?;

    let mut report = LoadReport {
        actors: actor_records.len(),
        movies: movie_records.len(),
        memberships: membership_records.len(),
        ..LoadReport::default()
    };

    let mut graph = CollaborationGraph::with_capacity(actor_records.len(), membership_records.len());
    for (_, name) in &actor_records {
        graph.insert_vertex(name.clone());
    }

    let actor_names: HashMap<String, String> = actor_records.into_iter().collect();
    let movie_titles: HashMap<String, String> = movie_records.into_iter().collect();

    // movie id → cast (actor names), ordered for a deterministic edge sequence
    let mut casts: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for (movie_id, actor_id) in &membership_records {
        let (Some(_), Some(name)) = (movie_titles.get(movie_id), actor_names.get(actor_id)) else {
            report.skipped_memberships += 1;
            continue;
        };
        casts.entry(movie_id.as_str()).or_default().insert(name.as_str());
    }

    for (movie_id, cast) in &casts {
        let title = &movie_titles[*movie_id];
        let cast: Vec<String> = cast.iter().map(|name| (*name).to_string()).collect();
        for (i, a) in cast.iter().enumerate() {
            for b in &cast[i + 1..] {
                graph
                    .upsert_undirected(a, b, BTreeSet::new)
                    .with_context(|| format!("link {a} and {b} for movie {title}"))?
                    .insert(title.clone());
            }
        }
    }

    report.edges = graph.num_edges();
    if report.skipped_memberships > 0 {
        warn!(
            skipped = report.skipped_memberships,
            "membership rows referenced unknown movies or actors"
        );
    }
    Ok((graph, report))
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Parse `key|value` lines, skipping blank ones.
fn parse_records(reader: impl BufRead, source: &str) -> Result<Vec<(String, String)>> {
    let mut records = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {source} line {}", number + 1))?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once('|') else {
            bail!("{source} line {}: expected `id|value`, got {line:?}", number + 1);
        };
        records.push((key.trim().to_string(), value.trim().to_string()));
    }
    Ok(records)
}
