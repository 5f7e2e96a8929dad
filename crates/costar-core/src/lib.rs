#![forbid(unsafe_code)]
//! costar-core library.
//!
//! Degrees-of-separation analysis over a static collaboration graph: actors
//! are vertices, and two actors share an edge when they appeared in at least
//! one movie together. The edge label collects every shared movie title.
//!
//! # Layout
//!
//! - [`graph`]: the labeled graph, BFS shortest-path trees, path
//!   reconstruction and reachability.
//! - [`metrics`]: average separation and the degree / separation rankings.
//! - [`session`]: the "center of the universe" context that owns a graph and
//!   answers queries against the currently selected center.
//! - [`load`]: builds a [`load::CollaborationGraph`] from pipe-delimited
//!   record files.
//! - [`config`]: optional TOML configuration.
//!
//! # Conventions
//!
//! - **Errors**: graph queries return [`GraphError`]; file and config layers
//!   use `anyhow::Result` with context.
//! - **Logging**: `tracing` macros only, and only outside the pure
//!   algorithms. Subscribers are installed by the binary.

pub mod config;
pub mod error;
pub mod graph;
pub mod load;
pub mod metrics;
pub mod session;

pub use error::{ErrorCode, GraphError};
pub use graph::{LabeledGraph, ShortestPathTree};
pub use session::{CenterSummary, PathHop, PathReport, Session};
