//! Collaboration graph and shortest-path structures.
//!
//! # Overview
//!
//! [`LabeledGraph`] is a petgraph-backed adjacency structure keyed by vertex
//! value. Every edge carries a label; undirected insertions create both
//! adjacency directions pointing at one shared label slot.
//!
//! ## Pipeline
//!
//! ```text
//! LabeledGraph (actors, shared-movie labels)
//!        ↓  bfs::build_shortest_path_tree(graph, source)
//! ShortestPathTree (child → parent edges, depth per vertex)
//!        ├─ path::reconstruct_path(tree, target)   → [source, …, target]
//!        ├─ reach::unreachable_vertices(graph, tree) → vertices outside tree
//!        └─ metrics::separation::average_separation(tree, root)
//! ```
//!
//! ## Tie-breaking
//!
//! When a vertex has several neighbours at the same BFS distance from the
//! source, the parent recorded in the tree is the first one dequeued, which
//! in turn follows [`LabeledGraph::out_neighbors`] order (most recently
//! inserted edge first). For a fixed insertion sequence the result is fully
//! deterministic.

pub mod bfs;
pub mod labeled;
pub mod path;
pub mod reach;
pub mod tree;

pub use bfs::build_shortest_path_tree;
pub use labeled::LabeledGraph;
pub use path::{hop_count, reconstruct_path};
pub use reach::unreachable_vertices;
pub use tree::ShortestPathTree;
