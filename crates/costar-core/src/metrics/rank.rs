//! Vertex rankings: by degree, by finite separation from a root, and by
//! average separation as a center.
//!
//! # Ordering
//!
//! Every ranking breaks ties on the primary key by ascending vertex order,
//! so results are fully deterministic for a given graph.

#![allow(clippy::module_name_repetitions)]

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::error::{GraphError, check_bounds};
use crate::graph::{LabeledGraph, ShortestPathTree, build_shortest_path_tree};
use crate::metrics::separation::average_separation;

// ---------------------------------------------------------------------------
// Degree
// ---------------------------------------------------------------------------

/// Vertices whose out-degree lies in `[low, high]`, highest degree first.
///
/// # Errors
///
/// [`GraphError::InvalidArgument`] when `low > high`.
pub fn rank_by_degree<V, L>(
    graph: &LabeledGraph<V, L>,
    low: usize,
    high: usize,
) -> Result<Vec<V>, GraphError>
where
    V: Clone + Ord + Hash + fmt::Debug,
{
    check_bounds(low, high)?;

    let mut ranked = Vec::new();
    for vertex in graph.vertices() {
        let degree = graph.out_degree(vertex)?;
        if (low..=high).contains(&degree) {
            ranked.push((vertex.clone(), degree));
        }
    }
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Ok(ranked.into_iter().map(|(v, _)| v).collect())
}

// ---------------------------------------------------------------------------
// Finite separation
// ---------------------------------------------------------------------------

/// Vertices reachable in `tree` whose separation from the root lies in
/// `[low, high]`, closest first.
///
/// Separation is the root-path length, read from the depth recorded while
/// the tree was grown.
///
/// # Errors
///
/// [`GraphError::InvalidArgument`] when `low > high`.
pub fn rank_by_finite_separation<V>(
    tree: &ShortestPathTree<V>,
    low: usize,
    high: usize,
) -> Result<Vec<V>, GraphError>
where
    V: Clone + Ord + Hash + fmt::Debug,
{
    check_bounds(low, high)?;

    let mut ranked = Vec::new();
    for vertex in tree.vertices() {
        let separation = tree.depth(vertex)?;
        if (low..=high).contains(&separation) {
            ranked.push((vertex.clone(), separation));
        }
    }
    ranked.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

    Ok(ranked.into_iter().map(|(v, _)| v).collect())
}

// ---------------------------------------------------------------------------
// Average separation
// ---------------------------------------------------------------------------

/// Average separation of every vertex of a graph, pre-sorted both ways.
///
/// Building the index runs one BFS per vertex, O(V·(V+E)). The graph is
/// immutable once loaded, so an index stays valid for the graph's lifetime
/// and callers are expected to build it once and keep it (see
/// [`crate::session::Session`]).
#[derive(Debug, Clone)]
pub struct SeparationIndex<V> {
    entries: Vec<(V, f64)>,
    positions: HashMap<V, usize>,
    ascending: Vec<usize>,
    descending: Vec<usize>,
}

impl<V> SeparationIndex<V>
where
    V: Clone + Ord + Hash + fmt::Debug,
{
    /// Compute the average separation of every vertex in `graph`.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphError`] from tree construction; none is expected
    /// for a well-formed graph.
    pub fn build<L>(graph: &LabeledGraph<V, L>) -> Result<Self, GraphError> {
        let mut entries = Vec::with_capacity(graph.num_vertices());
        for vertex in graph.vertices() {
            let tree = build_shortest_path_tree(graph, vertex)?;
            let average = average_separation(&tree, vertex)?;
            entries.push((vertex.clone(), average));
        }

        let positions = entries
            .iter()
            .enumerate()
            .map(|(i, (v, _))| (v.clone(), i))
            .collect();

        let by_average = |a: &(V, f64), b: &(V, f64)| -> Ordering { a.1.total_cmp(&b.1) };

        let mut ascending: Vec<usize> = (0..entries.len()).collect();
        ascending.sort_by(|&i, &j| {
            by_average(&entries[i], &entries[j]).then_with(|| entries[i].0.cmp(&entries[j].0))
        });
        let mut descending: Vec<usize> = (0..entries.len()).collect();
        descending.sort_by(|&i, &j| {
            by_average(&entries[j], &entries[i]).then_with(|| entries[i].0.cmp(&entries[j].0))
        });

        Ok(Self {
            entries,
            positions,
            ascending,
            descending,
        })
    }

    /// Number of indexed vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The average separation of `vertex` as a center.
    #[must_use]
    pub fn get(&self, vertex: &V) -> Option<f64> {
        self.positions.get(vertex).map(|&i| self.entries[i].1)
    }

    /// The first `count` vertices by average separation, smallest first
    /// when `ascending`, largest first otherwise.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidArgument`] when `count` exceeds the number of
    /// indexed vertices.
    pub fn ranked(&self, ascending: bool, count: usize) -> Result<Vec<V>, GraphError> {
        if count > self.entries.len() {
            return Err(GraphError::invalid_argument(format!(
                "requested {count} centers but the graph has {} vertices",
                self.entries.len()
            )));
        }

        let order = if ascending {
            &self.ascending
        } else {
            &self.descending
        };
        Ok(order
            .iter()
            .take(count)
            .map(|&i| self.entries[i].0.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    /// A - B - C plus isolated D.
    fn sample() -> LabeledGraph<&'static str, ()> {
        let mut g = LabeledGraph::new();
        for v in ["A", "B", "C", "D"] {
            g.insert_vertex(v);
        }
        g.insert_undirected(&"A", &"B", ()).unwrap();
        g.insert_undirected(&"B", &"C", ()).unwrap();
        g
    }

    #[test]
    fn degree_ranking_filters_and_sorts_descending() {
        let g = sample();
        assert_eq!(rank_by_degree(&g, 0, 10).unwrap(), vec!["B", "A", "C", "D"]);
        assert_eq!(rank_by_degree(&g, 1, 1).unwrap(), vec!["A", "C"]);
        assert_eq!(rank_by_degree(&g, 0, 0).unwrap(), vec!["D"]);
        assert!(rank_by_degree(&g, 3, 9).unwrap().is_empty());
    }

    #[test]
    fn degree_ranking_rejects_inverted_bounds() {
        let err = rank_by_degree(&sample(), 2, 1).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
    }

    #[test]
    fn finite_separation_sorts_ascending() {
        let g = sample();
        let tree = build_shortest_path_tree(&g, &"A").unwrap();
        assert_eq!(
            rank_by_finite_separation(&tree, 0, 5).unwrap(),
            vec!["A", "B", "C"]
        );
        assert_eq!(rank_by_finite_separation(&tree, 1, 1).unwrap(), vec!["B"]);
        assert!(rank_by_finite_separation(&tree, 3, 4).unwrap().is_empty());
        assert!(rank_by_finite_separation(&tree, 4, 3).is_err());
    }

    #[test]
    fn separation_index_orders_both_ways() {
        let index = SeparationIndex::build(&sample()).unwrap();
        assert_eq!(index.len(), 4);

        // D: 0/1, B: 2/3, A and C: 3/3
        assert_eq!(index.ranked(true, 4).unwrap(), vec!["D", "B", "A", "C"]);
        assert_eq!(index.ranked(false, 4).unwrap(), vec!["A", "C", "B", "D"]);
        assert_eq!(index.ranked(true, 2).unwrap(), vec!["D", "B"]);
        assert!(index.ranked(false, 0).unwrap().is_empty());
        assert!((index.get(&"A").unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(index.get(&"Z"), None);
    }

    #[test]
    fn separation_index_rejects_oversized_count() {
        let index = SeparationIndex::build(&sample()).unwrap();
        let err = index.ranked(true, 5).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
    }
}
