//! Generic labeled graph used for the collaboration graph.
//!
//! # Storage
//!
//! Vertices live in a petgraph [`DiGraph`] whose edge weights are indices
//! into a label arena. An undirected insertion adds `a → b` and `b → a`,
//! both pointing at the same arena slot, so a label mutated through one
//! direction is observed through the other. A directed insertion adds a
//! single adjacency entry.
//!
//! ## Invariants
//!
//! - Every edge endpoint is a member of the vertex set.
//! - No self-loops.
//! - At most one edge object per ordered pair (and so at most one shared
//!   label per unordered pair for undirected insertions).

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::error::GraphError;

// ---------------------------------------------------------------------------
// LabeledGraph
// ---------------------------------------------------------------------------

/// A graph over hashable vertex values with one label per edge.
///
/// Operations that name a vertex absent from the graph fail with
/// [`GraphError::NoSuchVertex`], except [`insert_vertex`](Self::insert_vertex),
/// [`has_vertex`](Self::has_vertex) and [`has_edge`](Self::has_edge), which
/// never fail.
#[derive(Debug, Clone)]
pub struct LabeledGraph<V, L> {
    graph: DiGraph<V, usize>,
    node_map: HashMap<V, NodeIndex>,
    labels: Vec<L>,
    /// Label slots referenced by at least one adjacency entry.
    edge_count: usize,
}

impl<V, L> Default for LabeledGraph<V, L>
where
    V: Clone + Eq + Hash + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, L> LabeledGraph<V, L>
where
    V: Clone + Eq + Hash + fmt::Debug,
{
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            labels: Vec::new(),
            edge_count: 0,
        }
    }

    /// Pre-allocate for a known graph size.
    #[must_use]
    pub fn with_capacity(vertex_count: usize, edge_count: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(vertex_count, edge_count * 2),
            node_map: HashMap::with_capacity(vertex_count),
            labels: Vec::with_capacity(edge_count),
            edge_count: 0,
        }
    }

    /// Add `vertex` if absent. Returns `true` when it was newly inserted.
    pub fn insert_vertex(&mut self, vertex: V) -> bool {
        if self.node_map.contains_key(&vertex) {
            return false;
        }
        let idx = self.graph.add_node(vertex.clone());
        self.node_map.insert(vertex, idx);
        true
    }

    #[must_use]
    pub fn has_vertex(&self, vertex: &V) -> bool {
        self.node_map.contains_key(vertex)
    }

    /// Whether an adjacency entry `from → to` exists. Absent vertices yield
    /// `false`.
    #[must_use]
    pub fn has_edge(&self, from: &V, to: &V) -> bool {
        match (self.node_map.get(from), self.node_map.get(to)) {
            (Some(&a), Some(&b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    /// Insert an undirected edge between `a` and `b`.
    ///
    /// If the pair is already connected its label is replaced.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidArgument`] when `a == b`;
    /// [`GraphError::NoSuchVertex`] when either endpoint is absent.
    pub fn insert_undirected(&mut self, a: &V, b: &V, label: L) -> Result<(), GraphError> {
        let slot = self.undirected_slot(a, b)?;
        match slot {
            Some(slot) => self.labels[slot] = label,
            None => {
                self.push_undirected(a, b, label)?;
            }
        }
        Ok(())
    }

    /// Insert a single adjacency entry `from → to`.
    ///
    /// If the entry already exists its label is replaced.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidArgument`] when `from == to`;
    /// [`GraphError::NoSuchVertex`] when either endpoint is absent.
    pub fn insert_directed(&mut self, from: &V, to: &V, label: L) -> Result<(), GraphError> {
        let (a, b) = self.endpoints(from, to)?;
        if let Some(edge) = self.graph.find_edge(a, b) {
            let slot = self.graph[edge];
            self.labels[slot] = label;
            return Ok(());
        }
        let slot = self.labels.len();
        self.labels.push(label);
        self.graph.add_edge(a, b, slot);
        self.edge_count += 1;
        Ok(())
    }

    /// Return the shared label of the undirected edge `a — b`, creating the
    /// edge with `default()` when the pair is not yet connected.
    ///
    /// This is the accumulate-in-place path used when several movies link
    /// the same two actors.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidArgument`] when `a == b`;
    /// [`GraphError::NoSuchVertex`] when either endpoint is absent.
    pub fn upsert_undirected(
        &mut self,
        a: &V,
        b: &V,
        default: impl FnOnce() -> L,
    ) -> Result<&mut L, GraphError> {
        let slot = match self.undirected_slot(a, b)? {
            Some(slot) => slot,
            None => self.push_undirected(a, b, default())?,
        };
        Ok(&mut self.labels[slot])
    }

    /// The label on `from → to`.
    ///
    /// # Errors
    ///
    /// [`GraphError::NoSuchVertex`] when either endpoint is absent;
    /// [`GraphError::NoSuchEdge`] when they are not adjacent.
    pub fn label(&self, from: &V, to: &V) -> Result<&L, GraphError> {
        let slot = self.slot(from, to)?;
        Ok(&self.labels[slot])
    }

    /// Mutable access to the label on `from → to`.
    ///
    /// # Errors
    ///
    /// Same as [`label`](Self::label).
    pub fn label_mut(&mut self, from: &V, to: &V) -> Result<&mut L, GraphError> {
        let slot = self.slot(from, to)?;
        Ok(&mut self.labels[slot])
    }

    /// Vertices reachable through one outgoing adjacency entry of `vertex`.
    ///
    /// # Errors
    ///
    /// [`GraphError::NoSuchVertex`] when `vertex` is absent.
    pub fn out_neighbors<'a>(
        &'a self,
        vertex: &V,
    ) -> Result<impl Iterator<Item = &'a V> + use<'a, V, L>, GraphError> {
        let idx = self.index_of(vertex)?;
        Ok(Neighbors::new(&self.graph, idx, Direction::Outgoing))
    }

    /// Vertices with an adjacency entry pointing at `vertex`.
    ///
    /// # Errors
    ///
    /// [`GraphError::NoSuchVertex`] when `vertex` is absent.
    pub fn in_neighbors<'a>(
        &'a self,
        vertex: &V,
    ) -> Result<impl Iterator<Item = &'a V> + use<'a, V, L>, GraphError> {
        let idx = self.index_of(vertex)?;
        Ok(Neighbors::new(&self.graph, idx, Direction::Incoming))
    }

    /// # Errors
    ///
    /// [`GraphError::NoSuchVertex`] when `vertex` is absent.
    pub fn out_degree(&self, vertex: &V) -> Result<usize, GraphError> {
        Ok(self.out_neighbors(vertex)?.count())
    }

    /// # Errors
    ///
    /// [`GraphError::NoSuchVertex`] when `vertex` is absent.
    pub fn in_degree(&self, vertex: &V) -> Result<usize, GraphError> {
        Ok(self.in_neighbors(vertex)?.count())
    }

    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of logical edges: an undirected pair counts once, each
    /// one-way entry counts once.
    #[must_use]
    pub const fn num_edges(&self) -> usize {
        self.edge_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// All vertices in insertion order.
    ///
    /// The order is stable for a given construction sequence, which keeps
    /// tests deterministic; callers should not attach meaning to it.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    // -----------------------------------------------------------------------
    // Index-level access for traversals inside the crate
    // -----------------------------------------------------------------------

    pub(crate) fn index_of(&self, vertex: &V) -> Result<NodeIndex, GraphError> {
        self.node_map
            .get(vertex)
            .copied()
            .ok_or_else(|| GraphError::no_such_vertex(vertex))
    }

    pub(crate) fn out_indices(&self, idx: NodeIndex) -> petgraph::graph::Neighbors<'_, usize> {
        self.graph.neighbors_directed(idx, Direction::Outgoing)
    }

    pub(crate) fn vertex_at(&self, idx: NodeIndex) -> &V {
        &self.graph[idx]
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn endpoints(&self, a: &V, b: &V) -> Result<(NodeIndex, NodeIndex), GraphError> {
        if a == b {
            return Err(GraphError::invalid_argument(format!(
                "self-loop on {a:?} is not allowed"
            )));
        }
        Ok((self.index_of(a)?, self.index_of(b)?))
    }

    /// Existing label slot for the unordered pair, making the adjacency
    /// symmetric if only one direction was present.
    ///
    /// Two independent one-way entries are merged onto the `a → b` label;
    /// the `b → a` label is dropped from the pair.
    fn undirected_slot(&mut self, a: &V, b: &V) -> Result<Option<usize>, GraphError> {
        let (ia, ib) = self.endpoints(a, b)?;
        let forward = self.graph.find_edge(ia, ib).map(|e| self.graph[e]);
        let backward = self.graph.find_edge(ib, ia);
        match (forward, backward) {
            (Some(slot), Some(edge)) => {
                if self.graph[edge] != slot {
                    self.graph[edge] = slot;
                    self.edge_count -= 1;
                }
                Ok(Some(slot))
            }
            (Some(slot), None) => {
                self.graph.add_edge(ib, ia, slot);
                Ok(Some(slot))
            }
            (None, Some(edge)) => {
                let slot = self.graph[edge];
                self.graph.add_edge(ia, ib, slot);
                Ok(Some(slot))
            }
            (None, None) => Ok(None),
        }
    }

    fn push_undirected(&mut self, a: &V, b: &V, label: L) -> Result<usize, GraphError> {
        let (ia, ib) = self.endpoints(a, b)?;
        let slot = self.labels.len();
        self.labels.push(label);
        self.graph.add_edge(ia, ib, slot);
        self.graph.add_edge(ib, ia, slot);
        self.edge_count += 1;
        Ok(slot)
    }

    fn slot(&self, from: &V, to: &V) -> Result<usize, GraphError> {
        let a = self.index_of(from)?;
        let b = self.index_of(to)?;
        self.graph
            .find_edge(a, b)
            .map(|edge| self.graph[edge])
            .ok_or_else(|| GraphError::no_such_edge(from, to))
    }
}

// ---------------------------------------------------------------------------
// Neighbors
// ---------------------------------------------------------------------------

/// Iterator over the vertex values adjacent to one vertex.
pub(crate) struct Neighbors<'a, V, E> {
    graph: &'a DiGraph<V, E>,
    inner: petgraph::graph::Neighbors<'a, E>,
}

impl<'a, V, E> Neighbors<'a, V, E> {
    pub(crate) fn new(graph: &'a DiGraph<V, E>, idx: NodeIndex, direction: Direction) -> Self {
        Self {
            graph,
            inner: graph.neighbors_directed(idx, direction),
        }
    }
}

impl<'a, V, E> Iterator for Neighbors<'a, V, E> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        self.inner.next().map(|idx| &graph[idx])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::error::ErrorCode;

    type Movies = BTreeSet<String>;

    fn movies(titles: &[&str]) -> Movies {
        titles.iter().map(|t| (*t).to_string()).collect()
    }

    fn trio() -> LabeledGraph<&'static str, Movies> {
        let mut g = LabeledGraph::new();
        for v in ["A", "B", "C"] {
            g.insert_vertex(v);
        }
        g.insert_undirected(&"A", &"B", movies(&["M1"])).unwrap();
        g.insert_undirected(&"B", &"C", movies(&["M2"])).unwrap();
        g
    }

    #[test]
    fn insert_vertex_is_idempotent() {
        let mut g: LabeledGraph<&str, ()> = LabeledGraph::new();
        assert!(g.insert_vertex("A"));
        assert!(!g.insert_vertex("A"));
        assert_eq!(g.num_vertices(), 1);
        assert!(g.has_vertex(&"A"));
        assert!(!g.has_vertex(&"B"));
    }

    #[test]
    fn undirected_insertion_is_symmetric() {
        let g = trio();
        assert!(g.has_edge(&"A", &"B"));
        assert!(g.has_edge(&"B", &"A"));
        assert!(!g.has_edge(&"A", &"C"));
        assert_eq!(g.num_edges(), 2);
        assert_eq!(g.out_degree(&"B").unwrap(), 2);
        assert_eq!(g.in_degree(&"B").unwrap(), 2);

        let out: BTreeSet<_> = g.out_neighbors(&"B").unwrap().copied().collect();
        let inc: BTreeSet<_> = g.in_neighbors(&"B").unwrap().copied().collect();
        assert_eq!(out, inc);
        assert_eq!(out, BTreeSet::from(["A", "C"]));
    }

    #[test]
    fn undirected_label_is_shared_between_directions() {
        let mut g = trio();
        g.label_mut(&"A", &"B").unwrap().insert("M3".to_string());
        assert_eq!(g.label(&"B", &"A").unwrap(), &movies(&["M1", "M3"]));
    }

    #[test]
    fn upsert_accumulates_into_existing_label() {
        let mut g = trio();
        g.upsert_undirected(&"B", &"A", Movies::new)
            .unwrap()
            .insert("M4".to_string());
        g.upsert_undirected(&"A", &"C", Movies::new)
            .unwrap()
            .insert("M5".to_string());

        assert_eq!(g.label(&"A", &"B").unwrap(), &movies(&["M1", "M4"]));
        assert_eq!(g.label(&"C", &"A").unwrap(), &movies(&["M5"]));
        assert_eq!(g.num_edges(), 3);
    }

    #[test]
    fn reinserting_an_edge_replaces_the_label() {
        let mut g = trio();
        g.insert_undirected(&"B", &"A", movies(&["M9"])).unwrap();
        assert_eq!(g.num_edges(), 2);
        assert_eq!(g.out_degree(&"A").unwrap(), 1);
        assert_eq!(g.label(&"A", &"B").unwrap(), &movies(&["M9"]));
    }

    #[test]
    fn self_loops_are_rejected() {
        let mut g = trio();
        let err = g.insert_undirected(&"A", &"A", Movies::new()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
        let err = g.insert_directed(&"A", &"A", Movies::new()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
    }

    #[test]
    fn directed_insertion_is_asymmetric() {
        let mut g: LabeledGraph<u32, ()> = LabeledGraph::new();
        g.insert_vertex(1);
        g.insert_vertex(2);
        g.insert_directed(&2, &1, ()).unwrap();

        assert!(g.has_edge(&2, &1));
        assert!(!g.has_edge(&1, &2));
        assert_eq!(g.out_degree(&2).unwrap(), 1);
        assert_eq!(g.out_degree(&1).unwrap(), 0);
        assert_eq!(g.in_degree(&1).unwrap(), 1);
    }

    #[test]
    fn undirected_over_directed_reuses_label() {
        let mut g: LabeledGraph<u32, u32> = LabeledGraph::new();
        g.insert_vertex(1);
        g.insert_vertex(2);
        g.insert_directed(&1, &2, 7).unwrap();
        *g.upsert_undirected(&2, &1, || 0).unwrap() += 1;

        assert_eq!(g.num_edges(), 1);
        assert_eq!(*g.label(&1, &2).unwrap(), 8);
        assert_eq!(*g.label(&2, &1).unwrap(), 8);
    }

    #[test]
    fn undirected_over_two_directed_entries_merges_labels() {
        let mut g: LabeledGraph<u32, u32> = LabeledGraph::new();
        g.insert_vertex(1);
        g.insert_vertex(2);
        g.insert_directed(&1, &2, 10).unwrap();
        g.insert_directed(&2, &1, 20).unwrap();
        assert_eq!(g.num_edges(), 2);

        g.insert_undirected(&1, &2, 99).unwrap();
        assert_eq!(g.num_edges(), 1);
        assert_eq!(*g.label(&1, &2).unwrap(), 99);
        assert_eq!(*g.label(&2, &1).unwrap(), 99);

        *g.label_mut(&2, &1).unwrap() += 1;
        assert_eq!(*g.label(&1, &2).unwrap(), 100);
    }

    #[test]
    fn upsert_over_two_directed_entries_keeps_forward_label() {
        let mut g: LabeledGraph<u32, u32> = LabeledGraph::new();
        g.insert_vertex(1);
        g.insert_vertex(2);
        g.insert_directed(&1, &2, 10).unwrap();
        g.insert_directed(&2, &1, 20).unwrap();

        *g.upsert_undirected(&2, &1, || 0).unwrap() += 1;
        assert_eq!(g.num_edges(), 1);
        assert_eq!(*g.label(&1, &2).unwrap(), 21);
        assert_eq!(*g.label(&2, &1).unwrap(), 21);
        assert_eq!(g.out_degree(&1).unwrap(), 1);
    }

    #[test]
    fn absent_vertices_fail_with_no_such_vertex() {
        let mut g = trio();
        assert_eq!(g.out_degree(&"Z").unwrap_err().code(), ErrorCode::NoSuchVertex);
        assert_eq!(g.in_neighbors(&"Z").err().map(|e| e.code()), Some(ErrorCode::NoSuchVertex));
        assert_eq!(
            g.insert_undirected(&"A", &"Z", Movies::new()).unwrap_err().code(),
            ErrorCode::NoSuchVertex
        );
        assert_eq!(g.label(&"Z", &"A").unwrap_err().code(), ErrorCode::NoSuchVertex);
        assert!(!g.has_edge(&"Z", &"A"));
    }

    #[test]
    fn missing_edge_fails_with_no_such_edge() {
        let g = trio();
        let err = g.label(&"A", &"C").unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoSuchEdge);
    }

    #[test]
    fn vertices_iterate_in_insertion_order() {
        let mut g: LabeledGraph<&str, ()> = LabeledGraph::with_capacity(3, 0);
        for v in ["zeta", "alpha", "mid", "alpha"] {
            g.insert_vertex(v);
        }
        let order: Vec<_> = g.vertices().copied().collect();
        assert_eq!(order, vec!["zeta", "alpha", "mid"]);
    }
}
