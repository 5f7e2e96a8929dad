//! Rooted shortest-path tree produced by BFS.
//!
//! Edges point from child to parent, so a vertex's single outgoing neighbor
//! is its parent and its incoming neighbors are its children. The root has
//! out-degree zero. Each vertex also records its depth (hop count from the
//! root) as it is attached.
//!
//! Trees are only built by [`crate::graph::bfs::build_shortest_path_tree`],
//! which keeps them acyclic and weakly connected.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::error::GraphError;
use crate::graph::labeled::Neighbors;

/// Shortest-path spanning tree over the vertices reachable from a root.
#[derive(Debug, Clone)]
pub struct ShortestPathTree<V> {
    graph: DiGraph<V, ()>,
    node_map: HashMap<V, NodeIndex>,
    depths: Vec<usize>,
    root: NodeIndex,
}

impl<V> ShortestPathTree<V>
where
    V: Clone + Eq + Hash + fmt::Debug,
{
    pub(crate) fn with_root(root: V) -> Self {
        let mut graph = DiGraph::new();
        let idx = graph.add_node(root.clone());
        let mut node_map = HashMap::new();
        node_map.insert(root, idx);
        Self {
            graph,
            node_map,
            depths: vec![0],
            root: idx,
        }
    }

    /// Attach `child` under the tree node `parent`. The caller guarantees
    /// `child` is not already present.
    pub(crate) fn attach(&mut self, child: V, parent: NodeIndex) -> NodeIndex {
        let depth = self.depths[parent.index()] + 1;
        let idx = self.graph.add_node(child.clone());
        self.node_map.insert(child, idx);
        self.depths.push(depth);
        self.graph.add_edge(idx, parent, ());
        idx
    }

    /// The vertex the tree was grown from.
    #[must_use]
    pub fn root(&self) -> &V {
        &self.graph[self.root]
    }

    #[must_use]
    pub fn has_vertex(&self, vertex: &V) -> bool {
        self.node_map.contains_key(vertex)
    }

    /// Number of vertices in the tree, the root included.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.graph.node_count()
    }

    /// Tree vertices in BFS discovery order, starting with the root.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// The parent of `vertex`, or `None` for the root.
    ///
    /// # Errors
    ///
    /// [`GraphError::NoSuchVertex`] when `vertex` is not in the tree.
    pub fn parent(&self, vertex: &V) -> Result<Option<&V>, GraphError> {
        let idx = self.index_of(vertex)?;
        Ok(self.parent_index(idx).map(|p| &self.graph[p]))
    }

    /// Vertices whose parent is `vertex`.
    ///
    /// # Errors
    ///
    /// [`GraphError::NoSuchVertex`] when `vertex` is not in the tree.
    pub fn children<'a>(
        &'a self,
        vertex: &V,
    ) -> Result<impl Iterator<Item = &'a V> + use<'a, V>, GraphError> {
        let idx = self.index_of(vertex)?;
        Ok(Neighbors::new(&self.graph, idx, Direction::Incoming))
    }

    /// Hop count from the root to `vertex`.
    ///
    /// # Errors
    ///
    /// [`GraphError::NoSuchVertex`] when `vertex` is not in the tree.
    pub fn depth(&self, vertex: &V) -> Result<usize, GraphError> {
        let idx = self.index_of(vertex)?;
        Ok(self.depths[idx.index()])
    }

    /// Always 1 for non-root vertices and 0 for the root.
    ///
    /// # Errors
    ///
    /// [`GraphError::NoSuchVertex`] when `vertex` is not in the tree.
    pub fn out_degree(&self, vertex: &V) -> Result<usize, GraphError> {
        let idx = self.index_of(vertex)?;
        Ok(self.graph.neighbors_directed(idx, Direction::Outgoing).count())
    }

    /// Number of children of `vertex`.
    ///
    /// # Errors
    ///
    /// [`GraphError::NoSuchVertex`] when `vertex` is not in the tree.
    pub fn in_degree(&self, vertex: &V) -> Result<usize, GraphError> {
        Ok(self.children(vertex)?.count())
    }

    pub(crate) fn index_of(&self, vertex: &V) -> Result<NodeIndex, GraphError> {
        self.node_map
            .get(vertex)
            .copied()
            .ok_or_else(|| GraphError::no_such_vertex(vertex))
    }

    pub(crate) fn parent_index(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, Direction::Outgoing)
            .next()
    }

    pub(crate) fn child_indices(&self, idx: NodeIndex) -> petgraph::graph::Neighbors<'_, ()> {
        self.graph.neighbors_directed(idx, Direction::Incoming)
    }

    pub(crate) fn vertex_at(&self, idx: NodeIndex) -> &V {
        &self.graph[idx]
    }
}
