//! Query session centered on one vertex.
//!
//! A [`Session`] owns a loaded graph together with the current "center of
//! the universe", the shortest-path tree rooted there, and the lazily built
//! [`SeparationIndex`]. Several sessions over different graphs (or the same
//! graph cloned) can coexist; nothing here is process-global.
//!
//! Changing the center validates the new vertex first. On failure the
//! previous center and tree stay in force.

use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::GraphError;
use crate::graph::{
    LabeledGraph, ShortestPathTree, build_shortest_path_tree, reconstruct_path,
    unreachable_vertices,
};
use crate::metrics::{
    SeparationIndex, average_separation, rank_by_degree, rank_by_finite_separation,
};

/// Summary reported when a center is selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CenterSummary<V> {
    pub center: V,
    /// Vertices connected to the center, the center itself excluded.
    pub reachable: usize,
    /// Vertices in the whole graph.
    pub total: usize,
    pub average_separation: f64,
}

/// One step of a path toward the center, with the label of the edge that
/// joins the two vertices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathHop<V, L> {
    pub from: V,
    pub to: V,
    pub label: L,
}

/// Path from a vertex back to the current center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathReport<V, L> {
    pub vertex: V,
    pub center: V,
    /// Number of hops to the center.
    pub separation: usize,
    /// Hops ordered from `vertex` toward `center`.
    pub hops: Vec<PathHop<V, L>>,
}

/// Graph plus the currently selected center and its cached derived data.
#[derive(Debug)]
pub struct Session<V, L> {
    graph: LabeledGraph<V, L>,
    center_tree: ShortestPathTree<V>,
    separation_index: OnceCell<SeparationIndex<V>>,
}

impl<V, L> Session<V, L>
where
    V: Clone + Ord + Hash + fmt::Debug,
    L: Clone,
{
    /// Open a session on `graph` centered at `center`.
    ///
    /// # Errors
    ///
    /// [`GraphError::NoSuchVertex`] when `center` is not in `graph`.
    pub fn new(graph: LabeledGraph<V, L>, center: &V) -> Result<Self, GraphError> {
        let center_tree = build_shortest_path_tree(&graph, center)?;
        Ok(Self {
            graph,
            center_tree,
            separation_index: OnceCell::new(),
        })
    }

    #[must_use]
    pub const fn graph(&self) -> &LabeledGraph<V, L> {
        &self.graph
    }

    #[must_use]
    pub fn center(&self) -> &V {
        self.center_tree.root()
    }

    /// The shortest-path tree rooted at the current center.
    #[must_use]
    pub const fn center_tree(&self) -> &ShortestPathTree<V> {
        &self.center_tree
    }

    /// Reachability and average separation for the current center.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphError`] from the separation computation.
    pub fn summary(&self) -> Result<CenterSummary<V>, GraphError> {
        let center = self.center().clone();
        let average_separation = average_separation(&self.center_tree, &center)?;
        Ok(CenterSummary {
            reachable: self.center_tree.num_vertices() - 1,
            total: self.graph.num_vertices(),
            average_separation,
            center,
        })
    }

    /// Make `vertex` the center of the universe.
    ///
    /// # Errors
    ///
    /// [`GraphError::NoSuchVertex`] when `vertex` is not in the graph; the
    /// current center is left unchanged.
    #[instrument(skip_all, fields(center = ?vertex))]
    pub fn set_center(&mut self, vertex: &V) -> Result<CenterSummary<V>, GraphError> {
        if !self.graph.has_vertex(vertex) {
            return Err(GraphError::no_such_vertex(vertex));
        }
        self.center_tree = build_shortest_path_tree(&self.graph, vertex)?;
        let summary = self.summary()?;
        info!(
            reachable = summary.reachable,
            total = summary.total,
            average_separation = summary.average_separation,
            "center changed"
        );
        Ok(summary)
    }

    /// Path from `vertex` back to the center, with the shared label of
    /// every hop.
    ///
    /// # Errors
    ///
    /// [`GraphError::NoSuchVertex`] when `vertex` is absent from the graph;
    /// [`GraphError::Unreachable`] (same code) when it is not connected to
    /// the center.
    pub fn path_to(&self, vertex: &V) -> Result<PathReport<V, L>, GraphError> {
        if !self.center_tree.has_vertex(vertex) && self.graph.has_vertex(vertex) {
            return Err(GraphError::unreachable(vertex, self.center()));
        }
        let path = reconstruct_path(&self.center_tree, vertex)?;

        let mut hops = Vec::with_capacity(path.len().saturating_sub(1));
        for pair in path.windows(2).rev() {
            let (to, from) = (&pair[0], &pair[1]);
            hops.push(PathHop {
                from: from.clone(),
                to: to.clone(),
                label: self.graph.label(from, to)?.clone(),
            });
        }

        Ok(PathReport {
            vertex: vertex.clone(),
            center: self.center().clone(),
            separation: hops.len(),
            hops,
        })
    }

    /// Vertices with infinite separation from the center.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphError`] from the reachability diff.
    pub fn unreachable(&self) -> Result<BTreeSet<V>, GraphError> {
        unreachable_vertices(&self.graph, &self.center_tree)
    }

    /// See [`rank_by_degree`].
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidArgument`] when `low > high`.
    pub fn rank_by_degree(&self, low: usize, high: usize) -> Result<Vec<V>, GraphError> {
        rank_by_degree(&self.graph, low, high)
    }

    /// See [`rank_by_finite_separation`]; separations are measured from the
    /// current center.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidArgument`] when `low > high`.
    pub fn rank_by_finite_separation(
        &self,
        low: usize,
        high: usize,
    ) -> Result<Vec<V>, GraphError> {
        rank_by_finite_separation(&self.center_tree, low, high)
    }

    /// The `count` best (`ascending`) or worst centers by average separation.
    ///
    /// The first call builds the [`SeparationIndex`]; later calls reuse it.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidArgument`] when `count` exceeds the vertex count.
    pub fn rank_by_average_separation(
        &self,
        ascending: bool,
        count: usize,
    ) -> Result<Vec<V>, GraphError> {
        self.separation_index()?.ranked(ascending, count)
    }

    /// The memoized separation index, built on first use.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphError`] from the index build.
    #[instrument(skip_all)]
    pub fn separation_index(&self) -> Result<&SeparationIndex<V>, GraphError> {
        if let Some(index) = self.separation_index.get() {
            return Ok(index);
        }

        let started = Instant::now();
        debug!(vertices = self.graph.num_vertices(), "building separation index");
        let index = SeparationIndex::build(&self.graph)?;
        info!(
            vertices = index.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "separation index built"
        );
        Ok(self.separation_index.get_or_init(|| index))
    }

    /// Whether [`separation_index`](Self::separation_index) has been built.
    #[must_use]
    pub fn has_separation_index(&self) -> bool {
        self.separation_index.get().is_some()
    }
}
