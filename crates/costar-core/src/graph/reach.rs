//! Vertices a shortest-path tree did not reach.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

use crate::error::GraphError;
use crate::graph::labeled::LabeledGraph;
use crate::graph::tree::ShortestPathTree;

/// Vertices of `graph` absent from `tree`, i.e. with infinite separation
/// from the tree's root. O(V).
///
/// # Errors
///
/// [`GraphError::InvalidArgument`] when the tree's root is not a vertex of
/// `graph`, meaning the tree was not grown from this graph.
pub fn unreachable_vertices<V, L>(
    graph: &LabeledGraph<V, L>,
    tree: &ShortestPathTree<V>,
) -> Result<BTreeSet<V>, GraphError>
where
    V: Clone + Ord + Hash + fmt::Debug,
{
    if !graph.has_vertex(tree.root()) {
        return Err(GraphError::invalid_argument(format!(
            "tree rooted at {:?} was not built from this graph",
            tree.root()
        )));
    }

    Ok(graph
        .vertices()
        .filter(|v| !tree.has_vertex(v))
        .cloned()
        .collect())
}
