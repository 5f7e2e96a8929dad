//! Breadth-first construction of shortest-path trees.

use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

use petgraph::graph::NodeIndex;

use crate::error::GraphError;
use crate::graph::labeled::LabeledGraph;
use crate::graph::tree::ShortestPathTree;

/// Build the BFS shortest-path tree of `graph` rooted at `source`.
///
/// A vertex counts as visited exactly when it is attached to the tree, so
/// each vertex is discovered once, at its minimum distance. Out-neighbors
/// are scanned in [`LabeledGraph::out_neighbors`] order, which decides the
/// parent among equally short candidates. Runs in O(V + E).
///
/// # Errors
///
/// [`GraphError::NoSuchVertex`] when `source` is not in `graph`.
pub fn build_shortest_path_tree<V, L>(
    graph: &LabeledGraph<V, L>,
    source: &V,
) -> Result<ShortestPathTree<V>, GraphError>
where
    V: Clone + Eq + Hash + fmt::Debug,
{
    let start = graph.index_of(source)?;
    let mut tree = ShortestPathTree::with_root(source.clone());

    // (graph index, tree index) of each frontier vertex
    let mut queue: VecDeque<(NodeIndex, NodeIndex)> = VecDeque::new();
    queue.push_back((start, tree.index_of(source)?));

    while let Some((current, current_in_tree)) = queue.pop_front() {
        for next in graph.out_indices(current) {
            let vertex = graph.vertex_at(next);
            if !tree.has_vertex(vertex) {
                let attached = tree.attach(vertex.clone(), current_in_tree);
                queue.push_back((next, attached));
            }
        }
    }

    Ok(tree)
}
