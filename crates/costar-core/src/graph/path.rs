//! Path reconstruction by walking parent pointers.

use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

use petgraph::graph::NodeIndex;

use crate::error::GraphError;
use crate::graph::tree::ShortestPathTree;

/// The path from the tree's root to `target`, both endpoints included.
///
/// Walks from `target` up through parent links until the root (the vertex
/// with no parent) is reached. For the root itself the result is
/// `[root]`.
///
/// # Errors
///
/// [`GraphError::NoSuchVertex`] when `target` is not in the tree;
/// [`GraphError::InvalidArgument`] if the parent chain fails to reach a
/// root within `num_vertices` steps.
pub fn reconstruct_path<V>(tree: &ShortestPathTree<V>, target: &V) -> Result<Vec<V>, GraphError>
where
    V: Clone + Eq + Hash + fmt::Debug,
{
    let mut path = VecDeque::new();
    walk_to_root(tree, target, |idx| {
        path.push_front(tree.vertex_at(idx).clone());
    })?;
    Ok(path.into())
}

/// Number of edges between the tree's root and `target`.
///
/// Equal to `reconstruct_path(tree, target)?.len() - 1` without allocating
/// the path.
///
/// # Errors
///
/// Same as [`reconstruct_path`].
pub fn hop_count<V>(tree: &ShortestPathTree<V>, target: &V) -> Result<usize, GraphError>
where
    V: Clone + Eq + Hash + fmt::Debug,
{
    let mut visited = 0_usize;
    walk_to_root(tree, target, |_| visited += 1)?;
    Ok(visited - 1)
}

/// Visit `target` and each ancestor up to the root, in that order.
fn walk_to_root<V>(
    tree: &ShortestPathTree<V>,
    target: &V,
    mut visit: impl FnMut(NodeIndex),
) -> Result<(), GraphError>
where
    V: Clone + Eq + Hash + fmt::Debug,
{
    let mut current = tree.index_of(target)?;
    for _ in 0..tree.num_vertices() {
        visit(current);
        match tree.parent_index(current) {
            Some(parent) => current = parent,
            None => return Ok(()),
        }
    }
    Err(GraphError::invalid_argument(format!(
        "parent chain from {target:?} does not reach the root"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::graph::{LabeledGraph, build_shortest_path_tree};

    fn line() -> LabeledGraph<char, ()> {
        let mut g = LabeledGraph::new();
        for v in ['A', 'B', 'C', 'D'] {
            g.insert_vertex(v);
        }
        g.insert_undirected(&'A', &'B', ()).unwrap();
        g.insert_undirected(&'B', &'C', ()).unwrap();
        g
    }

    #[test]
    fn path_runs_from_root_to_target() {
        let tree = build_shortest_path_tree(&line(), &'A').unwrap();
        assert_eq!(reconstruct_path(&tree, &'C').unwrap(), vec!['A', 'B', 'C']);
        assert_eq!(hop_count(&tree, &'C').unwrap(), 2);
    }

    #[test]
    fn root_path_is_single_element() {
        let tree = build_shortest_path_tree(&line(), &'B').unwrap();
        assert_eq!(reconstruct_path(&tree, &'B').unwrap(), vec!['B']);
        assert_eq!(hop_count(&tree, &'B').unwrap(), 0);
    }

    #[test]
    fn unreachable_target_is_not_in_tree() {
        let tree = build_shortest_path_tree(&line(), &'A').unwrap();
        let err = reconstruct_path(&tree, &'D').unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoSuchVertex);
        assert!(hop_count(&tree, &'D').is_err());
    }

    #[test]
    fn hop_count_matches_recorded_depth() {
        let tree = build_shortest_path_tree(&line(), &'C').unwrap();
        for v in ['A', 'B', 'C'] {
            assert_eq!(hop_count(&tree, &v).unwrap(), tree.depth(&v).unwrap());
        }
    }
}
