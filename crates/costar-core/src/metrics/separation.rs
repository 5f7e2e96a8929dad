//! Average separation over a shortest-path tree.
//!
//! The descent starts at `root` and follows incoming tree edges, which lead
//! from a vertex to its children. Every visited vertex contributes its
//! distance below `root`. An explicit stack replaces recursion so very deep
//! trees cannot exhaust the call stack.

use std::fmt;
use std::hash::Hash;

use crate::error::GraphError;
use crate::graph::ShortestPathTree;

/// Sum of distances from `root` to every vertex below it in `tree`
/// (including `root` itself, at distance 0).
///
/// # Errors
///
/// [`GraphError::NoSuchVertex`] when `root` is not in the tree.
pub fn depth_sum<V>(tree: &ShortestPathTree<V>, root: &V) -> Result<usize, GraphError>
where
    V: Clone + Eq + Hash + fmt::Debug,
{
    let start = tree.index_of(root)?;
    let mut stack = vec![(start, 0_usize)];
    let mut sum = 0_usize;

    while let Some((idx, distance)) = stack.pop() {
        sum += distance;
        stack.extend(tree.child_indices(idx).map(|child| (child, distance + 1)));
    }

    Ok(sum)
}

/// Mean hop count from `root` to the tree's vertices: [`depth_sum`] divided
/// by the number of vertices in `tree`.
///
/// A tree holding only its root yields `0.0`.
///
/// # Errors
///
/// [`GraphError::NoSuchVertex`] when `root` is not in the tree.
#[allow(clippy::cast_precision_loss)]
pub fn average_separation<V>(tree: &ShortestPathTree<V>, root: &V) -> Result<f64, GraphError>
where
    V: Clone + Eq + Hash + fmt::Debug,
{
    let sum = depth_sum(tree, root)?;
    Ok(sum as f64 / tree.num_vertices() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::graph::{LabeledGraph, build_shortest_path_tree};

    fn star(leaves: u32) -> LabeledGraph<u32, ()> {
        let mut g = LabeledGraph::new();
        g.insert_vertex(0);
        for leaf in 1..=leaves {
            g.insert_vertex(leaf);
            g.insert_undirected(&0, &leaf, ()).unwrap();
        }
        g
    }

    #[test]
    fn singleton_tree_has_zero_separation() {
        let g = star(0);
        let tree = build_shortest_path_tree(&g, &0).unwrap();
        assert_eq!(depth_sum(&tree, &0).unwrap(), 0);
        assert!(average_separation(&tree, &0).unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn star_center_and_leaf() {
        let g = star(4);

        // hub: four leaves at distance 1, over five vertices
        let hub = build_shortest_path_tree(&g, &0).unwrap();
        assert!((average_separation(&hub, &0).unwrap() - 0.8).abs() < 1e-12);

        // leaf: hub at 1, three other leaves at 2 → 7 / 5
        let leaf = build_shortest_path_tree(&g, &1).unwrap();
        assert_eq!(depth_sum(&leaf, &1).unwrap(), 7);
        assert!((average_separation(&leaf, &1).unwrap() - 1.4).abs() < 1e-12);
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        let n = 50_000_u32;
        let mut g: LabeledGraph<u32, ()> = LabeledGraph::with_capacity(n as usize, n as usize);
        for v in 0..n {
            g.insert_vertex(v);
        }
        for v in 1..n {
            g.insert_undirected(&(v - 1), &v, ()).unwrap();
        }
        let tree = build_shortest_path_tree(&g, &0).unwrap();

        let expected = (n as usize - 1) * n as usize / 2;
        assert_eq!(depth_sum(&tree, &0).unwrap(), expected);
    }

    #[test]
    fn descent_from_inner_vertex_covers_its_subtree() {
        // 0 - 1 - 2 - 3 rooted at 0; descending from 2 sees {2, 3}
        let mut g: LabeledGraph<u32, ()> = LabeledGraph::new();
        for v in 0..4 {
            g.insert_vertex(v);
        }
        for v in 1..4 {
            g.insert_undirected(&(v - 1), &v, ()).unwrap();
        }
        let tree = build_shortest_path_tree(&g, &0).unwrap();
        assert_eq!(depth_sum(&tree, &2).unwrap(), 1);
    }

    #[test]
    fn missing_root_is_rejected() {
        let g = star(2);
        let tree = build_shortest_path_tree(&g, &0).unwrap();
        let err = average_separation(&tree, &99).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoSuchVertex);
    }
}
