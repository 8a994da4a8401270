//! Kruskal's minimum spanning tree

use serde::{Deserialize, Serialize};

use super::UnionFind;

/// Undirected weighted edge between two nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

impl Edge {
    pub const fn new(from: usize, to: usize, weight: f64) -> Self {
        Self { from, to, weight }
    }
}

/// Minimum spanning forest of a graph with `node_count` nodes.
///
/// Edges are sorted by ascending weight with a stable sort, so ties keep
/// their input order. Stops as soon as `node_count - 1` edges are accepted.
/// Edges referring to nodes outside `0..node_count` are ignored.
pub fn minimum_spanning_tree(node_count: usize, mut edges: Vec<Edge>) -> Vec<Edge> {
    let mut mst = Vec::with_capacity(node_count.saturating_sub(1));
    if node_count < 2 {
        return mst;
    }

    edges.sort_by(|a, b| a.weight.total_cmp(&b.weight));
    let mut sets = UnionFind::new(node_count);

    for edge in edges {
        if sets.union(edge.from, edge.to) {
            mst.push(edge);
            if mst.len() == node_count - 1 {
                break;
            }
        }
    }

    mst
}
