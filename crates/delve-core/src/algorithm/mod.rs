//! Generic graph algorithms used by the generator
//!
//! Disjoint sets, a min-priority queue and Kruskal's minimum spanning tree.

mod kruskal;
mod priority_queue;
mod union_find;

pub use kruskal::{Edge, minimum_spanning_tree};
pub use priority_queue::PriorityQueue;
pub use union_find::UnionFind;
