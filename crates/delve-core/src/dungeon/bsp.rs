//! Binary space partitioning
//!
//! The dungeon bounds are split recursively into a tree of rectangles.
//! Nodes live in an arena and refer to their children by index; the root is
//! always node 0. Leaves are where rooms get placed, and internal nodes later
//! carry a representative room chosen from their descendants.

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::trace;

use crate::rng::DungeonRng;

use super::rect::Rect;
use super::room::{AreaType, RoomId};

/// Index of a node in the tree arena
pub type NodeId = usize;

/// Aspect ratio beyond which a node is always split across its long side
const SPLIT_RATIO: f64 = 1.25;

/// Direction of a split line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Orientation {
    /// Splits the width: the line runs top to bottom at an x coordinate
    Vertical,
    /// Splits the height: the line runs left to right at a y coordinate
    Horizontal,
}

/// Where a node was split, in absolute coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SplitLine {
    pub orientation: Orientation,
    pub position: i32,
}

/// A node of the partition tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BspNode {
    pub rect: Rect,
    pub depth: u32,
    /// Left and right children; both or neither
    pub children: Option<(NodeId, NodeId)>,
    pub split: Option<SplitLine>,
    /// The leaf's own room, or an internal node's representative room
    pub room: Option<RoomId>,
    /// Area type of `room` once known; leaves may be pre-assigned one
    pub area_type: Option<AreaType>,
}

impl BspNode {
    fn leaf(rect: Rect, depth: u32) -> Self {
        Self {
            rect,
            depth,
            children: None,
            split: None,
            room: None,
            area_type: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Parameters for [`BspTree::partition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitParams {
    pub min_split_size: i32,
    pub max_split_depth: i32,
    /// Stop splitting once the tree has this many leaves
    pub leaf_cap: Option<usize>,
}

/// Partition tree stored as an arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BspTree {
    nodes: Vec<BspNode>,
}

impl BspTree {
    /// A tree made of a single, unsplit root
    pub fn new(bounds: Rect) -> Self {
        Self {
            nodes: vec![BspNode::leaf(bounds, 0)],
        }
    }

    /// Recursively split `bounds`.
    ///
    /// A node stays a leaf when it is at the depth limit, either side is no
    /// larger than `min_split_size`, the leaf cap is reached, or the range of
    /// valid split coordinates is empty.
    pub fn partition(bounds: Rect, params: SplitParams, rng: &mut DungeonRng) -> Self {
        let mut tree = Self::new(bounds);
        let mut leaves = 1;
        tree.split_recursive(0, &params, &mut leaves, rng);
        tree
    }

    fn split_recursive(
        &mut self,
        id: NodeId,
        params: &SplitParams,
        leaves: &mut usize,
        rng: &mut DungeonRng,
    ) {
        let BspNode { rect, depth, .. } = self.nodes[id];
        let min = params.min_split_size;

        if i64::from(depth) >= i64::from(params.max_split_depth)
            || rect.width <= min
            || rect.height <= min
        {
            return;
        }

        if params.leaf_cap.is_some_and(|cap| *leaves >= cap) {
            trace!(node = id, leaves = *leaves, "leaf cap reached, not splitting");
            return;
        }

        let orientation = choose_orientation(rect.width, rect.height, rng);
        let extent = match orientation {
            Orientation::Vertical => rect.width,
            Orientation::Horizontal => rect.height,
        };

        let max_split = extent - min;
        if max_split <= min {
            return;
        }
        let split = rng.range(min, max_split);

        let (left, right, position) = match orientation {
            Orientation::Vertical => (
                Rect::new(rect.x, rect.y, split, rect.height),
                Rect::new(rect.x + split, rect.y, rect.width - split, rect.height),
                rect.x + split,
            ),
            Orientation::Horizontal => (
                Rect::new(rect.x, rect.y, rect.width, split),
                Rect::new(rect.x, rect.y + split, rect.width, rect.height - split),
                rect.y + split,
            ),
        };
        trace!(node = id, %orientation, position, "split");

        let left_id = self.push(BspNode::leaf(left, depth + 1));
        let right_id = self.push(BspNode::leaf(right, depth + 1));
        let node = &mut self.nodes[id];
        node.children = Some((left_id, right_id));
        node.split = Some(SplitLine {
            orientation,
            position,
        });
        *leaves += 1;

        self.split_recursive(left_id, params, leaves, rng);
        self.split_recursive(right_id, params, leaves, rng);
    }

    /// Add a detached node, returning its id
    pub fn push(&mut self, node: BspNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Make `left` and `right` the children of `parent`
    #[cfg(test)]
    pub(crate) fn attach(&mut self, parent: NodeId, left: NodeId, right: NodeId, split: SplitLine) {
        let node = &mut self.nodes[parent];
        node.children = Some((left, right));
        node.split = Some(split);
    }

    pub const fn root(&self) -> NodeId {
        0
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&BspNode> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut BspNode> {
        self.nodes.get_mut(id)
    }

    pub fn nodes(&self) -> &[BspNode] {
        &self.nodes
    }

    pub fn children(&self, id: NodeId) -> Option<(NodeId, NodeId)> {
        self.nodes.get(id).and_then(|n| n.children)
    }

    /// Room (own or representative) of a node
    pub fn room(&self, id: NodeId) -> Option<RoomId> {
        self.nodes.get(id).and_then(|n| n.room)
    }

    /// Node ids in post-order (children before parents, left before right)
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root(), false)];
        while let Some((id, expanded)) = stack.pop() {
            match self.nodes[id].children {
                Some((left, right)) if !expanded => {
                    stack.push((id, true));
                    stack.push((right, false));
                    stack.push((left, false));
                }
                _ => order.push(id),
            }
        }
        order
    }

    /// Leaf ids from left to right
    pub fn leaves(&self) -> Vec<NodeId> {
        self.post_order()
            .into_iter()
            .filter(|&id| self.nodes[id].is_leaf())
            .collect()
    }

    /// Depth of the deepest node
    pub fn max_depth(&self) -> u32 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }
}

/// Split across the long side of elongated nodes, randomly otherwise
fn choose_orientation(width: i32, height: i32, rng: &mut DungeonRng) -> Orientation {
    let (w, h) = (f64::from(width), f64::from(height));
    if w / h >= SPLIT_RATIO {
        Orientation::Vertical
    } else if h / w >= SPLIT_RATIO {
        Orientation::Horizontal
    } else if rng.coin() {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    }
}
