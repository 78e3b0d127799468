//! NodeArena creation methods.

use super::base::NodeIndex;
use super::node::{Node, NodeArena, NodeData};

impl NodeArena {
    /// Maximum pre-allocation to avoid capacity overflow in huge files.
    const MAX_NODE_PREALLOC: usize = 1_000_000;

    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena sized for a source text of `source_len` bytes.
    pub fn with_capacity(source_len: usize) -> NodeArena {
        // Roughly one node per four bytes of typical source.
        let capacity = (source_len / 4).min(Self::MAX_NODE_PREALLOC);
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Append a node and return its index.
    pub fn add_node(&mut self, pos: u32, end: u32, data: NodeData) -> NodeIndex {
        debug_assert!(pos <= end, "node range is inverted: {pos}..{end}");
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node { pos, end, data });
        index
    }

    /// Widen a node's end offset; never shrinks it.
    pub(crate) fn extend_end(&mut self, index: NodeIndex, end: u32) {
        if let Some(node) = self.nodes.get_mut(index.0 as usize) {
            node.end = node.end.max(end);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node with its index, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex(i as u32), node))
    }
}
