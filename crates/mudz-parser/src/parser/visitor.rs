//! Pre-order AST traversal with per-kind pruning.
//!
//! `walk` calls `Visitor::visit` on every reached node and then asks
//! `Visitor::should_descend` whether to enter its children. The walk keeps an
//! explicit stack, so deeply nested trees (long operator chains) do not
//! recurse on the call stack.

use super::base::NodeIndex;
use super::node::{Node, NodeArena, NodeKind};
use super::node_access::data_children;

pub trait Visitor {
    /// Called once for every node reached, parents before children.
    fn visit(&mut self, arena: &NodeArena, index: NodeIndex, node: &Node);

    /// Whether to traverse into the children of a node of this kind.
    fn should_descend(&self, _kind: NodeKind) -> bool {
        true
    }
}

/// Visit `root` and, subject to `should_descend`, its subtree in source order.
pub fn walk<V: Visitor + ?Sized>(arena: &NodeArena, root: NodeIndex, visitor: &mut V) {
    let mut stack = vec![root];
    while let Some(index) = stack.pop() {
        maybe_visit(arena, index, visitor, &mut stack);
    }
}

fn maybe_visit<V: Visitor + ?Sized>(
    arena: &NodeArena,
    index: NodeIndex,
    visitor: &mut V,
    pending: &mut Vec<NodeIndex>,
) {
    let Some(node) = arena.get(index) else {
        return;
    };
    visitor.visit(arena, index, node);
    if visitor.should_descend(node.kind()) {
        pending.extend(data_children(&node.data).iter().rev().copied());
    }
}
