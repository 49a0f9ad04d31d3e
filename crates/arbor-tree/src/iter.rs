//! Pre-order subtree traversal.

use crate::tree::Tree;
use arbor_core::NodeId;

/// Depth-first pre-order iterator over a subtree.
///
/// Yields the subtree root first, then each child's subtree in insertion
/// order. The borrow of the tree guarantees the structure cannot change
/// mid-traversal, so the order is deterministic for a fixed tree state.
pub struct SubtreeIter<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl<'a> SubtreeIter<'a> {
    pub(crate) fn new(tree: &'a Tree, root: NodeId) -> Self {
        Self {
            tree,
            stack: vec![root],
        }
    }
}

impl Iterator for SubtreeIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        if let Ok(node) = self.tree.node(id) {
            // Reversed push so pop order matches insertion order.
            for (_, child) in node.children().collect::<Vec<_>>().into_iter().rev() {
                self.stack.push(child);
            }
        }
        Some(id)
    }
}
