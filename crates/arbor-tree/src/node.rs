//! Node storage: name, parent handle, children map, tag set, cached path.

use arbor_core::{NodeId, Path};
use indexmap::{IndexMap, IndexSet};

/// A single node in the component tree.
///
/// Nodes are owned by the [`Tree`](crate::Tree) and only ever handed out
/// by shared reference; all mutation goes through tree operations so the
/// structural invariants (unique sibling names, single ownership, registry
/// consistency) cannot be bypassed.
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: IndexMap<String, NodeId>,
    pub(crate) tags: IndexSet<String>,
    /// Cached absolute path; `None` while detached. Updated in the same
    /// subtree walk that re-keys the registry.
    pub(crate) path: Option<Path>,
}

impl Node {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: IndexMap::new(),
            tags: IndexSet::new(),
            path: None,
        }
    }

    /// The node's name, unique among its siblings.
    ///
    /// The tree root is anonymous: its name is the empty string.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle to the owning parent, or `None` for the root and for the
    /// head of a detached subtree.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The node's absolute path, or `None` while detached.
    ///
    /// Always equal to the parent's absolute path plus this node's name;
    /// every structural change that affects it also re-keys the registry.
    pub fn absolute_path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Whether the node is attached: reachable from the tree root and
    /// present in the registry under its absolute path.
    ///
    /// Interior nodes of a detached subtree have a parent but are not
    /// attached.
    pub fn is_attached(&self) -> bool {
        self.path.is_some()
    }

    /// Handle to the child with the given name, if present.
    pub fn child(&self, name: &str) -> Option<NodeId> {
        self.children.get(name).copied()
    }

    /// Iterate over `(name, handle)` pairs in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.children.iter().map(|(n, id)| (n.as_str(), *id))
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Whether the tag set contains `tag` (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Iterate over the node's tags in insertion order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_node_is_detached() {
        let n = Node::new("mesh");
        assert_eq!(n.name(), "mesh");
        assert!(n.parent().is_none());
        assert!(n.absolute_path().is_none());
        assert!(!n.is_attached());
        assert_eq!(n.child_count(), 0);
        assert_eq!(n.tags().count(), 0);
    }

    #[test]
    fn children_iterate_in_insertion_order() {
        let mut n = Node::new("p");
        n.children.insert("b".into(), NodeId::new(1, 0));
        n.children.insert("a".into(), NodeId::new(2, 0));
        let names: Vec<_> = n.children().map(|(name, _)| name).collect();
        assert_eq!(names, ["b", "a"]);
    }
}
