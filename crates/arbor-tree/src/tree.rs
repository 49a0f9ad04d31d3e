//! The tree itself: ownership, structural operations, the path registry,
//! and the tag query surface.

use crate::iter::SubtreeIter;
use crate::node::Node;
use crate::slab::NodeSlab;
use arbor_core::{is_valid_name, NodeId, Path, PathError, TreeError};
use indexmap::IndexMap;
use smallvec::{smallvec, SmallVec};

/// A single live, mutable tree of named, owned nodes addressable by
/// hierarchical path strings.
///
/// The tree owns every node; callers hold `Copy` [`NodeId`] handles.
/// Handles stay valid across renames, moves, and detaches, and become
/// stale only when the node is destroyed.
///
/// # Attachment and the registry
///
/// A node is **attached** when it is reachable from the tree root; every
/// attached node is registered in a flat index under its absolute path,
/// giving O(1) global lookup via [`resolve`](Tree::resolve). A structural
/// operation that changes the absolute paths of a subtree of N nodes
/// re-keys all N registry entries in the same walk that updates the
/// cached paths, so the registry is exactly the set of attached nodes
/// after every successful operation.
///
/// # Failure atomicity
///
/// Every operation validates before mutating: a failed operation leaves
/// the tree unchanged. In particular [`move_node`](Tree::move_node)
/// pre-checks both the destination name and the cycle condition before
/// detaching, so a failed move never leaves the node detached.
#[derive(Clone, Debug)]
pub struct Tree {
    pub(crate) slab: NodeSlab,
    pub(crate) registry: IndexMap<String, NodeId>,
    root: NodeId,
}

impl Tree {
    /// Create a tree holding only the root.
    ///
    /// The root is anonymous (empty name), attached, and registered at
    /// `"/"`. It cannot be renamed, moved, or destroyed.
    pub fn new() -> Self {
        let mut slab = NodeSlab::new();
        let mut root_node = Node::new("");
        root_node.path = Some(Path::root());
        let root = slab.insert(root_node);
        let mut registry = IndexMap::new();
        registry.insert(Path::root().as_str().to_string(), root);
        Self {
            slab,
            registry,
            root,
        }
    }

    /// Handle to the tree root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Shared access to a node. Fails with `StaleNode` if the handle's
    /// slot was destroyed.
    pub fn node(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.slab.get(id)
    }

    /// Whether the handle refers to a live node (attached or detached).
    pub fn contains(&self, id: NodeId) -> bool {
        self.slab.contains(id)
    }

    /// Number of live nodes, attached and detached, including the root.
    pub fn node_count(&self) -> usize {
        self.slab.len()
    }

    /// Number of attached nodes — always equal to the number of registry
    /// entries.
    pub fn attached_count(&self) -> usize {
        self.registry.len()
    }

    /// Construct a standalone node: detached, no parent, not registered.
    ///
    /// Fails with `InvalidName` if `name` is empty or contains the
    /// separator.
    pub fn spawn(&mut self, name: &str) -> Result<NodeId, TreeError> {
        if !is_valid_name(name) {
            return Err(TreeError::InvalidName { name: name.into() });
        }
        Ok(self.slab.insert(Node::new(name)))
    }

    // ---- structural operations -------------------------------------

    /// Attach a detached node (and its whole subtree) under `parent`.
    ///
    /// Fails with `DuplicateName` if `parent` already has a child with
    /// the node's name, `CycleDetected` if `parent` lies inside the
    /// node's own subtree, and `AlreadyAttached` if the node still has a
    /// parent. If `parent` is attached, every node of the newly attached
    /// subtree is registered under its freshly computed absolute path;
    /// attaching under a detached parent just links the graphs.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let child_node = self.slab.get(child)?;
        if child_node.parent.is_some() || child == self.root {
            return Err(TreeError::AlreadyAttached {
                path: self.display_path(child),
            });
        }
        let name = child_node.name.clone();
        if parent == child || self.has_ancestor(parent, child) {
            return Err(TreeError::CycleDetected {
                node: self.display_path(child),
                new_parent: self.display_path(parent),
            });
        }
        if self.slab.get(parent)?.children.contains_key(&name) {
            return Err(TreeError::DuplicateName {
                parent: self.display_path(parent),
                name,
            });
        }
        self.link(parent, child, name);
        Ok(())
    }

    /// Detach the child named `name` and return ownership of its subtree.
    ///
    /// The subtree stays alive in the tree's storage, rooted at the
    /// returned handle, until re-attached with
    /// [`add_child`](Tree::add_child) or freed with
    /// [`destroy`](Tree::destroy). Every node of the subtree is
    /// deregistered. Fails with `NotFound` if no such child exists.
    pub fn remove_child(&mut self, parent: NodeId, name: &str) -> Result<NodeId, TreeError> {
        let exists = self.slab.get(parent)?.children.contains_key(name);
        if !exists {
            return Err(TreeError::NotFound {
                path: join_for_display(&self.display_path(parent), name),
            });
        }
        let child = match self.slab.get_mut(parent) {
            Ok(p) => p.children.shift_remove(name),
            Err(_) => None,
        };
        let Some(child) = child else {
            return Err(TreeError::NotFound {
                path: join_for_display(&self.display_path(parent), name),
            });
        };
        if let Ok(c) = self.slab.get_mut(child) {
            c.parent = None;
        }
        self.clear_subtree_paths(child);
        Ok(child)
    }

    /// Free a detached node and, transitively, every node it owns.
    ///
    /// Handles into the destroyed subtree become stale. Fails with
    /// `AlreadyAttached` if the node still has a parent or is the root;
    /// detach with [`remove_child`](Tree::remove_child) first.
    pub fn destroy(&mut self, node: NodeId) -> Result<(), TreeError> {
        let n = self.slab.get(node)?;
        if n.parent.is_some() || node == self.root {
            return Err(TreeError::AlreadyAttached {
                path: self.display_path(node),
            });
        }
        for id in self.subtree_ids(node) {
            let freed = self.slab.free(id);
            debug_assert!(freed, "subtree handle {id} collected live");
        }
        Ok(())
    }

    /// Re-parent a node under `new_parent`, keeping its subtree intact.
    ///
    /// Equivalent to detach-then-attach, but both failure conditions are
    /// checked *before* the detach: a failed move leaves the tree
    /// completely unchanged. Moving a node onto its current parent is a
    /// no-op. Fails with `CycleDetected` if `new_parent` is the node or
    /// inside its subtree (this covers any attempt to move the root under
    /// an attached node), `DuplicateName` on a sibling collision, and
    /// `AlreadyAttached` for the root itself.
    pub fn move_node(&mut self, node: NodeId, new_parent: NodeId) -> Result<(), TreeError> {
        let node_ref = self.slab.get(node)?;
        let name = node_ref.name.clone();
        let old_parent = node_ref.parent;
        self.slab.get(new_parent)?;
        if node == self.root {
            return Err(TreeError::AlreadyAttached {
                path: self.display_path(node),
            });
        }
        if old_parent == Some(new_parent) {
            return Ok(());
        }
        if new_parent == node || self.has_ancestor(new_parent, node) {
            return Err(TreeError::CycleDetected {
                node: self.display_path(node),
                new_parent: self.display_path(new_parent),
            });
        }
        if self.slab.get(new_parent)?.children.contains_key(&name) {
            return Err(TreeError::DuplicateName {
                parent: self.display_path(new_parent),
                name,
            });
        }
        if let Some(op) = old_parent {
            if let Ok(p) = self.slab.get_mut(op) {
                p.children.shift_remove(&name);
            }
        }
        self.link(new_parent, node, name);
        Ok(())
    }

    /// Rename a node, re-keying the registry entries of its whole subtree.
    ///
    /// A rename to the current name is a no-op. Fails with `InvalidName`
    /// for malformed names (and for any attempt to rename the anonymous
    /// root) and `DuplicateName` on a sibling collision.
    pub fn rename(&mut self, node: NodeId, new_name: &str) -> Result<(), TreeError> {
        let n = self.slab.get(node)?;
        if n.name == new_name {
            return Ok(());
        }
        if node == self.root || !is_valid_name(new_name) {
            return Err(TreeError::InvalidName {
                name: new_name.into(),
            });
        }
        let old_name = n.name.clone();
        let parent = n.parent;
        let attached = n.path.is_some();
        if let Some(p) = parent {
            if self.slab.get(p)?.children.contains_key(new_name) {
                return Err(TreeError::DuplicateName {
                    parent: self.display_path(p),
                    name: new_name.into(),
                });
            }
        }
        if let Some(p) = parent {
            if let Ok(pn) = self.slab.get_mut(p) {
                if let Some(id) = pn.children.shift_remove(&old_name) {
                    pn.children.insert(new_name.to_string(), id);
                }
            }
        }
        if let Ok(n) = self.slab.get_mut(node) {
            n.name = new_name.to_string();
        }
        if attached {
            self.refresh_subtree(node);
        }
        Ok(())
    }

    // ---- lookup ----------------------------------------------------

    /// Handle to the child named `name`. Fails with `NotFound`.
    pub fn get_child(&self, parent: NodeId, name: &str) -> Result<NodeId, TreeError> {
        let p = self.slab.get(parent)?;
        p.children
            .get(name)
            .copied()
            .ok_or_else(|| TreeError::NotFound {
                path: join_for_display(&self.display_path(parent), name),
            })
    }

    /// O(1) global lookup of an absolute path in the registry.
    ///
    /// The path is normalized first, so `.`/`..` segments are accepted; a
    /// relative path is anchored at the root. Fails with `NotFound` if no
    /// attached node lives at the normalized path.
    pub fn resolve(&self, path: impl AsRef<str>) -> Result<NodeId, TreeError> {
        let norm = Path::new(path.as_ref()).normalize()?;
        self.registry
            .get(norm.as_str())
            .copied()
            .ok_or_else(|| TreeError::NotFound {
                path: norm.as_str().to_string(),
            })
    }

    /// Resolve a possibly-relative path string against a context node,
    /// then look the result up in the registry.
    ///
    /// A leading `..` resolves against the context's parent, a leading
    /// `.` (or a bare first segment) against the context itself; an
    /// absolute path ignores the context. Fails with `InvalidPath` when a
    /// relative form is used from a detached context, and `NotFound` when
    /// the resolved path has no attached node.
    pub fn resolve_path(
        &self,
        context: NodeId,
        path: impl AsRef<str>,
    ) -> Result<NodeId, TreeError> {
        let p = Path::new(path.as_ref());
        let ctx = self.slab.get(context)?;
        let abs = match ctx.path.as_ref() {
            Some(cp) => {
                let parent_path = ctx
                    .parent
                    .and_then(|pid| self.slab.get(pid).ok())
                    .and_then(|pn| pn.path.clone());
                p.resolve(cp, parent_path.as_ref())?
            }
            None if p.is_absolute() => p.normalize()?,
            None => {
                return Err(TreeError::InvalidPath(PathError::NoContext {
                    path: p.as_str().to_string(),
                }))
            }
        };
        self.registry
            .get(abs.as_str())
            .copied()
            .ok_or_else(|| TreeError::NotFound {
                path: abs.as_str().to_string(),
            })
    }

    /// Pre-order iterator over a subtree, the given node first.
    ///
    /// Order is deterministic for a fixed tree state: children are
    /// visited in insertion order.
    pub fn iter_subtree(&self, root: NodeId) -> Result<SubtreeIter<'_>, TreeError> {
        self.slab.get(root)?;
        Ok(SubtreeIter::new(self, root))
    }

    // ---- tags ------------------------------------------------------

    /// Add a tag to a node. Idempotent.
    pub fn add_tag(&mut self, node: NodeId, tag: &str) -> Result<(), TreeError> {
        self.slab.get_mut(node)?.tags.insert(tag.to_string());
        Ok(())
    }

    /// Remove a tag from a node. Returns whether the tag was present.
    pub fn remove_tag(&mut self, node: NodeId, tag: &str) -> Result<bool, TreeError> {
        Ok(self.slab.get_mut(node)?.tags.shift_remove(tag))
    }

    /// All nodes at or beneath `subtree_root` carrying `tag`, in
    /// pre-order. Empty if none match.
    pub fn query_by_tag(&self, subtree_root: NodeId, tag: &str) -> Result<Vec<NodeId>, TreeError> {
        let iter = self.iter_subtree(subtree_root)?;
        Ok(iter
            .filter(|id| {
                self.slab
                    .get(*id)
                    .map(|n| n.has_tag(tag))
                    .unwrap_or(false)
            })
            .collect())
    }

    /// Whether any *direct* child of `parent` carries `tag`.
    pub fn has_child_with_tag(&self, parent: NodeId, tag: &str) -> Result<bool, TreeError> {
        let p = self.slab.get(parent)?;
        for (_, id) in p.children.iter() {
            if self.slab.get(*id)?.has_tag(tag) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// The direct children of `parent` carrying `tag`, in insertion order.
    pub fn children_by_tag(&self, parent: NodeId, tag: &str) -> Result<Vec<NodeId>, TreeError> {
        let p = self.slab.get(parent)?;
        let mut out = Vec::new();
        for (_, id) in p.children.iter() {
            if self.slab.get(*id)?.has_tag(tag) {
                out.push(*id);
            }
        }
        Ok(out)
    }

    // ---- internals -------------------------------------------------

    /// Link a validated, detached `child` under `parent` and bring the
    /// path cache and registry up to date.
    fn link(&mut self, parent: NodeId, child: NodeId, name: String) {
        if let Ok(p) = self.slab.get_mut(parent) {
            p.children.insert(name, child);
        }
        if let Ok(c) = self.slab.get_mut(child) {
            c.parent = Some(parent);
        }
        let parent_attached = self
            .slab
            .get(parent)
            .map(|p| p.path.is_some())
            .unwrap_or(false);
        if parent_attached {
            self.refresh_subtree(child);
        } else {
            self.clear_subtree_paths(child);
        }
    }

    /// Recompute the absolute path of `head` and every descendant from
    /// their (already-linked) parents, re-keying the registry as it goes.
    ///
    /// Pre-order guarantees a parent's path is fresh before its children
    /// read it.
    fn refresh_subtree(&mut self, head: NodeId) {
        for id in self.subtree_ids(head) {
            let (parent_id, name) = match self.slab.get(id) {
                Ok(n) => (n.parent, n.name.clone()),
                Err(_) => continue,
            };
            let Some(parent_id) = parent_id else { continue };
            let parent_path = match self.slab.get(parent_id) {
                Ok(p) => p.path.clone(),
                Err(_) => None,
            };
            let Some(parent_path) = parent_path else {
                continue;
            };
            let new_path = child_path(&parent_path, &name);
            if let Ok(node) = self.slab.get_mut(id) {
                if let Some(old) = node.path.take() {
                    self.registry.shift_remove(old.as_str());
                }
                node.path = Some(new_path.clone());
                self.registry.insert(new_path.as_str().to_string(), id);
            }
        }
    }

    /// Deregister `head` and every descendant and drop their cached paths.
    fn clear_subtree_paths(&mut self, head: NodeId) {
        for id in self.subtree_ids(head) {
            if let Ok(node) = self.slab.get_mut(id) {
                if let Some(old) = node.path.take() {
                    self.registry.shift_remove(old.as_str());
                }
            }
        }
    }

    /// Collect a subtree in pre-order (parents before descendants).
    fn subtree_ids(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: SmallVec<[NodeId; 16]> = smallvec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Ok(node) = self.slab.get(id) {
                for (_, child) in node.children.iter().rev() {
                    stack.push(*child);
                }
            }
        }
        out
    }

    /// Whether `ancestor` lies on the parent chain above `id`.
    fn has_ancestor(&self, mut id: NodeId, ancestor: NodeId) -> bool {
        while let Ok(node) = self.slab.get(id) {
            match node.parent {
                Some(p) if p == ancestor => return true,
                Some(p) => id = p,
                None => return false,
            }
        }
        false
    }

    /// Best-effort location string for error messages: the absolute path
    /// when attached, the bare name otherwise.
    fn display_path(&self, id: NodeId) -> String {
        match self.slab.get(id) {
            Ok(n) => match n.path.as_ref() {
                Some(p) => p.as_str().to_string(),
                None => n.name.clone(),
            },
            Err(_) => id.to_string(),
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Absolute path of a child of `parent` named `name`.
///
/// `name` was validated at spawn/rename time, so this cannot produce a
/// malformed path.
fn child_path(parent: &Path, name: &str) -> Path {
    if parent.is_root() {
        Path::new(format!("/{name}"))
    } else {
        Path::new(format!("{}/{name}", parent.as_str()))
    }
}

fn join_for_display(parent: &str, name: &str) -> String {
    if parent == "/" || parent.is_empty() {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attach_new(tree: &mut Tree, parent: NodeId, name: &str) -> NodeId {
        let id = tree.spawn(name).unwrap();
        tree.add_child(parent, id).unwrap();
        id
    }

    #[test]
    fn new_tree_has_registered_root() {
        let tree = Tree::new();
        let root = tree.root();
        assert_eq!(tree.resolve("/").unwrap(), root);
        assert_eq!(tree.attached_count(), 1);
        assert_eq!(tree.node_count(), 1);
        assert!(tree.node(root).unwrap().is_attached());
        assert_eq!(
            tree.node(root).unwrap().absolute_path().unwrap().as_str(),
            "/"
        );
    }

    #[test]
    fn spawn_validates_name() {
        let mut tree = Tree::new();
        assert!(matches!(
            tree.spawn(""),
            Err(TreeError::InvalidName { .. })
        ));
        assert!(matches!(
            tree.spawn("a/b"),
            Err(TreeError::InvalidName { .. })
        ));
    }

    #[test]
    fn add_child_registers_under_computed_path() {
        let mut tree = Tree::new();
        let root = tree.root();
        let domain = attach_new(&mut tree, root, "domain");
        let mesh = attach_new(&mut tree, domain, "mesh");
        assert_eq!(tree.resolve("/domain").unwrap(), domain);
        assert_eq!(tree.resolve("/domain/mesh").unwrap(), mesh);
        assert_eq!(tree.node(mesh).unwrap().parent(), Some(domain));
        assert_eq!(
            tree.node(mesh).unwrap().absolute_path().unwrap().as_str(),
            "/domain/mesh"
        );
    }

    #[test]
    fn add_child_rejects_duplicate_and_leaves_state_unchanged() {
        let mut tree = Tree::new();
        let root = tree.root();
        let domain = attach_new(&mut tree, root, "domain");
        attach_new(&mut tree, domain, "mesh");
        let before = tree.attached_count();
        let second = tree.spawn("mesh").unwrap();
        assert!(matches!(
            tree.add_child(domain, second),
            Err(TreeError::DuplicateName { .. })
        ));
        assert_eq!(tree.attached_count(), before);
        assert!(!tree.node(second).unwrap().is_attached());
    }

    #[test]
    fn add_child_rejects_attached_node() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = attach_new(&mut tree, root, "a");
        let b = attach_new(&mut tree, root, "b");
        assert!(matches!(
            tree.add_child(b, a),
            Err(TreeError::AlreadyAttached { .. })
        ));
    }

    #[test]
    fn attaching_prebuilt_subtree_registers_every_node() {
        let mut tree = Tree::new();
        // Build offline: solver -> stage -> kernel, all detached.
        let solver = tree.spawn("solver").unwrap();
        let stage = tree.spawn("stage").unwrap();
        let kernel = tree.spawn("kernel").unwrap();
        tree.add_child(solver, stage).unwrap();
        tree.add_child(stage, kernel).unwrap();
        assert_eq!(tree.attached_count(), 1); // still just the root
        tree.add_child(tree.root(), solver).unwrap();
        assert_eq!(tree.attached_count(), 4);
        assert_eq!(tree.resolve("/solver/stage/kernel").unwrap(), kernel);
    }

    #[test]
    fn remove_child_deregisters_subtree_and_returns_it() {
        let mut tree = Tree::new();
        let root = tree.root();
        let domain = attach_new(&mut tree, root, "domain");
        let mesh = attach_new(&mut tree, domain, "mesh");
        let removed = tree.remove_child(tree.root(), "domain").unwrap();
        assert_eq!(removed, domain);
        assert_eq!(tree.attached_count(), 1);
        assert!(!tree.node(mesh).unwrap().is_attached());
        assert!(matches!(
            tree.resolve("/domain"),
            Err(TreeError::NotFound { .. })
        ));
        // Subtree is intact and can be re-attached elsewhere.
        let other = attach_new(&mut tree, root, "other");
        tree.add_child(other, domain).unwrap();
        assert_eq!(tree.resolve("/other/domain/mesh").unwrap(), mesh);
    }

    #[test]
    fn remove_missing_child_fails() {
        let mut tree = Tree::new();
        assert!(matches!(
            tree.remove_child(tree.root(), "ghost"),
            Err(TreeError::NotFound { .. })
        ));
    }

    #[test]
    fn destroy_frees_subtree_handles() {
        let mut tree = Tree::new();
        let root = tree.root();
        let domain = attach_new(&mut tree, root, "domain");
        let mesh = attach_new(&mut tree, domain, "mesh");
        let removed = tree.remove_child(tree.root(), "domain").unwrap();
        tree.destroy(removed).unwrap();
        assert!(!tree.contains(domain));
        assert!(!tree.contains(mesh));
        assert!(matches!(
            tree.node(mesh),
            Err(TreeError::StaleNode { .. })
        ));
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn destroy_refuses_attached_node_and_root() {
        let mut tree = Tree::new();
        let root = tree.root();
        let domain = attach_new(&mut tree, root, "domain");
        assert!(matches!(
            tree.destroy(domain),
            Err(TreeError::AlreadyAttached { .. })
        ));
        assert!(matches!(
            tree.destroy(tree.root()),
            Err(TreeError::AlreadyAttached { .. })
        ));
    }

    #[test]
    fn rename_is_noop_on_same_name() {
        let mut tree = Tree::new();
        let root = tree.root();
        let domain = attach_new(&mut tree, root, "domain");
        tree.rename(domain, "domain").unwrap();
        assert_eq!(tree.resolve("/domain").unwrap(), domain);
    }

    #[test]
    fn rename_rekeys_registry_for_whole_subtree() {
        let mut tree = Tree::new();
        let root = tree.root();
        let domain = attach_new(&mut tree, root, "domain");
        let mesh = attach_new(&mut tree, domain, "mesh");
        tree.rename(domain, "region").unwrap();
        assert_eq!(tree.resolve("/region").unwrap(), domain);
        assert_eq!(tree.resolve("/region/mesh").unwrap(), mesh);
        assert!(matches!(
            tree.resolve("/domain/mesh"),
            Err(TreeError::NotFound { .. })
        ));
        assert_eq!(tree.get_child(tree.root(), "region").unwrap(), domain);
    }

    #[test]
    fn rename_rejects_sibling_collision() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = attach_new(&mut tree, root, "a");
        attach_new(&mut tree, root, "b");
        assert!(matches!(
            tree.rename(a, "b"),
            Err(TreeError::DuplicateName { .. })
        ));
        assert_eq!(tree.resolve("/a").unwrap(), a);
    }

    #[test]
    fn root_cannot_be_renamed_or_moved() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = attach_new(&mut tree, root, "a");
        assert!(matches!(
            tree.rename(tree.root(), "top"),
            Err(TreeError::InvalidName { .. })
        ));
        assert!(matches!(
            tree.move_node(tree.root(), a),
            Err(TreeError::AlreadyAttached { .. })
        ));
    }

    #[test]
    fn move_rejects_cycle() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = attach_new(&mut tree, root, "a");
        let b = attach_new(&mut tree, a, "b");
        let c = attach_new(&mut tree, b, "c");
        assert!(matches!(
            tree.move_node(a, c),
            Err(TreeError::CycleDetected { .. })
        ));
        assert!(matches!(
            tree.move_node(a, a),
            Err(TreeError::CycleDetected { .. })
        ));
        // Failed move left everything in place.
        assert_eq!(tree.resolve("/a/b/c").unwrap(), c);
    }

    #[test]
    fn move_onto_current_parent_is_noop() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = attach_new(&mut tree, root, "a");
        tree.move_node(a, root).unwrap();
        assert_eq!(tree.resolve("/a").unwrap(), a);
        assert_eq!(tree.attached_count(), 2);
    }

    #[test]
    fn get_child_reports_not_found() {
        let tree = Tree::new();
        assert!(matches!(
            tree.get_child(tree.root(), "ghost"),
            Err(TreeError::NotFound { .. })
        ));
    }

    #[test]
    fn resolve_normalizes_before_lookup() {
        let mut tree = Tree::new();
        let root = tree.root();
        let domain = attach_new(&mut tree, root, "domain");
        attach_new(&mut tree, domain, "mesh");
        assert_eq!(tree.resolve("/domain/./mesh/..").unwrap(), domain);
        assert_eq!(tree.resolve("//domain").unwrap(), domain);
        assert!(matches!(
            tree.resolve("/.."),
            Err(TreeError::InvalidPath(PathError::EscapesRoot { .. }))
        ));
    }

    #[test]
    fn resolve_path_relative_forms() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = attach_new(&mut tree, root, "a");
        let b = attach_new(&mut tree, a, "b");
        let c = attach_new(&mut tree, b, "c");
        assert_eq!(tree.resolve_path(c, "..").unwrap(), b);
        assert_eq!(tree.resolve_path(c, ".").unwrap(), c);
        assert_eq!(tree.resolve_path(b, "c").unwrap(), c);
        assert_eq!(tree.resolve_path(b, "./c").unwrap(), c);
        assert_eq!(tree.resolve_path(c, "../c").unwrap(), c);
        assert_eq!(tree.resolve_path(c, "/a").unwrap(), a);
    }

    #[test]
    fn resolve_path_from_detached_context() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = attach_new(&mut tree, root, "a");
        let loose = tree.spawn("loose").unwrap();
        // Absolute paths work from anywhere.
        assert_eq!(tree.resolve_path(loose, "/a").unwrap(), a);
        // Relative forms need an attached context.
        assert!(matches!(
            tree.resolve_path(loose, "."),
            Err(TreeError::InvalidPath(PathError::NoContext { .. }))
        ));
    }

    #[test]
    fn stale_handle_is_rejected_everywhere() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = attach_new(&mut tree, root, "a");
        let removed = tree.remove_child(root, "a").unwrap();
        tree.destroy(removed).unwrap();
        assert!(matches!(tree.node(a), Err(TreeError::StaleNode { .. })));
        assert!(matches!(
            tree.rename(a, "x"),
            Err(TreeError::StaleNode { .. })
        ));
        assert!(matches!(
            tree.add_tag(a, "t"),
            Err(TreeError::StaleNode { .. })
        ));
    }

    #[test]
    fn tags_are_idempotent_and_queryable() {
        let mut tree = Tree::new();
        let root = tree.root();
        let domain = attach_new(&mut tree, root, "domain");
        let mesh = attach_new(&mut tree, domain, "mesh");
        tree.add_tag(mesh, "geometry").unwrap();
        tree.add_tag(mesh, "geometry").unwrap();
        assert!(tree.node(mesh).unwrap().has_tag("geometry"));
        assert_eq!(tree.node(mesh).unwrap().tags().count(), 1);
        assert_eq!(tree.query_by_tag(tree.root(), "geometry").unwrap(), [mesh]);
        assert!(tree.query_by_tag(tree.root(), "absent").unwrap().is_empty());
        assert!(tree.has_child_with_tag(domain, "geometry").unwrap());
        assert!(!tree.has_child_with_tag(tree.root(), "geometry").unwrap());
        assert_eq!(tree.children_by_tag(domain, "geometry").unwrap(), [mesh]);
        assert!(tree.remove_tag(mesh, "geometry").unwrap());
        assert!(!tree.remove_tag(mesh, "geometry").unwrap());
    }

    #[test]
    fn iter_subtree_is_preorder_in_insertion_order() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = attach_new(&mut tree, root, "a");
        let b = attach_new(&mut tree, a, "b");
        let c = attach_new(&mut tree, a, "c");
        let d = attach_new(&mut tree, b, "d");
        let order: Vec<_> = tree.iter_subtree(a).unwrap().collect();
        assert_eq!(order, [a, b, d, c]);
    }
}
