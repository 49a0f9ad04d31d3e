//! Generational slot storage for nodes.
//!
//! Slots are reused through a free list; freeing a slot bumps its
//! generation so handles issued before the free fail the O(1) staleness
//! check instead of aliasing a later occupant.

use crate::node::Node;
use arbor_core::{NodeId, TreeError};

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Slab allocator for [`Node`]s.
#[derive(Clone, Debug, Default)]
pub(crate) struct NodeSlab {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl NodeSlab {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Store a node, reusing a freed slot when one is available.
    pub(crate) fn insert(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId::new(index, 0)
        }
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.slot(id).is_some()
    }

    pub(crate) fn get(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.slot(id).ok_or(TreeError::StaleNode { node: id })
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        let live = self.contains(id);
        if live {
            let slot = &mut self.slots[id.index() as usize];
            // contains() verified both occupancy and generation
            match slot.node.as_mut() {
                Some(node) => Ok(node),
                None => Err(TreeError::StaleNode { node: id }),
            }
        } else {
            Err(TreeError::StaleNode { node: id })
        }
    }

    /// Free the slot if the handle is live, bumping its generation.
    ///
    /// Returns whether a node was actually freed. Infallible counterpart
    /// of [`remove`](NodeSlab::remove) for bulk frees over handles the
    /// caller has just collected.
    pub(crate) fn free(&mut self, id: NodeId) -> bool {
        self.remove(id).is_ok()
    }

    /// Free the slot, bumping its generation.
    pub(crate) fn remove(&mut self, id: NodeId) -> Result<Node, TreeError> {
        if !self.contains(id) {
            return Err(TreeError::StaleNode { node: id });
        }
        let slot = &mut self.slots[id.index() as usize];
        let node = slot.node.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        match node {
            Some(node) => Ok(node),
            None => Err(TreeError::StaleNode { node: id }),
        }
    }

    fn slot(&self, id: NodeId) -> Option<&Node> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.node.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_round_trip() {
        let mut slab = NodeSlab::new();
        let id = slab.insert(Node::new("a"));
        assert_eq!(slab.get(id).unwrap().name(), "a");
        assert_eq!(slab.len(), 1);
        assert!(slab.contains(id));
    }

    #[test]
    fn removed_handle_is_stale() {
        let mut slab = NodeSlab::new();
        let id = slab.insert(Node::new("a"));
        slab.remove(id).unwrap();
        assert!(!slab.contains(id));
        assert!(matches!(slab.get(id), Err(TreeError::StaleNode { .. })));
        assert_eq!(slab.len(), 0);
    }

    #[test]
    fn reused_slot_gets_new_generation() {
        let mut slab = NodeSlab::new();
        let a = slab.insert(Node::new("a"));
        slab.remove(a).unwrap();
        let b = slab.insert(Node::new("b"));
        assert_eq!(a.index(), b.index());
        assert_ne!(a.generation(), b.generation());
        // The old handle must not alias the new occupant.
        assert!(slab.get(a).is_err());
        assert_eq!(slab.get(b).unwrap().name(), "b");
    }

    #[test]
    fn free_reports_liveness() {
        let mut slab = NodeSlab::new();
        let id = slab.insert(Node::new("a"));
        assert!(slab.free(id));
        assert!(!slab.free(id));
        assert_eq!(slab.len(), 0);
    }

    #[test]
    fn double_remove_fails() {
        let mut slab = NodeSlab::new();
        let id = slab.insert(Node::new("a"));
        slab.remove(id).unwrap();
        assert!(slab.remove(id).is_err());
    }
}
