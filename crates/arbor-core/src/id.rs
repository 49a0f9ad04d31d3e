//! Generational node handles.

use std::fmt;

/// Non-owning handle to a node in an Arbor tree.
///
/// A `NodeId` encodes the physical slot of a node in the tree's slab plus
/// the generation the slot had when the node was created. Destroying a node
/// bumps its slot's generation, so a handle held across a destroy is
/// detected as stale in O(1) instead of silently resolving to whatever
/// node was later allocated in the same slot.
///
/// Handles stay valid across renames, moves, and detaches: structural
/// operations never relocate a node within the slab.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// Create a handle from a slot index and generation.
    ///
    /// Only the slab allocates meaningful handles; constructing one by hand
    /// yields a handle that is at best stale.
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index within the tree's slab.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Slot generation at the time this handle was issued.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}@{})", self.index, self.generation)
    }
}
