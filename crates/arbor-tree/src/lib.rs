//! The Arbor component tree: a single live, mutable tree of named, owned
//! nodes addressable by hierarchical path strings.
//!
//! # Architecture
//!
//! ```text
//! Tree (single owner of all nodes)
//! ├── NodeSlab        slot vector + free list, generational NodeId handles
//! ├── registry        IndexMap<String, NodeId> — absolute path → node, O(1)
//! └── Node            name, parent handle, children IndexMap, tag IndexSet
//! ```
//!
//! The tree owns every node; [`NodeId`](arbor_core::NodeId) handles are
//! `Copy` and non-owning. Structural operations (attach, detach, move,
//! rename, destroy) update the node graph first and then re-key the
//! registry for the affected subtree in the same walk, so the registry is
//! exactly the set of attached nodes after every successful operation.
//!
//! Mutation takes `&mut Tree`, reads take `&Tree`: the borrow checker
//! enforces the single-writer / many-readers contract. There is no
//! internal locking and no I/O.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod iter;
mod node;
mod slab;
mod tree;

pub use iter::SubtreeIter;
pub use node::Node;
pub use tree::Tree;

pub use arbor_core::{is_valid_name, NodeId, Path, PathError, TreeError, SEPARATOR};
