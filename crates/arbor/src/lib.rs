//! Arbor: a component tree with path addressing and tag indexing.
//!
//! This is the top-level facade crate re-exporting the public API from
//! the Arbor sub-crates. For most users, adding `arbor` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use arbor::prelude::*;
//!
//! let mut tree = Tree::new();
//! let domain = tree.spawn("domain").unwrap();
//! tree.add_child(tree.root(), domain).unwrap();
//! let mesh = tree.spawn("mesh").unwrap();
//! tree.add_child(domain, mesh).unwrap();
//! tree.add_tag(mesh, "geometry").unwrap();
//!
//! // O(1) global lookup by absolute path.
//! assert_eq!(tree.resolve("/domain/mesh").unwrap(), mesh);
//! // Relative resolution from a context node.
//! assert_eq!(tree.resolve_path(mesh, "..").unwrap(), domain);
//! // Tag queries across a subtree.
//! assert_eq!(tree.query_by_tag(tree.root(), "geometry").unwrap(), [mesh]);
//!
//! // Renaming re-keys the whole subtree in the registry.
//! tree.rename(domain, "region").unwrap();
//! assert_eq!(tree.resolve("/region/mesh").unwrap(), mesh);
//! assert!(tree.resolve("/domain/mesh").is_err());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `arbor-core` | Node handles, `Path`, error types |
//! | [`tree`] | `arbor-tree` | `Tree`, `Node`, subtree iteration |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Node handles, the `Path` value type, and error enums (`arbor-core`).
pub use arbor_core as types;

/// The component tree, its operations, and subtree iteration
/// (`arbor-tree`).
pub use arbor_tree as tree;

/// The commonly used subset of the API.
pub mod prelude {
    pub use arbor_core::{is_valid_name, NodeId, Path, PathError, TreeError, SEPARATOR};
    pub use arbor_tree::{Node, SubtreeIter, Tree};
}
