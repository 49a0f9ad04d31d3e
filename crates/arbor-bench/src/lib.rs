//! Shared tree builders for the Arbor benchmarks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use arbor_core::NodeId;
use arbor_tree::Tree;

/// Build a chain of `depth` nodes under the root: `/n0/n1/.../n{depth-1}`.
///
/// Returns the tree and the deepest node's handle.
pub fn deep_tree(depth: usize) -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let mut cursor = tree.root();
    for i in 0..depth {
        let id = tree
            .spawn(&format!("n{i}"))
            .and_then(|id| tree.add_child(cursor, id).map(|()| id))
            .unwrap_or_else(|e| panic!("building depth {i}: {e}"));
        cursor = id;
    }
    (tree, cursor)
}

/// Build a two-level tree with `width` children of the root, each with
/// `width` children of its own. Every leaf carries the `"leaf"` tag.
pub fn wide_tree(width: usize) -> Tree {
    let mut tree = Tree::new();
    for i in 0..width {
        let mid = tree.spawn(&format!("g{i}")).unwrap_or_else(|e| panic!("{e}"));
        tree.add_child(tree.root(), mid)
            .unwrap_or_else(|e| panic!("{e}"));
        for j in 0..width {
            let leaf = tree
                .spawn(&format!("c{j}"))
                .unwrap_or_else(|e| panic!("{e}"));
            tree.add_child(mid, leaf).unwrap_or_else(|e| panic!("{e}"));
            tree.add_tag(leaf, "leaf").unwrap_or_else(|e| panic!("{e}"));
        }
    }
    tree
}
