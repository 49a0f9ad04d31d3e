//! Error types for the Arbor component tree.
//!
//! Organized by subsystem: [`PathError`] for the pure path algebra,
//! [`TreeError`] for structural operations and lookups. All errors are
//! reported synchronously to the direct caller and every failure leaves
//! the tree unchanged.

use crate::id::NodeId;
use std::error::Error;
use std::fmt;

/// Errors from path parsing, normalization, and resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathError {
    /// The path string cannot be interpreted at all.
    Malformed {
        /// The offending path string.
        path: String,
        /// Human-readable description of what is wrong with it.
        reason: String,
    },
    /// Normalization popped past the root (`..` with nothing left to pop).
    EscapesRoot {
        /// The offending path string.
        path: String,
    },
    /// A relative path was resolved without the context it requires:
    /// a detached context node, or a leading `..` from a node with no parent.
    NoContext {
        /// The offending path string.
        path: String,
    },
    /// A segment is not a valid node name (empty or contains the separator).
    InvalidName {
        /// The offending segment.
        name: String,
    },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { path, reason } => {
                write!(f, "malformed path '{path}': {reason}")
            }
            Self::EscapesRoot { path } => {
                write!(f, "path '{path}' escapes above the root")
            }
            Self::NoContext { path } => {
                write!(f, "relative path '{path}' has no context to resolve against")
            }
            Self::InvalidName { name } => {
                write!(f, "invalid name '{name}'")
            }
        }
    }
}

impl Error for PathError {}

/// Errors from structural tree operations and lookups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// A node name is empty or contains the path separator.
    InvalidName {
        /// The offending name.
        name: String,
    },
    /// An add, rename, or move collides with an existing sibling name.
    DuplicateName {
        /// Absolute path of the parent whose children collide.
        parent: String,
        /// The colliding name.
        name: String,
    },
    /// A child, path, or tag-scoped lookup matched nothing.
    NotFound {
        /// The absolute path that failed to resolve.
        path: String,
    },
    /// Path parsing or resolution failed.
    InvalidPath(PathError),
    /// A move would make a node a descendant of its own subtree.
    CycleDetected {
        /// Absolute path of the node being moved.
        node: String,
        /// Absolute path of the offending destination.
        new_parent: String,
    },
    /// The operation expected a detached node but got an attached one
    /// (e.g. `add_child` or `destroy` on a node that still has a parent,
    /// or on the tree root).
    AlreadyAttached {
        /// Absolute path of the attached node.
        path: String,
    },
    /// The handle refers to a slot that was destroyed (and possibly reused).
    StaleNode {
        /// The stale handle.
        node: NodeId,
    },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName { name } => write!(f, "invalid node name '{name}'"),
            Self::DuplicateName { parent, name } => {
                write!(f, "'{parent}' already has a child named '{name}'")
            }
            Self::NotFound { path } => write!(f, "no node at '{path}'"),
            Self::InvalidPath(e) => write!(f, "invalid path: {e}"),
            Self::CycleDetected { node, new_parent } => {
                write!(f, "moving '{node}' under '{new_parent}' would create a cycle")
            }
            Self::AlreadyAttached { path } => {
                write!(f, "node '{path}' is attached")
            }
            Self::StaleNode { node } => write!(f, "stale handle {node}"),
        }
    }
}

impl Error for TreeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPath(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PathError> for TreeError {
    fn from(e: PathError) -> Self {
        Self::InvalidPath(e)
    }
}
