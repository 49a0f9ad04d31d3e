//! Core types for the Arbor component tree.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Arbor workspace:
//! generational node handles, the [`Path`] value type with its
//! normalization and resolution algorithms, and the error enums
//! reported by path and tree operations.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod path;

pub use error::{PathError, TreeError};
pub use id::NodeId;
pub use path::{is_valid_name, Path, SEPARATOR};
