//! In-memory filesystem tree.
//!
//! Paths are split into [`Segment`]s and walked from a single root folder.
//! Folders own their children; every node keeps a handle to its parent.

mod node;
mod segments;
mod tree;

pub use node::{Node, NodeId, NodeKind};
pub use segments::{Segment, join, segments};
pub use tree::{Filesystem, TreeError};
