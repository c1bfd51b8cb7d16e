use std::ops::Index;

use snafu::{Snafu, ensure};
use tracing::{debug, trace};

use super::node::{Node, NodeId, NodeKind};
use super::segments::{self, Segment};

/// In-memory namespace rooted at a single folder.
///
/// Nodes live in an arena and refer to each other through [`NodeId`]s, so a
/// child's parent link is a plain handle rather than a shared pointer. Nothing
/// is ever removed, which keeps every handle valid for the life of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filesystem {
    nodes: Vec<Node>,
}

impl Default for Filesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::root()],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Looks up a handle, returning `None` for one this tree never produced.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree. Use [`Filesystem::get`]
    /// for handles of unknown origin.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True while the root has no children.
    pub fn is_empty(&self) -> bool {
        self.node(self.root()).child_count() == 0
    }

    /// Creates a folder at `path`, along with any missing folders leading to it.
    ///
    /// Asking for a folder that already exists fails with
    /// [`TreeError::AlreadyExists`], which carries the existing node. The root
    /// path resolves to the root itself.
    pub fn mkdir(&mut self, path: &str) -> Result<NodeId, TreeError> {
        let segments = segments::segments(path);
        debug!("mkdir {path:?} ({} segments)", segments.len());
        self.mkdir_recursive(&segments)
    }

    /// Creates an empty file at `path`, creating missing parent folders.
    pub fn touch(&mut self, path: &str) -> Result<NodeId, TreeError> {
        let segments = segments::segments(path);
        debug!("touch {path:?} ({} segments)", segments.len());

        let Some((file_name, parents)) = segments.split_last() else {
            return NoPathGivenSnafu.fail();
        };

        let parent = match self.mkdir_recursive(parents) {
            Ok(parent) => parent,
            Err(TreeError::AlreadyExists { existing, .. }) => existing,
            Err(e) => return Err(e),
        };

        self.touch_in(parent, file_name)
    }

    /// Lists the immediate children of the node at `path`, in no particular
    /// order.
    ///
    /// A missing segment is reported as [`TreeError::NotTraversable`], the same
    /// as walking through a file.
    pub fn list(&self, path: &str) -> Result<Vec<NodeId>, TreeError> {
        let segments = segments::segments(path);
        let target = self.resolve(&segments)?;
        Ok(self.node(target).children().collect())
    }

    /// Follows `segments` from the root without creating anything.
    pub fn resolve(&self, segments: &[Segment]) -> Result<NodeId, TreeError> {
        segments.iter().try_fold(self.root(), |current, segment| {
            let node = self.node(current);
            ensure!(
                node.is_folder(),
                NotTraversableSnafu {
                    name: node.name().to_string()
                }
            );
            trace!("resolving {segment:?} under {current}");
            node.get_child(segment).ok_or_else(|| TreeError::NotTraversable {
                name: segment.to_string(),
            })
        })
    }

    /// Absolute path of a node, rebuilt from its parent links.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    pub fn path_of(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.node(id);
            if node.parent().is_some() {
                names.push(Segment::from(node.name()));
            }
            current = node.parent();
        }
        names.reverse();
        segments::join(&names)
    }

    /// Walks `segments` from the root, creating every missing folder.
    ///
    /// Existing intermediate folders are reused. Only the last segment turns
    /// an existing entry into an error.
    fn mkdir_recursive(&mut self, segments: &[Segment]) -> Result<NodeId, TreeError> {
        let last = segments.len().saturating_sub(1);
        let mut active = self.root();

        for (index, segment) in segments.iter().enumerate() {
            active = match self.mkdir_in(active, segment) {
                Ok(child) => child,
                Err(TreeError::AlreadyExists { existing, .. }) if index != last => {
                    trace!("reusing existing {segment:?} at {existing}");
                    existing
                }
                Err(e) => return Err(e),
            };
        }

        Ok(active)
    }

    /// Creates a folder directly under `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not produced by this tree.
    pub fn mkdir_in(&mut self, parent: NodeId, segment: &Segment) -> Result<NodeId, TreeError> {
        self.ensure_traversable(parent)?;
        self.add_child(parent, segment, NodeKind::Folder)
    }

    /// Creates a file directly under `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not produced by this tree.
    pub fn touch_in(&mut self, parent: NodeId, segment: &Segment) -> Result<NodeId, TreeError> {
        self.ensure_traversable(parent)?;
        self.add_child(parent, segment, NodeKind::File)
    }

    fn ensure_traversable(&self, id: NodeId) -> Result<(), TreeError> {
        let node = self.node(id);
        ensure!(
            node.is_folder(),
            NotTraversableSnafu {
                name: node.name().to_string()
            }
        );
        Ok(())
    }

    /// Links a new `kind` node named `segment` under `parent`.
    ///
    /// The existence check runs before name validation, so an existing child
    /// is always reported together with its handle.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not produced by this tree.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        segment: &Segment,
        kind: NodeKind,
    ) -> Result<NodeId, TreeError> {
        if let Some(existing) = self.node(parent).get_child(segment) {
            return AlreadyExistsSnafu {
                name: segment.to_string(),
                existing,
            }
            .fail();
        }
        ensure!(!segment.is_empty(), InvalidNameSnafu);

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(segment.clone(), kind, parent));
        self.nodes[parent.index()].link_child(segment.clone(), id);
        debug!("created {kind} {segment:?} as {id} under {parent}");

        Ok(id)
    }
}

impl Index<NodeId> for Filesystem {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Self::Output {
        self.node(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum TreeError {
    #[snafu(display("Cannot traverse through '{}'", name))]
    NotTraversable { name: String },
    #[snafu(display("'{}' already exists", name))]
    AlreadyExists { name: String, existing: NodeId },
    #[snafu(display("Empty names are not allowed"))]
    InvalidName,
    #[snafu(display("No path given"))]
    NoPathGiven,
}
