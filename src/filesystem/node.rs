use derive_more::Display;
use hashlink::LinkedHashMap;

use super::Segment;

/// Handle of a node inside a [`Filesystem`](super::Filesystem) arena.
///
/// Handles are only meaningful for the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("#{_0}")]
pub struct NodeId(pub(super) usize);

impl NodeId {
    pub(super) const ROOT: NodeId = NodeId(0);

    pub(super) fn index(self) -> usize {
        self.0
    }
}

/// What a node is, fixed when the node is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum NodeKind {
    #[display("file")]
    File,
    #[display("folder")]
    Folder,
    /// Only created through `Filesystem::add_child`; nothing follows one yet.
    #[display("symlink")]
    Symlink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: Segment,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: LinkedHashMap<Segment, NodeId>,
}

impl Node {
    pub(super) fn root() -> Self {
        Self {
            name: Segment::default(),
            kind: NodeKind::Folder,
            parent: None,
            children: LinkedHashMap::new(),
        }
    }

    pub(super) fn new(name: Segment, kind: NodeKind, parent: NodeId) -> Self {
        Self {
            name,
            kind,
            parent: Some(parent),
            children: LinkedHashMap::new(),
        }
    }

    /// Name under the parent, empty for the root.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    /// `None` only for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn get_child(&self, segment: &str) -> Option<NodeId> {
        self.children.get(segment).copied()
    }

    /// Child handles in no particular order.
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.values().copied()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub(super) fn link_child(&mut self, name: Segment, child: NodeId) {
        self.children.insert(name, child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn root_is_an_unnamed_parentless_folder() {
        let root = Node::root();
        assert_eq!(root.name(), "");
        assert_eq!(root.parent(), None);
        assert!(root.is_folder());
        assert_eq!(root.child_count(), 0);
    }

    #[test]
    fn get_child_finds_linked_children_only() {
        let mut root = Node::root();
        root.link_child(Segment::from("docs"), NodeId(1));

        assert_eq!(root.get_child("docs"), Some(NodeId(1)));
        assert_eq!(root.get_child("Docs"), None);
        assert_eq!(root.get_child(""), None);
        assert_eq!(root.children().collect::<Vec<_>>(), vec![NodeId(1)]);
    }

    #[rstest]
    #[case(NodeKind::File, "file")]
    #[case(NodeKind::Folder, "folder")]
    #[case(NodeKind::Symlink, "symlink")]
    fn node_kind_display(#[case] kind: NodeKind, #[case] expected: &str) {
        assert_eq!(kind.to_string(), expected);
    }

    #[test]
    fn node_id_display() {
        assert_eq!(NodeId(7).to_string(), "#7");
    }
}
