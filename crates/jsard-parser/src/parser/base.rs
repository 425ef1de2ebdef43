//! Shared base types for the arena AST.

use std::fmt;

/// Index of a node in a [`NodeArena`](super::NodeArena).
///
/// Indices are the identity of a node: two structurally equal
/// subtrees at different positions always have different indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Absent optional child (missing initializer, array hole, ...).
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == NodeIndex::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self != NodeIndex::NONE
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("#none")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Ordered list of child nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeList {
    pub nodes: Vec<NodeIndex>,
}

impl NodeList {
    pub fn new() -> NodeList {
        NodeList { nodes: Vec::new() }
    }

    pub fn with_nodes(nodes: Vec<NodeIndex>) -> NodeList {
        NodeList { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.nodes.iter().copied()
    }
}
