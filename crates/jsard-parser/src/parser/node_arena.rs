//! Arena storage for AST nodes.
//!
//! Nodes are appended and never removed. Replacing a subtree means
//! re-pointing a parent's child slot at a different index; the old subtree
//! stays in the arena, unreachable from the root.

use super::base::NodeIndex;
use super::node::{IdentifierData, Node, NodeData, NodeKind};

#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Maximum pre-allocation to avoid capacity overflow in huge files.
    const MAX_NODE_PREALLOC: usize = 5_000_000;

    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity.min(Self::MAX_NODE_PREALLOC)),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node and return its index.
    pub fn add(&mut self, pos: u32, end: u32, data: NodeData) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node::new(pos, end, data));
        index
    }

    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<NodeKind> {
        self.get(index).map(Node::kind)
    }

    #[inline]
    pub fn get_identifier(&self, index: NodeIndex) -> Option<&IdentifierData> {
        match &self.get(index)?.data {
            NodeData::Identifier(ident) => Some(ident),
            _ => None,
        }
    }

    /// Text of an identifier node.
    #[inline]
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        self.get_identifier(index).map(|ident| ident.escaped_text.as_str())
    }

    /// Direct children of a node in source order. Holes are skipped.
    pub fn get_children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut children = Vec::new();
        if let Some(node) = self.get(index) {
            node.data.for_each_child(|child| children.push(child));
        }
        children
    }

    /// Pre-order traversal from `root`. The callback returns `false` to
    /// skip a node's descendants.
    pub fn walk_preorder(&self, root: NodeIndex, mut visit: impl FnMut(NodeIndex, &Node) -> bool) {
        let mut stack = vec![root];
        let mut children = Vec::new();
        while let Some(index) = stack.pop() {
            let Some(node) = self.get(index) else {
                continue;
            };
            if !visit(index, node) {
                continue;
            }
            children.clear();
            node.data.for_each_child(|child| children.push(child));
            stack.extend(children.iter().rev());
        }
    }

    /// Deep-copy the subtree rooted at `index` into fresh arena slots.
    ///
    /// The copy shares no indices with the original, so later in-place
    /// rewrites of either tree never show through the other.
    pub fn clone_subtree(&mut self, index: NodeIndex) -> NodeIndex {
        self.clone_subtree_with_span(index, None)
    }

    /// Like [`clone_subtree`](Self::clone_subtree), but every copied node
    /// gets the span `pos..end`, so the copy reports positions at the
    /// place it was inserted.
    pub fn clone_subtree_at(&mut self, index: NodeIndex, pos: u32, end: u32) -> NodeIndex {
        self.clone_subtree_with_span(index, Some((pos, end)))
    }

    /// Post-order copy with an explicit work stack; binary chains are
    /// arbitrarily deep on their left spine.
    fn clone_subtree_with_span(
        &mut self,
        index: NodeIndex,
        span: Option<(u32, u32)>,
    ) -> NodeIndex {
        // (original, children already copied)
        let mut work = vec![(index, false)];
        // Copies of finished nodes, children before their parent
        let mut copied: Vec<NodeIndex> = Vec::new();

        while let Some((original, expanded)) = work.pop() {
            let Some(node) = self.get(original) else {
                copied.push(NodeIndex::NONE);
                continue;
            };

            if !expanded {
                work.push((original, true));
                let first_child = work.len();
                node.data.for_each_child(|child| work.push((child, false)));
                work[first_child..].reverse();
                continue;
            }

            let mut copy = node.clone();
            let mut child_count = 0;
            copy.data.for_each_child(|_| child_count += 1);
            let first = copied.len().saturating_sub(child_count);
            let mut children = copied.split_off(first).into_iter();
            copy.data
                .map_children(|_| children.next().unwrap_or(NodeIndex::NONE));

            let (pos, end) = span.unwrap_or((copy.pos, copy.end));
            let new_index = self.add(pos, end, copy.data);
            copied.push(new_index);
        }

        copied.pop().unwrap_or(NodeIndex::NONE)
    }

    /// Number of nodes reachable from `root`, including `root`.
    pub fn subtree_size(&self, root: NodeIndex) -> usize {
        let mut count = 0;
        self.walk_preorder(root, |_, _| {
            count += 1;
            true
        });
        count
    }
}

#[cfg(test)]
#[path = "tests/node_arena_tests.rs"]
mod node_arena_tests;
