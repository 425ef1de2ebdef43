//! Reference locator.
//!
//! Finds every `name[<integer literal>]` lookup into the obfuscation array,
//! together with the parent holding it. The result is a snapshot: the tree
//! is not touched, and a later rewrite invalidates it.

use crate::obfuscation_array::ObfuscationArray;
use jsard_parser::parser::node::NodeData;
use jsard_parser::{NodeArena, NodeIndex};
use rustc_hash::FxHashSet;
use tracing::trace;

/// One indexed lookup into the obfuscation array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexedReference {
    pub parent: NodeIndex,
    /// The `ElementAccessExpression` node
    pub reference: NodeIndex,
    /// Position in the array being read
    pub index: usize,
}

/// All references to `array` reachable from `root`, in pre-order.
///
/// References listed in `skip` are left out. An index that is computed,
/// a string, fractional, out of range or addresses a hole is not a
/// reference.
pub fn locate_references(
    arena: &NodeArena,
    root: NodeIndex,
    array: &ObfuscationArray,
    skip: &FxHashSet<NodeIndex>,
) -> Vec<IndexedReference> {
    let mut references = Vec::new();
    arena.walk_preorder(root, |parent, node| {
        node.data.for_each_child(|child| {
            if skip.contains(&child) {
                return;
            }
            if let Some(index) = reference_index(arena, child, array) {
                references.push(IndexedReference {
                    parent,
                    reference: child,
                    index,
                });
            }
        });
        true
    });
    trace!(count = references.len(), skipped = skip.len(), "located references");
    references
}

/// Array position read by `idx`, if it is a literal lookup into `array`.
pub fn reference_index(arena: &NodeArena, idx: NodeIndex, array: &ObfuscationArray) -> Option<usize> {
    let NodeData::ElementAccessExpression(access) = &arena.get(idx)?.data else {
        return None;
    };
    if arena.identifier_text(access.object)? != array.name {
        return None;
    }
    let NodeData::NumericLiteral(literal) = &arena.get(access.index)?.data else {
        return None;
    };
    let index = literal.as_index()?;
    array.element(index).map(|_| index)
}

#[cfg(test)]
#[path = "tests/locator_tests.rs"]
mod locator_tests;
