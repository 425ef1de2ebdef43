//! Obfuscation array discovery.
//!
//! The array is found by shape alone: the first `var` statement (in source
//! order) that declares a single identifier initialized with an array
//! literal. That heuristic is easy to fool with decoys, so every candidate
//! is also offered to an [`ArrayPredicate`] that may turn it down.

use crate::error::ObfuscationArrayNotFound;
use jsard_parser::parser::node::{ArrayLiteralData, NodeData, VariableDeclarationData};
use jsard_parser::{NodeArena, NodeIndex};
use tracing::{debug, trace};

/// The discovered array binding. Elements are indices into the tree the
/// array was found in; nothing is copied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObfuscationArray {
    pub name: String,
    /// The `VariableStatement` holding the declaration
    pub declaration: NodeIndex,
    /// The array literal initializer
    pub literal: NodeIndex,
    /// One entry per element, `NONE` for holes
    pub elements: Vec<NodeIndex>,
}

impl ObfuscationArray {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element at `index`, or `None` when out of range or elided.
    pub fn element(&self, index: usize) -> Option<NodeIndex> {
        self.elements.get(index).copied().filter(|idx| idx.is_some())
    }
}

/// A declaration with the obfuscation array's shape, offered to a predicate.
#[derive(Clone, Copy, Debug)]
pub struct ArrayCandidate<'a> {
    pub arena: &'a NodeArena,
    pub name: &'a str,
    pub declaration: NodeIndex,
    pub literal: &'a ArrayLiteralData,
}

impl ArrayCandidate<'_> {
    /// Number of element positions, holes included.
    pub fn element_count(&self) -> usize {
        self.literal.elements.len()
    }
}

/// Decides whether a candidate declaration is the obfuscation array.
pub trait ArrayPredicate {
    fn matches(&self, candidate: &ArrayCandidate<'_>) -> bool;
}

impl<F> ArrayPredicate for F
where
    F: Fn(&ArrayCandidate<'_>) -> bool,
{
    fn matches(&self, candidate: &ArrayCandidate<'_>) -> bool {
        self(candidate)
    }
}

/// Accepts every candidate, so the first array declaration wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl ArrayPredicate for AcceptAll {
    fn matches(&self, _candidate: &ArrayCandidate<'_>) -> bool {
        true
    }
}

/// Configurable selection criteria. The default accepts every candidate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArraySelector {
    /// Only accept an array bound to exactly this name
    pub name: Option<String>,
    /// Only accept arrays with at least this many element positions
    pub min_elements: usize,
}

impl ArraySelector {
    pub fn named(name: impl Into<String>) -> ArraySelector {
        ArraySelector {
            name: Some(name.into()),
            ..ArraySelector::default()
        }
    }
}

impl ArrayPredicate for ArraySelector {
    fn matches(&self, candidate: &ArrayCandidate<'_>) -> bool {
        if let Some(name) = &self.name
            && name != candidate.name
        {
            return false;
        }
        candidate.element_count() >= self.min_elements
    }
}

/// Find the obfuscation array: the first candidate declaration in
/// pre-order that `predicate` accepts.
pub fn scan_obfuscation_array<P>(
    arena: &NodeArena,
    root: NodeIndex,
    predicate: &P,
) -> Result<ObfuscationArray, ObfuscationArrayNotFound>
where
    P: ArrayPredicate + ?Sized,
{
    let mut found = None;
    let mut rejected = 0;

    arena.walk_preorder(root, |idx, node| {
        if found.is_some() {
            return false;
        }
        let Some(candidate) = candidate_at(arena, idx, &node.data) else {
            return true;
        };
        if !predicate.matches(&candidate) {
            trace!(name = candidate.name, "array candidate rejected");
            rejected += 1;
            return true;
        }
        found = Some(ObfuscationArray {
            name: candidate.name.to_string(),
            declaration: idx,
            literal: declaration_initializer(arena, &node.data).unwrap_or(NodeIndex::NONE),
            elements: candidate.literal.elements.nodes.clone(),
        });
        false
    });

    match found {
        Some(array) => {
            debug!(name = %array.name, elements = array.len(), "obfuscation array found");
            Ok(array)
        }
        None => {
            debug!(rejected, "no obfuscation array");
            Err(ObfuscationArrayNotFound { rejected })
        }
    }
}

/// `var name = [...]` with exactly one declarator.
fn candidate_at<'a>(
    arena: &'a NodeArena,
    idx: NodeIndex,
    data: &'a NodeData,
) -> Option<ArrayCandidate<'a>> {
    let decl = single_declaration(arena, data)?;
    let name = arena.identifier_text(decl.name)?;
    let Some(NodeData::ArrayLiteralExpression(literal)) =
        arena.get(decl.initializer).map(|node| &node.data)
    else {
        return None;
    };
    Some(ArrayCandidate {
        arena,
        name,
        declaration: idx,
        literal,
    })
}

fn single_declaration<'a>(
    arena: &'a NodeArena,
    data: &NodeData,
) -> Option<&'a VariableDeclarationData> {
    let NodeData::VariableStatement(var) = data else {
        return None;
    };
    if var.declarations.len() != 1 {
        return None;
    }
    match arena.get(var.declarations.nodes[0]).map(|node| &node.data) {
        Some(NodeData::VariableDeclaration(decl)) => Some(decl),
        _ => None,
    }
}

fn declaration_initializer(arena: &NodeArena, data: &NodeData) -> Option<NodeIndex> {
    single_declaration(arena, data).map(|decl| decl.initializer)
}

#[cfg(test)]
#[path = "tests/obfuscation_array_tests.rs"]
mod obfuscation_array_tests;
