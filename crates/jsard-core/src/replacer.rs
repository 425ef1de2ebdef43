//! Node replacer.
//!
//! Substitutes located references with a fresh copy of the array element
//! they read. The parent decides where a child may be replaced through its
//! expression slots; a reference sitting anywhere else is reported and left
//! alone.

use crate::locator::IndexedReference;
use crate::obfuscation_array::ObfuscationArray;
use jsard_common::{Diagnostic, diagnostic_codes, diagnostic_messages, format_message};
use jsard_emitter::print_node;
use jsard_parser::{NodeArena, NodeIndex, NodeKind, SlotError, SlotName};
use thiserror::Error;
use tracing::{debug, warn};

/// Why a single reference could not be replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RewriteIssue {
    /// The parent kind has no replaceable expression slots.
    #[error("{parent} has no replaceable expression slot")]
    UnsupportedParentShape { parent: NodeKind },
    /// The parent has slots, but none of them holds the reference.
    #[error("reference is not held in an expression slot of {parent}")]
    ChildSlotMismatch { parent: NodeKind },
}

impl RewriteIssue {
    fn from_slot_error(error: SlotError, parent: NodeKind) -> RewriteIssue {
        match error {
            SlotError::UnsupportedParent { .. } => RewriteIssue::UnsupportedParentShape { parent },
            SlotError::MissingNode(_) | SlotError::ChildNotInSlot { .. } => {
                RewriteIssue::ChildSlotMismatch { parent }
            }
        }
    }

    pub fn code(self) -> u32 {
        match self {
            RewriteIssue::UnsupportedParentShape { .. } => {
                diagnostic_codes::UNSUPPORTED_PARENT_SHAPE
            }
            RewriteIssue::ChildSlotMismatch { .. } => diagnostic_codes::CHILD_SLOT_MISMATCH,
        }
    }

    pub fn parent(self) -> NodeKind {
        match self {
            RewriteIssue::UnsupportedParentShape { parent }
            | RewriteIssue::ChildSlotMismatch { parent } => parent,
        }
    }
}

/// A reference that was skipped, with enough context to report it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewriteDiagnostic {
    pub issue: RewriteIssue,
    pub reference: NodeIndex,
    /// Source span of the reference
    pub pos: u32,
    pub end: u32,
    /// The reference as printed source, e.g. `_a[0]`
    pub snippet: String,
}

impl RewriteDiagnostic {
    pub fn message(&self) -> String {
        let template = match self.issue {
            RewriteIssue::UnsupportedParentShape { .. } => {
                diagnostic_messages::UNSUPPORTED_PARENT_SHAPE
            }
            RewriteIssue::ChildSlotMismatch { .. } => diagnostic_messages::CHILD_SLOT_MISMATCH,
        };
        format_message(template, &[&self.snippet, self.issue.parent().as_str()])
    }

    pub fn to_diagnostic(&self, file: &str) -> Diagnostic {
        Diagnostic::warning(
            file,
            self.pos,
            self.end.saturating_sub(self.pos),
            self.message(),
            self.issue.code(),
        )
    }
}

/// Copying the next element would grow the arena past its node budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("copying {needed} nodes would grow the arena of {nodes} nodes past {limit}")]
pub struct ArenaBudgetExceeded {
    /// Arena size when the copy was refused
    pub nodes: usize,
    /// Size of the element that was about to be copied
    pub needed: usize,
    pub limit: usize,
}

/// Result of applying one pass worth of references.
#[derive(Debug, Default)]
pub struct ReplaceOutcome {
    pub replaced: usize,
    pub diagnostics: Vec<RewriteDiagnostic>,
}

/// Overwrite the slot holding `reference.reference` with a deep copy of
/// `element`. The copy takes the span of the reference it replaces.
///
/// The slot is resolved before anything is copied, so a failed
/// replacement leaves the arena unchanged.
pub fn replace_reference(
    arena: &mut NodeArena,
    reference: &IndexedReference,
    element: NodeIndex,
) -> Result<SlotName, RewriteIssue> {
    let parent_kind = arena.kind(reference.parent).ok_or(RewriteIssue::ChildSlotMismatch {
        parent: NodeKind::Program,
    })?;
    let slot = arena
        .find_slot(reference.parent, reference.reference)
        .map_err(|err| RewriteIssue::from_slot_error(err, parent_kind))?;
    let (pos, end) = arena
        .get(reference.reference)
        .map_or((0, 0), |node| (node.pos, node.end));
    let copy = arena.clone_subtree_at(element, pos, end);
    arena
        .set_slot(reference.parent, slot, copy)
        .map_err(|err| RewriteIssue::from_slot_error(err, parent_kind))?;
    Ok(slot)
}

/// Replace every reference in `references`. References that cannot be
/// replaced are logged and returned as diagnostics.
///
/// Fails before a copy would take the arena past `max_nodes`; the
/// references replaced up to that point stay replaced.
pub fn replace_references(
    arena: &mut NodeArena,
    array: &ObfuscationArray,
    references: &[IndexedReference],
    max_nodes: usize,
) -> Result<ReplaceOutcome, ArenaBudgetExceeded> {
    let mut outcome = ReplaceOutcome::default();
    for reference in references {
        let Some(element) = array.element(reference.index) else {
            continue;
        };
        let needed = arena.subtree_size(element);
        if arena.len().saturating_add(needed) > max_nodes {
            return Err(ArenaBudgetExceeded {
                nodes: arena.len(),
                needed,
                limit: max_nodes,
            });
        }
        match replace_reference(arena, reference, element) {
            Ok(slot) => {
                debug!(
                    reference = %reference.reference,
                    parent = %reference.parent,
                    %slot,
                    index = reference.index,
                    "replaced reference"
                );
                outcome.replaced += 1;
            }
            Err(issue) => {
                let diagnostic = rewrite_diagnostic(arena, reference.reference, issue);
                warn!(
                    snippet = %diagnostic.snippet,
                    pos = diagnostic.pos,
                    code = issue.code(),
                    "{issue}; replacement skipped"
                );
                outcome.diagnostics.push(diagnostic);
            }
        }
    }
    Ok(outcome)
}

fn rewrite_diagnostic(
    arena: &NodeArena,
    reference: NodeIndex,
    issue: RewriteIssue,
) -> RewriteDiagnostic {
    let (pos, end) = arena
        .get(reference)
        .map_or((0, 0), |node| (node.pos, node.end));
    RewriteDiagnostic {
        issue,
        reference,
        pos,
        end,
        snippet: print_node(arena, reference),
    }
}

#[cfg(test)]
#[path = "tests/replacer_tests.rs"]
mod replacer_tests;
