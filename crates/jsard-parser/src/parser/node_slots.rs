//! Expression slot capability.
//!
//! Each node payload declares the named child positions that hold a
//! substitutable expression. A slot is identified by its [`SlotName`], read
//! through [`ExpressionSlots::slots`] and overwritten through
//! [`ExpressionSlots::slot_mut`]. Payloads that declare no slots cannot have
//! a child expression replaced.
//!
//! Assignment targets and the operands of `delete`, `++` and `--` are
//! references, not values, and are never exposed as slots.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::node_arena::NodeArena;
use smallvec::SmallVec;
use std::fmt;

/// Named position of a child expression within its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotName {
    Expression,
    Initializer,
    Value,
    Left,
    Right,
    Condition,
    WhenTrue,
    WhenFalse,
    Object,
    Index,
    Callee,
    Operand,
    Discriminant,
    Test,
    Incrementor,
    /// Position in an array literal's element list
    Element(u32),
    /// Position in a call or `new` argument list
    Argument(u32),
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotName::Expression => f.write_str("expression"),
            SlotName::Initializer => f.write_str("initializer"),
            SlotName::Value => f.write_str("value"),
            SlotName::Left => f.write_str("left"),
            SlotName::Right => f.write_str("right"),
            SlotName::Condition => f.write_str("condition"),
            SlotName::WhenTrue => f.write_str("whenTrue"),
            SlotName::WhenFalse => f.write_str("whenFalse"),
            SlotName::Object => f.write_str("object"),
            SlotName::Index => f.write_str("index"),
            SlotName::Callee => f.write_str("callee"),
            SlotName::Operand => f.write_str("operand"),
            SlotName::Discriminant => f.write_str("discriminant"),
            SlotName::Test => f.write_str("test"),
            SlotName::Incrementor => f.write_str("incrementor"),
            SlotName::Element(i) => write!(f, "elements[{i}]"),
            SlotName::Argument(i) => write!(f, "arguments[{i}]"),
        }
    }
}

pub type SlotVec = SmallVec<[(SlotName, NodeIndex); 4]>;

/// Child positions of a node that may hold a replaceable expression.
pub trait ExpressionSlots {
    /// Occupied slots in source order.
    fn slots(&self) -> SlotVec;

    /// Mutable access to one slot, or `None` if this node has no such slot.
    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    #[error("node {0} does not exist")]
    MissingNode(NodeIndex),
    #[error("{kind} has no replaceable expression slots")]
    UnsupportedParent { kind: NodeKind },
    #[error("{child} is not held in any expression slot of {parent_kind}")]
    ChildNotInSlot {
        parent_kind: NodeKind,
        child: NodeIndex,
    },
}

fn push(slots: &mut SlotVec, name: SlotName, index: NodeIndex) {
    if index.is_some() {
        slots.push((name, index));
    }
}

fn push_list(slots: &mut SlotVec, list: &NodeList, name: fn(u32) -> SlotName) {
    for (i, index) in list.iter().enumerate() {
        push(slots, name(i as u32), index);
    }
}

fn list_slot_mut(list: &mut NodeList, i: u32) -> Option<&mut NodeIndex> {
    list.nodes.get_mut(i as usize).filter(|index| index.is_some())
}

impl ExpressionSlots for VariableDeclarationData {
    fn slots(&self) -> SlotVec {
        let mut slots = SlotVec::new();
        push(&mut slots, SlotName::Initializer, self.initializer);
        slots
    }

    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex> {
        match name {
            SlotName::Initializer => Some(&mut self.initializer),
            _ => None,
        }
    }
}

impl ExpressionSlots for ExpressionStatementData {
    fn slots(&self) -> SlotVec {
        let mut slots = SlotVec::new();
        push(&mut slots, SlotName::Expression, self.expression);
        slots
    }

    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex> {
        match name {
            SlotName::Expression => Some(&mut self.expression),
            _ => None,
        }
    }
}

impl ExpressionSlots for IfStatementData {
    fn slots(&self) -> SlotVec {
        let mut slots = SlotVec::new();
        push(&mut slots, SlotName::Condition, self.condition);
        slots
    }

    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex> {
        match name {
            SlotName::Condition => Some(&mut self.condition),
            _ => None,
        }
    }
}

impl ExpressionSlots for LoopData {
    fn slots(&self) -> SlotVec {
        let mut slots = SlotVec::new();
        push(&mut slots, SlotName::Condition, self.condition);
        slots
    }

    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex> {
        match name {
            SlotName::Condition => Some(&mut self.condition),
            _ => None,
        }
    }
}

impl ExpressionSlots for ForStatementData {
    fn slots(&self) -> SlotVec {
        let mut slots = SlotVec::new();
        push(&mut slots, SlotName::Initializer, self.initializer);
        push(&mut slots, SlotName::Condition, self.condition);
        push(&mut slots, SlotName::Incrementor, self.incrementor);
        slots
    }

    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex> {
        match name {
            SlotName::Initializer => Some(&mut self.initializer),
            SlotName::Condition => Some(&mut self.condition),
            SlotName::Incrementor => Some(&mut self.incrementor),
            _ => None,
        }
    }
}

impl ExpressionSlots for ForInStatementData {
    fn slots(&self) -> SlotVec {
        let mut slots = SlotVec::new();
        push(&mut slots, SlotName::Object, self.object);
        slots
    }

    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex> {
        match name {
            SlotName::Object => Some(&mut self.object),
            _ => None,
        }
    }
}

impl ExpressionSlots for WithStatementData {
    fn slots(&self) -> SlotVec {
        let mut slots = SlotVec::new();
        push(&mut slots, SlotName::Object, self.object);
        slots
    }

    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex> {
        match name {
            SlotName::Object => Some(&mut self.object),
            _ => None,
        }
    }
}

impl ExpressionSlots for SwitchStatementData {
    fn slots(&self) -> SlotVec {
        let mut slots = SlotVec::new();
        push(&mut slots, SlotName::Discriminant, self.discriminant);
        slots
    }

    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex> {
        match name {
            SlotName::Discriminant => Some(&mut self.discriminant),
            _ => None,
        }
    }
}

impl ExpressionSlots for CaseClauseData {
    fn slots(&self) -> SlotVec {
        let mut slots = SlotVec::new();
        push(&mut slots, SlotName::Test, self.test);
        slots
    }

    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex> {
        match name {
            SlotName::Test if self.test.is_some() => Some(&mut self.test),
            _ => None,
        }
    }
}

impl ExpressionSlots for ArrayLiteralData {
    fn slots(&self) -> SlotVec {
        let mut slots = SlotVec::new();
        push_list(&mut slots, &self.elements, SlotName::Element);
        slots
    }

    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex> {
        match name {
            SlotName::Element(i) => list_slot_mut(&mut self.elements, i),
            _ => None,
        }
    }
}

impl ExpressionSlots for PropertyAssignmentData {
    fn slots(&self) -> SlotVec {
        let mut slots = SlotVec::new();
        push(&mut slots, SlotName::Value, self.value);
        slots
    }

    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex> {
        match name {
            SlotName::Value => Some(&mut self.value),
            _ => None,
        }
    }
}

impl ExpressionSlots for PropertyAccessData {
    fn slots(&self) -> SlotVec {
        let mut slots = SlotVec::new();
        push(&mut slots, SlotName::Object, self.object);
        slots
    }

    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex> {
        match name {
            SlotName::Object => Some(&mut self.object),
            _ => None,
        }
    }
}

impl ExpressionSlots for ElementAccessData {
    fn slots(&self) -> SlotVec {
        let mut slots = SlotVec::new();
        push(&mut slots, SlotName::Object, self.object);
        push(&mut slots, SlotName::Index, self.index);
        slots
    }

    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex> {
        match name {
            SlotName::Object => Some(&mut self.object),
            SlotName::Index => Some(&mut self.index),
            _ => None,
        }
    }
}

impl ExpressionSlots for CallData {
    fn slots(&self) -> SlotVec {
        let mut slots = SlotVec::new();
        push(&mut slots, SlotName::Callee, self.callee);
        push_list(&mut slots, &self.arguments, SlotName::Argument);
        slots
    }

    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex> {
        match name {
            SlotName::Callee => Some(&mut self.callee),
            SlotName::Argument(i) => list_slot_mut(&mut self.arguments, i),
            _ => None,
        }
    }
}

impl ExpressionSlots for NewData {
    fn slots(&self) -> SlotVec {
        let mut slots = SlotVec::new();
        push(&mut slots, SlotName::Callee, self.callee);
        if let Some(arguments) = &self.arguments {
            push_list(&mut slots, arguments, SlotName::Argument);
        }
        slots
    }

    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex> {
        match name {
            SlotName::Callee => Some(&mut self.callee),
            SlotName::Argument(i) => list_slot_mut(self.arguments.as_mut()?, i),
            _ => None,
        }
    }
}

/// Prefix operators only. Postfix payloads never reach this impl.
impl ExpressionSlots for UnaryData {
    fn slots(&self) -> SlotVec {
        let mut slots = SlotVec::new();
        if !self.requires_reference() {
            push(&mut slots, SlotName::Operand, self.operand);
        }
        slots
    }

    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex> {
        match name {
            SlotName::Operand if !self.requires_reference() => Some(&mut self.operand),
            _ => None,
        }
    }
}

impl ExpressionSlots for BinaryData {
    fn slots(&self) -> SlotVec {
        let mut slots = SlotVec::new();
        push(&mut slots, SlotName::Left, self.left);
        push(&mut slots, SlotName::Right, self.right);
        slots
    }

    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex> {
        match name {
            SlotName::Left => Some(&mut self.left),
            SlotName::Right => Some(&mut self.right),
            _ => None,
        }
    }
}

impl ExpressionSlots for AssignmentData {
    fn slots(&self) -> SlotVec {
        let mut slots = SlotVec::new();
        push(&mut slots, SlotName::Value, self.value);
        slots
    }

    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex> {
        match name {
            SlotName::Value => Some(&mut self.value),
            _ => None,
        }
    }
}

impl ExpressionSlots for ConditionalData {
    fn slots(&self) -> SlotVec {
        let mut slots = SlotVec::new();
        push(&mut slots, SlotName::Condition, self.condition);
        push(&mut slots, SlotName::WhenTrue, self.when_true);
        push(&mut slots, SlotName::WhenFalse, self.when_false);
        slots
    }

    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex> {
        match name {
            SlotName::Condition => Some(&mut self.condition),
            SlotName::WhenTrue => Some(&mut self.when_true),
            SlotName::WhenFalse => Some(&mut self.when_false),
            _ => None,
        }
    }
}

impl ExpressionSlots for NodeData {
    fn slots(&self) -> SlotVec {
        match self {
            NodeData::VariableDeclaration(data) => data.slots(),
            NodeData::ExpressionStatement(data)
            | NodeData::ReturnStatement(data)
            | NodeData::ThrowStatement(data) => data.slots(),
            NodeData::IfStatement(data) => data.slots(),
            NodeData::DoStatement(data) | NodeData::WhileStatement(data) => data.slots(),
            NodeData::ForStatement(data) => data.slots(),
            NodeData::ForInStatement(data) => data.slots(),
            NodeData::WithStatement(data) => data.slots(),
            NodeData::SwitchStatement(data) => data.slots(),
            NodeData::CaseClause(data) => data.slots(),
            NodeData::ArrayLiteralExpression(data) => data.slots(),
            NodeData::PropertyAssignment(data) => data.slots(),
            NodeData::PropertyAccessExpression(data) => data.slots(),
            NodeData::ElementAccessExpression(data) => data.slots(),
            NodeData::CallExpression(data) => data.slots(),
            NodeData::NewExpression(data) => data.slots(),
            NodeData::PrefixUnaryExpression(data) => data.slots(),
            NodeData::BinaryExpression(data) => data.slots(),
            NodeData::AssignmentExpression(data) => data.slots(),
            NodeData::ConditionalExpression(data) => data.slots(),
            _ => SlotVec::new(),
        }
    }

    fn slot_mut(&mut self, name: SlotName) -> Option<&mut NodeIndex> {
        match self {
            NodeData::VariableDeclaration(data) => data.slot_mut(name),
            NodeData::ExpressionStatement(data)
            | NodeData::ReturnStatement(data)
            | NodeData::ThrowStatement(data) => data.slot_mut(name),
            NodeData::IfStatement(data) => data.slot_mut(name),
            NodeData::DoStatement(data) | NodeData::WhileStatement(data) => data.slot_mut(name),
            NodeData::ForStatement(data) => data.slot_mut(name),
            NodeData::ForInStatement(data) => data.slot_mut(name),
            NodeData::WithStatement(data) => data.slot_mut(name),
            NodeData::SwitchStatement(data) => data.slot_mut(name),
            NodeData::CaseClause(data) => data.slot_mut(name),
            NodeData::ArrayLiteralExpression(data) => data.slot_mut(name),
            NodeData::PropertyAssignment(data) => data.slot_mut(name),
            NodeData::PropertyAccessExpression(data) => data.slot_mut(name),
            NodeData::ElementAccessExpression(data) => data.slot_mut(name),
            NodeData::CallExpression(data) => data.slot_mut(name),
            NodeData::NewExpression(data) => data.slot_mut(name),
            NodeData::PrefixUnaryExpression(data) => data.slot_mut(name),
            NodeData::BinaryExpression(data) => data.slot_mut(name),
            NodeData::AssignmentExpression(data) => data.slot_mut(name),
            NodeData::ConditionalExpression(data) => data.slot_mut(name),
            _ => None,
        }
    }
}

// =============================================================================
// Arena helpers
// =============================================================================

impl NodeArena {
    /// Occupied expression slots of `parent`.
    pub fn expression_slots(&self, parent: NodeIndex) -> Result<SlotVec, SlotError> {
        let node = self.get(parent).ok_or(SlotError::MissingNode(parent))?;
        Ok(node.data.slots())
    }

    /// Name of the slot in `parent` that holds exactly `child`.
    ///
    /// Matching is by index, never by structure: two equal-looking
    /// subtrees in the same parent resolve to their own slots.
    pub fn find_slot(&self, parent: NodeIndex, child: NodeIndex) -> Result<SlotName, SlotError> {
        let node = self.get(parent).ok_or(SlotError::MissingNode(parent))?;
        let slots = node.data.slots();
        if slots.is_empty() {
            return Err(SlotError::UnsupportedParent { kind: node.kind() });
        }
        slots
            .iter()
            .find(|(_, index)| *index == child)
            .map(|(name, _)| *name)
            .ok_or(SlotError::ChildNotInSlot {
                parent_kind: node.kind(),
                child,
            })
    }

    /// Point slot `name` of `parent` at `value`. Returns the previous child.
    pub fn set_slot(
        &mut self,
        parent: NodeIndex,
        name: SlotName,
        value: NodeIndex,
    ) -> Result<NodeIndex, SlotError> {
        let node = self
            .get_mut(parent)
            .ok_or(SlotError::MissingNode(parent))?;
        let kind = node.kind();
        let slot = node
            .data
            .slot_mut(name)
            .ok_or(SlotError::UnsupportedParent { kind })?;
        Ok(std::mem::replace(slot, value))
    }

    /// Replace the expression `child` of `parent` with `value`.
    pub fn replace_child(
        &mut self,
        parent: NodeIndex,
        child: NodeIndex,
        value: NodeIndex,
    ) -> Result<SlotName, SlotError> {
        let name = self.find_slot(parent, child)?;
        self.set_slot(parent, name, value)?;
        Ok(name)
    }
}
