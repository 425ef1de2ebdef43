//! Expression printing and parenthesization.
//!
//! Every child is printed with the minimum precedence its position
//! requires; a child that binds more loosely gets parentheses.

use super::Printer;
use jsard_parser::parser::node::*;
use jsard_parser::parser::precedence::{self, binary_operator_precedence, expression_precedence};
use jsard_parser::NodeIndex;
use jsard_scanner::{SyntaxKind, token_is_keyword, token_to_text};

impl<'a> Printer<'a> {
    /// Print `idx`, wrapped in parentheses if it binds looser than
    /// `min_precedence`.
    pub(super) fn emit_expression(&mut self, idx: NodeIndex, min_precedence: u8) {
        let Some(node) = self.arena.get(idx) else {
            return;
        };
        let needs_parens = expression_precedence(&node.data) < min_precedence
            || idx == self.statement_leftmost
            || (self.no_in && is_in_operator(&node.data));

        if needs_parens {
            let saved_no_in = std::mem::replace(&mut self.no_in, false);
            self.write_char('(');
            self.emit_expression_worker(idx, &node.data);
            self.write_char(')');
            self.no_in = saved_no_in;
        } else {
            self.emit_expression_worker(idx, &node.data);
        }
    }

    /// Operand of `,` or an element, argument or initializer.
    pub(super) fn emit_assignment_operand(&mut self, idx: NodeIndex) {
        self.emit_expression(idx, precedence::ASSIGNMENT);
    }

    fn emit_expression_worker(&mut self, idx: NodeIndex, data: &NodeData) {
        match data {
            NodeData::Identifier(ident) => self.write(&ident.escaped_text),
            NodeData::StringLiteral(_)
            | NodeData::NumericLiteral(_)
            | NodeData::RegularExpressionLiteral(_)
            | NodeData::BooleanLiteral(_)
            | NodeData::NullLiteral
            | NodeData::ThisKeyword => self.emit_literal(data),
            NodeData::ArrayLiteralExpression(array) => self.emit_array_literal(array),
            NodeData::ObjectLiteralExpression(object) => self.emit_object_literal(object),
            NodeData::FunctionExpression(func) => self.emit_function(func),
            NodeData::PropertyAccessExpression(access) => {
                self.emit_member_object(access.object);
                self.write_char('.');
                self.emit_identifier(access.name);
            }
            NodeData::ElementAccessExpression(access) => {
                self.emit_member_object(access.object);
                self.write_char('[');
                self.emit_expression(access.index, precedence::COMMA);
                self.write_char(']');
            }
            NodeData::CallExpression(call) => {
                self.emit_member_object(call.callee);
                self.write_char('(');
                self.emit_comma_list(&call.arguments);
                self.write_char(')');
            }
            NodeData::NewExpression(new) => self.emit_new_expression(new),
            NodeData::PrefixUnaryExpression(unary) => self.emit_prefix_unary(unary),
            NodeData::PostfixUnaryExpression(unary) => {
                self.emit_expression(unary.operand, precedence::LEFT_HAND_SIDE);
                self.write(token_to_text(unary.operator));
            }
            NodeData::BinaryExpression(_) => self.emit_binary_chain(idx),
            NodeData::AssignmentExpression(assign) => {
                self.emit_expression(assign.target, precedence::LEFT_HAND_SIDE);
                self.write_space();
                self.write(token_to_text(assign.operator));
                self.write_space();
                self.emit_assignment_operand(assign.value);
            }
            NodeData::ConditionalExpression(cond) => {
                self.emit_expression(cond.condition, precedence::LOGICAL_OR);
                self.write(" ? ");
                self.emit_assignment_operand(cond.when_true);
                self.write(" : ");
                self.emit_assignment_operand(cond.when_false);
            }
            NodeData::PropertyAssignment(_) | NodeData::Accessor(_) => {
                self.emit_object_member(data)
            }
            _ => self.emit_statement(idx),
        }
    }

    /// Object of a member access or callee of a call.
    fn emit_member_object(&mut self, idx: NodeIndex) {
        let Some(node) = self.arena.get(idx) else {
            return;
        };
        // `(new C).x` and `(5).x` differ from `new C.x` and `5.x`
        let force = match &node.data {
            NodeData::NewExpression(new) => new.arguments.is_none(),
            NodeData::NumericLiteral(num) => num.raw.bytes().all(|b| b.is_ascii_digit()),
            _ => false,
        };
        if force {
            self.write_char('(');
            self.emit_expression(idx, precedence::COMMA);
            self.write_char(')');
        } else {
            self.emit_expression(idx, precedence::LEFT_HAND_SIDE);
        }
    }

    fn emit_new_expression(&mut self, new: &NewData) {
        self.write("new ");
        // A call anywhere in the callee's member chain would take the
        // argument list: `new (f().g)()`
        if self.member_chain_contains_call(new.callee) {
            self.write_char('(');
            self.emit_expression(new.callee, precedence::COMMA);
            self.write_char(')');
        } else {
            self.emit_expression(new.callee, precedence::MEMBER);
        }
        if let Some(arguments) = &new.arguments {
            self.write_char('(');
            self.emit_comma_list(arguments);
            self.write_char(')');
        }
    }

    fn member_chain_contains_call(&self, mut idx: NodeIndex) -> bool {
        while let Some(node) = self.arena.get(idx) {
            idx = match &node.data {
                NodeData::CallExpression(_) => return true,
                NodeData::PropertyAccessExpression(access) => access.object,
                NodeData::ElementAccessExpression(access) => access.object,
                _ => return false,
            };
        }
        false
    }

    fn emit_prefix_unary(&mut self, unary: &UnaryData) {
        self.write(token_to_text(unary.operator));
        if token_is_keyword(unary.operator) || self.operand_would_merge(unary) {
            self.write_space();
        }
        self.emit_expression(unary.operand, precedence::UNARY);
    }

    /// `- -a` and `+ ++a` must not print as `--a` and `+++a`.
    fn operand_would_merge(&self, unary: &UnaryData) -> bool {
        let Some(NodeData::PrefixUnaryExpression(inner)) =
            self.arena.get(unary.operand).map(|node| &node.data)
        else {
            return false;
        };
        matches!(
            (unary.operator, inner.operator),
            (
                SyntaxKind::PlusToken,
                SyntaxKind::PlusToken | SyntaxKind::PlusPlusToken
            ) | (
                SyntaxKind::MinusToken,
                SyntaxKind::MinusToken | SyntaxKind::MinusMinusToken
            )
        )
    }

    /// Print a binary expression, walking the left spine iteratively so
    /// long `a + b + c + ...` chains do not recurse once per operator.
    fn emit_binary_chain(&mut self, idx: NodeIndex) {
        let arena = self.arena;
        let mut spine: Vec<&'a BinaryData> = Vec::new();
        let mut current = idx;
        loop {
            let Some(node) = arena.get(current) else {
                break;
            };
            let NodeData::BinaryExpression(binary) = &node.data else {
                break;
            };
            if let Some(parent) = spine.last() {
                let parent_precedence = operator_precedence(parent.operator);
                // Stop where the left operand needs its own parentheses
                if operator_precedence(binary.operator) < parent_precedence
                    || current == self.statement_leftmost
                    || (self.no_in && binary.operator == SyntaxKind::InKeyword)
                {
                    break;
                }
            }
            spine.push(binary);
            current = binary.left;
        }

        let Some(innermost) = spine.last() else {
            return;
        };
        self.emit_expression(current, operator_precedence(innermost.operator));
        for binary in spine.iter().rev() {
            if binary.operator == SyntaxKind::CommaToken {
                self.write(", ");
            } else {
                self.write_space();
                self.write(token_to_text(binary.operator));
                self.write_space();
            }
            self.emit_expression(binary.right, operator_precedence(binary.operator) + 1);
        }
    }

    fn emit_array_literal(&mut self, array: &ArrayLiteralData) {
        self.write_char('[');
        let count = array.elements.len();
        for (i, idx) in array.elements.iter().enumerate() {
            if i > 0 {
                self.write_char(',');
            }
            if idx.is_some() {
                self.emit_assignment_operand(idx);
            }
        }
        // A trailing hole needs its own comma: `[1,,]` has length 2
        if count > 0 && array.elements.nodes[count - 1].is_none() {
            self.write_char(',');
        }
        self.write_char(']');
    }

    fn emit_object_literal(&mut self, object: &ObjectLiteralData) {
        if object.properties.is_empty() {
            self.write("{}");
            return;
        }
        self.write_char('{');
        self.increase_indent();
        for (i, idx) in object.properties.iter().enumerate() {
            if i > 0 {
                self.write_char(',');
            }
            self.write_line();
            if let Some(node) = self.arena.get(idx) {
                self.emit_object_member(&node.data);
            }
        }
        self.decrease_indent();
        self.write_line();
        self.write_char('}');
    }

    fn emit_object_member(&mut self, data: &NodeData) {
        match data {
            NodeData::PropertyAssignment(prop) => {
                self.emit_property_name(prop.name);
                self.write(": ");
                self.emit_assignment_operand(prop.value);
            }
            NodeData::Accessor(accessor) => {
                self.write(match accessor.kind {
                    AccessorKind::Get => "get ",
                    AccessorKind::Set => "set ",
                });
                self.emit_property_name(accessor.name);
                self.emit_parameters(&accessor.parameters);
                self.write_space();
                self.emit_function_body(accessor.body);
            }
            _ => {}
        }
    }

    fn emit_property_name(&mut self, idx: NodeIndex) {
        let Some(node) = self.arena.get(idx) else {
            return;
        };
        match &node.data {
            NodeData::Identifier(ident) => self.write(&ident.escaped_text),
            data => self.emit_literal(data),
        }
    }

    /// `function name(params) { ... }`, for declarations and expressions.
    pub(super) fn emit_function(&mut self, func: &FunctionData) {
        self.write("function");
        if func.name.is_some() {
            self.write_space();
            self.emit_identifier(func.name);
        }
        self.emit_parameters(&func.parameters);
        self.write_space();
        self.emit_function_body(func.body);
    }

    fn emit_function_body(&mut self, body: NodeIndex) {
        let saved_no_in = std::mem::replace(&mut self.no_in, false);
        let saved_leftmost = std::mem::replace(&mut self.statement_leftmost, NodeIndex::NONE);
        self.emit_statement(body);
        self.no_in = saved_no_in;
        self.statement_leftmost = saved_leftmost;
    }

    /// The node printed first in an expression statement, if printing it
    /// bare would change how the statement parses.
    pub(super) fn ambiguous_statement_start(&self, expression: NodeIndex) -> NodeIndex {
        let mut current = expression;
        while let Some(node) = self.arena.get(current) {
            current = match &node.data {
                NodeData::FunctionExpression(_) | NodeData::ObjectLiteralExpression(_) => {
                    return current;
                }
                NodeData::BinaryExpression(binary) => binary.left,
                NodeData::AssignmentExpression(assign) => assign.target,
                NodeData::ConditionalExpression(cond) => cond.condition,
                NodeData::CallExpression(call) => call.callee,
                NodeData::PropertyAccessExpression(access) => access.object,
                NodeData::ElementAccessExpression(access) => access.object,
                NodeData::PostfixUnaryExpression(unary) => unary.operand,
                _ => return NodeIndex::NONE,
            };
        }
        NodeIndex::NONE
    }
}

fn operator_precedence(operator: SyntaxKind) -> u8 {
    binary_operator_precedence(operator).unwrap_or(precedence::COMMA)
}

fn is_in_operator(data: &NodeData) -> bool {
    matches!(data, NodeData::BinaryExpression(binary) if binary.operator == SyntaxKind::InKeyword)
}
