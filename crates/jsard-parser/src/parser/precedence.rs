//! Operator precedence levels shared by the parser and the printer.
//!
//! Higher binds tighter. The printer wraps a child in parentheses when its
//! level is below what the parent position requires.

use super::node::{NodeData, NodeKind};
use jsard_scanner::SyntaxKind;

pub const COMMA: u8 = 0;
pub const ASSIGNMENT: u8 = 1;
pub const CONDITIONAL: u8 = 2;
pub const LOGICAL_OR: u8 = 3;
pub const LOGICAL_AND: u8 = 4;
pub const BITWISE_OR: u8 = 5;
pub const BITWISE_XOR: u8 = 6;
pub const BITWISE_AND: u8 = 7;
pub const EQUALITY: u8 = 8;
pub const RELATIONAL: u8 = 9;
pub const SHIFT: u8 = 10;
pub const ADDITIVE: u8 = 11;
pub const MULTIPLICATIVE: u8 = 12;
pub const UNARY: u8 = 13;
pub const POSTFIX: u8 = 14;
pub const LEFT_HAND_SIDE: u8 = 15;
pub const MEMBER: u8 = 16;
pub const PRIMARY: u8 = 17;

/// Precedence of a binary operator token, or `None` if the token is not a
/// binary operator.
pub fn binary_operator_precedence(kind: SyntaxKind) -> Option<u8> {
    let precedence = match kind {
        SyntaxKind::CommaToken => COMMA,
        SyntaxKind::BarBarToken => LOGICAL_OR,
        SyntaxKind::AmpersandAmpersandToken => LOGICAL_AND,
        SyntaxKind::BarToken => BITWISE_OR,
        SyntaxKind::CaretToken => BITWISE_XOR,
        SyntaxKind::AmpersandToken => BITWISE_AND,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => EQUALITY,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword => RELATIONAL,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => SHIFT,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => ADDITIVE,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
            MULTIPLICATIVE
        }
        _ => return None,
    };
    Some(precedence)
}

/// Precedence of an expression node as it would print without parentheses.
pub fn expression_precedence(data: &NodeData) -> u8 {
    match data {
        NodeData::BinaryExpression(binary) => {
            binary_operator_precedence(binary.operator).unwrap_or(COMMA)
        }
        NodeData::AssignmentExpression(_) => ASSIGNMENT,
        NodeData::ConditionalExpression(_) => CONDITIONAL,
        NodeData::PrefixUnaryExpression(_) => UNARY,
        NodeData::PostfixUnaryExpression(_) => POSTFIX,
        NodeData::CallExpression(_) => LEFT_HAND_SIDE,
        // `new C` without arguments cannot be called or accessed directly
        NodeData::NewExpression(new) if new.arguments.is_none() => LEFT_HAND_SIDE,
        NodeData::NewExpression(_)
        | NodeData::PropertyAccessExpression(_)
        | NodeData::ElementAccessExpression(_) => MEMBER,
        _ => PRIMARY,
    }
}

/// Whether a node kind is an expression (as opposed to a statement or a
/// structural node like a clause or property).
pub fn is_expression_kind(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Identifier
            | NodeKind::StringLiteral
            | NodeKind::NumericLiteral
            | NodeKind::RegularExpressionLiteral
            | NodeKind::BooleanLiteral
            | NodeKind::NullLiteral
            | NodeKind::ThisKeyword
            | NodeKind::ArrayLiteralExpression
            | NodeKind::ObjectLiteralExpression
            | NodeKind::FunctionExpression
            | NodeKind::PropertyAccessExpression
            | NodeKind::ElementAccessExpression
            | NodeKind::CallExpression
            | NodeKind::NewExpression
            | NodeKind::PrefixUnaryExpression
            | NodeKind::PostfixUnaryExpression
            | NodeKind::BinaryExpression
            | NodeKind::AssignmentExpression
            | NodeKind::ConditionalExpression
    )
}
