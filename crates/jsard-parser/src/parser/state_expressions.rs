//! Parser state - expression parsing methods
//!
//! Binary operators use precedence climbing over the levels in
//! [`precedence`](super::precedence). Parentheses are consumed and not
//! represented in the tree.

use super::base::{NodeIndex, NodeList};
use super::node::{
    AccessorData, AccessorKind, ArrayLiteralData, AssignmentData, BinaryData, CallData,
    ConditionalData, ElementAccessData, FunctionData, LiteralData, NewData, NodeData, NodeKind,
    NumericLiteralData, ObjectLiteralData, PropertyAccessData, PropertyAssignmentData, UnaryData,
};
use super::precedence::{self, binary_operator_precedence};
use super::state::{ParseResult, ParserState};
use jsard_common::{diagnostic_codes, diagnostic_messages};
use jsard_scanner::{SyntaxKind, scanner::parse_numeric_literal};

impl ParserState {
    /// Expression including the comma operator.
    pub(crate) fn parse_expression(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let mut left = self.parse_assignment_expression()?;
        while self.parse_optional(SyntaxKind::CommaToken)? {
            let right = self.parse_assignment_expression()?;
            left = self.finish_node(
                start,
                NodeData::BinaryExpression(BinaryData {
                    left,
                    operator: SyntaxKind::CommaToken,
                    right,
                }),
            );
        }
        Ok(left)
    }

    pub(crate) fn parse_assignment_expression(&mut self) -> ParseResult<NodeIndex> {
        self.enter_recursion()?;
        let result = self.parse_assignment_expression_worker();
        self.exit_recursion();
        result
    }

    fn parse_assignment_expression_worker(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let target = self.parse_conditional_expression()?;
        if !self.is_assignment_operator() {
            return Ok(target);
        }

        if !self.is_reference(target) {
            return Err(self.error_at_current(
                diagnostic_codes::UNEXPECTED_TOKEN,
                diagnostic_messages::INVALID_ASSIGNMENT_TARGET,
            ));
        }
        let operator = self.token();
        self.next_token()?;
        // Right-associative: `a = b = c` is `a = (b = c)`
        let value = self.parse_assignment_expression()?;
        Ok(self.finish_node(
            start,
            NodeData::AssignmentExpression(AssignmentData {
                target,
                operator,
                value,
            }),
        ))
    }

    fn parse_conditional_expression(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let condition = self.parse_binary_expression(precedence::CONDITIONAL)?;
        if !self.parse_optional(SyntaxKind::QuestionToken)? {
            return Ok(condition);
        }
        let when_true = self.with_allow_in(true, |p| p.parse_assignment_expression())?;
        self.parse_expected(SyntaxKind::ColonToken)?;
        let when_false = self.parse_assignment_expression()?;
        Ok(self.finish_node(
            start,
            NodeData::ConditionalExpression(ConditionalData {
                condition,
                when_true,
                when_false,
            }),
        ))
    }

    /// Operators binding tighter than `min_precedence`, left-associative.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let mut left = self.parse_unary_expression()?;
        loop {
            let operator = self.token();
            if operator == SyntaxKind::InKeyword && !self.allow_in() {
                break;
            }
            let Some(precedence) = binary_operator_precedence(operator) else {
                break;
            };
            if precedence <= min_precedence {
                break;
            }
            self.next_token()?;
            let right = self.parse_binary_expression(precedence)?;
            left = self.finish_node(
                start,
                NodeData::BinaryExpression(BinaryData {
                    left,
                    operator,
                    right,
                }),
            );
        }
        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> ParseResult<NodeIndex> {
        let operator = self.token();
        if !matches!(
            operator,
            SyntaxKind::ExclamationToken
                | SyntaxKind::TildeToken
                | SyntaxKind::PlusToken
                | SyntaxKind::MinusToken
                | SyntaxKind::PlusPlusToken
                | SyntaxKind::MinusMinusToken
                | SyntaxKind::TypeOfKeyword
                | SyntaxKind::VoidKeyword
                | SyntaxKind::DeleteKeyword
        ) {
            return self.parse_postfix_expression();
        }

        self.enter_recursion()?;
        let start = self.token_pos();
        self.next_token()?;
        let operand = self.parse_unary_expression()?;
        self.exit_recursion();

        let data = UnaryData { operator, operand };
        if matches!(
            operator,
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken
        ) && !self.is_reference(operand)
        {
            return Err(self.error_at(
                diagnostic_codes::UNEXPECTED_TOKEN,
                diagnostic_messages::INVALID_ASSIGNMENT_TARGET,
                start,
                2,
            ));
        }
        Ok(self.finish_node(start, NodeData::PrefixUnaryExpression(data)))
    }

    fn parse_postfix_expression(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let operand = self.parse_left_hand_side_expression()?;
        let operator = self.token();
        // No line break allowed before postfix `++`/`--`
        if !matches!(
            operator,
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken
        ) || self.has_preceding_line_break()
        {
            return Ok(operand);
        }
        if !self.is_reference(operand) {
            return Err(self.error_at_current(
                diagnostic_codes::UNEXPECTED_TOKEN,
                diagnostic_messages::INVALID_ASSIGNMENT_TARGET,
            ));
        }
        self.next_token()?;
        Ok(self.finish_node(
            start,
            NodeData::PostfixUnaryExpression(UnaryData { operator, operand }),
        ))
    }

    /// Member accesses and calls: `a.b[c](d)`.
    fn parse_left_hand_side_expression(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let mut expression = self.parse_member_expression_or_higher()?;
        loop {
            expression = match self.token() {
                SyntaxKind::DotToken | SyntaxKind::OpenBracketToken => {
                    self.parse_member_access(start, expression)?
                }
                SyntaxKind::OpenParenToken => {
                    let arguments = self.parse_arguments()?;
                    self.finish_node(
                        start,
                        NodeData::CallExpression(CallData {
                            callee: expression,
                            arguments,
                        }),
                    )
                }
                _ => return Ok(expression),
            };
        }
    }

    /// Primary, function or `new` expression followed by `.x` / `[x]`,
    /// but no calls.
    fn parse_member_expression_or_higher(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let expression = if self.is(SyntaxKind::NewKeyword) {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };
        self.parse_member_expression_rest(start, expression)
    }

    fn parse_member_expression_rest(
        &mut self,
        start: u32,
        mut expression: NodeIndex,
    ) -> ParseResult<NodeIndex> {
        while matches!(
            self.token(),
            SyntaxKind::DotToken | SyntaxKind::OpenBracketToken
        ) {
            expression = self.parse_member_access(start, expression)?;
        }
        Ok(expression)
    }

    fn parse_member_access(&mut self, start: u32, object: NodeIndex) -> ParseResult<NodeIndex> {
        if self.parse_optional(SyntaxKind::DotToken)? {
            let name = self.parse_identifier_name()?;
            return Ok(self.finish_node(
                start,
                NodeData::PropertyAccessExpression(PropertyAccessData { object, name }),
            ));
        }
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let index = self.with_allow_in(true, |p| p.parse_expression())?;
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        Ok(self.finish_node(
            start,
            NodeData::ElementAccessExpression(ElementAccessData { object, index }),
        ))
    }

    /// `new C`, `new C(args)`, `new new C()()`, `new a.b.C()`.
    fn parse_new_expression(&mut self) -> ParseResult<NodeIndex> {
        self.enter_recursion()?;
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::NewKeyword)?;
        let callee = self.parse_member_expression_or_higher()?;
        let arguments = if self.is(SyntaxKind::OpenParenToken) {
            Some(self.parse_arguments()?)
        } else {
            None
        };
        self.exit_recursion();
        Ok(self.finish_node(
            start,
            NodeData::NewExpression(NewData { callee, arguments }),
        ))
    }

    fn parse_arguments(&mut self) -> ParseResult<NodeList> {
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let mut arguments = Vec::new();
        while !self.is(SyntaxKind::CloseParenToken) {
            arguments.push(self.with_allow_in(true, |p| p.parse_assignment_expression())?);
            if !self.is(SyntaxKind::CloseParenToken) {
                self.parse_expected(SyntaxKind::CommaToken)?;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(NodeList::with_nodes(arguments))
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::Identifier => self.parse_identifier(),
            SyntaxKind::ThisKeyword => self.parse_token_node(NodeData::ThisKeyword),
            SyntaxKind::NullKeyword => self.parse_token_node(NodeData::NullLiteral),
            SyntaxKind::TrueKeyword => self.parse_token_node(NodeData::BooleanLiteral(true)),
            SyntaxKind::FalseKeyword => self.parse_token_node(NodeData::BooleanLiteral(false)),
            SyntaxKind::NumericLiteral => {
                let raw = self.token_text().to_string();
                let value = parse_numeric_literal(&raw).unwrap_or(f64::NAN);
                self.parse_token_node(NodeData::NumericLiteral(NumericLiteralData { raw, value }))
            }
            SyntaxKind::StringLiteral => {
                let raw = self.token_text().to_string();
                let value = self.scanner.get_token_value().to_string();
                self.parse_token_node(NodeData::StringLiteral(LiteralData { raw, value }))
            }
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                self.scanner.re_scan_slash_token();
                self.check_scan_error()?;
                let raw = self.token_text().to_string();
                let value = raw.clone();
                self.parse_token_node(NodeData::RegularExpressionLiteral(LiteralData {
                    raw,
                    value,
                }))
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(),
            SyntaxKind::OpenParenToken => {
                self.next_token()?;
                let expression = self.with_allow_in(true, |p| p.parse_expression())?;
                self.parse_expected(SyntaxKind::CloseParenToken)?;
                tracing::trace!(pos = start, "dropped parentheses");
                Ok(expression)
            }
            _ => Err(self.unexpected_token()),
        }
    }

    /// Single-token node.
    fn parse_token_node(&mut self, data: NodeData) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.next_token()?;
        Ok(self.finish_node(start, data))
    }

    /// `[a, , b]`. Holes are stored as `NodeIndex::NONE`; a single trailing
    /// comma does not add one.
    fn parse_array_literal(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let mut elements = Vec::new();
        loop {
            match self.token() {
                SyntaxKind::CloseBracketToken => break,
                SyntaxKind::CommaToken => {
                    elements.push(NodeIndex::NONE);
                    self.next_token()?;
                }
                _ => {
                    elements.push(self.with_allow_in(true, |p| p.parse_assignment_expression())?);
                    if !self.is(SyntaxKind::CloseBracketToken) {
                        self.parse_expected(SyntaxKind::CommaToken)?;
                    }
                }
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        Ok(self.finish_node(
            start,
            NodeData::ArrayLiteralExpression(ArrayLiteralData {
                elements: NodeList::with_nodes(elements),
            }),
        ))
    }

    fn parse_object_literal(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut properties = Vec::new();
        while !self.is(SyntaxKind::CloseBraceToken) {
            properties.push(self.parse_object_literal_member()?);
            if !self.is(SyntaxKind::CloseBraceToken) {
                self.parse_expected(SyntaxKind::CommaToken)?;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(self.finish_node(
            start,
            NodeData::ObjectLiteralExpression(ObjectLiteralData {
                properties: NodeList::with_nodes(properties),
            }),
        ))
    }

    fn parse_object_literal_member(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        if let Some(kind) = self.look_ahead_accessor_kind() {
            self.next_token()?;
            let name = self.parse_property_name()?;
            let (parameters, body) = self.parse_function_signature_and_body()?;
            return Ok(self.finish_node(
                start,
                NodeData::Accessor(AccessorData {
                    kind,
                    name,
                    parameters,
                    body,
                }),
            ));
        }

        let name = self.parse_property_name()?;
        self.parse_expected(SyntaxKind::ColonToken)?;
        let value = self.with_allow_in(true, |p| p.parse_assignment_expression())?;
        Ok(self.finish_node(
            start,
            NodeData::PropertyAssignment(PropertyAssignmentData { name, value }),
        ))
    }

    /// `get name()` / `set name(v)`, as opposed to a property called `get`.
    fn look_ahead_accessor_kind(&mut self) -> Option<AccessorKind> {
        let kind = if self.is_identifier_text("get") {
            AccessorKind::Get
        } else if self.is_identifier_text("set") {
            AccessorKind::Set
        } else {
            return None;
        };
        let next = self.peek_token();
        let is_name = jsard_scanner::token_is_identifier_or_keyword(next)
            || matches!(next, SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral);
        is_name.then_some(kind)
    }

    fn parse_property_name(&mut self) -> ParseResult<NodeIndex> {
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => {
                self.parse_primary_expression()
            }
            _ => self.parse_identifier_name(),
        }
    }

    fn parse_function_expression(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::FunctionKeyword)?;
        let name = if self.is(SyntaxKind::Identifier) {
            self.parse_identifier()?
        } else {
            NodeIndex::NONE
        };
        let (parameters, body) = self.parse_function_signature_and_body()?;
        Ok(self.finish_node(
            start,
            NodeData::FunctionExpression(FunctionData {
                name,
                parameters,
                body,
            }),
        ))
    }

    /// Whether `index` can be assigned to.
    fn is_reference(&self, index: NodeIndex) -> bool {
        matches!(
            self.arena.kind(index),
            Some(
                NodeKind::Identifier
                    | NodeKind::PropertyAccessExpression
                    | NodeKind::ElementAccessExpression
            )
        )
    }
}
