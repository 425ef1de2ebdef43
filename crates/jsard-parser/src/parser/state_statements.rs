//! Parser state - statement and declaration parsing methods

use super::base::{NodeIndex, NodeList};
use super::node::{
    BlockData, CaseClauseData, CatchClauseData, ExpressionStatementData, ForInStatementData,
    ForStatementData, FunctionData, IfStatementData, JumpData, LabeledStatementData, LoopData,
    NodeData, NodeKind, SwitchStatementData, TryStatementData, VariableDeclarationData,
    VariableKind, VariableStatementData, WithStatementData,
};
use super::state::{ParseResult, ParserState};
use jsard_common::{diagnostic_codes, diagnostic_messages};
use jsard_scanner::SyntaxKind;
use tracing::trace;

impl ParserState {
    // =========================================================================
    // Source file
    // =========================================================================

    /// Parse the whole input into a `Program` node.
    pub fn parse_source_file(&mut self) -> ParseResult<NodeIndex> {
        self.next_token()?;

        let mut statements = Vec::new();
        while !self.is(SyntaxKind::EndOfFileToken) {
            statements.push(self.parse_statement()?);
        }

        let end = self.scanner.source_text().len() as u32;
        trace!(
            statements = statements.len(),
            nodes = self.arena.len(),
            "parsed source file"
        );
        Ok(self.arena.add(
            0,
            end,
            NodeData::Program(BlockData {
                statements: NodeList::with_nodes(statements),
            }),
        ))
    }

    /// Statements up to (not including) the closing `}`.
    pub(crate) fn parse_statements(&mut self) -> ParseResult<NodeList> {
        let mut statements = Vec::new();
        while !self.is(SyntaxKind::CloseBraceToken) {
            if self.is(SyntaxKind::EndOfFileToken) {
                return Err(self.unexpected_token());
            }
            statements.push(self.parse_statement()?);
        }
        Ok(NodeList::with_nodes(statements))
    }

    pub fn parse_statement(&mut self) -> ParseResult<NodeIndex> {
        self.enter_recursion()?;
        let statement = self.parse_statement_worker();
        self.exit_recursion();
        statement
    }

    fn parse_statement_worker(&mut self) -> ParseResult<NodeIndex> {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => self.parse_empty_statement(),
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => self.parse_variable_statement(),
            SyntaxKind::Identifier if self.look_ahead_is_let_declaration() => {
                self.parse_variable_statement()
            }
            SyntaxKind::Identifier if self.peek_token() == SyntaxKind::ColonToken => {
                self.parse_labeled_statement()
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ContinueKeyword | SyntaxKind::BreakKeyword => self.parse_jump_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::WithKeyword => self.parse_with_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::DebuggerKeyword => self.parse_debugger_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// `let` is only a declaration keyword when a binding name follows.
    fn look_ahead_is_let_declaration(&mut self) -> bool {
        self.is_identifier_text("let") && self.peek_token() == SyntaxKind::Identifier
    }

    // =========================================================================
    // Blocks and simple statements
    // =========================================================================

    pub(crate) fn parse_block(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let statements = self.parse_statements()?;
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(self.finish_node(start, NodeData::Block(BlockData { statements })))
    }

    fn parse_empty_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::SemicolonToken)?;
        Ok(self.finish_node(start, NodeData::EmptyStatement))
    }

    fn parse_debugger_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::DebuggerKeyword)?;
        self.parse_semicolon()?;
        Ok(self.finish_node(start, NodeData::DebuggerStatement))
    }

    fn parse_expression_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let expression = self.parse_expression()?;
        self.parse_semicolon()?;
        Ok(self.finish_node(
            start,
            NodeData::ExpressionStatement(ExpressionStatementData { expression }),
        ))
    }

    fn parse_labeled_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let label = self.parse_identifier()?;
        self.parse_expected(SyntaxKind::ColonToken)?;
        let statement = self.parse_statement()?;
        Ok(self.finish_node(
            start,
            NodeData::LabeledStatement(LabeledStatementData { label, statement }),
        ))
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_variable_statement(&mut self) -> ParseResult<NodeIndex> {
        let statement = self.parse_variable_declaration_list()?;
        self.parse_semicolon()?;
        self.extend_to_prev_token(statement);
        Ok(statement)
    }

    /// `var a = 1, b` without the terminator. Used directly by `for` heads.
    fn parse_variable_declaration_list(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let kind = match self.token() {
            SyntaxKind::ConstKeyword => VariableKind::Const,
            SyntaxKind::Identifier => VariableKind::Let,
            _ => VariableKind::Var,
        };
        self.next_token()?;

        let mut declarations = vec![self.parse_variable_declaration()?];
        while self.parse_optional(SyntaxKind::CommaToken)? {
            declarations.push(self.parse_variable_declaration()?);
        }

        Ok(self.finish_node(
            start,
            NodeData::VariableStatement(VariableStatementData {
                kind,
                declarations: NodeList::with_nodes(declarations),
            }),
        ))
    }

    fn parse_variable_declaration(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let name = self.parse_identifier()?;
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken)? {
            self.parse_assignment_expression()?
        } else {
            NodeIndex::NONE
        };
        Ok(self.finish_node(
            start,
            NodeData::VariableDeclaration(VariableDeclarationData { name, initializer }),
        ))
    }

    fn parse_function_declaration(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::FunctionKeyword)?;
        let name = self.parse_identifier()?;
        let (parameters, body) = self.parse_function_signature_and_body()?;
        Ok(self.finish_node(
            start,
            NodeData::FunctionDeclaration(FunctionData {
                name,
                parameters,
                body,
            }),
        ))
    }

    /// `(a, b) { ... }`, shared by declarations, expressions and accessors.
    pub(crate) fn parse_function_signature_and_body(
        &mut self,
    ) -> ParseResult<(NodeList, NodeIndex)> {
        let parameters = self.parse_parameter_list()?;
        let body = self.with_allow_in(true, |p| p.parse_block())?;
        Ok((parameters, body))
    }

    pub(crate) fn parse_parameter_list(&mut self) -> ParseResult<NodeList> {
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let mut parameters = Vec::new();
        while !self.is(SyntaxKind::CloseParenToken) {
            parameters.push(self.parse_identifier()?);
            if !self.is(SyntaxKind::CloseParenToken) {
                self.parse_expected(SyntaxKind::CommaToken)?;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(NodeList::with_nodes(parameters))
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    /// `( expression )` head of `if`, `while`, `with` and `switch`.
    fn parse_parenthesized_head(&mut self) -> ParseResult<NodeIndex> {
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let expression = self.with_allow_in(true, |p| p.parse_expression())?;
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(expression)
    }

    fn parse_if_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::IfKeyword)?;
        let condition = self.parse_parenthesized_head()?;
        let then_statement = self.parse_statement()?;
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword)? {
            self.parse_statement()?
        } else {
            NodeIndex::NONE
        };
        Ok(self.finish_node(
            start,
            NodeData::IfStatement(IfStatementData {
                condition,
                then_statement,
                else_statement,
            }),
        ))
    }

    fn parse_do_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::DoKeyword)?;
        let body = self.parse_statement()?;
        self.parse_expected(SyntaxKind::WhileKeyword)?;
        let condition = self.parse_parenthesized_head()?;
        // The `;` after `do ... while (x)` is always optional
        self.parse_optional(SyntaxKind::SemicolonToken)?;
        Ok(self.finish_node(start, NodeData::DoStatement(LoopData { condition, body })))
    }

    fn parse_while_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::WhileKeyword)?;
        let condition = self.parse_parenthesized_head()?;
        let body = self.parse_statement()?;
        Ok(self.finish_node(start, NodeData::WhileStatement(LoopData { condition, body })))
    }

    fn parse_for_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ForKeyword)?;
        self.parse_expected(SyntaxKind::OpenParenToken)?;

        let initializer = if self.is(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else if self.is(SyntaxKind::VarKeyword)
            || self.is(SyntaxKind::ConstKeyword)
            || self.look_ahead_is_let_declaration()
        {
            self.with_allow_in(false, |p| p.parse_variable_declaration_list())?
        } else {
            self.with_allow_in(false, |p| p.parse_expression())?
        };

        if self.is(SyntaxKind::InKeyword) && self.is_for_in_initializer(initializer) {
            self.next_token()?;
            let object = self.with_allow_in(true, |p| p.parse_expression())?;
            self.parse_expected(SyntaxKind::CloseParenToken)?;
            let body = self.parse_statement()?;
            return Ok(self.finish_node(
                start,
                NodeData::ForInStatement(ForInStatementData {
                    initializer,
                    object,
                    body,
                }),
            ));
        }

        self.parse_expected(SyntaxKind::SemicolonToken)?;
        let condition = if self.is(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.with_allow_in(true, |p| p.parse_expression())?
        };
        self.parse_expected(SyntaxKind::SemicolonToken)?;
        let incrementor = if self.is(SyntaxKind::CloseParenToken) {
            NodeIndex::NONE
        } else {
            self.with_allow_in(true, |p| p.parse_expression())?
        };
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        let body = self.parse_statement()?;

        Ok(self.finish_node(
            start,
            NodeData::ForStatement(ForStatementData {
                initializer,
                condition,
                incrementor,
                body,
            }),
        ))
    }

    /// `for (x in o)` needs a single declaration or a reference on the left.
    fn is_for_in_initializer(&self, initializer: NodeIndex) -> bool {
        match self.arena.get(initializer).map(|node| &node.data) {
            Some(NodeData::VariableStatement(stmt)) => stmt.declarations.len() == 1,
            Some(data) => matches!(
                data.kind(),
                NodeKind::Identifier
                    | NodeKind::PropertyAccessExpression
                    | NodeKind::ElementAccessExpression
            ),
            None => false,
        }
    }

    fn parse_jump_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let is_break = self.is(SyntaxKind::BreakKeyword);
        self.next_token()?;
        let label = if self.is(SyntaxKind::Identifier) && !self.has_preceding_line_break() {
            self.parse_identifier()?
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon()?;
        let data = JumpData { label };
        Ok(self.finish_node(
            start,
            if is_break {
                NodeData::BreakStatement(data)
            } else {
                NodeData::ContinueStatement(data)
            },
        ))
    }

    fn parse_return_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ReturnKeyword)?;
        let expression = if self.can_parse_semicolon() {
            NodeIndex::NONE
        } else {
            self.parse_expression()?
        };
        self.parse_semicolon()?;
        Ok(self.finish_node(
            start,
            NodeData::ReturnStatement(ExpressionStatementData { expression }),
        ))
    }

    fn parse_throw_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ThrowKeyword)?;
        if self.has_preceding_line_break() {
            return Err(self.error_at_current(
                diagnostic_codes::UNEXPECTED_TOKEN,
                diagnostic_messages::LINE_BREAK_AFTER_THROW,
            ));
        }
        let expression = self.parse_expression()?;
        self.parse_semicolon()?;
        Ok(self.finish_node(
            start,
            NodeData::ThrowStatement(ExpressionStatementData { expression }),
        ))
    }

    fn parse_with_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::WithKeyword)?;
        let object = self.parse_parenthesized_head()?;
        let body = self.parse_statement()?;
        Ok(self.finish_node(
            start,
            NodeData::WithStatement(WithStatementData { object, body }),
        ))
    }

    fn parse_switch_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::SwitchKeyword)?;
        let discriminant = self.parse_parenthesized_head()?;
        self.parse_expected(SyntaxKind::OpenBraceToken)?;

        let mut clauses = Vec::new();
        while !self.is(SyntaxKind::CloseBraceToken) {
            clauses.push(self.parse_case_or_default_clause()?);
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;

        Ok(self.finish_node(
            start,
            NodeData::SwitchStatement(SwitchStatementData {
                discriminant,
                clauses: NodeList::with_nodes(clauses),
            }),
        ))
    }

    fn parse_case_or_default_clause(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let is_default = match self.token() {
            SyntaxKind::CaseKeyword => false,
            SyntaxKind::DefaultKeyword => true,
            _ => return Err(self.unexpected_token()),
        };
        self.next_token()?;
        let test = if is_default {
            NodeIndex::NONE
        } else {
            self.with_allow_in(true, |p| p.parse_expression())?
        };
        self.parse_expected(SyntaxKind::ColonToken)?;

        let mut statements = Vec::new();
        while !matches!(
            self.token(),
            SyntaxKind::CaseKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::EndOfFileToken
        ) {
            statements.push(self.parse_statement()?);
        }

        let data = CaseClauseData {
            test,
            statements: NodeList::with_nodes(statements),
        };
        Ok(self.finish_node(
            start,
            if is_default {
                NodeData::DefaultClause(data)
            } else {
                NodeData::CaseClause(data)
            },
        ))
    }

    fn parse_try_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::TryKeyword)?;
        let try_block = self.parse_block()?;

        let catch_clause = if self.is(SyntaxKind::CatchKeyword) {
            let catch_start = self.token_pos();
            self.next_token()?;
            self.parse_expected(SyntaxKind::OpenParenToken)?;
            let parameter = self.parse_identifier()?;
            self.parse_expected(SyntaxKind::CloseParenToken)?;
            let block = self.parse_block()?;
            self.finish_node(
                catch_start,
                NodeData::CatchClause(CatchClauseData { parameter, block }),
            )
        } else {
            NodeIndex::NONE
        };

        let finally_block = if self.parse_optional(SyntaxKind::FinallyKeyword)? {
            self.parse_block()?
        } else {
            NodeIndex::NONE
        };

        if catch_clause.is_none() && finally_block.is_none() {
            return Err(self.error_at_current(
                diagnostic_codes::UNEXPECTED_TOKEN,
                diagnostic_messages::CATCH_OR_FINALLY_EXPECTED,
            ));
        }

        Ok(self.finish_node(
            start,
            NodeData::TryStatement(TryStatementData {
                try_block,
                catch_clause,
                finally_block,
            }),
        ))
    }
}
