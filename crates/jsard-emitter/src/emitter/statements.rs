use super::Printer;
use jsard_parser::parser::node::*;
use jsard_parser::parser::precedence::{self, is_expression_kind};
use jsard_parser::{NodeIndex, NodeKind};

impl<'a> Printer<'a> {
    /// Top-level statements, one per line, no trailing newline.
    pub(super) fn emit_program(&mut self, idx: NodeIndex) {
        let Some(NodeData::Program(program)) = self.arena.get(idx).map(|node| &node.data) else {
            return;
        };
        for (i, statement) in program.statements.iter().enumerate() {
            if i > 0 {
                self.write_line();
            }
            self.emit_statement(statement);
        }
    }

    pub(super) fn emit_statement(&mut self, idx: NodeIndex) {
        let Some(node) = self.arena.get(idx) else {
            return;
        };

        match &node.data {
            NodeData::Program(_) => self.emit_program(idx),
            NodeData::Block(block) => self.emit_block(block),
            NodeData::EmptyStatement => self.write_char(';'),
            NodeData::DebuggerStatement => self.write("debugger;"),
            NodeData::VariableStatement(var) => {
                self.emit_variable_list(var);
                self.write_char(';');
            }
            NodeData::VariableDeclaration(decl) => self.emit_variable_declaration(decl),
            NodeData::FunctionDeclaration(func) => self.emit_function(func),
            NodeData::ExpressionStatement(stmt) => self.emit_expression_statement(stmt.expression),
            NodeData::IfStatement(stmt) => self.emit_if_statement(stmt),
            NodeData::DoStatement(stmt) => {
                self.write("do ");
                self.emit_statement(stmt.body);
                if self.arena.kind(stmt.body) == Some(NodeKind::Block) {
                    self.write_space();
                } else {
                    self.write_line();
                }
                self.write("while (");
                self.emit_expression(stmt.condition, precedence::COMMA);
                self.write(");");
            }
            NodeData::WhileStatement(stmt) => {
                self.write("while (");
                self.emit_expression(stmt.condition, precedence::COMMA);
                self.write(") ");
                self.emit_statement(stmt.body);
            }
            NodeData::ForStatement(stmt) => self.emit_for_statement(stmt),
            NodeData::ForInStatement(stmt) => self.emit_for_in_statement(stmt),
            NodeData::ContinueStatement(jump) => self.emit_jump("continue", jump),
            NodeData::BreakStatement(jump) => self.emit_jump("break", jump),
            NodeData::ReturnStatement(stmt) => self.emit_keyword_statement("return", stmt),
            NodeData::ThrowStatement(stmt) => self.emit_keyword_statement("throw", stmt),
            NodeData::WithStatement(stmt) => {
                self.write("with (");
                self.emit_expression(stmt.object, precedence::COMMA);
                self.write(") ");
                self.emit_statement(stmt.body);
            }
            NodeData::SwitchStatement(stmt) => self.emit_switch_statement(stmt),
            NodeData::CaseClause(clause) | NodeData::DefaultClause(clause) => {
                self.emit_case_clause(clause)
            }
            NodeData::LabeledStatement(stmt) => {
                self.emit_identifier(stmt.label);
                self.write(": ");
                self.emit_statement(stmt.statement);
            }
            NodeData::TryStatement(stmt) => self.emit_try_statement(stmt),
            NodeData::CatchClause(clause) => self.emit_catch_clause(clause),
            data if is_expression_kind(data.kind()) => {
                self.emit_expression(idx, precedence::COMMA);
            }
            _ => {}
        }
    }

    fn emit_block(&mut self, block: &BlockData) {
        if block.statements.is_empty() {
            self.write("{}");
            return;
        }
        self.write_char('{');
        self.increase_indent();
        for statement in block.statements.iter() {
            self.write_line();
            self.emit_statement(statement);
        }
        self.decrease_indent();
        self.write_line();
        self.write_char('}');
    }

    /// Block statement, or `{}` for a missing body.
    fn emit_block_or_empty(&mut self, idx: NodeIndex) {
        if idx.is_some() {
            self.emit_statement(idx);
        } else {
            self.write("{}");
        }
    }

    /// `var a = 1, b` without the trailing semicolon, shared with for heads.
    fn emit_variable_list(&mut self, var: &VariableStatementData) {
        self.write(var.kind.as_str());
        self.write_space();
        for (i, decl) in var.declarations.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if let Some(NodeData::VariableDeclaration(decl)) =
                self.arena.get(decl).map(|node| &node.data)
            {
                self.emit_variable_declaration(decl);
            }
        }
    }

    fn emit_variable_declaration(&mut self, decl: &VariableDeclarationData) {
        self.emit_identifier(decl.name);
        if decl.initializer.is_some() {
            self.write(" = ");
            self.emit_assignment_operand(decl.initializer);
        }
    }

    fn emit_expression_statement(&mut self, expression: NodeIndex) {
        let leftmost = self.ambiguous_statement_start(expression);
        let saved = std::mem::replace(&mut self.statement_leftmost, leftmost);
        self.emit_expression(expression, precedence::COMMA);
        self.statement_leftmost = saved;
        self.write_char(';');
    }

    fn emit_if_statement(&mut self, stmt: &IfStatementData) {
        self.write("if (");
        self.emit_expression(stmt.condition, precedence::COMMA);
        self.write(") ");

        if stmt.else_statement.is_none() {
            self.emit_statement(stmt.then_statement);
            return;
        }

        // Brace a bare then-branch so a nested `if` cannot take our `else`
        if self.arena.kind(stmt.then_statement) == Some(NodeKind::Block) {
            self.emit_statement(stmt.then_statement);
        } else {
            self.write_char('{');
            self.increase_indent();
            self.write_line();
            self.emit_statement(stmt.then_statement);
            self.decrease_indent();
            self.write_line();
            self.write_char('}');
        }
        self.write(" else ");
        self.emit_statement(stmt.else_statement);
    }

    fn emit_for_statement(&mut self, stmt: &ForStatementData) {
        self.write("for (");
        if stmt.initializer.is_some() {
            let saved_no_in = std::mem::replace(&mut self.no_in, true);
            self.emit_for_initializer(stmt.initializer, precedence::COMMA);
            self.no_in = saved_no_in;
        }
        self.write_char(';');
        if stmt.condition.is_some() {
            self.write_space();
            self.emit_expression(stmt.condition, precedence::COMMA);
        }
        self.write_char(';');
        if stmt.incrementor.is_some() {
            self.write_space();
            self.emit_expression(stmt.incrementor, precedence::COMMA);
        }
        self.write(") ");
        self.emit_statement(stmt.body);
    }

    fn emit_for_in_statement(&mut self, stmt: &ForInStatementData) {
        self.write("for (");
        let saved_no_in = std::mem::replace(&mut self.no_in, true);
        self.emit_for_initializer(stmt.initializer, precedence::LEFT_HAND_SIDE);
        self.no_in = saved_no_in;
        self.write(" in ");
        self.emit_expression(stmt.object, precedence::COMMA);
        self.write(") ");
        self.emit_statement(stmt.body);
    }

    fn emit_for_initializer(&mut self, idx: NodeIndex, min_precedence: u8) {
        match self.arena.get(idx).map(|node| &node.data) {
            Some(NodeData::VariableStatement(var)) => self.emit_variable_list(var),
            Some(_) => self.emit_expression(idx, min_precedence),
            None => {}
        }
    }

    fn emit_jump(&mut self, keyword: &str, jump: &JumpData) {
        self.write(keyword);
        if jump.label.is_some() {
            self.write_space();
            self.emit_identifier(jump.label);
        }
        self.write_char(';');
    }

    fn emit_keyword_statement(&mut self, keyword: &str, stmt: &ExpressionStatementData) {
        self.write(keyword);
        if stmt.expression.is_some() {
            self.write_space();
            self.emit_expression(stmt.expression, precedence::COMMA);
        }
        self.write_char(';');
    }

    fn emit_switch_statement(&mut self, stmt: &SwitchStatementData) {
        self.write("switch (");
        self.emit_expression(stmt.discriminant, precedence::COMMA);
        self.write(") ");
        if stmt.clauses.is_empty() {
            self.write("{}");
            return;
        }
        self.write_char('{');
        self.increase_indent();
        for clause in stmt.clauses.iter() {
            self.write_line();
            self.emit_statement(clause);
        }
        self.decrease_indent();
        self.write_line();
        self.write_char('}');
    }

    fn emit_case_clause(&mut self, clause: &CaseClauseData) {
        if clause.test.is_some() {
            self.write("case ");
            self.emit_expression(clause.test, precedence::COMMA);
            self.write_char(':');
        } else {
            self.write("default:");
        }
        self.increase_indent();
        for statement in clause.statements.iter() {
            self.write_line();
            self.emit_statement(statement);
        }
        self.decrease_indent();
    }

    fn emit_try_statement(&mut self, stmt: &TryStatementData) {
        self.write("try ");
        self.emit_block_or_empty(stmt.try_block);
        if stmt.catch_clause.is_some() {
            self.write_space();
            self.emit_statement(stmt.catch_clause);
        }
        if stmt.finally_block.is_some() {
            self.write(" finally ");
            self.emit_statement(stmt.finally_block);
        }
    }

    fn emit_catch_clause(&mut self, clause: &CatchClauseData) {
        self.write("catch (");
        self.emit_identifier(clause.parameter);
        self.write(") ");
        self.emit_block_or_empty(clause.block);
    }
}
