//! Parser state: token cursor, error construction and shared helpers.
//!
//! Statement parsing lives in `state_statements.rs`, expression parsing in
//! `state_expressions.rs`. Parsing is fail-fast: the first syntax error
//! aborts with a [`ParseError`].

use super::base::NodeIndex;
use super::node::{IdentifierData, NodeData};
use super::node_arena::NodeArena;
use jsard_common::limits::MAX_PARSE_DEPTH;
use jsard_common::{Diagnostic, LineMap, diagnostic_codes, diagnostic_messages, format_message};
use jsard_scanner::{ScannerState, SyntaxKind, token_is_assignment_operator, token_to_text};
use tracing::debug;

/// A syntax error, positioned at the offending token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({line}:{column})")]
pub struct ParseError {
    pub code: u32,
    pub message: String,
    pub file: String,
    /// Byte offset of the offending token
    pub pos: u32,
    pub length: u32,
    /// 1-based line
    pub line: u32,
    /// 1-based column, counted in characters
    pub column: u32,
}

impl ParseError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(
            self.file.clone(),
            self.pos,
            self.length,
            self.message.clone(),
            self.code,
        )
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// A parsed program: the arena plus the index of its `Program` node.
#[derive(Clone, Debug)]
pub struct SyntaxTree {
    pub arena: NodeArena,
    pub root: NodeIndex,
}

/// Parse a whole program.
pub fn parse_program(file_name: &str, source: &str) -> ParseResult<SyntaxTree> {
    let mut parser = ParserState::new(file_name, source);
    let root = parser.parse_source_file()?;
    Ok(SyntaxTree {
        arena: parser.into_arena(),
        root,
    })
}

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    file_name: String,
    line_map: LineMap,
    /// End of the last consumed token; node ends are taken from here
    prev_token_end: u32,
    recursion_depth: u32,
    /// Cleared while parsing a `for` initializer, where `in` ends the
    /// expression instead of being an operator
    allow_in: bool,
}

impl ParserState {
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> ParserState {
        let source = source.into();
        let line_map = LineMap::build(&source);
        // Rough guess: one node per 4 bytes of source
        let arena = NodeArena::with_capacity(source.len() / 4);
        ParserState {
            scanner: ScannerState::new(source),
            arena,
            file_name: file_name.into(),
            line_map,
            prev_token_end: 0,
            recursion_depth: 0,
            allow_in: true,
        }
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    // =========================================================================
    // Token access
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    #[inline]
    pub(crate) fn is(&self, kind: SyntaxKind) -> bool {
        self.scanner.token() == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.get_token_pos()
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.get_token_end()
    }

    #[inline]
    pub(crate) fn token_text(&self) -> &str {
        self.scanner.get_token_text()
    }

    #[inline]
    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    #[inline]
    pub(crate) fn is_identifier_text(&self, text: &str) -> bool {
        self.is(SyntaxKind::Identifier) && self.token_text() == text
    }

    /// Advance to the next token.
    pub(crate) fn next_token(&mut self) -> ParseResult<SyntaxKind> {
        self.prev_token_end = self.scanner.get_token_end();
        let kind = self.scanner.scan();
        self.check_scan_error()?;
        Ok(kind)
    }

    /// Surface the scanner's recorded error, if any.
    pub(crate) fn check_scan_error(&self) -> ParseResult<()> {
        match self.scanner.error() {
            Some(err) => Err(self.error_at(err.code, err.message.clone(), err.pos, 1)),
            None => Ok(()),
        }
    }

    /// Run `f` against a throwaway copy of the token cursor.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut ScannerState) -> T) -> T {
        let snapshot = self.scanner.save_state();
        let result = f(&mut self.scanner);
        self.scanner.restore_state(snapshot);
        result
    }

    /// Kind of the token after the current one.
    pub(crate) fn peek_token(&mut self) -> SyntaxKind {
        self.look_ahead(|scanner| scanner.scan())
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> ParseResult<bool> {
        if self.is(kind) {
            self.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> ParseResult<()> {
        if self.is(kind) {
            self.next_token()?;
            Ok(())
        } else if self.is(SyntaxKind::EndOfFileToken) {
            Err(self.unexpected_token())
        } else {
            Err(self.error_at_current(
                diagnostic_codes::UNEXPECTED_TOKEN,
                format_message(diagnostic_messages::EXPECTED_TOKEN, &[token_to_text(kind)]),
            ))
        }
    }

    /// Whether a statement may end here without an explicit `;`.
    pub(crate) fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
    }

    /// Consume a statement terminator, applying automatic semicolon insertion.
    pub(crate) fn parse_semicolon(&mut self) -> ParseResult<()> {
        if self.is(SyntaxKind::SemicolonToken) {
            self.next_token()?;
            return Ok(());
        }
        if self.can_parse_semicolon() {
            return Ok(());
        }
        self.parse_expected(SyntaxKind::SemicolonToken)
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    /// Add a node spanning from `start` to the end of the last consumed token.
    #[inline]
    pub(crate) fn finish_node(&mut self, start: u32, data: NodeData) -> NodeIndex {
        let end = self.prev_token_end.max(start);
        self.arena.add(start, end, data)
    }

    /// Stretch a finished node over tokens consumed after it (a trailing `;`).
    pub(crate) fn extend_to_prev_token(&mut self, index: NodeIndex) {
        let end = self.prev_token_end;
        if let Some(node) = self.arena.get_mut(index) {
            node.end = node.end.max(end);
        }
    }

    /// Parse an identifier reference or binding name (keywords rejected).
    pub(crate) fn parse_identifier(&mut self) -> ParseResult<NodeIndex> {
        if !self.is(SyntaxKind::Identifier) {
            return Err(if self.is(SyntaxKind::EndOfFileToken) {
                self.unexpected_token()
            } else {
                self.error_at_current(
                    diagnostic_codes::UNEXPECTED_TOKEN,
                    diagnostic_messages::IDENTIFIER_EXPECTED,
                )
            });
        }
        self.parse_identifier_name()
    }

    /// Parse an identifier name, where reserved words are allowed
    /// (`a.default`, `{ if: 1 }`).
    pub(crate) fn parse_identifier_name(&mut self) -> ParseResult<NodeIndex> {
        if !jsard_scanner::token_is_identifier_or_keyword(self.token()) {
            return Err(self.error_at_current(
                diagnostic_codes::UNEXPECTED_TOKEN,
                diagnostic_messages::IDENTIFIER_EXPECTED,
            ));
        }
        let start = self.token_pos();
        let escaped_text = self.scanner.get_token_value().to_string();
        self.next_token()?;
        Ok(self.finish_node(start, NodeData::Identifier(IdentifierData { escaped_text })))
    }

    /// Run `f` with the `in` operator allowed or disallowed.
    pub(crate) fn with_allow_in<T>(
        &mut self,
        allow_in: bool,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let saved = self.allow_in;
        self.allow_in = allow_in;
        let result = f(self);
        self.allow_in = saved;
        result
    }

    #[inline]
    pub(crate) fn allow_in(&self) -> bool {
        self.allow_in
    }

    pub(crate) fn is_assignment_operator(&self) -> bool {
        token_is_assignment_operator(self.token())
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    pub(crate) fn enter_recursion(&mut self) -> ParseResult<()> {
        if self.recursion_depth >= MAX_PARSE_DEPTH {
            debug!(depth = self.recursion_depth, "parse nesting limit reached");
            return Err(self.error_at_current(
                diagnostic_codes::NESTING_TOO_DEEP,
                format_message(
                    diagnostic_messages::NESTING_TOO_DEEP,
                    &[&MAX_PARSE_DEPTH.to_string()],
                ),
            ));
        }
        self.recursion_depth += 1;
        Ok(())
    }

    #[inline]
    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Errors
    // =========================================================================

    pub(crate) fn error_at(
        &self,
        code: u32,
        message: impl Into<String>,
        pos: u32,
        length: u32,
    ) -> ParseError {
        let position = self
            .line_map
            .offset_to_position(pos, self.scanner.source_text());
        ParseError {
            code,
            message: message.into(),
            file: self.file_name.clone(),
            pos,
            length,
            line: position.line + 1,
            column: position.character + 1,
        }
    }

    pub(crate) fn error_at_current(&self, code: u32, message: impl Into<String>) -> ParseError {
        let pos = self.token_pos();
        let length = self.token_end().saturating_sub(pos);
        self.error_at(code, message, pos, length)
    }

    /// Error for the current token appearing where it cannot.
    pub(crate) fn unexpected_token(&self) -> ParseError {
        if self.is(SyntaxKind::EndOfFileToken) {
            return self.error_at_current(
                diagnostic_codes::UNEXPECTED_TOKEN,
                diagnostic_messages::UNEXPECTED_END_OF_INPUT,
            );
        }
        let message = format_message(diagnostic_messages::UNEXPECTED_TOKEN, &[self.token_text()]);
        self.error_at_current(diagnostic_codes::UNEXPECTED_TOKEN, message)
    }
}
