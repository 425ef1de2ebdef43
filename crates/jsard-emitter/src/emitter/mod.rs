//! Tree printer.
//!
//! Statement forms are handled in `statements.rs`, expressions and
//! parenthesization in `expressions.rs`, leaf tokens in `literals.rs`.

mod expressions;
mod helpers;
mod literals;
mod statements;

use crate::printer::{PrintOptions, PrintOutput};
use crate::source_writer::SourceWriter;
use jsard_parser::parser::precedence::{self, is_expression_kind};
use jsard_parser::{NodeArena, NodeIndex, NodeKind};
use tracing::trace;

pub struct Printer<'a> {
    pub(crate) arena: &'a NodeArena,
    writer: SourceWriter,
    /// Set while printing a `for (init; ...)` head, where a bare `in`
    /// operator would be read as a for-in loop
    no_in: bool,
    /// Leftmost node of the current expression statement, parenthesized
    /// when it would otherwise read as a declaration or block
    statement_leftmost: NodeIndex,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a NodeArena, options: PrintOptions) -> Printer<'a> {
        Printer {
            arena,
            writer: SourceWriter::with_capacity(options.indent_width, arena.len() * 4),
            no_in: false,
            statement_leftmost: NodeIndex::NONE,
        }
    }

    /// Print a program, statement or expression.
    pub fn print(&mut self, root: NodeIndex) {
        let Some(kind) = self.arena.kind(root) else {
            return;
        };
        trace!(%root, %kind, "printing");
        match kind {
            NodeKind::Program => self.emit_program(root),
            kind if is_expression_kind(kind) => {
                self.emit_expression(root, precedence::COMMA);
            }
            _ => self.emit_statement(root),
        }
    }

    pub fn finish(self) -> PrintOutput {
        PrintOutput {
            code: self.writer.take_output(),
        }
    }

    /// Output written so far.
    pub fn get_output(&self) -> &str {
        self.writer.get_output()
    }
}
