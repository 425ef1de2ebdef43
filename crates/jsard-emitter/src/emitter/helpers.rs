use super::Printer;
use jsard_parser::{NodeIndex, NodeList};

impl<'a> Printer<'a> {
    // =========================================================================
    // Output Helpers (delegate to SourceWriter)
    // =========================================================================

    pub(super) fn write(&mut self, text: &str) {
        self.writer.write(text);
    }

    pub(super) fn write_char(&mut self, ch: char) {
        self.writer.write_char(ch);
    }

    pub(super) fn write_line(&mut self) {
        self.writer.write_line();
    }

    pub(super) fn write_space(&mut self) {
        self.writer.write_space();
    }

    pub(super) fn increase_indent(&mut self) {
        self.writer.increase_indent();
    }

    pub(super) fn decrease_indent(&mut self) {
        self.writer.decrease_indent();
    }

    // =========================================================================
    // Lists
    // =========================================================================

    /// `a, b, c` at assignment precedence.
    pub(super) fn emit_comma_list(&mut self, list: &NodeList) {
        for (i, idx) in list.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_assignment_operand(idx);
        }
    }

    /// `(a, b)` parameter list.
    pub(super) fn emit_parameters(&mut self, parameters: &NodeList) {
        self.write_char('(');
        for (i, idx) in parameters.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_identifier(idx);
        }
        self.write_char(')');
    }

    pub(super) fn emit_identifier(&mut self, idx: NodeIndex) {
        if let Some(text) = self.arena.identifier_text(idx) {
            self.write(text);
        }
    }
}
