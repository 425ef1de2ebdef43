use super::Printer;
use jsard_parser::parser::node::NodeData;

impl<'a> Printer<'a> {
    /// Leaf tokens. Literals keep their source spelling, so quote style,
    /// escapes and numeric radix survive a print.
    pub(super) fn emit_literal(&mut self, data: &NodeData) {
        match data {
            NodeData::StringLiteral(lit) | NodeData::RegularExpressionLiteral(lit) => {
                self.write(&lit.raw);
            }
            NodeData::NumericLiteral(num) => self.write(&num.raw),
            NodeData::BooleanLiteral(true) => self.write("true"),
            NodeData::BooleanLiteral(false) => self.write("false"),
            NodeData::NullLiteral => self.write("null"),
            NodeData::ThisKeyword => self.write("this"),
            NodeData::Identifier(ident) => self.write(&ident.escaped_text),
            _ => {}
        }
    }
}
