//! Printer entry points and options.

use jsard_parser::{NodeArena, NodeIndex};

pub use crate::emitter::Printer;

#[derive(Clone, Debug)]
pub struct PrintOptions {
    /// Spaces per indentation level
    pub indent_width: usize,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions { indent_width: 2 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrintOutput {
    pub code: String,
}

/// Print the subtree rooted at `root` with default options.
pub fn print_node(arena: &NodeArena, root: NodeIndex) -> String {
    let mut printer = Printer::new(arena, PrintOptions::default());
    printer.print(root);
    printer.finish().code
}
