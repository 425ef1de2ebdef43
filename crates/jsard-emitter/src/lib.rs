//! JavaScript printer for jsard syntax trees.
//!
//! Prints an arena tree back to source text with two-space indentation,
//! inserting parentheses wherever operator precedence requires them.
//! Literals keep their raw source text.

pub mod emitter;
pub mod printer;
pub mod source_writer;

pub use printer::{PrintOptions, PrintOutput, Printer, print_node};
