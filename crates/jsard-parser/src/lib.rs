//! JavaScript parser and arena AST for the jsard deobfuscator.
//!
//! This crate is the syntax tree provider's parse half:
//! - `NodeArena` / `NodeIndex` / `NodeList` - arena storage for the tree
//! - `Node` / `NodeData` / `NodeKind` - node variants
//! - `ParserState` - recursive descent parser for ES5 JavaScript
//! - `ExpressionSlots` / `SlotName` - per-kind expression slot capability

pub mod parser;

pub use parser::base::{NodeIndex, NodeList};
pub use parser::node::{Node, NodeData, NodeKind};
pub use parser::node_arena::NodeArena;
pub use parser::node_slots::{ExpressionSlots, SlotError, SlotName, SlotVec};
pub use parser::state::{ParseError, ParserState, SyntaxTree, parse_program};
