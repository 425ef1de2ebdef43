//! Parser and AST types.

pub mod base;
pub mod node;
pub mod node_arena;
pub mod node_slots;
pub mod precedence;
pub mod state;
mod state_expressions;
mod state_statements;

pub use base::{NodeIndex, NodeList};
pub use node::*;
pub use node_arena::NodeArena;
