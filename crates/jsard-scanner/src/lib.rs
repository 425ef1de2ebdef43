//! JavaScript scanner/tokenizer for the jsard deobfuscator.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine
//! - `ScanError` - The first lexical error seen by the scanner

mod syntax_kind;
pub use syntax_kind::*;

pub mod scanner;
pub use scanner::{ScanError, ScannerSnapshot, ScannerState};
