//! Fatal errors of a deobfuscation run.
//!
//! Per-occurrence problems are not errors: they are collected as
//! [`RewriteDiagnostic`](crate::replacer::RewriteDiagnostic)s and the run
//! continues.

use jsard_common::{Diagnostic, diagnostic_codes, diagnostic_messages, format_message};
use jsard_parser::ParseError;
use thiserror::Error;

/// No variable declaration in the program qualified as the obfuscation
/// array.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", diagnostic_messages::OBFUSCATION_ARRAY_NOT_FOUND)]
pub struct ObfuscationArrayNotFound {
    /// Single-array declarations the array predicate turned down
    pub rejected: usize,
}

#[derive(Debug, Error)]
pub enum JsardError {
    /// The input does not follow the array-ref scheme.
    #[error("invalid input format: {0}")]
    InvalidInputFormat(#[source] ObfuscationArrayNotFound),

    /// References kept appearing after the pass cap, or the tree outgrew
    /// the arena limit.
    #[error("rewrite did not converge after {passes} passes ({nodes} nodes)")]
    NonTerminatingRewrite { passes: u32, nodes: usize },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl From<ObfuscationArrayNotFound> for JsardError {
    fn from(error: ObfuscationArrayNotFound) -> Self {
        JsardError::InvalidInputFormat(error)
    }
}

impl JsardError {
    pub fn code(&self) -> u32 {
        match self {
            JsardError::InvalidInputFormat(_) => diagnostic_codes::OBFUSCATION_ARRAY_NOT_FOUND,
            JsardError::NonTerminatingRewrite { .. } => diagnostic_codes::NON_TERMINATING_REWRITE,
            JsardError::Parse(error) => error.code,
        }
    }

    /// Error diagnostic for `file`. Parse errors keep their position; the
    /// others apply to the whole file.
    pub fn to_diagnostic(&self, file: &str) -> Diagnostic {
        match self {
            JsardError::Parse(error) => error.to_diagnostic().in_file(file),
            JsardError::InvalidInputFormat(_) => Diagnostic::error(
                file,
                0,
                0,
                diagnostic_messages::OBFUSCATION_ARRAY_NOT_FOUND,
                self.code(),
            ),
            JsardError::NonTerminatingRewrite { passes, nodes } => Diagnostic::error(
                file,
                0,
                0,
                format_message(
                    diagnostic_messages::NON_TERMINATING_REWRITE,
                    &[&passes.to_string(), &nodes.to_string()],
                ),
                self.code(),
            ),
        }
    }
}
