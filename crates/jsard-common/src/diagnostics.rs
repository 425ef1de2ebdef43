use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

impl DiagnosticCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Message => "message",
        }
    }
}

/// Numeric codes for every diagnostic jsard can produce.
///
/// 1xxx codes come from the parser, 2xxx from the rewrite engine and
/// 3xxx from the driver.
pub mod diagnostic_codes {
    pub const UNEXPECTED_TOKEN: u32 = 1001;
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const UNTERMINATED_REGULAR_EXPRESSION: u32 = 1003;
    pub const UNTERMINATED_COMMENT: u32 = 1004;
    pub const INVALID_CHARACTER: u32 = 1005;
    pub const NESTING_TOO_DEEP: u32 = 1006;

    pub const UNSUPPORTED_PARENT_SHAPE: u32 = 2001;
    pub const CHILD_SLOT_MISMATCH: u32 = 2002;

    pub const OBFUSCATION_ARRAY_NOT_FOUND: u32 = 3001;
    pub const NON_TERMINATING_REWRITE: u32 = 3002;
}

/// Message templates. `{0}`, `{1}`... are filled by [`format_message`].
pub mod diagnostic_messages {
    pub const UNEXPECTED_TOKEN: &str = "Unexpected token '{0}'.";
    pub const UNEXPECTED_END_OF_INPUT: &str = "Unexpected end of input.";
    pub const EXPECTED_TOKEN: &str = "'{0}' expected.";
    pub const IDENTIFIER_EXPECTED: &str = "Identifier expected.";
    pub const INVALID_ASSIGNMENT_TARGET: &str = "Invalid left-hand side in assignment.";
    pub const LINE_BREAK_AFTER_THROW: &str = "Line break not permitted after 'throw'.";
    pub const CATCH_OR_FINALLY_EXPECTED: &str = "'catch' or 'finally' expected.";
    pub const NESTING_TOO_DEEP: &str = "Expression or statement nesting exceeds {0} levels.";

    pub const UNSUPPORTED_PARENT_SHAPE: &str =
        "Cannot replace reference to '{0}' inside {1}: no replaceable expression slot.";
    pub const CHILD_SLOT_MISMATCH: &str =
        "Cannot replace reference to '{0}': it is not held in any expression slot of {1}.";

    pub const OBFUSCATION_ARRAY_NOT_FOUND: &str = "No obfuscation array declaration found.";
    pub const NON_TERMINATING_REWRITE: &str =
        "Rewrite did not converge after {0} passes ({1} nodes).";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
}

impl Diagnostic {
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            file: file.into(),
            start,
            length,
            message_text: message.into(),
        }
    }

    pub fn warning(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Warning,
            ..Self::error(file, start, length, message, code)
        }
    }

    /// Replace the file name, keeping everything else.
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
