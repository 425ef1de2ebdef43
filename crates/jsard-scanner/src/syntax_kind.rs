//! Token kinds produced by the scanner.

#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,

    // Literals
    NumericLiteral,
    StringLiteral,
    RegularExpressionLiteral,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    SemicolonToken,
    CommaToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,

    // Assignments
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,

    // Identifiers
    Identifier,

    // Reserved words
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,
}

impl SyntaxKind {
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenBraceToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::CaretEqualsToken;
    pub const FIRST_ASSIGNMENT: SyntaxKind = SyntaxKind::EqualsToken;
    pub const LAST_ASSIGNMENT: SyntaxKind = SyntaxKind::CaretEqualsToken;
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::WithKeyword;
}

pub fn token_is_keyword(kind: SyntaxKind) -> bool {
    kind >= SyntaxKind::FIRST_KEYWORD && kind <= SyntaxKind::LAST_KEYWORD
}

pub fn token_is_identifier_or_keyword(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Identifier || token_is_keyword(kind)
}

pub fn token_is_punctuation(kind: SyntaxKind) -> bool {
    kind >= SyntaxKind::FIRST_PUNCTUATION && kind <= SyntaxKind::LAST_PUNCTUATION
}

pub fn token_is_assignment_operator(kind: SyntaxKind) -> bool {
    kind >= SyntaxKind::FIRST_ASSIGNMENT && kind <= SyntaxKind::LAST_ASSIGNMENT
}

pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    let kind = match text {
        "break" => SyntaxKind::BreakKeyword,
        "case" => SyntaxKind::CaseKeyword,
        "catch" => SyntaxKind::CatchKeyword,
        "const" => SyntaxKind::ConstKeyword,
        "continue" => SyntaxKind::ContinueKeyword,
        "debugger" => SyntaxKind::DebuggerKeyword,
        "default" => SyntaxKind::DefaultKeyword,
        "delete" => SyntaxKind::DeleteKeyword,
        "do" => SyntaxKind::DoKeyword,
        "else" => SyntaxKind::ElseKeyword,
        "false" => SyntaxKind::FalseKeyword,
        "finally" => SyntaxKind::FinallyKeyword,
        "for" => SyntaxKind::ForKeyword,
        "function" => SyntaxKind::FunctionKeyword,
        "if" => SyntaxKind::IfKeyword,
        "in" => SyntaxKind::InKeyword,
        "instanceof" => SyntaxKind::InstanceOfKeyword,
        "new" => SyntaxKind::NewKeyword,
        "null" => SyntaxKind::NullKeyword,
        "return" => SyntaxKind::ReturnKeyword,
        "switch" => SyntaxKind::SwitchKeyword,
        "this" => SyntaxKind::ThisKeyword,
        "throw" => SyntaxKind::ThrowKeyword,
        "true" => SyntaxKind::TrueKeyword,
        "try" => SyntaxKind::TryKeyword,
        "typeof" => SyntaxKind::TypeOfKeyword,
        "var" => SyntaxKind::VarKeyword,
        "void" => SyntaxKind::VoidKeyword,
        "while" => SyntaxKind::WhileKeyword,
        "with" => SyntaxKind::WithKeyword,
        _ => return None,
    };
    Some(kind)
}

pub fn keyword_to_text(kind: SyntaxKind) -> Option<&'static str> {
    let text = match kind {
        SyntaxKind::BreakKeyword => "break",
        SyntaxKind::CaseKeyword => "case",
        SyntaxKind::CatchKeyword => "catch",
        SyntaxKind::ConstKeyword => "const",
        SyntaxKind::ContinueKeyword => "continue",
        SyntaxKind::DebuggerKeyword => "debugger",
        SyntaxKind::DefaultKeyword => "default",
        SyntaxKind::DeleteKeyword => "delete",
        SyntaxKind::DoKeyword => "do",
        SyntaxKind::ElseKeyword => "else",
        SyntaxKind::FalseKeyword => "false",
        SyntaxKind::FinallyKeyword => "finally",
        SyntaxKind::ForKeyword => "for",
        SyntaxKind::FunctionKeyword => "function",
        SyntaxKind::IfKeyword => "if",
        SyntaxKind::InKeyword => "in",
        SyntaxKind::InstanceOfKeyword => "instanceof",
        SyntaxKind::NewKeyword => "new",
        SyntaxKind::NullKeyword => "null",
        SyntaxKind::ReturnKeyword => "return",
        SyntaxKind::SwitchKeyword => "switch",
        SyntaxKind::ThisKeyword => "this",
        SyntaxKind::ThrowKeyword => "throw",
        SyntaxKind::TrueKeyword => "true",
        SyntaxKind::TryKeyword => "try",
        SyntaxKind::TypeOfKeyword => "typeof",
        SyntaxKind::VarKeyword => "var",
        SyntaxKind::VoidKeyword => "void",
        SyntaxKind::WhileKeyword => "while",
        SyntaxKind::WithKeyword => "with",
        _ => return None,
    };
    Some(text)
}

pub fn punctuation_to_text(kind: SyntaxKind) -> Option<&'static str> {
    let text = match kind {
        SyntaxKind::OpenBraceToken => "{",
        SyntaxKind::CloseBraceToken => "}",
        SyntaxKind::OpenParenToken => "(",
        SyntaxKind::CloseParenToken => ")",
        SyntaxKind::OpenBracketToken => "[",
        SyntaxKind::CloseBracketToken => "]",
        SyntaxKind::DotToken => ".",
        SyntaxKind::SemicolonToken => ";",
        SyntaxKind::CommaToken => ",",
        SyntaxKind::LessThanToken => "<",
        SyntaxKind::GreaterThanToken => ">",
        SyntaxKind::LessThanEqualsToken => "<=",
        SyntaxKind::GreaterThanEqualsToken => ">=",
        SyntaxKind::EqualsEqualsToken => "==",
        SyntaxKind::ExclamationEqualsToken => "!=",
        SyntaxKind::EqualsEqualsEqualsToken => "===",
        SyntaxKind::ExclamationEqualsEqualsToken => "!==",
        SyntaxKind::PlusToken => "+",
        SyntaxKind::MinusToken => "-",
        SyntaxKind::AsteriskToken => "*",
        SyntaxKind::SlashToken => "/",
        SyntaxKind::PercentToken => "%",
        SyntaxKind::PlusPlusToken => "++",
        SyntaxKind::MinusMinusToken => "--",
        SyntaxKind::LessThanLessThanToken => "<<",
        SyntaxKind::GreaterThanGreaterThanToken => ">>",
        SyntaxKind::GreaterThanGreaterThanGreaterThanToken => ">>>",
        SyntaxKind::AmpersandToken => "&",
        SyntaxKind::BarToken => "|",
        SyntaxKind::CaretToken => "^",
        SyntaxKind::ExclamationToken => "!",
        SyntaxKind::TildeToken => "~",
        SyntaxKind::AmpersandAmpersandToken => "&&",
        SyntaxKind::BarBarToken => "||",
        SyntaxKind::QuestionToken => "?",
        SyntaxKind::ColonToken => ":",
        SyntaxKind::EqualsToken => "=",
        SyntaxKind::PlusEqualsToken => "+=",
        SyntaxKind::MinusEqualsToken => "-=",
        SyntaxKind::AsteriskEqualsToken => "*=",
        SyntaxKind::SlashEqualsToken => "/=",
        SyntaxKind::PercentEqualsToken => "%=",
        SyntaxKind::LessThanLessThanEqualsToken => "<<=",
        SyntaxKind::GreaterThanGreaterThanEqualsToken => ">>=",
        SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
        SyntaxKind::AmpersandEqualsToken => "&=",
        SyntaxKind::BarEqualsToken => "|=",
        SyntaxKind::CaretEqualsToken => "^=",
        _ => return None,
    };
    Some(text)
}

/// Source text of an operator or keyword token, used by the printer.
pub fn token_to_text(kind: SyntaxKind) -> &'static str {
    punctuation_to_text(kind)
        .or_else(|| keyword_to_text(kind))
        .unwrap_or("")
}
