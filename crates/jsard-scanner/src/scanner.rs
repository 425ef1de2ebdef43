//! Scanner state machine.
//!
//! Tokenizes ES5 JavaScript on demand. The parser pulls one token at a time
//! with [`ScannerState::scan`] and asks for a regular expression re-scan when
//! a `/` appears where an expression may start.

use crate::syntax_kind::{SyntaxKind, text_to_keyword};
use jsard_common::diagnostic_codes;

/// The first lexical error encountered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanError {
    pub code: u32,
    pub message: String,
    pub pos: u32,
}

/// Saved scanner state for look-ahead.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    preceding_line_break: bool,
    error: Option<ScanError>,
}

pub struct ScannerState {
    source: String,
    pos: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    preceding_line_break: bool,
    error: Option<ScanError>,
}

#[inline]
fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[inline]
fn is_white_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\u{b}' | '\u{c}' | '\u{a0}' | '\u{feff}')
        || (!ch.is_ascii() && ch.is_whitespace() && !is_line_terminator(ch))
}

#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == '$' || ch == '_' || ch.is_ascii_alphabetic() || (!ch.is_ascii() && ch.is_alphabetic())
}

#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch)
        || ch.is_ascii_digit()
        || matches!(ch, '\u{200c}' | '\u{200d}')
        || (!ch.is_ascii() && ch.is_alphanumeric())
}

impl ScannerState {
    pub fn new(source: String) -> ScannerState {
        ScannerState {
            source,
            pos: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            preceding_line_break: false,
            error: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn source_text(&self) -> &str {
        &self.source
    }

    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    pub fn get_token_pos(&self) -> u32 {
        self.token_start as u32
    }

    pub fn get_token_end(&self) -> u32 {
        self.pos as u32
    }

    /// Raw source text of the current token.
    pub fn get_token_text(&self) -> &str {
        &self.source[self.token_start..self.pos]
    }

    /// Cooked value of the current token: unescaped contents for strings,
    /// raw text for everything else.
    pub fn get_token_value(&self) -> &str {
        &self.token_value
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.preceding_line_break
    }

    pub fn error(&self) -> Option<&ScanError> {
        self.error.as_ref()
    }

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            preceding_line_break: self.preceding_line_break,
            error: self.error.clone(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.preceding_line_break = snapshot.preceding_line_break;
        self.error = snapshot.error;
    }

    // =========================================================================
    // Character helpers
    // =========================================================================

    #[inline]
    fn char_at(&self, pos: usize) -> Option<char> {
        self.source.get(pos..)?.chars().next()
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.source.as_bytes().get(pos).copied()
    }

    fn report(&mut self, code: u32, message: impl Into<String>, pos: usize) {
        if self.error.is_none() {
            self.error = Some(ScanError {
                code,
                message: message.into(),
                pos: pos as u32,
            });
        }
    }

    fn finish(&mut self, kind: SyntaxKind, len: usize) -> SyntaxKind {
        self.pos += len;
        self.token = kind;
        self.token_value.clear();
        self.token_value
            .push_str(&self.source[self.token_start..self.pos]);
        kind
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Scan the next token, skipping whitespace and comments.
    pub fn scan(&mut self) -> SyntaxKind {
        self.preceding_line_break = false;
        loop {
            self.token_start = self.pos;
            let Some(ch) = self.char_at(self.pos) else {
                self.token = SyntaxKind::EndOfFileToken;
                self.token_value.clear();
                return self.token;
            };

            if is_line_terminator(ch) {
                self.preceding_line_break = true;
                self.pos += ch.len_utf8();
                continue;
            }
            if is_white_space(ch) {
                self.pos += ch.len_utf8();
                continue;
            }

            return match ch {
                '/' => match self.byte_at(self.pos + 1) {
                    Some(b'/') => {
                        self.skip_line_comment();
                        continue;
                    }
                    Some(b'*') => {
                        self.skip_block_comment();
                        continue;
                    }
                    Some(b'=') => self.finish(SyntaxKind::SlashEqualsToken, 2),
                    _ => self.finish(SyntaxKind::SlashToken, 1),
                },
                '"' | '\'' => self.scan_string(ch),
                '0'..='9' => self.scan_number(),
                '.' => {
                    if self.byte_at(self.pos + 1).is_some_and(|b| b.is_ascii_digit()) {
                        self.scan_number()
                    } else {
                        self.finish(SyntaxKind::DotToken, 1)
                    }
                }
                '\\' => self.scan_identifier(),
                c if is_identifier_start(c) => self.scan_identifier(),
                _ => self.scan_punctuation(ch),
            };
        }
    }

    fn skip_line_comment(&mut self) {
        self.pos += 2;
        while let Some(ch) = self.char_at(self.pos) {
            if is_line_terminator(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn skip_block_comment(&mut self) {
        let start = self.pos;
        self.pos += 2;
        loop {
            let Some(ch) = self.char_at(self.pos) else {
                self.report(
                    diagnostic_codes::UNTERMINATED_COMMENT,
                    "'*/' expected.",
                    start,
                );
                return;
            };
            if ch == '*' && self.byte_at(self.pos + 1) == Some(b'/') {
                self.pos += 2;
                return;
            }
            if is_line_terminator(ch) {
                self.preceding_line_break = true;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn scan_punctuation(&mut self, ch: char) -> SyntaxKind {
        let next = self.byte_at(self.pos + 1);
        let next2 = self.byte_at(self.pos + 2);
        let next3 = self.byte_at(self.pos + 3);

        let (kind, len) = match ch {
            '{' => (SyntaxKind::OpenBraceToken, 1),
            '}' => (SyntaxKind::CloseBraceToken, 1),
            '(' => (SyntaxKind::OpenParenToken, 1),
            ')' => (SyntaxKind::CloseParenToken, 1),
            '[' => (SyntaxKind::OpenBracketToken, 1),
            ']' => (SyntaxKind::CloseBracketToken, 1),
            ';' => (SyntaxKind::SemicolonToken, 1),
            ',' => (SyntaxKind::CommaToken, 1),
            '?' => (SyntaxKind::QuestionToken, 1),
            ':' => (SyntaxKind::ColonToken, 1),
            '~' => (SyntaxKind::TildeToken, 1),
            '<' => match (next, next2) {
                (Some(b'<'), Some(b'=')) => (SyntaxKind::LessThanLessThanEqualsToken, 3),
                (Some(b'<'), _) => (SyntaxKind::LessThanLessThanToken, 2),
                (Some(b'='), _) => (SyntaxKind::LessThanEqualsToken, 2),
                _ => (SyntaxKind::LessThanToken, 1),
            },
            '>' => match (next, next2, next3) {
                (Some(b'>'), Some(b'>'), Some(b'=')) => {
                    (SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken, 4)
                }
                (Some(b'>'), Some(b'>'), _) => {
                    (SyntaxKind::GreaterThanGreaterThanGreaterThanToken, 3)
                }
                (Some(b'>'), Some(b'='), _) => (SyntaxKind::GreaterThanGreaterThanEqualsToken, 3),
                (Some(b'>'), _, _) => (SyntaxKind::GreaterThanGreaterThanToken, 2),
                (Some(b'='), _, _) => (SyntaxKind::GreaterThanEqualsToken, 2),
                _ => (SyntaxKind::GreaterThanToken, 1),
            },
            '=' => match (next, next2) {
                (Some(b'='), Some(b'=')) => (SyntaxKind::EqualsEqualsEqualsToken, 3),
                (Some(b'='), _) => (SyntaxKind::EqualsEqualsToken, 2),
                _ => (SyntaxKind::EqualsToken, 1),
            },
            '!' => match (next, next2) {
                (Some(b'='), Some(b'=')) => (SyntaxKind::ExclamationEqualsEqualsToken, 3),
                (Some(b'='), _) => (SyntaxKind::ExclamationEqualsToken, 2),
                _ => (SyntaxKind::ExclamationToken, 1),
            },
            '+' => match next {
                Some(b'+') => (SyntaxKind::PlusPlusToken, 2),
                Some(b'=') => (SyntaxKind::PlusEqualsToken, 2),
                _ => (SyntaxKind::PlusToken, 1),
            },
            '-' => match next {
                Some(b'-') => (SyntaxKind::MinusMinusToken, 2),
                Some(b'=') => (SyntaxKind::MinusEqualsToken, 2),
                _ => (SyntaxKind::MinusToken, 1),
            },
            '*' => match next {
                Some(b'=') => (SyntaxKind::AsteriskEqualsToken, 2),
                _ => (SyntaxKind::AsteriskToken, 1),
            },
            '%' => match next {
                Some(b'=') => (SyntaxKind::PercentEqualsToken, 2),
                _ => (SyntaxKind::PercentToken, 1),
            },
            '&' => match next {
                Some(b'&') => (SyntaxKind::AmpersandAmpersandToken, 2),
                Some(b'=') => (SyntaxKind::AmpersandEqualsToken, 2),
                _ => (SyntaxKind::AmpersandToken, 1),
            },
            '|' => match next {
                Some(b'|') => (SyntaxKind::BarBarToken, 2),
                Some(b'=') => (SyntaxKind::BarEqualsToken, 2),
                _ => (SyntaxKind::BarToken, 1),
            },
            '^' => match next {
                Some(b'=') => (SyntaxKind::CaretEqualsToken, 2),
                _ => (SyntaxKind::CaretToken, 1),
            },
            _ => {
                self.report(
                    diagnostic_codes::INVALID_CHARACTER,
                    format!("Invalid character '{}'.", ch.escape_debug()),
                    self.pos,
                );
                return self.finish(SyntaxKind::Unknown, ch.len_utf8());
            }
        };
        self.finish(kind, len)
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        while let Some(ch) = self.char_at(self.pos) {
            if ch == '\\' {
                // \uXXXX or \u{X...}; kept raw in the token text
                if self.byte_at(self.pos + 1) != Some(b'u') {
                    self.report(
                        diagnostic_codes::INVALID_CHARACTER,
                        "Invalid character '\\'.",
                        self.pos,
                    );
                    self.pos += 1;
                    break;
                }
                self.pos += 2;
                if self.byte_at(self.pos) == Some(b'{') {
                    while let Some(b) = self.byte_at(self.pos) {
                        self.pos += 1;
                        if b == b'}' {
                            break;
                        }
                    }
                } else {
                    let mut digits = 0;
                    while digits < 4 && self.byte_at(self.pos).is_some_and(|b| b.is_ascii_hexdigit()) {
                        self.pos += 1;
                        digits += 1;
                    }
                }
                continue;
            }
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }

        let text = &self.source[self.token_start..self.pos];
        self.token = text_to_keyword(text).unwrap_or(SyntaxKind::Identifier);
        self.token_value.clear();
        self.token_value.push_str(text);
        self.token
    }

    fn scan_digits(&mut self, radix: u32) {
        while let Some(b) = self.byte_at(self.pos) {
            if (b as char).is_digit(radix) {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        if self.byte_at(self.pos) == Some(b'0') {
            let radix = match self.byte_at(self.pos + 1) {
                Some(b'x' | b'X') => Some(16),
                Some(b'o' | b'O') => Some(8),
                Some(b'b' | b'B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.pos += 2;
                self.scan_digits(radix);
                return self.finish(SyntaxKind::NumericLiteral, 0);
            }
        }

        self.scan_digits(10);
        if self.byte_at(self.pos) == Some(b'.') {
            self.pos += 1;
            self.scan_digits(10);
        }
        if matches!(self.byte_at(self.pos), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.byte_at(self.pos), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.byte_at(self.pos).is_some_and(|b| b.is_ascii_digit()) {
                self.scan_digits(10);
            } else {
                self.pos = mark;
            }
        }
        self.finish(SyntaxKind::NumericLiteral, 0)
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        let mut value = String::new();
        self.pos += 1;
        loop {
            let Some(ch) = self.char_at(self.pos) else {
                self.report(
                    diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                    "Unterminated string literal.",
                    self.token_start,
                );
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if is_line_terminator(ch) && ch != '\u{2028}' && ch != '\u{2029}' {
                self.report(
                    diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                    "Unterminated string literal.",
                    self.token_start,
                );
                break;
            }
            if ch == '\\' {
                self.pos += 1;
                self.scan_escape_sequence(&mut value);
                continue;
            }
            value.push(ch);
            self.pos += ch.len_utf8();
        }

        self.token = SyntaxKind::StringLiteral;
        self.token_value = value;
        self.token
    }

    fn read_hex(&mut self, count: usize) -> Option<u32> {
        let digits = self.source.get(self.pos..self.pos + count)?;
        let value = u32::from_str_radix(digits, 16).ok()?;
        self.pos += count;
        Some(value)
    }

    fn scan_escape_sequence(&mut self, value: &mut String) {
        let Some(ch) = self.char_at(self.pos) else {
            return;
        };
        self.pos += ch.len_utf8();
        match ch {
            'n' => value.push('\n'),
            't' => value.push('\t'),
            'r' => value.push('\r'),
            'b' => value.push('\u{8}'),
            'f' => value.push('\u{c}'),
            'v' => value.push('\u{b}'),
            '\r' => {
                // line continuation
                if self.byte_at(self.pos) == Some(b'\n') {
                    self.pos += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            'x' => match self.read_hex(2).and_then(char::from_u32) {
                Some(c) => value.push(c),
                None => value.push('x'),
            },
            'u' => {
                let code = if self.byte_at(self.pos) == Some(b'{') {
                    let close = self.source[self.pos..].find('}').map(|i| self.pos + i);
                    close.and_then(|close| {
                        let code = u32::from_str_radix(&self.source[self.pos + 1..close], 16).ok();
                        self.pos = close + 1;
                        code
                    })
                } else {
                    self.read_hex(4)
                };
                match code {
                    Some(code) => value.push(char::from_u32(code).unwrap_or('\u{fffd}')),
                    None => value.push('u'),
                }
            }
            '0'..='7' => {
                let mut code = ch as u32 - '0' as u32;
                let max_digits = if ch <= '3' { 2 } else { 1 };
                for _ in 0..max_digits {
                    match self.byte_at(self.pos) {
                        Some(b @ b'0'..=b'7') => {
                            code = code * 8 + (b - b'0') as u32;
                            self.pos += 1;
                        }
                        _ => break,
                    }
                }
                value.push(char::from_u32(code).unwrap_or('\u{fffd}'));
            }
            other => value.push(other),
        }
    }

    /// Re-scan the current `/` or `/=` token as a regular expression literal.
    ///
    /// Called by the parser in positions where an expression may start.
    pub fn re_scan_slash_token(&mut self) -> SyntaxKind {
        if !matches!(
            self.token,
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken
        ) {
            return self.token;
        }

        self.pos = self.token_start + 1;
        let mut in_class = false;
        loop {
            let Some(ch) = self.char_at(self.pos) else {
                self.report(
                    diagnostic_codes::UNTERMINATED_REGULAR_EXPRESSION,
                    "Unterminated regular expression literal.",
                    self.token_start,
                );
                break;
            };
            if is_line_terminator(ch) {
                self.report(
                    diagnostic_codes::UNTERMINATED_REGULAR_EXPRESSION,
                    "Unterminated regular expression literal.",
                    self.token_start,
                );
                break;
            }
            self.pos += ch.len_utf8();
            match ch {
                '\\' => {
                    if let Some(escaped) = self.char_at(self.pos)
                        && !is_line_terminator(escaped)
                    {
                        self.pos += escaped.len_utf8();
                    }
                }
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => break,
                _ => {}
            }
        }

        while let Some(ch) = self.char_at(self.pos) {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }

        self.finish(SyntaxKind::RegularExpressionLiteral, 0)
    }
}

/// Numeric value of a numeric literal's source text.
///
/// Handles decimal, exponent, hex (`0x`), octal (`0o`, legacy `017`) and
/// binary (`0b`) forms. Returns `None` for text that is not a valid literal.
pub fn parse_numeric_literal(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    if bytes.len() > 2 && bytes[0] == b'0' {
        let radix = match bytes[1] {
            b'x' | b'X' => Some(16),
            b'o' | b'O' => Some(8),
            b'b' | b'B' => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            return parse_radix(&text[2..], radix);
        }
    }
    if bytes.len() > 1 && bytes[0] == b'0' && bytes.iter().all(|b| (b'0'..=b'7').contains(b)) {
        return parse_radix(&text[1..], 8);
    }
    text.parse::<f64>().ok()
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    let mut value = 0f64;
    for ch in digits.chars() {
        value = value * radix as f64 + ch.to_digit(radix)? as f64;
    }
    Some(value)
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod scanner_tests;
