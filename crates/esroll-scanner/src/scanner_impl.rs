//! Scanner implementation.
//!
//! `ScannerState` turns source text into tokens on demand. Trivia (whitespace,
//! line breaks and comments) is always skipped; whether a line break preceded
//! the current token is recorded in `TokenFlags` for automatic semicolon
//! insertion.
//!
//! Two tokens are context dependent and are re-scanned by the parser:
//! - `/` and `/=` become a regular expression literal via
//!   [`ScannerState::re_scan_slash_token`] where an expression is expected;
//! - `}` continues a template literal via
//!   [`ScannerState::re_scan_template_token`] after a `${ ... }` substitution.

use crate::char_codes::{
    is_binary_digit, is_digit, is_hex_digit, is_identifier_part, is_identifier_start,
    is_line_break, is_octal_digit, is_white_space_single_line,
};
use crate::syntax_kind::{SyntaxKind, string_to_token};
use bitflags::bitflags;
use esroll_common::Span;
use std::sync::Arc;

bitflags! {
    /// Per-token flags set by the scanner.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u32 {
        /// A line terminator appeared between the previous token and this one.
        const PRECEDING_LINE_BREAK = 1 << 0;
        /// String, template, comment or regex ran into end of input.
        const UNTERMINATED = 1 << 1;
        /// Numeric literal used an exponent (`1e3`).
        const SCIENTIFIC = 1 << 2;
        /// Numeric literal used a `0x`/`0o`/`0b` prefix.
        const RADIX_PREFIX = 1 << 3;
        /// Numeric literal contained `_` separators.
        const CONTAINS_SEPARATOR = 1 << 4;
    }
}

/// Saved scanner position for parser look-ahead.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: TokenFlags,
    error: Option<&'static str>,
}

pub struct ScannerState {
    text: Arc<str>,
    /// Current scan position (end of the current token).
    pos: usize,
    end: usize,
    token_start: usize,
    token: SyntaxKind,
    /// Cooked value for strings/templates, raw text for everything else.
    token_value: String,
    token_flags: TokenFlags,
    /// Message for the most recent `Unknown` or unterminated token.
    error: Option<&'static str>,
}

impl ScannerState {
    pub fn new(text: impl Into<Arc<str>>) -> ScannerState {
        let text: Arc<str> = text.into();
        let end = text.len();
        ScannerState {
            text,
            pos: 0,
            end,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: TokenFlags::empty(),
            error: None,
        }
    }

    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Start offset of the current token.
    #[inline]
    pub fn token_pos(&self) -> usize {
        self.token_start
    }

    /// End offset of the current token.
    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn token_span(&self) -> Span {
        Span::new(self.token_start as u32, self.pos as u32)
    }

    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Source text of the current token.
    pub fn token_text(&self) -> &str {
        self.text
            .get(self.token_start..self.pos)
            .unwrap_or_default()
    }

    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    /// Error message attached to the current token, if scanning it failed.
    pub fn token_error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
            error: self.error,
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.token_flags = snapshot.token_flags;
        self.error = snapshot.error;
    }

    /// Skip a `#!` interpreter line at the very start of the file.
    pub fn scan_shebang_trivia(&mut self) {
        if self.pos == 0 && self.text.starts_with("#!") {
            while self.pos < self.end {
                let (ch, len) = self.char_at(self.pos);
                if is_line_break(ch) {
                    break;
                }
                self.pos += len;
            }
        }
    }

    // =========================================================================
    // Character access
    // =========================================================================

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.text.as_bytes().get(pos).copied()
    }

    /// Decode the character at `pos` and its UTF-8 length. Past the end this
    /// returns `('\0', 0)`.
    #[inline]
    fn char_at(&self, pos: usize) -> (char, usize) {
        match self.byte_at(pos) {
            None => ('\0', 0),
            Some(b) if b < 0x80 => (b as char, 1),
            Some(_) => self.text[pos..]
                .chars()
                .next()
                .map(|c| (c, c.len_utf8()))
                .unwrap_or(('\0', 0)),
        }
    }

    #[inline]
    fn peek(&self, offset: usize) -> Option<u8> {
        self.byte_at(self.pos + offset)
    }

    fn finish(&mut self, kind: SyntaxKind, len: usize) -> SyntaxKind {
        self.pos += len;
        self.token = kind;
        kind
    }

    fn fail(&mut self, message: &'static str) -> SyntaxKind {
        self.error = Some(message);
        self.token = SyntaxKind::Unknown;
        SyntaxKind::Unknown
    }

    // =========================================================================
    // Main scan loop
    // =========================================================================

    /// Scan the next token, skipping trivia.
    pub fn scan(&mut self) -> SyntaxKind {
        self.token_flags = TokenFlags::empty();
        self.token_value.clear();
        self.error = None;
        if self.pos == 0 {
            self.scan_shebang_trivia();
        }

        loop {
            self.token_start = self.pos;
            if self.pos >= self.end {
                self.token = SyntaxKind::EndOfFileToken;
                return self.token;
            }

            let (ch, len) = self.char_at(self.pos);

            if is_line_break(ch) {
                self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                self.pos += len;
                continue;
            }
            if is_white_space_single_line(ch) {
                self.pos += len;
                continue;
            }

            return match ch {
                '/' => match self.peek(1) {
                    Some(b'/') => {
                        self.skip_single_line_comment();
                        continue;
                    }
                    Some(b'*') => {
                        if !self.skip_multi_line_comment() {
                            self.token_flags |= TokenFlags::UNTERMINATED;
                            return self.fail("'*/' expected.");
                        }
                        continue;
                    }
                    Some(b'=') => self.finish(SyntaxKind::SlashEqualsToken, 2),
                    _ => self.finish(SyntaxKind::SlashToken, 1),
                },
                '"' | '\'' => self.scan_string(ch),
                '`' => {
                    self.pos += 1;
                    self.scan_template(true)
                }
                '0'..='9' => self.scan_number(),
                '.' => {
                    if self.peek(1).is_some_and(|b| b.is_ascii_digit()) {
                        self.scan_number()
                    } else if self.peek(1) == Some(b'.') && self.peek(2) == Some(b'.') {
                        self.finish(SyntaxKind::DotDotDotToken, 3)
                    } else {
                        self.finish(SyntaxKind::DotToken, 1)
                    }
                }
                '#' => {
                    let (next, _) = self.char_at(self.pos + 1);
                    if is_identifier_start(next) {
                        self.pos += 1;
                        self.scan_identifier_rest();
                        self.token_value = self.token_text().to_string();
                        self.token = SyntaxKind::PrivateIdentifier;
                        self.token
                    } else {
                        self.pos += 1;
                        self.fail("Invalid character.")
                    }
                }
                _ if is_identifier_start(ch) => {
                    self.scan_identifier_rest();
                    self.token_value = self.token_text().to_string();
                    self.token = string_to_token(&self.token_value);
                    self.token
                }
                _ => self.scan_punctuation(ch, len),
            };
        }
    }

    fn scan_punctuation(&mut self, ch: char, len: usize) -> SyntaxKind {
        let p1 = self.peek(1);
        let p2 = self.peek(2);
        let p3 = self.peek(3);
        match ch {
            '{' => self.finish(SyntaxKind::OpenBraceToken, 1),
            '}' => self.finish(SyntaxKind::CloseBraceToken, 1),
            '(' => self.finish(SyntaxKind::OpenParenToken, 1),
            ')' => self.finish(SyntaxKind::CloseParenToken, 1),
            '[' => self.finish(SyntaxKind::OpenBracketToken, 1),
            ']' => self.finish(SyntaxKind::CloseBracketToken, 1),
            ';' => self.finish(SyntaxKind::SemicolonToken, 1),
            ',' => self.finish(SyntaxKind::CommaToken, 1),
            ':' => self.finish(SyntaxKind::ColonToken, 1),
            '~' => self.finish(SyntaxKind::TildeToken, 1),
            '@' => self.finish(SyntaxKind::AtToken, 1),
            '?' => match (p1, p2) {
                (Some(b'?'), Some(b'=')) => self.finish(SyntaxKind::QuestionQuestionEqualsToken, 3),
                (Some(b'?'), _) => self.finish(SyntaxKind::QuestionQuestionToken, 2),
                // `a?.5:b` is a conditional, not optional chaining
                (Some(b'.'), next) if !next.is_some_and(|b| b.is_ascii_digit()) => {
                    self.finish(SyntaxKind::QuestionDotToken, 2)
                }
                _ => self.finish(SyntaxKind::QuestionToken, 1),
            },
            '=' => match (p1, p2) {
                (Some(b'='), Some(b'=')) => self.finish(SyntaxKind::EqualsEqualsEqualsToken, 3),
                (Some(b'='), _) => self.finish(SyntaxKind::EqualsEqualsToken, 2),
                (Some(b'>'), _) => self.finish(SyntaxKind::EqualsGreaterThanToken, 2),
                _ => self.finish(SyntaxKind::EqualsToken, 1),
            },
            '!' => match (p1, p2) {
                (Some(b'='), Some(b'=')) => {
                    self.finish(SyntaxKind::ExclamationEqualsEqualsToken, 3)
                }
                (Some(b'='), _) => self.finish(SyntaxKind::ExclamationEqualsToken, 2),
                _ => self.finish(SyntaxKind::ExclamationToken, 1),
            },
            '+' => match p1 {
                Some(b'+') => self.finish(SyntaxKind::PlusPlusToken, 2),
                Some(b'=') => self.finish(SyntaxKind::PlusEqualsToken, 2),
                _ => self.finish(SyntaxKind::PlusToken, 1),
            },
            '-' => match p1 {
                Some(b'-') => self.finish(SyntaxKind::MinusMinusToken, 2),
                Some(b'=') => self.finish(SyntaxKind::MinusEqualsToken, 2),
                _ => self.finish(SyntaxKind::MinusToken, 1),
            },
            '*' => match (p1, p2) {
                (Some(b'*'), Some(b'=')) => {
                    self.finish(SyntaxKind::AsteriskAsteriskEqualsToken, 3)
                }
                (Some(b'*'), _) => self.finish(SyntaxKind::AsteriskAsteriskToken, 2),
                (Some(b'='), _) => self.finish(SyntaxKind::AsteriskEqualsToken, 2),
                _ => self.finish(SyntaxKind::AsteriskToken, 1),
            },
            '%' => match p1 {
                Some(b'=') => self.finish(SyntaxKind::PercentEqualsToken, 2),
                _ => self.finish(SyntaxKind::PercentToken, 1),
            },
            '&' => match (p1, p2) {
                (Some(b'&'), Some(b'=')) => {
                    self.finish(SyntaxKind::AmpersandAmpersandEqualsToken, 3)
                }
                (Some(b'&'), _) => self.finish(SyntaxKind::AmpersandAmpersandToken, 2),
                (Some(b'='), _) => self.finish(SyntaxKind::AmpersandEqualsToken, 2),
                _ => self.finish(SyntaxKind::AmpersandToken, 1),
            },
            '|' => match (p1, p2) {
                (Some(b'|'), Some(b'=')) => self.finish(SyntaxKind::BarBarEqualsToken, 3),
                (Some(b'|'), _) => self.finish(SyntaxKind::BarBarToken, 2),
                (Some(b'='), _) => self.finish(SyntaxKind::BarEqualsToken, 2),
                _ => self.finish(SyntaxKind::BarToken, 1),
            },
            '^' => match p1 {
                Some(b'=') => self.finish(SyntaxKind::CaretEqualsToken, 2),
                _ => self.finish(SyntaxKind::CaretToken, 1),
            },
            '<' => match (p1, p2) {
                (Some(b'<'), Some(b'=')) => {
                    self.finish(SyntaxKind::LessThanLessThanEqualsToken, 3)
                }
                (Some(b'<'), _) => self.finish(SyntaxKind::LessThanLessThanToken, 2),
                (Some(b'='), _) => self.finish(SyntaxKind::LessThanEqualsToken, 2),
                _ => self.finish(SyntaxKind::LessThanToken, 1),
            },
            '>' => match (p1, p2, p3) {
                (Some(b'>'), Some(b'>'), Some(b'=')) => {
                    self.finish(SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken, 4)
                }
                (Some(b'>'), Some(b'>'), _) => {
                    self.finish(SyntaxKind::GreaterThanGreaterThanGreaterThanToken, 3)
                }
                (Some(b'>'), Some(b'='), _) => {
                    self.finish(SyntaxKind::GreaterThanGreaterThanEqualsToken, 3)
                }
                (Some(b'>'), _, _) => self.finish(SyntaxKind::GreaterThanGreaterThanToken, 2),
                (Some(b'='), _, _) => self.finish(SyntaxKind::GreaterThanEqualsToken, 2),
                _ => self.finish(SyntaxKind::GreaterThanToken, 1),
            },
            _ => {
                self.pos += len;
                self.fail("Invalid character.")
            }
        }
    }

    // =========================================================================
    // Trivia
    // =========================================================================

    fn skip_single_line_comment(&mut self) {
        self.pos += 2;
        while self.pos < self.end {
            let (ch, len) = self.char_at(self.pos);
            if is_line_break(ch) {
                break;
            }
            self.pos += len;
        }
    }

    /// Returns false when the comment is unterminated.
    fn skip_multi_line_comment(&mut self) -> bool {
        self.pos += 2;
        while self.pos < self.end {
            if self.byte_at(self.pos) == Some(b'*') && self.peek(1) == Some(b'/') {
                self.pos += 2;
                return true;
            }
            let (ch, len) = self.char_at(self.pos);
            if is_line_break(ch) {
                self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
            }
            self.pos += len;
        }
        false
    }

    // =========================================================================
    // Names
    // =========================================================================

    fn scan_identifier_rest(&mut self) {
        // First character is already known to be an identifier start.
        let (_, len) = self.char_at(self.pos);
        self.pos += len;
        while self.pos < self.end {
            let (ch, len) = self.char_at(self.pos);
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += len;
        }
    }

    // =========================================================================
    // Literals
    // =========================================================================

    fn scan_digits(&mut self, is_valid: fn(char) -> bool) -> usize {
        let start = self.pos;
        while self.pos < self.end {
            let (ch, _) = self.char_at(self.pos);
            if is_valid(ch) {
                self.pos += 1;
            } else if ch == '_' && self.pos > start {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
                self.pos += 1;
            } else {
                break;
            }
        }
        self.pos - start
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let radix_digit: Option<fn(char) -> bool> = match (self.byte_at(self.pos), self.peek(1)) {
            (Some(b'0'), Some(b'x' | b'X')) => Some(is_hex_digit),
            (Some(b'0'), Some(b'o' | b'O')) => Some(is_octal_digit),
            (Some(b'0'), Some(b'b' | b'B')) => Some(is_binary_digit),
            _ => None,
        };

        let mut is_integer = true;
        if let Some(is_valid) = radix_digit {
            self.token_flags |= TokenFlags::RADIX_PREFIX;
            self.pos += 2;
            if self.scan_digits(is_valid) == 0 {
                self.token_value = self.token_text().to_string();
                return self.fail("Digit expected.");
            }
        } else {
            self.scan_digits(is_digit);
            if self.byte_at(self.pos) == Some(b'.') {
                is_integer = false;
                self.pos += 1;
                self.scan_digits(is_digit);
            }
            if matches!(self.byte_at(self.pos), Some(b'e' | b'E')) {
                is_integer = false;
                self.token_flags |= TokenFlags::SCIENTIFIC;
                self.pos += 1;
                if matches!(self.byte_at(self.pos), Some(b'+' | b'-')) {
                    self.pos += 1;
                }
                if self.scan_digits(is_digit) == 0 {
                    self.token_value = self.token_text().to_string();
                    return self.fail("Digit expected.");
                }
            }
        }

        if is_integer && self.byte_at(self.pos) == Some(b'n') {
            self.pos += 1;
            self.token_value = self.token_text().to_string();
            self.token = SyntaxKind::BigIntLiteral;
            return self.token;
        }

        self.token_value = self.token_text().to_string();
        let (next, _) = self.char_at(self.pos);
        if is_identifier_start(next) {
            return self.fail("An identifier or keyword cannot immediately follow a numeric literal.");
        }
        self.token = SyntaxKind::NumericLiteral;
        self.token
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        self.pos += 1;
        let mut value = String::new();
        loop {
            if self.pos >= self.end {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.token_value = value;
                return self.fail("Unterminated string literal.");
            }
            let (ch, len) = self.char_at(self.pos);
            if ch == quote {
                self.pos += len;
                break;
            }
            if ch == '\\' {
                self.pos += 1;
                self.scan_escape_sequence(&mut value);
                continue;
            }
            if ch == '\n' || ch == '\r' {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.token_value = value;
                return self.fail("Unterminated string literal.");
            }
            value.push(ch);
            self.pos += len;
        }
        self.token_value = value;
        self.token = SyntaxKind::StringLiteral;
        self.token
    }

    /// Scan an escape after its backslash, appending the cooked character.
    /// Malformed escapes are kept verbatim; only the value is affected.
    fn scan_escape_sequence(&mut self, out: &mut String) {
        let (ch, len) = self.char_at(self.pos);
        self.pos += len;
        match ch {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'v' => out.push('\u{0B}'),
            '0' if !self.peek(0).is_some_and(|b| b.is_ascii_digit()) => out.push('\0'),
            'x' => {
                let code = self.scan_hex_value(2, 2);
                out.extend(code.and_then(char::from_u32));
            }
            'u' => {
                let code = if self.byte_at(self.pos) == Some(b'{') {
                    self.pos += 1;
                    let code = self.scan_hex_value(1, 6);
                    if self.byte_at(self.pos) == Some(b'}') {
                        self.pos += 1;
                    }
                    code
                } else {
                    self.scan_hex_value(4, 4)
                };
                out.extend(code.and_then(char::from_u32));
            }
            // Line continuation
            '\r' => {
                if self.byte_at(self.pos) == Some(b'\n') {
                    self.pos += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            '\0' if len == 0 => {}
            other => out.push(other),
        }
    }

    fn scan_hex_value(&mut self, min: usize, max: usize) -> Option<u32> {
        let start = self.pos;
        while self.pos - start < max && self.byte_at(self.pos).is_some_and(|b| b.is_ascii_hexdigit()) {
            self.pos += 1;
        }
        if self.pos - start < min {
            return None;
        }
        u32::from_str_radix(&self.text[start..self.pos], 16).ok()
    }

    /// Scan template characters up to the next `` ` `` or `${`.
    /// `pos` must point just past the opening `` ` `` or `}`.
    fn scan_template(&mut self, is_head: bool) -> SyntaxKind {
        let mut value = String::new();
        loop {
            if self.pos >= self.end {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.token_value = value;
                return self.fail("Unterminated template literal.");
            }
            let (ch, len) = self.char_at(self.pos);
            if ch == '`' {
                self.pos += 1;
                self.token_value = value;
                self.token = if is_head {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                } else {
                    SyntaxKind::TemplateTail
                };
                return self.token;
            }
            if ch == '$' && self.peek(1) == Some(b'{') {
                self.pos += 2;
                self.token_value = value;
                self.token = if is_head {
                    SyntaxKind::TemplateHead
                } else {
                    SyntaxKind::TemplateMiddle
                };
                return self.token;
            }
            if ch == '\\' {
                self.pos += 1;
                self.scan_escape_sequence(&mut value);
                continue;
            }
            value.push(ch);
            self.pos += len;
        }
    }

    // =========================================================================
    // Re-scanning
    // =========================================================================

    /// Re-scan a `/` or `/=` token as a regular expression literal.
    pub fn re_scan_slash_token(&mut self) -> SyntaxKind {
        if !matches!(
            self.token,
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken
        ) {
            return self.token;
        }

        self.pos = self.token_start + 1;
        let mut in_character_class = false;
        loop {
            if self.pos >= self.end {
                self.token_flags |= TokenFlags::UNTERMINATED;
                return self.fail("Unterminated regular expression literal.");
            }
            let (ch, len) = self.char_at(self.pos);
            if is_line_break(ch) {
                self.token_flags |= TokenFlags::UNTERMINATED;
                return self.fail("Unterminated regular expression literal.");
            }
            self.pos += len;
            match ch {
                '\\' => {
                    let (escaped, len) = self.char_at(self.pos);
                    if is_line_break(escaped) || len == 0 {
                        continue;
                    }
                    self.pos += len;
                }
                '[' => in_character_class = true,
                ']' => in_character_class = false,
                '/' if !in_character_class => break,
                _ => {}
            }
        }

        // Flags
        while self.pos < self.end {
            let (ch, len) = self.char_at(self.pos);
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += len;
        }

        self.token_value = self.token_text().to_string();
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }

    /// Re-scan a `}` token as the continuation of a template literal.
    pub fn re_scan_template_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::CloseBraceToken {
            return self.token;
        }
        self.pos = self.token_start + 1;
        self.scan_template(false)
    }
}
