//! Parser state: token cursor, diagnostics and shared helpers.
//!
//! The parser is a hand-written recursive descent parser over the scanner's
//! token stream. Parse methods are split by grammar area:
//! - `state_statements.rs` - statements and module items
//! - `state_expressions.rs` - expressions and templates
//! - `state_declarations.rs` - functions, classes and binding patterns
//!
//! Parsing stops at the first syntax error; the error is returned as a
//! [`ParseDiagnostic`].

use super::node::{NodeData, NodeIndex};
use super::node_arena::NodeArena;
use esroll_common::Span;
use esroll_common::limits::MAX_PARSE_DEPTH;
use esroll_scanner::{
    ScannerState, SyntaxKind, token_is_contextual_keyword, token_is_identifier_or_keyword,
    token_to_display,
};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// `in` is not a binary operator here (the init clause of a `for`).
pub const CONTEXT_FLAG_DISALLOW_IN: u32 = 1 << 0;

/// A syntax error at a byte range of the module source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub message: String,
    pub span: Span,
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseDiagnostic {}

pub type ParseResult<T> = Result<T, ParseDiagnostic>;

/// A successfully parsed module.
#[derive(Debug)]
pub struct ParsedModule {
    pub arena: NodeArena,
    /// The `Program` node.
    pub root: NodeIndex,
    pub source: Arc<str>,
}

impl ParsedModule {
    /// Top-level statements in source order.
    pub fn statements(&self) -> &[NodeIndex] {
        match self.arena.data(self.root) {
            Some(NodeData::Program { body }) => body,
            _ => &[],
        }
    }
}

/// Parse ECMAScript module source text.
pub fn parse_module(source: impl Into<Arc<str>>) -> ParseResult<ParsedModule> {
    let mut parser = ParserState::new(source.into());
    let root = parser.parse_program()?;
    let ParserState { arena, scanner, .. } = parser;
    Ok(ParsedModule {
        arena,
        root,
        source: scanner.source_text_arc(),
    })
}

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) current_token: SyntaxKind,
    /// End of the last consumed token; node ends are taken from here.
    pub(crate) prev_token_end: u32,
    pub(crate) context_flags: u32,
    pub(crate) recursion_depth: u32,
}

impl ParserState {
    pub fn new(source: Arc<str>) -> ParserState {
        let arena = NodeArena::for_source_len(source.len());
        ParserState {
            scanner: ScannerState::new(source),
            arena,
            current_token: SyntaxKind::Unknown,
            prev_token_end: 0,
            context_flags: 0,
            recursion_depth: 0,
        }
    }

    /// Parse the whole module into a `Program` node.
    pub fn parse_program(&mut self) -> ParseResult<NodeIndex> {
        self.scanner.scan_shebang_trivia();
        self.next_token();

        let mut body = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            body.push(self.parse_module_item()?);
        }

        let end = self.scanner.source_text().len() as u32;
        debug!(
            nodes = self.arena.len(),
            statements = body.len(),
            "parsed module"
        );
        Ok(self.arena.add(0, end, NodeData::Program { body }))
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    /// Start offset of the current token.
    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_pos() as u32
    }

    #[inline]
    pub(crate) fn token_value(&self) -> &str {
        self.scanner.token_value()
    }

    #[inline]
    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end() as u32;
        self.current_token = self.scanner.scan();
        self.current_token
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> ParseResult<()> {
        if self.parse_optional(kind) {
            Ok(())
        } else {
            Err(self.error_at_current_token(format!("'{}' expected.", token_to_display(kind))))
        }
    }

    /// Consume a statement terminator, applying automatic semicolon insertion.
    pub(crate) fn parse_semicolon(&mut self) -> ParseResult<()> {
        if self.parse_optional(SyntaxKind::SemicolonToken) || self.can_insert_semicolon() {
            Ok(())
        } else {
            Err(self.error_at_current_token("';' expected."))
        }
    }

    pub(crate) fn can_insert_semicolon(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
    }

    /// Re-scan the current `/` or `/=` as a regular expression.
    pub(crate) fn re_scan_slash_token(&mut self) -> SyntaxKind {
        self.current_token = self.scanner.re_scan_slash_token();
        self.current_token
    }

    /// Re-scan the current `}` as a template continuation.
    pub(crate) fn re_scan_template_token(&mut self) -> SyntaxKind {
        self.current_token = self.scanner.re_scan_template_token();
        self.current_token
    }

    /// Run `f` and rewind the cursor afterwards.
    pub(crate) fn look_ahead(&mut self, f: impl FnOnce(&mut ParserState) -> bool) -> bool {
        let snapshot = self.scanner.save_state();
        let current = self.current_token;
        let prev_end = self.prev_token_end;
        let result = f(self);
        self.scanner.restore_state(snapshot);
        self.current_token = current;
        self.prev_token_end = prev_end;
        result
    }

    /// Whether the token after the current one is `kind` on the same line.
    pub(crate) fn next_token_is_on_same_line(&mut self, kind: SyntaxKind) -> bool {
        self.look_ahead(|p| p.next_token() == kind && !p.has_preceding_line_break())
    }

    // =========================================================================
    // Nodes and diagnostics
    // =========================================================================

    /// Add a node spanning from `start` to the end of the last consumed token.
    #[inline]
    pub(crate) fn finish_node(&mut self, start: u32, data: NodeData) -> NodeIndex {
        self.arena.add(start, self.prev_token_end, data)
    }

    pub(crate) fn error_at_current_token(&self, message: impl Into<String>) -> ParseDiagnostic {
        let message = match (self.current_token, self.scanner.token_error()) {
            (SyntaxKind::Unknown, Some(scan_error)) => scan_error.to_string(),
            _ => message.into(),
        };
        ParseDiagnostic {
            message,
            span: self.scanner.token_span(),
        }
    }

    pub(crate) fn enter_recursion(&mut self) -> ParseResult<()> {
        if self.recursion_depth >= MAX_PARSE_DEPTH {
            return Err(self.error_at_current_token("Maximum nesting depth exceeded."));
        }
        self.recursion_depth += 1;
        Ok(())
    }

    #[inline]
    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    #[inline]
    pub(crate) fn in_disallow_in_context(&self) -> bool {
        self.context_flags & CONTEXT_FLAG_DISALLOW_IN != 0
    }

    /// Run `f` with `in` allowed or disallowed as an operator.
    pub(crate) fn with_disallow_in<T>(
        &mut self,
        disallow: bool,
        f: impl FnOnce(&mut ParserState) -> T,
    ) -> T {
        let saved = self.context_flags;
        if disallow {
            self.context_flags |= CONTEXT_FLAG_DISALLOW_IN;
        } else {
            self.context_flags &= !CONTEXT_FLAG_DISALLOW_IN;
        }
        let result = f(self);
        self.context_flags = saved;
        result
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// Whether the current token can be used as a binding or reference name.
    /// `await` and `yield` are reserved in module code.
    pub(crate) fn is_identifier(&self) -> bool {
        match self.token() {
            SyntaxKind::Identifier => true,
            SyntaxKind::AwaitKeyword | SyntaxKind::YieldKeyword => false,
            kind => token_is_contextual_keyword(kind),
        }
    }

    pub(crate) fn is_identifier_or_keyword(&self) -> bool {
        token_is_identifier_or_keyword(self.token())
    }

    /// Consume an identifier and return its text.
    pub(crate) fn parse_identifier_text(&mut self) -> ParseResult<String> {
        if !self.is_identifier() {
            return Err(self.error_at_current_token("Identifier expected."));
        }
        let name = self.token_value().to_string();
        self.next_token();
        Ok(name)
    }

    /// Consume an identifier name (keywords allowed) and return its text.
    pub(crate) fn parse_identifier_name_text(&mut self) -> ParseResult<String> {
        if !self.is_identifier_or_keyword() {
            return Err(self.error_at_current_token("Identifier expected."));
        }
        let name = self.token_value().to_string();
        self.next_token();
        Ok(name)
    }

    /// Parse an `Identifier` node for a binding or reference.
    pub(crate) fn parse_identifier(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let name = self.parse_identifier_text()?;
        Ok(self.finish_node(start, NodeData::Identifier { name }))
    }

    /// Parse an `Identifier` node where any identifier name is allowed
    /// (the non-computed property of a member expression).
    pub(crate) fn parse_identifier_name(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let name = self.parse_identifier_name_text()?;
        Ok(self.finish_node(start, NodeData::Identifier { name }))
    }

    /// A module export name: an identifier name or a string literal.
    pub(crate) fn parse_module_export_name(&mut self) -> ParseResult<String> {
        if self.is_token(SyntaxKind::StringLiteral) {
            let name = self.token_value().to_string();
            self.next_token();
            return Ok(name);
        }
        self.parse_identifier_name_text()
    }

    pub(crate) fn parse_string_literal_text(&mut self) -> ParseResult<String> {
        if !self.is_token(SyntaxKind::StringLiteral) {
            return Err(self.error_at_current_token("String literal expected."));
        }
        let value = self.token_value().to_string();
        self.next_token();
        Ok(value)
    }

    // =========================================================================
    // Look-ahead helpers
    // =========================================================================

    /// With the cursor on `(`, skip to the matching `)`.
    ///
    /// Returns false if the group is unbalanced. Template substitutions are
    /// followed so braces inside them are counted correctly.
    pub(crate) fn skip_parenthesized(&mut self) -> bool {
        // Expected closers; `TemplateTail` marks an open `${`.
        let mut stack: SmallVec<[SyntaxKind; 8]> = SmallVec::new();
        loop {
            match self.token() {
                SyntaxKind::OpenParenToken => stack.push(SyntaxKind::CloseParenToken),
                SyntaxKind::OpenBracketToken => stack.push(SyntaxKind::CloseBracketToken),
                SyntaxKind::OpenBraceToken => stack.push(SyntaxKind::CloseBraceToken),
                SyntaxKind::TemplateHead => stack.push(SyntaxKind::TemplateTail),
                kind @ (SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken) => {
                    if stack.pop() != Some(kind) {
                        return false;
                    }
                    if stack.is_empty() {
                        return true;
                    }
                }
                SyntaxKind::CloseBraceToken => match stack.last() {
                    Some(SyntaxKind::CloseBraceToken) => {
                        stack.pop();
                    }
                    Some(SyntaxKind::TemplateTail) => match self.re_scan_template_token() {
                        SyntaxKind::TemplateMiddle => {}
                        SyntaxKind::TemplateTail => {
                            stack.pop();
                        }
                        _ => return false,
                    },
                    _ => return false,
                },
                SyntaxKind::EndOfFileToken | SyntaxKind::Unknown => return false,
                _ => {}
            }
            self.next_token();
        }
    }

    /// Whether the cursor is at the start of an arrow function.
    pub(crate) fn is_start_of_arrow_function(&mut self) -> bool {
        match self.token() {
            SyntaxKind::OpenParenToken => self.look_ahead(|p| {
                p.skip_parenthesized()
                    && p.next_token() == SyntaxKind::EqualsGreaterThanToken
                    && !p.has_preceding_line_break()
            }),
            SyntaxKind::AsyncKeyword => self.look_ahead(|p| {
                p.next_token();
                // `async => ...` uses `async` as the parameter name
                if p.is_token(SyntaxKind::EqualsGreaterThanToken) {
                    return !p.has_preceding_line_break();
                }
                if p.has_preceding_line_break() {
                    return false;
                }
                if p.is_token(SyntaxKind::OpenParenToken) {
                    p.skip_parenthesized()
                        && p.next_token() == SyntaxKind::EqualsGreaterThanToken
                        && !p.has_preceding_line_break()
                } else if p.is_identifier() {
                    p.next_token() == SyntaxKind::EqualsGreaterThanToken
                        && !p.has_preceding_line_break()
                } else {
                    false
                }
            }),
            _ if self.is_identifier() => {
                self.next_token_is_on_same_line(SyntaxKind::EqualsGreaterThanToken)
            }
            _ => false,
        }
    }

    /// Whether the current token can begin an expression.
    pub(crate) fn is_start_of_expression(&self) -> bool {
        !matches!(
            self.token(),
            SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::CommaToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::ColonToken
                | SyntaxKind::EqualsGreaterThanToken
                | SyntaxKind::EndOfFileToken
        )
    }
}
