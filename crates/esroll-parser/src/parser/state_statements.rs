//! Parser state - statement and module item parsing methods

use super::node::{ExportSpecifier, ImportSpecifier, NodeData, NodeIndex, VarKind};
use super::state::{ParseResult, ParserState};
use esroll_common::Span;
use esroll_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Module items
    // =========================================================================

    /// Parse a top-level item: an import/export declaration or a statement.
    pub(crate) fn parse_module_item(&mut self) -> ParseResult<NodeIndex> {
        match self.token() {
            SyntaxKind::ImportKeyword if !self.look_ahead_is_import_expression() => {
                self.parse_import_declaration()
            }
            SyntaxKind::ExportKeyword => self.parse_export_declaration(),
            _ => self.parse_statement(),
        }
    }

    /// `import(` and `import.meta` start expressions, not declarations.
    fn look_ahead_is_import_expression(&mut self) -> bool {
        self.look_ahead(|p| {
            matches!(
                p.next_token(),
                SyntaxKind::OpenParenToken | SyntaxKind::DotToken
            )
        })
    }

    pub(crate) fn parse_import_declaration(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ImportKeyword)?;

        let mut specifiers = Vec::new();

        // import 'side-effect';
        if self.is_token(SyntaxKind::StringLiteral) {
            let source = self.parse_string_literal_text()?;
            self.parse_semicolon()?;
            return Ok(self.finish_node(start, NodeData::ImportDeclaration { specifiers, source }));
        }

        let mut expect_more = true;
        if self.is_identifier() {
            let spec_start = self.token_pos();
            let local = self.parse_identifier_text()?;
            specifiers.push(ImportSpecifier {
                imported: "default".to_string(),
                local,
                span: Span::new(spec_start, self.prev_token_end),
            });
            expect_more = self.parse_optional(SyntaxKind::CommaToken);
        }

        if expect_more {
            match self.token() {
                SyntaxKind::AsteriskToken => {
                    let spec_start = self.token_pos();
                    self.next_token();
                    self.parse_expected(SyntaxKind::AsKeyword)?;
                    let local = self.parse_identifier_text()?;
                    specifiers.push(ImportSpecifier {
                        imported: "*".to_string(),
                        local,
                        span: Span::new(spec_start, self.prev_token_end),
                    });
                }
                SyntaxKind::OpenBraceToken => self.parse_named_imports(&mut specifiers)?,
                _ => return Err(self.error_at_current_token("'{' expected.")),
            }
        }

        self.parse_expected(SyntaxKind::FromKeyword)?;
        let source = self.parse_string_literal_text()?;
        self.parse_semicolon()?;
        Ok(self.finish_node(start, NodeData::ImportDeclaration { specifiers, source }))
    }

    fn parse_named_imports(&mut self, specifiers: &mut Vec<ImportSpecifier>) -> ParseResult<()> {
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            let spec_start = self.token_pos();
            let imported_is_string = self.is_token(SyntaxKind::StringLiteral);
            let imported_is_binding = self.is_identifier();
            let imported = self.parse_module_export_name()?;
            let local = if self.parse_optional(SyntaxKind::AsKeyword) {
                self.parse_identifier_text()?
            } else if imported_is_string || !imported_is_binding {
                return Err(self.error_at_current_token("'as' expected."));
            } else {
                imported.clone()
            };
            specifiers.push(ImportSpecifier {
                imported,
                local,
                span: Span::new(spec_start, self.prev_token_end),
            });
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                self.parse_expected(SyntaxKind::CommaToken)?;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)
    }

    pub(crate) fn parse_export_declaration(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ExportKeyword)?;

        match self.token() {
            SyntaxKind::AsteriskToken => {
                self.next_token();
                let exported = if self.parse_optional(SyntaxKind::AsKeyword) {
                    Some(self.parse_module_export_name()?)
                } else {
                    None
                };
                self.parse_expected(SyntaxKind::FromKeyword)?;
                let source = self.parse_string_literal_text()?;
                self.parse_semicolon()?;
                Ok(self.finish_node(start, NodeData::ExportAllDeclaration { exported, source }))
            }
            SyntaxKind::DefaultKeyword => {
                self.next_token();
                let declaration = self.parse_export_default_value()?;
                Ok(self.finish_node(start, NodeData::ExportDefaultDeclaration { declaration }))
            }
            SyntaxKind::OpenBraceToken => {
                let specifiers = self.parse_named_exports()?;
                let source = if self.parse_optional(SyntaxKind::FromKeyword) {
                    Some(self.parse_string_literal_text()?)
                } else {
                    None
                };
                self.parse_semicolon()?;
                Ok(self.finish_node(
                    start,
                    NodeData::ExportNamedDeclaration {
                        declaration: NodeIndex::NONE,
                        specifiers,
                        source,
                    },
                ))
            }
            SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword => {
                let declaration = self.parse_statement()?;
                Ok(self.finish_export_named_declaration(start, declaration))
            }
            SyntaxKind::AsyncKeyword if self.look_ahead_is_async_function() => {
                let declaration = self.parse_statement()?;
                Ok(self.finish_export_named_declaration(start, declaration))
            }
            _ => Err(self.error_at_current_token("Declaration or statement expected.")),
        }
    }

    fn finish_export_named_declaration(&mut self, start: u32, declaration: NodeIndex) -> NodeIndex {
        self.finish_node(
            start,
            NodeData::ExportNamedDeclaration {
                declaration,
                specifiers: Vec::new(),
                source: None,
            },
        )
    }

    /// `export default` followed by a (possibly anonymous) function or class
    /// declaration, or by an expression.
    fn parse_export_default_value(&mut self) -> ParseResult<NodeIndex> {
        match self.token() {
            SyntaxKind::FunctionKeyword => {
                let start = self.token_pos();
                self.parse_function_declaration(start, false, true)
            }
            SyntaxKind::AsyncKeyword if self.look_ahead_is_async_function() => {
                let start = self.token_pos();
                self.next_token();
                self.parse_function_declaration(start, true, true)
            }
            SyntaxKind::ClassKeyword => self.parse_class_declaration(true),
            _ => {
                let expression = self.with_disallow_in(false, |p| {
                    p.parse_assignment_expression_or_higher()
                })?;
                self.parse_semicolon()?;
                Ok(expression)
            }
        }
    }

    fn parse_named_exports(&mut self) -> ParseResult<Vec<ExportSpecifier>> {
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut specifiers = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            let spec_start = self.token_pos();
            let local = self.parse_module_export_name()?;
            let exported = if self.parse_optional(SyntaxKind::AsKeyword) {
                self.parse_module_export_name()?
            } else {
                local.clone()
            };
            specifiers.push(ExportSpecifier {
                local,
                exported,
                span: Span::new(spec_start, self.prev_token_end),
            });
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                self.parse_expected(SyntaxKind::CommaToken)?;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(specifiers)
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub(crate) fn parse_statement(&mut self) -> ParseResult<NodeIndex> {
        self.enter_recursion()?;
        let result = self.parse_statement_worker();
        self.exit_recursion();
        result
    }

    fn parse_statement_worker(&mut self) -> ParseResult<NodeIndex> {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => {
                let start = self.token_pos();
                self.next_token();
                Ok(self.finish_node(start, NodeData::EmptyStatement))
            }
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => self.parse_variable_statement(),
            SyntaxKind::LetKeyword if self.look_ahead_is_let_declaration() => {
                self.parse_variable_statement()
            }
            SyntaxKind::FunctionKeyword => {
                let start = self.token_pos();
                self.parse_function_declaration(start, false, false)
            }
            SyntaxKind::AsyncKeyword if self.look_ahead_is_async_function() => {
                let start = self.token_pos();
                self.next_token();
                self.parse_function_declaration(start, true, false)
            }
            SyntaxKind::ClassKeyword => self.parse_class_declaration(false),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::BreakKeyword | SyntaxKind::ContinueKeyword => {
                self.parse_break_or_continue_statement()
            }
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::WithKeyword => self.parse_with_statement(),
            SyntaxKind::DebuggerKeyword => {
                let start = self.token_pos();
                self.next_token();
                self.parse_semicolon()?;
                Ok(self.finish_node(start, NodeData::DebuggerStatement))
            }
            SyntaxKind::ImportKeyword if !self.look_ahead_is_import_expression() => Err(self
                .error_at_current_token(
                    "An import declaration can only be used at the top level of a module.",
                )),
            SyntaxKind::ExportKeyword => Err(self.error_at_current_token(
                "An export declaration can only be used at the top level of a module.",
            )),
            _ if self.is_identifier() && self.look_ahead_is_labeled_statement() => {
                self.parse_labeled_statement()
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// `let` starts a declaration when followed by a binding name or pattern.
    fn look_ahead_is_let_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_identifier()
                || matches!(
                    p.token(),
                    SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken
                )
        })
    }

    pub(crate) fn look_ahead_is_async_function(&mut self) -> bool {
        self.next_token_is_on_same_line(SyntaxKind::FunctionKeyword)
    }

    fn look_ahead_is_labeled_statement(&mut self) -> bool {
        self.look_ahead(|p| p.next_token() == SyntaxKind::ColonToken)
    }

    pub(crate) fn parse_block(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let body = self.parse_braced_statements()?;
        Ok(self.finish_node(start, NodeData::BlockStatement { body }))
    }

    /// `{ statement* }`
    pub(crate) fn parse_braced_statements(&mut self) -> ParseResult<Vec<NodeIndex>> {
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut body = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            if self.is_token(SyntaxKind::EndOfFileToken) {
                return Err(self.error_at_current_token("'}' expected."));
            }
            body.push(self.parse_statement()?);
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(body)
    }

    fn parse_variable_statement(&mut self) -> ParseResult<NodeIndex> {
        let declaration = self.with_disallow_in(false, |p| p.parse_variable_declaration_list())?;
        self.parse_semicolon()?;
        // Widen the declaration to include the terminator.
        if let Some(node) = self.arena.get_mut(declaration) {
            node.end = self.prev_token_end;
        }
        Ok(declaration)
    }

    /// `var|let|const declarator, ...` without the terminator. Respects the
    /// current `in` context so it can serve as a `for` initializer.
    pub(crate) fn parse_variable_declaration_list(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let kind = match self.token() {
            SyntaxKind::VarKeyword => VarKind::Var,
            SyntaxKind::LetKeyword => VarKind::Let,
            SyntaxKind::ConstKeyword => VarKind::Const,
            _ => return Err(self.error_at_current_token("Variable declaration expected.")),
        };
        self.next_token();

        let mut declarations = Vec::new();
        loop {
            let decl_start = self.token_pos();
            let id = self.parse_binding_target()?;
            let init = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_assignment_expression_or_higher()?
            } else {
                NodeIndex::NONE
            };
            declarations.push(self.finish_node(decl_start, NodeData::VariableDeclarator { id, init }));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }

        Ok(self.finish_node(start, NodeData::VariableDeclaration { kind, declarations }))
    }

    fn parse_expression_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let expression = self.with_disallow_in(false, |p| p.parse_expression())?;
        self.parse_semicolon()?;
        Ok(self.finish_node(start, NodeData::ExpressionStatement { expression }))
    }

    /// `( expression )` as used by `if`, `while`, `switch` and `with`.
    fn parse_parenthesized_condition(&mut self) -> ParseResult<NodeIndex> {
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let expression = self.with_disallow_in(false, |p| p.parse_expression())?;
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(expression)
    }

    fn parse_if_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::IfKeyword)?;
        let test = self.parse_parenthesized_condition()?;
        let consequent = self.parse_statement()?;
        let alternate = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_statement()?
        } else {
            NodeIndex::NONE
        };
        Ok(self.finish_node(
            start,
            NodeData::IfStatement {
                test,
                consequent,
                alternate,
            },
        ))
    }

    fn parse_while_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::WhileKeyword)?;
        let test = self.parse_parenthesized_condition()?;
        let body = self.parse_statement()?;
        Ok(self.finish_node(start, NodeData::WhileStatement { test, body }))
    }

    fn parse_do_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::DoKeyword)?;
        let body = self.parse_statement()?;
        self.parse_expected(SyntaxKind::WhileKeyword)?;
        let test = self.parse_parenthesized_condition()?;
        // The terminator after `do ... while (x)` is always optional.
        self.parse_optional(SyntaxKind::SemicolonToken);
        Ok(self.finish_node(start, NodeData::DoWhileStatement { body, test }))
    }

    fn parse_for_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ForKeyword)?;
        let is_await = self.parse_optional(SyntaxKind::AwaitKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken)?;

        let init = match self.token() {
            SyntaxKind::SemicolonToken => NodeIndex::NONE,
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => {
                self.with_disallow_in(true, |p| p.parse_variable_declaration_list())?
            }
            SyntaxKind::LetKeyword if self.look_ahead_is_let_declaration() => {
                self.with_disallow_in(true, |p| p.parse_variable_declaration_list())?
            }
            _ => self.with_disallow_in(true, |p| p.parse_expression())?,
        };

        if self.is_token(SyntaxKind::OfKeyword) || self.is_token(SyntaxKind::InKeyword) {
            let is_of = self.is_token(SyntaxKind::OfKeyword);
            self.to_assignment_target(init);
            self.next_token();
            let right = if is_of {
                self.with_disallow_in(false, |p| p.parse_assignment_expression_or_higher())?
            } else {
                self.with_disallow_in(false, |p| p.parse_expression())?
            };
            self.parse_expected(SyntaxKind::CloseParenToken)?;
            let body = self.parse_statement()?;
            let data = if is_of {
                NodeData::ForOfStatement {
                    left: init,
                    right,
                    body,
                    is_await,
                }
            } else {
                NodeData::ForInStatement {
                    left: init,
                    right,
                    body,
                }
            };
            return Ok(self.finish_node(start, data));
        }

        self.parse_expected(SyntaxKind::SemicolonToken)?;
        let test = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.with_disallow_in(false, |p| p.parse_expression())?
        };
        self.parse_expected(SyntaxKind::SemicolonToken)?;
        let update = if self.is_token(SyntaxKind::CloseParenToken) {
            NodeIndex::NONE
        } else {
            self.with_disallow_in(false, |p| p.parse_expression())?
        };
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        let body = self.parse_statement()?;
        Ok(self.finish_node(
            start,
            NodeData::ForStatement {
                init,
                test,
                update,
                body,
            },
        ))
    }

    fn parse_return_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ReturnKeyword)?;
        let argument = if self.can_insert_semicolon() || self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.with_disallow_in(false, |p| p.parse_expression())?
        };
        self.parse_semicolon()?;
        Ok(self.finish_node(start, NodeData::ReturnStatement { argument }))
    }

    fn parse_break_or_continue_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let is_break = self.is_token(SyntaxKind::BreakKeyword);
        self.next_token();
        let label = if self.is_identifier() && !self.has_preceding_line_break() {
            Some(self.parse_identifier_text()?)
        } else {
            None
        };
        self.parse_semicolon()?;
        let data = if is_break {
            NodeData::BreakStatement { label }
        } else {
            NodeData::ContinueStatement { label }
        };
        Ok(self.finish_node(start, data))
    }

    fn parse_throw_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ThrowKeyword)?;
        if self.has_preceding_line_break() {
            return Err(self.error_at_current_token("Line break not permitted here."));
        }
        let argument = self.with_disallow_in(false, |p| p.parse_expression())?;
        self.parse_semicolon()?;
        Ok(self.finish_node(start, NodeData::ThrowStatement { argument }))
    }

    fn parse_try_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::TryKeyword)?;
        let block = self.parse_block()?;

        let handler = if self.is_token(SyntaxKind::CatchKeyword) {
            let catch_start = self.token_pos();
            self.next_token();
            let param = if self.parse_optional(SyntaxKind::OpenParenToken) {
                let param = self.parse_binding_target()?;
                self.parse_expected(SyntaxKind::CloseParenToken)?;
                param
            } else {
                NodeIndex::NONE
            };
            let body = self.parse_block()?;
            self.finish_node(catch_start, NodeData::CatchClause { param, body })
        } else {
            NodeIndex::NONE
        };

        let finalizer = if self.parse_optional(SyntaxKind::FinallyKeyword) {
            self.parse_block()?
        } else {
            NodeIndex::NONE
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(self.error_at_current_token("'catch' or 'finally' expected."));
        }

        Ok(self.finish_node(
            start,
            NodeData::TryStatement {
                block,
                handler,
                finalizer,
            },
        ))
    }

    fn parse_switch_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::SwitchKeyword)?;
        let discriminant = self.parse_parenthesized_condition()?;
        self.parse_expected(SyntaxKind::OpenBraceToken)?;

        let mut cases = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            let case_start = self.token_pos();
            let test = match self.token() {
                SyntaxKind::CaseKeyword => {
                    self.next_token();
                    self.with_disallow_in(false, |p| p.parse_expression())?
                }
                SyntaxKind::DefaultKeyword => {
                    self.next_token();
                    NodeIndex::NONE
                }
                _ => return Err(self.error_at_current_token("'case' or 'default' expected.")),
            };
            self.parse_expected(SyntaxKind::ColonToken)?;

            let mut consequent = Vec::new();
            while !matches!(
                self.token(),
                SyntaxKind::CaseKeyword
                    | SyntaxKind::DefaultKeyword
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::EndOfFileToken
            ) {
                consequent.push(self.parse_statement()?);
            }
            cases.push(self.finish_node(case_start, NodeData::SwitchCase { test, consequent }));
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;

        Ok(self.finish_node(
            start,
            NodeData::SwitchStatement {
                discriminant,
                cases,
            },
        ))
    }

    fn parse_with_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::WithKeyword)?;
        let object = self.parse_parenthesized_condition()?;
        let body = self.parse_statement()?;
        Ok(self.finish_node(start, NodeData::WithStatement { object, body }))
    }

    fn parse_labeled_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let label = self.parse_identifier_text()?;
        self.parse_expected(SyntaxKind::ColonToken)?;
        let body = self.parse_statement()?;
        Ok(self.finish_node(start, NodeData::LabeledStatement { label, body }))
    }
}
