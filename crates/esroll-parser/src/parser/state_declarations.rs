//! Parser state - functions, classes and binding patterns

use super::node::{Class, Function, MethodKind, NodeData, NodeIndex, PropertyKey, PropertyKind};
use super::state::{ParseResult, ParserState};
use esroll_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Functions
    // =========================================================================

    /// Parse `function name(...) {...}`; `async` has already been consumed
    /// when `is_async` is set. The name may be omitted only for
    /// `export default function`.
    pub(crate) fn parse_function_declaration(
        &mut self,
        start: u32,
        is_async: bool,
        allow_anonymous: bool,
    ) -> ParseResult<NodeIndex> {
        let function = self.parse_function_like(is_async, !allow_anonymous)?;
        Ok(self.finish_node(start, NodeData::FunctionDeclaration(function)))
    }

    pub(crate) fn parse_function_expression(
        &mut self,
        start: u32,
        is_async: bool,
    ) -> ParseResult<NodeIndex> {
        let function = self.parse_function_like(is_async, false)?;
        Ok(self.finish_node(start, NodeData::FunctionExpression(function)))
    }

    fn parse_function_like(&mut self, is_async: bool, require_name: bool) -> ParseResult<Function> {
        self.parse_expected(SyntaxKind::FunctionKeyword)?;
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);
        let id = if self.is_identifier() {
            self.parse_identifier()?
        } else if require_name {
            return Err(self.error_at_current_token("Identifier expected."));
        } else {
            NodeIndex::NONE
        };
        let params = self.parse_parameter_list()?;
        let body = self.parse_function_body()?;
        Ok(Function {
            id,
            params,
            body,
            is_async,
            is_generator,
        })
    }

    /// Anonymous function value of an object or class method, starting at `(`.
    pub(crate) fn parse_method_function(
        &mut self,
        is_async: bool,
        is_generator: bool,
    ) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let params = self.parse_parameter_list()?;
        let body = self.parse_function_body()?;
        Ok(self.finish_node(
            start,
            NodeData::FunctionExpression(Function {
                id: NodeIndex::NONE,
                params,
                body,
                is_async,
                is_generator,
            }),
        ))
    }

    pub(crate) fn parse_parameter_list(&mut self) -> ParseResult<Vec<NodeIndex>> {
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let mut params = Vec::new();
        self.with_disallow_in(false, |p| {
            while !p.is_token(SyntaxKind::CloseParenToken) {
                if p.is_token(SyntaxKind::DotDotDotToken) {
                    params.push(p.parse_rest_element()?);
                    break;
                }
                params.push(p.parse_binding_element()?);
                if !p.is_token(SyntaxKind::CloseParenToken) {
                    p.parse_expected(SyntaxKind::CommaToken)?;
                }
            }
            Ok(())
        })?;
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(params)
    }

    /// Function body block. `in` is always an operator inside it.
    pub(crate) fn parse_function_body(&mut self) -> ParseResult<NodeIndex> {
        self.enter_recursion()?;
        let result = self.with_disallow_in(false, |p| p.parse_block());
        self.exit_recursion();
        result
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub(crate) fn parse_class_declaration(&mut self, allow_anonymous: bool) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let class = self.parse_class_like(!allow_anonymous)?;
        Ok(self.finish_node(start, NodeData::ClassDeclaration(class)))
    }

    pub(crate) fn parse_class_expression(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let class = self.parse_class_like(false)?;
        Ok(self.finish_node(start, NodeData::ClassExpression(class)))
    }

    fn parse_class_like(&mut self, require_name: bool) -> ParseResult<Class> {
        self.parse_expected(SyntaxKind::ClassKeyword)?;
        let id = if self.is_identifier() {
            self.parse_identifier()?
        } else if require_name {
            return Err(self.error_at_current_token("Identifier expected."));
        } else {
            NodeIndex::NONE
        };
        let super_class = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            self.parse_left_hand_side_expression_or_higher()?
        } else {
            NodeIndex::NONE
        };

        self.enter_recursion()?;
        let body = self.with_disallow_in(false, |p| p.parse_class_body());
        self.exit_recursion();

        Ok(Class {
            id,
            super_class,
            body: body?,
        })
    }

    fn parse_class_body(&mut self) -> ParseResult<Vec<NodeIndex>> {
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                continue;
            }
            if self.is_token(SyntaxKind::EndOfFileToken) {
                return Err(self.error_at_current_token("'}' expected."));
            }
            members.push(self.parse_class_member()?);
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(members)
    }

    fn parse_class_member(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();

        let mut is_static = false;
        if self.is_token(SyntaxKind::StaticKeyword) {
            if self.look_ahead(|p| p.next_token() == SyntaxKind::OpenBraceToken) {
                self.next_token();
                let body = self.parse_braced_statements()?;
                return Ok(self.finish_node(start, NodeData::StaticBlock { body }));
            }
            if self.look_ahead_is_member_modifier() {
                self.next_token();
                is_static = true;
            }
        }

        let is_async = self.is_token(SyntaxKind::AsyncKeyword) && self.look_ahead_is_member_modifier();
        if is_async {
            self.next_token();
        }
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);
        let accessor = if !is_async && !is_generator {
            self.parse_accessor_modifier()
        } else {
            PropertyKind::Method
        };

        let key = self.parse_property_key()?;

        if self.is_token(SyntaxKind::OpenParenToken) {
            let kind = match accessor {
                PropertyKind::Get => MethodKind::Get,
                PropertyKind::Set => MethodKind::Set,
                _ if !is_static
                    && !is_async
                    && !is_generator
                    && key == PropertyKey::Name("constructor".to_string()) =>
                {
                    MethodKind::Constructor
                }
                _ => MethodKind::Method,
            };
            let value = self.parse_method_function(is_async, is_generator)?;
            return Ok(self.finish_node(
                start,
                NodeData::MethodDefinition {
                    key,
                    value,
                    kind,
                    is_static,
                },
            ));
        }
        if is_async || is_generator || accessor != PropertyKind::Init {
            return Err(self.error_at_current_token("'(' expected."));
        }

        let value = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression_or_higher()?
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon()?;
        Ok(self.finish_node(
            start,
            NodeData::PropertyDefinition {
                key,
                value,
                is_static,
            },
        ))
    }

    // =========================================================================
    // Binding patterns
    // =========================================================================

    /// A binding identifier, object pattern or array pattern.
    pub(crate) fn parse_binding_target(&mut self) -> ParseResult<NodeIndex> {
        self.enter_recursion()?;
        let result = match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            _ => self.parse_identifier(),
        };
        self.exit_recursion();
        result
    }

    /// A binding target with an optional `= default`.
    pub(crate) fn parse_binding_element(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let target = self.parse_binding_target()?;
        if self.parse_optional(SyntaxKind::EqualsToken) {
            let right = self.with_disallow_in(false, |p| p.parse_assignment_expression_or_higher())?;
            return Ok(self.finish_node(start, NodeData::AssignmentPattern { left: target, right }));
        }
        Ok(target)
    }

    fn parse_rest_element(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::DotDotDotToken)?;
        let argument = self.parse_binding_target()?;
        Ok(self.finish_node(start, NodeData::RestElement { argument }))
    }

    fn parse_object_binding_pattern(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut properties = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            if self.is_token(SyntaxKind::DotDotDotToken) {
                properties.push(self.parse_rest_element()?);
                break;
            }

            let prop_start = self.token_pos();
            let key_is_identifier = self.is_identifier();
            let key_text = self.token_value().to_string();
            let key = self.parse_property_key()?;

            let (value, shorthand) = if self.parse_optional(SyntaxKind::ColonToken) {
                (self.parse_binding_element()?, false)
            } else {
                if !key_is_identifier {
                    return Err(self.error_at_current_token("':' expected."));
                }
                let mut value = self.finish_node(prop_start, NodeData::Identifier { name: key_text });
                if self.parse_optional(SyntaxKind::EqualsToken) {
                    let right =
                        self.with_disallow_in(false, |p| p.parse_assignment_expression_or_higher())?;
                    value = self.finish_node(prop_start, NodeData::AssignmentPattern { left: value, right });
                }
                (value, true)
            };

            properties.push(self.finish_node(
                prop_start,
                NodeData::Property {
                    key,
                    value,
                    kind: PropertyKind::Init,
                    shorthand,
                },
            ));
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                self.parse_expected(SyntaxKind::CommaToken)?;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(self.finish_node(start, NodeData::ObjectPattern { properties }))
    }

    fn parse_array_binding_pattern(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken) {
            if self.parse_optional(SyntaxKind::CommaToken) {
                elements.push(NodeIndex::NONE);
                continue;
            }
            if self.is_token(SyntaxKind::DotDotDotToken) {
                elements.push(self.parse_rest_element()?);
                break;
            }
            elements.push(self.parse_binding_element()?);
            if !self.is_token(SyntaxKind::CloseBracketToken) {
                self.parse_expected(SyntaxKind::CommaToken)?;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        Ok(self.finish_node(start, NodeData::ArrayPattern { elements }))
    }
}
