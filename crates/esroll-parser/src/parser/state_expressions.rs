//! Parser state - expression parsing methods

use super::node::{Literal, NodeData, NodeIndex, PropertyKey, PropertyKind};
use super::state::{ParseResult, ParserState};
use esroll_scanner::{SyntaxKind, token_is_assignment_operator};

/// Binary operator precedence; 0 means "not a binary operator".
fn get_binary_operator_precedence(kind: SyntaxKind) -> u8 {
    match kind {
        SyntaxKind::QuestionQuestionToken | SyntaxKind::BarBarToken => 1,
        SyntaxKind::AmpersandAmpersandToken => 2,
        SyntaxKind::BarToken => 3,
        SyntaxKind::CaretToken => 4,
        SyntaxKind::AmpersandToken => 5,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => 6,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword => 7,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => 8,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => 9,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 10,
        SyntaxKind::AsteriskAsteriskToken => 11,
        _ => 0,
    }
}

impl ParserState {
    // =========================================================================
    // Parse Methods - Core Expressions
    // =========================================================================

    /// Expression with the comma operator.
    pub(crate) fn parse_expression(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let first = self.parse_assignment_expression_or_higher()?;
        if !self.is_token(SyntaxKind::CommaToken) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.parse_optional(SyntaxKind::CommaToken) {
            expressions.push(self.parse_assignment_expression_or_higher()?);
        }
        Ok(self.finish_node(start, NodeData::SequenceExpression { expressions }))
    }

    pub(crate) fn parse_assignment_expression_or_higher(&mut self) -> ParseResult<NodeIndex> {
        self.enter_recursion()?;
        let result = self.parse_assignment_expression_worker();
        self.exit_recursion();
        result
    }

    fn parse_assignment_expression_worker(&mut self) -> ParseResult<NodeIndex> {
        if self.is_token(SyntaxKind::YieldKeyword) {
            return self.parse_yield_expression();
        }
        if self.is_start_of_arrow_function() {
            return self.parse_arrow_function();
        }

        let start = self.token_pos();
        let left = self.parse_conditional_expression()?;

        if token_is_assignment_operator(self.token()) {
            let operator = self.token();
            if operator == SyntaxKind::EqualsToken {
                self.to_assignment_target(left);
            }
            self.next_token();
            let right = self.parse_assignment_expression_or_higher()?;
            return Ok(self.finish_node(
                start,
                NodeData::AssignmentExpression {
                    operator,
                    left,
                    right,
                },
            ));
        }

        Ok(left)
    }

    fn parse_yield_expression(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::YieldKeyword)?;
        let mut delegate = false;
        let argument = if self.has_preceding_line_break() {
            NodeIndex::NONE
        } else if self.parse_optional(SyntaxKind::AsteriskToken) {
            delegate = true;
            self.parse_assignment_expression_or_higher()?
        } else if self.is_start_of_expression() {
            self.parse_assignment_expression_or_higher()?
        } else {
            NodeIndex::NONE
        };
        Ok(self.finish_node(start, NodeData::YieldExpression { argument, delegate }))
    }

    fn parse_arrow_function(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let is_async = self.is_token(SyntaxKind::AsyncKeyword)
            && !self.look_ahead(|p| p.next_token() == SyntaxKind::EqualsGreaterThanToken);
        if is_async {
            self.next_token();
        }

        let params = if self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_parameter_list()?
        } else {
            vec![self.parse_identifier()?]
        };

        if self.has_preceding_line_break() {
            return Err(self.error_at_current_token("Line terminator not permitted before arrow."));
        }
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken)?;

        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_function_body()?
        } else {
            self.parse_assignment_expression_or_higher()?
        };

        Ok(self.finish_node(
            start,
            NodeData::ArrowFunctionExpression {
                params,
                body,
                is_async,
            },
        ))
    }

    fn parse_conditional_expression(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let test = self.parse_binary_expression(0)?;
        if !self.parse_optional(SyntaxKind::QuestionToken) {
            return Ok(test);
        }
        let consequent =
            self.with_disallow_in(false, |p| p.parse_assignment_expression_or_higher())?;
        self.parse_expected(SyntaxKind::ColonToken)?;
        let alternate = self.parse_assignment_expression_or_higher()?;
        Ok(self.finish_node(
            start,
            NodeData::ConditionalExpression {
                test,
                consequent,
                alternate,
            },
        ))
    }

    /// Precedence climbing over binary operators tighter than `min_precedence`.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let mut left = self.parse_unary_expression_or_higher()?;

        loop {
            let operator = self.token();
            let precedence = get_binary_operator_precedence(operator);
            if precedence <= min_precedence {
                break;
            }
            if operator == SyntaxKind::InKeyword && self.in_disallow_in_context() {
                break;
            }
            self.next_token();
            // `**` is right-associative
            let right = if operator == SyntaxKind::AsteriskAsteriskToken {
                self.parse_binary_expression(precedence - 1)?
            } else {
                self.parse_binary_expression(precedence)?
            };
            left = self.finish_node(
                start,
                NodeData::BinaryExpression {
                    operator,
                    left,
                    right,
                },
            );
        }

        Ok(left)
    }

    fn parse_unary_expression_or_higher(&mut self) -> ParseResult<NodeIndex> {
        self.enter_recursion()?;
        let result = self.parse_unary_expression_worker();
        self.exit_recursion();
        result
    }

    fn parse_unary_expression_worker(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        match self.token() {
            operator @ (SyntaxKind::DeleteKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken) => {
                self.next_token();
                let argument = self.parse_unary_expression_or_higher()?;
                Ok(self.finish_node(start, NodeData::UnaryExpression { operator, argument }))
            }
            operator @ (SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken) => {
                self.next_token();
                let argument = self.parse_unary_expression_or_higher()?;
                Ok(self.finish_node(
                    start,
                    NodeData::UpdateExpression {
                        operator,
                        prefix: true,
                        argument,
                    },
                ))
            }
            SyntaxKind::AwaitKeyword => {
                self.next_token();
                let argument = self.parse_unary_expression_or_higher()?;
                Ok(self.finish_node(start, NodeData::AwaitExpression { argument }))
            }
            _ => {
                let argument = self.parse_left_hand_side_expression_or_higher()?;
                let operator = self.token();
                if matches!(
                    operator,
                    SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken
                ) && !self.has_preceding_line_break()
                {
                    self.next_token();
                    return Ok(self.finish_node(
                        start,
                        NodeData::UpdateExpression {
                            operator,
                            prefix: false,
                            argument,
                        },
                    ));
                }
                Ok(argument)
            }
        }
    }

    pub(crate) fn parse_left_hand_side_expression_or_higher(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let expression = match self.token() {
            SyntaxKind::NewKeyword => self.parse_new_expression()?,
            SyntaxKind::SuperKeyword => {
                self.next_token();
                self.finish_node(start, NodeData::Super)
            }
            SyntaxKind::ImportKeyword => self.parse_import_call_or_meta()?,
            _ => self.parse_primary_expression()?,
        };
        self.parse_member_expression_rest(start, expression, true)
    }

    /// `import(source)` or `import.meta`.
    fn parse_import_call_or_meta(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ImportKeyword)?;
        if self.parse_optional(SyntaxKind::DotToken) {
            let property = self.parse_identifier_name_text()?;
            if property != "meta" {
                return Err(self.error_at_current_token("'meta' expected."));
            }
            return Ok(self.finish_node(
                start,
                NodeData::MetaProperty {
                    meta: "import".to_string(),
                    property,
                },
            ));
        }
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let source = self.with_disallow_in(false, |p| p.parse_assignment_expression_or_higher())?;
        // Optional second argument (import attributes) is accepted and dropped.
        if self.parse_optional(SyntaxKind::CommaToken) && !self.is_token(SyntaxKind::CloseParenToken) {
            self.with_disallow_in(false, |p| p.parse_assignment_expression_or_higher())?;
            self.parse_optional(SyntaxKind::CommaToken);
        }
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(self.finish_node(start, NodeData::ImportExpression { source }))
    }

    fn parse_new_expression(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::NewKeyword)?;

        if self.parse_optional(SyntaxKind::DotToken) {
            let property = self.parse_identifier_name_text()?;
            if property != "target" {
                return Err(self.error_at_current_token("'target' expected."));
            }
            return Ok(self.finish_node(
                start,
                NodeData::MetaProperty {
                    meta: "new".to_string(),
                    property,
                },
            ));
        }

        let callee_start = self.token_pos();
        let callee = match self.token() {
            SyntaxKind::NewKeyword => self.parse_new_expression()?,
            SyntaxKind::SuperKeyword => {
                self.next_token();
                self.finish_node(callee_start, NodeData::Super)
            }
            _ => self.parse_primary_expression()?,
        };
        let callee = self.parse_member_expression_rest(callee_start, callee, false)?;

        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        Ok(self.finish_node(start, NodeData::NewExpression { callee, arguments }))
    }

    /// Member accesses, calls, optional chains and tagged templates that
    /// follow `expression`.
    fn parse_member_expression_rest(
        &mut self,
        start: u32,
        mut expression: NodeIndex,
        allow_calls: bool,
    ) -> ParseResult<NodeIndex> {
        let mut in_optional_chain = false;
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let property = self.parse_member_name()?;
                    expression = self.finish_node(
                        start,
                        NodeData::MemberExpression {
                            object: expression,
                            property,
                            computed: false,
                            optional: false,
                        },
                    );
                }
                SyntaxKind::QuestionDotToken if allow_calls => {
                    in_optional_chain = true;
                    self.next_token();
                    expression = match self.token() {
                        SyntaxKind::OpenParenToken => {
                            let arguments = self.parse_arguments()?;
                            self.finish_node(
                                start,
                                NodeData::CallExpression {
                                    callee: expression,
                                    arguments,
                                    optional: true,
                                },
                            )
                        }
                        SyntaxKind::OpenBracketToken => {
                            let property = self.parse_computed_member()?;
                            self.finish_node(
                                start,
                                NodeData::MemberExpression {
                                    object: expression,
                                    property,
                                    computed: true,
                                    optional: true,
                                },
                            )
                        }
                        _ => {
                            let property = self.parse_member_name()?;
                            self.finish_node(
                                start,
                                NodeData::MemberExpression {
                                    object: expression,
                                    property,
                                    computed: false,
                                    optional: true,
                                },
                            )
                        }
                    };
                }
                SyntaxKind::OpenBracketToken => {
                    let property = self.parse_computed_member()?;
                    expression = self.finish_node(
                        start,
                        NodeData::MemberExpression {
                            object: expression,
                            property,
                            computed: true,
                            optional: false,
                        },
                    );
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    if in_optional_chain {
                        return Err(self.error_at_current_token(
                            "Tagged template expressions are not permitted in an optional chain.",
                        ));
                    }
                    let quasi = self.parse_template_literal()?;
                    expression = self.finish_node(
                        start,
                        NodeData::TaggedTemplateExpression {
                            tag: expression,
                            quasi,
                        },
                    );
                }
                SyntaxKind::OpenParenToken if allow_calls => {
                    let arguments = self.parse_arguments()?;
                    expression = self.finish_node(
                        start,
                        NodeData::CallExpression {
                            callee: expression,
                            arguments,
                            optional: false,
                        },
                    );
                }
                _ => return Ok(expression),
            }
        }
    }

    /// Property after `.` or `?.`: an identifier name or `#private`.
    fn parse_member_name(&mut self) -> ParseResult<NodeIndex> {
        if self.is_token(SyntaxKind::PrivateIdentifier) {
            return self.parse_private_name();
        }
        self.parse_identifier_name()
    }

    fn parse_private_name(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let name = self.token_value().to_string();
        self.parse_expected(SyntaxKind::PrivateIdentifier)?;
        Ok(self.finish_node(start, NodeData::PrivateName { name }))
    }

    fn parse_computed_member(&mut self) -> ParseResult<NodeIndex> {
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let property = self.with_disallow_in(false, |p| p.parse_expression())?;
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        Ok(property)
    }

    pub(crate) fn parse_arguments(&mut self) -> ParseResult<Vec<NodeIndex>> {
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let mut arguments = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken) {
            let argument = self.with_disallow_in(false, |p| p.parse_spread_or_assignment())?;
            arguments.push(argument);
            if !self.is_token(SyntaxKind::CloseParenToken) {
                self.parse_expected(SyntaxKind::CommaToken)?;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(arguments)
    }

    fn parse_spread_or_assignment(&mut self) -> ParseResult<NodeIndex> {
        if self.is_token(SyntaxKind::DotDotDotToken) {
            let start = self.token_pos();
            self.next_token();
            let argument = self.parse_assignment_expression_or_higher()?;
            return Ok(self.finish_node(start, NodeData::SpreadElement { argument }));
        }
        self.parse_assignment_expression_or_higher()
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::ThisKeyword => {
                self.next_token();
                Ok(self.finish_node(start, NodeData::ThisExpression))
            }
            SyntaxKind::NumericLiteral => self.parse_literal(Literal::Number),
            SyntaxKind::BigIntLiteral => self.parse_literal(Literal::BigInt),
            SyntaxKind::StringLiteral => self.parse_literal(Literal::String),
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                let value = self.is_token(SyntaxKind::TrueKeyword);
                self.next_token();
                Ok(self.finish_node(start, NodeData::Literal(Literal::Boolean(value))))
            }
            SyntaxKind::NullKeyword => {
                self.next_token();
                Ok(self.finish_node(start, NodeData::Literal(Literal::Null)))
            }
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                if self.re_scan_slash_token() != SyntaxKind::RegularExpressionLiteral {
                    return Err(self.error_at_current_token("Expression expected."));
                }
                self.parse_literal(Literal::RegExp)
            }
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                self.parse_template_literal()
            }
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(),
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(start, false),
            SyntaxKind::AsyncKeyword if self.look_ahead_is_async_function() => {
                self.next_token();
                self.parse_function_expression(start, true)
            }
            SyntaxKind::ClassKeyword => self.parse_class_expression(),
            SyntaxKind::PrivateIdentifier => self.parse_private_name(),
            _ if self.is_identifier() => self.parse_identifier(),
            _ => Err(self.error_at_current_token("Expression expected.")),
        }
    }

    fn parse_literal(&mut self, make: fn(String) -> Literal) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let literal = make(self.token_value().to_string());
        self.next_token();
        Ok(self.finish_node(start, NodeData::Literal(literal)))
    }

    fn parse_parenthesized_expression(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let expression = self.with_disallow_in(false, |p| p.parse_expression())?;
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(self.finish_node(start, NodeData::ParenthesizedExpression { expression }))
    }

    pub(crate) fn parse_template_literal(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        let mut quasis = vec![self.token_value().to_string()];
        let mut expressions = Vec::new();

        if self.is_token(SyntaxKind::TemplateHead) {
            loop {
                self.next_token();
                expressions.push(self.with_disallow_in(false, |p| p.parse_expression())?);
                if !self.is_token(SyntaxKind::CloseBraceToken) {
                    return Err(self.error_at_current_token("'}' expected."));
                }
                match self.re_scan_template_token() {
                    SyntaxKind::TemplateMiddle => quasis.push(self.token_value().to_string()),
                    SyntaxKind::TemplateTail => {
                        quasis.push(self.token_value().to_string());
                        break;
                    }
                    _ => return Err(self.error_at_current_token("Unterminated template literal.")),
                }
            }
        }

        self.next_token();
        Ok(self.finish_node(
            start,
            NodeData::TemplateLiteral {
                quasis,
                expressions,
            },
        ))
    }

    fn parse_array_literal(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken) {
            if self.parse_optional(SyntaxKind::CommaToken) {
                elements.push(NodeIndex::NONE);
                continue;
            }
            elements.push(self.with_disallow_in(false, |p| p.parse_spread_or_assignment())?);
            if !self.is_token(SyntaxKind::CloseBracketToken) {
                self.parse_expected(SyntaxKind::CommaToken)?;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        Ok(self.finish_node(start, NodeData::ArrayExpression { elements }))
    }

    fn parse_object_literal(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut properties = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            properties.push(self.with_disallow_in(false, |p| p.parse_object_literal_element())?);
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                self.parse_expected(SyntaxKind::CommaToken)?;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(self.finish_node(start, NodeData::ObjectExpression { properties }))
    }

    fn parse_object_literal_element(&mut self) -> ParseResult<NodeIndex> {
        let start = self.token_pos();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let argument = self.parse_assignment_expression_or_higher()?;
            return Ok(self.finish_node(start, NodeData::SpreadElement { argument }));
        }

        let is_async = self.is_token(SyntaxKind::AsyncKeyword) && self.look_ahead_is_member_modifier();
        if is_async {
            self.next_token();
        }
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);
        let kind = if !is_async && !is_generator {
            self.parse_accessor_modifier()
        } else {
            PropertyKind::Method
        };

        let key_start = self.token_pos();
        let key_is_identifier = self.is_identifier();
        let key_text = self.token_value().to_string();
        let key = self.parse_property_key()?;

        if self.is_token(SyntaxKind::OpenParenToken) {
            let value = self.parse_method_function(is_async, is_generator)?;
            let kind = if kind == PropertyKind::Init {
                PropertyKind::Method
            } else {
                kind
            };
            return Ok(self.finish_node(
                start,
                NodeData::Property {
                    key,
                    value,
                    kind,
                    shorthand: false,
                },
            ));
        }
        if is_async || is_generator || kind != PropertyKind::Init {
            return Err(self.error_at_current_token("'(' expected."));
        }

        if self.parse_optional(SyntaxKind::ColonToken) {
            let value = self.parse_assignment_expression_or_higher()?;
            return Ok(self.finish_node(
                start,
                NodeData::Property {
                    key,
                    value,
                    kind: PropertyKind::Init,
                    shorthand: false,
                },
            ));
        }

        // Shorthand `{ a }` or cover-initialized `{ a = 1 }`.
        if !key_is_identifier {
            return Err(self.error_at_current_token("':' expected."));
        }
        let mut value = self.finish_node(key_start, NodeData::Identifier { name: key_text });
        if self.parse_optional(SyntaxKind::EqualsToken) {
            let right = self.parse_assignment_expression_or_higher()?;
            value = self.finish_node(key_start, NodeData::AssignmentPattern { left: value, right });
        }
        Ok(self.finish_node(
            start,
            NodeData::Property {
                key,
                value,
                kind: PropertyKind::Init,
                shorthand: true,
            },
        ))
    }

    /// Consume `get`/`set` when they introduce an accessor.
    pub(crate) fn parse_accessor_modifier(&mut self) -> PropertyKind {
        let kind = match self.token() {
            SyntaxKind::GetKeyword => PropertyKind::Get,
            SyntaxKind::SetKeyword => PropertyKind::Set,
            _ => return PropertyKind::Init,
        };
        if self.look_ahead(|p| {
            p.next_token();
            p.is_start_of_property_key()
        }) {
            self.next_token();
            kind
        } else {
            PropertyKind::Init
        }
    }

    /// `async` is a modifier when another member name follows on the same line.
    pub(crate) fn look_ahead_is_member_modifier(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break()
                && (p.is_start_of_property_key() || p.is_token(SyntaxKind::AsteriskToken))
        })
    }

    pub(crate) fn is_start_of_property_key(&self) -> bool {
        self.is_identifier_or_keyword()
            || matches!(
                self.token(),
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::BigIntLiteral
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::PrivateIdentifier
            )
    }

    pub(crate) fn parse_property_key(&mut self) -> ParseResult<PropertyKey> {
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                let name = self.token_value().to_string();
                self.next_token();
                Ok(PropertyKey::Name(name))
            }
            SyntaxKind::PrivateIdentifier => {
                let name = self.token_value().to_string();
                self.next_token();
                Ok(PropertyKey::Private(name))
            }
            SyntaxKind::OpenBracketToken => {
                self.next_token();
                let expression =
                    self.with_disallow_in(false, |p| p.parse_assignment_expression_or_higher())?;
                self.parse_expected(SyntaxKind::CloseBracketToken)?;
                Ok(PropertyKey::Computed(expression))
            }
            _ => Ok(PropertyKey::Name(self.parse_identifier_name_text()?)),
        }
    }

    // =========================================================================
    // Assignment targets
    // =========================================================================

    /// Reinterpret an object/array literal parsed as an expression as the
    /// pattern it is when it appears on the left of `=` or in a `for-in/of`
    /// head.
    pub(crate) fn to_assignment_target(&mut self, index: NodeIndex) {
        let Some(node) = self.arena.get_mut(index) else {
            return;
        };
        match &mut node.data {
            NodeData::ObjectExpression { properties } => {
                let properties = std::mem::take(properties);
                node.data = NodeData::ObjectPattern {
                    properties: properties.clone(),
                };
                for property in properties {
                    self.property_to_assignment_target(property);
                }
            }
            NodeData::ArrayExpression { elements } => {
                let elements = std::mem::take(elements);
                node.data = NodeData::ArrayPattern {
                    elements: elements.clone(),
                };
                for element in elements {
                    self.spread_to_rest(element);
                    self.to_assignment_target(element);
                }
            }
            NodeData::AssignmentExpression {
                operator: SyntaxKind::EqualsToken,
                left,
                right,
            } => {
                let (left, right) = (*left, *right);
                node.data = NodeData::AssignmentPattern { left, right };
                self.to_assignment_target(left);
            }
            NodeData::RestElement { argument } => {
                let argument = *argument;
                self.to_assignment_target(argument);
            }
            _ => {}
        }
    }

    fn property_to_assignment_target(&mut self, index: NodeIndex) {
        self.spread_to_rest(index);
        match self.arena.data(index) {
            Some(NodeData::Property { value, .. }) => {
                let value = *value;
                self.to_assignment_target(value);
            }
            Some(NodeData::RestElement { argument }) => {
                let argument = *argument;
                self.to_assignment_target(argument);
            }
            _ => {}
        }
    }

    fn spread_to_rest(&mut self, index: NodeIndex) {
        if let Some(node) = self.arena.get_mut(index) {
            if let NodeData::SpreadElement { argument } = node.data {
                node.data = NodeData::RestElement { argument };
            }
        }
    }
}
