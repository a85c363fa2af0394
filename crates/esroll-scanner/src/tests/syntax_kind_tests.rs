//! Tests for syntax_kind.rs

use crate::*;

#[test]
fn test_token_is_keyword() {
    assert!(token_is_keyword(SyntaxKind::BreakKeyword));
    assert!(token_is_keyword(SyntaxKind::ConstKeyword));
    assert!(token_is_keyword(SyntaxKind::YieldKeyword));
    assert!(!token_is_keyword(SyntaxKind::Identifier));
    assert!(!token_is_keyword(SyntaxKind::OpenBraceToken));
}

#[test]
fn test_reserved_and_contextual_ranges() {
    assert!(token_is_reserved_word(SyntaxKind::ClassKeyword));
    assert!(!token_is_reserved_word(SyntaxKind::LetKeyword));
    assert!(token_is_contextual_keyword(SyntaxKind::LetKeyword));
    assert!(token_is_contextual_keyword(SyntaxKind::FromKeyword));
    assert!(!token_is_contextual_keyword(SyntaxKind::ImportKeyword));
}

#[test]
fn test_token_is_identifier_or_keyword() {
    assert!(token_is_identifier_or_keyword(SyntaxKind::Identifier));
    assert!(token_is_identifier_or_keyword(SyntaxKind::BreakKeyword));
    assert!(!token_is_identifier_or_keyword(SyntaxKind::OpenBraceToken));
    assert!(!token_is_identifier_or_keyword(SyntaxKind::PrivateIdentifier));
}

#[test]
fn test_token_is_punctuation() {
    assert!(token_is_punctuation(SyntaxKind::OpenBraceToken));
    assert!(token_is_punctuation(SyntaxKind::EqualsToken));
    assert!(token_is_punctuation(SyntaxKind::QuestionQuestionEqualsToken));
    assert!(!token_is_punctuation(SyntaxKind::Identifier));
}

#[test]
fn test_token_is_assignment_operator() {
    assert!(token_is_assignment_operator(SyntaxKind::EqualsToken));
    assert!(token_is_assignment_operator(SyntaxKind::PlusEqualsToken));
    assert!(token_is_assignment_operator(SyntaxKind::QuestionQuestionEqualsToken));
    assert!(!token_is_assignment_operator(SyntaxKind::PlusToken));
    assert!(!token_is_assignment_operator(SyntaxKind::EqualsEqualsToken));
}

#[test]
fn test_token_is_literal() {
    assert!(token_is_literal(SyntaxKind::StringLiteral));
    assert!(token_is_literal(SyntaxKind::TemplateTail));
    assert!(!token_is_literal(SyntaxKind::Identifier));
}

#[test]
fn test_text_to_keyword() {
    assert_eq!(text_to_keyword("import"), Some(SyntaxKind::ImportKeyword));
    assert_eq!(text_to_keyword("instanceof"), Some(SyntaxKind::InstanceOfKeyword));
    assert_eq!(text_to_keyword("as"), Some(SyntaxKind::AsKeyword));
    assert_eq!(text_to_keyword("foo"), None);
    assert_eq!(text_to_keyword("Import"), None);
    assert_eq!(text_to_keyword("x"), None);
}

#[test]
fn test_keyword_table_is_sorted() {
    // text_to_keyword relies on binary search
    for word in [
        "as", "async", "await", "break", "case", "catch", "class", "const", "continue",
        "debugger", "default", "delete", "do", "else", "enum", "export", "extends", "false",
        "finally", "for", "from", "function", "get", "if", "import", "in", "instanceof", "let",
        "new", "null", "of", "return", "set", "static", "super", "switch", "this", "throw",
        "true", "try", "typeof", "var", "void", "while", "with", "yield",
    ] {
        let kind = text_to_keyword(word);
        assert!(kind.is_some(), "keyword {word} not found");
        assert_eq!(kind.and_then(keyword_to_text), Some(word));
    }
}

#[test]
fn test_string_to_token() {
    assert_eq!(string_to_token("function"), SyntaxKind::FunctionKeyword);
    assert_eq!(string_to_token("functions"), SyntaxKind::Identifier);
}

#[test]
fn test_keyword_to_text() {
    assert_eq!(keyword_to_text(SyntaxKind::BreakKeyword), Some("break"));
    assert_eq!(keyword_to_text(SyntaxKind::Identifier), None);
}

#[test]
fn test_punctuation_to_text() {
    assert_eq!(punctuation_to_text(SyntaxKind::DotDotDotToken), Some("..."));
    assert_eq!(
        punctuation_to_text(SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken),
        Some(">>>=")
    );
    assert_eq!(punctuation_to_text(SyntaxKind::Identifier), None);
}

#[test]
fn test_token_to_display() {
    assert_eq!(token_to_display(SyntaxKind::SemicolonToken), ";");
    assert_eq!(token_to_display(SyntaxKind::ExportKeyword), "export");
    assert_eq!(token_to_display(SyntaxKind::EndOfFileToken), "end of file");
    assert_eq!(token_to_display(SyntaxKind::Identifier), "identifier");
}
