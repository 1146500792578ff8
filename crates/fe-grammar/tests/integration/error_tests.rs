//! Syntax errors and limits through the public parser

use fe_grammar::{language, Error, ParseError, Parser, ParserConfig};

fn fe_parser() -> Parser {
    let mut parser = Parser::new();
    parser.set_language(&language()).expect("Error loading Fe grammar");
    parser
}

fn parse_error(source: &str) -> ParseError {
    match fe_parser().parse(source) {
        Err(Error::Parse(e)) => e,
        other => panic!("Expected parse error for {:?}, got {:?}", source, other),
    }
}

#[test]
fn test_no_language_installed() {
    let mut parser = Parser::new();
    assert!(matches!(parser.parse(""), Err(Error::NoLanguage)));
}

#[test]
fn test_unexpected_token_position() {
    let err = parse_error("fn main() {}\nstruct 5;");
    match err {
        ParseError::UnexpectedToken { expected, line, column, .. } => {
            assert_eq!(expected, "identifier");
            assert_eq!((line, column), (2, 8));
        }
        other => panic!("Expected UnexpectedToken, got {:?}", other),
    }
}

#[test]
fn test_trailing_comma_rejected() {
    assert!(matches!(
        parse_error("struct P { x: u8, }"),
        ParseError::UnexpectedToken { .. }
    ));
    assert!(matches!(
        parse_error("fn f(a: u8,) {}"),
        ParseError::UnexpectedToken { .. }
    ));
}

#[test]
fn test_keywords_as_names() {
    let mut parser = fe_parser();

    let tree = parser.parse("fn f(address: address) {}").unwrap();
    assert_eq!(
        tree.to_sexp(),
        "(source_file (function_def name: (identifier) (params (param name: (identifier) type: (primitive_type))) (block (block_expr))))"
    );

    assert!(parser.parse("fn type() {}").is_ok());
    assert!(parser.parse("fn match() {}").is_ok());
    assert!(parser.parse("fn f() { let _ = 1; }").is_ok());

    // `mut` is still a keyword right after `let`
    let err = parse_error("fn f() { let mut = 1; }");
    assert_eq!(err.position(), Some((1, 18)));
}

#[test]
fn test_wide_number_literal() {
    let source = format!("const MAX: u128 = 0x{};", "f".repeat(64));
    let tree = fe_parser().parse(&source).unwrap();
    assert_eq!(
        tree.to_sexp(),
        "(source_file (const_def name: (identifier) type: (primitive_type) (literal (number_literal))))"
    );
}

#[test]
fn test_unterminated_input() {
    assert!(matches!(
        parse_error("mod m {"),
        ParseError::UnexpectedEof { .. }
    ));
    assert!(matches!(
        parse_error("fn f() { \"open"),
        ParseError::Lex { .. }
    ));
}

#[test]
fn test_statement_needs_semicolon() {
    let err = parse_error("fn f() { 1 2 }");
    match err {
        ParseError::UnexpectedToken { expected, .. } => assert_eq!(expected, "`;` or `}`"),
        other => panic!("Expected UnexpectedToken, got {:?}", other),
    }
}

#[test]
fn test_nesting_limit_from_config() {
    let config: ParserConfig = serde_json::from_str("{\"max_depth\": 8}").unwrap();
    let mut parser = fe_parser().with_config(config);

    let shallow = "fn f() { { 1 } }";
    assert!(parser.parse(shallow).is_ok());

    let deep = format!("fn f() {}1{}", "{".repeat(10), "}".repeat(10));
    assert!(matches!(
        parser.parse(&deep),
        Err(Error::Parse(ParseError::NestingTooDeep { limit: 8, .. }))
    ));
}

#[test]
fn test_deep_input_does_not_overflow() {
    let source = format!("type T = {}u8;", "&".repeat(100_000));
    assert!(matches!(
        parse_error(&source),
        ParseError::NestingTooDeep { limit: 256, .. }
    ));
}
