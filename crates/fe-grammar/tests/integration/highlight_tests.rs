//! Highlighting through the public API

use fe_grammar::{highlight, Capture};

fn capture_at(source: &str, needle: &str) -> Capture {
    let start = source.find(needle).unwrap();
    highlight(source)
        .unwrap()
        .into_iter()
        .find(|h| h.span.start == start)
        .map(|h| h.capture)
        .unwrap_or_else(|| panic!("Expected a capture at {:?}", needle))
}

#[test]
fn test_contract_roles() {
    let source = "mod bank {\n    pub struct Vault { owner: address }\n    pub fn open(v: &mut Vault) -> u64 { 0 }\n}";

    assert_eq!(capture_at(source, "bank"), Capture::Module);
    assert_eq!(capture_at(source, "Vault {"), Capture::Type);
    assert_eq!(capture_at(source, "owner"), Capture::Property);
    assert_eq!(capture_at(source, "open"), Capture::Function);
    assert_eq!(capture_at(source, "v:"), Capture::VariableParameter);
    assert_eq!(capture_at(source, "Vault)"), Capture::Type);
    assert_eq!(capture_at(source, "mut"), Capture::Keyword);
    assert_eq!(capture_at(source, "u64"), Capture::TypeBuiltin);
}

#[test]
fn test_spans_are_ordered_and_disjoint() {
    let source = "const X: u8 = 1; // one\nfn f() { let y = X; }";
    let spans = highlight(source).unwrap();

    for pair in spans.windows(2) {
        assert!(pair[0].span.end <= pair[1].span.start);
    }
    assert_eq!(spans.last().map(|h| h.capture), Some(Capture::PunctuationBracket));
}

#[test]
fn test_unparsable_source_still_highlights() {
    let source = "fn broken( { let }";
    let spans = highlight(source).unwrap();

    assert!(!spans.is_empty());
    assert_eq!(capture_at(source, "broken"), Capture::Variable);
    assert_eq!(capture_at(source, "let"), Capture::Keyword);
}

#[test]
fn test_invalid_character_is_error() {
    assert!(highlight("fn f() { # }").is_err());
}
