//! Grammar-load smoke tests
//!
//! Loading the grammar yields a handle or nothing; nothing fails the test
//! with `Error loading Fe grammar`.

use fe_grammar::{language, Language, Parser, LANGUAGE_VERSION};
use std::io::Write;

/// Install a loaded handle in a parser, failing when there is none
fn require_grammar(handle: Option<Language>) -> Parser {
    let Some(language) = handle else {
        panic!("Error loading Fe grammar");
    };

    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .expect("Error loading Fe grammar");
    parser
}

/// Load a grammar from artifact text, discarding the reason on failure
fn load_from(json: &str) -> Option<Language> {
    Language::from_artifact_json(json).ok()
}

#[test]
fn test_can_load_grammar() {
    require_grammar(Some(language()));
}

#[test]
fn test_repeated_loads_yield_same_grammar() {
    let first = language();
    for _ in 0..10 {
        let again = language();
        assert!(again.ptr_eq(&first));
        require_grammar(Some(again));
    }
}

#[test]
fn test_loaded_grammar_parses() {
    let mut parser = require_grammar(Some(language()));
    let tree = parser.parse("fn main() {}").unwrap();
    assert_eq!(tree.root().definitions.len(), 1);
}

#[test]
fn test_artifact_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(language().to_artifact_json().as_bytes())
        .unwrap();

    let loaded = fe_grammar::load_artifact(file.path()).ok();
    let mut parser = require_grammar(loaded);
    assert!(parser.parse("struct S;").is_ok());
    assert_eq!(
        parser.language().map(|l| l.version()),
        Some(LANGUAGE_VERSION)
    );
}

#[test]
#[should_panic(expected = "Error loading Fe grammar")]
fn test_missing_artifact_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = fe_grammar::load_artifact(dir.path().join("fe.json")).ok();
    require_grammar(missing);
}

#[test]
#[should_panic(expected = "Error loading Fe grammar")]
fn test_corrupt_artifact_fails() {
    require_grammar(load_from("{ not json"));
}

#[test]
#[should_panic(expected = "Error loading Fe grammar")]
fn test_incompatible_version_fails() {
    let mut artifact: serde_json::Value =
        serde_json::from_str(&language().to_artifact_json()).unwrap();
    artifact["version"] = serde_json::Value::from(LANGUAGE_VERSION + 1);
    require_grammar(load_from(&artifact.to_string()));
}

#[test]
#[should_panic(expected = "Error loading Fe grammar")]
fn test_foreign_grammar_fails() {
    let mut artifact: serde_json::Value =
        serde_json::from_str(&language().to_artifact_json()).unwrap();
    artifact["name"] = serde_json::Value::from("javascript");
    require_grammar(load_from(&artifact.to_string()));
}
