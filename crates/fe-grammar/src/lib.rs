//! Fe grammar and parsing runtime
//!
//! The crate exposes the Fe grammar as a [`Language`] handle, a parser that
//! runs it, a typed AST with tree-sitter style S-expression output, and a
//! token highlighter.
//!
//! ```
//! let mut parser = fe_grammar::Parser::new();
//! parser.set_language(&fe_grammar::language()).expect("Error loading Fe grammar");
//!
//! let tree = parser.parse("fn f() {}").unwrap();
//! assert_eq!(
//!     tree.to_sexp(),
//!     "(source_file (function_def name: (identifier) (block (block_expr))))"
//! );
//! ```

pub mod ast;
pub mod highlight;
pub mod language;
pub mod parser;
pub mod tree;

// Test utilities (available in tests and with the `testing` feature)
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use ast::SourceFile;
pub use highlight::{highlight, Capture, HighlightSpan};
pub use language::{
    builtin, language, Language, LanguageError, LANGUAGE_VERSION, MIN_COMPATIBLE_LANGUAGE_VERSION,
};
pub use parser::{ParseError, Parser, ParserConfig};
pub use tree::Tree;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Language error: {0}")]
    Language(#[from] LanguageError),

    #[error("No language installed")]
    NoLanguage,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parse a source string with the built-in grammar
pub fn parse(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser.set_language(builtin())?;
    parser.parse(source)
}

/// Load a grammar from an artifact file
pub fn load_artifact(path: impl AsRef<std::path::Path>) -> Result<Language> {
    let json = std::fs::read_to_string(path)?;
    let language = Language::from_artifact_json(&json)?;
    language.validate()?;
    Ok(language)
}
