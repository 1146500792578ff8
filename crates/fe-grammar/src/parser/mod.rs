//! Fe source parser
//!
//! [`Lexer`] and [`SourceParser`] work directly on a source string. [`Parser`]
//! is the runtime entry point: it holds an installed [`Language`](crate::Language)
//! and a [`ParserConfig`], and produces [`Tree`](crate::Tree)s.

pub mod lexer;
pub mod parse;
pub mod runtime;
pub mod token;

pub use lexer::Lexer;
pub use parse::{ParseError, ParseResult, SourceParser, DEFAULT_MAX_DEPTH};
pub use runtime::{Parser, ParserConfig};
pub use token::{Token, TokenKind};
