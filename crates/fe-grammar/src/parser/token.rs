//! Token definitions for the Fe language

use crate::ast::nodes::{IntSuffix, Span};
use std::fmt;

/// A token in Fe source with position information
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The source text for this token
    pub text: String,
    /// Byte range and start position
    pub span: Span,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, text: String, span: Span) -> Self {
        Self { kind, text, span }
    }

    /// Line number (1-indexed)
    pub fn line(&self) -> usize {
        self.span.line
    }

    /// Column number (1-indexed, in characters)
    pub fn column(&self) -> usize {
        self.span.column
    }
}

/// The kind of token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Keywords
    Mod,
    Trait,
    Impl,
    For,
    Match,
    Pub,
    Fn,
    Struct,
    Const,
    Type,
    Let,
    Mut,
    Underscore,

    // Primitive types
    Bool,
    U8,
    U64,
    U128,
    Address,

    // Literals
    /// `value` is `None` when the literal does not fit in 128 bits
    NumberLit { value: Option<u128>, suffix: Option<IntSuffix> },
    StringLit(String),
    BoolLit(bool),

    // Identifiers
    Ident(String),

    // Punctuation
    ColonColon, // ::
    Arrow,      // ->
    FatArrow,   // =>
    LBrace,     // {
    RBrace,     // }
    LParen,     // (
    RParen,     // )
    Lt,         // <
    Gt,         // >
    Comma,      // ,
    Semi,       // ;
    Colon,      // :
    Eq,         // =
    Amp,        // &

    // Extras
    Comment,

    // Special
    Eof,
    Error(String),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::NumberLit { value: None, .. } => write!(f, "integer literal"),
            TokenKind::NumberLit { value: Some(value), suffix } => match suffix {
                Some(suffix) => write!(f, "{}{}", value, suffix),
                None => write!(f, "{}", value),
            },
            TokenKind::StringLit(s) => write!(f, "\"{}\"", s),
            TokenKind::BoolLit(b) => write!(f, "{}", b),
            TokenKind::Ident(s) => write!(f, "{}", s),
            TokenKind::Comment => write!(f, "comment"),
            TokenKind::Eof => write!(f, "EOF"),
            TokenKind::Error(msg) => write!(f, "Error: {}", msg),
            other => match other.node_kind() {
                Some(kind) => write!(f, "{}", kind),
                None => write!(f, "{:?}", other),
            },
        }
    }
}

impl TokenKind {
    /// Map an identifier-shaped word to its keyword, if it is one
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "mod" => TokenKind::Mod,
            "trait" => TokenKind::Trait,
            "impl" => TokenKind::Impl,
            "for" => TokenKind::For,
            "match" => TokenKind::Match,
            "pub" => TokenKind::Pub,
            "fn" => TokenKind::Fn,
            "struct" => TokenKind::Struct,
            "const" => TokenKind::Const,
            "type" => TokenKind::Type,
            "let" => TokenKind::Let,
            "mut" => TokenKind::Mut,
            "_" => TokenKind::Underscore,
            "bool" => TokenKind::Bool,
            "u8" => TokenKind::U8,
            "u64" => TokenKind::U64,
            "u128" => TokenKind::U128,
            "address" => TokenKind::Address,
            "true" => TokenKind::BoolLit(true),
            "false" => TokenKind::BoolLit(false),
            _ => return None,
        };
        Some(kind)
    }

    /// The anonymous node kind this token produces in the grammar, if any.
    ///
    /// Literal, identifier and comment tokens become named nodes and return
    /// `None`, except for booleans whose keyword is itself anonymous.
    pub fn node_kind(&self) -> Option<&'static str> {
        let kind = match self {
            TokenKind::Mod => "mod",
            TokenKind::Trait => "trait",
            TokenKind::Impl => "impl",
            TokenKind::For => "for",
            TokenKind::Match => "match",
            TokenKind::Pub => "pub",
            TokenKind::Fn => "fn",
            TokenKind::Struct => "struct",
            TokenKind::Const => "const",
            TokenKind::Type => "type",
            TokenKind::Let => "let",
            TokenKind::Mut => "mut",
            TokenKind::Underscore => "_",
            TokenKind::Bool => "bool",
            TokenKind::U8 => "u8",
            TokenKind::U64 => "u64",
            TokenKind::U128 => "u128",
            TokenKind::Address => "address",
            TokenKind::BoolLit(true) => "true",
            TokenKind::BoolLit(false) => "false",
            TokenKind::ColonColon => "::",
            TokenKind::Arrow => "->",
            TokenKind::FatArrow => "=>",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Comma => ",",
            TokenKind::Semi => ";",
            TokenKind::Colon => ":",
            TokenKind::Eq => "=",
            TokenKind::Amp => "&",
            _ => return None,
        };
        Some(kind)
    }

    /// Check if this token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Mod
                | TokenKind::Trait
                | TokenKind::Impl
                | TokenKind::For
                | TokenKind::Match
                | TokenKind::Pub
                | TokenKind::Fn
                | TokenKind::Struct
                | TokenKind::Const
                | TokenKind::Type
                | TokenKind::Let
                | TokenKind::Mut
                | TokenKind::Underscore
        )
    }

    /// Check if this token is spelled like an identifier
    ///
    /// Keywords only act as keywords where the grammar expects one, so in
    /// name positions any of these tokens reads as an identifier.
    pub fn is_word(&self) -> bool {
        matches!(self, TokenKind::Ident(_) | TokenKind::BoolLit(_))
            || self.is_keyword()
            || self.is_primitive_type()
    }

    /// Check if this token names a primitive type
    pub fn is_primitive_type(&self) -> bool {
        matches!(
            self,
            TokenKind::Bool | TokenKind::U8 | TokenKind::U64 | TokenKind::U128 | TokenKind::Address
        )
    }

    /// Check if this token is a literal
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::NumberLit { .. } | TokenKind::StringLit(_) | TokenKind::BoolLit(_)
        )
    }

    /// Check if this token is a bracket
    pub fn is_bracket(&self) -> bool {
        matches!(
            self,
            TokenKind::LBrace
                | TokenKind::RBrace
                | TokenKind::LParen
                | TokenKind::RParen
                | TokenKind::Lt
                | TokenKind::Gt
        )
    }

    /// Check if this token is a delimiter
    pub fn is_delimiter(&self) -> bool {
        matches!(
            self,
            TokenKind::Comma | TokenKind::Semi | TokenKind::Colon | TokenKind::ColonColon
        )
    }

    /// Check if this token is an operator
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Arrow | TokenKind::FatArrow | TokenKind::Eq | TokenKind::Amp
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new(TokenKind::Fn, "fn".to_string(), Span::new(0, 2, 1, 1));
        assert_eq!(token.kind, TokenKind::Fn);
        assert_eq!(token.text, "fn");
        assert_eq!(token.line(), 1);
        assert_eq!(token.column(), 1);
        assert_eq!(token.span.len(), 2);
    }

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::keyword("fn"), Some(TokenKind::Fn));
        assert_eq!(TokenKind::keyword("address"), Some(TokenKind::Address));
        assert_eq!(TokenKind::keyword("true"), Some(TokenKind::BoolLit(true)));
        assert_eq!(TokenKind::keyword("_"), Some(TokenKind::Underscore));
        assert_eq!(TokenKind::keyword("main"), None);
        assert_eq!(TokenKind::keyword("u16"), None);
    }

    #[test]
    fn test_token_kind_is_keyword() {
        assert!(TokenKind::Mod.is_keyword());
        assert!(TokenKind::Match.is_keyword());
        assert!(TokenKind::Underscore.is_keyword());
        assert!(!TokenKind::U8.is_keyword());
        assert!(!TokenKind::Ident("foo".to_string()).is_keyword());
    }

    #[test]
    fn test_token_kind_is_word() {
        assert!(TokenKind::Ident("x".to_string()).is_word());
        assert!(TokenKind::Match.is_word());
        assert!(TokenKind::Address.is_word());
        assert!(TokenKind::BoolLit(true).is_word());
        assert!(TokenKind::Underscore.is_word());
        assert!(!TokenKind::StringLit("x".to_string()).is_word());
        assert!(!TokenKind::ColonColon.is_word());
    }

    #[test]
    fn test_token_kind_is_primitive_type() {
        assert!(TokenKind::Bool.is_primitive_type());
        assert!(TokenKind::U128.is_primitive_type());
        assert!(!TokenKind::Struct.is_primitive_type());
    }

    #[test]
    fn test_token_kind_is_literal() {
        assert!(TokenKind::NumberLit { value: Some(1), suffix: None }.is_literal());
        assert!(TokenKind::StringLit("s".to_string()).is_literal());
        assert!(TokenKind::BoolLit(false).is_literal());
        assert!(!TokenKind::Ident("x".to_string()).is_literal());
    }

    #[test]
    fn test_punctuation_categories() {
        assert!(TokenKind::LBrace.is_bracket());
        assert!(TokenKind::Gt.is_bracket());
        assert!(TokenKind::ColonColon.is_delimiter());
        assert!(TokenKind::Semi.is_delimiter());
        assert!(TokenKind::FatArrow.is_operator());
        assert!(TokenKind::Amp.is_operator());
        assert!(!TokenKind::Comma.is_operator());
    }

    #[test]
    fn test_node_kind_names() {
        assert_eq!(TokenKind::ColonColon.node_kind(), Some("::"));
        assert_eq!(TokenKind::BoolLit(true).node_kind(), Some("true"));
        assert_eq!(TokenKind::U64.node_kind(), Some("u64"));
        assert_eq!(TokenKind::Ident("x".to_string()).node_kind(), None);
        assert_eq!(TokenKind::Comment.node_kind(), None);
    }

    #[test]
    fn test_token_kind_display() {
        assert_eq!(TokenKind::Fn.to_string(), "fn");
        assert_eq!(TokenKind::Arrow.to_string(), "->");
        assert_eq!(TokenKind::LBrace.to_string(), "{");
        assert_eq!(TokenKind::StringLit("hi".to_string()).to_string(), "\"hi\"");
        assert_eq!(
            TokenKind::NumberLit { value: Some(7), suffix: Some(IntSuffix::U8) }.to_string(),
            "7u8"
        );
        assert_eq!(
            TokenKind::NumberLit { value: None, suffix: None }.to_string(),
            "integer literal"
        );
        assert_eq!(TokenKind::Eof.to_string(), "EOF");
        assert_eq!(
            TokenKind::Error("bad".to_string()).to_string(),
            "Error: bad"
        );
    }
}
