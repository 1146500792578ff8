//! Syntax highlighting for Fe source
//!
//! Every token is classified into a capture name. Punctuation, literals,
//! keywords and comments are classified from the token alone. Identifiers,
//! including keywords used as names, get their role (function, type, module,
//! ...) from the parsed AST; when the source does not parse they fall back to
//! the lexical class.

use crate::ast::visitor::{walk_function, walk_param, walk_struct_field, walk_type};
use crate::ast::{
    walk_definition, Definition, FunctionDef, Identifier, Param, Span, StructField, Type, Visitor,
};
use crate::parser::{Lexer, ParseError, SourceParser, TokenKind};
use crate::Result;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Highlight capture names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capture {
    Keyword,
    TypeBuiltin,
    Boolean,
    Number,
    String,
    Comment,
    PunctuationBracket,
    PunctuationDelimiter,
    Operator,
    Function,
    Type,
    Module,
    VariableParameter,
    Property,
    Constant,
    Variable,
}

impl Capture {
    /// Capture name as used in highlight queries
    pub fn name(&self) -> &'static str {
        match self {
            Capture::Keyword => "keyword",
            Capture::TypeBuiltin => "type.builtin",
            Capture::Boolean => "boolean",
            Capture::Number => "number",
            Capture::String => "string",
            Capture::Comment => "comment",
            Capture::PunctuationBracket => "punctuation.bracket",
            Capture::PunctuationDelimiter => "punctuation.delimiter",
            Capture::Operator => "operator",
            Capture::Function => "function",
            Capture::Type => "type",
            Capture::Module => "module",
            Capture::VariableParameter => "variable.parameter",
            Capture::Property => "property",
            Capture::Constant => "constant",
            Capture::Variable => "variable",
        }
    }
}

impl fmt::Display for Capture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Capture {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A highlighted source range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub capture: Capture,
    pub span: Span,
}

/// Highlight a source string.
///
/// Fails only when the source contains an invalid token. A source that
/// lexes but does not parse is highlighted lexically.
pub fn highlight(source: &str) -> Result<Vec<HighlightSpan>> {
    let roles = match SourceParser::new(source).parse_source_file() {
        Ok(file) => {
            let mut collector = RoleCollector::default();
            collector.visit_source_file(&file);
            collector.roles
        }
        Err(e) => {
            debug!(error = %e, "Falling back to lexical highlighting");
            HashMap::new()
        }
    };

    let mut spans = Vec::new();
    for token in Lexer::new(source).tokenize() {
        let capture = match &token.kind {
            TokenKind::Eof => break,
            TokenKind::Error(message) => {
                return Err(ParseError::Lex {
                    message: message.clone(),
                    line: token.line(),
                    column: token.column(),
                }
                .into());
            }
            kind if kind.is_word() => roles
                .get(&token.span.start)
                .copied()
                .unwrap_or_else(|| word_capture(kind)),
            TokenKind::Comment => Capture::Comment,
            TokenKind::NumberLit { .. } => Capture::Number,
            TokenKind::StringLit(_) => Capture::String,
            kind if kind.is_bracket() => Capture::PunctuationBracket,
            kind if kind.is_delimiter() => Capture::PunctuationDelimiter,
            kind if kind.is_operator() => Capture::Operator,
            _ => continue,
        };
        spans.push(HighlightSpan {
            capture,
            span: token.span,
        });
    }

    Ok(spans)
}

/// Capture for a word token that does not name anything in the AST
fn word_capture(kind: &TokenKind) -> Capture {
    match kind {
        TokenKind::BoolLit(_) => Capture::Boolean,
        kind if kind.is_keyword() => Capture::Keyword,
        kind if kind.is_primitive_type() => Capture::TypeBuiltin,
        _ => Capture::Variable,
    }
}

/// Collects identifier roles keyed by start offset
#[derive(Default)]
struct RoleCollector {
    roles: HashMap<usize, Capture>,
}

impl RoleCollector {
    fn mark(&mut self, ident: &Identifier, capture: Capture) {
        self.roles.insert(ident.span.start, capture);
    }

    fn mark_all(&mut self, idents: &[Identifier], capture: Capture) {
        for ident in idents {
            self.mark(ident, capture);
        }
    }
}

impl Visitor for RoleCollector {
    fn visit_definition(&mut self, definition: &Definition) {
        match definition {
            Definition::Module(def) => self.mark(&def.name, Capture::Module),
            Definition::Struct(def) => {
                self.mark(&def.name, Capture::Type);
                self.mark_all(&def.type_params, Capture::Type);
            }
            Definition::Const(def) => self.mark(&def.name, Capture::Constant),
            Definition::TypeAlias(def) => {
                self.mark(&def.name, Capture::Type);
                self.mark_all(&def.type_params, Capture::Type);
            }
            Definition::Trait(def) => {
                self.mark(&def.name, Capture::Type);
                self.mark_all(&def.type_params, Capture::Type);
            }
            Definition::Function(_) | Definition::Impl(_) => {}
        }
        walk_definition(self, definition);
    }

    fn visit_function(&mut self, function: &FunctionDef) {
        self.mark(&function.name, Capture::Function);
        self.mark_all(&function.type_params, Capture::Type);
        walk_function(self, function);
    }

    fn visit_param(&mut self, param: &Param) {
        self.mark(&param.name, Capture::VariableParameter);
        walk_param(self, param);
    }

    fn visit_struct_field(&mut self, field: &StructField) {
        self.mark(&field.name, Capture::Property);
        walk_struct_field(self, field);
    }

    fn visit_identifier(&mut self, ident: &Identifier) {
        self.roles.entry(ident.span.start).or_insert(Capture::Variable);
    }

    fn visit_type(&mut self, ty: &Type) {
        if let Type::Path(path) = ty {
            self.mark_all(&path.segments, Capture::Type);
        }
        walk_type(self, ty);
    }
}
