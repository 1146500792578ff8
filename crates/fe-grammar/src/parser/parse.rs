//! Recursive-descent parser for Fe source files

use super::lexer::Lexer;
use super::token::{Token, TokenKind};
use crate::ast::nodes::{
    Block, Comment, ConstDef, Definition, Expression, ExpressionStatement, FunctionDef,
    Identifier, ImplDef, LetStatement, Literal, LiteralValue, MatchArm, MatchExpr, ModuleDef,
    Param, Path, Pattern, PrimitiveKind, PrimitiveType, ReferenceType, SourceFile, Span,
    Statement, StructDef, StructField, TraitDef, TupleStructPattern, TupleType, Type, TypeDef,
};
use thiserror::Error;

/// Default bound on nested blocks, types, modules and patterns
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Parse error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token at {line}:{column}: expected {expected}, got {got}")]
    UnexpectedToken {
        expected: String,
        got: String,
        line: usize,
        column: usize,
    },

    #[error("Unexpected end of file: expected {expected}")]
    UnexpectedEof { expected: String },

    #[error("Invalid token at {line}:{column}: {message}")]
    Lex {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Nesting too deep at {line}:{column}: limit is {limit}")]
    NestingTooDeep {
        limit: usize,
        line: usize,
        column: usize,
    },
}

impl ParseError {
    /// Line and column of the error, when it points at a token
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            ParseError::UnexpectedToken { line, column, .. }
            | ParseError::Lex { line, column, .. }
            | ParseError::NestingTooDeep { line, column, .. } => Some((*line, *column)),
            ParseError::UnexpectedEof { .. } => None,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Parser over a single Fe source string
pub struct SourceParser {
    tokens: Vec<Token>,
    comments: Vec<Comment>,
    position: usize,
    depth: usize,
    max_depth: usize,
    source_len: usize,
}

impl SourceParser {
    /// Create a new parser from source code
    pub fn new(source: &str) -> Self {
        Self::with_max_depth(source, DEFAULT_MAX_DEPTH)
    }

    /// Create a parser with a custom nesting limit
    pub fn with_max_depth(source: &str, max_depth: usize) -> Self {
        let mut tokens = Vec::new();
        let mut comments = Vec::new();

        for token in Lexer::new(source).tokenize() {
            if token.kind == TokenKind::Comment {
                comments.push(Comment {
                    text: token.text,
                    span: token.span,
                });
            } else {
                tokens.push(token);
            }
        }

        Self {
            tokens,
            comments,
            position: 0,
            depth: 0,
            max_depth,
            source_len: source.len(),
        }
    }

    /// Number of significant tokens, EOF included
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Parse a complete source file
    pub fn parse_source_file(&mut self) -> ParseResult<SourceFile> {
        let mut definitions = Vec::new();

        while !self.is_at_end() {
            definitions.push(self.parse_definition()?);
        }

        Ok(SourceFile {
            definitions,
            comments: std::mem::take(&mut self.comments),
            span: Span::new(0, self.source_len, 1, 1),
        })
    }

    /// Parse one definition
    pub fn parse_definition(&mut self) -> ParseResult<Definition> {
        self.nested(|p| {
            let start = p.current().span;
            let is_pub = p.eat(TokenKind::Pub);

            match p.current().kind {
                TokenKind::Mod if !is_pub => p.parse_module(start).map(Definition::Module),
                TokenKind::Impl if !is_pub => p.parse_impl(start).map(Definition::Impl),
                TokenKind::Fn => p.parse_function(start, is_pub).map(Definition::Function),
                TokenKind::Trait => p.parse_trait(start, is_pub).map(Definition::Trait),
                TokenKind::Struct => p.parse_struct(start, is_pub).map(Definition::Struct),
                TokenKind::Const => p.parse_const(start, is_pub).map(Definition::Const),
                TokenKind::Type => p.parse_type_def(start, is_pub).map(Definition::TypeAlias),
                _ if is_pub => Err(p.error_here("`fn`, `trait`, `struct`, `const` or `type`")),
                _ => Err(p.error_here("definition")),
            }
        })
    }

    fn parse_module(&mut self, start: Span) -> ParseResult<ModuleDef> {
        self.expect_token(TokenKind::Mod)?;
        let name = self.expect_identifier()?;
        self.expect_token(TokenKind::LBrace)?;

        let mut definitions = Vec::new();
        while !self.check_token(TokenKind::RBrace) {
            if self.is_at_end() {
                return Err(self.error_here("`}`"));
            }
            definitions.push(self.parse_definition()?);
        }
        self.expect_token(TokenKind::RBrace)?;

        Ok(ModuleDef {
            name,
            definitions,
            span: self.span_from(start),
        })
    }

    fn parse_trait(&mut self, start: Span, is_pub: bool) -> ParseResult<TraitDef> {
        self.expect_token(TokenKind::Trait)?;
        let name = self.expect_identifier()?;
        let type_params = self.parse_optional_type_params()?;
        let functions = self.parse_function_list()?;

        Ok(TraitDef {
            is_pub,
            name,
            type_params,
            functions,
            span: self.span_from(start),
        })
    }

    fn parse_impl(&mut self, start: Span) -> ParseResult<ImplDef> {
        self.expect_token(TokenKind::Impl)?;
        let ty = self.parse_type()?;
        let trait_ty = if self.eat(TokenKind::For) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let functions = self.parse_function_list()?;

        Ok(ImplDef {
            ty,
            trait_ty,
            functions,
            span: self.span_from(start),
        })
    }

    /// `{ function_def* }` as used by traits and impls
    fn parse_function_list(&mut self) -> ParseResult<Vec<FunctionDef>> {
        self.expect_token(TokenKind::LBrace)?;

        let mut functions = Vec::new();
        while !self.check_token(TokenKind::RBrace) {
            let start = self.current().span;
            let is_pub = self.eat(TokenKind::Pub);
            if !self.check_token(TokenKind::Fn) {
                return Err(self.error_here("`fn`"));
            }
            functions.push(self.nested(|p| p.parse_function(start, is_pub))?);
        }
        self.expect_token(TokenKind::RBrace)?;

        Ok(functions)
    }

    fn parse_function(&mut self, start: Span, is_pub: bool) -> ParseResult<FunctionDef> {
        self.expect_token(TokenKind::Fn)?;
        let name = self.expect_identifier()?;
        let type_params = self.parse_optional_type_params()?;

        self.expect_token(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check_token(TokenKind::RParen) {
            loop {
                params.push(self.parse_param()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect_token(TokenKind::RParen)?;

        let return_type = if self.eat(TokenKind::Arrow) {
            Some(self.parse_type()?)
        } else {
            None
        };

        let body = self.parse_block()?;

        Ok(FunctionDef {
            is_pub,
            name,
            type_params,
            params,
            return_type,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_param(&mut self) -> ParseResult<Param> {
        let name = self.expect_identifier()?;
        self.expect_token(TokenKind::Colon)?;
        let ty = self.parse_type()?;

        Ok(Param {
            span: name.span.to(ty.span()),
            name,
            ty,
        })
    }

    fn parse_optional_type_params(&mut self) -> ParseResult<Vec<Identifier>> {
        if !self.eat(TokenKind::Lt) {
            return Ok(Vec::new());
        }

        let mut params = vec![self.expect_identifier()?];
        while self.eat(TokenKind::Comma) {
            params.push(self.expect_identifier()?);
        }
        self.expect_token(TokenKind::Gt)?;

        Ok(params)
    }

    fn parse_struct(&mut self, start: Span, is_pub: bool) -> ParseResult<StructDef> {
        self.expect_token(TokenKind::Struct)?;
        let name = self.expect_identifier()?;
        let type_params = self.parse_optional_type_params()?;

        let fields = if self.eat(TokenKind::Semi) {
            None
        } else if self.eat(TokenKind::LBrace) {
            let mut fields = Vec::new();
            if !self.check_token(TokenKind::RBrace) {
                loop {
                    fields.push(self.parse_struct_field()?);
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.expect_token(TokenKind::RBrace)?;
            Some(fields)
        } else {
            return Err(self.error_here("`{` or `;`"));
        };

        Ok(StructDef {
            is_pub,
            name,
            type_params,
            fields,
            span: self.span_from(start),
        })
    }

    fn parse_struct_field(&mut self) -> ParseResult<StructField> {
        let start = self.current().span;
        let is_pub = self.eat(TokenKind::Pub);
        let name = self.expect_identifier()?;
        self.expect_token(TokenKind::Colon)?;
        let ty = self.parse_type()?;

        Ok(StructField {
            is_pub,
            name,
            ty,
            span: self.span_from(start),
        })
    }

    fn parse_const(&mut self, start: Span, is_pub: bool) -> ParseResult<ConstDef> {
        self.expect_token(TokenKind::Const)?;
        let name = self.expect_identifier()?;
        self.expect_token(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        self.expect_token(TokenKind::Eq)?;
        let value = self.parse_expression()?;
        self.expect_token(TokenKind::Semi)?;

        Ok(ConstDef {
            is_pub,
            name,
            ty,
            value,
            span: self.span_from(start),
        })
    }

    fn parse_type_def(&mut self, start: Span, is_pub: bool) -> ParseResult<TypeDef> {
        self.expect_token(TokenKind::Type)?;
        let name = self.expect_identifier()?;
        let type_params = self.parse_optional_type_params()?;
        self.expect_token(TokenKind::Eq)?;
        let ty = self.parse_type()?;
        self.expect_token(TokenKind::Semi)?;

        Ok(TypeDef {
            is_pub,
            name,
            type_params,
            ty,
            span: self.span_from(start),
        })
    }

    /// Parse a type
    pub fn parse_type(&mut self) -> ParseResult<Type> {
        self.nested(|p| {
            let start = p.current().span;

            if let Some(kind) = p.primitive_kind() {
                p.advance();
                return Ok(Type::Primitive(PrimitiveType { kind, span: start }));
            }

            match p.current().kind {
                TokenKind::Amp => {
                    p.advance();
                    let is_mut = p.eat(TokenKind::Mut);
                    let inner = p.parse_type()?;
                    Ok(Type::Reference(ReferenceType {
                        is_mut,
                        inner: Box::new(inner),
                        span: p.span_from(start),
                    }))
                }
                TokenKind::LParen => {
                    p.advance();
                    let mut elements = Vec::new();
                    if !p.check_token(TokenKind::RParen) {
                        elements.push(p.parse_type()?);
                        while p.eat(TokenKind::Comma) {
                            elements.push(p.parse_type()?);
                        }
                    }
                    p.expect_token(TokenKind::RParen)?;
                    Ok(Type::Tuple(TupleType {
                        elements,
                        span: p.span_from(start),
                    }))
                }
                _ if p.current().kind.is_word() => p.parse_path().map(Type::Path),
                _ => Err(p.error_here("type")),
            }
        })
    }

    fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self.current().kind {
            TokenKind::Bool => Some(PrimitiveKind::Bool),
            TokenKind::U8 => Some(PrimitiveKind::U8),
            TokenKind::U64 => Some(PrimitiveKind::U64),
            TokenKind::U128 => Some(PrimitiveKind::U128),
            TokenKind::Address => Some(PrimitiveKind::Address),
            _ => None,
        }
    }

    fn parse_path(&mut self) -> ParseResult<Path> {
        let first = self.expect_identifier()?;
        let start = first.span;
        let mut segments = vec![first];

        while self.eat(TokenKind::ColonColon) {
            segments.push(self.expect_identifier()?);
        }

        Ok(Path {
            segments,
            span: self.span_from(start),
        })
    }

    /// Parse an expression
    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.nested(|p| {
            if let Some(literal) = p.parse_literal() {
                return Ok(Expression::Literal(literal));
            }

            match p.current().kind {
                TokenKind::LBrace => p.parse_block().map(Expression::Block),
                TokenKind::Match => p.parse_match().map(Expression::Match),
                _ if p.current().kind.is_word() => p.parse_path().map(Expression::Path),
                _ => Err(p.error_here("expression")),
            }
        })
    }

    /// Consume a literal token, if the current token is one
    fn parse_literal(&mut self) -> Option<Literal> {
        let token = self.current();
        let value = match &token.kind {
            TokenKind::NumberLit { value, suffix } => LiteralValue::Number {
                value: *value,
                suffix: *suffix,
            },
            TokenKind::BoolLit(b) => LiteralValue::Bool(*b),
            TokenKind::StringLit(s) => LiteralValue::String(s.clone()),
            _ => return None,
        };
        let span = token.span;
        self.advance();
        Some(Literal { value, span })
    }

    fn parse_block(&mut self) -> ParseResult<Block> {
        self.nested(|p| {
            let start = p.current().span;
            p.expect_token(TokenKind::LBrace)?;

            let mut statements = Vec::new();
            let mut tail = None;

            while !p.check_token(TokenKind::RBrace) {
                if p.check_token(TokenKind::Let) {
                    statements.push(Statement::Let(p.parse_let()?));
                    continue;
                }

                let expr = p.parse_expression()?;
                if p.eat(TokenKind::Semi) {
                    statements.push(Statement::Expression(ExpressionStatement {
                        span: p.span_from(expr.span()),
                        expr,
                    }));
                } else if p.check_token(TokenKind::RBrace) {
                    tail = Some(Box::new(expr));
                } else {
                    return Err(p.error_here("`;` or `}`"));
                }
            }
            p.expect_token(TokenKind::RBrace)?;

            Ok(Block {
                statements,
                tail,
                span: p.span_from(start),
            })
        })
    }

    fn parse_let(&mut self) -> ParseResult<LetStatement> {
        let start = self.current().span;
        self.expect_token(TokenKind::Let)?;
        let is_mut = self.eat(TokenKind::Mut);
        let name = self.expect_identifier()?;

        let ty = if self.eat(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let value = if self.eat(TokenKind::Eq) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect_token(TokenKind::Semi)?;

        Ok(LetStatement {
            is_mut,
            name,
            ty,
            value,
            span: self.span_from(start),
        })
    }

    fn parse_match(&mut self) -> ParseResult<MatchExpr> {
        let start = self.current().span;
        self.expect_token(TokenKind::Match)?;
        let value = self.parse_expression()?;
        self.expect_token(TokenKind::LBrace)?;

        let mut arms = Vec::new();
        while !self.check_token(TokenKind::RBrace) {
            let pattern = self.parse_pattern()?;
            self.expect_token(TokenKind::FatArrow)?;
            let value = self.parse_expression()?;
            self.eat(TokenKind::Semi);
            arms.push(MatchArm {
                span: self.span_from(pattern.span()),
                pattern,
                value,
            });
        }
        self.expect_token(TokenKind::RBrace)?;

        Ok(MatchExpr {
            value: Box::new(value),
            arms,
            span: self.span_from(start),
        })
    }

    /// Parse a match pattern
    pub fn parse_pattern(&mut self) -> ParseResult<Pattern> {
        self.nested(|p| {
            if p.check_token(TokenKind::Underscore) {
                let span = p.current().span;
                p.advance();
                return Ok(Pattern::Wildcard(span));
            }

            if let Some(literal) = p.parse_literal() {
                return Ok(Pattern::Literal(literal));
            }

            if !p.current().kind.is_word() {
                return Err(p.error_here("pattern"));
            }

            let path = p.parse_path()?;
            if p.eat(TokenKind::LParen) {
                let mut elements = Vec::new();
                if !p.check_token(TokenKind::RParen) {
                    elements.push(p.parse_pattern()?);
                    while p.eat(TokenKind::Comma) {
                        elements.push(p.parse_pattern()?);
                    }
                }
                p.expect_token(TokenKind::RParen)?;
                return Ok(Pattern::TupleStruct(TupleStructPattern {
                    span: p.span_from(path.span),
                    path,
                    elements,
                }));
            }

            if path.is_simple() {
                let mut segments = path.segments;
                return Ok(Pattern::Identifier(segments.remove(0)));
            }

            Err(p.error_here("`(`"))
        })
    }

    // Helper methods

    /// Run `f` one nesting level deeper, failing past the configured limit
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= self.max_depth {
            let token = self.current();
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
                line: token.line(),
                column: token.column(),
            });
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.position += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    /// Span from `start` through the last consumed token
    fn span_from(&self, start: Span) -> Span {
        match self.position.checked_sub(1) {
            Some(prev) => start.to(self.tokens[prev].span),
            None => start,
        }
    }

    fn check_token(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.current().kind == kind
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check_token(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error_here(&self, expected: &str) -> ParseError {
        let token = self.current();
        match &token.kind {
            TokenKind::Eof => ParseError::UnexpectedEof {
                expected: expected.to_string(),
            },
            TokenKind::Error(message) => ParseError::Lex {
                message: message.clone(),
                line: token.line(),
                column: token.column(),
            },
            other => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                got: other.to_string(),
                line: token.line(),
                column: token.column(),
            },
        }
    }

    fn expect_token(&mut self, expected: TokenKind) -> ParseResult<()> {
        if self.check_token(expected.clone()) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here(&format!("`{}`", expected)))
        }
    }

    /// Consume a name; keyword tokens read as identifiers here
    fn expect_identifier(&mut self) -> ParseResult<Identifier> {
        let token = self.current();
        if !token.kind.is_word() {
            return Err(self.error_here("identifier"));
        }
        let ident = Identifier::new(token.text.clone(), token.span);
        self.advance();
        Ok(ident)
    }
}
