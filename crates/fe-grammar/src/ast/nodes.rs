//! AST node definitions
//!
//! The tree mirrors the Fe grammar rule for rule. Hidden grammar rules
//! (`_definition`, `_type`, `_expression`, `_statement`, `_pattern`) become
//! enums; visible rules become structs that carry a [`Span`].

use serde::Serialize;
use std::fmt;

/// Byte range of a node plus its 1-indexed start position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// Start line (1-indexed)
    pub line: usize,
    /// Start column (1-indexed, in characters)
    pub column: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self { start, end, line, column }
    }

    /// Span covering `self` through the end of `other`
    pub fn to(self, other: Span) -> Span {
        Span { end: other.end, ..self }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Integer literal suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntSuffix {
    U8,
    U64,
    U128,
}

impl fmt::Display for IntSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntSuffix::U8 => write!(f, "u8"),
            IntSuffix::U64 => write!(f, "u64"),
            IntSuffix::U128 => write!(f, "u128"),
        }
    }
}

/// Root of a parsed Fe file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceFile {
    pub definitions: Vec<Definition>,
    /// Comments skipped while parsing, in source order
    pub comments: Vec<Comment>,
    pub span: Span,
}

/// A line or block comment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub text: String,
    pub span: Span,
}

impl Comment {
    /// Check if this is a `/* ... */` comment
    pub fn is_block(&self) -> bool {
        self.text.starts_with("/*")
    }
}

/// An identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    /// Create a new identifier
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self { name: name.into(), span }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A `::`-separated path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Path {
    pub segments: Vec<Identifier>,
    pub span: Span,
}

impl Path {
    /// Get the first segment
    pub fn root(&self) -> Option<&Identifier> {
        self.segments.first()
    }

    /// Get the last segment
    pub fn last(&self) -> Option<&Identifier> {
        self.segments.last()
    }

    /// Check if this is a simple path (one segment)
    pub fn is_simple(&self) -> bool {
        self.segments.len() == 1
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.segments.iter().map(|s| s.name.as_str()).collect();
        write!(f, "{}", names.join("::"))
    }
}

/// Top-level and module-level items
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "definition", rename_all = "snake_case")]
pub enum Definition {
    Module(ModuleDef),
    Function(FunctionDef),
    Struct(StructDef),
    Const(ConstDef),
    TypeAlias(TypeDef),
    Trait(TraitDef),
    Impl(ImplDef),
}

impl Definition {
    /// Source span of the definition
    pub fn span(&self) -> Span {
        match self {
            Definition::Module(def) => def.span,
            Definition::Function(def) => def.span,
            Definition::Struct(def) => def.span,
            Definition::Const(def) => def.span,
            Definition::TypeAlias(def) => def.span,
            Definition::Trait(def) => def.span,
            Definition::Impl(def) => def.span,
        }
    }

    /// Name of the definition; impls are anonymous
    pub fn name(&self) -> Option<&Identifier> {
        match self {
            Definition::Module(def) => Some(&def.name),
            Definition::Function(def) => Some(&def.name),
            Definition::Struct(def) => Some(&def.name),
            Definition::Const(def) => Some(&def.name),
            Definition::TypeAlias(def) => Some(&def.name),
            Definition::Trait(def) => Some(&def.name),
            Definition::Impl(_) => None,
        }
    }

    /// Grammar node kind of the definition
    pub fn node_kind(&self) -> &'static str {
        match self {
            Definition::Module(_) => "module_def",
            Definition::Function(_) => "function_def",
            Definition::Struct(_) => "struct_def",
            Definition::Const(_) => "const_def",
            Definition::TypeAlias(_) => "type_def",
            Definition::Trait(_) => "trait_def",
            Definition::Impl(_) => "impl_def",
        }
    }
}

/// `mod name { ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleDef {
    pub name: Identifier,
    pub definitions: Vec<Definition>,
    pub span: Span,
}

/// `pub? trait Name<T> { fn ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraitDef {
    pub is_pub: bool,
    pub name: Identifier,
    pub type_params: Vec<Identifier>,
    pub functions: Vec<FunctionDef>,
    pub span: Span,
}

/// `impl Type (for Trait)? { fn ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImplDef {
    pub ty: Type,
    pub trait_ty: Option<Type>,
    pub functions: Vec<FunctionDef>,
    pub span: Span,
}

/// `pub? fn name<T>(params) -> ret { ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDef {
    pub is_pub: bool,
    pub name: Identifier,
    pub type_params: Vec<Identifier>,
    pub params: Vec<Param>,
    pub return_type: Option<Type>,
    pub body: Block,
    pub span: Span,
}

/// `name: Type`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: Identifier,
    pub ty: Type,
    pub span: Span,
}

/// `pub? struct Name<T> { fields }` or `pub? struct Name;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructDef {
    pub is_pub: bool,
    pub name: Identifier,
    pub type_params: Vec<Identifier>,
    /// `None` for a unit struct
    pub fields: Option<Vec<StructField>>,
    pub span: Span,
}

impl StructDef {
    /// Check if this struct was declared with `;`
    pub fn is_unit(&self) -> bool {
        self.fields.is_none()
    }
}

/// `pub? name: Type`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructField {
    pub is_pub: bool,
    pub name: Identifier,
    pub ty: Type,
    pub span: Span,
}

/// `pub? const NAME: Type = expr;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstDef {
    pub is_pub: bool,
    pub name: Identifier,
    pub ty: Type,
    pub value: Expression,
    pub span: Span,
}

/// `pub? type Name<T> = Type;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDef {
    pub is_pub: bool,
    pub name: Identifier,
    pub type_params: Vec<Identifier>,
    pub ty: Type,
    pub span: Span,
}

/// Type expressions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Type {
    Path(Path),
    Reference(ReferenceType),
    Primitive(PrimitiveType),
    Tuple(TupleType),
}

impl Type {
    /// Source span of the type
    pub fn span(&self) -> Span {
        match self {
            Type::Path(path) => path.span,
            Type::Reference(ty) => ty.span,
            Type::Primitive(ty) => ty.span,
            Type::Tuple(ty) => ty.span,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Path(path) => write!(f, "{}", path),
            Type::Reference(ty) => {
                if ty.is_mut {
                    write!(f, "&mut {}", ty.inner)
                } else {
                    write!(f, "&{}", ty.inner)
                }
            }
            Type::Primitive(ty) => write!(f, "{}", ty.kind),
            Type::Tuple(ty) => {
                let elements: Vec<String> = ty.elements.iter().map(|t| t.to_string()).collect();
                write!(f, "({})", elements.join(", "))
            }
        }
    }
}

/// `&T` or `&mut T`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceType {
    pub is_mut: bool,
    pub inner: Box<Type>,
    pub span: Span,
}

/// `(A, B, ...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TupleType {
    pub elements: Vec<Type>,
    pub span: Span,
}

/// Built-in scalar type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimitiveType {
    pub kind: PrimitiveKind,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Bool,
    U8,
    U64,
    U128,
    Address,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveKind::Bool => write!(f, "bool"),
            PrimitiveKind::U8 => write!(f, "u8"),
            PrimitiveKind::U64 => write!(f, "u64"),
            PrimitiveKind::U128 => write!(f, "u128"),
            PrimitiveKind::Address => write!(f, "address"),
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "expression", rename_all = "snake_case")]
pub enum Expression {
    Literal(Literal),
    Path(Path),
    Block(Block),
    Match(MatchExpr),
}

impl Expression {
    /// Source span of the expression
    pub fn span(&self) -> Span {
        match self {
            Expression::Literal(lit) => lit.span,
            Expression::Path(path) => path.span,
            Expression::Block(block) => block.span,
            Expression::Match(expr) => expr.span,
        }
    }
}

/// A literal value with its span
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Literal {
    pub value: LiteralValue,
    pub span: Span,
}

/// Literal values
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralValue {
    /// `value` is `None` for literals wider than 128 bits
    Number { value: Option<u128>, suffix: Option<IntSuffix> },
    Bool(bool),
    String(String),
}

impl LiteralValue {
    /// Grammar node kind of the inner literal
    pub fn node_kind(&self) -> &'static str {
        match self {
            LiteralValue::Number { .. } => "number_literal",
            LiteralValue::Bool(_) => "boolean_literal",
            LiteralValue::String(_) => "string_literal",
        }
    }

    /// Check if a suffixed number fits its declared width
    pub fn fits_suffix(&self) -> bool {
        match self {
            LiteralValue::Number { value: None, suffix } => suffix.is_none(),
            LiteralValue::Number { value: Some(value), suffix: Some(IntSuffix::U8) } => {
                *value <= u8::MAX as u128
            }
            LiteralValue::Number { value: Some(value), suffix: Some(IntSuffix::U64) } => {
                *value <= u64::MAX as u128
            }
            _ => true,
        }
    }
}

/// `{ statements* tail? }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub tail: Option<Box<Expression>>,
    pub span: Span,
}

impl Block {
    /// Check if the block has neither statements nor a tail expression
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty() && self.tail.is_none()
    }
}

/// Statements inside a block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "statement", rename_all = "snake_case")]
pub enum Statement {
    Let(LetStatement),
    /// `expr;`
    Expression(ExpressionStatement),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStatement {
    pub expr: Expression,
    pub span: Span,
}

/// `let mut? name (: Type)? (= value)?;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetStatement {
    pub is_mut: bool,
    pub name: Identifier,
    pub ty: Option<Type>,
    pub value: Option<Expression>,
    pub span: Span,
}

/// `match value { arms }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchExpr {
    pub value: Box<Expression>,
    pub arms: Vec<MatchArm>,
    pub span: Span,
}

/// `pattern => value ;?`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchArm {
    pub pattern: Pattern,
    pub value: Expression,
    pub span: Span,
}

/// Match patterns
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "pattern", rename_all = "snake_case")]
pub enum Pattern {
    Identifier(Identifier),
    Literal(Literal),
    Wildcard(Span),
    TupleStruct(TupleStructPattern),
}

impl Pattern {
    /// Source span of the pattern
    pub fn span(&self) -> Span {
        match self {
            Pattern::Identifier(ident) => ident.span,
            Pattern::Literal(lit) => lit.span,
            Pattern::Wildcard(span) => *span,
            Pattern::TupleStruct(pattern) => pattern.span,
        }
    }
}

/// `Path(p1, p2, ...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TupleStructPattern {
    pub path: Path,
    pub elements: Vec<Pattern>,
    pub span: Span,
}
