//! Abstract Syntax Tree (AST) for Fe source files
//!
//! The AST is the typed result of parsing and the input to S-expression
//! rendering and highlighting.

pub mod nodes;
pub mod sexp;
pub mod visitor;

pub use nodes::{
    Block, Comment, ConstDef, Definition, Expression, ExpressionStatement, FunctionDef,
    Identifier, ImplDef, IntSuffix, LetStatement, Literal, LiteralValue, MatchArm, MatchExpr,
    ModuleDef, Param, Path, Pattern, PrimitiveKind, PrimitiveType, ReferenceType, SourceFile,
    Span, Statement, StructDef, StructField, TraitDef, TupleStructPattern, TupleType, Type,
    TypeDef,
};
pub use sexp::to_sexp;
pub use visitor::{walk_definition, walk_source_file, Visitor};
