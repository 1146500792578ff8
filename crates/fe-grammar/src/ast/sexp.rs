//! S-expression rendering of the Fe AST
//!
//! Output follows the tree-sitter convention: only named nodes appear,
//! fields are written as `field: (node)`, and hidden rules are flattened
//! into their parent. Comments are extras and are left out.

use super::nodes::{
    Block, Definition, Expression, FunctionDef, Identifier, Literal, Path, Pattern, SourceFile,
    Statement, Type,
};

/// Render a source file as an S-expression
pub fn to_sexp(file: &SourceFile) -> String {
    let mut writer = SexpWriter::default();
    writer.open(None, "source_file");
    for definition in &file.definitions {
        writer.definition(definition);
    }
    writer.close();
    writer.out
}

#[derive(Default)]
struct SexpWriter {
    out: String,
}

impl SexpWriter {
    fn open(&mut self, field: Option<&str>, kind: &str) {
        if !self.out.is_empty() {
            self.out.push(' ');
        }
        if let Some(field) = field {
            self.out.push_str(field);
            self.out.push_str(": ");
        }
        self.out.push('(');
        self.out.push_str(kind);
    }

    fn close(&mut self) {
        self.out.push(')');
    }

    fn leaf(&mut self, field: Option<&str>, kind: &str) {
        self.open(field, kind);
        self.close();
    }

    fn name(&mut self, _ident: &Identifier) {
        self.leaf(Some("name"), "identifier");
    }

    fn type_params(&mut self, params: &[Identifier]) {
        if params.is_empty() {
            return;
        }
        self.open(None, "type_params");
        for _ in params {
            self.leaf(None, "identifier");
        }
        self.close();
    }

    fn definition(&mut self, definition: &Definition) {
        match definition {
            Definition::Module(def) => {
                self.open(None, "module_def");
                self.name(&def.name);
                for inner in &def.definitions {
                    self.definition(inner);
                }
                self.close();
            }
            Definition::Function(def) => self.function(def),
            Definition::Struct(def) => {
                self.open(None, "struct_def");
                self.name(&def.name);
                self.type_params(&def.type_params);
                if let Some(fields) = &def.fields {
                    self.open(None, "struct_fields");
                    for field in fields {
                        self.open(None, "struct_field");
                        self.name(&field.name);
                        self.ty(Some("type"), &field.ty);
                        self.close();
                    }
                    self.close();
                }
                self.close();
            }
            Definition::Const(def) => {
                self.open(None, "const_def");
                self.name(&def.name);
                self.ty(Some("type"), &def.ty);
                self.expression(None, &def.value);
                self.close();
            }
            Definition::TypeAlias(def) => {
                self.open(None, "type_def");
                self.name(&def.name);
                self.type_params(&def.type_params);
                self.ty(Some("type"), &def.ty);
                self.close();
            }
            Definition::Trait(def) => {
                self.open(None, "trait_def");
                self.name(&def.name);
                self.type_params(&def.type_params);
                for function in &def.functions {
                    self.function(function);
                }
                self.close();
            }
            Definition::Impl(def) => {
                self.open(None, "impl_def");
                self.ty(Some("type"), &def.ty);
                if let Some(trait_ty) = &def.trait_ty {
                    self.ty(Some("trait"), trait_ty);
                }
                for function in &def.functions {
                    self.function(function);
                }
                self.close();
            }
        }
    }

    fn function(&mut self, function: &FunctionDef) {
        self.open(None, "function_def");
        self.name(&function.name);
        self.type_params(&function.type_params);
        if !function.params.is_empty() {
            self.open(None, "params");
            for param in &function.params {
                self.open(None, "param");
                self.name(&param.name);
                self.ty(Some("type"), &param.ty);
                self.close();
            }
            self.close();
        }
        if let Some(ret) = &function.return_type {
            self.ty(Some("return_type"), ret);
        }
        self.open(None, "block");
        self.block_expr(None, &function.body);
        self.close();
        self.close();
    }

    fn ty(&mut self, field: Option<&str>, ty: &Type) {
        match ty {
            Type::Path(path) => self.path(field, path),
            Type::Reference(reference) => {
                self.open(field, "reference_type");
                self.ty(None, &reference.inner);
                self.close();
            }
            Type::Primitive(_) => self.leaf(field, "primitive_type"),
            Type::Tuple(tuple) => {
                self.open(field, "tuple_type");
                for element in &tuple.elements {
                    self.ty(None, element);
                }
                self.close();
            }
        }
    }

    fn path(&mut self, field: Option<&str>, path: &Path) {
        self.open(field, "path");
        for _ in &path.segments {
            self.leaf(None, "identifier");
        }
        self.close();
    }

    fn literal(&mut self, field: Option<&str>, literal: &Literal) {
        self.open(field, "literal");
        self.leaf(None, literal.value.node_kind());
        self.close();
    }

    fn expression(&mut self, field: Option<&str>, expr: &Expression) {
        match expr {
            Expression::Literal(literal) => self.literal(field, literal),
            Expression::Path(path) => self.path(field, path),
            Expression::Block(block) => self.block_expr(field, block),
            Expression::Match(match_expr) => {
                self.open(field, "match_expr");
                self.expression(Some("value"), &match_expr.value);
                for arm in &match_expr.arms {
                    self.open(None, "match_arm");
                    self.pattern(Some("pattern"), &arm.pattern);
                    self.expression(Some("value"), &arm.value);
                    self.close();
                }
                self.close();
            }
        }
    }

    fn block_expr(&mut self, field: Option<&str>, block: &Block) {
        self.open(field, "block_expr");
        for statement in &block.statements {
            match statement {
                Statement::Let(stmt) => {
                    self.open(None, "let_statement");
                    self.name(&stmt.name);
                    if let Some(ty) = &stmt.ty {
                        self.ty(Some("type"), ty);
                    }
                    if let Some(value) = &stmt.value {
                        self.expression(Some("value"), value);
                    }
                    self.close();
                }
                Statement::Expression(stmt) => self.expression(None, &stmt.expr),
            }
        }
        if let Some(tail) = &block.tail {
            self.expression(None, tail);
        }
        self.close();
    }

    /// Patterns are a hidden rule, so the field lands on every visible child
    fn pattern(&mut self, field: Option<&str>, pattern: &Pattern) {
        match pattern {
            Pattern::Identifier(_) => self.leaf(field, "identifier"),
            Pattern::Literal(literal) => self.literal(field, literal),
            Pattern::Wildcard(_) => {}
            Pattern::TupleStruct(tuple) => {
                self.path(field, &tuple.path);
                for element in &tuple.elements {
                    self.pattern(field, element);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SourceParser;

    fn sexp(source: &str) -> String {
        to_sexp(&SourceParser::new(source).parse_source_file().unwrap())
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(sexp(""), "(source_file)");
        assert_eq!(sexp("// only a comment"), "(source_file)");
    }

    #[test]
    fn test_empty_function() {
        assert_eq!(
            sexp("fn f() {}"),
            "(source_file (function_def name: (identifier) (block (block_expr))))"
        );
    }

    #[test]
    fn test_function_signature() {
        assert_eq!(
            sexp("pub fn get<T>(x: &mut T) -> u64 { x }"),
            "(source_file (function_def name: (identifier) \
             (type_params (identifier)) \
             (params (param name: (identifier) type: (reference_type (path (identifier))))) \
             return_type: (primitive_type) \
             (block (block_expr (path (identifier))))))"
        );
    }

    #[test]
    fn test_struct_forms() {
        assert_eq!(
            sexp("struct Unit; struct P { x: u8, pub y: (bool, address) }"),
            "(source_file (struct_def name: (identifier)) \
             (struct_def name: (identifier) (struct_fields \
             (struct_field name: (identifier) type: (primitive_type)) \
             (struct_field name: (identifier) type: (tuple_type (primitive_type) (primitive_type))))))"
        );
    }

    #[test]
    fn test_const_and_type_alias() {
        assert_eq!(
            sexp("const N: u8 = 1u8; type Name = std::Name;"),
            "(source_file (const_def name: (identifier) type: (primitive_type) \
             (literal (number_literal))) \
             (type_def name: (identifier) type: (path (identifier) (identifier))))"
        );
    }

    #[test]
    fn test_let_statements() {
        assert_eq!(
            sexp("fn f() { let mut a: bool = true; let b; \"s\"; }"),
            "(source_file (function_def name: (identifier) (block (block_expr \
             (let_statement name: (identifier) type: (primitive_type) \
             value: (literal (boolean_literal))) \
             (let_statement name: (identifier)) \
             (literal (string_literal))))))"
        );
    }

    #[test]
    fn test_match_arms() {
        assert_eq!(
            sexp("fn f() { match x { Some(y) => y; _ => {} } }"),
            "(source_file (function_def name: (identifier) (block (block_expr \
             (match_expr value: (path (identifier)) \
             (match_arm pattern: (path (identifier)) pattern: (identifier) value: (path (identifier))) \
             (match_arm value: (block_expr)))))))"
        );
    }

    #[test]
    fn test_trait_and_impl() {
        assert_eq!(
            sexp("mod m { trait T { fn a() {} } impl S for T {} }"),
            "(source_file (module_def name: (identifier) \
             (trait_def name: (identifier) (function_def name: (identifier) (block (block_expr)))) \
             (impl_def type: (path (identifier)) trait: (path (identifier)))))"
        );
    }
}
