//! Visitor pattern for traversing the Fe AST

use super::nodes::{
    Block, Definition, Expression, FunctionDef, Identifier, Literal, MatchArm, Param, Path,
    Pattern, SourceFile, Statement, StructField, Type,
};

/// Visitor trait for AST traversal
///
/// Every method defaults to walking its children, so an implementation only
/// overrides the nodes it cares about and calls the matching `walk_*`
/// function to keep descending.
pub trait Visitor: Sized {
    /// Visit a source file
    fn visit_source_file(&mut self, file: &SourceFile) {
        walk_source_file(self, file);
    }

    /// Visit a definition
    fn visit_definition(&mut self, definition: &Definition) {
        walk_definition(self, definition);
    }

    /// Visit a function definition
    fn visit_function(&mut self, function: &FunctionDef) {
        walk_function(self, function);
    }

    /// Visit a function parameter
    fn visit_param(&mut self, param: &Param) {
        walk_param(self, param);
    }

    /// Visit a struct field
    fn visit_struct_field(&mut self, field: &StructField) {
        walk_struct_field(self, field);
    }

    /// Visit a type
    fn visit_type(&mut self, ty: &Type) {
        walk_type(self, ty);
    }

    /// Visit a block
    fn visit_block(&mut self, block: &Block) {
        walk_block(self, block);
    }

    /// Visit a statement
    fn visit_statement(&mut self, statement: &Statement) {
        walk_statement(self, statement);
    }

    /// Visit an expression
    fn visit_expression(&mut self, expr: &Expression) {
        walk_expression(self, expr);
    }

    /// Visit a match arm
    fn visit_match_arm(&mut self, arm: &MatchArm) {
        walk_match_arm(self, arm);
    }

    /// Visit a pattern
    fn visit_pattern(&mut self, pattern: &Pattern) {
        walk_pattern(self, pattern);
    }

    /// Visit a path
    fn visit_path(&mut self, path: &Path) {
        walk_path(self, path);
    }

    /// Visit a literal
    fn visit_literal(&mut self, _literal: &Literal) {
        // Leaf node, no children
    }

    /// Visit an identifier
    fn visit_identifier(&mut self, _ident: &Identifier) {
        // Leaf node, no children
    }
}

/// Walk a source file
pub fn walk_source_file<V: Visitor>(visitor: &mut V, file: &SourceFile) {
    for definition in &file.definitions {
        visitor.visit_definition(definition);
    }
}

/// Walk a definition
pub fn walk_definition<V: Visitor>(visitor: &mut V, definition: &Definition) {
    match definition {
        Definition::Module(def) => {
            visitor.visit_identifier(&def.name);
            for inner in &def.definitions {
                visitor.visit_definition(inner);
            }
        }
        Definition::Function(def) => {
            visitor.visit_function(def);
        }
        Definition::Struct(def) => {
            visitor.visit_identifier(&def.name);
            for param in &def.type_params {
                visitor.visit_identifier(param);
            }
            for field in def.fields.iter().flatten() {
                visitor.visit_struct_field(field);
            }
        }
        Definition::Const(def) => {
            visitor.visit_identifier(&def.name);
            visitor.visit_type(&def.ty);
            visitor.visit_expression(&def.value);
        }
        Definition::TypeAlias(def) => {
            visitor.visit_identifier(&def.name);
            for param in &def.type_params {
                visitor.visit_identifier(param);
            }
            visitor.visit_type(&def.ty);
        }
        Definition::Trait(def) => {
            visitor.visit_identifier(&def.name);
            for param in &def.type_params {
                visitor.visit_identifier(param);
            }
            for function in &def.functions {
                visitor.visit_function(function);
            }
        }
        Definition::Impl(def) => {
            visitor.visit_type(&def.ty);
            if let Some(trait_ty) = &def.trait_ty {
                visitor.visit_type(trait_ty);
            }
            for function in &def.functions {
                visitor.visit_function(function);
            }
        }
    }
}

/// Walk a function definition
pub fn walk_function<V: Visitor>(visitor: &mut V, function: &FunctionDef) {
    visitor.visit_identifier(&function.name);
    for param in &function.type_params {
        visitor.visit_identifier(param);
    }
    for param in &function.params {
        visitor.visit_param(param);
    }
    if let Some(ret) = &function.return_type {
        visitor.visit_type(ret);
    }
    visitor.visit_block(&function.body);
}

/// Walk a parameter
pub fn walk_param<V: Visitor>(visitor: &mut V, param: &Param) {
    visitor.visit_identifier(&param.name);
    visitor.visit_type(&param.ty);
}

/// Walk a struct field
pub fn walk_struct_field<V: Visitor>(visitor: &mut V, field: &StructField) {
    visitor.visit_identifier(&field.name);
    visitor.visit_type(&field.ty);
}

/// Walk a type
pub fn walk_type<V: Visitor>(visitor: &mut V, ty: &Type) {
    match ty {
        Type::Path(path) => visitor.visit_path(path),
        Type::Reference(reference) => visitor.visit_type(&reference.inner),
        Type::Primitive(_) => {}
        Type::Tuple(tuple) => {
            for element in &tuple.elements {
                visitor.visit_type(element);
            }
        }
    }
}

/// Walk a block
pub fn walk_block<V: Visitor>(visitor: &mut V, block: &Block) {
    for statement in &block.statements {
        visitor.visit_statement(statement);
    }
    if let Some(tail) = &block.tail {
        visitor.visit_expression(tail);
    }
}

/// Walk a statement
pub fn walk_statement<V: Visitor>(visitor: &mut V, statement: &Statement) {
    match statement {
        Statement::Let(stmt) => {
            visitor.visit_identifier(&stmt.name);
            if let Some(ty) = &stmt.ty {
                visitor.visit_type(ty);
            }
            if let Some(value) = &stmt.value {
                visitor.visit_expression(value);
            }
        }
        Statement::Expression(stmt) => visitor.visit_expression(&stmt.expr),
    }
}

/// Walk an expression
pub fn walk_expression<V: Visitor>(visitor: &mut V, expr: &Expression) {
    match expr {
        Expression::Literal(literal) => visitor.visit_literal(literal),
        Expression::Path(path) => visitor.visit_path(path),
        Expression::Block(block) => visitor.visit_block(block),
        Expression::Match(match_expr) => {
            visitor.visit_expression(&match_expr.value);
            for arm in &match_expr.arms {
                visitor.visit_match_arm(arm);
            }
        }
    }
}

/// Walk a match arm
pub fn walk_match_arm<V: Visitor>(visitor: &mut V, arm: &MatchArm) {
    visitor.visit_pattern(&arm.pattern);
    visitor.visit_expression(&arm.value);
}

/// Walk a pattern
pub fn walk_pattern<V: Visitor>(visitor: &mut V, pattern: &Pattern) {
    match pattern {
        Pattern::Identifier(ident) => visitor.visit_identifier(ident),
        Pattern::Literal(literal) => visitor.visit_literal(literal),
        Pattern::Wildcard(_) => {}
        Pattern::TupleStruct(tuple) => {
            visitor.visit_path(&tuple.path);
            for element in &tuple.elements {
                visitor.visit_pattern(element);
            }
        }
    }
}

/// Walk a path
pub fn walk_path<V: Visitor>(visitor: &mut V, path: &Path) {
    for segment in &path.segments {
        visitor.visit_identifier(segment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SourceParser;

    /// Test visitor that counts nodes
    #[derive(Default)]
    struct CountingVisitor {
        definitions: usize,
        functions: usize,
        types: usize,
        expressions: usize,
        patterns: usize,
        literals: usize,
        identifiers: usize,
    }

    impl Visitor for CountingVisitor {
        fn visit_definition(&mut self, definition: &Definition) {
            self.definitions += 1;
            walk_definition(self, definition);
        }

        fn visit_function(&mut self, function: &FunctionDef) {
            self.functions += 1;
            walk_function(self, function);
        }

        fn visit_type(&mut self, ty: &Type) {
            self.types += 1;
            walk_type(self, ty);
        }

        fn visit_expression(&mut self, expr: &Expression) {
            self.expressions += 1;
            walk_expression(self, expr);
        }

        fn visit_pattern(&mut self, pattern: &Pattern) {
            self.patterns += 1;
            walk_pattern(self, pattern);
        }

        fn visit_literal(&mut self, _literal: &Literal) {
            self.literals += 1;
        }

        fn visit_identifier(&mut self, _ident: &Identifier) {
            self.identifiers += 1;
        }
    }

    fn count(source: &str) -> CountingVisitor {
        let file = SourceParser::new(source).parse_source_file().unwrap();
        let mut visitor = CountingVisitor::default();
        visitor.visit_source_file(&file);
        visitor
    }

    #[test]
    fn test_count_empty_file() {
        let counts = count("");
        assert_eq!(counts.definitions, 0);
        assert_eq!(counts.identifiers, 0);
    }

    #[test]
    fn test_count_function() {
        let counts = count("fn add(a: u64, b: u64) -> u64 { a }");

        assert_eq!(counts.definitions, 1);
        assert_eq!(counts.functions, 1);
        assert_eq!(counts.types, 3); // two params + return type
        assert_eq!(counts.expressions, 1); // tail `a`
        assert_eq!(counts.identifiers, 4); // add, a, b, a
    }

    #[test]
    fn test_count_nested_modules() {
        let counts = count("mod outer { mod inner { struct Unit; } const X: u8 = 1; }");

        assert_eq!(counts.definitions, 4);
        assert_eq!(counts.literals, 1);
        assert_eq!(counts.identifiers, 4); // outer, inner, Unit, X
    }

    #[test]
    fn test_count_impl_functions() {
        let counts = count("impl Foo for Bar { fn a() {} fn b() {} }");

        assert_eq!(counts.definitions, 1);
        assert_eq!(counts.functions, 2);
        assert_eq!(counts.types, 2);
    }

    #[test]
    fn test_count_match_patterns() {
        let counts = count("fn f() { match x { Some(y) => y; _ => 0 } }");

        assert_eq!(counts.patterns, 3); // Some(y), y, _
        assert_eq!(counts.literals, 1);
    }

    /// Test visitor that collects all paths
    #[derive(Default)]
    struct PathCollector {
        paths: Vec<String>,
    }

    impl Visitor for PathCollector {
        fn visit_path(&mut self, path: &Path) {
            self.paths.push(path.to_string());
        }
    }

    #[test]
    fn test_path_collection() {
        let file = SourceParser::new(
            "const A: std::evm::Word = defaults::WORD; type B = &mut (Ctx, u8);",
        )
        .parse_source_file()
        .unwrap();

        let mut collector = PathCollector::default();
        collector.visit_source_file(&file);

        assert_eq!(collector.paths, vec!["std::evm::Word", "defaults::WORD", "Ctx"]);
    }
}
