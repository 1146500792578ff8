//! Test utilities for Fe grammar tests and benchmarks
//!
//! Sample sources and generators shared by unit tests and the criterion
//! benches, so each suite does not carry its own copies.

use crate::parser::Parser;
use crate::tree::Tree;

/// A token contract exercising every definition form
pub const TOKEN_CONTRACT: &str = r#"// Minimal fungible token
mod token {
    pub const DECIMALS: u8 = 18u8;
    pub const NAME: u8 = "Fe Token";

    pub type Balance = u128;

    pub struct Account {
        pub owner: address,
        balance: Balance
    }

    pub struct Marker;

    pub trait Transfer<T> {
        fn transfer(to: address, amount: &T) -> bool { true }
    }

    impl Account for Transfer {
        pub fn transfer(to: address, amount: &Balance) -> bool {
            let ok: bool = true;
            match ok {
                true => { 1u8 };
                _ => 0u8
            };
            ok
        }
    }
}

/* entry point */
pub fn main(ctx: &mut std::evm::Context) -> (bool, u64) {
    let mut total = 0x2a;
    total
}
"#;

/// Small valid sources, one per definition form
pub const SMALL_SOURCES: &[&str] = &[
    "fn main() {}",
    "mod empty {}",
    "struct Unit;",
    "pub struct Point { x: u64, y: u64 }",
    "const MAX: u128 = 340282366920938463463374607431768211455;",
    "type Pair<A, B> = (A, B);",
    "pub trait Show { fn show() {} }",
    "impl Point { fn origin() -> Point { Point } }",
];

/// Create a parser with the built-in grammar installed
pub fn fe_parser() -> Parser {
    let mut parser = Parser::new();
    if let Err(e) = parser.set_language(&crate::language()) {
        panic!("Error loading Fe grammar: {}", e);
    }
    parser
}

/// Parse a source that is expected to be valid
pub fn parse_ok(source: &str) -> Tree {
    match fe_parser().parse(source) {
        Ok(tree) => tree,
        Err(e) => panic!("Expected {:?} to parse, got {}", source, e),
    }
}

/// Generate a module with `count` functions, each with a few statements
pub fn generated_module(count: usize) -> String {
    let mut source = String::from("mod generated {\n");
    for i in 0..count {
        source.push_str(&format!(
            "    pub fn f{i}(a: u64, b: &mut (bool, address)) -> u64 {{\n        \
             let x: u64 = {i};\n        \
             match a {{ Some(v) => v; _ => x }}\n    }}\n"
        ));
    }
    source.push_str("}\n");
    source
}

/// Generate a function whose body nests `depth` blocks
pub fn nested_blocks(depth: usize) -> String {
    format!("fn f() {}1{}", "{".repeat(depth), "}".repeat(depth))
}
