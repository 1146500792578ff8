//! Integration tests for the Fe grammar

mod corpus_tests;
mod error_tests;
mod grammar_load_tests;
mod highlight_tests;
