//! Parse results

use crate::ast::{to_sexp, SourceFile, Span};
use crate::language::Language;

/// A parsed Fe source file together with its source text and grammar
#[derive(Debug, Clone)]
pub struct Tree {
    source: String,
    root: SourceFile,
    language: Language,
}

impl Tree {
    pub(crate) fn new(source: String, root: SourceFile, language: Language) -> Self {
        Self {
            source,
            root,
            language,
        }
    }

    /// Root node
    pub fn root(&self) -> &SourceFile {
        &self.root
    }

    /// Source text the tree was parsed from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Grammar the tree was parsed with
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Source text covered by a span; empty if the span is out of range
    pub fn text(&self, span: Span) -> &str {
        self.source.get(span.start..span.end).unwrap_or("")
    }

    /// Render the tree as a tree-sitter style S-expression
    pub fn to_sexp(&self) -> String {
        to_sexp(&self.root)
    }

    /// Take the root out of the tree
    pub fn into_root(self) -> SourceFile {
        self.root
    }
}
