//! The Fe grammar handle
//!
//! A [`Language`] describes the grammar a [`Parser`](crate::Parser) runs: its
//! name, ABI version, node kinds and field names. The built-in handle comes
//! from [`language()`]; other handles can be loaded from a JSON grammar
//! artifact and are checked before a parser accepts them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, LazyLock};
use thiserror::Error;

/// Grammar name every Fe handle must carry
pub const GRAMMAR_NAME: &str = "fe";

/// ABI version produced by this crate
pub const LANGUAGE_VERSION: u32 = 14;

/// Oldest ABI version a parser still accepts
pub const MIN_COMPATIBLE_LANGUAGE_VERSION: u32 = 13;

/// Named node kinds, in id order after the `end` symbol
const NAMED_KINDS: &[&str] = &[
    "source_file",
    "comment",
    "identifier",
    "path",
    "module_def",
    "trait_def",
    "impl_def",
    "match_expr",
    "match_arm",
    "function_def",
    "type_params",
    "params",
    "param",
    "primitive_type",
    "reference_type",
    "tuple_type",
    "struct_def",
    "struct_fields",
    "struct_field",
    "const_def",
    "type_def",
    "literal",
    "number_literal",
    "boolean_literal",
    "string_literal",
    "block",
    "block_expr",
    "let_statement",
];

/// Anonymous node kinds: keywords and punctuation
const ANONYMOUS_KINDS: &[&str] = &[
    "mod", "trait", "impl", "for", "match", "pub", "fn", "struct", "const", "type", "let", "mut",
    "_", "bool", "u8", "u64", "u128", "address", "true", "false", "::", "->", "=>", "{", "}",
    "(", ")", "<", ">", ",", ";", ":", "=", "&", "\"",
];

/// Field names, in id order starting at 1
const FIELDS: &[&str] = &["name", "pattern", "return_type", "trait", "type", "value"];

const ERROR_KIND: &str = "ERROR";

static BUILTIN: LazyLock<Language> = LazyLock::new(Language::build_fe);

/// Get the built-in Fe grammar.
///
/// The grammar is built once per process; every call returns a handle to
/// the same data.
pub fn language() -> Language {
    BUILTIN.clone()
}

/// Borrow the process-lifetime built-in grammar
pub fn builtin() -> &'static Language {
    &BUILTIN
}

/// Errors raised while loading or installing a grammar
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LanguageError {
    #[error("Corrupt grammar artifact: {0}")]
    Corrupt(String),

    #[error(
        "Incompatible language version {0}, expected a version between {min} and {max}",
        min = MIN_COMPATIBLE_LANGUAGE_VERSION,
        max = LANGUAGE_VERSION
    )]
    Version(u32),

    #[error("Grammar mismatch: expected {expected}, found {found}")]
    Mismatch { expected: String, found: String },

    #[error("Grammar is missing node kind {0:?}")]
    MissingKind(String),
}

/// One entry of the node-kind table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeKind {
    pub kind: String,
    pub named: bool,
}

/// Serialized form of a grammar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GrammarArtifact {
    name: String,
    version: u32,
    node_kinds: Vec<NodeKind>,
    fields: Vec<String>,
}

/// Opaque, cheaply clonable handle to a grammar
#[derive(Clone)]
pub struct Language {
    inner: Arc<GrammarArtifact>,
}

impl Language {
    fn build_fe() -> Self {
        let mut node_kinds = vec![NodeKind {
            kind: "end".to_string(),
            named: false,
        }];
        node_kinds.extend(NAMED_KINDS.iter().map(|kind| NodeKind {
            kind: kind.to_string(),
            named: true,
        }));
        node_kinds.extend(ANONYMOUS_KINDS.iter().map(|kind| NodeKind {
            kind: kind.to_string(),
            named: false,
        }));
        node_kinds.push(NodeKind {
            kind: ERROR_KIND.to_string(),
            named: true,
        });

        Self {
            inner: Arc::new(GrammarArtifact {
                name: GRAMMAR_NAME.to_string(),
                version: LANGUAGE_VERSION,
                node_kinds,
                fields: FIELDS.iter().map(|f| f.to_string()).collect(),
            }),
        }
    }

    /// Load a grammar from its JSON artifact
    pub fn from_artifact_json(json: &str) -> Result<Self, LanguageError> {
        if json.trim().is_empty() {
            return Err(LanguageError::Corrupt("artifact is empty".to_string()));
        }

        let artifact: GrammarArtifact =
            serde_json::from_str(json).map_err(|e| LanguageError::Corrupt(e.to_string()))?;

        if !version_is_compatible(artifact.version) {
            return Err(LanguageError::Version(artifact.version));
        }

        Ok(Self {
            inner: Arc::new(artifact),
        })
    }

    /// Serialize the grammar to its JSON artifact
    pub fn to_artifact_json(&self) -> String {
        // A struct of strings, integers and bools always serializes
        serde_json::to_string_pretty(&*self.inner).unwrap_or_default()
    }

    /// Check that this handle can drive the Fe parser
    pub fn validate(&self) -> Result<(), LanguageError> {
        if !version_is_compatible(self.version()) {
            return Err(LanguageError::Version(self.version()));
        }

        if self.name() != GRAMMAR_NAME {
            return Err(LanguageError::Mismatch {
                expected: GRAMMAR_NAME.to_string(),
                found: self.name().to_string(),
            });
        }

        let named = NAMED_KINDS.iter().map(|kind| (*kind, true));
        let anonymous = ANONYMOUS_KINDS.iter().map(|kind| (*kind, false));
        for (kind, is_named) in named.chain(anonymous) {
            if self.id_for_node_kind(kind, is_named).is_none() {
                return Err(LanguageError::MissingKind(kind.to_string()));
            }
        }

        for field in FIELDS {
            if self.field_id_for_name(field).is_none() {
                return Err(LanguageError::MissingKind(format!("field {}", field)));
            }
        }

        Ok(())
    }

    /// Grammar name
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// ABI version
    pub fn version(&self) -> u32 {
        self.inner.version
    }

    /// Number of node kinds, `end` and `ERROR` included
    pub fn node_kind_count(&self) -> usize {
        self.inner.node_kinds.len()
    }

    /// Node kind name for an id
    pub fn node_kind_for_id(&self, id: u16) -> Option<&str> {
        self.inner
            .node_kinds
            .get(id as usize)
            .map(|entry| entry.kind.as_str())
    }

    /// Id of a node kind, looked up by name and namedness
    pub fn id_for_node_kind(&self, kind: &str, named: bool) -> Option<u16> {
        self.inner
            .node_kinds
            .iter()
            .position(|entry| entry.kind == kind && entry.named == named)
            .and_then(|id| u16::try_from(id).ok())
    }

    /// Check if the node kind with this id is named; unknown ids are not
    pub fn node_kind_is_named(&self, id: u16) -> bool {
        self.inner
            .node_kinds
            .get(id as usize)
            .is_some_and(|entry| entry.named)
    }

    /// Number of fields
    pub fn field_count(&self) -> usize {
        self.inner.fields.len()
    }

    /// Field name for an id; ids start at 1
    pub fn field_name_for_id(&self, id: u16) -> Option<&str> {
        let index = (id as usize).checked_sub(1)?;
        self.inner.fields.get(index).map(|f| f.as_str())
    }

    /// Field id for a name
    pub fn field_id_for_name(&self, name: &str) -> Option<u16> {
        self.inner
            .fields
            .iter()
            .position(|f| f == name)
            .and_then(|index| u16::try_from(index + 1).ok())
    }

    /// Check if two handles point at the same grammar data
    pub fn ptr_eq(&self, other: &Language) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.inner == other.inner
    }
}

impl Eq for Language {}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Language")
            .field("name", &self.name())
            .field("version", &self.version())
            .field("node_kinds", &self.node_kind_count())
            .field("fields", &self.field_count())
            .finish()
    }
}

fn version_is_compatible(version: u32) -> bool {
    (MIN_COMPATIBLE_LANGUAGE_VERSION..=LANGUAGE_VERSION).contains(&version)
}
