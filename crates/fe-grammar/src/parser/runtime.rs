//! Parser runtime: installed grammar plus configuration

use super::parse::{SourceParser, DEFAULT_MAX_DEPTH};
use crate::language::{Language, LanguageError};
use crate::tree::Tree;
use crate::{Error, Result};
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, warn};

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum nesting of blocks, types, modules and patterns
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parses Fe source with an installed grammar
#[derive(Debug, Default)]
pub struct Parser {
    language: Option<Language>,
    config: ParserConfig,
}

impl Parser {
    /// Create a parser with no language installed
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Installed language, if any
    pub fn language(&self) -> Option<&Language> {
        self.language.as_ref()
    }

    /// Check and install a language.
    ///
    /// On failure the previously installed language, if any, is kept.
    pub fn set_language(&mut self, language: &Language) -> std::result::Result<(), LanguageError> {
        if let Err(e) = language.validate() {
            warn!(name = language.name(), version = language.version(), error = %e, "Rejected language");
            return Err(e);
        }

        debug!(
            name = language.name(),
            version = language.version(),
            node_kinds = language.node_kind_count(),
            "Installed language"
        );
        self.language = Some(language.clone());
        Ok(())
    }

    /// Parse a source string into a tree
    pub fn parse(&mut self, source: &str) -> Result<Tree> {
        let language = self.language.clone().ok_or(Error::NoLanguage)?;

        let started = Instant::now();
        let mut parser = SourceParser::with_max_depth(source, self.config.max_depth);
        debug!(tokens = parser.token_count(), "Tokenized source");

        let root = parser.parse_source_file()?;
        debug!(
            definitions = root.definitions.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Parsed source"
        );

        Ok(Tree::new(source.to_string(), root, language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParseError;

    fn fe_parser() -> Parser {
        let mut parser = Parser::new();
        parser.set_language(&crate::language()).unwrap();
        parser
    }

    #[test]
    fn test_parse_without_language() {
        let mut parser = Parser::new();
        assert!(parser.language().is_none());
        assert!(matches!(parser.parse("fn f() {}"), Err(Error::NoLanguage)));
    }

    #[test]
    fn test_parse_with_language() {
        let tree = fe_parser().parse("fn main() {}").unwrap();
        assert_eq!(tree.root().definitions.len(), 1);
    }

    #[test]
    fn test_rejected_language_keeps_previous() {
        let mut parser = fe_parser();

        let mut artifact: serde_json::Value =
            serde_json::from_str(&crate::language().to_artifact_json()).unwrap();
        artifact["name"] = serde_json::Value::from("rust");
        let other = Language::from_artifact_json(&artifact.to_string()).unwrap();

        assert!(matches!(
            parser.set_language(&other),
            Err(LanguageError::Mismatch { .. })
        ));
        assert_eq!(parser.language().map(|l| l.name()), Some("fe"));
    }

    #[test]
    fn test_parse_error_propagates() {
        let err = fe_parser().parse("fn f( {}").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::UnexpectedToken { .. })));
    }

    #[test]
    fn test_config_max_depth() {
        let mut parser = fe_parser().with_config(ParserConfig { max_depth: 4 });
        assert_eq!(parser.config().max_depth, 4);

        let err = parser.parse("fn f() { { { { {} } } } }").unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::NestingTooDeep { limit: 4, .. })
        ));
    }

    #[test]
    fn test_config_from_json() {
        let config: ParserConfig = serde_json::from_str("{\"max_depth\": 32}").unwrap();
        assert_eq!(config.max_depth, 32);

        let config: ParserConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ParserConfig::default());
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }
}
