//! Parsing session
//!
//! Bundles the registry and generator built for one configuration. A host
//! parser creates one session per configuration and compiles any number of
//! queries with it, from any number of threads.

use std::sync::Arc;

use dynq_ast::{Expr, ExprRef};
use dynq_compiler::{ExpressionGenerator, Keyword, KeywordRegistry, ParsingConfig};
use dynq_diagnostics::{DQ0001, DQ0002, QueryError, Result};
use dynq_types::{LiteralValue, TypeDescriptor};

/// Registry and generator for one configuration
#[derive(Debug, Clone)]
pub struct QuerySession {
    config: ParsingConfig,
    keywords: Arc<KeywordRegistry>,
    generator: ExpressionGenerator,
}

impl QuerySession {
    pub fn new(config: ParsingConfig) -> Self {
        let keywords = Arc::new(KeywordRegistry::new(&config));
        let generator = ExpressionGenerator::new(&config);
        log::debug!(
            "Query session created (parameterized literals: {})",
            config.use_parameterized_names
        );
        Self {
            config,
            keywords,
            generator,
        }
    }

    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    pub fn keywords(&self) -> &KeywordRegistry {
        &self.keywords
    }

    pub fn generator(&self) -> &ExpressionGenerator {
        &self.generator
    }

    /// Look up an identifier; absence is not an error
    pub fn resolve(&self, name: &str) -> Option<&Keyword> {
        self.keywords.try_resolve(name)
    }

    /// Look up an identifier that must exist
    pub fn require(&self, name: &str) -> Result<&Keyword> {
        self.resolve(name)
            .ok_or_else(|| QueryError::resolution(DQ0001, name))
    }

    /// Look up an identifier that must name a type
    pub fn require_type(&self, name: &str) -> Result<TypeDescriptor> {
        self.keywords
            .resolve_type(name)
            .cloned()
            .ok_or_else(|| QueryError::resolution(DQ0002, name))
    }

    /// Constant node for a literal read from the source
    ///
    /// With parameterized names on, the node is canonical and `text` is kept
    /// for diagnostics.
    pub fn literal(&self, value: LiteralValue, text: &str) -> ExprRef {
        match self.generator.cache() {
            Some(cache) => cache.create_literal(value, text),
            None => Expr::constant(value),
        }
    }

    /// Placeholder names and values collected so far
    pub fn parameters(&self) -> Vec<(String, LiteralValue)> {
        self.generator
            .cache()
            .map(|cache| cache.parameters())
            .unwrap_or_default()
    }
}

impl Default for QuerySession {
    fn default() -> Self {
        Self::new(ParsingConfig::default())
    }
}
