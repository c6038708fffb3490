//! Parsing configuration

use std::fmt;
use std::sync::Arc;

use dynq_diagnostics::{QueryError, Result};
use dynq_types::TypeDescriptor;
use serde::{Deserialize, Serialize};

/// Source of host-defined types registered as keywords
pub trait TypeProvider: Send + Sync {
    /// Types to register, in registration order
    fn custom_types(&self) -> Vec<TypeDescriptor>;
}

impl TypeProvider for Vec<TypeDescriptor> {
    fn custom_types(&self) -> Vec<TypeDescriptor> {
        self.clone()
    }
}

/// Flags consumed when a registry or generator is constructed
///
/// Loadable from JSON; the type provider is never serialized and must be
/// attached in code.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Register `it`, `parent` and `root` as aliases of `$`, `^` and `~`
    pub context_keywords_enabled: bool,
    /// Register well-known enum types from the `System` namespace
    pub support_enumerations_from_system_namespace: bool,
    /// Route literals through the literal cache so they become parameters
    pub use_parameterized_names: bool,
    #[serde(skip)]
    pub custom_type_provider: Option<Arc<dyn TypeProvider>>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            context_keywords_enabled: true,
            support_enumerations_from_system_namespace: true,
            use_parameterized_names: false,
            custom_type_provider: None,
        }
    }
}

impl ParsingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| QueryError::invalid_config(format!("Invalid parsing configuration: {}", e)))
    }

    pub fn with_context_keywords(mut self, enabled: bool) -> Self {
        self.context_keywords_enabled = enabled;
        self
    }

    pub fn with_system_enumerations(mut self, enabled: bool) -> Self {
        self.support_enumerations_from_system_namespace = enabled;
        self
    }

    pub fn with_parameterized_names(mut self, enabled: bool) -> Self {
        self.use_parameterized_names = enabled;
        self
    }

    pub fn with_type_provider(mut self, provider: Arc<dyn TypeProvider>) -> Self {
        self.custom_type_provider = Some(provider);
        self
    }
}

impl fmt::Debug for ParsingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsingConfig")
            .field("context_keywords_enabled", &self.context_keywords_enabled)
            .field(
                "support_enumerations_from_system_namespace",
                &self.support_enumerations_from_system_namespace,
            )
            .field("use_parameterized_names", &self.use_parameterized_names)
            .field("custom_type_provider", &self.custom_type_provider.is_some())
            .finish()
    }
}
