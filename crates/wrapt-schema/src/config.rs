//! Derivation configuration (wrapt.toml)
//!
//! Every field has a default that reproduces the built-in behaviour, so an
//! empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Validation error
    #[error("Invalid config: {0}")]
    ValidationError(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaConfig {
    /// Exclusion policy additions
    #[serde(default)]
    pub exclusion: ExclusionConfig,

    /// Member names the extractor looks for
    #[serde(default)]
    pub introspection: IntrospectionConfig,

    /// Event map settings
    #[serde(default)]
    pub events: EventsConfig,
}

/// Keys excluded from instance-derived props on top of the fixed set
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExclusionConfig {
    /// Extra field names never treated as props
    #[serde(default)]
    pub extra_keys: Vec<String>,
}

/// Names of conventional members read during extraction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntrospectionConfig {
    /// Method that makes a field value settable (default: "set")
    #[serde(default = "default_set_method")]
    pub set_method: String,

    /// Method that registers event handlers (default: "addEventListener")
    #[serde(default = "default_dispatch_method")]
    pub dispatch_method: String,
}

fn default_set_method() -> String {
    "set".to_string()
}

fn default_dispatch_method() -> String {
    "addEventListener".to_string()
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            set_method: default_set_method(),
            dispatch_method: default_dispatch_method(),
        }
    }
}

/// Event map settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventsConfig {
    /// Field that links an event payload to its name (default: "type")
    #[serde(default = "default_discriminant_field")]
    pub discriminant_field: String,
}

fn default_discriminant_field() -> String {
    "type".to_string()
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            discriminant_field: default_discriminant_field(),
        }
    }
}

impl SchemaConfig {
    /// Parse a configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a configuration from a string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: SchemaConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate member and key names
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("introspection.set_method", &self.introspection.set_method),
            ("introspection.dispatch_method", &self.introspection.dispatch_method),
            ("events.discriminant_field", &self.events.discriminant_field),
        ];
        for (key, value) in named {
            if !is_identifier(value) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be an identifier, got '{}'",
                    key, value
                )));
            }
        }

        for key in &self.exclusion.extra_keys {
            if key.is_empty() {
                return Err(ConfigError::ValidationError(
                    "exclusion.extra_keys cannot contain an empty key".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// `[A-Za-z_$][A-Za-z0-9_$]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
