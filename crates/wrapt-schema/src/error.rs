//! Schema derivation errors
//!
//! Derivation itself cannot fail; missing structure only removes
//! contributions. These errors cover the edges: dangling type ids or unknown
//! names handed to the deriver, and configuration loading.

use thiserror::Error;
use wrapt_types::TypeError;

use crate::config::ConfigError;

/// Errors surfaced by the schema crate
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Dangling type id or unknown type name
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}
