//! Type context errors

use thiserror::Error;

use crate::ty::TypeId;

/// Errors that can occur when resolving types in a context
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TypeError {
    /// Undefined named type reference
    #[error("Undefined type: {name}")]
    UndefinedType {
        /// Type name that was not found
        name: String,
    },

    /// TypeId that does not belong to this context
    #[error("Invalid type id: {id}")]
    InvalidTypeId {
        /// The dangling id
        id: TypeId,
    },
}
