//! Wrapt Type Vocabulary
//!
//! The structural types an introspection layer uses to describe wrapped
//! object types: classes and their instances, objects, functions, unions,
//! tuples and literals, all interned in a [`TypeContext`].

#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod narrowing;
pub mod ty;

pub use context::TypeContext;
pub use error::TypeError;
pub use narrowing::{narrow_by_discriminant, string_literals};
pub use ty::{
    ClassType, MethodSignature, PrimitiveType, PropertySignature, Type, TypeId,
};
