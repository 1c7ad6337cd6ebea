//! Cross-cutting error types for Hyrax.
//!
//! Errors raised while building or mutating core values. Collaborator
//! failures use [`crate::PersistError`]; `TransformError` and `ActorError`
//! live in their own crates and wrap this one where needed.

use thiserror::Error;

use crate::enums::ValueType;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A value could not be coerced into the type declared by the schema.
    #[error("Cannot coerce attribute '{attribute}': expected {expected}, found {found}")]
    Coercion {
        attribute: String,
        expected: ValueType,
        found: &'static str,
    },

    /// An attribute was written that the resource schema does not declare.
    #[error("Unknown attribute '{attribute}' for {internal_resource}")]
    UnknownAttribute {
        internal_resource: String,
        attribute: String,
    },

    /// Data failed validation (undeclared property, bad vocabulary term, ...).
    #[error("Validation error: {0}")]
    Validation(String),
}
