//! Error types for value validation.

use thiserror::Error;

/// Reasons a textual value is rejected. A rejection never changes the tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The text does not have the syntactic form required by the type.
    #[error("invalid {type_label} literal {input:?}: {reason}")]
    Syntax {
        type_label: &'static str,
        input: String,
        reason: &'static str,
    },

    /// The text is well formed but its value lies outside the type's domain.
    #[error("{input} is out of range for {type_label}")]
    OutOfRange {
        type_label: &'static str,
        input: String,
    },

    /// The type has no assignable value (the compound terminator, containers).
    #[error("{type_label} tags carry no editable value")]
    NotAssignable { type_label: &'static str },
}

/// Convenience alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;
