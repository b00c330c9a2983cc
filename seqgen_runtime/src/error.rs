//! Runtime error types for dynamic values
//!
//! These are value-level faults: reading or writing an array slot out of
//! range, storing a value of the wrong type, and similar.

use thiserror::Error;

/// Runtime error type
///
/// Represents faults raised while manipulating dynamic values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Type mismatch error
    #[error("TypeError: {0}")]
    TypeError(String),

    /// Index out of bounds error
    #[error("BoundsError: attempt to access index {index} of array with length {length}")]
    BoundsError {
        /// Attempted index
        index: usize,
        /// Array length
        length: usize,
    },

    /// Invalid argument error
    #[error("ArgumentError: {0}")]
    ArgumentError(String),

    /// Field not found on an object
    #[error("FieldError: field {0} not found in type {1}")]
    FieldError(String, String),
}

impl RuntimeError {
    /// Create a type error
    pub fn type_error<S: Into<String>>(msg: S) -> Self {
        RuntimeError::TypeError(msg.into())
    }

    /// Create a bounds error
    pub fn bounds_error(index: usize, length: usize) -> Self {
        RuntimeError::BoundsError { index, length }
    }

    /// Create an argument error
    pub fn argument_error<S: Into<String>>(msg: S) -> Self {
        RuntimeError::ArgumentError(msg.into())
    }

    /// Create a field error
    pub fn field_error<S1: Into<String>, S2: Into<String>>(field: S1, type_name: S2) -> Self {
        RuntimeError::FieldError(field.into(), type_name.into())
    }
}

/// Result type alias for runtime value operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;
