//! Error types for operations, operation text and configuration

use std::path::PathBuf;

use seqgen_runtime::{RuntimeError, UnknownTypeError};
use thiserror::Error;

/// A caller broke an operation's contract.
///
/// These signal a bug in whoever built the statement, never a runtime
/// condition of the subject code; they are propagated, not retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// Wrong number of input values or variables
    #[error("{operation}: expected {expected} input(s), got {actual}")]
    InvalidArity {
        operation: String,
        expected: usize,
        actual: usize,
    },

    /// Rejected construction argument
    #[error("invalid operation argument: {0}")]
    InvalidArgument(String),

    /// Input value or variable of the wrong type
    #[error("{operation}: input {index} has type {found}, expected {expected}")]
    TypeMismatch {
        operation: String,
        index: usize,
        expected: String,
        found: String,
    },

    /// Statement input that does not name an earlier statement
    #[error("{operation}: input {index} refers to statement {target}, which does not precede it")]
    UnboundInput {
        operation: String,
        index: usize,
        target: usize,
    },

    /// Statement index past the end of its sequence
    #[error("no statement {index} in a sequence of {len}")]
    UnknownStatement { index: usize, len: usize },

    /// Subject code returned a value its signature does not allow
    #[error("{operation}: result of type {found} does not conform to {expected}")]
    ResultTypeMismatch {
        operation: String,
        expected: String,
        found: String,
    },

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl OperationError {
    pub fn invalid_arity(operation: impl Into<String>, expected: usize, actual: usize) -> Self {
        OperationError::InvalidArity {
            operation: operation.into(),
            expected,
            actual,
        }
    }

    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        OperationError::InvalidArgument(msg.into())
    }
}

/// Operation text that could not be turned back into an operation.
///
/// Recoverable: callers typically skip the offending record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Text does not follow the grammar of its operation kind
    #[error("malformed operation text '{text}': {reason}")]
    Malformed { text: String, reason: String },

    /// Type name the resolver does not know
    #[error(transparent)]
    UnknownType(#[from] UnknownTypeError),

    /// Constructor or method signature with no registered member
    #[error("no registered member matches '{0}'")]
    UnknownMember(String),

    /// Kind prefix other than `cons`, `method`, `prim` or `array`
    #[error("unknown operation kind '{0}'")]
    UnknownKind(String),
}

impl ParseError {
    pub fn malformed(text: impl Into<String>, reason: impl Into<String>) -> Self {
        ParseError::Malformed {
            text: text.into(),
            reason: reason.into(),
        }
    }
}

/// Failure loading a [`GeneratorConfig`](crate::GeneratorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}
