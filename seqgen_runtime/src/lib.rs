//! seqgen runtime support
//!
//! This crate provides what an operation needs in order to *execute*:
//!
//! - `Value` enum for dynamically typed inputs and results
//! - `ArrayValue` typed array storage
//! - `TypeDescriptor` handles and the name-based `TypeRegistry`
//! - `ExecutionOutcome` for classified statement results
//! - Literal source text conversion
//! - `RuntimeError` for value-level faults

pub mod array;
pub mod convert;
pub mod error;
pub mod outcome;
pub mod types;
pub mod value;

/// Prelude module for convenient imports
///
/// # Example
/// ```
/// use seqgen_runtime::prelude::*;
/// ```
pub mod prelude {
    pub use super::array::{ArrayStorage, ArrayValue};
    pub use super::convert::{has_code_form, parse_code_string, to_code_string};
    pub use super::error::{RuntimeError, RuntimeResult};
    pub use super::outcome::{ExecutionOutcome, Thrown};
    pub use super::types::{
        PrimitiveKind, TypeDescriptor, TypeRegistry, TypeResolver, UnknownTypeError,
    };
    pub use super::value::{ObjectRef, Value};
}

pub use prelude::*;
