//! seqgen: statement operations for sequence-based test generation
//!
//! A generated test is a [`Sequence`] of statements, each binding an
//! [`Operation`] to the outputs of earlier statements. Every operation can
//!
//! - declare the input types it needs and the type it produces,
//! - execute against concrete [`Value`]s and classify the result,
//! - render itself as source text (see [`SourceRenderer`]),
//! - round-trip through a compact textual form.
//!
//! Subject code is described through a [`SubjectApi`]: a type registry plus
//! the constructors and methods that sequences may call.

pub mod config;
pub(crate) mod debug;
pub mod error;
pub mod operation;
pub mod render;
pub mod sequence;
pub mod subject;

pub use config::{GeneratorConfig, RenderOptions};
pub use error::{ConfigError, OperationError, ParseError};
pub use operation::{
    ArrayConstruction, ConstructorCall, LiteralLoad, MethodCall, Operation,
};
pub use render::{InlinePolicy, SourceRenderer};
pub use sequence::{Sequence, Statement, Variable};
pub use subject::{Callable, MemberSignature, SubjectApi};

pub use seqgen_runtime::{
    ArrayValue, ExecutionOutcome, ObjectRef, PrimitiveKind, Thrown, TypeDescriptor, TypeRegistry,
    TypeResolver, UnknownTypeError, Value,
};
