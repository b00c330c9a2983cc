//! Statement operations.
//!
//! An [`Operation`] is a reusable description of one kind of executable
//! statement. The set of kinds is closed:
//!
//! | kind                | id       | canonical text              |
//! |---------------------|----------|-----------------------------|
//! | `ConstructorCall`   | `cons`   | `geo.Point.<init>(int,int)` |
//! | `MethodCall`        | `method` | `geo.Point.getX()`          |
//! | `LiteralLoad`       | `prim`   | `int:3`                     |
//! | `ArrayConstruction` | `array`  | `int[3]`                    |
//!
//! Tagged text (`<id>:<canonical>`) carries the kind so that
//! [`Operation::parse`] can dispatch back to the right parser.
//!
//! # Sub-modules
//!
//! - `array`: one-dimensional array construction
//! - `constructor`: calls to registered constructors
//! - `literal`: loads of primitive, string and null literals
//! - `method`: calls to registered methods
//! - `signature`: member signature text shared by constructors and methods

mod array;
mod constructor;
mod literal;
mod method;
mod signature;

pub use array::{ArrayConstruction, MAX_ARRAY_LENGTH};
pub use constructor::ConstructorCall;
pub use literal::LiteralLoad;
pub use method::MethodCall;

use std::fmt;
use std::time::Instant;

use seqgen_runtime::{ExecutionOutcome, TypeDescriptor, Value};

use crate::debug::operation_debug_log;
use crate::error::{OperationError, ParseError};
use crate::render::SourceRenderer;
use crate::sequence::Variable;
use crate::subject::{Callable, SubjectApi};

/// One kind of executable statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    ConstructorCall(ConstructorCall),
    MethodCall(MethodCall),
    LiteralLoad(LiteralLoad),
    ArrayConstruction(ArrayConstruction),
}

impl Operation {
    /// Kind prefix used in tagged text
    pub fn kind_id(&self) -> &'static str {
        match self {
            Operation::ConstructorCall(_) => ConstructorCall::ID,
            Operation::MethodCall(_) => MethodCall::ID,
            Operation::LiteralLoad(_) => LiteralLoad::ID,
            Operation::ArrayConstruction(_) => ArrayConstruction::ID,
        }
    }

    /// Types of the inputs this operation consumes, in order
    pub fn input_types(&self) -> &[TypeDescriptor] {
        match self {
            Operation::ConstructorCall(op) => op.input_types(),
            Operation::MethodCall(op) => op.input_types(),
            Operation::LiteralLoad(op) => op.input_types(),
            Operation::ArrayConstruction(op) => op.input_types(),
        }
    }

    /// Type of the value this operation produces
    pub fn output_type(&self) -> &TypeDescriptor {
        match self {
            Operation::ConstructorCall(op) => op.output_type(),
            Operation::MethodCall(op) => op.output_type(),
            Operation::LiteralLoad(op) => op.output_type(),
            Operation::ArrayConstruction(op) => op.output_type(),
        }
    }

    /// Perform the operation on concrete inputs.
    ///
    /// Subject code throwing is an outcome; malformed inputs are an error.
    pub fn execute(&self, values: &[Value]) -> Result<ExecutionOutcome, OperationError> {
        match self {
            Operation::ConstructorCall(op) => op.execute(values),
            Operation::MethodCall(op) => op.execute(values),
            Operation::LiteralLoad(op) => op.execute(values),
            Operation::ArrayConstruction(op) => op.execute(values),
        }
    }

    /// Append this statement's source text to `buf`.
    pub fn append_source(
        &self,
        output: &Variable<'_>,
        inputs: &[Variable<'_>],
        renderer: &SourceRenderer<'_>,
        buf: &mut String,
    ) -> Result<(), OperationError> {
        match self {
            Operation::ConstructorCall(op) => op.append_source(output, inputs, renderer, buf),
            Operation::MethodCall(op) => op.append_source(output, inputs, renderer, buf),
            Operation::LiteralLoad(op) => op.append_source(output, inputs, renderer, buf),
            Operation::ArrayConstruction(op) => op.append_source(output, inputs, renderer, buf),
        }
    }

    /// Lossless serialized form, without the kind prefix
    pub fn to_canonical_text(&self) -> String {
        match self {
            Operation::ConstructorCall(op) => op.to_canonical_text(),
            Operation::MethodCall(op) => op.to_canonical_text(),
            Operation::LiteralLoad(op) => op.to_canonical_text(),
            Operation::ArrayConstruction(op) => op.to_canonical_text(),
        }
    }

    /// `<id>:<canonical>`, readable by [`Operation::parse`]
    pub fn to_tagged_text(&self) -> String {
        format!("{}:{}", self.kind_id(), self.to_canonical_text())
    }

    /// Parse tagged text produced by [`Operation::to_tagged_text`].
    pub fn parse(text: &str, api: &SubjectApi) -> Result<Operation, ParseError> {
        let Some((id, rest)) = text.split_once(':') else {
            return Err(ParseError::malformed(text, "missing '<kind>:' prefix"));
        };
        let parsed = match id {
            ConstructorCall::ID => ConstructorCall::parse(rest, api).map(Operation::from),
            MethodCall::ID => MethodCall::parse(rest, api).map(Operation::from),
            LiteralLoad::ID => LiteralLoad::parse(rest, api).map(Operation::from),
            ArrayConstruction::ID => ArrayConstruction::parse(rest, api).map(Operation::from),
            other => Err(ParseError::UnknownKind(other.to_string())),
        };
        if let Err(err) = &parsed {
            operation_debug_log(format_args!("parse of '{text}' failed: {err}"));
        }
        parsed
    }

    pub fn as_literal_load(&self) -> Option<&LiteralLoad> {
        match self {
            Operation::LiteralLoad(op) => Some(op),
            _ => None,
        }
    }

    pub fn as_array_construction(&self) -> Option<&ArrayConstruction> {
        match self {
            Operation::ArrayConstruction(op) => Some(op),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::ConstructorCall(op) => fmt::Display::fmt(op, f),
            Operation::MethodCall(op) => fmt::Display::fmt(op, f),
            Operation::LiteralLoad(op) => fmt::Display::fmt(op, f),
            Operation::ArrayConstruction(op) => fmt::Display::fmt(op, f),
        }
    }
}

impl From<ConstructorCall> for Operation {
    fn from(op: ConstructorCall) -> Self {
        Operation::ConstructorCall(op)
    }
}

impl From<MethodCall> for Operation {
    fn from(op: MethodCall) -> Self {
        Operation::MethodCall(op)
    }
}

impl From<LiteralLoad> for Operation {
    fn from(op: LiteralLoad) -> Self {
        Operation::LiteralLoad(op)
    }
}

impl From<ArrayConstruction> for Operation {
    fn from(op: ArrayConstruction) -> Self {
        Operation::ArrayConstruction(op)
    }
}

/// Check that `values` match `expected` in number and type.
pub(crate) fn check_input_values(
    operation: &dyn fmt::Display,
    expected: &[TypeDescriptor],
    values: &[Value],
) -> Result<(), OperationError> {
    if values.len() != expected.len() {
        operation_debug_log(format_args!(
            "{operation}: arity violation, {} value(s) for {} input(s)",
            values.len(),
            expected.len()
        ));
        return Err(OperationError::invalid_arity(
            operation.to_string(),
            expected.len(),
            values.len(),
        ));
    }
    for (index, (ty, value)) in expected.iter().zip(values).enumerate() {
        if !ty.accepts(value) {
            return Err(OperationError::TypeMismatch {
                operation: operation.to_string(),
                index,
                expected: ty.name().to_string(),
                found: value.type_name(),
            });
        }
    }
    Ok(())
}

/// Check that exactly `expected` input variables were supplied for rendering.
pub(crate) fn check_input_vars(
    operation: &dyn fmt::Display,
    expected: usize,
    inputs: &[Variable<'_>],
) -> Result<(), OperationError> {
    if inputs.len() != expected {
        operation_debug_log(format_args!(
            "{operation}: arity violation, {} variable(s) for {expected} input(s)",
            inputs.len()
        ));
        return Err(OperationError::invalid_arity(
            operation.to_string(),
            expected,
            inputs.len(),
        ));
    }
    Ok(())
}

/// Invoke subject code and classify what happened.
///
/// A returned value must conform to `output_type` (`null` for `void`).
pub(crate) fn timed_call(
    operation: &dyn fmt::Display,
    callable: &Callable,
    output_type: &TypeDescriptor,
    values: &[Value],
) -> Result<ExecutionOutcome, OperationError> {
    let start = Instant::now();
    let result = callable.call(values);
    let elapsed = start.elapsed();

    match result {
        Ok(value) => {
            let conforms = if output_type.is_void() {
                value.is_null()
            } else {
                output_type.accepts(&value)
            };
            if !conforms {
                return Err(OperationError::ResultTypeMismatch {
                    operation: operation.to_string(),
                    expected: output_type.name().to_string(),
                    found: value.type_name(),
                });
            }
            Ok(ExecutionOutcome::normal(value, elapsed))
        }
        Err(thrown) => {
            operation_debug_log(format_args!("{operation}: subject code threw {thrown}"));
            Ok(ExecutionOutcome::exceptional(thrown, elapsed))
        }
    }
}

/// Comma-separated input texts (inlined literal or variable name)
pub(crate) fn join_inputs(inputs: &[Variable<'_>], renderer: &SourceRenderer<'_>) -> String {
    inputs
        .iter()
        .map(|var| renderer.input_text(var))
        .collect::<Vec<_>>()
        .join(", ")
}
