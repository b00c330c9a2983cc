//! Method calls, static or on a receiver.
//!
//! ```text
//! int int3 = point2.getX();
//! geo.Point point4 = geo.Point.origin();
//! point2.reset();
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use seqgen_runtime::{ExecutionOutcome, Thrown, TypeDescriptor, Value};

use super::signature::parse_signature;
use super::{check_input_values, check_input_vars, join_inputs, timed_call};
use crate::error::{OperationError, ParseError};
use crate::render::SourceRenderer;
use crate::sequence::Variable;
use crate::subject::{Callable, MemberSignature, SubjectApi, CONSTRUCTOR_NAME};

/// Call of a registered method.
///
/// Instance methods take their receiver as the first input.
#[derive(Debug, Clone)]
pub struct MethodCall {
    signature: MemberSignature,
    input_types: Vec<TypeDescriptor>,
    callable: Callable,
}

impl MethodCall {
    pub const ID: &'static str = "method";

    pub fn new(signature: MemberSignature, callable: Callable) -> Self {
        let input_types = signature.input_types();
        Self {
            signature,
            input_types,
            callable,
        }
    }

    pub fn signature(&self) -> &MemberSignature {
        &self.signature
    }

    pub fn is_static(&self) -> bool {
        self.signature.is_static
    }

    pub fn input_types(&self) -> &[TypeDescriptor] {
        &self.input_types
    }

    pub fn output_type(&self) -> &TypeDescriptor {
        &self.signature.returns
    }

    /// Invoking on a null receiver is reported as a thrown
    /// `NullPointerException` without calling the subject code.
    pub fn execute(&self, values: &[Value]) -> Result<ExecutionOutcome, OperationError> {
        check_input_values(self, &self.input_types, values)?;
        if !self.is_static() && values[0].is_null() {
            return Ok(ExecutionOutcome::exceptional(
                Thrown::new(
                    "NullPointerException",
                    format!("{} invoked on null", self.signature.name),
                ),
                Duration::ZERO,
            ));
        }
        timed_call(self, &self.callable, self.output_type(), values)
    }

    pub fn append_source(
        &self,
        output: &Variable<'_>,
        inputs: &[Variable<'_>],
        renderer: &SourceRenderer<'_>,
        buf: &mut String,
    ) -> Result<(), OperationError> {
        check_input_vars(self, self.input_types.len(), inputs)?;

        let (target, args) = if self.is_static() {
            (self.signature.declaring.canonical_name().to_string(), inputs)
        } else {
            let receiver = match renderer.input_text(&inputs[0]) {
                text if text == "null" => {
                    format!("(({}) null)", self.signature.declaring.canonical_name())
                }
                text => text,
            };
            (receiver, &inputs[1..])
        };
        let call = format!(
            "{target}.{}({})",
            self.signature.name,
            join_inputs(args, renderer)
        );

        if self.output_type().is_void() {
            buf.push_str(&format!("{call};"));
        } else {
            buf.push_str(&format!(
                "{} {} = {call};",
                self.output_type().canonical_name(),
                output.name()
            ));
        }
        buf.push_str(renderer.line_separator());
        Ok(())
    }

    /// `Class.name(T1,T2)`; the receiver is implied by `Class`.
    pub fn to_canonical_text(&self) -> String {
        self.signature.canonical_text()
    }

    /// Look up a registered method by its canonical text.
    pub fn parse(text: &str, api: &SubjectApi) -> Result<Self, ParseError> {
        let signature = parse_signature(text, api)?;
        if signature.name == CONSTRUCTOR_NAME {
            return Err(ParseError::malformed(text, "constructor text used as a method"));
        }
        let key = signature.canonical_text();
        api.method(&key)
            .cloned()
            .ok_or(ParseError::UnknownMember(key))
    }
}

impl PartialEq for MethodCall {
    fn eq(&self, other: &Self) -> bool {
        self.signature == other.signature
    }
}

impl Eq for MethodCall {}

impl Hash for MethodCall {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.signature.hash(state);
    }
}

impl fmt::Display for MethodCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signature)
    }
}
