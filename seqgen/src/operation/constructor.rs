//! Constructor calls: `geo.Point point2 = new geo.Point(int0, 4);`

use std::fmt;
use std::hash::{Hash, Hasher};

use seqgen_runtime::{ExecutionOutcome, TypeDescriptor, Value};

use super::signature::parse_signature;
use super::{check_input_values, check_input_vars, join_inputs, timed_call};
use crate::error::{OperationError, ParseError};
use crate::render::SourceRenderer;
use crate::sequence::Variable;
use crate::subject::{Callable, MemberSignature, SubjectApi};

/// Call of a registered constructor.
///
/// Identity is the signature; the backing closure does not take part in
/// equality or hashing.
#[derive(Debug, Clone)]
pub struct ConstructorCall {
    signature: MemberSignature,
    callable: Callable,
}

impl ConstructorCall {
    pub const ID: &'static str = "cons";

    pub fn new(signature: MemberSignature, callable: Callable) -> Self {
        Self {
            signature,
            callable,
        }
    }

    pub fn signature(&self) -> &MemberSignature {
        &self.signature
    }

    pub fn input_types(&self) -> &[TypeDescriptor] {
        &self.signature.params
    }

    pub fn output_type(&self) -> &TypeDescriptor {
        &self.signature.declaring
    }

    pub fn execute(&self, values: &[Value]) -> Result<ExecutionOutcome, OperationError> {
        check_input_values(self, self.input_types(), values)?;
        timed_call(self, &self.callable, self.output_type(), values)
    }

    pub fn append_source(
        &self,
        output: &Variable<'_>,
        inputs: &[Variable<'_>],
        renderer: &SourceRenderer<'_>,
        buf: &mut String,
    ) -> Result<(), OperationError> {
        check_input_vars(self, self.signature.params.len(), inputs)?;
        let class = self.signature.declaring.canonical_name();
        buf.push_str(&format!(
            "{class} {} = new {class}({});",
            output.name(),
            join_inputs(inputs, renderer)
        ));
        buf.push_str(renderer.line_separator());
        Ok(())
    }

    /// `Class.<init>(T1,T2)`
    pub fn to_canonical_text(&self) -> String {
        self.signature.canonical_text()
    }

    /// Look up a registered constructor by its canonical text.
    pub fn parse(text: &str, api: &SubjectApi) -> Result<Self, ParseError> {
        let signature = parse_signature(text, api)?;
        if signature.name != crate::subject::CONSTRUCTOR_NAME {
            return Err(ParseError::malformed(text, "constructor name must be <init>"));
        }
        let key = signature.canonical_text();
        api.constructor(&key)
            .cloned()
            .ok_or(ParseError::UnknownMember(key))
    }
}

impl PartialEq for ConstructorCall {
    fn eq(&self, other: &Self) -> bool {
        self.signature == other.signature
    }
}

impl Eq for ConstructorCall {}

impl Hash for ConstructorCall {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.signature.hash(state);
    }
}

impl fmt::Display for ConstructorCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signature)
    }
}
