//! Literal loads: `int int0 = 3;`

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use seqgen_runtime::{
    parse_code_string, to_code_string, ExecutionOutcome, TypeDescriptor, TypeResolver, Value,
};

use super::{check_input_values, check_input_vars};
use crate::error::{OperationError, ParseError};
use crate::render::SourceRenderer;
use crate::sequence::Variable;

/// Thread-safe copy of a literal value
#[derive(Debug, Clone)]
enum Literal {
    Null,
    Bool(bool),
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(Arc<str>),
}

impl Literal {
    fn from_value(value: &Value) -> Option<Self> {
        let literal = match value {
            Value::Null => Literal::Null,
            Value::Bool(v) => Literal::Bool(*v),
            Value::Byte(v) => Literal::Byte(*v),
            Value::Char(v) => Literal::Char(*v),
            Value::Short(v) => Literal::Short(*v),
            Value::Int(v) => Literal::Int(*v),
            Value::Long(v) => Literal::Long(*v),
            Value::Float(v) => Literal::Float(*v),
            Value::Double(v) => Literal::Double(*v),
            Value::Str(s) => Literal::Str(Arc::from(s.as_str())),
            Value::Array(_) | Value::Object(_) => return None,
        };
        Some(literal)
    }

    fn to_value(&self) -> Value {
        match self {
            Literal::Null => Value::Null,
            Literal::Bool(v) => Value::Bool(*v),
            Literal::Byte(v) => Value::Byte(*v),
            Literal::Char(v) => Value::Char(*v),
            Literal::Short(v) => Value::Short(*v),
            Literal::Int(v) => Value::Int(*v),
            Literal::Long(v) => Value::Long(*v),
            Literal::Float(v) => Value::Float(*v),
            Literal::Double(v) => Value::Double(*v),
            Literal::Str(s) => Value::Str(s.to_string()),
        }
    }
}

/// Load of a primitive, string or null literal.
///
/// The only operation whose output may be written inline at its use sites.
#[derive(Debug, Clone)]
pub struct LiteralLoad {
    ty: TypeDescriptor,
    literal: Literal,
    /// Source form of the value; also the identity used by `Eq`/`Hash`
    code: String,
}

impl LiteralLoad {
    pub const ID: &'static str = "prim";

    pub fn new(ty: TypeDescriptor, value: Value) -> Result<Self, OperationError> {
        if !(ty.is_primitive() || ty.is_string() || value.is_null()) {
            return Err(OperationError::invalid_argument(format!(
                "{} has no literals other than null",
                ty
            )));
        }
        if !ty.accepts(&value) {
            return Err(OperationError::invalid_argument(format!(
                "literal {} is not a {}",
                value, ty
            )));
        }
        let (Some(literal), Some(code)) = (Literal::from_value(&value), to_code_string(&value))
        else {
            return Err(OperationError::invalid_argument(format!(
                "{} values have no literal form",
                value.type_name()
            )));
        };
        Ok(Self { ty, literal, code })
    }

    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }

    pub fn value(&self) -> Value {
        self.literal.to_value()
    }

    /// Literal as written in source, e.g. `3L` or `"abc"`
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Inline candidates: primitives, strings and null.
    pub fn is_inlinable(&self) -> bool {
        self.ty.is_primitive() || self.ty.is_string() || matches!(self.literal, Literal::Null)
    }

    pub fn input_types(&self) -> &[TypeDescriptor] {
        &[]
    }

    pub fn output_type(&self) -> &TypeDescriptor {
        &self.ty
    }

    pub fn execute(&self, values: &[Value]) -> Result<ExecutionOutcome, OperationError> {
        check_input_values(self, &[], values)?;
        Ok(ExecutionOutcome::normal(self.value(), Duration::ZERO))
    }

    pub fn append_source(
        &self,
        output: &Variable<'_>,
        inputs: &[Variable<'_>],
        renderer: &SourceRenderer<'_>,
        buf: &mut String,
    ) -> Result<(), OperationError> {
        check_input_vars(self, 0, inputs)?;
        buf.push_str(&format!(
            "{} {} = {};",
            self.ty.canonical_name(),
            output.name(),
            self.code
        ));
        buf.push_str(renderer.line_separator());
        Ok(())
    }

    /// `<type name>:<literal>`, e.g. `int:3`
    pub fn to_canonical_text(&self) -> String {
        format!("{}:{}", self.ty.name(), self.code)
    }

    pub fn parse<R>(text: &str, resolver: &R) -> Result<Self, ParseError>
    where
        R: TypeResolver + ?Sized,
    {
        let (type_name, code) = text
            .split_once(':')
            .ok_or_else(|| ParseError::malformed(text, "expected '<type>:<literal>'"))?;
        let ty = resolver.resolve(type_name)?;
        let value =
            parse_code_string(&ty, code).map_err(|err| ParseError::malformed(text, err.to_string()))?;
        LiteralLoad::new(ty, value).map_err(|err| ParseError::malformed(text, err.to_string()))
    }
}

impl PartialEq for LiteralLoad {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.code == other.code
    }
}

impl Eq for LiteralLoad {}

impl Hash for LiteralLoad {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.hash(state);
        self.code.hash(state);
    }
}

impl fmt::Display for LiteralLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ty.simple_name(), self.code)
    }
}
