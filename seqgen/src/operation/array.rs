//! One-dimensional array construction.
//!
//! Represents the statement
//! ```text
//! int[] intArray3 = new int[] { int0, int1, int2 };
//! ```
//! which allocates an array of a declared element type with exactly
//! `length` slots, filled from `length` inputs in order.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::Instant;

use once_cell::sync::OnceCell;
use seqgen_runtime::{ArrayValue, ExecutionOutcome, TypeDescriptor, TypeResolver, Value};

use super::{check_input_values, check_input_vars, join_inputs};
use crate::debug::operation_debug_log;
use crate::error::{OperationError, ParseError};
use crate::render::SourceRenderer;
use crate::sequence::Variable;

/// Allocation of a fixed-length array of `element_type`.
///
/// Immutable apart from the lazily built input-type list and hash, which
/// are pure functions of `(element_type, length)` and published once.
#[derive(Debug, Clone)]
pub struct ArrayConstruction {
    element_type: TypeDescriptor,
    length: usize,
    output_type: TypeDescriptor,
    input_types: OnceCell<Vec<TypeDescriptor>>,
    hash: OnceCell<u64>,
}

/// Longest array a construction may declare (`i32::MAX`, the widest length
/// the canonical text accepts)
pub const MAX_ARRAY_LENGTH: usize = i32::MAX as usize;

impl ArrayConstruction {
    pub const ID: &'static str = "array";

    /// Rejects `void` and array element types: only one-dimensional arrays
    /// of storable values are constructed. The element type name must be
    /// writable in canonical text (non-empty, no brackets or whitespace) and
    /// `length` at most [`MAX_ARRAY_LENGTH`].
    pub fn new(element_type: TypeDescriptor, length: usize) -> Result<Self, OperationError> {
        if element_type.is_void() {
            return Err(OperationError::invalid_argument(
                "array element type cannot be void",
            ));
        }
        if element_type.is_array() {
            return Err(OperationError::invalid_argument(format!(
                "array element type must not itself be an array: {}",
                element_type
            )));
        }
        let name = element_type.name();
        if name.is_empty() || name.contains(|c: char| c == '[' || c == ']' || c.is_whitespace()) {
            return Err(OperationError::invalid_argument(format!(
                "array element type name cannot appear in canonical text: {name:?}"
            )));
        }
        if length > MAX_ARRAY_LENGTH {
            return Err(OperationError::invalid_argument(format!(
                "array length {length} exceeds {MAX_ARRAY_LENGTH}"
            )));
        }
        let output_type = TypeDescriptor::array_of(&element_type);
        Ok(Self {
            element_type,
            length,
            output_type,
            input_types: OnceCell::new(),
            hash: OnceCell::new(),
        })
    }

    pub fn element_type(&self) -> &TypeDescriptor {
        &self.element_type
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// `length` copies of the element type
    pub fn input_types(&self) -> &[TypeDescriptor] {
        self.input_types
            .get_or_init(|| vec![self.element_type.clone(); self.length])
    }

    /// The array type over the element type
    pub fn output_type(&self) -> &TypeDescriptor {
        &self.output_type
    }

    /// Allocate a fresh array holding `values` in order.
    ///
    /// Exactly `length` values of the element type are required; anything
    /// else is rejected before allocating.
    pub fn execute(&self, values: &[Value]) -> Result<ExecutionOutcome, OperationError> {
        check_input_values(self, self.input_types(), values)?;

        let start = Instant::now();
        let array = ArrayValue::new(self.element_type.clone(), self.length)?;
        for (index, value) in values.iter().enumerate() {
            array.set(index, value.clone())?;
        }
        let elapsed = start.elapsed();

        operation_debug_log(format_args!("{self}: allocated in {elapsed:?}"));
        Ok(ExecutionOutcome::normal(Value::Array(array), elapsed))
    }

    /// Append `T[] tArrayN = new T[] { e0, e1 };` and a line separator.
    ///
    /// Each element is the input variable's name, or the literal itself when
    /// the renderer's policy inlines that input.
    pub fn append_source(
        &self,
        output: &Variable<'_>,
        inputs: &[Variable<'_>],
        renderer: &SourceRenderer<'_>,
        buf: &mut String,
    ) -> Result<(), OperationError> {
        check_input_vars(self, self.length, inputs)?;

        let element = self.element_type.canonical_name();
        buf.push_str(element);
        buf.push_str("[] ");
        buf.push_str(&output.name());
        buf.push_str(" = new ");
        buf.push_str(element);
        buf.push_str("[] ");
        if inputs.is_empty() {
            buf.push_str("{}");
        } else {
            buf.push_str("{ ");
            buf.push_str(&join_inputs(inputs, renderer));
            buf.push_str(" }");
        }
        buf.push(';');
        buf.push_str(renderer.line_separator());
        Ok(())
    }

    /// `<element type name>[<length>]`, e.g. `int[3]`
    pub fn to_canonical_text(&self) -> String {
        format!("{}[{}]", self.element_type.name(), self.length)
    }

    /// Parse `TYPENAME[DIGITS]`.
    ///
    /// The type name is everything before the first `[`; it is resolved
    /// through `resolver`, whose error is passed through unchanged.
    pub fn parse<R>(text: &str, resolver: &R) -> Result<Self, ParseError>
    where
        R: TypeResolver + ?Sized,
    {
        let open = text
            .find('[')
            .ok_or_else(|| ParseError::malformed(text, "missing '['"))?;
        let close = text
            .find(']')
            .ok_or_else(|| ParseError::malformed(text, "missing ']'"))?;
        if close < open {
            return Err(ParseError::malformed(text, "']' precedes '['"));
        }
        if close + 1 != text.len() {
            return Err(ParseError::malformed(text, "unexpected text after ']'"));
        }

        let type_name = &text[..open];
        if type_name.is_empty() {
            return Err(ParseError::malformed(text, "missing element type name"));
        }
        let digits = &text[open + 1..close];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::malformed(
                text,
                "length is not a non-negative decimal integer",
            ));
        }
        let length = digits
            .parse::<usize>()
            .ok()
            .filter(|&len| len <= MAX_ARRAY_LENGTH)
            .ok_or_else(|| ParseError::malformed(text, "length out of range"))?;

        let element_type = resolver.resolve(type_name)?;
        ArrayConstruction::new(element_type, length)
            .map_err(|err| ParseError::malformed(text, err.to_string()))
    }

    fn hash_code(&self) -> u64 {
        *self.hash.get_or_init(|| {
            let mut hasher = DefaultHasher::new();
            self.element_type.hash(&mut hasher);
            hasher
                .finish()
                .wrapping_add((self.length as u64).wrapping_mul(17))
        })
    }
}

impl PartialEq for ArrayConstruction {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.element_type == other.element_type
    }
}

impl Eq for ArrayConstruction {}

impl Hash for ArrayConstruction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

/// Short display form, e.g. `array_of_int_of_size_3`
impl fmt::Display for ArrayConstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "array_of_{}_of_size_{}",
            self.element_type.simple_name(),
            self.length
        )
    }
}
