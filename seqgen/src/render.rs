//! Source rendering of statements.
//!
//! [`SourceRenderer`] appends one statement at a time to a caller-owned
//! buffer. Operations ask it how to write each input: as the variable's
//! name, or, when the [`InlinePolicy`] allows, as the literal value itself.
//! Both choices yield equivalent source.

use std::fmt;

use seqgen_runtime::to_code_string;

use crate::config::RenderOptions;
use crate::error::OperationError;
use crate::sequence::{Sequence, Variable};

/// Decides whether an input is written inline.
pub trait InlinePolicy: fmt::Debug {
    /// Literal text to write in place of `var`, or `None` to use its name.
    fn inline_text(&self, var: &Variable<'_>) -> Option<String>;
}

/// Inline outputs of inlinable literal loads unless long format is on.
impl InlinePolicy for RenderOptions {
    fn inline_text(&self, var: &Variable<'_>) -> Option<String> {
        if self.long_format {
            return None;
        }
        let literal = var.declaring_operation().as_literal_load()?;
        if !literal.is_inlinable() {
            return None;
        }
        to_code_string(&literal.value())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SourceRenderer<'a> {
    policy: &'a dyn InlinePolicy,
    line_separator: &'a str,
}

impl<'a> SourceRenderer<'a> {
    pub fn new(policy: &'a dyn InlinePolicy, line_separator: &'a str) -> Self {
        Self {
            policy,
            line_separator,
        }
    }

    pub fn from_options(options: &'a RenderOptions) -> Self {
        Self::new(options, &options.line_separator)
    }

    pub fn line_separator(&self) -> &str {
        self.line_separator
    }

    pub fn is_inlined(&self, var: &Variable<'_>) -> bool {
        self.policy.inline_text(var).is_some()
    }

    /// How `var` appears where it is consumed
    pub fn input_text(&self, var: &Variable<'_>) -> String {
        self.policy
            .inline_text(var)
            .unwrap_or_else(|| var.name())
    }

    /// Append statement `index` of `sequence` to `buf`.
    pub fn append_statement(
        &self,
        sequence: &Sequence,
        index: usize,
        buf: &mut String,
    ) -> Result<(), OperationError> {
        let statement = sequence
            .statement(index)
            .ok_or(OperationError::UnknownStatement {
                index,
                len: sequence.len(),
            })?;
        // Inputs of a stored statement always name earlier statements.
        let output = sequence.variable(index);
        let inputs: Vec<Variable<'_>> = statement
            .inputs()
            .iter()
            .map(|&i| sequence.variable(i))
            .collect();
        statement
            .operation()
            .append_source(&output, &inputs, self, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{ArrayConstruction, LiteralLoad, Operation};
    use pretty_assertions::assert_eq;
    use seqgen_runtime::{PrimitiveKind, TypeDescriptor, Value};
    use std::sync::Arc;

    /// Inline every input, literal or not
    #[derive(Debug)]
    struct Everything;

    impl InlinePolicy for Everything {
        fn inline_text(&self, var: &Variable<'_>) -> Option<String> {
            Some(format!("/*{}*/", var.name()))
        }
    }

    fn sample() -> Sequence {
        let int = TypeDescriptor::primitive(PrimitiveKind::Int);
        let mut seq = Sequence::new();
        seq.extend(
            Arc::new(LiteralLoad::new(int.clone(), Value::Int(5)).unwrap().into()),
            vec![],
        )
        .unwrap();
        seq.extend(
            Arc::new(Operation::from(ArrayConstruction::new(int, 1).unwrap())),
            vec![0],
        )
        .unwrap();
        seq
    }

    #[test]
    fn test_options_policy() {
        let seq = sample();
        let short = RenderOptions::default();
        let long = RenderOptions::long_format();
        assert_eq!(short.inline_text(&seq.variable(0)).as_deref(), Some("5"));
        assert_eq!(long.inline_text(&seq.variable(0)), None);
        // Only literal loads inline.
        assert_eq!(short.inline_text(&seq.variable(1)), None);
    }

    #[test]
    fn test_input_text() {
        let seq = sample();
        let short = RenderOptions::default();
        let long = RenderOptions::long_format();
        assert_eq!(SourceRenderer::from_options(&short).input_text(&seq.variable(0)), "5");
        assert_eq!(SourceRenderer::from_options(&long).input_text(&seq.variable(0)), "int0");
    }

    #[test]
    fn test_custom_policy() {
        let seq = sample();
        let renderer = SourceRenderer::new(&Everything, "\n");
        let mut buf = String::new();
        renderer.append_statement(&seq, 1, &mut buf).unwrap();
        assert_eq!(buf, "int[] intArray1 = new int[] { /*int0*/ };\n");
    }

    #[test]
    fn test_append_statement_out_of_range() {
        let seq = sample();
        let options = RenderOptions::default();
        let mut buf = String::new();
        assert_eq!(
            SourceRenderer::from_options(&options).append_statement(&seq, 2, &mut buf),
            Err(OperationError::UnknownStatement { index: 2, len: 2 })
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn test_append_statement_appends() {
        let seq = sample();
        let options = RenderOptions::long_format();
        let renderer = SourceRenderer::from_options(&options);
        let mut buf = String::from("// prelude\n");
        renderer.append_statement(&seq, 0, &mut buf).unwrap();
        renderer.append_statement(&seq, 1, &mut buf).unwrap();
        assert_eq!(
            buf,
            "// prelude\nint int0 = 5;\nint[] intArray1 = new int[] { int0 };\n"
        );
    }
}
