//! Sequences of statements.
//!
//! A [`Statement`] binds an [`Operation`] to the outputs of earlier
//! statements by index; a [`Variable`] names the output of one statement.

use std::sync::Arc;

use seqgen_runtime::{ExecutionOutcome, TypeDescriptor, Value};

use crate::config::RenderOptions;
use crate::debug::operation_debug_log;
use crate::error::OperationError;
use crate::operation::Operation;
use crate::render::SourceRenderer;

/// An operation with resolved input bindings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    operation: Arc<Operation>,
    inputs: Vec<usize>,
}

impl Statement {
    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Indices of the statements whose outputs feed this one
    pub fn inputs(&self) -> &[usize] {
        &self.inputs
    }
}

/// Ordered list of statements forming one candidate test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Sequence {
    statements: Vec<Statement>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn statement(&self, index: usize) -> Option<&Statement> {
        self.statements.get(index)
    }

    /// Append `operation` fed by the outputs of statements `inputs`.
    ///
    /// Inputs must refer to earlier statements whose output types conform
    /// to the operation's input types. Returns the new statement's index.
    pub fn extend(
        &mut self,
        operation: Arc<Operation>,
        inputs: Vec<usize>,
    ) -> Result<usize, OperationError> {
        let expected = operation.input_types();
        if inputs.len() != expected.len() {
            return Err(OperationError::invalid_arity(
                operation.to_string(),
                expected.len(),
                inputs.len(),
            ));
        }
        for (index, (&target, ty)) in inputs.iter().zip(expected).enumerate() {
            let Some(source) = self.statements.get(target) else {
                return Err(OperationError::UnboundInput {
                    operation: operation.to_string(),
                    index,
                    target,
                });
            };
            let found = source.operation.output_type();
            if !conforms(found, ty) {
                return Err(OperationError::TypeMismatch {
                    operation: operation.to_string(),
                    index,
                    expected: ty.name().to_string(),
                    found: found.name().to_string(),
                });
            }
        }
        self.statements.push(Statement { operation, inputs });
        Ok(self.statements.len() - 1)
    }

    /// Output of statement `index`.
    ///
    /// # Panics
    /// If `index` is not a statement of this sequence.
    pub fn variable(&self, index: usize) -> Variable<'_> {
        assert!(index < self.statements.len(), "no statement {index}");
        Variable {
            sequence: self,
            index,
        }
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable<'_>> {
        (0..self.statements.len()).map(move |index| Variable {
            sequence: self,
            index,
        })
    }

    /// Run every statement in order.
    ///
    /// Execution stops at the first exceptional outcome; the statements
    /// after it are reported as [`ExecutionOutcome::NotExecuted`].
    pub fn execute(&self) -> Result<Vec<ExecutionOutcome>, OperationError> {
        let mut outcomes: Vec<ExecutionOutcome> = Vec::with_capacity(self.statements.len());
        let mut halted = false;
        for (index, statement) in self.statements.iter().enumerate() {
            if halted {
                outcomes.push(ExecutionOutcome::NotExecuted);
                continue;
            }
            let values: Vec<Value> = statement
                .inputs
                .iter()
                .filter_map(|&i| outcomes[i].value().cloned())
                .collect();
            let outcome = statement.operation.execute(&values)?;
            if outcome.is_exceptional() {
                operation_debug_log(format_args!(
                    "statement {index} ({}) halted the sequence",
                    statement.operation
                ));
                halted = true;
            }
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// Source text of the whole sequence, one statement per line.
    pub fn to_code(&self, options: &RenderOptions) -> Result<String, OperationError> {
        self.to_code_with(&SourceRenderer::from_options(options))
    }

    /// Source text rendered through any inlining policy.
    pub fn to_code_with(&self, renderer: &SourceRenderer<'_>) -> Result<String, OperationError> {
        let mut buf = String::new();
        for index in 0..self.statements.len() {
            if self.is_inlined_everywhere(index, renderer) {
                continue;
            }
            renderer.append_statement(self, index, &mut buf)?;
        }
        Ok(buf)
    }

    /// A literal load whose value every consumer writes inline needs no
    /// declaration of its own. Any other statement is always declared, even
    /// when a policy inlines its uses.
    fn is_inlined_everywhere(&self, index: usize, renderer: &SourceRenderer<'_>) -> bool {
        let var = self.variable(index);
        if var.declaring_operation().as_literal_load().is_none() {
            return false;
        }
        let used = self.statements.iter().any(|s| s.inputs.contains(&index));
        used && renderer.is_inlined(&var)
    }
}

/// Statement output `found` may feed an input of type `expected`.
fn conforms(found: &TypeDescriptor, expected: &TypeDescriptor) -> bool {
    found == expected || (expected.name() == TypeDescriptor::object().name() && !found.is_primitive())
}

/// The output of one statement of a sequence.
#[derive(Debug, Clone, Copy)]
pub struct Variable<'s> {
    sequence: &'s Sequence,
    index: usize,
}

impl<'s> Variable<'s> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn declaring_statement(&self) -> &'s Statement {
        &self.sequence.statements[self.index]
    }

    pub fn declaring_operation(&self) -> &'s Operation {
        self.declaring_statement().operation()
    }

    pub fn ty(&self) -> &'s TypeDescriptor {
        self.declaring_operation().output_type()
    }

    /// Generated name: type-derived base name plus statement index
    pub fn name(&self) -> String {
        format!("{}{}", variable_base_name(self.ty()), self.index)
    }
}

/// `int` -> `int`, `geo.Point` -> `point`, `int[]` -> `intArray`
pub fn variable_base_name(ty: &TypeDescriptor) -> String {
    if let Some(element) = ty.element_type() {
        return format!("{}Array", variable_base_name(element));
    }
    let simple = ty.simple_name();
    let mut chars = simple.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => "var".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{ArrayConstruction, LiteralLoad};
    use crate::subject::{MemberSignature, SubjectApi};
    use pretty_assertions::assert_eq;
    use seqgen_runtime::{PrimitiveKind, Thrown};

    fn int() -> TypeDescriptor {
        TypeDescriptor::primitive(PrimitiveKind::Int)
    }

    fn literal(v: i32) -> Arc<Operation> {
        Arc::new(LiteralLoad::new(int(), Value::Int(v)).unwrap().into())
    }

    #[test]
    fn test_variable_names() {
        assert_eq!(variable_base_name(&int()), "int");
        assert_eq!(variable_base_name(&TypeDescriptor::class("geo.Point")), "point");
        assert_eq!(variable_base_name(&TypeDescriptor::array_of(&int())), "intArray");
        assert_eq!(
            variable_base_name(&TypeDescriptor::array_of(&TypeDescriptor::string())),
            "stringArray"
        );
    }

    #[test]
    fn test_extend_validates_bindings() {
        let mut seq = Sequence::new();
        seq.extend(literal(1), vec![]).unwrap();
        let array = Arc::new(Operation::from(ArrayConstruction::new(int(), 2).unwrap()));

        assert_eq!(
            seq.extend(array.clone(), vec![0]),
            Err(OperationError::invalid_arity("array_of_int_of_size_2", 2, 1))
        );
        assert!(matches!(
            seq.extend(array.clone(), vec![0, 5]),
            Err(OperationError::UnboundInput { index: 1, target: 5, .. })
        ));

        let text = Arc::new(
            LiteralLoad::new(TypeDescriptor::string(), Value::from("x"))
                .unwrap()
                .into(),
        );
        seq.extend(text, vec![]).unwrap();
        assert!(matches!(
            seq.extend(array.clone(), vec![0, 1]),
            Err(OperationError::TypeMismatch { index: 1, .. })
        ));

        assert_eq!(seq.extend(array, vec![0, 0]), Ok(2));
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn test_object_inputs_take_references() {
        let mut seq = Sequence::new();
        seq.extend(
            Arc::new(LiteralLoad::new(TypeDescriptor::string(), Value::from("s")).unwrap().into()),
            vec![],
        )
        .unwrap();
        seq.extend(literal(1), vec![]).unwrap();
        let objects = Arc::new(Operation::from(
            ArrayConstruction::new(TypeDescriptor::object(), 1).unwrap(),
        ));
        assert!(seq.extend(objects.clone(), vec![0]).is_ok());
        assert!(seq.extend(objects, vec![1]).is_err());
    }

    #[test]
    fn test_execute_feeds_outputs_forward() {
        let mut seq = Sequence::new();
        seq.extend(literal(3), vec![]).unwrap();
        seq.extend(literal(7), vec![]).unwrap();
        let array = Arc::new(Operation::from(ArrayConstruction::new(int(), 3).unwrap()));
        seq.extend(array, vec![0, 1, 0]).unwrap();

        let outcomes = seq.execute().unwrap();
        assert_eq!(outcomes.len(), 3);
        let array = outcomes[2].value().and_then(Value::as_array).unwrap();
        assert_eq!(
            array.to_value_vec(),
            vec![Value::Int(3), Value::Int(7), Value::Int(3)]
        );
    }

    #[test]
    fn test_execute_halts_after_exception() {
        let mut api = SubjectApi::new();
        let fail = api.add_method(
            MemberSignature::static_method(&TypeDescriptor::string(), "fail", vec![], int()),
            |_| Err(Thrown::new("IllegalStateException", "boom")),
        );
        let mut seq = Sequence::new();
        seq.extend(Arc::new(fail.into()), vec![]).unwrap();
        seq.extend(literal(1), vec![]).unwrap();

        let outcomes = seq.execute().unwrap();
        assert!(outcomes[0].is_exceptional());
        assert!(matches!(outcomes[1], ExecutionOutcome::NotExecuted));
    }

    /// Inlines every use: literals as their code, anything else wrapped in
    /// parentheses
    #[derive(Debug)]
    struct InlineAll;

    impl crate::render::InlinePolicy for InlineAll {
        fn inline_text(&self, var: &Variable<'_>) -> Option<String> {
            match var.declaring_operation().as_literal_load() {
                Some(literal) => Some(literal.code().to_string()),
                None => Some(format!("({})", var.name())),
            }
        }
    }

    #[test]
    fn test_only_literal_declarations_are_dropped() {
        let mut seq = Sequence::new();
        seq.extend(literal(2), vec![]).unwrap();
        let single = Arc::new(Operation::from(ArrayConstruction::new(int(), 1).unwrap()));
        seq.extend(single, vec![0]).unwrap();
        let objects = Arc::new(Operation::from(
            ArrayConstruction::new(TypeDescriptor::object(), 1).unwrap(),
        ));
        seq.extend(objects, vec![1]).unwrap();

        let code = seq.to_code_with(&SourceRenderer::new(&InlineAll, "\n")).unwrap();
        assert_eq!(
            code,
            "int[] intArray1 = new int[] { 2 };\n\
             Object[] objectArray2 = new Object[] { (intArray1) };\n"
        );
    }

    #[test]
    fn test_variable_accessors() {
        let mut seq = Sequence::new();
        seq.extend(literal(4), vec![]).unwrap();
        let var = seq.variable(0);
        assert_eq!(var.index(), 0);
        assert_eq!(var.ty(), &int());
        assert_eq!(var.name(), "int0");
        assert!(var.declaring_operation().as_literal_load().is_some());
        assert_eq!(seq.variables().count(), 1);
    }
}
