//! Integration tests: array construction through the public API

mod common;
use common::*;

use pretty_assertions::assert_eq;
use seqgen::{
    ArrayConstruction, ExecutionOutcome, Operation, OperationError, ParseError, PrimitiveKind,
    RenderOptions, SubjectApi, TypeDescriptor, TypeResolver, Value,
};

#[test]
fn test_int_array_of_three() {
    let op = ArrayConstruction::new(int(), 3).unwrap();
    assert_eq!(op.to_canonical_text(), "int[3]");
    assert_eq!(op.to_string(), "array_of_int_of_size_3");
    assert_eq!(op.input_types(), &[int(), int(), int()]);
    assert_eq!(op.output_type(), &TypeDescriptor::array_of(&int()));

    let outcome = op
        .execute(&[Value::Int(3), Value::Int(7), Value::Int(9)])
        .unwrap();
    let array = outcome.value().and_then(Value::as_array).unwrap();
    assert_eq!(array.element_type(), &int());
    assert_eq!(
        array.to_value_vec(),
        vec![Value::Int(3), Value::Int(7), Value::Int(9)]
    );
}

#[test]
fn test_each_execution_allocates_a_fresh_array() {
    let op = ArrayConstruction::new(int(), 1).unwrap();
    let first = op.execute(&[Value::Int(1)]).unwrap();
    let second = op.execute(&[Value::Int(1)]).unwrap();
    let (a, b) = (
        first.value().and_then(Value::as_array).unwrap(),
        second.value().and_then(Value::as_array).unwrap(),
    );
    assert!(!a.ptr_eq(b));
    a.set(0, Value::Int(2)).unwrap();
    assert_eq!(b.get(0), Ok(Value::Int(1)));
}

#[test]
fn test_zero_length_array() {
    let op = ArrayConstruction::new(TypeDescriptor::string(), 0).unwrap();
    assert!(op.input_types().is_empty());
    let outcome = op.execute(&[]).unwrap();
    assert!(outcome.is_normal());
    assert!(outcome.value().and_then(Value::as_array).unwrap().is_empty());
}

#[test]
fn test_wrong_value_count_is_an_error() {
    let op = ArrayConstruction::new(int(), 2).unwrap();
    for values in [vec![], vec![Value::Int(1)], vec![Value::Int(1); 3]] {
        let len = values.len();
        assert_eq!(
            op.execute(&values),
            Err(OperationError::invalid_arity("array_of_int_of_size_2", 2, len))
        );
    }
}

#[test]
fn test_reference_elements_accept_null() {
    let api = geometry_api();
    let point = api.resolve("geo.Point").unwrap();
    let op = ArrayConstruction::new(point, 2).unwrap();
    let outcome = op.execute(&[Value::Null, Value::Null]).unwrap();
    let array = outcome.value().and_then(Value::as_array).unwrap();
    assert_eq!(array.to_value_vec(), vec![Value::Null, Value::Null]);
}

#[test]
fn test_void_and_nested_elements_rejected() {
    let void = TypeDescriptor::primitive(PrimitiveKind::Void);
    assert!(matches!(
        ArrayConstruction::new(void, 1),
        Err(OperationError::InvalidArgument(_))
    ));
    let nested = TypeDescriptor::array_of(&int());
    assert!(matches!(
        ArrayConstruction::new(nested, 1),
        Err(OperationError::InvalidArgument(_))
    ));
}

#[test]
fn test_parse_round_trip_through_subject_types() {
    let api = geometry_api();
    for text in ["int[3]", "double[0]", "String[12]", "geo.Point[2]", "Object[1]"] {
        let op = ArrayConstruction::parse(text, &api).unwrap();
        assert_eq!(op.to_canonical_text(), text);
        assert_eq!(ArrayConstruction::parse(&op.to_canonical_text(), &api), Ok(op));
    }
}

#[test]
fn test_parse_rejects_malformed_text() {
    let api = SubjectApi::new();
    for text in ["int", "int[x]", "int[-1]", "int[]", "int[3", "[3]", "int[3]x", "int]3["] {
        assert!(
            matches!(
                ArrayConstruction::parse(text, &api),
                Err(ParseError::Malformed { .. })
            ),
            "{text}"
        );
    }
}

#[test]
fn test_parse_unknown_element_type() {
    let api = SubjectApi::new();
    let err = ArrayConstruction::parse("bogus[3]", &api).unwrap_err();
    assert!(matches!(err, ParseError::UnknownType(_)));
    assert_eq!(err.to_string(), "unknown type name 'bogus'");
}

#[test]
fn test_equal_constructions_are_interchangeable() {
    use std::collections::HashSet;

    let a = ArrayConstruction::new(int(), 3).unwrap();
    let b = ArrayConstruction::parse("int[3]", &SubjectApi::new()).unwrap();
    assert_eq!(a, b);

    let set: HashSet<Operation> = [Operation::from(a), Operation::from(b)].into_iter().collect();
    assert_eq!(set.len(), 1);
    assert_ne!(
        ArrayConstruction::new(int(), 3).unwrap(),
        ArrayConstruction::new(int(), 4).unwrap()
    );
}

#[test]
fn test_render_long_and_short_forms() {
    let seq = int_array_sequence();
    let long = RenderOptions::long_format();
    insta::assert_snapshot!(seq.to_code(&long).unwrap().trim_end(), @r###"
    int int0 = 3;
    int int1 = 7;
    int int2 = 9;
    int[] intArray3 = new int[] { int0, int1, int2 };
    "###);

    let short = RenderOptions::default();
    assert_eq!(
        seq.to_code(&short).unwrap(),
        "int[] intArray3 = new int[] { 3, 7, 9 };\n"
    );
}

#[test]
fn test_sequence_execution_produces_the_array() {
    let outcomes = int_array_sequence().execute().unwrap();
    assert_eq!(outcomes.len(), 4);
    match &outcomes[3] {
        ExecutionOutcome::Normal { value, .. } => {
            let array = value.as_array().unwrap();
            assert_eq!(array.len(), 3);
            assert_eq!(array.get(2), Ok(Value::Int(9)));
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}
