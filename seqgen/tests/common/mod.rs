//! Shared helpers for integration tests
// Each test target uses a different subset of these helpers.
#![allow(dead_code)]

use std::sync::Arc;

use seqgen::{
    ArrayConstruction, LiteralLoad, MemberSignature, ObjectRef, Operation, PrimitiveKind,
    Sequence, SubjectApi, Thrown, TypeDescriptor, Value,
};

pub fn int() -> TypeDescriptor {
    TypeDescriptor::primitive(PrimitiveKind::Int)
}

pub fn int_literal(v: i32) -> Arc<Operation> {
    Arc::new(LiteralLoad::new(int(), Value::Int(v)).expect("int literal").into())
}

pub fn string_literal(s: &str) -> Arc<Operation> {
    Arc::new(
        LiteralLoad::new(TypeDescriptor::string(), Value::from(s))
            .expect("string literal")
            .into(),
    )
}

pub fn array_of(element: &TypeDescriptor, length: usize) -> Arc<Operation> {
    Arc::new(
        ArrayConstruction::new(element.clone(), length)
            .expect("array construction")
            .into(),
    )
}

/// A small geometry API:
///
/// - `geo.Point.<init>(int,int)`, `geo.Point.getX()`, static `geo.Point.origin()`
/// - `geo.Polygon.<init>(geo.Point[])`, `geo.Polygon.size()`
/// - static `geo.Shapes.checkedSize(int[])`, throws on empty arrays
pub fn geometry_api() -> SubjectApi {
    let mut api = SubjectApi::new();
    let point = api.register_class("geo.Point");
    let polygon = api.register_class("geo.Polygon");
    let shapes = api.register_class("geo.Shapes");
    let points = TypeDescriptor::array_of(&point);
    let ints = TypeDescriptor::array_of(&int());

    let class = point.clone();
    api.add_constructor(&point, vec![int(), int()], move |args| {
        let obj = ObjectRef::new(class.clone());
        obj.set_field("x", args[0].clone());
        obj.set_field("y", args[1].clone());
        Ok(Value::Object(obj))
    });
    api.add_method(
        MemberSignature::instance_method(&point, "getX", vec![], int()),
        |args| {
            let obj = args[0]
                .as_object()
                .ok_or_else(|| Thrown::new("ClassCastException", "receiver is not a Point"))?;
            obj.get_field("x")
                .map_err(|e| Thrown::new("IllegalStateException", e.to_string()))
        },
    );
    let class = point.clone();
    api.add_method(
        MemberSignature::static_method(&point, "origin", vec![], point.clone()),
        move |_| {
            let obj = ObjectRef::new(class.clone());
            obj.set_field("x", Value::Int(0));
            obj.set_field("y", Value::Int(0));
            Ok(Value::Object(obj))
        },
    );

    let class = polygon.clone();
    api.add_constructor(&polygon, vec![points], move |args| {
        let obj = ObjectRef::new(class.clone());
        obj.set_field("vertices", args[0].clone());
        Ok(Value::Object(obj))
    });
    api.add_method(
        MemberSignature::instance_method(&polygon, "size", vec![], int()),
        |args| {
            let vertices = args[0]
                .as_object()
                .and_then(|obj| obj.get_field("vertices").ok())
                .ok_or_else(|| Thrown::new("IllegalStateException", "no vertices"))?;
            match vertices {
                Value::Array(arr) => Ok(Value::Int(arr.len() as i32)),
                _ => Err(Thrown::new("NullPointerException", "vertices is null")),
            }
        },
    );

    api.add_method(
        MemberSignature::static_method(&shapes, "checkedSize", vec![ints], int()),
        |args| match &args[0] {
            Value::Array(arr) if !arr.is_empty() => Ok(Value::Int(arr.len() as i32)),
            Value::Array(_) => Err(Thrown::new("IllegalArgumentException", "empty")),
            _ => Err(Thrown::new("NullPointerException", "null array")),
        },
    );
    api
}

/// Look up a registered operation by tagged text.
pub fn op(api: &SubjectApi, tagged: &str) -> Arc<Operation> {
    Arc::new(Operation::parse(tagged, api).unwrap_or_else(|e| panic!("{tagged}: {e}")))
}

/// `[ int 3, int 7, int 9, int[] {3, 7, 9} ]`
pub fn int_array_sequence() -> Sequence {
    let mut seq = Sequence::new();
    for v in [3, 7, 9] {
        seq.extend(int_literal(v), vec![]).expect("literal");
    }
    seq.extend(array_of(&int(), 3), vec![0, 1, 2])
        .expect("array");
    seq
}
