//! Typed arrays
//!
//! Arrays keep homogeneous primitive storage without boxing each slot;
//! reference element types fall back to a vector of `Value`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{RuntimeError, RuntimeResult};
use crate::types::{PrimitiveKind, TypeDescriptor};
use crate::value::Value;

/// Slot storage for one array
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayStorage {
    Bool(Vec<bool>),
    Byte(Vec<i8>),
    Char(Vec<char>),
    Short(Vec<i16>),
    Int(Vec<i32>),
    Long(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    /// Reference elements (strings, objects, nested arrays, null)
    Ref(Vec<Value>),
}

impl ArrayStorage {
    /// Allocate `length` default-valued slots for `element`.
    fn allocate(element: &TypeDescriptor, length: usize) -> RuntimeResult<Self> {
        let storage = match element.primitive_kind() {
            Some(PrimitiveKind::Boolean) => ArrayStorage::Bool(vec![false; length]),
            Some(PrimitiveKind::Byte) => ArrayStorage::Byte(vec![0; length]),
            Some(PrimitiveKind::Char) => ArrayStorage::Char(vec!['\0'; length]),
            Some(PrimitiveKind::Short) => ArrayStorage::Short(vec![0; length]),
            Some(PrimitiveKind::Int) => ArrayStorage::Int(vec![0; length]),
            Some(PrimitiveKind::Long) => ArrayStorage::Long(vec![0; length]),
            Some(PrimitiveKind::Float) => ArrayStorage::Float(vec![0.0; length]),
            Some(PrimitiveKind::Double) => ArrayStorage::Double(vec![0.0; length]),
            Some(PrimitiveKind::Void) => {
                return Err(RuntimeError::argument_error(
                    "cannot allocate an array of void",
                ))
            }
            None => ArrayStorage::Ref(vec![Value::Null; length]),
        };
        Ok(storage)
    }

    pub fn len(&self) -> usize {
        match self {
            ArrayStorage::Bool(v) => v.len(),
            ArrayStorage::Byte(v) => v.len(),
            ArrayStorage::Char(v) => v.len(),
            ArrayStorage::Short(v) => v.len(),
            ArrayStorage::Int(v) => v.len(),
            ArrayStorage::Long(v) => v.len(),
            ArrayStorage::Float(v) => v.len(),
            ArrayStorage::Double(v) => v.len(),
            ArrayStorage::Ref(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<Value> {
        match self {
            ArrayStorage::Bool(v) => v.get(index).map(|&x| Value::Bool(x)),
            ArrayStorage::Byte(v) => v.get(index).map(|&x| Value::Byte(x)),
            ArrayStorage::Char(v) => v.get(index).map(|&x| Value::Char(x)),
            ArrayStorage::Short(v) => v.get(index).map(|&x| Value::Short(x)),
            ArrayStorage::Int(v) => v.get(index).map(|&x| Value::Int(x)),
            ArrayStorage::Long(v) => v.get(index).map(|&x| Value::Long(x)),
            ArrayStorage::Float(v) => v.get(index).map(|&x| Value::Float(x)),
            ArrayStorage::Double(v) => v.get(index).map(|&x| Value::Double(x)),
            ArrayStorage::Ref(v) => v.get(index).cloned(),
        }
    }

    /// Store into an in-bounds slot. Returns the value back on a kind mismatch.
    fn store(&mut self, index: usize, value: Value) -> Result<(), Value> {
        match (self, value) {
            (ArrayStorage::Bool(v), Value::Bool(x)) => v[index] = x,
            (ArrayStorage::Byte(v), Value::Byte(x)) => v[index] = x,
            (ArrayStorage::Char(v), Value::Char(x)) => v[index] = x,
            (ArrayStorage::Short(v), Value::Short(x)) => v[index] = x,
            (ArrayStorage::Int(v), Value::Int(x)) => v[index] = x,
            (ArrayStorage::Long(v), Value::Long(x)) => v[index] = x,
            (ArrayStorage::Float(v), Value::Float(x)) => v[index] = x,
            (ArrayStorage::Double(v), Value::Double(x)) => v[index] = x,
            (ArrayStorage::Ref(v), x) => v[index] = x,
            (_, x) => return Err(x),
        }
        Ok(())
    }
}

/// One-dimensional array of a declared element type.
///
/// Cloning shares the slots; equality on `Value` is identity.
#[derive(Debug, Clone)]
pub struct ArrayValue {
    element_type: TypeDescriptor,
    storage: Rc<RefCell<ArrayStorage>>,
}

impl ArrayValue {
    /// Allocate a fresh array of `length` default-valued slots.
    pub fn new(element_type: TypeDescriptor, length: usize) -> RuntimeResult<Self> {
        let storage = ArrayStorage::allocate(&element_type, length)?;
        Ok(Self {
            element_type,
            storage: Rc::new(RefCell::new(storage)),
        })
    }

    /// Allocate an array holding `values` in order.
    pub fn from_values(element_type: TypeDescriptor, values: Vec<Value>) -> RuntimeResult<Self> {
        let arr = Self::new(element_type, values.len())?;
        for (index, value) in values.into_iter().enumerate() {
            arr.set(index, value)?;
        }
        Ok(arr)
    }

    pub fn element_type(&self) -> &TypeDescriptor {
        &self.element_type
    }

    /// The array type `element[]`
    pub fn array_type(&self) -> TypeDescriptor {
        TypeDescriptor::array_of(&self.element_type)
    }

    pub fn len(&self) -> usize {
        self.storage.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get element at index (0-based)
    pub fn get(&self, index: usize) -> RuntimeResult<Value> {
        let storage = self.storage.borrow();
        storage
            .get(index)
            .ok_or_else(|| RuntimeError::bounds_error(index, storage.len()))
    }

    /// Set element at index (0-based), checking the element type
    pub fn set(&self, index: usize, value: Value) -> RuntimeResult<()> {
        let mut storage = self.storage.borrow_mut();
        if index >= storage.len() {
            return Err(RuntimeError::bounds_error(index, storage.len()));
        }
        if !self.element_type.accepts(&value) {
            return Err(RuntimeError::type_error(format!(
                "cannot store {} in {}[]",
                value.type_name(),
                self.element_type
            )));
        }
        storage.store(index, value).map_err(|value| {
            RuntimeError::type_error(format!(
                "cannot store {} in {}[]",
                value.type_name(),
                self.element_type
            ))
        })
    }

    /// Copy of every slot as a `Value`
    pub fn to_value_vec(&self) -> Vec<Value> {
        let storage = self.storage.borrow();
        (0..storage.len()).filter_map(|i| storage.get(i)).collect()
    }

    /// Snapshot of the underlying storage
    pub fn storage(&self) -> ArrayStorage {
        self.storage.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &ArrayValue) -> bool {
        Rc::ptr_eq(&self.storage, &other.storage)
    }
}
