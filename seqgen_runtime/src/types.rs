//! Type descriptors for the subject API
//!
//! A `TypeDescriptor` is an opaque, cheap-to-clone handle naming one type of
//! the API under test. The shape of the type tree is small:
//! ```text
//! TypeDescriptor
//!  ├── Primitive(boolean, byte, char, short, int, long, float, double, void)
//!  ├── Class(name)          e.g. String, Object, com.example.Point
//!  └── Array(element)       e.g. int[], String[][]
//! ```
//!
//! Two descriptors are equal exactly when their full names are equal, so a
//! descriptor rebuilt from its name (see [`TypeResolver`]) is
//! interchangeable with the original.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::value::Value;

/// Primitive (non-reference) type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    /// Result type of methods returning nothing; never a storable value.
    Void,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 9] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Char,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
        PrimitiveKind::Void,
    ];

    /// Source-level keyword for this kind
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Void => "void",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        PrimitiveKind::ALL.into_iter().find(|k| k.name() == name)
    }
}

#[derive(Debug)]
enum TypeKind {
    Primitive(PrimitiveKind),
    Class,
    Array(TypeDescriptor),
}

#[derive(Debug)]
struct TypeData {
    name: String,
    kind: TypeKind,
}

/// Handle identifying one type of the subject API.
#[derive(Clone)]
pub struct TypeDescriptor(Arc<TypeData>);

pub const STRING_TYPE_NAME: &str = "String";
pub const OBJECT_TYPE_NAME: &str = "Object";

static BUILTIN_TYPES: Lazy<HashMap<&'static str, TypeDescriptor>> = Lazy::new(|| {
    let mut types = HashMap::new();
    for kind in PrimitiveKind::ALL {
        types.insert(
            kind.name(),
            TypeDescriptor(Arc::new(TypeData {
                name: kind.name().to_string(),
                kind: TypeKind::Primitive(kind),
            })),
        );
    }
    for name in [STRING_TYPE_NAME, OBJECT_TYPE_NAME] {
        types.insert(name, TypeDescriptor::class(name));
    }
    types
});

impl TypeDescriptor {
    /// Descriptor of a primitive kind (shared with the builtin table)
    pub fn primitive(kind: PrimitiveKind) -> Self {
        match BUILTIN_TYPES.get(kind.name()) {
            Some(ty) => ty.clone(),
            None => TypeDescriptor(Arc::new(TypeData {
                name: kind.name().to_string(),
                kind: TypeKind::Primitive(kind),
            })),
        }
    }

    /// Descriptor of a reference (class) type
    pub fn class(name: impl Into<String>) -> Self {
        TypeDescriptor(Arc::new(TypeData {
            name: name.into(),
            kind: TypeKind::Class,
        }))
    }

    /// One-dimensional array type over `element`
    pub fn array_of(element: &TypeDescriptor) -> Self {
        TypeDescriptor(Arc::new(TypeData {
            name: format!("{}[]", element.name()),
            kind: TypeKind::Array(element.clone()),
        }))
    }

    pub fn string() -> Self {
        BUILTIN_TYPES
            .get(STRING_TYPE_NAME)
            .cloned()
            .unwrap_or_else(|| TypeDescriptor::class(STRING_TYPE_NAME))
    }

    pub fn object() -> Self {
        BUILTIN_TYPES
            .get(OBJECT_TYPE_NAME)
            .cloned()
            .unwrap_or_else(|| TypeDescriptor::class(OBJECT_TYPE_NAME))
    }

    /// Fully-qualified name; resolvable again through a [`TypeResolver`].
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Name without its package qualifier (`com.example.Point` -> `Point`).
    pub fn simple_name(&self) -> String {
        match &self.0.kind {
            TypeKind::Array(element) => format!("{}[]", element.simple_name()),
            _ => match self.0.name.rfind('.') {
                Some(dot) => self.0.name[dot + 1..].to_string(),
                None => self.0.name.clone(),
            },
        }
    }

    /// Name as written in generated source
    pub fn canonical_name(&self) -> &str {
        &self.0.name
    }

    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self.0.kind {
            TypeKind::Primitive(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        self.primitive_kind().is_some()
    }

    pub fn is_void(&self) -> bool {
        self.primitive_kind() == Some(PrimitiveKind::Void)
    }

    pub fn is_array(&self) -> bool {
        matches!(self.0.kind, TypeKind::Array(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.0.kind, TypeKind::Class) && self.0.name == STRING_TYPE_NAME
    }

    /// Element type, if this is an array type
    pub fn element_type(&self) -> Option<&TypeDescriptor> {
        match &self.0.kind {
            TypeKind::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Check whether `value` may be stored in a slot of this type.
    ///
    /// Primitive slots take exactly their own kind; reference slots take
    /// `null`, and `Object` takes every value.
    pub fn accepts(&self, value: &Value) -> bool {
        match &self.0.kind {
            TypeKind::Primitive(kind) => matches!(
                (kind, value),
                (PrimitiveKind::Boolean, Value::Bool(_))
                    | (PrimitiveKind::Byte, Value::Byte(_))
                    | (PrimitiveKind::Char, Value::Char(_))
                    | (PrimitiveKind::Short, Value::Short(_))
                    | (PrimitiveKind::Int, Value::Int(_))
                    | (PrimitiveKind::Long, Value::Long(_))
                    | (PrimitiveKind::Float, Value::Float(_))
                    | (PrimitiveKind::Double, Value::Double(_))
            ),
            TypeKind::Class => match value {
                Value::Null => true,
                _ if self.0.name == OBJECT_TYPE_NAME => true,
                Value::Str(_) => self.is_string(),
                Value::Object(obj) => obj.class() == self,
                _ => false,
            },
            TypeKind::Array(element) => match value {
                Value::Null => true,
                Value::Array(arr) => arr.element_type() == element,
                _ => false,
            },
        }
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.name == other.0.name
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDescriptor({})", self.0.name)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

/// A type name that no registered type answers to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown type name '{name}'")]
pub struct UnknownTypeError {
    pub name: String,
}

/// Name-based type lookup.
pub trait TypeResolver {
    fn resolve(&self, name: &str) -> Result<TypeDescriptor, UnknownTypeError>;
}

/// Registry of the types known to a subject API.
///
/// Primitives, `String` and `Object` are always present. Array types are
/// never registered; they resolve from their element type (`T[]`).
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    classes: HashMap<String, TypeDescriptor>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class type, returning the existing descriptor if the name
    /// is already known.
    pub fn register_class(&mut self, name: &str) -> TypeDescriptor {
        if let Some(builtin) = BUILTIN_TYPES.get(name) {
            return builtin.clone();
        }
        self.classes
            .entry(name.to_string())
            .or_insert_with(|| TypeDescriptor::class(name))
            .clone()
    }

    pub fn get(&self, name: &str) -> Option<TypeDescriptor> {
        BUILTIN_TYPES
            .get(name)
            .or_else(|| self.classes.get(name))
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl TypeResolver for TypeRegistry {
    fn resolve(&self, name: &str) -> Result<TypeDescriptor, UnknownTypeError> {
        if let Some(inner) = name.strip_suffix("[]") {
            let element = self.resolve(inner).map_err(|_| UnknownTypeError {
                name: name.to_string(),
            })?;
            if element.is_void() {
                return Err(UnknownTypeError {
                    name: name.to_string(),
                });
            }
            return Ok(TypeDescriptor::array_of(&element));
        }
        self.get(name).ok_or_else(|| UnknownTypeError {
            name: name.to_string(),
        })
    }
}
