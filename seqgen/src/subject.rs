//! The API under test.
//!
//! Sequences only ever call code registered here: a [`TypeRegistry`] of the
//! subject's types plus the constructors and methods, each backed by a Rust
//! closure. Operation text for constructors and methods is resolved against
//! this registry.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use seqgen_runtime::{Thrown, TypeDescriptor, TypeRegistry, TypeResolver, UnknownTypeError, Value};

use crate::operation::{ConstructorCall, MethodCall};

/// Name used for constructors in signatures and operation text
pub const CONSTRUCTOR_NAME: &str = "<init>";

type CallableFn = dyn Fn(&[Value]) -> Result<Value, Thrown> + Send + Sync;

/// Subject code behind a constructor or method.
///
/// Receives the statement inputs in order (receiver first for instance
/// methods). Returning `Err` models the subject code throwing.
#[derive(Clone)]
pub struct Callable(Arc<CallableFn>);

impl Callable {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Thrown> + Send + Sync + 'static,
    {
        Callable(Arc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, Thrown> {
        (self.0)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({:p})", Arc::as_ptr(&self.0))
    }
}

/// Identity of a constructor or method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberSignature {
    pub declaring: TypeDescriptor,
    pub name: String,
    pub params: Vec<TypeDescriptor>,
    pub returns: TypeDescriptor,
    pub is_static: bool,
}

impl MemberSignature {
    pub fn constructor(declaring: &TypeDescriptor, params: Vec<TypeDescriptor>) -> Self {
        Self {
            declaring: declaring.clone(),
            name: CONSTRUCTOR_NAME.to_string(),
            params,
            returns: declaring.clone(),
            is_static: true,
        }
    }

    pub fn instance_method(
        declaring: &TypeDescriptor,
        name: &str,
        params: Vec<TypeDescriptor>,
        returns: TypeDescriptor,
    ) -> Self {
        Self {
            declaring: declaring.clone(),
            name: name.to_string(),
            params,
            returns,
            is_static: false,
        }
    }

    pub fn static_method(
        declaring: &TypeDescriptor,
        name: &str,
        params: Vec<TypeDescriptor>,
        returns: TypeDescriptor,
    ) -> Self {
        Self {
            is_static: true,
            ..Self::instance_method(declaring, name, params, returns)
        }
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }

    /// Statement inputs: the receiver (instance methods only), then params.
    pub fn input_types(&self) -> Vec<TypeDescriptor> {
        let receiver = (!self.is_static).then(|| self.declaring.clone());
        receiver.into_iter().chain(self.params.iter().cloned()).collect()
    }

    /// `Declaring.name(T1,T2)`
    pub fn canonical_text(&self) -> String {
        let params: Vec<&str> = self.params.iter().map(|p| p.name()).collect();
        format!("{}.{}({})", self.declaring.name(), self.name, params.join(","))
    }
}

impl fmt::Display for MemberSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_text())
    }
}

/// Registry of the subject's types and callable members.
#[derive(Debug, Clone, Default)]
pub struct SubjectApi {
    types: TypeRegistry,
    constructors: BTreeMap<String, ConstructorCall>,
    methods: BTreeMap<String, MethodCall>,
}

impl SubjectApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn register_class(&mut self, name: &str) -> TypeDescriptor {
        self.types.register_class(name)
    }

    /// Register a constructor of `class`, replacing any with the same
    /// parameter types.
    pub fn add_constructor<F>(
        &mut self,
        class: &TypeDescriptor,
        params: Vec<TypeDescriptor>,
        f: F,
    ) -> ConstructorCall
    where
        F: Fn(&[Value]) -> Result<Value, Thrown> + Send + Sync + 'static,
    {
        let call = ConstructorCall::new(MemberSignature::constructor(class, params), Callable::new(f));
        self.constructors
            .insert(call.signature().canonical_text(), call.clone());
        call
    }

    /// Register a method, replacing any with the same signature text.
    pub fn add_method<F>(&mut self, signature: MemberSignature, f: F) -> MethodCall
    where
        F: Fn(&[Value]) -> Result<Value, Thrown> + Send + Sync + 'static,
    {
        let call = MethodCall::new(signature, Callable::new(f));
        self.methods
            .insert(call.signature().canonical_text(), call.clone());
        call
    }

    /// Constructor registered under `Class.<init>(T1,T2)`
    pub fn constructor(&self, canonical: &str) -> Option<&ConstructorCall> {
        self.constructors.get(canonical)
    }

    /// Method registered under `Class.name(T1,T2)`
    pub fn method(&self, canonical: &str) -> Option<&MethodCall> {
        self.methods.get(canonical)
    }

    pub fn constructors(&self) -> impl Iterator<Item = &ConstructorCall> {
        self.constructors.values()
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodCall> {
        self.methods.values()
    }
}

impl TypeResolver for SubjectApi {
    fn resolve(&self, name: &str) -> Result<TypeDescriptor, UnknownTypeError> {
        self.types.resolve(name)
    }
}
