//! Runtime value model
//!
//! Values are what schemas are checked against. Scalars are owned;
//! `Object` and `Array` are shared handles so that a guarded view and
//! its caller observe the same data.
//!
//! Kinds:
//! - undefined (absence), null
//! - boolean, number, bigint, string, symbol
//! - date, function, map, set, bytes, typed arrays
//! - object, array (reference kinds)

mod json;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Shared handle to a keyed structure.
pub type ObjectRef = Rc<RefCell<BTreeMap<String, Value>>>;

/// Shared handle to a sequence.
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// A dynamically typed runtime value.
#[derive(Clone)]
pub enum Value {
    /// The absence value
    Undefined,
    /// Explicit null
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(String),
    Symbol(Symbol),
    Date(DateTime<Utc>),
    Function(Function),
    /// Ordered key/value pairs with arbitrary keys
    Map(Vec<(Value, Value)>),
    Set(Vec<Value>),
    /// Raw binary buffer
    Bytes(Vec<u8>),
    TypedArray(TypedArray),
    Object(ObjectRef),
    Array(ArrayRef),
}

impl Value {
    /// Builds a fresh object from key/value pairs.
    pub fn object<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let map = pairs.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Value::Object(Rc::new(RefCell::new(map)))
    }

    /// Builds a fresh array from items.
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Value::Array(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    /// Name of the observed kind, as used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Date(_) => "date",
            Value::Function(_) => "function",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
            Value::Bytes(_) => "bytes",
            Value::TypedArray(t) => t.kind().type_name(),
            Value::Object(_) => "object",
            Value::Array(_) => "array",
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for the reference kinds a guarded view can wrap.
    pub fn is_composite(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Array(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Reads a field by name.
    ///
    /// Missing keys and non-object values read as `Undefined`.
    pub fn field(&self, key: &str) -> Value {
        match self {
            Value::Object(obj) => obj.borrow().get(key).cloned().unwrap_or(Value::Undefined),
            _ => Value::Undefined,
        }
    }

    /// Reads an element by index. Out of range reads as `Undefined`.
    pub fn index(&self, index: usize) -> Value {
        match self {
            Value::Array(arr) => arr.borrow().get(index).cloned().unwrap_or(Value::Undefined),
            _ => Value::Undefined,
        }
    }

    /// Reference identity for objects and arrays.
    ///
    /// Always false for scalar values.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(&a.body, &b.body),
            _ => false,
        }
    }

    /// Address of the shared allocation, for identity-keyed tables.
    pub(crate) fn identity(&self) -> Option<usize> {
        match self {
            Value::Object(obj) => Some(Rc::as_ptr(obj) as *const () as usize),
            Value::Array(arr) => Some(Rc::as_ptr(arr) as *const () as usize),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    /// Structural equality for data, identity for functions.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Function(_), Value::Function(_)) => self.same(other),
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::TypedArray(a), Value::TypedArray(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::BigInt(n) => write!(f, "{}n", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Symbol(s) => write!(f, "{:?}", s),
            Value::Date(d) => write!(f, "Date({})", d.to_rfc3339()),
            Value::Function(func) => write!(f, "[function {}]", func.name()),
            Value::Map(entries) => f.debug_map().entries(entries.iter().map(|(k, v)| (k, v))).finish(),
            Value::Set(items) => f.debug_set().entries(items).finish(),
            Value::Bytes(b) => write!(f, "Bytes({} bytes)", b.len()),
            Value::TypedArray(t) => write!(f, "{}({})", t.kind().type_name(), t.len()),
            Value::Object(obj) => f.debug_map().entries(obj.borrow().iter()).finish(),
            Value::Array(arr) => f.debug_list().entries(arr.borrow().iter()).finish(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        Value::BigInt(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Value::Symbol(s)
    }
}

/// Opaque unique token.
///
/// Equality is by token, never by description.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    id: Uuid,
    description: Option<String>,
}

impl Symbol {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: Some(description.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            id: Uuid::new_v4(),
            description: None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description.as_deref().unwrap_or(""))
    }
}

/// A named callable value.
#[derive(Clone)]
pub struct Function {
    name: String,
    body: Rc<dyn Fn(&[Value]) -> Value>,
}

impl Function {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Self {
            name: name.into(),
            body: Rc::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.body)(args)
    }
}

/// Element kind of a typed numeric array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypedArrayKind {
    Int8,
    Uint8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
}

impl TypedArrayKind {
    pub const ALL: [TypedArrayKind; 9] = [
        TypedArrayKind::Int8,
        TypedArrayKind::Uint8,
        TypedArrayKind::Uint8Clamped,
        TypedArrayKind::Int16,
        TypedArrayKind::Uint16,
        TypedArrayKind::Int32,
        TypedArrayKind::Uint32,
        TypedArrayKind::Float32,
        TypedArrayKind::Float64,
    ];

    /// Catalogue tag and diagnostic name for this kind
    pub fn type_name(&self) -> &'static str {
        match self {
            TypedArrayKind::Int8 => "int8array",
            TypedArrayKind::Uint8 => "uint8array",
            TypedArrayKind::Uint8Clamped => "uint8clampedarray",
            TypedArrayKind::Int16 => "int16array",
            TypedArrayKind::Uint16 => "uint16array",
            TypedArrayKind::Int32 => "int32array",
            TypedArrayKind::Uint32 => "uint32array",
            TypedArrayKind::Float32 => "float32array",
            TypedArrayKind::Float64 => "float64array",
        }
    }
}

/// Typed numeric array storage.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedArray {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    Uint8Clamped(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl TypedArray {
    pub fn kind(&self) -> TypedArrayKind {
        match self {
            TypedArray::Int8(_) => TypedArrayKind::Int8,
            TypedArray::Uint8(_) => TypedArrayKind::Uint8,
            TypedArray::Uint8Clamped(_) => TypedArrayKind::Uint8Clamped,
            TypedArray::Int16(_) => TypedArrayKind::Int16,
            TypedArray::Uint16(_) => TypedArrayKind::Uint16,
            TypedArray::Int32(_) => TypedArrayKind::Int32,
            TypedArray::Uint32(_) => TypedArrayKind::Uint32,
            TypedArray::Float32(_) => TypedArrayKind::Float32,
            TypedArray::Float64(_) => TypedArrayKind::Float64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TypedArray::Int8(v) => v.len(),
            TypedArray::Uint8(v) | TypedArray::Uint8Clamped(v) => v.len(),
            TypedArray::Int16(v) => v.len(),
            TypedArray::Uint16(v) => v.len(),
            TypedArray::Int32(v) => v.len(),
            TypedArray::Uint32(v) => v.len(),
            TypedArray::Float32(v) => v.len(),
            TypedArray::Float64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Undefined.kind_name(), "undefined");
        assert_eq!(Value::Null.kind_name(), "null");
        assert_eq!(Value::from(1).kind_name(), "number");
        assert_eq!(Value::from(1i128).kind_name(), "bigint");
        assert_eq!(Value::from("x").kind_name(), "string");
        assert_eq!(Value::array([]).kind_name(), "array");
        assert_eq!(Value::object(Vec::<(String, Value)>::new()).kind_name(), "object");
        assert_eq!(Value::TypedArray(TypedArray::Float32(vec![1.0])).kind_name(), "float32array");
    }

    #[test]
    fn test_missing_field_reads_undefined() {
        let v = Value::object([("a", Value::from(1))]);
        assert!(v.field("b").is_undefined());
        assert_eq!(v.field("a"), Value::from(1));
        assert!(Value::from(3).field("a").is_undefined());
    }

    #[test]
    fn test_clone_shares_object() {
        let v = Value::object([("a", Value::from(1))]);
        let alias = v.clone();
        assert!(v.same(&alias));

        if let Value::Object(obj) = &alias {
            obj.borrow_mut().insert("a".into(), Value::from(2));
        }
        assert_eq!(v.field("a"), Value::from(2));
    }

    #[test]
    fn test_structural_equality_is_not_identity() {
        let a = Value::array([Value::from(1)]);
        let b = Value::array([Value::from(1)]);
        assert_eq!(a, b);
        assert!(!a.same(&b));
    }

    #[test]
    fn test_symbols_are_unique() {
        let a = Symbol::new("tag");
        let b = Symbol::new("tag");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(a.description(), Some("tag"));
    }

    #[test]
    fn test_function_call() {
        let double = Function::new("double", |args: &[Value]| {
            Value::from(args.first().and_then(Value::as_f64).unwrap_or(0.0) * 2.0)
        });
        assert_eq!(double.name(), "double");
        assert_eq!(double.call(&[Value::from(21)]), Value::from(42));
    }
}
