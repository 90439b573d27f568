//! Conversion between runtime values and JSON documents

use serde_json::{Map, Number, Value as Json};

use super::{TypedArray, Value};

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::array(items.into_iter().map(Value::from)),
            Json::Object(map) => Value::object(map.into_iter().map(|(k, v)| (k, Value::from(v)))),
        }
    }
}

impl Value {
    /// Renders the value as JSON.
    ///
    /// Lossy: undefined, functions and symbols are dropped from objects
    /// and become `null` inside arrays; dates render as RFC 3339 strings;
    /// bigints as decimal strings; non-finite numbers as `null`.
    pub fn to_json(&self) -> Json {
        self.to_json_slot().unwrap_or(Json::Null)
    }

    /// `None` means "not representable", which callers either drop or null out.
    fn to_json_slot(&self) -> Option<Json> {
        let json = match self {
            Value::Undefined | Value::Function(_) | Value::Symbol(_) => return None,
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => Number::from_f64(*n).map(Json::Number).unwrap_or(Json::Null),
            Value::BigInt(n) => Json::String(n.to_string()),
            Value::String(s) => Json::String(s.clone()),
            Value::Date(d) => Json::String(d.to_rfc3339()),
            Value::Map(_) | Value::Set(_) => Json::Object(Map::new()),
            Value::Bytes(bytes) => Json::Array(bytes.iter().map(|b| Json::from(*b)).collect()),
            Value::TypedArray(t) => typed_array_json(t),
            Value::Array(arr) => Json::Array(arr.borrow().iter().map(Value::to_json).collect()),
            Value::Object(obj) => Json::Object(
                obj.borrow()
                    .iter()
                    .filter_map(|(k, v)| v.to_json_slot().map(|j| (k.clone(), j)))
                    .collect(),
            ),
        };
        Some(json)
    }
}

fn typed_array_json(array: &TypedArray) -> Json {
    fn numbers<T: Copy + Into<f64>>(items: &[T]) -> Json {
        Json::Array(
            items
                .iter()
                .map(|n| Number::from_f64((*n).into()).map(Json::Number).unwrap_or(Json::Null))
                .collect(),
        )
    }

    match array {
        TypedArray::Int8(v) => numbers(v),
        TypedArray::Uint8(v) | TypedArray::Uint8Clamped(v) => numbers(v),
        TypedArray::Int16(v) => numbers(v),
        TypedArray::Uint16(v) => numbers(v),
        TypedArray::Int32(v) => numbers(v),
        TypedArray::Uint32(v) => numbers(v),
        TypedArray::Float32(v) => numbers(v),
        TypedArray::Float64(v) => numbers(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Function, Symbol};
    use serde_json::json;

    #[test]
    fn test_from_json_builds_shared_structures() {
        let v = Value::from(json!({"name": "Ann", "tags": ["x", "y"], "age": 30}));
        assert_eq!(v.kind_name(), "object");
        assert_eq!(v.field("name"), Value::from("Ann"));
        assert_eq!(v.field("age"), Value::from(30));
        assert_eq!(v.field("tags").kind_name(), "array");
        assert_eq!(v.field("tags").index(1), Value::from("y"));
    }

    #[test]
    fn test_to_json_drops_unrepresentable_fields() {
        let v = Value::object([
            ("a", Value::from(1)),
            ("gone", Value::Undefined),
            ("f", Value::Function(Function::new("f", |_: &[Value]| Value::Undefined))),
            ("s", Value::Symbol(Symbol::anonymous())),
            ("list", Value::array([Value::Undefined, Value::from(true)])),
            ("big", Value::BigInt(12)),
        ]);
        assert_eq!(
            v.to_json(),
            json!({"a": 1.0, "list": [null, true], "big": "12"})
        );
    }

    #[test]
    fn test_non_finite_number_is_null() {
        assert_eq!(Value::Number(f64::NAN).to_json(), Json::Null);
    }
}
