//! Schema type definitions
//!
//! A schema is a finite tree built from:
//! - absence / null markers
//! - catalogue tags (`string`, `number`, `date`, ...)
//! - literal primitives, which act as kind markers
//! - homogeneous sequences and structural mappings
//! - modifiers (nullable, optional), unions and sentinels
//!
//! There is no compile step and no well-formedness check: a malformed
//! schema (e.g. an empty union) simply fails at match time.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::Value;

/// Built-in catalogue tag names.
pub mod tags {
    pub const STRING: &str = "string";
    pub const NUMBER: &str = "number";
    pub const BOOLEAN: &str = "boolean";
    pub const BIGINT: &str = "bigint";
    pub const SYMBOL: &str = "symbol";
    pub const DATE: &str = "date";
    pub const OBJECT: &str = "object";
    pub const FUNCTION: &str = "function";
    pub const MAP: &str = "map";
    pub const SET: &str = "set";
    pub const BYTES: &str = "bytes";
}

/// Declarative description of an expected value shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Schema {
    /// Only the absence value matches
    Undefined,
    /// Only explicit null matches
    Null,
    /// Kind check through the type catalogue
    Tag { name: String },
    /// Primitive literal; matches by kind, not by value
    Literal { value: Literal },
    /// Homogeneous sequence
    Array { items: Box<Schema> },
    /// Structural mapping; undeclared keys on the value are ignored
    Object { fields: Fields },
    /// Null or `inner`; absence is rejected
    Nullable { inner: Box<Schema> },
    /// Absence or `inner`
    Optional { inner: Box<Schema> },
    /// First matching branch wins
    Union {
        #[serde(rename = "anyOf")]
        any_of: Vec<Schema>,
    },
    Any,
    Unknown,
    Never,
}

impl Schema {
    pub fn tag(name: impl Into<String>) -> Self {
        Schema::Tag { name: name.into() }
    }

    pub fn string() -> Self {
        Self::tag(tags::STRING)
    }

    pub fn number() -> Self {
        Self::tag(tags::NUMBER)
    }

    pub fn boolean() -> Self {
        Self::tag(tags::BOOLEAN)
    }

    pub fn bigint() -> Self {
        Self::tag(tags::BIGINT)
    }

    pub fn symbol() -> Self {
        Self::tag(tags::SYMBOL)
    }

    pub fn date() -> Self {
        Self::tag(tags::DATE)
    }

    /// The generic `object` catalogue tag (any non-null composite).
    pub fn object_tag() -> Self {
        Self::tag(tags::OBJECT)
    }

    pub fn function() -> Self {
        Self::tag(tags::FUNCTION)
    }

    pub fn map() -> Self {
        Self::tag(tags::MAP)
    }

    pub fn set() -> Self {
        Self::tag(tags::SET)
    }

    pub fn bytes() -> Self {
        Self::tag(tags::BYTES)
    }

    pub fn literal(value: impl Into<Literal>) -> Self {
        Schema::Literal {
            value: value.into(),
        }
    }

    pub fn array_of(items: Schema) -> Self {
        Schema::Array {
            items: Box::new(items),
        }
    }

    /// Structural schema; field order is kept for diagnostics.
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Schema)>,
    {
        Schema::Object {
            fields: fields.into_iter().collect(),
        }
    }

    pub fn nullable(inner: Schema) -> Self {
        Schema::Nullable {
            inner: Box::new(inner),
        }
    }

    pub fn optional(inner: Schema) -> Self {
        Schema::Optional {
            inner: Box::new(inner),
        }
    }

    pub fn union<I>(branches: I) -> Self
    where
        I: IntoIterator<Item = Schema>,
    {
        Schema::Union {
            any_of: branches.into_iter().collect(),
        }
    }

    /// Human-readable expected shape, used in failure messages.
    pub fn describe(&self) -> String {
        match self {
            Schema::Undefined => "undefined".to_string(),
            Schema::Null => "null".to_string(),
            Schema::Tag { name } => name.clone(),
            Schema::Literal { value } => value.kind_name().to_string(),
            Schema::Array { items } => format!("array<{}>", items.describe()),
            Schema::Object { .. } => "object".to_string(),
            Schema::Nullable { inner } => format!("nullable<{}>", inner.describe()),
            Schema::Optional { inner } => format!("optional<{}>", inner.describe()),
            Schema::Union { any_of } if any_of.is_empty() => "union<>".to_string(),
            Schema::Union { any_of } => any_of
                .iter()
                .map(Schema::describe)
                .collect::<Vec<_>>()
                .join(", "),
            Schema::Any => "any".to_string(),
            Schema::Unknown => "unknown".to_string(),
            Schema::Never => "never".to_string(),
        }
    }

    /// Schema governing a named field of a value shaped by `self`.
    ///
    /// Modifiers are looked through. Undeclared keys yield `Undefined`,
    /// so only absence may be stored under them.
    pub fn field_schema(&self, key: &str) -> Schema {
        match self {
            Schema::Object { fields } => fields.get(key).cloned().unwrap_or(Schema::Undefined),
            Schema::Nullable { inner } | Schema::Optional { inner } => inner.field_schema(key),
            Schema::Union { any_of } => {
                Schema::union(any_of.iter().map(|branch| branch.field_schema(key)))
            }
            Schema::Any | Schema::Unknown => Schema::Any,
            _ => Schema::Undefined,
        }
    }

    /// Schema governing any index of a sequence shaped by `self`.
    pub fn element_schema(&self) -> Schema {
        match self {
            Schema::Array { items } => (**items).clone(),
            Schema::Nullable { inner } | Schema::Optional { inner } => inner.element_schema(),
            Schema::Union { any_of } => Schema::union(any_of.iter().map(Schema::element_schema)),
            Schema::Any | Schema::Unknown => Schema::Any,
            _ => Schema::Undefined,
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// A primitive literal used in place of a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "example", rename_all = "lowercase")]
pub enum Literal {
    String(String),
    Number(f64),
    Boolean(bool),
    BigInt(i128),
}

impl Literal {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Literal::String(_) => "string",
            Literal::Number(_) => "number",
            Literal::Boolean(_) => "boolean",
            Literal::BigInt(_) => "bigint",
        }
    }

    /// Kind equality with a runtime value.
    pub fn same_kind(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Literal::String(_), Value::String(_))
                | (Literal::Number(_), Value::Number(_))
                | (Literal::Boolean(_), Value::Bool(_))
                | (Literal::BigInt(_), Value::BigInt(_))
        )
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Number(n)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::Number(n as f64)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Boolean(b)
    }
}

impl From<i128> for Literal {
    fn from(n: i128) -> Self {
        Literal::BigInt(n)
    }
}

/// Declared fields of a structural schema, in declaration order.
///
/// Serialized as a JSON object; a repeated key replaces the earlier
/// subschema but keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<(String, Schema)>);

impl Fields {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, schema: Schema) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = schema,
            None => self.0.push((key, schema)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Schema> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.0.iter().map(|(k, s)| (k.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Schema)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, Schema)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (key, schema) in iter {
            fields.insert(key, schema);
        }
        fields
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, schema) in &self.0 {
            map.serialize_entry(key, schema)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Fields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = Fields;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a map of field name to schema")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Fields, A::Error> {
                let mut fields = Fields::new();
                while let Some((key, schema)) = access.next_entry::<String, Schema>()? {
                    fields.insert(key, schema);
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person() -> Schema {
        Schema::object([
            ("name", Schema::string()),
            ("age", Schema::number()),
            ("tags", Schema::array_of(Schema::string())),
        ])
    }

    #[test]
    fn test_describe() {
        assert_eq!(Schema::number().describe(), "number");
        assert_eq!(Schema::array_of(Schema::string()).describe(), "array<string>");
        assert_eq!(
            Schema::union([Schema::number(), Schema::string()]).describe(),
            "number, string"
        );
        assert_eq!(Schema::nullable(Schema::date()).describe(), "nullable<date>");
        assert_eq!(Schema::literal(3).describe(), "number");
        assert_eq!(Schema::union([]).describe(), "union<>");
    }

    #[test]
    fn test_fields_keep_declaration_order() {
        let Schema::Object { fields } = person() else {
            panic!("expected object schema");
        };
        let keys: Vec<_> = fields.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name", "age", "tags"]);
    }

    #[test]
    fn test_repeated_field_replaces_in_place() {
        let fields: Fields = vec![
            ("a", Schema::string()),
            ("b", Schema::number()),
            ("a", Schema::boolean()),
        ]
        .into_iter()
        .collect();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("a"), Some(&Schema::boolean()));
        assert_eq!(fields.iter().next().map(|(k, _)| k), Some("a"));
    }

    #[test]
    fn test_field_schema_lookup() {
        let schema = Schema::optional(person());
        assert_eq!(schema.field_schema("age"), Schema::number());
        assert_eq!(schema.field_schema("nickname"), Schema::Undefined);
        assert_eq!(Schema::Any.field_schema("x"), Schema::Any);
        assert_eq!(
            schema.field_schema("tags").element_schema(),
            Schema::string()
        );
        assert_eq!(Schema::number().element_schema(), Schema::Undefined);
    }

    #[test]
    fn test_serde_round_trip_preserves_shape() {
        let schema = Schema::object([
            ("id", Schema::string()),
            ("score", Schema::nullable(Schema::number())),
            ("kind", Schema::union([Schema::literal("a"), Schema::Null])),
            ("rest", Schema::optional(Schema::Any)),
        ]);
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["type"], "object");
        assert_eq!(json["fields"]["score"]["type"], "nullable");
        assert_eq!(json["fields"]["kind"]["anyOf"][1]["type"], "null");
        let keys: Vec<&str> = json["fields"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["id", "score", "kind", "rest"]);

        let back: Schema = serde_json::from_value(json).unwrap();
        assert_eq!(back, schema);
    }

    #[test]
    fn test_deserialize_from_document() {
        let schema: Schema = serde_json::from_value(json!({
            "type": "object",
            "fields": {
                "loc": {
                    "type": "object",
                    "fields": {
                        "lat": {"type": "tag", "name": "number"},
                        "lng": {"type": "tag", "name": "number"}
                    }
                },
                "labels": {"type": "array", "items": {"type": "tag", "name": "string"}}
            }
        }))
        .unwrap();

        assert_eq!(schema.field_schema("loc").field_schema("lat"), Schema::number());
        assert_eq!(
            schema.field_schema("labels"),
            Schema::array_of(Schema::string())
        );
    }
}
