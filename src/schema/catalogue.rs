//! Type catalogue for tag schemas
//!
//! Maps a tag name to a predicate over runtime values. The built-in set
//! covers the primitive kinds plus the composite kinds of the value
//! model. Hosts may register further tags; unregistered tags never match.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use super::types::tags;
use crate::value::{TypedArrayKind, Value};

/// Predicate deciding whether a value belongs to a tag
pub type TagPredicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Closed, extensible mapping from tag name to kind predicate
#[derive(Clone, Default)]
pub struct TypeCatalogue {
    entries: HashMap<String, TagPredicate>,
}

impl TypeCatalogue {
    /// Creates a catalogue with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a catalogue with the built-in tags.
    pub fn builtin() -> Self {
        let mut catalogue = Self::empty();

        catalogue.register(tags::STRING, |v| matches!(v, Value::String(_)));
        catalogue.register(tags::NUMBER, |v| matches!(v, Value::Number(_)));
        catalogue.register(tags::BOOLEAN, |v| matches!(v, Value::Bool(_)));
        catalogue.register(tags::BIGINT, |v| matches!(v, Value::BigInt(_)));
        catalogue.register(tags::SYMBOL, |v| matches!(v, Value::Symbol(_)));
        catalogue.register(tags::DATE, |v| matches!(v, Value::Date(_)));
        catalogue.register(tags::FUNCTION, |v| matches!(v, Value::Function(_)));
        catalogue.register(tags::MAP, |v| matches!(v, Value::Map(_)));
        catalogue.register(tags::SET, |v| matches!(v, Value::Set(_)));
        catalogue.register(tags::BYTES, |v| matches!(v, Value::Bytes(_)));
        // Every non-null composite, sequences included.
        catalogue.register(tags::OBJECT, |v| {
            matches!(
                v,
                Value::Object(_)
                    | Value::Array(_)
                    | Value::Date(_)
                    | Value::Map(_)
                    | Value::Set(_)
                    | Value::Bytes(_)
                    | Value::TypedArray(_)
            )
        });

        for kind in TypedArrayKind::ALL {
            catalogue.register(kind.type_name(), move |v| {
                matches!(v, Value::TypedArray(t) if t.kind() == kind)
            });
        }

        catalogue
    }

    /// Process-wide built-in catalogue.
    pub fn shared() -> Arc<TypeCatalogue> {
        static SHARED: OnceLock<Arc<TypeCatalogue>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(TypeCatalogue::builtin()))
            .clone()
    }

    /// Registers a tag, replacing any existing entry of the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F)
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.entries.insert(name.into(), Arc::new(predicate));
    }

    /// Returns `None` when the tag is not registered.
    pub fn accepts(&self, name: &str, value: &Value) -> Option<bool> {
        self.entries.get(name).map(|predicate| predicate(value))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered tag names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for TypeCatalogue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeCatalogue")
            .field("tags", &self.names())
            .finish()
    }
}
