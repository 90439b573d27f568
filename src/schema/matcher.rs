//! Recursive schema matcher
//!
//! Walks a schema and a value in lock-step. Matching semantics:
//! - `undefined` accepts only absence
//! - `null` accepts only explicit null
//! - tags defer to the type catalogue; unknown tags never match
//! - sequences must hold only elements matching the element schema;
//!   an empty sequence matches without looking at the element schema
//! - nullable rejects absence, accepts null, else recurses
//! - optional accepts absence, else recurses
//! - unions try branches in order and stop at the first match
//! - `any`/`unknown` always match, `never` never does
//! - structures check every declared key; missing keys read as absence
//! - literals match by kind, not by value
//!
//! The matcher is pure. It never logs and never mutates the value.

use std::sync::Arc;

use super::catalogue::TypeCatalogue;
use super::errors::{ValidationError, ValidationResult};
use super::types::Schema;
use crate::value::Value;

/// Schema matcher bound to a type catalogue.
#[derive(Debug, Clone)]
pub struct Matcher {
    catalogue: Arc<TypeCatalogue>,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(TypeCatalogue::shared())
    }
}

impl Matcher {
    /// Creates a matcher resolving tags through `catalogue`.
    pub fn new(catalogue: Arc<TypeCatalogue>) -> Self {
        Self { catalogue }
    }

    pub fn catalogue(&self) -> &TypeCatalogue {
        &self.catalogue
    }

    /// Checks `value` against `schema`.
    ///
    /// # Errors
    ///
    /// Returns the first failure met in document order.
    pub fn check(&self, schema: &Schema, value: &Value) -> ValidationResult<()> {
        match schema {
            Schema::Undefined => {
                if !value.is_undefined() {
                    return Err(ValidationError::absence("undefined", value.kind_name()));
                }
            }
            Schema::Null => {
                if !value.is_null() {
                    return Err(ValidationError::kind_mismatch("null", value.kind_name()));
                }
            }
            Schema::Tag { name } => {
                if self.catalogue.accepts(name, value) != Some(true) {
                    return Err(ValidationError::kind_mismatch(name.as_str(), value.kind_name()));
                }
            }
            Schema::Literal { value: literal } => {
                if !literal.same_kind(value) {
                    return Err(ValidationError::kind_mismatch(
                        literal.kind_name(),
                        value.kind_name(),
                    ));
                }
            }
            Schema::Array { items } => self.check_sequence(schema, items, value)?,
            Schema::Nullable { inner } => {
                if value.is_undefined() {
                    return Err(ValidationError::absence(inner.describe(), "undefined"));
                }
                if !value.is_null() {
                    self.check(inner, value)?;
                }
            }
            Schema::Optional { inner } => {
                if !value.is_undefined() {
                    self.check(inner, value)?;
                }
            }
            Schema::Union { any_of } => {
                if !any_of.iter().any(|branch| self.check(branch, value).is_ok()) {
                    return Err(ValidationError::union_exhausted(
                        schema.describe(),
                        value.kind_name(),
                    ));
                }
            }
            Schema::Any | Schema::Unknown => {}
            Schema::Never => return Err(ValidationError::never(value.kind_name())),
            Schema::Object { fields } => {
                if value.is_undefined() || value.is_null() {
                    return Err(ValidationError::shape(schema.describe(), value.kind_name()));
                }
                for (key, field_schema) in fields.iter() {
                    // Undefined for missing keys and for non-keyed values.
                    let field = value.field(key);
                    self.check(field_schema, &field)
                        .map_err(|e| e.in_field(key))?;
                }
            }
        }

        Ok(())
    }

    /// Boolean form of [`Matcher::check`].
    pub fn matches(&self, schema: &Schema, value: &Value) -> bool {
        self.check(schema, value).is_ok()
    }

    fn check_sequence(&self, schema: &Schema, items: &Schema, value: &Value) -> ValidationResult<()> {
        let Value::Array(arr) = value else {
            return Err(ValidationError::shape(schema.describe(), value.kind_name()));
        };

        for (i, element) in arr.borrow().iter().enumerate() {
            self.check(items, element).map_err(|e| e.in_index(i))?;
        }

        Ok(())
    }
}
