//! Outcome adapters over the matcher
//!
//! - `validate`: strict, returns the first failure as an error
//! - `safe_validate`: collapses any failure to `None`
//!
//! Both hand back the caller's own value on success, never a copy.

use super::errors::ValidationResult;
use super::matcher::Matcher;
use super::types::Schema;
use crate::value::Value;

/// Strict validation with the built-in catalogue.
///
/// # Errors
///
/// Returns a [`ValidationError`](super::ValidationError) describing the
/// first mismatch in document order.
pub fn validate<'v>(schema: &Schema, value: &'v Value) -> ValidationResult<&'v Value> {
    Matcher::default().validate(schema, value)
}

/// Non-raising validation with the built-in catalogue.
pub fn safe_validate<'v>(schema: &Schema, value: &'v Value) -> Option<&'v Value> {
    Matcher::default().safe_validate(schema, value)
}

impl Matcher {
    /// Strict adapter: `Ok(value)` on success.
    pub fn validate<'v>(&self, schema: &Schema, value: &'v Value) -> ValidationResult<&'v Value> {
        self.check(schema, value)?;
        Ok(value)
    }

    /// Safe adapter: `Some(value)` on success, `None` on any failure.
    pub fn safe_validate<'v>(&self, schema: &Schema, value: &'v Value) -> Option<&'v Value> {
        self.check(schema, value).ok().map(|_| value)
    }
}
