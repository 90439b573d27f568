//! Records built from defaults
//!
//! - `merge_defaults`: plain structural merge, no validation
//! - `RecordFactory`: merge, validate, then hand out a guarded view

use std::rc::Rc;

use tracing::warn;

use crate::guard::{GuardError, GuardOptions, GuardedView};
use crate::schema::{Schema, ValidationError};
use crate::value::Value;

/// Shallow merge of `data`'s own keys over a fresh copy of `defaults`.
///
/// Either side that is not an object contributes nothing. Nested values
/// are shared, not copied.
pub fn merge_defaults(defaults: &Value, data: &Value) -> Value {
    let mut merged = Vec::new();
    for source in [defaults, data] {
        if let Value::Object(obj) = source {
            merged.extend(obj.borrow().iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }
    Value::object(merged)
}

/// Errors raised while constructing a record
#[derive(Debug, Clone, thiserror::Error)]
pub enum RecordError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Guard(#[from] GuardError),
}

/// Constructs schema-guarded records.
#[derive(Debug, Clone)]
pub struct RecordFactory {
    schema: Schema,
    defaults: Value,
    options: GuardOptions,
}

impl RecordFactory {
    /// Creates a factory with no defaults.
    pub fn new(schema: Schema, options: GuardOptions) -> Self {
        Self {
            schema,
            defaults: Value::Undefined,
            options,
        }
    }

    /// Sets default field values merged under every input.
    pub fn with_defaults(mut self, defaults: Value) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Builds a record from `data`.
    ///
    /// Strict factories refuse invalid input. Quiet factories log the
    /// failure and still return the view; later writes stay guarded.
    ///
    /// # Errors
    ///
    /// - `RecordError::Invalid` for invalid input in strict mode
    pub fn build(&self, data: &Value) -> Result<Rc<GuardedView>, RecordError> {
        let record = merge_defaults(&self.defaults, data);

        if let Err(err) = self.options.matcher().check(&self.schema, &record) {
            if !self.options.quiet {
                return Err(err.into());
            }
            warn!(
                event = "RECORD_INPUT_INVALID",
                code = err.code(),
                path = err.path(),
                reason = %err,
                "building record from invalid input"
            );
        }

        Ok(GuardedView::wrap(self.schema.clone(), &record, self.options.clone())?)
    }
}
