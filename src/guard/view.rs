//! Guarded view over a shared object or array
//!
//! Reads:
//! - object/array fields come back as nested views, cached per session
//! - everything else comes back as the raw value
//!
//! Writes:
//! - validated against the field's schema before touching the data
//! - rejected writes leave the data unchanged and either fail
//!   (strict) or report `Ignored` (quiet)

use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use super::errors::{FieldKey, GuardError, GuardResult};
use super::options::GuardOptions;
use super::session::ViewSession;
use crate::schema::Schema;
use crate::value::Value;

/// Result of a field read through a view.
#[derive(Debug, Clone)]
pub enum Field {
    /// The field holds an object or array
    View(Rc<GuardedView>),
    /// The field holds anything else (including absence)
    Value(Value),
}

impl Field {
    pub fn as_view(&self) -> Option<&Rc<GuardedView>> {
        match self {
            Field::View(view) => Some(view),
            Field::Value(_) => None,
        }
    }

    /// The raw value; for views, the shared handle they wrap.
    pub fn into_value(self) -> Value {
        match self {
            Field::View(view) => view.value().clone(),
            Field::Value(value) => value,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Field::Value(value) => value.as_f64(),
            Field::View(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::Value(value) => value.as_str(),
            Field::View(_) => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Field::Value(Value::Undefined))
    }
}

/// Outcome of an accepted write call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The value was stored
    Committed,
    /// The value failed validation and was dropped (quiet mode)
    Ignored,
}

/// A live, schema-enforcing façade over a shared object or array.
pub struct GuardedView {
    target: Value,
    schema: Schema,
    session: Rc<ViewSession>,
}

impl GuardedView {
    /// Wraps `value` against `schema`, starting a fresh session.
    ///
    /// The value is not validated up front; only later writes are.
    ///
    /// # Errors
    ///
    /// Returns `GuardError::NotComposite` unless `value` is an object or array.
    pub fn wrap(schema: Schema, value: &Value, options: GuardOptions) -> GuardResult<Rc<Self>> {
        if !value.is_composite() {
            return Err(GuardError::NotComposite(value.kind_name()));
        }

        debug!(
            event = "GUARD_WRAP",
            kind = value.kind_name(),
            schema = %schema,
            quiet = options.quiet,
            "wrapping value"
        );

        let session = Rc::new(ViewSession::new(options.quiet, options.matcher()));
        Ok(Rc::new(Self {
            target: value.clone(),
            schema,
            session,
        }))
    }

    /// Schema in scope at this nesting level.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The wrapped handle (same allocation as the caller's value).
    pub fn value(&self) -> &Value {
        &self.target
    }

    pub fn is_quiet(&self) -> bool {
        self.session.is_quiet()
    }

    pub fn len(&self) -> usize {
        match &self.target {
            Value::Object(obj) => obj.borrow().len(),
            Value::Array(arr) => arr.borrow().len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys present on the underlying data.
    pub fn keys(&self) -> Vec<FieldKey> {
        match &self.target {
            Value::Object(obj) => obj.borrow().keys().cloned().map(FieldKey::Name).collect(),
            Value::Array(arr) => (0..arr.borrow().len()).map(FieldKey::Index).collect(),
            _ => Vec::new(),
        }
    }

    /// Number of nested views alive in this view's session.
    pub fn live_views(&self) -> usize {
        self.session.live_views()
    }

    /// Reads a field.
    ///
    /// Keys that do not address anything read as `undefined`.
    pub fn get(&self, key: impl Into<FieldKey>) -> Field {
        let key = key.into();
        let raw = self.read_raw(&key);

        if !raw.is_composite() {
            return Field::Value(raw);
        }

        if let Some(view) = self.session.lookup(&raw) {
            trace!(event = "GUARD_VIEW_CACHED", field = %key, "reusing nested view");
            return Field::View(view);
        }

        let view = Rc::new(Self {
            schema: self.schema_for(&key),
            target: raw,
            session: Rc::clone(&self.session),
        });
        self.session.remember(&view);
        trace!(event = "GUARD_VIEW_CREATED", field = %key, "created nested view");
        Field::View(view)
    }

    /// Validates and stores a field.
    ///
    /// # Errors
    ///
    /// - `Rejected` if the value does not match the field's schema and
    ///   the session is strict
    /// - `InvalidKey` / `IndexOutOfBounds` for keys that cannot be
    ///   written on an array, in either mode
    pub fn set(&self, key: impl Into<FieldKey>, value: Value) -> GuardResult<WriteOutcome> {
        let key = key.into();
        self.check_writable(&key)?;
        let field_schema = self.schema_for(&key);

        if let Err(err) = self.session.matcher().check(&field_schema, &value) {
            if self.session.is_quiet() {
                debug!(
                    event = "GUARD_WRITE_IGNORED",
                    field = %key,
                    code = err.code(),
                    reason = %err,
                    "write ignored"
                );
                return Ok(WriteOutcome::Ignored);
            }

            warn!(
                event = "GUARD_WRITE_REJECTED",
                field = %key,
                code = err.code(),
                reason = %err,
                "write rejected"
            );
            return Err(GuardError::Rejected {
                field: key.to_string(),
                source: err,
            });
        }

        self.commit(&key, value);
        trace!(event = "GUARD_WRITE_COMMITTED", field = %key, "write committed");
        Ok(WriteOutcome::Committed)
    }

    /// Identity comparison between two views.
    pub fn ptr_eq(a: &Rc<Self>, b: &Rc<Self>) -> bool {
        Rc::ptr_eq(a, b)
    }

    fn read_raw(&self, key: &FieldKey) -> Value {
        match &self.target {
            Value::Object(obj) => obj
                .borrow()
                .get(&key.to_name())
                .cloned()
                .unwrap_or(Value::Undefined),
            Value::Array(arr) => key
                .to_index()
                .and_then(|i| arr.borrow().get(i).cloned())
                .unwrap_or(Value::Undefined),
            _ => Value::Undefined,
        }
    }

    fn schema_for(&self, key: &FieldKey) -> Schema {
        match &self.target {
            Value::Array(_) => self.schema.element_schema(),
            _ => self.schema.field_schema(&key.to_name()),
        }
    }

    fn check_writable(&self, key: &FieldKey) -> GuardResult<()> {
        if let Value::Array(arr) = &self.target {
            let index = key.to_index().ok_or_else(|| GuardError::InvalidKey {
                key: key.to_string(),
                target: "array",
            })?;
            let len = arr.borrow().len();
            if index > len {
                return Err(GuardError::IndexOutOfBounds { index, len });
            }
        }
        Ok(())
    }

    fn commit(&self, key: &FieldKey, value: Value) {
        match &self.target {
            Value::Object(obj) => {
                obj.borrow_mut().insert(key.to_name(), value);
            }
            Value::Array(arr) => {
                let mut arr = arr.borrow_mut();
                // Bounds were checked in check_writable.
                match key.to_index() {
                    Some(i) if i < arr.len() => arr[i] = value,
                    Some(_) => arr.push(value),
                    None => {}
                }
            }
            _ => {}
        }
    }
}

impl fmt::Debug for GuardedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedView")
            .field("schema", &self.schema.describe())
            .field("value", &self.target)
            .field("quiet", &self.session.is_quiet())
            .finish()
    }
}
