//! Guarded views
//!
//! A guarded view wraps a shared object or array together with the
//! schema in scope and re-validates every write before committing it.
//!
//! # Principles
//!
//! 1. The view is a façade, never a copy of the data
//! 2. Nested reads return the same view while it is alive (identity cache)
//! 3. The identity cache is scoped to one root wrap, not the process
//! 4. Failed writes never touch the data
//! 5. Single-threaded: views are `Rc`-based and never cross threads
//!
//! # Usage
//!
//! ```
//! use shapeguard::guard::{GuardOptions, GuardedView};
//! use shapeguard::schema::Schema;
//! use shapeguard::value::Value;
//!
//! let schema = Schema::object([("count", Schema::number())]);
//! let data = Value::object([("count", Value::from(1))]);
//!
//! let view = GuardedView::wrap(schema, &data, GuardOptions::strict()).unwrap();
//! assert!(view.set("count", Value::from("many")).is_err());
//! assert!(view.set("count", Value::from(2)).is_ok());
//! assert_eq!(data.field("count"), Value::from(2));
//! ```

mod errors;
mod options;
mod session;
mod view;

pub use errors::{FieldKey, GuardError, GuardResult};
pub use options::GuardOptions;
pub use view::{Field, GuardedView, WriteOutcome};

use std::rc::Rc;

use crate::schema::Schema;
use crate::value::Value;

/// Wraps `value` in a guarded view.
///
/// Shorthand for [`GuardedView::wrap`] with only the quiet flag.
pub fn to_guarded_view(schema: Schema, value: &Value, quiet: bool) -> GuardResult<Rc<GuardedView>> {
    let options = if quiet {
        GuardOptions::quiet()
    } else {
        GuardOptions::strict()
    };
    GuardedView::wrap(schema, value, options)
}
