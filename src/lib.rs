//! shapeguard - runtime schema validation
//!
//! Schemas are plain data describing expected value shapes. A pure
//! matcher checks values against them, two adapters turn the result
//! into an error or an option, and guarded views keep shared objects
//! valid under later writes.

pub mod cli;
pub mod guard;
pub mod record;
pub mod schema;
pub mod value;

pub use guard::{to_guarded_view, GuardError, GuardOptions, GuardedView};
pub use record::{merge_defaults, RecordFactory};
pub use schema::{safe_validate, validate, Matcher, Schema, TypeCatalogue, ValidationError};
pub use value::Value;
