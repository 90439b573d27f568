//! Schema subsystem
//!
//! Schemas describe expected value shapes and are checked by a pure,
//! recursive matcher.
//!
//! # Design Principles
//!
//! - Schemas are plain immutable trees, no compile step
//! - Matching is deterministic and side-effect free
//! - One failure at a time, first in document order
//! - Tag kinds are resolved through an extensible catalogue

mod catalogue;
mod errors;
mod matcher;
mod outcome;
mod types;

pub use catalogue::{TagPredicate, TypeCatalogue};
pub use errors::{MismatchKind, ValidationError, ValidationResult};
pub use matcher::Matcher;
pub use outcome::{safe_validate, validate};
pub use types::{tags, Fields, Literal, Schema};
