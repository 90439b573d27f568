//! Guarded view errors

use std::fmt;

use thiserror::Error;

use crate::schema::ValidationError;

/// Result type for guarded view operations
pub type GuardResult<T> = Result<T, GuardError>;

/// Guarded view errors
#[derive(Debug, Clone, Error)]
pub enum GuardError {
    #[error("Write to '{field}' rejected: {source}")]
    Rejected {
        field: String,
        source: ValidationError,
    },

    #[error("Cannot guard a value of kind {0}")]
    NotComposite(&'static str),

    #[error("Key '{key}' does not address an element of {target}")]
    InvalidKey { key: String, target: &'static str },

    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

impl GuardError {
    /// The validation failure behind a rejected write.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            GuardError::Rejected { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, GuardError::Rejected { .. })
    }
}

/// Address of a field in an object or an element in an array
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Name(String),
    Index(usize),
}

impl FieldKey {
    /// Property name form; indices render as decimal names.
    pub fn to_name(&self) -> String {
        match self {
            FieldKey::Name(name) => name.clone(),
            FieldKey::Index(i) => i.to_string(),
        }
    }

    /// Index form; names parse when they are canonical decimal indices.
    pub fn to_index(&self) -> Option<usize> {
        match self {
            FieldKey::Index(i) => Some(*i),
            FieldKey::Name(name) => name
                .parse::<usize>()
                .ok()
                .filter(|i| i.to_string() == *name),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::Name(name) => write!(f, "{}", name),
            FieldKey::Index(i) => write!(f, "[{}]", i),
        }
    }
}

impl From<&str> for FieldKey {
    fn from(name: &str) -> Self {
        FieldKey::Name(name.to_string())
    }
}

impl From<String> for FieldKey {
    fn from(name: String) -> Self {
        FieldKey::Name(name)
    }
}

impl From<usize> for FieldKey {
    fn from(index: usize) -> Self {
        FieldKey::Index(index)
    }
}
