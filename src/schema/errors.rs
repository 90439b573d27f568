//! Validation error types
//!
//! Error codes:
//! - SHAPE_ABSENCE_MISMATCH
//! - SHAPE_KIND_MISMATCH
//! - SHAPE_STRUCTURE_MISMATCH
//! - SHAPE_UNION_EXHAUSTED
//! - SHAPE_NEVER_VIOLATION
//!
//! Only the first failure in document order is reported.

use std::fmt;

/// Condition that caused a match to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchKind {
    /// Absence demanded but a value was present, or the reverse under nullable
    Absence,
    /// Primitive or composite kind differs from the declared kind
    Kind,
    /// Not a sequence/structure where one was required
    Shape,
    /// No union branch matched
    UnionExhausted,
    /// A value was checked against `never`
    Never,
}

impl MismatchKind {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            MismatchKind::Absence => "SHAPE_ABSENCE_MISMATCH",
            MismatchKind::Kind => "SHAPE_KIND_MISMATCH",
            MismatchKind::Shape => "SHAPE_STRUCTURE_MISMATCH",
            MismatchKind::UnionExhausted => "SHAPE_UNION_EXHAUSTED",
            MismatchKind::Never => "SHAPE_NEVER_VIOLATION",
        }
    }
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A failed match with the expected shape and the observed kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    kind: MismatchKind,
    expected: String,
    actual: String,
    /// Location in the value, e.g. `loc.lat` or `tags[1]`; empty at the root
    path: String,
}

impl ValidationError {
    pub fn new(kind: MismatchKind, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            kind,
            expected: expected.into(),
            actual: actual.into(),
            path: String::new(),
        }
    }

    pub fn absence(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(MismatchKind::Absence, expected, actual)
    }

    pub fn kind_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(MismatchKind::Kind, expected, actual)
    }

    pub fn shape(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(MismatchKind::Shape, expected, actual)
    }

    pub fn union_exhausted(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(MismatchKind::UnionExhausted, expected, actual)
    }

    pub fn never(actual: impl Into<String>) -> Self {
        Self::new(MismatchKind::Never, "never", actual)
    }

    /// Prefixes the location with a field name as the error unwinds.
    pub(crate) fn in_field(mut self, key: &str) -> Self {
        self.path = if self.path.is_empty() {
            key.to_string()
        } else if self.path.starts_with('[') {
            format!("{}{}", key, self.path)
        } else {
            format!("{}.{}", key, self.path)
        };
        self
    }

    /// Prefixes the location with a sequence index as the error unwinds.
    pub(crate) fn in_index(mut self, index: usize) -> Self {
        self.path = if self.path.is_empty() || self.path.starts_with('[') {
            format!("[{}]{}", index, self.path)
        } else {
            format!("[{}].{}", index, self.path)
        };
        self
    }

    pub fn kind(&self) -> MismatchKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn actual(&self) -> &str {
        &self.actual
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Validation error: Expected {} but got {}",
            self.expected, self.actual
        )
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(MismatchKind::Absence.code(), "SHAPE_ABSENCE_MISMATCH");
        assert_eq!(MismatchKind::Kind.code(), "SHAPE_KIND_MISMATCH");
        assert_eq!(MismatchKind::Shape.code(), "SHAPE_STRUCTURE_MISMATCH");
        assert_eq!(MismatchKind::UnionExhausted.code(), "SHAPE_UNION_EXHAUSTED");
        assert_eq!(MismatchKind::Never.code(), "SHAPE_NEVER_VIOLATION");
    }

    #[test]
    fn test_message_format() {
        let err = ValidationError::kind_mismatch("number", "string");
        assert_eq!(
            err.to_string(),
            "Validation error: Expected number but got string"
        );
    }

    #[test]
    fn test_path_builds_outward() {
        let err = ValidationError::kind_mismatch("number", "string")
            .in_field("lat")
            .in_field("loc");
        assert_eq!(err.path(), "loc.lat");

        let err = ValidationError::kind_mismatch("string", "number")
            .in_index(1)
            .in_field("tags");
        assert_eq!(err.path(), "tags[1]");

        let err = ValidationError::kind_mismatch("string", "number")
            .in_field("name")
            .in_index(0)
            .in_index(2);
        assert_eq!(err.path(), "[2][0].name");
    }

    #[test]
    fn test_path_does_not_change_message() {
        let err = ValidationError::never("boolean").in_field("x");
        assert_eq!(err.to_string(), "Validation error: Expected never but got boolean");
        assert_eq!(err.kind(), MismatchKind::Never);
    }
}
