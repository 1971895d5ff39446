//! Schema error types
//!
//! Error codes:
//! - JSONSHAPE_UNKNOWN_KIND
//! - JSONSHAPE_MALFORMED_TYPE
//! - JSONSHAPE_DUPLICATE_TYPE
//! - JSONSHAPE_SCHEMA_TOO_DEEP
//! - JSONSHAPE_INVALID_TYPE_NAME
//! - JSONSHAPE_TYPE_WRITE_FAILED
//!
//! Validation failures are not schema errors; they surface as
//! `ValidationDetails` inside the document error.

use std::fmt;
use std::io;

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Kind tag outside the closed enumeration
    UnknownKind,
    /// Type definition could not be read or parsed
    MalformedType,
    /// A type with this name is already registered
    DuplicateType,
    /// Type definition nests deeper than the configured limit
    SchemaTooDeep,
    /// Type name cannot be used as a file stem
    InvalidTypeName,
    /// Type definition could not be written
    TypeWriteFailed,
}

impl SchemaErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::UnknownKind => "JSONSHAPE_UNKNOWN_KIND",
            SchemaErrorCode::MalformedType => "JSONSHAPE_MALFORMED_TYPE",
            SchemaErrorCode::DuplicateType => "JSONSHAPE_DUPLICATE_TYPE",
            SchemaErrorCode::SchemaTooDeep => "JSONSHAPE_SCHEMA_TOO_DEEP",
            SchemaErrorCode::InvalidTypeName => "JSONSHAPE_INVALID_TYPE_NAME",
            SchemaErrorCode::TypeWriteFailed => "JSONSHAPE_TYPE_WRITE_FAILED",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Where and how a value failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    /// Path to the offending value (e.g., "items[2].name"); "$root" for the top
    pub path: String,
    /// Expected shape or condition
    pub expected: String,
    /// Shape or condition found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(path: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn extra_field(path: impl Into<String>) -> Self {
        Self::new(path, "no undeclared fields", "undeclared field present")
    }

    pub fn type_mismatch(path: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(path, expected, actual)
    }

    pub fn too_long(path: impl Into<String>, max_length: usize, length: usize) -> Self {
        Self::new(
            path,
            format!("at most {} entries", max_length),
            format!("{} entries", length),
        )
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': expected {}, got {}", self.path, self.expected, self.actual)
    }
}

/// Schema error type with full context
#[derive(Debug)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl SchemaError {
    fn new(code: SchemaErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            source: None,
        }
    }

    /// Create an unknown kind error
    pub fn unknown_kind(tag: impl Into<String>) -> Self {
        Self::new(
            SchemaErrorCode::UnknownKind,
            format!("No such kind '{}'", tag.into()),
        )
    }

    /// Create an error for a type definition that cannot be parsed
    pub fn malformed_type(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(
            SchemaErrorCode::MalformedType,
            format!("Malformed type definition '{}': {}", origin.into(), reason.into()),
        )
    }

    /// Create an error for a type definition that cannot be read
    pub fn io(origin: impl Into<String>, source: io::Error) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..Self::malformed_type(origin, "failed to read")
        }
    }

    /// Create a parse error for a type definition
    pub fn parse(origin: impl Into<String>, source: serde_json::Error) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..Self::malformed_type(origin, "invalid JSON type definition")
        }
    }

    /// Create a duplicate registration error
    pub fn duplicate_type(name: impl Into<String>) -> Self {
        Self::new(
            SchemaErrorCode::DuplicateType,
            format!("Type '{}' is already registered", name.into()),
        )
    }

    /// Create an error for a name that is not a plain file stem
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::new(
            SchemaErrorCode::InvalidTypeName,
            format!("Type name '{}' must be a plain file stem", name.into()),
        )
    }

    /// Create an error for a type definition that could not be written
    pub fn write_failed(
        origin: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..Self::new(
                SchemaErrorCode::TypeWriteFailed,
                format!("Failed to write type definition '{}'", origin.into()),
            )
        }
    }

    /// Create a depth limit error
    pub fn too_deep(name: impl Into<String>, depth: usize, max_depth: usize) -> Self {
        Self::new(
            SchemaErrorCode::SchemaTooDeep,
            format!(
                "Type '{}' has depth {} (limit {})",
                name.into(),
                depth,
                max_depth
            ),
        )
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)?;
        if let Some(ref source) = self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchemaErrorCode::UnknownKind.code(), "JSONSHAPE_UNKNOWN_KIND");
        assert_eq!(SchemaErrorCode::MalformedType.code(), "JSONSHAPE_MALFORMED_TYPE");
        assert_eq!(SchemaErrorCode::DuplicateType.code(), "JSONSHAPE_DUPLICATE_TYPE");
        assert_eq!(SchemaErrorCode::SchemaTooDeep.code(), "JSONSHAPE_SCHEMA_TOO_DEEP");
        assert_eq!(SchemaErrorCode::InvalidTypeName.code(), "JSONSHAPE_INVALID_TYPE_NAME");
        assert_eq!(SchemaErrorCode::TypeWriteFailed.code(), "JSONSHAPE_TYPE_WRITE_FAILED");
    }

    #[test]
    fn test_validation_details_display() {
        let details = ValidationDetails::type_mismatch("age", "number", "string");
        let display = format!("{}", details);
        assert!(display.contains("age"));
        assert!(display.contains("number"));
        assert!(display.contains("string"));
    }

    #[test]
    fn test_write_failure_is_not_a_parse_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let err = SchemaError::write_failed("types/pair.json", io_err);
        assert_eq!(err.code(), SchemaErrorCode::TypeWriteFailed);
        assert!(err.source().is_some());
        assert!(!err.message().contains("invalid JSON"));
    }

    #[test]
    fn test_parse_error_exposes_source() {
        let json_err = serde_json::from_str::<u8>("nope").unwrap_err();
        let err = SchemaError::parse("inline", json_err);
        assert_eq!(err.code(), SchemaErrorCode::MalformedType);
        assert!(err.source().is_some());
        assert!(format!("{}", err).contains("caused by"));
    }
}
