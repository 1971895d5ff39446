//! Document errors
//!
//! Every variant is a local, recoverable condition. Codes share the
//! `JSONSHAPE_` namespace with schema errors.

use thiserror::Error;

use crate::schema::ValidationDetails;

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors returned by document operations
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Raw bytes are not well-formed JSON, or not the expected top-level shape
    #[error("failed to decode JSON {shape}: {source}")]
    Decode {
        shape: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// In-memory value could not be serialized
    #[error("failed to encode JSON {shape}: {source}")]
    Encode {
        shape: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Leading-byte sniff failed before any parse was attempted
    #[error("expected JSON {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    /// Store handed over something other than a byte sequence
    #[error("cannot scan a {0} value into a JSON document")]
    InvalidScanType(&'static str),

    /// Value, field or element does not conform to the attached type
    #[error("schema violation at {0}")]
    SchemaViolation(ValidationDetails),

    /// Typed accessor found an element of the wrong kind
    #[error("element {index} is {actual}, expected {expected}")]
    UnexpectedType {
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },
}

impl DocumentError {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            DocumentError::Decode { .. } => "JSONSHAPE_DECODE_FAILED",
            DocumentError::Encode { .. } => "JSONSHAPE_ENCODE_FAILED",
            DocumentError::TypeMismatch { .. } => "JSONSHAPE_TYPE_MISMATCH",
            DocumentError::InvalidScanType(_) => "JSONSHAPE_INVALID_SCAN_TYPE",
            DocumentError::SchemaViolation(_) => "JSONSHAPE_SCHEMA_VIOLATION",
            DocumentError::UnexpectedType { .. } => "JSONSHAPE_UNEXPECTED_TYPE",
        }
    }

    /// Whether this error is a schema violation
    pub fn is_schema_violation(&self) -> bool {
        matches!(self, DocumentError::SchemaViolation(_))
    }

    /// Validation details of a schema violation
    pub fn details(&self) -> Option<&ValidationDetails> {
        match self {
            DocumentError::SchemaViolation(details) => Some(details),
            _ => None,
        }
    }
}
