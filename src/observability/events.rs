//! Observability events for jsonshape
//!
//! Events are explicit and typed. Each carries a fixed severity.
//!
//! Rejections are returned to the caller as errors, so their events are
//! TRACE and stay silent under the default threshold.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Registry
    /// A named type was registered
    TypeRegistered,
    /// A type directory was loaded
    RegistryLoaded,
    /// Configuration was loaded
    ConfigLoaded,

    // Document cache
    /// Raw bytes accepted from the store
    DocumentScanned,
    /// Raw bytes decoded into the in-memory form
    DocumentDecoded,
    /// In-memory form encoded into raw bytes
    DocumentEncoded,

    // Rejections
    /// Leading byte did not match the document shape
    ShapeMismatch,
    /// Raw bytes failed to decode
    DecodeFailed,
    /// A value failed schema validation
    SchemaViolation,
}

impl Event {
    /// Returns the event name string
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::TypeRegistered => "TYPE_REGISTERED",
            Event::RegistryLoaded => "REGISTRY_LOADED",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DocumentScanned => "DOCUMENT_SCANNED",
            Event::DocumentDecoded => "DOCUMENT_DECODED",
            Event::DocumentEncoded => "DOCUMENT_ENCODED",
            Event::ShapeMismatch => "SHAPE_MISMATCH",
            Event::DecodeFailed => "DECODE_FAILED",
            Event::SchemaViolation => "SCHEMA_VIOLATION",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::DocumentScanned
            | Event::DocumentDecoded
            | Event::DocumentEncoded
            | Event::ShapeMismatch
            | Event::DecodeFailed
            | Event::SchemaViolation => Severity::Trace,
            Event::TypeRegistered | Event::RegistryLoaded | Event::ConfigLoaded => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_screaming_snake() {
        for event in [
            Event::TypeRegistered,
            Event::RegistryLoaded,
            Event::ConfigLoaded,
            Event::DocumentScanned,
            Event::DocumentDecoded,
            Event::DocumentEncoded,
            Event::ShapeMismatch,
            Event::DecodeFailed,
            Event::SchemaViolation,
        ] {
            let name = event.as_str();
            assert!(name.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_rejections_are_trace() {
        for event in [Event::SchemaViolation, Event::ShapeMismatch, Event::DecodeFailed] {
            assert_eq!(event.severity(), Severity::Trace);
            assert!(event.severity() < Severity::Warn);
        }
        assert_eq!(Event::DocumentDecoded.severity(), Severity::Trace);
    }
}
