//! Observability subsystem for jsonshape
//!
//! Structured, synchronous JSON-line logging of registry activity, document
//! cache transitions and rejected input.
//!
//! # Usage
//!
//! ```ignore
//! use jsonshape::observability::{Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Trace);
//! Logger::log(Severity::Info, "CUSTOM_EVENT", &[("rows", "42")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a typed event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_with_fields() {
        // Only checks that logging never panics, whatever the threshold.
        log_event_with_fields(Event::DocumentDecoded, &[("shape", "list")]);
        log_event_with_fields(Event::SchemaViolation, &[("details", "'v': expected number")]);
    }
}
