//! Structured JSON logger for jsonshape
//!
//! - One log line = one event
//! - `event` and `severity` first, then fields in key order
//! - Synchronous, no buffering
//! - Lines below the global minimum severity are dropped

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Cache transitions and other per-call detail
    Trace = 0,
    /// Registry and configuration activity
    Info = 1,
    /// Rejected input
    Warn = 2,
    /// Operation failures
    Error = 3,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }

    fn from_u8(raw: u8) -> Severity {
        match raw {
            0 => Severity::Trace,
            1 => Severity::Info,
            2 => Severity::Warn,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static MIN_SEVERITY: AtomicU8 = AtomicU8::new(Severity::Warn as u8);

/// A structured logger that outputs JSON lines
pub struct Logger;

impl Logger {
    /// Sets the minimum severity that reaches the output.
    pub fn set_min_severity(severity: Severity) {
        MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
    }

    /// Returns the current minimum severity.
    pub fn min_severity() -> Severity {
        Severity::from_u8(MIN_SEVERITY.load(Ordering::Relaxed))
    }

    /// Whether a line at `severity` would be written.
    pub fn enabled(severity: Severity) -> bool {
        severity >= Self::min_severity()
    }

    /// Writes one line for `event` if `severity` passes the threshold.
    ///
    /// ERROR lines go to stderr, the rest to stdout.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if !Self::enabled(severity) {
            return;
        }

        let line = render_line(severity, event, fields);
        match severity {
            Severity::Error => write_line(&mut io::stderr().lock(), &line),
            _ => write_line(&mut io::stdout().lock(), &line),
        }
    }
}

/// One write per line. Write errors are dropped.
fn write_line<W: Write>(writer: &mut W, line: &str) {
    let _ = writer.write_all(line.as_bytes());
    let _ = writer.flush();
}

/// Renders `{"event":..,"severity":..,<fields by key>}` plus newline.
fn render_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut line = String::with_capacity(96);
    line.push_str("{\"event\":");
    push_json_str(&mut line, event);
    line.push_str(",\"severity\":");
    push_json_str(&mut line, severity.as_str());

    let mut ordered = fields.to_vec();
    ordered.sort_unstable_by(|a, b| a.0.cmp(b.0));
    for (key, value) in ordered {
        line.push(',');
        push_json_str(&mut line, key);
        line.push(':');
        push_json_str(&mut line, value);
    }

    line.push_str("}\n");
    line
}

fn push_json_str(line: &mut String, s: &str) {
    match serde_json::to_string(s) {
        Ok(quoted) => line.push_str(&quoted),
        Err(_) => line.push_str("\"\""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parse(line: &str) -> Value {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn test_severity_order_and_u8_mapping() {
        let all = [Severity::Trace, Severity::Info, Severity::Warn, Severity::Error];
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        for s in all {
            assert_eq!(Severity::from_u8(s as u8), s);
        }
    }

    #[test]
    fn test_severity_serde_is_uppercase() {
        let s: Severity = serde_json::from_str("\"TRACE\"").unwrap();
        assert_eq!(s, Severity::Trace);
        assert_eq!(serde_json::to_string(&Severity::Warn).unwrap(), "\"WARN\"");
        assert!(serde_json::from_str::<Severity>("\"warn\"").is_err());
    }

    #[test]
    fn test_line_leads_with_event_and_severity() {
        let line = render_line(Severity::Trace, "DOCUMENT_DECODED", &[("shape", "list")]);
        assert!(line.starts_with("{\"event\":\"DOCUMENT_DECODED\",\"severity\":\"TRACE\""));

        let parsed = parse(&line);
        assert_eq!(parsed["shape"], "list");
    }

    #[test]
    fn test_fields_sorted_regardless_of_input_order() {
        let a = render_line(Severity::Warn, "SHAPE_MISMATCH", &[("shape", "table"), ("found", "'['")]);
        let b = render_line(Severity::Warn, "SHAPE_MISMATCH", &[("found", "'['"), ("shape", "table")]);
        assert_eq!(a, b);
        assert!(a.find("\"found\"").unwrap() < a.find("\"shape\"").unwrap());
    }

    #[test]
    fn test_values_are_escaped_to_one_line() {
        let reason = "expected `,` at line 1\n\"quoted\"\u{1}";
        let line = render_line(Severity::Warn, "DECODE_FAILED", &[("reason", reason)]);
        assert_eq!(parse(&line)["reason"], reason);
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn test_write_line_to_buffer() {
        let mut buffer = Vec::new();
        write_line(&mut buffer, &render_line(Severity::Info, "REGISTRY_LOADED", &[]));
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(parse(&text)["severity"], "INFO");
    }
}
