//! Structural validation of decoded values against a `Type`
//!
//! Validation semantics:
//! - Tables are closed-world: undeclared keys invalidate the whole value
//! - Declared fields may be absent
//! - Lists and strings are open unless a positive `max_length` is set
//! - Any numeric representation satisfies `number`
//! - `any` accepts every value, null included
//!
//! Recursion follows the schema tree, never the document, so stack depth is
//! bounded by `Type::depth()`. A value nested deeper than its schema is
//! either rejected at the point where the schema stops, or accepted whole
//! by `any` without being walked.

use serde_json::{Map, Value};

use super::errors::ValidationDetails;
use super::types::{Fields, Type};

pub(crate) const ROOT: &str = "$root";

impl Type {
    /// Whether `value` conforms to this type. Total and deterministic.
    pub fn is_valid(&self, value: &Value) -> bool {
        self.check(value).is_ok()
    }

    /// Validates `value`, reporting the first violation found.
    ///
    /// Table fields are visited in name order, so the reported violation is
    /// deterministic for a given `(type, value)` pair.
    pub fn check(&self, value: &Value) -> Result<(), ValidationDetails> {
        check_value(self, value, ROOT)
    }

    /// Validates a value that sits at `path` inside a larger document.
    pub(crate) fn check_at(&self, value: &Value, path: &str) -> Result<(), ValidationDetails> {
        check_value(self, value, path)
    }

    /// Validates a decoded array in place, without wrapping it in a `Value`.
    pub(crate) fn check_items(&self, items: &[Value]) -> Result<(), ValidationDetails> {
        match self {
            Type::List { element, .. } => check_list(self, element, items, ROOT),
            Type::Any => Ok(()),
            other => Err(ValidationDetails::type_mismatch(ROOT, other.kind().as_str(), "list")),
        }
    }

    /// Validates a decoded object in place, without wrapping it in a `Value`.
    pub(crate) fn check_entries(&self, obj: &Map<String, Value>) -> Result<(), ValidationDetails> {
        match self {
            Type::Table { fields } => check_table(fields, obj, ROOT),
            Type::Any => Ok(()),
            other => Err(ValidationDetails::type_mismatch(ROOT, other.kind().as_str(), "table")),
        }
    }
}

fn check_value(ty: &Type, value: &Value, path: &str) -> Result<(), ValidationDetails> {
    match ty {
        Type::Table { fields } => {
            let obj = value
                .as_object()
                .ok_or_else(|| type_error(path, "table", value))?;
            check_table(fields, obj, path)
        }
        Type::List { element, .. } => {
            let arr = value
                .as_array()
                .ok_or_else(|| type_error(path, "list", value))?;
            check_list(ty, element, arr, path)
        }
        Type::Number => {
            if value.is_number() {
                Ok(())
            } else {
                Err(type_error(path, "number", value))
            }
        }
        Type::String { .. } => {
            let s = value
                .as_str()
                .ok_or_else(|| type_error(path, "string", value))?;

            if let Some(max) = ty.max_length() {
                let chars = s.chars().count();
                if chars > max {
                    return Err(ValidationDetails::new(
                        path,
                        format!("at most {} characters", max),
                        format!("{} characters", chars),
                    ));
                }
            }
            Ok(())
        }
        Type::Bool => {
            if value.is_boolean() {
                Ok(())
            } else {
                Err(type_error(path, "bool", value))
            }
        }
        Type::Any => Ok(()),
    }
}

fn check_list(ty: &Type, element: &Type, arr: &[Value], path: &str) -> Result<(), ValidationDetails> {
    if let Some(max) = ty.max_length() {
        if arr.len() > max {
            return Err(ValidationDetails::too_long(path, max, arr.len()));
        }
    }

    for (i, elem) in arr.iter().enumerate() {
        check_value(element, elem, &index_path(path, i))?;
    }
    Ok(())
}

fn check_table(fields: &Fields, obj: &Map<String, Value>, path: &str) -> Result<(), ValidationDetails> {
    // Undeclared keys first, so an extra key is reported even when a
    // declared sibling is also wrong.
    if let Some(key) = obj.keys().find(|k| !fields.contains_key(k.as_str())) {
        return Err(ValidationDetails::extra_field(make_path(path, key)));
    }

    for (name, field_ty) in fields {
        if let Some(value) = obj.get(name) {
            check_value(field_ty, value, &make_path(path, name))?;
        }
    }

    Ok(())
}

/// Returns the JSON type name used in validation messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "table",
    }
}

/// Path of element `index` under `prefix`.
pub(crate) fn index_path(prefix: &str, index: usize) -> String {
    format!("{}[{}]", prefix, index)
}

/// Path of field `field` under `prefix`; fields of the root are bare names.
pub(crate) fn make_path(prefix: &str, field: &str) -> String {
    if prefix == ROOT {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn type_error(path: &str, expected: &str, actual: &Value) -> ValidationDetails {
    ValidationDetails::type_mismatch(path, expected, json_type_name(actual))
}
