//! List-specific document operations

use serde_json::Value;

use super::{violation, DocumentError, DocumentResult, TypedList};
use crate::schema::{index_path, json_type_name, Type, ValidationDetails, ROOT};

impl TypedList {
    /// Appends `value` after checking it against the element type and the
    /// length bound. Nothing is appended on failure.
    pub fn append(&mut self, value: impl Into<Value>) -> DocumentResult<()> {
        let value = value.into();
        let len = self.decode()?.len();

        match self.ty.as_ref() {
            Type::List { element, .. } => {
                element
                    .check_at(&value, &index_path(ROOT, len))
                    .map_err(violation)?;

                if let Some(max) = self.ty.max_length() {
                    if len >= max {
                        return Err(violation(ValidationDetails::too_long(ROOT, max, len + 1)));
                    }
                }
            }
            Type::Any => {}
            other => {
                return Err(violation(ValidationDetails::type_mismatch(
                    ROOT,
                    other.kind().as_str(),
                    "list",
                )))
            }
        }

        self.cache_mut().decoded_mut()?.push(value);
        Ok(())
    }

    /// The decoded elements.
    pub fn values(&mut self) -> DocumentResult<&[Value]> {
        Ok(self.decode()?.as_slice())
    }

    /// Every element as an `i64`. Fractional numbers are truncated toward
    /// zero and saturate at the `i64` bounds.
    pub fn int64_values(&mut self) -> DocumentResult<Vec<i64>> {
        self.decode()?
            .iter()
            .enumerate()
            .map(|(index, v)| {
                let truncated = match v {
                    Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
                    _ => None,
                };
                truncated.ok_or(DocumentError::UnexpectedType {
                    index,
                    expected: "number",
                    actual: json_type_name(v),
                })
            })
            .collect()
    }

    /// Every element as a string.
    pub fn string_values(&mut self) -> DocumentResult<Vec<String>> {
        self.decode()?
            .iter()
            .enumerate()
            .map(|(index, v)| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or(DocumentError::UnexpectedType {
                        index,
                        expected: "string",
                        actual: json_type_name(v),
                    })
            })
            .collect()
    }
}
