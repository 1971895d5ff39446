//! Table-specific document operations

use serde_json::Value;

use super::{violation, DocumentResult, Table, TypedTable};
use crate::schema::{make_path, Type, ValidationDetails, ROOT};

impl TypedTable {
    /// Sets `key` to `value` after checking the key is declared and the
    /// value conforms to its field type. Nothing changes on failure.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> DocumentResult<()> {
        let key = key.into();
        let value = value.into();

        match self.ty.as_ref() {
            Type::Table { fields } => {
                let path = make_path(ROOT, &key);
                let field_ty = fields
                    .get(&key)
                    .ok_or_else(|| violation(ValidationDetails::extra_field(path.as_str())))?;
                field_ty.check_at(&value, &path).map_err(violation)?;
            }
            Type::Any => {}
            other => {
                return Err(violation(ValidationDetails::type_mismatch(
                    ROOT,
                    other.kind().as_str(),
                    "table",
                )))
            }
        }

        self.cache_mut().decoded_mut()?.insert(key, value);
        Ok(())
    }

    /// Value of `key`, if present.
    pub fn get(&mut self, key: &str) -> DocumentResult<Option<&Value>> {
        Ok(self.decode()?.get(key))
    }

    /// Removes `key`. Absent fields are always allowed, so this never
    /// violates the type. The raw side is kept when `key` was not present.
    pub fn remove(&mut self, key: &str) -> DocumentResult<Option<Value>> {
        if !self.decode()?.contains_key(key) {
            return Ok(None);
        }
        Ok(self.cache_mut().decoded_mut()?.remove(key))
    }
}

impl Table {
    /// Value of `key`, if present.
    pub fn get(&mut self, key: &str) -> DocumentResult<Option<&Value>> {
        Ok(self.decode()?.get(key))
    }
}
