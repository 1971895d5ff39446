//! rusqlite column adapters
//!
//! Documents are stored as TEXT. BLOB columns are read the same way.

use std::borrow::Cow;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};

use super::store::{Scan, ScanSource};
use crate::document::{Document, DocumentError, Shape, TypedDocument};

impl<S: Shape> FromSql for Document<S> {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let source = match value {
            ValueRef::Null => ScanSource::Null,
            ValueRef::Integer(i) => ScanSource::Integer(i),
            ValueRef::Real(f) => ScanSource::Real(f),
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => ScanSource::Bytes(bytes),
        };

        let mut doc = Document::new();
        doc.scan(source).map_err(|err| match err {
            DocumentError::InvalidScanType(_) => FromSqlError::InvalidType,
            other => FromSqlError::Other(Box::new(other)),
        })?;
        Ok(doc)
    }
}

impl<S: Shape> ToSql for Document<S> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let bytes = self
            .cache
            .to_bytes()
            .map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))?;

        match bytes {
            Cow::Borrowed(raw) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(raw))),
            Cow::Owned(raw) => {
                let text = String::from_utf8(raw)
                    .map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))?;
                Ok(ToSqlOutput::Owned(Value::Text(text)))
            }
        }
    }
}

impl<S: Shape> ToSql for TypedDocument<S> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.as_document().to_sql()
    }
}

#[cfg(test)]
mod tests {
    use crate::document::{List, Table, TypedTable};
    use crate::schema::Type;
    use rusqlite::{params, Connection};
    use std::sync::Arc;

    fn open() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE docs (id INTEGER PRIMARY KEY, body)", [])
            .unwrap();
        conn
    }

    #[test]
    fn test_typed_table_round_trips_through_sqlite() {
        let conn = open();
        let ty = Arc::new(Type::table([("k", Type::string(0)), ("v", Type::number())]));
        let mut typed = TypedTable::new(ty.clone());
        typed.set("k", "foo").unwrap();
        typed.set("v", 2).unwrap();

        conn.execute("INSERT INTO docs (id, body) VALUES (1, ?1)", params![typed])
            .unwrap();

        let mut table: Table = conn
            .query_row("SELECT body FROM docs WHERE id = 1", [], |row| row.get(0))
            .unwrap();
        assert!(table.as_type(ty).is_ok());
    }

    #[test]
    fn test_wrong_shape_and_null_columns_fail() {
        let conn = open();
        conn.execute("INSERT INTO docs (id, body) VALUES (1, '{}'), (2, NULL), (3, 7)", [])
            .unwrap();

        for id in 1..=3 {
            let result: rusqlite::Result<List> =
                conn.query_row("SELECT body FROM docs WHERE id = ?1", [id], |row| row.get(0));
            assert!(result.is_err(), "row {id} should not scan as a list");
        }
    }

    #[test]
    fn test_blob_column_scans() {
        let conn = open();
        conn.execute("INSERT INTO docs (id, body) VALUES (1, ?1)", [b"[1,2]".as_slice()])
            .unwrap();
        let mut list: List = conn
            .query_row("SELECT body FROM docs WHERE id = 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(list.len().unwrap(), 2);
    }
}
