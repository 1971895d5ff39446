//! jsonshape - Schema-checked JSON documents for byte-oriented stores
//!
//! A `Type` describes the shape of a JSON value. `List` and `Table` hold a
//! stored JSON array or object, decoding lazily from raw bytes. `TypedList`
//! and `TypedTable` validate every mutation against an attached `Type`.

pub mod boundary;
pub mod config;
pub mod document;
pub mod observability;
pub mod schema;

pub use boundary::{Bind, BindValue, Scan, ScanSource};
pub use config::{ConfigError, ShapeConfig};
pub use document::{
    CacheState, Document, DocumentError, DocumentResult, List, Table, TypedDocument, TypedList,
    TypedTable,
};
pub use schema::{Kind, SchemaError, SchemaResult, Type, TypeRegistry, ValidationDetails};
