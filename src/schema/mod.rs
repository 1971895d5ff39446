//! Schema subsystem for jsonshape
//!
//! A `Type` is a recursive, immutable description of a JSON shape built
//! from the closed `Kind` enumeration. Validation walks a decoded
//! `serde_json::Value` against a `Type` tree.
//!
//! # Design Principles
//!
//! - Closed-world tables: undeclared fields reject the whole value
//! - Open bounds: absent or non-positive `max_length` accepts any length
//! - No required fields: declared fields may be absent
//! - Validation is total and deterministic
//! - Recursion depth is bounded by the schema, not the document

mod errors;
mod kind;
mod registry;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, ValidationDetails};
pub use kind::Kind;
pub use registry::TypeRegistry;
pub use types::{Fields, Type};

pub(crate) use validator::{index_path, json_type_name, make_path, ROOT};
