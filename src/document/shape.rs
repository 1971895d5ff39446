//! Top-level shapes a document can hold
//!
//! A list document decodes into `Vec<Value>`, a table document into
//! `Map<String, Value>`. The shape fixes the leading byte accepted at scan
//! time and which root-level validator applies.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::schema::{Type, ValidationDetails};

mod sealed {
    pub trait Sealed {}
    impl Sealed for Vec<serde_json::Value> {}
    impl Sealed for serde_json::Map<String, serde_json::Value> {}
}

/// Decoded payload of a document.
///
/// Implemented for `Vec<Value>` (lists) and `Map<String, Value>` (tables)
/// only.
pub trait Shape:
    sealed::Sealed + Serialize + DeserializeOwned + Default + Clone + PartialEq + fmt::Debug
{
    /// Shape name used in errors and logs
    const NAME: &'static str;
    /// First byte of a serialized value of this shape
    const OPEN: u8;

    /// Number of elements or fields
    fn len(&self) -> usize;

    /// Validates the whole payload against `ty`
    fn check(&self, ty: &Type) -> Result<(), ValidationDetails>;
}

impl Shape for Vec<Value> {
    const NAME: &'static str = "list";
    const OPEN: u8 = b'[';

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn check(&self, ty: &Type) -> Result<(), ValidationDetails> {
        ty.check_items(self)
    }
}

impl Shape for Map<String, Value> {
    const NAME: &'static str = "table";
    const OPEN: u8 = b'{';

    fn len(&self) -> usize {
        Map::len(self)
    }

    fn check(&self, ty: &Type) -> Result<(), ValidationDetails> {
        ty.check_entries(self)
    }
}

/// Describes the leading byte of `bytes` for a mismatch error.
pub(crate) fn describe_leading(bytes: &[u8]) -> String {
    match bytes.first() {
        None => "empty input".to_string(),
        Some(b) if b.is_ascii_graphic() => format!("'{}'", *b as char),
        Some(b) => format!("byte 0x{:02x}", b),
    }
}
