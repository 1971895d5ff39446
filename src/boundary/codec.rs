//! serde hooks for documents
//!
//! Serializing never mutates the cache. Cached raw bytes are emitted
//! verbatim through [`RawValue`], so the output is byte-for-byte what
//! `marshal_json` returns. Only the unchecked documents deserialize, since a
//! typed document needs its `Type` up front.

use serde::{ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::document::{Cached, Document, Shape, TypedDocument};

impl<S: Shape> Serialize for Document<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        match self.cache.cached() {
            Cached::Raw(raw) => {
                let raw: &RawValue = serde_json::from_slice(raw).map_err(ser::Error::custom)?;
                raw.serialize(serializer)
            }
            Cached::Decoded(decoded) => decoded.serialize(serializer),
        }
    }
}

impl<S: Shape> Serialize for TypedDocument<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.as_document().serialize(serializer)
    }
}

impl<'de, S: Shape> Deserialize<'de> for Document<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        S::deserialize(deserializer).map(Document::from_decoded)
    }
}
