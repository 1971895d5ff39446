//! Document subsystem for jsonshape
//!
//! A document wraps one JSON value held as raw bytes, as a decoded payload,
//! or both, and converts lazily between the two.
//!
//! - [`List`] / [`Table`]: read-only, unchecked view of whatever the store
//!   handed over
//! - [`TypedList`] / [`TypedTable`]: carry an `Arc<Type>` and validate every
//!   mutation before it is committed
//!
//! # Invariants
//!
//! - At least one of raw / decoded is populated after every successful call
//! - Writing the decoded side drops the raw side, and vice versa
//! - A rejected mutation leaves the previous cached state unchanged
//! - A document owns its raw buffer; borrowed input is copied

mod cache;
mod errors;
mod list;
mod shape;
mod table;

pub use cache::CacheState;
pub(crate) use cache::Cached;
pub use errors::{DocumentError, DocumentResult};
pub use shape::Shape;

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::observability::{log_event_with_fields, Event};
use crate::schema::{Type, ValidationDetails};
use cache::Cache;

/// Unchecked JSON array document
pub type List = Document<Vec<Value>>;
/// Unchecked JSON object document
pub type Table = Document<Map<String, Value>>;
/// JSON array document checked against a list type
pub type TypedList = TypedDocument<Vec<Value>>;
/// JSON object document checked against a table type
pub type TypedTable = TypedDocument<Map<String, Value>>;

/// Read-only, unchecked document.
///
/// Usually obtained straight from storage. To mutate it, attach a type with
/// [`Document::as_type`].
#[derive(Debug, Clone)]
pub struct Document<S> {
    pub(crate) cache: Cache<S>,
}

impl<S: Shape> Default for Document<S> {
    fn default() -> Self {
        Self {
            cache: Cache::default(),
        }
    }
}

impl<S: Shape> Document<S> {
    /// Empty document (`[]` or `{}`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of raw bytes without copying them.
    ///
    /// Only the leading byte is checked; the body is parsed on first read.
    pub fn from_raw(raw: Vec<u8>) -> DocumentResult<Self> {
        sniff::<S>(&raw)?;
        let mut cache = Cache::<S>::default();
        cache.scan(raw);
        Ok(Self { cache })
    }

    /// Wraps an already decoded payload.
    pub fn from_decoded(decoded: S) -> Self {
        Self {
            cache: Cache::DecodedOnly(decoded),
        }
    }

    /// The decoded payload, parsed from raw bytes on first access.
    pub fn decode(&mut self) -> DocumentResult<&S> {
        self.cache.decode()
    }

    /// The serialized bytes, encoded from the payload if needed.
    ///
    /// Encoding frees a decoded-only payload; the next read decodes again.
    pub fn encode(&mut self) -> DocumentResult<&[u8]> {
        self.cache.encode()
    }

    /// Number of elements or fields.
    pub fn len(&mut self) -> DocumentResult<usize> {
        Ok(self.decode()?.len())
    }

    /// Whether the document has no elements or fields.
    pub fn is_empty(&mut self) -> DocumentResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Which representations are currently cached.
    pub fn cache_state(&self) -> CacheState {
        self.cache.state()
    }

    /// Validates the whole document against `ty` and returns a checked copy.
    ///
    /// On failure this document is left as it was (apart from having been
    /// decoded).
    pub fn as_type(&mut self, ty: Arc<Type>) -> DocumentResult<TypedDocument<S>> {
        self.decode()?.check(&ty).map_err(violation)?;
        Ok(self.as_type_unchecked(ty))
    }

    /// Attaches `ty` without validating. For types known to match a priori.
    pub fn as_type_unchecked(&self, ty: Arc<Type>) -> TypedDocument<S> {
        TypedDocument {
            doc: self.clone(),
            ty,
        }
    }

    /// JSON text of the document. Same as [`Document::encode`].
    pub fn marshal_json(&mut self) -> DocumentResult<Vec<u8>> {
        self.encode().map(<[u8]>::to_vec)
    }

    /// Parses `bytes` straight into the decoded side, dropping any raw bytes.
    pub fn unmarshal_json(&mut self, bytes: &[u8]) -> DocumentResult<()> {
        let decoded = cache::parse::<S>(bytes)?;
        self.cache.replace(decoded);
        Ok(())
    }
}

/// Document bound to a type; every mutation is validated before it lands.
#[derive(Debug, Clone)]
pub struct TypedDocument<S> {
    doc: Document<S>,
    ty: Arc<Type>,
}

impl<S: Shape> TypedDocument<S> {
    /// Empty document checked against `ty`.
    pub fn new(ty: Arc<Type>) -> Self {
        Self {
            doc: Document::new(),
            ty,
        }
    }

    /// The attached type.
    pub fn ty(&self) -> &Arc<Type> {
        &self.ty
    }

    /// The decoded payload.
    pub fn decode(&mut self) -> DocumentResult<&S> {
        self.doc.decode()
    }

    /// The serialized bytes.
    pub fn encode(&mut self) -> DocumentResult<&[u8]> {
        self.doc.encode()
    }

    /// Number of elements or fields.
    pub fn len(&mut self) -> DocumentResult<usize> {
        self.doc.len()
    }

    /// Whether the document has no elements or fields.
    pub fn is_empty(&mut self) -> DocumentResult<bool> {
        self.doc.is_empty()
    }

    /// Which representations are currently cached.
    pub fn cache_state(&self) -> CacheState {
        self.doc.cache_state()
    }

    /// JSON text of the document.
    pub fn marshal_json(&mut self) -> DocumentResult<Vec<u8>> {
        self.doc.marshal_json()
    }

    /// Parses and validates `bytes`, replacing the document only if the
    /// whole value conforms to the attached type.
    pub fn unmarshal_json(&mut self, bytes: &[u8]) -> DocumentResult<()> {
        let decoded = cache::parse::<S>(bytes)?;
        decoded.check(&self.ty).map_err(violation)?;
        self.doc.cache.replace(decoded);
        Ok(())
    }

    /// The underlying unchecked document.
    pub fn as_document(&self) -> &Document<S> {
        &self.doc
    }

    /// Drops the type and returns the unchecked document.
    pub fn into_unchecked(self) -> Document<S> {
        self.doc
    }

    fn cache_mut(&mut self) -> &mut Cache<S> {
        &mut self.doc.cache
    }
}

/// Leading-byte check run before any parse.
pub(crate) fn sniff<S: Shape>(bytes: &[u8]) -> DocumentResult<()> {
    if bytes.first() == Some(&S::OPEN) {
        return Ok(());
    }

    let found = shape::describe_leading(bytes);
    log_event_with_fields(
        Event::ShapeMismatch,
        &[("found", found.as_str()), ("shape", S::NAME)],
    );
    Err(DocumentError::TypeMismatch {
        expected: S::NAME,
        found,
    })
}

/// Logs and wraps a validation failure.
pub(crate) fn violation(details: ValidationDetails) -> DocumentError {
    let shown = details.to_string();
    log_event_with_fields(Event::SchemaViolation, &[("details", shown.as_str())]);
    DocumentError::SchemaViolation(details)
}
