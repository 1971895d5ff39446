//! Store-facing scan and bind

use std::str;

use crate::document::{
    sniff, Document, DocumentError, DocumentResult, Shape, TypedDocument,
};

/// A value as handed over by a store driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScanSource<'a> {
    Null,
    Integer(i64),
    Real(f64),
    Text(&'a str),
    Bytes(&'a [u8]),
}

impl ScanSource<'_> {
    /// Name of the source kind, for errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ScanSource::Null => "null",
            ScanSource::Integer(_) => "integer",
            ScanSource::Real(_) => "real",
            ScanSource::Text(_) => "text",
            ScanSource::Bytes(_) => "bytes",
        }
    }
}

impl<'a> From<&'a [u8]> for ScanSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        ScanSource::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for ScanSource<'a> {
    fn from(text: &'a str) -> Self {
        ScanSource::Text(text)
    }
}

/// Serialized document bytes handed to a store driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindValue<'a> {
    bytes: &'a [u8],
}

impl<'a> BindValue<'a> {
    /// The JSON text as bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// The JSON text as a string. Fails only if scanned raw bytes were not
    /// UTF-8 to begin with.
    pub fn as_str(&self) -> Result<&'a str, str::Utf8Error> {
        str::from_utf8(self.bytes)
    }
}

/// Reads a document from a store value.
pub trait Scan {
    /// Replaces the document with a copy of `source`.
    ///
    /// Only text and byte sources are accepted. The leading byte must open
    /// the document's shape; the rest is parsed on first read.
    fn scan(&mut self, source: ScanSource<'_>) -> DocumentResult<()>;
}

/// Writes a document to a store value.
pub trait Bind {
    /// The document's serialized bytes. Same as `encode`.
    fn bind(&mut self) -> DocumentResult<BindValue<'_>>;
}

impl<S: Shape> Scan for Document<S> {
    fn scan(&mut self, source: ScanSource<'_>) -> DocumentResult<()> {
        let bytes = match source {
            ScanSource::Bytes(bytes) => bytes,
            ScanSource::Text(text) => text.as_bytes(),
            other => return Err(DocumentError::InvalidScanType(other.kind_name())),
        };

        sniff::<S>(bytes)?;
        self.cache.scan(bytes.to_vec());
        Ok(())
    }
}

impl<S: Shape> Bind for Document<S> {
    fn bind(&mut self) -> DocumentResult<BindValue<'_>> {
        self.encode().map(|bytes| BindValue { bytes })
    }
}

impl<S: Shape> Bind for TypedDocument<S> {
    fn bind(&mut self) -> DocumentResult<BindValue<'_>> {
        self.encode().map(|bytes| BindValue { bytes })
    }
}
