//! Raw/decoded cache for a single document
//!
//! Every state transition lives here. Three states:
//!
//! - `RawOnly`: serialized bytes are authoritative
//! - `DecodedOnly`: the in-memory payload is authoritative
//! - `Both`: both present and in sync
//!
//! Transitions:
//!
//! | operation        | from                 | to            |
//! |------------------|----------------------|---------------|
//! | `scan`           | any                  | `RawOnly`     |
//! | `replace`        | any                  | `DecodedOnly` |
//! | `decode`         | `RawOnly`            | `Both`        |
//! | `encode`         | `DecodedOnly`        | `RawOnly`     |
//! | `decoded_mut`    | any                  | `DecodedOnly` |
//!
//! A transition that would leave the two sides out of sync drops the stale
//! side instead of updating it.

use std::borrow::Cow;
use std::mem;

use super::errors::{DocumentError, DocumentResult};
use super::shape::Shape;
use crate::observability::{log_event_with_fields, Event};

/// Which side(s) of the cache are populated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Only serialized bytes
    RawOnly,
    /// Only the decoded payload
    DecodedOnly,
    /// Both, in sync
    Both,
}

/// Borrowed authoritative side of a cache
pub(crate) enum Cached<'a, S> {
    Raw(&'a [u8]),
    Decoded(&'a S),
}

#[derive(Debug, Clone)]
pub(crate) enum Cache<S> {
    RawOnly(Vec<u8>),
    DecodedOnly(S),
    Both { raw: Vec<u8>, decoded: S },
}

impl<S: Shape> Cache<S> {
    pub(crate) fn state(&self) -> CacheState {
        match self {
            Cache::RawOnly(_) => CacheState::RawOnly,
            Cache::DecodedOnly(_) => CacheState::DecodedOnly,
            Cache::Both { .. } => CacheState::Both,
        }
    }

    /// Replaces the cache with raw bytes the caller hands over.
    pub(crate) fn scan(&mut self, raw: Vec<u8>) {
        let len = raw.len().to_string();
        *self = Cache::RawOnly(raw);
        log_event_with_fields(
            Event::DocumentScanned,
            &[("bytes", len.as_str()), ("shape", S::NAME)],
        );
    }

    /// Replaces the cache with a decoded payload.
    pub(crate) fn replace(&mut self, decoded: S) {
        *self = Cache::DecodedOnly(decoded);
    }

    /// The decoded payload, parsing the raw bytes first if needed.
    pub(crate) fn decode(&mut self) -> DocumentResult<&S> {
        match *self {
            Cache::DecodedOnly(ref decoded) | Cache::Both { ref decoded, .. } => Ok(decoded),
            Cache::RawOnly(ref mut raw) => {
                let decoded = parse::<S>(raw)?;
                let raw = mem::take(raw);
                *self = Cache::Both { raw, decoded };
                log_event_with_fields(Event::DocumentDecoded, &[("shape", S::NAME)]);
                self.decode()
            }
        }
    }

    /// Mutable access to the decoded payload. Drops the raw side, since the
    /// caller is about to change the payload.
    pub(crate) fn decoded_mut(&mut self) -> DocumentResult<&mut S> {
        match *self {
            Cache::DecodedOnly(ref mut decoded) => Ok(decoded),
            Cache::Both { ref mut decoded, .. } => {
                let decoded = mem::take(decoded);
                *self = Cache::DecodedOnly(decoded);
                self.decoded_mut()
            }
            Cache::RawOnly(ref raw) => {
                let decoded = parse::<S>(raw)?;
                *self = Cache::DecodedOnly(decoded);
                log_event_with_fields(Event::DocumentDecoded, &[("shape", S::NAME)]);
                self.decoded_mut()
            }
        }
    }

    /// The serialized bytes, encoding the payload first if needed.
    ///
    /// Encoding from `DecodedOnly` frees the payload: the bytes are assumed
    /// to be leaving the process, and the next read decodes again.
    pub(crate) fn encode(&mut self) -> DocumentResult<&[u8]> {
        match *self {
            Cache::RawOnly(ref raw) | Cache::Both { ref raw, .. } => Ok(raw.as_slice()),
            Cache::DecodedOnly(ref decoded) => {
                let raw = serialize(decoded)?;
                *self = Cache::RawOnly(raw);
                log_event_with_fields(Event::DocumentEncoded, &[("shape", S::NAME)]);
                self.encode()
            }
        }
    }

    /// Borrowed view of the authoritative side. Raw wins when both are
    /// present, matching `encode`.
    pub(crate) fn cached(&self) -> Cached<'_, S> {
        match self {
            Cache::RawOnly(raw) | Cache::Both { raw, .. } => Cached::Raw(raw.as_slice()),
            Cache::DecodedOnly(decoded) => Cached::Decoded(decoded),
        }
    }

    /// Serialized bytes without touching the cache.
    pub(crate) fn to_bytes(&self) -> DocumentResult<Cow<'_, [u8]>> {
        match self {
            Cache::RawOnly(raw) | Cache::Both { raw, .. } => Ok(Cow::Borrowed(raw.as_slice())),
            Cache::DecodedOnly(decoded) => serialize(decoded).map(Cow::Owned),
        }
    }
}

impl<S: Shape> Default for Cache<S> {
    fn default() -> Self {
        Cache::DecodedOnly(S::default())
    }
}

/// Parses `raw` as shape `S`. A well-formed value of the wrong top-level
/// shape is a decode error, not a schema violation.
pub(crate) fn parse<S: Shape>(raw: &[u8]) -> DocumentResult<S> {
    serde_json::from_slice(raw).map_err(|source| {
        let reason = source.to_string();
        log_event_with_fields(
            Event::DecodeFailed,
            &[("reason", reason.as_str()), ("shape", S::NAME)],
        );
        DocumentError::Decode {
            shape: S::NAME,
            source,
        }
    })
}

fn serialize<S: Shape>(decoded: &S) -> DocumentResult<Vec<u8>> {
    serde_json::to_vec(decoded).map_err(|source| DocumentError::Encode {
        shape: S::NAME,
        source,
    })
}
