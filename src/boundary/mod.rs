//! Boundary adapters
//!
//! Glue between documents and the outside world:
//!
//! - [`Scan`] / [`Bind`]: byte-oriented store values in and out
//! - serde `Serialize` / `Deserialize` for JSON codecs
//! - rusqlite `FromSql` / `ToSql` behind the `sqlite` feature
//!
//! Inbound data is sniffed before it is accepted and parsed lazily on first
//! read. Outbound data is the document's cached or freshly encoded bytes.

mod codec;
#[cfg(feature = "sqlite")]
mod sqlite;
mod store;

pub use store::{Bind, BindValue, Scan, ScanSource};
