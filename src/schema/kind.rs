//! Closed set of categories a schema node can describe
//!
//! The external encoding is a fixed string table. Encoding is total;
//! decoding anything outside the table fails with `JSONSHAPE_UNKNOWN_KIND`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::errors::SchemaError;

/// Primitive or structural category of a [`Type`](super::Type) node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    /// JSON object with a closed set of named fields
    Table,
    /// JSON array with a single element type
    List,
    /// Any JSON number
    Number,
    /// JSON string, optionally length-bounded
    String,
    /// JSON boolean
    Bool,
    /// Wildcard, matches every value
    Any,
}

impl Kind {
    /// Every kind, in declaration order.
    pub const ALL: [Kind; 6] = [
        Kind::Table,
        Kind::List,
        Kind::Number,
        Kind::String,
        Kind::Bool,
        Kind::Any,
    ];

    /// Returns the external string encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Table => "table",
            Kind::List => "list",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Bool => "bool",
            Kind::Any => "any",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| SchemaError::unknown_kind(s))
    }
}

impl Serialize for Kind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Kind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_encoding_is_bijective() {
        for kind in Kind::ALL {
            let parsed: Kind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }

        let mut names: Vec<_> = Kind::ALL.iter().map(|k| k.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Kind::ALL.len());
    }

    #[test]
    fn test_kind_serde_string() {
        let encoded = serde_json::to_string(&Kind::Number).unwrap();
        assert_eq!(encoded, "\"number\"");

        let decoded: Kind = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, Kind::Number);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = "object".parse::<Kind>().unwrap_err();
        assert_eq!(err.code().code(), "JSONSHAPE_UNKNOWN_KIND");
        assert!(err.message().contains("object"));

        assert!(serde_json::from_str::<Kind>("\"Number\"").is_err());
        assert!(serde_json::from_str::<Kind>("3").is_err());
    }
}
