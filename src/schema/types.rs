//! Schema type definitions
//!
//! Supported shapes:
//! - table: JSON object with a closed field map
//! - list: JSON array with one element type and an optional length bound
//! - number: any JSON number
//! - string: JSON string with an optional length bound
//! - bool: JSON boolean
//! - any: wildcard
//!
//! Types are immutable once built. Share them between documents through
//! `Arc<Type>`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::kind::Kind;

/// Field map of a table type, ordered by field name.
pub type Fields = BTreeMap<String, Type>;

/// Recursive schema descriptor.
///
/// A `max_length` of zero or less means unbounded; a positive value is an
/// inclusive upper bound on element count (lists) or character count
/// (strings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Type {
    /// Object with its own field schema. Unset fields are permitted,
    /// undeclared fields are not.
    Table {
        /// Field definitions
        #[serde(default)]
        fields: Fields,
    },
    /// Homogeneous array
    List {
        /// Element type (boxed to allow recursive types)
        element: Box<Type>,
        /// Maximum number of elements if > 0
        #[serde(default, skip_serializing_if = "is_unbounded")]
        max_length: i64,
    },
    /// Any numeric representation
    Number,
    /// UTF-8 string
    String {
        /// Maximum number of characters if > 0
        #[serde(default, skip_serializing_if = "is_unbounded")]
        max_length: i64,
    },
    /// Boolean
    Bool,
    /// Matches everything, including null
    Any,
}

fn is_unbounded(max_length: &i64) -> bool {
    *max_length <= 0
}

impl Type {
    /// Number type.
    pub fn number() -> Self {
        Type::Number
    }

    /// Boolean type.
    pub fn bool() -> Self {
        Type::Bool
    }

    /// Wildcard type.
    pub fn any() -> Self {
        Type::Any
    }

    /// String type; `max_length <= 0` leaves it unbounded.
    pub fn string(max_length: i64) -> Self {
        Type::String { max_length }
    }

    /// Table type from `(name, type)` pairs.
    pub fn table<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Type)>,
    {
        Type::Table {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// List type; `max_length <= 0` leaves it unbounded.
    pub fn list(element: Type, max_length: i64) -> Self {
        Type::List {
            element: Box::new(element),
            max_length,
        }
    }

    /// Returns the kind of this node.
    pub fn kind(&self) -> Kind {
        match self {
            Type::Table { .. } => Kind::Table,
            Type::List { .. } => Kind::List,
            Type::Number => Kind::Number,
            Type::String { .. } => Kind::String,
            Type::Bool => Kind::Bool,
            Type::Any => Kind::Any,
        }
    }

    /// Element type of a list.
    pub fn element(&self) -> Option<&Type> {
        match self {
            Type::List { element, .. } => Some(element),
            _ => None,
        }
    }

    /// Effective length bound of a list or string. `None` when unbounded
    /// or when the kind carries no bound.
    pub fn max_length(&self) -> Option<usize> {
        match self {
            Type::List { max_length, .. } | Type::String { max_length } if *max_length > 0 => {
                usize::try_from(*max_length).ok()
            }
            _ => None,
        }
    }

    /// Field map of a table, or of the element table of a list of tables.
    ///
    /// The list case is a lookup convenience; the list itself still
    /// validates as an array.
    pub fn fields(&self) -> Option<&Fields> {
        match self {
            Type::Table { fields } => Some(fields),
            Type::List { element, .. } => match element.as_ref() {
                Type::Table { fields } => Some(fields),
                _ => None,
            },
            _ => None,
        }
    }

    /// Schema of a single named field.
    pub fn field(&self, name: &str) -> Option<&Type> {
        self.fields().and_then(|fields| fields.get(name))
    }

    /// Nesting depth of the schema tree. Scalars have depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Type::Table { fields } => 1 + fields.values().map(Type::depth).max().unwrap_or(0),
            Type::List { element, .. } => 1 + element.depth(),
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person() -> Type {
        Type::table([
            ("name", Type::string(32)),
            ("age", Type::number()),
            ("tags", Type::list(Type::string(0), 8)),
        ])
    }

    #[test]
    fn test_kind_of_each_factory() {
        assert_eq!(Type::number().kind(), Kind::Number);
        assert_eq!(Type::bool().kind(), Kind::Bool);
        assert_eq!(Type::any().kind(), Kind::Any);
        assert_eq!(Type::string(3).kind(), Kind::String);
        assert_eq!(Type::list(Type::any(), 0).kind(), Kind::List);
        assert_eq!(person().kind(), Kind::Table);
    }

    #[test]
    fn test_max_length_bounds() {
        assert_eq!(Type::string(5).max_length(), Some(5));
        assert_eq!(Type::string(0).max_length(), None);
        assert_eq!(Type::string(-3).max_length(), None);
        assert_eq!(Type::list(Type::number(), 2).max_length(), Some(2));
        assert_eq!(Type::number().max_length(), None);
    }

    #[test]
    fn test_list_of_tables_exposes_fields() {
        let list = Type::list(person(), 0);
        assert_eq!(list.kind(), Kind::List);
        assert!(list.fields().unwrap().contains_key("name"));
        assert_eq!(list.field("age"), Some(&Type::Number));

        assert!(Type::list(Type::number(), 0).fields().is_none());
        assert!(Type::string(0).fields().is_none());
    }

    #[test]
    fn test_depth() {
        assert_eq!(Type::number().depth(), 1);
        assert_eq!(Type::table(Vec::<(String, Type)>::new()).depth(), 1);
        assert_eq!(person().depth(), 3);
        assert_eq!(Type::list(Type::list(person(), 0), 0).depth(), 5);
    }

    #[test]
    fn test_serialized_form() {
        let ty = Type::list(Type::string(4), 2);
        let encoded = serde_json::to_value(&ty).unwrap();
        assert_eq!(
            encoded,
            json!({
                "kind": "list",
                "element": { "kind": "string", "max_length": 4 },
                "max_length": 2
            })
        );

        let unbounded = serde_json::to_value(Type::string(0)).unwrap();
        assert_eq!(unbounded, json!({ "kind": "string" }));
    }

    #[test]
    fn test_serialized_tag_matches_kind_encoding() {
        for ty in [
            person(),
            Type::list(Type::any(), 0),
            Type::number(),
            Type::string(0),
            Type::bool(),
            Type::any(),
        ] {
            let encoded = serde_json::to_value(&ty).unwrap();
            assert_eq!(encoded["kind"], ty.kind().as_str());
        }
    }

    #[test]
    fn test_deserialize_type_tree() {
        let ty: Type = serde_json::from_value(json!({
            "kind": "table",
            "fields": {
                "name": { "kind": "string", "max_length": 32 },
                "age": { "kind": "number" },
                "tags": { "kind": "list", "element": { "kind": "string" }, "max_length": 8 }
            }
        }))
        .unwrap();

        assert_eq!(ty, person());
    }

    #[test]
    fn test_deserialize_rejects_unknown_kind() {
        let result = serde_json::from_value::<Type>(json!({ "kind": "object" }));
        assert!(result.is_err());
    }
}
