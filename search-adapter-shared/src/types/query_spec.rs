//! Structured query types for the search adapter.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A structured full-text query.
///
/// Combines a fuzzy free-text match over `fields` with exact-match filters,
/// one per `filter` entry. Both may reference `_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QuerySpec {
    /// The free-text query string.
    pub query: String,

    /// Fields to match against. Empty means the backend's default fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,

    /// Field name to exact value.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub filter: Map<String, Value>,
}

impl QuerySpec {
    /// Create a query over the backend's default fields with no filters.
    ///
    /// # Example
    ///
    /// ```
    /// use search_adapter_shared::QuerySpec;
    /// use serde_json::json;
    ///
    /// let q = QuerySpec::new("gatsby")
    ///     .with_fields(["title"])
    ///     .with_filter("rating", json!(4));
    /// assert_eq!(q.filter["rating"], json!(4));
    /// ```
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            fields: Vec::new(),
            filter: Map::new(),
        }
    }

    /// Set the fields to match against.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Add an exact-match filter.
    pub fn with_filter(mut self, field: impl Into<String>, value: Value) -> Self {
        self.filter.insert(field.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_spec_builder() {
        let q = QuerySpec::new("gatsby")
            .with_fields(["title", "_id"])
            .with_filter("rating", json!(4))
            .with_filter("_id", json!("x"));

        assert_eq!(q.query, "gatsby");
        assert_eq!(q.fields, vec!["title", "_id"]);
        assert_eq!(q.filter.len(), 2);
    }

    #[test]
    fn test_query_spec_deserialize_defaults() {
        let q: QuerySpec = serde_json::from_str(r#"{"query":"gatsby"}"#).unwrap();
        assert!(q.fields.is_empty());
        assert!(q.filter.is_empty());
    }
}
