//! Index specification types.

use serde::{Deserialize, Serialize};

/// Describes an index to create.
///
/// Constructed by the caller per create-index call and translated once into a
/// backend mapping payload; it is not retained by the adapter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct IndexSpec {
    /// The index name.
    pub index: String,
    /// Ordered field names to map. Each becomes a full-text field.
    #[serde(default)]
    pub fields: Vec<String>,
}

impl IndexSpec {
    /// Create a new index specification.
    ///
    /// # Example
    ///
    /// ```
    /// use search_adapter_shared::IndexSpec;
    ///
    /// let spec = IndexSpec::new("movies", ["title", "_id"]);
    /// assert_eq!(spec.fields, vec!["title".to_string(), "_id".to_string()]);
    /// ```
    pub fn new<I, S>(index: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            index: index.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_without_fields() {
        let spec: IndexSpec = serde_json::from_str(r#"{"index":"movies"}"#).unwrap();
        assert_eq!(spec.index, "movies");
        assert!(spec.fields.is_empty());
    }
}
