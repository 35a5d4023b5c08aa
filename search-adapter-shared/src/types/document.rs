//! Document types for the search adapter.
//!
//! Documents are open JSON objects. The adapter never interprets their fields
//! except for the identifier fields `_id` and `id`.

use serde_json::{Map, Value};

/// An open mapping of field name to JSON value.
///
/// The caller owns document contents. Anything that has to rewrite a document
/// before it goes over the wire works on a copy.
pub type Document = Map<String, Value>;

/// Field name of the backend-reserved identifier.
pub const UNDERSCORE_ID: &str = "_id";

/// Field name of the conventional caller identifier.
pub const ID: &str = "id";

/// Resolve the identifier a document carries, preferring `_id` over `id`.
///
/// Null values are treated as absent.
///
/// # Example
///
/// ```
/// use search_adapter_shared::{document_id, Document};
/// use serde_json::json;
///
/// let doc: Document = serde_json::from_value(json!({ "id": "tgg", "title": "Gatsby" })).unwrap();
/// assert_eq!(document_id(&doc), Some(&json!("tgg")));
/// ```
pub fn document_id(doc: &Document) -> Option<&Value> {
    [UNDERSCORE_ID, ID]
        .into_iter()
        .filter_map(|field| doc.get(field))
        .find(|value| !value.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_document_id_prefers_underscore_id() {
        let d = doc(json!({ "_id": "a", "id": "b" }));
        assert_eq!(document_id(&d), Some(&json!("a")));
    }

    #[test]
    fn test_document_id_falls_back_to_id() {
        let d = doc(json!({ "id": 42 }));
        assert_eq!(document_id(&d), Some(&json!(42)));

        let d = doc(json!({ "_id": null, "id": "b" }));
        assert_eq!(document_id(&d), Some(&json!("b")));
    }

    #[test]
    fn test_document_id_missing() {
        let d = doc(json!({ "title": "no id here" }));
        assert!(document_id(&d).is_none());
    }
}
