//! Reserved identifier aliasing.
//!
//! The backend treats `_id` as a metadata field and rejects documents that
//! contain it. Documents are therefore sent with `_id` renamed to a fixed
//! alias field and renamed back when read. Field names in mappings and
//! queries go through the same rename.

use std::borrow::Cow;

use search_adapter_shared::types::document::UNDERSCORE_ID;
use search_adapter_shared::Document;

/// Field name that stands in for `_id` inside stored documents.
pub const UNDERSCORE_ID_ALIAS: &str = "__movedUnderscoreId63__";

/// Rename `_id` to the alias field.
///
/// Returns the document borrowed and untouched when it has no `_id`, which is
/// also what makes a second application a no-op.
///
/// # Example
///
/// ```
/// use search_adapter_repository::alias::{to_alias, UNDERSCORE_ID_ALIAS};
/// use search_adapter_shared::Document;
/// use serde_json::json;
///
/// let doc: Document = serde_json::from_value(json!({ "_id": "x", "title": "t" })).unwrap();
/// let aliased = to_alias(&doc);
/// assert!(!aliased.contains_key("_id"));
/// assert_eq!(aliased[UNDERSCORE_ID_ALIAS], json!("x"));
/// ```
pub fn to_alias(doc: &Document) -> Cow<'_, Document> {
    rename(doc, UNDERSCORE_ID, UNDERSCORE_ID_ALIAS)
}

/// Rename the alias field back to `_id`. Exact inverse of `to_alias`.
pub fn from_alias(doc: &Document) -> Cow<'_, Document> {
    rename(doc, UNDERSCORE_ID_ALIAS, UNDERSCORE_ID)
}

/// Owned variant of `from_alias` for documents read off the wire.
pub fn into_unaliased(mut doc: Document) -> Document {
    if let Some(value) = doc.remove(UNDERSCORE_ID_ALIAS) {
        doc.insert(UNDERSCORE_ID.to_string(), value);
    }
    doc
}

/// Map a field name referring to `_id` onto the alias field.
pub fn alias_field(field: &str) -> &str {
    if field == UNDERSCORE_ID {
        UNDERSCORE_ID_ALIAS
    } else {
        field
    }
}

fn rename<'a>(doc: &'a Document, from: &str, to: &str) -> Cow<'a, Document> {
    if !doc.contains_key(from) {
        return Cow::Borrowed(doc);
    }

    let renamed = doc
        .iter()
        .map(|(field, value)| {
            let field = if field == from { to } else { field.as_str() };
            (field.to_string(), value.clone())
        })
        .collect();

    Cow::Owned(renamed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_round_trip_with_underscore_id() {
        let original = doc(json!({ "_id": "tgg", "title": "The Great Gatsby", "year": 2012 }));

        let aliased = to_alias(&original);
        assert!(!aliased.contains_key("_id"));
        assert_eq!(aliased[UNDERSCORE_ID_ALIAS], json!("tgg"));
        assert_eq!(aliased["title"], json!("The Great Gatsby"));

        let restored = from_alias(&aliased);
        assert_eq!(restored.as_ref(), &original);
        assert_eq!(into_unaliased(aliased.into_owned()), original);
    }

    #[test]
    fn test_without_underscore_id_is_borrowed() {
        let original = doc(json!({ "id": "tgg", "title": "The Great Gatsby" }));

        assert!(matches!(to_alias(&original), Cow::Borrowed(_)));
        assert!(matches!(from_alias(&original), Cow::Borrowed(_)));
        assert_eq!(into_unaliased(original.clone()), original);
    }

    #[test]
    fn test_to_alias_twice_is_same_as_once() {
        let original = doc(json!({ "_id": 7 }));
        let once = to_alias(&original).into_owned();
        let twice = to_alias(&once);

        assert!(matches!(twice, Cow::Borrowed(_)));
        assert_eq!(twice.as_ref(), &once);
    }

    #[test]
    fn test_caller_copy_untouched() {
        let original = doc(json!({ "_id": "x" }));
        let _ = to_alias(&original);
        assert!(original.contains_key("_id"));
    }

    #[test]
    fn test_alias_field() {
        assert_eq!(alias_field("_id"), UNDERSCORE_ID_ALIAS);
        assert_eq!(alias_field("title"), "title");
        assert_eq!(alias_field("id"), "id");
    }
}
