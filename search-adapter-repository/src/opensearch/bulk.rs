//! Bulk request construction and response reconciliation.
//!
//! The bulk endpoint takes newline-delimited JSON: for each document an action
//! line followed by the document body. Its response lists one item per action,
//! each either a success or its own error.

use search_adapter_shared::{document_id, Document};
use serde_json::{json, Value};

use crate::alias::to_alias;
use crate::errors::{BackendError, ErrorContext, SearchIndexError, DEFAULT_ERROR_STATUS};
use crate::types::BulkItemResult;

/// Message of the error raised when a bulk document has no identifier.
pub const MISSING_ID_MESSAGE: &str = "Each document must have an id or _id field";

/// Check that every document carries an `id` or `_id`.
pub fn validate_document_ids(docs: &[Document]) -> Result<(), SearchIndexError> {
    if docs.iter().all(|doc| document_id(doc).is_some()) {
        Ok(())
    } else {
        Err(SearchIndexError::validation(MISSING_ID_MESSAGE))
    }
}

/// Build the NDJSON payload indexing `docs` into `index`.
///
/// Two lines per document, in input order, each encoded on its own; the
/// payload ends with the newline the endpoint requires.
pub fn to_bulk_payload(index: &str, docs: &[Document]) -> Result<String, SearchIndexError> {
    let mut payload = String::new();

    for doc in docs {
        let id = document_id(doc).cloned().unwrap_or(Value::Null);
        let action = json!({ "index": { "_index": index, "_id": id } });

        for line in [action, Value::Object(to_alias(doc).into_owned())] {
            let encoded = serde_json::to_string(&line).map_err(|e| {
                SearchIndexError::serialization(format!("failed to encode bulk document: {}", e))
            })?;
            payload.push_str(&encoded);
            payload.push('\n');
        }
    }

    Ok(payload)
}

/// Identifiers of `docs` joined for the batch-level error message.
pub fn joined_ids(docs: &[Document]) -> String {
    docs.iter()
        .filter_map(document_id)
        .map(|id| match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reconcile the items of an accepted bulk response.
///
/// Each item is the value under its action key (`index`, `create`, ...).
/// Items carrying an `error` object are normalized against their own status.
pub fn reconcile_items(index: &str, response: &Value) -> Vec<BulkItemResult> {
    response
        .get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(action_result)
                .map(|item| reconcile_item(index, item))
                .collect()
        })
        .unwrap_or_default()
}

fn action_result(item: &Value) -> Option<&Value> {
    item.get("index")
        .or_else(|| item.as_object().and_then(|actions| actions.values().next()))
}

fn reconcile_item(index: &str, item: &Value) -> BulkItemResult {
    let id = item
        .get("_id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    match item.get("error") {
        Some(error) => {
            let status = item
                .get("status")
                .and_then(Value::as_u64)
                .and_then(|s| u16::try_from(s).ok())
                .unwrap_or(DEFAULT_ERROR_STATUS);
            let context = ErrorContext::for_document(index, &id);
            let error = match error {
                Value::Object(_) => BackendError::from_error_object(error, status),
                _ => BackendError::from_body(item, status),
            };
            BulkItemResult::Failed {
                key: id,
                error: error.normalize(&context),
            }
        }
        None => BulkItemResult::Ok { id },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::UNDERSCORE_ID_ALIAS;

    fn doc(value: Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_validate_document_ids() {
        let docs = vec![doc(json!({ "id": "a" })), doc(json!({ "_id": "b" }))];
        assert!(validate_document_ids(&docs).is_ok());

        let docs = vec![doc(json!({ "id": "a" })), doc(json!({ "title": "no id" }))];
        assert_eq!(
            validate_document_ids(&docs).unwrap_err(),
            SearchIndexError::validation("Each document must have an id or _id field")
        );
    }

    #[test]
    fn test_bulk_payload_two_documents() {
        let docs = vec![
            doc(json!({ "id": "tgg", "title": "The Great Gatsby" })),
            doc(json!({ "_id": "tfg", "title": "The Foo Gatsby" })),
        ];

        let payload = to_bulk_payload("movies", &docs).unwrap();
        assert!(payload.ends_with('\n'));

        let lines: Vec<Value> = payload
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 4);

        assert_eq!(lines[0], json!({ "index": { "_index": "movies", "_id": "tgg" } }));
        assert_eq!(lines[1], json!({ "id": "tgg", "title": "The Great Gatsby" }));
        assert_eq!(lines[2], json!({ "index": { "_index": "movies", "_id": "tfg" } }));
        assert_eq!(lines[3], json!({ UNDERSCORE_ID_ALIAS: "tfg", "title": "The Foo Gatsby" }));
    }

    #[test]
    fn test_joined_ids() {
        let docs = vec![doc(json!({ "id": "a" })), doc(json!({ "_id": 2 }))];
        assert_eq!(joined_ids(&docs), "a, 2");
    }

    #[test]
    fn test_reconcile_mixed_items() {
        let response = json!({
            "took": 3,
            "errors": true,
            "items": [
                { "index": { "_index": "movies", "_id": "tgg", "status": 201, "result": "created" } },
                { "index": {
                    "_index": "movies",
                    "_id": "tfg",
                    "status": 400,
                    "error": { "type": "resource_already_exists_exception", "reason": "exists" }
                } }
            ]
        });

        let results = reconcile_items("movies", &response);
        assert_eq!(
            serde_json::to_value(&results).unwrap(),
            json!([
                { "ok": true, "id": "tgg" },
                { "ok": false, "status": 409, "msg": "document at key tfg already exists" }
            ])
        );
    }

    #[test]
    fn test_reconcile_unknown_error_keeps_item_status() {
        let response = json!({
            "items": [
                { "create": {
                    "_id": "x",
                    "status": 429,
                    "error": { "type": "es_rejected_execution_exception", "reason": "queue full" }
                } }
            ]
        });

        let results = reconcile_items("movies", &response);
        assert_eq!(
            results,
            vec![BulkItemResult::Failed {
                key: "x".to_string(),
                error: SearchIndexError::backend(429, "queue full"),
            }]
        );
    }

    #[test]
    fn test_reconcile_without_items() {
        assert!(reconcile_items("movies", &json!({})).is_empty());
    }
}
