//! Request and response types for search adapter operations.

use search_adapter_shared::Document;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::{json, Value};

use crate::errors::SearchIndexError;

/// Identifies a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// The index holding the document.
    pub index: String,
    /// The caller-assigned document key.
    pub key: String,
}

impl DocumentRef {
    pub fn new(index: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            key: key.into(),
        }
    }
}

/// Request to store a document under a key.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDocumentRequest {
    /// The target index.
    pub index: String,
    /// The caller-assigned document key.
    pub key: String,
    /// The document body. May contain the reserved `_id` field.
    pub doc: Document,
}

impl IndexDocumentRequest {
    pub fn new(index: impl Into<String>, key: impl Into<String>, doc: Document) -> Self {
        Self {
            index: index.into(),
            key: key.into(),
            doc,
        }
    }
}

/// Request to write many documents in one call.
///
/// Every document must carry an `id` or `_id` field.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkRequest {
    pub index: String,
    pub docs: Vec<Document>,
}

impl BulkRequest {
    pub fn new(index: impl Into<String>, docs: Vec<Document>) -> Self {
        Self {
            index: index.into(),
            docs,
        }
    }
}

/// A fetched document.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GetDocumentResponse {
    pub key: String,
    pub doc: Document,
}

/// Outcome of one document within a bulk write.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkItemResult {
    /// The document was written.
    Ok { id: String },
    /// The document was rejected.
    Failed {
        /// Key of the rejected document.
        key: String,
        error: SearchIndexError,
    },
}

impl BulkItemResult {
    /// Whether this document was written.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

impl Serialize for BulkItemResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Ok { id } => {
                let mut state = serializer.serialize_struct("BulkItemResult", 2)?;
                state.serialize_field("ok", &true)?;
                state.serialize_field("id", id)?;
                state.end()
            }
            Self::Failed { error, .. } => error.serialize(serializer),
        }
    }
}

/// Result of a bulk write whose batch was accepted.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BulkResponse {
    /// One entry per document, in request order.
    pub results: Vec<BulkItemResult>,
}

impl BulkResponse {
    /// Number of documents that were written.
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_ok()).count()
    }

    /// Number of documents that were rejected.
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

/// Matching documents of a query, in backend order.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct QueryResponse {
    pub matches: Vec<Document>,
}

/// Render an operation result in the `{ "ok": ... }` response shape.
///
/// Successes become `{"ok": true, ...fields}`; errors become
/// `{"ok": false, "status": ..., "msg": ...}`.
pub fn to_response_json<T: Serialize>(
    result: &Result<T, SearchIndexError>,
) -> serde_json::Result<Value> {
    match result {
        Ok(value) => match serde_json::to_value(value)? {
            Value::Object(mut fields) => {
                fields.insert("ok".to_string(), Value::Bool(true));
                Ok(Value::Object(fields))
            }
            _ => Ok(json!({ "ok": true })),
        },
        Err(error) => serde_json::to_value(error),
    }
}
