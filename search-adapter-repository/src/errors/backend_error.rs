//! Backend error parsing and translation.
//!
//! A backend failure arrives as an HTTP status plus a JSON body whose shape
//! varies by operation. `BackendError` captures the three facts the adapter
//! cares about (type code, reason, status) and `BackendError::normalize`
//! turns them into a `SearchIndexError` using a fixed, type-keyed table.

use serde_json::Value;

use super::SearchIndexError;

/// Type code used when the body names none.
pub const UNKNOWN_ERROR_TYPE: &str = "unknown";

/// Reason used when the body carries none.
pub const DEFAULT_REASON: &str = "an error occurred";

/// Type code for a missing document reported without an `error` object.
const NOT_FOUND_TYPE: &str = "not_found";

/// What was being acted on when an error occurred. Fills message templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// The resource acted on, e.g. `document at key tgg`.
    pub subject: String,
    /// The index acted on, e.g. `index movies`.
    pub index: String,
}

impl ErrorContext {
    /// Context for an arbitrary subject within `index`.
    pub fn new(subject: impl Into<String>, index: &str) -> Self {
        Self {
            subject: subject.into(),
            index: format!("index {}", index),
        }
    }

    /// Context for operations on the index itself.
    pub fn for_index(index: &str) -> Self {
        Self::new(format!("index {}", index), index)
    }

    /// Context for operations on a single document.
    pub fn for_document(index: &str, key: &str) -> Self {
        Self::new(format!("document at key {}", key), index)
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageTemplate {
    SubjectAlreadyExists,
    MappingParseFailure,
    IndexNotFound,
    SubjectNotFound,
}

impl MessageTemplate {
    fn render(self, context: &ErrorContext, reason: &str) -> String {
        match self {
            Self::SubjectAlreadyExists => format!("{} already exists", context.subject),
            Self::MappingParseFailure => {
                format!("failed to parse mapping for {}: {}", context.subject, reason)
            }
            Self::IndexNotFound => format!("{} not found", context.index),
            Self::SubjectNotFound => format!("{} not found", context.subject),
        }
    }
}

/// Backend error type code to normalized status and message template.
const ERROR_TABLE: &[(&str, u16, MessageTemplate)] = &[
    (
        "resource_already_exists_exception",
        409,
        MessageTemplate::SubjectAlreadyExists,
    ),
    (
        "mapper_parsing_exception",
        422,
        MessageTemplate::MappingParseFailure,
    ),
    (
        "index_not_found_exception",
        404,
        MessageTemplate::IndexNotFound,
    ),
    (
        "resource_not_found_exception",
        404,
        MessageTemplate::SubjectNotFound,
    ),
    (NOT_FOUND_TYPE, 404, MessageTemplate::SubjectNotFound),
];

/// A backend error extracted from a response body.
///
/// Short lived: built from a failed response and consumed by `normalize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    /// Backend error type code, e.g. `index_not_found_exception`.
    pub error_type: String,
    /// Most specific reason found in the body.
    pub reason: String,
    /// Status embedded in the body, else the HTTP status.
    pub status: u16,
}

impl BackendError {
    /// Create a backend error from its parts.
    pub fn new(error_type: impl Into<String>, reason: impl Into<String>, status: u16) -> Self {
        Self {
            error_type: error_type.into(),
            reason: reason.into(),
            status,
        }
    }

    /// Parse a raw response body returned with `http_status`.
    ///
    /// Bodies that are not JSON keep their trimmed text as the reason.
    pub fn from_response(http_status: u16, body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_body(&value, http_status),
            Err(_) => {
                let text = body.trim();
                let reason = if text.is_empty() { DEFAULT_REASON } else { text };
                Self::new(UNKNOWN_ERROR_TYPE, reason, http_status)
            }
        }
    }

    /// Extract a backend error from a parsed response body.
    ///
    /// Handles the `{"error": {...}, "status": N}` envelope, the legacy
    /// `{"error": "message"}` form, and the document lookups that report a
    /// miss with `"found": false` or `"result": "not_found"`.
    pub fn from_body(body: &Value, http_status: u16) -> Self {
        let status = status_of(body).unwrap_or(http_status);

        match body.get("error") {
            Some(error @ Value::Object(_)) => Self::from_error_object(error, status),
            Some(Value::String(reason)) => Self::new(UNKNOWN_ERROR_TYPE, reason.as_str(), status),
            _ if reports_missing_document(body) => {
                Self::new(NOT_FOUND_TYPE, DEFAULT_REASON, status)
            }
            _ => Self::new(UNKNOWN_ERROR_TYPE, DEFAULT_REASON, status),
        }
    }

    /// Extract a backend error from an `error` object.
    ///
    /// `fallback_status` is used when the object embeds no status of its own,
    /// as with bulk response items where the status sits beside the error.
    pub fn from_error_object(error: &Value, fallback_status: u16) -> Self {
        let error_type = error
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_ERROR_TYPE);

        let reason = error
            .pointer("/caused_by/reason")
            .and_then(Value::as_str)
            .or_else(|| error.get("reason").and_then(Value::as_str))
            .unwrap_or(DEFAULT_REASON);

        let status = status_of(error).unwrap_or(fallback_status);

        Self::new(error_type, reason, status)
    }

    /// Translate into the normalized error taxonomy.
    ///
    /// Known type codes take their status and message from the fixed table;
    /// anything else keeps the backend status and uses the reason verbatim.
    pub fn normalize(&self, context: &ErrorContext) -> SearchIndexError {
        match ERROR_TABLE
            .iter()
            .find(|(error_type, _, _)| *error_type == self.error_type)
        {
            Some((_, status, template)) => {
                SearchIndexError::from_status(*status, template.render(context, &self.reason))
            }
            None => SearchIndexError::from_status(self.status, self.reason.clone()),
        }
    }
}

fn status_of(value: &Value) -> Option<u16> {
    value
        .get("status")
        .and_then(Value::as_u64)
        .and_then(|status| u16::try_from(status).ok())
}

fn reports_missing_document(body: &Value) -> bool {
    body.get("found") == Some(&Value::Bool(false))
        || body.get("result").and_then(Value::as_str) == Some(NOT_FOUND_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn movies() -> ErrorContext {
        ErrorContext::for_index("movies")
    }

    #[test]
    fn test_index_not_found_uses_index_template() {
        let err = BackendError::new("index_not_found_exception", "no such index [movies]", 404);
        let normalized = err.normalize(&movies());

        assert_eq!(normalized, SearchIndexError::not_found("index movies not found"));
        assert_eq!(
            serde_json::to_value(&normalized).unwrap(),
            json!({ "ok": false, "status": 404, "msg": "index movies not found" })
        );
    }

    #[test]
    fn test_already_exists_uses_subject() {
        let err = BackendError::new("resource_already_exists_exception", "exists", 400);
        let context = ErrorContext::for_document("movies", "tgg");

        assert_eq!(
            err.normalize(&context),
            SearchIndexError::conflict("document at key tgg already exists")
        );
    }

    #[test]
    fn test_mapper_parsing_includes_reason() {
        let err = BackendError::new("mapper_parsing_exception", "foo", 400);
        let normalized = err.normalize(&movies());

        assert_eq!(normalized.status(), 422);
        assert_eq!(
            normalized.msg(),
            "failed to parse mapping for index movies: foo"
        );
    }

    #[test]
    fn test_not_found_types_use_subject() {
        let context = ErrorContext::for_document("movies", "tgg");
        for error_type in ["resource_not_found_exception", "not_found"] {
            let err = BackendError::new(error_type, "whatever", 404);
            assert_eq!(
                err.normalize(&context),
                SearchIndexError::not_found("document at key tgg not found")
            );
        }
    }

    #[test]
    fn test_unknown_type_falls_back_to_status_and_reason() {
        let err = BackendError::new("cluster_block_exception", "index read-only", 403);
        assert_eq!(
            err.normalize(&movies()),
            SearchIndexError::backend(403, "index read-only")
        );
    }

    #[test]
    fn test_from_body_prefers_caused_by_reason_and_body_status() {
        let body = json!({
            "error": {
                "type": "mapper_parsing_exception",
                "reason": "top level",
                "caused_by": { "type": "x", "reason": "nested reason" }
            },
            "status": 400
        });

        let err = BackendError::from_body(&body, 500);
        assert_eq!(err.error_type, "mapper_parsing_exception");
        assert_eq!(err.reason, "nested reason");
        assert_eq!(err.status, 400);
    }

    #[test]
    fn test_from_body_defaults() {
        let err = BackendError::from_body(&json!({ "error": {} }), 502);
        assert_eq!(err, BackendError::new("unknown", "an error occurred", 502));

        let err = BackendError::from_body(&json!({ "error": "legacy message" }), 400);
        assert_eq!(err, BackendError::new("unknown", "legacy message", 400));
    }

    #[test]
    fn test_from_body_missing_document() {
        let body = json!({ "_index": "movies", "_id": "tgg", "found": false });
        let err = BackendError::from_body(&body, 404);
        assert_eq!(err.error_type, "not_found");

        let body = json!({ "_index": "movies", "_id": "tgg", "result": "not_found" });
        assert_eq!(BackendError::from_body(&body, 404).error_type, "not_found");
    }

    #[test]
    fn test_from_error_object_uses_fallback_status() {
        let error = json!({ "type": "version_conflict_engine_exception", "reason": "conflict" });
        let err = BackendError::from_error_object(&error, 409);
        assert_eq!(err.status, 409);
        assert_eq!(
            err.normalize(&movies()),
            SearchIndexError::conflict("conflict")
        );
    }

    #[test]
    fn test_from_response_non_json_body() {
        let err = BackendError::from_response(502, "  Bad Gateway\n");
        assert_eq!(err, BackendError::new("unknown", "Bad Gateway", 502));

        let err = BackendError::from_response(500, "");
        assert_eq!(err.reason, "an error occurred");
    }
}
