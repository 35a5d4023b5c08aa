//! Normalized search index error type.
//!
//! Every failure the adapter can produce, whatever the backend reported, is
//! funneled into `SearchIndexError`. Its serialized form is the stable
//! `{ "ok": false, "status": <code>, "msg": <message> }` shape callers branch on.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use thiserror::Error;

/// Status reported for failures that carry no backend status of their own.
pub const DEFAULT_ERROR_STATUS: u16 = 500;

/// Unified errors from search adapter operations.
///
/// Variants are the caller-visible taxonomy: malformed request, not found,
/// conflict, and generic backend failure. Transport, response-parsing and
/// request-encoding failures are generic failures without a backend status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchIndexError {
    /// Malformed request (422): missing ids on bulk documents, bad mappings,
    /// invalid index names.
    #[error("{0}")]
    ValidationError(String),

    /// Missing index or document (404).
    #[error("{0}")]
    NotFound(String),

    /// Duplicate create or already-existing resource (409).
    #[error("{0}")]
    Conflict(String),

    /// Any other failure reported by the backend, with its status.
    #[error("{msg}")]
    Backend { status: u16, msg: String },

    /// Failed to reach the backend.
    #[error("{0}")]
    ConnectionError(String),

    /// Failed to parse a successful response body.
    #[error("{0}")]
    ParseError(String),

    /// Failed to serialize a request body for the backend.
    #[error("{0}")]
    SerializationError(String),
}

impl SearchIndexError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a conflict error.
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a backend error with an explicit status.
    pub fn backend(status: u16, msg: impl Into<String>) -> Self {
        Self::Backend {
            status,
            msg: msg.into(),
        }
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Classify a status and message into the error taxonomy.
    ///
    /// 404, 409 and 422 map onto their dedicated variants; every other status
    /// is kept verbatim as a `Backend` error.
    pub fn from_status(status: u16, msg: impl Into<String>) -> Self {
        match status {
            404 => Self::not_found(msg),
            409 => Self::conflict(msg),
            422 => Self::validation(msg),
            _ => Self::backend(status, msg),
        }
    }

    /// The HTTP-style status code of this error.
    pub fn status(&self) -> u16 {
        match self {
            Self::ValidationError(_) => 422,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::Backend { status, .. } => *status,
            Self::ConnectionError(_) | Self::ParseError(_) | Self::SerializationError(_) => {
                DEFAULT_ERROR_STATUS
            }
        }
    }

    /// The human readable message of this error.
    pub fn msg(&self) -> &str {
        match self {
            Self::ValidationError(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg)
            | Self::ConnectionError(msg)
            | Self::ParseError(msg)
            | Self::SerializationError(msg) => msg,
            Self::Backend { msg, .. } => msg,
        }
    }
}

impl Serialize for SearchIndexError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SearchIndexError", 3)?;
        state.serialize_field("ok", &false)?;
        state.serialize_field("status", &self.status())?;
        state.serialize_field("msg", self.msg())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_status_classification() {
        assert!(matches!(
            SearchIndexError::from_status(404, "gone"),
            SearchIndexError::NotFound(_)
        ));
        assert!(matches!(
            SearchIndexError::from_status(409, "dup"),
            SearchIndexError::Conflict(_)
        ));
        assert!(matches!(
            SearchIndexError::from_status(422, "bad"),
            SearchIndexError::ValidationError(_)
        ));
        assert_eq!(
            SearchIndexError::from_status(503, "busy"),
            SearchIndexError::backend(503, "busy")
        );
    }

    #[test]
    fn test_status_and_msg() {
        let err = SearchIndexError::connection("connection refused");
        assert_eq!(err.status(), 500);
        assert_eq!(err.msg(), "connection refused");
        assert_eq!(err.to_string(), "connection refused");

        let err = SearchIndexError::serialization("failed to encode request");
        assert_eq!(err.status(), 500);
        assert_eq!(err.msg(), "failed to encode request");
    }

    #[test]
    fn test_serialize_normalized_shape() {
        let err = SearchIndexError::not_found("index movies not found");
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({ "ok": false, "status": 404, "msg": "index movies not found" })
        );
    }
}
