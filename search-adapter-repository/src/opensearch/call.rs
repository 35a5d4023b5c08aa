//! HTTP call layer.
//!
//! The single place where requests reach the network: issue a request through
//! the injected transport, decide success with a status predicate, and parse
//! the body either as the success payload or as a backend error.

use serde_json::Value;
use tracing::debug;

use crate::errors::{BackendError, ErrorContext, SearchIndexError};
use crate::interfaces::{HttpRequest, HttpResponse, HttpTransport};

/// Why a call did not produce a success payload.
#[derive(Debug, Clone, PartialEq)]
pub enum CallError {
    /// The backend answered with a status the predicate rejected.
    Rejected(BackendError),
    /// No usable response: transport failure or unparseable success body.
    Failed(SearchIndexError),
}

impl CallError {
    /// Translate into a normalized error for `context`.
    pub fn normalize(self, context: &ErrorContext) -> SearchIndexError {
        match self {
            Self::Rejected(error) => error.normalize(context),
            Self::Failed(error) => error,
        }
    }
}

/// Status predicate: anything below 400.
pub fn below_400(status: u16) -> bool {
    status < 400
}

/// Issue `request` and hand the response to `handle_response`.
pub async fn call<P>(
    transport: &dyn HttpTransport,
    request: HttpRequest,
    accept: P,
) -> Result<Value, CallError>
where
    P: Fn(u16) -> bool,
{
    let method = request.method;
    let url = request.url.to_string();

    let response = transport.send(request).await.map_err(CallError::Failed)?;

    debug!(method = %method, url = %url, status = response.status, "Backend responded");

    handle_response(response, accept)
}

/// Resolve a response with the parsed body if `accept` approves its status,
/// otherwise with the backend error parsed from the body.
///
/// An empty success body resolves to `Value::Null`.
pub fn handle_response<P>(response: HttpResponse, accept: P) -> Result<Value, CallError>
where
    P: Fn(u16) -> bool,
{
    if !accept(response.status) {
        return Err(CallError::Rejected(BackendError::from_response(
            response.status,
            &response.body,
        )));
    }

    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&response.body).map_err(|e| {
        CallError::Failed(SearchIndexError::parse(format!(
            "failed to parse backend response: {}",
            e
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepted_response_is_parsed() {
        let response = HttpResponse::new(201, r#"{"acknowledged":true}"#);
        let value = handle_response(response, below_400).unwrap();
        assert_eq!(value, json!({ "acknowledged": true }));
    }

    #[test]
    fn test_accepted_empty_body_is_null() {
        let value = handle_response(HttpResponse::new(200, ""), below_400).unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn test_predicate_decides_success() {
        let response = HttpResponse::new(404, r#"{"found":false}"#);
        assert!(handle_response(response.clone(), |s| s == 404).is_ok());
        assert!(matches!(
            handle_response(response, below_400),
            Err(CallError::Rejected(_))
        ));
    }

    #[test]
    fn test_rejected_response_carries_backend_error() {
        let response = HttpResponse::new(
            404,
            r#"{"error":{"type":"index_not_found_exception","reason":"no such index"},"status":404}"#,
        );
        let err = handle_response(response, below_400).unwrap_err();
        assert_eq!(
            err,
            CallError::Rejected(BackendError::new(
                "index_not_found_exception",
                "no such index",
                404
            ))
        );
    }

    #[test]
    fn test_unparseable_success_body() {
        let err = handle_response(HttpResponse::new(200, "<html>"), below_400).unwrap_err();
        let normalized = err.normalize(&ErrorContext::for_index("movies"));
        assert!(matches!(normalized, SearchIndexError::ParseError(_)));
        assert_eq!(normalized.status(), 500);
    }
}
