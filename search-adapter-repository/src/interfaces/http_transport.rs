//! HTTP transport trait definition.
//!
//! The adapter never opens connections itself. It hands fully built requests
//! to an injected `HttpTransport` and receives the raw status and body back.

use std::fmt;

use async_trait::async_trait;
use url::Url;

use crate::errors::SearchIndexError;

/// HTTP verbs used against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        };
        f.write_str(method)
    }
}

/// Encoding of a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// A single JSON document.
    Json,
    /// Newline-delimited JSON, used by the bulk endpoint.
    NdJson,
}

impl ContentType {
    /// The MIME type sent in the `Content-Type` header.
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::NdJson => "application/x-ndjson",
        }
    }
}

/// A request ready to be issued against the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub content_type: ContentType,
    pub body: Option<String>,
}

impl HttpRequest {
    /// A request without a body.
    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            content_type: ContentType::Json,
            body: None,
        }
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: String) -> Self {
        self.content_type = ContentType::Json;
        self.body = Some(body);
        self
    }

    /// Attach a newline-delimited JSON body.
    pub fn ndjson(mut self, body: String) -> Self {
        self.content_type = ContentType::NdJson;
        self.body = Some(body);
        self
    }
}

/// Raw status and body returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Issues HTTP requests against the search backend.
///
/// Implementations own connection handling, authentication, and timeouts.
/// A response with any status is `Ok`; only failures to obtain a response at
/// all (connection refused, timeout, body read failure) are `Err`, normally as
/// `SearchIndexError::ConnectionError`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a request and return the raw response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, SearchIndexError>;
}
