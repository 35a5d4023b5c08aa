//! OpenSearch-backed HTTP transport.
//!
//! Implements `HttpTransport` on the transport layer of the `opensearch`
//! crate, which owns the connection pool, credentials and timeouts.

use async_trait::async_trait;
use opensearch::auth::Credentials;
use opensearch::http::headers::{HeaderMap, HeaderValue, CONTENT_TYPE};
use opensearch::http::transport::{SingleNodeConnectionPool, Transport, TransportBuilder};
use opensearch::http::Method;
use tracing::{debug, info};
use url::Url;

use crate::config::SearchAdapterConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::opensearch::paths::SearchPaths;

/// Transport sending requests to a single OpenSearch node.
pub struct OpenSearchTransport {
    transport: Transport,
}

impl OpenSearchTransport {
    /// Create a transport from the adapter configuration.
    ///
    /// Basic authentication is attached only when both username and password
    /// are configured.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchTransport)` - A new transport
    /// * `Err(SearchIndexError)` - If the transport cannot be built
    pub fn new(config: &SearchAdapterConfig) -> Result<Self, SearchIndexError> {
        let conn_pool = SingleNodeConnectionPool::new(Self::node_url(config));
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();

        if let Some((username, password)) = config.credentials() {
            builder = builder.auth(Credentials::Basic(
                username.to_string(),
                password.to_string(),
            ));
        }

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let transport = builder
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        info!(
            url = %config.url,
            authenticated = config.credentials().is_some(),
            "Created OpenSearch transport"
        );

        Ok(Self { transport })
    }

    /// The URL the connection pool points at.
    ///
    /// The pool joins each request path onto this URL, so it must be the bare
    /// origin that `SearchPaths` builds on; any base path is dropped.
    fn node_url(config: &SearchAdapterConfig) -> Url {
        SearchPaths::new(&config.url).origin().clone()
    }

    fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::Get,
            HttpMethod::Put => Method::Put,
            HttpMethod::Post => Method::Post,
            HttpMethod::Delete => Method::Delete,
        }
    }
}

#[async_trait]
impl HttpTransport for OpenSearchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, SearchIndexError> {
        let mut headers = HeaderMap::new();
        if request.body.is_some() {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static(request.content_type.mime()),
            );
        }

        debug!(method = %request.method, url = %request.url, "Sending backend request");

        // The connection pool already points at the origin, so only the path goes out.
        let response = self
            .transport
            .send(
                Self::method(request.method),
                request.url.path(),
                headers,
                None::<&()>,
                request.body,
                None,
            )
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        Ok(HttpResponse::new(status, body))
    }
}
