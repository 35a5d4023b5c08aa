//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! for OpenSearch and Elasticsearch compatible backends. Every operation is a
//! strict sequence of HTTP calls through the injected `HttpTransport`; a
//! failing step returns immediately and later steps are never issued.

use async_trait::async_trait;
use search_adapter_shared::{Document, IndexSpec, QuerySpec};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::alias::{into_unaliased, to_alias};
use crate::config::SearchAdapterConfig;
use crate::errors::{ErrorContext, SearchIndexError};
use crate::interfaces::{HttpMethod, HttpRequest, HttpTransport, SearchIndexProvider};
use crate::opensearch::bulk;
use crate::opensearch::call::{below_400, call, CallError};
use crate::opensearch::index_config::get_index_mappings;
use crate::opensearch::paths::SearchPaths;
use crate::opensearch::query;
use crate::opensearch::transport::OpenSearchTransport;
use crate::types::{
    BulkRequest, BulkResponse, DocumentRef, GetDocumentResponse, IndexDocumentRequest,
    QueryResponse,
};

/// Message of the error returned when `index_doc` finds the key in use.
pub const DOCUMENT_CONFLICT_MESSAGE: &str = "document conflict";

/// OpenSearch provider implementation.
///
/// # Example
///
/// ```ignore
/// use search_adapter_repository::{OpenSearchProvider, SearchAdapterConfig, SearchIndexProvider};
/// use search_adapter_repository::types::IndexDocumentRequest;
///
/// let config = SearchAdapterConfig::new("http://localhost:9200")?;
/// let provider = OpenSearchProvider::new(&config)?;
///
/// let doc = serde_json::from_value(serde_json::json!({ "title": "The Great Gatsby" }))?;
/// provider
///     .index_doc(&IndexDocumentRequest::new("movies", "tgg", doc))
///     .await?;
/// ```
pub struct OpenSearchProvider {
    transport: Box<dyn HttpTransport>,
    paths: SearchPaths,
}

impl OpenSearchProvider {
    /// Create a provider talking to the backend described by `config`.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(SearchIndexError)` - If the transport cannot be built
    pub fn new(config: &SearchAdapterConfig) -> Result<Self, SearchIndexError> {
        let transport = OpenSearchTransport::new(config)?;
        Ok(Self::with_transport(&config.url, Box::new(transport)))
    }

    /// Create a provider issuing its calls through `transport`.
    ///
    /// Resource URLs are built on the origin of `url`.
    pub fn with_transport(url: &Url, transport: Box<dyn HttpTransport>) -> Self {
        let paths = SearchPaths::new(url);

        info!(origin = %paths.origin(), "Created OpenSearch provider");

        Self { transport, paths }
    }

    async fn send<P>(&self, request: HttpRequest, accept: P) -> Result<Value, CallError>
    where
        P: Fn(u16) -> bool + Send,
    {
        call(self.transport.as_ref(), request, accept).await
    }

    /// Verify the index is reachable before writing to it.
    ///
    /// The backend may create a missing index on first write, which would hide
    /// the missing-index error from the caller.
    async fn check_index_exists(&self, index: &str) -> Result<(), SearchIndexError> {
        let request = HttpRequest::new(HttpMethod::Get, self.paths.index(index));

        self.send(request, below_400)
            .await
            .map(drop)
            .map_err(|e| Self::failure("check_index_exists", e, &ErrorContext::for_index(index)))
    }

    fn failure(operation: &str, error: CallError, context: &ErrorContext) -> SearchIndexError {
        let error = error.normalize(context);
        warn!(
            operation = operation,
            status = error.status(),
            msg = %error,
            "Search operation failed"
        );
        error
    }

    fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, SearchIndexError> {
        serde_json::to_string(value).map_err(|e| {
            SearchIndexError::serialization(format!("failed to encode request: {}", e))
        })
    }

    /// The stored document of a get response, un-aliased.
    ///
    /// A response without an object `_source` (e.g. source storage disabled
    /// in the mapping) yields an empty document.
    fn stored_document(body: Value) -> Document {
        match body {
            Value::Object(mut envelope) => match envelope.remove("_source") {
                Some(Value::Object(source)) => into_unaliased(source),
                _ => Document::new(),
            },
            _ => Document::new(),
        }
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    async fn create_index(&self, spec: &IndexSpec) -> Result<(), SearchIndexError> {
        let body = Self::encode(&get_index_mappings(spec))?;
        let request = HttpRequest::new(HttpMethod::Put, self.paths.index(&spec.index)).json(body);

        self.send(request, below_400).await.map_err(|e| {
            Self::failure("create_index", e, &ErrorContext::for_index(&spec.index))
        })?;

        debug!(index = %spec.index, fields = ?spec.fields, "Index created");
        Ok(())
    }

    async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError> {
        let request = HttpRequest::new(HttpMethod::Delete, self.paths.index(index));

        self.send(request, |status| status == 200)
            .await
            .map_err(|e| Self::failure("delete_index", e, &ErrorContext::for_index(index)))?;

        debug!(index = %index, "Index deleted");
        Ok(())
    }

    async fn index_doc(&self, request: &IndexDocumentRequest) -> Result<(), SearchIndexError> {
        let IndexDocumentRequest { index, key, doc } = request;
        let doc = to_alias(doc);

        self.check_index_exists(index).await?;

        // A 404 is the only outcome that proves the key is free.
        let lookup = HttpRequest::new(HttpMethod::Get, self.paths.document(index, key));
        if let Err(e) = self.send(lookup, |status| status == 404).await {
            debug!(index = %index, key = %key, outcome = ?e, "Document key already in use");
            return Err(SearchIndexError::conflict(DOCUMENT_CONFLICT_MESSAGE));
        }

        let body = Self::encode(doc.as_ref())?;
        let put = HttpRequest::new(HttpMethod::Put, self.paths.document(index, key)).json(body);

        self.send(put, below_400).await.map_err(|e| {
            Self::failure("index_doc", e, &ErrorContext::for_document(index, key))
        })?;

        debug!(index = %index, key = %key, "Document indexed");
        Ok(())
    }

    async fn get_doc(&self, request: &DocumentRef) -> Result<GetDocumentResponse, SearchIndexError> {
        let DocumentRef { index, key } = request;
        let get = HttpRequest::new(HttpMethod::Get, self.paths.document(index, key));

        let body = self.send(get, below_400).await.map_err(|e| {
            Self::failure("get_doc", e, &ErrorContext::for_document(index, key))
        })?;

        debug!(index = %index, key = %key, "Document fetched");
        Ok(GetDocumentResponse {
            key: key.clone(),
            doc: Self::stored_document(body),
        })
    }

    async fn update_doc(&self, request: &IndexDocumentRequest) -> Result<(), SearchIndexError> {
        let IndexDocumentRequest { index, key, doc } = request;
        let doc = to_alias(doc);

        self.check_index_exists(index).await?;

        let body = Self::encode(doc.as_ref())?;
        let put = HttpRequest::new(HttpMethod::Put, self.paths.document(index, key)).json(body);

        self.send(put, below_400).await.map_err(|e| {
            Self::failure("update_doc", e, &ErrorContext::for_document(index, key))
        })?;

        debug!(index = %index, key = %key, "Document updated");
        Ok(())
    }

    async fn remove_doc(&self, request: &DocumentRef) -> Result<(), SearchIndexError> {
        let DocumentRef { index, key } = request;
        let delete = HttpRequest::new(HttpMethod::Delete, self.paths.document(index, key));

        // Removing a document that is already gone is not a failure.
        self.send(delete, |status| status < 400 || status == 404)
            .await
            .map_err(|e| {
                Self::failure("remove_doc", e, &ErrorContext::for_document(index, key))
            })?;

        debug!(index = %index, key = %key, "Document removed");
        Ok(())
    }

    async fn bulk(&self, request: &BulkRequest) -> Result<BulkResponse, SearchIndexError> {
        let BulkRequest { index, docs } = request;

        bulk::validate_document_ids(docs)?;
        self.check_index_exists(index).await?;

        if docs.is_empty() {
            debug!(index = %index, "Empty bulk request, nothing to write");
            return Ok(BulkResponse { results: vec![] });
        }

        let payload = bulk::to_bulk_payload(index, docs)?;
        let post = HttpRequest::new(HttpMethod::Post, self.paths.bulk()).ndjson(payload);

        let body = self.send(post, below_400).await.map_err(|e| {
            let subject = format!("docs with ids {}", bulk::joined_ids(docs));
            Self::failure("bulk", e, &ErrorContext::new(subject, index))
        })?;

        let response = BulkResponse {
            results: bulk::reconcile_items(index, &body),
        };

        debug!(
            index = %index,
            total = docs.len(),
            succeeded = response.succeeded(),
            failed = response.failed(),
            "Bulk write completed"
        );
        Ok(response)
    }

    async fn query(
        &self,
        index: &str,
        spec: &QuerySpec,
    ) -> Result<QueryResponse, SearchIndexError> {
        let body = Self::encode(&query::to_search_body(spec))?;
        let post = HttpRequest::new(HttpMethod::Post, self.paths.search(index)).json(body);

        let response = self.send(post, below_400).await.map_err(|e| {
            let context = ErrorContext::new(format!("query against index {}", index), index);
            Self::failure("query", e, &context)
        })?;

        let matches = query::extract_matches(&response);

        debug!(index = %index, matches = matches.len(), "Query completed");
        Ok(QueryResponse { matches })
    }
}
