//! Search index provider trait definition.
//!
//! This module defines the backend-agnostic document-store and search
//! contract. `OpenSearchProvider` implements it over an `HttpTransport`.

use async_trait::async_trait;
use search_adapter_shared::{IndexSpec, QuerySpec};

use crate::errors::SearchIndexError;
use crate::types::{
    BulkRequest, BulkResponse, DocumentRef, GetDocumentResponse, IndexDocumentRequest,
    QueryResponse,
};

/// Abstracts the underlying search index implementation.
///
/// Implementations are injected into `SearchIndexService` to enable dependency
/// injection and testing with mock implementations.
///
/// Every method completes with either a success value or a normalized
/// `SearchIndexError`; no backend-specific error shape escapes.
///
/// # Concurrency
///
/// Implementations hold no mutable state. Multi-step operations issue their
/// backend calls strictly in sequence, and nothing serializes concurrent calls
/// on the same document key.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Create an index with one full-text field per entry in `spec.fields`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the backend created the index
    /// * `Err(SearchIndexError::Conflict)` - If the index already exists
    /// * `Err(SearchIndexError::ValidationError)` - If the mapping was rejected
    async fn create_index(&self, spec: &IndexSpec) -> Result<(), SearchIndexError>;

    /// Delete an index.
    ///
    /// Unlike `remove_doc`, deleting a missing index is a failure.
    async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError>;

    /// Store a document under a key that must not already be in use.
    ///
    /// Uniqueness is checked with a lookup before the write and is therefore
    /// best effort: two concurrent callers can both pass the check.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was stored
    /// * `Err(SearchIndexError::NotFound)` - If the index does not exist
    /// * `Err(SearchIndexError::Conflict)` - If the key is already in use
    async fn index_doc(&self, request: &IndexDocumentRequest) -> Result<(), SearchIndexError>;

    /// Fetch a document by key.
    async fn get_doc(&self, request: &DocumentRef) -> Result<GetDocumentResponse, SearchIndexError>;

    /// Replace the document stored under a key, creating it if absent.
    async fn update_doc(&self, request: &IndexDocumentRequest) -> Result<(), SearchIndexError>;

    /// Remove a document. Removing a missing document succeeds.
    async fn remove_doc(&self, request: &DocumentRef) -> Result<(), SearchIndexError>;

    /// Write many documents in one backend call.
    ///
    /// Once the batch as a whole is accepted, per-document failures are
    /// reported in `BulkResponse::results` and do not fail the call.
    async fn bulk(&self, request: &BulkRequest) -> Result<BulkResponse, SearchIndexError>;

    /// Run a fuzzy full-text query with exact-match filters.
    async fn query(
        &self,
        index: &str,
        query: &QuerySpec,
    ) -> Result<QueryResponse, SearchIndexError>;
}
