//! Search index service implementation.
//!
//! This module provides the main entry point for application code. It
//! validates inputs that the backend would reject or misinterpret (index
//! names, document keys) before anything reaches the network, and delegates
//! the operations themselves to a `SearchIndexProvider`.

use search_adapter_shared::{IndexSpec, QuerySpec};
use tracing::debug;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::types::{
    BulkRequest, BulkResponse, DocumentRef, GetDocumentResponse, IndexDocumentRequest,
    QueryResponse,
};

/// Characters the backend refuses in index names.
const FORBIDDEN_INDEX_CHARS: &[char] = &['\\', '/', '*', '?', '"', '<', '>', '|', ' ', ',', '#'];

/// Longest index name the backend accepts, in bytes.
const MAX_INDEX_NAME_BYTES: usize = 255;

/// The main service for interacting with the search index.
///
/// # Example
///
/// ```no_run
/// use search_adapter_repository::{OpenSearchProvider, SearchAdapterConfig, SearchIndexService};
/// use search_adapter_repository::types::DocumentRef;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SearchAdapterConfig::new("http://localhost:9200")?;
/// let provider = Box::new(OpenSearchProvider::new(&config)?);
/// let service = SearchIndexService::new(provider);
///
/// let found = service.get_doc(DocumentRef::new("movies", "tgg")).await?;
/// println!("{:?}", found.doc);
/// # Ok(())
/// # }
/// ```
pub struct SearchIndexService {
    provider: Box<dyn SearchIndexProvider>,
}

impl SearchIndexService {
    /// Create a new SearchIndexService.
    ///
    /// # Arguments
    ///
    /// * `provider` - A boxed implementation of `SearchIndexProvider` (e.g., `OpenSearchProvider`)
    pub fn new(provider: Box<dyn SearchIndexProvider>) -> Self {
        Self { provider }
    }

    /// Validate an index name against the backend's naming rules.
    pub fn validate_index_name(index: &str) -> Result<(), SearchIndexError> {
        if index.is_empty() {
            return Err(SearchIndexError::validation("index name is required"));
        }
        if index == "." || index == ".." {
            return Err(SearchIndexError::validation(format!(
                "index name '{}' is not allowed",
                index
            )));
        }
        if index.starts_with(['-', '_', '+']) {
            return Err(SearchIndexError::validation(format!(
                "index name '{}' must not start with '-', '_' or '+'",
                index
            )));
        }
        if index.chars().any(char::is_uppercase) {
            return Err(SearchIndexError::validation(format!(
                "index name '{}' must be lowercase",
                index
            )));
        }
        if index.contains(FORBIDDEN_INDEX_CHARS) {
            return Err(SearchIndexError::validation(format!(
                "index name '{}' contains invalid characters",
                index
            )));
        }
        if index.len() > MAX_INDEX_NAME_BYTES {
            return Err(SearchIndexError::validation(format!(
                "index name must be at most {} bytes",
                MAX_INDEX_NAME_BYTES
            )));
        }
        Ok(())
    }

    fn validate_key(key: &str) -> Result<(), SearchIndexError> {
        if key.is_empty() {
            return Err(SearchIndexError::validation("document key is required"));
        }
        Ok(())
    }

    /// Create an index mapping each of `spec.fields` as a full-text field.
    pub async fn create_index(&self, spec: IndexSpec) -> Result<(), SearchIndexError> {
        Self::validate_index_name(&spec.index)?;
        self.provider.create_index(&spec).await
    }

    /// Delete an index. Fails with `NotFound` if the index does not exist.
    pub async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError> {
        Self::validate_index_name(index)?;
        self.provider.delete_index(index).await
    }

    /// Store a new document. Fails with `Conflict` if the key is in use.
    pub async fn index_doc(&self, request: IndexDocumentRequest) -> Result<(), SearchIndexError> {
        Self::validate_index_name(&request.index)?;
        Self::validate_key(&request.key)?;
        self.provider.index_doc(&request).await
    }

    /// Fetch a document by key.
    pub async fn get_doc(
        &self,
        request: DocumentRef,
    ) -> Result<GetDocumentResponse, SearchIndexError> {
        Self::validate_index_name(&request.index)?;
        Self::validate_key(&request.key)?;
        self.provider.get_doc(&request).await
    }

    /// Replace a document, creating it if absent.
    pub async fn update_doc(&self, request: IndexDocumentRequest) -> Result<(), SearchIndexError> {
        Self::validate_index_name(&request.index)?;
        Self::validate_key(&request.key)?;
        self.provider.update_doc(&request).await
    }

    /// Remove a document. Succeeds if the document is already gone.
    pub async fn remove_doc(&self, request: DocumentRef) -> Result<(), SearchIndexError> {
        Self::validate_index_name(&request.index)?;
        Self::validate_key(&request.key)?;
        self.provider.remove_doc(&request).await
    }

    /// Write many documents in one backend call.
    ///
    /// An empty batch still goes to the provider, which checks the index.
    pub async fn bulk(&self, request: BulkRequest) -> Result<BulkResponse, SearchIndexError> {
        Self::validate_index_name(&request.index)?;

        debug!(index = %request.index, docs = request.docs.len(), "Submitting bulk request");
        self.provider.bulk(&request).await
    }

    /// Run a query against an index.
    pub async fn query(
        &self,
        index: &str,
        query: QuerySpec,
    ) -> Result<QueryResponse, SearchIndexError> {
        Self::validate_index_name(index)?;
        self.provider.query(index, &query).await
    }
}
