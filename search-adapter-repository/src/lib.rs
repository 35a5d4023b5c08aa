//! # Search Adapter Repository
//!
//! This crate exposes a small document-store and search contract (create and
//! delete indexes, index/get/update/remove documents, bulk writes, queries)
//! and implements it on top of the stateless HTTP API of an OpenSearch
//! compatible backend. It includes the normalized error taxonomy, the
//! reserved `_id` aliasing, the request builders, and the HTTP transport seam.

pub mod alias;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod service;
pub mod types;

pub use config::SearchAdapterConfig;
pub use errors::{BackendError, ErrorContext, SearchIndexError};
pub use interfaces::{HttpTransport, SearchIndexProvider};
pub use opensearch::{OpenSearchProvider, OpenSearchTransport};
pub use service::SearchIndexService;
pub use types::{
    to_response_json, BulkItemResult, BulkRequest, BulkResponse, DocumentRef,
    GetDocumentResponse, IndexDocumentRequest, QueryResponse,
};
