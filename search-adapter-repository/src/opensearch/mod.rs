//! OpenSearch implementation of the search index provider.
//!
//! This module provides a concrete implementation of `SearchIndexProvider`
//! for OpenSearch (and wire-compatible Elasticsearch) backends, together with
//! the pure request builders and response readers it is made of.

pub mod bulk;
pub mod call;
pub mod index_config;
pub mod paths;
pub mod query;
mod provider;
mod transport;

pub use paths::SearchPaths;
pub use provider::{OpenSearchProvider, DOCUMENT_CONFLICT_MESSAGE};
pub use transport::OpenSearchTransport;
