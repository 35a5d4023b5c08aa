//! Interface definitions for the search adapter.
//!
//! This module defines the `SearchIndexProvider` operation contract and the
//! `HttpTransport` seam through which every backend call is issued, allowing
//! for dependency injection and mock transports in tests.

mod http_transport;
mod search_index_provider;

pub use http_transport::{ContentType, HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use search_index_provider::SearchIndexProvider;
