//! # Search Adapter Shared
//!
//! This crate defines the data structures exchanged with the search adapter:
//! open JSON documents, index specifications and structured queries.

pub mod types;

pub use types::document::{document_id, Document};
pub use types::index_spec::IndexSpec;
pub use types::query_spec::QuerySpec;
