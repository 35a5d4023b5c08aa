//! This module defines the core data structures used across the search adapter.
//! It re-exports `Document`, `IndexSpec` and `QuerySpec`.

pub mod document;
pub mod index_spec;
pub mod query_spec;

pub use document::Document;
pub use index_spec::IndexSpec;
pub use query_spec::QuerySpec;
