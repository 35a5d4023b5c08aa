//! Error types for the search adapter repository.
//!
//! This module provides the normalized error surfaced to callers and the
//! translator that builds it from backend error bodies.

mod backend_error;
mod search_index_error;

pub use backend_error::{BackendError, ErrorContext};
pub use search_index_error::{SearchIndexError, DEFAULT_ERROR_STATUS};
