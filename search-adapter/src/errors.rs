//! Error types for the search adapter command line.

use search_adapter_repository::SearchIndexError;
use thiserror::Error;

/// Errors that stop the command line before or after a search operation.
///
/// Failures of the operation itself are not `AppError`s: they are printed in
/// the `{ok: false, ...}` shape like any other result.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The backend client could not be set up.
    #[error("Search backend error: {0}")]
    SearchError(#[from] SearchIndexError),

    /// A result could not be rendered as JSON.
    #[error("Output error: {0}")]
    OutputError(#[from] serde_json::Error),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
