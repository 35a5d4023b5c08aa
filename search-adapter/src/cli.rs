//! Argument parsing and command execution.

use clap::{Parser, Subcommand};
use search_adapter_repository::types::{BulkRequest, DocumentRef, IndexDocumentRequest};
use search_adapter_repository::{to_response_json, SearchIndexError, SearchIndexService};
use search_adapter_shared::{Document, IndexSpec, QuerySpec};
use serde_json::Value;
use tracing::debug;

use crate::AppError;

#[derive(Parser, Debug)]
#[command(name = "search-adapter")]
#[command(about = "Document and query operations against an OpenSearch-compatible backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create an index with full-text fields
    CreateIndex {
        index: String,

        /// Field to map as full text (repeatable)
        #[arg(long = "field")]
        fields: Vec<String>,
    },

    /// Delete an index
    DeleteIndex { index: String },

    /// Store a new document; fails if the key is in use
    IndexDoc {
        index: String,
        key: String,

        /// Document as a JSON object
        doc: String,
    },

    /// Fetch a document by key
    GetDoc { index: String, key: String },

    /// Replace a document, creating it if absent
    UpdateDoc {
        index: String,
        key: String,

        /// Document as a JSON object
        doc: String,
    },

    /// Remove a document
    RemoveDoc { index: String, key: String },

    /// Write many documents in one call
    Bulk {
        index: String,

        /// Documents as a JSON array of objects, each with an id or _id
        docs: String,
    },

    /// Run a fuzzy full-text query
    Query {
        index: String,
        text: String,

        /// Field to match against (repeatable)
        #[arg(long = "field")]
        fields: Vec<String>,

        /// Exact-match filter as field=value (repeatable)
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, Value)>,
    },
}

/// Parse a `field=value` filter.
///
/// The value is read as JSON when it parses (`rating=4`, `flag=true`) and
/// as a plain string otherwise.
pub fn parse_filter(raw: &str) -> Result<(String, Value), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid filter '{}': expected field=value", raw))?;

    if field.is_empty() {
        return Err(format!("invalid filter '{}': field is empty", raw));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((field.to_string(), value))
}

/// Parse a document argument, which must be a JSON object.
pub fn parse_document(raw: &str) -> Result<Document, SearchIndexError> {
    serde_json::from_str(raw)
        .map_err(|e| SearchIndexError::validation(format!("invalid document: {}", e)))
}

/// Parse a bulk argument, which must be a JSON array of objects.
pub fn parse_documents(raw: &str) -> Result<Vec<Document>, SearchIndexError> {
    serde_json::from_str(raw)
        .map_err(|e| SearchIndexError::validation(format!("invalid document list: {}", e)))
}

/// Run `command` against `service` and render its result.
///
/// Operation failures, including unparseable arguments, are rendered as
/// `{ok: false, status, msg}`; only a rendering failure is an `Err`.
pub async fn execute(service: &SearchIndexService, command: Command) -> Result<Value, AppError> {
    debug!(command = ?command, "Executing command");

    let rendered = match command {
        Command::CreateIndex { index, fields } => {
            to_response_json(&service.create_index(IndexSpec::new(index, fields)).await)
        }
        Command::DeleteIndex { index } => to_response_json(&service.delete_index(&index).await),
        Command::IndexDoc { index, key, doc } => {
            let result = match parse_document(&doc) {
                Ok(doc) => {
                    service
                        .index_doc(IndexDocumentRequest::new(index, key, doc))
                        .await
                }
                Err(e) => Err(e),
            };
            to_response_json(&result)
        }
        Command::GetDoc { index, key } => {
            to_response_json(&service.get_doc(DocumentRef::new(index, key)).await)
        }
        Command::UpdateDoc { index, key, doc } => {
            let result = match parse_document(&doc) {
                Ok(doc) => {
                    service
                        .update_doc(IndexDocumentRequest::new(index, key, doc))
                        .await
                }
                Err(e) => Err(e),
            };
            to_response_json(&result)
        }
        Command::RemoveDoc { index, key } => {
            to_response_json(&service.remove_doc(DocumentRef::new(index, key)).await)
        }
        Command::Bulk { index, docs } => {
            let result = match parse_documents(&docs) {
                Ok(docs) => service.bulk(BulkRequest::new(index, docs)).await,
                Err(e) => Err(e),
            };
            to_response_json(&result)
        }
        Command::Query {
            index,
            text,
            fields,
            filters,
        } => {
            let spec = filters
                .into_iter()
                .fold(QuerySpec::new(text).with_fields(fields), |spec, (field, value)| {
                    spec.with_filter(field, value)
                });
            to_response_json(&service.query(&index, spec).await)
        }
    };

    rendered.map_err(AppError::from)
}

/// Whether a rendered result reports success.
pub fn is_ok(rendered: &Value) -> bool {
    rendered.get("ok") == Some(&Value::Bool(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_filter_json_and_string_values() {
        assert_eq!(parse_filter("rating=4").unwrap(), ("rating".to_string(), json!(4)));
        assert_eq!(
            parse_filter("_id=tgg").unwrap(),
            ("_id".to_string(), json!("tgg"))
        );
        assert_eq!(
            parse_filter("title=a=b").unwrap(),
            ("title".to_string(), json!("a=b"))
        );
    }

    #[test]
    fn test_parse_filter_rejects_malformed() {
        assert!(parse_filter("rating").is_err());
        assert!(parse_filter("=4").is_err());
    }

    #[test]
    fn test_parse_document_requires_object() {
        assert!(parse_document(r#"{"title": "x"}"#).is_ok());

        let err = parse_document("[1, 2]").unwrap_err();
        assert_eq!(err.status(), 422);
    }

    #[test]
    fn test_parse_documents() {
        let docs = parse_documents(r#"[{"id": "a"}, {"_id": "b"}]"#).unwrap();
        assert_eq!(docs.len(), 2);

        assert!(parse_documents(r#"{"id": "a"}"#).is_err());
    }

    #[test]
    fn test_cli_parses_query() {
        let cli = Cli::try_parse_from([
            "search-adapter",
            "query",
            "movies",
            "gatsby",
            "--field",
            "title",
            "--filter",
            "rating=4",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::Query {
                index: "movies".to_string(),
                text: "gatsby".to_string(),
                fields: vec!["title".to_string()],
                filters: vec![("rating".to_string(), json!(4))],
            }
        );
    }

    #[test]
    fn test_cli_parses_create_index_fields() {
        let cli = Cli::try_parse_from([
            "search-adapter",
            "create-index",
            "movies",
            "--field",
            "title",
            "--field",
            "plot",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::CreateIndex {
                index: "movies".to_string(),
                fields: vec!["title".to_string(), "plot".to_string()],
            }
        );
    }

    #[test]
    fn test_is_ok() {
        assert!(is_ok(&json!({ "ok": true })));
        assert!(!is_ok(&json!({ "ok": false, "status": 404, "msg": "x" })));
    }
}
