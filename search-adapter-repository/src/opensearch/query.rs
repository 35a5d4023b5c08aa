//! Query DSL construction and hit extraction.

use search_adapter_shared::{Document, QuerySpec};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::alias::{alias_field, into_unaliased};

/// Fuzziness policy for the free-text match: scaled by term length.
pub const FUZZINESS: &str = "AUTO";

/// Build the backend query for `spec`.
///
/// A fuzzy `multi_match` over the requested fields, conjoined with one `term`
/// filter per filter entry. References to `_id` target the alias field.
pub fn to_search_body(spec: &QuerySpec) -> Value {
    let mut multi_match = Map::new();
    multi_match.insert("query".to_string(), json!(spec.query));
    multi_match.insert("fuzziness".to_string(), json!(FUZZINESS));
    if !spec.fields.is_empty() {
        let fields: Vec<&str> = spec.fields.iter().map(|f| alias_field(f)).collect();
        multi_match.insert("fields".to_string(), json!(fields));
    }

    let filter: Vec<Value> = spec
        .filter
        .iter()
        .map(|(field, value)| json!({ "term": { alias_field(field): value } }))
        .collect();

    json!({
        "query": {
            "bool": {
                "must": { "multi_match": multi_match },
                "filter": filter
            }
        }
    })
}

/// Extract the stored documents of a search response, un-aliased, in the
/// order the backend ranked them.
///
/// Hits without an object `_source` carry no document and are skipped.
pub fn extract_matches(response: &Value) -> Vec<Document> {
    let Some(hits) = response.pointer("/hits/hits").and_then(Value::as_array) else {
        return Vec::new();
    };

    let matches: Vec<Document> = hits
        .iter()
        .filter_map(|hit| match hit.get("_source") {
            Some(Value::Object(source)) => Some(into_unaliased(source.clone())),
            _ => None,
        })
        .collect();

    if matches.len() < hits.len() {
        debug!(
            hits = hits.len(),
            skipped = hits.len() - matches.len(),
            "Skipped search hits without a stored source"
        );
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::UNDERSCORE_ID_ALIAS;

    #[test]
    fn test_search_body_aliases_underscore_id() {
        let spec = QuerySpec::new("gatsby")
            .with_fields(["title", "_id"])
            .with_filter("rating", json!(4))
            .with_filter("_id", json!("x"));

        let body = to_search_body(&spec);
        let bool_query = &body["query"]["bool"];

        assert_eq!(
            bool_query["must"]["multi_match"],
            json!({
                "query": "gatsby",
                "fuzziness": "AUTO",
                "fields": ["title", UNDERSCORE_ID_ALIAS]
            })
        );

        let filters = bool_query["filter"].as_array().unwrap();
        assert_eq!(filters.len(), 2);
        assert!(filters.contains(&json!({ "term": { "rating": 4 } })));
        assert!(filters.contains(&json!({ "term": { UNDERSCORE_ID_ALIAS: "x" } })));
        assert!(!body.to_string().contains("\"_id\""));
    }

    #[test]
    fn test_search_body_without_fields_or_filter() {
        let body = to_search_body(&QuerySpec::new("gatsby"));
        assert_eq!(
            body,
            json!({
                "query": {
                    "bool": {
                        "must": { "multi_match": { "query": "gatsby", "fuzziness": "AUTO" } },
                        "filter": []
                    }
                }
            })
        );
    }

    #[test]
    fn test_extract_matches_preserves_order_and_unaliases() {
        let response = json!({
            "hits": {
                "total": { "value": 2 },
                "hits": [
                    { "_id": "b", "_score": 2.0, "_source": { "title": "B", UNDERSCORE_ID_ALIAS: "b" } },
                    { "_id": "a", "_score": 1.0, "_source": { "title": "A" } }
                ]
            }
        });

        let matches = extract_matches(&response);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0]["_id"], json!("b"));
        assert!(!matches[0].contains_key(UNDERSCORE_ID_ALIAS));
        assert_eq!(matches[1]["title"], json!("A"));
    }

    #[test]
    fn test_extract_matches_skips_hits_without_source() {
        let response = json!({
            "hits": {
                "hits": [
                    { "_id": "a" },
                    { "_id": "b", "_source": { "title": "B" } },
                    { "_id": "c", "_source": null }
                ]
            }
        });

        let matches = extract_matches(&response);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["title"], json!("B"));
    }

    #[test]
    fn test_extract_matches_without_hits() {
        assert!(extract_matches(&json!({})).is_empty());
    }
}
