//! Index mapping payloads.
//!
//! Translates an `IndexSpec` into the body of a create-index call: every field
//! becomes a full-text field, with `_id` renamed to the alias field.

use search_adapter_shared::IndexSpec;
use serde_json::{json, Map, Value};

use crate::alias::alias_field;

/// Mapping type assigned to every field.
pub const FIELD_TYPE: &str = "text";

/// Build the create-index payload for `spec`.
///
/// ```json
/// { "mappings": { "properties": { "title": { "type": "text" } } } }
/// ```
pub fn get_index_mappings(spec: &IndexSpec) -> Value {
    let properties: Map<String, Value> = spec
        .fields
        .iter()
        .map(|field| (alias_field(field).to_string(), json!({ "type": FIELD_TYPE })))
        .collect();

    json!({
        "mappings": {
            "properties": properties
        }
    })
}
