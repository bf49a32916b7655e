use super::relationships::extract_relationships;
use super::types::{identifier_map, Document, NormalizeOptions};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

static QUERY_STRING_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\?.*$").unwrap());

/// Split an endpoint into its base path and query remainder
///
/// The remainder keeps its leading `?` and is empty when the endpoint has
/// no query string.
pub fn split_endpoint(endpoint: &str) -> (&str, &str) {
    match QUERY_STRING_REGEX.find(endpoint) {
        Some(m) => endpoint.split_at(m.start()),
        None => (endpoint, ""),
    }
}

/// Build the `{"meta": {...}}` section describing one endpoint response
///
/// With `filter_endpoint` the section is keyed by base path and then by
/// query remainder, so `/articles?page=1` and `/articles?page=2` live side
/// by side under `/articles`. An endpoint without a query string is keyed
/// by its base path alone. Without `filter_endpoint` the raw endpoint is
/// the only key. Document links are also surfaced under the base path.
pub fn extract_meta_data(
    document: &Document,
    endpoint: &str,
    options: &NormalizeOptions,
) -> Map<String, Value> {
    let (base_path, query) = split_endpoint(endpoint);
    let endpoint_meta = endpoint_meta_object(document, options);

    let mut by_endpoint = Map::new();
    if options.filter_endpoint && !query.is_empty() {
        let mut by_query = Map::new();
        by_query.insert(query.to_string(), Value::Object(endpoint_meta));
        by_endpoint.insert(base_path.to_string(), Value::Object(by_query));
    } else {
        let key = if options.filter_endpoint { base_path } else { endpoint };
        by_endpoint.insert(key.to_string(), Value::Object(endpoint_meta));
    }

    if let Some(links) = &document.links {
        if let Some(base) = by_endpoint
            .entry(base_path)
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
        {
            base.insert("links".to_string(), links.clone());
        }
    }

    debug!(endpoint, base_path, query, "extracted endpoint metadata");

    let mut out = Map::new();
    out.insert("meta".to_string(), Value::Object(by_endpoint));
    out
}

fn endpoint_meta_object(document: &Document, options: &NormalizeOptions) -> Map<String, Value> {
    let mut meta_object = Map::new();

    // No primary data leaves `data` as an empty object rather than an empty array
    let data = match &document.data {
        Some(data) => Value::Array(
            data.resources()
                .iter()
                .map(|resource| {
                    let mut listing = identifier_map(
                        Some(&resource.id),
                        None,
                        &resource.resource_type,
                        options,
                    );
                    if let Some(relationships) = &resource.relationships {
                        listing.insert(
                            "relationships".to_string(),
                            Value::Object(extract_relationships(relationships, options)),
                        );
                    }
                    Value::Object(listing)
                })
                .collect(),
        ),
        None => Value::Object(Map::new()),
    };
    meta_object.insert("data".to_string(), data);

    if let Some(links) = &document.links {
        meta_object.insert("links".to_string(), links.clone());
    }

    if let Some(meta) = &document.meta {
        meta_object.insert("meta".to_string(), meta.clone());
    }

    meta_object
}
