use super::entities::extract_entities;
use super::merge::merge_maps;
use super::meta::extract_meta_data;
use super::types::{Document, NormalizeOptions};
use crate::error::NormalizeError;
use serde_json::{Map, Value};
use tracing::debug;

/// Normalizes JSON:API documents with a fixed set of options
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Normalizer { options }
    }

    /// Parse and normalize a raw JSON document
    pub fn normalize(&self, document: &Value) -> Result<Value, NormalizeError> {
        if !document.is_object() {
            return Err(NormalizeError::NotAnObject);
        }

        let document = Document::deserialize_from(document)?;
        Ok(self.normalize_document(&document))
    }

    /// Normalize an already-parsed document
    pub fn normalize_document(&self, document: &Document) -> Value {
        let options = &self.options;
        let mut out = Map::new();

        if let Some(data) = &document.data {
            merge_maps(&mut out, extract_entities(data.resources(), options));
        }

        if let Some(included) = &document.included {
            merge_maps(&mut out, extract_entities(included.resources(), options));
        }

        if let Some(endpoint) = &options.endpoint {
            merge_maps(&mut out, extract_meta_data(document, endpoint, options));
        }

        debug!(
            keys = out.len(),
            endpoint = options.endpoint.as_deref(),
            "normalized document"
        );

        Value::Object(out)
    }
}

/// Normalize a raw JSON:API document
pub fn normalize(document: &Value, options: &NormalizeOptions) -> Result<Value, NormalizeError> {
    Normalizer::new(options.clone()).normalize(document)
}

/// Normalize an already-parsed JSON:API document
pub fn normalize_document(document: &Document, options: &NormalizeOptions) -> Value {
    Normalizer::new(options.clone()).normalize_document(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_and_included_merge() {
        let input = json!({
            "data": {"id": "1", "type": "people", "attributes": {"first_name": "Ada"}},
            "included": [
                {"id": "1", "type": "people", "attributes": {"last_name": "Lovelace"}}
            ]
        });

        let out = normalize(&input, &NormalizeOptions::default()).unwrap();

        assert_eq!(
            out["people"]["1"]["attributes"],
            json!({"firstName": "Ada", "lastName": "Lovelace"})
        );
    }

    #[test]
    fn test_no_endpoint_means_no_meta() {
        let input = json!({
            "data": [{"id": "1", "type": "articles"}],
            "meta": {"total": 1}
        });

        let out = normalize(&input, &NormalizeOptions::default()).unwrap();
        assert!(out.get("meta").is_none());
    }

    #[test]
    fn test_empty_document() {
        let out = normalize(&json!({}), &NormalizeOptions::default()).unwrap();
        assert_eq!(out, json!({}));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = normalize(&json!(null), &NormalizeOptions::default()).unwrap_err();
        assert!(matches!(err, NormalizeError::NotAnObject));

        let err = normalize(&json!([1, 2]), &NormalizeOptions::default()).unwrap_err();
        assert!(matches!(err, NormalizeError::NotAnObject));
    }

    #[test]
    fn test_resource_without_id_is_rejected() {
        let input = json!({"data": {"type": "articles"}});
        let err = normalize(&input, &NormalizeOptions::default()).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidDocument(_)));
    }

    #[test]
    fn test_local_identifier_linkage() {
        let input = json!({
            "data": {
                "id": "1",
                "type": "articles",
                "relationships": {"author": {"data": {"lid": "tmp-1", "type": "people"}}}
            }
        });

        let out = normalize(&input, &NormalizeOptions::default()).unwrap();
        assert_eq!(
            out["articles"]["1"]["relationships"]["author"]["data"],
            json!({"lid": "tmp-1", "type": "people"})
        );
    }

    #[test]
    fn test_input_is_not_mutated() {
        let input = json!({"data": {"id": "1", "type": "blog-posts", "attributes": {"a_b": 1}}});
        let before = input.clone();
        let _ = normalize(&input, &NormalizeOptions::default()).unwrap();
        assert_eq!(input, before);
    }

    #[test]
    fn test_normalizer_is_reusable() {
        let normalizer = Normalizer::new(NormalizeOptions::default().with_endpoint("/tags"));
        let first = normalizer
            .normalize(&json!({"data": [{"id": "1", "type": "tags"}]}))
            .unwrap();
        let second = normalizer
            .normalize(&json!({"data": [{"id": "2", "type": "tags"}]}))
            .unwrap();

        assert!(first["tags"].get("2").is_none());
        assert_eq!(second["meta"]["/tags"]["data"], json!([{"id": "2", "type": "tags"}]));
    }
}
