use super::keys::{camelize_map, camelize_top_level};
use super::relationships::extract_relationships;
use super::types::{NormalizeOptions, Resource};
use serde_json::{Map, Value};
use tracing::debug;

/// Build `type -> id -> entity` from a list of resources
///
/// A resource repeated within the same list refines the entry created for
/// its first occurrence instead of adding a second one.
pub fn extract_entities(resources: &[Resource], options: &NormalizeOptions) -> Map<String, Value> {
    let mut store: Map<String, Value> = Map::new();

    for resource in resources {
        let type_key = options.key(&resource.resource_type);

        let Some(by_id) = store
            .entry(type_key)
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
        else {
            continue;
        };

        let Some(entity) = by_id
            .entry(resource.id.clone())
            .or_insert_with(|| seed_entity(&resource.id))
            .as_object_mut()
        else {
            continue;
        };

        fill_entity(entity, resource, options);
    }

    debug!(
        resources = resources.len(),
        types = store.len(),
        "extracted entities"
    );

    store
}

fn seed_entity(id: &str) -> Value {
    let mut seed = Map::new();
    seed.insert("id".to_string(), Value::String(id.to_string()));
    Value::Object(seed)
}

fn fill_entity(entity: &mut Map<String, Value>, resource: &Resource, options: &NormalizeOptions) {
    entity.insert(
        "type".to_string(),
        Value::String(options.type_value(&resource.resource_type)),
    );

    if options.camelize_keys {
        let attributes = resource
            .attributes
            .as_ref()
            .map(camelize_map)
            .unwrap_or_default();
        entity.insert("attributes".to_string(), Value::Object(attributes));
    } else {
        match &resource.attributes {
            Some(attributes) => {
                entity.insert("attributes".to_string(), Value::Object(attributes.clone()));
            }
            None => {
                entity.remove("attributes");
            }
        }
    }

    if let Some(links) = &resource.links {
        // Link values are copied as-is; only the link names are cased
        let links = if options.camelize_keys {
            camelize_top_level(links)
        } else {
            links.clone()
        };
        entity.insert("links".to_string(), Value::Object(links));
    }

    if let Some(relationships) = &resource.relationships {
        entity.insert(
            "relationships".to_string(),
            Value::Object(extract_relationships(relationships, options)),
        );
    }

    if let Some(meta) = &resource.meta {
        let meta = if options.camelize_keys {
            camelize_map(meta)
        } else {
            meta.clone()
        };
        entity.insert("meta".to_string(), Value::Object(meta));
    }
}
