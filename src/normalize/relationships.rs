use super::keys::camelize_keys;
use super::types::{Linkage, NormalizeOptions, Relationship};
use serde_json::{Map, Value};

/// Reduce a resource's relationships to `name -> {data, meta, links}`
///
/// Linkage becomes bare `{id, lid, type}` identifiers with absent ids left
/// out. An explicit `"data": null` is kept as `null`; entries left with
/// nothing at all are dropped.
pub fn extract_relationships(
    relationships: &[(String, Relationship)],
    options: &NormalizeOptions,
) -> Map<String, Value> {
    let mut out = Map::new();

    for (name, relationship) in relationships {
        let normalized = normalize_relationship(relationship, options);
        if normalized.is_empty() {
            continue;
        }
        out.insert(options.key(name), Value::Object(normalized));
    }

    out
}

fn normalize_relationship(
    relationship: &Relationship,
    options: &NormalizeOptions,
) -> Map<String, Value> {
    let mut out = Map::new();

    if let Some(data) = &relationship.data {
        let linkage = match data {
            Some(Linkage::Many(ids)) => {
                Value::Array(ids.iter().map(|id| id.to_value(options)).collect())
            }
            Some(Linkage::One(id)) => id.to_value(options),
            None => Value::Null,
        };
        out.insert("data".to_string(), linkage);

        // Relationship meta is always key-normalized, independent of camelize_keys
        if let Some(meta) = &relationship.meta {
            out.insert("meta".to_string(), camelize_keys(meta));
        }
    }

    if let Some(links) = &relationship.links {
        let links = if options.camelize_keys {
            camelize_keys(links)
        } else {
            links.clone()
        };
        out.insert("links".to_string(), links);
    }

    out
}
