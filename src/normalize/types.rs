use super::casing::camel_case;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::slice;

/// Options controlling how a document is normalized
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NormalizeOptions {
    /// Endpoint the document was fetched from. Enables the `meta` section.
    pub endpoint: Option<String>,

    /// Split the endpoint into base path and query string when keying `meta`
    pub filter_endpoint: bool,

    /// Camel-case every non-type key (attributes, links, meta, relationship names)
    pub camelize_keys: bool,

    /// Camel-case `type` values on entities and resource identifiers
    pub camelize_type_values: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        NormalizeOptions {
            endpoint: None,
            filter_endpoint: true,
            camelize_keys: true,
            camelize_type_values: true,
        }
    }
}

impl NormalizeOptions {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_filter_endpoint(mut self, filter_endpoint: bool) -> Self {
        self.filter_endpoint = filter_endpoint;
        self
    }

    pub fn with_camelize_keys(mut self, camelize_keys: bool) -> Self {
        self.camelize_keys = camelize_keys;
        self
    }

    pub fn with_camelize_type_values(mut self, camelize_type_values: bool) -> Self {
        self.camelize_type_values = camelize_type_values;
        self
    }

    /// Output form of an object key
    pub fn key(&self, key: &str) -> String {
        if self.camelize_keys {
            camel_case(key)
        } else {
            key.to_string()
        }
    }

    /// Output form of a `type` value
    pub fn type_value(&self, resource_type: &str) -> String {
        if self.camelize_type_values {
            camel_case(resource_type)
        } else {
            resource_type.to_string()
        }
    }
}

/// A JSON:API top-level document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub data: Option<PrimaryData>,

    #[serde(default)]
    pub included: Option<PrimaryData>,

    #[serde(default)]
    pub links: Option<Value>,

    #[serde(default)]
    pub meta: Option<Value>,
}

impl Document {
    /// Read a document out of a borrowed JSON value
    pub fn deserialize_from(value: &Value) -> Result<Self, serde_json::Error> {
        Document::deserialize(value)
    }
}

/// Either a single resource or a list of resources
#[derive(Debug, Clone)]
pub enum PrimaryData {
    Many(Vec<Resource>),
    One(Resource),
}

impl PrimaryData {
    /// View the section as a sequence; a bare resource is a one-element slice
    pub fn resources(&self) -> &[Resource] {
        match self {
            PrimaryData::Many(resources) => resources,
            PrimaryData::One(resource) => slice::from_ref(resource),
        }
    }
}

impl<'de> Deserialize<'de> for PrimaryData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        one_or_many(deserializer).map(|parsed| match parsed {
            OneOrMany::Many(resources) => PrimaryData::Many(resources),
            OneOrMany::One(resource) => PrimaryData::One(resource),
        })
    }
}

/// A JSON:API resource object
#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(rename = "type")]
    pub resource_type: String,

    #[serde(default)]
    pub attributes: Option<Map<String, Value>>,

    /// Named relationships in document order
    #[serde(default, deserialize_with = "ordered_relationships")]
    pub relationships: Option<Vec<(String, Relationship)>>,

    #[serde(default)]
    pub links: Option<Map<String, Value>>,

    #[serde(default)]
    pub meta: Option<Map<String, Value>>,
}

/// One entry of a resource's `relationships` object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    /// `None` when absent, `Some(None)` for an explicit `null`
    #[serde(default, deserialize_with = "explicit_null")]
    pub data: Option<Option<Linkage>>,

    #[serde(default)]
    pub links: Option<Value>,

    /// An explicit `"meta": null` is kept as `Value::Null`
    #[serde(default, deserialize_with = "keep_null")]
    pub meta: Option<Value>,
}

/// Resource linkage of a relationship
#[derive(Debug, Clone)]
pub enum Linkage {
    Many(Vec<ResourceIdentifier>),
    One(ResourceIdentifier),
}

impl<'de> Deserialize<'de> for Linkage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        one_or_many(deserializer).map(|parsed| match parsed {
            OneOrMany::Many(ids) => Linkage::Many(ids),
            OneOrMany::One(id) => Linkage::One(id),
        })
    }
}

/// The minimal pair naming a resource
///
/// `lid` identifies a resource that has no server-assigned `id` yet. An
/// identifier may carry either, both, or (in malformed input) neither.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(
        default,
        deserialize_with = "optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lid: Option<String>,

    #[serde(rename = "type")]
    pub resource_type: String,
}

impl ResourceIdentifier {
    /// Render as `{id, lid, type}`, leaving out absent ids and applying the
    /// configured type casing
    pub fn to_value(&self, options: &NormalizeOptions) -> Value {
        Value::Object(identifier_map(
            self.id.as_deref(),
            self.lid.as_deref(),
            &self.resource_type,
            options,
        ))
    }
}

pub(crate) fn identifier_map(
    id: Option<&str>,
    lid: Option<&str>,
    resource_type: &str,
    options: &NormalizeOptions,
) -> Map<String, Value> {
    let mut obj = Map::new();
    if let Some(id) = id {
        obj.insert("id".to_string(), Value::String(id.to_string()));
    }
    if let Some(lid) = lid {
        obj.insert("lid".to_string(), Value::String(lid.to_string()));
    }
    obj.insert("type".to_string(), Value::String(options.type_value(resource_type)));
    obj
}

enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

/// Read one item or an array of items, surfacing the inner error as-is
fn one_or_many<'de, T, D>(deserializer: D) -> Result<OneOrMany<T>, D::Error>
where
    T: DeserializeOwned,
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| {
                serde_json::from_value(item)
                    .map_err(|err| de::Error::custom(format!("[{}]: {}", idx, err)))
            })
            .collect::<Result<Vec<T>, D::Error>>()
            .map(OneOrMany::Many),
        other => serde_json::from_value(other)
            .map(OneOrMany::One)
            .map_err(de::Error::custom),
    }
}

fn keep_null<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn explicit_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn ordered_relationships<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<(String, Relationship)>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<Map<String, Value>>::deserialize(deserializer)? {
        Some(raw) => raw,
        None => return Ok(None),
    };

    let mut relationships = Vec::with_capacity(raw.len());
    for (name, value) in raw {
        // Non-object entries carry no linkage or links and are pruned later
        let relationship = if value.is_object() {
            serde_json::from_value(value)
                .map_err(|err| de::Error::custom(format!("relationship `{}`: {}", name, err)))?
        } else {
            Relationship::default()
        };
        relationships.push((name, relationship));
    }

    Ok(Some(relationships))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}
