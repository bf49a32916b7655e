//! JSON:API normalization - flatten documents into a type/id store
//!
//! A document is processed in a fixed pipeline: entities are extracted from
//! `data`, then from `included`, and the two stores are deep-merged so a
//! resource present in both sections ends up as one entity. When an
//! endpoint is configured, a `meta` section listing the top-level resource
//! identifiers for that endpoint is merged in last.

pub mod casing;
pub mod entities;
pub mod keys;
pub mod merge;
pub mod meta;
pub mod normalizer;
pub mod relationships;
pub mod types;

pub use casing::camel_case;
pub use entities::extract_entities;
pub use keys::camelize_keys;
pub use merge::{deep_merge, merge_maps};
pub use meta::{extract_meta_data, split_endpoint};
pub use normalizer::{normalize, normalize_document, Normalizer};
pub use relationships::extract_relationships;
pub use types::{
    Document, Linkage, NormalizeOptions, PrimaryData, Relationship, Resource, ResourceIdentifier,
};
